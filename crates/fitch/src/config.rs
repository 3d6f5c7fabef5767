//! Kernel and prover configuration records.
//!
//! The original design kept a process-wide settings dictionary; here the
//! configuration is a plain value handed to `Kernel::new` and to the prover
//! entry point, so independent proofs can run with different settings.

use serde::{Deserialize, Serialize};

/// Configuration for a proof kernel instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofConfig {
    /// Enables classical-only reasoning: proof by contradiction in the
    /// prover, double-negation elimination, `resolve`, `impl_elim`, and the
    /// classical branches of negation and De Morgan.
    pub use_classical_logic: bool,
    /// Whether callers prefer the proposition-returning comparison builders
    /// over the boolean-returning ones. Recorded for API compatibility; the
    /// kernel behaves identically either way.
    pub ops_return_props: bool,
    /// Render every parenthesis instead of only the necessary ones. Affects
    /// display only, never kernel behavior.
    pub show_all_parentheses: bool,
}

impl Default for ProofConfig {
    fn default() -> Self {
        ProofConfig {
            use_classical_logic: true,
            ops_return_props: false,
            show_all_parentheses: false,
        }
    }
}

/// Configuration for the backward proof search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum recursion depth. `None` means proportional to the number of
    /// premises supplied.
    pub max_depth: Option<usize>,
}

impl SearchConfig {
    /// Resolve the effective depth limit for a premise set of the given size.
    pub fn effective_depth(&self, premise_count: usize) -> usize {
        self.max_depth.unwrap_or(4 * (premise_count + 2))
    }
}
