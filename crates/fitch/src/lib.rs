//! fitch: an interactive proof assistant for classical and intuitionistic
//! propositional and first-order logic, with a light theory layer.
//!
//! Proofs are built by composing checked inference rules on propositions;
//! a proposition is proven exactly when the kernel has minted it through a
//! rule application or a trusted oracle. The backward prover searches the
//! propositional fragment goal-first, using the same kernel primitives.

pub mod config;
pub mod error;
pub mod json;
pub mod kernel;
pub mod oracle;
pub mod prop;
pub mod prover;
pub mod subst;
pub mod term;

// Re-export commonly used types
pub use config::{ProofConfig, SearchConfig};
pub use error::{ProofError, Result};
pub use kernel::{AssumptionId, Kernel, ProofId, ProofStep, Proposition, Rule, Side};
pub use prop::{are_negs, de_morgan, neg, Formula};
pub use prover::prove;
pub use subst::{match_formula, substitute, Bindings};
pub use term::{Attributes, Constant, ExprOp, Sequence, SetSymbol, Term, Ternary, Variable};
