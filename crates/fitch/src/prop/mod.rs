//! Propositions: the logical formula AST and its builders.

pub mod build;
pub mod formula;

pub use formula::{are_negs, de_morgan, neg, Formula};

use crate::config::ProofConfig;

/// Render a formula under the given configuration.
/// `show_all_parentheses` selects the fully parenthesized form.
pub fn render(f: &Formula, config: &ProofConfig) -> String {
    if config.show_all_parentheses {
        format!("{:#}", f)
    } else {
        f.to_string()
    }
}
