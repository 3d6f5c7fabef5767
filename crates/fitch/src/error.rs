//! Error types for the proof kernel and prover.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProofError {
    /// A structural precondition of an inference rule failed. The first field
    /// names the rule, the second describes the mismatch.
    #[error("rule {0} not applicable: {1}")]
    RuleNotApplicable(&'static str, String),

    /// A rule received an input that is not proven under the current frame
    /// stack (never minted, or its supporting assumptions were discharged).
    #[error("unproven input: {0}")]
    UnprovenInput(String),

    /// Misuse of the assumption-context stack.
    #[error("context misuse: {0}")]
    ContextMisuse(&'static str),

    /// The backward prover exhausted its rule table for this goal.
    #[error("no rule applies to goal: {0}")]
    NoRuleApplies(String),

    /// An oracle could not decide the proposition.
    #[error("oracle refused: {0}")]
    OracleRefused(String),

    /// A substitution would have captured a free variable.
    #[error("capture violation: {0}")]
    CaptureViolation(String),
}

pub type Result<T> = std::result::Result<T, ProofError>;
