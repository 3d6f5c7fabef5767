//! Provenance: the append-only proof log and rule identifiers.
//!
//! Proven propositions never own their derivation; they index into the
//! kernel's log. The log owns every step, so provenance forms no cycles and
//! a derivation can be reconstructed by backward traversal from any step.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::prop::Formula;

/// Index of a proof step in the kernel's log.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProofId(pub(crate) u32);

impl ProofId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// Index of an assumption in the kernel's assumption registry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssumptionId(pub(crate) u32);

impl AssumptionId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// The rule that minted a proven proposition.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    Given,
    Axiom,
    ByInspection,
    ByEval,
    BySimplification,
    ModusPonens,
    ModusTollens,
    AndIntro,
    AndElim,
    OrIntro,
    ExOrIntro,
    ByCases,
    HypotheticalSyllogism,
    Contrapositive,
    IffForward,
    IffBackward,
    IffConverse,
    IffToConjunction,
    Resolve,
    UnitResolve,
    DefiniteClauseResolve,
    DeMorgan,
    UniversalInstantiation,
    UniversalInstantiationInSet,
    IsSpecialCaseOf,
    ExistentialIntroduction,
    ExistentialElimination,
    SubstituteEquals,
    Contradicts,
    ExFalso,
    DoubleNegation,
    ImplElim,
    OneProvenRemFalse,
    QuantifiedModusPonens,
    ExistsModusPonens,
    ThusThereExists,
    LeftDistribute,
    RightDistribute,
    DeNest,
    Reflexive,
    Symmetric,
    Transitive,
    ToLessThan,
    ToGreaterThan,
    WeakenInequality,
    ThusContainedInB,
    CloseAssumptionsContext,
}

impl Rule {
    /// The rule's display name, as shown in `deduced_from` provenance.
    pub fn name(self) -> &'static str {
        match self {
            Rule::Given => "given",
            Rule::Axiom => "axiom",
            Rule::ByInspection => "by_inspection",
            Rule::ByEval => "by_eval",
            Rule::BySimplification => "by_simplification",
            Rule::ModusPonens => "modus_ponens",
            Rule::ModusTollens => "modus_tollens",
            Rule::AndIntro => "and_intro",
            Rule::AndElim => "is_one_of",
            Rule::OrIntro => "one_proven",
            Rule::ExOrIntro => "exor_intro",
            Rule::ByCases => "by_cases",
            Rule::HypotheticalSyllogism => "hypothetical_syllogism",
            Rule::Contrapositive => "contrapositive",
            Rule::IffForward => "forward_implication",
            Rule::IffBackward => "reverse_implication",
            Rule::IffConverse => "converse",
            Rule::IffToConjunction => "to_conjunction",
            Rule::Resolve => "resolve",
            Rule::UnitResolve => "unit_resolve",
            Rule::DefiniteClauseResolve => "definite_clause_resolve",
            Rule::DeMorgan => "de_morgan",
            Rule::UniversalInstantiation => "universal_instantiation",
            Rule::UniversalInstantiationInSet => "universal_instantiation_in_set",
            Rule::IsSpecialCaseOf => "is_special_case_of",
            Rule::ExistentialIntroduction => "existential_introduction",
            Rule::ExistentialElimination => "existential_elimination",
            Rule::SubstituteEquals => "substitute_equals",
            Rule::Contradicts => "contradicts",
            Rule::ExFalso => "ex_falso",
            Rule::DoubleNegation => "double_negation",
            Rule::ImplElim => "impl_elim",
            Rule::OneProvenRemFalse => "one_proven_rem_false",
            Rule::QuantifiedModusPonens => "quantified_modus_ponens",
            Rule::ExistsModusPonens => "exists_modus_ponens",
            Rule::ThusThereExists => "thus_there_exists",
            Rule::LeftDistribute => "left_distribute",
            Rule::RightDistribute => "right_distribute",
            Rule::DeNest => "de_nest",
            Rule::Reflexive => "reflexive",
            Rule::Symmetric => "symmetric",
            Rule::Transitive => "transitive",
            Rule::ToLessThan => "to_less_than",
            Rule::ToGreaterThan => "to_greater_than",
            Rule::WeakenInequality => "weaken_inequality",
            Rule::ThusContainedInB => "thus_contained_in_b",
            Rule::CloseAssumptionsContext => "close_assumptions_context",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One entry of the proof log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofStep {
    /// The rule that produced this conclusion.
    pub rule: Rule,
    /// Log indices of the premises, in the order they were supplied.
    pub premises: Vec<ProofId>,
    /// The concluded formula.
    pub conclusion: Formula,
    /// Open assumptions this conclusion relies on, transitively.
    pub support: BTreeSet<AssumptionId>,
}
