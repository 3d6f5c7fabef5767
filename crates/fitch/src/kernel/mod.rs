//! The proof kernel: proven propositions, the assumption-context stack, and
//! the checked inference rules.
//!
//! A proposition is proven iff the kernel has minted it through a rule
//! application or an oracle, and every assumption in its transitive support
//! is still open. The kernel owns the proof log; propositions only index
//! into it, so `proven` can be revoked wholesale when a frame closes.

mod context;
pub mod provenance;
mod rules;
mod theory;

pub use provenance::{AssumptionId, ProofId, ProofStep, Rule};
pub use rules::Side;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::config::ProofConfig;
use crate::error::{ProofError, Result};
use crate::prop::Formula;
use crate::term::{Attributes, Variable};

use context::{Frame, FrameItem};

/// A proposition: a formula plus the kernel bookkeeping that records whether
/// and how it was proven.
///
/// Equality and hashing are structural on the formula; provenance is not
/// part of identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposition {
    pub formula: Formula,
    pub(crate) proof: Option<ProofId>,
    pub(crate) assumption: Option<AssumptionId>,
}

impl Proposition {
    /// An unproven proposition carrying `formula`.
    pub fn unproven(formula: Formula) -> Self {
        Proposition {
            formula,
            proof: None,
            assumption: None,
        }
    }

    /// Whether the kernel ever minted this proposition. Whether it is still
    /// proven under the current frame stack is answered by
    /// [`Kernel::is_proven`].
    pub fn is_minted(&self) -> bool {
        self.proof.is_some()
    }

    /// The proof-log index of this proposition, if minted.
    pub fn provenance(&self) -> Option<ProofId> {
        self.proof
    }

    /// Whether this proposition entered the kernel as an assumption.
    pub fn is_assumption(&self) -> bool {
        self.assumption.is_some()
    }
}

impl PartialEq for Proposition {
    fn eq(&self, other: &Self) -> bool {
        self.formula == other.formula
    }
}

impl Eq for Proposition {}

impl Hash for Proposition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.formula.hash(state);
    }
}

impl fmt::Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formula)
    }
}

#[derive(Debug, Clone)]
struct AssumptionRecord {
    formula: Formula,
    live: bool,
}

/// The proof kernel.
pub struct Kernel {
    config: ProofConfig,
    log: Vec<ProofStep>,
    assumptions: Vec<AssumptionRecord>,
    /// Frame stack; index 0 is the root frame, which never closes.
    frames: Vec<Frame>,
    last_closed: Vec<Proposition>,
    fresh_counter: u32,
}

impl Kernel {
    pub fn new(config: ProofConfig) -> Self {
        Kernel {
            config,
            log: Vec::new(),
            assumptions: Vec::new(),
            frames: vec![Frame::default()],
            last_closed: Vec::new(),
            fresh_counter: 0,
        }
    }

    pub fn config(&self) -> &ProofConfig {
        &self.config
    }

    pub(crate) fn classical(&self) -> bool {
        self.config.use_classical_logic
    }

    /// Nesting depth of the frame stack; 0 means only the root frame is
    /// open.
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// The full proof log.
    pub fn log(&self) -> &[ProofStep] {
        &self.log
    }

    /// Look up a proof step by id.
    pub fn step(&self, id: ProofId) -> Option<&ProofStep> {
        self.log.get(id.0 as usize)
    }

    /// The formula of a registered assumption.
    pub fn assumption_formula(&self, id: AssumptionId) -> Option<&Formula> {
        self.assumptions.get(id.0 as usize).map(|a| &a.formula)
    }

    // ---- proven-ness ----

    /// Whether `p` is proven under the current frame stack.
    pub fn is_proven(&self, p: &Proposition) -> bool {
        self.check_proven(p).is_ok()
    }

    /// Verify that `p` was minted and that its entire support is still open.
    pub(crate) fn check_proven(&self, p: &Proposition) -> Result<ProofId> {
        let id = p
            .proof
            .ok_or_else(|| ProofError::UnprovenInput(p.formula.to_string()))?;
        let step = self
            .log
            .get(id.0 as usize)
            .ok_or_else(|| ProofError::UnprovenInput(p.formula.to_string()))?;
        if step.conclusion != p.formula {
            return Err(ProofError::UnprovenInput(p.formula.to_string()));
        }
        if step
            .support
            .iter()
            .all(|aid| self.assumptions[aid.0 as usize].live)
        {
            Ok(id)
        } else {
            Err(ProofError::UnprovenInput(format!(
                "{} (a supporting assumption was discharged)",
                p.formula
            )))
        }
    }

    /// Append a step whose support is the union of its premises' supports.
    pub(crate) fn mint(
        &mut self,
        rule: Rule,
        premises: Vec<ProofId>,
        conclusion: Formula,
    ) -> Proposition {
        let mut support = BTreeSet::new();
        for pid in &premises {
            support.extend(self.log[pid.0 as usize].support.iter().copied());
        }
        self.push_step(rule, premises, conclusion, support)
    }

    /// Append a step with no premises and no support on behalf of a trusted
    /// oracle. The oracle module is the only caller.
    pub(crate) fn mint_oracle(&mut self, rule: Rule, conclusion: Formula) -> Proposition {
        self.push_step(rule, Vec::new(), conclusion, BTreeSet::new())
    }

    fn push_step(
        &mut self,
        rule: Rule,
        premises: Vec<ProofId>,
        conclusion: Formula,
        support: BTreeSet<AssumptionId>,
    ) -> Proposition {
        let id = ProofId(self.log.len() as u32);
        self.log.push(ProofStep {
            rule,
            premises,
            conclusion: conclusion.clone(),
            support,
        });
        Proposition {
            formula: conclusion,
            proof: Some(id),
            assumption: None,
        }
    }

    // ---- assumption-context stack ----

    /// Push a new frame.
    pub fn open(&mut self) {
        self.frames.push(Frame::default());
    }

    /// Create a fresh variable owned by the current frame. Closing the frame
    /// generalizes concluded propositions over it.
    pub fn declare_variable(
        &mut self,
        name: impl Into<String>,
        attrs: Attributes,
    ) -> Result<Variable> {
        if self.depth() == 0 {
            return Err(ProofError::ContextMisuse(
                "declare_variable outside an open frame",
            ));
        }
        let var = Variable::with_attrs(name, attrs);
        self.frames
            .last_mut()
            .expect("frame stack is never empty")
            .items
            .push(FrameItem::Variable(var.clone()));
        Ok(var)
    }

    /// Mark `formula` as proven by assumption and record it in the current
    /// frame. In the root frame this is a global assumption.
    pub fn assume(&mut self, formula: Formula) -> Proposition {
        let aid = AssumptionId(self.assumptions.len() as u32);
        self.assumptions.push(AssumptionRecord {
            formula: formula.clone(),
            live: true,
        });
        self.frames
            .last_mut()
            .expect("frame stack is never empty")
            .items
            .push(FrameItem::Assumption(aid));
        let mut support = BTreeSet::new();
        support.insert(aid);
        let mut p = self.push_step(Rule::Given, Vec::new(), formula, support);
        p.assumption = Some(aid);
        p
    }

    /// Register `p` as a desired conclusion of the current frame. On an
    /// unproven proposition this is a no-op; `close` then yields nothing for
    /// it.
    pub fn conclude(&mut self, p: &Proposition) -> Result<()> {
        if self.depth() == 0 {
            return Err(ProofError::ContextMisuse("conclude outside an open frame"));
        }
        if let Ok(pid) = self.check_proven(p) {
            self.frames
                .last_mut()
                .expect("frame stack is never empty")
                .conclusions
                .push((p.formula.clone(), pid));
        }
        Ok(())
    }

    /// Pop the current frame, retiring its assumptions and discharging every
    /// concluded proposition into the enclosing frame.
    pub fn close(&mut self) -> Result<Vec<Proposition>> {
        if self.depth() == 0 {
            return Err(ProofError::ContextMisuse("close without an open frame"));
        }
        let frame = self.frames.pop().expect("frame stack is never empty");
        let frame_aids = frame.assumption_ids();
        let assumption_formulas: Vec<Formula> = frame_aids
            .iter()
            .map(|aid| self.assumptions[aid.0 as usize].formula.clone())
            .collect();
        let variables = frame.variables();

        let mut proven = Vec::new();
        for (formula, pid) in &frame.conclusions {
            let step = &self.log[pid.0 as usize];
            // a conclusion invalidated since it was registered yields nothing
            if !step
                .support
                .iter()
                .all(|aid| self.assumptions[aid.0 as usize].live)
            {
                continue;
            }
            let discharged = context::discharge(
                &assumption_formulas,
                &variables,
                formula,
                self.classical(),
            );
            let mut support: BTreeSet<AssumptionId> = step.support.clone();
            for aid in &frame_aids {
                support.remove(aid);
            }
            proven.push(self.push_step(
                Rule::CloseAssumptionsContext,
                vec![*pid],
                discharged,
                support,
            ));
        }

        for aid in &frame_aids {
            self.assumptions[aid.0 as usize].live = false;
        }
        self.last_closed = proven.clone();
        Ok(proven)
    }

    /// The propositions discharged by the most recent `close`.
    pub fn get_proven(&self) -> Vec<Proposition> {
        self.last_closed.clone()
    }

    /// Run `body` inside a fresh frame, closing it on every exit path.
    /// Returns the body's value together with the discharged propositions.
    pub fn scoped<T>(
        &mut self,
        body: impl FnOnce(&mut Kernel) -> Result<T>,
    ) -> Result<(T, Vec<Proposition>)> {
        self.open();
        match body(self) {
            Ok(value) => {
                let proven = self.close()?;
                Ok((value, proven))
            }
            Err(err) => {
                let _ = self.close();
                Err(err)
            }
        }
    }

    /// A variable name not used by any previous witness.
    pub(crate) fn fresh_witness(&mut self, base: &str) -> Variable {
        self.fresh_counter += 1;
        Variable::new(format!("{}_{}", base, self.fresh_counter))
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Kernel::new(ProofConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prop::build;

    #[test]
    fn close_without_open_is_fatal() {
        let mut kernel = Kernel::default();
        assert!(matches!(
            kernel.close(),
            Err(ProofError::ContextMisuse(_))
        ));
    }

    #[test]
    fn assumption_is_proven_until_its_frame_closes() {
        let mut kernel = Kernel::default();
        kernel.open();
        let a = kernel.assume(build::prop("A"));
        assert!(kernel.is_proven(&a));
        kernel.close().unwrap();
        assert!(!kernel.is_proven(&a));
    }

    #[test]
    fn discharge_produces_implication_in_enclosing_frame() {
        let mut kernel = Kernel::default();
        kernel.open();
        let a = kernel.assume(build::prop("A"));
        kernel.conclude(&a).unwrap();
        let proven = kernel.close().unwrap();
        assert_eq!(proven.len(), 1);
        assert_eq!(
            proven[0].formula,
            build::implies(build::prop("A"), build::prop("A"))
        );
        assert!(kernel.is_proven(&proven[0]));
        assert_eq!(
            kernel.step(proven[0].provenance().unwrap()).unwrap().rule,
            Rule::CloseAssumptionsContext
        );
    }

    #[test]
    fn conclude_on_unproven_is_a_noop() {
        let mut kernel = Kernel::default();
        kernel.open();
        let p = Proposition::unproven(build::prop("P"));
        kernel.conclude(&p).unwrap();
        let proven = kernel.close().unwrap();
        assert!(proven.is_empty());
        assert!(kernel.get_proven().is_empty());
    }

    #[test]
    fn scoped_closes_on_error() {
        let mut kernel = Kernel::default();
        let result: Result<((), Vec<Proposition>)> = kernel.scoped(|k| {
            k.assume(build::prop("A"));
            Err(ProofError::ContextMisuse("forced"))
        });
        assert!(result.is_err());
        assert_eq!(kernel.depth(), 0);
    }
}
