//! Assumption frames and the discharge construction.

use crate::prop::{neg, Formula};
use crate::term::Variable;

use super::provenance::{AssumptionId, ProofId};

/// An item recorded in a frame, in program order.
#[derive(Debug, Clone)]
pub(crate) enum FrameItem {
    Variable(Variable),
    Assumption(AssumptionId),
}

/// One frame of the assumption-context stack.
#[derive(Debug, Clone, Default)]
pub(crate) struct Frame {
    pub items: Vec<FrameItem>,
    /// Conclusions registered for discharge: formula and its proof.
    pub conclusions: Vec<(Formula, ProofId)>,
}

impl Frame {
    pub fn assumption_ids(&self) -> Vec<AssumptionId> {
        self.items
            .iter()
            .filter_map(|item| match item {
                FrameItem::Assumption(id) => Some(*id),
                FrameItem::Variable(_) => None,
            })
            .collect()
    }

    pub fn variables(&self) -> Vec<Variable> {
        self.items
            .iter()
            .filter_map(|item| match item {
                FrameItem::Variable(v) => Some(v.clone()),
                FrameItem::Assumption(_) => None,
            })
            .collect()
    }
}

/// Build the proposition proven by closing a frame around `conclusion`.
///
/// Assumptions wrap first, oldest innermost, so the most recent assumption
/// becomes the outermost antecedent. A concluded contradiction turns the
/// innermost wrap into a negation instead (negation introduction). Declared
/// dependency-free variables then generalize outside the implications, in
/// declaration order outermost first; `forall v: (v in S -> ...)` collapses
/// into a bounded quantifier.
pub(crate) fn discharge(
    assumption_formulas: &[Formula],
    variables: &[Variable],
    conclusion: &Formula,
    classical: bool,
) -> Formula {
    let mut cons = conclusion.clone();
    for (i, a) in assumption_formulas.iter().enumerate() {
        if i == 0 && cons == Formula::Contradiction {
            cons = neg(a, classical);
        } else {
            cons = Formula::Implies(Box::new(a.clone()), Box::new(cons));
        }
    }
    for v in variables.iter().rev() {
        if !v.deps.is_empty() {
            continue;
        }
        cons = generalize(v, cons);
    }
    cons
}

/// Wrap `body` in a universal quantifier over `var`, collapsing a leading
/// membership antecedent into `ForallIn`.
fn generalize(var: &Variable, body: Formula) -> Formula {
    if let Formula::Implies(ante, inner) = &body {
        if let Formula::IsContainedIn(element, set) = &**ante {
            if matches!(element, crate::term::Term::Variable(v) if v == var) {
                return Formula::ForallIn {
                    var: var.bound(),
                    set: set.clone(),
                    body: inner.clone(),
                };
            }
        }
    }
    Formula::Forall {
        var: var.bound(),
        body: Box::new(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prop::build;
    use crate::term::Term;

    #[test]
    fn assumptions_wrap_newest_outermost() {
        let a1 = build::prop("A1");
        let a2 = build::prop("A2");
        let p = build::prop("P");
        let got = discharge(&[a1.clone(), a2.clone()], &[], &p, true);
        assert_eq!(got, build::implies(a2, build::implies(a1, p)));
    }

    #[test]
    fn contradiction_discharges_to_negation() {
        let a = build::prop("A");
        let got = discharge(&[a.clone()], &[], &Formula::Contradiction, true);
        assert_eq!(got, build::not(a));
    }

    #[test]
    fn variables_generalize_outermost_in_declaration_order() {
        let x = Variable::new("x");
        let y = Variable::new("y");
        let p = build::atom("P", vec![Term::var("x"), Term::var("y")]);
        let got = discharge(&[], &[x.clone(), y.clone()], &p, true);
        assert_eq!(got, build::forall(x, build::forall(y, p)));
    }

    #[test]
    fn membership_assumption_collapses_to_bounded_forall() {
        let x = Variable::new("x");
        let s = Term::constant("S");
        let member = build::is_in(Term::var("x"), s.clone());
        let p = build::atom("P", vec![Term::var("x")]);
        let got = discharge(&[member], &[x.clone()], &p, true);
        assert_eq!(got, build::forall_in(x, s, p));
    }
}
