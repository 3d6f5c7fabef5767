//! The proposition AST: atoms, connectives, quantifiers, and built-in
//! relations, as a single sum type with exhaustive matching.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::term::{Term, Variable};

/// A logical formula.
///
/// Junctions (`And`, `Or`, `ExOr`) are n-ary. `ExOr` reads as "exactly one
/// of these is true", not as an odd-parity xor; `one_proven_rem_false`
/// relies on this reading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formula {
    Atom { name: String, args: Vec<Term> },
    Not(Box<Formula>),
    And(Vec<Formula>),
    Or(Vec<Formula>),
    ExOr(Vec<Formula>),
    Implies(Box<Formula>, Box<Formula>),
    Iff(Box<Formula>, Box<Formula>),
    Forall { var: Variable, body: Box<Formula> },
    Exists { var: Variable, body: Box<Formula> },
    ExistsUnique { var: Variable, body: Box<Formula> },
    ForallIn { var: Variable, set: Term, body: Box<Formula> },
    ExistsIn { var: Variable, set: Term, body: Box<Formula> },
    Equals(Term, Term),
    LessThan(Term, Term),
    GreaterThan(Term, Term),
    LessOrEqual(Term, Term),
    GreaterOrEqual(Term, Term),
    IsContainedIn(Term, Term),
    IsSubsetOf(Term, Term),
    Divides(Term, Term),
    Prime(Term),
    Contradiction,
}

impl Formula {
    /// Whether this formula is atomic for rendering purposes: an atom, a
    /// relation, or a contradiction.
    pub fn is_atomic(&self) -> bool {
        matches!(
            self,
            Formula::Atom { .. }
                | Formula::Equals(..)
                | Formula::LessThan(..)
                | Formula::GreaterThan(..)
                | Formula::LessOrEqual(..)
                | Formula::GreaterOrEqual(..)
                | Formula::IsContainedIn(..)
                | Formula::IsSubsetOf(..)
                | Formula::Divides(..)
                | Formula::Prime(..)
                | Formula::Contradiction
        )
    }

    /// The terms carried directly by this node (empty for connectives).
    pub fn terms(&self) -> Vec<&Term> {
        match self {
            Formula::Atom { args, .. } => args.iter().collect(),
            Formula::Equals(a, b)
            | Formula::LessThan(a, b)
            | Formula::GreaterThan(a, b)
            | Formula::LessOrEqual(a, b)
            | Formula::GreaterOrEqual(a, b)
            | Formula::IsContainedIn(a, b)
            | Formula::IsSubsetOf(a, b)
            | Formula::Divides(a, b) => vec![a, b],
            Formula::Prime(a) => vec![a],
            _ => Vec::new(),
        }
    }

    /// All free variables of the formula.
    pub fn free_variables(&self) -> HashSet<Variable> {
        let mut vars = HashSet::new();
        self.collect_free_variables(&mut vars);
        vars
    }

    fn collect_free_variables(&self, vars: &mut HashSet<Variable>) {
        match self {
            Formula::Not(f) => f.collect_free_variables(vars),
            Formula::And(ps) | Formula::Or(ps) | Formula::ExOr(ps) => {
                for p in ps {
                    p.collect_free_variables(vars);
                }
            }
            Formula::Implies(a, b) | Formula::Iff(a, b) => {
                a.collect_free_variables(vars);
                b.collect_free_variables(vars);
            }
            Formula::Forall { var, body }
            | Formula::Exists { var, body }
            | Formula::ExistsUnique { var, body } => {
                let mut inner = HashSet::new();
                body.collect_free_variables(&mut inner);
                inner.remove(var);
                vars.extend(inner);
            }
            Formula::ForallIn { var, set, body } | Formula::ExistsIn { var, set, body } => {
                set.collect_variables(vars);
                let mut inner = HashSet::new();
                body.collect_free_variables(&mut inner);
                inner.remove(var);
                vars.extend(inner);
            }
            Formula::Contradiction => {}
            _ => {
                for t in self.terms() {
                    t.collect_variables(vars);
                }
            }
        }
    }

    /// Whether the named variable occurs free in the formula.
    pub fn mentions_free(&self, var: &Variable) -> bool {
        self.free_variables().contains(var)
    }

    /// Check if `other` occurs as a subformula of `self`.
    pub fn has_subformula(&self, other: &Formula) -> bool {
        if self == other {
            return true;
        }
        match self {
            Formula::Not(f) => f.has_subformula(other),
            Formula::And(ps) | Formula::Or(ps) | Formula::ExOr(ps) => {
                ps.iter().any(|p| p.has_subformula(other))
            }
            Formula::Implies(a, b) | Formula::Iff(a, b) => {
                a.has_subformula(other) || b.has_subformula(other)
            }
            Formula::Forall { body, .. }
            | Formula::Exists { body, .. }
            | Formula::ExistsUnique { body, .. }
            | Formula::ForallIn { body, .. }
            | Formula::ExistsIn { body, .. } => body.has_subformula(other),
            _ => false,
        }
    }

    /// The disjuncts of an `Or`, or `None`.
    pub fn disjuncts(&self) -> Option<&[Formula]> {
        match self {
            Formula::Or(ps) => Some(ps),
            _ => None,
        }
    }

    /// The conjuncts of an `And`, or `None`.
    pub fn conjuncts(&self) -> Option<&[Formula]> {
        match self {
            Formula::And(ps) => Some(ps),
            _ => None,
        }
    }
}

/// Negate a formula.
///
/// Double-negation elimination is only valid in classical logic, so
/// `neg(~P)` is `P` when `classical` is set and `~~P` otherwise.
pub fn neg(f: &Formula, classical: bool) -> Formula {
    match f {
        Formula::Not(inner) if classical => (**inner).clone(),
        _ => Formula::Not(Box::new(f.clone())),
    }
}

/// Whether two formulas are negations of each other.
pub fn are_negs(p: &Formula, q: &Formula) -> bool {
    match (p, q) {
        (Formula::Not(inner), _) if **inner == *q => true,
        (_, Formula::Not(inner)) if **inner == *p => true,
        _ => false,
    }
}

/// Structural De Morgan transformation, returning an equivalent formula.
///
/// In intuitionistic mode only the valid directions apply:
/// `~A /\ ~B <-> ~(A \/ B)` and `~A \/ ~B -> ~(A /\ B)`; a negated
/// conjunction is left unchanged. In classical mode the full dual holds and
/// double negations collapse along the way.
pub fn de_morgan(f: &Formula, classical: bool) -> Formula {
    match f {
        Formula::Not(inner) => match &**inner {
            Formula::And(ps) => {
                if !classical {
                    return f.clone();
                }
                Formula::Or(ps.iter().map(|p| neg(&de_morgan(p, classical), true)).collect())
            }
            Formula::Or(ps) => {
                let negs: Vec<Formula> = ps
                    .iter()
                    .map(|p| {
                        let dm = de_morgan(p, classical);
                        if classical {
                            neg(&dm, true)
                        } else {
                            Formula::Not(Box::new(dm))
                        }
                    })
                    .collect();
                Formula::And(negs)
            }
            g if g.is_atomic() => f.clone(),
            g => neg(&de_morgan(g, classical), classical),
        },
        Formula::And(ps) => {
            if !classical {
                if !ps.iter().all(|p| matches!(p, Formula::Not(_))) {
                    return f.clone();
                }
                let inners: Vec<Formula> = ps
                    .iter()
                    .map(|p| match p {
                        Formula::Not(inner) => de_morgan(inner, classical),
                        _ => unreachable!(),
                    })
                    .collect();
                return Formula::Not(Box::new(Formula::Or(inners)));
            }
            let negs: Vec<Formula> = ps.iter().map(|p| neg(&de_morgan(p, true), true)).collect();
            Formula::Not(Box::new(Formula::Or(negs)))
        }
        Formula::Or(ps) => {
            if !classical {
                if !ps.iter().all(|p| matches!(p, Formula::Not(_))) {
                    return f.clone();
                }
                let inners: Vec<Formula> = ps
                    .iter()
                    .map(|p| match p {
                        Formula::Not(inner) => de_morgan(inner, classical),
                        _ => unreachable!(),
                    })
                    .collect();
                return Formula::Not(Box::new(Formula::And(inners)));
            }
            let negs: Vec<Formula> = ps.iter().map(|p| neg(&de_morgan(p, true), true)).collect();
            Formula::Not(Box::new(Formula::And(negs)))
        }
        Formula::Forall { var, body } => {
            if !classical {
                match &**body {
                    Formula::Not(inner) => Formula::Not(Box::new(Formula::Exists {
                        var: var.unbound(),
                        body: Box::new(de_morgan(inner, classical)),
                    })),
                    _ => f.clone(),
                }
            } else {
                Formula::Not(Box::new(Formula::Exists {
                    var: var.unbound(),
                    body: Box::new(neg(&de_morgan(body, true), true)),
                }))
            }
        }
        Formula::Exists { var, body } => {
            if !classical {
                match &**body {
                    Formula::Not(inner) => Formula::Not(Box::new(Formula::Forall {
                        var: var.unbound(),
                        body: Box::new(de_morgan(inner, classical)),
                    })),
                    _ => f.clone(),
                }
            } else {
                Formula::Not(Box::new(Formula::Forall {
                    var: var.unbound(),
                    body: Box::new(neg(&de_morgan(body, true), true)),
                }))
            }
        }
        _ => f.clone(),
    }
}

// Rendering. Operator precedence follows the original notation:
// ~ binds tightest, then xor, /\, \/, ->, <->, then quantifiers.
fn precedence(f: &Formula) -> u8 {
    match f {
        Formula::Not(_) => 0,
        Formula::ExOr(_) => 1,
        Formula::And(_) => 2,
        Formula::Or(_) => 3,
        Formula::Implies(..) => 4,
        Formula::Iff(..) => 5,
        Formula::Forall { .. } | Formula::Exists { .. } | Formula::ExistsUnique { .. } => 6,
        Formula::ForallIn { .. } | Formula::ExistsIn { .. } => 7,
        _ => u8::MAX,
    }
}

#[derive(Clone, Copy)]
struct Child<'a>(&'a Formula, u8, bool);

impl fmt::Display for Child<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Child(p, parent_prec, all_parens) = *self;
        let wrap = !p.is_atomic() && (all_parens || precedence(p) >= parent_prec);
        if wrap {
            if all_parens {
                write!(f, "({:#})", p)
            } else {
                write!(f, "({})", p)
            }
        } else if all_parens {
            write!(f, "{:#}", p)
        } else {
            write!(f, "{}", p)
        }
    }
}

fn write_junction(
    f: &mut fmt::Formatter<'_>,
    ps: &[Formula],
    sep: &str,
    prec: u8,
) -> fmt::Result {
    let all = f.alternate();
    for (i, p) in ps.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", sep)?;
        }
        write!(f, "{}", Child(p, prec, all))?;
    }
    Ok(())
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let all = f.alternate();
        match self {
            Formula::Atom { name, args } => {
                if args.is_empty() {
                    write!(f, "{}", name)
                } else {
                    write!(f, "{}(", name)?;
                    for (i, a) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", a)?;
                    }
                    write!(f, ")")
                }
            }
            Formula::Not(p) => {
                // quantified and negated bodies keep their own prefix shape
                let needs_parens = !p.is_atomic()
                    && !matches!(
                        **p,
                        Formula::Not(_)
                            | Formula::Forall { .. }
                            | Formula::Exists { .. }
                            | Formula::ExistsUnique { .. }
                            | Formula::ForallIn { .. }
                            | Formula::ExistsIn { .. }
                    );
                if needs_parens || (all && !p.is_atomic()) {
                    if all {
                        write!(f, "~({:#})", p)
                    } else {
                        write!(f, "~({})", p)
                    }
                } else if all {
                    write!(f, "~{:#}", p)
                } else {
                    write!(f, "~{}", p)
                }
            }
            Formula::And(ps) => write_junction(f, ps, "/\\", 2),
            Formula::Or(ps) => write_junction(f, ps, "\\/", 3),
            Formula::ExOr(ps) => write_junction(f, ps, "xor", 1),
            Formula::Implies(a, b) => {
                write!(f, "{} -> {}", Child(a, 4, all), Child(b, 4, all))
            }
            Formula::Iff(a, b) => {
                write!(f, "{} <-> {}", Child(a, 5, all), Child(b, 5, all))
            }
            Formula::Forall { var, body } => write!(f, "forall {}: {}", var, body),
            Formula::Exists { var, body } => write!(f, "exists {}: {}", var, body),
            Formula::ExistsUnique { var, body } => write!(f, "exists! {}: {}", var, body),
            Formula::ForallIn { var, set, body } => {
                write!(f, "forall {} in {}: {}", var, set, body)
            }
            Formula::ExistsIn { var, set, body } => {
                write!(f, "exists {} in {}: {}", var, set, body)
            }
            Formula::Equals(a, b) => write!(f, "{} = {}", a, b),
            Formula::LessThan(a, b) => write!(f, "{} < {}", a, b),
            Formula::GreaterThan(a, b) => write!(f, "{} > {}", a, b),
            Formula::LessOrEqual(a, b) => write!(f, "{} <= {}", a, b),
            Formula::GreaterOrEqual(a, b) => write!(f, "{} >= {}", a, b),
            Formula::IsContainedIn(a, b) => write!(f, "{} in {}", a, b),
            Formula::IsSubsetOf(a, b) => write!(f, "{} subset of {}", a, b),
            Formula::Divides(a, b) => write!(f, "{} | {}", a, b),
            Formula::Prime(a) => write!(f, "{} prime", a),
            Formula::Contradiction => write!(f, "contradiction"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prop::build;

    #[test]
    fn neg_respects_logic_mode() {
        let p = build::prop("P");
        let np = neg(&p, true);
        assert_eq!(neg(&np, true), p);
        assert_eq!(neg(&np, false), Formula::Not(Box::new(np.clone())));
    }

    #[test]
    fn are_negs_is_symmetric() {
        let p = build::prop("P");
        let np = Formula::Not(Box::new(p.clone()));
        assert!(are_negs(&p, &np));
        assert!(are_negs(&np, &p));
        assert!(!are_negs(&p, &p));
    }

    #[test]
    fn de_morgan_round_trips_classically() {
        let p = build::prop("P");
        let q = build::prop("Q");
        let not_and = Formula::Not(Box::new(Formula::And(vec![p.clone(), q.clone()])));
        let dm = de_morgan(&not_and, true);
        assert_eq!(
            dm,
            Formula::Or(vec![
                Formula::Not(Box::new(p)),
                Formula::Not(Box::new(q))
            ])
        );
        assert_eq!(de_morgan(&dm, true), not_and);
    }

    #[test]
    fn de_morgan_keeps_negated_conjunction_intuitionistically() {
        let p = build::prop("P");
        let q = build::prop("Q");
        let not_and = Formula::Not(Box::new(Formula::And(vec![p, q])));
        assert_eq!(de_morgan(&not_and, false), not_and);
    }

    #[test]
    fn display_uses_precedence() {
        let p = build::prop("P");
        let q = build::prop("Q");
        let r = build::prop("R");
        // the arrow binds loosest, so the disjunction needs no parentheses
        let f = build::implies(build::or(vec![p.clone(), q.clone()]), r.clone());
        assert_eq!(f.to_string(), "P \\/ Q -> R");
        // a nested arrow does
        let g = build::or(vec![p, build::implies(q, r)]);
        assert_eq!(g.to_string(), "P \\/ (Q -> R)");
    }
}
