//! Proposition-returning builders.
//!
//! This is the formula-valued builder namespace: `lt(a, b)` is a `LessThan`
//! proposition. The boolean-valued counterpart lives in `oracle::ops`, and
//! the choice between the two is made explicitly at the call site.

use crate::term::{Term, Variable};

use super::formula::Formula;

/// A nullary atom.
pub fn prop(name: impl Into<String>) -> Formula {
    Formula::Atom {
        name: name.into(),
        args: Vec::new(),
    }
}

/// An atom with arguments.
pub fn atom(name: impl Into<String>, args: Vec<Term>) -> Formula {
    Formula::Atom {
        name: name.into(),
        args,
    }
}

pub fn not(p: Formula) -> Formula {
    Formula::Not(Box::new(p))
}

/// Conjunction. Contiguous `And` arguments are flattened into one sequence
/// and duplicates removed; a single remaining conjunct is returned as-is.
pub fn and(props: Vec<Formula>) -> Formula {
    junction(props, JunctionKind::And)
}

/// Disjunction, with the same flattening and duplicate removal as `and`.
pub fn or(props: Vec<Formula>) -> Formula {
    junction(props, JunctionKind::Or)
}

/// Exclusive disjunction: exactly one of the members is true.
pub fn xor(props: Vec<Formula>) -> Formula {
    junction(props, JunctionKind::ExOr)
}

enum JunctionKind {
    And,
    Or,
    ExOr,
}

fn junction(props: Vec<Formula>, kind: JunctionKind) -> Formula {
    assert!(!props.is_empty(), "junction needs at least one member");
    let mut flat = Vec::new();
    for p in props {
        match (&kind, p) {
            (JunctionKind::And, Formula::And(ps)) => flat.extend(ps),
            (JunctionKind::Or, Formula::Or(ps)) => flat.extend(ps),
            (JunctionKind::ExOr, Formula::ExOr(ps)) => flat.extend(ps),
            (_, p) => flat.push(p),
        }
    }
    let mut seen = Vec::new();
    for p in flat {
        if !seen.contains(&p) {
            seen.push(p);
        }
    }
    if seen.len() == 1 {
        return seen.into_iter().next().unwrap();
    }
    match kind {
        JunctionKind::And => Formula::And(seen),
        JunctionKind::Or => Formula::Or(seen),
        JunctionKind::ExOr => Formula::ExOr(seen),
    }
}

pub fn implies(antecedent: Formula, consequent: Formula) -> Formula {
    Formula::Implies(Box::new(antecedent), Box::new(consequent))
}

pub fn iff(left: Formula, right: Formula) -> Formula {
    Formula::Iff(Box::new(left), Box::new(right))
}

/// Universal quantification. The binder is marked bound; occurrences in the
/// body are identified structurally by name.
pub fn forall(var: Variable, body: Formula) -> Formula {
    Formula::Forall {
        var: var.bound(),
        body: Box::new(body),
    }
}

pub fn exists(var: Variable, body: Formula) -> Formula {
    Formula::Exists {
        var: var.bound(),
        body: Box::new(body),
    }
}

pub fn exists_unique(var: Variable, body: Formula) -> Formula {
    Formula::ExistsUnique {
        var: var.bound(),
        body: Box::new(body),
    }
}

pub fn forall_in(var: Variable, set: Term, body: Formula) -> Formula {
    Formula::ForallIn {
        var: var.bound(),
        set,
        body: Box::new(body),
    }
}

pub fn exists_in(var: Variable, set: Term, body: Formula) -> Formula {
    Formula::ExistsIn {
        var: var.bound(),
        set,
        body: Box::new(body),
    }
}

pub fn eq(left: impl Into<Term>, right: impl Into<Term>) -> Formula {
    Formula::Equals(left.into(), right.into())
}

pub fn lt(left: impl Into<Term>, right: impl Into<Term>) -> Formula {
    Formula::LessThan(left.into(), right.into())
}

pub fn gt(left: impl Into<Term>, right: impl Into<Term>) -> Formula {
    Formula::GreaterThan(left.into(), right.into())
}

pub fn le(left: impl Into<Term>, right: impl Into<Term>) -> Formula {
    Formula::LessOrEqual(left.into(), right.into())
}

pub fn ge(left: impl Into<Term>, right: impl Into<Term>) -> Formula {
    Formula::GreaterOrEqual(left.into(), right.into())
}

pub fn is_in(element: impl Into<Term>, set: impl Into<Term>) -> Formula {
    Formula::IsContainedIn(element.into(), set.into())
}

pub fn subset_of(left: impl Into<Term>, right: impl Into<Term>) -> Formula {
    Formula::IsSubsetOf(left.into(), right.into())
}

pub fn divides(divisor: impl Into<Term>, dividend: impl Into<Term>) -> Formula {
    Formula::Divides(divisor.into(), dividend.into())
}

pub fn prime(term: impl Into<Term>) -> Formula {
    Formula::Prime(term.into())
}

pub fn contradiction() -> Formula {
    Formula::Contradiction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn junctions_flatten_and_dedup() {
        let p = prop("P");
        let q = prop("Q");
        let r = prop("R");
        let nested = and(vec![and(vec![p.clone(), q.clone()]), r.clone(), p.clone()]);
        assert_eq!(nested, Formula::And(vec![p.clone(), q, r]));
        assert_eq!(or(vec![p.clone(), p.clone()]), p);
    }
}
