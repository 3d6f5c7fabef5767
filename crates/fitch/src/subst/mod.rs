//! Capture-avoiding substitution and first-order matching.

use std::collections::{HashMap, HashSet};

use crate::error::{ProofError, Result};
use crate::prop::Formula;
use crate::term::{Term, Variable};

/// A matching result: pattern variables bound to terms.
pub type Bindings = HashMap<Variable, Term>;

/// Replace free occurrences of `current` by `new` inside `f`.
///
/// The walker refuses to descend under a quantifier that binds a variable
/// occurring free in `new`; the bound variable is renamed to a fresh name
/// first so that no free variable of `new` is captured.
pub fn substitute(f: &Formula, current: &Term, new: &Term) -> Result<Formula> {
    let new_vars: HashSet<Variable> = {
        let mut vars = HashSet::new();
        new.collect_variables(&mut vars);
        vars
    };
    subst_walk(f, current, new, &new_vars)
}

fn subst_walk(
    f: &Formula,
    current: &Term,
    new: &Term,
    new_vars: &HashSet<Variable>,
) -> Result<Formula> {
    match f {
        Formula::Not(p) => Ok(Formula::Not(Box::new(subst_walk(p, current, new, new_vars)?))),
        Formula::And(ps) => Ok(Formula::And(subst_each(ps, current, new, new_vars)?)),
        Formula::Or(ps) => Ok(Formula::Or(subst_each(ps, current, new, new_vars)?)),
        Formula::ExOr(ps) => Ok(Formula::ExOr(subst_each(ps, current, new, new_vars)?)),
        Formula::Implies(a, b) => Ok(Formula::Implies(
            Box::new(subst_walk(a, current, new, new_vars)?),
            Box::new(subst_walk(b, current, new, new_vars)?),
        )),
        Formula::Iff(a, b) => Ok(Formula::Iff(
            Box::new(subst_walk(a, current, new, new_vars)?),
            Box::new(subst_walk(b, current, new, new_vars)?),
        )),
        Formula::Forall { var, body } => {
            let (var, body) = subst_under_binder(var, body, current, new, new_vars)?;
            Ok(Formula::Forall {
                var,
                body: Box::new(body),
            })
        }
        Formula::Exists { var, body } => {
            let (var, body) = subst_under_binder(var, body, current, new, new_vars)?;
            Ok(Formula::Exists {
                var,
                body: Box::new(body),
            })
        }
        Formula::ExistsUnique { var, body } => {
            let (var, body) = subst_under_binder(var, body, current, new, new_vars)?;
            Ok(Formula::ExistsUnique {
                var,
                body: Box::new(body),
            })
        }
        Formula::ForallIn { var, set, body } => {
            let set = set.replace(current, new);
            let (var, body) = subst_under_binder(var, body, current, new, new_vars)?;
            Ok(Formula::ForallIn {
                var,
                set,
                body: Box::new(body),
            })
        }
        Formula::ExistsIn { var, set, body } => {
            let set = set.replace(current, new);
            let (var, body) = subst_under_binder(var, body, current, new, new_vars)?;
            Ok(Formula::ExistsIn {
                var,
                set,
                body: Box::new(body),
            })
        }
        Formula::Atom { name, args } => Ok(Formula::Atom {
            name: name.clone(),
            args: args.iter().map(|a| a.replace(current, new)).collect(),
        }),
        Formula::Equals(a, b) => Ok(Formula::Equals(
            a.replace(current, new),
            b.replace(current, new),
        )),
        Formula::LessThan(a, b) => Ok(Formula::LessThan(
            a.replace(current, new),
            b.replace(current, new),
        )),
        Formula::GreaterThan(a, b) => Ok(Formula::GreaterThan(
            a.replace(current, new),
            b.replace(current, new),
        )),
        Formula::LessOrEqual(a, b) => Ok(Formula::LessOrEqual(
            a.replace(current, new),
            b.replace(current, new),
        )),
        Formula::GreaterOrEqual(a, b) => Ok(Formula::GreaterOrEqual(
            a.replace(current, new),
            b.replace(current, new),
        )),
        Formula::IsContainedIn(a, b) => Ok(Formula::IsContainedIn(
            a.replace(current, new),
            b.replace(current, new),
        )),
        Formula::IsSubsetOf(a, b) => Ok(Formula::IsSubsetOf(
            a.replace(current, new),
            b.replace(current, new),
        )),
        Formula::Divides(a, b) => Ok(Formula::Divides(
            a.replace(current, new),
            b.replace(current, new),
        )),
        Formula::Prime(a) => Ok(Formula::Prime(a.replace(current, new))),
        Formula::Contradiction => Ok(Formula::Contradiction),
    }
}

fn subst_each(
    ps: &[Formula],
    current: &Term,
    new: &Term,
    new_vars: &HashSet<Variable>,
) -> Result<Vec<Formula>> {
    ps.iter()
        .map(|p| subst_walk(p, current, new, new_vars))
        .collect()
}

/// Substitute inside a quantified body. Occurrences of the binder itself are
/// bound, so substitution for it stops here; a binder clashing with a free
/// variable of the replacement is renamed first.
fn subst_under_binder(
    var: &Variable,
    body: &Formula,
    current: &Term,
    new: &Term,
    new_vars: &HashSet<Variable>,
) -> Result<(Variable, Formula)> {
    // substituting for the bound variable: nothing free to replace below
    if let Term::Variable(v) = current {
        if v == var {
            return Ok((var.clone(), body.clone()));
        }
    }
    if new_vars.contains(var) {
        // rename the binder so the replacement's free variable stays free
        let fresh = fresh_variable(var, body, new_vars)?;
        let renamed = subst_walk(
            body,
            &Term::Variable(var.clone()),
            &Term::Variable(fresh.clone()),
            &HashSet::new(),
        )?;
        let new_body = subst_walk(&renamed, current, new, new_vars)?;
        return Ok((fresh.bound(), new_body));
    }
    Ok((var.clone(), subst_walk(body, current, new, new_vars)?))
}

/// Pick a variant of `base` that is free neither in `body` nor among `avoid`.
fn fresh_variable(
    base: &Variable,
    body: &Formula,
    avoid: &HashSet<Variable>,
) -> Result<Variable> {
    let in_body = body.free_variables();
    for i in 1..1000u32 {
        let mut candidate = base.unbound();
        candidate.name = format!("{}_{}", base.name, i);
        if !in_body.contains(&candidate) && !avoid.contains(&candidate) {
            return Ok(candidate);
        }
    }
    Err(ProofError::CaptureViolation(format!(
        "no fresh name available for {}",
        base
    )))
}

/// First-order matching of `instance` against `pattern`.
///
/// Variables in `pattern_vars` may be bound to arbitrary terms; all other
/// symbols must match identically. A variable occurring twice must bind the
/// same term both times. Matching is linear in the size of the pattern.
pub fn match_formula(
    pattern: &Formula,
    instance: &Formula,
    pattern_vars: &HashSet<Variable>,
) -> Option<Bindings> {
    let mut bindings = Bindings::new();
    if match_walk(pattern, instance, pattern_vars, &mut bindings) {
        Some(bindings)
    } else {
        None
    }
}

fn match_walk(
    pattern: &Formula,
    instance: &Formula,
    vars: &HashSet<Variable>,
    bindings: &mut Bindings,
) -> bool {
    match (pattern, instance) {
        (Formula::Atom { name: n1, args: a1 }, Formula::Atom { name: n2, args: a2 }) => {
            n1 == n2
                && a1.len() == a2.len()
                && a1
                    .iter()
                    .zip(a2)
                    .all(|(p, i)| match_term(p, i, vars, bindings))
        }
        (Formula::Not(p), Formula::Not(i)) => match_walk(p, i, vars, bindings),
        (Formula::And(ps), Formula::And(is))
        | (Formula::Or(ps), Formula::Or(is))
        | (Formula::ExOr(ps), Formula::ExOr(is)) => {
            ps.len() == is.len()
                && ps
                    .iter()
                    .zip(is)
                    .all(|(p, i)| match_walk(p, i, vars, bindings))
        }
        (Formula::Implies(p1, p2), Formula::Implies(i1, i2))
        | (Formula::Iff(p1, p2), Formula::Iff(i1, i2)) => {
            match_walk(p1, i1, vars, bindings) && match_walk(p2, i2, vars, bindings)
        }
        (
            Formula::Forall { var: v1, body: b1 },
            Formula::Forall { var: v2, body: b2 },
        )
        | (
            Formula::Exists { var: v1, body: b1 },
            Formula::Exists { var: v2, body: b2 },
        )
        | (
            Formula::ExistsUnique { var: v1, body: b1 },
            Formula::ExistsUnique { var: v2, body: b2 },
        ) => {
            if v1 != v2 {
                return false;
            }
            // the inner binder shadows any pattern variable of the same name
            if vars.contains(v1) {
                let mut inner = vars.clone();
                inner.remove(v1);
                match_walk(b1, b2, &inner, bindings)
            } else {
                match_walk(b1, b2, vars, bindings)
            }
        }
        (
            Formula::ForallIn {
                var: v1,
                set: s1,
                body: b1,
            },
            Formula::ForallIn {
                var: v2,
                set: s2,
                body: b2,
            },
        )
        | (
            Formula::ExistsIn {
                var: v1,
                set: s1,
                body: b1,
            },
            Formula::ExistsIn {
                var: v2,
                set: s2,
                body: b2,
            },
        ) => {
            if v1 != v2 || !match_term(s1, s2, vars, bindings) {
                return false;
            }
            if vars.contains(v1) {
                let mut inner = vars.clone();
                inner.remove(v1);
                match_walk(b1, b2, &inner, bindings)
            } else {
                match_walk(b1, b2, vars, bindings)
            }
        }
        (Formula::Equals(p1, p2), Formula::Equals(i1, i2))
        | (Formula::LessThan(p1, p2), Formula::LessThan(i1, i2))
        | (Formula::GreaterThan(p1, p2), Formula::GreaterThan(i1, i2))
        | (Formula::LessOrEqual(p1, p2), Formula::LessOrEqual(i1, i2))
        | (Formula::GreaterOrEqual(p1, p2), Formula::GreaterOrEqual(i1, i2))
        | (Formula::IsContainedIn(p1, p2), Formula::IsContainedIn(i1, i2))
        | (Formula::IsSubsetOf(p1, p2), Formula::IsSubsetOf(i1, i2))
        | (Formula::Divides(p1, p2), Formula::Divides(i1, i2)) => {
            match_term(p1, i1, vars, bindings) && match_term(p2, i2, vars, bindings)
        }
        (Formula::Prime(p), Formula::Prime(i)) => match_term(p, i, vars, bindings),
        (Formula::Contradiction, Formula::Contradiction) => true,
        _ => false,
    }
}

fn match_term(
    pattern: &Term,
    instance: &Term,
    vars: &HashSet<Variable>,
    bindings: &mut Bindings,
) -> bool {
    if let Term::Variable(v) = pattern {
        if vars.contains(v) {
            return match bindings.get(v) {
                Some(bound) => bound == instance,
                None => {
                    bindings.insert(v.unbound(), instance.clone());
                    true
                }
            };
        }
    }
    match (pattern, instance) {
        (Term::Expr { op: o1, args: a1 }, Term::Expr { op: o2, args: a2 }) => {
            o1 == o2
                && a1.len() == a2.len()
                && a1
                    .iter()
                    .zip(a2)
                    .all(|(p, i)| match_term(p, i, vars, bindings))
        }
        _ => pattern == instance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prop::build;
    use crate::term::Variable;

    fn x() -> Variable {
        Variable::new("x")
    }

    fn y() -> Variable {
        Variable::new("y")
    }

    #[test]
    fn substitute_replaces_free_occurrences() {
        let f = build::atom("P", vec![Term::var("x"), Term::var("y")]);
        let g = substitute(&f, &Term::var("x"), &Term::int(2)).unwrap();
        assert_eq!(g, build::atom("P", vec![Term::int(2), Term::var("y")]));
    }

    #[test]
    fn substitute_stops_at_binder() {
        let f = build::forall(x(), build::atom("P", vec![Term::var("x")]));
        let g = substitute(&f, &Term::var("x"), &Term::int(2)).unwrap();
        assert_eq!(g, f);
    }

    #[test]
    fn substitute_renames_on_capture() {
        // (forall y: P(x, y))[x := y] must not capture the free y
        let f = build::forall(
            y(),
            build::atom("P", vec![Term::var("x"), Term::var("y")]),
        );
        let g = substitute(&f, &Term::var("x"), &Term::var("y")).unwrap();
        match g {
            Formula::Forall { var, body } => {
                assert_ne!(var.name, "y");
                assert!(body.mentions_free(&y()));
            }
            other => panic!("expected forall, got {}", other),
        }
    }

    #[test]
    fn matching_binds_consistently() {
        let pattern = build::atom("P", vec![Term::var("x"), Term::var("x")]);
        let vars: HashSet<Variable> = [x()].into_iter().collect();
        let good = build::atom("P", vec![Term::int(3), Term::int(3)]);
        let bad = build::atom("P", vec![Term::int(3), Term::int(4)]);
        let bindings = match_formula(&pattern, &good, &vars).unwrap();
        assert_eq!(bindings.get(&x()), Some(&Term::int(3)));
        assert!(match_formula(&pattern, &bad, &vars).is_none());
    }

    #[test]
    fn matching_requires_identical_free_symbols() {
        let pattern = build::atom("P", vec![Term::var("x"), Term::constant("c")]);
        let vars: HashSet<Variable> = [x()].into_iter().collect();
        let bad = build::atom("P", vec![Term::int(3), Term::constant("d")]);
        assert!(match_formula(&pattern, &bad, &vars).is_none());
    }
}
