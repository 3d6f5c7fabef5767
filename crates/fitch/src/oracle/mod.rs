//! External oracles: trusted injection points outside the kernel.
//!
//! These are the only places where `proven` is minted without an inference
//! rule. Each decision procedure is total over a narrow ground fragment and
//! refuses everything else; nothing here reaches kernel internals beyond the
//! single crate-private minting hook.

pub mod eval;
pub mod ops;

use crate::error::{ProofError, Result};
use crate::kernel::{Kernel, Proposition, Rule};
use crate::prop::Formula;
use crate::term::{Term, Ternary};

use eval::{eval as eval_term, is_prime, simplify};

/// Inject a named axiom: a fact taken on trust, provenance-tagged `axiom`.
pub fn axiom(kernel: &mut Kernel, formula: Formula) -> Proposition {
    kernel.mint_oracle(Rule::Axiom, formula)
}

/// Decide a ground arithmetic or set proposition by direct inspection.
pub fn by_inspection(kernel: &mut Kernel, formula: &Formula) -> Result<Proposition> {
    match decide(formula) {
        Ternary::True => Ok(kernel.mint_oracle(Rule::ByInspection, formula.clone())),
        Ternary::False => Err(ProofError::OracleRefused(format!(
            "{} is false by inspection",
            formula
        ))),
        Ternary::Unknown => Err(ProofError::OracleRefused(format!(
            "cannot decide {} by inspection",
            formula
        ))),
    }
}

/// Prove an equality by evaluating both sides with the trusted evaluator.
pub fn by_eval(kernel: &mut Kernel, formula: &Formula) -> Result<Proposition> {
    match formula {
        Formula::Equals(a, b) => {
            let (va, vb) = match (eval_term(a), eval_term(b)) {
                (Some(va), Some(vb)) => (va, vb),
                _ => {
                    return Err(ProofError::OracleRefused(format!(
                        "cannot evaluate both sides of {}",
                        formula
                    )))
                }
            };
            if va == vb {
                Ok(kernel.mint_oracle(Rule::ByEval, formula.clone()))
            } else {
                Err(ProofError::OracleRefused(format!(
                    "{} evaluates to {} = {}",
                    formula, va, vb
                )))
            }
        }
        other => Err(ProofError::OracleRefused(format!(
            "{} is not an equality",
            other
        ))),
    }
}

/// Prove an equality modulo the algebraic identities of the simplifier.
pub fn by_simplification(kernel: &mut Kernel, formula: &Formula) -> Result<Proposition> {
    match formula {
        Formula::Equals(a, b) => {
            let sa = simplify(a);
            let sb = simplify(b);
            if sa == sb {
                Ok(kernel.mint_oracle(Rule::BySimplification, formula.clone()))
            } else {
                Err(ProofError::OracleRefused(format!(
                    "{} and {} do not simplify to the same term",
                    a, b
                )))
            }
        }
        other => Err(ProofError::OracleRefused(format!(
            "{} is not an equality",
            other
        ))),
    }
}

/// Three-valued decision procedure for ground propositions.
fn decide(formula: &Formula) -> Ternary {
    match formula {
        Formula::Equals(a, b) => {
            if a == b {
                return Ternary::True;
            }
            compare(a, b, |x, y| x == y)
        }
        Formula::LessThan(a, b) => compare(a, b, |x, y| x < y),
        Formula::GreaterThan(a, b) => compare(a, b, |x, y| x > y),
        Formula::LessOrEqual(a, b) => compare(a, b, |x, y| x <= y),
        Formula::GreaterOrEqual(a, b) => compare(a, b, |x, y| x >= y),
        Formula::Divides(a, b) => match (eval_term(a), eval_term(b)) {
            (Some(0), _) => Ternary::False,
            (Some(va), Some(vb)) => (vb % va == 0).into(),
            _ => Ternary::Unknown,
        },
        Formula::Prime(a) => match eval_term(a) {
            Some(v) => is_prime(v).into(),
            None => Ternary::Unknown,
        },
        Formula::IsContainedIn(element, set) => membership(element, set),
        Formula::Not(inner) => decide(inner).not(),
        Formula::And(ps) => {
            let mut out = Ternary::True;
            for p in ps {
                match decide(p) {
                    Ternary::False => return Ternary::False,
                    Ternary::Unknown => out = Ternary::Unknown,
                    Ternary::True => {}
                }
            }
            out
        }
        Formula::Or(ps) => {
            let mut out = Ternary::False;
            for p in ps {
                match decide(p) {
                    Ternary::True => return Ternary::True,
                    Ternary::Unknown => out = Ternary::Unknown,
                    Ternary::False => {}
                }
            }
            out
        }
        _ => Ternary::Unknown,
    }
}

fn compare(a: &Term, b: &Term, op: impl Fn(i64, i64) -> bool) -> Ternary {
    match (eval_term(a), eval_term(b)) {
        (Some(va), Some(vb)) => op(va, vb).into(),
        _ => Ternary::Unknown,
    }
}

/// Membership in an explicitly enumerated set is decidable; anything else is
/// unknown.
fn membership(element: &Term, set: &Term) -> Ternary {
    let elements = match set {
        Term::Set(s) => match &s.elements {
            Some(elements) => elements,
            None => return Ternary::Unknown,
        },
        _ => return Ternary::Unknown,
    };
    let target = eval_term(element);
    for e in elements {
        if e == element {
            return Ternary::True;
        }
        if let (Some(ve), Some(vt)) = (eval_term(e), target) {
            if ve == vt {
                return Ternary::True;
            }
        }
    }
    // a ground element absent from a fully evaluable enumeration is out
    if target.is_some() && elements.iter().all(|e| eval_term(e).is_some()) {
        Ternary::False
    } else {
        Ternary::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prop::build;
    use crate::term::SetSymbol;

    #[test]
    fn inspection_decides_ground_facts() {
        let mut kernel = Kernel::default();
        let two_prime = build::prime(Term::int(2));
        let p = by_inspection(&mut kernel, &two_prime).unwrap();
        assert!(kernel.is_proven(&p));
        assert_eq!(kernel.step(p.provenance().unwrap()).unwrap().rule, Rule::ByInspection);

        let not_div = build::not(build::divides(Term::int(2), Term::int(1)));
        assert!(by_inspection(&mut kernel, &not_div).is_ok());
    }

    #[test]
    fn inspection_refuses_false_and_unknown() {
        let mut kernel = Kernel::default();
        let four_prime = build::prime(Term::int(4));
        assert!(matches!(
            by_inspection(&mut kernel, &four_prime),
            Err(ProofError::OracleRefused(_))
        ));
        let open = build::lt(Term::var("x"), Term::int(1));
        assert!(matches!(
            by_inspection(&mut kernel, &open),
            Err(ProofError::OracleRefused(_))
        ));
    }

    #[test]
    fn membership_in_enumerated_sets() {
        let mut kernel = Kernel::default();
        let s = Term::Set(SetSymbol::enumerated(
            "S",
            vec![Term::int(1), Term::int(2), Term::int(3)],
        ));
        let yes = build::is_in(Term::int(2), s.clone());
        assert!(by_inspection(&mut kernel, &yes).is_ok());
        let no = build::is_in(Term::int(5), s);
        assert!(by_inspection(&mut kernel, &no).is_err());
    }

    #[test]
    fn eval_oracle_compares_both_sides() {
        let mut kernel = Kernel::default();
        let good = build::eq(
            Term::add(Term::int(2), Term::int(2)),
            Term::mul(Term::int(2), Term::int(2)),
        );
        assert!(by_eval(&mut kernel, &good).is_ok());
        let bad = build::eq(Term::int(1), Term::int(2));
        assert!(by_eval(&mut kernel, &bad).is_err());
    }

    #[test]
    fn simplification_oracle_uses_identities() {
        let mut kernel = Kernel::default();
        let x = Term::var("x");
        let f = build::eq(Term::mul(x.clone(), Term::int(1)), x.clone());
        assert!(by_simplification(&mut kernel, &f).is_ok());
        let g = build::eq(Term::add(x.clone(), Term::int(1)), x);
        assert!(by_simplification(&mut kernel, &g).is_err());
    }
}
