//! The trusted integer evaluator and simplifier used by the oracles.
//!
//! Evaluation is deliberately narrow: ground, integer-valued terms only.
//! Anything else is refused, never approximated.

use crate::term::{ExprOp, Sequence, Term, Variable};

/// Evaluate a ground term to an integer, if possible.
pub fn eval(term: &Term) -> Option<i64> {
    match term {
        Term::Constant(c) => c.value,
        Term::Variable(_) | Term::Set(_) | Term::Sequence(_) => None,
        Term::Expr { op, args } => eval_expr(*op, args),
    }
}

fn eval_expr(op: ExprOp, args: &[Term]) -> Option<i64> {
    match op {
        ExprOp::Add => {
            let mut acc: i64 = 0;
            for a in args {
                acc = acc.checked_add(eval(a)?)?;
            }
            Some(acc)
        }
        ExprOp::Mul => {
            let mut acc: i64 = 1;
            for a in args {
                acc = acc.checked_mul(eval(a)?)?;
            }
            Some(acc)
        }
        ExprOp::Pow => {
            let (base, exp) = two(args)?;
            let exp = u32::try_from(exp).ok()?;
            base.checked_pow(exp)
        }
        ExprOp::Neg => {
            let v = eval(args.first()?)?;
            v.checked_neg()
        }
        ExprOp::Abs => {
            let v = eval(args.first()?)?;
            v.checked_abs()
        }
        ExprOp::Mod => {
            let (a, m) = two(args)?;
            if m == 0 {
                None
            } else {
                Some(a.rem_euclid(m))
            }
        }
        ExprOp::Gcd => {
            let (a, b) = two(args)?;
            Some(gcd(a.unsigned_abs(), b.unsigned_abs()) as i64)
        }
        ExprOp::Max => args.iter().map(eval).collect::<Option<Vec<_>>>()?.into_iter().max(),
        ExprOp::Min => args.iter().map(eval).collect::<Option<Vec<_>>>()?.into_iter().min(),
        ExprOp::Index => {
            let seq = match args.first()? {
                Term::Sequence(s) => s,
                _ => return None,
            };
            let index = eval(args.get(1)?)?;
            let nth = seq.nth_term.as_ref()?;
            let index_var = Term::Variable(Variable::new("n"));
            eval(&nth.replace(&index_var, &Term::int(index)))
        }
    }
}

fn two(args: &[Term]) -> Option<(i64, i64)> {
    if args.len() != 2 {
        return None;
    }
    Some((eval(&args[0])?, eval(&args[1])?))
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Simplify a term by constant folding and the usual algebraic identities.
/// The result is structurally canonical enough for `by_simplification` to
/// compare both sides of an equality.
pub fn simplify(term: &Term) -> Term {
    match term {
        Term::Expr { op, args } => {
            let args: Vec<Term> = args.iter().map(simplify).collect();
            simplify_expr(*op, args)
        }
        Term::Sequence(s) => Term::Sequence(Sequence {
            name: s.name.clone(),
            nth_term: s.nth_term.as_ref().map(|t| Box::new(simplify(t))),
        }),
        _ => term.clone(),
    }
}

fn simplify_expr(op: ExprOp, args: Vec<Term>) -> Term {
    let folded = Term::Expr {
        op,
        args: args.clone(),
    };
    if let Some(v) = eval(&folded) {
        return Term::int(v);
    }
    match op {
        ExprOp::Add => {
            let mut flat = Vec::new();
            let mut constant: i64 = 0;
            for a in args {
                match a {
                    Term::Expr {
                        op: ExprOp::Add,
                        args: inner,
                    } => flat.extend(inner),
                    other => match eval(&other) {
                        Some(v) => constant += v,
                        None => flat.push(other),
                    },
                }
            }
            if constant != 0 {
                flat.push(Term::int(constant));
            }
            match flat.len() {
                0 => Term::int(0),
                1 => flat.into_iter().next().unwrap(),
                _ => Term::Expr {
                    op: ExprOp::Add,
                    args: flat,
                },
            }
        }
        ExprOp::Mul => {
            let mut flat = Vec::new();
            let mut constant: i64 = 1;
            for a in args {
                match a {
                    Term::Expr {
                        op: ExprOp::Mul,
                        args: inner,
                    } => flat.extend(inner),
                    other => match eval(&other) {
                        Some(v) => constant *= v,
                        None => flat.push(other),
                    },
                }
            }
            if constant == 0 {
                return Term::int(0);
            }
            if constant != 1 {
                flat.insert(0, Term::int(constant));
            }
            match flat.len() {
                0 => Term::int(1),
                1 => flat.into_iter().next().unwrap(),
                _ => Term::Expr {
                    op: ExprOp::Mul,
                    args: flat,
                },
            }
        }
        ExprOp::Pow => {
            if args.len() == 2 {
                match eval(&args[1]) {
                    Some(1) => return args.into_iter().next().unwrap(),
                    Some(0) => return Term::int(1),
                    _ => {}
                }
            }
            Term::Expr { op, args }
        }
        ExprOp::Neg => {
            if let Some(Term::Expr {
                op: ExprOp::Neg,
                args: inner,
            }) = args.first().cloned()
            {
                if let Some(t) = inner.into_iter().next() {
                    return t;
                }
            }
            Term::Expr { op, args }
        }
        _ => Term::Expr { op, args },
    }
}

/// Whether `n` is prime, by trial division.
pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    let mut d: i64 = 2;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_arithmetic() {
        let t = Term::add(Term::mul(Term::int(3), Term::int(4)), Term::int(5));
        assert_eq!(eval(&t), Some(17));
        assert_eq!(eval(&Term::pow(Term::int(2), Term::int(10))), Some(1024));
        assert_eq!(eval(&Term::var("x")), None);
    }

    #[test]
    fn mod_is_euclidean_and_total_only_for_nonzero_modulus() {
        let t = Term::expr(crate::term::ExprOp::Mod, vec![Term::int(-7), Term::int(3)]);
        assert_eq!(eval(&t), Some(2));
        let z = Term::expr(crate::term::ExprOp::Mod, vec![Term::int(1), Term::int(0)]);
        assert_eq!(eval(&z), None);
    }

    #[test]
    fn simplify_applies_identities() {
        let x = Term::var("x");
        let t = Term::mul(x.clone(), Term::int(1));
        assert_eq!(simplify(&t), x);
        let u = Term::add(Term::var("x"), Term::int(0));
        assert_eq!(simplify(&u), Term::var("x"));
        let z = Term::mul(Term::var("x"), Term::int(0));
        assert_eq!(simplify(&z), Term::int(0));
    }

    #[test]
    fn primality_by_trial_division() {
        assert!(is_prime(2));
        assert!(is_prime(97));
        assert!(!is_prime(1));
        assert!(!is_prime(91));
    }
}
