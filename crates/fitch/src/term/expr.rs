//! Terms: the non-propositional data carried by atoms and relations.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::symbol::{Constant, Sequence, SetSymbol, Variable};

/// Operators of algebraic expression nodes.
///
/// Expressions are never normalized unless explicitly evaluated by an
/// oracle; `(a+b)+c` and `a+(b+c)` are structurally distinct terms.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExprOp {
    Add,
    Mul,
    Pow,
    Neg,
    Abs,
    Mod,
    Gcd,
    Max,
    Min,
    /// Sequence indexing: `Index(seq, i)` is the `i`-th term of the family.
    Index,
}

impl ExprOp {
    pub fn name(self) -> &'static str {
        match self {
            ExprOp::Add => "add",
            ExprOp::Mul => "mul",
            ExprOp::Pow => "pow",
            ExprOp::Neg => "neg",
            ExprOp::Abs => "abs",
            ExprOp::Mod => "mod",
            ExprOp::Gcd => "gcd",
            ExprOp::Max => "max",
            ExprOp::Min => "min",
            ExprOp::Index => "index",
        }
    }
}

/// A term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Variable(Variable),
    Constant(Constant),
    Set(SetSymbol),
    Sequence(Sequence),
    Expr { op: ExprOp, args: Vec<Term> },
}

impl Term {
    pub fn var(name: impl Into<String>) -> Term {
        Term::Variable(Variable::new(name))
    }

    pub fn constant(name: impl Into<String>) -> Term {
        Term::Constant(Constant::named(name))
    }

    pub fn int(value: i64) -> Term {
        Term::Constant(Constant::integer(value))
    }

    pub fn expr(op: ExprOp, args: Vec<Term>) -> Term {
        Term::Expr { op, args }
    }

    pub fn add(a: Term, b: Term) -> Term {
        Term::Expr {
            op: ExprOp::Add,
            args: vec![a, b],
        }
    }

    pub fn mul(a: Term, b: Term) -> Term {
        Term::Expr {
            op: ExprOp::Mul,
            args: vec![a, b],
        }
    }

    pub fn pow(base: Term, exp: Term) -> Term {
        Term::Expr {
            op: ExprOp::Pow,
            args: vec![base, exp],
        }
    }

    pub fn neg(a: Term) -> Term {
        Term::Expr {
            op: ExprOp::Neg,
            args: vec![a],
        }
    }

    /// Get all variables occurring in this term.
    pub fn variables(&self) -> Vec<Variable> {
        let mut vars = Vec::new();
        self.collect_variables_into(&mut vars);
        vars
    }

    fn collect_variables_into(&self, vars: &mut Vec<Variable>) {
        match self {
            Term::Variable(v) => vars.push(v.clone()),
            Term::Constant(_) | Term::Set(_) => {}
            Term::Sequence(s) => {
                if let Some(nth) = &s.nth_term {
                    nth.collect_variables_into(vars);
                }
            }
            Term::Expr { args, .. } => {
                for arg in args {
                    arg.collect_variables_into(vars);
                }
            }
        }
    }

    /// Collect all variables in this term into a set.
    pub fn collect_variables(&self, vars: &mut HashSet<Variable>) {
        match self {
            Term::Variable(v) => {
                vars.insert(v.clone());
            }
            Term::Constant(_) | Term::Set(_) => {}
            Term::Sequence(s) => {
                if let Some(nth) = &s.nth_term {
                    nth.collect_variables(vars);
                }
            }
            Term::Expr { args, .. } => {
                for arg in args {
                    arg.collect_variables(vars);
                }
            }
        }
    }

    /// Check whether `sub` occurs in this term (including the term itself).
    pub fn contains(&self, sub: &Term) -> bool {
        if self == sub {
            return true;
        }
        match self {
            Term::Expr { args, .. } => args.iter().any(|a| a.contains(sub)),
            Term::Sequence(s) => s
                .nth_term
                .as_ref()
                .map(|nth| nth.contains(sub))
                .unwrap_or(false),
            _ => false,
        }
    }

    /// Replace every occurrence of `current` by `new` in this term.
    pub fn replace(&self, current: &Term, new: &Term) -> Term {
        if self == current {
            return new.clone();
        }
        match self {
            Term::Expr { op, args } => Term::Expr {
                op: *op,
                args: args.iter().map(|a| a.replace(current, new)).collect(),
            },
            Term::Sequence(s) => Term::Sequence(Sequence {
                name: s.name.clone(),
                nth_term: s
                    .nth_term
                    .as_ref()
                    .map(|nth| Box::new(nth.replace(current, new))),
            }),
            _ => self.clone(),
        }
    }

    /// Whether the term contains no variables.
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Variable(_) => false,
            Term::Constant(_) | Term::Set(_) => true,
            Term::Sequence(s) => s.nth_term.as_ref().map(|t| t.is_ground()).unwrap_or(true),
            Term::Expr { args, .. } => args.iter().all(|a| a.is_ground()),
        }
    }
}

impl From<Variable> for Term {
    fn from(v: Variable) -> Term {
        Term::Variable(v)
    }
}

impl From<Constant> for Term {
    fn from(c: Constant) -> Term {
        Term::Constant(c)
    }
}

impl From<i64> for Term {
    fn from(n: i64) -> Term {
        Term::int(n)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{}", v),
            Term::Constant(c) => write!(f, "{}", c),
            Term::Set(s) => write!(f, "{}", s),
            Term::Sequence(s) => write!(f, "{}", s),
            Term::Expr { op, args } => match op {
                ExprOp::Add => write_infix(f, args, " + "),
                ExprOp::Mul => write_infix(f, args, " * "),
                ExprOp::Pow => write_infix(f, args, "^"),
                ExprOp::Neg => write!(f, "-({})", args[0]),
                ExprOp::Mod => write_infix(f, args, " mod "),
                ExprOp::Index => write!(f, "{}[{}]", args[0], args[1]),
                ExprOp::Abs | ExprOp::Gcd | ExprOp::Max | ExprOp::Min => {
                    write!(f, "{}(", op.name())?;
                    for (i, a) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", a)?;
                    }
                    write!(f, ")")
                }
            },
        }
    }
}

fn write_infix(f: &mut fmt::Formatter<'_>, args: &[Term], sep: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, a) in args.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", sep)?;
        }
        write!(f, "{}", a)?;
    }
    write!(f, ")")
}
