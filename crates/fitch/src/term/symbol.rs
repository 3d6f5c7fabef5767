//! Symbols: variables, constants, set symbols, and sequences.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A three-valued attribute flag.
///
/// Attributes inform the inspection oracles; kernel rules never read them to
/// conclude propositions silently.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Ternary {
    True,
    False,
    #[default]
    Unknown,
}

impl Ternary {
    /// Three-valued negation: `True` <-> `False`, `Unknown` stays unknown.
    pub fn not(self) -> Ternary {
        match self {
            Ternary::True => Ternary::False,
            Ternary::False => Ternary::True,
            Ternary::Unknown => Ternary::Unknown,
        }
    }

    pub fn is_true(self) -> bool {
        self == Ternary::True
    }
}

impl From<bool> for Ternary {
    fn from(b: bool) -> Self {
        if b {
            Ternary::True
        } else {
            Ternary::False
        }
    }
}

/// Attribute record attached to variables and constants at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Attributes {
    pub real: Ternary,
    pub rational: Ternary,
    pub integer: Ternary,
    pub natural: Ternary,
    pub positive: Ternary,
    pub nonnegative: Ternary,
    pub even: Ternary,
}

impl Attributes {
    /// Attributes for an integer-valued constant.
    pub fn integer_value(value: i64) -> Self {
        Attributes {
            real: Ternary::True,
            rational: Ternary::True,
            integer: Ternary::True,
            natural: (value >= 0).into(),
            positive: (value > 0).into(),
            nonnegative: (value >= 0).into(),
            even: (value % 2 == 0).into(),
        }
    }
}

/// A free symbol. `deps` lists variables whose scope this one depends on;
/// only dependency-free variables are generalized on frame close.
///
/// `bound` toggles when the variable is captured by a quantifier. It is
/// scope bookkeeping, not identity: equality and hashing ignore it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub deps: Vec<Variable>,
    pub bound: bool,
    pub attrs: Attributes,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Variable {
            name: name.into(),
            deps: Vec::new(),
            bound: false,
            attrs: Attributes::default(),
        }
    }

    pub fn with_attrs(name: impl Into<String>, attrs: Attributes) -> Self {
        Variable {
            name: name.into(),
            deps: Vec::new(),
            bound: false,
            attrs,
        }
    }

    pub fn with_deps(name: impl Into<String>, deps: Vec<Variable>) -> Self {
        Variable {
            name: name.into(),
            deps,
            bound: false,
            attrs: Attributes::default(),
        }
    }

    /// A copy of this variable marked as captured by a quantifier.
    pub fn bound(&self) -> Variable {
        let mut v = self.clone();
        v.bound = true;
        v
    }

    /// A copy of this variable released from its quantifier.
    pub fn unbound(&self) -> Variable {
        let mut v = self.clone();
        v.bound = false;
        v
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.deps == other.deps && self.attrs == other.attrs
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.deps.hash(state);
        self.attrs.hash(state);
    }
}

/// A constant symbol, possibly carrying an integer value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Constant {
    pub name: String,
    pub value: Option<i64>,
    pub attrs: Attributes,
}

impl Constant {
    pub fn named(name: impl Into<String>) -> Self {
        Constant {
            name: name.into(),
            value: None,
            attrs: Attributes::default(),
        }
    }

    pub fn integer(value: i64) -> Self {
        Constant {
            name: value.to_string(),
            value: Some(value),
            attrs: Attributes::integer_value(value),
        }
    }
}

/// A set denoted by a name, or by explicit finite membership.
///
/// Enumerated elements make membership decidable for the inspection oracle;
/// a bare name (the reals, an abstract `S`) decides nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SetSymbol {
    pub name: String,
    pub elements: Option<Vec<super::Term>>,
}

impl SetSymbol {
    pub fn named(name: impl Into<String>) -> Self {
        SetSymbol {
            name: name.into(),
            elements: None,
        }
    }

    pub fn enumerated(name: impl Into<String>, elements: Vec<super::Term>) -> Self {
        SetSymbol {
            name: name.into(),
            elements: Some(elements),
        }
    }
}

/// An indexed family of terms. `nth_term` optionally gives a closed form
/// over the distinguished index variable `n`; indexing itself is a term
/// operation (`ExprOp::Index`), not an arithmetic one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sequence {
    pub name: String,
    pub nth_term: Option<Box<super::Term>>,
}

impl Sequence {
    pub fn named(name: impl Into<String>) -> Self {
        Sequence {
            name: name.into(),
            nth_term: None,
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.deps.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}(", self.name)?;
            for (i, d) in self.deps.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", d)?;
            }
            write!(f, ")")
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for SetSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}_n)", self.name)
    }
}
