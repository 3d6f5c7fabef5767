//! Theory rules for the built-in relations: equality, ordering, and set
//! membership.
//!
//! These are ordinary checked rules over the relation constructors; they
//! never evaluate terms (evaluation belongs to the oracles).

use crate::error::Result;
use crate::prop::Formula;
use crate::term::Term;

use super::provenance::Rule;
use super::rules::not_applicable;
use super::{Kernel, Proposition};

impl Kernel {
    /// Reflexivity of equality: conclude `a = a` for any term.
    pub fn eq_reflexive(&mut self, term: &Term) -> Proposition {
        self.mint(
            Rule::Reflexive,
            Vec::new(),
            Formula::Equals(term.clone(), term.clone()),
        )
    }

    /// Symmetry of equality: from `a = b`, conclude `b = a`.
    pub fn eq_symmetric(&mut self, equality: &Proposition) -> Result<Proposition> {
        let eid = self.check_proven(equality)?;
        match &equality.formula {
            Formula::Equals(a, b) => {
                let conclusion = Formula::Equals(b.clone(), a.clone());
                Ok(self.mint(Rule::Symmetric, vec![eid], conclusion))
            }
            other => Err(not_applicable(
                "symmetric",
                format!("{} is not an equality", other),
            )),
        }
    }

    /// Transitivity of equality: from `a = b` and `b = c`, conclude
    /// `a = c`.
    pub fn eq_transitive(
        &mut self,
        first: &Proposition,
        second: &Proposition,
    ) -> Result<Proposition> {
        let fid = self.check_proven(first)?;
        let sid = self.check_proven(second)?;
        match (&first.formula, &second.formula) {
            (Formula::Equals(a, b1), Formula::Equals(b2, c)) => {
                if b1 != b2 {
                    return Err(not_applicable(
                        "transitive",
                        format!("{} and {} do not chain", first.formula, second.formula),
                    ));
                }
                let conclusion = Formula::Equals(a.clone(), c.clone());
                Ok(self.mint(Rule::Transitive, vec![fid, sid], conclusion))
            }
            _ => Err(not_applicable(
                "transitive",
                "both inputs must be equalities".to_string(),
            )),
        }
    }

    /// Transitivity of the order relations. Chaining a strict link with any
    /// other link is strict; two weak links stay weak. Equalities may link
    /// either end.
    pub fn order_transitive(
        &mut self,
        first: &Proposition,
        second: &Proposition,
    ) -> Result<Proposition> {
        let fid = self.check_proven(first)?;
        let sid = self.check_proven(second)?;
        let (a, b1, strict1) = order_link(&first.formula).ok_or_else(|| {
            not_applicable(
                "transitive",
                format!("{} is not an order relation", first.formula),
            )
        })?;
        let (b2, c, strict2) = order_link(&second.formula).ok_or_else(|| {
            not_applicable(
                "transitive",
                format!("{} is not an order relation", second.formula),
            )
        })?;
        if b1 != b2 {
            return Err(not_applicable(
                "transitive",
                format!("{} and {} do not chain", first.formula, second.formula),
            ));
        }
        let conclusion = match (strict1, strict2) {
            (Some(true), _) | (_, Some(true)) => Formula::LessThan(a.clone(), c.clone()),
            (Some(false), _) | (_, Some(false)) => Formula::LessOrEqual(a.clone(), c.clone()),
            // two equalities chain through eq_transitive, not here
            (None, None) => {
                return Err(not_applicable(
                    "transitive",
                    "no order relation in the chain".to_string(),
                ))
            }
        };
        Ok(self.mint(Rule::Transitive, vec![fid, sid], conclusion))
    }

    /// From `a > b`, conclude `b < a` (and `a >= b` to `b <= a`).
    pub fn to_less_than(&mut self, p: &Proposition) -> Result<Proposition> {
        let pid = self.check_proven(p)?;
        let conclusion = match &p.formula {
            Formula::GreaterThan(a, b) => Formula::LessThan(b.clone(), a.clone()),
            Formula::GreaterOrEqual(a, b) => Formula::LessOrEqual(b.clone(), a.clone()),
            other => {
                return Err(not_applicable(
                    "to_less_than",
                    format!("{} is not a greater-than relation", other),
                ))
            }
        };
        Ok(self.mint(Rule::ToLessThan, vec![pid], conclusion))
    }

    /// From `a < b`, conclude `b > a` (and `a <= b` to `b >= a`).
    pub fn to_greater_than(&mut self, p: &Proposition) -> Result<Proposition> {
        let pid = self.check_proven(p)?;
        let conclusion = match &p.formula {
            Formula::LessThan(a, b) => Formula::GreaterThan(b.clone(), a.clone()),
            Formula::LessOrEqual(a, b) => Formula::GreaterOrEqual(b.clone(), a.clone()),
            other => {
                return Err(not_applicable(
                    "to_greater_than",
                    format!("{} is not a less-than relation", other),
                ))
            }
        };
        Ok(self.mint(Rule::ToGreaterThan, vec![pid], conclusion))
    }

    /// Weakening of a strict order: from `a < b`, conclude `a <= b`.
    pub fn weaken_order(&mut self, p: &Proposition) -> Result<Proposition> {
        let pid = self.check_proven(p)?;
        let conclusion = match &p.formula {
            Formula::LessThan(a, b) => Formula::LessOrEqual(a.clone(), b.clone()),
            Formula::GreaterThan(a, b) => Formula::GreaterOrEqual(a.clone(), b.clone()),
            other => {
                return Err(not_applicable(
                    "weaken_inequality",
                    format!("{} is not a strict order", other),
                ))
            }
        };
        Ok(self.mint(Rule::WeakenInequality, vec![pid], conclusion))
    }

    /// From `x in A` and `A subset of B`, conclude `x in B`.
    pub fn contained_in_superset(
        &mut self,
        membership: &Proposition,
        subset: &Proposition,
    ) -> Result<Proposition> {
        let mid = self.check_proven(membership)?;
        let sid = self.check_proven(subset)?;
        match (&membership.formula, &subset.formula) {
            (Formula::IsContainedIn(x, a1), Formula::IsSubsetOf(a2, b)) => {
                if a1 != a2 {
                    return Err(not_applicable(
                        "thus_contained_in_b",
                        format!("{} is not the subset's left side", a1),
                    ));
                }
                let conclusion = Formula::IsContainedIn(x.clone(), b.clone());
                Ok(self.mint(Rule::ThusContainedInB, vec![mid, sid], conclusion))
            }
            _ => Err(not_applicable(
                "thus_contained_in_b",
                "inputs must be a membership and a subset relation".to_string(),
            )),
        }
    }

    /// Transitivity of the subset relation: from `A subset of B` and
    /// `B subset of C`, conclude `A subset of C`.
    pub fn subset_transitive(
        &mut self,
        first: &Proposition,
        second: &Proposition,
    ) -> Result<Proposition> {
        let fid = self.check_proven(first)?;
        let sid = self.check_proven(second)?;
        match (&first.formula, &second.formula) {
            (Formula::IsSubsetOf(a, b1), Formula::IsSubsetOf(b2, c)) => {
                if b1 != b2 {
                    return Err(not_applicable(
                        "transitive",
                        format!("{} and {} do not chain", first.formula, second.formula),
                    ));
                }
                let conclusion = Formula::IsSubsetOf(a.clone(), c.clone());
                Ok(self.mint(Rule::Transitive, vec![fid, sid], conclusion))
            }
            _ => Err(not_applicable(
                "transitive",
                "both inputs must be subset relations".to_string(),
            )),
        }
    }

    /// Transitivity of divisibility: from `a | b` and `b | c`, conclude
    /// `a | c`.
    pub fn divides_transitive(
        &mut self,
        first: &Proposition,
        second: &Proposition,
    ) -> Result<Proposition> {
        let fid = self.check_proven(first)?;
        let sid = self.check_proven(second)?;
        match (&first.formula, &second.formula) {
            (Formula::Divides(a, b1), Formula::Divides(b2, c)) => {
                if b1 != b2 {
                    return Err(not_applicable(
                        "transitive",
                        format!("{} and {} do not chain", first.formula, second.formula),
                    ));
                }
                let conclusion = Formula::Divides(a.clone(), c.clone());
                Ok(self.mint(Rule::Transitive, vec![fid, sid], conclusion))
            }
            _ => Err(not_applicable(
                "transitive",
                "both inputs must be divisibility relations".to_string(),
            )),
        }
    }
}

/// View an order relation (or an equality) as a chainable link
/// `(left, right, strictness)`. `None` strictness marks an equality link.
fn order_link(f: &Formula) -> Option<(&Term, &Term, Option<bool>)> {
    match f {
        Formula::LessThan(a, b) => Some((a, b, Some(true))),
        Formula::LessOrEqual(a, b) => Some((a, b, Some(false))),
        Formula::Equals(a, b) => Some((a, b, None)),
        _ => None,
    }
}
