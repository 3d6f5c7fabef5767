//! The checked inference rules.
//!
//! Each rule verifies that its inputs are proven under the current frame
//! stack and that the structural preconditions hold; on violation it returns
//! an error and leaves the kernel unchanged. Derived rules are expressed in
//! terms of the same minting primitive as the basic ones, so every proven
//! proposition has a finite derivation in the log.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ProofError, Result};
use crate::prop::{are_negs, build, de_morgan, neg, Formula};
use crate::subst::{match_formula, substitute};
use crate::term::{Term, Variable};

use super::provenance::Rule;
use super::{Kernel, Proposition};

/// Which side of an equality to substitute in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

pub(super) fn not_applicable(rule: &'static str, msg: impl Into<String>) -> ProofError {
    ProofError::RuleNotApplicable(rule, msg.into())
}

impl Kernel {
    /// Modus ponens: from `A` and `A -> B`, conclude `B`.
    pub fn modus_ponens(&mut self, p: &Proposition, implication: &Proposition) -> Result<Proposition> {
        let pid = self.check_proven(p)?;
        let iid = self.check_proven(implication)?;
        match &implication.formula {
            Formula::Implies(ante, cons) => {
                if **ante != p.formula {
                    return Err(not_applicable(
                        "modus_ponens",
                        format!("{} does not begin {}", p.formula, implication.formula),
                    ));
                }
                Ok(self.mint(Rule::ModusPonens, vec![pid, iid], (**cons).clone()))
            }
            other => Err(not_applicable(
                "modus_ponens",
                format!("{} is not an implication", other),
            )),
        }
    }

    /// Modus tollens: from `~B` and `A -> B`, conclude `~A`.
    pub fn modus_tollens(&mut self, p: &Proposition, implication: &Proposition) -> Result<Proposition> {
        let pid = self.check_proven(p)?;
        let iid = self.check_proven(implication)?;
        match &implication.formula {
            Formula::Implies(ante, cons) => {
                if !are_negs(cons, &p.formula) {
                    return Err(not_applicable(
                        "modus_tollens",
                        format!("{} is not the negation of {}", p.formula, cons),
                    ));
                }
                let conclusion = neg(ante, self.classical());
                Ok(self.mint(Rule::ModusTollens, vec![pid, iid], conclusion))
            }
            other => Err(not_applicable(
                "modus_tollens",
                format!("{} is not an implication", other),
            )),
        }
    }

    /// Conjunction introduction over any number of proven propositions.
    /// Nested conjunctions flatten and duplicates are removed.
    pub fn and_intro(&mut self, props: &[&Proposition]) -> Result<Proposition> {
        if props.is_empty() {
            return Err(not_applicable("and_intro", "no conjuncts supplied"));
        }
        let mut ids = Vec::with_capacity(props.len());
        for p in props {
            ids.push(self.check_proven(p)?);
        }
        let conclusion = build::and(props.iter().map(|p| p.formula.clone()).collect());
        Ok(self.mint(Rule::AndIntro, ids, conclusion))
    }

    /// Conjunction elimination by position.
    pub fn and_elim(&mut self, conj: &Proposition, index: usize) -> Result<Proposition> {
        let cid = self.check_proven(conj)?;
        match &conj.formula {
            Formula::And(ps) => {
                let conclusion = ps.get(index).cloned().ok_or_else(|| {
                    not_applicable(
                        "is_one_of",
                        format!("index {} out of bounds for {}", index, conj.formula),
                    )
                })?;
                Ok(self.mint(Rule::AndElim, vec![cid], conclusion))
            }
            other => Err(not_applicable(
                "is_one_of",
                format!("{} is not a conjunction", other),
            )),
        }
    }

    /// Conjunction elimination by content: `target` must occur among the
    /// conjuncts, searching nested conjunctions.
    pub fn is_one_of(&mut self, target: &Formula, conj: &Proposition) -> Result<Proposition> {
        let cid = self.check_proven(conj)?;
        fn occurs(target: &Formula, f: &Formula) -> bool {
            match f {
                Formula::And(ps) => ps.iter().any(|p| p == target || occurs(target, p)),
                _ => false,
            }
        }
        if occurs(target, &conj.formula) {
            Ok(self.mint(Rule::AndElim, vec![cid], target.clone()))
        } else {
            Err(not_applicable(
                "is_one_of",
                format!("{} is not in {}", target, conj.formula),
            ))
        }
    }

    /// Disjunction introduction: `target` must be a disjunction containing
    /// the proven proposition.
    pub fn or_intro(&mut self, p: &Proposition, target: &Formula) -> Result<Proposition> {
        let pid = self.check_proven(p)?;
        match target {
            Formula::Or(ps) if ps.contains(&p.formula) => {
                Ok(self.mint(Rule::OrIntro, vec![pid], target.clone()))
            }
            Formula::Or(_) => Err(not_applicable(
                "one_proven",
                format!("{} is not present in {}", p.formula, target),
            )),
            other => Err(not_applicable(
                "one_proven",
                format!("{} is not a disjunction", other),
            )),
        }
    }

    /// Exclusive-or introduction: one disjunct proven, the negation of every
    /// other disjunct proven.
    pub fn exor_intro(
        &mut self,
        positive: &Proposition,
        negations: &[&Proposition],
        target: &Formula,
    ) -> Result<Proposition> {
        let pid = self.check_proven(positive)?;
        let mut ids = vec![pid];
        for n in negations {
            ids.push(self.check_proven(n)?);
        }
        let ps = match target {
            Formula::ExOr(ps) => ps,
            other => {
                return Err(not_applicable(
                    "exor_intro",
                    format!("{} is not an exclusive disjunction", other),
                ))
            }
        };
        if !ps.contains(&positive.formula) {
            return Err(not_applicable(
                "exor_intro",
                format!("{} is not present in {}", positive.formula, target),
            ));
        }
        for q in ps {
            if q == &positive.formula {
                continue;
            }
            if !negations.iter().any(|n| are_negs(q, &n.formula)) {
                return Err(not_applicable(
                    "exor_intro",
                    format!("missing proof that {} is false", q),
                ));
            }
        }
        Ok(self.mint(Rule::ExOrIntro, ids, target.clone()))
    }

    /// Case analysis: from `A1 \/ ... \/ An` and implications `Ai -> Ci`,
    /// conclude the disjunction of the `Ci` (a single proposition when they
    /// all agree).
    pub fn by_cases(&mut self, disj: &Proposition, implications: &[&Proposition]) -> Result<Proposition> {
        let did = self.check_proven(disj)?;
        let cases: &[Formula] = match &disj.formula {
            Formula::Or(ps) => ps,
            Formula::ExOr(ps) => ps,
            other => {
                return Err(not_applicable(
                    "by_cases",
                    format!("{} is not a disjunction", other),
                ))
            }
        };
        if implications.len() != cases.len() {
            return Err(not_applicable(
                "by_cases",
                format!(
                    "{} cases but {} implications",
                    cases.len(),
                    implications.len()
                ),
            ));
        }
        let mut ids = vec![did];
        let mut consequents = Vec::with_capacity(implications.len());
        let mut antecedents = Vec::with_capacity(implications.len());
        for imp in implications {
            ids.push(self.check_proven(imp)?);
            match &imp.formula {
                Formula::Implies(a, c) => {
                    antecedents.push((**a).clone());
                    consequents.push((**c).clone());
                }
                other => {
                    return Err(not_applicable(
                        "by_cases",
                        format!("{} is not an implication", other),
                    ))
                }
            }
        }
        for case in cases {
            if !antecedents.contains(case) {
                return Err(not_applicable(
                    "by_cases",
                    format!("no implication covers case {}", case),
                ));
            }
        }
        let conclusion = build::or(consequents);
        Ok(self.mint(Rule::ByCases, ids, conclusion))
    }

    /// Hypothetical syllogism: from `A -> B` and `B -> C`, conclude `A -> C`.
    pub fn hypothetical_syllogism(
        &mut self,
        first: &Proposition,
        second: &Proposition,
    ) -> Result<Proposition> {
        let fid = self.check_proven(first)?;
        let sid = self.check_proven(second)?;
        match (&first.formula, &second.formula) {
            (Formula::Implies(a, b1), Formula::Implies(b2, c)) => {
                if b1 != b2 {
                    return Err(not_applicable(
                        "hypothetical_syllogism",
                        format!("does not follow logically: {}, {}", first.formula, second.formula),
                    ));
                }
                let conclusion = Formula::Implies(a.clone(), c.clone());
                Ok(self.mint(Rule::HypotheticalSyllogism, vec![fid, sid], conclusion))
            }
            _ => Err(not_applicable(
                "hypothetical_syllogism",
                "both inputs must be implications".to_string(),
            )),
        }
    }

    /// Contrapositive: from `A -> B`, conclude `~B -> ~A`.
    pub fn contrapositive(&mut self, implication: &Proposition) -> Result<Proposition> {
        let iid = self.check_proven(implication)?;
        match &implication.formula {
            Formula::Implies(a, b) => {
                let classical = self.classical();
                let conclusion = Formula::Implies(
                    Box::new(neg(b, classical)),
                    Box::new(neg(a, classical)),
                );
                Ok(self.mint(Rule::Contrapositive, vec![iid], conclusion))
            }
            other => Err(not_applicable(
                "contrapositive",
                format!("{} is not an implication", other),
            )),
        }
    }

    /// Forward direction of a biconditional: from `A <-> B`, conclude
    /// `A -> B`.
    pub fn iff_forward(&mut self, iff: &Proposition) -> Result<Proposition> {
        let iid = self.check_proven(iff)?;
        match &iff.formula {
            Formula::Iff(a, b) => {
                let conclusion = Formula::Implies(a.clone(), b.clone());
                Ok(self.mint(Rule::IffForward, vec![iid], conclusion))
            }
            other => Err(not_applicable(
                "forward_implication",
                format!("{} is not a biconditional", other),
            )),
        }
    }

    /// Backward direction of a biconditional: from `A <-> B`, conclude
    /// `B -> A`.
    pub fn iff_backward(&mut self, iff: &Proposition) -> Result<Proposition> {
        let iid = self.check_proven(iff)?;
        match &iff.formula {
            Formula::Iff(a, b) => {
                let conclusion = Formula::Implies(b.clone(), a.clone());
                Ok(self.mint(Rule::IffBackward, vec![iid], conclusion))
            }
            other => Err(not_applicable(
                "reverse_implication",
                format!("{} is not a biconditional", other),
            )),
        }
    }

    /// From `A <-> B`, conclude `B <-> A`.
    pub fn iff_converse(&mut self, iff: &Proposition) -> Result<Proposition> {
        let iid = self.check_proven(iff)?;
        match &iff.formula {
            Formula::Iff(a, b) => {
                let conclusion = Formula::Iff(b.clone(), a.clone());
                Ok(self.mint(Rule::IffConverse, vec![iid], conclusion))
            }
            other => Err(not_applicable(
                "converse",
                format!("{} is not a biconditional", other),
            )),
        }
    }

    /// From `A <-> B`, conclude `(A -> B) /\ (B -> A)`.
    pub fn iff_to_conjunction(&mut self, iff: &Proposition) -> Result<Proposition> {
        let iid = self.check_proven(iff)?;
        match &iff.formula {
            Formula::Iff(a, b) => {
                let conclusion = Formula::And(vec![
                    Formula::Implies(a.clone(), b.clone()),
                    Formula::Implies(b.clone(), a.clone()),
                ]);
                Ok(self.mint(Rule::IffToConjunction, vec![iid], conclusion))
            }
            other => Err(not_applicable(
                "to_conjunction",
                format!("{} is not a biconditional", other),
            )),
        }
    }

    /// Binary resolution over disjunctions: from `A \/ B` and `~A \/ C`,
    /// conclude `B \/ C`. Classical only.
    pub fn resolve(&mut self, left: &Proposition, right: &Proposition) -> Result<Proposition> {
        if !self.classical() {
            return Err(not_applicable("resolve", "classical logic is not enabled"));
        }
        let lid = self.check_proven(left)?;
        let rid = self.check_proven(right)?;
        let (lps, rps) = match (&left.formula, &right.formula) {
            (Formula::Or(l), Formula::Or(r)) => (l, r),
            _ => {
                return Err(not_applicable(
                    "resolve",
                    "both inputs must be disjunctions".to_string(),
                ))
            }
        };
        let pair = lps.iter().enumerate().find_map(|(i, l)| {
            rps.iter()
                .position(|r| are_negs(l, r))
                .map(|j| (i, j))
        });
        let (i, j) = pair.ok_or_else(|| {
            not_applicable(
                "resolve",
                format!("no complementary pair in {} and {}", left.formula, right.formula),
            )
        })?;
        let mut rest: Vec<Formula> = Vec::new();
        rest.extend(lps.iter().enumerate().filter(|(k, _)| *k != i).map(|(_, p)| p.clone()));
        rest.extend(rps.iter().enumerate().filter(|(k, _)| *k != j).map(|(_, p)| p.clone()));
        let conclusion = if rest.is_empty() {
            Formula::Contradiction
        } else {
            build::or(rest)
        };
        Ok(self.mint(Rule::Resolve, vec![lid, rid], conclusion))
    }

    /// Unit resolution: from `A \/ B` and `~A`, conclude `B`. Also applies
    /// to exclusive disjunctions, where removing a refuted member is sound
    /// under the exactly-one reading.
    pub fn unit_resolve(&mut self, disj: &Proposition, unit: &Proposition) -> Result<Proposition> {
        let did = self.check_proven(disj)?;
        let uid = self.check_proven(unit)?;
        let (ps, exclusive) = match &disj.formula {
            Formula::Or(ps) => (ps, false),
            Formula::ExOr(ps) => (ps, true),
            other => {
                return Err(not_applicable(
                    "unit_resolve",
                    format!("{} is not a disjunction", other),
                ))
            }
        };
        if !ps.iter().any(|p| are_negs(p, &unit.formula)) {
            return Err(not_applicable(
                "unit_resolve",
                format!("{} refutes nothing in {}", unit.formula, disj.formula),
            ));
        }
        let rest: Vec<Formula> = ps
            .iter()
            .filter(|p| !are_negs(p, &unit.formula))
            .cloned()
            .collect();
        let conclusion = if rest.is_empty() {
            Formula::Contradiction
        } else if exclusive {
            build::xor(rest)
        } else {
            build::or(rest)
        };
        Ok(self.mint(Rule::UnitResolve, vec![did, uid], conclusion))
    }

    /// Definite-clause resolution: from `(A /\ B /\ ...) -> D` and proofs of
    /// some conjuncts of the antecedent, peel them off, down to `D` itself.
    pub fn definite_clause_resolve(
        &mut self,
        implication: &Proposition,
        in_body: &[&Proposition],
    ) -> Result<Proposition> {
        let iid = self.check_proven(implication)?;
        let (ante, cons) = match &implication.formula {
            Formula::Implies(a, c) => (a, c),
            other => {
                return Err(not_applicable(
                    "definite_clause_resolve",
                    format!("{} is not an implication", other),
                ))
            }
        };
        let mut ids = vec![iid];
        for p in in_body {
            ids.push(self.check_proven(p)?);
        }
        let supplied: Vec<&Formula> = in_body.iter().map(|p| &p.formula).collect();
        let conjuncts: Vec<Formula> = match &**ante {
            Formula::And(ps) => ps.clone(),
            single => {
                // a bare antecedent resolves like modus ponens
                if supplied.first().map(|f| *f == single) != Some(true) {
                    return Err(not_applicable(
                        "definite_clause_resolve",
                        format!("{:?} does not discharge {}", supplied.first(), single),
                    ));
                }
                return Ok(self.mint(Rule::DefiniteClauseResolve, ids, (**cons).clone()));
            }
        };
        for f in &supplied {
            if !conjuncts.contains(f) {
                return Err(not_applicable(
                    "definite_clause_resolve",
                    format!("{} is not in the antecedent", f),
                ));
            }
        }
        let remaining: Vec<Formula> = conjuncts
            .into_iter()
            .filter(|c| !supplied.iter().any(|s| *s == c))
            .collect();
        let conclusion = if remaining.is_empty() {
            (**cons).clone()
        } else if remaining.len() == 1 {
            Formula::Implies(
                Box::new(remaining.into_iter().next().unwrap()),
                cons.clone(),
            )
        } else {
            Formula::Implies(Box::new(Formula::And(remaining)), cons.clone())
        };
        Ok(self.mint(Rule::DefiniteClauseResolve, ids, conclusion))
    }

    /// De Morgan transformation of a proven proposition. Returns the input
    /// unchanged when no valid transformation applies in the current logic.
    pub fn apply_de_morgan(&mut self, p: &Proposition) -> Result<Proposition> {
        let pid = self.check_proven(p)?;
        let transformed = de_morgan(&p.formula, self.classical());
        if transformed == p.formula {
            return Ok(p.clone());
        }
        Ok(self.mint(Rule::DeMorgan, vec![pid], transformed))
    }

    /// Universal instantiation: from `forall v: P(v)` and a term `t`,
    /// conclude `P(t)`.
    pub fn universal_instantiation(&mut self, forall: &Proposition, term: &Term) -> Result<Proposition> {
        let fid = self.check_proven(forall)?;
        match &forall.formula {
            Formula::Forall { var, body } => {
                let conclusion = substitute(body, &Term::Variable(var.unbound()), term)?;
                Ok(self.mint(Rule::UniversalInstantiation, vec![fid], conclusion))
            }
            other => Err(not_applicable(
                "universal_instantiation",
                format!("{} is not universally quantified", other),
            )),
        }
    }

    /// Bounded universal instantiation: from `forall v in S: P(v)`, a term
    /// `t`, and a proof of `t in S`, conclude `P(t)`.
    pub fn universal_instantiation_in_set(
        &mut self,
        forall: &Proposition,
        term: &Term,
        membership: &Proposition,
    ) -> Result<Proposition> {
        let fid = self.check_proven(forall)?;
        let mid = self.check_proven(membership)?;
        match &forall.formula {
            Formula::ForallIn { var, set, body } => {
                match &membership.formula {
                    Formula::IsContainedIn(el, s) if el == term && s == set => {}
                    other => {
                        return Err(not_applicable(
                            "universal_instantiation_in_set",
                            format!("{} does not witness {} in {}", other, term, set),
                        ))
                    }
                }
                let conclusion = substitute(body, &Term::Variable(var.unbound()), term)?;
                Ok(self.mint(Rule::UniversalInstantiationInSet, vec![fid, mid], conclusion))
            }
            other => Err(not_applicable(
                "universal_instantiation_in_set",
                format!("{} is not a bounded universal", other),
            )),
        }
    }

    /// Conclude `target` as a special case of a proven universal, matching
    /// the bound variable against an arbitrary term.
    pub fn is_special_case_of(&mut self, target: &Formula, forall: &Proposition) -> Result<Proposition> {
        let fid = self.check_proven(forall)?;
        match &forall.formula {
            Formula::Forall { var, body } => {
                let vars: HashSet<Variable> = [var.unbound()].into_iter().collect();
                match match_formula(body, target, &vars) {
                    Some(_) => Ok(self.mint(Rule::IsSpecialCaseOf, vec![fid], target.clone())),
                    None => Err(not_applicable(
                        "is_special_case_of",
                        format!("{} is not a special case of {}", target, forall.formula),
                    )),
                }
            }
            other => Err(not_applicable(
                "is_special_case_of",
                format!("{} is not universally quantified", other),
            )),
        }
    }

    /// Existential introduction: from a proof of `P(t)` and a target
    /// `exists v: P(v)`, conclude the target.
    pub fn existential_introduction(
        &mut self,
        p: &Proposition,
        target: &Formula,
    ) -> Result<Proposition> {
        let pid = self.check_proven(p)?;
        match target {
            Formula::Exists { var, body } => {
                let vars: HashSet<Variable> = [var.unbound()].into_iter().collect();
                match match_formula(body, &p.formula, &vars) {
                    Some(_) => Ok(self.mint(Rule::ExistentialIntroduction, vec![pid], target.clone())),
                    None => Err(not_applicable(
                        "existential_introduction",
                        format!("{} does not instantiate {}", p.formula, target),
                    )),
                }
            }
            other => Err(not_applicable(
                "existential_introduction",
                format!("{} is not existentially quantified", other),
            )),
        }
    }

    /// Existential elimination: from `exists v: P(v)`, produce a fresh
    /// witness `w` and `P(w)`, assumed inside the current frame.
    pub fn existential_elimination(
        &mut self,
        exists: &Proposition,
    ) -> Result<(Variable, Proposition)> {
        if self.depth() == 0 {
            return Err(ProofError::ContextMisuse(
                "existential_elimination outside an open frame",
            ));
        }
        let eid = self.check_proven(exists)?;
        match exists.formula.clone() {
            Formula::Exists { var, body } => {
                let witness = self.fresh_witness(&var.name);
                let instance = substitute(
                    &body,
                    &Term::Variable(var.unbound()),
                    &Term::Variable(witness.clone()),
                )?;
                let p = self.assume(instance);
                // rewrite the step so provenance points at the existential
                if let Some(pid) = p.proof {
                    let step = &mut self.log[pid.0 as usize];
                    step.rule = Rule::ExistentialElimination;
                    step.premises = vec![eid];
                }
                Ok((witness, p))
            }
            other => Err(not_applicable(
                "existential_elimination",
                format!("{} is not existentially quantified", other),
            )),
        }
    }

    /// Substitution of equals: given proven `self` and `a = b`, replace `b`
    /// by `a` (`Side::Left`) or `a` by `b` (`Side::Right`) throughout.
    pub fn substitute_equals(
        &mut self,
        p: &Proposition,
        side: Side,
        equality: &Proposition,
    ) -> Result<Proposition> {
        let pid = self.check_proven(p)?;
        let eid = self.check_proven(equality)?;
        match &equality.formula {
            Formula::Equals(a, b) => {
                let (current, new) = match side {
                    Side::Left => (b, a),
                    Side::Right => (a, b),
                };
                let conclusion = substitute(&p.formula, current, new)?;
                Ok(self.mint(Rule::SubstituteEquals, vec![pid, eid], conclusion))
            }
            other => Err(not_applicable(
                "substitute_equals",
                format!("{} is not an equality", other),
            )),
        }
    }

    /// From `P` and `~P`, conclude a contradiction.
    pub fn contradicts(&mut self, p: &Proposition, q: &Proposition) -> Result<Proposition> {
        let pid = self.check_proven(p)?;
        let qid = self.check_proven(q)?;
        if !are_negs(&p.formula, &q.formula) {
            return Err(not_applicable(
                "contradicts",
                format!("{} and {} are not negations", p.formula, q.formula),
            ));
        }
        Ok(self.mint(Rule::Contradicts, vec![pid, qid], Formula::Contradiction))
    }

    /// Ex falso quodlibet: from a proven contradiction, conclude any target.
    pub fn ex_falso(&mut self, contradiction: &Proposition, target: &Formula) -> Result<Proposition> {
        let cid = self.check_proven(contradiction)?;
        if contradiction.formula != Formula::Contradiction {
            return Err(not_applicable(
                "ex_falso",
                format!("{} is not a contradiction", contradiction.formula),
            ));
        }
        Ok(self.mint(Rule::ExFalso, vec![cid], target.clone()))
    }

    /// Double-negation elimination: from `~~P`, conclude `P`. Classical only.
    pub fn double_negation(&mut self, p: &Proposition) -> Result<Proposition> {
        if !self.classical() {
            return Err(not_applicable(
                "double_negation",
                "classical logic is not enabled",
            ));
        }
        let pid = self.check_proven(p)?;
        match &p.formula {
            Formula::Not(inner) => match &**inner {
                Formula::Not(core) => Ok(self.mint(Rule::DoubleNegation, vec![pid], (**core).clone())),
                other => Err(not_applicable(
                    "double_negation",
                    format!("~{} is not a double negation", other),
                )),
            },
            other => Err(not_applicable(
                "double_negation",
                format!("{} is not a negation", other),
            )),
        }
    }

    /// Material implication: from `A -> B`, conclude `~A \/ B`. Classical
    /// only.
    pub fn impl_elim(&mut self, implication: &Proposition) -> Result<Proposition> {
        if !self.classical() {
            return Err(not_applicable("impl_elim", "classical logic is not enabled"));
        }
        let iid = self.check_proven(implication)?;
        match &implication.formula {
            Formula::Implies(a, b) => {
                let conclusion = build::or(vec![neg(a, true), (**b).clone()]);
                Ok(self.mint(Rule::ImplElim, vec![iid], conclusion))
            }
            other => Err(not_applicable(
                "impl_elim",
                format!("{} is not an implication", other),
            )),
        }
    }

    /// From a proven exclusive disjunction and one proven member, conclude
    /// that every other member is false.
    pub fn one_proven_rem_false(
        &mut self,
        exor: &Proposition,
        member: &Proposition,
    ) -> Result<Proposition> {
        let eid = self.check_proven(exor)?;
        let mid = self.check_proven(member)?;
        let ps = match &exor.formula {
            Formula::ExOr(ps) => ps,
            other => {
                return Err(not_applicable(
                    "one_proven_rem_false",
                    format!("{} is not an exclusive disjunction", other),
                ))
            }
        };
        if !ps.contains(&member.formula) {
            return Err(not_applicable(
                "one_proven_rem_false",
                format!("{} is not present in {}", member.formula, exor.formula),
            ));
        }
        let rest: Vec<Formula> = ps
            .iter()
            .filter(|p| **p != member.formula)
            .map(|p| Formula::Not(Box::new(p.clone())))
            .collect();
        if rest.is_empty() {
            return Err(not_applicable(
                "one_proven_rem_false",
                "no remaining members".to_string(),
            ));
        }
        let conclusion = build::and(rest);
        Ok(self.mint(Rule::OneProvenRemFalse, vec![eid, mid], conclusion))
    }

    /// Quantified modus ponens: from `forall v: P(v)` and a quantified
    /// implication `forall v: P(v) -> Q(v)` (or its existential form),
    /// conclude the implication's quantifier over `Q(v)`.
    pub fn quantified_modus_ponens(
        &mut self,
        forall: &Proposition,
        quantified_impl: &Proposition,
    ) -> Result<Proposition> {
        let fid = self.check_proven(forall)?;
        let qid = self.check_proven(quantified_impl)?;
        let (var, body) = match &forall.formula {
            Formula::Forall { var, body } => (var, body),
            other => {
                return Err(not_applicable(
                    "quantified_modus_ponens",
                    format!("{} is not universally quantified", other),
                ))
            }
        };
        let (other_var, other_body, existential) = match &quantified_impl.formula {
            Formula::Forall { var, body } => (var, body, false),
            Formula::Exists { var, body } => (var, body, true),
            other => {
                return Err(not_applicable(
                    "quantified_modus_ponens",
                    format!("{} is not quantified", other),
                ))
            }
        };
        let (ante, cons) = match &**other_body {
            Formula::Implies(a, c) => (a, c),
            other => {
                return Err(not_applicable(
                    "quantified_modus_ponens",
                    format!("{} is not an implication", other),
                ))
            }
        };
        if var != other_var || **ante != **body {
            return Err(not_applicable(
                "quantified_modus_ponens",
                format!(
                    "{} does not begin {}",
                    forall.formula, quantified_impl.formula
                ),
            ));
        }
        let conclusion = if existential {
            Formula::Exists {
                var: other_var.clone(),
                body: cons.clone(),
            }
        } else {
            Formula::Forall {
                var: other_var.clone(),
                body: cons.clone(),
            }
        };
        Ok(self.mint(Rule::QuantifiedModusPonens, vec![fid, qid], conclusion))
    }

    /// Existential modus ponens: from `exists v: P(v)` and
    /// `forall v: P(v) -> Q(v)`, conclude `exists v: Q(v)`.
    pub fn exists_modus_ponens(
        &mut self,
        exists: &Proposition,
        forall_impl: &Proposition,
    ) -> Result<Proposition> {
        let eid = self.check_proven(exists)?;
        let fid = self.check_proven(forall_impl)?;
        let (var, body) = match &exists.formula {
            Formula::Exists { var, body } => (var, body),
            other => {
                return Err(not_applicable(
                    "exists_modus_ponens",
                    format!("{} is not existentially quantified", other),
                ))
            }
        };
        let (other_var, other_body) = match &forall_impl.formula {
            Formula::Forall { var, body } => (var, body),
            other => {
                return Err(not_applicable(
                    "exists_modus_ponens",
                    format!("{} is not universally quantified", other),
                ))
            }
        };
        let (ante, cons) = match &**other_body {
            Formula::Implies(a, c) => (a, c),
            other => {
                return Err(not_applicable(
                    "exists_modus_ponens",
                    format!("{} is not an implication", other),
                ))
            }
        };
        if var != other_var || **ante != **body {
            return Err(not_applicable(
                "exists_modus_ponens",
                format!("{} does not begin {}", exists.formula, forall_impl.formula),
            ));
        }
        let conclusion = Formula::Exists {
            var: other_var.clone(),
            body: cons.clone(),
        };
        Ok(self.mint(Rule::ExistsModusPonens, vec![eid, fid], conclusion))
    }

    /// Existential generalization: from a proof of `P`, replace every
    /// occurrence of `witness` by a new variable and conclude
    /// `exists v: P[witness := v]`.
    pub fn thus_there_exists(
        &mut self,
        p: &Proposition,
        var_name: impl Into<String>,
        witness: &Term,
    ) -> Result<Proposition> {
        let pid = self.check_proven(p)?;
        let var = Variable::new(var_name);
        if p.formula.mentions_free(&var) {
            return Err(not_applicable(
                "thus_there_exists",
                format!("{} already occurs in {}", var, p.formula),
            ));
        }
        let body = substitute(&p.formula, witness, &Term::Variable(var.clone()))?;
        if body == p.formula {
            return Err(not_applicable(
                "thus_there_exists",
                format!("{} does not occur in {}", witness, p.formula),
            ));
        }
        let conclusion = Formula::Exists {
            var: var.bound(),
            body: Box::new(body),
        };
        Ok(self.mint(Rule::ThusThereExists, vec![pid], conclusion))
    }

    /// Bounded existential generalization: from `P(t)` and `t in S`,
    /// conclude `exists v in S: P(v)`.
    pub fn thus_there_exists_in_set(
        &mut self,
        p: &Proposition,
        var_name: impl Into<String>,
        witness: &Term,
        membership: &Proposition,
    ) -> Result<Proposition> {
        let pid = self.check_proven(p)?;
        let mid = self.check_proven(membership)?;
        let set = match &membership.formula {
            Formula::IsContainedIn(el, s) if el == witness => s.clone(),
            other => {
                return Err(not_applicable(
                    "thus_there_exists",
                    format!("{} does not witness membership of {}", other, witness),
                ))
            }
        };
        let var = Variable::new(var_name);
        if p.formula.mentions_free(&var) {
            return Err(not_applicable(
                "thus_there_exists",
                format!("{} already occurs in {}", var, p.formula),
            ));
        }
        let body = substitute(&p.formula, witness, &Term::Variable(var.clone()))?;
        let conclusion = Formula::ExistsIn {
            var: var.bound(),
            set,
            body: Box::new(body),
        };
        Ok(self.mint(Rule::ThusThereExists, vec![pid, mid], conclusion))
    }

    /// Left distribution over a two-member junction: from
    /// `A \/ (B /\ C)`, conclude `(A \/ B) /\ (A \/ C)` (and dually for
    /// a conjunction over a disjunction).
    pub fn left_distribute(&mut self, p: &Proposition) -> Result<Proposition> {
        let pid = self.check_proven(p)?;
        let conclusion = distribute(&p.formula, false)
            .ok_or_else(|| not_applicable("left_distribute", format!("{} does not distribute", p.formula)))?;
        Ok(self.mint(Rule::LeftDistribute, vec![pid], conclusion))
    }

    /// Right distribution: from `(A /\ B) \/ C`, conclude
    /// `(A \/ C) /\ (B \/ C)` (and dually).
    pub fn right_distribute(&mut self, p: &Proposition) -> Result<Proposition> {
        let pid = self.check_proven(p)?;
        let conclusion = distribute(&p.formula, true)
            .ok_or_else(|| not_applicable("right_distribute", format!("{} does not distribute", p.formula)))?;
        Ok(self.mint(Rule::RightDistribute, vec![pid], conclusion))
    }

    /// Flatten nested junctions of the same kind: from
    /// `A \/ (B \/ C)`, conclude `A \/ B \/ C`.
    pub fn de_nest(&mut self, p: &Proposition) -> Result<Proposition> {
        let pid = self.check_proven(p)?;
        let conclusion = match &p.formula {
            Formula::And(ps) => build::and(ps.clone()),
            Formula::Or(ps) => build::or(ps.clone()),
            Formula::ExOr(ps) => build::xor(ps.clone()),
            other => {
                return Err(not_applicable(
                    "de_nest",
                    format!("{} is not a junction", other),
                ))
            }
        };
        if conclusion == p.formula {
            return Ok(p.clone());
        }
        Ok(self.mint(Rule::DeNest, vec![pid], conclusion))
    }
}

/// Two-member distribution. `right` distributes the junction on the first
/// member instead of the second.
fn distribute(f: &Formula, right: bool) -> Option<Formula> {
    let (outer_or, members) = match f {
        Formula::Or(ps) => (true, ps),
        Formula::And(ps) => (false, ps),
        _ => return None,
    };
    if members.len() != 2 {
        return None;
    }
    let (kept, junction) = if right {
        (&members[1], &members[0])
    } else {
        (&members[0], &members[1])
    };
    let inner: &[Formula] = match (outer_or, junction) {
        (true, Formula::And(qs)) => qs,
        (false, Formula::Or(qs)) => qs,
        _ => return None,
    };
    let pieces: Vec<Formula> = inner
        .iter()
        .map(|q| {
            let pair = if right {
                vec![q.clone(), kept.clone()]
            } else {
                vec![kept.clone(), q.clone()]
            };
            if outer_or {
                build::or(pair)
            } else {
                build::and(pair)
            }
        })
        .collect();
    Some(if outer_or {
        build::and(pieces)
    } else {
        build::or(pieces)
    })
}
