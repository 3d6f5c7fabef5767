//! Backward proof search over the propositional fragment.
//!
//! Goal-driven depth-first search. Every conclusion is produced by the
//! kernel primitives; the prover never mints a proven proposition itself.
//! Rules are tried in a fixed order with eager introductions ahead of
//! eliminations on premises, so a constructive proof is produced when one
//! exists; the classical rules are gated on the kernel configuration.

use indexmap::IndexSet;

use crate::config::SearchConfig;
use crate::error::{ProofError, Result};
use crate::kernel::{Kernel, Proposition};
use crate::prop::{are_negs, de_morgan, neg, Formula};

/// Attempt to prove `goal` from the given proven premises.
///
/// On success the returned proposition is structurally equal to `goal` and
/// proven in the kernel. On failure the kernel's frame stack is back where
/// it started and the error is `NoRuleApplies`.
pub fn prove(
    kernel: &mut Kernel,
    premises: &[Proposition],
    goal: &Formula,
    config: &SearchConfig,
) -> Result<Proposition> {
    for p in premises {
        kernel.check_proven(p)?;
    }
    let max_depth = config.effective_depth(premises.len());
    let classical = kernel.config().use_classical_logic;
    let mut search = Search {
        kernel,
        visited: IndexSet::new(),
        max_depth,
        dm_premises_tried: false,
        dm_goal_tried: false,
        classical,
    };
    let mut prems = premises.to_vec();
    search.expand_premises(&mut prems)?;
    search.attempt(goal, &prems, &IndexSet::new(), 0)
}

struct Search<'a> {
    kernel: &'a mut Kernel,
    /// Goals under attempt on the current path, keyed by frame depth.
    visited: IndexSet<(Formula, usize)>,
    max_depth: usize,
    dm_premises_tried: bool,
    dm_goal_tried: bool,
    classical: bool,
}

fn no_rule(goal: &Formula) -> ProofError {
    ProofError::NoRuleApplies(goal.to_string())
}

impl Search<'_> {
    /// Add the conjuncts of every proven conjunction premise, so identity
    /// and backward modus ponens see them directly.
    fn expand_premises(&mut self, premises: &mut Vec<Proposition>) -> Result<()> {
        let mut i = 0;
        while i < premises.len() {
            let p = premises[i].clone();
            if let Formula::And(parts) = &p.formula {
                for idx in 0..parts.len() {
                    let c = self.kernel.and_elim(&p, idx)?;
                    if !premises.contains(&c) {
                        premises.push(c);
                    }
                }
            }
            i += 1;
        }
        Ok(())
    }

    fn attempt(
        &mut self,
        goal: &Formula,
        premises: &[Proposition],
        no_recurse: &IndexSet<Formula>,
        depth: usize,
    ) -> Result<Proposition> {
        if depth > self.max_depth {
            return Err(no_rule(goal));
        }
        let key = (goal.clone(), self.kernel.depth());
        if self.visited.contains(&key) {
            return Err(no_rule(goal));
        }
        self.visited.insert(key.clone());
        let result = self.attempt_rules(goal, premises, no_recurse, depth);
        self.visited.swap_remove(&key);
        result
    }

    /// Recurse on `subgoal` with `assumed` added to the premise pool. The
    /// caller owns the open frame.
    fn attempt_under_assumption(
        &mut self,
        subgoal: &Formula,
        premises: &[Proposition],
        assumed: Proposition,
        no_recurse: &IndexSet<Formula>,
        depth: usize,
    ) -> Result<Proposition> {
        let mut prems = premises.to_vec();
        prems.push(assumed);
        self.expand_premises(&mut prems)?;
        self.attempt(subgoal, &prems, no_recurse, depth)
    }

    fn attempt_rules(
        &mut self,
        goal: &Formula,
        premises: &[Proposition],
        no_recurse: &IndexSet<Formula>,
        depth: usize,
    ) -> Result<Proposition> {
        // 1. identity
        if let Some(p) = premises.iter().find(|p| p.formula == *goal) {
            return Ok(p.clone());
        }

        // a contradiction goal is closed from complementary premises
        if *goal == Formula::Contradiction {
            for (i, p) in premises.iter().enumerate() {
                for q in &premises[i + 1..] {
                    if are_negs(&p.formula, &q.formula) {
                        return self.kernel.contradicts(p, q);
                    }
                }
            }
            for p in premises {
                if let Formula::Not(inner) = &p.formula {
                    if no_recurse.contains(&p.formula) {
                        continue;
                    }
                    let mut blocked = no_recurse.clone();
                    blocked.insert(p.formula.clone());
                    if let Ok(pos) = self.attempt(inner, premises, &blocked, depth + 1) {
                        return self.kernel.contradicts(&pos, p);
                    }
                }
            }
            return Err(no_rule(goal));
        }

        // 2. conjunction introduction
        if let Formula::And(parts) = goal {
            let mut proven = Vec::with_capacity(parts.len());
            for part in parts {
                match self.attempt(part, premises, no_recurse, depth + 1) {
                    Ok(p) => proven.push(p),
                    Err(_) => {
                        proven.clear();
                        break;
                    }
                }
            }
            if proven.len() == parts.len() {
                let refs: Vec<&Proposition> = proven.iter().collect();
                let conj = self.kernel.and_intro(&refs)?;
                if conj.formula == *goal {
                    return Ok(conj);
                }
            }
        }

        // 3. disjunction introduction
        if let Formula::Or(parts) = goal {
            for part in parts {
                if let Ok(p) = self.attempt(part, premises, no_recurse, depth + 1) {
                    return self.kernel.or_intro(&p, goal);
                }
            }
        }

        // 4. implication introduction
        if let Formula::Implies(ante, cons) = goal {
            self.kernel.open();
            let assumed = self.kernel.assume((**ante).clone());
            match self.attempt_under_assumption(cons, premises, assumed, no_recurse, depth + 1) {
                Ok(p) => {
                    self.kernel.conclude(&p)?;
                    let discharged = self.kernel.close()?;
                    if let Some(r) = discharged.into_iter().find(|d| d.formula == *goal) {
                        return Ok(r);
                    }
                }
                Err(_) => {
                    self.kernel.close()?;
                }
            }
        }

        // 5. universal introduction, when the binder is fresh for the
        // premises
        if let Formula::Forall { var, body } = goal {
            let fresh = var.deps.is_empty()
                && !premises.iter().any(|p| p.formula.mentions_free(var));
            if fresh {
                self.kernel.open();
                match self.kernel.declare_variable(var.name.clone(), var.attrs) {
                    Ok(_) => match self.attempt(body, premises, no_recurse, depth + 1) {
                        Ok(p) => {
                            self.kernel.conclude(&p)?;
                            let discharged = self.kernel.close()?;
                            if let Some(r) =
                                discharged.into_iter().find(|d| d.formula == *goal)
                            {
                                return Ok(r);
                            }
                        }
                        Err(_) => {
                            self.kernel.close()?;
                        }
                    },
                    Err(_) => {
                        self.kernel.close()?;
                    }
                }
            }
        }

        // 6. backward modus ponens on implication premises
        for p in premises {
            if let Formula::Implies(ante, cons) = &p.formula {
                if **cons == *goal && !no_recurse.contains(&p.formula) {
                    let mut blocked = no_recurse.clone();
                    blocked.insert(p.formula.clone());
                    if let Ok(pa) = self.attempt(ante, premises, &blocked, depth + 1) {
                        return self.kernel.modus_ponens(&pa, p);
                    }
                }
            }
        }

        // 7. case analysis on disjunctive premises
        for p in premises {
            let cases = match &p.formula {
                Formula::Or(cases) => cases.clone(),
                _ => continue,
            };
            if no_recurse.contains(&p.formula) {
                continue;
            }
            let mut blocked = no_recurse.clone();
            blocked.insert(p.formula.clone());
            let mut implications = Vec::with_capacity(cases.len());
            for case in &cases {
                self.kernel.open();
                let assumed = self.kernel.assume(case.clone());
                let case_result = match self.attempt_under_assumption(
                    goal,
                    premises,
                    assumed.clone(),
                    &blocked,
                    depth + 1,
                ) {
                    Ok(pc) => Ok(pc),
                    // the goal is out of reach in this case: refute the
                    // case instead and conclude by ex falso
                    Err(_) => self
                        .attempt_under_assumption(
                            &Formula::Contradiction,
                            premises,
                            assumed,
                            &blocked,
                            depth + 1,
                        )
                        .and_then(|contra| self.kernel.ex_falso(&contra, goal)),
                };
                match case_result {
                    Ok(pc) => {
                        self.kernel.conclude(&pc)?;
                        let discharged = self.kernel.close()?;
                        let want =
                            Formula::Implies(Box::new(case.clone()), Box::new(goal.clone()));
                        match discharged.into_iter().find(|d| d.formula == want) {
                            Some(imp) => implications.push(imp),
                            None => break,
                        }
                    }
                    Err(_) => {
                        self.kernel.close()?;
                        break;
                    }
                }
            }
            if implications.len() == cases.len() {
                let refs: Vec<&Proposition> = implications.iter().collect();
                let result = self.kernel.by_cases(p, &refs)?;
                if result.formula == *goal {
                    return Ok(result);
                }
            }
        }

        // 8. negation introduction / proof by contradiction (classical)
        if self.classical {
            self.kernel.open();
            let assumed = self.kernel.assume(neg(goal, true));
            match self.attempt_under_assumption(
                &Formula::Contradiction,
                premises,
                assumed,
                no_recurse,
                depth + 1,
            ) {
                Ok(contra) => {
                    self.kernel.conclude(&contra)?;
                    let discharged = self.kernel.close()?;
                    if let Some(r) = discharged.into_iter().find(|d| d.formula == *goal) {
                        return Ok(r);
                    }
                }
                Err(_) => {
                    self.kernel.close()?;
                }
            }
        }

        // 9. one-shot De Morgan normalization of the top-level query:
        // premises first, then the goal
        if depth == 0 && !self.dm_premises_tried {
            self.dm_premises_tried = true;
            let mut transformed = premises.to_vec();
            let mut changed = false;
            for p in premises {
                let q = self.kernel.apply_de_morgan(p)?;
                if q.formula != p.formula && !transformed.contains(&q) {
                    transformed.push(q);
                    changed = true;
                }
            }
            if changed {
                self.expand_premises(&mut transformed)?;
                if let Ok(r) = self.attempt_rules(goal, &transformed, no_recurse, depth + 1) {
                    return Ok(r);
                }
            }
        }
        if depth == 0 && !self.dm_goal_tried {
            self.dm_goal_tried = true;
            let normalized = de_morgan(goal, self.classical);
            if normalized != *goal {
                if let Ok(r) = self.attempt(&normalized, premises, no_recurse, depth + 1) {
                    let back = self.kernel.apply_de_morgan(&r)?;
                    if back.formula == *goal {
                        return Ok(back);
                    }
                }
            }
        }

        Err(no_rule(goal))
    }
}
