//! JSON export of derivations.
//!
//! A derivation is reconstructed by backward traversal of the proof log from
//! a proven proposition; parents always have lower indices, so sorting the
//! collected ids yields a topological order.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::kernel::{Kernel, ProofId, Proposition};
use crate::prop::Formula;

/// JSON representation of one derivation step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofStepJson {
    pub id: u32,
    pub rule: String,
    pub premises: Vec<u32>,
    pub conclusion: Formula,
    pub display: String,
    pub support: Vec<u32>,
}

/// Collect the derivation of `p` from the kernel's log, topologically
/// ordered. Returns `None` when `p` was never minted.
pub fn derivation(kernel: &Kernel, p: &Proposition) -> Option<Vec<ProofStepJson>> {
    let root = p.provenance()?;
    let mut visited: HashSet<u32> = HashSet::new();
    let mut to_visit = vec![root];
    while let Some(id) = to_visit.pop() {
        if !visited.insert(id.as_u32()) {
            continue;
        }
        let step = kernel.step(id)?;
        to_visit.extend(step.premises.iter().copied());
    }
    let mut ids: Vec<u32> = visited.into_iter().collect();
    ids.sort_unstable();
    let steps = ids
        .into_iter()
        .filter_map(|id| {
            let step = kernel.step(ProofId(id))?;
            Some(ProofStepJson {
                id,
                rule: step.rule.name().to_string(),
                premises: step.premises.iter().map(|p| p.as_u32()).collect(),
                conclusion: step.conclusion.clone(),
                display: step.conclusion.to_string(),
                support: step.support.iter().map(|a| a.as_u32()).collect(),
            })
        })
        .collect();
    Some(steps)
}

/// The derivation of `p` as a JSON value.
pub fn derivation_json(kernel: &Kernel, p: &Proposition) -> Option<serde_json::Value> {
    let steps = derivation(kernel, p)?;
    serde_json::to_value(steps).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prop::build;

    #[test]
    fn derivation_is_topologically_ordered() {
        let mut kernel = Kernel::default();
        let a = kernel.assume(build::prop("A"));
        let ab = kernel.assume(build::implies(build::prop("A"), build::prop("B")));
        let b = kernel.modus_ponens(&a, &ab).unwrap();
        let steps = derivation(&kernel, &b).unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps.last().unwrap().rule, "modus_ponens");
        for step in &steps {
            for prem in &step.premises {
                assert!(prem < &step.id);
            }
        }
    }

    #[test]
    fn unproven_propositions_have_no_derivation() {
        let kernel = Kernel::default();
        let p = Proposition::unproven(build::prop("P"));
        assert!(derivation(&kernel, &p).is_none());
    }
}
