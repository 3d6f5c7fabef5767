//! End-to-end backward proof search scenarios.

use fitch::prop::build;
use fitch::{
    prove, Formula, Kernel, ProofConfig, ProofError, Proposition, Rule, SearchConfig, Term,
    Variable,
};

fn classical() -> Kernel {
    Kernel::default()
}

fn intuitionistic() -> Kernel {
    Kernel::new(ProofConfig {
        use_classical_logic: false,
        ..ProofConfig::default()
    })
}

fn check(kernel: &Kernel, result: &Proposition, goal: &Formula) {
    assert_eq!(result.formula, *goal);
    assert!(kernel.is_proven(result));
}

#[test]
fn chained_modus_ponens() {
    // P, P -> (Q \/ R), (Q \/ R) -> ~S  |-  ~S
    let mut kernel = classical();
    let qr = build::or(vec![build::prop("Q"), build::prop("R")]);
    let premises = vec![
        kernel.assume(build::prop("P")),
        kernel.assume(build::implies(build::prop("P"), qr.clone())),
        kernel.assume(build::implies(qr, build::not(build::prop("S")))),
    ];
    let goal = build::not(build::prop("S"));
    let result = prove(&mut kernel, &premises, &goal, &SearchConfig::default()).unwrap();
    check(&kernel, &result, &goal);
    // two modus ponens steps appear in the derivation
    let steps = fitch::json::derivation(&kernel, &result).unwrap();
    let mp_count = steps.iter().filter(|s| s.rule == "modus_ponens").count();
    assert_eq!(mp_count, 2);
}

#[test]
fn disjunctive_syllogism_by_cases() {
    // A \/ B, ~B  |-  A
    let mut kernel = classical();
    let premises = vec![
        kernel.assume(build::or(vec![build::prop("A"), build::prop("B")])),
        kernel.assume(build::not(build::prop("B"))),
    ];
    let goal = build::prop("A");
    let result = prove(&mut kernel, &premises, &goal, &SearchConfig::default()).unwrap();
    check(&kernel, &result, &goal);
}

#[test]
fn disjunctive_syllogism_without_classical_logic() {
    // the same entailment is constructive: case B refutes itself, then
    // ex falso gives A
    let mut kernel = intuitionistic();
    let premises = vec![
        kernel.assume(build::or(vec![build::prop("A"), build::prop("B")])),
        kernel.assume(build::not(build::prop("B"))),
    ];
    let goal = build::prop("A");
    let result = prove(&mut kernel, &premises, &goal, &SearchConfig::default()).unwrap();
    check(&kernel, &result, &goal);
    let steps = fitch::json::derivation(&kernel, &result).unwrap();
    assert!(steps.iter().any(|s| s.rule == "ex_falso"));
    assert!(steps.iter().any(|s| s.rule == "by_cases"));
}

#[test]
fn case_analysis_on_a_disjunctive_premise() {
    // C -> G, B -> F, B \/ C  |-  F \/ G
    let mut kernel = classical();
    let premises = vec![
        kernel.assume(build::implies(build::prop("C"), build::prop("G"))),
        kernel.assume(build::implies(build::prop("B"), build::prop("F"))),
        kernel.assume(build::or(vec![build::prop("B"), build::prop("C")])),
    ];
    let goal = build::or(vec![build::prop("F"), build::prop("G")]);
    let result = prove(&mut kernel, &premises, &goal, &SearchConfig::default()).unwrap();
    check(&kernel, &result, &goal);
    let steps = fitch::json::derivation(&kernel, &result).unwrap();
    assert!(steps.iter().any(|s| s.rule == "by_cases"));
}

#[test]
fn constructive_dilemma_with_conjunction_premise() {
    // (P -> Q) /\ (R -> S), (Q \/ S) -> T, P \/ R, ~T  |-  ~P /\ ~R
    let mut kernel = classical();
    let premises = vec![
        kernel.assume(Formula::And(vec![
            build::implies(build::prop("P"), build::prop("Q")),
            build::implies(build::prop("R"), build::prop("S")),
        ])),
        kernel.assume(build::implies(
            build::or(vec![build::prop("Q"), build::prop("S")]),
            build::prop("T"),
        )),
        kernel.assume(build::or(vec![build::prop("P"), build::prop("R")])),
        kernel.assume(build::not(build::prop("T"))),
    ];
    let goal = Formula::And(vec![
        build::not(build::prop("P")),
        build::not(build::prop("R")),
    ]);
    let result = prove(&mut kernel, &premises, &goal, &SearchConfig::default()).unwrap();
    check(&kernel, &result, &goal);
}

#[test]
fn nested_implication_introduction_from_no_premises() {
    // |-  B -> (~A -> B)
    let mut kernel = classical();
    let goal = build::implies(
        build::prop("B"),
        build::implies(build::not(build::prop("A")), build::prop("B")),
    );
    let result = prove(&mut kernel, &[], &goal, &SearchConfig::default()).unwrap();
    check(&kernel, &result, &goal);
    assert_eq!(
        kernel.step(result.provenance().unwrap()).unwrap().rule,
        Rule::CloseAssumptionsContext
    );
}

#[test]
fn de_morgan_normalization_is_classical() {
    // ~(P /\ (Q \/ R \/ S))  |-  ~P \/ (~Q /\ ~R /\ ~S)
    let premise_formula = build::not(Formula::And(vec![
        build::prop("P"),
        build::or(vec![build::prop("Q"), build::prop("R"), build::prop("S")]),
    ]));
    let goal = build::or(vec![
        build::not(build::prop("P")),
        Formula::And(vec![
            build::not(build::prop("Q")),
            build::not(build::prop("R")),
            build::not(build::prop("S")),
        ]),
    ]);

    let mut kernel = classical();
    let premises = vec![kernel.assume(premise_formula.clone())];
    let result = prove(&mut kernel, &premises, &goal, &SearchConfig::default()).unwrap();
    check(&kernel, &result, &goal);

    let mut weak = intuitionistic();
    let premises = vec![weak.assume(premise_formula)];
    assert!(matches!(
        prove(&mut weak, &premises, &goal, &SearchConfig::default()),
        Err(ProofError::NoRuleApplies(_))
    ));
}

#[test]
fn double_negation_elimination_needs_classical_logic() {
    // ~~P  |-  P, classically only
    let mut kernel = classical();
    let premises = vec![kernel.assume(build::not(build::not(build::prop("P"))))];
    let goal = build::prop("P");
    let result = prove(&mut kernel, &premises, &goal, &SearchConfig::default()).unwrap();
    check(&kernel, &result, &goal);

    let mut weak = intuitionistic();
    let premises = vec![weak.assume(build::not(build::not(build::prop("P"))))];
    assert!(matches!(
        prove(&mut weak, &premises, &goal, &SearchConfig::default()),
        Err(ProofError::NoRuleApplies(_))
    ));
}

#[test]
fn universal_goal_generalizes_a_fresh_variable() {
    // |-  forall x: P(x) -> P(x)
    let mut kernel = classical();
    let px = build::atom("P", vec![Term::var("x")]);
    let goal = build::forall(Variable::new("x"), build::implies(px.clone(), px));
    let result = prove(&mut kernel, &[], &goal, &SearchConfig::default()).unwrap();
    check(&kernel, &result, &goal);
}

#[test]
fn prover_leaves_the_frame_stack_balanced() {
    let mut kernel = classical();
    let premises = vec![kernel.assume(build::prop("A"))];
    let goal = build::prop("Z");
    assert!(prove(&mut kernel, &premises, &goal, &SearchConfig::default()).is_err());
    assert_eq!(kernel.depth(), 0);

    // and after a success as well
    let goal = build::prop("A");
    prove(&mut kernel, &premises, &goal, &SearchConfig::default()).unwrap();
    assert_eq!(kernel.depth(), 0);
}

#[test]
fn prover_rejects_unproven_premises() {
    let mut kernel = classical();
    let premises = vec![Proposition::unproven(build::prop("A"))];
    assert!(matches!(
        prove(&mut kernel, &premises, &build::prop("A"), &SearchConfig::default()),
        Err(ProofError::UnprovenInput(_))
    ));
}

#[test]
fn depth_limit_bounds_the_search() {
    let mut kernel = classical();
    let premises = vec![
        kernel.assume(build::implies(build::prop("A"), build::prop("B"))),
        kernel.assume(build::implies(build::prop("B"), build::prop("A"))),
    ];
    let config = SearchConfig { max_depth: Some(2) };
    assert!(matches!(
        prove(&mut kernel, &premises, &build::prop("A"), &config),
        Err(ProofError::NoRuleApplies(_))
    ));
}

#[test]
fn premise_order_breaks_ties() {
    // both implications conclude the goal; the first one supplied wins
    let mut kernel = classical();
    let premises = vec![
        kernel.assume(build::prop("A")),
        kernel.assume(build::prop("B")),
        kernel.assume(build::implies(build::prop("A"), build::prop("G"))),
        kernel.assume(build::implies(build::prop("B"), build::prop("G"))),
    ];
    let goal = build::prop("G");
    let result = prove(&mut kernel, &premises, &goal, &SearchConfig::default()).unwrap();
    check(&kernel, &result, &goal);
    let root = kernel.step(result.provenance().unwrap()).unwrap();
    assert_eq!(root.rule, Rule::ModusPonens);
    // the implication premise used is A -> G, the first match
    let imp_step = kernel.step(root.premises[1]).unwrap();
    assert_eq!(
        imp_step.conclusion,
        build::implies(build::prop("A"), build::prop("G"))
    );
}

#[test]
fn hypothetical_goal_reuses_outer_premises() {
    // Q  |-  P -> Q
    let mut kernel = classical();
    let premises = vec![kernel.assume(build::prop("Q"))];
    let goal = build::implies(build::prop("P"), build::prop("Q"));
    let result = prove(&mut kernel, &premises, &goal, &SearchConfig::default()).unwrap();
    check(&kernel, &result, &goal);
}
