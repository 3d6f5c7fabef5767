//! Basic construction, equality, and rendering tests.

use fitch::prop::build;
use fitch::{Formula, Kernel, Proposition, Term, Variable};

#[test]
fn atoms_compare_structurally() {
    let p1 = build::atom("P", vec![Term::var("x")]);
    let p2 = build::atom("P", vec![Term::var("x")]);
    let q = build::atom("Q", vec![Term::var("x")]);
    assert_eq!(p1, p2);
    assert_ne!(p1, q);
    assert_ne!(p1, build::atom("P", vec![Term::var("y")]));
}

#[test]
fn proven_flag_is_not_part_of_identity() {
    let mut kernel = Kernel::default();
    let proven = kernel.assume(build::prop("P"));
    let unproven = Proposition::unproven(build::prop("P"));
    assert_eq!(proven, unproven);
    assert!(kernel.is_proven(&proven));
    assert!(!kernel.is_proven(&unproven));
}

#[test]
fn display_notation() {
    let p = build::prop("P");
    let q = build::prop("Q");
    let r = build::prop("R");

    assert_eq!(build::and(vec![p.clone(), q.clone()]).to_string(), "P /\\ Q");
    assert_eq!(build::or(vec![p.clone(), q.clone()]).to_string(), "P \\/ Q");
    assert_eq!(build::xor(vec![p.clone(), q.clone()]).to_string(), "P xor Q");
    assert_eq!(build::not(p.clone()).to_string(), "~P");
    assert_eq!(
        build::not(build::and(vec![p.clone(), q.clone()])).to_string(),
        "~(P /\\ Q)"
    );
    assert_eq!(build::implies(p.clone(), q.clone()).to_string(), "P -> Q");
    assert_eq!(build::iff(p.clone(), q.clone()).to_string(), "P <-> Q");
    assert_eq!(
        build::implies(build::and(vec![p.clone(), q.clone()]), r.clone()).to_string(),
        "P /\\ Q -> R"
    );
    assert_eq!(
        build::implies(p.clone(), build::implies(q.clone(), r.clone())).to_string(),
        "P -> (Q -> R)"
    );

    let x = Variable::new("x");
    assert_eq!(
        build::forall(x.clone(), build::atom("P", vec![Term::var("x")])).to_string(),
        "forall x: P(x)"
    );
    assert_eq!(
        build::lt(Term::var("x"), Term::int(3)).to_string(),
        "x < 3"
    );
    assert_eq!(build::prime(Term::int(2)).to_string(), "2 prime");
    assert_eq!(build::contradiction().to_string(), "contradiction");
}

#[test]
fn alternate_display_shows_all_parentheses() {
    let p = build::prop("P");
    let q = build::prop("Q");
    let r = build::prop("R");
    let f = build::implies(build::and(vec![p, q]), r);
    assert_eq!(format!("{:#}", f), "(P /\\ Q) -> R");

    let plain = fitch::ProofConfig::default();
    let noisy = fitch::ProofConfig {
        show_all_parentheses: true,
        ..fitch::ProofConfig::default()
    };
    assert_eq!(fitch::prop::render(&f, &plain), "P /\\ Q -> R");
    assert_eq!(fitch::prop::render(&f, &noisy), "(P /\\ Q) -> R");
}

#[test]
fn formulas_round_trip_through_serde() {
    let x = Variable::new("x");
    let f = build::forall(
        x,
        build::implies(
            build::atom("P", vec![Term::var("x")]),
            build::exists(
                Variable::new("y"),
                build::eq(Term::var("y"), Term::add(Term::var("x"), Term::int(1))),
            ),
        ),
    );
    let json = serde_json::to_string(&f).unwrap();
    let back: Formula = serde_json::from_str(&json).unwrap();
    assert_eq!(back, f);
}

#[test]
fn junction_members_are_order_sensitive() {
    let p = build::prop("P");
    let q = build::prop("Q");
    assert_ne!(
        build::or(vec![p.clone(), q.clone()]),
        build::or(vec![q, p])
    );
}
