//! Oracle acceptance and refusal, and oracle facts feeding kernel rules.

use fitch::oracle::{axiom, by_eval, by_inspection, by_simplification};
use fitch::prop::build;
use fitch::{ExprOp, Kernel, ProofError, Rule, SetSymbol, Term};

#[test]
fn inspection_decides_arithmetic_relations() {
    let mut kernel = Kernel::default();
    assert!(by_inspection(&mut kernel, &build::lt(Term::int(1), Term::int(2))).is_ok());
    assert!(by_inspection(&mut kernel, &build::ge(Term::int(5), Term::int(5))).is_ok());
    assert!(by_inspection(&mut kernel, &build::divides(Term::int(3), Term::int(9))).is_ok());
    assert!(by_inspection(&mut kernel, &build::prime(Term::int(2))).is_ok());
    assert!(
        by_inspection(&mut kernel, &build::not(build::divides(Term::int(2), Term::int(1))))
            .is_ok()
    );
}

#[test]
fn inspection_refuses_what_it_cannot_decide() {
    let mut kernel = Kernel::default();
    // false outright
    assert!(matches!(
        by_inspection(&mut kernel, &build::lt(Term::int(2), Term::int(1))),
        Err(ProofError::OracleRefused(_))
    ));
    // not ground
    assert!(matches!(
        by_inspection(&mut kernel, &build::prime(Term::var("n"))),
        Err(ProofError::OracleRefused(_))
    ));
    // not an inspectable shape
    assert!(matches!(
        by_inspection(&mut kernel, &build::prop("P")),
        Err(ProofError::OracleRefused(_))
    ));
}

#[test]
fn eval_and_simplification_oracles() {
    let mut kernel = Kernel::default();
    let sum = build::eq(
        Term::add(Term::int(2), Term::mul(Term::int(3), Term::int(4))),
        Term::int(14),
    );
    let p = by_eval(&mut kernel, &sum).unwrap();
    assert_eq!(kernel.step(p.provenance().unwrap()).unwrap().rule, Rule::ByEval);

    // x * 1 + 0 = x holds by identities even though x is symbolic
    let x = Term::var("x");
    let lhs = Term::add(Term::mul(x.clone(), Term::int(1)), Term::int(0));
    let ident = build::eq(lhs.clone(), x.clone());
    assert!(by_eval(&mut kernel, &ident).is_err());
    assert!(by_simplification(&mut kernel, &ident).is_ok());

    let wrong = build::eq(Term::add(x.clone(), Term::int(1)), x);
    assert!(by_simplification(&mut kernel, &wrong).is_err());
}

#[test]
fn sequence_indexing_evaluates_through_the_closed_form() {
    let mut kernel = Kernel::default();
    // a_n = n^2
    let seq = Term::Sequence(fitch::Sequence {
        name: "a".to_string(),
        nth_term: Some(Box::new(Term::pow(Term::var("n"), Term::int(2)))),
    });
    let indexed = Term::expr(ExprOp::Index, vec![seq, Term::int(5)]);
    let f = build::eq(indexed, Term::int(25));
    assert!(by_eval(&mut kernel, &f).is_ok());
}

#[test]
fn oracle_facts_feed_kernel_rules() {
    let mut kernel = Kernel::default();
    let two_prime = by_inspection(&mut kernel, &build::prime(Term::int(2))).unwrap();
    let imp = kernel.assume(build::implies(
        build::prime(Term::int(2)),
        build::prop("HasEvenPrime"),
    ));
    let conclusion = kernel.modus_ponens(&two_prime, &imp).unwrap();
    assert_eq!(conclusion.formula, build::prop("HasEvenPrime"));
    assert!(kernel.is_proven(&conclusion));
}

#[test]
fn axioms_are_trusted_and_tagged() {
    let mut kernel = Kernel::default();
    let n = Term::Set(SetSymbol::named("N"));
    let fact = axiom(
        &mut kernel,
        build::is_in(Term::int(0), n),
    );
    assert!(kernel.is_proven(&fact));
    let step = kernel.step(fact.provenance().unwrap()).unwrap();
    assert_eq!(step.rule, Rule::Axiom);
    assert!(step.premises.is_empty());
    assert!(step.support.is_empty());
}

#[test]
fn boolean_namespace_mirrors_the_propositional_one() {
    use fitch::oracle::ops;
    assert_eq!(ops::lt(&Term::int(1), &Term::int(2)), Some(true));
    assert_eq!(ops::eq(&Term::var("x"), &Term::var("x")), Some(true));
    assert_eq!(ops::eq(&Term::var("x"), &Term::var("y")), None);
    // the propositional namespace returns a formula for the same call shape
    let f = build::lt(Term::int(1), Term::int(2));
    assert_eq!(f.to_string(), "1 < 2");
}
