//! Theory rules: equality, ordering, set membership, divisibility.

use fitch::prop::build;
use fitch::{Kernel, ProofError, Rule, SetSymbol, Term};

fn a() -> Term {
    Term::constant("a")
}

fn b() -> Term {
    Term::constant("b")
}

fn c() -> Term {
    Term::constant("c")
}

#[test]
fn equality_is_an_equivalence() {
    let mut kernel = Kernel::default();
    let refl = kernel.eq_reflexive(&a());
    assert_eq!(refl.formula, build::eq(a(), a()));
    assert!(kernel.is_proven(&refl));
    assert_eq!(kernel.step(refl.provenance().unwrap()).unwrap().rule, Rule::Reflexive);

    let ab = kernel.assume(build::eq(a(), b()));
    let ba = kernel.eq_symmetric(&ab).unwrap();
    assert_eq!(ba.formula, build::eq(b(), a()));

    let bc = kernel.assume(build::eq(b(), c()));
    let ac = kernel.eq_transitive(&ab, &bc).unwrap();
    assert_eq!(ac.formula, build::eq(a(), c()));

    assert!(kernel.eq_transitive(&bc, &ab).is_err());
}

#[test]
fn order_chains_keep_strictness() {
    let mut kernel = Kernel::default();
    let ab = kernel.assume(build::lt(a(), b()));
    let bc = kernel.assume(build::le(b(), c()));
    let ac = kernel.order_transitive(&ab, &bc).unwrap();
    assert_eq!(ac.formula, build::lt(a(), c()));

    let weak_ab = kernel.assume(build::le(a(), b()));
    let weak_ac = kernel.order_transitive(&weak_ab, &bc).unwrap();
    assert_eq!(weak_ac.formula, build::le(a(), c()));

    // an equality can link one end of the chain
    let eq_bc = kernel.assume(build::eq(b(), c()));
    let via_eq = kernel.order_transitive(&ab, &eq_bc).unwrap();
    assert_eq!(via_eq.formula, build::lt(a(), c()));

    // two equalities belong to eq_transitive instead
    let eq_ab = kernel.assume(build::eq(a(), b()));
    assert!(matches!(
        kernel.order_transitive(&eq_ab, &eq_bc),
        Err(ProofError::RuleNotApplicable("transitive", _))
    ));
}

#[test]
fn order_direction_conversions() {
    let mut kernel = Kernel::default();
    let gt = kernel.assume(build::gt(a(), b()));
    let lt = kernel.to_less_than(&gt).unwrap();
    assert_eq!(lt.formula, build::lt(b(), a()));
    let back = kernel.to_greater_than(&lt).unwrap();
    assert_eq!(back.formula, gt.formula);

    let weak = kernel.weaken_order(&lt).unwrap();
    assert_eq!(weak.formula, build::le(b(), a()));

    let eq = kernel.assume(build::eq(a(), b()));
    assert!(kernel.to_less_than(&eq).is_err());
}

#[test]
fn membership_travels_along_subsets() {
    let mut kernel = Kernel::default();
    let s = Term::Set(SetSymbol::named("S"));
    let t = Term::Set(SetSymbol::named("T"));
    let u = Term::Set(SetSymbol::named("U"));

    let member = kernel.assume(build::is_in(a(), s.clone()));
    let st = kernel.assume(build::subset_of(s.clone(), t.clone()));
    let in_t = kernel.contained_in_superset(&member, &st).unwrap();
    assert_eq!(in_t.formula, build::is_in(a(), t.clone()));

    let tu = kernel.assume(build::subset_of(t.clone(), u.clone()));
    let su = kernel.subset_transitive(&st, &tu).unwrap();
    assert_eq!(su.formula, build::subset_of(s, u.clone()));

    let in_u = kernel.contained_in_superset(&in_t, &tu).unwrap();
    assert_eq!(in_u.formula, build::is_in(a(), u));

    assert!(kernel.contained_in_superset(&st, &member).is_err());
}

#[test]
fn divisibility_chains() {
    let mut kernel = Kernel::default();
    let ab = kernel.assume(build::divides(Term::int(2), Term::int(4)));
    let bc = kernel.assume(build::divides(Term::int(4), Term::int(12)));
    let ac = kernel.divides_transitive(&ab, &bc).unwrap();
    assert_eq!(ac.formula, build::divides(Term::int(2), Term::int(12)));
}

#[test]
fn theory_conclusions_feed_substitution() {
    // a = b lets an ordering fact about a be restated about b
    let mut kernel = Kernel::default();
    let lt = kernel.assume(build::lt(a(), c()));
    let eq = kernel.assume(build::eq(a(), b()));
    let rewritten = kernel
        .substitute_equals(&lt, fitch::Side::Right, &eq)
        .unwrap();
    assert_eq!(rewritten.formula, build::lt(b(), c()));
    assert_eq!(
        kernel.step(rewritten.provenance().unwrap()).unwrap().rule,
        Rule::SubstituteEquals
    );
}
