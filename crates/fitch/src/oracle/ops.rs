//! Boolean-returning comparison helpers.
//!
//! This is the boolean-valued counterpart of the `prop::build` namespace,
//! backed by the same trusted evaluator the oracles use. `None` means the
//! comparison is not decidable on ground integers.

use crate::term::Term;

use super::eval::{eval, is_prime};

pub fn eq(a: &Term, b: &Term) -> Option<bool> {
    if a == b {
        return Some(true);
    }
    Some(eval(a)? == eval(b)?)
}

pub fn lt(a: &Term, b: &Term) -> Option<bool> {
    Some(eval(a)? < eval(b)?)
}

pub fn gt(a: &Term, b: &Term) -> Option<bool> {
    Some(eval(a)? > eval(b)?)
}

pub fn le(a: &Term, b: &Term) -> Option<bool> {
    Some(eval(a)? <= eval(b)?)
}

pub fn ge(a: &Term, b: &Term) -> Option<bool> {
    Some(eval(a)? >= eval(b)?)
}

pub fn divides(a: &Term, b: &Term) -> Option<bool> {
    let va = eval(a)?;
    if va == 0 {
        return Some(false);
    }
    Some(eval(b)? % va == 0)
}

pub fn prime(a: &Term) -> Option<bool> {
    Some(is_prime(eval(a)?))
}
