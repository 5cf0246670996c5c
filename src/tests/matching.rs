use super::*;
use crate::subst::replace;
use crate::test_utils::{setup, sig};
use crate::types::Type;

// ========== BASIC CASES ==========

#[test]
fn identical_terms_match_without_bindings() {
    let (symbols, terms) = setup();
    let s = sig(&symbols, &terms);
    let m = match_terms(s.a, s.a, &terms).expect("a matches a");
    assert!(m.is_empty());
    let m = match_terms(s.x, s.x, &terms).expect("x matches x");
    assert!(m.is_empty());
}

#[test]
fn distinct_constants_do_not_match() {
    let (symbols, terms) = setup();
    let s = sig(&symbols, &terms);
    assert!(match_terms(s.a, s.b, &terms).is_none());
}

#[test]
fn constant_does_not_match_variable() {
    let (symbols, terms) = setup();
    let s = sig(&symbols, &terms);
    assert!(
        match_terms(s.a, s.x, &terms).is_none(),
        "only pattern variables are bound"
    );
}

#[test]
fn variables_alias() {
    let (symbols, terms) = setup();
    let s = sig(&symbols, &terms);
    let m = match_terms(s.x, s.y, &terms).expect("x matches y");
    assert_eq!(m.len(), 1);
    assert_eq!(replace(s.x, &m, &terms), s.y);
}

#[test]
fn binds_variable_inside_call() {
    let (symbols, terms) = setup();
    let s = sig(&symbols, &terms);
    let p = terms.call(s.f2, &[s.a, s.x]);
    let t = terms.call(s.f2, &[s.a, s.b]);
    let m = match_terms(p, t, &terms).expect("f2(a, x) matches f2(a, b)");
    assert_eq!(m.len(), 1);
    assert_eq!(replace(s.x, &m, &terms), s.b);
}

#[test]
fn argument_variables_alias() {
    let (symbols, terms) = setup();
    let s = sig(&symbols, &terms);
    let p = terms.call(s.f1, &[s.x]);
    let t = terms.call(s.f1, &[s.y]);
    let m = match_terms(p, t, &terms).expect("f1(x) matches f1(y)");
    assert_eq!(m.len(), 1);
    assert_eq!(replace(s.x, &m, &terms), replace(s.y, &m, &terms));
}

// ========== FAILURES ==========

#[test]
fn different_functions_do_not_match() {
    let (symbols, terms) = setup();
    let s = sig(&symbols, &terms);
    let fa = terms.call(s.f1, &[s.a]);
    let ga = terms.call(s.g1, &[s.a]);
    assert!(match_terms(fa, ga, &terms).is_none());
    let fx = terms.call(s.f1, &[s.x]);
    let gy = terms.call(s.g1, &[s.y]);
    assert!(match_terms(fx, gy, &terms).is_none());
}

#[test]
fn different_arities_do_not_match() {
    let (symbols, terms) = setup();
    let s = sig(&symbols, &terms);
    let fx = terms.call(s.f1, &[s.x]);
    let fyz = terms.call(s.f2, &[s.y, s.z]);
    assert!(match_terms(fx, fyz, &terms).is_none());
}

#[test]
fn target_variables_are_not_bound() {
    let (symbols, terms) = setup();
    let s = sig(&symbols, &terms);
    let p = terms.call(s.f1, &[terms.call(s.g1, &[s.x])]);
    let t = terms.call(s.f1, &[s.y]);
    assert!(match_terms(p, t, &terms).is_none());

    let p = terms.call(s.f2, &[terms.call(s.g1, &[s.x]), s.x]);
    let t = terms.call(s.f2, &[s.y, s.a]);
    assert!(match_terms(p, t, &terms).is_none());
}

#[test]
fn type_mismatch_fails() {
    let (symbols, terms) = setup();
    let s = sig(&symbols, &terms);
    let n = terms.var(Type::Integer);
    assert!(match_terms(n, s.a, &terms).is_none());
    assert!(match_terms(n, terms.integer(3), &terms).is_some());
}

#[test]
fn no_occurs_check() {
    let (symbols, terms) = setup();
    let s = sig(&symbols, &terms);
    let fx = terms.call(s.f1, &[s.x]);
    let m = match_terms(s.x, fx, &terms).expect("match has no occurs check");
    assert_eq!(m.get(s.x), Some(fx));
}

// ========== THREADING ==========

#[test]
fn chained_matches() {
    let (symbols, terms) = setup();
    let s = sig(&symbols, &terms);
    let m = match_terms(s.x, s.y, &terms).expect("x matches y");
    let m = match_with(&m, s.y, s.a, &terms).expect("y matches a");
    assert_eq!(m.len(), 2);
    assert_eq!(replace(s.x, &m, &terms), s.a);
    assert_eq!(replace(s.y, &m, &terms), s.a);
}

#[test]
fn bound_variable_must_match_exactly() {
    let (symbols, terms) = setup();
    let s = sig(&symbols, &terms);
    let m = match_terms(s.x, s.a, &terms).expect("x matches a");
    assert!(match_with(&m, s.b, s.x, &terms).is_none());
    assert!(match_with(&m, s.x, s.b, &terms).is_none());
    let again = match_with(&m, s.x, s.a, &terms).expect("x is already a");
    assert_eq!(again.len(), 1);
}

#[test]
fn repeated_pattern_variable() {
    let (symbols, terms) = setup();
    let s = sig(&symbols, &terms);
    let p = terms.call(s.f2, &[s.x, s.x]);
    let same = terms.call(s.f2, &[s.a, s.a]);
    let different = terms.call(s.f2, &[s.a, s.b]);
    assert!(match_terms(p, same, &terms).is_some());
    assert!(match_terms(p, different, &terms).is_none());
}

#[test]
fn failure_leaves_input_untouched() {
    let (symbols, terms) = setup();
    let s = sig(&symbols, &terms);
    let base = Subst::new().bind(s.z, s.b);
    let p = terms.call(s.f2, &[s.x, s.a]);
    let t = terms.call(s.f2, &[s.b, s.b]);
    assert!(match_with(&base, p, t, &terms).is_none());
    assert_eq!(base.len(), 1);
    assert_eq!(base.get(s.x), None);
}

#[test]
fn bindings_follow_left_to_right_order() {
    let (symbols, terms) = setup();
    let s = sig(&symbols, &terms);
    let p = terms.call(s.f2, &[s.x, terms.call(s.f1, &[s.y])]);
    let t = terms.call(s.f2, &[s.a, terms.call(s.f1, &[s.b])]);
    let m = match_terms(p, t, &terms).expect("match");
    let order: Vec<_> = m.iter().collect();
    assert_eq!(order, vec![(s.y, s.b), (s.x, s.a)], "newest first");
}
