use super::*;
use crate::test_utils::{setup, sig};
use crate::unify::unify;

#[test]
fn trace_macros_compile() {
    // No-ops without the tracing feature
    trace!("trace message");
    debug!("debug message");
    info!("info message");
    warn!("warn message");

    let _span = span!(Level::DEBUG, "test_span", value = 42);
    let _entered = debug_span!("entered_span").entered();
}

#[test]
fn init_subscriber_is_idempotent() {
    init_subscriber();
    init_subscriber();
}

#[test]
fn instrumented_unify_still_works() {
    init_subscriber();
    let (symbols, terms) = setup();
    let s = sig(&symbols, &terms);
    let fx = terms.call(s.f1, &[s.x]);
    assert!(unify(s.x, fx, &terms).is_none());
    assert!(unify(s.x, s.a, &terms).is_some());
}
