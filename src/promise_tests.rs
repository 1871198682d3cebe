use super::*;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;

fn recorder() -> (Rc<RefCell<Vec<Vec<Value>>>>, impl Fn(&[Value]) + 'static) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    (calls, move |args: &[Value]| {
        sink.borrow_mut().push(args.to_vec())
    })
}

#[test]
fn done_forwards_to_the_deferred() {
    let deferred = Deferred::new();
    let promise = deferred.promise();
    let (calls, callback) = recorder();

    promise.done(callback);
    deferred.resolve(&[json!(1)]).unwrap();

    assert_eq!(*calls.borrow(), vec![vec![json!(1)]]);
}

#[test]
fn fail_forwards_to_the_deferred() {
    let deferred = Deferred::new();
    let promise = deferred.promise();
    let (calls, callback) = recorder();

    promise.fail(callback);
    deferred.reject(&[json!("no")]).unwrap();

    assert_eq!(*calls.borrow(), vec![vec![json!("no")]]);
}

#[test]
fn late_subscription_replays_through_the_view() {
    let deferred = Deferred::new();
    deferred.resolve(&[json!(1), json!(2)]).unwrap();

    let (calls, callback) = recorder();
    deferred.promise().done(callback);

    assert_eq!(*calls.borrow(), vec![vec![json!(1), json!(2)]]);
}

#[test]
fn state_queries_track_the_deferred() {
    let deferred = Deferred::new();
    let promise = deferred.promise();

    assert!(!promise.is_resolved());
    assert!(!promise.is_rejected());
    assert!(!promise.is_frozen());

    deferred.resolve(&[]).unwrap();

    assert!(promise.is_resolved());
    assert!(!promise.is_rejected());
    assert!(promise.is_frozen());
}

#[test]
fn progress_forwards_and_keeps_the_asymmetry() {
    let deferred = Deferred::new();
    let promise = deferred.promise();
    let (calls, callback) = recorder();

    assert!(promise.progress(callback).is_some());
    deferred.notify(&[json!("tick")]);
    assert_eq!(*calls.borrow(), vec![vec![json!("tick")]]);

    deferred.resolve(&[]).unwrap();
    let (late_calls, late) = recorder();
    assert!(promise.progress(late).is_none());
    assert_eq!(late_calls.borrow().len(), 0);
}

#[test]
fn chaining_through_the_view() {
    let deferred = Deferred::new();
    let promise = deferred.promise();
    let (done_calls, done) = recorder();
    let (fail_calls, fail) = recorder();

    promise.done(done).fail(fail);
    deferred.resolve(&[]).unwrap();

    assert_eq!(done_calls.borrow().len(), 1);
    assert_eq!(fail_calls.borrow().len(), 0);
}
