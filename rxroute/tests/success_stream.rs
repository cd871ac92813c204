use futures::{StreamExt, executor::LocalPool};
use rxroute::testing::{MockParams, MockTransition, RecordingObserver};
use std::time::Duration;
use tokio::time::timeout;

mod common;
use common::{HOME, attach, params};

fn ids(values: &[MockTransition]) -> Vec<u64> {
    values.iter().map(|t| t.id()).collect()
}

#[test]
fn test_success_only_emits_fulfilled_transitions() {
    let mut pool = LocalPool::new();
    let (router, rx) = attach(vec![HOME]);
    let recorder = RecordingObserver::<MockTransition>::new();
    let _sub = rx
        .streams()
        .success
        .subscribe(&pool.spawner(), recorder.clone())
        .unwrap();

    router.start_transition(MockTransition::new(1));
    router.start_transition(MockTransition::rejected(2, "aborted"));
    let (stuck, control) = MockTransition::pending(3);
    drop(control);
    router.start_transition(stuck);
    router.start_transition(MockTransition::new(4));
    pool.run_until_stalled();

    assert_eq!(ids(&recorder.values()), vec![1, 4]);
}

#[test]
fn test_success_publishes_in_completion_order() {
    let mut pool = LocalPool::new();
    let (router, rx) = attach(vec![HOME]);
    let recorder = RecordingObserver::<MockTransition>::new();
    let _sub = rx
        .streams()
        .success
        .subscribe(&pool.spawner(), recorder.clone())
        .unwrap();

    let (slow, slow_control) = MockTransition::pending(1);
    let (fast, fast_control) = MockTransition::pending(2);
    router.start_transition(slow);
    router.start_transition(fast);
    pool.run_until_stalled();
    assert_eq!(recorder.count(), 0);

    fast_control.resolve();
    pool.run_until_stalled();
    assert_eq!(ids(&recorder.values()), vec![2]);

    slow_control.resolve();
    pool.run_until_stalled();
    assert_eq!(ids(&recorder.values()), vec![2, 1]);
}

#[test]
fn test_rejected_pending_transition_vanishes() {
    let mut pool = LocalPool::new();
    let (router, rx) = attach(vec![HOME]);
    let successes = RecordingObserver::<MockTransition>::new();
    let params_seen = RecordingObserver::<MockParams>::new();
    let spawner = pool.spawner();
    let _a = rx
        .streams()
        .success
        .subscribe(&spawner, successes.clone())
        .unwrap();
    let _b = rx
        .streams()
        .params
        .subscribe(&spawner, params_seen.clone())
        .unwrap();

    let (transition, control) = MockTransition::pending(1);
    router.start_transition(transition);
    pool.run_until_stalled();
    control.reject("redirected");
    pool.run_until_stalled();

    assert_eq!(successes.count(), 0);
    assert_eq!(params_seen.count(), 0);
}

#[test]
fn test_each_success_appears_once_per_subscriber() {
    let mut pool = LocalPool::new();
    let (router, rx) = attach(vec![HOME]);
    let spawner = pool.spawner();
    let first = RecordingObserver::<MockTransition>::new();
    let second = RecordingObserver::<MockTransition>::new();
    let _a = rx.streams().success.subscribe(&spawner, first.clone()).unwrap();
    let _b = rx.streams().success.subscribe(&spawner, second.clone()).unwrap();

    router.start_transition(MockTransition::new(1));
    router.start_transition(MockTransition::new(2));
    pool.run_until_stalled();

    assert_eq!(ids(&first.values()), vec![1, 2]);
    assert_eq!(ids(&second.values()), vec![1, 2]);
}

#[test]
fn test_late_success_subscriber_sees_latest_start() {
    let mut pool = LocalPool::new();
    let (router, rx) = attach(vec![HOME]);
    router.start_transition(MockTransition::new(1));
    router.start_transition(MockTransition::new(2));

    let recorder = RecordingObserver::<MockTransition>::new();
    let _sub = rx
        .streams()
        .success
        .subscribe(&pool.spawner(), recorder.clone())
        .unwrap();
    pool.run_until_stalled();

    assert_eq!(ids(&recorder.values()), vec![2]);
}

#[test]
fn test_params_follow_each_success() {
    let mut pool = LocalPool::new();
    let (router, rx) = attach(vec![HOME]);
    let spawner = pool.spawner();
    let successes = RecordingObserver::<MockTransition>::new();
    let params_seen = RecordingObserver::<MockParams>::new();
    let _a = rx
        .streams()
        .success
        .subscribe(&spawner, successes.clone())
        .unwrap();
    let _b = rx
        .streams()
        .params
        .subscribe(&spawner, params_seen.clone())
        .unwrap();

    let (first, first_control) = MockTransition::pending(1);
    let first = first.with_param("id", "42");
    router.start_transition(first);
    router.start_transition(MockTransition::rejected(2, "aborted").with_param("id", "0"));
    router.start_transition(MockTransition::new(3).with_param("tab", "settings"));
    pool.run_until_stalled();
    first_control.resolve();
    pool.run_until_stalled();

    assert_eq!(ids(&successes.values()), vec![3, 1]);
    assert_eq!(
        params_seen.values(),
        vec![params(&[("tab", "settings")]), params(&[("id", "42")])]
    );
}

#[test]
fn test_unsubscribed_success_observer_stops() {
    let mut pool = LocalPool::new();
    let (router, rx) = attach(vec![HOME]);
    let recorder = RecordingObserver::<MockTransition>::new();
    let mut sub = rx
        .streams()
        .success
        .subscribe(&pool.spawner(), recorder.clone())
        .unwrap();

    router.start_transition(MockTransition::new(1));
    pool.run_until_stalled();
    sub.unsubscribe();
    pool.run_until_stalled();
    router.start_transition(MockTransition::new(2));
    pool.run_until_stalled();

    assert_eq!(ids(&recorder.values()), vec![1]);
    assert_eq!(rx.streams().start.observer_count(), 0);
}

#[tokio::test]
async fn test_params_stream_pull_side() {
    let (router, rx) = attach(vec![HOME]);
    let mut params_stream = rx.streams().params.stream();

    router.start_transition(MockTransition::rejected(1, "aborted").with_param("id", "1"));
    router.start_transition(MockTransition::new(2).with_param("id", "2"));

    let next = timeout(Duration::from_millis(100), params_stream.next())
        .await
        .unwrap();
    assert_eq!(next, Some(params(&[("id", "2")])));

    let (stuck, _control) = MockTransition::pending(3);
    router.start_transition(stuck);
    assert!(
        timeout(Duration::from_millis(50), params_stream.next())
            .await
            .is_err()
    );
}
