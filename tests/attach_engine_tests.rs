//! Tests for the attachment engine (retry schedule, give-up, detach, stale
//! references).

mod common;

use std::time::Duration;

use common::{FakeHost, ManualScheduler, PHONE};
use cookie_manager::attach::{AttachState, AttachStatus, AttachmentEngine, RetryPolicy};
use cookie_manager::model::Size;

type Engine = AttachmentEngine<FakeHost, ManualScheduler>;

fn engine(host: FakeHost) -> Engine {
    AttachmentEngine::new(host, ManualScheduler::default(), Size::square(56.0), 8.0)
}

fn policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy::new(max_attempts, Duration::from_millis(100))
}

/// Fire the most recently scheduled retry.
fn fire(engine: &mut Engine) -> AttachStatus {
    let token = engine.scheduler().last_token().expect("a retry is scheduled");
    engine.on_retry_elapsed(token)
}

// === Successful Attachment ===

#[test]
fn attaches_immediately_when_window_exists() {
    let mut engine = engine(FakeHost::with_window());
    assert_eq!(engine.attach(policy(5)), AttachStatus::Attached);
    assert_eq!(engine.state(), &AttachState::Attached { failed_attempts: 0 });
    assert!(engine.scheduler().scheduled.is_empty());
    assert_eq!(engine.host().installed_on, Some(1));
}

#[test]
fn attaches_exactly_at_nth_attempt() {
    for n in 1..=6 {
        let mut engine = engine(FakeHost::window_appearing_at(n));
        let mut status = engine.attach(policy(6));
        for _ in 1..n {
            assert!(matches!(status, AttachStatus::Searching { .. }), "n={n}");
            status = fire(&mut engine);
        }
        assert_eq!(status, AttachStatus::Attached, "n={n}");
        assert_eq!(engine.host().searches.get(), n);
        assert_eq!(engine.scheduler().scheduled.len() as u32, n - 1);
        assert_eq!(
            engine.state(),
            &AttachState::Attached {
                failed_attempts: n - 1
            }
        );
    }
}

#[test]
fn third_attempt_records_two_failures() {
    let mut engine = engine(FakeHost::window_appearing_at(3));
    assert_eq!(
        engine.attach(policy(3)),
        AttachStatus::Searching { attempts: 1 }
    );
    assert_eq!(fire(&mut engine), AttachStatus::Searching { attempts: 2 });
    assert_eq!(fire(&mut engine), AttachStatus::Attached);
    assert_eq!(engine.state(), &AttachState::Attached { failed_attempts: 2 });
}

#[test]
fn initial_frame_is_inside_the_window() {
    let mut engine = engine(FakeHost::with_window());
    engine.attach(policy(1));
    let frame = engine.overlay_frame().expect("attached");
    assert!(PHONE.contains_rect(&frame));
    assert_eq!(engine.host().overlay_frame, Some(frame));
}

// === Give-up ===

#[test]
fn gives_up_after_max_attempts() {
    let mut engine = engine(FakeHost::without_windows());
    let mut status = engine.attach(policy(4));
    while matches!(status, AttachStatus::Searching { .. }) {
        status = fire(&mut engine);
    }
    assert_eq!(status, AttachStatus::GaveUp { attempts: 4 });
    assert_eq!(engine.host().searches.get(), 4);
    assert_eq!(engine.scheduler().scheduled.len(), 3);
    assert!(engine.host().installed_on.is_none());
}

#[test]
fn single_attempt_gives_up_without_scheduling() {
    let mut engine = engine(FakeHost::without_windows());
    assert_eq!(engine.attach(policy(1)), AttachStatus::GaveUp { attempts: 1 });
    assert!(engine.scheduler().scheduled.is_empty());
}

#[test]
fn unschedulable_retry_gives_up_instead_of_waiting() {
    let scheduler = ManualScheduler {
        unavailable: true,
        ..ManualScheduler::default()
    };
    let mut engine = AttachmentEngine::new(
        FakeHost::without_windows(),
        scheduler,
        Size::square(56.0),
        8.0,
    );
    assert_eq!(engine.attach(policy(5)), AttachStatus::GaveUp { attempts: 1 });
    assert!(engine.retry_state().is_none());
    assert_eq!(engine.host().searches.get(), 1);

    engine.host_mut().windows.push(common::FakeWindow::key(3));
    assert_eq!(engine.attach(policy(5)), AttachStatus::Attached);
}

#[test]
fn failed_installs_count_as_attempts() {
    let mut host = FakeHost::with_window();
    host.fail_install = true;
    let mut engine = engine(host);
    let mut status = engine.attach(policy(2));
    while matches!(status, AttachStatus::Searching { .. }) {
        status = fire(&mut engine);
    }
    assert_eq!(status, AttachStatus::GaveUp { attempts: 2 });
}

#[test]
fn request_after_give_up_searches_again() {
    let mut engine = engine(FakeHost::without_windows());
    engine.attach(policy(1));
    engine.host_mut().windows.push(common::FakeWindow::key(9));
    assert_eq!(engine.attach(policy(1)), AttachStatus::Attached);
    assert_eq!(engine.host().installed_on, Some(9));
}

#[test]
fn retry_delays_grow_and_cap() {
    let mut engine = engine(FakeHost::without_windows());
    let policy = RetryPolicy::new(5, Duration::from_millis(100))
        .with_backoff(2.0, Duration::from_millis(300));
    let mut status = engine.attach(policy);
    while matches!(status, AttachStatus::Searching { .. }) {
        status = fire(&mut engine);
    }
    let ms: Vec<u128> = engine
        .scheduler()
        .delays()
        .iter()
        .map(Duration::as_millis)
        .collect();
    assert_eq!(ms, vec![100, 200, 300, 300]);
}

// === Detach and stale timers ===

#[test]
fn detach_while_searching_cancels_retry() {
    let mut engine = engine(FakeHost::without_windows());
    engine.attach(policy(5));
    let token = engine.scheduler().last_token().expect("scheduled");

    engine.detach();
    assert_eq!(engine.status(), AttachStatus::Idle);
    assert_eq!(engine.scheduler().cancelled, vec![token]);

    // The old timer fires anyway.
    engine.host_mut().windows.push(common::FakeWindow::key(1));
    assert_eq!(engine.on_retry_elapsed(token), AttachStatus::Idle);
    assert!(engine.host().installed_on.is_none());
}

#[test]
fn detach_when_attached_removes_overlay() {
    let mut engine = engine(FakeHost::with_window());
    engine.attach(policy(3));
    engine.detach();
    assert_eq!(engine.status(), AttachStatus::Idle);
    assert_eq!(engine.host().removals, 1);
    assert!(engine.overlay_frame().is_none());
}

#[test]
fn detach_is_idempotent() {
    let mut engine = engine(FakeHost::with_window());
    engine.detach();
    engine.attach(policy(3));
    engine.detach();
    engine.detach();
    assert_eq!(engine.status(), AttachStatus::Idle);
    assert_eq!(engine.host().removals, 1);
}

#[test]
fn stale_token_from_earlier_request_is_ignored() {
    let mut engine = engine(FakeHost::without_windows());
    engine.attach(policy(5));
    let old = engine.scheduler().last_token().expect("scheduled");
    engine.detach();
    engine.attach(policy(5));
    let current = engine.scheduler().last_token().expect("scheduled");
    assert_ne!(old, current);

    let before = engine.host().searches.get();
    engine.on_retry_elapsed(old);
    assert_eq!(engine.host().searches.get(), before);
    assert_eq!(engine.status(), AttachStatus::Searching { attempts: 1 });
}

#[test]
fn duplicate_attach_while_searching_changes_nothing() {
    let mut engine = engine(FakeHost::without_windows());
    engine.attach(policy(5));
    engine.attach(policy(5));
    assert_eq!(engine.host().searches.get(), 1);
    assert_eq!(engine.scheduler().scheduled.len(), 1);
}

// === Stale references ===

#[test]
fn revalidate_keeps_live_window() {
    let mut engine = engine(FakeHost::with_window());
    engine.attach(policy(3));
    assert_eq!(engine.revalidate(), AttachStatus::Attached);
    assert_eq!(engine.host().installs, 1);
}

#[test]
fn revalidate_after_window_death_searches_again() {
    let mut host = FakeHost::with_window();
    host.windows.push(common::FakeWindow::key(2));
    let mut engine = engine(host);
    engine.attach(policy(3));
    assert_eq!(engine.host().installed_on, Some(1));

    engine.host_mut().kill_window(1);
    assert_eq!(engine.revalidate(), AttachStatus::Attached);
    assert_eq!(engine.host().installed_on, Some(2));
    assert_eq!(engine.host().removals, 1);
}

#[test]
fn revalidate_with_no_window_left_starts_retrying() {
    let mut engine = engine(FakeHost::with_window());
    engine.attach(policy(3));
    engine.host_mut().kill_window(1);
    assert_eq!(engine.revalidate(), AttachStatus::Searching { attempts: 1 });
    assert!(engine.target_bounds().is_none());
    assert_eq!(engine.scheduler().scheduled.len(), 1);
}

#[test]
fn anchor_is_reused_on_reattach() {
    let mut engine = engine(FakeHost::with_window());
    engine.attach(policy(3));
    engine.set_anchor(cookie_manager::model::Point::new(20.0, 600.0));
    engine.detach();
    engine.attach(policy(3));
    let frame = engine.overlay_frame().expect("attached");
    assert_eq!((frame.origin.x, frame.origin.y), (20.0, 600.0));
}
