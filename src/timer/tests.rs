#![allow(clippy::unwrap_used)]

use std::time::Duration;

use super::*;

// ── format_elapsed ────────────────────────────────────────────

#[test]
fn test_format_zero() {
    assert_eq!(format_elapsed(Duration::ZERO), "0:00");
}

#[test]
fn test_format_under_a_minute() {
    assert_eq!(format_elapsed(Duration::from_secs(7)), "0:07");
    assert_eq!(format_elapsed(Duration::from_secs(59)), "0:59");
}

#[test]
fn test_format_minutes_unpadded() {
    assert_eq!(format_elapsed(Duration::from_secs(60)), "1:00");
    assert_eq!(format_elapsed(Duration::from_secs(9 * 60 + 5)), "9:05");
    assert_eq!(format_elapsed(Duration::from_secs(59 * 60 + 59)), "59:59");
}

#[test]
fn test_format_with_hours_pads_minutes() {
    assert_eq!(format_elapsed(Duration::from_secs(3600)), "1:00:00");
    assert_eq!(
        format_elapsed(Duration::from_secs(3600 + 5 * 60 + 3)),
        "1:05:03"
    );
    assert_eq!(
        format_elapsed(Duration::from_secs(11 * 3600 + 59 * 60 + 59)),
        "11:59:59"
    );
}

#[test]
fn test_format_subsecond_truncates() {
    assert_eq!(format_elapsed(Duration::from_millis(999)), "0:00");
}

// ── SessionTimer ──────────────────────────────────────────────

#[test]
fn test_new_timer_is_stopped_at_zero() {
    let t = SessionTimer::new();
    assert!(!t.is_running());
    assert_eq!(t.elapsed(), Duration::ZERO);
    assert_eq!(t.formatted(), "0:00");
}

#[test]
fn test_start_runs_and_ticks() {
    let mut t = SessionTimer::new();
    t.start();
    assert!(t.is_running());
    t.tick();
    // Just started, so elapsed is effectively zero but was refreshed.
    assert!(t.elapsed() < Duration::from_secs(1));
}

#[test]
fn test_pause_freezes_elapsed() {
    let mut t = SessionTimer::new();
    t.elapsed = Duration::from_secs(42);
    t.pause();
    assert!(!t.is_running());
    t.tick();
    assert_eq!(t.elapsed(), Duration::from_secs(42));
}

#[test]
fn test_tick_is_noop_while_stopped() {
    let mut t = SessionTimer::new();
    t.elapsed = Duration::from_secs(10);
    t.tick();
    assert_eq!(t.elapsed(), Duration::from_secs(10));
}

#[test]
fn test_restart_discards_frozen_elapsed() {
    // Pausing then starting again rebases on "now"; the frozen value is
    // not carried forward. Preserved behavior, not a bug to fix here.
    let mut t = SessionTimer::new();
    t.elapsed = Duration::from_secs(90);
    t.start();
    t.tick();
    assert!(t.elapsed() < Duration::from_secs(1));
}

#[test]
fn test_reset_clears_everything() {
    let mut t = SessionTimer::new();
    t.elapsed = Duration::from_secs(90);
    t.start();
    t.reset();
    assert!(!t.is_running());
    assert_eq!(t.elapsed(), Duration::ZERO);
}
