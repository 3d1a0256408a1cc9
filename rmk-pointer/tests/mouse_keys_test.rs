pub mod common;

use rmk_pointer::config::PointerConfig;
use rmk_pointer::types::mouse_action::MouseAction;

use crate::common::Bench;

#[test]
fn test_move_up_ramp() {
    let mut bench = Bench::new(PointerConfig::default());
    bench.press(MouseAction::MoveUp);
    for _ in 0..3 {
        bench.tick(20);
    }
    assert_eq!(
        bench.drain_mouse_reports(),
        vec![(0, 0, -2, 0, 0), (0, 0, -4, 0, 0), (0, 0, -3, 0, 0)]
    );
    assert_eq!(bench.task.controller().move_axis().current_speed(), 177.5);
}

#[test]
fn test_release_sends_one_idle_report() {
    let mut bench = Bench::new(PointerConfig::default());
    bench.press(MouseAction::MoveRight);
    bench.tick(20);
    // The tick after the release still moves, the one after reports idle once
    bench.release(MouseAction::MoveRight);
    bench.tick(20);
    bench.tick(20);
    bench.tick(20);
    assert_eq!(
        bench.drain_mouse_reports(),
        vec![(0, 2, 0, 0, 0), (0, 4, 0, 0, 0), (0, 0, 0, 0, 0)]
    );
}

#[test]
fn test_tap_within_one_tick_is_reported() {
    let mut bench = Bench::new(PointerConfig::default());
    bench.press(MouseAction::LeftClick);
    bench.release(MouseAction::LeftClick);
    bench.tick(1);
    bench.tick(1);
    bench.tick(1);
    assert_eq!(bench.drain_mouse_reports(), vec![(0b001, 0, 0, 0, 0), (0, 0, 0, 0, 0)]);
}

#[test]
fn test_direction_tap_within_one_tick_moves() {
    let mut bench = Bench::new(PointerConfig::default());
    bench.press(MouseAction::MoveRight);
    bench.release(MouseAction::MoveRight);
    bench.tick(20);
    bench.tick(20);
    assert_eq!(bench.drain_mouse_reports(), vec![(0, 2, 0, 0, 0), (0, 0, 0, 0, 0)]);
}

#[test]
fn test_click_reaches_report() {
    let mut bench = Bench::new(PointerConfig::default());
    bench.press(MouseAction::LeftClick);
    bench.tick(1);
    bench.press(MouseAction::RightClick);
    bench.tick(1);
    bench.release(MouseAction::LeftClick);
    bench.release(MouseAction::RightClick);
    bench.tick(1);
    bench.tick(1);
    assert_eq!(
        bench.drain_mouse_reports(),
        vec![
            (0b001, 0, 0, 0, 0),
            (0b011, 0, 0, 0, 0),
            (0b011, 0, 0, 0, 0),
            (0, 0, 0, 0, 0)
        ]
    );
}

#[test]
fn test_double_bound_key_accelerates() {
    let mut bench = Bench::new(PointerConfig::default());
    // Two physical keys bound to the same action
    bench.press(MouseAction::MoveDown);
    bench.press(MouseAction::MoveDown);
    bench.tick(10);
    assert_eq!(bench.task.controller().move_axis().current_speed(), 2000.0);
    assert_eq!(bench.drain_mouse_reports(), vec![(0, 0, 20, 0, 0)]);

    // Releasing one of them drops back to base speed on the following tick
    bench.release(MouseAction::MoveDown);
    bench.tick(10);
    assert_eq!(bench.task.controller().move_axis().current_speed(), 2000.0);
    bench.tick(10);
    assert_eq!(bench.task.controller().move_axis().current_speed(), 1000.0);
}

#[test]
fn test_newest_direction_has_precedence() {
    let mut bench = Bench::new(PointerConfig::default());
    bench.press(MouseAction::MoveUp);
    bench.tick(20);
    bench.press(MouseAction::MoveDown);
    bench.tick(20);
    let reports = bench.drain_mouse_reports();
    assert!(reports[0].2 < 0);
    assert!(reports[1].2 > 0);

    bench.release(MouseAction::MoveDown);
    bench.tick(20);
    bench.tick(20);
    let reports = bench.drain_mouse_reports();
    assert!(reports[0].2 > 0);
    assert!(reports[1].2 < 0);
}

#[test]
fn test_scroll_starts_immediately() {
    let mut bench = Bench::new(PointerConfig::default());
    bench.press(MouseAction::ScrollUp);
    bench.tick(20);
    bench.release(MouseAction::ScrollUp);
    bench.tick(20);
    bench.tick(20);
    bench.press(MouseAction::ScrollLeft);
    bench.tick(20);
    assert_eq!(
        bench.drain_mouse_reports(),
        vec![(0, 0, 0, 1, 0), (0, 0, 0, 0, 0), (0, 0, 0, 0, -1)]
    );
}

#[test]
fn test_decelerate_slows_scrolling() {
    let mut bench = Bench::new(PointerConfig::default());
    bench.press(MouseAction::ScrollDown);
    for _ in 0..50 {
        bench.tick(20);
    }
    assert_eq!(bench.task.controller().scroll_axis().current_speed(), 20.0);
    bench.press(MouseAction::Decelerate);
    bench.tick(20);
    assert_eq!(bench.task.controller().scroll_axis().current_speed(), 10.0);
}
