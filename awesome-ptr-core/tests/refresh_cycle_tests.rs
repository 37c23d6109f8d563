//! Refresh Cycle Tests
//! The refreshing -> complete -> idle sequence, delays and teardown

mod common;

use awesome_ptr_core::scheduler::TaskPurpose;
use awesome_ptr_core::{Effect, PullState, PullToRefreshConfig, TargetOffset};
use common::*;

fn refreshing_host(config: PullToRefreshConfig) -> awesome_ptr_core::sim::SimHost {
    let mut host = mounted_host(config);
    pull_and_release(&mut host, 200.0);
    host.set_refreshing(true);
    host
}

// ============== Full sequence ==============

#[test]
fn test_full_state_sequence() {
    for bounce in [false, true] {
        let mut host = refreshing_host(scenario_config(bounce));
        host.set_refreshing(false);
        host.settle();

        assert_eq!(
            host.states(),
            vec![
                PullState::Idle,
                PullState::Pulling,
                PullState::TriggerReady,
                PullState::Refreshing,
                PullState::Complete,
                PullState::Idle,
            ]
        );
    }
}

#[test]
fn test_complete_is_held_for_complete_delay() {
    let mut host = refreshing_host(PullToRefreshConfig {
        complete_delay_ms: 500,
        ..scenario_config(false)
    });
    host.clear_log();
    host.advance(1_000);
    host.set_refreshing(false);
    host.settle();

    assert_eq!(host.states(), vec![PullState::Complete, PullState::Idle]);
    assert_eq!(host.state_at(PullState::Complete), Some(1_000));
    assert_eq!(host.state_at(PullState::Idle), Some(1_000 + 500 + 250));
}

#[test]
fn test_fade_starts_after_complete_delay() {
    let mut host = refreshing_host(PullToRefreshConfig {
        complete_delay_ms: 300,
        ..scenario_config(false)
    });
    host.clear_log();
    host.set_refreshing(false);
    host.advance(299);
    assert!(!host.effects().any(|e| *e == Effect::ContainerOpacity { opacity: 0.0 }));

    host.advance(1);
    assert_eq!(host.count(&Effect::ContainerOpacity { opacity: 0.0 }), 1);
    assert_eq!(host.state(), PullState::Complete);
}

#[test]
fn test_refresh_offset_held_while_refreshing() {
    let host = refreshing_host(scenario_config(true));
    assert!(host.effects().any(|e| *e
        == Effect::TargetOffset {
            offset: TargetOffset::MarginTop(50.0 + ORIGIN_MARGIN_TOP)
        }));

    let host = refreshing_host(scenario_config(false));
    assert!(host.effects().any(|e| *e
        == Effect::TargetOffset {
            offset: TargetOffset::TranslateY(50.0)
        }));
    assert_eq!(host.count(&Effect::SpinnerSpinning { enabled: true }), 1);
}

#[test]
fn test_spinner_stops_at_idle() {
    let mut host = refreshing_host(scenario_config(false));
    host.set_refreshing(false);
    host.settle();
    let last_spin = host
        .effects()
        .filter(|e| matches!(e, Effect::SpinnerSpinning { .. }))
        .last()
        .cloned();
    assert_eq!(last_spin, Some(Effect::SpinnerSpinning { enabled: false }));
}

// ============== Idempotence ==============

#[test]
fn test_reset_while_idle_does_not_renotify() {
    let mut host = mounted_host(scenario_config(false));
    host.set_refreshing(false);
    host.touch_end();
    host.set_disabled(true);
    host.set_disabled(false);
    host.settle();
    assert_eq!(host.states(), vec![PullState::Idle]);
}

#[test]
fn test_release_reset_then_idle_inputs_do_not_renotify() {
    let mut host = mounted_host(scenario_config(false));
    pull_and_release(&mut host, START_Y + 40.0);
    assert_eq!(host.state(), PullState::Idle);

    host.clear_log();
    host.touch_end();
    host.set_refreshing(false);
    host.settle();
    assert!(host.states().is_empty());
    assert_eq!(host.count(&Effect::Release), 0);
}

#[test]
fn test_repeated_falling_edge_is_ignored() {
    let mut host = refreshing_host(PullToRefreshConfig {
        complete_delay_ms: 100,
        ..scenario_config(false)
    });
    host.set_refreshing(false);
    host.set_refreshing(false);
    assert_eq!(host.pending_timers(), 1);
    host.settle();
    assert_eq!(host.count(&Effect::StateChanged { state: PullState::Complete }), 1);
    assert_eq!(
        host.states().iter().filter(|s| **s == PullState::Idle).count(),
        2
    );
}

#[test]
fn test_gestures_blocked_until_exit_finishes() {
    let mut host = refreshing_host(PullToRefreshConfig {
        complete_delay_ms: 200,
        ..scenario_config(false)
    });
    host.set_refreshing(false);
    host.clear_log();

    pull_and_release(&mut host, 200.0);
    assert!(host.pulls().is_empty());
    assert_eq!(host.count(&Effect::Release), 0);

    host.settle();
    host.clear_log();
    pull_and_release(&mut host, 200.0);
    assert_eq!(host.count(&Effect::Refresh), 1);
}

// ============== Delays ==============

#[test]
fn test_refresh_delay() {
    let mut host = mounted_host(PullToRefreshConfig {
        refresh_delay_ms: 300,
        ..scenario_config(false)
    });
    pull_and_release(&mut host, 200.0);
    assert_eq!(host.state(), PullState::Refreshing);
    assert_eq!(host.count(&Effect::Refresh), 0);

    host.advance(300);
    assert_eq!(host.count(&Effect::Refresh), 1);
}

#[test]
fn test_hidden_spinner_during_refreshing() {
    let mut host = mounted_host(PullToRefreshConfig {
        is_spinner_hidden_during_refreshing: true,
        hide_delay_ms: 200,
        ..scenario_config(false)
    });
    pull_and_release(&mut host, 200.0);
    host.set_refreshing(true);
    host.clear_log();

    host.advance(200);
    assert_eq!(host.count(&Effect::ContainerOpacity { opacity: 0.0 }), 1);
    assert_eq!(host.state(), PullState::Refreshing);

    host.set_refreshing(false);
    host.settle();
    assert_eq!(host.states(), vec![PullState::Complete, PullState::Idle]);
}

// ============== Caller-driven refresh ==============

#[test]
fn test_mount_while_refreshing() {
    init_logging();
    let mut host = awesome_ptr_core::sim::SimHost::new(scenario_config(false)).unwrap();
    host.mount(true);

    assert_eq!(host.states(), vec![PullState::Idle, PullState::Refreshing]);
    assert_eq!(host.count(&Effect::ContainerHeight { px: TRIGGER_HEIGHT }), 1);
    assert_eq!(host.count(&Effect::Refresh), 0);

    host.set_refreshing(false);
    host.settle();
    assert_eq!(host.state(), PullState::Idle);
}

#[test]
fn test_caller_initiated_refresh() {
    let mut host = mounted_host(scenario_config(true));
    host.set_refreshing(true);
    assert_eq!(host.state(), PullState::Refreshing);
    assert_eq!(host.count(&Effect::Refresh), 0);
    assert_eq!(host.count(&Effect::ContainerOpacity { opacity: 1.0 }), 1);

    host.bounce_move(START_Y, 200.0);
    assert!(host.pulls().is_empty());
}

#[test]
fn test_refresh_restarted_during_complete() {
    let mut host = refreshing_host(PullToRefreshConfig {
        complete_delay_ms: 500,
        ..scenario_config(false)
    });
    host.set_refreshing(false);
    host.set_refreshing(true);
    assert_eq!(host.state(), PullState::Refreshing);
    assert_eq!(host.pending_timers(), 0);
}

// ============== Teardown ==============

#[test]
fn test_teardown_cancels_pending_work() {
    let mut host = refreshing_host(PullToRefreshConfig {
        complete_delay_ms: 500,
        ..scenario_config(false)
    });
    host.set_refreshing(false);
    assert!(host
        .core
        .pending_tasks()
        .iter()
        .any(|t| t.purpose == TaskPurpose::CompleteDelay));

    host.teardown();
    assert_eq!(host.pending_timers(), 0);
    host.clear_log();
    host.settle();
    host.set_refreshing(true);
    assert!(host.log().is_empty());
}

#[test]
fn test_disable_during_refresh_forces_idle() {
    let mut host = refreshing_host(scenario_config(false));
    host.set_disabled(true);
    assert_eq!(host.state(), PullState::Idle);
    assert_eq!(host.pending_timers(), 0);
    assert!(host.effects().any(|e| *e == Effect::DetachListeners));
}

// ============== Drive swap and retarget ==============

fn last_translate(host: &awesome_ptr_core::sim::SimHost) -> Option<f64> {
    host.effects()
        .filter_map(|e| match e {
            Effect::TargetOffset {
                offset: TargetOffset::TranslateY(px),
            } => Some(*px),
            _ => None,
        })
        .last()
}

#[test]
fn test_drive_swap_while_refreshing_restores_rest() {
    let mut host = refreshing_host(scenario_config(false));
    assert_eq!(last_translate(&host), Some(50.0));

    host.reconfigure(scenario_config(true)).unwrap();
    assert_eq!(host.state(), PullState::Idle);
    assert_eq!(host.pending_timers(), 0);
    assert_eq!(last_translate(&host), Some(0.0));

    host.set_refreshing(false);
    host.settle();
    assert_eq!(host.state(), PullState::Idle);
    assert_eq!(last_translate(&host), Some(0.0));

    // The bounce drive runs the next cycle
    host.clear_log();
    pull_and_release(&mut host, 200.0);
    assert_eq!(host.count(&Effect::Refresh), 1);
}

#[test]
fn test_drive_swap_back_from_bounce_restores_margin() {
    let mut host = refreshing_host(scenario_config(true));
    host.reconfigure(scenario_config(false)).unwrap();
    assert_eq!(host.state(), PullState::Idle);
    assert_eq!(host.last_offset(), Some(TargetOffset::MarginTop(ORIGIN_MARGIN_TOP)));
}

#[test]
fn test_drive_swap_mid_pull_ends_the_gesture() {
    let mut host = mounted_host(scenario_config(false));
    host.touch_start(START_Y);
    drag_to(&mut host, START_Y + 40.0);
    assert_eq!(host.state(), PullState::Pulling);

    host.reconfigure(scenario_config(true)).unwrap();
    assert_eq!(host.state(), PullState::Idle);
    assert_eq!(host.core.session().origin_touch_y, None);
    assert_eq!(last_translate(&host), Some(0.0));

    // The stale touch-end has nothing left to release
    host.clear_log();
    host.touch_end();
    assert!(host.log().is_empty());
}

#[test]
fn test_retarget_mid_pull_resets_old_element() {
    let mut host = mounted_host(scenario_config(false));
    host.touch_start(START_Y);
    drag_to(&mut host, START_Y + 40.0);

    host.retarget();
    assert_eq!(host.state(), PullState::Idle);
    assert_eq!(host.last_offset(), Some(TargetOffset::TranslateY(0.0)));
    assert!(host.core.is_attached());

    host.clear_log();
    pull_and_release(&mut host, 200.0);
    assert_eq!(host.count(&Effect::Refresh), 1);
}

#[test]
fn test_retarget_mid_refresh_resets_old_element() {
    let mut host = refreshing_host(scenario_config(true));
    host.retarget();
    assert_eq!(host.state(), PullState::Idle);
    assert_eq!(host.pending_timers(), 0);
    assert_eq!(host.last_offset(), Some(TargetOffset::MarginTop(ORIGIN_MARGIN_TOP)));
    assert!(host.core.is_attached());

    // Gestures wait for the caller to finish its refresh
    host.clear_log();
    pull_and_release(&mut host, 200.0);
    assert_eq!(host.count(&Effect::Refresh), 0);

    host.set_refreshing(false);
    pull_and_release(&mut host, 200.0);
    assert_eq!(host.count(&Effect::Refresh), 1);
    assert_eq!(host.count(&Effect::StateChanged { state: PullState::Complete }), 0);
}

#[test]
fn test_retarget_while_idle_is_quiet() {
    let mut host = mounted_host(scenario_config(false));
    host.clear_log();
    host.retarget();
    assert!(host.log().is_empty());
    assert!(host.core.is_attached());
}
