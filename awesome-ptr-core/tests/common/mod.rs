//! Common test utilities and helpers

#![allow(dead_code)]

use awesome_ptr_core::sim::SimHost;
use awesome_ptr_core::PullToRefreshConfig;

pub const TRIGGER_HEIGHT: f64 = 80.0;
pub const ORIGIN_MARGIN_TOP: f64 = 100.0;
pub const START_Y: f64 = 100.0;

/// Route core tracing output through the test harness
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Linear drag, trigger at 80px, element resting 100px down
pub fn scenario_config(bounce: bool) -> PullToRefreshConfig {
    PullToRefreshConfig {
        trigger_height: TRIGGER_HEIGHT,
        origin_margin_top: ORIGIN_MARGIN_TOP,
        tension: 1.0,
        is_bounce_supported: bounce,
        ..Default::default()
    }
}

pub fn mounted_host(config: PullToRefreshConfig) -> SimHost {
    init_logging();
    let mut host = SimHost::new(config).expect("valid config");
    host.mount(false);
    host
}

/// Touch-move that works for either drive strategy
pub fn drag_to(host: &mut SimHost, client_y: f64) {
    if host.core.config().is_bounce_supported {
        host.bounce_move(START_Y, client_y);
    } else {
        host.touch_move(client_y);
    }
}

/// Full pull past the trigger and release
pub fn pull_and_release(host: &mut SimHost, to_y: f64) {
    host.touch_start(START_Y);
    drag_to(host, to_y);
    host.touch_end();
}
