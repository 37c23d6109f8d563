//! Progress projection
//!
//! Maps a pulled height to the normalized progress and the presentation
//! signals derived from it.

use crate::config::PullToRefreshConfig;

/// Full turn of the spinner at trigger height
pub const SPINNER_SPIN_DEGREE: f64 = 360.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// `height / trigger_height`, exactly 1 at or past the trigger
    pub progress: f64,
    /// Container opacity; pinned at 1 when opacity-on-pull is disabled
    pub opacity: f64,
    /// Spinner rotation in degrees, `None` when rotation-on-pull is disabled
    pub rotation: Option<f64>,
    /// Height reached the trigger (drives the `bump` class)
    pub trigger_ready: bool,
}

pub fn project(height: f64, config: &PullToRefreshConfig) -> Projection {
    let trigger_ready = height >= config.trigger_height;
    let progress = if trigger_ready {
        1.0
    } else {
        height / config.trigger_height
    };

    Projection {
        progress,
        opacity: if config.is_opacity_change_on_pull_disabled {
            1.0
        } else {
            progress
        },
        rotation: (!config.is_rotation_spinner_on_pull_disabled)
            .then_some(progress * SPINNER_SPIN_DEGREE),
        trigger_ready,
    }
}
