//! Spinner presentation math
//!
//! The Cupertino-style spinner draws eight strokes that appear one by one
//! as the pull progresses: the first stroke fades in over the first half
//! turn, the other seven share the second half with overlapping windows.

use crate::projector::SPINNER_SPIN_DEGREE;

pub const STEP_COUNT: usize = 8;
pub const STROKE_WIDTH: f64 = 12.0;

const HALF_TURN: f64 = 180.0;

/// Stroke colour for the current theme
pub fn stroke_color(is_dark_mode: bool) -> &'static str {
    if is_dark_mode {
        "#8d8d8d"
    } else {
        "#757575"
    }
}

/// Rotation of stroke `index` around the spinner center, in degrees
pub fn stroke_rotation(index: usize) -> f64 {
    let step_unit = SPINNER_SPIN_DEGREE / STEP_COUNT as f64;
    if index < STEP_COUNT / 2 {
        index as f64 * step_unit + HALF_TURN
    } else {
        (index - STEP_COUNT / 2) as f64 * step_unit
    }
}

/// Opacity in percent of stroke `index` for a pull `progress` in `[0, 1]`
pub fn stroke_opacity(index: usize, progress: f64, is_refreshing: bool) -> f64 {
    if is_refreshing {
        return 100.0;
    }

    let progress_angle = progress * SPINNER_SPIN_DEGREE;
    let (init_angle, exit_angle) = if index == 0 {
        (0.0, HALF_TURN)
    } else {
        let unit = (SPINNER_SPIN_DEGREE - HALF_TURN) / (STEP_COUNT - 1) as f64;
        (
            HALF_TURN + (index as f64 - 2.0) * unit,
            HALF_TURN + index as f64 * unit,
        )
    };

    if init_angle >= progress_angle {
        0.0
    } else {
        ((progress_angle - init_angle) * 100.0 / (exit_angle - init_angle)).min(100.0)
    }
}

/// Opacities of all strokes
pub fn stroke_opacities(progress: f64, is_refreshing: bool) -> [f64; STEP_COUNT] {
    std::array::from_fn(|index| stroke_opacity(index, progress, is_refreshing))
}
