use tracing::trace;

use super::{DriveKind, DriveStrategy, GestureContext};
use crate::config::PullToRefreshConfig;
use crate::effect::TargetOffset;
use crate::gate::OffsetGate;
use crate::machine::GestureSession;
use crate::state::PullState;
use crate::tension::damped_height;
use crate::TouchSample;

pub const MOTION_TRANSITION: &str = "transform 0.25s cubic-bezier(0, 0, 0, 1)";
pub const REST_TRANSITION: &str = "none";

/// Height is the finger delta since touch-start, damped by the tension
/// curve. The element is translated by the core itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBounceDrive;

impl NoBounceDrive {
    fn evaluate(&self, gate: &mut OffsetGate, ctx: &GestureContext<'_>) -> bool {
        gate.evaluate_no_bounce(
            ctx.surface.scroll_y(),
            ctx.config.origin_top,
            ctx.state,
            &ctx.config.gate,
        )
    }
}

impl DriveStrategy for NoBounceDrive {
    fn kind(&self) -> DriveKind {
        DriveKind::NoBounce
    }

    fn needs_touch_start(&self) -> bool {
        true
    }

    fn gate_on_start(&self, gate: &mut OffsetGate, ctx: &GestureContext<'_>) -> bool {
        self.evaluate(gate, ctx)
    }

    fn gate_on_move(&self, gate: &mut OffsetGate, ctx: &GestureContext<'_>) -> bool {
        self.evaluate(gate, ctx)
    }

    fn on_gesture_start(&self, session: &mut GestureSession, sample: TouchSample) {
        session.origin_touch_y = Some(sample.client_y);
    }

    fn on_gesture_move(
        &self,
        session: &GestureSession,
        sample: TouchSample,
        ctx: &GestureContext<'_>,
    ) -> Option<f64> {
        let Some(origin) = session.origin_touch_y else {
            trace!("no tracked touch-start, sample dropped");
            return None;
        };
        let height = damped_height(sample.client_y - origin, ctx.config.tension);
        if height.is_none() {
            trace!(client_y = sample.client_y, origin, "non-positive drag dropped");
        }
        height
    }

    fn pull_offset(&self, height: f64, _config: &PullToRefreshConfig) -> Option<TargetOffset> {
        Some(TargetOffset::TranslateY(height))
    }

    fn refresh_offset(&self, config: &PullToRefreshConfig) -> TargetOffset {
        TargetOffset::TranslateY(config.progress_height)
    }

    fn rest_offset(&self, _config: &PullToRefreshConfig) -> TargetOffset {
        TargetOffset::TranslateY(0.0)
    }

    fn refresh_transition(&self) -> Option<&'static str> {
        Some(MOTION_TRANSITION)
    }

    fn return_transition(&self) -> &'static str {
        MOTION_TRANSITION
    }

    fn pristine_transition(&self) -> &'static str {
        REST_TRANSITION
    }

    /// Only once a drag has changed the state; ordinary scrolls and taps
    /// keep their default behavior.
    fn prevents_default(&self, state: PullState) -> bool {
        state != PullState::Idle
    }
}
