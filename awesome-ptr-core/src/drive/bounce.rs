use tracing::trace;

use super::{DriveKind, DriveStrategy, GestureContext};
use crate::config::PullToRefreshConfig;
use crate::effect::TargetOffset;
use crate::gate::OffsetGate;
use crate::machine::GestureSession;
use crate::state::PullState;
use crate::tension::is_valid_height;
use crate::TouchSample;

pub const PRISTINE_TRANSITION: &str = "margin 0.7s cubic-bezier(0, 0, 0, 1)";
pub const RETURN_TRANSITION: &str = "margin 0.2s cubic-bezier(0, 0, 0, 1)";

/// Height comes from the element's live top edge; the platform's elastic
/// overscroll does the displacing.
#[derive(Debug, Clone, Copy, Default)]
pub struct BounceDrive;

impl DriveStrategy for BounceDrive {
    fn kind(&self) -> DriveKind {
        DriveKind::Bounce
    }

    fn needs_touch_start(&self) -> bool {
        false
    }

    fn gate_on_start(&self, gate: &mut OffsetGate, _ctx: &GestureContext<'_>) -> bool {
        gate.is_disabled()
    }

    fn gate_on_move(&self, gate: &mut OffsetGate, ctx: &GestureContext<'_>) -> bool {
        gate.evaluate_bounce(ctx.surface.target_top(), ctx.config.origin_top)
    }

    fn on_gesture_start(&self, _session: &mut GestureSession, _sample: TouchSample) {}

    fn on_gesture_move(
        &self,
        _session: &GestureSession,
        _sample: TouchSample,
        ctx: &GestureContext<'_>,
    ) -> Option<f64> {
        let Some(top) = ctx.surface.target_top() else {
            trace!("target not mounted, sample dropped");
            return None;
        };
        let height = top - ctx.config.origin_top;
        if !is_valid_height(height) {
            trace!(height, "non-positive pull height dropped");
            return None;
        }
        Some(height)
    }

    fn pull_offset(&self, _height: f64, _config: &PullToRefreshConfig) -> Option<TargetOffset> {
        None
    }

    fn refresh_offset(&self, config: &PullToRefreshConfig) -> TargetOffset {
        TargetOffset::MarginTop(config.progress_height + config.origin_margin_top)
    }

    fn rest_offset(&self, config: &PullToRefreshConfig) -> TargetOffset {
        TargetOffset::MarginTop(config.origin_margin_top)
    }

    fn refresh_transition(&self) -> Option<&'static str> {
        None
    }

    fn return_transition(&self) -> &'static str {
        RETURN_TRANSITION
    }

    fn pristine_transition(&self) -> &'static str {
        PRISTINE_TRANSITION
    }

    fn prevents_default(&self, _state: PullState) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimSurface;

    fn ctx<'a>(config: &'a PullToRefreshConfig, surface: &'a SimSurface) -> GestureContext<'a> {
        GestureContext {
            config,
            state: PullState::Idle,
            surface,
        }
    }

    #[test]
    fn test_height_from_top_edge() {
        let config = PullToRefreshConfig {
            origin_top: 10.0,
            ..Default::default()
        };
        let surface = SimSurface::with_top(60.0);
        let session = GestureSession::default();
        let height = BounceDrive.on_gesture_move(&session, TouchSample::new(0.0), &ctx(&config, &surface));
        assert_eq!(height, Some(50.0));
    }

    #[test]
    fn test_drops_when_not_displaced() {
        let config = PullToRefreshConfig::default();
        let session = GestureSession::default();
        for surface in [SimSurface::with_top(0.0), SimSurface::with_top(-4.0), SimSurface::unmounted()] {
            let height = BounceDrive.on_gesture_move(&session, TouchSample::new(0.0), &ctx(&config, &surface));
            assert_eq!(height, None);
        }
    }

    #[test]
    fn test_refresh_offset_includes_margin() {
        let config = PullToRefreshConfig {
            origin_margin_top: 100.0,
            ..Default::default()
        };
        assert_eq!(BounceDrive.refresh_offset(&config), TargetOffset::MarginTop(150.0));
        assert_eq!(BounceDrive.rest_offset(&config), TargetOffset::MarginTop(100.0));
    }
}
