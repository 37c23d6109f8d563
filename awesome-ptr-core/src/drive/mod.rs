//! Drive strategies
//!
//! Two ways of turning touch input into a pulled height:
//! - [`BounceDrive`] reads the displacement the platform's native
//!   overscroll already applied to the element.
//! - [`NoBounceDrive`] synthesizes it from the raw finger delta, damped by
//!   the tension curve, and moves the element itself.
//!
//! Both feed the same state machine. The strategy is picked once per
//! session from `is_bounce_supported`.

mod bounce;
mod no_bounce;

pub use bounce::BounceDrive;
pub use no_bounce::NoBounceDrive;

use serde::{Deserialize, Serialize};

use crate::config::PullToRefreshConfig;
use crate::effect::TargetOffset;
use crate::gate::OffsetGate;
use crate::machine::GestureSession;
use crate::state::PullState;
use crate::{Surface, TouchSample};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DriveKind {
    Bounce,
    NoBounce,
}

impl DriveKind {
    /// Container class used by the stylesheet
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Bounce => "for-bounce",
            Self::NoBounce => "for-no-bounce",
        }
    }
}

/// Read-only view of the machine handed to a strategy
pub struct GestureContext<'a> {
    pub config: &'a PullToRefreshConfig,
    pub state: PullState,
    pub surface: &'a dyn Surface,
}

pub trait DriveStrategy: std::fmt::Debug {
    fn kind(&self) -> DriveKind;

    /// Whether a touch-start listener is needed at all
    fn needs_touch_start(&self) -> bool;

    /// Evaluate the offset gate for a touch-start. Returns `true` when gated.
    fn gate_on_start(&self, gate: &mut OffsetGate, ctx: &GestureContext<'_>) -> bool;

    /// Evaluate the offset gate for a touch-move. Returns `true` when gated.
    fn gate_on_move(&self, gate: &mut OffsetGate, ctx: &GestureContext<'_>) -> bool;

    /// Record whatever the strategy needs from an accepted touch-start
    fn on_gesture_start(&self, session: &mut GestureSession, sample: TouchSample);

    /// Pulled height for a touch-move, `None` to drop the sample
    fn on_gesture_move(
        &self,
        session: &GestureSession,
        sample: TouchSample,
        ctx: &GestureContext<'_>,
    ) -> Option<f64>;

    fn on_gesture_end(&self, session: &mut GestureSession) {
        session.clear();
    }

    /// Offset applied to the element while dragging
    fn pull_offset(&self, height: f64, config: &PullToRefreshConfig) -> Option<TargetOffset>;

    /// Offset held while refreshing
    fn refresh_offset(&self, config: &PullToRefreshConfig) -> TargetOffset;

    /// Offset at rest
    fn rest_offset(&self, config: &PullToRefreshConfig) -> TargetOffset;

    /// Transition to set before moving into the refresh offset
    fn refresh_transition(&self) -> Option<&'static str>;

    /// Transition used while returning to rest
    fn return_transition(&self) -> &'static str;

    /// Transition restored once the element is back at rest
    fn pristine_transition(&self) -> &'static str;

    /// Default browser scrolling must be suppressed for a move in `state`
    fn prevents_default(&self, state: PullState) -> bool;
}

/// Pick the strategy for a configuration
pub fn for_config(config: &PullToRefreshConfig) -> Box<dyn DriveStrategy> {
    match config.drive_kind() {
        DriveKind::Bounce => Box::new(BounceDrive),
        DriveKind::NoBounce => Box::new(NoBounceDrive),
    }
}
