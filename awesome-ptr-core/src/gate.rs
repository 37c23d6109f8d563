//! Offset gate
//!
//! Decides whether touch events may affect the pull state. The result is
//! cached until the next evaluation.

use tracing::trace;

use crate::config::GatePolicy;
use crate::state::PullState;

#[derive(Debug, Clone, Default)]
pub struct OffsetGate {
    disabled: bool,
}

impl OffsetGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last evaluated result
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Bounce platforms: gated while the element's live top edge sits above
    /// `origin_top`. A missing element keeps the previous value.
    pub fn evaluate_bounce(&mut self, target_top: Option<f64>, origin_top: f64) -> bool {
        if let Some(top) = target_top {
            self.disabled = top < origin_top;
            trace!(top, origin_top, disabled = self.disabled, "bounce gate evaluated");
        }
        self.disabled
    }

    /// No-bounce platforms: gated while idle and the page is scrolled past
    /// `origin_top` by more than the tolerance. Once a drag is underway the
    /// cached value is kept unless the policy asks for a re-check.
    pub fn evaluate_no_bounce(
        &mut self,
        scroll_y: f64,
        origin_top: f64,
        state: PullState,
        policy: &GatePolicy,
    ) -> bool {
        if state == PullState::Idle || policy.recheck_during_gesture {
            self.disabled = scroll_y - policy.scroll_tolerance > origin_top;
            trace!(scroll_y, origin_top, disabled = self.disabled, "scroll gate evaluated");
        }
        self.disabled
    }

    pub fn clear(&mut self) {
        self.disabled = false;
    }
}
