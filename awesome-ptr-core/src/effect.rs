//! Outputs of the core
//!
//! Hosts drain these in order and apply them: invoke caller callbacks,
//! mutate inline styles and classes, start or cancel timers.

use serde::{Deserialize, Serialize};

use crate::scheduler::{TaskId, TaskPurpose};
use crate::state::PullState;

/// Visual displacement of the tracked element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "px")]
pub enum TargetOffset {
    /// `margin-top`, used where the platform bounces natively
    MarginTop(f64),
    /// `transform: translateY(..)`, used by the synthetic drag
    TranslateY(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "effect")]
pub enum Effect {
    /// `onChangeState`
    StateChanged { state: PullState },
    /// `onPull`
    Pull { progress: f64 },
    /// `onRelease`
    Release,
    /// `onRefresh`
    Refresh,

    ContainerOpacity { opacity: f64 },
    /// Toggle the `transition-enabled` class on the container
    ContainerTransition { enabled: bool },
    ContainerHeight { px: f64 },

    SpinnerRotation { degrees: f64 },
    /// Toggle the `bump` class on the spinner
    SpinnerBump { enabled: bool },
    /// Toggle the `spin` class on the spinner
    SpinnerSpinning { enabled: bool },

    TargetOffset { offset: TargetOffset },
    /// CSS `transition` value for the tracked element
    TargetTransition { value: String },

    Schedule {
        task: TaskId,
        purpose: TaskPurpose,
        delay_ms: u64,
    },
    Cancel { task: TaskId },

    AttachListeners { touch_start: bool },
    DetachListeners,
}

impl Effect {
    /// Caller-facing callback effects, as opposed to presentation or timers
    pub fn is_callback(&self) -> bool {
        matches!(
            self,
            Self::StateChanged { .. } | Self::Pull { .. } | Self::Release | Self::Refresh
        )
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StateChanged { state } => write!(f, "state -> {}", state),
            Self::Pull { progress } => write!(f, "pull {:.4}", progress),
            Self::Release => write!(f, "release"),
            Self::Refresh => write!(f, "refresh"),
            Self::ContainerOpacity { opacity } => write!(f, "container opacity {:.4}", opacity),
            Self::ContainerTransition { enabled } => write!(f, "container transition {}", enabled),
            Self::ContainerHeight { px } => write!(f, "container height {}px", px),
            Self::SpinnerRotation { degrees } => write!(f, "spinner rotate {:.2}deg", degrees),
            Self::SpinnerBump { enabled } => write!(f, "spinner bump {}", enabled),
            Self::SpinnerSpinning { enabled } => write!(f, "spinner spin {}", enabled),
            Self::TargetOffset { offset } => match offset {
                TargetOffset::MarginTop(px) => write!(f, "target margin-top {}px", px),
                TargetOffset::TranslateY(px) => write!(f, "target translateY {}px", px),
            },
            Self::TargetTransition { value } => write!(f, "target transition '{}'", value),
            Self::Schedule { task, purpose, delay_ms } => {
                write!(f, "schedule {} {:?} in {}ms", task, purpose, delay_ms)
            }
            Self::Cancel { task } => write!(f, "cancel {}", task),
            Self::AttachListeners { touch_start } => {
                write!(f, "attach listeners (touchstart: {})", touch_start)
            }
            Self::DetachListeners => write!(f, "detach listeners"),
        }
    }
}
