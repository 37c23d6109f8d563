//! Gesture-to-state core for pull-to-refresh interactions
//!
//! Converts a stream of raw touch events into an ordered sequence of
//! [`PullState`] notifications and presentation [`Effect`]s. The core never
//! touches a DOM: hosts feed it touch samples and layout reads through
//! [`Surface`], run the timers it asks for, and apply the effects it emits.

pub mod config;
pub mod drive;
pub mod effect;
pub mod frame;
pub mod gate;
pub mod machine;
pub mod projector;
pub mod scheduler;
pub mod sim;
pub mod spinner;
pub mod state;
pub mod tension;

pub use config::{GatePolicy, PullToRefreshConfig};
pub use drive::{DriveKind, DriveStrategy};
pub use effect::{Effect, TargetOffset};
pub use frame::{Coalesced, FrameCoalescer};
pub use machine::{GestureSession, MoveOutcome, PullToRefresh};
pub use scheduler::{Scheduler, TaskId, TaskPurpose};
pub use state::PullState;

/// Layout reads the core needs from its host environment
pub trait Surface {
    /// Live top edge of the tracked element from layout geometry.
    /// `None` when the element is not mounted.
    fn target_top(&self) -> Option<f64>;

    /// Vertical scroll offset of the page
    fn scroll_y(&self) -> f64;
}

/// A single tracked touch point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSample {
    pub client_y: f64,
}

impl TouchSample {
    pub fn new(client_y: f64) -> Self {
        Self { client_y }
    }
}

/// Core error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
