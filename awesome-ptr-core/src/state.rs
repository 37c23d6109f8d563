//! Pull-to-refresh lifecycle state

use serde::{Deserialize, Serialize};

/// Lifecycle state reported through `onChangeState`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum PullState {
    /// Nothing pulled, nothing pending
    #[default]
    Idle,
    /// Dragged below the trigger height
    Pulling,
    /// Dragged at or past the trigger height; releasing commits
    TriggerReady,
    /// Refresh in flight
    Refreshing,
    /// Refresh finished, exit animation pending
    Complete,
}

impl PullState {
    /// A drag is in progress
    pub fn is_gesture(self) -> bool {
        matches!(self, Self::Pulling | Self::TriggerReady)
    }
}

impl std::fmt::Display for PullState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Pulling => write!(f, "pulling"),
            Self::TriggerReady => write!(f, "triggerReady"),
            Self::Refreshing => write!(f, "refreshing"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_wire_name() {
        for state in [
            PullState::Idle,
            PullState::Pulling,
            PullState::TriggerReady,
            PullState::Refreshing,
            PullState::Complete,
        ] {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{}\"", state));
        }
    }

    #[test]
    fn test_phase_predicates() {
        assert!(PullState::Pulling.is_gesture());
        assert!(PullState::TriggerReady.is_gesture());
        assert!(!PullState::Idle.is_gesture());
        assert!(!PullState::Refreshing.is_gesture());
    }
}
