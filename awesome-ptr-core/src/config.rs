//! Pull-to-refresh configuration
//!
//! Immutable per session. Field names serialize in camelCase so a config
//! can be shared verbatim with the component props.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::drive::DriveKind;
use crate::{Error, Result};

/// Default drag distance that commits to a refresh
pub const DEFAULT_TRIGGER_HEIGHT: f64 = 80.0;
/// Default displacement held while refreshing
pub const DEFAULT_PROGRESS_HEIGHT: f64 = 50.0;
/// Default spinner width in pixels
pub const DEFAULT_SPINNER_SIZE: f64 = 32.0;
/// Default tension exponent
pub const DEFAULT_TENSION: f64 = 0.82;
/// Fade-out duration of the indicator container
pub const DEFAULT_TRANSITION_DURATION_MS: u64 = 250;

/// Offset gate tuning
///
/// Browsers disagree about the scroll offset reported at rest (some Android
/// browsers report fractions like `0.788` at the top), and historical
/// versions of the component disagreed on whether to re-check mid-drag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GatePolicy {
    /// Pixels of scroll offset tolerated above `originTop` before gating
    pub scroll_tolerance: f64,
    /// Re-evaluate the no-bounce gate while a drag is already in progress
    pub recheck_during_gesture: bool,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            scroll_tolerance: 1.0,
            recheck_during_gesture: false,
        }
    }
}

/// Configuration of one pull-to-refresh instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PullToRefreshConfig {
    /// Top of the target (layout geometry) where pulling starts
    pub origin_top: f64,
    /// Resting top margin of the target
    pub origin_margin_top: f64,
    /// Drag distance at which a release triggers a refresh
    pub trigger_height: f64,
    /// Displacement kept while refreshing
    pub progress_height: f64,
    pub spinner_size: f64,
    /// Damping exponent for the no-bounce strategy
    pub tension: f64,
    pub refresh_delay_ms: u64,
    /// How long `complete` is held before the exit animation
    pub complete_delay_ms: u64,
    /// Delay before the indicator hides when hidden during refreshing
    pub hide_delay_ms: u64,
    pub transition_duration_ms: u64,
    /// Platform has native elastic overscroll
    pub is_bounce_supported: bool,
    pub is_disabled: bool,
    pub is_spinner_hidden_during_refreshing: bool,
    pub is_opacity_change_on_pull_disabled: bool,
    pub is_rotation_spinner_on_pull_disabled: bool,
    pub gate: GatePolicy,
}

impl Default for PullToRefreshConfig {
    fn default() -> Self {
        Self {
            origin_top: 0.0,
            origin_margin_top: 0.0,
            trigger_height: DEFAULT_TRIGGER_HEIGHT,
            progress_height: DEFAULT_PROGRESS_HEIGHT,
            spinner_size: DEFAULT_SPINNER_SIZE,
            tension: DEFAULT_TENSION,
            refresh_delay_ms: 0,
            complete_delay_ms: 0,
            hide_delay_ms: 0,
            transition_duration_ms: DEFAULT_TRANSITION_DURATION_MS,
            is_bounce_supported: false,
            is_disabled: false,
            is_spinner_hidden_during_refreshing: false,
            is_opacity_change_on_pull_disabled: false,
            is_rotation_spinner_on_pull_disabled: false,
            gate: GatePolicy::default(),
        }
    }
}

impl PullToRefreshConfig {
    /// Parse a JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check numeric fields for values the core cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.trigger_height.is_finite() || self.trigger_height <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "triggerHeight must be a positive number, got {}",
                self.trigger_height
            )));
        }

        if !self.tension.is_finite() || self.tension <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "tension must be a positive number, got {}",
                self.tension
            )));
        }

        let non_negative = [
            ("progressHeight", self.progress_height),
            ("spinnerSize", self.spinner_size),
            ("gate.scrollTolerance", self.gate.scroll_tolerance),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        for (name, value) in [("originTop", self.origin_top), ("originMarginTop", self.origin_margin_top)] {
            if !value.is_finite() {
                return Err(Error::InvalidConfig(format!("{} must be finite", name)));
            }
        }

        if self.tension >= 1.0 {
            warn!(
                tension = self.tension,
                "tension >= 1 removes the pull resistance"
            );
        }

        Ok(())
    }

    pub fn drive_kind(&self) -> DriveKind {
        if self.is_bounce_supported {
            DriveKind::Bounce
        } else {
            DriveKind::NoBounce
        }
    }

    /// Spinner top margin that centers it inside the progress area
    pub fn spinner_margin_top(&self) -> f64 {
        (self.progress_height - self.spinner_size) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PullToRefreshConfig::default();
        assert_eq!(config.trigger_height, 80.0);
        assert_eq!(config.progress_height, 50.0);
        assert_eq!(config.transition_duration_ms, 250);
        assert!(!config.is_bounce_supported);
        assert_eq!(config.drive_kind(), DriveKind::NoBounce);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_uses_camel_case_and_defaults() {
        let config = PullToRefreshConfig::from_json(
            r#"{"triggerHeight": 120, "isBounceSupported": true, "gate": {"scrollTolerance": 0}}"#,
        )
        .unwrap();
        assert_eq!(config.trigger_height, 120.0);
        assert!(config.is_bounce_supported);
        assert_eq!(config.gate.scroll_tolerance, 0.0);
        assert!(!config.gate.recheck_during_gesture);
        assert_eq!(config.progress_height, DEFAULT_PROGRESS_HEIGHT);
    }

    #[test]
    fn test_rejects_zero_trigger_height() {
        let config = PullToRefreshConfig {
            trigger_height: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_bad_tension() {
        for tension in [0.0, -0.5, f64::NAN] {
            let config = PullToRefreshConfig {
                tension,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "tension {} accepted", tension);
        }
    }

    #[test]
    fn test_tension_above_one_is_allowed() {
        let config = PullToRefreshConfig {
            tension: 1.2,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_json() {
        let err = PullToRefreshConfig::from_json("{ triggerHeight: ").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_spinner_margin_top() {
        let config = PullToRefreshConfig::default();
        assert_eq!(config.spinner_margin_top(), 9.0);
    }
}
