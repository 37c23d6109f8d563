//! Pull-to-refresh state machine
//!
//! Owns the gesture session, the offset gate, the scheduled tasks and the
//! current [`PullState`]. Every input method queues [`Effect`]s that the
//! host drains with [`PullToRefresh::drain_effects`].

use tracing::{debug, trace};

use crate::config::PullToRefreshConfig;
use crate::drive::{self, DriveKind, DriveStrategy, GestureContext};
use crate::effect::Effect;
use crate::gate::OffsetGate;
use crate::projector::{project, SPINNER_SPIN_DEGREE};
use crate::scheduler::{ScheduledTask, Scheduler, TaskId, TaskPurpose};
use crate::state::PullState;
use crate::{Result, Surface, TouchSample};

/// One drag-release cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureSession {
    /// Client Y at an accepted touch-start, `None` without a tracked touch
    pub origin_touch_y: Option<f64>,
    /// Last accepted (possibly damped) pulled height
    pub current_height: f64,
    /// `current_height / trigger_height`, capped at 1
    pub progress: f64,
}

impl GestureSession {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Result of feeding a touch-move sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The sample reached the projector
    pub accepted: bool,
    /// The host must call `preventDefault` on the event
    pub prevent_default: bool,
}

pub struct PullToRefresh {
    config: PullToRefreshConfig,
    drive: Box<dyn DriveStrategy>,
    gate: OffsetGate,
    session: GestureSession,
    scheduler: Scheduler,
    state: PullState,
    should_refresh: bool,
    /// Level of the caller-owned `isRefreshing` prop
    is_refreshing: bool,
    /// Refresh cycle in flight on our side, cleared when the exit animation ends
    refresh_latched: bool,
    is_disabled: bool,
    mounted: bool,
    attached: bool,
    torn_down: bool,
    effects: Vec<Effect>,
}

impl std::fmt::Debug for PullToRefresh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PullToRefresh")
            .field("drive", &self.drive.kind())
            .field("state", &self.state)
            .field("session", &self.session)
            .field("should_refresh", &self.should_refresh)
            .field("is_refreshing", &self.is_refreshing)
            .field("refresh_latched", &self.refresh_latched)
            .field("attached", &self.attached)
            .finish()
    }
}

impl Default for PullToRefresh {
    fn default() -> Self {
        Self::with_checked_config(PullToRefreshConfig::default())
    }
}

impl PullToRefresh {
    pub fn new(config: PullToRefreshConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_checked_config(config))
    }

    fn with_checked_config(config: PullToRefreshConfig) -> Self {
        Self {
            drive: drive::for_config(&config),
            is_disabled: config.is_disabled,
            config,
            gate: OffsetGate::new(),
            session: GestureSession::default(),
            scheduler: Scheduler::new(),
            state: PullState::Idle,
            should_refresh: false,
            is_refreshing: false,
            refresh_latched: false,
            mounted: false,
            attached: false,
            torn_down: false,
            effects: Vec::new(),
        }
    }

    pub fn config(&self) -> &PullToRefreshConfig {
        &self.config
    }

    pub fn state(&self) -> PullState {
        self.state
    }

    pub fn session(&self) -> &GestureSession {
        &self.session
    }

    pub fn progress(&self) -> f64 {
        self.session.progress
    }

    pub fn drive_kind(&self) -> DriveKind {
        self.drive.kind()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn should_refresh(&self) -> bool {
        self.should_refresh
    }

    pub fn pending_tasks(&self) -> &[ScheduledTask] {
        self.scheduler.pending()
    }

    /// Hand queued effects to the host, in emission order
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Swap configuration between sessions
    pub fn reconfigure(&mut self, config: PullToRefreshConfig) -> Result<()> {
        config.validate()?;
        let drive_changed = config.is_bounce_supported != self.config.is_bounce_supported;
        let disabled = config.is_disabled;

        // The outgoing drive is the only one that knows how to undo its offset
        if drive_changed {
            self.reset_if_displaced();
        }
        self.config = config;

        if drive_changed {
            self.drive = drive::for_config(&self.config);
            self.session.clear();
            self.gate.clear();
            debug!(drive = ?self.drive.kind(), "drive strategy replaced");
            self.push(Effect::TargetTransition {
                value: self.drive.pristine_transition().to_string(),
            });
            if self.attached {
                self.attached = false;
                self.push(Effect::DetachListeners);
                if !disabled {
                    self.push(Effect::AttachListeners {
                        touch_start: self.drive.needs_touch_start(),
                    });
                }
            }
        }

        self.set_disabled(disabled);
        Ok(())
    }

    /// View mounted. Reports `idle` once and, when the caller is already
    /// refreshing, shows the refreshing indicator without calling `onRefresh`.
    pub fn mount(&mut self, is_refreshing: bool) {
        if self.mounted || self.torn_down {
            return;
        }
        self.mounted = true;
        self.is_refreshing = is_refreshing;
        self.refresh_latched = is_refreshing;

        if self.drive.kind() == DriveKind::Bounce {
            self.push(Effect::TargetTransition {
                value: self.drive.pristine_transition().to_string(),
            });
        }
        self.push(Effect::StateChanged {
            state: PullState::Idle,
        });

        if is_refreshing {
            if !self.config.is_spinner_hidden_during_refreshing {
                self.push(Effect::ContainerHeight {
                    px: self.config.trigger_height,
                });
            }
            self.enter_refreshing(false);
        }
    }

    /// Listeners were attached to the tracked element. Returns `false` when
    /// the host should not listen at all.
    pub fn attach(&mut self) -> bool {
        if self.torn_down || self.is_disabled {
            return false;
        }
        self.attached = true;
        true
    }

    /// Listeners were removed, e.g. the element reference changed. The
    /// element being left is snapped back to rest first.
    pub fn detach(&mut self) {
        self.reset_if_displaced();
        self.attached = false;
        self.session.clear();
    }

    /// Listen for touch-start at all
    pub fn needs_touch_start(&self) -> bool {
        self.drive.needs_touch_start()
    }

    fn accepts_touch(&self) -> bool {
        self.mounted && self.attached && !self.is_disabled && !self.torn_down
    }

    fn refresh_blocks_gesture(&self) -> bool {
        self.is_refreshing || self.refresh_latched
    }

    pub fn touch_start(&mut self, sample: TouchSample, surface: &dyn Surface) {
        if !self.accepts_touch() || !self.drive.needs_touch_start() {
            return;
        }

        let ctx = GestureContext {
            config: &self.config,
            state: self.state,
            surface,
        };
        let gated = self.drive.gate_on_start(&mut self.gate, &ctx);
        if gated || self.refresh_blocks_gesture() {
            trace!(gated, "touch-start ignored");
            return;
        }

        self.drive.on_gesture_start(&mut self.session, sample);
    }

    pub fn touch_move(&mut self, sample: TouchSample, surface: &dyn Surface) -> MoveOutcome {
        if !self.accepts_touch() {
            return MoveOutcome::default();
        }

        let ctx = GestureContext {
            config: &self.config,
            state: self.state,
            surface,
        };
        let gated = self.drive.gate_on_move(&mut self.gate, &ctx);
        if gated || self.refresh_blocks_gesture() {
            return MoveOutcome::default();
        }

        let prevent_default = self.drive.prevents_default(self.state);
        let Some(height) = self.drive.on_gesture_move(&self.session, sample, &ctx) else {
            return MoveOutcome {
                accepted: false,
                prevent_default,
            };
        };

        self.show_progress(height);
        MoveOutcome {
            accepted: true,
            prevent_default,
        }
    }

    /// Whether a touch-move arriving now must have its default prevented.
    /// Hosts that coalesce moves onto frames decide this synchronously.
    pub fn should_prevent_default(&self) -> bool {
        self.accepts_touch()
            && !self.gate.is_disabled()
            && !self.refresh_blocks_gesture()
            && self.drive.prevents_default(self.state)
    }

    pub fn touch_end(&mut self) {
        if !self.accepts_touch() {
            return;
        }

        let released = self.state;
        self.drive.on_gesture_end(&mut self.session);
        if !released.is_gesture() {
            return;
        }

        if self.should_refresh && !self.refresh_latched {
            self.push(Effect::Release);
            self.push(Effect::Pull { progress: 0.0 });
            self.enter_refreshing(true);
        } else if !self.is_refreshing {
            self.push(Effect::Release);
            self.push(Effect::Pull { progress: 0.0 });
            self.begin_reset();
        }
    }

    /// Observe the caller's `isRefreshing` prop. Only edges matter.
    pub fn set_refreshing(&mut self, is_refreshing: bool) {
        if self.is_refreshing == is_refreshing {
            return;
        }
        self.is_refreshing = is_refreshing;
        if !self.mounted || self.torn_down {
            return;
        }
        debug!(is_refreshing, state = %self.state, "refreshing prop changed");

        if is_refreshing {
            if self.state != PullState::Refreshing {
                self.enter_refreshing(false);
            }
            self.refresh_latched = true;
        } else {
            match self.state {
                PullState::Refreshing => self.begin_reset(),
                PullState::Complete => {}
                _ => self.refresh_latched = false,
            }
        }
    }

    pub fn set_disabled(&mut self, is_disabled: bool) {
        if self.is_disabled == is_disabled {
            return;
        }
        self.is_disabled = is_disabled;
        if self.torn_down {
            return;
        }
        debug!(is_disabled, "disabled flag changed");

        if is_disabled {
            self.force_reset();
            if self.attached {
                self.attached = false;
                self.push(Effect::DetachListeners);
            }
        } else if self.mounted {
            self.push(Effect::AttachListeners {
                touch_start: self.drive.needs_touch_start(),
            });
        }
    }

    /// A timer the host was asked to run has expired
    pub fn fire(&mut self, id: TaskId) {
        if self.torn_down {
            return;
        }
        let Some(task) = self.scheduler.take(id) else {
            trace!(task = %id, "stale task ignored");
            return;
        };
        trace!(task = %id, purpose = ?task.purpose, "task fired");

        match task.purpose {
            TaskPurpose::RefreshDelay => self.push(Effect::Refresh),
            TaskPurpose::CompleteDelay => {
                if self.state == PullState::Complete {
                    self.start_exit();
                }
            }
            TaskPurpose::HideSpinner => {
                if self.state == PullState::Refreshing {
                    self.hide_indicator();
                }
            }
            TaskPurpose::FadeOut => self.finish_exit(),
        }
    }

    /// View is going away: cancel everything, stop listening
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.cancel_all();
        self.torn_down = true;
        self.session.clear();
        if self.attached {
            self.attached = false;
            self.push(Effect::DetachListeners);
        }
        debug!("pull-to-refresh torn down");
    }

    fn show_progress(&mut self, height: f64) {
        let projection = project(height, &self.config);
        self.session.current_height = height;
        self.session.progress = projection.progress;

        if let Some(offset) = self.drive.pull_offset(height, &self.config) {
            self.push(Effect::TargetOffset { offset });
        }
        self.push(Effect::Pull {
            progress: projection.progress,
        });

        // Never skip `pulling` on the way to `triggerReady`
        self.transition(PullState::Pulling);
        if projection.trigger_ready {
            self.transition(PullState::TriggerReady);
        }
        self.should_refresh = projection.trigger_ready;

        self.push(Effect::ContainerOpacity {
            opacity: projection.opacity,
        });
        if let Some(degrees) = projection.rotation {
            self.push(Effect::SpinnerRotation { degrees });
        }
        self.push(Effect::SpinnerBump {
            enabled: projection.trigger_ready,
        });
    }

    fn enter_refreshing(&mut self, invoke_on_refresh: bool) {
        self.should_refresh = false;
        self.refresh_latched = true;
        self.session.clear();
        self.cancel_purpose(TaskPurpose::CompleteDelay);
        self.cancel_purpose(TaskPurpose::FadeOut);

        let hidden = self.config.is_spinner_hidden_during_refreshing;
        if invoke_on_refresh || !hidden {
            if let Some(value) = self.drive.refresh_transition() {
                self.push(Effect::TargetTransition {
                    value: value.to_string(),
                });
            }
            self.push(Effect::TargetOffset {
                offset: self.drive.refresh_offset(&self.config),
            });
            if !invoke_on_refresh {
                self.push(Effect::ContainerTransition { enabled: false });
                self.push(Effect::ContainerOpacity { opacity: 1.0 });
                self.push(Effect::SpinnerRotation {
                    degrees: SPINNER_SPIN_DEGREE,
                });
            }
        }

        if self.transition(PullState::Refreshing) && (invoke_on_refresh || !hidden) {
            self.push(Effect::SpinnerSpinning { enabled: true });
        }

        if hidden {
            self.schedule(TaskPurpose::HideSpinner, self.config.hide_delay_ms);
        }

        if invoke_on_refresh {
            if self.config.refresh_delay_ms == 0 {
                self.push(Effect::Refresh);
            } else {
                self.schedule(TaskPurpose::RefreshDelay, self.config.refresh_delay_ms);
            }
        }
    }

    /// Start returning to rest. From `refreshing` this reports `complete`
    /// and holds it for `complete_delay_ms` first; from a drag it reports
    /// `idle` straight away. Re-entry is a no-op.
    fn begin_reset(&mut self) {
        match self.state {
            PullState::Idle | PullState::Complete => {
                trace!(state = %self.state, "reset already underway");
            }
            PullState::Refreshing => {
                self.transition(PullState::Complete);
                self.cancel_purpose(TaskPurpose::HideSpinner);
                self.schedule(TaskPurpose::CompleteDelay, self.config.complete_delay_ms);
            }
            PullState::Pulling | PullState::TriggerReady => {
                self.should_refresh = false;
                self.transition(PullState::Idle);
                self.start_exit();
            }
        }
    }

    /// Fade the container out and move the element back to rest
    fn start_exit(&mut self) {
        self.cancel_purpose(TaskPurpose::FadeOut);
        self.push(Effect::ContainerTransition { enabled: true });
        self.push(Effect::ContainerOpacity { opacity: 0.0 });
        self.push(Effect::TargetTransition {
            value: self.drive.return_transition().to_string(),
        });
        self.push(Effect::TargetOffset {
            offset: self.drive.rest_offset(&self.config),
        });
        self.schedule(TaskPurpose::FadeOut, self.config.transition_duration_ms);
    }

    fn finish_exit(&mut self) {
        self.push(Effect::ContainerTransition { enabled: false });
        if self.state != PullState::Refreshing {
            self.push(Effect::TargetTransition {
                value: self.drive.pristine_transition().to_string(),
            });
        }
        self.refresh_latched = self.is_refreshing || self.state == PullState::Refreshing;

        if self.state == PullState::Complete {
            self.transition(PullState::Idle);
            self.push(Effect::SpinnerSpinning { enabled: false });
            self.push(Effect::SpinnerBump { enabled: false });
        }
    }

    fn hide_indicator(&mut self) {
        self.push(Effect::ContainerTransition { enabled: true });
        self.push(Effect::ContainerOpacity { opacity: 0.0 });
        self.push(Effect::TargetTransition {
            value: self.drive.return_transition().to_string(),
        });
        self.push(Effect::TargetOffset {
            offset: self.drive.rest_offset(&self.config),
        });
    }

    /// Drop everything in flight and snap back to rest without animation
    fn force_reset(&mut self) {
        self.cancel_all();
        self.should_refresh = false;
        self.session.clear();
        self.gate.clear();
        self.refresh_latched = self.is_refreshing;

        self.push(Effect::ContainerTransition { enabled: false });
        self.push(Effect::ContainerOpacity { opacity: 0.0 });
        self.push(Effect::SpinnerSpinning { enabled: false });
        self.push(Effect::SpinnerBump { enabled: false });
        self.push(Effect::TargetTransition {
            value: self.drive.pristine_transition().to_string(),
        });
        self.push(Effect::TargetOffset {
            offset: self.drive.rest_offset(&self.config),
        });
        self.transition(PullState::Idle);
    }

    /// Snap back to rest when a drag, a refresh or an exit animation still
    /// holds the element away from it
    fn reset_if_displaced(&mut self) {
        if !self.mounted || self.torn_down {
            return;
        }
        if self.state != PullState::Idle || self.scheduler.is_pending(TaskPurpose::FadeOut) {
            debug!(state = %self.state, "resetting displaced element");
            self.force_reset();
        }
    }

    /// Returns `true` when the state actually changed
    fn transition(&mut self, next: PullState) -> bool {
        if self.state == next {
            return false;
        }
        debug!(from = %self.state, to = %next, "state transition");
        self.state = next;
        self.push(Effect::StateChanged { state: next });
        true
    }

    fn schedule(&mut self, purpose: TaskPurpose, delay_ms: u64) {
        let task = self.scheduler.schedule(purpose, delay_ms);
        self.push(Effect::Schedule {
            task: task.id,
            purpose,
            delay_ms,
        });
    }

    fn cancel_purpose(&mut self, purpose: TaskPurpose) {
        for task in self.scheduler.cancel_purpose(purpose) {
            self.push(Effect::Cancel { task });
        }
    }

    fn cancel_all(&mut self) {
        for task in self.scheduler.cancel_all() {
            self.push(Effect::Cancel { task });
        }
    }

    fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }
}
