//! Virtual-clock host
//!
//! Drives a [`PullToRefresh`] without a browser: layout reads come from a
//! [`SimSurface`], timers run on a simulated millisecond clock and every
//! effect is recorded with the time it was emitted. Used by the replay CLI
//! and by the integration tests.

use serde::Serialize;
use tracing::trace;

use crate::config::PullToRefreshConfig;
use crate::effect::{Effect, TargetOffset};
use crate::machine::{MoveOutcome, PullToRefresh};
use crate::scheduler::TaskId;
use crate::state::PullState;
use crate::{Result, Surface, TouchSample};

/// Upper bound for [`SimHost::settle`], far beyond any real delay chain
const SETTLE_LIMIT_MS: u64 = 600_000;

#[derive(Debug, Clone, PartialEq)]
pub struct SimSurface {
    pub target_top: Option<f64>,
    pub scroll_y: f64,
}

impl Default for SimSurface {
    fn default() -> Self {
        Self {
            target_top: Some(0.0),
            scroll_y: 0.0,
        }
    }
}

impl SimSurface {
    pub fn with_top(top: f64) -> Self {
        Self {
            target_top: Some(top),
            ..Default::default()
        }
    }

    pub fn unmounted() -> Self {
        Self {
            target_top: None,
            ..Default::default()
        }
    }
}

impl Surface for SimSurface {
    fn target_top(&self) -> Option<f64> {
        self.target_top
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }
}

/// An effect with the simulated time it was emitted at
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recorded {
    pub at_ms: u64,
    #[serde(flatten)]
    pub effect: Effect,
}

#[derive(Debug)]
struct Timer {
    due_ms: u64,
    task: TaskId,
}

#[derive(Debug)]
pub struct SimHost {
    pub core: PullToRefresh,
    pub surface: SimSurface,
    now_ms: u64,
    timers: Vec<Timer>,
    listening: bool,
    log: Vec<Recorded>,
}

impl SimHost {
    pub fn new(config: PullToRefreshConfig) -> Result<Self> {
        Ok(Self {
            core: PullToRefresh::new(config)?,
            surface: SimSurface::default(),
            now_ms: 0,
            timers: Vec::new(),
            listening: false,
            log: Vec::new(),
        })
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn state(&self) -> PullState {
        self.core.state()
    }

    /// Mount the view and attach listeners, as a component would
    pub fn mount(&mut self, is_refreshing: bool) {
        self.core.mount(is_refreshing);
        self.listening = self.core.attach();
        self.pump();
    }

    pub fn touch_start(&mut self, client_y: f64) {
        if self.listening {
            self.core.touch_start(TouchSample::new(client_y), &self.surface);
            self.pump();
        }
    }

    pub fn touch_move(&mut self, client_y: f64) -> MoveOutcome {
        if !self.listening {
            return MoveOutcome::default();
        }
        let outcome = self.core.touch_move(TouchSample::new(client_y), &self.surface);
        self.pump();
        outcome
    }

    /// Touch-move where the platform displaced the element natively: the
    /// element's top edge follows the finger delta.
    pub fn bounce_move(&mut self, start_y: f64, client_y: f64) -> MoveOutcome {
        self.surface.target_top = Some(client_y - start_y);
        self.touch_move(client_y)
    }

    pub fn touch_end(&mut self) {
        if self.listening {
            self.core.touch_end();
            self.pump();
        }
    }

    pub fn set_refreshing(&mut self, is_refreshing: bool) {
        self.core.set_refreshing(is_refreshing);
        self.pump();
    }

    pub fn set_disabled(&mut self, is_disabled: bool) {
        self.core.set_disabled(is_disabled);
        self.pump();
    }

    pub fn reconfigure(&mut self, config: PullToRefreshConfig) -> Result<()> {
        let result = self.core.reconfigure(config);
        self.pump();
        result
    }

    /// The tracked element was replaced: listeners move to the new one
    pub fn retarget(&mut self) {
        self.core.detach();
        self.listening = false;
        self.pump();
        self.listening = self.core.attach();
    }

    pub fn teardown(&mut self) {
        self.core.teardown();
        self.pump();
    }

    /// Most recent offset applied to the tracked element
    pub fn last_offset(&self) -> Option<TargetOffset> {
        self.effects()
            .filter_map(|e| match e {
                Effect::TargetOffset { offset } => Some(*offset),
                _ => None,
            })
            .last()
    }

    /// Move the clock forward, firing due timers in order
    pub fn advance(&mut self, ms: u64) {
        let until = self.now_ms + ms;
        while let Some(index) = self.next_due(until) {
            let timer = self.timers.remove(index);
            self.now_ms = timer.due_ms;
            trace!(at_ms = self.now_ms, task = %timer.task, "timer fired");
            self.core.fire(timer.task);
            self.pump();
        }
        self.now_ms = until;
    }

    /// Run timers until none are left
    pub fn settle(&mut self) {
        let limit = self.now_ms + SETTLE_LIMIT_MS;
        while let Some(due) = self.timers.iter().map(|t| t.due_ms).min() {
            if due > limit {
                break;
            }
            self.advance(due - self.now_ms);
        }
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn log(&self) -> &[Recorded] {
        &self.log
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    pub fn effects(&self) -> impl Iterator<Item = &Effect> {
        self.log.iter().map(|r| &r.effect)
    }

    /// `onChangeState` stream
    pub fn states(&self) -> Vec<PullState> {
        self.effects()
            .filter_map(|e| match e {
                Effect::StateChanged { state } => Some(*state),
                _ => None,
            })
            .collect()
    }

    /// `onPull` stream
    pub fn pulls(&self) -> Vec<f64> {
        self.effects()
            .filter_map(|e| match e {
                Effect::Pull { progress } => Some(*progress),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &Effect) -> usize {
        self.effects().filter(|e| *e == wanted).count()
    }

    /// Time the given state was first reported
    pub fn state_at(&self, state: PullState) -> Option<u64> {
        self.log
            .iter()
            .find(|r| r.effect == Effect::StateChanged { state })
            .map(|r| r.at_ms)
    }

    fn next_due(&self, until: u64) -> Option<usize> {
        self.timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until)
            .min_by_key(|(_, t)| (t.due_ms, t.task))
            .map(|(index, _)| index)
    }

    fn pump(&mut self) {
        for effect in self.core.drain_effects() {
            match &effect {
                Effect::Schedule { task, delay_ms, .. } => self.timers.push(Timer {
                    due_ms: self.now_ms + delay_ms,
                    task: *task,
                }),
                Effect::Cancel { task } => self.timers.retain(|t| t.task != *task),
                Effect::AttachListeners { .. } => self.listening = self.core.attach(),
                Effect::DetachListeners => self.listening = false,
                _ => {}
            }
            self.log.push(Recorded {
                at_ms: self.now_ms,
                effect,
            });
        }
    }
}
