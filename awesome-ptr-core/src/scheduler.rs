//! Cancellable scheduled tasks
//!
//! The core never sleeps. It records what it wants to happen later, hands
//! the host a [`TaskId`] to time, and checks the task is still live when the
//! host reports it back.

use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(pub u64);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Why a task was scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPurpose {
    /// Deferred `onRefresh` call
    RefreshDelay,
    /// Hold `complete` before the exit animation starts
    CompleteDelay,
    /// Container fade finished; restore pristine styles
    FadeOut,
    /// Hide the indicator while refreshing
    HideSpinner,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTask {
    pub id: TaskId,
    pub purpose: TaskPurpose,
    pub delay_ms: u64,
    epoch: u64,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    epoch: u64,
    tasks: Vec<ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, purpose: TaskPurpose, delay_ms: u64) -> ScheduledTask {
        self.next_id += 1;
        let task = ScheduledTask {
            id: TaskId(self.next_id),
            purpose,
            delay_ms,
            epoch: self.epoch,
        };
        trace!(task = %task.id, ?purpose, delay_ms, "task scheduled");
        self.tasks.push(task.clone());
        task
    }

    /// Remove and return a fired task if it is still live
    pub fn take(&mut self, id: TaskId) -> Option<ScheduledTask> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        let task = self.tasks.remove(index);
        (task.epoch == self.epoch).then_some(task)
    }

    /// Cancel every pending task with the given purpose
    pub fn cancel_purpose(&mut self, purpose: TaskPurpose) -> Vec<TaskId> {
        let mut cancelled = Vec::new();
        self.tasks.retain(|t| {
            if t.purpose == purpose {
                cancelled.push(t.id);
                false
            } else {
                true
            }
        });
        cancelled
    }

    /// Cancel everything and invalidate the current session epoch
    pub fn cancel_all(&mut self) -> Vec<TaskId> {
        self.epoch += 1;
        self.tasks.drain(..).map(|t| t.id).collect()
    }

    pub fn is_pending(&self, purpose: TaskPurpose) -> bool {
        self.tasks.iter().any(|t| t.purpose == purpose)
    }

    pub fn pending(&self) -> &[ScheduledTask] {
        &self.tasks
    }
}
