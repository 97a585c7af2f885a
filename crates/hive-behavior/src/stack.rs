//! `TaskStack`: an agent's layered tasks.
//!
//! The bottom frame is the long-lived task its mission assigned; frames
//! pushed above it are short sub-tasks (refuel, clear a pile, …).  When the
//! top frame becomes invalid it is popped and the frame beneath resumes, so
//! a fine-grained task falls back to a coarser one without any nesting in
//! the records themselves.

use serde::{Deserialize, Serialize};
use tracing::debug;

use hive_world::{Agent, World};

use crate::BehaviorRecord;

/// Ordered task frames; the last element is the current task.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskStack {
    frames: Vec<BehaviorRecord>,
}

impl TaskStack {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// The current frame without any validity check.
    pub fn top(&self) -> Option<&BehaviorRecord> {
        self.frames.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut BehaviorRecord> {
        self.frames.last_mut()
    }

    /// The mission-assigned frame.
    pub fn base(&self) -> Option<&BehaviorRecord> {
        self.frames.first()
    }

    pub fn frames(&self) -> &[BehaviorRecord] {
        &self.frames
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Replace the whole stack with `record`, unless the base frame already
    /// describes the same task.  Returns `true` if anything changed.
    ///
    /// Leaving an unchanged task alone keeps its assignment tick (and so its
    /// timeout) and any sub-tasks layered above it.
    pub fn assign(&mut self, record: BehaviorRecord) -> bool {
        if self.base().is_some_and(|b| b.same_task(&record)) {
            return false;
        }
        self.frames.clear();
        self.frames.push(record);
        true
    }

    /// Layer a sub-task over the current one, unless the top frame already
    /// describes the same task.  Returns `true` if pushed.
    pub fn push(&mut self, record: BehaviorRecord) -> bool {
        if self.top().is_some_and(|t| t.same_task(&record)) {
            return false;
        }
        self.frames.push(record);
        true
    }

    /// Walk from the top down, popping invalid frames, and return the first
    /// valid one.  `None` leaves the stack empty.
    pub fn current(&mut self, agent: &Agent, world: &dyn World) -> Option<&BehaviorRecord> {
        while let Some(top) = self.frames.last() {
            if top.is_valid(agent, world) {
                break;
            }
            debug!(agent = %agent.name, behavior = %top.kind, assigned = %top.tick, "task frame expired");
            self.frames.pop();
        }
        self.frames.last()
    }
}
