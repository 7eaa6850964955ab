//! Delayed UI effects with cancellable identifiers.
//!
//! `Hunt` registers every delayed effect here and hands the resulting
//! `Scheduled` to the view, which arms a real timer and calls back with the
//! id. Cancelling only forgets the id: the real timer still fires and
//! finds nothing to do.

use std::collections::BTreeMap;

use crate::levels::Level;
use crate::navigation::Page;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u32);

impl TimerId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// What happens when a timer fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerAction {
    /// Leave a solved level once the success highlight has been seen.
    Advance { from: Level, to: Page },
    ClearMessage(Level),
    StopShake(Level),
    FocusInput(Page),
}

impl TimerAction {
    /// Level whose mismatch feedback this timer belongs to.
    fn feedback_level(&self) -> Option<Level> {
        match *self {
            TimerAction::ClearMessage(level) | TimerAction::StopShake(level) => Some(level),
            TimerAction::Advance { .. } | TimerAction::FocusInput(_) => None,
        }
    }
}

/// A registered timer request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scheduled {
    pub id: TimerId,
    pub delay_ms: u32,
    pub action: TimerAction,
}

#[derive(Debug, Default)]
pub struct Schedule {
    next_id: u32,
    pending: BTreeMap<TimerId, TimerAction>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, delay_ms: u32, action: TimerAction) -> Scheduled {
        self.next_id = self.next_id.wrapping_add(1);
        let id = TimerId(self.next_id);
        self.pending.insert(id, action);
        Scheduled {
            id,
            delay_ms,
            action,
        }
    }

    /// Remove and return the action for a fired timer; `None` if stale.
    pub fn take(&mut self, id: TimerId) -> Option<TimerAction> {
        self.pending.remove(&id)
    }

    /// Drop pending message/shake timers of `level`. A pending `Advance` is
    /// kept so a solved level always moves on. Returns how many were dropped.
    pub fn cancel_feedback(&mut self, level: Level) -> usize {
        let before = self.pending.len();
        self.pending.retain(|_, action| action.feedback_level() != Some(level));
        before - self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn pending(&self) -> impl Iterator<Item = (TimerId, &TimerAction)> {
        self.pending.iter().map(|(id, action)| (*id, action))
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
