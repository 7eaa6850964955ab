//! Page state machine.
//!
//! Exactly one `Page` is active at a time. The navigator only tracks which
//! one; side effects (persistence, rendering, timers) belong to `Hunt`.

use std::fmt;

use crate::levels::Level;
use crate::progress::Progress;

/// A single visible view of the hunt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Page {
    Landing,
    Level(Level),
    Final,
    Certificate,
}

impl Page {
    /// DOM id of the page container.
    pub fn element_id(self) -> String {
        match self {
            Page::Landing => "landing".into(),
            Page::Level(level) => format!("level{}", level.number()),
            Page::Final => "final".into(),
            Page::Certificate => "certificate".into(),
        }
    }

    /// Where a correct answer on `level` leads.
    pub fn after(level: Level) -> Page {
        level.next().map_or(Page::Final, Page::Level)
    }

    pub fn level(self) -> Option<Level> {
        match self {
            Page::Level(level) => Some(level),
            _ => None,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.element_id())
    }
}

/// Landing page variant derived from stored progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Landing {
    /// Nothing solved yet: "Begin".
    Fresh,
    /// Some levels solved: "Continue Journey (Level N)" plus "Start Over".
    Resume(Level),
    /// Hunt solved: "View Your Certificate" plus "Start Over".
    Finished,
}

impl Landing {
    pub fn from_progress(progress: &Progress) -> Landing {
        match progress.last_completed() {
            None => Landing::Fresh,
            Some(last) => match last.next() {
                Some(next) => Landing::Resume(next),
                None => Landing::Finished,
            },
        }
    }

    /// Page reached by the landing's primary action.
    pub fn target(self) -> Page {
        match self {
            Landing::Fresh => Page::Level(Level::FIRST),
            Landing::Resume(level) => Page::Level(level),
            Landing::Finished => Page::Final,
        }
    }

    /// Whether the destructive "Start Over" action is offered.
    pub fn offers_start_over(self) -> bool {
        !matches!(self, Landing::Fresh)
    }
}

/// A completed page switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: Page,
    pub to: Page,
}

#[derive(Debug)]
pub struct Navigator {
    active: Page,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            active: Page::Landing,
        }
    }

    pub fn active(&self) -> Page {
        self.active
    }

    pub fn is_active(&self, page: Page) -> bool {
        self.active == page
    }

    /// Switch the active page; the previous one is implicitly deactivated.
    pub fn show(&mut self, page: Page) -> Transition {
        let from = std::mem::replace(&mut self.active, page);
        log::debug!("navigate {from} -> {page}");
        Transition { from, to: page }
    }

    /// Back to a freshly started session.
    pub fn restart(&mut self) {
        self.active = Page::Landing;
    }
}
