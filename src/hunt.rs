//! Hunt controller.
//!
//! Owns the explicit session state (progress, active page, pending timers)
//! and drives a `HuntView`. Every user action and timer callback enters
//! through one method here, so the whole flow runs without a browser.

use chrono::NaiveDate;

use crate::certificate::Certificate;
use crate::config::HuntConfig;
use crate::error::CertificateError;
use crate::levels::Level;
use crate::matcher::{AnswerMatcher, hunt_matcher};
use crate::navigation::{Landing, Navigator, Page};
use crate::progress::{Progress, ProgressStore};
use crate::schedule::{Schedule, TimerAction, TimerId};
use crate::storage::KeyValueStorage;
use crate::view::HuntView;

pub const EMPTY_ANSWER_MESSAGE: &str = "Please enter an answer.";
pub const WRONG_ANSWER_MESSAGE: &str = "Not quite. Look closer.";
pub const EMPTY_NAME_MESSAGE: &str = "Please enter your name";
pub const RESET_CONFIRM_MESSAGE: &str = "This will reset your progress. Are you sure?";
pub const EXPORT_FAILED_MESSAGE: &str =
    "Error downloading certificate. Please try taking a screenshot instead.";

/// Result of submitting an answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The level is not the active page; nothing happened.
    Ignored,
    /// Blank input, validation message shown.
    Empty,
    Incorrect,
    /// Level marked complete and persisted; `next` is shown after the delay.
    Correct { next: Page },
}

pub struct Hunt<S, V> {
    config: HuntConfig,
    matcher: &'static AnswerMatcher,
    store: ProgressStore<S>,
    progress: Progress,
    navigator: Navigator,
    schedule: Schedule,
    certificate: Option<Certificate>,
    view: V,
}

impl<S: KeyValueStorage, V: HuntView> Hunt<S, V> {
    /// Load stored progress and show the landing page.
    pub fn start(config: HuntConfig, storage: S, view: V) -> Self {
        let store = ProgressStore::new(storage, config.storage_key.clone());
        let progress = store.load();
        let mut hunt = Self {
            config,
            matcher: hunt_matcher(),
            store,
            progress,
            navigator: Navigator::new(),
            schedule: Schedule::new(),
            certificate: None,
            view,
        };
        hunt.render_fresh();
        hunt
    }

    pub fn config(&self) -> &HuntConfig {
        &self.config
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn active_page(&self) -> Page {
        self.navigator.active()
    }

    pub fn landing(&self) -> Landing {
        Landing::from_progress(&self.progress)
    }

    pub fn certificate(&self) -> Option<&Certificate> {
        self.certificate.as_ref()
    }

    pub fn store(&self) -> &ProgressStore<S> {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    fn render_fresh(&mut self) {
        self.navigator.restart();
        let landing = self.landing();
        self.view.render_landing(landing);
        self.view.show_page(Page::Landing);
    }

    fn go(&mut self, page: Page) {
        self.navigator.show(page);
        self.view.show_page(page);
        if page.level().is_some() {
            let timer = self
                .schedule
                .schedule(self.config.focus_delay_ms, TimerAction::FocusInput(page));
            self.view.schedule(timer);
        }
    }

    /// Landing primary action ("Begin", "Continue", "View Your Certificate").
    /// Returns the page shown, or `None` when not on the landing page.
    pub fn begin(&mut self) -> Option<Page> {
        if !self.navigator.is_active(Page::Landing) {
            return None;
        }
        let target = self.landing().target();
        self.go(target);
        Some(target)
    }

    /// Check an answer for `level`.
    pub fn submit(&mut self, level: Level, raw: &str) -> SubmitOutcome {
        if !self.navigator.is_active(Page::Level(level)) {
            log::debug!("ignoring submission for inactive {level}");
            return SubmitOutcome::Ignored;
        }
        self.schedule.cancel_feedback(level);
        self.view.show_message(level, None);
        self.view.set_shaking(level, false);

        let answer = raw.trim();
        if answer.is_empty() {
            self.view.show_message(level, Some(EMPTY_ANSWER_MESSAGE));
            return SubmitOutcome::Empty;
        }

        if self.matcher.is_correct(level.number(), answer) {
            self.progress.mark_complete(level);
            // Persist before the navigation is even scheduled.
            self.store.save(&self.progress);
            self.view.mark_accepted(level);
            let next = Page::after(level);
            let advance = TimerAction::Advance {
                from: level,
                to: next,
            };
            let timer = self
                .schedule
                .schedule(self.config.advance_delay_ms, advance);
            self.view.schedule(timer);
            log::info!("{level} solved");
            SubmitOutcome::Correct { next }
        } else {
            self.view.show_message(level, Some(WRONG_ANSWER_MESSAGE));
            self.view.set_shaking(level, true);
            let shake = self
                .schedule
                .schedule(self.config.shake_ms, TimerAction::StopShake(level));
            self.view.schedule(shake);
            let clear = self
                .schedule
                .schedule(self.config.message_clear_ms, TimerAction::ClearMessage(level));
            self.view.schedule(clear);
            SubmitOutcome::Incorrect
        }
    }

    /// Timer callback. Stale or cancelled ids are ignored.
    pub fn fire(&mut self, id: TimerId) {
        let Some(action) = self.schedule.take(id) else {
            log::debug!("stale timer {}", id.raw());
            return;
        };
        match action {
            TimerAction::Advance { from, to } => {
                if self.navigator.is_active(Page::Level(from)) {
                    self.go(to);
                }
            }
            TimerAction::ClearMessage(level) => self.view.show_message(level, None),
            TimerAction::StopShake(level) => self.view.set_shaking(level, false),
            TimerAction::FocusInput(page) => {
                if self.navigator.is_active(page) {
                    self.view.focus_input(page);
                }
            }
        }
    }

    /// Final page → certificate page.
    ///
    /// # Errors
    ///
    /// `NotFinished` outside the final page; `EmptyName` (after alerting the
    /// user) for a blank name. Neither changes the active page.
    pub fn generate_certificate(
        &mut self,
        name: &str,
        today: NaiveDate,
    ) -> Result<&Certificate, CertificateError> {
        if !self.navigator.is_active(Page::Final) {
            return Err(CertificateError::NotFinished);
        }
        let certificate = match Certificate::generate(name, today) {
            Ok(c) => c,
            Err(err) => {
                self.view.alert(EMPTY_NAME_MESSAGE);
                return Err(err);
            }
        };
        self.view.show_certificate(&certificate);
        self.go(Page::Certificate);
        Ok(&*self.certificate.insert(certificate))
    }

    /// Full reset: clear and persist progress, drop pending timers and return
    /// to a freshly started landing page.
    pub fn start_over(&mut self) {
        self.progress = self.store.reset();
        self.schedule.clear();
        self.certificate = None;
        for level in Level::all() {
            self.view.show_message(level, None);
            self.view.set_shaking(level, false);
        }
        self.view.clear_inputs();
        log::info!("progress reset");
        self.render_fresh();
    }
}
