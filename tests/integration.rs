// Integration tests (native) for the `silent-hunt` crate.
// A recording view stands in for the DOM and timers are fired by hand, so the
// whole flow from landing to certificate runs under `cargo test` on the host.

use chrono::NaiveDate;

use silent_hunt::error::CertificateError;
use silent_hunt::hunt::{EMPTY_ANSWER_MESSAGE, EMPTY_NAME_MESSAGE, WRONG_ANSWER_MESSAGE};
use silent_hunt::schedule::{Scheduled, TimerAction};
use silent_hunt::{
    Certificate, Hunt, HuntConfig, HuntView, KeyValueStorage, Landing, Level, MemoryStorage,
    Page, Progress, SubmitOutcome, is_answer_correct,
};

#[derive(Default)]
struct RecordingView {
    visible: Option<Page>,
    landing: Option<Landing>,
    messages: std::collections::HashMap<u8, String>,
    shaking: std::collections::HashSet<u8>,
    accepted: Vec<u8>,
    focused: Vec<Page>,
    certificate: Option<Certificate>,
    alerts: Vec<String>,
    timers: Vec<Scheduled>,
    inputs_cleared: usize,
}

impl RecordingView {
    fn message(&self, level: u8) -> &str {
        self.messages.get(&level).map(String::as_str).unwrap_or("")
    }
}

impl HuntView for RecordingView {
    fn show_page(&mut self, page: Page) {
        self.visible = Some(page);
    }
    fn render_landing(&mut self, landing: Landing) {
        self.landing = Some(landing);
    }
    fn show_message(&mut self, level: Level, message: Option<&str>) {
        match message {
            Some(m) => self.messages.insert(level.number(), m.to_owned()),
            None => self.messages.remove(&level.number()),
        };
    }
    fn mark_accepted(&mut self, level: Level) {
        self.accepted.push(level.number());
    }
    fn set_shaking(&mut self, level: Level, shaking: bool) {
        if shaking {
            self.shaking.insert(level.number());
        } else {
            self.shaking.remove(&level.number());
        }
    }
    fn focus_input(&mut self, page: Page) {
        self.focused.push(page);
    }
    fn show_certificate(&mut self, certificate: &Certificate) {
        self.certificate = Some(certificate.clone());
    }
    fn clear_inputs(&mut self) {
        self.certificate = None;
        self.inputs_cleared += 1;
    }
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_owned());
    }
    fn schedule(&mut self, timer: Scheduled) {
        self.timers.push(timer);
    }
}

type TestHunt = Hunt<MemoryStorage, RecordingView>;

fn level(n: u8) -> Level {
    Level::new(n).unwrap()
}

fn start(storage: &MemoryStorage) -> TestHunt {
    Hunt::start(HuntConfig::default(), storage.clone(), RecordingView::default())
}

/// Fire every armed timer whose action matches, in arming order.
fn fire_matching(hunt: &mut TestHunt, pred: impl Fn(&TimerAction) -> bool) {
    let timers: Vec<Scheduled> = hunt.view_mut().timers.drain(..).collect();
    for t in timers {
        if pred(&t.action) {
            hunt.fire(t.id);
        } else {
            hunt.view_mut().timers.push(t);
        }
    }
}

fn advance(hunt: &mut TestHunt) {
    fire_matching(hunt, |a| matches!(a, TimerAction::Advance { .. }));
}

fn first_answer(n: u8) -> &'static str {
    silent_hunt::levels::level_desc(n).unwrap().accepted[0]
}

fn solve(hunt: &mut TestHunt, n: u8) {
    assert!(matches!(hunt.submit(level(n), first_answer(n)), SubmitOutcome::Correct { .. }));
    advance(hunt);
}

#[test]
fn fresh_start_shows_landing_with_begin() {
    let hunt = start(&MemoryStorage::new());
    assert_eq!(hunt.active_page(), Page::Landing);
    assert_eq!(hunt.view().visible, Some(Page::Landing));
    assert_eq!(hunt.view().landing, Some(Landing::Fresh));
}

#[test]
fn begin_goes_to_level_one_and_focuses_later() {
    let mut hunt = start(&MemoryStorage::new());
    assert_eq!(hunt.begin(), Some(Page::Level(level(1))));
    assert_eq!(hunt.view().visible, Some(Page::Level(level(1))));
    assert!(hunt.view().focused.is_empty());
    fire_matching(&mut hunt, |a| matches!(a, TimerAction::FocusInput(_)));
    assert_eq!(hunt.view().focused, vec![Page::Level(level(1))]);
    // Already past the landing page.
    assert_eq!(hunt.begin(), None);
}

#[test]
fn correct_answer_persists_before_navigating() {
    let storage = MemoryStorage::new();
    let mut hunt = start(&storage);
    hunt.begin();
    let outcome = hunt.submit(level(1), "  Indian Coffee House ");
    assert_eq!(
        outcome,
        SubmitOutcome::Correct {
            next: Page::Level(level(2))
        }
    );
    assert!(hunt.progress().level1);
    assert_eq!(hunt.view().accepted, vec![1]);
    // Saved already, still on level 1 until the confirmation delay elapses.
    assert!(storage.raw("silentHuntProgress").unwrap().contains(r#""level1":true"#));
    assert_eq!(hunt.active_page(), Page::Level(level(1)));
    let advance_timer = hunt
        .view()
        .timers
        .iter()
        .find(|t| matches!(t.action, TimerAction::Advance { .. }))
        .copied()
        .unwrap();
    assert_eq!(advance_timer.delay_ms, 600);
    advance(&mut hunt);
    assert_eq!(hunt.active_page(), Page::Level(level(2)));
}

#[test]
fn wrong_answer_shows_transient_message() {
    let mut hunt = start(&MemoryStorage::new());
    hunt.begin();
    assert_eq!(hunt.submit(level(1), "starbucks"), SubmitOutcome::Incorrect);
    assert_eq!(hunt.view().message(1), WRONG_ANSWER_MESSAGE);
    assert!(hunt.view().shaking.contains(&1));
    assert_eq!(hunt.active_page(), Page::Level(level(1)));
    assert_eq!(*hunt.progress(), Progress::default());

    fire_matching(&mut hunt, |a| matches!(a, TimerAction::StopShake(_)));
    assert!(hunt.view().shaking.is_empty());
    assert_eq!(hunt.view().message(1), WRONG_ANSWER_MESSAGE);

    let clear = hunt
        .view()
        .timers
        .iter()
        .find(|t| matches!(t.action, TimerAction::ClearMessage(_)))
        .copied()
        .unwrap();
    assert_eq!(clear.delay_ms, 3000);
    hunt.fire(clear.id);
    assert_eq!(hunt.view().message(1), "");
}

#[test]
fn next_attempt_supersedes_stale_clear_timer() {
    let mut hunt = start(&MemoryStorage::new());
    hunt.begin();
    hunt.submit(level(1), "nope");
    let stale: Vec<Scheduled> = hunt.view_mut().timers.drain(..).collect();
    hunt.submit(level(1), "still nope");
    assert_eq!(hunt.view().message(1), WRONG_ANSWER_MESSAGE);
    // The first attempt's timers were cancelled; firing them changes nothing.
    for t in stale {
        hunt.fire(t.id);
    }
    assert_eq!(hunt.view().message(1), WRONG_ANSWER_MESSAGE);
    assert!(hunt.view().shaking.contains(&1));
}

#[test]
fn empty_answer_is_a_validation_error() {
    let mut hunt = start(&MemoryStorage::new());
    hunt.begin();
    assert_eq!(hunt.submit(level(1), "   "), SubmitOutcome::Empty);
    assert_eq!(hunt.view().message(1), EMPTY_ANSWER_MESSAGE);
    assert!(hunt.view().timers.iter().all(|t| matches!(t.action, TimerAction::FocusInput(_))));
    for n in 1..=5 {
        assert!(!is_answer_correct(n, ""));
    }
}

#[test]
fn submissions_for_inactive_levels_are_ignored() {
    let mut hunt = start(&MemoryStorage::new());
    assert_eq!(hunt.submit(level(1), first_answer(1)), SubmitOutcome::Ignored);
    hunt.begin();
    assert_eq!(hunt.submit(level(3), first_answer(3)), SubmitOutcome::Ignored);
    assert_eq!(*hunt.progress(), Progress::default());
}

#[test]
fn empty_enter_during_success_delay_still_advances() {
    let mut hunt = start(&MemoryStorage::new());
    hunt.begin();
    hunt.submit(level(1), first_answer(1));
    assert_eq!(hunt.submit(level(1), ""), SubmitOutcome::Empty);
    advance(&mut hunt);
    assert_eq!(hunt.active_page(), Page::Level(level(2)));
}

#[test]
fn progress_survives_reload() {
    let storage = MemoryStorage::new();
    let mut hunt = start(&storage);
    hunt.begin();
    solve(&mut hunt, 1);
    solve(&mut hunt, 2);
    drop(hunt);

    let mut reloaded = start(&storage);
    assert_eq!(reloaded.active_page(), Page::Landing);
    assert_eq!(reloaded.view().landing, Some(Landing::Resume(level(3))));
    assert_eq!(reloaded.begin(), Some(Page::Level(level(3))));
}

#[test]
fn corrupt_storage_starts_fresh() {
    let storage = MemoryStorage::new();
    storage.set_item("silentHuntProgress", "][").unwrap();
    let hunt = start(&storage);
    assert_eq!(*hunt.progress(), Progress::default());
    assert_eq!(hunt.view().landing, Some(Landing::Fresh));
}

#[test]
fn unavailable_storage_keeps_session_playable() {
    let storage = MemoryStorage::new();
    storage.set_fail_reads(true);
    storage.set_fail_writes(true);
    let mut hunt = start(&storage);
    hunt.begin();
    solve(&mut hunt, 1);
    assert!(hunt.progress().level1);
    assert_eq!(hunt.active_page(), Page::Level(level(2)));
    assert!(hunt.view().alerts.is_empty());
}

#[test]
fn last_level_routes_to_final_page() {
    let mut hunt = start(&MemoryStorage::new());
    hunt.begin();
    for n in 1..=4 {
        solve(&mut hunt, n);
    }
    assert_eq!(
        hunt.submit(level(5), "Punjab Engineering College"),
        SubmitOutcome::Correct { next: Page::Final }
    );
    advance(&mut hunt);
    assert_eq!(hunt.active_page(), Page::Final);
    assert!(hunt.progress().is_finished());
    assert_eq!(hunt.landing(), Landing::Finished);
}

#[test]
fn finished_hunt_resumes_at_final_page() {
    let storage = MemoryStorage::new();
    let mut done = Progress::default();
    for l in Level::all() {
        done.mark_complete(l);
    }
    storage
        .set_item("silentHuntProgress", &serde_json::to_string(&done).unwrap())
        .unwrap();
    let mut hunt = start(&storage);
    assert_eq!(hunt.view().landing, Some(Landing::Finished));
    assert_eq!(hunt.begin(), Some(Page::Final));
}

#[test]
fn certificate_requires_a_name() {
    let storage = MemoryStorage::new();
    let mut hunt = start(&storage);
    hunt.begin();
    for n in 1..=5 {
        solve(&mut hunt, n);
    }
    let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();

    assert_eq!(hunt.generate_certificate("   ", today).unwrap_err(), CertificateError::EmptyName);
    assert_eq!(hunt.view().alerts, vec![EMPTY_NAME_MESSAGE.to_owned()]);
    assert_eq!(hunt.active_page(), Page::Final);

    let cert = hunt.generate_certificate("  Ada Lovelace  ", today).unwrap().clone();
    assert_eq!(cert.name(), "Ada Lovelace");
    assert_eq!(cert.formatted_date(), "October 16, 2026");
    assert_eq!(hunt.active_page(), Page::Certificate);
    assert_eq!(hunt.view().certificate.as_ref(), Some(&cert));
    assert_eq!(hunt.certificate(), Some(&cert));
}

#[test]
fn certificate_unavailable_before_final_page() {
    let mut hunt = start(&MemoryStorage::new());
    hunt.begin();
    let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    assert_eq!(
        hunt.generate_certificate("Ada", today).unwrap_err(),
        CertificateError::NotFinished
    );
    assert_eq!(hunt.active_page(), Page::Level(level(1)));
    assert!(hunt.view().alerts.is_empty());
}

#[test]
fn start_over_clears_everything() {
    let storage = MemoryStorage::new();
    let mut hunt = start(&storage);
    hunt.begin();
    solve(&mut hunt, 1);
    hunt.submit(level(2), "wrong");
    let pending: Vec<Scheduled> = hunt.view_mut().timers.drain(..).collect();

    hunt.start_over();
    assert_eq!(*hunt.progress(), Progress::default());
    assert_eq!(hunt.active_page(), Page::Landing);
    assert_eq!(hunt.view().landing, Some(Landing::Fresh));
    assert_eq!(hunt.view().message(2), "");
    assert_eq!(hunt.view().inputs_cleared, 1);
    assert!(hunt.schedule().is_empty());
    assert_eq!(
        storage.raw("silentHuntProgress").as_deref(),
        Some(r#"{"level1":false,"level2":false,"level3":false,"level4":false,"level5":false}"#)
    );
    // Timers armed before the reset are stale.
    for t in pending {
        hunt.fire(t.id);
    }
    assert_eq!(hunt.active_page(), Page::Landing);
    assert_eq!(hunt.view().message(2), "");

    let reloaded = start(&storage);
    assert_eq!(reloaded.view().landing, Some(Landing::Fresh));
}

#[test]
fn start_over_after_certificate_blanks_it() {
    let mut hunt = start(&MemoryStorage::new());
    hunt.begin();
    for n in 1..=5 {
        solve(&mut hunt, n);
    }
    let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    hunt.generate_certificate("Ada", today).unwrap();
    assert!(hunt.view().certificate.is_some());

    hunt.start_over();
    assert_eq!(hunt.certificate(), None);
    assert_eq!(hunt.view().certificate, None);
    assert_eq!(hunt.view().inputs_cleared, 1);
    assert_eq!(hunt.view().landing, Some(Landing::Fresh));
}
