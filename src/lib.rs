//! The Silent Hunt core crate.
//!
//! A five-level riddle hunt played in the browser: free-text answers are
//! normalized and checked against per-level accepted sets, progress survives
//! reloads through localStorage, and finishing the hunt unlocks a named,
//! dated certificate that can be downloaded as an image.
//!
//! Everything except `web` is plain Rust and runs under native `cargo test`;
//! `web` binds the `Hunt` controller to the page DOM.

use wasm_bindgen::prelude::*;

pub mod certificate;
pub mod config;
pub mod error;
pub mod export;
pub mod hunt;
pub mod levels;
pub mod matcher;
pub mod navigation;
pub mod normalize;
pub mod progress;
pub mod schedule;
pub mod storage;
pub mod view;
pub mod web;

pub use certificate::Certificate;
pub use config::HuntConfig;
pub use hunt::{Hunt, SubmitOutcome};
pub use levels::{LEVEL_COUNT, Level};
pub use matcher::AnswerMatcher;
pub use navigation::{Landing, Page};
pub use normalize::normalize;
pub use progress::{Progress, ProgressStore};
pub use storage::{KeyValueStorage, MemoryStorage};
pub use view::HuntView;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Answer check exposed to JS for pages that validate outside the hunt flow.
#[wasm_bindgen]
pub fn is_answer_correct(level: u8, answer: &str) -> bool {
    matcher::hunt_matcher().is_correct(level, answer)
}
