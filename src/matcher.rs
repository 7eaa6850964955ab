//! Answer matching against per-level accepted sets.

use std::collections::{HashMap, HashSet};

use crate::levels::{LevelDesc, levels};
use crate::normalize::normalize;

/// Lookup table of distinct normalized answers per level number.
#[derive(Clone, Debug, Default)]
pub struct AnswerMatcher {
    accepted: HashMap<u8, HashSet<String>>,
}

impl AnswerMatcher {
    /// Build from arbitrary level descriptors.
    pub fn from_levels<'a>(descs: impl IntoIterator<Item = &'a LevelDesc>) -> Self {
        let mut accepted: HashMap<u8, HashSet<String>> = HashMap::new();
        for desc in descs {
            let forms = accepted.entry(desc.level.number()).or_default();
            // An answer that normalizes to nothing would accept empty input.
            forms.extend(desc.accepted.iter().map(|a| normalize(a)).filter(|n| !n.is_empty()));
        }
        Self { accepted }
    }

    /// Distinct normalized forms accepted for a level (empty for unknown levels).
    pub fn accepted_forms(&self, level: u8) -> impl Iterator<Item = &str> {
        self.accepted.get(&level).into_iter().flatten().map(String::as_str)
    }

    /// `true` iff `input` normalizes to an accepted form of `level`. Unknown
    /// levels have no accepted answers.
    pub fn is_correct(&self, level: u8, input: &str) -> bool {
        let Some(forms) = self.accepted.get(&level) else {
            return false;
        };
        let candidate = normalize(input);
        !candidate.is_empty() && forms.contains(&candidate)
    }
}

/// Matcher over the built-in hunt levels, built once.
pub fn hunt_matcher() -> &'static AnswerMatcher {
    use std::sync::OnceLock;
    static MATCHER: OnceLock<AnswerMatcher> = OnceLock::new();
    MATCHER.get_or_init(|| AnswerMatcher::from_levels(levels().iter().copied()))
}
