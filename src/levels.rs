//! Static hunt levels.
//!
//! Each level lives in its own file under `src/levels/` and carries its riddle
//! title plus the raw accepted answers. The set is fixed at build time; the
//! matcher only cares about the distinct normalized forms of those answers.

use std::fmt;

mod level1;
mod level2;
mod level3;
mod level4;
mod level5;

pub use level1::LEVEL1;
pub use level2::LEVEL2;
pub use level3::LEVEL3;
pub use level4::LEVEL4;
pub use level5::LEVEL5;

/// Number of riddle levels in the hunt.
pub const LEVEL_COUNT: u8 = 5;

/// A level identifier, always within `1..=LEVEL_COUNT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(u8);

impl Level {
    pub const FIRST: Level = Level(1);
    pub const LAST: Level = Level(LEVEL_COUNT);

    /// Returns `None` for numbers outside `1..=LEVEL_COUNT`.
    pub fn new(number: u8) -> Option<Level> {
        (1..=LEVEL_COUNT).contains(&number).then_some(Level(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// The following level, or `None` after the last one.
    pub fn next(self) -> Option<Level> {
        Level::new(self.0 + 1)
    }

    pub fn all() -> impl DoubleEndedIterator<Item = Level> {
        (1..=LEVEL_COUNT).map(Level)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level {}", self.0)
    }
}

/// Immutable level descriptor.
pub struct LevelDesc {
    pub level: Level,
    pub title: &'static str,
    pub accepted: &'static [&'static str],
}

/// All levels in hunt order.
pub fn levels() -> &'static [&'static LevelDesc] {
    static LEVELS: [&LevelDesc; LEVEL_COUNT as usize] =
        [&LEVEL1, &LEVEL2, &LEVEL3, &LEVEL4, &LEVEL5];
    &LEVELS
}

/// Descriptor lookup by raw level number.
pub fn level_desc(number: u8) -> Option<&'static LevelDesc> {
    levels().iter().copied().find(|d| d.level.number() == number)
}
