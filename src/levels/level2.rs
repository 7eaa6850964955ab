// Hunt Level 2 definition
use super::{Level, LevelDesc};

pub static LEVEL2: LevelDesc = LevelDesc {
    level: Level(2),
    title: "The Giving Palm",
    accepted: &[
        "Open Hand",
        "Open Hand Monument",
        "Capitol Complex",
        // Common misspelling, accepted.
        "Capitol Comlex",
    ],
};
