// Hunt Level 4 definition
use super::{Level, LevelDesc};

pub static LEVEL4: LevelDesc = LevelDesc {
    level: Level(4),
    title: "Wings in the Garden",
    accepted: &["Bird Park"],
};
