// Hunt Level 1 definition
// This file contains the LEVEL1 static LevelDesc and its accepted answers.
use super::{Level, LevelDesc};

pub static LEVEL1: LevelDesc = LevelDesc {
    level: Level::FIRST,
    title: "Brewed Memories",
    accepted: &["Indian Coffee House", "Coffee House", "INC"],
};
