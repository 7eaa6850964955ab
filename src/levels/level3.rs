// Hunt Level 3 definition
use super::{Level, LevelDesc};

pub static LEVEL3: LevelDesc = LevelDesc {
    level: Level(3),
    title: "Glass and Glitter",
    accepted: &["Elante", "Elante Mall"],
};
