// Hunt Level 5 definition
// Final riddle; completing it routes to the certificate page.
use super::{Level, LevelDesc};

pub static LEVEL5: LevelDesc = LevelDesc {
    level: Level::LAST,
    title: "Halls of Engineers",
    accepted: &[
        "PEC",
        "Punjab Engineering College",
        "Punjab Engg College",
        "Punjab Enginnering College",
    ],
};
