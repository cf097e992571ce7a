use crate::errors::MarkovError;
use geo_types::{coord, Coord};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Which way the brush moves on a tick. `Pause` stays put. `Jump` does not move by
/// itself; it makes the walker draw a second direction and move that way by the
/// jump distance instead of one unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "N")]
    North = 0,
    #[serde(rename = "E")]
    East = 1,
    #[serde(rename = "S")]
    South = 2,
    #[serde(rename = "W")]
    West = 3,
    #[serde(rename = "P")]
    Pause = 4,
    #[serde(rename = "J")]
    Jump = 5,
}

/// Unit displacement per direction, indexed by discriminant. North is +y.
const UNIT_DISPLACEMENT: [(f64, f64); 6] = [
    (0.0, 1.0),
    (1.0, 0.0),
    (0.0, -1.0),
    (-1.0, 0.0),
    (0.0, 0.0),
    (0.0, 0.0),
];

const CODES: [&str; 6] = ["N", "E", "S", "W", "P", "J"];

const NAMES: [&str; 6] = ["north", "east", "south", "west", "pause", "jump"];

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::Pause,
        Direction::Jump,
    ];

    /// The offset this direction produces when applied with `magnitude`.
    pub fn displacement(self, magnitude: f64) -> Coord<f64> {
        let (dx, dy) = UNIT_DISPLACEMENT[self as usize];
        coord! {x: dx * magnitude, y: dy * magnitude}
    }

    /// Single letter code, as used in config files.
    pub fn code(self) -> &'static str {
        CODES[self as usize]
    }

    pub fn name(self) -> &'static str {
        NAMES[self as usize]
    }

    pub fn moves(self) -> bool {
        UNIT_DISPLACEMENT[self as usize] != (0.0, 0.0)
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Direction {
    type Err = MarkovError;

    /// Accepts the letter code or the full name, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .iter()
            .copied()
            .find(|dir| dir.code().eq_ignore_ascii_case(s) || dir.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| MarkovError::UnknownState(format!("direction label {}", s)))
    }
}
