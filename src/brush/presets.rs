//! Built-in transition tables.
//!
//! The direction and color tables are the classic MarkovBrush ones: a drifting walk
//! that mostly keeps its heading, a clockwise "spiral" variation, and six colors
//! that tend to stay put and drift toward their neighbours.

use super::labels::{AuxLabel, ColorLabel};
use crate::chain::TransitionTable;
use crate::walker::Direction::{self, *};
use std::str::FromStr;

pub const COLORS: [&str; 6] = ["blue", "green", "red", "cyan", "magenta", "yellow"];

/// Each direction keeps going half the time. Pause never follows Pause and Jump
/// never follows Jump.
pub fn drift_directions() -> TransitionTable<Direction> {
    TransitionTable::from_weights(vec![
        (North, vec![(North, 0.5), (East, 0.1), (South, 0.1), (West, 0.1), (Pause, 0.1), (Jump, 0.1)]),
        (East, vec![(North, 0.1), (East, 0.5), (South, 0.1), (West, 0.1), (Pause, 0.1), (Jump, 0.1)]),
        (South, vec![(North, 0.1), (East, 0.1), (South, 0.5), (West, 0.1), (Pause, 0.1), (Jump, 0.1)]),
        (West, vec![(North, 0.1), (East, 0.1), (South, 0.1), (West, 0.5), (Pause, 0.1), (Jump, 0.1)]),
        (Pause, vec![(North, 0.2), (East, 0.2), (South, 0.2), (West, 0.2), (Pause, 0.0), (Jump, 0.2)]),
        (Jump, vec![(North, 0.2), (East, 0.2), (South, 0.2), (West, 0.2), (Pause, 0.2), (Jump, 0.0)]),
    ])
    .expect("built-in drift table is valid")
}

/// Each direction almost always turns clockwise, and never reverses.
pub fn spiral_directions() -> TransitionTable<Direction> {
    TransitionTable::from_weights(vec![
        (North, vec![(North, 0.02), (East, 0.9), (South, 0.0), (West, 0.02), (Pause, 0.02), (Jump, 0.04)]),
        (East, vec![(North, 0.02), (East, 0.02), (South, 0.9), (West, 0.0), (Pause, 0.02), (Jump, 0.04)]),
        (South, vec![(North, 0.0), (East, 0.02), (South, 0.02), (West, 0.9), (Pause, 0.02), (Jump, 0.04)]),
        (West, vec![(North, 0.9), (East, 0.0), (South, 0.02), (West, 0.02), (Pause, 0.02), (Jump, 0.04)]),
        (Pause, vec![(North, 0.2), (East, 0.2), (South, 0.2), (West, 0.2), (Pause, 0.0), (Jump, 0.2)]),
        (Jump, vec![(North, 0.2), (East, 0.2), (South, 0.2), (West, 0.2), (Pause, 0.2), (Jump, 0.0)]),
    ])
    .expect("built-in spiral table is valid")
}

pub fn six_colors() -> TransitionTable<ColorLabel> {
    let rows: [(&str, [f64; 6]); 6] = [
        ("blue", [0.5, 0.15, 0.05, 0.2, 0.05, 0.05]),
        ("green", [0.2, 0.5, 0.05, 0.05, 0.15, 0.05]),
        ("red", [0.05, 0.15, 0.5, 0.05, 0.2, 0.05]),
        ("cyan", [0.2, 0.15, 0.05, 0.5, 0.05, 0.05]),
        ("magenta", [0.05, 0.05, 0.2, 0.15, 0.5, 0.05]),
        ("yellow", [0.05, 0.2, 0.15, 0.05, 0.05, 0.5]),
    ];
    TransitionTable::from_weights(
        rows.iter()
            .map(|(from, weights)| {
                let row = COLORS
                    .iter()
                    .zip(weights.iter())
                    .map(|(to, weight)| (ColorLabel::from(*to), *weight))
                    .collect();
                (ColorLabel::from(*from), row)
            })
            .collect(),
    )
    .expect("built-in color table is valid")
}

/// Two-state brush pressure. Heavy strokes come in runs.
pub fn pressure() -> TransitionTable<AuxLabel> {
    TransitionTable::from_weights(vec![
        ("light".into(), vec![("light".into(), 0.8), ("heavy".into(), 0.2)]),
        ("heavy".into(), vec![("light".into(), 0.4), ("heavy".into(), 0.6)]),
    ])
    .expect("built-in pressure table is valid")
}

/// Cycles through glyph shapes, named so the palette can draw them directly.
pub fn textures() -> TransitionTable<AuxLabel> {
    TransitionTable::from_weights(vec![
        ("circle".into(), vec![("circle".into(), 0.7), ("square".into(), 0.2), ("diamond".into(), 0.1)]),
        ("square".into(), vec![("circle".into(), 0.1), ("square".into(), 0.7), ("diamond".into(), 0.2)]),
        ("diamond".into(), vec![("circle".into(), 0.2), ("square".into(), 0.1), ("diamond".into(), 0.7)]),
    ])
    .expect("built-in texture table is valid")
}

/// Named starting points for a brush config.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Preset {
    #[default]
    Drift,
    Spiral,
    Textured,
}

impl Preset {
    pub fn directions(self) -> TransitionTable<Direction> {
        match self {
            Preset::Drift | Preset::Textured => drift_directions(),
            Preset::Spiral => spiral_directions(),
        }
    }

    pub fn auxiliary(self) -> TransitionTable<AuxLabel> {
        match self {
            Preset::Drift | Preset::Spiral => pressure(),
            Preset::Textured => textures(),
        }
    }

    /// A label from the auxiliary table to start on.
    pub fn initial_auxiliary(self) -> AuxLabel {
        match self {
            Preset::Drift | Preset::Spiral => "light".into(),
            Preset::Textured => "circle".into(),
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "drift" => Ok(Preset::Drift),
            "spiral" => Ok(Preset::Spiral),
            "textured" => Ok(Preset::Textured),
            other => Err(format!("unknown preset {:?} (drift, spiral, textured)", other)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_presets_build() {
        for preset in [Preset::Drift, Preset::Spiral, Preset::Textured] {
            assert_eq!(preset.directions().len(), 6);
            assert!(preset.auxiliary().contains(&preset.initial_auxiliary()));
        }
        assert_eq!(six_colors().len(), 6);
    }

    #[test]
    fn test_color_rows_keep_column_order() {
        let colors = six_colors();
        let row = colors.row(&"green".into()).unwrap();
        let order: Vec<&str> = row.labels().map(|l| l.as_str()).collect();
        assert_eq!(order, COLORS.to_vec());
        assert_eq!(row.weight(&"blue".into()), Some(0.2));
    }

    #[test]
    fn test_spiral_turns_clockwise() {
        let spiral = spiral_directions();
        assert_eq!(spiral.row(&North).unwrap().weight(&East), Some(0.9));
        assert_eq!(spiral.row(&West).unwrap().weight(&North), Some(0.9));
    }

    #[test]
    fn test_parse_preset() {
        assert_eq!("Spiral".parse::<Preset>(), Ok(Preset::Spiral));
        assert!("zigzag".parse::<Preset>().is_err());
    }
}
