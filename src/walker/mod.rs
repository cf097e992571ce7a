//! The walker module drives the brush. A [`MarkovWalker`] owns three independent
//! attribute chains (direction, color, auxiliary) and turns them into a [`Path`]:
//! every tick it advances each chain once, resolves the sampled direction into a
//! displacement, and records where the brush ended up.

use crate::chain::{AttributeChain, TransitionTable};
use crate::errors::MarkovError;
use crate::sampler::{Label, Sampler};
use geo_types::{coord, Coord};
use serde::{Deserialize, Serialize};

pub mod direction;
pub use direction::Direction;

pub mod path;
pub use path::{Path, PathRecord};

/// Which direction the walker remembers after a Jump.
///
/// A Jump tick draws twice from the direction chain: first the Jump itself, then a
/// landing direction from the Jump row. The landing direction is what moves the
/// brush either way; the policy only decides which label the *next* tick's
/// direction draw is conditioned on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpPolicy {
    /// The next tick continues from the landing direction.
    #[default]
    FollowLanding,
    /// The next tick continues from the Jump row.
    RememberJump,
}

/// The current label of each chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkerState<C, A> {
    pub direction: Direction,
    pub color: C,
    pub auxiliary: A,
}

impl<C, A> WalkerState<C, A> {
    pub fn new(direction: Direction, color: C, auxiliary: A) -> Self {
        WalkerState {
            direction,
            color,
            auxiliary,
        }
    }
}

/// What a single tick decided about movement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    /// First direction drawn this tick.
    pub sampled: Direction,
    /// Direction actually applied. Differs from `sampled` only after a Jump.
    pub applied: Direction,
    pub magnitude: f64,
    pub displacement: Coord<f64>,
}

/// # MarkovWalker
///
/// Generates paths from three transition tables. The tables never change; the
/// only mutable state is the [`WalkerState`] threaded through a walk, and the
/// random stream lives in the [`Sampler`] handed to each call.
///
/// # Example
///
/// ```rust
/// use markov_brush::chain::TransitionTable;
/// use markov_brush::sampler::WeightedChoiceSampler;
/// use markov_brush::walker::{Direction, MarkovWalker};
/// use Direction::*;
///
/// let directions = TransitionTable::from_weights(
///     Direction::ALL
///         .iter()
///         .map(|from| (*from, Direction::ALL.iter().map(|to| (*to, 1.0 / 6.0)).collect()))
///         .collect(),
/// ).unwrap();
/// let colors = TransitionTable::from_weights(vec![
///     ("black", vec![("black", 0.9), ("red", 0.1)]),
///     ("red", vec![("black", 0.5), ("red", 0.5)]),
/// ]).unwrap();
/// let sizes = TransitionTable::from_weights(vec![(1u8, vec![(1u8, 1.0)])]).unwrap();
///
/// let walker = MarkovWalker::new(directions, colors, sizes);
/// let mut sampler = WeightedChoiceSampler::seeded(42);
/// let path = walker.generate(&mut sampler, North, "black", 1u8, 250, 10.0).unwrap();
/// assert_eq!(path.len(), 250);
/// ```
#[derive(Clone, Debug)]
pub struct MarkovWalker<C, A> {
    directions: AttributeChain<Direction>,
    colors: AttributeChain<C>,
    auxiliary: AttributeChain<A>,
    jump_policy: JumpPolicy,
}

impl<C: Label, A: Label> MarkovWalker<C, A> {
    pub fn new(
        directions: TransitionTable<Direction>,
        colors: TransitionTable<C>,
        auxiliary: TransitionTable<A>,
    ) -> Self {
        MarkovWalker {
            directions: AttributeChain::new("direction", directions),
            colors: AttributeChain::new("color", colors),
            auxiliary: AttributeChain::new("auxiliary", auxiliary),
            jump_policy: JumpPolicy::default(),
        }
    }

    pub fn with_jump_policy(mut self, jump_policy: JumpPolicy) -> Self {
        self.jump_policy = jump_policy;
        self
    }

    pub fn jump_policy(&self) -> JumpPolicy {
        self.jump_policy
    }

    /// Generate a fresh path of `step_count` records starting from (0, 0).
    ///
    /// Fails with `InvalidParameter` if `step_count` is zero or `jump_distance` is
    /// negative or not finite, and with `UnknownState` if a starting label has no
    /// row. Any failure part way through discards the whole walk.
    pub fn generate<S: Sampler>(
        &self,
        sampler: &mut S,
        initial_direction: Direction,
        initial_color: C,
        initial_auxiliary: A,
        step_count: usize,
        jump_distance: f64,
    ) -> Result<Path<C, A>, MarkovError> {
        let mut state = WalkerState::new(initial_direction, initial_color, initial_auxiliary);
        self.walk(sampler, &mut state, step_count, jump_distance)
    }

    /// Like [`MarkovWalker::generate`], but continues from a caller-held state.
    /// `state` is only updated if the whole walk succeeds.
    pub fn walk<S: Sampler>(
        &self,
        sampler: &mut S,
        state: &mut WalkerState<C, A>,
        step_count: usize,
        jump_distance: f64,
    ) -> Result<Path<C, A>, MarkovError> {
        check_parameters(step_count, jump_distance)?;
        self.directions.ensure_known(&state.direction)?;
        self.colors.ensure_known(&state.color)?;
        self.auxiliary.ensure_known(&state.auxiliary)?;

        let mut current = state.clone();
        let mut position = coord! {x: 0.0, y: 0.0};
        let mut records = Vec::with_capacity(step_count);
        for _ in 0..step_count {
            let tick = self.step(sampler, &mut current, jump_distance)?;
            position = position + tick.displacement;
            records.push(PathRecord {
                x: position.x,
                y: position.y,
                color: current.color.clone(),
                auxiliary: current.auxiliary.clone(),
            });
        }
        *state = current;
        Ok(Path::from_records(records))
    }

    /// Advance every chain by one tick and work out the movement.
    ///
    /// Draw order is direction, color, auxiliary, then the landing direction if the
    /// first draw was a Jump. `state` is left untouched on error.
    pub fn step<S: Sampler>(
        &self,
        sampler: &mut S,
        state: &mut WalkerState<C, A>,
        jump_distance: f64,
    ) -> Result<Tick, MarkovError> {
        let sampled = self.directions.advance(&state.direction, sampler)?;
        let color = self.colors.advance(&state.color, sampler)?;
        let auxiliary = self.auxiliary.advance(&state.auxiliary, sampler)?;

        let (applied, magnitude, remembered) = if sampled == Direction::Jump {
            let landing = self.directions.advance(&sampled, sampler)?;
            let remembered = match self.jump_policy {
                JumpPolicy::FollowLanding => landing,
                JumpPolicy::RememberJump => Direction::Jump,
            };
            (landing, jump_distance, remembered)
        } else {
            (sampled, 1.0, sampled)
        };

        state.direction = remembered;
        state.color = color;
        state.auxiliary = auxiliary;
        Ok(Tick {
            sampled,
            applied,
            magnitude,
            displacement: applied.displacement(magnitude),
        })
    }
}

fn check_parameters(step_count: usize, jump_distance: f64) -> Result<(), MarkovError> {
    if step_count == 0 {
        return Err(MarkovError::InvalidParameter(
            "step count must be at least 1".to_string(),
        ));
    }
    if !jump_distance.is_finite() || jump_distance < 0.0 {
        return Err(MarkovError::InvalidParameter(format!(
            "jump distance must be a non-negative number, got {}",
            jump_distance
        )));
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::Direction::*;
    use super::*;
    use crate::brush::presets::drift_directions;
    use crate::sampler::{ScriptedSampler, WeightedChoiceSampler};
    use proptest::prelude::*;

    const COLORS: [&str; 6] = ["blue", "green", "red", "cyan", "magenta", "yellow"];

    fn symmetric_colors() -> TransitionTable<&'static str> {
        TransitionTable::from_weights(
            COLORS
                .iter()
                .map(|from| {
                    let row = COLORS
                        .iter()
                        .map(|to| (*to, if from == to { 0.5 } else { 0.1 }))
                        .collect();
                    (*from, row)
                })
                .collect(),
        )
        .unwrap()
    }

    fn two_state() -> TransitionTable<char> {
        TransitionTable::from_weights(vec![
            ('A', vec![('A', 0.7), ('B', 0.3)]),
            ('B', vec![('A', 0.4), ('B', 0.6)]),
        ])
        .unwrap()
    }

    fn walker() -> MarkovWalker<&'static str, char> {
        MarkovWalker::new(drift_directions(), symmetric_colors(), two_state())
    }

    fn positions(path: &Path<&'static str, char>) -> Vec<(f64, f64)> {
        path.iter().map(|r| (r.x, r.y)).collect()
    }

    #[test]
    fn test_compass_square() {
        let mut sampler = ScriptedSampler::seeded(0).script(vec![North, East, South, West]);
        let path = walker()
            .generate(&mut sampler, North, "blue", 'A', 4, 50.0)
            .unwrap();
        assert_eq!(
            positions(&path),
            vec![(0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)]
        );
    }

    #[test]
    fn test_jump_amplifies_landing_direction() {
        let mut sampler = ScriptedSampler::seeded(0).script(vec![Jump, East]);
        let path = walker()
            .generate(&mut sampler, North, "blue", 'A', 1, 50.0)
            .unwrap();
        assert_eq!(positions(&path), vec![(50.0, 0.0)]);
        assert_eq!(sampler.remaining::<Direction>(), 0);
    }

    #[test]
    fn test_pause_keeps_position_but_advances_labels() {
        let mut sampler = ScriptedSampler::seeded(0)
            .script(vec![East, Pause])
            .script(vec!["red", "cyan"])
            .script(vec!['A', 'B']);
        let path = walker()
            .generate(&mut sampler, North, "blue", 'A', 2, 10.0)
            .unwrap();
        assert_eq!(positions(&path), vec![(1.0, 0.0), (1.0, 0.0)]);
        let labels: Vec<(&str, char)> = path.iter().map(|r| (r.color, r.auxiliary)).collect();
        assert_eq!(labels, vec![("red", 'A'), ("cyan", 'B')]);
    }

    #[test]
    fn test_jump_policy_decides_next_row() {
        let mut state = WalkerState::new(North, "blue", 'A');
        let mut sampler = ScriptedSampler::seeded(0).script(vec![Jump, West]);
        let tick = walker().step(&mut sampler, &mut state, 5.0).unwrap();
        assert_eq!(tick.sampled, Jump);
        assert_eq!(tick.applied, West);
        assert_eq!(tick.displacement, coord! {x: -5.0, y: 0.0});
        assert_eq!(state.direction, West);

        let mut state = WalkerState::new(North, "blue", 'A');
        let mut sampler = ScriptedSampler::seeded(0).script(vec![Jump, West]);
        let remembering = walker().with_jump_policy(JumpPolicy::RememberJump);
        assert_eq!(remembering.jump_policy(), JumpPolicy::RememberJump);
        remembering.step(&mut sampler, &mut state, 5.0).unwrap();
        assert_eq!(state.direction, Jump);
    }

    #[test]
    fn test_jump_zero_distance_stays_put() {
        let mut sampler = ScriptedSampler::seeded(0).script(vec![Jump, North]);
        let path = walker()
            .generate(&mut sampler, North, "blue", 'A', 1, 0.0)
            .unwrap();
        assert_eq!(positions(&path), vec![(0.0, 0.0)]);
    }

    #[test]
    fn test_bad_parameters() {
        let mut sampler = WeightedChoiceSampler::seeded(1);
        let w = walker();
        assert!(matches!(
            w.generate(&mut sampler, North, "blue", 'A', 0, 1.0),
            Err(MarkovError::InvalidParameter(_))
        ));
        assert!(matches!(
            w.generate(&mut sampler, North, "blue", 'A', 10, -1.0),
            Err(MarkovError::InvalidParameter(_))
        ));
        assert!(matches!(
            w.generate(&mut sampler, North, "blue", 'A', 10, f64::NAN),
            Err(MarkovError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_unknown_initial_labels() {
        let mut sampler = WeightedChoiceSampler::seeded(1);
        let w = walker();
        assert!(matches!(
            w.generate(&mut sampler, North, "mauve", 'A', 10, 1.0),
            Err(MarkovError::UnknownState(_))
        ));
        assert!(matches!(
            w.generate(&mut sampler, North, "blue", 'Z', 10, 1.0),
            Err(MarkovError::UnknownState(_))
        ));
        let partial = TransitionTable::from_weights(vec![(North, vec![(North, 1.0)])]).unwrap();
        let w = MarkovWalker::new(partial, symmetric_colors(), two_state());
        assert!(matches!(
            w.generate(&mut sampler, South, "blue", 'A', 10, 1.0),
            Err(MarkovError::UnknownState(_))
        ));
    }

    #[test]
    fn test_failed_walk_leaves_state_alone() {
        let w = walker();
        let mut state = WalkerState::new(North, "blue", 'A');
        // Third direction draw is not in the North row.
        let partial = TransitionTable::from_weights(vec![(North, vec![(North, 1.0)])]).unwrap();
        let stuck = MarkovWalker::new(partial, symmetric_colors(), two_state());
        let mut sampler = ScriptedSampler::seeded(0).script(vec![North, North, East]);
        assert!(stuck.walk(&mut sampler, &mut state, 5, 1.0).is_err());
        assert_eq!(state, WalkerState::new(North, "blue", 'A'));

        let mut sampler = WeightedChoiceSampler::seeded(8);
        let path = w.walk(&mut sampler, &mut state, 20, 1.0).unwrap();
        let last = path.last().unwrap();
        assert_eq!(state.color, last.color);
        assert_eq!(state.auxiliary, last.auxiliary);
    }

    #[test]
    fn test_end_to_end() {
        let mut sampler = WeightedChoiceSampler::seeded(2022);
        let path = walker()
            .generate(&mut sampler, North, "blue", 'A', 1000, 10.0)
            .unwrap();
        assert_eq!(path.len(), 1000);
        for record in &path {
            assert!(record.x.is_finite() && record.y.is_finite());
            assert_eq!(record.x.fract(), 0.0);
            assert_eq!(record.y.fract(), 0.0);
            assert!(COLORS.contains(&record.color));
            assert!(record.auxiliary == 'A' || record.auxiliary == 'B');
        }
    }

    #[test]
    fn test_consecutive_records_move_by_one_or_jump() {
        let mut sampler = WeightedChoiceSampler::seeded(77);
        let path = walker()
            .generate(&mut sampler, East, "red", 'B', 500, 10.0)
            .unwrap();
        let mut previous = (0.0, 0.0);
        for (x, y) in positions(&path) {
            let step = (x - previous.0).abs() + (y - previous.1).abs();
            assert!(step == 0.0 || step == 1.0 || step == 10.0, "odd step {}", step);
            previous = (x, y);
        }
    }

    proptest! {
        #[test]
        fn prop_length_matches_step_count(seed in any::<u64>(), steps in 1usize..400) {
            let mut sampler = WeightedChoiceSampler::seeded(seed);
            let path = walker().generate(&mut sampler, South, "cyan", 'A', steps, 3.0).unwrap();
            prop_assert_eq!(path.len(), steps);
        }

        #[test]
        fn prop_same_seed_same_path(seed in any::<u64>(), steps in 1usize..200) {
            let w = walker();
            let first = w.generate(&mut WeightedChoiceSampler::seeded(seed), West, "green", 'B', steps, 7.0).unwrap();
            let second = w.generate(&mut WeightedChoiceSampler::seeded(seed), West, "green", 'B', steps, 7.0).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
