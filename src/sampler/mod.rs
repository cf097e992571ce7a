//! The sampler module draws one label from a [`Distribution`]. The
//! [`WeightedChoiceSampler`] is the real thing: it owns its random stream and does a
//! cumulative-weight scan. The [`Sampler`] trait is the seam the walker is written
//! against, so tests can swap in a [`ScriptedSampler`].

use crate::errors::MarkovError;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt::{Debug, Display};
use std::hash::Hash;

pub mod distribution;
pub use distribution::*;

pub mod scripted;
pub use scripted::ScriptedSampler;

/// Anything that can name one state of one attribute chain. Each attribute uses its
/// own label type, which keeps label sets from different chains apart.
pub trait Label: Clone + Eq + Hash + Debug + Display + 'static {}

impl<T> Label for T where T: Clone + Eq + Hash + Debug + Display + 'static {}

/// Draws one label from a distribution.
///
/// The returned reference points into the distribution.
pub trait Sampler {
    fn sample<'d, L: Label>(&mut self, distribution: &'d Distribution<L>)
        -> Result<&'d L, MarkovError>;
}

/// # WeightedChoiceSampler
///
/// Draws a label with probability equal to its weight, using one uniform [0, 1)
/// draw per sample. Labels are scanned in the distribution's stored order, so the
/// same seed and the same distributions always give the same sequence.
///
/// # Example
///
/// ```rust
/// use markov_brush::sampler::{Distribution, Sampler, WeightedChoiceSampler};
///
/// let dist = Distribution::new(vec![("north", 0.75), ("south", 0.25)]).unwrap();
/// let mut a = WeightedChoiceSampler::seeded(7);
/// let mut b = WeightedChoiceSampler::seeded(7);
/// for _ in 0..10 {
///     assert_eq!(a.sample(&dist).unwrap(), b.sample(&dist).unwrap());
/// }
/// ```
#[derive(Clone, Debug)]
pub struct WeightedChoiceSampler<R = SmallRng> {
    rng: R,
}

impl WeightedChoiceSampler<SmallRng> {
    /// A sampler with its own small, fast, seeded stream.
    pub fn seeded(seed: u64) -> Self {
        WeightedChoiceSampler {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        WeightedChoiceSampler {
            rng: SmallRng::from_entropy(),
        }
    }
}

impl<R: Rng> WeightedChoiceSampler<R> {
    pub fn new(rng: R) -> Self {
        WeightedChoiceSampler { rng }
    }

    /// Infallible draw. A [`Distribution`] is validated when it is built, so there
    /// is nothing left to go wrong here.
    pub fn pick<'d, L: Label>(&mut self, distribution: &'d Distribution<L>) -> &'d L {
        let u: f64 = self.rng.gen();
        distribution.label_at(u)
    }
}

impl<R: Rng> Sampler for WeightedChoiceSampler<R> {
    fn sample<'d, L: Label>(
        &mut self,
        distribution: &'d Distribution<L>,
    ) -> Result<&'d L, MarkovError> {
        Ok(self.pick(distribution))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn six_colors() -> Distribution<&'static str> {
        Distribution::new(vec![
            ("blue", 0.5),
            ("green", 0.15),
            ("red", 0.05),
            ("cyan", 0.2),
            ("magenta", 0.05),
            ("yellow", 0.05),
        ])
        .unwrap()
    }

    #[test]
    fn test_weighted_choice_converges() {
        let dist = six_colors();
        let mut sampler = WeightedChoiceSampler::seeded(12345);
        let draws = 100_000;
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for _ in 0..draws {
            *counts.entry(*sampler.pick(&dist)).or_default() += 1;
        }
        for (label, weight) in dist.iter() {
            let freq = *counts.get(label).unwrap_or(&0) as f64 / draws as f64;
            assert!(
                (freq - weight).abs() < 0.01,
                "{} drawn {} of the time, expected {}",
                label,
                freq,
                weight
            );
        }
    }

    #[test]
    fn test_zero_weight_never_drawn() {
        let dist = Distribution::new(vec![("P", 0.0), ("N", 0.5), ("J", 0.0), ("E", 0.5)]).unwrap();
        let mut sampler = WeightedChoiceSampler::seeded(1);
        for _ in 0..10_000 {
            let label = sampler.pick(&dist);
            assert!(*label == "N" || *label == "E");
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let dist = six_colors();
        let mut a = WeightedChoiceSampler::seeded(99);
        let mut b = WeightedChoiceSampler::new(SmallRng::seed_from_u64(99));
        let left: Vec<&str> = (0..500).map(|_| *a.pick(&dist)).collect();
        let right: Vec<&str> = (0..500).map(|_| *b.sample(&dist).unwrap()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_certain_outcome() {
        let dist = Distribution::new(vec![("only", 1.0)]).unwrap();
        let mut sampler = WeightedChoiceSampler::from_entropy();
        assert_eq!(sampler.sample(&dist), Ok(&"only"));
    }
}
