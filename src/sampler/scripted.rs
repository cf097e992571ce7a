use super::{Distribution, Label, Sampler, WeightedChoiceSampler};
use crate::errors::MarkovError;
use rand::rngs::SmallRng;
use std::any::{Any, TypeId};
use std::collections::{HashMap, VecDeque};

/// A sampler that replays fixed label sequences, one queue per label type.
///
/// Each call to [`Sampler::sample`] pops the next scripted label of the requested
/// type. The label has to appear in the row being sampled (any weight, zero
/// included), otherwise the draw fails with `UnknownState`. Once a type's script is
/// exhausted, or if it never had one, the draw is handed to the fallback sampler.
///
/// ```rust
/// use markov_brush::sampler::{Distribution, Sampler, ScriptedSampler};
///
/// let dist = Distribution::new(vec![("N", 0.5), ("E", 0.5)]).unwrap();
/// let mut sampler = ScriptedSampler::seeded(0).script(vec!["E", "E", "N"]);
/// assert_eq!(sampler.sample(&dist).unwrap(), &"E");
/// assert_eq!(sampler.sample(&dist).unwrap(), &"E");
/// assert_eq!(sampler.sample(&dist).unwrap(), &"N");
/// ```
pub struct ScriptedSampler<F = WeightedChoiceSampler<SmallRng>> {
    scripts: HashMap<TypeId, VecDeque<Box<dyn Any>>>,
    fallback: F,
}

impl ScriptedSampler<WeightedChoiceSampler<SmallRng>> {
    pub fn seeded(seed: u64) -> Self {
        ScriptedSampler::with_fallback(WeightedChoiceSampler::seeded(seed))
    }
}

impl<F: Sampler> ScriptedSampler<F> {
    pub fn with_fallback(fallback: F) -> Self {
        ScriptedSampler {
            scripts: HashMap::new(),
            fallback,
        }
    }

    /// Queue up labels of type `L`, after any already queued.
    pub fn script<L: Label>(mut self, labels: impl IntoIterator<Item = L>) -> Self {
        let queue = self.scripts.entry(TypeId::of::<L>()).or_default();
        queue.extend(labels.into_iter().map(|label| Box::new(label) as Box<dyn Any>));
        self
    }

    /// How many scripted labels of type `L` have not been drawn yet.
    pub fn remaining<L: Label>(&self) -> usize {
        self.scripts
            .get(&TypeId::of::<L>())
            .map(|queue| queue.len())
            .unwrap_or(0)
    }
}

impl<F: Sampler> Sampler for ScriptedSampler<F> {
    fn sample<'d, L: Label>(
        &mut self,
        distribution: &'d Distribution<L>,
    ) -> Result<&'d L, MarkovError> {
        let next = self
            .scripts
            .get_mut(&TypeId::of::<L>())
            .and_then(|queue| queue.pop_front());
        match next {
            Some(boxed) => {
                let label = boxed
                    .downcast::<L>()
                    .map_err(|_| MarkovError::UnknownState("scripted label of the wrong type".to_string()))?;
                distribution.get(&*label).ok_or_else(|| {
                    MarkovError::UnknownState(format!("scripted {} is not in the row being sampled", label))
                })
            }
            None => self.fallback.sample(distribution),
        }
    }
}
