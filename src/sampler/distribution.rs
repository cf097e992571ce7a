use super::Label;
use crate::errors::MarkovError;
use crate::util::OrderedEntries;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How far a row's weights may drift from 1.0 before it is rejected.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// # Distribution
///
/// A finite, ordered set of labels with a probability weight each. The order is
/// the order the labels were provided in, and is the order the sampler scans them
/// in, so a seeded sampler always lands on the same label for the same draw.
///
/// Construction checks that the distribution is non-empty, that no label repeats,
/// that every weight is finite and non-negative, and that the weights sum to 1.0
/// within tolerance. Nothing is ever normalized for you.
///
/// # Example
///
/// ```rust
/// use markov_brush::sampler::Distribution;
///
/// let coin = Distribution::new(vec![("heads", 0.5), ("tails", 0.5)]).unwrap();
/// assert_eq!(coin.label_at(0.25), &"heads");
/// assert_eq!(coin.label_at(0.75), &"tails");
/// assert!(Distribution::new(vec![("heads", 0.5), ("tails", 0.4)]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "OrderedEntries<L, f64>",
    into = "OrderedEntries<L, f64>",
    bound(
        serialize = "L: Label + Serialize",
        deserialize = "L: Label + Deserialize<'de>"
    )
)]
pub struct Distribution<L> {
    entries: Vec<(L, f64)>,
}

impl<L: Label> Distribution<L> {
    pub fn new(entries: Vec<(L, f64)>) -> Result<Self, MarkovError> {
        Self::with_tolerance(entries, DEFAULT_TOLERANCE)
    }

    pub fn with_tolerance(entries: Vec<(L, f64)>, tolerance: f64) -> Result<Self, MarkovError> {
        if entries.is_empty() {
            return Err(MarkovError::InvalidDistribution(
                "distribution has no outcomes".to_string(),
            ));
        }
        let mut seen = HashSet::with_capacity(entries.len());
        for (label, weight) in &entries {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(MarkovError::InvalidDistribution(format!(
                    "weight {} for {} is not a non-negative number",
                    weight, label
                )));
            }
            if !seen.insert(label) {
                return Err(MarkovError::InvalidDistribution(format!(
                    "{} appears more than once",
                    label
                )));
            }
        }
        let total: f64 = entries.iter().map(|(_, weight)| weight).sum();
        if (total - 1.0).abs() > tolerance {
            return Err(MarkovError::InvalidDistribution(format!(
                "weights sum to {} rather than 1.0",
                total
            )));
        }
        Ok(Distribution { entries })
    }

    /// Inverse-CDF lookup: scan the labels in order, accumulating weights, and return
    /// the first label whose cumulative weight exceeds `u`. `u` is expected in [0, 1).
    ///
    /// If floating point leaves `u` at or beyond the final cumulative sum, the last
    /// label with a positive weight is returned, never a zero-weight one.
    pub fn label_at(&self, u: f64) -> &L {
        let mut cumulative = 0.0;
        for (label, weight) in &self.entries {
            cumulative += weight;
            if u < cumulative {
                return label;
            }
        }
        self.entries
            .iter()
            .rev()
            .find(|(_, weight)| *weight > 0.0)
            .map(|(label, _)| label)
            .unwrap_or(&self.entries[self.entries.len() - 1].0)
    }

    pub fn weight(&self, label: &L) -> Option<f64> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == label)
            .map(|(_, weight)| *weight)
    }

    /// Find the stored copy of `label`, so callers can hand out references that
    /// live as long as the distribution.
    pub fn get(&self, label: &L) -> Option<&L> {
        self.entries
            .iter()
            .map(|(candidate, _)| candidate)
            .find(|candidate| *candidate == label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &L> {
        self.entries.iter().map(|(label, _)| label)
    }

    /// Labels that can actually be drawn.
    pub fn support(&self) -> impl Iterator<Item = &L> {
        self.entries
            .iter()
            .filter(|(_, weight)| *weight > 0.0)
            .map(|(label, _)| label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(L, f64)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<L: Label> TryFrom<OrderedEntries<L, f64>> for Distribution<L> {
    type Error = MarkovError;

    fn try_from(entries: OrderedEntries<L, f64>) -> Result<Self, Self::Error> {
        Distribution::new(entries.0)
    }
}

impl<L> From<Distribution<L>> for OrderedEntries<L, f64> {
    fn from(distribution: Distribution<L>) -> Self {
        OrderedEntries(distribution.entries)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn colors(weights: &[(&'static str, f64)]) -> Result<Distribution<&'static str>, MarkovError> {
        Distribution::new(weights.to_vec())
    }

    #[test]
    fn test_row_sum_enforced() {
        assert!(matches!(
            colors(&[("blue", 0.5), ("red", 0.4)]),
            Err(MarkovError::InvalidDistribution(_))
        ));
        assert!(matches!(
            colors(&[("blue", 0.6), ("red", 0.5)]),
            Err(MarkovError::InvalidDistribution(_))
        ));
        assert!(colors(&[("blue", 0.5), ("red", 0.5)]).is_ok());
        // Off by less than the tolerance
        assert!(colors(&[("blue", 0.1), ("red", 0.2), ("cyan", 0.7 + 5e-10)]).is_ok());
    }

    #[test]
    fn test_rejects_bad_weights() {
        assert!(colors(&[("blue", 1.5), ("red", -0.5)]).is_err());
        assert!(colors(&[("blue", f64::NAN), ("red", 1.0)]).is_err());
        assert!(colors(&[("blue", 0.5), ("blue", 0.5)]).is_err());
        assert!(colors(&[]).is_err());
    }

    #[test]
    fn test_label_at_scans_in_order() {
        let dist = colors(&[("blue", 0.2), ("red", 0.0), ("green", 0.8)]).unwrap();
        assert_eq!(dist.label_at(0.0), &"blue");
        assert_eq!(dist.label_at(0.19), &"blue");
        assert_eq!(dist.label_at(0.2), &"green");
        assert_eq!(dist.label_at(0.99), &"green");
    }

    #[test]
    fn test_label_at_rounding_skips_zero_weights() {
        let dist = Distribution::with_tolerance(vec![("blue", 0.3), ("red", 0.6), ("cyan", 0.0)], 0.2)
            .unwrap();
        // 0.95 is past the (short) cumulative total
        assert_eq!(dist.label_at(0.95), &"red");
    }

    #[test]
    fn test_support() {
        let dist = colors(&[("blue", 0.0), ("red", 1.0)]).unwrap();
        assert_eq!(dist.support().collect::<Vec<_>>(), vec![&"red"]);
        assert_eq!(dist.weight(&"blue"), Some(0.0));
        assert_eq!(dist.weight(&"cyan"), None);
    }

    #[test]
    fn test_ron_keeps_order_and_validates() {
        let dist: Distribution<String> =
            ron::from_str(r#"{"magenta": 0.75, "blue": 0.25}"#).expect("Should parse");
        assert_eq!(dist.labels().next().map(String::as_str), Some("magenta"));
        let bad: Result<Distribution<String>, _> = ron::from_str(r#"{"magenta": 0.7, "blue": 0.2}"#);
        assert!(bad.is_err());
    }
}
