//! Transition tables and the attribute chains built from them.
//!
//! A [`TransitionTable`] maps each current state to a [`Distribution`] over next
//! states. An [`AttributeChain`] wraps one table and advances a single attribute
//! (direction, color, texture...) by one Markov step.

use crate::errors::MarkovError;
use crate::sampler::{Distribution, Label, Sampler};
use crate::util::OrderedEntries;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// # TransitionTable
///
/// Rows are kept in the order given. Construction fails fast:
///
/// * `InvalidDistribution` for an empty table, a repeated row key, or a bad row.
/// * `UnknownState` if any row gives positive weight to a label that has no row of
///   its own, since a walk could reach it and then have nowhere to go.
///
/// # Example
///
/// ```rust
/// use markov_brush::chain::TransitionTable;
///
/// let table = TransitionTable::from_weights(vec![
///     ("light", vec![("light", 0.7), ("heavy", 0.3)]),
///     ("heavy", vec![("light", 0.4), ("heavy", 0.6)]),
/// ]).unwrap();
/// assert_eq!(table.row(&"heavy").unwrap().weight(&"light"), Some(0.4));
/// assert!(table.row(&"medium").is_err());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(
    try_from = "OrderedEntries<L, Distribution<L>>",
    into = "OrderedEntries<L, Distribution<L>>",
    bound(
        serialize = "L: Label + Serialize",
        deserialize = "L: Label + Deserialize<'de>"
    )
)]
pub struct TransitionTable<L> {
    rows: Vec<(L, Distribution<L>)>,
    index: HashMap<L, usize>,
}

impl<L: Label> TransitionTable<L> {
    pub fn new(rows: Vec<(L, Distribution<L>)>) -> Result<Self, MarkovError> {
        if rows.is_empty() {
            return Err(MarkovError::InvalidDistribution(
                "transition table has no rows".to_string(),
            ));
        }
        let mut index = HashMap::with_capacity(rows.len());
        for (position, (label, _)) in rows.iter().enumerate() {
            if index.insert(label.clone(), position).is_some() {
                return Err(MarkovError::InvalidDistribution(format!(
                    "row {} is defined more than once",
                    label
                )));
            }
        }
        for (label, row) in &rows {
            if let Some(dangling) = row.support().find(|next| !index.contains_key(*next)) {
                return Err(MarkovError::UnknownState(format!(
                    "{} is reachable from {} but has no row",
                    dangling, label
                )));
            }
        }
        Ok(TransitionTable { rows, index })
    }

    /// Build a table straight from raw weights, validating every row.
    pub fn from_weights(rows: Vec<(L, Vec<(L, f64)>)>) -> Result<Self, MarkovError> {
        let rows = rows
            .into_iter()
            .map(|(label, weights)| match Distribution::new(weights) {
                Ok(row) => Ok((label, row)),
                Err(MarkovError::InvalidDistribution(msg)) => Err(
                    MarkovError::InvalidDistribution(format!("row {}: {}", label, msg)),
                ),
                Err(other) => Err(other),
            })
            .collect::<Result<Vec<_>, _>>()?;
        TransitionTable::new(rows)
    }

    pub fn row(&self, current: &L) -> Result<&Distribution<L>, MarkovError> {
        self.index
            .get(current)
            .map(|position| &self.rows[*position].1)
            .ok_or_else(|| MarkovError::UnknownState(current.to_string()))
    }

    pub fn contains(&self, label: &L) -> bool {
        self.index.contains_key(label)
    }

    /// Row keys, in table order.
    pub fn labels(&self) -> impl Iterator<Item = &L> {
        self.rows.iter().map(|(label, _)| label)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<L: Label> PartialEq for TransitionTable<L> {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
    }
}

impl<L: Label> TryFrom<OrderedEntries<L, Distribution<L>>> for TransitionTable<L> {
    type Error = MarkovError;

    fn try_from(entries: OrderedEntries<L, Distribution<L>>) -> Result<Self, Self::Error> {
        TransitionTable::new(entries.0)
    }
}

impl<L> From<TransitionTable<L>> for OrderedEntries<L, Distribution<L>> {
    fn from(table: TransitionTable<L>) -> Self {
        OrderedEntries(table.rows)
    }
}

/// # AttributeChain
///
/// One independent Markov chain for one attribute of the brush. The table and its
/// label list never change once built; the walker holds the current label.
#[derive(Clone, Debug)]
pub struct AttributeChain<L> {
    name: &'static str,
    table: TransitionTable<L>,
    labels: Vec<L>,
}

impl<L: Label> AttributeChain<L> {
    pub fn new(name: &'static str, table: TransitionTable<L>) -> Self {
        let labels = table.labels().cloned().collect();
        AttributeChain {
            name,
            table,
            labels,
        }
    }

    /// Sample the next label given the current one.
    pub fn advance<S: Sampler>(&self, current: &L, sampler: &mut S) -> Result<L, MarkovError> {
        let row = self.row(current)?;
        sampler.sample(row).cloned()
    }

    /// Fails with `UnknownState` unless `label` has a row in this chain.
    pub fn ensure_known(&self, label: &L) -> Result<(), MarkovError> {
        self.row(label).map(|_| ())
    }

    fn row(&self, current: &L) -> Result<&Distribution<L>, MarkovError> {
        self.table
            .row(current)
            .map_err(|_| MarkovError::UnknownState(format!("{} label {}", self.name, current)))
    }

    pub fn labels(&self) -> &[L] {
        &self.labels
    }
}
