use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::errors::VectorSizeError;

/// Learned action values for a single state, one entry per action index in
/// the canonical enumeration recorded at first visit.
pub type ValueVector = Vec<f64>;

/// Sparse mapping from state key to action values. Entries are created all
/// zero on first visit, sized to the legal-action count of that moment, and
/// never removed. Vector lengths are independent per key.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueTable {
    entries: HashMap<String, ValueVector>,
}

impl ValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, state_key: &str) -> bool {
        self.entries.contains_key(state_key)
    }

    pub fn get(&self, state_key: &str) -> Option<&ValueVector> {
        self.entries.get(state_key)
    }

    /// Values for `state_key`, lazily initialized to an all-zero vector of
    /// length `action_count` on first visit.
    ///
    /// A revisit that reports a different action count fails with
    /// `VectorSizeError` instead of handing back the wrongly sized vector.
    pub fn values_mut(
        &mut self,
        state_key: &str,
        action_count: usize,
    ) -> Result<&mut ValueVector, VectorSizeError> {
        let values = self
            .entries
            .entry(state_key.to_string())
            .or_insert_with(|| vec![0.0; action_count]);

        if values.len() != action_count {
            return Err(VectorSizeError {
                state_key: state_key.to_string(),
                recorded: values.len(),
                reported: action_count,
            });
        }

        Ok(values)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ValueVector)> {
        self.entries.iter()
    }
}

/// Largest value in the vector, or 0 for an empty vector. Terminal states
/// have no actions and contribute no future value.
pub fn max_value(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Index of the maximal value, ties broken by the lowest index. `None` only
/// for an empty vector.
pub fn best_index(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, best_v)) if v <= best_v => {}
            _ => best = Some((i, v)),
        }
    }

    best.map(|(i, _)| i)
}
