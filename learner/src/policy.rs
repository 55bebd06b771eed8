use anyhow::{bail, Result};
use log::warn;
use rand::Rng;

use engine::RulesEngine;

use super::errors::VectorSizeError;
use super::indexer::ActionIndexer;
use super::table::{best_index, ValueTable};

/// Epsilon-greedy action selection over a state's value vector.
pub struct Policy;

impl Policy {
    /// Training-time selection. With probability `epsilon` a uniform random
    /// legal action is returned; otherwise the state's vector is looked up
    /// (lazily initialized all zero at first visit) and the action at the
    /// maximal index is returned, ties broken toward the lowest index.
    pub fn select<E: RulesEngine, R: Rng>(
        rules: &E,
        state: &E::State,
        table: &mut ValueTable,
        epsilon: f64,
        rng: &mut R,
    ) -> Result<E::Action> {
        let actions = ActionIndexer::legal_actions(rules, state);

        if actions.is_empty() {
            bail!(
                "No legal actions to select from in state {}",
                rules.encode(state)
            );
        }

        if rng.gen::<f64>() < epsilon {
            return Ok(actions[rng.gen_range(0..actions.len())].clone());
        }

        let state_key = rules.encode(state);
        let values = table.values_mut(&state_key, actions.len())?;
        let best = best_index(values).unwrap_or(0);

        Ok(actions[best].clone())
    }

    /// Inference-time selection, greedy with epsilon forced to 0. A state
    /// missing from the table falls back to a uniform random legal action
    /// with a diagnostic; the table is never grown at inference time. A
    /// stored vector whose length disagrees with the current legal-action
    /// count is a `VectorSizeError`, never a silent index misalignment.
    pub fn select_greedy<E: RulesEngine, R: Rng>(
        rules: &E,
        state: &E::State,
        table: &ValueTable,
        rng: &mut R,
    ) -> Result<E::Action> {
        let actions = ActionIndexer::legal_actions(rules, state);

        if actions.is_empty() {
            bail!(
                "No legal actions to select from in state {}",
                rules.encode(state)
            );
        }

        let state_key = rules.encode(state);

        match table.get(&state_key) {
            Some(values) => {
                if values.len() != actions.len() {
                    return Err(VectorSizeError {
                        state_key,
                        recorded: values.len(),
                        reported: actions.len(),
                    }
                    .into());
                }

                let best = best_index(values).unwrap_or(0);
                Ok(actions[best].clone())
            }
            None => {
                warn!(
                    "State {} is outside the trained distribution, falling back to a random action",
                    state_key
                );
                Ok(actions[rng.gen_range(0..actions.len())].clone())
            }
        }
    }
}
