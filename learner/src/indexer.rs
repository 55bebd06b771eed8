use engine::RulesEngine;

use super::errors::UnknownActionError;

/// Canonical per-state action enumeration.
///
/// The rules engine makes no promise about enumeration order, so indices
/// taken from its output would drift between calls and between processes,
/// silently invalidating every persisted value vector. The indexer pins the
/// order by sorting on each action's notation string, which is a pure
/// function of the action itself.
pub struct ActionIndexer;

impl ActionIndexer {
    /// Legal actions of `state` sorted lexicographically by notation string.
    /// Index `i` of the result denotes the same action on every call for the
    /// same state, within and across processes.
    pub fn legal_actions<E: RulesEngine>(rules: &E, state: &E::State) -> Vec<E::Action> {
        let mut actions = rules.legal_actions(state);
        actions.sort_by_key(|a| a.to_string());
        actions
    }

    /// Position of `action` within the canonical enumeration of `state`.
    pub fn index_of<E: RulesEngine>(
        rules: &E,
        state: &E::State,
        action: &E::Action,
    ) -> Result<usize, UnknownActionError> {
        Self::legal_actions(rules, state)
            .iter()
            .position(|a| a == action)
            .ok_or_else(|| UnknownActionError {
                state_key: rules.encode(state),
                action: action.to_string(),
            })
    }
}
