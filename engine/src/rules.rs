use std::fmt::{Debug, Display};

use super::terminal::Terminal;

/// Rules-side capability set consumed by the learner. Implementations own
/// legality, board mutation and terminal classification; the learner never
/// inspects a position beyond what this trait exposes.
///
/// `legal_actions` may enumerate in any order the underlying rules library
/// happens to produce. Callers that need a stable order must impose their own
/// (see `learner::ActionIndexer`).
pub trait RulesEngine {
    type State: Clone;
    type Action: Clone + Eq + Debug + Display;

    fn initial_state(&self) -> Self::State;

    /// Canonical string encoding of the full position, including side to
    /// move, castling rights, en passant target and move counters. Two
    /// states encode identically iff they are the same position.
    fn encode(&self, state: &Self::State) -> String;

    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    fn take_action(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    fn terminal_state(&self, state: &Self::State) -> Option<Terminal>;

    /// Player to move, 1 or 2. Player 1 moves first from the initial state.
    fn player_to_move(&self, state: &Self::State) -> usize;

    /// Human readable result string ("1-0", "1/2-1/2", ...) once the game is
    /// over, `None` before that.
    fn result_string(&self, state: &Self::State) -> Option<String>;
}
