use std::time::Duration;

use anyhow::Result;

/// A positional score relative to the side to move in the scored position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Score {
    /// Centipawns, positive when the side to move is better.
    Cp(i64),
    /// Mate in the given number of moves; negative when the side to move is
    /// getting mated.
    Mate(i32),
}

/// Evaluator-side capability set: a positional oracle that scores an encoded
/// position within a bounded time budget.
///
/// Implementations are long lived external resources. They are acquired once
/// before any training or evaluation work and must be released on every exit
/// path, which is why consumers hold them by `&mut` rather than constructing
/// them internally.
pub trait Evaluator {
    /// Analyze the position for up to `limit` wall clock time and return a
    /// relative score from the perspective of the side to move, or `None`
    /// when the oracle produced no usable score.
    fn analyze(&mut self, state_key: &str, limit: Duration) -> Result<Option<Score>>;
}
