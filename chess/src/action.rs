use std::fmt;

use shakmaty::{CastlingMode, Move};

/// A legal chess move together with its UCI long algebraic notation.
///
/// The notation string doubles as the move's canonical sort key, so it is
/// computed once at construction rather than on every comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChessAction {
    mv: Move,
    uci: String,
}

impl ChessAction {
    pub fn new(mv: Move) -> Self {
        let uci = mv.to_uci(CastlingMode::Standard).to_string();
        Self { mv, uci }
    }

    pub fn inner(&self) -> &Move {
        &self.mv
    }

    pub fn uci(&self) -> &str {
        &self.uci
    }
}

impl fmt::Display for ChessAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uci)
    }
}
