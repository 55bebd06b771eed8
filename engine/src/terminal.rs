/// Classification of a game-over position as reported by the rules engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Terminal {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition,
    OtherDraw,
}

impl Terminal {
    pub fn is_draw(&self) -> bool {
        !matches!(self, Terminal::Checkmate)
    }
}
