use std::collections::HashMap;
use std::fmt;

use shakmaty::fen::Fen;
use shakmaty::{Chess, Color, EnPassantMode, File, Position, Rank, Role, Square};

/// A chess position plus the repetition history needed to recognize the
/// fivefold rule, which a bare FEN cannot express.
///
/// Repetitions are counted on the first four FEN fields (placement, side to
/// move, castling rights, en passant target); the move counters are
/// deliberately excluded, as positions differing only in those counters are
/// the same position for repetition purposes.
#[derive(Clone, Debug)]
pub struct ChessState {
    pub(crate) pos: Chess,
    repetitions: HashMap<String, u32>,
}

impl ChessState {
    pub fn new(pos: Chess) -> Self {
        let mut state = Self {
            pos,
            repetitions: HashMap::new(),
        };
        state.record_repetition();
        state
    }

    /// Successor state with `pos` appended to the repetition history.
    pub(crate) fn successor(&self, pos: Chess) -> Self {
        let mut state = Self {
            pos,
            repetitions: self.repetitions.clone(),
        };
        state.record_repetition();
        state
    }

    /// Full FEN of the position, move counters included.
    pub fn fen(&self) -> String {
        Fen::from_position(self.pos.clone(), EnPassantMode::Legal).to_string()
    }

    pub(crate) fn current_repetitions(&self) -> u32 {
        self.repetitions
            .get(&Self::repetition_key(&self.fen()))
            .copied()
            .unwrap_or(0)
    }

    fn record_repetition(&mut self) {
        let key = Self::repetition_key(&self.fen());
        *self.repetitions.entry(key).or_insert(0) += 1;
    }

    fn repetition_key(fen: &str) -> String {
        fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
    }
}

impl fmt::Display for ChessState {
    /// ASCII board from White's point of view, upper case for White pieces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.pos.board();

        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let square = Square::from_coords(File::new(file), Rank::new(rank));
                let symbol = match board.piece_at(square) {
                    Some(piece) => {
                        let c = role_char(piece.role);
                        if piece.color == Color::White {
                            c.to_ascii_uppercase()
                        } else {
                            c
                        }
                    }
                    None => '.',
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

fn role_char(role: Role) -> char {
    match role {
        Role::Pawn => 'p',
        Role::Knight => 'n',
        Role::Bishop => 'b',
        Role::Rook => 'r',
        Role::Queen => 'q',
        Role::King => 'k',
    }
}
