use anyhow::{anyhow, Context, Result};
use shakmaty::fen::Fen;
use shakmaty::uci::Uci;
use shakmaty::{CastlingMode, Chess, Color, Position};

use engine::{RulesEngine, Terminal};

use super::{ChessAction, ChessState};

/// Rules oracle over the `shakmaty` move generator.
///
/// Terminal classification covers checkmate, stalemate, insufficient
/// material, the 75-move rule and fivefold repetition. Player 1 is White.
#[derive(Default)]
pub struct ChessEngine {}

impl ChessEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// State with an empty repetition history, rooted at the given FEN.
    pub fn state_from_fen(&self, fen: &str) -> Result<ChessState> {
        let fen: Fen = fen
            .parse()
            .with_context(|| format!("Invalid FEN: {}", fen))?;
        let pos: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|e| anyhow!("FEN does not describe a legal position: {}", e))?;

        Ok(ChessState::new(pos))
    }

    /// Parses a human entered move in UCI notation ("e2e4", "e7e8q") and
    /// checks it against the state's legal moves.
    pub fn parse_action(&self, state: &ChessState, input: &str) -> Result<ChessAction> {
        let uci: Uci = input
            .parse()
            .map_err(|_| anyhow!("Not a move in UCI notation: {}", input))?;
        let mv = uci
            .to_move(&state.pos)
            .map_err(|_| anyhow!("Illegal move: {}", input))?;

        Ok(ChessAction::new(mv))
    }
}

impl RulesEngine for ChessEngine {
    type State = ChessState;
    type Action = ChessAction;

    fn initial_state(&self) -> ChessState {
        ChessState::new(Chess::default())
    }

    fn encode(&self, state: &ChessState) -> String {
        state.fen()
    }

    fn legal_actions(&self, state: &ChessState) -> Vec<ChessAction> {
        state
            .pos
            .legal_moves()
            .into_iter()
            .map(ChessAction::new)
            .collect()
    }

    fn take_action(&self, state: &ChessState, action: &ChessAction) -> ChessState {
        let mut pos = state.pos.clone();
        pos.play_unchecked(action.inner());
        state.successor(pos)
    }

    fn terminal_state(&self, state: &ChessState) -> Option<Terminal> {
        let pos = &state.pos;

        if pos.is_checkmate() {
            Some(Terminal::Checkmate)
        } else if pos.is_stalemate() {
            Some(Terminal::Stalemate)
        } else if pos.is_insufficient_material() {
            Some(Terminal::InsufficientMaterial)
        } else if pos.halfmoves() >= 150 {
            Some(Terminal::SeventyFiveMoves)
        } else if state.current_repetitions() >= 5 {
            Some(Terminal::FivefoldRepetition)
        } else {
            None
        }
    }

    fn player_to_move(&self, state: &ChessState) -> usize {
        match state.pos.turn() {
            Color::White => 1,
            Color::Black => 2,
        }
    }

    fn result_string(&self, state: &ChessState) -> Option<String> {
        let result = match self.terminal_state(state)? {
            Terminal::Checkmate => match state.pos.turn() {
                // The side to move is the mated side.
                Color::White => "0-1",
                Color::Black => "1-0",
            },
            _ => "1/2-1/2",
        };

        Some(result.to_string())
    }
}
