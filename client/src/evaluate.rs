use std::time::Duration;

use anyhow::{bail, Result};

use chess::ChessEngine;
use engine::{Evaluator, RulesEngine};
use learner::{normalize_score, MATE_SCORE};

/// Per-side mean accuracy of a finished game.
#[derive(Debug)]
pub struct GameAccuracy {
    pub white: f64,
    pub black: f64,
}

/// Replays a recorded move list from the initial position and scores every
/// resulting position with the evaluator. Each normalized relative score is
/// credited to the side that just moved; the report is the per-side mean.
pub fn evaluate_game<V: Evaluator>(
    rules: &ChessEngine,
    evaluator: &mut V,
    moves: &[&str],
    limit: Duration,
) -> Result<GameAccuracy> {
    if moves.is_empty() {
        bail!("No moves to evaluate");
    }

    let mut state = rules.initial_state();
    let mut white_score = 0.0;
    let mut black_score = 0.0;
    let mut move_count = 0;

    for input in moves {
        let action = rules.parse_action(&state, input)?;
        state = rules.take_action(&state, &action);
        move_count += 1;

        let score = match evaluator.analyze(&rules.encode(&state), limit)? {
            Some(score) => normalize_score(score, MATE_SCORE),
            None => 0.0,
        };

        // The relative score is from the side now to move; credit it to the
        // side that played the move.
        if rules.player_to_move(&state) == 1 {
            black_score += score;
        } else {
            white_score += score;
        }
    }

    Ok(GameAccuracy {
        white: white_score / move_count as f64,
        black: black_score / move_count as f64,
    })
}
