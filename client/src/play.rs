use std::io::BufRead;

use anyhow::{bail, Result};
use rand::Rng;

use chess::ChessEngine;
use engine::RulesEngine;
use learner::{Policy, ValueTable};

/// Interactive human-vs-agent loop. The human plays White from stdin in UCI
/// notation; the agent answers with the greedy policy over the loaded table.
pub fn play<R: Rng>(rules: &ChessEngine, table: &ValueTable, rng: &mut R) -> Result<()> {
    let stdin = std::io::stdin();
    let mut state = rules.initial_state();

    while rules.terminal_state(&state).is_none() {
        println!("{}", state);

        if rules.player_to_move(&state) == 1 {
            println!("Your move (e.g. e2e4):");

            let mut input = String::new();
            if stdin.lock().read_line(&mut input)? == 0 {
                bail!("Standard input closed before the game ended");
            }

            match rules.parse_action(&state, input.trim()) {
                Ok(action) => state = rules.take_action(&state, &action),
                Err(err) => {
                    println!("Invalid move. Try again. ({})", err);
                    continue;
                }
            }
        } else {
            let action = Policy::select_greedy(rules, &state, table, rng)?;
            println!("Agent plays: {}", action);
            state = rules.take_action(&state, &action);
        }
    }

    println!("{}", state);
    println!("Game over!");
    if let Some(result) = rules.result_string(&state) {
        println!("Result: {}", result);
    }

    Ok(())
}
