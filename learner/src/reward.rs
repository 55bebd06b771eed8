use std::time::Duration;

use anyhow::Result;
use log::warn;

use engine::{Evaluator, RulesEngine, Score};

/// Scalar reward for a transition, always signed from the perspective of the
/// side that just moved.
///
/// Terminal classification wins over shaping: checkmate is +1 for the mover
/// (the side left to move is the mated side and would see -1), every
/// recognized draw is 0. Non-terminal positions are shaped by the evaluator
/// oracle, whose relative score is reported from the side to move, so it is
/// negated into the mover's perspective before normalizing.
pub struct RewardModel {
    eval_limit: Duration,
    mate_score: i64,
}

/// Mate-in-N scores are clamped to this magnitude before normalizing, which
/// also bounds shaped rewards to [-1, 1].
pub const MATE_SCORE: i64 = 1000;

/// Clamps a score to `mate_score` centipawns and normalizes it into
/// [-1, 1], still relative to the side to move in the scored position.
pub fn normalize_score(score: Score, mate_score: i64) -> f64 {
    let centipawns = match score {
        Score::Cp(cp) => cp.clamp(-mate_score, mate_score),
        // "mate 0" means the side to move already stands mated.
        Score::Mate(n) if n > 0 => mate_score,
        Score::Mate(_) => -mate_score,
    };

    centipawns as f64 / mate_score as f64
}

impl RewardModel {
    pub fn new(eval_limit: Duration) -> Self {
        Self {
            eval_limit,
            mate_score: MATE_SCORE,
        }
    }

    pub fn reward<E: RulesEngine, V: Evaluator>(
        &self,
        rules: &E,
        evaluator: &mut V,
        resulting_state: &E::State,
        mover: usize,
    ) -> Result<f64> {
        if let Some(terminal) = rules.terminal_state(resulting_state) {
            let reward = if terminal.is_draw() {
                0.0
            } else if rules.player_to_move(resulting_state) == mover {
                // Only possible when a rules oracle mates the mover on its
                // own turn; kept for the sign convention's completeness.
                -1.0
            } else {
                1.0
            };

            return Ok(reward);
        }

        match evaluator.analyze(&rules.encode(resulting_state), self.eval_limit)? {
            Some(score) => Ok(-self.normalize(score)),
            None => {
                warn!(
                    "Evaluator returned no usable score for state {}, using a neutral reward",
                    rules.encode(resulting_state)
                );
                Ok(0.0)
            }
        }
    }

    fn normalize(&self, score: Score) -> f64 {
        normalize_score(score, self.mate_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use engine::Terminal;

    /// Two fixed states: 0 is non terminal, anything else carries the
    /// terminal classification given at construction.
    struct FixedRules(Option<Terminal>);

    impl RulesEngine for FixedRules {
        type State = u8;
        type Action = String;

        fn initial_state(&self) -> u8 {
            0
        }

        fn encode(&self, state: &u8) -> String {
            format!("state-{}", state)
        }

        fn legal_actions(&self, _state: &u8) -> Vec<String> {
            vec!["a2a3".into()]
        }

        fn take_action(&self, state: &u8, _action: &String) -> u8 {
            state + 1
        }

        fn terminal_state(&self, state: &u8) -> Option<Terminal> {
            if *state == 0 {
                None
            } else {
                self.0
            }
        }

        fn player_to_move(&self, state: &u8) -> usize {
            (*state as usize % 2) + 1
        }

        fn result_string(&self, _state: &u8) -> Option<String> {
            None
        }
    }

    struct FixedEvaluator(Option<Score>);

    impl Evaluator for FixedEvaluator {
        fn analyze(&mut self, _state_key: &str, _limit: Duration) -> Result<Option<Score>> {
            Ok(self.0)
        }
    }

    struct UnreachableEvaluator;

    impl Evaluator for UnreachableEvaluator {
        fn analyze(&mut self, _state_key: &str, _limit: Duration) -> Result<Option<Score>> {
            panic!("terminal transitions must not consult the evaluator");
        }
    }

    fn model() -> RewardModel {
        RewardModel::new(Duration::from_millis(200))
    }

    #[test]
    fn test_checkmate_rewards_the_mover() {
        let rules = FixedRules(Some(Terminal::Checkmate));

        // State 1 has player 2 to move, so player 1 delivered the mate.
        let reward = model()
            .reward(&rules, &mut UnreachableEvaluator, &1, 1)
            .unwrap();
        assert_eq!(reward, 1.0);
    }

    #[test]
    fn test_checkmate_penalizes_the_mated_side() {
        let rules = FixedRules(Some(Terminal::Checkmate));

        // Asking from the perspective of the side now to move, i.e. the
        // mated side.
        let reward = model()
            .reward(&rules, &mut UnreachableEvaluator, &1, 2)
            .unwrap();
        assert_eq!(reward, -1.0);
    }

    #[test]
    fn test_draws_are_neutral() {
        for terminal in [
            Terminal::Stalemate,
            Terminal::InsufficientMaterial,
            Terminal::SeventyFiveMoves,
            Terminal::FivefoldRepetition,
            Terminal::OtherDraw,
        ] {
            let rules = FixedRules(Some(terminal));
            let reward = model()
                .reward(&rules, &mut UnreachableEvaluator, &1, 1)
                .unwrap();
            assert_eq!(reward, 0.0);
        }
    }

    #[test]
    fn test_shaped_reward_is_normalized_and_mover_relative() {
        let rules = FixedRules(None);

        // +250 cp for the side to move is -0.25 for the mover.
        let mut evaluator = FixedEvaluator(Some(Score::Cp(250)));
        let reward = model().reward(&rules, &mut evaluator, &0, 1).unwrap();
        assert_approx_eq!(reward, -0.25);
    }

    #[test]
    fn test_mate_scores_clamp_to_unit_magnitude() {
        let rules = FixedRules(None);

        let mut evaluator = FixedEvaluator(Some(Score::Mate(3)));
        let reward = model().reward(&rules, &mut evaluator, &0, 1).unwrap();
        assert_eq!(reward, -1.0);

        let mut evaluator = FixedEvaluator(Some(Score::Mate(-2)));
        let reward = model().reward(&rules, &mut evaluator, &0, 1).unwrap();
        assert_eq!(reward, 1.0);
    }

    #[test]
    fn test_mate_zero_counts_against_the_side_to_move() {
        assert_eq!(normalize_score(Score::Mate(0), MATE_SCORE), -1.0);
        assert_eq!(normalize_score(Score::Mate(1), MATE_SCORE), 1.0);
    }

    #[test]
    fn test_oversized_cp_scores_clamp() {
        let rules = FixedRules(None);

        let mut evaluator = FixedEvaluator(Some(Score::Cp(2500)));
        let reward = model().reward(&rules, &mut evaluator, &0, 1).unwrap();
        assert_eq!(reward, -1.0);
    }

    #[test]
    fn test_missing_score_defaults_to_neutral() {
        let rules = FixedRules(None);

        let mut evaluator = FixedEvaluator(None);
        let reward = model().reward(&rules, &mut evaluator, &0, 1).unwrap();
        assert_eq!(reward, 0.0);
    }
}
