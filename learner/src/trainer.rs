use anyhow::{anyhow, Result};
use log::info;
use rand::Rng;

use engine::{Evaluator, RulesEngine};

use super::indexer::ActionIndexer;
use super::options::TrainOptions;
use super::policy::Policy;
use super::reward::RewardModel;
use super::table::{max_value, ValueTable};

#[derive(Debug)]
pub struct EpisodeSummary {
    pub result: String,
    pub moves_played: usize,
}

/// Runs self-play episodes and performs the tabular Q-learning update
///
/// ```text
/// Q(s,a) <- (1 - alpha) * Q(s,a) + alpha * (r + gamma * max Q(s',.))
/// ```
///
/// after every applied action. The trainer owns the table for the duration
/// of the run and hands it off through `into_table` once done.
pub struct Trainer<'a, E, V> {
    rules: &'a E,
    evaluator: &'a mut V,
    options: TrainOptions,
    reward_model: RewardModel,
    table: ValueTable,
}

impl<'a, E: RulesEngine, V: Evaluator> Trainer<'a, E, V> {
    pub fn new(rules: &'a E, evaluator: &'a mut V, options: TrainOptions) -> Self {
        let reward_model = RewardModel::new(options.eval_limit());

        Self {
            rules,
            evaluator,
            options,
            reward_model,
            table: ValueTable::new(),
        }
    }

    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    pub fn into_table(self) -> ValueTable {
        self.table
    }

    /// Runs the configured number of episodes. Termination is purely episode
    /// count based; no convergence check is performed.
    pub fn run<R: Rng>(&mut self, rng: &mut R) -> Result<()> {
        for episode in 0..self.options.episodes {
            let summary = self.play_episode(rng)?;

            info!(
                "Episode {}: Game result: {}, Moves played: {}",
                episode + 1,
                summary.result,
                summary.moves_played
            );
        }

        Ok(())
    }

    /// One episode from the initial position to a terminal state.
    pub fn play_episode<R: Rng>(&mut self, rng: &mut R) -> Result<EpisodeSummary> {
        let mut state = self.rules.initial_state();
        let mut moves_played = 0;

        while self.rules.terminal_state(&state).is_none() {
            let mover = self.rules.player_to_move(&state);
            let action = Policy::select(
                self.rules,
                &state,
                &mut self.table,
                self.options.epsilon,
                rng,
            )?;
            let action_index = ActionIndexer::index_of(self.rules, &state, &action)?;

            let next_state = self.rules.take_action(&state, &action);
            let reward = self
                .reward_model
                .reward(self.rules, self.evaluator, &next_state, mover)?;

            self.update(&state, action_index, reward, &next_state)?;

            state = next_state;
            moves_played += 1;
        }

        let result = self
            .rules
            .result_string(&state)
            .ok_or_else(|| anyhow!("Expected a result for a terminal state"))?;

        Ok(EpisodeSummary {
            result,
            moves_played,
        })
    }

    /// Bellman update of `Q(state, action_index)` toward `reward` plus the
    /// discounted best value of `next_state`.
    ///
    /// The next state's vector is lazily initialized all zero, except when
    /// it is terminal: a terminal state has no actions, its future value is
    /// 0 and no entry is recorded for it.
    fn update(
        &mut self,
        state: &E::State,
        action_index: usize,
        reward: f64,
        next_state: &E::State,
    ) -> Result<()> {
        let next_max = if self.rules.terminal_state(next_state).is_some() {
            0.0
        } else {
            let next_key = self.rules.encode(next_state);
            let next_count = ActionIndexer::legal_actions(self.rules, next_state).len();
            max_value(self.table.values_mut(&next_key, next_count)?)
        };

        let state_key = self.rules.encode(state);
        let action_count = ActionIndexer::legal_actions(self.rules, state).len();
        let values = self.table.values_mut(&state_key, action_count)?;

        let alpha = self.options.alpha;
        let gamma = self.options.gamma;
        let old_value = values[action_index];

        values[action_index] = (1.0 - alpha) * old_value + alpha * (reward + gamma * next_max);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use engine::{Score, Terminal};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    /// One legal move from the initial state, straight into checkmate
    /// delivered by player 1.
    struct MateInOneRules;

    impl RulesEngine for MateInOneRules {
        type State = u8;
        type Action = String;

        fn initial_state(&self) -> u8 {
            0
        }

        fn encode(&self, state: &u8) -> String {
            if *state == 0 { "initial" } else { "mated" }.to_string()
        }

        fn legal_actions(&self, state: &u8) -> Vec<String> {
            if *state == 0 {
                vec!["d8h4".into()]
            } else {
                vec![]
            }
        }

        fn take_action(&self, _state: &u8, _action: &String) -> u8 {
            1
        }

        fn terminal_state(&self, state: &u8) -> Option<Terminal> {
            (*state == 1).then_some(Terminal::Checkmate)
        }

        fn player_to_move(&self, state: &u8) -> usize {
            if *state == 0 {
                1
            } else {
                2
            }
        }

        fn result_string(&self, state: &u8) -> Option<String> {
            (*state == 1).then(|| "1-0".to_string())
        }
    }

    struct UnreachableEvaluator;

    impl Evaluator for UnreachableEvaluator {
        fn analyze(&mut self, _state_key: &str, _limit: Duration) -> Result<Option<Score>> {
            panic!("a terminal-only game must never consult the evaluator");
        }
    }

    fn options() -> TrainOptions {
        TrainOptions {
            episodes: 1,
            alpha: 0.1,
            gamma: 0.6,
            epsilon: 0.0,
            eval_time_ms: 200,
        }
    }

    #[test]
    fn test_one_episode_of_mate_in_one() {
        let rules = MateInOneRules;
        let mut evaluator = UnreachableEvaluator;
        let mut trainer = Trainer::new(&rules, &mut evaluator, options());
        let mut rng = StdRng::seed_from_u64(42);

        trainer.run(&mut rng).unwrap();

        // Exactly one entry: the initial state. The terminal successor has
        // no actions and is never recorded.
        let table = trainer.into_table();
        assert_eq!(table.len(), 1);

        // alpha * r with r = +1 for the mating side.
        let values = table.get("initial").unwrap();
        assert_eq!(values.len(), 1);
        assert_approx_eq!(values[0], 0.1);
    }

    #[test]
    fn test_episode_summary_reports_result_and_moves() {
        let rules = MateInOneRules;
        let mut evaluator = UnreachableEvaluator;
        let mut trainer = Trainer::new(&rules, &mut evaluator, options());
        let mut rng = StdRng::seed_from_u64(42);

        let summary = trainer.play_episode(&mut rng).unwrap();
        assert_eq!(summary.result, "1-0");
        assert_eq!(summary.moves_played, 1);
    }

    #[test]
    fn test_repeated_updates_converge_monotonically_toward_reward() {
        // Chain of stub updates against a fixed reward of 0.5 and a zero
        // valued successor: Q must rise toward r without overshooting.
        let rules = MateInOneRules;
        let mut evaluator = UnreachableEvaluator;
        let mut trainer = Trainer::new(&rules, &mut evaluator, options());

        let reward = 0.5;
        let mut previous = 0.0;

        for _ in 0..200 {
            trainer.update(&0, 0, reward, &1).unwrap();

            let current = trainer.table().get("initial").unwrap()[0];
            assert!(current > previous);
            assert!(current <= reward);
            previous = current;
        }

        assert_approx_eq!(previous, reward, 1e-6);
    }

    #[test]
    fn test_worked_bellman_example() {
        // alpha 0.1, gamma 0.6, r 0.5, max Q(s',.) 0 => Q = 0.05.
        let rules = MateInOneRules;
        let mut evaluator = UnreachableEvaluator;
        let mut trainer = Trainer::new(&rules, &mut evaluator, options());

        trainer.update(&0, 0, 0.5, &1).unwrap();

        assert_approx_eq!(trainer.table().get("initial").unwrap()[0], 0.05);
    }

    /// Mirror of `MateInOneRules` where the second player delivers mate on
    /// its first move, exercising the -1 side of the sign convention from
    /// the first mover's perspective.
    struct SecondPlayerMatesRules;

    impl RulesEngine for SecondPlayerMatesRules {
        type State = u8;
        type Action = String;

        fn initial_state(&self) -> u8 {
            0
        }

        fn encode(&self, state: &u8) -> String {
            format!("s{}", state)
        }

        fn legal_actions(&self, state: &u8) -> Vec<String> {
            match state {
                0 => vec!["f2f3".into()],
                1 => vec!["e7e5".into(), "d8h4".into()],
                _ => vec![],
            }
        }

        fn take_action(&self, state: &u8, _action: &String) -> u8 {
            state + 1
        }

        fn terminal_state(&self, state: &u8) -> Option<Terminal> {
            (*state >= 2).then_some(Terminal::Checkmate)
        }

        fn player_to_move(&self, state: &u8) -> usize {
            (*state as usize % 2) + 1
        }

        fn result_string(&self, state: &u8) -> Option<String> {
            (*state >= 2).then(|| "0-1".to_string())
        }
    }

    struct NeutralEvaluator;

    impl Evaluator for NeutralEvaluator {
        fn analyze(&mut self, _state_key: &str, _limit: Duration) -> Result<Option<Score>> {
            Ok(Some(Score::Cp(0)))
        }
    }

    #[test]
    fn test_mate_by_second_player_rewards_both_movers_consistently() {
        let rules = SecondPlayerMatesRules;
        let mut evaluator = NeutralEvaluator;
        let mut trainer = Trainer::new(&rules, &mut evaluator, options());
        let mut rng = StdRng::seed_from_u64(9);

        trainer.play_episode(&mut rng).unwrap();
        let table = trainer.into_table();

        // Player 1's opening move was shaped by a neutral evaluation and
        // pulls in gamma * max Q(s1,.) which is still zero.
        assert_eq!(table.get("s0").unwrap()[0], 0.0);

        // Player 2 mated with the canonically first action (d8h4 sorts
        // before e7e5) and is credited alpha * +1 at index 0.
        let mating_values = table.get("s1").unwrap();
        assert_approx_eq!(mating_values[0], 0.1);
        assert_eq!(mating_values[1], 0.0);
    }
}
