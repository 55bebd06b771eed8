use std::time::Duration;

use anyhow::Result;
use common::Config;
use serde::{Deserialize, Serialize};

/// Hyperparameters for one training run. Fixed for the whole run; there is
/// no schedule and no convergence check, training stops after `episodes`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TrainOptions {
    pub episodes: usize,
    pub alpha: f64,
    pub gamma: f64,
    pub epsilon: f64,
    pub eval_time_ms: u64,
}

impl TrainOptions {
    pub fn eval_limit(&self) -> Duration {
        Duration::from_millis(self.eval_time_ms)
    }
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            episodes: 100,
            alpha: 0.1,
            gamma: 0.6,
            epsilon: 0.1,
            eval_time_ms: 200,
        }
    }
}

impl Config for TrainOptions {
    fn load(config: &common::ConfigLoader) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            episodes: config
                .get("episodes")
                .and_then(|v| v.as_usize())
                .unwrap_or(defaults.episodes),
            alpha: config
                .get("alpha")
                .and_then(|v| v.as_f64())
                .unwrap_or(defaults.alpha),
            gamma: config
                .get("gamma")
                .and_then(|v| v.as_f64())
                .unwrap_or(defaults.gamma),
            epsilon: config
                .get("epsilon")
                .and_then(|v| v.as_f64())
                .unwrap_or(defaults.epsilon),
            eval_time_ms: config
                .get("eval_time_ms")
                .and_then(|v| v.as_u64())
                .unwrap_or(defaults.eval_time_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::ConfigLoader;

    fn loader(content: &str, scope: &str) -> ConfigLoader {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.conf");
        std::fs::write(&path, content).unwrap();

        ConfigLoader::new(&path, scope.to_string()).unwrap()
    }

    #[test]
    fn test_every_field_defaults_when_unconfigured() {
        let config = loader("unrelated = 1\n", "train");
        let options: TrainOptions = config.load().unwrap();

        assert_eq!(options.episodes, 100);
        assert_eq!(options.alpha, 0.1);
        assert_eq!(options.gamma, 0.6);
        assert_eq!(options.epsilon, 0.1);
        assert_eq!(options.eval_time_ms, 200);
    }

    #[test]
    fn test_fields_read_from_the_train_scope() {
        let conf = r#"
train {
  episodes = 5
  alpha = 0.2
  gamma = 0.9
  epsilon = 0.05
  eval_time_ms = 50
}
"#;
        let config = loader(conf, "train");
        let options: TrainOptions = config.load().unwrap();

        assert_eq!(options.episodes, 5);
        assert_eq!(options.alpha, 0.2);
        assert_eq!(options.gamma, 0.9);
        assert_eq!(options.epsilon, 0.05);
        assert_eq!(options.eval_limit(), Duration::from_millis(50));
    }
}
