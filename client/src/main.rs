mod cli;
mod evaluate;
mod play;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use env_logger::Env;
use log::info;

use chess::ChessEngine;
use cli::{Cli, Commands};
use common::{ConfigLoader, FsExt};
use learner::{TablePersistance, TrainOptions, Trainer};
use uci::UciEngine;

fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Train(train_args) => {
            let config_path = train_args.config.relative_to_cwd()?;
            let config = ConfigLoader::new(config_path, "train".to_string())?;

            let options: TrainOptions = config.load()?;
            let engine_path = config.get_relative_path("engine_path")?;
            let table_path = table_path(&config)?;

            let rules = ChessEngine::new();

            // A failed launch aborts before any episode is played.
            let mut evaluator = UciEngine::launch(&engine_path)?;

            let mut trainer = Trainer::new(&rules, &mut evaluator, options);
            let mut rng = rand::thread_rng();

            let run_result = trainer.run(&mut rng);
            let table = trainer.into_table();

            let quit_result = evaluator.quit();
            run_result?;
            quit_result?;

            TablePersistance::new(table_path.clone()).save(&table)?;
            info!(
                "Training completed, {} states saved to {:?}",
                table.len(),
                table_path
            );
        }
        Commands::Play(play_args) => {
            let config_path = play_args.config.relative_to_cwd()?;
            let config = ConfigLoader::new(config_path, "play".to_string())?;

            let table = TablePersistance::new(table_path(&config)?).load()?;
            info!("Loaded value table with {} states", table.len());

            let rules = ChessEngine::new();
            let mut rng = rand::thread_rng();

            play::play(&rules, &table, &mut rng)?;
        }
        Commands::Evaluate(evaluate_args) => {
            let config_path = evaluate_args.config.relative_to_cwd()?;
            let config = ConfigLoader::new(config_path, "evaluate".to_string())?;

            let options: TrainOptions = config.load()?;
            let engine_path = config.get_relative_path("engine_path")?;

            let moves_path = evaluate_args.moves.relative_to_cwd()?;
            let moves = std::fs::read_to_string(&moves_path)
                .with_context(|| format!("Failed to read moves file at {:?}", moves_path))?;
            let moves = moves.split_whitespace().collect::<Vec<_>>();

            let rules = ChessEngine::new();
            let mut evaluator = UciEngine::launch(&engine_path)?;

            let accuracy_result =
                evaluate::evaluate_game(&rules, &mut evaluator, &moves, options.eval_limit());

            let quit_result = evaluator.quit();
            let accuracy = accuracy_result?;
            quit_result?;

            info!(
                "White accuracy: {:.2}, Black accuracy: {:.2}",
                accuracy.white, accuracy.black
            );
        }
    }

    Ok(())
}

fn table_path(config: &ConfigLoader) -> Result<PathBuf> {
    config
        .get("table_path")
        .and_then(|v| v.as_string())
        .unwrap_or_else(|| "q_table.json.gz".to_string())
        .relative_to_cwd()
}
