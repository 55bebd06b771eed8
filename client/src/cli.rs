use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[clap(author, version)]
#[clap(name = "Tabular Q-Learning Chess Client")]
#[clap(about = "Trains and plays a tabular action-value chess policy", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Train(TrainCommand),
    Play(PlayCommand),
    Evaluate(EvaluateCommand),
}

#[derive(Args)]
#[clap(about = "Runs self-play training episodes and saves the value table", long_about = None)]
pub struct TrainCommand {
    #[clap(short, long, default_value_t = String::from("client.conf"))]
    pub config: String,
}

#[derive(Args)]
#[clap(about = "Plays human vs agent using a previously trained value table", long_about = None)]
pub struct PlayCommand {
    #[clap(short, long, default_value_t = String::from("client.conf"))]
    pub config: String,
}

#[derive(Args)]
#[clap(about = "Scores a finished game move by move with the evaluator", long_about = None)]
pub struct EvaluateCommand {
    #[clap(short, long, default_value_t = String::from("client.conf"))]
    pub config: String,

    /// File holding the game as whitespace separated moves in UCI notation.
    #[clap(short, long)]
    pub moves: String,
}
