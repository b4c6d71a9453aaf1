use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lifesweeper_core::Difficulty;
use lifesweeper_session::*;
use std::fs;
use std::path::{Path, PathBuf};

mod autoplay;
mod play;
mod render;
mod store;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Session settings as a JSON file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Keep leaderboard and streaks as JSON files in this directory
    #[arg(long, global = true)]
    records: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct GameArgs {
    /// easy, normal, hard or very-hard
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Lives per game
    #[arg(short, long)]
    lives: Option<u8>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play in the terminal
    Play {
        #[command(flatten)]
        game: GameArgs,
    },
    /// Let the assist play a batch of games
    Autoplay {
        #[command(flatten)]
        game: GameArgs,

        /// How many games to play
        #[arg(short = 'n', long, default_value_t = 100)]
        games: u32,

        /// Also act on 0% and 100% estimates
        #[arg(long)]
        heuristic: bool,
    },
}

fn load_config(path: Option<&Path>, game: &GameArgs) -> Result<SessionConfig> {
    let mut config = match path {
        Some(path) => {
            let json = fs::read_to_string(path).with_context(|| format!("Could not read {}", path.display()))?;
            SessionConfig::from_json(&json).with_context(|| format!("Invalid config in {}", path.display()))?
        }
        None => SessionConfig::default(),
    };

    if let Some(difficulty) = game.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(seed) = game.seed {
        config.seed = Some(seed);
    }
    if let Some(lives) = game.lives {
        config.lives = lives;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(std::io::stderr)
        .init();
    log::debug!("{args:?}");

    let records = args.records.as_deref().map(store::file_records);

    match args.command {
        Command::Play { game } => {
            let config = load_config(args.config.as_deref(), &game)?;
            play::run(config, records)
        }
        Command::Autoplay {
            game,
            games,
            heuristic,
        } => {
            let mut config = load_config(args.config.as_deref(), &game)?;
            config.heuristic_assist |= heuristic;
            let tally = autoplay::run(config, games, records)?;
            println!("{tally}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_parse() {
        let args = Args::try_parse_from([
            "lifesweeper",
            "autoplay",
            "-n",
            "5",
            "--difficulty",
            "very-hard",
            "--seed",
            "9",
            "--heuristic",
        ])
        .unwrap();

        let Command::Autoplay {
            game,
            games,
            heuristic,
        } = args.command
        else {
            panic!("expected autoplay");
        };
        assert_eq!(games, 5);
        assert!(heuristic);
        assert_eq!(game.difficulty, Some(Difficulty::VeryHard));

        let config = load_config(None, &game).unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.lives, 3);
    }

    #[test]
    fn zero_lives_flag_is_rejected() {
        let args = Args::try_parse_from(["lifesweeper", "play", "--lives", "0"]).unwrap();
        let Command::Play { game } = args.command else {
            panic!("expected play");
        };

        assert!(load_config(None, &game).is_err());
    }
}
