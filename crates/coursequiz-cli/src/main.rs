//! coursequiz CLI: a line-oriented host for the quiz engine.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::filter::{Directive, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "coursequiz", version, about = "In-course quiz assessment engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a quiz interactively, reading commands from stdin
    Take {
        /// Path to quiz JSON (raw content or a course element)
        #[arg(long)]
        quiz: PathBuf,

        /// Seed for reproducible shuffles
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the completion report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a quiz file
    Validate {
        /// Path to quiz JSON (raw content or a course element)
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Create an example quiz covering every question kind
    Init,
}

fn main() {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "coursequiz=info".parse::<Directive>() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take {
            quiz,
            seed,
            config,
            json,
        } => commands::take::execute(quiz, seed, config, json),
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
