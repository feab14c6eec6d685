mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{blocks, replay, BlocksArgs, ReplayArgs};
use tracing_subscriber::EnvFilter;

/// Cardrev CLI - inspect card markup and replay editing sessions
#[derive(Parser, Debug)]
#[command(name = "cardrev")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the trackable blocks of a card
    Blocks(BlocksArgs),

    /// Run a scripted editing session against a template
    Replay(ReplayArgs),
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Command::Blocks(args) => blocks(args, &cwd),
        Command::Replay(args) => replay(args, &cwd),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
