mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{apply, init, inspect, validate, ApplyArgs, InitArgs, InspectArgs, ValidateArgs};

/// Mailblocks CLI - edit and check email templates from the terminal
#[derive(Parser, Debug)]
#[command(name = "mailblocks")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a config file and a blank template
    Init(InitArgs),

    /// Apply a list of mutations to a template
    Apply(ApplyArgs),

    /// Print a template's row/column/block tree
    Inspect(InspectArgs),

    /// Check templates for layout and id problems
    Validate(ValidateArgs),
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Apply(args) => apply(args, &cwd),
        Command::Inspect(args) => inspect(args),
        Command::Validate(args) => validate(args),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
