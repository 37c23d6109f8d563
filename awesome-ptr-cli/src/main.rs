///! Awesome PTR CLI
///!
///! Command-line tooling for the pull-to-refresh core: replay recorded
///! gesture traces, inspect tension curves and resolved configuration

mod commands;
mod config;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ptr", author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output format (table, json, yaml)
    #[arg(short, long)]
    output: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    /// Configuration file (overrides the standard locations)
    #[arg(short, long, env = "PTR_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded gesture trace through the state machine
    Replay {
        /// Trace file (JSON)
        file: PathBuf,
        /// Only print caller-facing callbacks
        #[arg(long)]
        callbacks_only: bool,
    },
    /// Print the tension curve for a range of raw drag distances
    Curve {
        /// Tension exponent (defaults to the configured one)
        #[arg(short, long)]
        exponent: Option<f64>,
        /// Largest raw distance in pixels
        #[arg(short, long, default_value_t = 200.0)]
        max: f64,
        /// Step between rows in pixels
        #[arg(short, long, default_value_t = 20.0)]
        step: f64,
    },
    /// Show the resolved configuration
    Config,
    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::LoggingConfig::from_verbosity(cli.verbose, cli.log_json).init()?;

    let config = config::Config::load(cli.config.as_deref())?;
    let output = cli
        .output
        .as_deref()
        .unwrap_or(&config.default_output)
        .to_string();

    match cli.command {
        Commands::Replay {
            file,
            callbacks_only,
        } => commands::replay::handle_replay_command(&file, callbacks_only, &config, &output)?,
        Commands::Curve { exponent, max, step } => {
            commands::curve::handle_curve_command(exponent, max, step, &config, &output)?
        }
        Commands::Config => commands::show_config::handle_config_command(&config, &output)?,
        Commands::Completions { shell } => {
            generate_completions(shell);
        }
    }

    Ok(())
}

/// Generate shell completions
fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut io::stdout());
}
