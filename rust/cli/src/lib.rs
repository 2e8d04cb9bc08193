//! # Parlor CLI Library
//!
//! Headless driver for the Parlor card-game engines. It deals and inspects
//! hands, runs AI-only simulations that write JSONL histories, and answers
//! equity and hand-comparison questions.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Available Subcommands
//!
//! - `deal`: Deal a single hold'em hand or blackjack round for inspection
//! - `sim`: Play AI-only hands and optionally record them
//! - `equity`: Estimate win probability for a hole-card pair
//! - `compare`: Compare two hands of five to seven cards
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;
pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod logging;
pub mod ui;

use cli::{Commands, ParlorCli};
use commands::{
    handle_cfg_command, handle_compare_command, handle_deal_command, handle_equity_command,
    handle_sim_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["deal", "sim", "equity", "compare", "cfg"];

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand handler.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` for interruptions
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["parlor", "compare", "--a", "AS AD KC 7S 2D", "--b", "KS KD QC 7D 2H"];
/// let mut out = Vec::new();
/// let code = parlor_cli::run(args, &mut out, &mut io::stderr());
/// assert_eq!(code, 0);
/// assert!(String::from_utf8(out).unwrap().contains("A wins"));
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let parsed = ParlorCli::try_parse_from(&argv);
    match parsed {
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    let _ = write_usage(&e, err);
                    exit_code::ERROR
                }
            }
        }
        Ok(cli) => {
            let result = match cli.cmd {
                Commands::Deal { game, seed, seats } => {
                    handle_deal_command(game, seed, seats, out)
                }
                Commands::Sim {
                    game,
                    hands,
                    seed,
                    output,
                    ai,
                    seats,
                } => handle_sim_command(game, hands, output, seed, ai, seats, out, err),
                Commands::Equity {
                    hand,
                    board,
                    opponents,
                    samples,
                    seed,
                } => handle_equity_command(&hand, &board, opponents, samples, seed, out),
                Commands::Compare { a, b } => handle_compare_command(&a, &b, out),
                Commands::Cfg => handle_cfg_command(out),
            };
            finish(result, err)
        }
    }
}

fn write_usage(e: &clap::Error, err: &mut dyn Write) -> std::io::Result<()> {
    writeln!(err, "{}", e)?;
    writeln!(err)?;
    writeln!(err, "Parlor card-game CLI")?;
    writeln!(err, "Usage: parlor <command> [options]\n")?;
    writeln!(err, "Commands:")?;
    for c in COMMANDS {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: parlor --help")
}

fn finish(result: Result<(), CliError>, err: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(_)) => exit_code::INTERRUPTED,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}
