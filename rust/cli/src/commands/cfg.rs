//! Configuration command handler.
//!
//! Prints every setting with the layer it came from (default, file or
//! environment) as pretty JSON:
//!
//! ```json
//! {
//!   "seats": {
//!     "value": 6,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources().map_err(|e| CliError::Config(e.to_string()))?;

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "seats": {
            "value": config.seats,
            "source": sources.seats,
        },
        "starting_chips": {
            "value": config.starting_chips,
            "source": sources.starting_chips,
        },
        "small_blind": {
            "value": config.small_blind,
            "source": sources.small_blind,
        },
        "big_blind": {
            "value": config.big_blind,
            "source": sources.big_blind,
        },
        "equity_samples": {
            "value": config.equity_samples,
            "source": sources.equity_samples,
        },
        "ai": {
            "value": config.ai,
            "source": sources.ai,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
