//! Error types for the CLI application.
//!
//! Every command handler returns `Result<(), CliError>`; `run` maps the
//! variant to an exit code.

use parlor_engine::errors::GameError;
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Rejected by a game engine
    Engine(GameError),

    /// Stopped before the requested number of hands
    Interrupted(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(e) => write!(f, "Engine error: {}", e),
            CliError::Interrupted(msg) => write!(f, "Interrupted: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Engine(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_keep_their_message() {
        let e: CliError = GameError::InvalidCard("ZZ".into()).into();
        assert_eq!(e.to_string(), "Engine error: Invalid card: \"ZZ\"");
        assert!(std::error::Error::source(&e).is_some());
    }

    #[test]
    fn input_errors_have_no_source() {
        let e = CliError::InvalidInput("hands must be >= 1".into());
        assert_eq!(e.to_string(), "Invalid input: hands must be >= 1");
        assert!(std::error::Error::source(&e).is_none());
    }
}
