//! Error types for rowscope.
//!
//! Errors form a small hierarchy built with `thiserror` and compose via `?`
//! and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - top-level error returned from the binary's main loop
//!   - [`InputError`] - file/stdin reading failures
//!   - [`ConfigError`] - config file failures
//!   - [`LoggingError`] - subscriber initialization failures
//!   - `std::io::Error` - terminal failures
//!
//! Failures inside the list core never reach this hierarchy: a failed
//! selection restoration clears the selection and logs, and an unmeasured
//! row height only defers the window calculation.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// Every variant is fatal for the binary: the terminal is restored and the
/// message printed to stderr.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read input from file or stdin.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// Failed to load configuration.
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    /// Failed to set up logging.
    #[error("Failed to initialize logging: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when reading lines from files or stdin.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified file does not exist.
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use rowscope::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.log"),
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.log"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was attempted.
        path: PathBuf,
    },

    /// No file argument and stdin is an interactive terminal.
    #[error("No input source: provide a file path or pipe data to stdin")]
    NoInput,

    /// Any other I/O failure while reading input.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn input_error_file_not_found_display() {
        let err = InputError::FileNotFound {
            path: PathBuf::from("/tmp/missing.log"),
        };
        let msg = err.to_string();
        assert!(msg.contains("File not found"));
        assert!(msg.contains("/tmp/missing.log"));
    }

    #[test]
    fn input_error_no_input_display() {
        let msg = InputError::NoInput.to_string();
        assert!(msg.contains("No input source"));
        assert!(msg.contains("file path or pipe data to stdin"));
    }

    #[test]
    fn io_error_converts_through_both_levels() {
        fn read() -> Result<(), InputError> {
            let failed: Result<(), io::Error> =
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
            failed?;
            Ok(())
        }
        fn run() -> Result<(), AppError> {
            read()?;
            Ok(())
        }
        let err = run().expect_err("should fail");
        assert!(matches!(err, AppError::Input(InputError::Io(_))));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn terminal_error_wraps_io_directly() {
        let err = AppError::from(io::Error::new(io::ErrorKind::BrokenPipe, "pipe"));
        assert!(matches!(err, AppError::Terminal(_)));
        assert_eq!(err.to_string(), "Terminal error: pipe");
    }
}
