//! Line input sources.
//!
//! - File loading for read-once file input
//! - Stdin for piped input (live streaming)
//! - Unified [`InputSource`] enum for both

use crate::model::error::InputError;
use std::path::PathBuf;

pub mod file;
pub mod stdin;

pub use file::FileSource;
pub use stdin::StdinSource;

/// Unified input source.
#[derive(Debug)]
pub enum InputSource {
    /// File source - read-once loading
    File(FileSource),
    /// Stdin source - reads from piped stdin (live streaming)
    Stdin(StdinSource),
}

impl InputSource {
    /// Poll for new lines.
    ///
    /// Non-blocking. A file yields everything on the first call and nothing
    /// after; stdin yields lines as they arrive.
    ///
    /// # Errors
    ///
    /// Returns `InputError` for I/O errors.
    pub fn poll(&mut self) -> Result<Vec<String>, InputError> {
        match self {
            InputSource::File(f) => Ok(f.drain_lines()),
            InputSource::Stdin(s) => s.poll(),
        }
    }

    /// Check if the source can still receive more data.
    pub fn is_live(&self) -> bool {
        match self {
            InputSource::File(_) => false,
            InputSource::Stdin(s) => !s.is_complete(),
        }
    }

    /// Short label for the status bar.
    pub fn label(&self) -> String {
        match self {
            InputSource::File(f) => f
                .path()
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| f.path().display().to_string()),
            InputSource::Stdin(_) => "<stdin>".to_string(),
        }
    }
}

/// Detect and create the appropriate input source.
///
/// A file path wins; otherwise stdin is used when it is piped.
///
/// # Errors
///
/// Returns `InputError::NoInput` if no file is provided and stdin is a TTY,
/// `InputError::FileNotFound` if the file does not exist.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => Ok(InputSource::File(FileSource::new(path)?)),
        None => Ok(InputSource::Stdin(StdinSource::new()?)),
    }
}
