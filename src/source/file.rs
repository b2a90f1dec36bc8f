//! File-based line source (read-once).

use crate::model::error::InputError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::info;

/// Lines loaded from a file at construction.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    pending: Option<Vec<String>>,
}

impl FileSource {
    /// Read the whole file.
    ///
    /// Invalid UTF-8 is replaced rather than rejected, so binary noise in a
    /// log does not prevent viewing it.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist and
    /// `InputError::Io` for other I/O errors.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let mut reader = BufReader::new(File::open(path)?);
        let mut lines = Vec::new();
        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buffer);
            lines.push(line.trim_end_matches(['\n', '\r']).to_string());
        }
        info!(path = %path.display(), lines = lines.len(), "Loaded file");

        Ok(Self {
            path: path.to_path_buf(),
            pending: Some(lines),
        })
    }

    /// Path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All lines on the first call, nothing afterwards.
    pub fn drain_lines(&mut self) -> Vec<String> {
        self.pending.take().unwrap_or_default()
    }
}
