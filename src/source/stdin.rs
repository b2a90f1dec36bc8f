//! Stdin-based line source for piped input.
//!
//! A background thread reads lines and hands them over a channel, so the
//! event loop can poll without blocking (`tail -f app.log | rowscope`).

use crate::model::error::InputError;
use std::io::{BufRead, BufReader, IsTerminal, Read};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use tracing::{debug, warn};

#[derive(Debug)]
enum ReaderMessage {
    Line(String),
    Failed(std::io::Error),
    Eof,
}

/// Stdin source for piped input.
#[derive(Debug)]
pub struct StdinSource {
    rx: Receiver<ReaderMessage>,
    complete: bool,
}

impl StdinSource {
    /// Create a new StdinSource from the process stdin.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NoInput` if stdin is a TTY. This prevents the TUI
    /// from blocking on keyboard input when the user forgot to pipe data.
    pub fn new() -> Result<Self, InputError> {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(InputError::NoInput);
        }
        Ok(Self::from_reader(stdin))
    }

    /// Create a source reading from any reader on a background thread.
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let reader = BufReader::new(reader);
            for line in reader.lines() {
                let message = match line {
                    Ok(line) => ReaderMessage::Line(line),
                    Err(err) => ReaderMessage::Failed(err),
                };
                let failed = matches!(message, ReaderMessage::Failed(_));
                if tx.send(message).is_err() || failed {
                    return;
                }
            }
            let _ = tx.send(ReaderMessage::Eof);
        });
        Self {
            rx,
            complete: false,
        }
    }

    /// Drain every line received since the previous poll.
    ///
    /// Non-blocking. A read error ends the stream; it is returned only when
    /// no line arrived in the same poll, otherwise it is logged.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` when the reader failed.
    pub fn poll(&mut self) -> Result<Vec<String>, InputError> {
        let mut lines = Vec::new();
        while !self.complete {
            match self.rx.try_recv() {
                Ok(ReaderMessage::Line(line)) => lines.push(line),
                Ok(ReaderMessage::Eof) | Err(TryRecvError::Disconnected) => {
                    debug!(received = lines.len(), "Stdin reached EOF");
                    self.complete = true;
                }
                Ok(ReaderMessage::Failed(err)) => {
                    self.complete = true;
                    if lines.is_empty() {
                        return Err(InputError::Io(err));
                    }
                    warn!(error = %err, "Stdin read failed, keeping lines read so far");
                }
                Err(TryRecvError::Empty) => break,
            }
        }
        Ok(lines)
    }

    /// Check if EOF has been reached (no more data will arrive).
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}
