//! Line sources
//!
//! Turn a byte stream (stdin or a tailed file) into newline-terminated text
//! chunks and hand them to the controller as `LineIngested` messages.

use crate::dispatcher::Dispatcher;
use ansi_parser::{AnsiParser, Output};
use rtt_log_stream::ControlMessage;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

const READ_BUFFER_SIZE: usize = 8 * 1024;

/// Reassembles complete lines from arbitrarily split byte reads
///
/// Bytes are decoded as Latin-1, so any byte sequence maps to text and a
/// multi-byte split can never corrupt a line. A trailing partial line is held
/// back until its newline arrives.
#[derive(Debug, Default)]
pub struct LineAssembler {
    partial: String,
    strip_ansi: bool,
}

impl LineAssembler {
    pub fn new(strip_ansi: bool) -> Self {
        Self {
            partial: String::new(),
            strip_ansi,
        }
    }

    /// Feed bytes, returning the completed lines as one chunk
    ///
    /// Every line in the returned chunk ends with `\n`.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Option<String> {
        self.partial.extend(bytes.iter().map(|&b| char::from(b)));

        let end = self.partial.rfind('\n')? + 1;
        let rest = self.partial.split_off(end);
        let complete = std::mem::replace(&mut self.partial, rest);
        Some(self.clean(&complete))
    }

    /// Flush a trailing line that never got its newline
    pub fn finish(&mut self) -> Option<String> {
        if self.partial.is_empty() {
            return None;
        }
        let mut last = std::mem::take(&mut self.partial);
        last.push('\n');
        Some(self.clean(&last))
    }

    /// Bytes held back waiting for a newline
    pub fn partial_len(&self) -> usize {
        self.partial.len()
    }

    fn clean(&self, chunk: &str) -> String {
        let chunk = chunk.replace("\r\n", "\n");
        if self.strip_ansi {
            strip_ansi(&chunk)
        } else {
            chunk
        }
    }
}

/// Remove ANSI escape sequences, keeping only the text blocks
pub fn strip_ansi(text: &str) -> String {
    text.ansi_parse()
        .filter_map(|block| match block {
            Output::TextBlock(t) => Some(t),
            Output::Escape(_) => None,
        })
        .collect()
}

/// Read stdin on a background thread until EOF
pub fn spawn_stdin_source(dispatcher: Dispatcher, strip_ansi: bool) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut assembler = LineAssembler::new(strip_ansi);
        let mut stdin = io::stdin().lock();
        let mut buf = [0u8; READ_BUFFER_SIZE];

        loop {
            match stdin.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    if let Some(chunk) = assembler.push_bytes(&buf[..n]) {
                        if !dispatcher.dispatch(ControlMessage::LineIngested(chunk)) {
                            return;
                        }
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    log::error!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }

        if let Some(chunk) = assembler.finish() {
            dispatcher.dispatch(ControlMessage::LineIngested(chunk));
        }
        log::info!("stdin closed");
    })
}

/// Tails a file, picking up bytes appended since the last poll
pub struct FileTailSource {
    path: PathBuf,
    last_position: u64,
    assembler: LineAssembler,
}

impl FileTailSource {
    pub fn new(path: PathBuf, strip_ansi: bool) -> Self {
        Self {
            path,
            last_position: 0,
            assembler: LineAssembler::new(strip_ansi),
        }
    }

    /// Read whatever was appended since the last poll (non-blocking)
    ///
    /// A file that shrank was truncated or replaced; reading restarts from
    /// its beginning.
    pub fn poll(&mut self) -> io::Result<Option<String>> {
        let mut file = File::open(&self.path)?;
        let current_size = file.metadata()?.len();

        if current_size < self.last_position {
            log::info!(
                "{} was truncated, reading from the start",
                self.path.display()
            );
            self.last_position = 0;
            self.assembler = LineAssembler::new(self.assembler.strip_ansi);
        }

        if current_size == self.last_position {
            return Ok(None); // No new content
        }

        file.seek(SeekFrom::Start(self.last_position))?;
        let mut bytes = Vec::new();
        file.take(current_size - self.last_position)
            .read_to_end(&mut bytes)?;
        self.last_position += bytes.len() as u64;

        Ok(self.assembler.push_bytes(&bytes))
    }

    /// Current read offset in the file
    pub fn position(&self) -> u64 {
        self.last_position
    }

    /// Poll on a background thread until `stop` is set
    pub fn spawn(
        mut self,
        dispatcher: Dispatcher,
        interval: Duration,
        stop: Arc<AtomicBool>,
    ) -> JoinHandle<()> {
        thread::spawn(move || {
            let mut reported_missing = false;
            while !stop.load(Ordering::Relaxed) {
                match self.poll() {
                    Ok(Some(chunk)) => {
                        reported_missing = false;
                        if !dispatcher.dispatch(ControlMessage::LineIngested(chunk)) {
                            return;
                        }
                    }
                    Ok(None) => reported_missing = false,
                    Err(e) => {
                        // The file may not exist yet; keep polling
                        if !reported_missing {
                            log::warn!("Cannot read {}: {}", self.path.display(), e);
                            reported_missing = true;
                        }
                    }
                }
                thread::sleep(interval);
            }
            log::debug!("Stopped tailing {}", self.path.display());
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_partial_line_is_held_back() {
        let mut assembler = LineAssembler::new(false);
        assert_eq!(assembler.push_bytes(b"hel"), None);
        assert_eq!(assembler.partial_len(), 3);
        assert_eq!(
            assembler.push_bytes(b"lo\nwor").as_deref(),
            Some("hello\n")
        );
        assert_eq!(assembler.push_bytes(b"ld\n").as_deref(), Some("world\n"));
        assert_eq!(assembler.finish(), None);
    }

    #[test]
    fn test_crlf_split_across_reads() {
        let mut assembler = LineAssembler::new(false);
        assert_eq!(assembler.push_bytes(b"a\r"), None);
        assert_eq!(assembler.push_bytes(b"\nb\r\n").as_deref(), Some("a\nb\n"));
    }

    #[test]
    fn test_finish_terminates_last_line() {
        let mut assembler = LineAssembler::new(false);
        assembler.push_bytes(b"tail");
        assert_eq!(assembler.finish().as_deref(), Some("tail\n"));
        assert_eq!(assembler.partial_len(), 0);
    }

    #[test]
    fn test_latin1_bytes_decode() {
        let mut assembler = LineAssembler::new(false);
        assert_eq!(
            assembler.push_bytes(&[b'x', 0xE9, b'\n']).as_deref(),
            Some("x\u{e9}\n")
        );
    }

    #[test]
    fn test_ansi_stripped() {
        let mut assembler = LineAssembler::new(true);
        assert_eq!(
            assembler
                .push_bytes(b"\x1b[31merror\x1b[0m: boom\n")
                .as_deref(),
            Some("error: boom\n")
        );

        let mut keep = LineAssembler::new(false);
        assert_eq!(
            keep.push_bytes(b"\x1b[1mbold\n").as_deref(),
            Some("\x1b[1mbold\n")
        );
    }

    #[test]
    fn test_file_tail_reads_appended_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rtt.log");
        std::fs::write(&path, "one\ntw").unwrap();

        let mut source = FileTailSource::new(path.clone(), true);
        assert_eq!(source.poll().unwrap().as_deref(), Some("one\n"));
        assert_eq!(source.poll().unwrap(), None);

        let mut file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(b"o\nthree\n").unwrap();
        assert_eq!(source.poll().unwrap().as_deref(), Some("two\nthree\n"));
        assert_eq!(source.position(), 14);
    }

    #[test]
    fn test_file_tail_restarts_after_truncation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rtt.log");
        std::fs::write(&path, "first run\n").unwrap();

        let mut source = FileTailSource::new(path.clone(), true);
        assert_eq!(source.poll().unwrap().as_deref(), Some("first run\n"));

        std::fs::write(&path, "new\n").unwrap();
        assert_eq!(source.poll().unwrap().as_deref(), Some("new\n"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = FileTailSource::new(dir.path().join("absent.log"), true);
        assert!(source.poll().is_err());
    }
}
