//! Order-preserving line storage with an optional bound
//!
//! Backs both the raw buffer and the pause buffer. Without a capacity it grows
//! for the lifetime of the session; with one it behaves as a ring that drops
//! its oldest line on overflow.

use crate::types::LogLine;
use std::collections::VecDeque;

/// Ordered line storage, optionally bounded
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    lines: VecDeque<LogLine>,
    capacity: Option<usize>,
}

impl LineBuffer {
    /// Create a buffer. `None` means unbounded.
    ///
    /// A capacity of zero is treated as one so the newest line is always kept.
    pub fn new(capacity: Option<usize>) -> Self {
        let capacity = capacity.map(|c| c.max(1));
        Self {
            lines: VecDeque::with_capacity(capacity.unwrap_or(0).min(10_000)),
            capacity,
        }
    }

    /// Append a line, returning the line evicted to make room (if any)
    pub fn push(&mut self, line: LogLine) -> Option<LogLine> {
        let evicted = match self.capacity {
            Some(cap) if self.lines.len() >= cap => self.lines.pop_front(),
            _ => None,
        };
        self.lines.push_back(line);
        evicted
    }

    /// Remove and return every line, oldest first
    pub fn drain(&mut self) -> Vec<LogLine> {
        self.lines.drain(..).collect()
    }

    /// Drop leading lines older than `seq`, returning how many were dropped
    pub fn trim_before(&mut self, seq: u64) -> usize {
        let mut dropped = 0;
        while self.lines.front().is_some_and(|line| line.seq < seq) {
            self.lines.pop_front();
            dropped += 1;
        }
        dropped
    }

    /// Sequence number of the oldest stored line
    pub fn first_seq(&self) -> Option<u64> {
        self.lines.front().map(|line| line.seq)
    }

    /// Iterate lines, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &LogLine> {
        self.lines.iter()
    }

    /// Texts of all stored lines, oldest first
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(LogLine::as_str).collect()
    }

    /// Number of stored lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Remove all lines, keeping the bound
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl Extend<LogLine> for LineBuffer {
    fn extend<T: IntoIterator<Item = LogLine>>(&mut self, iter: T) {
        for line in iter {
            self.push(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(seq: u64) -> LogLine {
        LogLine::new(seq, format!("line{seq}"))
    }

    #[test]
    fn test_unbounded_keeps_everything() {
        let mut buffer = LineBuffer::new(None);
        for seq in 0..100 {
            assert_eq!(buffer.push(line(seq)), None);
        }
        assert_eq!(buffer.len(), 100);
        assert_eq!(buffer.first_seq(), Some(0));
    }

    #[test]
    fn test_bounded_evicts_oldest() {
        let mut buffer = LineBuffer::new(Some(2));
        assert_eq!(buffer.push(line(0)), None);
        assert_eq!(buffer.push(line(1)), None);
        assert_eq!(buffer.push(line(2)), Some(line(0)));
        assert_eq!(buffer.texts(), vec!["line1", "line2"]);
    }

    #[test]
    fn test_zero_capacity_keeps_newest() {
        let mut buffer = LineBuffer::new(Some(0));
        buffer.push(line(0));
        buffer.push(line(1));
        assert_eq!(buffer.texts(), vec!["line1"]);
    }

    #[test]
    fn test_trim_before() {
        let mut buffer = LineBuffer::new(None);
        buffer.extend([line(1), line(4), line(6)]);
        assert_eq!(buffer.trim_before(5), 2);
        assert_eq!(buffer.first_seq(), Some(6));
        assert_eq!(buffer.trim_before(5), 0);
    }

    #[test]
    fn test_drain_empties_in_order() {
        let mut buffer = LineBuffer::new(None);
        buffer.extend([line(0), line(1)]);
        let drained = buffer.drain();
        assert_eq!(drained, vec![line(0), line(1)]);
        assert!(buffer.is_empty());
    }
}
