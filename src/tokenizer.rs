//! Grouping of raw lines into record windows.
//!
//! [`Tokenizer`] does no I/O: callers push lines and get a [`RecordCandidate`]
//! back whenever a window is complete. [`Candidates`] drives it from a
//! [`LineSource`].

use crate::error::{FastqDefect, FastqError};
use crate::policy::LineMode;
use crate::source::LineSource;

use std::mem;

/// The raw lines of one record, prior to validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordCandidate {
    /// 1-based line number of the header line.
    pub line: u64,
    pub header: Vec<u8>,
    pub sequence: Vec<u8>,
    pub separator: Vec<u8>,
    pub quality: Vec<u8>,
}

impl RecordCandidate {
    pub fn new(
        line: u64,
        header: impl Into<Vec<u8>>,
        sequence: impl Into<Vec<u8>>,
        separator: impl Into<Vec<u8>>,
        quality: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            line,
            header: header.into(),
            sequence: sequence.into(),
            separator: separator.into(),
            quality: quality.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Header,
    Sequence,
    Separator,
    Quality,
}

#[derive(Debug)]
pub struct Tokenizer {
    line_mode: LineMode,
    line_num: u64,
    start_line: u64,
    lines_present: usize,
    slot: Slot,
    header: Vec<u8>,
    sequence: Vec<u8>,
    separator: Vec<u8>,
    quality: Vec<u8>,
}

impl Tokenizer {
    pub fn new(line_mode: LineMode) -> Self {
        Self {
            line_mode,
            line_num: 0,
            start_line: 0,
            lines_present: 0,
            slot: Slot::Header,
            header: Vec::new(),
            sequence: Vec::new(),
            separator: Vec::new(),
            quality: Vec::new(),
        }
    }

    /// Lines pushed so far.
    #[inline]
    pub fn line_num(&self) -> u64 {
        self.line_num
    }

    /// True when no record is partially assembled.
    #[inline]
    pub fn at_boundary(&self) -> bool {
        self.slot == Slot::Header
    }

    pub fn push_line(&mut self, line: Vec<u8>) -> Option<RecordCandidate> {
        self.line_num += 1;
        match self.slot {
            Slot::Header => {
                // blank lines between records
                if line.is_empty() {
                    return None;
                }
                self.start_line = self.line_num;
                self.lines_present = 1;
                self.header = line;
                self.slot = Slot::Sequence;
                None
            }
            Slot::Sequence => {
                self.lines_present += 1;
                match self.line_mode {
                    LineMode::Single => {
                        self.sequence = line;
                        self.slot = Slot::Separator;
                    }
                    LineMode::Multi => {
                        if line.first() == Some(&b'+') {
                            self.separator = line;
                            self.slot = Slot::Quality;
                        } else {
                            self.sequence.extend_from_slice(&line);
                        }
                    }
                }
                None
            }
            Slot::Separator => {
                self.lines_present += 1;
                self.separator = line;
                self.slot = Slot::Quality;
                None
            }
            Slot::Quality => {
                self.lines_present += 1;
                match self.line_mode {
                    LineMode::Single => {
                        self.quality = line;
                        Some(self.take_candidate())
                    }
                    LineMode::Multi => {
                        self.quality.extend_from_slice(&line);
                        if self.quality.len() >= self.sequence.len() {
                            Some(self.take_candidate())
                        } else {
                            None
                        }
                    }
                }
            }
        }
    }

    /// Signal end of input. A partially assembled record is a `TruncatedRecord`.
    pub fn finish(&mut self) -> Result<(), FastqDefect> {
        if self.at_boundary() {
            return Ok(());
        }
        let defect = FastqDefect::TruncatedRecord {
            line: self.start_line,
            lines_present: self.lines_present,
        };
        self.take_candidate();
        Err(defect)
    }

    fn take_candidate(&mut self) -> RecordCandidate {
        self.slot = Slot::Header;
        self.lines_present = 0;
        RecordCandidate {
            line: self.start_line,
            header: mem::take(&mut self.header),
            sequence: mem::take(&mut self.sequence),
            separator: mem::take(&mut self.separator),
            quality: mem::take(&mut self.quality),
        }
    }
}

/// Lazy sequence of [`RecordCandidate`]s read from a [`LineSource`].
///
/// Errors are either `FastqError::Io` or a `TruncatedRecord` defect; both end
/// the sequence.
pub struct Candidates<S: LineSource> {
    source: S,
    tokenizer: Tokenizer,
    done: bool,
}

impl<S: LineSource> Candidates<S> {
    pub fn new(source: S, line_mode: LineMode) -> Self {
        Self {
            source,
            tokenizer: Tokenizer::new(line_mode),
            done: false,
        }
    }

    #[inline]
    pub fn line_num(&self) -> u64 {
        self.tokenizer.line_num()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn close(&mut self) {
        self.done = true;
        self.source.close();
    }
}

impl<S: LineSource> Iterator for Candidates<S> {
    type Item = Result<RecordCandidate, FastqError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.source.next_line() {
                Ok(Some(line)) => {
                    if let Some(candidate) = self.tokenizer.push_line(line) {
                        return Some(Ok(candidate));
                    }
                }
                Ok(None) => {
                    self.close();
                    return self.tokenizer.finish().err().map(|d| Err(d.into()));
                }
                Err(e) => {
                    let ctx = self.source.position();
                    self.close();
                    return Some(Err(FastqError::io_err(e, ctx)));
                }
            }
        }
    }
}
