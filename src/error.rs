use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IoContext {
    pub byte_pos: u64,
    pub line_num: u64,
}

/// Structural problem found in a single FASTQ record.
///
/// `line` is always the 1-based number of the first line of the offending record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FastqDefect {
    /// Input ended inside a record. `line` is the header line of the
    /// incomplete record, not the end-of-input line.
    #[error("line {line}: record truncated after {lines_present} line(s)")]
    TruncatedRecord { line: u64, lines_present: usize },
    #[error("line {line}: expected '{expected}' at start of line, found {found:?}")]
    HeaderSigilMismatch {
        line: u64,
        expected: char,
        found: Option<char>,
    },
    #[error("line {line}: header has an empty read id")]
    MissingReadId { line: u64 },
    #[error("line {line}: '+' line {found:?} does not repeat header {expected:?}")]
    SecondHeaderMismatch {
        line: u64,
        expected: String,
        found: String,
    },
    #[error("line {line}: quality length ({qual}) does not match sequence length ({seq})")]
    SequenceQualityLengthMismatch { line: u64, seq: usize, qual: usize },
    #[error("line {line}: invalid base {base:?} at sequence position {position}")]
    InvalidAlphabet {
        line: u64,
        position: usize,
        base: char,
    },
    #[error("line {line}: quality byte 0x{byte:02x} at position {position} is not printable")]
    InvalidQuality { line: u64, position: usize, byte: u8 },
}

impl FastqDefect {
    pub fn line(&self) -> u64 {
        match *self {
            Self::TruncatedRecord { line, .. }
            | Self::HeaderSigilMismatch { line, .. }
            | Self::MissingReadId { line }
            | Self::SecondHeaderMismatch { line, .. }
            | Self::SequenceQualityLengthMismatch { line, .. }
            | Self::InvalidAlphabet { line, .. }
            | Self::InvalidQuality { line, .. } => line,
        }
    }
}

/// Which input of a pair ran out first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairSide {
    Left,
    Right,
}

impl fmt::Display for PairSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FastqError {
    #[error("I/O error at {ctx:?}: {source}")]
    Io {
        #[source]
        source: io::Error,
        ctx: IoContext,
    },
    #[error("malformed FASTQ record: {0}")]
    Defect(#[from] FastqDefect),
    #[error(
        "pair {index} out of sync: {left_id:?} (line {left_line}) vs {right_id:?} (line {right_line})"
    )]
    PairDesynchronization {
        index: u64,
        left_id: String,
        right_id: String,
        left_line: u64,
        right_line: u64,
    },
    #[error("{exhausted} input ended after {index} pairs; other input continues at line {line}")]
    UnevenPairCount {
        index: u64,
        exhausted: PairSide,
        line: u64,
    },
}

impl FastqError {
    pub(crate) fn io_err(source: io::Error, ctx: IoContext) -> Self {
        Self::Io { source, ctx }
    }

    pub fn defect(&self) -> Option<&FastqDefect> {
        match self {
            Self::Defect(d) => Some(d),
            _ => None,
        }
    }

    /// 1-based input line the condition was detected at. For pair errors this is
    /// the line on the left input.
    pub fn line(&self) -> u64 {
        match self {
            Self::Io { ctx, .. } => ctx.line_num,
            Self::Defect(d) => d.line(),
            Self::PairDesynchronization { left_line, .. } => *left_line,
            Self::UnevenPairCount { line, .. } => *line,
        }
    }
}

/// Rejected direct construction of a [`FastqRecord`](crate::FastqRecord).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("read id is empty")]
    EmptyReadId,
    #[error("read id {0:?} contains whitespace")]
    WhitespaceInReadId(String),
    #[error("quality length ({qual}) does not match sequence length ({seq})")]
    LengthMismatch { seq: usize, qual: usize },
    #[error("{field} contains a line break")]
    LineBreak { field: &'static str },
}

#[derive(Debug, Error)]
pub enum NamingError {
    #[error("path did not match R1 FASTQ pattern: {0}")]
    NotR1(PathBuf),
}
