//! Streaming FASTQ parsing, validation and paired-end synchronization.
//!
//! - Plain and `.gz` input (auto-detect), consumed line by line.
//! - Records are tokenized into four-line windows, validated, and yielded lazily.
//! - Strict mode stops on the first malformed record; tolerant mode reports
//!   defects in-band, optionally up to a limit.
//! - Paired-end files are walked in lockstep with read-id checks.
//! - Canonical FASTQ writer (plain or `.gz`).
//! - Illumina-style R1/R2 file naming helpers and read-group discovery.
//! - Optional async API behind `async` feature.

pub mod discover;
pub mod error;
pub mod naming;
pub mod pair;
pub mod policy;
pub mod record;
pub mod source;
pub mod stream;
pub mod tokenizer;
pub mod validator;
pub mod writer;
mod util;

#[cfg(feature = "async")]
pub mod async_stream;

pub use crate::error::{FastqDefect, FastqError, IoContext, NamingError, PairSide, RecordError};
pub use crate::pair::{PairedStream, zip};
pub use crate::policy::{LineMode, Mode, StreamOptions};
pub use crate::record::{FastqRecord, reverse_complement, strip_pair_suffix};
pub use crate::source::{BufLineSource, LineSource, Source};
pub use crate::stream::{FastqStream, StreamStats, open};
pub use crate::tokenizer::{Candidates, RecordCandidate, Tokenizer};
pub use crate::validator::Validator;
pub use crate::writer::{FastqWriter, FileSink, WriterOptions, serialize};

#[cfg(feature = "async")]
pub use crate::async_stream::AsyncFastqStream;
