use crate::error::{FastqDefect, FastqError};
use crate::policy::{Mode, StreamOptions};
use crate::record::FastqRecord;
use crate::source::{BufLineSource, LineSource};
use crate::tokenizer::Candidates;
use crate::validator::Validator;

use std::io::BufRead;
use std::path::Path;

/// Counters for one open stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub lines_read: u64,
    pub records_yielded: u64,
    pub defects_seen: u64,
}

/// Strictness bookkeeping shared by the sync and async streams.
#[derive(Debug)]
pub(crate) struct StreamState {
    mode: Mode,
    max_defects: u64,
    records_yielded: u64,
    defects_seen: u64,
    current_line: u64,
    finished: bool,
}

impl StreamState {
    pub(crate) fn new(opts: &StreamOptions) -> Self {
        Self {
            mode: opts.mode,
            max_defects: opts.max_defects_before_abort as u64,
            records_yielded: 0,
            defects_seen: 0,
            current_line: 0,
            finished: false,
        }
    }

    /// Turn one classified candidate into the element handed to the caller,
    /// terminating the stream when the mode says so.
    pub(crate) fn admit(
        &mut self,
        line: u64,
        outcome: Result<FastqRecord, FastqDefect>,
    ) -> Result<FastqRecord, FastqError> {
        self.current_line = line;
        match outcome {
            Ok(rec) => {
                self.records_yielded += 1;
                Ok(rec)
            }
            Err(defect) => {
                self.defects_seen += 1;
                match self.mode {
                    Mode::Strict => {
                        log::debug!("strict stream stopped: {defect}");
                        self.finish();
                    }
                    Mode::Tolerant => {
                        log::warn!("malformed FASTQ record: {defect}");
                        if self.max_defects > 0 && self.defects_seen >= self.max_defects {
                            log::warn!(
                                "aborting FASTQ stream after {} defects",
                                self.defects_seen
                            );
                            self.finish();
                        }
                    }
                }
                Err(FastqError::Defect(defect))
            }
        }
    }

    /// Record a condition that is fatal regardless of mode.
    pub(crate) fn fail(&mut self, err: FastqError) -> FastqError {
        log::debug!("stream stopped: {err}");
        self.current_line = err.line();
        self.finish();
        err
    }

    #[inline]
    pub(crate) fn finish(&mut self) {
        self.finished = true;
    }

    #[inline]
    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }

    #[inline]
    pub(crate) fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub(crate) fn current_line(&self) -> u64 {
        self.current_line
    }

    pub(crate) fn stats(&self, lines_read: u64) -> StreamStats {
        StreamStats {
            lines_read,
            records_yielded: self.records_yielded,
            defects_seen: self.defects_seen,
        }
    }
}

/// Lazy sequence of validated FASTQ records over a [`LineSource`].
///
/// In [`Mode::Strict`] the first defect is yielded as an error and the stream
/// ends. In [`Mode::Tolerant`] defects are yielded in-band and iteration
/// continues with the next record window. I/O errors always end the stream.
/// The source is closed as soon as the stream ends, whichever way it ends.
pub struct FastqStream<S: LineSource = BufLineSource> {
    candidates: Candidates<S>,
    validator: Validator,
    state: StreamState,
}

impl FastqStream<BufLineSource> {
    /// Open from a file path. Auto-detect `.gz` by extension or magic bytes.
    pub fn from_path<P: AsRef<Path>>(path: P, opts: StreamOptions) -> Result<Self, FastqError> {
        Ok(Self::open(BufLineSource::from_path(path)?, opts))
    }

    /// Wrap an arbitrary `BufRead` (stdin, etc.).
    pub fn from_bufread<R: BufRead + Send + 'static>(reader: R, opts: StreamOptions) -> Self {
        Self::open(BufLineSource::from_bufread(reader), opts)
    }
}

impl<S: LineSource> FastqStream<S> {
    pub fn open(source: S, opts: StreamOptions) -> Self {
        Self {
            candidates: Candidates::new(source, opts.line_mode),
            validator: Validator::from(&opts),
            state: StreamState::new(&opts),
        }
    }

    pub fn next_record(&mut self) -> Option<Result<FastqRecord, FastqError>> {
        if self.state.is_finished() {
            return None;
        }
        let item = match self.candidates.next() {
            None => {
                self.close();
                return None;
            }
            Some(Ok(cand)) => {
                let line = cand.line;
                let outcome = self.validator.validate_owned(cand);
                self.state.admit(line, outcome)
            }
            Some(Err(FastqError::Defect(defect))) => self.state.admit(defect.line(), Err(defect)),
            Some(Err(err)) => Err(self.state.fail(err)),
        };
        if self.state.is_finished() {
            self.candidates.close();
        }
        Some(item)
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn stats(&self) -> StreamStats {
        self.state.stats(self.candidates.line_num())
    }

    /// Header line of the most recently yielded element (0 before the first).
    pub fn current_line(&self) -> u64 {
        self.state.current_line()
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn source(&self) -> &S {
        self.candidates.source()
    }

    /// Stop iterating and release the source.
    pub fn close(&mut self) {
        self.state.finish();
        self.candidates.close();
    }
}

impl<S: LineSource> Iterator for FastqStream<S> {
    type Item = Result<FastqRecord, FastqError>;
    fn next(&mut self) -> Option<Self::Item> {
        FastqStream::next_record(self)
    }
}

/// Open a stream over `source`.
pub fn open<S: LineSource>(source: S, opts: StreamOptions) -> FastqStream<S> {
    FastqStream::open(source, opts)
}
