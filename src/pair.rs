use crate::error::{FastqError, PairSide};
use crate::record::FastqRecord;
use crate::source::LineSource;
use crate::stream::FastqStream;

/// Walks two record streams in lockstep, checking read-id correspondence.
///
/// Desynchronized ids and uneven record counts are fatal. Errors from either
/// underlying stream are passed through unchanged (left first when both sides
/// fail in the same step); one element is still consumed from each side, and
/// the pair stream ends if either side has ended.
pub struct PairedStream<A: LineSource, B: LineSource> {
    left: FastqStream<A>,
    right: FastqStream<B>,
    index: u64,
    // right-side error of a step where both sides failed
    pending: Option<FastqError>,
    finished: bool,
}

pub fn zip<A: LineSource, B: LineSource>(
    left: FastqStream<A>,
    right: FastqStream<B>,
) -> PairedStream<A, B> {
    PairedStream::new(left, right)
}

impl<A: LineSource, B: LineSource> PairedStream<A, B> {
    pub fn new(left: FastqStream<A>, right: FastqStream<B>) -> Self {
        Self {
            left,
            right,
            index: 0,
            pending: None,
            finished: false,
        }
    }

    /// Elements (pairs or passed-through errors) yielded so far.
    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn into_inner(self) -> (FastqStream<A>, FastqStream<B>) {
        (self.left, self.right)
    }

    pub fn next_pair(&mut self) -> Option<Result<(FastqRecord, FastqRecord), FastqError>> {
        if let Some(err) = self.pending.take() {
            return Some(Err(err));
        }
        if self.finished {
            return None;
        }
        let item = match (self.left.next_record(), self.right.next_record()) {
            (None, None) => {
                self.finished = true;
                return None;
            }
            (Some(Err(left_err)), Some(Err(right_err))) => {
                self.pending = Some(right_err);
                Err(self.pass_through(left_err))
            }
            (Some(Err(err)), _) | (_, Some(Err(err))) => Err(self.pass_through(err)),
            (Some(Ok(_)), None) => {
                let err = FastqError::UnevenPairCount {
                    index: self.index,
                    exhausted: PairSide::Right,
                    line: self.left.current_line(),
                };
                return Some(Err(self.fail(err)));
            }
            (None, Some(Ok(_))) => {
                let err = FastqError::UnevenPairCount {
                    index: self.index,
                    exhausted: PairSide::Left,
                    line: self.right.current_line(),
                };
                return Some(Err(self.fail(err)));
            }
            (Some(Ok(l)), Some(Ok(r))) => {
                if l.base_read_id() != r.base_read_id() {
                    let err = FastqError::PairDesynchronization {
                        index: self.index,
                        left_id: l.read_id().to_string(),
                        right_id: r.read_id().to_string(),
                        left_line: self.left.current_line(),
                        right_line: self.right.current_line(),
                    };
                    return Some(Err(self.fail(err)));
                }
                Ok((l, r))
            }
        };
        self.index += 1;
        Some(item)
    }

    fn pass_through(&mut self, err: FastqError) -> FastqError {
        if self.left.is_finished() || self.right.is_finished() {
            return self.fail(err);
        }
        err
    }

    fn fail(&mut self, err: FastqError) -> FastqError {
        log::debug!("paired stream stopped: {err}");
        self.finished = true;
        self.left.close();
        self.right.close();
        err
    }
}

impl<A: LineSource, B: LineSource> Iterator for PairedStream<A, B> {
    type Item = Result<(FastqRecord, FastqRecord), FastqError>;
    fn next(&mut self) -> Option<Self::Item> {
        self.next_pair()
    }
}
