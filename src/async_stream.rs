#![cfg(feature = "async")]

use crate::error::{FastqError, IoContext};
use crate::policy::{Mode, StreamOptions};
use crate::record::FastqRecord;
use crate::source::strip_line_ending;
use crate::stream::{StreamState, StreamStats};
use crate::tokenizer::Tokenizer;
use crate::validator::Validator;

use async_compression::tokio::bufread::GzipDecoder;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::io::{AsyncReadExt, AsyncSeekExt, SeekFrom};

#[derive(Debug)]
pub enum AsyncSource {
    Path(PathBuf),
    Reader,
}

/// Async FASTQ record stream (plain/.gz); same semantics as [`FastqStream`](crate::FastqStream).
pub struct AsyncFastqStream {
    src: AsyncSource,
    rdr: Option<Box<dyn AsyncBufRead + Unpin + Send>>,
    tokenizer: Tokenizer,
    validator: Validator,
    state: StreamState,
    line_num: u64,
    byte_pos: u64,
}

impl AsyncFastqStream {
    /// Open async from path; `.gz` auto-detect by extension or magic bytes.
    pub async fn from_path<P: AsRef<Path>>(
        path: P,
        opts: StreamOptions,
    ) -> Result<Self, FastqError> {
        let path = path.as_ref().to_path_buf();
        let mut f = File::open(&path)
            .await
            .map_err(|e| FastqError::io_err(e, IoContext::default()))?;

        let is_gz = path.extension().and_then(|s| s.to_str()) == Some("gz")
            || looks_like_gzip_async(&mut f).await.unwrap_or(false);

        let rdr: Box<dyn AsyncBufRead + Unpin + Send> = if is_gz {
            log::debug!("opening {} as gzip", path.display());
            let mut gz = GzipDecoder::new(BufReader::with_capacity(256 * 1024, f));
            // bgzip and concatenated files carry one record block per member
            gz.multiple_members(true);
            Box::new(BufReader::with_capacity(256 * 1024, gz))
        } else {
            Box::new(BufReader::with_capacity(256 * 1024, f))
        };

        Ok(Self::with_reader(AsyncSource::Path(path), rdr, opts))
    }

    /// Wrap any async `AsyncBufRead`.
    pub fn from_async_bufread<R>(reader: R, opts: StreamOptions) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        Self::with_reader(AsyncSource::Reader, Box::new(reader), opts)
    }

    fn with_reader(
        src: AsyncSource,
        rdr: Box<dyn AsyncBufRead + Unpin + Send>,
        opts: StreamOptions,
    ) -> Self {
        Self {
            src,
            rdr: Some(rdr),
            tokenizer: Tokenizer::new(opts.line_mode),
            validator: Validator::from(&opts),
            state: StreamState::new(&opts),
            line_num: 0,
            byte_pos: 0,
        }
    }

    /// Fetch next record (async).
    pub async fn next_record(&mut self) -> Option<Result<FastqRecord, FastqError>> {
        if self.state.is_finished() {
            return None;
        }
        loop {
            let line = match self.read_line().await {
                Ok(line) => line,
                Err(e) => {
                    let ctx = self.ctx();
                    let err = self.state.fail(FastqError::io_err(e, ctx));
                    self.close();
                    return Some(Err(err));
                }
            };
            let Some(line) = line else {
                let outcome = self.tokenizer.finish();
                self.close();
                return outcome
                    .err()
                    .map(|defect| self.state.admit(defect.line(), Err(defect)));
            };
            if let Some(cand) = self.tokenizer.push_line(line) {
                let line = cand.line;
                let outcome = self.validator.validate_owned(cand);
                let item = self.state.admit(line, outcome);
                if self.state.is_finished() {
                    self.close();
                }
                return Some(item);
            }
        }
    }

    async fn read_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        let Some(rdr) = self.rdr.as_mut() else {
            return Ok(None);
        };
        let mut buf = Vec::with_capacity(256);
        let n = rdr.read_until(b'\n', &mut buf).await?;
        if n == 0 {
            return Ok(None);
        }
        self.line_num += 1;
        self.byte_pos += n as u64;
        strip_line_ending(&mut buf);
        Ok(Some(buf))
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn stats(&self) -> StreamStats {
        self.state.stats(self.line_num)
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn source(&self) -> &AsyncSource {
        &self.src
    }

    /// Stop iterating and release the reader.
    pub fn close(&mut self) {
        self.state.finish();
        self.rdr = None;
    }

    #[inline]
    fn ctx(&self) -> IoContext {
        IoContext {
            byte_pos: self.byte_pos,
            line_num: self.line_num,
        }
    }
}

async fn looks_like_gzip_async(f: &mut File) -> io::Result<bool> {
    let pos = f.stream_position().await?;
    let mut magic = [0u8; 2];
    let n = f.read(&mut magic).await?;
    f.seek(SeekFrom::Start(pos)).await?;
    Ok(n >= 2 && magic == [0x1F, 0x8B])
}
