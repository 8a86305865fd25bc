use crate::error::{FastqError, IoContext};
use crate::record::FastqRecord;
use crate::util::has_gz_extension;

use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct WriterOptions {
    /// Repeat the header on the `+` line.
    pub repeat_header: bool,
}

/// Canonical four-line form of `record`, newline-terminated.
pub fn serialize(record: &FastqRecord) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 * record.len() + record.read_id().len() + 8);
    // writing into a Vec cannot fail
    let _ = write_record(&mut out, record, false);
    out
}

fn write_record<W: Write>(w: &mut W, record: &FastqRecord, repeat_header: bool) -> io::Result<u64> {
    let header = record.header();
    w.write_all(b"@")?;
    w.write_all(header.as_bytes())?;
    w.write_all(b"\n")?;
    w.write_all(record.sequence())?;
    w.write_all(b"\n+")?;
    if repeat_header {
        w.write_all(header.as_bytes())?;
    }
    w.write_all(b"\n")?;
    w.write_all(record.quality())?;
    w.write_all(b"\n")?;
    let sep = if repeat_header { header.len() } else { 0 };
    Ok((header.len() + sep + 2 * record.len() + 6) as u64)
}

/// Plain or gzip file sink chosen by [`FastqWriter::create`].
pub enum FileSink {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl Write for FileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(w) => w.write(buf),
            Self::Gzip(w) => w.write(buf),
        }
    }
    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(w) => w.flush(),
            Self::Gzip(w) => w.flush(),
        }
    }
}

/// Serializes [`FastqRecord`]s to any `Write`.
pub struct FastqWriter<W: Write> {
    inner: W,
    opts: WriterOptions,
    records_written: u64,
    byte_pos: u64,
}

impl FastqWriter<FileSink> {
    /// Create `path`, gzip-compressed when it ends in `.gz`.
    pub fn create<P: AsRef<Path>>(path: P, opts: WriterOptions) -> Result<Self, FastqError> {
        let path = path.as_ref();
        let f = File::create(path).map_err(|e| FastqError::io_err(e, IoContext::default()))?;
        let buf = BufWriter::with_capacity(256 * 1024, f);
        let sink = if has_gz_extension(path) {
            log::debug!("writing {} as gzip", path.display());
            FileSink::Gzip(GzEncoder::new(buf, Compression::default()))
        } else {
            FileSink::Plain(buf)
        };
        Ok(Self::new(sink, opts))
    }

    /// Flush and, for gzip output, write the trailer.
    pub fn close(self) -> Result<(), FastqError> {
        let ctx = self.ctx();
        let sink = self.finish()?;
        let buf = match sink {
            FileSink::Plain(buf) => buf,
            FileSink::Gzip(gz) => gz.finish().map_err(|e| FastqError::io_err(e, ctx))?,
        };
        buf.into_inner()
            .map_err(|e| FastqError::io_err(e.into_error(), ctx))?
            .sync_all()
            .map_err(|e| FastqError::io_err(e, ctx))
    }
}

impl<W: Write> FastqWriter<W> {
    pub fn new(inner: W, opts: WriterOptions) -> Self {
        Self {
            inner,
            opts,
            records_written: 0,
            byte_pos: 0,
        }
    }

    pub fn write_record(&mut self, record: &FastqRecord) -> Result<(), FastqError> {
        let n = write_record(&mut self.inner, record, self.opts.repeat_header)
            .map_err(|e| FastqError::io_err(e, self.ctx()))?;
        self.records_written += 1;
        self.byte_pos += n;
        Ok(())
    }

    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W, FastqError> {
        self.inner
            .flush()
            .map_err(|e| FastqError::io_err(e, self.ctx()))?;
        Ok(self.inner)
    }

    #[inline]
    fn ctx(&self) -> IoContext {
        IoContext {
            byte_pos: self.byte_pos,
            line_num: self.records_written * 4,
        }
    }
}
