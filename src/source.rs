use crate::error::{FastqError, IoContext};
use crate::util::{has_gz_extension, looks_like_gzip, open_file};

#[cfg(feature = "gzip")]
use flate2::read::MultiGzDecoder;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// A forward-only producer of logical lines.
pub trait LineSource {
    /// Next line with its `\n` / `\r\n` terminator removed; `None` at end of stream.
    fn next_line(&mut self) -> io::Result<Option<Vec<u8>>>;

    /// Bytes and lines consumed so far.
    fn position(&self) -> IoContext;

    /// Release the underlying reader. Later reads report end of stream.
    fn close(&mut self);
}

#[derive(Debug)]
pub enum Source {
    Path(PathBuf),
    Reader,
}

/// [`LineSource`] over a buffered byte stream (file, `.gz` file, stdin, ...).
pub struct BufLineSource {
    src: Source,
    rdr: Option<Box<dyn BufRead + Send>>,
    line_num: u64,
    byte_pos: u64,
}

impl BufLineSource {
    /// Open from a file path. Auto-detect `.gz` by extension or magic bytes.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FastqError> {
        let path = path.as_ref();
        let f = open_file(path).map_err(|e| FastqError::io_err(e, IoContext::default()))?;

        let is_gz = has_gz_extension(path) || looks_like_gzip(&f).unwrap_or(false);

        let rdr: Box<dyn BufRead + Send> = if is_gz {
            #[cfg(feature = "gzip")]
            {
                log::debug!("opening {} as gzip", path.display());
                let dec = MultiGzDecoder::new(f);
                Box::new(BufReader::with_capacity(256 * 1024, dec))
            }
            #[cfg(not(feature = "gzip"))]
            {
                return Err(FastqError::io_err(
                    io::Error::new(
                        io::ErrorKind::Unsupported,
                        "gzip input requires the `gzip` feature",
                    ),
                    IoContext::default(),
                ));
            }
        } else {
            #[cfg(feature = "mmap")]
            {
                use memmap2::Mmap;
                log::debug!("memory-mapping {}", path.display());
                // Own the Mmap inside Cursor to avoid self-ref problems
                let mmap = unsafe { Mmap::map(&f) }
                    .map_err(|e| FastqError::io_err(e, IoContext::default()))?;
                let cursor = io::Cursor::new(mmap);
                Box::new(BufReader::with_capacity(512 * 1024, cursor))
            }
            #[cfg(not(feature = "mmap"))]
            {
                log::debug!("opening {} as plain text", path.display());
                Box::new(BufReader::with_capacity(256 * 1024, f))
            }
        };

        Ok(Self {
            src: Source::Path(path.to_path_buf()),
            rdr: Some(rdr),
            line_num: 0,
            byte_pos: 0,
        })
    }

    /// Wrap an arbitrary `BufRead` (stdin, etc.).
    pub fn from_bufread<R: BufRead + Send + 'static>(reader: R) -> Self {
        Self {
            src: Source::Reader,
            rdr: Some(Box::new(reader)),
            line_num: 0,
            byte_pos: 0,
        }
    }

    pub fn source(&self) -> &Source {
        &self.src
    }

    pub fn is_closed(&self) -> bool {
        self.rdr.is_none()
    }
}

impl LineSource for BufLineSource {
    fn next_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        let Some(rdr) = self.rdr.as_mut() else {
            return Ok(None);
        };
        let mut buf = Vec::with_capacity(256);
        let n = rdr.read_until(b'\n', &mut buf)?;
        if n == 0 {
            return Ok(None);
        }
        self.line_num += 1;
        self.byte_pos += n as u64;
        strip_line_ending(&mut buf);
        Ok(Some(buf))
    }

    #[inline]
    fn position(&self) -> IoContext {
        IoContext {
            byte_pos: self.byte_pos,
            line_num: self.line_num,
        }
    }

    fn close(&mut self) {
        if self.rdr.take().is_some() {
            log::debug!("closed {:?} after {} lines", self.src, self.line_num);
        }
    }
}

impl<S: LineSource + ?Sized> LineSource for Box<S> {
    fn next_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        (**self).next_line()
    }
    fn position(&self) -> IoContext {
        (**self).position()
    }
    fn close(&mut self) {
        (**self).close()
    }
}

pub(crate) fn strip_line_ending(buf: &mut Vec<u8>) {
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
}
