use crate::error::{FastqError, IoContext};
use crate::record::FastqRecord;
use crate::util::has_gz_extension;

#[cfg(feature = "gzip")]
use flate2::{Compression, write::GzEncoder};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

// Held concretely so `finish` can emit the gzip trailer and surface its
// error instead of leaving it to `GzEncoder`'s drop, which discards errors.
enum Sink {
    Plain(BufWriter<File>),
    #[cfg(feature = "gzip")]
    Gz(BufWriter<GzEncoder<File>>),
    Boxed(Box<dyn Write + Send>),
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Plain(w) => w.write(buf),
            #[cfg(feature = "gzip")]
            Sink::Gz(w) => w.write(buf),
            Sink::Boxed(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Plain(w) => w.flush(),
            #[cfg(feature = "gzip")]
            Sink::Gz(w) => w.flush(),
            Sink::Boxed(w) => w.flush(),
        }
    }
}

/// Four-line FASTQ writer (plain/.gz, chosen by extension).
pub struct FastqWriter {
    w: Sink,
}

impl FastqWriter {
    /// Create the output file. A `.gz` extension selects gzip compression.
    pub fn to_path<P: AsRef<Path>>(path: P) -> Result<Self, FastqError> {
        let path = path.as_ref();
        let f = File::create(path).map_err(|e| FastqError::io_err(e, IoContext::default()))?;

        let w = if has_gz_extension(path) {
            #[cfg(feature = "gzip")]
            {
                Sink::Gz(BufWriter::with_capacity(
                    256 * 1024,
                    GzEncoder::new(f, Compression::default()),
                ))
            }
            #[cfg(not(feature = "gzip"))]
            {
                return Err(FastqError::io_err(
                    io::Error::new(io::ErrorKind::Unsupported, "gzip support not enabled"),
                    IoContext::default(),
                ));
            }
        } else {
            Sink::Plain(BufWriter::with_capacity(256 * 1024, f))
        };

        Ok(Self { w })
    }

    /// Wrap an arbitrary `Write` (stdout, an in-memory buffer, etc.).
    /// `finish` only flushes here; the caller owns any framing.
    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            w: Sink::Boxed(Box::new(writer)),
        }
    }

    /// Write one record as `@id [desc]`, sequence, `+`, quality.
    pub fn write_record(&mut self, rec: &FastqRecord) -> Result<(), FastqError> {
        self.write_record_io(rec)
            .map_err(|e| FastqError::io_err(e, IoContext::default()))
    }

    fn write_record_io(&mut self, rec: &FastqRecord) -> io::Result<()> {
        match &rec.desc {
            Some(d) => writeln!(self.w, "@{} {}", rec.id, d)?,
            None => writeln!(self.w, "@{}", rec.id)?,
        }
        self.w.write_all(&rec.seq)?;
        self.w.write_all(b"\n+\n")?;
        self.w.write_all(&rec.qual)?;
        self.w.write_all(b"\n")?;
        Ok(())
    }

    /// Flush buffered output and, for gzip, write the trailer. Any write
    /// failure is returned to the caller.
    pub fn finish(self) -> Result<(), FastqError> {
        self.finish_io()
            .map_err(|e| FastqError::io_err(e, IoContext::default()))
    }

    fn finish_io(self) -> io::Result<()> {
        match self.w {
            Sink::Plain(mut w) => w.flush(),
            #[cfg(feature = "gzip")]
            Sink::Gz(w) => {
                let enc = w.into_inner().map_err(|e| e.into_error())?;
                enc.finish()?;
                Ok(())
            }
            Sink::Boxed(mut w) => w.flush(),
        }
    }
}
