use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Position of the reader inside its input, for error reporting.
#[derive(Debug, Clone, Copy, Default)]
pub struct IoContext {
    pub byte_pos: u64,
    pub line_num: u64,
}

/// A structurally malformed FASTQ record.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("expected header '@' at start of record")]
    MissingHeader,
    #[error("missing '+' separator line")]
    MissingPlus,
    #[error("unexpected EOF inside record")]
    UnexpectedEof,
    #[error("quality length ({qual}) does not match sequence length ({seq})")]
    LengthMismatch { seq: usize, qual: usize },
    #[error("empty sequence")]
    EmptySequence,
}

#[derive(Debug, Error)]
pub enum FastqError {
    #[error("input not found: {path}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("I/O error at {ctx:?}: {source}")]
    Io {
        #[source]
        source: io::Error,
        ctx: IoContext,
    },
    #[error("format error at {ctx:?}: {source}")]
    Format {
        #[source]
        source: FormatError,
        ctx: IoContext,
    },
}

impl FastqError {
    pub(crate) fn io_err(source: io::Error, ctx: IoContext) -> Self {
        Self::Io { source, ctx }
    }
    pub(crate) fn fmt_err(source: FormatError, ctx: IoContext) -> Self {
        Self::Format { source, ctx }
    }
    pub(crate) fn open_err(source: io::Error, path: &std::path::Path) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
                source,
            }
        } else {
            Self::io_err(source, IoContext::default())
        }
    }
}

/// Invalid filter thresholds.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("inverted bounds: lower {lower} is greater than upper {upper}")]
    Inverted { lower: f64, upper: f64 },
    #[error("cannot parse bounds from '{input}': {reason}")]
    Parse { input: String, reason: String },
}

/// Sequence-level validation failure or an operation the molecule does not support.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid {molecule} character '{ch}' at position {pos}")]
    InvalidCharacter {
        molecule: &'static str,
        ch: char,
        pos: usize,
    },
    #[error("{op} is not defined for {molecule} sequences")]
    UnsupportedOperation {
        op: &'static str,
        molecule: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("input not found: {path}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl FastaError {
    pub(crate) fn open_err(source: io::Error, path: &std::path::Path) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
                source,
            }
        } else {
            Self::Io(source)
        }
    }
}
