//! Small bioinformatics toolbox.
//!
//! - Validated DNA/RNA/protein sequences with complement, reverse,
//!   reverse-complement, transcription, and cysteine lookup.
//! - FASTQ filtering by GC content, length, and mean Phred quality
//!   (inclusive bounds, input order preserved).
//! - Multi-line-FASTA to single-line-FASTA conversion.
//! - Streaming FASTQ reader/writer, plain and `.gz` (auto-detect).
//! - Malformed-record policy: abort (default) or skip with a logged warning.

pub mod error;
pub mod fasta;
pub mod filter;
pub mod policy;
pub mod reader;
pub mod record;
pub mod seq;
pub mod writer;
mod util;

pub use crate::error::{
    ConfigError, FastaError, FastqError, FormatError, IoContext, ValidationError,
};
pub use crate::fasta::{FastaMap, convert_multiline_fasta_to_oneline, flatten_lines};
pub use crate::filter::{
    Bounds, FilterSummary, FilterThresholds, filter_fastq, filter_records, passes,
};
pub use crate::policy::{ErrorPolicy, ReaderOptions};
pub use crate::reader::FastqReader;
pub use crate::record::FastqRecord;
pub use crate::seq::{BioSeq, Molecule};
pub use crate::writer::FastqWriter;
