//! FASTQ filtering by GC content, length, and mean quality.
//!
//! Each record is judged independently against [`FilterThresholds`]; all
//! range checks are inclusive on both ends, and passing records keep their
//! input order.

use std::path::Path;
use std::str::FromStr;

use crate::error::{ConfigError, FastqError};
use crate::policy::ReaderOptions;
use crate::reader::FastqReader;
use crate::record::FastqRecord;
use crate::writer::FastqWriter;

/// Inclusive `(lower, upper)` range over f64.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    lower: f64,
    upper: f64,
}

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Result<Self, ConfigError> {
        if lower > upper {
            return Err(ConfigError::Inverted { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Upper bound only, with an implicit lower bound of 0.
    pub fn with_upper(upper: f64) -> Result<Self, ConfigError> {
        Self::new(0.0, upper)
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Inclusive on both ends.
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Parses `"MAX"` or `"MIN,MAX"`.
impl FromStr for Bounds {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let num = |part: &str| {
            part.trim().parse::<f64>().map_err(|e| ConfigError::Parse {
                input: s.to_string(),
                reason: e.to_string(),
            })
        };
        match s.split_once(',') {
            Some((lo, hi)) => Self::new(num(lo)?, num(hi)?),
            None => Self::with_upper(num(s)?),
        }
    }
}

/// Per-record acceptance thresholds.
#[derive(Debug, Clone, Copy)]
pub struct FilterThresholds {
    /// Inclusive GC-percentage range. Default (0, 100).
    pub gc_bounds: Bounds,
    /// Inclusive sequence-length range. Default (0, 2^32).
    pub length_bounds: Bounds,
    /// Inclusive lower bound on mean Phred quality. Default 0.
    pub quality_threshold: f64,
}

impl Default for FilterThresholds {
    fn default() -> Self {
        Self {
            gc_bounds: Bounds {
                lower: 0.0,
                upper: 100.0,
            },
            length_bounds: Bounds {
                lower: 0.0,
                upper: 4_294_967_296.0,
            },
            quality_threshold: 0.0,
        }
    }
}

/// Whether a record meets all three thresholds. Boundary values pass.
pub fn passes(record: &FastqRecord, thresholds: &FilterThresholds) -> bool {
    thresholds.gc_bounds.contains(record.gc_percent())
        && thresholds.length_bounds.contains(record.len() as f64)
        && record.avg_quality() >= thresholds.quality_threshold
}

/// Filter an in-memory record sequence, preserving relative order.
pub fn filter_records<I>(records: I, thresholds: &FilterThresholds) -> Vec<FastqRecord>
where
    I: IntoIterator<Item = FastqRecord>,
{
    records
        .into_iter()
        .filter(|r| passes(r, thresholds))
        .collect()
}

/// Counts from one filtering pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSummary {
    pub total: u64,
    pub kept: u64,
}

/// Filter `input` into `output` in one streaming pass.
///
/// Records are read, judged, and written one at a time in input order.
/// Malformed records abort or are skipped per `options.error_policy`.
pub fn filter_fastq<P, Q>(
    input: P,
    output: Q,
    thresholds: &FilterThresholds,
    options: ReaderOptions,
) -> Result<FilterSummary, FastqError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let reader = FastqReader::from_path(input, options)?;
    let mut writer = FastqWriter::to_path(output)?;

    let mut total = 0u64;
    let mut kept = 0u64;
    for rec in reader {
        let rec = rec?;
        total += 1;
        if passes(&rec, thresholds) {
            writer.write_record(&rec)?;
            kept += 1;
        }
    }
    writer.finish()?;

    log::info!("filter_fastq: kept {kept} of {total} records");
    Ok(FilterSummary { total, kept })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_parse_pair_and_single() {
        let b: Bounds = "30,80".parse().unwrap();
        assert_eq!(b.lower(), 30.0);
        assert_eq!(b.upper(), 80.0);

        let b: Bounds = "80".parse().unwrap();
        assert_eq!(b.lower(), 0.0);
        assert_eq!(b.upper(), 80.0);
    }

    #[test]
    fn bounds_rejects_inverted() {
        assert!(matches!(
            Bounds::new(10.0, 5.0),
            Err(ConfigError::Inverted { .. })
        ));
        assert!(matches!(
            "80,30".parse::<Bounds>(),
            Err(ConfigError::Inverted { .. })
        ));
    }

    #[test]
    fn bounds_rejects_non_numeric() {
        assert!(matches!(
            "abc".parse::<Bounds>(),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            "1,x".parse::<Bounds>(),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn bounds_contains_is_inclusive() {
        let b = Bounds::new(10.0, 20.0).unwrap();
        assert!(b.contains(10.0));
        assert!(b.contains(20.0));
        assert!(!b.contains(9.999));
        assert!(!b.contains(20.001));
    }
}
