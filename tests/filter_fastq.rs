use bioseq_ut::{
    Bounds, ErrorPolicy, FastqError, FastqRecord, FilterThresholds, ReaderOptions, filter_fastq,
    filter_records, passes,
};
use std::fs;
use std::io::Write;
use tempfile::tempdir;

fn rec(id: &str, seq: &str, qual: &str) -> FastqRecord {
    FastqRecord {
        id: id.to_string(),
        desc: None,
        seq: seq.as_bytes().to_vec(),
        qual: qual.as_bytes().to_vec(),
    }
}

fn thresholds(gc: (f64, f64), len: (f64, f64), quality: f64) -> FilterThresholds {
    FilterThresholds {
        gc_bounds: Bounds::new(gc.0, gc.1).unwrap(),
        length_bounds: Bounds::new(len.0, len.1).unwrap(),
        quality_threshold: quality,
    }
}

#[test]
fn all_gc_read_passes_wide_bounds() {
    // GGGGCCCC: length 8, GC 100%, quality all 'I' (Phred 40)
    let r = rec("r1", "GGGGCCCC", "IIIIIIII");
    assert!(passes(&r, &thresholds((0.0, 100.0), (0.0, 100.0), 30.0)));
}

#[test]
fn all_gc_read_excluded_by_gc_upper_bound() {
    let r = rec("r1", "GGGGCCCC", "IIIIIIII");
    assert!(!passes(&r, &thresholds((0.0, 50.0), (0.0, 100.0), 30.0)));
}

#[test]
fn boundary_values_pass_inclusively() {
    // GC exactly at the upper bound, length exactly at the lower bound,
    // mean quality exactly at the threshold
    let r = rec("r1", "GGGGCCCC", "IIIIIIII");
    assert!(passes(&r, &thresholds((0.0, 100.0), (8.0, 100.0), 40.0)));

    // GC exactly at the lower bound
    let half = rec("r2", "ATGC", "IIII");
    assert!(passes(&half, &thresholds((50.0, 50.0), (0.0, 100.0), 0.0)));
}

#[test]
fn just_past_boundary_fails() {
    let r = rec("r1", "GGGGCCCC", "IIIIIIII");
    // length lower bound one above the actual length
    assert!(!passes(&r, &thresholds((0.0, 100.0), (9.0, 100.0), 0.0)));
    // quality threshold just above the mean
    assert!(!passes(&r, &thresholds((0.0, 100.0), (0.0, 100.0), 40.5)));
}

#[test]
fn empty_sequence_has_zero_gc() {
    let r = rec("r1", "", "");
    assert!(passes(&r, &thresholds((0.0, 0.0), (0.0, 10.0), 0.0)));
    assert!(!passes(&r, &thresholds((1.0, 100.0), (0.0, 10.0), 0.0)));
}

#[test]
fn filter_records_preserves_relative_order() {
    let records = vec![
        rec("keep1", "GGCC", "IIII"),
        rec("drop", "ATAT", "IIII"),
        rec("keep2", "GCGC", "IIII"),
        rec("keep3", "CCGG", "IIII"),
    ];
    let t = thresholds((60.0, 100.0), (0.0, 100.0), 0.0);
    let kept = filter_records(records, &t);
    let ids: Vec<&str> = kept.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["keep1", "keep2", "keep3"]);
}

const SAMPLE: &str = "\
@keep1 first
GGGGCCCC
+
IIIIIIII
@drop low-gc
ATATATAT
+
IIIIIIII
@keep2
GCGCGCGC
+
IIIIIIII
";

#[test]
fn filter_fastq_end_to_end() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.fastq");
    let output = dir.path().join("out.fastq");
    fs::write(&input, SAMPLE).unwrap();

    let t = thresholds((50.0, 100.0), (0.0, 100.0), 30.0);
    let summary = filter_fastq(&input, &output, &t, ReaderOptions::default()).unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.kept, 2);

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(
        written,
        "@keep1 first\nGGGGCCCC\n+\nIIIIIIII\n@keep2\nGCGCGCGC\n+\nIIIIIIII\n"
    );
}

#[test]
fn filter_fastq_missing_input_is_not_found() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("does_not_exist.fastq");
    let output = dir.path().join("out.fastq");

    let err = filter_fastq(
        &input,
        &output,
        &FilterThresholds::default(),
        ReaderOptions::default(),
    )
    .unwrap_err();
    match err {
        FastqError::NotFound { path, .. } => assert_eq!(path, input),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn malformed_record_aborts_by_default() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bad.fastq");
    let output = dir.path().join("out.fastq");
    // quality shorter than sequence
    fs::write(&input, "@r1\nACGT\n+\n###\n").unwrap();

    let err = filter_fastq(
        &input,
        &output,
        &FilterThresholds::default(),
        ReaderOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, FastqError::Format { .. }));
}

#[test]
fn malformed_record_skipped_with_skip_policy() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bad.fastq");
    let output = dir.path().join("out.fastq");
    fs::write(&input, "@r1\nACGT\n+\n###\n@r2\nGGCC\n+\nIIII\n").unwrap();

    let options = ReaderOptions {
        error_policy: ErrorPolicy::Skip,
    };
    let summary = filter_fastq(&input, &output, &FilterThresholds::default(), options).unwrap();
    assert_eq!(summary.total, 1);
    assert_eq!(summary.kept, 1);

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written, "@r2\nGGCC\n+\nIIII\n");
}

#[test]
fn skip_policy_resyncs_past_quality_line_starting_with_at() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bad.fastq");
    let output = dir.path().join("out.fastq");
    // r1 is missing its '+' separator; its quality line '@IIII' starts with
    // '@' and must not be mistaken for the next header during resync
    fs::write(
        &input,
        "@r1\nACGT\nACGT\n@III\n@r2\nGGCC\n+\nIIII\n",
    )
    .unwrap();

    let options = ReaderOptions {
        error_policy: ErrorPolicy::Skip,
    };
    let summary = filter_fastq(&input, &output, &FilterThresholds::default(), options).unwrap();
    assert_eq!(summary.total, 1);
    assert_eq!(summary.kept, 1);

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written, "@r2\nGGCC\n+\nIIII\n");
}

#[cfg(feature = "gzip")]
#[test]
fn filter_fastq_writes_gz_output() {
    use std::io::Read;

    let dir = tempdir().unwrap();
    let input = dir.path().join("in.fastq");
    let output = dir.path().join("out.fastq.gz");
    fs::write(&input, SAMPLE).unwrap();

    let t = thresholds((50.0, 100.0), (0.0, 100.0), 30.0);
    let summary = filter_fastq(&input, &output, &t, ReaderOptions::default()).unwrap();
    assert_eq!(summary.kept, 2);

    // the trailer must be in place: a truncated gzip stream fails to decode
    let mut dec = flate2::read::MultiGzDecoder::new(fs::File::open(&output).unwrap());
    let mut decoded = String::new();
    dec.read_to_string(&mut decoded).unwrap();
    assert_eq!(
        decoded,
        "@keep1 first\nGGGGCCCC\n+\nIIIIIIII\n@keep2\nGCGCGCGC\n+\nIIIIIIII\n"
    );
}

#[cfg(feature = "gzip")]
#[test]
fn filter_fastq_reads_gz_input() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.fastq.gz");
    let output = dir.path().join("out.fastq");
    {
        let f = fs::File::create(&input).unwrap();
        let mut enc = flate2::write::GzEncoder::new(f, flate2::Compression::fast());
        enc.write_all(SAMPLE.as_bytes()).unwrap();
        enc.finish().unwrap();
    }

    let t = thresholds((50.0, 100.0), (0.0, 100.0), 30.0);
    let summary = filter_fastq(&input, &output, &t, ReaderOptions::default()).unwrap();
    assert_eq!(summary.kept, 2);

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("@keep1 first\n"));
    assert!(written.contains("@keep2\n"));
}
