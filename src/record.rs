#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastqRecord {
    pub id: String,
    pub desc: Option<String>,
    pub seq: Vec<u8>,
    pub qual: Vec<u8>,
}

impl FastqRecord {
    #[inline]
    pub fn len(&self) -> usize {
        self.seq.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// GC content as a percentage.
    ///
    /// Counts case-insensitively; the denominator is the number of
    /// unambiguous bases (A, C, G, T, U), so N and other ambiguity codes do
    /// not dilute the fraction. An empty or all-ambiguous sequence yields 0.
    pub fn gc_percent(&self) -> f64 {
        let mut gc = 0usize;
        let mut unambiguous = 0usize;
        for &b in &self.seq {
            match b.to_ascii_uppercase() {
                b'G' | b'C' => {
                    gc += 1;
                    unambiguous += 1;
                }
                b'A' | b'T' | b'U' => unambiguous += 1,
                _ => {}
            }
        }
        if unambiguous == 0 {
            return 0.0;
        }
        gc as f64 / unambiguous as f64 * 100.0
    }

    /// Mean Phred quality under the Phred+33 encoding; 0 when the quality
    /// string is empty.
    pub fn avg_quality(&self) -> f64 {
        if self.qual.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.qual.iter().map(|&q| q.saturating_sub(33) as u64).sum();
        sum as f64 / self.qual.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(seq: &[u8], qual: &[u8]) -> FastqRecord {
        FastqRecord {
            id: "r".to_string(),
            desc: None,
            seq: seq.to_vec(),
            qual: qual.to_vec(),
        }
    }

    #[test]
    fn gc_percent_basic() {
        assert_eq!(rec(b"GCGC", b"IIII").gc_percent(), 100.0);
        assert_eq!(rec(b"ATAT", b"IIII").gc_percent(), 0.0);
        assert_eq!(rec(b"ATGC", b"IIII").gc_percent(), 50.0);
        assert_eq!(rec(b"atgc", b"IIII").gc_percent(), 50.0);
    }

    #[test]
    fn gc_percent_excludes_ambiguous_bases() {
        // N does not count toward the denominator
        assert_eq!(rec(b"GCNN", b"IIII").gc_percent(), 100.0);
        assert_eq!(rec(b"NNNN", b"IIII").gc_percent(), 0.0);
    }

    #[test]
    fn gc_percent_empty_is_zero() {
        assert_eq!(rec(b"", b"").gc_percent(), 0.0);
    }

    #[test]
    fn avg_quality_phred33() {
        // 'I' is Phred 40, '!' is Phred 0
        assert_eq!(rec(b"ACGT", b"IIII").avg_quality(), 40.0);
        assert_eq!(rec(b"ACGT", b"!!!!").avg_quality(), 0.0);
        assert_eq!(rec(b"AC", b"!I").avg_quality(), 20.0);
        assert_eq!(rec(b"", b"").avg_quality(), 0.0);
    }
}
