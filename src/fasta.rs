//! Multi-line FASTA flattening.
//!
//! Collapses each FASTA entry's sequence lines into one line. Entries keep
//! first-seen header order; a repeated header overwrites the stored sequence
//! in place, so the last occurrence wins. Lines appearing before the first
//! header have no entry to attach to and are dropped. No alphabet validation
//! happens at this layer.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::FastaError;
use crate::util::{has_gz_extension, looks_like_gzip, open_file};

#[cfg(feature = "gzip")]
use flate2::read::MultiGzDecoder;

/// Ordered header -> single-line-sequence mapping.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FastaMap {
    entries: Vec<(String, String)>,
}

impl FastaMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. Overwriting keeps the header's original position.
    pub fn insert(&mut self, header: String, seq: String) {
        if let Some(entry) = self.entries.iter_mut().find(|(h, _)| *h == header) {
            entry.1 = seq;
        } else {
            self.entries.push((header, seq));
        }
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, s)| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(header, sequence)` pairs in first-seen header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(h, s)| (h.as_str(), s.as_str()))
    }

    /// Render as output lines: header, then sequence, per entry.
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.entries.len() * 2);
        for (header, seq) in self.iter() {
            lines.push(header.to_string());
            lines.push(seq.to_string());
        }
        lines
    }

    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        for (header, seq) in self.iter() {
            writeln!(w, "{header}")?;
            writeln!(w, "{seq}")?;
        }
        Ok(())
    }
}

/// Flatten FASTA lines into a [`FastaMap`].
///
/// Two-state accumulator: a line starting with `>` (after trimming outer
/// whitespace) finalizes any active entry and opens a new one; any other
/// line appends its trimmed content to the active entry's sequence.
pub fn flatten_lines<I, S>(lines: I) -> FastaMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut map = FastaMap::new();
    let mut header: Option<String> = None;
    let mut seq = String::new();
    for line in lines {
        let trimmed = line.as_ref().trim();
        if trimmed.starts_with('>') {
            if let Some(h) = header.take() {
                map.insert(h, std::mem::take(&mut seq));
            }
            header = Some(trimmed.to_string());
            seq.clear();
        } else if header.is_some() {
            seq.push_str(trimmed);
        }
        // no active entry yet: drop the line
    }
    if let Some(h) = header {
        map.insert(h, seq);
    }
    map
}

fn open_lines(path: &Path) -> Result<Box<dyn BufRead>, FastaError> {
    let f = open_file(path).map_err(|e| FastaError::open_err(e, path))?;
    let is_gz = has_gz_extension(path) || looks_like_gzip(&f).unwrap_or(false);
    if is_gz {
        #[cfg(feature = "gzip")]
        {
            Ok(Box::new(BufReader::new(MultiGzDecoder::new(f))))
        }
        #[cfg(not(feature = "gzip"))]
        {
            Err(FastaError::Io(io::Error::new(
                io::ErrorKind::Unsupported,
                "gzip support not enabled",
            )))
        }
    } else {
        Ok(Box::new(BufReader::new(f)))
    }
}

/// Read a multi-line FASTA file and write it back with one sequence line per
/// entry. Returns the flattened mapping.
pub fn convert_multiline_fasta_to_oneline<P, Q>(input: P, output: Q) -> Result<FastaMap, FastaError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let rdr = open_lines(input.as_ref())?;
    let mut lines = Vec::new();
    for line in rdr.lines() {
        lines.push(line?);
    }
    let map = flatten_lines(&lines);

    let out = File::create(output.as_ref())?;
    let mut w = BufWriter::new(out);
    map.write_to(&mut w)?;
    w.flush()?;

    log::info!(
        "convert_multiline_fasta_to_oneline: wrote {} entries",
        map.len()
    );
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_multi_line_entries() {
        let map = flatten_lines([">seq1", "ACGT", "GGTA", ">seq2", "TTTT"]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(">seq1"), Some("ACGTGGTA"));
        assert_eq!(map.get(">seq2"), Some("TTTT"));
    }

    #[test]
    fn duplicate_header_last_wins_in_place() {
        let map = flatten_lines([">h", "AA", ">x", "GG", ">h", "CC"]);
        assert_eq!(map.get(">h"), Some("CC"));
        // first-seen order kept
        let headers: Vec<&str> = map.iter().map(|(h, _)| h).collect();
        assert_eq!(headers, vec![">h", ">x"]);
    }

    #[test]
    fn lines_before_first_header_are_dropped() {
        let map = flatten_lines(["ACGT", "", ">h", "GG"]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(">h"), Some("GG"));
    }

    #[test]
    fn flatten_is_idempotent_over_its_own_output() {
        let map = flatten_lines([">a", "AC", "GT", ">b", "TT", "", ">a", "CC"]);
        let again = flatten_lines(&map.to_lines());
        assert_eq!(again, map);
    }

    #[test]
    fn empty_input_yields_empty_map() {
        let map = flatten_lines(Vec::<String>::new());
        assert!(map.is_empty());
    }
}
