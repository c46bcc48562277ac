//! Validated biological sequences and basic transforms.
//!
//! [`Molecule`] is a closed tag carrying its alphabet as data; [`BioSeq`]
//! pairs a tag with validated text. Transforms are case-preserving:
//! complementing `"ATGCatgc"` yields `"TACGtacg"`.

use std::fmt;

use crate::error::ValidationError;

/// Molecule type; carries its alphabet as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Molecule {
    Dna,
    Rna,
    Protein,
}

impl Molecule {
    /// Valid uppercase bytes for this molecule.
    pub const fn alphabet(self) -> &'static [u8] {
        match self {
            Molecule::Dna => b"ACGT",
            Molecule::Rna => b"ACGU",
            Molecule::Protein => b"ACDEFGHIKLMNPQRSTVWY",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Molecule::Dna => "DNA",
            Molecule::Rna => "RNA",
            Molecule::Protein => "protein",
        }
    }

    /// Case-insensitive alphabet membership.
    pub fn is_valid(self, b: u8) -> bool {
        self.alphabet().contains(&b.to_ascii_uppercase())
    }

    pub const fn is_nucleic(self) -> bool {
        !matches!(self, Molecule::Protein)
    }

    /// Guess the nucleic molecule for a string.
    ///
    /// `None` when the text fits neither alphabet, including sequences that
    /// mix thymine and uracil. A string without T or U reads as DNA.
    pub fn detect_nucleic(text: &str) -> Option<Molecule> {
        let has_t = text.bytes().any(|b| b.to_ascii_uppercase() == b'T');
        let has_u = text.bytes().any(|b| b.to_ascii_uppercase() == b'U');
        if has_t && has_u {
            return None;
        }
        let molecule = if has_u { Molecule::Rna } else { Molecule::Dna };
        text.bytes().all(|b| molecule.is_valid(b)).then_some(molecule)
    }
}

/// A validated sequence tagged with its molecule type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BioSeq {
    molecule: Molecule,
    text: String,
}

impl BioSeq {
    /// Validate `text` against the molecule's alphabet (case-insensitive).
    pub fn new(molecule: Molecule, text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        for (pos, ch) in text.chars().enumerate() {
            if !ch.is_ascii() || !molecule.is_valid(ch as u8) {
                return Err(ValidationError::InvalidCharacter {
                    molecule: molecule.name(),
                    ch,
                    pos,
                });
            }
        }
        Ok(Self { molecule, text })
    }

    pub fn dna(text: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(Molecule::Dna, text)
    }

    pub fn rna(text: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(Molecule::Rna, text)
    }

    pub fn protein(text: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(Molecule::Protein, text)
    }

    pub fn molecule(&self) -> Molecule {
        self.molecule
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Character at `index`, if in range. Validated text is ASCII.
    pub fn get(&self, index: usize) -> Option<char> {
        self.text.as_bytes().get(index).map(|&b| b as char)
    }

    pub const fn description(&self) -> &'static str {
        match self.molecule {
            Molecule::Dna => "DNA sequence",
            Molecule::Rna => "RNA sequence",
            Molecule::Protein => "amino acid sequence",
        }
    }

    /// Reversed character order, same molecule.
    pub fn reverse(&self) -> Self {
        Self {
            molecule: self.molecule,
            text: self.text.chars().rev().collect(),
        }
    }

    /// Watson-Crick complement. Nucleic acids only.
    pub fn complement(&self) -> Result<Self, ValidationError> {
        if !self.molecule.is_nucleic() {
            return Err(ValidationError::UnsupportedOperation {
                op: "complement",
                molecule: self.molecule.name(),
            });
        }
        let text = self
            .text
            .chars()
            .map(|c| complement_base(self.molecule, c))
            .collect();
        Ok(Self {
            molecule: self.molecule,
            text,
        })
    }

    /// Complement then reverse. An involution: applying it twice restores
    /// the original sequence.
    pub fn reverse_complement(&self) -> Result<Self, ValidationError> {
        Ok(self.complement()?.reverse())
    }

    /// DNA -> RNA transcription (T becomes U, case-preserving).
    pub fn transcribe(&self) -> Result<Self, ValidationError> {
        if self.molecule != Molecule::Dna {
            return Err(ValidationError::UnsupportedOperation {
                op: "transcription",
                molecule: self.molecule.name(),
            });
        }
        let text = self
            .text
            .chars()
            .map(|c| match c {
                'T' => 'U',
                't' => 'u',
                other => other,
            })
            .collect();
        Ok(Self {
            molecule: Molecule::Rna,
            text,
        })
    }

    /// 1-based positions of cysteine residues. Protein only.
    pub fn cysteine_positions(&self) -> Result<Vec<usize>, ValidationError> {
        if self.molecule != Molecule::Protein {
            return Err(ValidationError::UnsupportedOperation {
                op: "cysteine lookup",
                molecule: self.molecule.name(),
            });
        }
        Ok(self
            .text
            .bytes()
            .enumerate()
            .filter(|(_, b)| b.to_ascii_uppercase() == b'C')
            .map(|(i, _)| i + 1)
            .collect())
    }

    /// Human-readable cysteine report, one line per position.
    pub fn cysteine_report(&self) -> Result<String, ValidationError> {
        let positions = self.cysteine_positions()?;
        if positions.is_empty() {
            return Ok("no cysteine (C) in sequence".to_string());
        }
        Ok(positions
            .iter()
            .map(|p| format!("cysteine (C) position: {p}"))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

impl fmt::Display for BioSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn complement_base(molecule: Molecule, c: char) -> char {
    match (molecule, c) {
        (Molecule::Dna, 'A') => 'T',
        (Molecule::Dna, 'a') => 't',
        (Molecule::Dna, 'T') => 'A',
        (Molecule::Dna, 't') => 'a',
        (Molecule::Rna, 'A') => 'U',
        (Molecule::Rna, 'a') => 'u',
        (Molecule::Rna, 'U') => 'A',
        (Molecule::Rna, 'u') => 'a',
        (_, 'C') => 'G',
        (_, 'c') => 'g',
        (_, 'G') => 'C',
        (_, 'g') => 'c',
        // unreachable for validated input
        (_, other) => other,
    }
}
