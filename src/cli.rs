use std::path::PathBuf;

use bioseq_ut::Bounds;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Filter FASTQ reads by GC content, length, and mean quality
    FilterFastq {
        /// Input FASTQ file (.gz supported)
        input: PathBuf,

        /// Output FASTQ file (.gz by extension)
        output: PathBuf,

        /// Inclusive GC percentage bounds, "MAX" or "MIN,MAX"
        #[arg(long = "gc-bounds", default_value = "0,100")]
        gc_bounds: Bounds,

        /// Inclusive read-length bounds, "MAX" or "MIN,MAX"
        #[arg(long = "length-bounds", default_value = "0,4294967296")]
        length_bounds: Bounds,

        /// Minimum mean Phred quality (inclusive)
        #[arg(long = "quality-threshold", default_value = "0")]
        quality_threshold: f64,

        /// Skip malformed records instead of aborting
        #[arg(long = "skip-malformed")]
        skip_malformed: bool,
    },

    /// Rewrite a multi-line FASTA file with one sequence line per entry
    FlattenFasta {
        /// Input FASTA file (.gz supported)
        input: PathBuf,

        /// Output FASTA file
        output: PathBuf,
    },
}
