mod cli;

use bioseq_ut::{
    ErrorPolicy, FilterThresholds, ReaderOptions, convert_multiline_fasta_to_oneline, filter_fastq,
};
use clap::Parser;

fn main() {
    env_logger::init();
    let args = cli::Args::parse();

    let result: Result<(), Box<dyn std::error::Error>> = match args.command {
        cli::Commands::FilterFastq {
            input,
            output,
            gc_bounds,
            length_bounds,
            quality_threshold,
            skip_malformed,
        } => {
            let thresholds = FilterThresholds {
                gc_bounds,
                length_bounds,
                quality_threshold,
            };
            let options = ReaderOptions {
                error_policy: if skip_malformed {
                    ErrorPolicy::Skip
                } else {
                    ErrorPolicy::Return
                },
            };
            filter_fastq(&input, &output, &thresholds, options)
                .map(|summary| println!("kept {} of {} records", summary.kept, summary.total))
                .map_err(Into::into)
        }
        cli::Commands::FlattenFasta { input, output } => {
            convert_multiline_fasta_to_oneline(&input, &output)
                .map(|map| println!("wrote {} entries", map.len()))
                .map_err(Into::into)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
