//! Command-line arguments and one-shot subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "binwise",
    version,
    about = "Find the right bin for an item, wherever you are"
)]
pub(crate) struct Cli {
    /// Prediction feed to follow in the interactive view (`label confidence` per line)
    #[arg(long, value_name = "FILE")]
    pub feed: Option<PathBuf>,

    /// Run a single command instead of the interactive view
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// List supported regions, default region first
    Regions {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
    /// Find the bin for a classifier label such as `Plastic` or `E-waste`
    Classify {
        /// Region code, e.g. DE (defaults to BINWISE_REGION)
        #[arg(short, long)]
        region: Option<String>,

        /// Material label
        label: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
    /// Find the bin for a description such as "banana peel"
    Search {
        /// Region code, e.g. JP (defaults to BINWISE_REGION)
        #[arg(short, long)]
        region: Option<String>,

        /// Words describing the item
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
    /// Print the carbon-footprint questionnaire
    Questions {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
    /// Score a filled-in questionnaire (JSON object of field name to answer)
    Footprint {
        /// Answers file
        answers: PathBuf,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}
