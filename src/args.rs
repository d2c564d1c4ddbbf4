use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "malurldb",
    about = "Maintain a labeled malicious-URL dataset and score URLs with a pre-trained model",
    version,
    long_about = None
)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Append newly labeled malicious URLs to an existing dataset
    Append {
        /// Newline-delimited list of malicious URLs
        #[arg(short, long, default_value = "malicious.txt")]
        source: PathBuf,

        /// Existing labeled dataset (CSV with url, label, result columns)
        #[arg(short, long, default_value = "urldata-Copy.csv")]
        dataset: PathBuf,

        /// Output path for the combined dataset
        #[arg(short, long, default_value = "malware_database.csv")]
        output: PathBuf,

        /// Skip source URLs already present in the dataset
        #[arg(long)]
        dedup: bool,

        /// Drop blank source lines instead of recording empty URLs
        #[arg(long)]
        skip_blank: bool,
    },

    /// Score URLs with a pre-trained model and print severity bands
    Check {
        /// URLs to score
        #[arg(required = true)]
        urls: Vec<String>,

        /// Path to the ONNX model file
        #[arg(short, long, default_value = "neural_net.onnx")]
        model: PathBuf,

        /// Path to the fitted tokenizer vocabulary (JSON)
        #[arg(short, long, default_value = "tokenizer.json")]
        tokenizer: PathBuf,
    },
}
