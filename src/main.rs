use anyhow::Result;
use clap::Parser;
use tracing::error;

use malurldb::args::{Args, Command};
use malurldb::{append, check, inference, utils};

fn main() -> Result<()> {
    let args = Args::parse();
    utils::setup_logging(args.verbose);
    utils::validate_args(&args)?;

    let outcome = match &args.command {
        Command::Append {
            source,
            dataset,
            output,
            dedup,
            skip_blank,
        } => {
            let config = append::AppendConfig {
                source: source.clone(),
                dataset: dataset.clone(),
                output: output.clone(),
                dedup: *dedup,
                skip_blank: *skip_blank,
            };
            append::append_malicious_urls(&config)
                .map(|summary| append::print_append_summary(&summary))
        }
        Command::Check {
            urls,
            model,
            tokenizer,
        } => inference::InferenceContext::load(model, tokenizer)
            .and_then(|context| check::check_urls(&context, urls))
            .map(|reports| check::print_check_reports(&reports)),
    };

    match outcome {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
