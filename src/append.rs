use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use tracing::info;

use crate::dataset::{self, UrlRecord, MALICIOUS_LABEL, MALICIOUS_RESULT};
use crate::source;
use crate::utils;

#[derive(Debug, Clone)]
pub struct AppendConfig {
    pub source: PathBuf,
    pub dataset: PathBuf,
    pub output: PathBuf,
    /// Skip source URLs already present in the dataset or earlier in the list.
    pub dedup: bool,
    /// Drop blank source lines instead of recording empty URLs.
    pub skip_blank: bool,
}

#[derive(Debug)]
pub struct AppendSummary {
    pub existing_rows: usize,
    pub appended_rows: usize,
    pub skipped_blank: usize,
    pub skipped_duplicate: usize,
    pub total_rows: usize,
    pub output: PathBuf,
}

/// Append every source URL to the existing dataset as a `(url, "malicious", 1)`
/// record and write the combined table to the output path.
///
/// Existing rows keep their order and precede all new rows; new rows keep
/// source-file order. The input dataset file is never modified.
pub fn append_malicious_urls(config: &AppendConfig) -> Result<AppendSummary> {
    let total_start_time = Instant::now();
    info!(
        action = "start",
        component = "append",
        source = ?config.source,
        dataset = ?config.dataset,
        output = ?config.output,
        "Starting dataset append"
    );

    let lines = source::read_url_list(&config.source)?;
    let existing = dataset::load_dataset(&config.dataset)?;

    let mut seen: HashSet<String> = if config.dedup {
        existing.iter().map(|record| record.url.clone()).collect()
    } else {
        HashSet::new()
    };

    let mut appended = Vec::new();
    let mut skipped_blank = 0;
    let mut skipped_duplicate = 0;
    for url in lines {
        if config.skip_blank && url.is_empty() {
            skipped_blank += 1;
            continue;
        }
        if config.dedup && !seen.insert(url.clone()) {
            skipped_duplicate += 1;
            continue;
        }
        appended.push(UrlRecord {
            url,
            label: MALICIOUS_LABEL.to_string(),
            result: MALICIOUS_RESULT,
        });
    }

    let existing_rows = existing.len();
    let appended_rows = appended.len();

    let mut combined = existing;
    combined.extend(appended);
    dataset::write_dataset(&config.output, &combined)?;

    let total_time = total_start_time.elapsed();
    info!(
        action = "complete",
        component = "append",
        existing_rows,
        appended_rows,
        skipped_blank,
        skipped_duplicate,
        total_rows = combined.len(),
        duration_ms = total_time.as_millis(),
        "Dataset append completed"
    );

    Ok(AppendSummary {
        existing_rows,
        appended_rows,
        skipped_blank,
        skipped_duplicate,
        total_rows: combined.len(),
        output: config.output.clone(),
    })
}

pub fn print_append_summary(summary: &AppendSummary) {
    println!("\n--- Dataset Append ---");
    println!(
        "Existing rows: {}",
        utils::format_number(summary.existing_rows as u32)
    );
    println!(
        "Appended rows: {}",
        utils::format_number(summary.appended_rows as u32)
    );
    if summary.skipped_blank > 0 {
        println!(
            "Skipped blank lines: {}",
            utils::format_number(summary.skipped_blank as u32)
        );
    }
    if summary.skipped_duplicate > 0 {
        println!(
            "Skipped duplicates: {}",
            utils::format_number(summary.skipped_duplicate as u32)
        );
    }
    println!(
        "Total rows written: {}",
        utils::format_number(summary.total_rows as u32)
    );
    println!("Output: {}", summary.output.display());
}
