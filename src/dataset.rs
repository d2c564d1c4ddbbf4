use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;
use tracing::info;

/// Label assigned to every record produced by the appender.
pub const MALICIOUS_LABEL: &str = "malicious";
/// Binary flag assigned to every record produced by the appender (1 = malicious).
pub const MALICIOUS_RESULT: i64 = 1;

/// Expected header of a dataset file. The leading empty name is the
/// positional index column, discarded on load and regenerated on write.
pub const DATASET_COLUMNS: [&str; 4] = ["", "url", "label", "result"];

#[derive(Debug, Error)]
pub enum DatasetError {
    /// A required file is missing, unreadable, or not parseable as CSV.
    #[error("cannot read dataset resource {path:?}: {reason}")]
    Resource { path: PathBuf, reason: String },
    /// The file parsed, but its columns do not match `(url, label, result)`.
    #[error("dataset schema mismatch in {path:?}: {reason}")]
    Schema { path: PathBuf, reason: String },
}

/// One row of the dataset, without the positional index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub url: String,
    pub label: String,
    pub result: i64,
}

/// Load a dataset file, validating the header and discarding the index column.
pub fn load_dataset(path: &Path) -> Result<Vec<UrlRecord>, DatasetError> {
    let start_time = Instant::now();
    info!(action = "start", component = "dataset_load", path = ?path, "Loading dataset");

    let resource = |reason: String| DatasetError::Resource {
        path: path.to_path_buf(),
        reason,
    };
    let schema = |reason: String| DatasetError::Schema {
        path: path.to_path_buf(),
        reason,
    };

    let file = fs::File::open(path).map_err(|e| resource(e.to_string()))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = reader.headers().map_err(|e| resource(e.to_string()))?;
    if !headers.iter().eq(DATASET_COLUMNS) {
        return Err(schema(format!(
            "expected columns {:?}, found {:?}",
            DATASET_COLUMNS.join(","),
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    let mut records = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| resource(e.to_string()))?;
        if record.len() != DATASET_COLUMNS.len() {
            return Err(schema(format!(
                "row {} has {} fields, expected {}",
                row,
                record.len(),
                DATASET_COLUMNS.len()
            )));
        }
        let result = record[3]
            .parse::<i64>()
            .map_err(|_| schema(format!("row {} has non-integer result {:?}", row, &record[3])))?;
        records.push(UrlRecord {
            url: record[1].to_string(),
            label: record[2].to_string(),
            result,
        });
    }

    let load_time = start_time.elapsed();
    info!(
        action = "complete",
        component = "dataset_load",
        row_count = records.len(),
        duration_ms = load_time.as_millis(),
        "Dataset loaded"
    );
    Ok(records)
}

/// Write a dataset file with a fresh contiguous index starting at 0.
///
/// The rows are serialized to a temporary sibling first and renamed over the
/// final path, so a failure never leaves a partially written output.
pub fn write_dataset(path: &Path, records: &[UrlRecord]) -> Result<(), DatasetError> {
    let start_time = Instant::now();
    info!(action = "start", component = "dataset_write", path = ?path, row_count = records.len(), "Writing dataset");

    let resource = |reason: String| DatasetError::Resource {
        path: path.to_path_buf(),
        reason,
    };

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let file = fs::File::create(&tmp_path).map_err(|e| resource(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record(DATASET_COLUMNS)
        .map_err(|e| resource(e.to_string()))?;
    for (index, record) in records.iter().enumerate() {
        writer
            .write_record([
                index.to_string().as_str(),
                record.url.as_str(),
                record.label.as_str(),
                record.result.to_string().as_str(),
            ])
            .map_err(|e| resource(e.to_string()))?;
    }
    writer.flush().map_err(|e| resource(e.to_string()))?;
    drop(writer);

    fs::rename(&tmp_path, path).map_err(|e| resource(e.to_string()))?;

    let write_time = start_time.elapsed();
    info!(
        action = "complete",
        component = "dataset_write",
        duration_ms = write_time.as_millis(),
        "Dataset written"
    );
    Ok(())
}
