use std::fs;
use std::path::{Path, PathBuf};

use malurldb::append::{append_malicious_urls, AppendConfig};

struct Fixture {
    _dir: tempfile::TempDir,
    source: PathBuf,
    dataset: PathBuf,
    output: PathBuf,
}

fn fixture(source_text: &str, dataset_text: &str) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("malicious.txt");
    let dataset = dir.path().join("urldata-Copy.csv");
    let output = dir.path().join("malware_database.csv");
    fs::write(&source, source_text).unwrap();
    fs::write(&dataset, dataset_text).unwrap();
    Fixture {
        _dir: dir,
        source,
        dataset,
        output,
    }
}

fn config(f: &Fixture) -> AppendConfig {
    AppendConfig {
        source: f.source.clone(),
        dataset: f.dataset.clone(),
        output: f.output.clone(),
        dedup: false,
        skip_blank: false,
    }
}

fn output_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

const ONE_BENIGN_ROW: &str = ",url,label,result\n0,http://ok.com,benign,0\n";

#[test]
fn appends_every_source_url_after_the_existing_rows() {
    let f = fixture("http://evil.com\nhttp://bad.net\n", ONE_BENIGN_ROW);

    let summary = append_malicious_urls(&config(&f)).unwrap();
    assert_eq!(summary.existing_rows, 1);
    assert_eq!(summary.appended_rows, 2);
    assert_eq!(summary.total_rows, 3);

    assert_eq!(
        output_lines(&f.output),
        vec![
            ",url,label,result",
            "0,http://ok.com,benign,0",
            "1,http://evil.com,malicious,1",
            "2,http://bad.net,malicious,1",
        ]
    );
}

#[test]
fn existing_rows_are_preserved_verbatim_with_a_regenerated_index() {
    let f = fixture(
        "http://evil.com\n",
        ",url,label,result\n7,http://ok.com,benign,0\n12,http://fine.org,benign,0\n",
    );

    append_malicious_urls(&config(&f)).unwrap();

    let lines = output_lines(&f.output);
    assert_eq!(lines[1], "0,http://ok.com,benign,0");
    assert_eq!(lines[2], "1,http://fine.org,benign,0");
    assert_eq!(lines[3], "2,http://evil.com,malicious,1");
}

#[test]
fn empty_source_list_rewrites_the_dataset_unchanged() {
    let f = fixture("", ONE_BENIGN_ROW);

    let summary = append_malicious_urls(&config(&f)).unwrap();
    assert_eq!(summary.appended_rows, 0);
    assert_eq!(fs::read_to_string(&f.output).unwrap(), ONE_BENIGN_ROW);
}

#[test]
fn blank_line_becomes_an_empty_url_record_by_default() {
    let f = fixture("http://evil.com\n\nhttp://bad.net\n", ONE_BENIGN_ROW);

    let summary = append_malicious_urls(&config(&f)).unwrap();
    assert_eq!(summary.appended_rows, 3);

    let lines = output_lines(&f.output);
    assert_eq!(lines[2], "1,http://evil.com,malicious,1");
    assert_eq!(lines[3], "2,,malicious,1");
    assert_eq!(lines[4], "3,http://bad.net,malicious,1");
}

#[test]
fn skip_blank_drops_blank_lines() {
    let f = fixture("http://evil.com\n\nhttp://bad.net\n", ONE_BENIGN_ROW);

    let mut cfg = config(&f);
    cfg.skip_blank = true;
    let summary = append_malicious_urls(&cfg).unwrap();

    assert_eq!(summary.appended_rows, 2);
    assert_eq!(summary.skipped_blank, 1);
    assert_eq!(output_lines(&f.output).len(), 4);
}

#[test]
fn rerunning_against_the_output_duplicates_rows_without_dedup() {
    let f = fixture("http://evil.com\n", ONE_BENIGN_ROW);

    append_malicious_urls(&config(&f)).unwrap();

    let mut second = config(&f);
    second.dataset = f.output.clone();
    second.output = f.dataset.parent().unwrap().join("second.csv");
    let summary = append_malicious_urls(&second).unwrap();

    assert_eq!(summary.total_rows, 3);
    let lines = output_lines(&second.output);
    assert_eq!(lines[2], "1,http://evil.com,malicious,1");
    assert_eq!(lines[3], "2,http://evil.com,malicious,1");
}

#[test]
fn dedup_skips_urls_already_in_the_dataset_and_repeats_in_the_source() {
    let f = fixture(
        "http://evil.com\nhttp://evil.com\nhttp://ok.com\nhttp://bad.net\n",
        ONE_BENIGN_ROW,
    );

    let mut cfg = config(&f);
    cfg.dedup = true;
    let summary = append_malicious_urls(&cfg).unwrap();

    assert_eq!(summary.appended_rows, 2);
    assert_eq!(summary.skipped_duplicate, 2);

    let lines = output_lines(&f.output);
    assert_eq!(lines[2], "1,http://evil.com,malicious,1");
    assert_eq!(lines[3], "2,http://bad.net,malicious,1");
}

#[test]
fn missing_source_list_writes_no_output() {
    let f = fixture("", ONE_BENIGN_ROW);
    fs::remove_file(&f.source).unwrap();

    assert!(append_malicious_urls(&config(&f)).is_err());
    assert!(!f.output.exists());
}

#[test]
fn schema_mismatch_writes_no_output() {
    let f = fixture(
        "http://evil.com\n",
        "url,label,result\nhttp://ok.com,benign,0\n",
    );

    assert!(append_malicious_urls(&config(&f)).is_err());
    assert!(!f.output.exists());
}

#[test]
fn urls_with_commas_survive_csv_quoting() {
    let f = fixture("http://evil.com/a,b\n", ONE_BENIGN_ROW);

    append_malicious_urls(&config(&f)).unwrap();

    let mut second = config(&f);
    second.dataset = f.output.clone();
    second.source = f.dataset.parent().unwrap().join("empty.txt");
    fs::write(&second.source, "").unwrap();
    second.output = f.dataset.parent().unwrap().join("second.csv");
    let summary = append_malicious_urls(&second).unwrap();

    // the quoted URL parses back as a single field
    assert_eq!(summary.existing_rows, 2);
    assert_eq!(summary.total_rows, 2);
}
