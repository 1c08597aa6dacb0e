use corkboard_core::{load_config, load_quotes, ConfigError, QuoteError, ResizePolicy};
use std::io::Write;

#[test]
fn load_quotes_reads_one_quote_per_line() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "First   quote").expect("write");
    writeln!(file).expect("write");
    writeln!(file, "  Second quote  ").expect("write");

    let quotes = load_quotes(file.path()).expect("quotes should load");
    assert_eq!(quotes, vec!["First quote", "Second quote"]);
}

#[test]
fn load_quotes_rejects_blank_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "   \n\n").expect("write");
    let err = load_quotes(file.path()).unwrap_err();
    assert!(matches!(err, QuoteError::Empty(_)));
}

#[test]
fn load_quotes_reports_missing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = load_quotes(dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, QuoteError::Io(_)));
}

#[test]
fn load_config_reads_json_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"{{"resize_policy": "preserve_manual", "compact_breakpoint": 600.0}}"#
    )
    .expect("write");

    let config = load_config(file.path()).expect("config should load");
    assert_eq!(config.resize_policy, ResizePolicy::PreserveManual);
    assert_eq!(config.compact_breakpoint, 600.0);
    assert_eq!(config.note_width, 200.0);
}

#[test]
fn load_config_surfaces_parse_errors() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "not json").expect("write");
    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}
