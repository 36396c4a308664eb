//! Record loading and ingestion-time validation.
//!
//! Records come either from the fixture compiled into the binary or from
//! a JSON array file. Malformed input is rejected before aggregation:
//! serde typing catches missing fields, non-numeric metrics and negative
//! counts, and [`validate_records`] catches what the types cannot express.

use std::fs;
use std::path::Path;

use adlens_core::Record;
use tracing::{debug, info};

use crate::error::{DataError, Result};

/// Fixture shipped with the binary, used when no data file is given.
pub const BUNDLED_DATA: &str = include_str!("../data/marketing_dashboard_data.json");

/// Parse and validate records from a JSON array.
pub fn parse_records(json: &str) -> Result<Vec<Record>> {
    let records: Vec<Record> = serde_json::from_str(json)?;
    validate_records(&records)?;
    Ok(records)
}

/// Load the bundled fixture.
pub fn bundled_records() -> Result<Vec<Record>> {
    let records = parse_records(BUNDLED_DATA)?;
    debug!(records = records.len(), "loaded bundled records");
    Ok(records)
}

/// Load records from a JSON file.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let content = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_records(&content)?;
    info!(path = %path.display(), records = records.len(), "loaded records");
    Ok(records)
}

/// Load from `path` when given, otherwise the bundled fixture.
pub fn load_records_or_bundled(path: Option<&Path>) -> Result<Vec<Record>> {
    match path {
        Some(path) => load_records(path),
        None => bundled_records(),
    }
}

/// Reject records whose values would corrupt the totals.
///
/// Names must not be blank and spend must be finite and non-negative.
pub fn validate_records(records: &[Record]) -> Result<()> {
    for (index, record) in records.iter().enumerate() {
        if record.channel.trim().is_empty() {
            return Err(DataError::invalid_record(index, "channel", "must not be empty"));
        }
        if record.region.trim().is_empty() {
            return Err(DataError::invalid_record(index, "region", "must not be empty"));
        }
        if !record.spend.is_finite() {
            return Err(DataError::invalid_record(index, "spend", "must be a finite number"));
        }
        if record.spend < 0.0 {
            return Err(DataError::invalid_record(index, "spend", "must not be negative"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_bundled_fixture_is_valid() {
        let records = bundled_records().unwrap();
        assert!(!records.is_empty());
    }

    #[test]
    fn test_parse_records() {
        let json = r#"[
            {"channel":"Google","region":"US","spend":100,"impressions":10,"conversions":1,"clicks":5},
            {"channel":"Meta","region":"EU","spend":200.5,"impressions":20,"conversions":2,"clicks":8}
        ]"#;
        let records = parse_records(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].spend, 200.5);
    }

    #[test]
    fn test_empty_array_is_valid() {
        assert!(parse_records("[]").unwrap().is_empty());
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let json = r#"[{"channel":"Google","region":"US","spend":1,"impressions":1,"clicks":1}]"#;
        assert!(matches!(parse_records(json), Err(DataError::Json(_))));
    }

    #[test]
    fn test_non_numeric_metric_is_rejected() {
        let json = r#"[{"channel":"Google","region":"US","spend":"lots","impressions":1,"conversions":1,"clicks":1}]"#;
        assert!(matches!(parse_records(json), Err(DataError::Json(_))));
    }

    #[test]
    fn test_negative_count_is_rejected() {
        let json = r#"[{"channel":"Google","region":"US","spend":1,"impressions":-4,"conversions":1,"clicks":1}]"#;
        assert!(matches!(parse_records(json), Err(DataError::Json(_))));
    }

    #[test]
    fn test_negative_spend_is_rejected_with_index() {
        let json = r#"[
            {"channel":"Google","region":"US","spend":1,"impressions":1,"conversions":1,"clicks":1},
            {"channel":"Google","region":"US","spend":-1,"impressions":1,"conversions":1,"clicks":1}
        ]"#;
        match parse_records(json) {
            Err(DataError::InvalidRecord { index, field, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(field, "spend");
            }
            other => panic!("expected invalid record, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_channel_is_rejected() {
        let records = vec![Record::new("  ", "US", 1.0, 1, 1, 1)];
        assert!(matches!(
            validate_records(&records),
            Err(DataError::InvalidRecord { field: "channel", .. })
        ));
    }

    #[test]
    fn test_non_finite_spend_is_rejected() {
        let records = vec![Record::new("Google", "US", f64::NAN, 1, 1, 1)];
        assert!(validate_records(&records).is_err());
    }

    #[test]
    fn test_load_records_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"channel":"TikTok","region":"APAC","spend":3.5,"impressions":7,"conversions":0,"clicks":1}}]"#
        )
        .unwrap();

        let records = load_records_or_bundled(Some(file.path())).unwrap();
        assert_eq!(records, vec![Record::new("TikTok", "APAC", 3.5, 7, 0, 1)]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_records(Path::new("/nonexistent/adlens/records.json")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }
}
