use std::fs;

use assert_matches::assert_matches;

use fetchngs_core::config::{Config, ConfigLoader};
use fetchngs_core::domain::IdentifierFamily;
use fetchngs_core::error::FetchError;

#[test]
fn parse_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fetchngs.json");
    fs::write(
        &path,
        r#"{
            "schema_version": 1,
            "input_type": "SRA",
            "ena_metadata_fields": "run_accession,experiment_accession,library_layout,fastq_ftp,fastq_md5,sample_title",
            "sample_pattern": "reads/*_R{1,2}.fastq.gz"
        }"#,
    )
    .unwrap();

    let resolved = ConfigLoader::resolve(path.to_str()).unwrap();
    assert_eq!(resolved.schema_version, 1);
    assert_eq!(resolved.input_type, Some(IdentifierFamily::Sra));
    assert!(resolved.metadata_fields.contains("sample_title"));
    let pattern = resolved.sample_pattern.unwrap();
    assert_eq!(pattern.as_str(), "*_R{1,2}.fastq.gz");
}

#[test]
fn invalid_values_fail_resolution() {
    let err = ConfigLoader::resolve_config(Config {
        input_type: Some("geo".to_string()),
        ..Config::default()
    })
    .unwrap_err();
    assert_matches!(err, FetchError::InvalidInputType(_));

    let err = ConfigLoader::resolve_config(Config {
        ena_metadata_fields: Some("run_accession".to_string()),
        ..Config::default()
    })
    .unwrap_err();
    assert_matches!(err, FetchError::InvalidMetadataFields { .. });
}

#[test]
fn explicit_missing_path_is_read_error() {
    let err = ConfigLoader::resolve(Some("/nonexistent/fetchngs.json")).unwrap_err();
    assert_matches!(err, FetchError::ConfigRead(_));
}

#[test]
fn malformed_json_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fetchngs.json");
    fs::write(&path, "{ not json").unwrap();
    let err = ConfigLoader::resolve(path.to_str()).unwrap_err();
    assert_matches!(err, FetchError::ConfigParse(_));
}
