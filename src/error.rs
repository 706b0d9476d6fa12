use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum FetchError {
    #[error("mixture of ids provided via input: {}", .offenders.join(", "))]
    #[diagnostic(
        code(fetchngs::ids::conflict),
        help("provide either SRA / ENA / GEO / DDBJ or Synapse ids, not both")
    )]
    ConflictingIdentifiers { offenders: Vec<String> },

    #[error("ids provided via input not recognised as SRA / ENA / GEO / DDBJ or Synapse ids")]
    #[diagnostic(
        code(fetchngs::ids::unrecognized),
        help("SRA-style ids look like SRR1234567 or GSE12345, Synapse ids like syn12345678")
    )]
    UnrecognizedIdentifierFormat,

    #[error("ids auto-detected as {detected} but input type declared as {declared}")]
    #[diagnostic(code(fetchngs::ids::mismatch))]
    DeclaredTypeMismatch { declared: String, detected: String },

    #[error("invalid input type: {0} (expected `sra` or `synapse`)")]
    InvalidInputType(String),

    #[error("invalid ENA metadata fields: '{provided}'; fields must include at least '{required}'")]
    #[diagnostic(
        code(fetchngs::ena::fields),
        help("extra fields are allowed, order and case are ignored")
    )]
    InvalidMetadataFields { required: String, provided: String },

    #[error("not a proper file pattern: file_name={file_name}; pattern={pattern}")]
    #[diagnostic(code(fetchngs::glob::literal))]
    InvalidGlobLiteral { file_name: String, pattern: String },

    #[error("glob pattern cannot be compiled: {pattern}: {message}")]
    #[diagnostic(code(fetchngs::glob::pattern))]
    InvalidGlobPattern { pattern: String, message: String },

    #[error("missing config file fetchngs.json in current directory")]
    MissingConfig,

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),
}
