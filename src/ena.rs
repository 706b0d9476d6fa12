use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::error::FetchError;

/// Fields every ENA metadata request must include for downstream retrieval to work.
pub const REQUIRED_METADATA_FIELDS: [&str; 5] = [
    "run_accession",
    "experiment_accession",
    "library_layout",
    "fastq_ftp",
    "fastq_md5",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MetadataFields(Vec<String>);

impl MetadataFields {
    pub fn required() -> Self {
        Self(
            REQUIRED_METADATA_FIELDS
                .iter()
                .map(|field| field.to_string())
                .collect(),
        )
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|value| value == field)
    }

    /// Comma-joined form used for the `fields` parameter of ENA queries.
    pub fn to_query_value(&self) -> String {
        self.0.join(",")
    }
}

/// Checks a comma-separated field list against [`REQUIRED_METADATA_FIELDS`].
///
/// A missing or blank list yields the required set itself. Otherwise tokens are
/// trimmed, lowercased and de-duplicated in order, and the result must be a
/// superset of the required set.
pub fn validate_metadata_fields(input: Option<&str>) -> Result<MetadataFields, FetchError> {
    let Some(raw) = input.filter(|value| !value.trim().is_empty()) else {
        return Ok(MetadataFields::required());
    };

    let mut seen = HashSet::new();
    let fields = raw
        .split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .filter(|token| seen.insert(token.clone()))
        .collect::<Vec<_>>();

    let missing = REQUIRED_METADATA_FIELDS
        .iter()
        .filter(|required| !seen.contains(**required))
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        debug!(?missing, "ENA metadata fields missing required entries");
        return Err(FetchError::InvalidMetadataFields {
            required: REQUIRED_METADATA_FIELDS.join(","),
            provided: raw.to_string(),
        });
    }
    Ok(MetadataFields(fields))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn absent_input_yields_required_set() {
        let fields = validate_metadata_fields(None).unwrap();
        assert_eq!(fields, MetadataFields::required());
        let fields = validate_metadata_fields(Some("   ")).unwrap();
        assert_eq!(fields.as_slice().len(), 5);
    }

    #[test]
    fn duplicates_collapse() {
        let fields = validate_metadata_fields(Some(
            "run_accession,RUN_ACCESSION,experiment_accession,library_layout,fastq_ftp,fastq_md5",
        ))
        .unwrap();
        assert_eq!(fields.as_slice().len(), 5);
        assert_eq!(fields.as_slice()[0], "run_accession");
    }

    #[test]
    fn error_quotes_input_verbatim() {
        let err = validate_metadata_fields(Some("Run_Accession, fastq_ftp")).unwrap_err();
        assert_matches!(
            err,
            FetchError::InvalidMetadataFields { required, provided }
                if provided == "Run_Accession, fastq_ftp"
                    && required == "run_accession,experiment_accession,library_layout,fastq_ftp,fastq_md5"
        );
    }
}
