use std::collections::{BTreeMap, HashSet};

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ResolvedConfig;
use crate::domain::IdentifierFamily;
use crate::ena::{MetadataFields, validate_metadata_fields};
use crate::error::FetchError;
use crate::fs_util;
use crate::glob::SampleNamePattern;
use crate::identifiers::{classify_lines, considered_lines};
use crate::synapse::{SynapseRecord, parse_synapse_show};

/// A classified identifier batch, de-duplicated in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdBatch {
    pub family: IdentifierFamily,
    pub ids: Vec<String>,
    pub duplicates: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleAssignment {
    pub file: String,
    pub sample: String,
    /// `false` when the pattern did not match and the file stem was used instead.
    pub derived: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleFailure {
    pub file: String,
    pub error: String,
}

/// Sample assignments grouped by sample name. A file whose name cannot be checked
/// against the pattern is listed in `failures` without affecting the other files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SampleNames {
    pub groups: BTreeMap<String, Vec<SampleAssignment>>,
    pub failures: Vec<SampleFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SynapseMetadataResult {
    pub file: String,
    #[serde(flatten)]
    pub record: SynapseRecord,
}

#[derive(Debug, Clone, Default)]
pub struct CheckRequest {
    pub ids_text: String,
    pub input_type: Option<IdentifierFamily>,
    pub metadata_fields: Option<String>,
    pub sample_pattern: Option<String>,
    pub files: Vec<Utf8PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub generated_at: DateTime<Utc>,
    pub batch: IdBatch,
    pub metadata_fields: MetadataFields,
    pub samples: SampleNames,
}

#[derive(Debug, Clone, Default)]
pub struct App {
    config: ResolvedConfig,
}

impl App {
    pub fn new(config: ResolvedConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Classifies `text` and de-duplicates the ids. A declared family given here takes
    /// precedence over the configured one.
    pub fn classify_ids(
        &self,
        text: &str,
        declared: Option<IdentifierFamily>,
    ) -> Result<IdBatch, FetchError> {
        let declared = declared.or(self.config.input_type);
        let family = classify_lines(text.lines(), declared)?;

        let considered = considered_lines(text.lines());
        let total = considered.len();
        let mut seen = HashSet::new();
        let ids = considered
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect::<Vec<_>>();
        let duplicates = total - ids.len();
        if duplicates > 0 {
            debug!(duplicates, "dropped duplicate ids");
        }
        Ok(IdBatch {
            family,
            ids,
            duplicates,
        })
    }

    pub fn classify_id_file(
        &self,
        path: &Utf8Path,
        declared: Option<IdentifierFamily>,
    ) -> Result<IdBatch, FetchError> {
        let text = fs_util::read_text(path)?;
        self.classify_ids(&text, declared)
    }

    pub fn metadata_fields(&self, input: Option<&str>) -> Result<MetadataFields, FetchError> {
        match input.filter(|value| !value.trim().is_empty()) {
            Some(value) => validate_metadata_fields(Some(value)),
            None => Ok(self.config.metadata_fields.clone()),
        }
    }

    pub fn synapse_metadata(&self, path: &Utf8Path) -> Result<SynapseMetadataResult, FetchError> {
        let text = fs_util::read_text(path)?;
        Ok(SynapseMetadataResult {
            file: path.to_string(),
            record: parse_synapse_show(&text),
        })
    }

    /// Derives a sample name for every file, grouped by sample. Only an uncompilable
    /// pattern fails the whole call.
    pub fn sample_names(
        &self,
        files: &[Utf8PathBuf],
        pattern: Option<&str>,
    ) -> Result<SampleNames, FetchError> {
        let compiled;
        let pattern = match pattern {
            Some(raw) => {
                compiled = SampleNamePattern::new(raw)?;
                Some(&compiled)
            }
            None => self.config.sample_pattern.as_ref(),
        };

        let mut names = SampleNames::default();
        for file in files {
            match derive_sample_name(file, pattern) {
                Ok(assignment) => names
                    .groups
                    .entry(assignment.sample.clone())
                    .or_default()
                    .push(assignment),
                Err(err) => {
                    warn!(file = %file, error = %err, "skipping file");
                    names.failures.push(SampleFailure {
                        file: file.to_string(),
                        error: err.to_string(),
                    });
                }
            }
        }
        Ok(names)
    }

    pub fn check(&self, request: CheckRequest) -> Result<CheckReport, FetchError> {
        let batch = self.classify_ids(&request.ids_text, request.input_type)?;
        let metadata_fields = self.metadata_fields(request.metadata_fields.as_deref())?;
        let samples = self.sample_names(&request.files, request.sample_pattern.as_deref())?;
        Ok(CheckReport {
            generated_at: Utc::now(),
            batch,
            metadata_fields,
            samples,
        })
    }
}

/// Applies `pattern` to the file name of `path`, falling back to the part of the file
/// name before its first `.` when no pattern is given or nothing could be derived.
pub fn derive_sample_name(
    path: &Utf8Path,
    pattern: Option<&SampleNamePattern>,
) -> Result<SampleAssignment, FetchError> {
    let file_name = path.file_name().unwrap_or(path.as_str());
    let derived = match pattern {
        Some(pattern) => pattern.sample_name(file_name)?,
        None => String::new(),
    };
    if !derived.is_empty() {
        return Ok(SampleAssignment {
            file: path.to_string(),
            sample: derived,
            derived: true,
        });
    }

    if let Some(pattern) = pattern {
        warn!(file = %path, pattern = pattern.as_str(), "sample name not derivable, using file stem");
    }
    let stem = file_name
        .split_once('.')
        .map_or(file_name, |(stem, _)| stem);
    Ok(SampleAssignment {
        file: path.to_string(),
        sample: stem.to_string(),
        derived: false,
    })
}
