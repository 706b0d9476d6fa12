use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::domain::IdentifierFamily;
use crate::ena::{MetadataFields, validate_metadata_fields};
use crate::error::FetchError;
use crate::glob::SampleNamePattern;

pub const CONFIG_FILE_NAME: &str = "fetchngs.json";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub schema_version: Option<u32>,
    #[serde(default)]
    pub input_type: Option<String>,
    #[serde(default)]
    pub ena_metadata_fields: Option<String>,
    #[serde(default)]
    pub sample_pattern: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub schema_version: u32,
    pub input_type: Option<IdentifierFamily>,
    pub metadata_fields: MetadataFields,
    pub sample_pattern: Option<SampleNamePattern>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            schema_version: 1,
            input_type: None,
            metadata_fields: MetadataFields::required(),
            sample_pattern: None,
        }
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads `path`, else `./fetchngs.json`, else the per-user config file.
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, FetchError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => Self::default_path().ok_or(FetchError::MissingConfig)?,
        };

        let content = fs::read_to_string(&config_path)
            .map_err(|_| FetchError::ConfigRead(config_path.clone()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| FetchError::ConfigParse(err.to_string()))?;

        Self::resolve_config(config)
    }

    /// Like [`ConfigLoader::resolve`], but a missing implicit config yields defaults.
    pub fn resolve_or_default(path: Option<&str>) -> Result<ResolvedConfig, FetchError> {
        match Self::resolve(path) {
            Err(FetchError::MissingConfig) => Ok(ResolvedConfig::default()),
            other => other,
        }
    }

    pub fn resolve_config(config: Config) -> Result<ResolvedConfig, FetchError> {
        let schema_version = config.schema_version.unwrap_or(1);
        let input_type = config
            .input_type
            .as_deref()
            .map(str::parse::<IdentifierFamily>)
            .transpose()?;
        let metadata_fields = validate_metadata_fields(config.ena_metadata_fields.as_deref())?;
        let sample_pattern = config
            .sample_pattern
            .as_deref()
            .map(SampleNamePattern::new)
            .transpose()?;

        Ok(ResolvedConfig {
            schema_version,
            input_type,
            metadata_fields,
            sample_pattern,
        })
    }

    fn default_path() -> Option<PathBuf> {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return Some(local);
        }
        ProjectDirs::from("", "", "fetchngs")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }
}
