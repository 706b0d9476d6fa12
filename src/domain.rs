use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Identifier family of an input batch. Retrieval branches once per run on this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierFamily {
    /// SRA / ENA / GEO / DDBJ accessions.
    Sra,
    Synapse,
}

impl IdentifierFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierFamily::Sra => "sra",
            IdentifierFamily::Synapse => "synapse",
        }
    }
}

impl fmt::Display for IdentifierFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IdentifierFamily {
    type Err = FetchError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sra" => Ok(IdentifierFamily::Sra),
            "synapse" => Ok(IdentifierFamily::Synapse),
            _ => Err(FetchError::InvalidInputType(value.to_string())),
        }
    }
}
