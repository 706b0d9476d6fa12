//! Intake checks for public sequencing data retrieval.
//!
//! * [`identifiers`] classifies an id batch as SRA / ENA / GEO / DDBJ or Synapse.
//! * [`ena`] validates requested ENA metadata fields.
//! * [`synapse`] flattens `synapse show` output.
//! * [`glob`] derives sample names from file names and glob patterns.

pub mod app;
pub mod config;
pub mod domain;
pub mod ena;
pub mod error;
pub mod fs_util;
pub mod glob;
pub mod identifiers;
pub mod output;
pub mod synapse;
