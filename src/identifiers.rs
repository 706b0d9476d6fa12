use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::domain::IdentifierFamily;
use crate::error::FetchError;

const SRA_ID_PATTERN: &str =
    r"^(((SR|ER|DR)[APRSX])|(SAM(N|EA|D))|(PRJ(NA|EB|DB))|(GS[EM]))(\d+)$";
const SYNAPSE_ID_PATTERN: &str = r"^syn\d{8}$";

static SRA_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(SRA_ID_PATTERN).unwrap());
static SYNAPSE_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(SYNAPSE_ID_PATTERN).unwrap());

/// Outcome of testing a whole batch against one family's pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FamilyMatch {
    Absent,
    Confirmed,
    Partial { offenders: Vec<String> },
}

impl FamilyMatch {
    /// `matched == 0` is absent, `matched == total` is confirmed, anything in between is partial.
    pub fn decide(total: usize, offenders: Vec<String>) -> Self {
        let matched = total.saturating_sub(offenders.len());
        if matched == 0 {
            FamilyMatch::Absent
        } else if matched == total {
            FamilyMatch::Confirmed
        } else {
            FamilyMatch::Partial { offenders }
        }
    }
}

pub fn family_pattern(family: IdentifierFamily) -> &'static Regex {
    match family {
        IdentifierFamily::Sra => LazyLock::force(&SRA_ID),
        IdentifierFamily::Synapse => LazyLock::force(&SYNAPSE_ID),
    }
}

pub fn is_sra_id(token: &str) -> bool {
    SRA_ID.is_match(token)
}

pub fn is_synapse_id(token: &str) -> bool {
    SYNAPSE_ID.is_match(token)
}

pub fn match_family<S: AsRef<str>>(ids: &[S], family: IdentifierFamily) -> FamilyMatch {
    let pattern = family_pattern(family);
    let offenders = ids
        .iter()
        .map(AsRef::as_ref)
        .filter(|id| !pattern.is_match(id))
        .map(str::to_string)
        .collect::<Vec<_>>();
    FamilyMatch::decide(ids.len(), offenders)
}

/// Classifies newline-separated identifier text.
pub fn classify(
    text: &str,
    expected: Option<IdentifierFamily>,
) -> Result<IdentifierFamily, FetchError> {
    classify_lines(text.lines(), expected)
}

/// Classifies a batch of identifier lines. Lines are trimmed and blank lines are not
/// considered. SRA is tried before Synapse, and a partial match of either family is a
/// conflict rather than a reason to try the other one.
pub fn classify_lines<I, S>(
    lines: I,
    expected: Option<IdentifierFamily>,
) -> Result<IdentifierFamily, FetchError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let ids = considered_lines(lines);
    let detected = detect(&ids)?;
    debug!(family = %detected, ids = ids.len(), "identifier family detected");

    if let Some(declared) = expected {
        if declared != detected {
            return Err(FetchError::DeclaredTypeMismatch {
                declared: declared.to_string(),
                detected: detected.to_string(),
            });
        }
    }
    Ok(detected)
}

pub(crate) fn considered_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| {
            let trimmed = line.as_ref().trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect()
}

fn detect(ids: &[String]) -> Result<IdentifierFamily, FetchError> {
    for family in [IdentifierFamily::Sra, IdentifierFamily::Synapse] {
        match match_family(ids, family) {
            FamilyMatch::Absent => continue,
            FamilyMatch::Confirmed => return Ok(family),
            FamilyMatch::Partial { offenders } => {
                return Err(FetchError::ConflictingIdentifiers { offenders });
            }
        }
    }
    Err(FetchError::UnrecognizedIdentifierFormat)
}
