//! Sample-name derivation from file names and user glob patterns.
//!
//! Patterns support `*` (any run of characters), `?` (any single character),
//! `{a,b}` alternation and `[...]` bracket sets. Only the final path segment of the
//! pattern is used. The sample name is the file-name prefix that ends where the
//! last wildcard preceding any alternation matched, with trailing `-`, `_` and `.`
//! removed.

use camino::Utf8Path;
use regex::Regex;
use tracing::debug;

use crate::error::FetchError;

const SAMPLE_NAME_TRAILERS: [char; 3] = ['-', '_', '.'];

#[derive(Debug, Clone, PartialEq, Eq)]
enum GlobToken {
    Literal(char),
    AnyRun,
    AnyChar,
    AlternationOpen,
    AlternationSeparator,
    AlternationClose,
    /// `[...]` copied through to the regex unchanged.
    BracketSet(String),
}

impl GlobToken {
    fn push_regex(&self, out: &mut String) {
        match self {
            GlobToken::Literal(ch) => {
                let mut buf = [0u8; 4];
                out.push_str(&regex::escape(ch.encode_utf8(&mut buf)));
            }
            GlobToken::AnyRun => out.push_str("(.*)"),
            GlobToken::AnyChar => out.push_str("(.)"),
            GlobToken::AlternationOpen => out.push_str("(?:"),
            GlobToken::AlternationSeparator => out.push('|'),
            GlobToken::AlternationClose => out.push(')'),
            GlobToken::BracketSet(set) => out.push_str(set),
        }
    }
}

fn tokenize(pattern: &str) -> Vec<GlobToken> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut chars = pattern.chars();
    while let Some(ch) = chars.next() {
        let token = match ch {
            '*' => GlobToken::AnyRun,
            '?' => GlobToken::AnyChar,
            '{' => {
                depth += 1;
                GlobToken::AlternationOpen
            }
            '}' if depth > 0 => {
                depth -= 1;
                GlobToken::AlternationClose
            }
            ',' if depth > 0 => GlobToken::AlternationSeparator,
            '[' => {
                // A `]` first in the set, or right after `^`, is a member.
                let mut set = String::from('[');
                for next in chars.by_ref() {
                    let closes = next == ']' && set != "[" && set != "[^";
                    set.push(next);
                    if closes {
                        break;
                    }
                }
                GlobToken::BracketSet(set)
            }
            other => GlobToken::Literal(other),
        };
        tokens.push(token);
    }
    tokens
}

fn final_segment(pattern: &str) -> &str {
    pattern
        .rsplit_once(['/', '\\'])
        .map_or(pattern, |(_, name)| name)
}

fn has_wildcards(pattern: &str) -> bool {
    pattern.contains(['*', '?', '{', '['])
}

/// Number of `*`/`?` wildcards ahead of the first alternation or bracket set.
fn leading_group_count(pattern: &str) -> usize {
    pattern
        .chars()
        .take_while(|ch| !matches!(ch, '{' | '['))
        .filter(|ch| matches!(ch, '*' | '?'))
        .count()
}

fn floor_boundary(value: &str, index: usize) -> usize {
    let mut index = index.min(value.len());
    while !value.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[derive(Debug, Clone)]
enum PatternKind {
    Literal,
    Wildcard {
        regex: Regex,
        group_count: usize,
        alternation_start: Option<usize>,
    },
}

/// A compiled sample-name pattern, reusable across many file names.
#[derive(Debug, Clone)]
pub struct SampleNamePattern {
    pattern: String,
    kind: PatternKind,
}

impl SampleNamePattern {
    pub fn new(pattern: &str) -> Result<Self, FetchError> {
        let pattern = final_segment(pattern).to_string();
        if !has_wildcards(&pattern) {
            return Ok(Self {
                pattern,
                kind: PatternKind::Literal,
            });
        }

        let mut body = String::with_capacity(pattern.len() * 2);
        for token in tokenize(&pattern) {
            token.push_regex(&mut body);
        }
        let regex = Regex::new(&format!("^(?:{body})$")).map_err(|err| {
            FetchError::InvalidGlobPattern {
                pattern: pattern.clone(),
                message: err.to_string(),
            }
        })?;
        let group_count = leading_group_count(&pattern);
        let alternation_start = pattern.find(['{', '[']);
        debug!(%pattern, regex = %regex, group_count, "compiled sample name pattern");

        Ok(Self {
            pattern,
            kind: PatternKind::Wildcard {
                regex,
                group_count,
                alternation_start,
            },
        })
    }

    /// The pattern as used for matching, with any directory portion removed.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind, PatternKind::Literal)
    }

    /// Derives the sample name for `file_name`.
    ///
    /// Returns an empty string when a wildcard pattern does not match. A literal pattern
    /// that differs from `file_name` is an error.
    pub fn sample_name(&self, file_name: &str) -> Result<String, FetchError> {
        let (regex, group_count, alternation_start) = match &self.kind {
            PatternKind::Literal => {
                if file_name == self.pattern {
                    return Ok(file_name.to_string());
                }
                return Err(FetchError::InvalidGlobLiteral {
                    file_name: file_name.to_string(),
                    pattern: self.pattern.clone(),
                });
            }
            PatternKind::Wildcard {
                regex,
                group_count,
                alternation_start,
            } => (regex, *group_count, *alternation_start),
        };

        let Some(captures) = regex.captures(file_name) else {
            debug!(file_name, pattern = %self.pattern, "file name does not match pattern");
            return Ok(String::new());
        };

        let groups = regex.captures_len() - 1;
        let c = group_count.min(groups);
        let end = if c > 0 {
            captures.get(c).map_or(file_name.len(), |group| group.end())
        } else if let Some(start) = alternation_start {
            floor_boundary(file_name, start)
        } else {
            file_name.len()
        };

        Ok(file_name[..end]
            .trim_end_matches(SAMPLE_NAME_TRAILERS)
            .to_string())
    }
}

pub fn sample_name_from_file_name(file_name: &str, pattern: &str) -> Result<String, FetchError> {
    SampleNamePattern::new(pattern)?.sample_name(file_name)
}

/// Like [`sample_name_from_file_name`], using the file-name component of `path`.
pub fn sample_name_from_path(path: &Utf8Path, pattern: &str) -> Result<String, FetchError> {
    let file_name = path.file_name().unwrap_or(path.as_str());
    sample_name_from_file_name(file_name, pattern)
}
