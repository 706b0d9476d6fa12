use assert_matches::assert_matches;
use camino::Utf8Path;

use fetchngs_core::error::FetchError;
use fetchngs_core::glob::{SampleNamePattern, sample_name_from_file_name, sample_name_from_path};

fn name(file_name: &str, pattern: &str) -> String {
    sample_name_from_file_name(file_name, pattern).unwrap()
}

// literal patterns

#[test]
fn literal_pattern_equal_to_file_name() {
    assert_eq!(name("data.txt", "data.txt"), "data.txt");
}

#[test]
fn literal_pattern_keeps_trailing_separators() {
    assert_eq!(name("sample_.fq", "sample_.fq"), "sample_.fq");
}

#[test]
fn literal_pattern_mismatch_is_error() {
    let err = sample_name_from_file_name("data2.txt", "data.txt").unwrap_err();
    assert_matches!(
        err,
        FetchError::InvalidGlobLiteral { file_name, pattern }
            if file_name == "data2.txt" && pattern == "data.txt"
    );
}

#[test]
fn literal_pattern_ignores_directory() {
    assert_eq!(name("data.txt", "/some/dir/data.txt"), "data.txt");
    let pattern = SampleNamePattern::new("/some/dir/data.txt").unwrap();
    assert!(pattern.is_literal());
    assert_eq!(pattern.as_str(), "data.txt");
}

// wildcard-only patterns

#[test]
fn star_captures_sample_prefix() {
    assert_eq!(name("sample_A1_R1.fastq.gz", "sample_*_R1.fastq.gz"), "sample_A1");
}

#[test]
fn leading_star_with_read_suffix() {
    assert_eq!(name("SRR014966_1.fastq.gz", "*_1.fastq.gz"), "SRR014966");
}

#[test]
fn star_is_greedy() {
    assert_eq!(name("S1_L001_R1_001.fastq.gz", "*_R1_001.fastq.gz"), "S1_L001");
}

#[test]
fn trailing_separators_are_trimmed() {
    assert_eq!(name("sampleA-_.R1.fq", "*R1.fq"), "sampleA");
}

#[test]
fn last_leading_group_sets_end() {
    assert_eq!(name("ab_cd_R1.fq", "??_*_R1.fq"), "ab_cd");
}

#[test]
fn question_mark_matches_exactly_one_character() {
    assert_eq!(name("s1.txt", "s?.txt"), "s1");
    assert_eq!(name("s12.txt", "s?.txt"), "");
}

#[test]
fn trailing_star_takes_whole_name() {
    assert_eq!(name("reads.fastq", "reads*"), "reads.fastq");
}

#[test]
fn dots_are_literal() {
    assert_eq!(name("a_R1xfq", "*_R1.fq"), "");
}

#[test]
fn pattern_directory_is_ignored() {
    assert_eq!(name("s1_R1.fq", "/data/fastq/*_R1.fq"), "s1");
}

#[test]
fn pattern_is_reusable_across_files() {
    let pattern = SampleNamePattern::new("*_R{1,2}.fastq.gz").unwrap();
    assert!(!pattern.is_literal());
    assert_eq!(pattern.sample_name("S1_R1.fastq.gz").unwrap(), "S1");
    assert_eq!(pattern.sample_name("S1_R2.fastq.gz").unwrap(), "S1");
    assert_eq!(pattern.sample_name("S2_R1.fastq.gz").unwrap(), "S2");
}

// alternation patterns

#[test]
fn wildcard_before_alternation() {
    assert_eq!(name("S1_R2.fastq.gz", "*_R{1,2}.fastq.gz"), "S1");
}

#[test]
fn alternation_without_leading_wildcard_uses_pattern_offset() {
    assert_eq!(name("sample_R1.fq", "sample{_R1,_R2}.fq"), "sample");
    assert_eq!(name("sample_R2.fq", "sample_R{1,2}.fq"), "sample_R");
}

#[test]
fn alternation_with_empty_branch() {
    assert_eq!(name("abcdef", "abcdef{,x}"), "abcdef");
    assert_eq!(name("abcdefx", "abcdef{,x}"), "abcdef");
    assert_eq!(name("ab", "abcdef{,x}"), "");
}

#[test]
fn wildcards_inside_alternation_are_not_counted() {
    assert_eq!(name("run1_R1.fq", "run1{_R*,_X}.fq"), "run1");
}

#[test]
fn bracket_set_acts_as_alternation() {
    assert_eq!(name("S1_R2.fq", "*_R[12].fq"), "S1");
    assert_eq!(name("S1_R3.fq", "*_R[12].fq"), "");
}

#[test]
fn bracket_set_may_contain_close_bracket() {
    assert_eq!(name("S1_R].fq", "*_R[]].fq"), "S1");
    assert_eq!(name("S1_Rx.fq", "*_R[^]].fq"), "S1");
    assert_eq!(name("S1_R].fq", "*_R[^]].fq"), "");
}

#[test]
fn leading_bracket_set_yields_empty_prefix() {
    assert_eq!(name("A1.fq", "[AB]*.fq"), "");
}

#[test]
fn comma_outside_braces_is_literal() {
    assert_eq!(name("a,b_1.txt", "*_1.txt"), "a,b");
    assert_eq!(name("x,y.txt", "*,y.txt"), "x");
}

#[test]
fn unclosed_alternation_is_invalid_pattern() {
    let err = SampleNamePattern::new("*_R{1,2.fq").unwrap_err();
    assert_matches!(err, FetchError::InvalidGlobPattern { pattern, .. } if pattern == "*_R{1,2.fq");
}

// no match

#[test]
fn unmatched_wildcard_returns_empty() {
    assert_eq!(name("unrelated.bam", "sample_*_R1.fastq.gz"), "");
}

#[test]
fn match_must_cover_whole_file_name() {
    assert_eq!(name("xsample_A_R1.fq.bak", "sample_*_R1.fq"), "");
}

#[test]
fn path_variant_uses_file_name_component() {
    let path = Utf8Path::new("/downloads/syn12345678/S7_R1.fastq.gz");
    assert_eq!(sample_name_from_path(path, "*_R{1,2}.fastq.gz").unwrap(), "S7");
}
