use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::analyzers::{
    comments, complexity, consistency, defensive, documentation, enhanced_comments,
    error_handling, formatting, modern_syntax, modularization, naming, obvious, perfection,
    quirks, structure, textbook, DimensionScores,
};
use crate::report::{round_to, DetectionResult};
use crate::scoring::{composite_score, confidence_from, verdict_for};

/// Files above this size are rejected rather than analyzed.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Why a file's content could not be obtained. Every variant maps to an
/// ERROR result; none of them escapes [`Detector::analyze_file`].
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("File does not exist or is not a regular file")]
    NotAFile,
    #[error("File size exceeds limit of {limit} bytes")]
    TooLarge { limit: u64 },
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Runs every analyzer over a file and assembles the result.
///
/// Stateless apart from the configured size ceiling; one instance can serve
/// any number of files from any number of threads.
#[derive(Debug, Clone)]
pub struct Detector {
    max_file_size: u64,
}

impl Default for Detector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector {
    pub fn new() -> Self {
        Detector {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    pub fn with_max_file_size(max_file_size: u64) -> Self {
        Detector { max_file_size }
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Analyze the file at `path`. Never fails: unreadable, missing, and
    /// oversized files come back as ERROR results instead.
    pub fn analyze_file(&self, path: &Path) -> DetectionResult {
        let file_path = path.display().to_string();
        match read_source(path, self.max_file_size) {
            Ok(code) => self.analyze_source(file_path, &code),
            Err(e) => DetectionResult::error(file_path, e.to_string()),
        }
    }

    /// Analyze already-loaded text. `file_path` is carried through to the
    /// result untouched.
    pub fn analyze_source(&self, file_path: impl Into<String>, code: &str) -> DetectionResult {
        let (enhanced_scores, obvious_comments, ai_phrases) = enhanced_comments::analyze(code);
        let (defensive_scores, defensive_patterns) = defensive::analyze(code);
        let (textbook_scores, textbook_patterns) = textbook::analyze(code);
        let (modular_scores, small_functions) = modularization::analyze(code);
        let (quirk_scores, missing_quirks) = quirks::analyze(code);
        let (obvious_scores, obvious_examples) = obvious::analyze(code);

        let scores = DimensionScores {
            naming_analysis: naming::analyze(code),
            comment_analysis: comments::analyze(code),
            structure_analysis: structure::analyze(code),
            complexity_analysis: complexity::analyze(code),
            error_handling: error_handling::analyze(code),
            documentation: documentation::analyze(code),
            formatting_consistency: formatting::analyze(code),
            modern_syntax: modern_syntax::analyze(code),
            enhanced_comment_analysis: enhanced_scores,
            defensive_coding: defensive_scores,
            textbook_algorithms: textbook_scores,
            over_modularization: modular_scores,
            perfect_consistency: consistency::analyze(code),
            contextual_quirks: quirk_scores,
            formatting_perfection: perfection::analyze(code),
            obvious_comments: obvious_scores,
        };

        let mut detected_patterns = BTreeMap::new();
        detected_patterns.insert("obvious_comments".to_string(), capped(obvious_comments, 10));
        detected_patterns.insert("ai_phrases".to_string(), capped(ai_phrases, 10));
        detected_patterns.insert(
            "defensive_patterns".to_string(),
            capped(defensive_patterns, 10),
        );
        detected_patterns.insert(
            "textbook_patterns".to_string(),
            capped(textbook_patterns, 10),
        );
        detected_patterns.insert("small_functions".to_string(), capped(small_functions, 10));
        detected_patterns.insert("missing_quirks".to_string(), missing_quirks);
        detected_patterns.insert(
            "obvious_comment_examples".to_string(),
            capped(obvious_examples, 15),
        );

        let ai_score = composite_score(&scores);
        let confidence = confidence_from(&scores.values());
        let verdict = verdict_for(ai_score, confidence, &scores);
        let indicators = extract_key_indicators(&scores, &detected_patterns);

        DetectionResult {
            file_path: file_path.into(),
            ai_probability: round_to(ai_score * 100.0, 2),
            human_probability: round_to((1.0 - ai_score) * 100.0, 2),
            confidence,
            indicators,
            detailed_scores: Some(scores),
            verdict,
            detected_patterns,
        }
    }
}

fn capped(mut items: Vec<String>, limit: usize) -> Vec<String> {
    items.truncate(limit);
    items
}

fn read_source(path: &Path, max_file_size: u64) -> Result<String, ReadError> {
    let metadata = fs::metadata(path).map_err(|_| ReadError::NotAFile)?;
    if !metadata.is_file() {
        return Err(ReadError::NotAFile);
    }
    if metadata.len() > max_file_size {
        return Err(ReadError::TooLarge {
            limit: max_file_size,
        });
    }
    let bytes = fs::read(path)?;
    Ok(decode_dropping_invalid(bytes))
}

/// Best-effort decode: invalid UTF-8 sequences are dropped, not replaced and
/// not fatal.
fn decode_dropping_invalid(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            let mut out = String::with_capacity(bytes.len());
            let mut rest = &bytes[..];
            loop {
                match std::str::from_utf8(rest) {
                    Ok(valid) => {
                        out.push_str(valid);
                        break;
                    }
                    Err(err) => {
                        let valid_up_to = err.valid_up_to();
                        out.push_str(std::str::from_utf8(&rest[..valid_up_to]).unwrap_or(""));
                        let skip = err.error_len().unwrap_or(rest.len() - valid_up_to);
                        rest = &rest[valid_up_to + skip..];
                        if rest.is_empty() {
                            break;
                        }
                    }
                }
            }
            out
        }
    }
}

/// Presentation-only flags and examples surfaced at the top of a report.
/// Reads the finished score records; nothing here feeds back into scoring.
fn extract_key_indicators(
    scores: &DimensionScores,
    detected_patterns: &BTreeMap<String, Vec<String>>,
) -> Map<String, Value> {
    let mut indicators = Map::new();
    let mut flag = |name: &str, hit: bool| {
        if hit {
            indicators.insert(name.to_string(), Value::Bool(true));
        }
    };

    flag(
        "verbose_naming",
        scores.naming_analysis.avg_identifier_length > 10.0,
    );
    flag(
        "high_documentation",
        scores.comment_analysis.comment_ratio > 0.25,
    );
    flag(
        "perfect_formatting",
        scores.structure_analysis.indent_consistency > 0.9,
    );
    flag(
        "comprehensive_error_handling",
        scores.error_handling.error_handling_ratio > 0.08,
    );
    flag(
        "modern_syntax_heavy",
        scores.modern_syntax.modern_ratio > 0.8,
    );
    flag(
        "ai_typical_comment_phrases",
        scores.enhanced_comment_analysis.ai_phrase_ratio > 0.2,
    );
    flag(
        "obvious_comments_detected",
        scores.enhanced_comment_analysis.obvious_ratio > 0.15,
    );
    flag(
        "excessive_defensive_coding",
        scores.defensive_coding.defensive_ratio > 0.1,
    );
    flag(
        "textbook_implementations",
        scores.textbook_algorithms.textbook_pattern_count > 2,
    );
    flag(
        "over_modularized",
        scores.over_modularization.small_function_ratio > 0.4,
    );
    flag(
        "unnaturally_perfect_consistency",
        scores.perfect_consistency.perfect_consistency_count >= 2,
    );
    flag(
        "lacks_human_quirks",
        scores.contextual_quirks.missing_quirk_count >= 4,
    );
    flag(
        "flawless_formatting",
        scores.formatting_perfection.perfection_count >= 3,
    );
    flag(
        "explains_obvious_code",
        scores.obvious_comments.obvious_ratio > 0.2,
    );

    let mut examples = |key: &str, indicator: &str, limit: usize| {
        if let Some(items) = detected_patterns.get(key) {
            if !items.is_empty() {
                let list: Vec<Value> = items
                    .iter()
                    .take(limit)
                    .map(|s| Value::String(s.clone()))
                    .collect();
                indicators.insert(indicator.to_string(), Value::Array(list));
            }
        }
    };

    examples("obvious_comment_examples", "obvious_comment_examples", 5);
    examples("ai_phrases", "ai_phrase_examples", 5);
    examples("textbook_patterns", "textbook_pattern_examples", 5);
    examples("defensive_patterns", "defensive_pattern_examples", 5);
    examples("small_functions", "small_function_examples", 5);
    examples("missing_quirks", "missing_human_quirks", usize::MAX);

    indicators
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_utf8_bytes_are_dropped() {
        let bytes = b"abc\xff\xfedef".to_vec();
        assert_eq!(decode_dropping_invalid(bytes), "abcdef");
    }

    #[test]
    fn valid_utf8_passes_through() {
        let bytes = "héllo".as_bytes().to_vec();
        assert_eq!(decode_dropping_invalid(bytes), "héllo");
    }

    #[test]
    fn truncated_multibyte_at_end_is_dropped() {
        let mut bytes = "ok".as_bytes().to_vec();
        bytes.push(0xE2); // first byte of a three-byte sequence
        assert_eq!(decode_dropping_invalid(bytes), "ok");
    }

    #[test]
    fn missing_file_yields_error_result() {
        let detector = Detector::new();
        let result = detector.analyze_file(Path::new("definitely/not/here.py"));
        assert!(result.is_error());
        assert_eq!(
            result.indicators.get("error").and_then(|v| v.as_str()),
            Some("File does not exist or is not a regular file")
        );
    }

    #[test]
    fn probabilities_are_complements() {
        let result = Detector::new().analyze_source("mem.py", "def f():\n    return 1\n");
        assert!(!result.is_error());
        assert!((result.ai_probability + result.human_probability - 100.0).abs() < 0.011);
    }

    #[test]
    fn analysis_is_deterministic() {
        let code = "# check if ready\nif ready == True:\n    go()\n";
        let a = Detector::new().analyze_source("same.py", code);
        let b = Detector::new().analyze_source("same.py", code);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
