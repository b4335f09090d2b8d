use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analyzers::{non_blank_count, Dimension};

static TODO_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(#|//)\s*(TODO|FIXME|HACK|NOTE|XXX)").unwrap());
static TEMP_NAMES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(tmp|temp|foo|bar|baz|xxx|yyy|zzz)\b").unwrap());
static DEBUG_STATEMENTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(console\.log|print\s*\(|debugger|System\.out\.print)").unwrap());
static COMMENTED_CODE_HASH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#\s*(if|for|while|def|class|return|import)\s").unwrap());
static COMMENTED_CODE_SLASH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"//\s*(if|for|while|function|class|return|import)\s").unwrap());
static MAGIC_WITH_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\s*#").unwrap());
static ABBREVIATIONS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(cfg|ctx|env|msg|req|res|db|api|btn|img|err|fmt)\b").unwrap());

/// Only files with more than this many non-blank lines are scored; short
/// snippets legitimately lack quirks.
const MIN_LINES: usize = 30;

const QUIRK_CHECKS: usize = 6;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuirkScores {
    pub ai_indicators: f64,
    pub missing_quirk_count: usize,
    pub total_quirk_checks: usize,
    pub has_todo_fixme: bool,
    pub has_temp_vars: bool,
    pub has_debug_statements: bool,
    pub has_commented_code: bool,
}

impl Dimension for QuirkScores {
    fn ai_indicators(&self) -> f64 {
        self.ai_indicators
    }
}

/// Human working residue: TODOs, temp names, debug prints, commented-out
/// code, annotated magic numbers, abbreviations. Absence is the signal.
pub fn analyze(source: &str) -> (QuirkScores, Vec<String>) {
    let mut missing = Vec::new();

    let has_todo = TODO_MARKERS.is_match(source);
    if !has_todo {
        missing.push("No TODO/FIXME/HACK/NOTE/XXX comments".to_string());
    }

    let has_temp_vars = TEMP_NAMES.is_match(source);
    if !has_temp_vars {
        missing.push("No temporary variable names (tmp, temp, foo, bar)".to_string());
    }

    let has_debug = DEBUG_STATEMENTS.is_match(source);
    if !has_debug {
        missing.push("No debugging statements (print, console.log)".to_string());
    }

    let has_commented_code =
        COMMENTED_CODE_HASH.is_match(source) || COMMENTED_CODE_SLASH.is_match(source);
    if !has_commented_code {
        missing.push("No commented-out code".to_string());
    }

    if !MAGIC_WITH_COMMENT.is_match(source) {
        missing.push("No magic numbers with inline comments".to_string());
    }

    if !ABBREVIATIONS.is_match(source) {
        missing.push("No common abbreviations (cfg, ctx, env, msg, etc.)".to_string());
    }

    let missing_count = missing.len();

    let mut score: f64 = 0.0;
    if non_blank_count(source) > MIN_LINES {
        let missing_ratio = missing_count as f64 / QUIRK_CHECKS as f64;
        if missing_ratio > 0.8 {
            score += 0.5;
        } else if missing_ratio > 0.6 {
            score += 0.3;
        } else if missing_ratio > 0.4 {
            score += 0.15;
        }
    }

    let scores = QuirkScores {
        ai_indicators: score.clamp(0.0, 1.0),
        missing_quirk_count: missing_count,
        total_quirk_checks: QUIRK_CHECKS,
        has_todo_fixme: has_todo,
        has_temp_vars,
        has_debug_statements: has_debug,
        has_commented_code,
    };
    (scores, missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spotless_file(lines: usize) -> String {
        (0..lines)
            .map(|i| format!("value_{i} = compute_{i}()\n"))
            .collect()
    }

    #[test]
    fn short_files_are_never_scored() {
        let (scores, missing) = analyze(&spotless_file(10));
        assert_eq!(scores.missing_quirk_count, 6);
        assert_eq!(missing.len(), 6);
        assert_eq!(scores.ai_indicators, 0.0);
    }

    #[test]
    fn a_long_spotless_file_is_suspicious() {
        let (scores, _) = analyze(&spotless_file(40));
        assert_eq!(scores.missing_quirk_count, 6);
        assert_eq!(scores.ai_indicators, 0.5);
    }

    #[test]
    fn quirks_reduce_the_missing_count() {
        let mut source = spotless_file(40);
        source.push_str("# TODO clean this up\ntmp = 1\nprint(tmp)\n");
        let (scores, _) = analyze(&source);
        assert!(scores.has_todo_fixme);
        assert!(scores.has_temp_vars);
        assert!(scores.has_debug_statements);
        assert_eq!(scores.missing_quirk_count, 3);
        // 3/6 missing only clears the lowest rung
        assert!((scores.ai_indicators - 0.15).abs() < 1e-9);
    }
}
