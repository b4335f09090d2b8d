use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analyzers::Dimension;
use crate::report::round_to;

static SNAKE_CASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-z]+_[a-z]+\b").unwrap());
static CAMEL_CASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-z]+[A-Z][a-z]+\b").unwrap());
static SPACED_OPS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s[=+\-*/]\s").unwrap());
static UNSPACED_OPS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9][=+\-*/][a-zA-Z0-9]").unwrap());
static HASH_COMMENTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*#").unwrap());
static SLASH_COMMENTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*//").unwrap());
static INDENT_FOUR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s{4}\S").unwrap());
static INDENT_TWO: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s{2}\S").unwrap());
static INDENT_TAB: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\t[^\t]").unwrap());

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsistencyScores {
    pub ai_indicators: f64,
    pub naming_consistency: f64,
    pub spacing_consistency: f64,
    pub comment_style_consistency: f64,
    pub indent_consistency: f64,
    pub perfect_consistency_count: usize,
}

impl Dimension for ConsistencyScores {
    fn ai_indicators(&self) -> f64 {
        self.ai_indicators
    }
}

/// Style dominance across four axes. Each sub-ratio only counts when its
/// sample is big enough; otherwise it sits at the neutral 0.5.
pub fn analyze(source: &str) -> ConsistencyScores {
    let snake = SNAKE_CASE.find_iter(source).count();
    let camel = CAMEL_CASE.find_iter(source).count();
    let total_naming = snake + camel;
    let naming_consistency = if total_naming > 5 {
        snake.max(camel) as f64 / total_naming.max(1) as f64
    } else {
        0.5
    };

    let spaced = SPACED_OPS.find_iter(source).count();
    let unspaced = UNSPACED_OPS.find_iter(source).count();
    let total_ops = spaced + unspaced;
    let spacing_consistency = if total_ops > 3 {
        spaced as f64 / total_ops.max(1) as f64
    } else {
        0.5
    };

    let hash = HASH_COMMENTS.find_iter(source).count();
    let slash = SLASH_COMMENTS.find_iter(source).count();
    let total_comments = hash + slash;
    let comment_style_consistency = if total_comments > 2 {
        hash.max(slash) as f64 / total_comments.max(1) as f64
    } else {
        0.5
    };

    let indent_4 = INDENT_FOUR.find_iter(source).count();
    let indent_2 = INDENT_TWO.find_iter(source).count();
    let indent_tab = INDENT_TAB.find_iter(source).count();
    let total_indent = indent_4 + indent_2 + indent_tab;
    let indent_consistency = if total_indent > 3 {
        indent_4.max(indent_2).max(indent_tab) as f64 / total_indent.max(1) as f64
    } else {
        0.5
    };

    let perfect_count = [
        naming_consistency > 0.95 && total_naming > 10,
        spacing_consistency > 0.98 && total_ops > 10,
        comment_style_consistency > 0.98 && total_comments > 5,
        indent_consistency > 0.98 && total_indent > 10,
    ]
    .iter()
    .filter(|&&hit| hit)
    .count();

    let mut score: f64 = 0.0;
    if perfect_count >= 3 {
        score += 0.6;
    } else if perfect_count >= 2 {
        score += 0.4;
    } else if perfect_count >= 1 {
        score += 0.2;
    }

    let avg_consistency = (naming_consistency
        + spacing_consistency
        + comment_style_consistency
        + indent_consistency)
        / 4.0;
    if avg_consistency > 0.9 {
        score += 0.2;
    }

    ConsistencyScores {
        ai_indicators: score.clamp(0.0, 1.0),
        naming_consistency: round_to(naming_consistency, 3),
        spacing_consistency: round_to(spacing_consistency, 3),
        comment_style_consistency: round_to(comment_style_consistency, 3),
        indent_consistency: round_to(indent_consistency, 3),
        perfect_consistency_count: perfect_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_samples_stay_neutral() {
        let scores = analyze("a = 1\n");
        assert_eq!(scores.naming_consistency, 0.5);
        assert_eq!(scores.spacing_consistency, 0.5);
        assert_eq!(scores.comment_style_consistency, 0.5);
        assert_eq!(scores.indent_consistency, 0.5);
        assert_eq!(scores.perfect_consistency_count, 0);
        assert_eq!(scores.ai_indicators, 0.0);
    }

    #[test]
    fn pure_snake_case_dominates() {
        let source = "first_name = 1\nlast_name = 2\nfull_name = 3\nuser_name = 4\n\
                      nick_name = 5\nreal_name = 6\nfile_name = 7\npath_name = 8\n\
                      dir_name = 9\nbase_name = 10\nhost_name = 11\nsite_name = 12\n";
        let scores = analyze(source);
        assert_eq!(scores.naming_consistency, 1.0);
        assert!(scores.perfect_consistency_count >= 1);
        assert!(scores.ai_indicators >= 0.2);
    }
}
