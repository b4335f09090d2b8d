use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analyzers::{non_blank_count, Dimension};
use crate::patterns::{SELF_INCREMENT, SELF_INCREMENT_LABEL, TEXTBOOK_PATTERNS};
use crate::report::round_to;

static RANGE_LEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"range\s*\(\s*len\s*\(").unwrap());
static STRING_CONCAT: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\w+\s*\+=\s*["']"#).unwrap());
static APPEND_IN_LOOP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"for\s+.+:\s*\n\s+\w+\.append\(").unwrap());

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextbookScores {
    pub ai_indicators: f64,
    pub textbook_pattern_count: usize,
    pub verbose_indicators: usize,
    pub textbook_ratio: f64,
}

impl Dimension for TextbookScores {
    fn ai_indicators(&self) -> f64 {
        self.ai_indicators
    }
}

/// First-course idioms: `range(len(...))`, `== True`, manual list building.
pub fn analyze(source: &str) -> (TextbookScores, Vec<String>) {
    let mut patterns_found = Vec::new();
    let mut textbook_count = 0usize;

    for (re, label) in TEXTBOOK_PATTERNS.iter() {
        let matches = re.find_iter(source).count();
        if matches > 0 {
            textbook_count += matches;
            patterns_found.push((*label).to_string());
        }
    }

    // Self-increment needs a capture comparison in place of a backreference.
    let self_increments = SELF_INCREMENT
        .captures_iter(source)
        .filter(|c| c.get(1).map(|m| m.as_str()) == c.get(2).map(|m| m.as_str()))
        .count();
    if self_increments > 0 {
        textbook_count += self_increments;
        patterns_found.push(SELF_INCREMENT_LABEL.to_string());
    }

    let mut verbose_indicators = 0usize;

    let range_len = RANGE_LEN.find_iter(source).count();
    verbose_indicators += range_len;

    let string_concat = STRING_CONCAT.find_iter(source).count();
    if string_concat > 2 {
        verbose_indicators += 1;
        patterns_found.push("String concatenation in loop".to_string());
    }

    let append_in_loop = APPEND_IN_LOOP.find_iter(source).count();
    if append_in_loop > 2 {
        verbose_indicators += append_in_loop;
        patterns_found.push(format!(
            "Append in loop ({append_in_loop}x) instead of comprehension"
        ));
    }

    let lines = non_blank_count(source);
    let textbook_ratio = textbook_count as f64 / lines.max(1) as f64;

    let mut score: f64 = 0.0;
    if textbook_count > 3 {
        score += 0.4;
    } else if textbook_count > 1 {
        score += 0.2;
    }
    if verbose_indicators > 2 {
        score += 0.3;
    } else if verbose_indicators > 0 {
        score += 0.1;
    }

    let scores = TextbookScores {
        ai_indicators: score.clamp(0.0, 1.0),
        textbook_pattern_count: textbook_count,
        verbose_indicators,
        textbook_ratio: round_to(textbook_ratio, 4),
    };
    (scores, patterns_found)
}
