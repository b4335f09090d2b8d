use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analyzers::Dimension;
use crate::patterns::FORMAL_COMMENTS;
use crate::report::round_to;

static FUNCTION_DEFS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bdef\s+\w+\s*\(").unwrap());
static CLASS_DEFS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bclass\s+\w+").unwrap());

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentationScores {
    pub ai_indicators: f64,
    pub docstring_count: usize,
    pub function_count: usize,
    pub class_count: usize,
    pub documented_ratio: f64,
    pub avg_docstring_length: f64,
}

impl Dimension for DocumentationScores {
    fn ai_indicators(&self) -> f64 {
        self.ai_indicators
    }
}

/// Docstring coverage and length relative to the number of definitions.
pub fn analyze(source: &str) -> DocumentationScores {
    let docstring_lengths: Vec<usize> = FORMAL_COMMENTS
        .find_iter(source)
        .map(|m| m.as_str().len())
        .collect();

    let function_count = FUNCTION_DEFS.find_iter(source).count();
    let class_count = CLASS_DEFS.find_iter(source).count();

    let documented_ratio =
        docstring_lengths.len() as f64 / (function_count + class_count).max(1) as f64;
    let avg_docstring_length = if docstring_lengths.is_empty() {
        0.0
    } else {
        docstring_lengths.iter().sum::<usize>() as f64 / docstring_lengths.len() as f64
    };

    let mut score: f64 = 0.0;
    if documented_ratio > 0.7 {
        score += 0.4;
    } else if documented_ratio > 0.4 {
        score += 0.2;
    }
    if avg_docstring_length > 100.0 {
        score += 0.3;
    }

    DocumentationScores {
        ai_indicators: score.clamp(0.0, 1.0),
        docstring_count: docstring_lengths.len(),
        function_count,
        class_count,
        documented_ratio: round_to(documented_ratio, 3),
        avg_docstring_length: round_to(avg_docstring_length, 2),
    }
}
