use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analyzers::Dimension;
use crate::report::round_to;

static CONTROL_STRUCTURES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(if|for|while|switch|case)\b").unwrap());

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplexityScores {
    pub ai_indicators: f64,
    pub avg_line_length: f64,
    pub control_structures: usize,
    pub nesting_indicators: usize,
}

impl Dimension for ComplexityScores {
    fn ai_indicators(&self) -> f64 {
        self.ai_indicators
    }
}

/// Mid-length lines with shallow nesting are the house style of generators.
pub fn analyze(source: &str) -> ComplexityScores {
    let stripped: Vec<&str> = source
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let avg_line_length =
        stripped.iter().map(|l| l.len()).sum::<usize>() as f64 / stripped.len().max(1) as f64;

    let control_structures = CONTROL_STRUCTURES.find_iter(source).count();
    let nesting_indicators = source.matches("    if").count() + source.matches("        if").count();

    let mut score: f64 = 0.0;
    if avg_line_length > 60.0 && avg_line_length < 90.0 {
        score += 0.3;
    }
    if control_structures > 0 {
        let nesting_ratio = nesting_indicators as f64 / control_structures as f64;
        if nesting_ratio < 0.3 {
            score += 0.2;
        }
    }

    ComplexityScores {
        ai_indicators: score.clamp(0.0, 1.0),
        avg_line_length: round_to(avg_line_length, 2),
        control_structures,
        nesting_indicators,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_scores_zero() {
        let scores = analyze("");
        assert_eq!(scores.ai_indicators, 0.0);
        assert_eq!(scores.avg_line_length, 0.0);
    }

    #[test]
    fn flat_control_flow_scores() {
        let source = "if a:\n    pass\nfor b in c:\n    pass\nwhile d:\n    pass\n";
        let scores = analyze(source);
        assert_eq!(scores.control_structures, 3);
        assert_eq!(scores.nesting_indicators, 0);
        assert_eq!(scores.ai_indicators, 0.2);
    }

    #[test]
    fn indented_ifs_count_as_nesting() {
        // The eight-space line is counted by both substring probes.
        let source = "if a:\n    if b:\n        if c:\n            pass\n";
        let scores = analyze(source);
        assert_eq!(scores.nesting_indicators, 3);
    }
}
