use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::analyzers::Dimension;
use crate::report::round_to;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructureScores {
    pub ai_indicators: f64,
    pub indent_consistency: f64,
    pub blank_line_ratio: f64,
}

impl Dimension for StructureScores {
    fn ai_indicators(&self) -> f64 {
        self.ai_indicators
    }
}

/// Uniform indentation plus a moderate blank-line rhythm is machine-like.
pub fn analyze(source: &str) -> StructureScores {
    let lines: Vec<&str> = source.lines().filter(|l| !l.trim().is_empty()).collect();

    let indents: Vec<usize> = lines
        .iter()
        .map(|l| l.len() - l.trim_start().len())
        .collect();

    // Mode share of indent width mod 4, over indented lines only.
    let mut residues: HashMap<usize, usize> = HashMap::new();
    for &i in indents.iter().filter(|&&i| i > 0) {
        *residues.entry(i % 4).or_insert(0) += 1;
    }
    let indented_total: usize = residues.values().sum();
    let indent_consistency = match residues.values().max() {
        Some(&mode) if indented_total > 0 => mode as f64 / indented_total as f64,
        _ => 0.0,
    };

    let blank_lines = source.matches("\n\n").count();
    let blank_line_ratio = blank_lines as f64 / lines.len().max(1) as f64;

    let mut score: f64 = 0.0;
    if indent_consistency > 0.95 {
        score += 0.4;
    } else if indent_consistency > 0.85 {
        score += 0.2;
    }
    if blank_line_ratio > 0.05 && blank_line_ratio < 0.15 {
        score += 0.2;
    }

    StructureScores {
        ai_indicators: score.clamp(0.0, 1.0),
        indent_consistency: round_to(indent_consistency, 3),
        blank_line_ratio: round_to(blank_line_ratio, 3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_file_has_no_indent_signal() {
        let scores = analyze("a = 1\nb = 2\n");
        assert_eq!(scores.indent_consistency, 0.0);
        assert_eq!(scores.ai_indicators, 0.0);
    }

    #[test]
    fn uniform_four_space_indents_score() {
        let source = "def f():\n    a = 1\n    b = 2\n    c = 3\n    return a\n";
        let scores = analyze(source);
        assert_eq!(scores.indent_consistency, 1.0);
        assert_eq!(scores.ai_indicators, 0.4);
    }

    #[test]
    fn ragged_indents_score_less() {
        let source = "def f():\n   a = 1\n    b = 2\n  c = 3\n     d = 4\n    e = 5\n";
        let scores = analyze(source);
        assert!(scores.indent_consistency < 0.95);
    }
}
