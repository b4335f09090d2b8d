use serde::{Deserialize, Serialize};

use crate::analyzers::Dimension;
use crate::report::round_to;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerfectionScores {
    pub ai_indicators: f64,
    pub indent_perfection: f64,
    pub line_length_consistency: f64,
    pub no_trailing_whitespace: bool,
    pub blank_line_regularity: f64,
    pub perfection_count: usize,
}

impl Dimension for PerfectionScores {
    fn ai_indicators(&self) -> f64 {
        self.ai_indicators
    }
}

/// Four mechanical-perfection checks: 4-space-aligned indents, uniform line
/// lengths, zero trailing whitespace, evenly spaced blank lines.
pub fn analyze(source: &str) -> PerfectionScores {
    let lines: Vec<&str> = source.split('\n').collect();
    let non_empty: Vec<&str> = lines.iter().copied().filter(|l| !l.trim().is_empty()).collect();

    let indented: Vec<usize> = non_empty
        .iter()
        .map(|l| l.len() - l.trim_start().len())
        .filter(|&w| w > 0)
        .collect();
    let perfect_indents = indented.iter().filter(|&&w| w % 4 == 0).count();
    let indent_perfection = perfect_indents as f64 / indented.len().max(1) as f64;

    let line_lengths: Vec<usize> = non_empty.iter().map(|l| l.trim_end().len()).collect();
    let length_consistency = if line_lengths.is_empty() {
        0.5
    } else {
        let avg = line_lengths.iter().sum::<usize>() as f64 / line_lengths.len() as f64;
        let variance = line_lengths
            .iter()
            .map(|&l| (l as f64 - avg).powi(2))
            .sum::<f64>()
            / line_lengths.len() as f64;
        let std = variance.sqrt();
        if std < 15.0 {
            1.0
        } else {
            1.0 - (std / 50.0).min(1.0)
        }
    };

    let trailing = lines
        .iter()
        .filter(|l| l.trim_end() != **l && !l.trim().is_empty())
        .count();
    let no_trailing_whitespace = trailing == 0;

    let blank_positions: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.trim().is_empty())
        .map(|(i, _)| i)
        .collect();
    let blank_line_regularity = if blank_positions.len() > 2 {
        let gaps: Vec<f64> = blank_positions
            .windows(2)
            .map(|w| (w[1] - w[0]) as f64)
            .collect();
        let mean = gaps.iter().sum::<f64>() / gaps.len() as f64;
        let gap_variance = gaps.iter().map(|g| (g - mean).powi(2)).sum::<f64>() / gaps.len() as f64;
        if gap_variance < 5.0 {
            1.0
        } else {
            1.0 - (gap_variance / 20.0).min(1.0)
        }
    } else {
        0.5
    };

    let perfection_count = [
        indent_perfection > 0.98,
        length_consistency > 0.85,
        no_trailing_whitespace,
        blank_line_regularity > 0.8,
    ]
    .iter()
    .filter(|&&hit| hit)
    .count();

    let mut score: f64 = 0.0;
    if perfection_count >= 4 {
        score += 0.6;
    } else if perfection_count >= 3 {
        score += 0.4;
    } else if perfection_count >= 2 {
        score += 0.2;
    }

    PerfectionScores {
        ai_indicators: score.clamp(0.0, 1.0),
        indent_perfection: round_to(indent_perfection, 3),
        line_length_consistency: round_to(length_consistency, 3),
        no_trailing_whitespace,
        blank_line_regularity: round_to(blank_line_regularity, 3),
        perfection_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn machine_regular_file_scores_high() {
        // Uniform lines, 4-space indents, no trailing whitespace, blanks
        // every third line.
        let mut source = String::new();
        for i in 0..8 {
            source.push_str(&format!("def handler_{i}():\n"));
            source.push_str(&format!("    return process({i})\n"));
            source.push('\n');
        }
        let scores = analyze(&source);
        assert_eq!(scores.indent_perfection, 1.0);
        assert!(scores.no_trailing_whitespace);
        assert_eq!(scores.blank_line_regularity, 1.0);
        assert!(scores.perfection_count >= 3);
        assert!(scores.ai_indicators >= 0.4);
    }

    #[test]
    fn trailing_whitespace_breaks_one_check() {
        let source = "a = 1   \nb = 2\n";
        let scores = analyze(source);
        assert!(!scores.no_trailing_whitespace);
    }

    #[test]
    fn ragged_indents_lower_perfection() {
        let source = "def f():\n   a = 1\n     b = 2\n   c = 3\n";
        let scores = analyze(source);
        assert_eq!(scores.indent_perfection, 0.0);
    }
}
