use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analyzers::Dimension;
use crate::report::round_to;

static SPACED_OPERATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s[+\-*/=]\s").unwrap());
static ALL_OPERATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[+\-*/=]").unwrap());

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormattingScores {
    pub ai_indicators: f64,
    pub spacing_consistency: f64,
}

impl Dimension for FormattingScores {
    fn ai_indicators(&self) -> f64 {
        self.ai_indicators
    }
}

/// Near-universal whitespace around operators.
pub fn analyze(source: &str) -> FormattingScores {
    let spaced = SPACED_OPERATORS.find_iter(source).count();
    let total = ALL_OPERATORS.find_iter(source).count();
    let spacing_consistency = spaced as f64 / total.max(1) as f64;

    let mut score: f64 = 0.0;
    if spacing_consistency > 0.9 {
        score += 0.5;
    } else if spacing_consistency > 0.7 {
        score += 0.3;
    }

    FormattingScores {
        ai_indicators: score.clamp(0.0, 1.0),
        spacing_consistency: round_to(spacing_consistency, 3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_operators_means_zero_ratio() {
        let scores = analyze("pass\n");
        assert_eq!(scores.spacing_consistency, 0.0);
        assert_eq!(scores.ai_indicators, 0.0);
    }

    #[test]
    fn fully_spaced_operators_score() {
        let scores = analyze("a = b + c\nd = e * f\n");
        assert_eq!(scores.spacing_consistency, 1.0);
        assert_eq!(scores.ai_indicators, 0.5);
    }

    #[test]
    fn cramped_operators_do_not() {
        let scores = analyze("a=b+c\nd=e*f\n");
        assert_eq!(scores.spacing_consistency, 0.0);
        assert_eq!(scores.ai_indicators, 0.0);
    }
}
