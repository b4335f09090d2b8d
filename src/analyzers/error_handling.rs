use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analyzers::{non_blank_count, Dimension};
use crate::report::round_to;

static TRY_BLOCKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\btry\s*:").unwrap());
static EXCEPT_BLOCKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bexcept\s+").unwrap());
static NULL_CHECKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(if\s+\w+\s+is\s+not\s+None|if\s+\w+\s*!=\s*null)").unwrap());

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorHandlingScores {
    pub ai_indicators: f64,
    pub try_blocks: usize,
    pub except_blocks: usize,
    pub null_checks: usize,
    pub error_handling_ratio: f64,
}

impl Dimension for ErrorHandlingScores {
    fn ai_indicators(&self) -> f64 {
        self.ai_indicators
    }
}

/// Blanket try/except and null-guard coverage relative to file size.
pub fn analyze(source: &str) -> ErrorHandlingScores {
    let try_blocks = TRY_BLOCKS.find_iter(source).count();
    let except_blocks = EXCEPT_BLOCKS.find_iter(source).count();
    let null_checks = NULL_CHECKS.find_iter(source).count();

    let lines = non_blank_count(source);
    let error_handling_ratio =
        (try_blocks + except_blocks + null_checks) as f64 / lines.max(1) as f64;

    let mut score: f64 = 0.0;
    if error_handling_ratio > 0.1 {
        score += 0.4;
    } else if error_handling_ratio > 0.05 {
        score += 0.2;
    }
    if try_blocks > 0 && except_blocks >= try_blocks {
        score += 0.2;
    }

    ErrorHandlingScores {
        ai_indicators: score.clamp(0.0, 1.0),
        try_blocks,
        except_blocks,
        null_checks,
        error_handling_ratio: round_to(error_handling_ratio, 3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn no_error_handling_scores_zero() {
        let scores = analyze("x = 1\ny = 2\n");
        assert_eq!(scores.ai_indicators, 0.0);
    }

    #[test]
    fn paired_try_except_scores() {
        let source = indoc! {"
            try:
                risky()
            except ValueError as e:
                handle(e)
        "};
        let scores = analyze(source);
        assert_eq!(scores.try_blocks, 1);
        assert_eq!(scores.except_blocks, 1);
        // ratio 2/4 > 0.1 and except >= try
        assert!((scores.ai_indicators - 0.6).abs() < 1e-9);
    }

    #[test]
    fn null_guards_are_counted_case_insensitively() {
        let source = "if value is not None:\n    pass\nif other != NULL:\n    pass\n";
        let scores = analyze(source);
        assert_eq!(scores.null_checks, 2);
    }
}
