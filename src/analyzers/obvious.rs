use serde::{Deserialize, Serialize};

use crate::analyzers::Dimension;
use crate::patterns::{truncate_chars, OBVIOUS_COMMENT_PATTERNS};
use crate::report::round_to;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObviousCommentScores {
    pub ai_indicators: f64,
    pub obvious_comment_count: usize,
    pub total_comments: usize,
    pub obvious_ratio: f64,
}

impl Dimension for ObviousCommentScores {
    fn ai_indicators(&self) -> f64 {
        self.ai_indicators
    }
}

/// Fraction of comment lines that just narrate the adjacent code.
pub fn analyze(source: &str) -> (ObviousCommentScores, Vec<String>) {
    let mut examples = Vec::new();
    let mut obvious_count = 0usize;
    let mut total_comments = 0usize;

    for (i, line) in source.lines().enumerate() {
        let stripped = line.trim();
        if !(stripped.starts_with('#') || stripped.starts_with("//")) {
            continue;
        }
        total_comments += 1;
        let lowered = stripped.to_lowercase();
        if let Some((_, label)) = OBVIOUS_COMMENT_PATTERNS
            .iter()
            .find(|(re, _)| re.is_match(&lowered))
        {
            obvious_count += 1;
            examples.push(format!(
                "[Line {}] {}: {}",
                i + 1,
                label,
                truncate_chars(stripped, 70)
            ));
        }
    }

    let obvious_ratio = obvious_count as f64 / total_comments.max(1) as f64;

    let mut score: f64 = 0.0;
    if obvious_ratio > 0.4 {
        score += 0.6;
    } else if obvious_ratio > 0.25 {
        score += 0.4;
    } else if obvious_ratio > 0.15 {
        score += 0.2;
    } else if obvious_ratio > 0.08 {
        score += 0.1;
    }

    let scores = ObviousCommentScores {
        ai_indicators: score.clamp(0.0, 1.0),
        obvious_comment_count: obvious_count,
        total_comments,
        obvious_ratio: round_to(obvious_ratio, 3),
    };
    (scores, examples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn no_comments_means_zero_ratio() {
        let (scores, examples) = analyze("x = 1\n");
        assert_eq!(scores.total_comments, 0);
        assert_eq!(scores.obvious_ratio, 0.0);
        assert!(examples.is_empty());
    }

    #[test]
    fn narrating_comments_are_flagged_with_line_numbers() {
        let source = indoc! {"
            # increment counter
            counter += 1
            # check if done
            if counter > limit:
                stop()
        "};
        let (scores, examples) = analyze(source);
        assert_eq!(scores.total_comments, 2);
        assert_eq!(scores.obvious_comment_count, 2);
        assert_eq!(scores.obvious_ratio, 1.0);
        assert!((scores.ai_indicators - 0.6).abs() < 1e-9);
        assert!(examples[0].starts_with("[Line 1] Increment variable:"));
        assert!(examples[1].starts_with("[Line 3] Check if:"));
    }

    #[test]
    fn explanatory_comments_are_not_flagged() {
        let source = indoc! {"
            # The sentinel stays negative so resets survive truncation.
            x = -1
        "};
        let (scores, examples) = analyze(source);
        assert_eq!(scores.total_comments, 1);
        assert_eq!(scores.obvious_comment_count, 0);
        assert!(examples.is_empty());
    }
}
