use serde::{Deserialize, Serialize};

use crate::analyzers::Dimension;
use crate::patterns::{FORMAL_COMMENTS, INFORMAL_COMMENTS};
use crate::report::round_to;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentScores {
    pub ai_indicators: f64,
    pub comment_ratio: f64,
    pub formal_comments: usize,
    pub informal_comments: usize,
    pub avg_comment_length: f64,
}

impl Dimension for CommentScores {
    fn ai_indicators(&self) -> f64 {
        self.ai_indicators
    }
}

/// Heavy, formal commentary is an AI signal; TODO/FIXME-style markers are a
/// human one.
pub fn analyze(source: &str) -> CommentScores {
    let comment_lines: Vec<&str> = source
        .lines()
        .filter(|l| {
            let t = l.trim_start();
            t.starts_with('#') || t.starts_with("//")
        })
        .collect();

    let formal_comments = FORMAL_COMMENTS.find_iter(source).count();
    let informal_comments = INFORMAL_COMMENTS.find_iter(source).count();

    let code_lines = source
        .lines()
        .filter(|l| {
            let t = l.trim();
            !t.is_empty() && !t.starts_with('#')
        })
        .count();

    let comment_ratio = comment_lines.len() as f64 / code_lines.max(1) as f64;
    // Comment length includes indentation, same as the ratio above counts
    // `//` lines as code: both quirks are part of the calibrated behavior.
    let avg_comment_length = if comment_lines.is_empty() {
        0.0
    } else {
        comment_lines.iter().map(|l| l.len()).sum::<usize>() as f64 / comment_lines.len() as f64
    };

    let mut score: f64 = 0.0;
    if comment_ratio > 0.3 {
        score += 0.3;
    }
    if formal_comments > 2 {
        score += 0.3;
    }
    if avg_comment_length > 60.0 {
        score += 0.2;
    }
    if informal_comments > 3 {
        score -= 0.3;
    }

    CommentScores {
        ai_indicators: score.clamp(0.0, 1.0),
        comment_ratio: round_to(comment_ratio, 3),
        formal_comments,
        informal_comments,
        avg_comment_length: round_to(avg_comment_length, 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn commentless_code_scores_zero() {
        let scores = analyze("x = 1\ny = 2\n");
        assert_eq!(scores.ai_indicators, 0.0);
        assert_eq!(scores.comment_ratio, 0.0);
    }

    #[test]
    fn high_comment_density_scores() {
        let source = indoc! {"
            # first comment
            # second comment
            x = 1
            y = 2
        "};
        let scores = analyze(source);
        // 2 comment lines over 2 code lines
        assert_eq!(scores.comment_ratio, 1.0);
        assert!(scores.ai_indicators >= 0.3);
    }

    #[test]
    fn informal_markers_reduce_the_score() {
        let source = indoc! {"
            # TODO fix this
            # FIXME broken
            # HACK workaround
            # XXX revisit
            x = 1
            y = 2
            z = 3
            w = 4
            v = 5
            u = 6
            t = 7
            s = 8
            r = 9
            q = 10
        "};
        let scores = analyze(source);
        assert_eq!(scores.informal_comments, 4);
        // ratio 4/10 > 0.3 gives +0.3, four informal markers give -0.3
        assert_eq!(scores.ai_indicators, 0.0);
    }
}
