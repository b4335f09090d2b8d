use serde::{Deserialize, Serialize};

use crate::analyzers::Dimension;
use crate::patterns::{truncate_chars, AI_COMMENT_PHRASES, OBVIOUS_COMMENT_PATTERNS};
use crate::report::round_to;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnhancedCommentScores {
    pub ai_indicators: f64,
    pub ai_phrase_count: usize,
    pub obvious_comment_count: usize,
    pub total_comments: usize,
    pub ai_phrase_ratio: f64,
    pub obvious_ratio: f64,
}

impl Dimension for EnhancedCommentScores {
    fn ai_indicators(&self) -> f64 {
        self.ai_indicators
    }
}

/// Looks for over-explaining phrasing and narrate-the-code comments.
///
/// Returns the scores plus example lists: comments that matched an obvious
/// pattern (prefixed with the pattern label) and comments that matched an
/// AI-typical phrase.
pub fn analyze(source: &str) -> (EnhancedCommentScores, Vec<String>, Vec<String>) {
    let comment_lines: Vec<&str> = source
        .lines()
        .map(|l| l.trim())
        .filter(|l| l.starts_with('#') || l.starts_with("//"))
        .collect();

    let mut ai_phrases_found = Vec::new();
    for comment in &comment_lines {
        let lower = comment.to_lowercase();
        if AI_COMMENT_PHRASES.iter().any(|re| re.is_match(&lower)) {
            ai_phrases_found.push(truncate_chars(comment, 80));
        }
    }

    let mut obvious_found = Vec::new();
    for comment in &comment_lines {
        if let Some((_, label)) = OBVIOUS_COMMENT_PATTERNS
            .iter()
            .find(|(re, _)| re.is_match(comment))
        {
            obvious_found.push(format!("{}: {}", label, truncate_chars(comment, 60)));
        }
    }

    let total_comments = comment_lines.len();
    let ai_phrase_ratio = ai_phrases_found.len() as f64 / total_comments.max(1) as f64;
    let obvious_ratio = obvious_found.len() as f64 / total_comments.max(1) as f64;

    let mut score: f64 = 0.0;
    if ai_phrase_ratio > 0.3 {
        score += 0.4;
    } else if ai_phrase_ratio > 0.15 {
        score += 0.2;
    }
    if obvious_ratio > 0.2 {
        score += 0.4;
    } else if obvious_ratio > 0.1 {
        score += 0.2;
    }

    let scores = EnhancedCommentScores {
        ai_indicators: score.clamp(0.0, 1.0),
        ai_phrase_count: ai_phrases_found.len(),
        obvious_comment_count: obvious_found.len(),
        total_comments,
        ai_phrase_ratio: round_to(ai_phrase_ratio, 3),
        obvious_ratio: round_to(obvious_ratio, 3),
    };
    (scores, obvious_found, ai_phrases_found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn no_comments_no_score() {
        let (scores, obvious, phrases) = analyze("x = 1\n");
        assert_eq!(scores.ai_indicators, 0.0);
        assert!(obvious.is_empty());
        assert!(phrases.is_empty());
    }

    #[test]
    fn ai_phrases_are_detected() {
        let source = indoc! {"
            # Ensure that the buffer is ready
            # This function will process the input
            x = 1
        "};
        let (scores, _, phrases) = analyze(source);
        assert_eq!(phrases.len(), 2);
        assert_eq!(scores.ai_phrase_ratio, 1.0);
        assert!(scores.ai_indicators >= 0.4);
    }

    #[test]
    fn obvious_comments_are_labelled() {
        let source = "# increment counter\ncounter += 1\n";
        let (scores, obvious, _) = analyze(source);
        assert_eq!(scores.obvious_comment_count, 1);
        assert!(obvious[0].starts_with("Increment variable: "));
    }

    #[test]
    fn each_comment_matches_at_most_once() {
        // One comment hitting two obvious patterns still counts once.
        let source = "# set x to check if ready\n";
        let (scores, obvious, _) = analyze(source);
        assert_eq!(obvious.len(), 1);
        assert_eq!(scores.obvious_comment_count, 1);
    }
}
