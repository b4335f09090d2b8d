//! Turns sixteen dimension scores into one probability, a confidence label,
//! and a verdict.

use crate::analyzers::{Dimension, DimensionScores};
use crate::report::{Confidence, Verdict};

/// Per-dimension weights. The enhanced comment/consistency/quirk dimensions
/// carry extra weight; obvious-comment narration carries the most.
const BOOSTED_1_2: &[&str] = &[
    "enhanced_comment_analysis",
    "defensive_coding",
    "perfect_consistency",
    "contextual_quirks",
    "formatting_perfection",
];

pub fn weight_for(dimension: &str) -> f64 {
    if dimension == "obvious_comments" {
        1.3
    } else if BOOSTED_1_2.contains(&dimension) {
        1.2
    } else {
        1.0
    }
}

/// Weighted mean of all dimension scores, in [0, 1].
pub fn composite_score(scores: &DimensionScores) -> f64 {
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    for (name, dim) in scores.iter() {
        let w = weight_for(name);
        weighted_sum += dim.ai_indicators() * w;
        total_weight += w;
    }
    weighted_sum / total_weight
}

/// Confidence from the distribution of the dimension scores, not their mean:
/// low variance plus strong one-sided agreement means the independent
/// heuristics concur.
pub fn confidence_from(values: &[f64]) -> Confidence {
    if values.is_empty() {
        return Confidence::Low;
    }

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;

    let high_ai = values.iter().filter(|&&v| v > 0.5).count();
    let low_ai = values.iter().filter(|&&v| v < 0.3).count();
    let agreement = high_ai.max(low_ai) as f64 / values.len() as f64;

    if variance < 0.04 && agreement > 0.6 {
        Confidence::High
    } else if variance < 0.08 && agreement > 0.5 {
        Confidence::MediumHigh
    } else if variance < 0.15 {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// The six dimensions whose strong agreement can tip a verdict upward.
const STRONG_DIMENSIONS: &[&str] = &[
    "obvious_comments",
    "enhanced_comment_analysis",
    "perfect_consistency",
    "contextual_quirks",
    "formatting_perfection",
    "defensive_coding",
];

const STRONG_THRESHOLD: f64 = 0.4;

fn strong_indicator_count(scores: &DimensionScores) -> usize {
    scores
        .iter()
        .filter(|(name, dim)| {
            STRONG_DIMENSIONS.contains(name) && dim.ai_indicators() > STRONG_THRESHOLD
        })
        .count()
}

/// Ordered decision chain; the first matching branch wins, and LOW
/// confidence pre-empts everything.
pub fn verdict_for(ai_score: f64, confidence: Confidence, scores: &DimensionScores) -> Verdict {
    if confidence == Confidence::Low {
        return Verdict::Inconclusive;
    }

    let strong = strong_indicator_count(scores);

    if ai_score > 0.70 || (ai_score > 0.55 && strong >= 4) {
        Verdict::HighlyLikelyAi
    } else if ai_score > 0.55 || (ai_score > 0.45 && strong >= 3) {
        Verdict::LikelyAi
    } else if ai_score > 0.45 || (ai_score > 0.35 && strong >= 2) {
        Verdict::PossiblyAiAssisted
    } else if ai_score > 0.30 {
        Verdict::MixedIndicators
    } else {
        Verdict::LikelyHuman
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a score bundle with the given values, in canonical order.
    fn synthetic(values: [f64; 16]) -> DimensionScores {
        let mut scores = DimensionScores::default();
        scores.naming_analysis.ai_indicators = values[0];
        scores.comment_analysis.ai_indicators = values[1];
        scores.structure_analysis.ai_indicators = values[2];
        scores.complexity_analysis.ai_indicators = values[3];
        scores.error_handling.ai_indicators = values[4];
        scores.documentation.ai_indicators = values[5];
        scores.formatting_consistency.ai_indicators = values[6];
        scores.modern_syntax.ai_indicators = values[7];
        scores.enhanced_comment_analysis.ai_indicators = values[8];
        scores.defensive_coding.ai_indicators = values[9];
        scores.textbook_algorithms.ai_indicators = values[10];
        scores.over_modularization.ai_indicators = values[11];
        scores.perfect_consistency.ai_indicators = values[12];
        scores.contextual_quirks.ai_indicators = values[13];
        scores.formatting_perfection.ai_indicators = values[14];
        scores.obvious_comments.ai_indicators = values[15];
        scores
    }

    #[test]
    fn weights_match_the_documented_table() {
        assert_eq!(weight_for("naming_analysis"), 1.0);
        assert_eq!(weight_for("textbook_algorithms"), 1.0);
        assert_eq!(weight_for("over_modularization"), 1.0);
        assert_eq!(weight_for("defensive_coding"), 1.2);
        assert_eq!(weight_for("obvious_comments"), 1.3);
    }

    #[test]
    fn composite_is_the_exact_weighted_mean() {
        // Only obvious_comments set: 1.0 * 1.3 / (10*1.0 + 5*1.2 + 1.3)
        let mut values = [0.0; 16];
        values[15] = 1.0;
        let scores = synthetic(values);
        let expected = 1.3 / 17.3;
        assert!((composite_score(&scores) - expected).abs() < 1e-12);
    }

    #[test]
    fn uniform_scores_average_to_themselves() {
        let scores = synthetic([0.5; 16]);
        assert!((composite_score(&scores) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn composite_is_monotone_in_each_dimension() {
        let base = synthetic([0.3; 16]);
        let base_score = composite_score(&base);
        for i in 0..16 {
            let mut values = [0.3; 16];
            values[i] = 0.9;
            let bumped = composite_score(&synthetic(values));
            assert!(
                bumped > base_score,
                "raising dimension {i} must raise the composite"
            );
        }
    }

    #[test]
    fn identical_midpoint_scores_are_medium_confidence() {
        // Variance 0 but no one-sided agreement: neither >0.5 nor <0.3 holds
        // for 0.5, so only the MEDIUM rung matches.
        let values = [0.5; 16];
        assert_eq!(confidence_from(&values), Confidence::Medium);
    }

    #[test]
    fn concurring_low_scores_are_high_confidence() {
        let values = [0.1; 16];
        assert_eq!(confidence_from(&values), Confidence::High);
    }

    #[test]
    fn scattered_scores_are_low_confidence() {
        let values = [
            0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0,
        ];
        assert_eq!(confidence_from(&values), Confidence::Low);
    }

    #[test]
    fn no_scores_default_to_low() {
        assert_eq!(confidence_from(&[]), Confidence::Low);
    }

    #[test]
    fn low_confidence_preempts_any_score() {
        let scores = synthetic([0.99; 16]);
        assert_eq!(
            verdict_for(0.99, Confidence::Low, &scores),
            Verdict::Inconclusive
        );
    }

    #[test]
    fn verdict_ladder_on_score_alone() {
        let scores = DimensionScores::default();
        assert_eq!(
            verdict_for(0.71, Confidence::High, &scores),
            Verdict::HighlyLikelyAi
        );
        assert_eq!(
            verdict_for(0.60, Confidence::High, &scores),
            Verdict::LikelyAi
        );
        assert_eq!(
            verdict_for(0.50, Confidence::High, &scores),
            Verdict::PossiblyAiAssisted
        );
        assert_eq!(
            verdict_for(0.35, Confidence::High, &scores),
            Verdict::MixedIndicators
        );
        assert_eq!(
            verdict_for(0.10, Confidence::High, &scores),
            Verdict::LikelyHuman
        );
    }

    #[test]
    fn strong_indicators_tip_borderline_scores_upward() {
        // Four strong dimensions above 0.4 upgrade a 0.56 to HIGHLY LIKELY.
        let mut values = [0.0; 16];
        values[8] = 0.5; // enhanced_comment_analysis
        values[9] = 0.5; // defensive_coding
        values[12] = 0.5; // perfect_consistency
        values[15] = 0.5; // obvious_comments
        let scores = synthetic(values);
        assert_eq!(
            verdict_for(0.56, Confidence::Medium, &scores),
            Verdict::HighlyLikelyAi
        );
        // Exactly 0.4 is not strong: thresholds are strict.
        let at_threshold = synthetic({
            let mut v = [0.0; 16];
            v[8] = 0.4;
            v[9] = 0.4;
            v[12] = 0.4;
            v[15] = 0.4;
            v
        });
        assert_eq!(
            verdict_for(0.56, Confidence::Medium, &at_threshold),
            Verdict::LikelyAi
        );
    }

    #[test]
    fn boundary_thresholds_are_strict() {
        let scores = DimensionScores::default();
        assert_eq!(
            verdict_for(0.70, Confidence::High, &scores),
            Verdict::LikelyAi
        );
        assert_eq!(
            verdict_for(0.30, Confidence::High, &scores),
            Verdict::LikelyHuman
        );
        assert_eq!(
            verdict_for(0.45, Confidence::High, &scores),
            Verdict::MixedIndicators
        );
    }
}
