use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::analyzers::DimensionScores;

/// How much the individual dimensions agree with each other. Independent of
/// the composite score's magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    #[serde(rename = "HIGH")]
    High,
    #[serde(rename = "MEDIUM-HIGH")]
    MediumHigh,
    #[serde(rename = "MEDIUM")]
    Medium,
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "ERROR")]
    Error,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Confidence::High => "HIGH",
            Confidence::MediumHigh => "MEDIUM-HIGH",
            Confidence::Medium => "MEDIUM",
            Confidence::Low => "LOW",
            Confidence::Error => "ERROR",
        };
        write!(f, "{s}")
    }
}

/// Final classification for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "HIGHLY LIKELY AI-GENERATED")]
    HighlyLikelyAi,
    #[serde(rename = "LIKELY AI-GENERATED")]
    LikelyAi,
    #[serde(rename = "POSSIBLY AI-ASSISTED")]
    PossiblyAiAssisted,
    #[serde(rename = "MIXED INDICATORS")]
    MixedIndicators,
    #[serde(rename = "LIKELY HUMAN-WRITTEN")]
    LikelyHuman,
    #[serde(rename = "INCONCLUSIVE - Manual review recommended")]
    Inconclusive,
    #[serde(rename = "Unable to analyze")]
    Unanalyzable,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::HighlyLikelyAi => "HIGHLY LIKELY AI-GENERATED",
            Verdict::LikelyAi => "LIKELY AI-GENERATED",
            Verdict::PossiblyAiAssisted => "POSSIBLY AI-ASSISTED",
            Verdict::MixedIndicators => "MIXED INDICATORS",
            Verdict::LikelyHuman => "LIKELY HUMAN-WRITTEN",
            Verdict::Inconclusive => "INCONCLUSIVE - Manual review recommended",
            Verdict::Unanalyzable => "Unable to analyze",
        };
        write!(f, "{s}")
    }
}

/// The full analysis result for a single file.
///
/// `ai_probability` and `human_probability` are complements on a 0–100 scale.
/// `indicators` and `detected_patterns` exist for human-readable reporting
/// only; nothing downstream feeds them back into scoring. A result is
/// immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionResult {
    pub file_path: String,
    pub ai_probability: f64,
    pub human_probability: f64,
    pub confidence: Confidence,
    pub indicators: Map<String, Value>,
    pub detailed_scores: Option<DimensionScores>,
    pub verdict: Verdict,
    pub detected_patterns: BTreeMap<String, Vec<String>>,
}

impl DetectionResult {
    /// A result for a file that could not be analyzed. The message lands in
    /// the `error` indicator, verbatim.
    pub fn error(file_path: impl Into<String>, message: impl Into<String>) -> Self {
        let mut indicators = Map::new();
        indicators.insert("error".to_string(), Value::String(message.into()));
        DetectionResult {
            file_path: file_path.into(),
            ai_probability: 0.0,
            human_probability: 0.0,
            confidence: Confidence::Error,
            indicators,
            detailed_scores: None,
            verdict: Verdict::Unanalyzable,
            detected_patterns: BTreeMap::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.confidence == Confidence::Error
    }
}

/// File counts per probability band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    #[serde(rename = "likely_human (0-35%)")]
    pub likely_human: usize,
    #[serde(rename = "mixed (35-55%)")]
    pub mixed: usize,
    #[serde(rename = "possibly_ai (55-75%)")]
    pub possibly_ai: usize,
    #[serde(rename = "likely_ai (75-100%)")]
    pub likely_ai: usize,
}

/// One row in the top-N and high-risk listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSummary {
    pub file: String,
    pub ai_probability: f64,
    pub human_probability: f64,
    pub confidence: Confidence,
    pub verdict: Verdict,
}

/// Verdict tally across a scan. `likely_ai` counts both the LIKELY and the
/// HIGHLY LIKELY verdicts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictSummary {
    pub likely_ai: usize,
    pub possibly_ai: usize,
    pub mixed: usize,
    pub likely_human: usize,
    pub inconclusive: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanSummary {
    pub total_files_in_repo: usize,
    pub files_successfully_analyzed: usize,
    pub files_with_errors: usize,
    pub average_ai_probability: f64,
    pub median_ai_probability: f64,
    pub high_risk_count: usize,
    pub verdict_summary: VerdictSummary,
}

/// Aggregate results for a whole repository or directory scan. Built once
/// per scan, read-only afterwards. ERROR results stay in `file_results` but
/// are excluded from every derived statistic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryAnalysis {
    pub repository_url: String,
    pub branch: String,
    pub analysis_timestamp: String,
    pub total_files: usize,
    pub files_analyzed: usize,
    pub average_ai_probability: f64,
    pub distribution: Distribution,
    pub high_risk_files: Vec<FileSummary>,
    pub language_breakdown: BTreeMap<String, usize>,
    pub top_ai_files: Vec<FileSummary>,
    pub file_results: Vec<DetectionResult>,
    pub summary: ScanSummary,
}

/// Round to `places` decimal places, half away from zero.
pub(crate) fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_serializes_to_label() {
        assert_eq!(
            serde_json::to_string(&Confidence::MediumHigh).unwrap(),
            "\"MEDIUM-HIGH\""
        );
        assert_eq!(Confidence::MediumHigh.to_string(), "MEDIUM-HIGH");
    }

    #[test]
    fn verdict_labels_round_trip() {
        for v in [
            Verdict::HighlyLikelyAi,
            Verdict::LikelyAi,
            Verdict::PossiblyAiAssisted,
            Verdict::MixedIndicators,
            Verdict::LikelyHuman,
            Verdict::Inconclusive,
            Verdict::Unanalyzable,
        ] {
            let json = serde_json::to_string(&v).unwrap();
            let back: Verdict = serde_json::from_str(&json).unwrap();
            assert_eq!(back, v);
        }
    }

    #[test]
    fn error_result_shape() {
        let r = DetectionResult::error("gone.py", "File does not exist or is not a regular file");
        assert!(r.is_error());
        assert_eq!(r.ai_probability, 0.0);
        assert_eq!(r.human_probability, 0.0);
        assert_eq!(r.verdict, Verdict::Unanalyzable);
        assert!(r.detailed_scores.is_none());
        assert_eq!(
            r.indicators.get("error").and_then(|v| v.as_str()),
            Some("File does not exist or is not a regular file")
        );
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(0.12345, 2), 0.12);
        assert_eq!(round_to(0.6789, 3), 0.679);
        assert_eq!(round_to(33.333333, 2), 33.33);
    }
}
