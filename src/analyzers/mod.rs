//! The sixteen dimension analyzers.
//!
//! Each analyzer is a pure function from file text to a typed score record.
//! Records always carry an `ai_indicators` value clamped to [0, 1] plus the
//! raw measurements behind it; the enhanced analyzers also return example
//! strings for the report. No analyzer reads another's output, so they can
//! run in any order.

pub mod comments;
pub mod complexity;
pub mod consistency;
pub mod defensive;
pub mod documentation;
pub mod enhanced_comments;
pub mod error_handling;
pub mod formatting;
pub mod modern_syntax;
pub mod modularization;
pub mod naming;
pub mod obvious;
pub mod perfection;
pub mod quirks;
pub mod structure;
pub mod textbook;

use serde::{Deserialize, Serialize};

/// Common surface over all score records, so the aggregator can walk them
/// without caring which dimension produced what.
pub trait Dimension {
    /// The dimension's contribution toward "AI-generated", in [0, 1].
    fn ai_indicators(&self) -> f64;
}

/// All sixteen score records for one file, keyed by dimension name when
/// serialized.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DimensionScores {
    pub naming_analysis: naming::NamingScores,
    pub comment_analysis: comments::CommentScores,
    pub structure_analysis: structure::StructureScores,
    pub complexity_analysis: complexity::ComplexityScores,
    pub error_handling: error_handling::ErrorHandlingScores,
    pub documentation: documentation::DocumentationScores,
    pub formatting_consistency: formatting::FormattingScores,
    pub modern_syntax: modern_syntax::ModernSyntaxScores,
    pub enhanced_comment_analysis: enhanced_comments::EnhancedCommentScores,
    pub defensive_coding: defensive::DefensiveScores,
    pub textbook_algorithms: textbook::TextbookScores,
    pub over_modularization: modularization::ModularizationScores,
    pub perfect_consistency: consistency::ConsistencyScores,
    pub contextual_quirks: quirks::QuirkScores,
    pub formatting_perfection: perfection::PerfectionScores,
    pub obvious_comments: obvious::ObviousCommentScores,
}

impl DimensionScores {
    /// Walk the records in their canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &dyn Dimension)> + '_ {
        let entries: [(&'static str, &dyn Dimension); 16] = [
            ("naming_analysis", &self.naming_analysis),
            ("comment_analysis", &self.comment_analysis),
            ("structure_analysis", &self.structure_analysis),
            ("complexity_analysis", &self.complexity_analysis),
            ("error_handling", &self.error_handling),
            ("documentation", &self.documentation),
            ("formatting_consistency", &self.formatting_consistency),
            ("modern_syntax", &self.modern_syntax),
            ("enhanced_comment_analysis", &self.enhanced_comment_analysis),
            ("defensive_coding", &self.defensive_coding),
            ("textbook_algorithms", &self.textbook_algorithms),
            ("over_modularization", &self.over_modularization),
            ("perfect_consistency", &self.perfect_consistency),
            ("contextual_quirks", &self.contextual_quirks),
            ("formatting_perfection", &self.formatting_perfection),
            ("obvious_comments", &self.obvious_comments),
        ];
        entries.into_iter()
    }

    /// Just the `ai_indicators` values, in canonical order.
    pub fn values(&self) -> Vec<f64> {
        self.iter().map(|(_, d)| d.ai_indicators()).collect()
    }
}

/// Lines whose stripped form is non-empty.
pub(crate) fn non_blank_count(source: &str) -> usize {
    source.lines().filter(|l| !l.trim().is_empty()).count()
}
