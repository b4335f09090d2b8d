use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analyzers::Dimension;
use crate::report::round_to;

static MODERN_FEATURES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r":\s*(str|int|float|bool|List|Dict)",
        r#"\bf-["']"#,
        r"\bawait\s+",
        r"\basync\s+def",
        r"\bwith\s+\w+",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static LEGACY_FEATURES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [r"\bvar\s+", r"\.prototype\.", r"%\s*[sd]"]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
});

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModernSyntaxScores {
    pub ai_indicators: f64,
    pub modern_features: usize,
    pub legacy_features: usize,
    pub modern_ratio: f64,
}

impl Dimension for ModernSyntaxScores {
    fn ai_indicators(&self) -> f64 {
        self.ai_indicators
    }
}

/// Share of modern idioms among all dated/modern feature hits. The ratio is
/// the score; a file with no hits at all sits at the neutral 0.5.
pub fn analyze(source: &str) -> ModernSyntaxScores {
    let modern_features: usize = MODERN_FEATURES
        .iter()
        .map(|re| re.find_iter(source).count())
        .sum();
    let legacy_features: usize = LEGACY_FEATURES
        .iter()
        .map(|re| re.find_iter(source).count())
        .sum();

    let total = modern_features + legacy_features;
    let modern_ratio = if total > 0 {
        modern_features as f64 / total as f64
    } else {
        0.5
    };

    ModernSyntaxScores {
        ai_indicators: modern_ratio,
        modern_features,
        legacy_features,
        modern_ratio: round_to(modern_ratio, 3),
    }
}
