use serde::{Deserialize, Serialize};

use crate::analyzers::Dimension;
use crate::patterns::{ABBREVIATED_VARS, DESCRIPTIVE_VARS, IDENTIFIER, VERBOSE_NAMING};
use crate::report::round_to;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamingScores {
    pub ai_indicators: f64,
    pub avg_identifier_length: f64,
    pub verbose_count: usize,
    pub abbreviated_count: usize,
    pub descriptive_count: usize,
}

impl Dimension for NamingScores {
    fn ai_indicators(&self) -> f64 {
        self.ai_indicators
    }
}

/// Long, verbose identifiers read as generated; dense abbreviations read as
/// human and pull the score back down.
pub fn analyze(source: &str) -> NamingScores {
    let code_lines = source
        .lines()
        .filter(|l| {
            let t = l.trim();
            !t.is_empty() && !t.starts_with('#')
        })
        .count();

    let verbose_count = VERBOSE_NAMING.find_iter(source).count();
    let descriptive_count = DESCRIPTIVE_VARS.find_iter(source).count();
    let abbreviated_count = ABBREVIATED_VARS.find_iter(source).count();

    let mut ident_count = 0usize;
    let mut ident_len_sum = 0usize;
    for m in IDENTIFIER.find_iter(source) {
        ident_count += 1;
        ident_len_sum += m.as_str().len();
    }
    let avg_identifier_length = ident_len_sum as f64 / ident_count.max(1) as f64;

    let mut score: f64 = 0.0;
    if avg_identifier_length > 12.0 {
        score += 0.4;
    } else if avg_identifier_length > 8.0 {
        score += 0.2;
    }
    if verbose_count as f64 > code_lines as f64 * 0.3 {
        score += 0.3;
    }
    if descriptive_count > 5 {
        score += 0.2;
    }
    if abbreviated_count as f64 > code_lines as f64 * 0.2 {
        score -= 0.3;
    }

    NamingScores {
        ai_indicators: score.clamp(0.0, 1.0),
        avg_identifier_length: round_to(avg_identifier_length, 2),
        verbose_count,
        abbreviated_count,
        descriptive_count,
    }
}
