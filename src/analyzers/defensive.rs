use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analyzers::{non_blank_count, Dimension};
use crate::patterns::truncate_chars;
use crate::report::round_to;

static NONE_CHECKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"if\s+\w+\s+is\s+not\s+None").unwrap());
static NULL_CHECKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)if\s+\w+\s*!=\s*null").unwrap());
static TYPE_CHECKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"isinstance\s*\(\s*\w+\s*,\s*\w+\s*\)").unwrap());
static TRY_BLOCKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\btry\s*:").unwrap());
static ASSERTIONS: Lazy<Regex> = Lazy::new(|| Regex::new(r"assert\s+.+").unwrap());
static IF_CONDITIONS: Lazy<Regex> = Lazy::new(|| Regex::new(r"if\s+(.+?):").unwrap());
static NOT_GUARDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"if\s+not\s+\w+\s*:").unwrap());
static IS_NONE_GUARDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"if\s+\w+\s+is\s+None\s*:").unwrap());
static VALIDATION_RAISES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"raise\s+(ValueError|TypeError|RuntimeError)").unwrap());

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefensiveScores {
    pub ai_indicators: f64,
    pub none_checks: usize,
    pub type_checks: usize,
    pub try_blocks: usize,
    pub assertions: usize,
    pub repeated_conditions: usize,
    pub defensive_ratio: f64,
}

impl Dimension for DefensiveScores {
    fn ai_indicators(&self) -> f64 {
        self.ai_indicators
    }
}

/// Guards, type checks, and assertions out of proportion to the code size.
pub fn analyze(source: &str) -> (DefensiveScores, Vec<String>) {
    let mut patterns_found = Vec::new();

    let none_check_matches: Vec<&str> = NONE_CHECKS
        .find_iter(source)
        .map(|m| m.as_str())
        .collect();
    let none_checks = none_check_matches.len() + NULL_CHECKS.find_iter(source).count();
    for m in none_check_matches.iter().take(3) {
        patterns_found.push(format!("None check: {}", truncate_chars(m, 50)));
    }

    let type_checks = TYPE_CHECKS.find_iter(source).count();
    if type_checks > 3 {
        patterns_found.push(format!("Excessive type checks: {type_checks} isinstance calls"));
    }

    let try_blocks = TRY_BLOCKS.find_iter(source).count();
    if try_blocks > 3 {
        patterns_found.push(format!("Many try blocks: {try_blocks}"));
    }

    let assertions = ASSERTIONS.find_iter(source).count();
    if assertions > 2 {
        patterns_found.push(format!("Multiple assertions: {assertions}"));
    }

    // Distinct conditions that occur more than once.
    let mut condition_counts: HashMap<&str, usize> = HashMap::new();
    for cap in IF_CONDITIONS.captures_iter(source) {
        *condition_counts
            .entry(cap.get(1).map(|m| m.as_str()).unwrap_or_default())
            .or_insert(0) += 1;
    }
    let repeated_conditions = condition_counts.values().filter(|&&n| n > 1).count();
    if repeated_conditions > 0 {
        patterns_found.push(format!("Repeated conditions: {repeated_conditions}"));
    }

    let validation = NOT_GUARDS.find_iter(source).count()
        + IS_NONE_GUARDS.find_iter(source).count()
        + VALIDATION_RAISES.find_iter(source).count();

    let lines = non_blank_count(source);
    let defensive_ratio =
        (none_checks + type_checks + try_blocks + validation) as f64 / lines.max(1) as f64;

    let mut score: f64 = 0.0;
    if defensive_ratio > 0.15 {
        score += 0.5;
    } else if defensive_ratio > 0.08 {
        score += 0.3;
    } else if defensive_ratio > 0.04 {
        score += 0.15;
    }
    if repeated_conditions > 2 {
        score += 0.2;
    }

    let scores = DefensiveScores {
        ai_indicators: score.clamp(0.0, 1.0),
        none_checks,
        type_checks,
        try_blocks,
        assertions,
        repeated_conditions,
        defensive_ratio: round_to(defensive_ratio, 3),
    };
    (scores, patterns_found)
}
