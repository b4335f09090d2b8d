use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analyzers::Dimension;
use crate::report::round_to;

static FUNCTION_DEFS: Lazy<Regex> = Lazy::new(|| Regex::new(r"def\s+(\w+)\s*\(").unwrap());

const HELPER_NAME_PARTS: &[&str] = &[
    "_helper", "_util", "_process", "_handle", "_validate", "_check", "_get", "_set", "_create",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModularizationScores {
    pub ai_indicators: f64,
    pub total_functions: usize,
    pub small_function_count: usize,
    pub small_function_ratio: f64,
    pub helper_function_count: usize,
    pub helper_ratio: f64,
    pub avg_function_size: f64,
}

impl Dimension for ModularizationScores {
    fn ai_indicators(&self) -> f64 {
        self.ai_indicators
    }
}

/// Many tiny functions with helper-ish names.
///
/// A function's extent runs to the next definition (or end of file); its size
/// counts body lines that are neither blank, comments, nor docstring fences.
pub fn analyze(source: &str) -> (ModularizationScores, Vec<String>) {
    let lines: Vec<&str> = source.split('\n').collect();

    let defs: Vec<(&str, usize)> = FUNCTION_DEFS
        .captures_iter(source)
        .map(|cap| {
            let whole = cap.get(0).expect("capture 0 always present");
            let line_num = source[..whole.start()].matches('\n').count();
            (cap.get(1).map(|m| m.as_str()).unwrap_or_default(), line_num)
        })
        .collect();

    let mut small_functions = Vec::new();
    let mut function_sizes = Vec::new();

    for (i, &(name, start_line)) in defs.iter().enumerate() {
        let end_line = defs
            .get(i + 1)
            .map(|&(_, next)| next)
            .unwrap_or(lines.len());
        // Two defs on one line produce an inverted range; treat it as empty.
        let start = (start_line + 1).min(lines.len());
        let end = end_line.clamp(start, lines.len());
        let size = lines[start..end]
            .iter()
            .filter(|l| {
                let t = l.trim();
                !t.is_empty()
                    && !t.starts_with('#')
                    && !t.starts_with("\"\"\"")
                    && !t.starts_with("'''")
            })
            .count();
        function_sizes.push(size);
        if size < 5 {
            small_functions.push(format!("{name} ({size} lines)"));
        }
    }

    let total_functions = defs.len();
    let small_function_count = small_functions.len();
    let small_function_ratio = small_function_count as f64 / total_functions.max(1) as f64;

    let helper_function_count = defs
        .iter()
        .filter(|(name, _)| {
            let lower = name.to_lowercase();
            HELPER_NAME_PARTS.iter().any(|p| lower.contains(p))
        })
        .count();
    let helper_ratio = helper_function_count as f64 / total_functions.max(1) as f64;

    let avg_function_size =
        function_sizes.iter().sum::<usize>() as f64 / function_sizes.len().max(1) as f64;

    let mut score: f64 = 0.0;
    if small_function_ratio > 0.5 && total_functions > 3 {
        score += 0.4;
    } else if small_function_ratio > 0.3 && total_functions > 2 {
        score += 0.2;
    }
    if helper_ratio > 0.4 {
        score += 0.3;
    } else if helper_ratio > 0.2 {
        score += 0.15;
    }

    let scores = ModularizationScores {
        ai_indicators: score.clamp(0.0, 1.0),
        total_functions,
        small_function_count,
        small_function_ratio: round_to(small_function_ratio, 3),
        helper_function_count,
        helper_ratio: round_to(helper_ratio, 3),
        avg_function_size: round_to(avg_function_size, 1),
    };
    (scores, small_functions)
}
