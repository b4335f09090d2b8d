use serde_json::Value;

use crate::report::{DetectionResult, RepositoryAnalysis};

/// Output format for CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Detailed,
    Pretty,
    Json,
}

const ORIGINAL_DIMENSIONS: &[&str] = &[
    "naming_analysis",
    "comment_analysis",
    "structure_analysis",
    "complexity_analysis",
    "error_handling",
    "documentation",
    "formatting_consistency",
    "modern_syntax",
];

const ENHANCED_DIMENSIONS: &[&str] = &[
    "enhanced_comment_analysis",
    "defensive_coding",
    "textbook_algorithms",
    "over_modularization",
    "perfect_consistency",
    "contextual_quirks",
    "formatting_perfection",
    "obvious_comments",
];

/// Format a result as JSON.
pub fn format_json(result: &DetectionResult) -> String {
    serde_json::to_string_pretty(result).expect("results serialize to plain maps")
}

/// `snake_case_key` -> `Snake Case Key`.
fn title_case(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn push_indicators(out: &mut String, result: &DetectionResult) {
    if result.indicators.is_empty() {
        return;
    }
    out.push_str("\nKey Indicators:\n");
    for (key, value) in &result.indicators {
        match value {
            Value::Array(items) => {
                out.push_str(&format!("  • {}:\n", title_case(key)));
                for item in items.iter().take(5) {
                    if let Some(s) = item.as_str() {
                        out.push_str(&format!("      - {s}\n"));
                    }
                }
            }
            Value::Bool(true) => out.push_str(&format!("  • {}\n", title_case(key))),
            Value::Bool(false) => {}
            other => out.push_str(&format!("  • {}: {other}\n", title_case(key))),
        }
    }
}

/// One-file summary block, no colors.
pub fn format_summary(result: &DetectionResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "=".repeat(80)));
    out.push_str(&format!("File: {}\n", result.file_path));
    out.push_str(&format!("{}\n", "=".repeat(80)));
    out.push_str(&format!("AI Probability:    {}%\n", result.ai_probability));
    out.push_str(&format!("Human Probability: {}%\n", result.human_probability));
    out.push_str(&format!("Confidence:        {}\n", result.confidence));
    out.push_str(&format!("Verdict:           {}\n", result.verdict));
    push_indicators(&mut out, result);
    out
}

fn push_dimension_group(out: &mut String, result: &DetectionResult, names: &[&str]) {
    let Some(scores) = &result.detailed_scores else {
        return;
    };
    let value = serde_json::to_value(scores).expect("score records serialize to plain maps");
    for name in names {
        let Some(Value::Object(metrics)) = value.get(*name) else {
            continue;
        };
        out.push_str(&format!("\n    {}:\n", title_case(name)));
        for (metric, metric_value) in metrics {
            out.push_str(&format!("      {metric}: {metric_value}\n"));
        }
    }
}

/// Full per-dimension dump.
pub fn format_detailed(result: &DetectionResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "=".repeat(80)));
    out.push_str(&format!("DETAILED ANALYSIS: {}\n", result.file_path));
    out.push_str(&format!("{}\n", "=".repeat(80)));
    out.push_str(&format!("AI Probability:    {}%\n", result.ai_probability));
    out.push_str(&format!("Human Probability: {}%\n", result.human_probability));
    out.push_str(&format!("Confidence:        {}\n", result.confidence));
    out.push_str(&format!("Verdict:           {}\n", result.verdict));

    out.push_str(&format!("\n{}\n", "-".repeat(80)));
    out.push_str("DIMENSION SCORES\n");
    out.push_str(&format!("{}\n", "-".repeat(80)));
    out.push_str("\n  ORIGINAL DIMENSIONS:\n");
    push_dimension_group(&mut out, result, ORIGINAL_DIMENSIONS);
    out.push_str("\n  ENHANCED DIMENSIONS:\n");
    push_dimension_group(&mut out, result, ENHANCED_DIMENSIONS);

    let has_patterns = result.detected_patterns.values().any(|v| !v.is_empty());
    if has_patterns {
        out.push_str(&format!("\n{}\n", "-".repeat(80)));
        out.push_str("DETECTED PATTERNS\n");
        out.push_str(&format!("{}\n", "-".repeat(80)));
        for (category, patterns) in &result.detected_patterns {
            if patterns.is_empty() {
                continue;
            }
            out.push_str(&format!("\n  {}:\n", title_case(category)));
            for p in patterns.iter().take(8) {
                out.push_str(&format!("    • {p}\n"));
            }
        }
    }

    push_indicators(&mut out, result);
    out
}

/// Repository scan summary block.
pub fn format_repo_summary(analysis: &RepositoryAnalysis) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "=".repeat(80)));
    out.push_str("REPOSITORY ANALYSIS SUMMARY\n");
    out.push_str(&format!("{}\n", "=".repeat(80)));
    out.push_str(&format!("Repository: {}\n", analysis.repository_url));
    out.push_str(&format!("Branch:     {}\n", analysis.branch));
    out.push_str(&format!("Analyzed:   {}\n", analysis.analysis_timestamp));

    out.push_str(&format!("\n{}\n", "-".repeat(40)));
    out.push_str("STATISTICS\n");
    out.push_str(&format!("{}\n", "-".repeat(40)));
    out.push_str(&format!(
        "  Total Files Analyzed: {}\n",
        analysis.files_analyzed
    ));
    out.push_str(&format!(
        "  Average AI Probability: {}%\n",
        analysis.average_ai_probability
    ));
    out.push_str(&format!(
        "  High Risk Files: {}\n",
        analysis.high_risk_files.len()
    ));

    out.push_str(&format!("\n{}\n", "-".repeat(40)));
    out.push_str("DISTRIBUTION\n");
    out.push_str(&format!("{}\n", "-".repeat(40)));
    let d = &analysis.distribution;
    out.push_str(&format!("  likely_human (0-35%): {} files\n", d.likely_human));
    out.push_str(&format!("  mixed (35-55%): {} files\n", d.mixed));
    out.push_str(&format!("  possibly_ai (55-75%): {} files\n", d.possibly_ai));
    out.push_str(&format!("  likely_ai (75-100%): {} files\n", d.likely_ai));

    out.push_str(&format!("\n{}\n", "-".repeat(40)));
    out.push_str("LANGUAGE BREAKDOWN\n");
    out.push_str(&format!("{}\n", "-".repeat(40)));
    let mut langs: Vec<_> = analysis.language_breakdown.iter().collect();
    langs.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
    for (lang, count) in langs {
        out.push_str(&format!("  {lang}: {count} files\n"));
    }

    if !analysis.high_risk_files.is_empty() {
        out.push_str(&format!("\n{}\n", "-".repeat(40)));
        out.push_str("HIGH RISK FILES\n");
        out.push_str(&format!("{}\n", "-".repeat(40)));
        for file in analysis.high_risk_files.iter().take(10) {
            out.push_str(&format!("  • {} ({}%)\n", file.file, file.ai_probability));
        }
    }

    if !analysis.top_ai_files.is_empty() {
        out.push_str(&format!("\n{}\n", "-".repeat(40)));
        out.push_str("TOP 5 AI-LIKELY FILES\n");
        out.push_str(&format!("{}\n", "-".repeat(40)));
        for (i, file) in analysis.top_ai_files.iter().take(5).enumerate() {
            out.push_str(&format!(
                "  {}. {} - {}% AI\n",
                i + 1,
                file.file,
                file.ai_probability
            ));
        }
    }

    out.push_str(&format!("\n{}\n", "=".repeat(80)));
    out
}

/// Colored one-file summary for terminals.
#[cfg(feature = "cli")]
pub fn format_pretty(result: &DetectionResult) -> String {
    use colored::Colorize;

    let mut out = String::new();
    out.push_str(&format!("{} {}\n", "File:".bold(), result.file_path));

    let verdict_str = result.verdict.to_string();
    let verdict_colored = if result.is_error() {
        verdict_str.red().bold()
    } else if result.ai_probability >= 55.0 {
        verdict_str.red().bold()
    } else if result.ai_probability >= 35.0 {
        verdict_str.yellow().bold()
    } else {
        verdict_str.green().bold()
    };
    out.push_str(&format!("{} {}\n", "Verdict:".bold(), verdict_colored));
    out.push_str(&format!(
        "{} {}%  {} {}%  {} {}\n",
        "AI:".dimmed(),
        result.ai_probability,
        "Human:".dimmed(),
        result.human_probability,
        "Confidence:".dimmed(),
        result.confidence,
    ));

    let bar_len = (result.ai_probability / 100.0 * 30.0) as usize;
    let bar = "█".repeat(bar_len);
    let rest = "░".repeat(30usize.saturating_sub(bar_len));
    out.push_str(&format!("{bar}{rest} {}% AI\n", result.ai_probability));

    if let Some(error) = result.indicators.get("error").and_then(|v| v.as_str()) {
        out.push_str(&format!("{} {}\n", "Error:".red(), error));
    }
    out
}
