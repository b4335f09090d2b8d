//! Self-contained HTML reports. Everything interpolated from results is
//! escaped; the documents carry their own styles and need no assets.

use html_escape::encode_text;

use crate::report::{DetectionResult, RepositoryAnalysis};

const STYLE: &str = r#"
body { font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; margin: 0;
       background: #f5f6fa; color: #2d3436; }
.container { max-width: 1100px; margin: 0 auto; padding: 24px; }
h1 { font-size: 1.6em; } h2 { font-size: 1.2em; margin-top: 32px; }
.cards { display: flex; gap: 16px; flex-wrap: wrap; }
.card { background: #fff; border-radius: 8px; padding: 16px 24px;
        box-shadow: 0 1px 3px rgba(0,0,0,0.1); min-width: 140px; }
.card .value { font-size: 1.8em; font-weight: 700; }
.card .label { color: #636e72; font-size: 0.85em; }
table { width: 100%; border-collapse: collapse; background: #fff;
        border-radius: 8px; overflow: hidden;
        box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
th, td { text-align: left; padding: 10px 14px;
         border-bottom: 1px solid #eceff1; font-size: 0.9em; }
th { background: #2d3436; color: #fff; }
.bar { background: #eceff1; border-radius: 4px; height: 10px; width: 160px; }
.bar > div { height: 10px; border-radius: 4px; }
.high { background: #d63031; } .medium { background: #fdcb6e; }
.low { background: #00b894; }
.verdict { font-weight: 600; }
.error { color: #d63031; }
"#;

fn probability_class(probability: f64) -> &'static str {
    if probability >= 55.0 {
        "high"
    } else if probability >= 35.0 {
        "medium"
    } else {
        "low"
    }
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <div class=\"container\">\n{body}</div>\n</body>\n</html>\n",
        encode_text(title)
    )
}

fn card(label: &str, value: &str) -> String {
    format!(
        "<div class=\"card\"><div class=\"value\">{}</div>\
         <div class=\"label\">{}</div></div>\n",
        encode_text(value),
        encode_text(label)
    )
}

fn probability_cell(probability: f64) -> String {
    format!(
        "<td><div class=\"bar\"><div class=\"{}\" style=\"width:{:.0}%\"></div></div> {probability}%</td>",
        probability_class(probability),
        probability.clamp(0.0, 100.0)
    )
}

fn result_rows(results: &[&DetectionResult]) -> String {
    let mut rows = String::new();
    for r in results {
        if r.is_error() {
            let error = r
                .indicators
                .get("error")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown error");
            rows.push_str(&format!(
                "<tr><td>{}</td><td colspan=\"3\" class=\"error\">{}</td></tr>\n",
                encode_text(&r.file_path),
                encode_text(error)
            ));
            continue;
        }
        rows.push_str(&format!(
            "<tr><td>{}</td>{}<td>{}</td><td class=\"verdict\">{}</td></tr>\n",
            encode_text(&r.file_path),
            probability_cell(r.ai_probability),
            r.confidence,
            encode_text(&r.verdict.to_string())
        ));
    }
    rows
}

/// Report over a batch of individually analyzed files.
pub fn render_files_report(results: &[DetectionResult], title: &str) -> String {
    let valid: Vec<&DetectionResult> = results.iter().filter(|r| !r.is_error()).collect();
    let average = if valid.is_empty() {
        0.0
    } else {
        valid.iter().map(|r| r.ai_probability).sum::<f64>() / valid.len() as f64
    };

    let mut body = String::new();
    body.push_str(&format!("<h1>{}</h1>\n", encode_text(title)));
    body.push_str("<div class=\"cards\">\n");
    body.push_str(&card("Files analyzed", &results.len().to_string()));
    body.push_str(&card("Average AI probability", &format!("{average:.1}%")));
    body.push_str(&card(
        "Errors",
        &(results.len() - valid.len()).to_string(),
    ));
    body.push_str("</div>\n");

    body.push_str("<h2>Files</h2>\n<table>\n");
    body.push_str(
        "<tr><th>File</th><th>AI probability</th><th>Confidence</th><th>Verdict</th></tr>\n",
    );
    let all: Vec<&DetectionResult> = results.iter().collect();
    body.push_str(&result_rows(&all));
    body.push_str("</table>\n");

    page(title, &body)
}

/// Report over a repository scan.
pub fn render_repo_report(analysis: &RepositoryAnalysis) -> String {
    let title = format!("AI Code Detection Report - {}", analysis.repository_url);

    let mut body = String::new();
    body.push_str(&format!("<h1>{}</h1>\n", encode_text(&title)));
    body.push_str(&format!(
        "<p>Branch <strong>{}</strong> · analyzed {}</p>\n",
        encode_text(&analysis.branch),
        encode_text(&analysis.analysis_timestamp)
    ));

    body.push_str("<div class=\"cards\">\n");
    body.push_str(&card("Files analyzed", &analysis.files_analyzed.to_string()));
    body.push_str(&card(
        "Average AI probability",
        &format!("{}%", analysis.average_ai_probability),
    ));
    body.push_str(&card(
        "Median AI probability",
        &format!("{}%", analysis.summary.median_ai_probability),
    ));
    body.push_str(&card(
        "High risk files",
        &analysis.high_risk_files.len().to_string(),
    ));
    body.push_str("</div>\n");

    body.push_str("<h2>Distribution</h2>\n<table>\n<tr><th>Band</th><th>Files</th></tr>\n");
    let d = &analysis.distribution;
    for (band, count) in [
        ("likely_human (0-35%)", d.likely_human),
        ("mixed (35-55%)", d.mixed),
        ("possibly_ai (55-75%)", d.possibly_ai),
        ("likely_ai (75-100%)", d.likely_ai),
    ] {
        body.push_str(&format!("<tr><td>{band}</td><td>{count}</td></tr>\n"));
    }
    body.push_str("</table>\n");

    body.push_str("<h2>Languages</h2>\n<table>\n<tr><th>Language</th><th>Files</th></tr>\n");
    let mut langs: Vec<_> = analysis.language_breakdown.iter().collect();
    langs.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
    for (lang, count) in langs {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{count}</td></tr>\n",
            encode_text(lang)
        ));
    }
    body.push_str("</table>\n");

    if !analysis.top_ai_files.is_empty() {
        body.push_str("<h2>Most AI-likely files</h2>\n<table>\n");
        body.push_str(
            "<tr><th>File</th><th>AI probability</th><th>Confidence</th><th>Verdict</th></tr>\n",
        );
        for f in &analysis.top_ai_files {
            body.push_str(&format!(
                "<tr><td>{}</td>{}<td>{}</td><td class=\"verdict\">{}</td></tr>\n",
                encode_text(&f.file),
                probability_cell(f.ai_probability),
                f.confidence,
                encode_text(&f.verdict.to_string())
            ));
        }
        body.push_str("</table>\n");
    }

    body.push_str("<h2>All files</h2>\n<table>\n");
    body.push_str(
        "<tr><th>File</th><th>AI probability</th><th>Confidence</th><th>Verdict</th></tr>\n",
    );
    let all: Vec<&DetectionResult> = analysis.file_results.iter().collect();
    body.push_str(&result_rows(&all));
    body.push_str("</table>\n");

    page(&title, &body)
}
