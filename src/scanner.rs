//! Repository and directory scanning.
//!
//! Discovery applies extension filtering, vendored/build-directory exclusion,
//! a symlink-escape guard, and the size ceiling; analysis is then a parallel
//! map over the surviving files. ERROR results stay in the raw file list but
//! never enter the derived statistics.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use thiserror::Error;
use walkdir::WalkDir;

use crate::detector::{Detector, DEFAULT_MAX_FILE_SIZE};
use crate::report::{
    round_to, Confidence, DetectionResult, Distribution, FileSummary, RepositoryAnalysis,
    ScanSummary, Verdict, VerdictSummary,
};

/// Extensions grouped by language, used for filtering and the language
/// breakdown.
pub const LANGUAGE_EXTENSIONS: &[(&str, &[&str])] = &[
    ("Python", &[".py"]),
    ("JavaScript", &[".js", ".jsx", ".mjs"]),
    ("TypeScript", &[".ts", ".tsx"]),
    ("Java", &[".java"]),
    ("C++", &[".cpp", ".cxx", ".cc", ".hpp", ".h"]),
    ("C", &[".c"]),
    ("C#", &[".cs"]),
    ("Go", &[".go"]),
    ("Ruby", &[".rb"]),
    ("PHP", &[".php"]),
    ("Rust", &[".rs"]),
    ("Swift", &[".swift"]),
    ("Kotlin", &[".kt", ".kts"]),
    ("Scala", &[".scala"]),
    ("Shell", &[".sh", ".bash"]),
    ("HTML", &[".html", ".htm"]),
    ("CSS", &[".css", ".scss", ".sass", ".less"]),
    ("SQL", &[".sql"]),
    ("YAML", &[".yml", ".yaml"]),
    ("Markdown", &[".md"]),
];

/// Vendored, generated, and VCS directories that never hold first-party code.
pub const SKIP_DIRECTORIES: &[&str] = &[
    "node_modules",
    "vendor",
    "venv",
    ".venv",
    "env",
    ".env",
    "__pycache__",
    ".git",
    ".svn",
    ".hg",
    "dist",
    "build",
    "target",
    "bin",
    "obj",
    ".idea",
    ".vscode",
    "coverage",
    ".pytest_cache",
    ".mypy_cache",
    "eggs",
    ".eggs",
];

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Directory does not exist: {0}")]
    MissingDirectory(PathBuf),
    #[error("Invalid repository URL: {0}")]
    InvalidUrl(String),
    #[error("Repository not found: {0}")]
    RepositoryNotFound(String),
    #[error("Branch not found: {0}")]
    BranchNotFound(String),
    #[error("Clone operation timed out (>5 minutes)")]
    CloneTimeout,
    #[error("Git clone failed: {0}")]
    CloneFailed(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// All supported extensions, flattened.
pub fn default_extensions() -> Vec<String> {
    LANGUAGE_EXTENSIONS
        .iter()
        .flat_map(|(_, exts)| exts.iter().map(|e| (*e).to_string()))
        .collect()
}

fn language_for(path: &Path) -> &'static str {
    let ext = match path.extension() {
        Some(e) => format!(".{}", e.to_string_lossy().to_lowercase()),
        None => return "Other",
    };
    LANGUAGE_EXTENSIONS
        .iter()
        .find(|(_, exts)| exts.contains(&ext.as_str()))
        .map(|(lang, _)| *lang)
        .unwrap_or("Other")
}

fn has_skipped_component(path: &Path) -> bool {
    path.components().any(|c| {
        let name = c.as_os_str().to_string_lossy();
        SKIP_DIRECTORIES.contains(&name.as_ref())
    })
}

/// Walks a tree, analyzes every discovered file, and aggregates the results.
#[derive(Debug, Default, Clone)]
pub struct Scanner {
    detector: Detector,
}

impl Scanner {
    pub fn new() -> Self {
        Scanner {
            detector: Detector::new(),
        }
    }

    pub fn with_detector(detector: Detector) -> Self {
        Scanner { detector }
    }

    /// Discover candidate files under `root`.
    ///
    /// Paths with an excluded component are pruned, symlinks that resolve
    /// outside the scan root are rejected, and only regular files with a
    /// matching extension at or under the size ceiling survive.
    pub fn find_code_files(&self, root: &Path, extensions: &[String]) -> Vec<PathBuf> {
        let canonical_root = match root.canonicalize() {
            Ok(p) => p,
            Err(_) => return Vec::new(),
        };

        let mut files = Vec::new();
        let walker = WalkDir::new(&canonical_root)
            .into_iter()
            .filter_entry(|e| !has_skipped_component(e.path()));
        for entry in walker.filter_map(|e| e.ok()) {
            let path = entry.path();
            // Symlinks are allowed, but only when they resolve back into the
            // scan root.
            let resolved = match path.canonicalize() {
                Ok(p) => p,
                Err(_) => continue,
            };
            if !resolved.starts_with(&canonical_root) {
                log::warn!("skipping file outside scan root: {}", path.display());
                continue;
            }
            let metadata = match std::fs::metadata(&resolved) {
                Ok(m) => m,
                Err(_) => continue,
            };
            if !metadata.is_file() {
                continue;
            }
            let ext = match path.extension() {
                Some(e) => format!(".{}", e.to_string_lossy().to_lowercase()),
                None => continue,
            };
            if !extensions.iter().any(|want| want == &ext) {
                continue;
            }
            if metadata.len() <= DEFAULT_MAX_FILE_SIZE {
                files.push(path.to_path_buf());
            }
        }
        files.sort();
        files
    }

    /// Analyze every file in parallel. Result paths are made relative to
    /// `root` for cleaner reports.
    pub fn analyze_files(&self, files: &[PathBuf], root: &Path) -> Vec<DetectionResult> {
        let total = files.len();
        let done = AtomicUsize::new(0);
        files
            .par_iter()
            .map(|file| {
                let mut result = self.detector.analyze_file(file);
                if let Ok(rel) = file.strip_prefix(root) {
                    result.file_path = rel.display().to_string();
                }
                let n = done.fetch_add(1, Ordering::Relaxed) + 1;
                if n % 10 == 0 {
                    log::info!("progress: {n}/{total} files ({:.1}%)", percent(n, total));
                }
                result
            })
            .collect()
    }

    /// Scan a local directory tree.
    pub fn scan_directory(
        &self,
        path: &Path,
        extensions: Option<&[String]>,
    ) -> Result<RepositoryAnalysis, ScanError> {
        if !path.exists() {
            return Err(ScanError::MissingDirectory(path.to_path_buf()));
        }
        let root = path.canonicalize()?;
        log::info!("scanning local directory: {}", root.display());
        Ok(self.scan_tree(&root, root.display().to_string(), "local".to_string(), extensions))
    }

    /// Shared discovery + analysis + aggregation over a rooted tree.
    pub(crate) fn scan_tree(
        &self,
        root: &Path,
        repository_url: String,
        branch: String,
        extensions: Option<&[String]>,
    ) -> RepositoryAnalysis {
        let default_exts;
        let extensions = match extensions {
            Some(exts) => exts,
            None => {
                default_exts = default_extensions();
                &default_exts
            }
        };

        let files = self.find_code_files(root, extensions);
        log::info!("found {} code files to analyze", files.len());

        let results = self.analyze_files(&files, root);
        let valid: Vec<&DetectionResult> = results.iter().filter(|r| !r.is_error()).collect();

        let average = if valid.is_empty() {
            0.0
        } else {
            valid.iter().map(|r| r.ai_probability).sum::<f64>() / valid.len() as f64
        };

        let high_risk_files = high_risk(&valid);
        let summary = ScanSummary {
            total_files_in_repo: files.len(),
            files_successfully_analyzed: valid.len(),
            files_with_errors: results.len() - valid.len(),
            average_ai_probability: round_to(average, 2),
            median_ai_probability: round_to(median_probability(&valid), 2),
            high_risk_count: high_risk_files.len(),
            verdict_summary: verdict_summary(&valid),
        };

        RepositoryAnalysis {
            repository_url,
            branch,
            analysis_timestamp: chrono::Local::now().to_rfc3339(),
            total_files: files.len(),
            files_analyzed: valid.len(),
            average_ai_probability: round_to(average, 2),
            distribution: distribution(&valid),
            high_risk_files,
            language_breakdown: language_breakdown(&files),
            top_ai_files: top_ai_files(&valid, 10),
            file_results: results,
            summary,
        }
    }
}

fn percent(n: usize, total: usize) -> f64 {
    n as f64 / total.max(1) as f64 * 100.0
}

fn distribution(valid: &[&DetectionResult]) -> Distribution {
    let mut dist = Distribution::default();
    for result in valid {
        let p = result.ai_probability;
        if p < 35.0 {
            dist.likely_human += 1;
        } else if p < 55.0 {
            dist.mixed += 1;
        } else if p < 75.0 {
            dist.possibly_ai += 1;
        } else {
            dist.likely_ai += 1;
        }
    }
    dist
}

/// High probability with high agreement: the review-first list.
fn high_risk(valid: &[&DetectionResult]) -> Vec<FileSummary> {
    let mut files: Vec<FileSummary> = valid
        .iter()
        .filter(|r| r.ai_probability > 70.0 && r.confidence == Confidence::High)
        .map(|r| summarize(r))
        .collect();
    files.sort_by(|a, b| b.ai_probability.partial_cmp(&a.ai_probability).unwrap());
    files
}

fn top_ai_files(valid: &[&DetectionResult], n: usize) -> Vec<FileSummary> {
    let mut sorted: Vec<&&DetectionResult> = valid.iter().collect();
    sorted.sort_by(|a, b| b.ai_probability.partial_cmp(&a.ai_probability).unwrap());
    sorted.into_iter().take(n).map(|r| summarize(r)).collect()
}

fn summarize(result: &DetectionResult) -> FileSummary {
    FileSummary {
        file: result.file_path.clone(),
        ai_probability: result.ai_probability,
        human_probability: result.human_probability,
        confidence: result.confidence,
        verdict: result.verdict,
    }
}

fn language_breakdown(files: &[PathBuf]) -> BTreeMap<String, usize> {
    let mut breakdown = BTreeMap::new();
    for file in files {
        *breakdown
            .entry(language_for(file).to_string())
            .or_insert(0) += 1;
    }
    breakdown
}

fn median_probability(valid: &[&DetectionResult]) -> f64 {
    if valid.is_empty() {
        return 0.0;
    }
    let mut probs: Vec<f64> = valid.iter().map(|r| r.ai_probability).collect();
    probs.sort_by(|a, b| a.partial_cmp(b).unwrap());
    probs[probs.len() / 2]
}

fn verdict_summary(valid: &[&DetectionResult]) -> VerdictSummary {
    let mut tally = VerdictSummary::default();
    for result in valid {
        match result.verdict {
            Verdict::HighlyLikelyAi | Verdict::LikelyAi => tally.likely_ai += 1,
            Verdict::PossiblyAiAssisted => tally.possibly_ai += 1,
            Verdict::MixedIndicators => tally.mixed += 1,
            Verdict::LikelyHuman => tally.likely_human += 1,
            Verdict::Inconclusive => tally.inconclusive += 1,
            Verdict::Unanalyzable => {}
        }
    }
    tally
}
