pub mod analyzers;
pub mod detector;
pub mod html;
pub mod output;
pub mod patterns;
#[cfg(feature = "remote")]
pub mod remote;
pub mod report;
pub mod scanner;
pub mod scoring;

use std::path::Path;

pub use detector::{Detector, DEFAULT_MAX_FILE_SIZE};
pub use report::{Confidence, DetectionResult, RepositoryAnalysis, Verdict};
pub use scanner::{ScanError, Scanner};

/// Analyze a source code string and return a detection result.
pub fn analyze(source: &str) -> DetectionResult {
    Detector::new().analyze_source("<memory>", source)
}

/// Analyze the file at the given path. Never fails: problems reading the
/// file come back as a result with ERROR confidence.
pub fn analyze_file(path: &Path) -> DetectionResult {
    Detector::new().analyze_file(path)
}
