//! Remote repository scanning: validate the URL, shallow-clone into a
//! temporary directory, then hand the checkout to the directory scanner.
//! The temp directory is removed on every exit path by the `TempDir` guard.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;
use regex::Regex;
use tempfile::TempDir;

use crate::report::RepositoryAnalysis;
use crate::scanner::{ScanError, Scanner};

/// Hard ceiling on the clone step.
const CLONE_TIMEOUT: Duration = Duration::from_secs(300);

static URL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)^https?://github\.com/[\w.-]+/[\w.-]+$",
        r"(?i)^git@github\.com:[\w.-]+/[\w.-]+$",
        r"(?i)^gh:[\w.-]+/[\w.-]+$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Validate and normalize a repository URL. The short `gh:owner/repo` form
/// expands to HTTPS; accepted URLs come back with a `.git` suffix.
pub fn validate_repo_url(url: &str) -> Result<String, ScanError> {
    let trimmed = url.trim().trim_end_matches('/');
    let without_git = trimmed.trim_end_matches(".git");

    if !URL_PATTERNS.iter().any(|re| re.is_match(without_git)) {
        return Err(ScanError::InvalidUrl(url.to_string()));
    }

    if let Some(rest) = without_git.strip_prefix("gh:") {
        return Ok(format!("https://github.com/{rest}.git"));
    }
    Ok(format!("{without_git}.git"))
}

/// A shallow checkout that deletes itself when dropped.
pub struct ClonedRepo {
    dir: TempDir,
    branch: String,
}

impl ClonedRepo {
    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }

    /// The branch the checkout landed on.
    pub fn branch(&self) -> &str {
        &self.branch
    }
}

/// Shallow-clone `url` (optionally a specific branch) with a hard deadline.
pub fn clone_repository(url: &str, branch: Option<&str>) -> Result<ClonedRepo, ScanError> {
    let dir = TempDir::with_prefix("slopcheck_").map_err(ScanError::Io)?;
    log::info!("cloning repository into {}", dir.path().display());

    let deadline = Instant::now() + CLONE_TIMEOUT;
    let timed_out = AtomicBool::new(false);

    let mut callbacks = git2::RemoteCallbacks::new();
    callbacks.transfer_progress(|_| {
        if Instant::now() >= deadline {
            timed_out.store(true, Ordering::Relaxed);
            return false;
        }
        true
    });

    let mut fetch_options = git2::FetchOptions::new();
    fetch_options.remote_callbacks(callbacks);
    fetch_options.depth(1);

    let mut builder = git2::build::RepoBuilder::new();
    builder.fetch_options(fetch_options);
    if let Some(branch) = branch {
        builder.branch(branch);
    }

    let repo = match builder.clone(url, dir.path()) {
        Ok(repo) => repo,
        Err(e) => {
            if timed_out.load(Ordering::Relaxed) {
                return Err(ScanError::CloneTimeout);
            }
            let message = e.message().to_string();
            let lowered = message.to_lowercase();
            if lowered.contains("not found") || e.code() == git2::ErrorCode::NotFound {
                if let Some(branch) = branch {
                    if lowered.contains("branch") || lowered.contains("reference") {
                        return Err(ScanError::BranchNotFound(branch.to_string()));
                    }
                }
                return Err(ScanError::RepositoryNotFound(url.to_string()));
            }
            return Err(ScanError::CloneFailed(message));
        }
    };

    let branch_name = repo
        .head()
        .ok()
        .and_then(|h| h.shorthand().map(|s| s.to_string()))
        .unwrap_or_else(|| "main".to_string());
    log::info!("repository cloned successfully (branch {branch_name})");

    Ok(ClonedRepo {
        dir,
        branch: branch_name,
    })
}

impl Scanner {
    /// Scan a remote repository. Clone failures abort the whole scan; this
    /// is the only fatal path in a scan.
    pub fn scan_repository(
        &self,
        url: &str,
        branch: Option<&str>,
        extensions: Option<&[String]>,
    ) -> Result<RepositoryAnalysis, ScanError> {
        let normalized = validate_repo_url(url)?;
        log::info!("starting scan of repository: {normalized}");

        let checkout = clone_repository(&normalized, branch)?;
        let analysis = self.scan_tree(
            checkout.path(),
            url.to_string(),
            checkout.branch().to_string(),
            extensions,
        );
        Ok(analysis)
    }
}
