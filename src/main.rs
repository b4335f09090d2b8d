use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use slopcheck::output::{self, OutputFormat};
use slopcheck::report::{DetectionResult, RepositoryAnalysis};
use slopcheck::scanner::Scanner;
use slopcheck::{html, Detector};

#[derive(Parser)]
#[command(name = "slopcheck", about = "Detect AI-generated code", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze individual files or a directory of files.
    Analyze {
        /// Code files to analyze.
        files: Vec<PathBuf>,

        /// Analyze all code files in a directory.
        #[arg(short, long)]
        directory: Option<PathBuf>,

        /// Console format: summary, detailed, pretty, or json.
        #[arg(short, long, default_value = "summary")]
        format: String,

        /// Write all results to a JSON file.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// File extensions to analyze (comma-separated).
        #[arg(long, default_value = ".py,.js,.java,.cpp,.c,.php,.rb,.go,.ts")]
        extensions: String,

        /// Write an HTML report (default path: analysis_report.html).
        #[arg(long)]
        html: bool,

        /// HTML output file path.
        #[arg(long, value_name = "FILE")]
        html_output: Option<PathBuf>,

        /// Maximum file size in MB.
        #[arg(long, default_value_t = 1)]
        max_size: u64,
    },

    /// Scan a remote repository or a local tree and aggregate the results.
    Scan {
        /// Repository URL (https://github.com/owner/repo or gh:owner/repo).
        url: Option<String>,

        /// Scan a local directory instead of a remote repository.
        #[arg(long, value_name = "PATH")]
        local: Option<PathBuf>,

        /// Branch to analyze (default: the remote's default branch).
        #[arg(short, long)]
        branch: Option<String>,

        /// Output directory for reports.
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// File extensions to analyze (comma-separated, default: all supported).
        #[arg(long)]
        extensions: Option<String>,

        /// Generate only the JSON report.
        #[arg(long)]
        json_only: bool,

        /// Generate only the HTML report.
        #[arg(long)]
        html_only: bool,

        /// Suppress progress output.
        #[arg(short, long)]
        quiet: bool,
    },
}

fn parse_format(s: &str) -> Result<OutputFormat> {
    match s {
        "summary" => Ok(OutputFormat::Summary),
        "detailed" => Ok(OutputFormat::Detailed),
        "pretty" => Ok(OutputFormat::Pretty),
        "json" => Ok(OutputFormat::Json),
        other => bail!("unknown format: {other} (expected summary, detailed, pretty, or json)"),
    }
}

fn parse_extensions(list: &str) -> Vec<String> {
    list.split(',')
        .map(|e| e.trim())
        .filter(|e| !e.is_empty())
        .map(|e| {
            if e.starts_with('.') {
                e.to_string()
            } else {
                format!(".{e}")
            }
        })
        .collect()
}

fn run_analyze(
    files: Vec<PathBuf>,
    directory: Option<PathBuf>,
    format: OutputFormat,
    output: Option<PathBuf>,
    extensions: &str,
    html: bool,
    html_output: Option<PathBuf>,
    max_size: u64,
) -> Result<()> {
    let detector = Detector::with_max_file_size(max_size * 1024 * 1024);
    let extensions = parse_extensions(extensions);

    let mut targets = Vec::new();
    if let Some(dir) = &directory {
        let scanner = Scanner::with_detector(detector.clone());
        targets.extend(scanner.find_code_files(dir, &extensions));
    }
    targets.extend(files);

    if targets.is_empty() {
        bail!("no files to analyze; pass file paths or --directory");
    }

    let results: Vec<DetectionResult> = targets.iter().map(|f| detector.analyze_file(f)).collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        OutputFormat::Summary => {
            for result in &results {
                println!("{}", output::format_summary(result));
            }
        }
        OutputFormat::Detailed => {
            for result in &results {
                println!("{}", output::format_detailed(result));
            }
        }
        OutputFormat::Pretty => {
            for result in &results {
                println!("{}", output::format_pretty(result));
            }
        }
    }

    if let Some(path) = output {
        fs::write(&path, serde_json::to_string_pretty(&results)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("JSON results saved to: {}", path.display());
    }

    if html || html_output.is_some() {
        let path = html_output.unwrap_or_else(|| PathBuf::from("analysis_report.html"));
        let title = match (&directory, targets.len()) {
            (Some(dir), _) => format!("AI Code Detection Report - {}", dir.display()),
            (None, 1) => format!("AI Code Detection Report - {}", targets[0].display()),
            _ => "AI Code Detection Report".to_string(),
        };
        fs::write(&path, html::render_files_report(&results, &title))
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("HTML report saved to: {}", path.display());
    }

    println!("\nAnalysis complete - {} file(s) processed", results.len());
    Ok(())
}

#[cfg(feature = "remote")]
fn scan_remote(
    scanner: &Scanner,
    url: &str,
    branch: Option<&str>,
    extensions: Option<&[String]>,
) -> Result<RepositoryAnalysis> {
    Ok(scanner.scan_repository(url, branch, extensions)?)
}

#[cfg(not(feature = "remote"))]
fn scan_remote(
    _scanner: &Scanner,
    _url: &str,
    _branch: Option<&str>,
    _extensions: Option<&[String]>,
) -> Result<RepositoryAnalysis> {
    bail!("this build has no remote support; rebuild with the `remote` feature")
}

fn run_scan(
    url: Option<String>,
    local: Option<PathBuf>,
    branch: Option<String>,
    output_dir: PathBuf,
    extensions: Option<String>,
    json_only: bool,
    html_only: bool,
) -> Result<()> {
    let extensions = extensions.map(|list| parse_extensions(&list));
    let scanner = Scanner::new();

    let (analysis, base_name): (RepositoryAnalysis, String) = if let Some(path) = local {
        let analysis = scanner.scan_directory(&path, extensions.as_deref())?;
        let base = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "scan".to_string());
        (analysis, base)
    } else if let Some(url) = url {
        let analysis = scan_remote(&scanner, &url, branch.as_deref(), extensions.as_deref())?;
        let base = url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or("repo")
            .trim_end_matches(".git")
            .to_string();
        (analysis, base)
    } else {
        bail!("provide a repository URL or --local PATH");
    };

    print!("{}", output::format_repo_summary(&analysis));

    fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");

    if !html_only {
        let path = output_dir.join(format!("{base_name}_analysis_{timestamp}.json"));
        fs::write(&path, serde_json::to_string_pretty(&analysis)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("JSON report saved to: {}", path.display());
    }

    if !json_only {
        let path = output_dir.join(format!("{base_name}_analysis_{timestamp}.html"));
        fs::write(&path, html::render_repo_report(&analysis))
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("HTML report saved to: {}", path.display());
    }

    println!("\nAnalysis complete!");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze {
            files,
            directory,
            format,
            output,
            extensions,
            html,
            html_output,
            max_size,
        } => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
                .init();
            let format = parse_format(&format)?;
            run_analyze(
                files,
                directory,
                format,
                output,
                &extensions,
                html,
                html_output,
                max_size,
            )
        }
        Command::Scan {
            url,
            local,
            branch,
            output_dir,
            extensions,
            json_only,
            html_only,
            quiet,
        } => {
            let default_level = if quiet { "error" } else { "info" };
            env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(default_level),
            )
            .init();
            run_scan(url, local, branch, output_dir, extensions, json_only, html_only)
        }
    }
}
