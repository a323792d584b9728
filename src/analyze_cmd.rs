//! Report dispatch: one rendering mode per input trace file.

use regex::Regex;

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{
    aggregate, dump_profile, load_profile, print_matching_task_trees, print_phase_summary,
    render_html, DumpMode, HtmlOptions, TraceprofResult,
};

/// Parsed report options, fixed once per invocation.
#[derive(Debug)]
pub struct AnalyzeOptions {
    pub dump: Option<DumpMode>,
    pub html: bool,
    pub chart: bool,
    pub html_details: bool,
    pub html_histograms: bool,
    pub html_pixels_per_second: u32,
    pub task_tree: Option<Regex>,
    pub task_tree_threshold_ms: u64,
    pub vfs_stats: bool,
    pub vfs_stats_limit: i32,
}

/// Result of processing one input file.
#[derive(Debug)]
pub struct FileOutcome {
    pub file: PathBuf,
    pub error: Option<String>,
}

impl FileOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Processes every input file independently against a single shared output
/// writer. A failure on one file is logged and recorded, never propagated,
/// so later files still run; the writer is flushed once at the end.
pub fn analyze_command<W: Write>(
    opts: &AnalyzeOptions,
    files: &[PathBuf],
    out: &mut W,
) -> TraceprofResult<Vec<FileOutcome>> {
    let mut outcomes = Vec::with_capacity(files.len());
    for file in files {
        match analyze_file(opts, file, out) {
            Ok(()) => outcomes.push(FileOutcome {
                file: file.clone(),
                error: None,
            }),
            Err(err) => {
                tracing::error!("failed to process file {}: {err}", file.display());
                outcomes.push(FileOutcome {
                    file: file.clone(),
                    error: Some(err.to_string()),
                });
            }
        }
    }
    out.flush()?;
    Ok(outcomes)
}

fn analyze_file<W: Write>(opts: &AnalyzeOptions, file: &Path, out: &mut W) -> TraceprofResult<()> {
    let info = load_profile(file)?;

    if let Some(pattern) = &opts.task_tree {
        let stats = aggregate(&info)?;
        let threshold_ns = opts.task_tree_threshold_ms.saturating_mul(1_000_000);
        return print_matching_task_trees(out, &info, Some(&stats), pattern, threshold_ns);
    }

    if let Some(mode) = opts.dump {
        return dump_profile(out, &info, mode);
    }

    if opts.html {
        let stats = aggregate(&info)?;
        let html_path = html_output_path(file);
        tracing::info!("creating HTML output in {}", html_path.display());
        let html = render_html(
            &info,
            &stats,
            &HtmlOptions {
                pixels_per_second: opts.html_pixels_per_second,
                details: opts.html_details,
                chart: opts.chart,
                histograms: opts.html_histograms,
            },
        );
        std::fs::write(&html_path, html)?;
        return Ok(());
    }

    let vfs_limit = if opts.vfs_stats {
        opts.vfs_stats_limit
    } else {
        0
    };
    print_phase_summary(out, &info, vfs_limit)
}

/// `<input>.html` alongside the trace file.
fn html_output_path(file: &Path) -> PathBuf {
    let mut name = file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".html");
    file.with_file_name(name)
}
