use anyhow::Result;
use clap::Parser;
use regex::Regex;
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;

use traceprof::{analyze_command, AnalyzeOptions, Config, DumpMode};

/// Analyzes build-profile trace files.
#[derive(Debug, Parser)]
#[command(name = "traceprof", version)]
struct Cli {
    /// Trace files to analyze.
    #[arg(value_name = "TRACE", required = true)]
    files: Vec<PathBuf>,

    /// Output a full profile data dump, either human-readable text or
    /// script-friendly raw records, sorted or unsorted.
    #[arg(short = 'd', long)]
    dump: Option<DumpMode>,

    /// Write an HTML visualization next to each trace file (input name plus
    /// ".html").
    #[arg(long)]
    html: bool,

    /// Include the task chart in the HTML output (--chart=false omits it).
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    chart: bool,

    /// Scale of the HTML time axis, in pixels per second.
    #[arg(long, value_name = "PX")]
    html_pixels_per_second: Option<u32>,

    /// Include every task in the HTML diagram instead of an aggregated one.
    #[arg(long)]
    html_details: bool,

    /// Add per-category duration histograms to the HTML output (effective
    /// with --html-details).
    #[arg(long)]
    html_histograms: bool,

    /// Print the tree of tasks whose description matches this regular
    /// expression.
    #[arg(long, value_name = "REGEX")]
    task_tree: Option<Regex>,

    /// Skip tasks shorter than this many milliseconds when printing a task
    /// tree.
    #[arg(long, value_name = "MS")]
    task_tree_threshold: Option<u64>,

    /// Include VFS path-access statistics in the phase summary.
    #[arg(long)]
    vfs_stats: bool,

    /// Maximum number of VFS path statistics to print (-1 for no limit).
    #[arg(long, value_name = "N", default_value_t = -1, allow_negative_numbers = true)]
    vfs_stats_limit: i32,

    /// Config file with defaults for the threshold and HTML scale.
    #[arg(long, value_name = "PATH", default_value = "traceprof.toml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load_optional(&cli.config);

    let opts = AnalyzeOptions {
        dump: cli.dump,
        html: cli.html,
        chart: cli.chart,
        html_details: cli.html_details,
        html_histograms: cli.html_histograms,
        html_pixels_per_second: cli
            .html_pixels_per_second
            .unwrap_or(config.html_pixels_per_second),
        task_tree: cli.task_tree,
        task_tree_threshold_ms: cli
            .task_tree_threshold
            .unwrap_or(config.task_tree_threshold_ms),
        vfs_stats: cli.vfs_stats,
        vfs_stats_limit: cli.vfs_stats_limit,
    };

    // One writer spans all input files; per-file failures are reported by
    // the dispatcher and never change the exit status.
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outcomes = analyze_command(&opts, &cli.files, &mut out)?;

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    if failed > 0 {
        tracing::warn!("{failed} of {} file(s) failed to process", outcomes.len());
    }
    Ok(())
}
