//! Phase-summary text report, the default output mode.

use std::collections::HashMap;
use std::io::Write;

use crate::{pretty_time, AggregateAttr, ProfileInfo, TaskCategory, TraceprofResult};

/// Prints the phase table and, when `vfs_stats_limit` is non-zero, the
/// path-access statistics section. A negative limit means "no limit".
pub fn print_phase_summary<W: Write>(
    out: &mut W,
    info: &ProfileInfo,
    vfs_stats_limit: i32,
) -> TraceprofResult<()> {
    writeln!(out, "=== PHASE SUMMARY INFORMATION ===")?;

    let phases: Vec<_> = info
        .roots()
        .filter(|t| t.category == TaskCategory::Phase)
        .collect();
    let total_ns: u64 = phases.iter().map(|t| t.duration_ns).sum();
    for phase in &phases {
        writeln!(
            out,
            "Total {} phase time  {:>12}  {:>7}",
            phase.description,
            pretty_time(phase.duration_ns),
            percent(phase.duration_ns, total_ns)
        )?;
    }
    writeln!(
        out,
        "Total run time       {:>12}  {:>7}",
        pretty_time(total_ns),
        percent(total_ns, total_ns)
    )?;

    if vfs_stats_limit != 0 {
        print_vfs_stats(out, info, vfs_stats_limit)?;
    }
    Ok(())
}

fn percent(part_ns: u64, total_ns: u64) -> String {
    if total_ns == 0 {
        return "0.00%".to_string();
    }
    format!("{:.2}%", part_ns as f64 / total_ns as f64 * 100.0)
}

fn print_vfs_stats<W: Write>(
    out: &mut W,
    info: &ProfileInfo,
    limit: i32,
) -> TraceprofResult<()> {
    let mut by_path: HashMap<&str, AggregateAttr> = HashMap::new();
    for task in info.all().iter().filter(|t| t.category.is_vfs()) {
        let entry = by_path.entry(task.description.as_str()).or_default();
        entry.count += 1;
        entry.total_time_ns = entry.total_time_ns.saturating_add(task.duration_ns);
    }
    if by_path.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "=== VFS PATH STATISTICS ===")?;
    let mut rows: Vec<(&str, AggregateAttr)> = by_path.into_iter().collect();
    rows.sort_by(|a, b| {
        b.1.total_time_ns
            .cmp(&a.1.total_time_ns)
            .then_with(|| a.0.cmp(b.0))
    });
    let take = if limit < 0 { rows.len() } else { limit as usize };
    for (path, attr) in rows.into_iter().take(take) {
        writeln!(
            out,
            "{:>8}  {:>12}  {}",
            attr.count,
            pretty_time(attr.total_time_ns),
            path
        )?;
    }
    Ok(())
}
