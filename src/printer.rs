//! Indented task-tree printing with duration-threshold pruning.

use regex::Regex;

use std::io::Write;

use crate::{pretty_time, CategoryStats, ProfileInfo, Task, TaskStats, TraceprofResult};

/// Renders task subtrees as indented lines, skipping any task (and its whole
/// subtree) whose own duration falls below the threshold.
pub struct TreePrinter<'a, W: Write> {
    out: &'a mut W,
    info: &'a ProfileInfo,
    stats: Option<&'a TaskStats>,
    threshold_ns: u64,
}

impl<'a, W: Write> TreePrinter<'a, W> {
    pub fn new(
        out: &'a mut W,
        info: &'a ProfileInfo,
        stats: Option<&'a TaskStats>,
        threshold_ns: u64,
    ) -> Self {
        Self {
            out,
            info,
            stats,
            threshold_ns,
        }
    }

    /// Prints `task` and recursively its descendants. Returns `Ok(false)`
    /// when the task itself is below the threshold and nothing was printed;
    /// suppressed descendants do not affect the return value.
    pub fn print_tree(&mut self, task: &Task) -> TraceprofResult<bool> {
        self.print_subtree(task, 0)
    }

    fn print_subtree(&mut self, task: &Task, depth: usize) -> TraceprofResult<bool> {
        if task.duration_ns < self.threshold_ns {
            return Ok(false);
        }
        let stats = self.stats.and_then(|s| s.get(task.id));
        writeln!(self.out, "{}", format_task_line(task, stats, depth))?;
        for child_id in &task.subtasks {
            if let Some(child) = self.info.by_id(*child_id) {
                self.print_subtree(child, depth + 1)?;
            }
        }
        Ok(true)
    }
}

/// One report line per task, shared by the tree printer and the text dump.
/// Statistics fragments are appended in category enumeration order.
pub fn format_task_line(task: &Task, stats: Option<&CategoryStats>, depth: usize) -> String {
    let mut line = format!(
        "{}{} {}  thread={} id={} parent={} start={} duration={}",
        "  ".repeat(depth),
        task.category,
        task.description,
        task.thread_id,
        task.id,
        task.parent_id,
        pretty_time(task.start_time_ns),
        pretty_time(task.duration_ns),
    );
    if let Some(stats) = stats {
        for (category, attr) in stats {
            line.push_str(&format!(
                " {category}=({}, {})",
                attr.count,
                pretty_time(attr.total_time_ns)
            ));
        }
    }
    line
}

/// Search-then-print: prints the subtree of every task whose description
/// matches `pattern`, then a one-line summary of suppressed matches, or a
/// no-match notice when the search comes up empty.
pub fn print_matching_task_trees<W: Write>(
    out: &mut W,
    info: &ProfileInfo,
    stats: Option<&TaskStats>,
    pattern: &Regex,
    threshold_ns: u64,
) -> TraceprofResult<()> {
    let matches = info.find_tasks_by_description(pattern);
    if matches.is_empty() {
        writeln!(
            out,
            "No tasks matching {pattern} found in profile file {}.",
            info.name()
        )?;
        return Ok(());
    }

    let mut skipped = 0usize;
    let mut printer = TreePrinter::new(&mut *out, info, stats, threshold_ns);
    for task in matches {
        if !printer.print_tree(task)? {
            skipped += 1;
        }
    }
    if skipped > 0 {
        writeln!(
            out,
            "Skipped {skipped} matching task(s) below the duration threshold."
        )?;
    }
    Ok(())
}
