//! Full-profile dump rendering (`--dump`).

use serde::{Deserialize, Serialize};

use std::io::Write;

use crate::{
    aggregate, format_task_line, ProfileInfo, Task, TaskStats, TraceprofResult,
};

/// The four dump behaviors, fixed at option-parsing time. Sorted modes run
/// the aggregation pass before rendering; unsorted modes render the tasks
/// exactly as loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DumpMode {
    Text,
    Raw,
    TextUnsorted,
    RawUnsorted,
}

impl DumpMode {
    pub fn is_raw(self) -> bool {
        matches!(self, Self::Raw | Self::RawUnsorted)
    }

    pub fn is_sorted(self) -> bool {
        matches!(self, Self::Text | Self::Raw)
    }
}

impl clap::ValueEnum for DumpMode {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Text, Self::Raw, Self::TextUnsorted, Self::RawUnsorted]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Text => clap::builder::PossibleValue::new("text"),
            Self::Raw => clap::builder::PossibleValue::new("raw"),
            Self::TextUnsorted => clap::builder::PossibleValue::new("text-unsorted"),
            Self::RawUnsorted => clap::builder::PossibleValue::new("raw-unsorted"),
        })
    }
}

/// Renders the whole profile in the selected mode.
pub fn dump_profile<W: Write>(
    out: &mut W,
    info: &ProfileInfo,
    mode: DumpMode,
) -> TraceprofResult<()> {
    let stats = if mode.is_sorted() {
        Some(aggregate(info)?)
    } else {
        None
    };

    if mode.is_raw() {
        // Raw output is one record per task in id order regardless of sort
        // mode; only the stats field differs.
        for task in info.all() {
            writeln!(out, "{}", format_raw_record(task, stats.as_ref()))?;
        }
        return Ok(());
    }

    match mode {
        DumpMode::TextUnsorted => {
            for task in info.all() {
                dump_task(out, info, task, None, 0)?;
            }
        }
        _ => {
            for task in info.roots() {
                dump_task(out, info, task, stats.as_ref(), 0)?;
            }
        }
    }
    Ok(())
}

fn dump_task<W: Write>(
    out: &mut W,
    info: &ProfileInfo,
    task: &Task,
    stats: Option<&TaskStats>,
    depth: usize,
) -> TraceprofResult<()> {
    writeln!(
        out,
        "{}",
        format_task_line(task, stats.and_then(|s| s.get(task.id)), depth)
    )?;
    for child_id in &task.subtasks {
        if let Some(child) = info.by_id(*child_id) {
            dump_task(out, info, child, stats, depth + 1)?;
        }
    }
    Ok(())
}

/// One `|`-joined record: thread, id, parent, start, duration, stats,
/// category, description. The stats field is a space-joined list of
/// `category,count,total_ns` fragments and is empty without aggregation,
/// so a record always splits into 8 fields.
pub fn format_raw_record(task: &Task, stats: Option<&TaskStats>) -> String {
    let mut fragments = String::new();
    if let Some(per_category) = stats.and_then(|s| s.get(task.id)) {
        for (category, attr) in per_category {
            fragments.push_str(&format!(
                "{category},{},{} ",
                attr.count, attr.total_time_ns
            ));
        }
    }
    format!(
        "{}|{}|{}|{}|{}|{}|{}|{}",
        task.thread_id,
        task.id,
        task.parent_id,
        task.start_time_ns,
        task.duration_ns,
        fragments.trim_end(),
        task.category,
        task.description
    )
}
