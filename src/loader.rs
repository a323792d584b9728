//! Trace file (.trace) loading and task-tree reconstruction.

use serde::{Deserialize, Serialize};

use std::collections::HashMap;
use std::path::Path;

use crate::{ProfileInfo, Task, TaskCategory, TraceprofError, TraceprofResult, ROOT_PARENT_ID};

pub const TRACE_FORMAT: &str = "traceprof-trace";
pub const TRACE_VERSION: u32 = 1;

/// On-disk trace envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceFile {
    pub format: String,
    pub version: u32,
    pub tasks: Vec<TaskRecord>,
}

/// One flat task record as serialized by the profiler. Records may appear
/// in any order; tree structure is reconstructed from `parent_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub thread_id: u64,
    pub id: u64,
    #[serde(default)]
    pub parent_id: u64,
    pub category: TaskCategory,
    pub description: String,
    pub start_time_ns: u64,
    #[serde(default)]
    pub duration_ns: u64,
}

/// Reads a trace file and reconstructs the task tree.
pub fn load_profile(path: &Path) -> TraceprofResult<ProfileInfo> {
    let bytes = std::fs::read(path)?;
    let doc: TraceFile = serde_json::from_slice(&bytes)?;
    if doc.format != TRACE_FORMAT {
        return Err(TraceprofError::MalformedTrace(format!(
            "unexpected trace format {:?} (expected {TRACE_FORMAT:?})",
            doc.format
        )));
    }
    if doc.version != TRACE_VERSION {
        return Err(TraceprofError::MalformedTrace(format!(
            "unsupported trace version {} (expected {TRACE_VERSION})",
            doc.version
        )));
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    build_profile(name, doc.tasks)
}

/// Builds a [`ProfileInfo`] from flat records: id index, chronological
/// child lists, root subsequence. Rejects duplicate ids, unknown parents,
/// and parent cycles.
pub fn build_profile(name: String, records: Vec<TaskRecord>) -> TraceprofResult<ProfileInfo> {
    let mut tasks: Vec<Task> = records
        .into_iter()
        .map(|r| Task {
            thread_id: r.thread_id,
            id: r.id,
            parent_id: r.parent_id,
            category: r.category,
            description: r.description,
            start_time_ns: r.start_time_ns,
            duration_ns: r.duration_ns,
            subtasks: Vec::new(),
        })
        .collect();
    tasks.sort_by_key(|t| t.id);

    let mut index = HashMap::with_capacity(tasks.len());
    for (slot, task) in tasks.iter().enumerate() {
        if task.id == ROOT_PARENT_ID {
            return Err(TraceprofError::MalformedTrace(format!(
                "task id {} collides with the root sentinel",
                task.id
            )));
        }
        if index.insert(task.id, slot).is_some() {
            return Err(TraceprofError::MalformedTrace(format!(
                "duplicate task id {}",
                task.id
            )));
        }
    }

    let mut children: HashMap<u64, Vec<u64>> = HashMap::new();
    for task in &tasks {
        if task.is_root() {
            continue;
        }
        if !index.contains_key(&task.parent_id) {
            return Err(TraceprofError::MalformedTrace(format!(
                "task {} references unknown parent {}",
                task.id, task.parent_id
            )));
        }
        children.entry(task.parent_id).or_default().push(task.id);
    }
    for ids in children.values_mut() {
        ids.sort_by_key(|id| {
            let task = &tasks[index[id]];
            (task.start_time_ns, task.id)
        });
    }
    for (parent_id, ids) in children {
        let slot = index[&parent_id];
        tasks[slot].subtasks = ids;
    }

    let roots: Vec<usize> = tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_root())
        .map(|(slot, _)| slot)
        .collect();

    // Every task must be reachable from a root, otherwise parent links form
    // a cycle and tree traversals would not terminate.
    let mut reachable = 0usize;
    let mut pending: Vec<u64> = roots.iter().map(|slot| tasks[*slot].id).collect();
    while let Some(id) = pending.pop() {
        reachable += 1;
        pending.extend(tasks[index[&id]].subtasks.iter().copied());
    }
    if reachable != tasks.len() {
        return Err(TraceprofError::MalformedTrace(format!(
            "{} task(s) unreachable from any root (parent cycle)",
            tasks.len() - reachable
        )));
    }

    Ok(ProfileInfo::new(name, tasks, index, roots))
}
