//! Task model: one timed unit of work from a build-profile trace.

use serde::{Deserialize, Serialize};

/// Sentinel value for `Task::parent_id` marking a tree root.
pub const ROOT_PARENT_ID: u64 = 0;

/// Closed set of task kinds. Declaration order is the stable order used
/// when rendering per-category statistics.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    Phase,
    Action,
    ActionCheck,
    ActionLock,
    Info,
    VfsStat,
    VfsOpen,
    VfsRead,
    Eval,
    Other,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 10] = [
        Self::Phase,
        Self::Action,
        Self::ActionCheck,
        Self::ActionLock,
        Self::Info,
        Self::VfsStat,
        Self::VfsOpen,
        Self::VfsRead,
        Self::Eval,
        Self::Other,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Phase => "phase",
            Self::Action => "action",
            Self::ActionCheck => "action_check",
            Self::ActionLock => "action_lock",
            Self::Info => "info",
            Self::VfsStat => "vfs_stat",
            Self::VfsOpen => "vfs_open",
            Self::VfsRead => "vfs_read",
            Self::Eval => "eval",
            Self::Other => "other",
        }
    }

    /// Categories that record a filesystem path access in their description.
    pub fn is_vfs(self) -> bool {
        matches!(self, Self::VfsStat | Self::VfsOpen | Self::VfsRead)
    }
}

impl std::fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One profiled task. Built once by the loader, never mutated afterwards.
/// Per-category statistics live in a separate [`crate::TaskStats`] view.
#[derive(Debug, Clone)]
pub struct Task {
    pub thread_id: u64,
    pub id: u64,
    /// Id of the enclosing task, or [`ROOT_PARENT_ID`] for tree roots.
    pub parent_id: u64,
    pub category: TaskCategory,
    pub description: String,
    /// Nanoseconds since the profile epoch.
    pub start_time_ns: u64,
    pub duration_ns: u64,
    /// Ids of direct children, ordered chronologically by start time.
    pub subtasks: Vec<u64>,
}

impl Task {
    pub fn is_root(&self) -> bool {
        self.parent_id == ROOT_PARENT_ID
    }
}

/// Count and total duration of descendant tasks of one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateAttr {
    pub count: u64,
    pub total_time_ns: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_order_is_declaration_order() {
        let mut sorted = TaskCategory::ALL;
        sorted.sort();
        assert_eq!(sorted, TaskCategory::ALL);
    }

    #[test]
    fn category_names_round_trip_through_serde() {
        for category in TaskCategory::ALL {
            let json = serde_json::to_string(&category).expect("serialize");
            assert_eq!(json, format!("\"{category}\""));
            let back: TaskCategory = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(back, category);
        }
    }

    #[test]
    fn vfs_categories_are_flagged() {
        assert!(TaskCategory::VfsStat.is_vfs());
        assert!(TaskCategory::VfsRead.is_vfs());
        assert!(!TaskCategory::Action.is_vfs());
    }
}
