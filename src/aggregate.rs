//! Per-category descendant statistics, computed as a pure pass over a
//! loaded profile. Returning a separate view (instead of mutating tasks in
//! place) means a second aggregation cannot change anything.

use std::collections::{BTreeMap, HashMap};

use crate::{AggregateAttr, ProfileInfo, Task, TaskCategory, TraceprofError, TraceprofResult};

/// Per-category attributes of one task's descendants, iterated in the fixed
/// category order. An absent category means zero occurrences.
pub type CategoryStats = BTreeMap<TaskCategory, AggregateAttr>;

/// Statistics view over a whole profile, keyed by task id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStats {
    by_task: HashMap<u64, CategoryStats>,
}

impl TaskStats {
    pub fn get(&self, task_id: u64) -> Option<&CategoryStats> {
        self.by_task.get(&task_id)
    }
}

/// Rolls up, for every task, the count and total duration of its strict
/// descendants per category.
pub fn aggregate(info: &ProfileInfo) -> TraceprofResult<TaskStats> {
    let mut stats = TaskStats::default();
    for root in info.roots() {
        collect(info, root, &mut stats)?;
    }
    Ok(stats)
}

fn collect(
    info: &ProfileInfo,
    task: &Task,
    stats: &mut TaskStats,
) -> TraceprofResult<CategoryStats> {
    let mut own = CategoryStats::new();
    for child_id in &task.subtasks {
        let child = info.by_id(*child_id).ok_or_else(|| {
            TraceprofError::Aggregation(format!(
                "task {} lists unknown subtask {child_id}",
                task.id
            ))
        })?;
        let child_stats = collect(info, child, stats)?;
        for (category, attr) in &child_stats {
            merge(&mut own, *category, *attr)?;
        }
        merge(
            &mut own,
            child.category,
            AggregateAttr {
                count: 1,
                total_time_ns: child.duration_ns,
            },
        )?;
    }
    stats.by_task.insert(task.id, own.clone());
    Ok(own)
}

fn merge(
    into: &mut CategoryStats,
    category: TaskCategory,
    attr: AggregateAttr,
) -> TraceprofResult<()> {
    let entry = into.entry(category).or_default();
    entry.count += attr.count;
    entry.total_time_ns = entry
        .total_time_ns
        .checked_add(attr.total_time_ns)
        .ok_or_else(|| {
            TraceprofError::Aggregation(format!("total time overflow for category {category}"))
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::profile_from;
    use crate::TaskCategory::{Action, Eval, Phase};

    #[test]
    fn counts_strict_descendants_per_category() {
        let info = profile_from(&[
            (1, 0, Phase, "execute", 0, 1000),
            (2, 1, Action, "compile a", 0, 40),
            (3, 1, Action, "compile b", 50, 30),
            (4, 2, Eval, "macro", 5, 10),
        ]);
        let stats = aggregate(&info).expect("aggregate");

        let root = stats.get(1).expect("root stats");
        assert_eq!(
            root.get(&Action),
            Some(&AggregateAttr {
                count: 2,
                total_time_ns: 70_000_000
            })
        );
        assert_eq!(
            root.get(&Eval),
            Some(&AggregateAttr {
                count: 1,
                total_time_ns: 10_000_000
            })
        );
        // A task does not count itself.
        assert_eq!(root.get(&Phase), None);

        let leaf = stats.get(4).expect("leaf stats");
        assert!(leaf.is_empty());
    }

    #[test]
    fn aggregation_is_idempotent() {
        let info = profile_from(&[
            (1, 0, Phase, "execute", 0, 1000),
            (2, 1, Action, "compile", 0, 40),
        ]);
        let first = aggregate(&info).expect("first");
        let second = aggregate(&info).expect("second");
        assert_eq!(first, second);
    }

    #[test]
    fn category_iteration_follows_enumeration_order() {
        let info = profile_from(&[
            (1, 0, Phase, "execute", 0, 1000),
            (2, 1, Eval, "late category", 0, 5),
            (3, 1, Action, "early category", 10, 5),
        ]);
        let stats = aggregate(&info).expect("aggregate");
        let categories: Vec<TaskCategory> =
            stats.get(1).expect("root").keys().copied().collect();
        assert_eq!(categories, vec![Action, Eval]);
    }
}
