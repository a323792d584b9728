//! Loaded profile: the whole-trace task collection and its query surface.

use regex::Regex;

use std::collections::HashMap;

use crate::Task;

/// All tasks of one trace file, plus derived indices. Read-only once the
/// loader has built it.
#[derive(Debug, Clone)]
pub struct ProfileInfo {
    name: String,
    /// Every task, in ascending id order.
    tasks: Vec<Task>,
    /// Task id to slot in `tasks`.
    index: HashMap<u64, usize>,
    /// Slots of tasks with no parent.
    roots: Vec<usize>,
}

impl ProfileInfo {
    pub(crate) fn new(
        name: String,
        tasks: Vec<Task>,
        index: HashMap<u64, usize>,
        roots: Vec<usize>,
    ) -> Self {
        Self {
            name,
            tasks,
            index,
            roots,
        }
    }

    /// File name this profile was loaded from, used in report messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn by_id(&self, id: u64) -> Option<&Task> {
        self.index.get(&id).map(|slot| &self.tasks[*slot])
    }

    /// Every task, in ascending id order (not tree order).
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn roots(&self) -> impl Iterator<Item = &Task> {
        self.roots.iter().map(|slot| &self.tasks[*slot])
    }

    /// Tasks whose description matches `pattern`, anywhere in the tree,
    /// in ascending id order. No match yields an empty vec.
    pub fn find_tasks_by_description(&self, pattern: &Regex) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| pattern.is_match(&task.description))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use crate::testutil::profile_from;
    use crate::TaskCategory;

    #[test]
    fn search_returns_matches_in_id_order() {
        let info = profile_from(&[
            (3, 1, TaskCategory::Action, "compile b", 20, 5),
            (1, 0, TaskCategory::Phase, "execute", 0, 100),
            (2, 1, TaskCategory::Action, "compile a", 10, 5),
            (4, 0, TaskCategory::Info, "link", 50, 5),
        ]);
        let pattern = Regex::new("compile").expect("regex");
        let hits = info.find_tasks_by_description(&pattern);
        let ids: Vec<u64> = hits.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn search_matches_deeply_nested_tasks() {
        let info = profile_from(&[
            (1, 0, TaskCategory::Phase, "execute", 0, 100),
            (2, 1, TaskCategory::Action, "outer", 0, 50),
            (3, 2, TaskCategory::Eval, "inner needle", 5, 10),
        ]);
        let pattern = Regex::new("needle").expect("regex");
        let hits = info.find_tasks_by_description(&pattern);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 3);
    }

    #[test]
    fn search_without_match_is_empty_not_an_error() {
        let info = profile_from(&[(1, 0, TaskCategory::Phase, "execute", 0, 100)]);
        let pattern = Regex::new("nonexistent").expect("regex");
        assert!(info.find_tasks_by_description(&pattern).is_empty());
    }
}
