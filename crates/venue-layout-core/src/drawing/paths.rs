//! Path grouping: lines sharing a path id act as one unit.

use crate::model::VenueLine;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use uuid::Uuid;

/// Generate a new unique line id.
pub fn new_line_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generate a new unique path id.
pub fn new_path_id() -> String {
    Uuid::new_v4().to_string()
}

/// Path membership lookup built from the current line list.
#[derive(Debug, Clone, Default)]
pub struct PathIndex {
    members: BTreeMap<String, BTreeSet<String>>,
    path_of: HashMap<String, String>,
}

impl PathIndex {
    pub fn build(lines: &[VenueLine]) -> Self {
        let mut index = Self::default();
        for line in lines {
            if let Some(path_id) = &line.path_id {
                index
                    .members
                    .entry(path_id.clone())
                    .or_default()
                    .insert(line.id.clone());
                index.path_of.insert(line.id.clone(), path_id.clone());
            }
        }
        index
    }

    pub fn path_of(&self, line_id: &str) -> Option<&str> {
        self.path_of.get(line_id).map(String::as_str)
    }

    /// Line ids sharing a path with `line_id` (just itself when unpathed).
    pub fn group_of(&self, line_id: &str) -> BTreeSet<String> {
        self.path_of(line_id)
            .and_then(|path| self.members(path))
            .cloned()
            .unwrap_or_else(|| BTreeSet::from([line_id.to_string()]))
    }

    pub fn members(&self, path_id: &str) -> Option<&BTreeSet<String>> {
        self.members.get(path_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn line(id: &str, path: Option<&str>) -> VenueLine {
        VenueLine {
            path_id: path.map(str::to_string),
            ..VenueLine::new(id, Point::ZERO, Point::new(1.0, 1.0))
        }
    }

    #[test]
    fn test_groups() {
        let lines = vec![line("a", Some("p")), line("b", None), line("c", Some("p")), line("d", Some("q"))];
        let index = PathIndex::build(&lines);
        assert_eq!(index.members("p").map(BTreeSet::len), Some(2));
        assert_eq!(index.group_of("a"), BTreeSet::from(["a".to_string(), "c".to_string()]));
        assert_eq!(index.group_of("b"), BTreeSet::from(["b".to_string()]));
        assert_eq!(index.path_of("d"), Some("q"));
        assert_eq!(index.members("q").map(BTreeSet::len), Some(1));
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(new_line_id(), new_line_id());
        assert_ne!(new_path_id(), new_path_id());
    }
}
