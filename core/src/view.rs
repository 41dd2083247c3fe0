//! Display projection of the todo collection.
//!
//! Recomputed from the in-memory collection on every call and never stored.

use crate::types::Todo;

/// What the list area should show right now.
#[derive(Debug, PartialEq, Eq)]
pub enum ListView<'a> {
    /// A list fetch is outstanding; show a placeholder instead of items.
    Loading,
    Empty,
    /// Newest first.
    Items(Vec<&'a Todo>),
}

impl<'a> ListView<'a> {
    pub fn project(todos: &'a [Todo], loading: bool) -> Self {
        if loading {
            return ListView::Loading;
        }
        let sorted = sorted_newest_first(todos);
        if sorted.is_empty() {
            ListView::Empty
        } else {
            ListView::Items(sorted)
        }
    }

    /// The displayed items, empty for the placeholder states.
    pub fn items(&self) -> &[&'a Todo] {
        match self {
            ListView::Items(items) => items,
            ListView::Loading | ListView::Empty => &[],
        }
    }
}

/// Sort by `created_at` descending. Stable, so equal timestamps keep the
/// server's order.
pub fn sorted_newest_first(todos: &[Todo]) -> Vec<&Todo> {
    let mut sorted: Vec<&Todo> = todos.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: &str, created_at: &str) -> Todo {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("t{id}"),
            "createdAt": created_at,
        }))
        .unwrap()
    }

    fn ids(view: &ListView<'_>) -> Vec<String> {
        view.items().iter().map(|t| t.id.to_string()).collect()
    }

    #[test]
    fn newest_first() {
        let todos = vec![
            todo("a", "2024-01-01"),
            todo("b", "2024-03-01T08:00:00Z"),
            todo("c", "2024-02-01"),
        ];
        let view = ListView::project(&todos, false);
        assert_eq!(ids(&view), ["b", "c", "a"]);
    }

    #[test]
    fn equal_timestamps_keep_server_order() {
        let todos = vec![
            todo("x", "2024-01-01"),
            todo("y", "2024-01-01"),
            todo("z", "2024-01-01"),
        ];
        assert_eq!(ids(&ListView::project(&todos, false)), ["x", "y", "z"]);
    }

    #[test]
    fn loading_hides_items() {
        let todos = vec![todo("a", "2024-01-01")];
        let view = ListView::project(&todos, true);
        assert_eq!(view, ListView::Loading);
        assert!(view.items().is_empty());
    }

    #[test]
    fn empty_collection() {
        assert_eq!(ListView::project(&[], false), ListView::Empty);
    }
}
