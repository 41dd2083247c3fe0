//! Plain-text rendering of the controller state.

use todo_core::{ListView, TodoApp};

/// Render the error line, the list (or its placeholder) and the form status.
pub fn render(app: &TodoApp) -> String {
    let mut out = String::new();

    if let Some(err) = app.error() {
        out.push_str(&format!("! {err}\n"));
    }

    match app.view() {
        ListView::Loading => out.push_str("  Loading...\n"),
        ListView::Empty => out.push_str("  No todos yet.\n"),
        ListView::Items(items) => {
            for (i, todo) in items.iter().enumerate() {
                let mark = if todo.completed { 'x' } else { ' ' };
                out.push_str(&format!("{:>3}. [{mark}] {}", i + 1, todo.title));
                if let Some(description) = todo.description.as_deref().filter(|d| !d.is_empty()) {
                    out.push_str(&format!(" ({description})"));
                }
                out.push('\n');
            }
        }
    }

    let form = app.form();
    if let Some(id) = form.editing() {
        let original = app.get(id).map_or(id.as_str(), |t| t.title.as_str());
        out.push_str(&format!(
            "editing \"{original}\": title={:?} description={:?}\n",
            form.title(),
            form.description()
        ));
    } else if !form.title().is_empty() || !form.description().is_empty() {
        out.push_str(&format!(
            "draft: title={:?} description={:?}\n",
            form.title(),
            form.description()
        ));
    }

    if app.is_submitting() {
        out.push_str("saving...\n");
    }
    out
}
