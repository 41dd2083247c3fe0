//! Draft form state: the unsaved title/description and the edit-mode binding.

use crate::error::AppError;
use crate::types::{Todo, TodoId};

/// Transient create/edit form. Never sent anywhere until submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftForm {
    title: String,
    description: String,
    editing: Option<TodoId>,
}

impl DraftForm {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Id of the todo this form will update on submit, if in edit mode.
    pub fn editing(&self) -> Option<&TodoId> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Bind the form to `todo` and copy its editable fields in.
    pub fn load(&mut self, todo: &Todo) {
        self.title = todo.title.clone();
        self.description = todo.description.clone().unwrap_or_default();
        self.editing = Some(todo.id.clone());
    }

    /// Empty both fields and leave edit mode.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Trimmed `(title, description)`, or `TitleRequired` if the trimmed
    /// title is empty.
    pub fn validated(&self) -> Result<(String, String), AppError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::TitleRequired);
        }
        Ok((title.to_string(), self.description.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo() -> Todo {
        serde_json::from_str(
            r#"{"id":"9","title":"Plan","description":"week 3","createdAt":"2024-01-01"}"#,
        )
        .unwrap()
    }

    #[test]
    fn whitespace_title_fails_validation() {
        let mut form = DraftForm::default();
        form.set_title(" \t\n ");
        form.set_description("something");
        assert!(matches!(form.validated(), Err(AppError::TitleRequired)));
    }

    #[test]
    fn validated_trims_both_fields() {
        let mut form = DraftForm::default();
        form.set_title("  Buy milk ");
        form.set_description("  2 litres  ");
        let (title, description) = form.validated().unwrap();
        assert_eq!(title, "Buy milk");
        assert_eq!(description, "2 litres");
    }

    #[test]
    fn load_enters_edit_mode_and_clear_leaves_it() {
        let mut form = DraftForm::default();
        form.load(&todo());
        assert_eq!(form.title(), "Plan");
        assert_eq!(form.description(), "week 3");
        assert_eq!(form.editing(), Some(&TodoId::new("9")));

        form.clear();
        assert_eq!(form, DraftForm::default());
        assert!(!form.is_editing());
    }

    #[test]
    fn load_without_description_gives_empty_field() {
        let mut form = DraftForm::default();
        form.set_description("stale");
        let mut t = todo();
        t.description = None;
        form.load(&t);
        assert_eq!(form.description(), "");
    }
}
