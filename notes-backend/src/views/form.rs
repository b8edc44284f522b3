use std::collections::BTreeMap;
use validator::ValidationErrors;

use super::{attr, text};
use crate::models::{NoteForm, TITLE_MAX_CHARS};

/// Values and per-field messages for the create/edit form
#[derive(Debug, Clone, Default)]
pub struct FormContext {
    pub values: NoteForm,
    pub errors: BTreeMap<String, Vec<String>>,
}

impl FormContext {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_values(values: NoteForm) -> Self {
        Self {
            values,
            errors: BTreeMap::new(),
        }
    }

    /// Re-populate a rejected form with what the user typed plus the messages
    pub fn with_errors(values: NoteForm, errors: &ValidationErrors) -> Self {
        Self {
            values,
            errors: messages_by_field(errors),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(super) fn render_fields(&self) -> String {
        let values = &self.values;
        let user_id = values.user_id.as_deref().unwrap_or("");

        let mut html = String::new();
        if self.has_errors() {
            html.push_str(r#"<p class="form-alert">Please fix the errors below.</p>"#);
            html.push('\n');
        }

        html.push_str(&format!(
            r#"<label for="title">Title</label>
<input id="title" name="title" type="text" maxlength="{}" value="{}">
{}"#,
            TITLE_MAX_CHARS,
            attr(&values.title),
            self.render_messages("title"),
        ));
        html.push_str(&format!(
            r#"<label for="body">Body</label>
<textarea id="body" name="body" rows="12">
{}</textarea>
{}"#,
            text(&values.body),
            self.render_messages("body"),
        ));
        html.push_str(&format!(
            r#"<label for="user_id">Owner id <small>(optional)</small></label>
<input id="user_id" name="user_id" type="number" min="1" value="{}">
{}"#,
            attr(user_id),
            self.render_messages("user_id"),
        ));

        html
    }

    fn render_messages(&self, field: &str) -> String {
        self.messages(field)
            .iter()
            .map(|m| format!("<p class=\"field-error\">{}</p>\n", text(m)))
            .collect()
    }
}

pub(super) fn messages_by_field(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid ({})", field, e.code),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}
