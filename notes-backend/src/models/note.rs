use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

pub const TITLE_MAX_CHARS: usize = 255;

/// Note - the persisted text entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Submitted note attributes, exactly as they arrive from a form.
///
/// Missing fields deserialize to empty so that they surface as field errors
/// rather than as an extractor rejection. `content` is accepted for `body`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NoteForm {
    #[serde(default)]
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 255, message = "Title may not be longer than 255 characters")
    )]
    pub title: String,

    #[serde(default, alias = "content")]
    #[validate(length(
        min = 1,
        max = 65535,
        message = "Body must be between 1 and 65535 characters"
    ))]
    pub body: String,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(custom(function = "validate_owner_reference"))]
    pub user_id: Option<String>,
}

/// Validated attributes, ready to be written by a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteInput {
    pub title: String,
    pub body: String,
    pub user_id: Option<i64>,
}

impl NoteForm {
    pub fn new(title: &str, body: &str, user_id: Option<i64>) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
            user_id: user_id.map(|id| id.to_string()),
        }
    }

    /// Validate and convert into repository input. Nothing is returned on
    /// failure, so a partial record can never reach the store.
    pub fn into_input(mut self) -> Result<NoteInput, ValidationErrors> {
        self.title = self.title.trim().to_string();
        self.validate()?;

        let user_id = match self.user_id.as_deref() {
            Some(raw) => Some(parse_owner_reference(raw).ok_or_else(|| {
                let mut errors = ValidationErrors::new();
                errors.add("user_id", owner_reference_error());
                errors
            })?),
            None => None,
        };

        Ok(NoteInput {
            title: self.title,
            body: self.body,
            user_id,
        })
    }
}

impl From<&Note> for NoteForm {
    fn from(note: &Note) -> Self {
        NoteForm::new(&note.title, &note.body, note.user_id)
    }
}

impl From<&NoteInput> for NoteForm {
    fn from(input: &NoteInput) -> Self {
        NoteForm::new(&input.title, &input.body, input.user_id)
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some(Cow::Borrowed("Title is required"));
        return Err(error);
    }
    Ok(())
}

fn validate_owner_reference(value: &str) -> Result<(), ValidationError> {
    match parse_owner_reference(value) {
        Some(_) => Ok(()),
        None => Err(owner_reference_error()),
    }
}

fn parse_owner_reference(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id >= 1)
}

fn owner_reference_error() -> ValidationError {
    let mut error = ValidationError::new("owner_reference");
    error.message = Some(Cow::Borrowed("Owner must be a positive user id"));
    error
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}
