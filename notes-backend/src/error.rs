//! Error types for the notes backend.
//!
//! `NoteError` covers everything a controller action can hit; it renders
//! itself as an HTML page through `actix_web::ResponseError` so handlers can
//! propagate with `?` and still answer with a user-visible response.

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use validator::ValidationErrors;

use crate::views;

/// Result alias used by the repository layer and controllers
pub type NoteResult<T> = Result<T, NoteError>;

#[derive(Error, Debug)]
pub enum NoteError {
    /// The identifier does not resolve to a stored note.
    #[error("Note not found: {id}")]
    NotFound { id: String },

    /// Proposed attributes violate the note schema.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
}

impl NoteError {
    pub fn not_found(id: impl ToString) -> Self {
        NoteError::NotFound { id: id.to_string() }
    }
}

impl ResponseError for NoteError {
    fn status_code(&self) -> StatusCode {
        match self {
            NoteError::NotFound { .. } => StatusCode::NOT_FOUND,
            NoteError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            NoteError::Database(_) | NoteError::Pool(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            NoteError::NotFound { id } => views::errors::not_found(&format!("Note {}", id)),
            NoteError::Validation(errors) => views::errors::unprocessable(errors),
            NoteError::Database(_) | NoteError::Pool(_) => {
                log::error!("[NOTES] {}", self);
                views::errors::server_error()
            }
        };

        HttpResponse::build(self.status_code())
            .content_type(ContentType::html())
            .body(body)
    }
}

/// Startup configuration problems
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be a valid number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}
