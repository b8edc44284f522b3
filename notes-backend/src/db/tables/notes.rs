//! Note database operations

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{OptionalExtension, Row, params};

use super::super::{Database, NoteRepository};
use crate::error::NoteResult;
use crate::models::{Note, NoteInput, Page};

const NOTE_COLUMNS: &str = "id, title, body, user_id, created_at, updated_at";

impl Database {
    fn row_to_note(row: &Row) -> rusqlite::Result<Note> {
        Ok(Note {
            id: row.get(0)?,
            title: row.get(1)?,
            body: row.get(2)?,
            user_id: row.get(3)?,
            created_at: parse_timestamp(row, 4)?,
            updated_at: parse_timestamp(row, 5)?,
        })
    }
}

impl NoteRepository for Database {
    fn find_note(&self, id: i64) -> NoteResult<Option<Note>> {
        let conn = self.conn()?;
        let note = conn
            .query_row(
                &format!("SELECT {} FROM notes WHERE id = ?1", NOTE_COLUMNS),
                [id],
                Self::row_to_note,
            )
            .optional()?;
        Ok(note)
    }

    fn paginate_notes(&self, page: u32, per_page: u32) -> NoteResult<Page<Note>> {
        let conn = self.conn()?;
        let page = Page::<Note>::normalize(page);

        let total: i64 = conn.query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM notes ORDER BY created_at DESC, id DESC LIMIT ?1 OFFSET ?2",
            NOTE_COLUMNS
        ))?;
        let items = stmt
            .query_map(
                params![per_page as i64, Page::<Note>::offset(page, per_page)],
                Self::row_to_note,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Page {
            items,
            page,
            per_page,
            total,
        })
    }

    fn create_note(&self, input: &NoteInput) -> NoteResult<Note> {
        let conn = self.conn()?;
        let now = format_timestamp(Utc::now());

        let note = conn.query_row(
            &format!(
                "INSERT INTO notes (title, body, user_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)
                 RETURNING {}",
                NOTE_COLUMNS
            ),
            params![input.title, input.body, input.user_id, now],
            Self::row_to_note,
        )?;

        log::debug!("[DB] Created note {}", note.id);
        Ok(note)
    }

    fn update_note(&self, id: i64, input: &NoteInput) -> NoteResult<Option<Note>> {
        let conn = self.conn()?;
        let now = format_timestamp(Utc::now());

        // SET expressions see the pre-update row, so an unchanged write keeps its timestamp
        let note = conn
            .query_row(
                &format!(
                    "UPDATE notes SET
                        title = ?2,
                        body = ?3,
                        user_id = ?4,
                        updated_at = CASE
                            WHEN title IS ?2 AND body IS ?3 AND user_id IS ?4 THEN updated_at
                            ELSE ?5
                        END
                     WHERE id = ?1
                     RETURNING {}",
                    NOTE_COLUMNS
                ),
                params![id, input.title, input.body, input.user_id, now],
                Self::row_to_note,
            )
            .optional()?;

        Ok(note)
    }

    fn delete_note(&self, id: i64) -> NoteResult<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM notes WHERE id = ?1", [id])?;
        Ok(deleted > 0)
    }

    fn count_notes(&self) -> NoteResult<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(count)
    }
}

/// Fixed-width UTC RFC 3339, so text order matches chronological order
fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}
