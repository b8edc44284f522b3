use chrono::{DateTime, Utc};

use super::{FormContext, attr, layout, text};
use crate::models::{Note, Page};

const EXCERPT_CHARS: usize = 140;

pub fn index(page: &Page<Note>) -> String {
    let mut content = String::from(
        r#"<div class="page-header">
<h1>Notes</h1>
<a class="button" href="/notes/create">New note</a>
</div>
"#,
    );

    if page.items.is_empty() {
        if page.total == 0 {
            content.push_str(r#"<p class="empty">No notes yet.</p>"#);
        } else {
            content.push_str(r#"<p class="empty">No notes on this page.</p>"#);
        }
        content.push('\n');
    } else {
        content.push_str("<ul class=\"note-list\">\n");
        for note in &page.items {
            content.push_str(&format!(
                r#"<li>
<a href="/notes/{id}">{title}</a>
<time datetime="{iso}">{created}</time>
<p>{excerpt}</p>
</li>
"#,
                id = note.id,
                title = text(&note.title),
                iso = note.created_at.to_rfc3339(),
                created = timestamp(&note.created_at),
                excerpt = text(&excerpt(&note.body)),
            ));
        }
        content.push_str("</ul>\n");
    }

    content.push_str(&pagination(page));
    layout("Notes", &content)
}

pub fn create_form(form: &FormContext) -> String {
    let content = format!(
        r#"<h1>New note</h1>
<form method="post" action="/notes">
{fields}<button type="submit">Save</button>
<a href="/notes">Cancel</a>
</form>
"#,
        fields = form.render_fields(),
    );
    layout("New note", &content)
}

pub fn show(note: &Note) -> String {
    let owner = match note.user_id {
        Some(user_id) => format!("<dt>Owner</dt><dd>User {}</dd>\n", user_id),
        None => String::new(),
    };

    let content = format!(
        r#"<article class="note">
<h1>{title}</h1>
<div class="note-body">{body}</div>
<dl class="note-meta">
{owner}<dt>Created</dt><dd>{created}</dd>
<dt>Updated</dt><dd>{updated}</dd>
</dl>
</article>
<nav class="actions">
<a href="/notes">Back to notes</a>
<a class="button" href="/notes/{id}/edit">Edit</a>
<form method="post" action="/notes/{id}" class="inline">
<input type="hidden" name="_method" value="DELETE">
<button type="submit" class="danger">Delete</button>
</form>
</nav>
"#,
        id = note.id,
        title = text(&note.title),
        body = text(&note.body),
        owner = owner,
        created = timestamp(&note.created_at),
        updated = timestamp(&note.updated_at),
    );
    layout(&note.title, &content)
}

pub fn edit_form(id: i64, form: &FormContext) -> String {
    let content = format!(
        r#"<h1>Edit note</h1>
<form method="post" action="/notes/{id}">
<input type="hidden" name="_method" value="PUT">
{fields}<button type="submit">Update</button>
<a href="/notes/{id}">Cancel</a>
</form>
"#,
        id = id,
        fields = form.render_fields(),
    );
    layout("Edit note", &content)
}

/// Confirmation shown after a note has been removed
pub fn deleted(note: &Note) -> String {
    let content = format!(
        r#"<h1>Note deleted</h1>
<p>“{title}” has been permanently deleted.</p>
<a class="button" href="/notes">Back to notes</a>
"#,
        title = text(&note.title),
    );
    layout("Note deleted", &content)
}

fn pagination(page: &Page<Note>) -> String {
    let last = page.last_page();
    if last <= 1 && page.page <= 1 {
        return String::new();
    }

    let previous = if page.has_previous() {
        format!(r#"<a rel="prev" href="{}">Previous</a>"#, attr(&page_href(page.page - 1)))
    } else {
        r#"<span class="disabled">Previous</span>"#.to_string()
    };
    let next = if page.has_next() {
        format!(r#"<a rel="next" href="{}">Next</a>"#, attr(&page_href(page.page + 1)))
    } else {
        r#"<span class="disabled">Next</span>"#.to_string()
    };

    format!(
        "<nav class=\"pagination\">{} <span>Page {} of {}</span> {}</nav>\n",
        previous, page.page, last, next
    )
}

fn page_href(page: u32) -> String {
    format!("/notes?page={}", page)
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn excerpt(body: &str) -> String {
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{}…", head.trim_end())
    } else {
        head
    }
}
