//! Notes resource controller: the seven conventional CRUD actions.
//!
//! Every action resolves its record explicitly at the top and answers
//! NotFound with a 404 page. Validation failures re-render the form with
//! field errors and never reach the store.

use actix_web::http::StatusCode;
use actix_web::http::header::{self, ContentType};
use actix_web::error::UrlencodedError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

use crate::AppState;
use crate::error::{NoteError, NoteResult};
use crate::models::{NOTES_PER_PAGE, Note, NoteForm};
use crate::views::{self, FormContext};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home)).service(
        web::scope("/notes")
            .app_data(web::FormConfig::default().error_handler(unreadable_form))
            .route("", web::get().to(index))
            .route("", web::post().to(store))
            .route("/create", web::get().to(create))
            .route("/{id}", web::get().to(show))
            .route("/{id}", web::put().to(update))
            .route("/{id}", web::patch().to(update))
            .route("/{id}", web::delete().to(destroy))
            .route("/{id}", web::post().to(override_method))
            .route("/{id}/edit", web::get().to(edit)),
    );
}

#[derive(Debug, Deserialize)]
struct IndexQuery {
    page: Option<String>,
}

/// Browser forms can only POST; `_method` selects the real verb
#[derive(Debug, Deserialize)]
struct MethodOverrideForm {
    #[serde(rename = "_method")]
    method: Option<String>,
    #[serde(flatten)]
    note: NoteForm,
}

async fn home() -> HttpResponse {
    redirect("/notes")
}

/// GET /notes, newest first, `?page=N`
async fn index(
    data: web::Data<AppState>,
    query: web::Query<IndexQuery>,
) -> NoteResult<HttpResponse> {
    let page = query
        .page
        .as_deref()
        .and_then(|p| p.trim().parse::<u32>().ok())
        .unwrap_or(1);

    let notes = data.notes.paginate_notes(page, NOTES_PER_PAGE)?;
    Ok(render(StatusCode::OK, views::notes::index(&notes)))
}

/// GET /notes/create
async fn create() -> HttpResponse {
    render(StatusCode::OK, views::notes::create_form(&FormContext::empty()))
}

/// POST /notes
async fn store(
    data: web::Data<AppState>,
    form: web::Form<NoteForm>,
) -> NoteResult<HttpResponse> {
    let submitted = form.into_inner();

    let input = match submitted.clone().into_input() {
        Ok(input) => input,
        Err(errors) => {
            log::debug!("[NOTES] Rejected new note: {}", errors);
            let ctx = FormContext::with_errors(submitted, &errors);
            return Ok(render(
                StatusCode::UNPROCESSABLE_ENTITY,
                views::notes::create_form(&ctx),
            ));
        }
    };

    let note = data.notes.create_note(&input)?;
    log::info!("[NOTES] Created note {}", note.id);
    Ok(redirect(&note_path(note.id)))
}

/// GET /notes/{id}
async fn show(data: web::Data<AppState>, path: web::Path<String>) -> NoteResult<HttpResponse> {
    let note = find_or_not_found(&data, &path)?;
    Ok(render(StatusCode::OK, views::notes::show(&note)))
}

/// GET /notes/{id}/edit
async fn edit(data: web::Data<AppState>, path: web::Path<String>) -> NoteResult<HttpResponse> {
    let note = find_or_not_found(&data, &path)?;
    let ctx = FormContext::with_values(NoteForm::from(&note));
    Ok(render(StatusCode::OK, views::notes::edit_form(note.id, &ctx)))
}

/// PUT/PATCH /notes/{id}
async fn update(
    data: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Form<NoteForm>,
) -> NoteResult<HttpResponse> {
    apply_update(&data, &path, form.into_inner())
}

/// DELETE /notes/{id}
async fn destroy(data: web::Data<AppState>, path: web::Path<String>) -> NoteResult<HttpResponse> {
    apply_delete(&data, &path)
}

/// POST /notes/{id} with `_method=PUT|PATCH|DELETE`
async fn override_method(
    data: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Form<MethodOverrideForm>,
) -> NoteResult<HttpResponse> {
    let MethodOverrideForm { method, note } = form.into_inner();
    let method = method.unwrap_or_default().trim().to_ascii_uppercase();

    match method.as_str() {
        "PUT" | "PATCH" => apply_update(&data, &path, note),
        "DELETE" => apply_delete(&data, &path),
        _ => {
            let shown = if method.is_empty() { "POST" } else { method.as_str() };
            Ok(HttpResponse::MethodNotAllowed()
                .insert_header((header::ALLOW, "GET, PUT, PATCH, DELETE"))
                .content_type(ContentType::html())
                .body(views::errors::method_not_allowed(shown)))
        }
    }
}

fn apply_update(data: &AppState, raw_id: &str, submitted: NoteForm) -> NoteResult<HttpResponse> {
    let existing = find_or_not_found(data, raw_id)?;

    let input = match submitted.clone().into_input() {
        Ok(input) => input,
        Err(errors) => {
            log::debug!("[NOTES] Rejected update of note {}: {}", existing.id, errors);
            let ctx = FormContext::with_errors(submitted, &errors);
            return Ok(render(
                StatusCode::UNPROCESSABLE_ENTITY,
                views::notes::edit_form(existing.id, &ctx),
            ));
        }
    };

    let note = data
        .notes
        .update_note(existing.id, &input)?
        .ok_or_else(|| NoteError::not_found(existing.id))?;
    log::info!("[NOTES] Updated note {}", note.id);
    Ok(redirect(&note_path(note.id)))
}

fn apply_delete(data: &AppState, raw_id: &str) -> NoteResult<HttpResponse> {
    let note = find_or_not_found(data, raw_id)?;

    if !data.notes.delete_note(note.id)? {
        return Err(NoteError::not_found(note.id));
    }
    log::info!("[NOTES] Deleted note {}", note.id);
    Ok(render(StatusCode::OK, views::notes::deleted(&note)))
}

/// Non-numeric ids cannot name a record, so they are NotFound too
fn find_or_not_found(data: &AppState, raw_id: &str) -> NoteResult<Note> {
    let id = raw_id
        .trim()
        .parse::<i64>()
        .map_err(|_| NoteError::not_found(raw_id))?;

    data.notes.find_note(id)?.ok_or_else(|| NoteError::not_found(id))
}

/// A body the form extractor cannot decode is a validation failure too
fn unreadable_form(err: UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    log::debug!("[NOTES] Unreadable form on {} {}: {}", req.method(), req.path(), err);

    let mut error = ValidationError::new("unreadable_form");
    error.message = Some(Cow::Owned(format!("The submitted form could not be read: {}", err)));
    let mut errors = ValidationErrors::new();
    errors.add("form", error);

    NoteError::Validation(errors).into()
}

fn note_path(id: i64) -> String {
    format!("/notes/{}", id)
}

fn render(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body)
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::{MemoryNoteRepository, NoteRepository};
    use crate::models::NoteInput;
    use actix_web::dev::ServiceResponse;
    use actix_web::{App, test};
    use std::sync::Arc;

    fn state(repo: Arc<MemoryNoteRepository>) -> web::Data<AppState> {
        web::Data::new(AppState::new(repo, Config::default()))
    }

    macro_rules! app {
        ($repo:expr) => {
            test::init_service(App::new().app_data(state($repo)).configure(config)).await
        };
    }

    fn seed(repo: &MemoryNoteRepository, title: &str, body: &str) -> Note {
        repo.create_note(&NoteInput {
            title: title.to_string(),
            body: body.to_string(),
            user_id: None,
        })
        .unwrap()
    }

    fn location(resp: &ServiceResponse) -> String {
        resp.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    async fn body_text(resp: ServiceResponse) -> String {
        String::from_utf8(test::read_body(resp).await.to_vec()).unwrap()
    }

    #[actix_web::test]
    async fn test_store_then_show_round_trips() {
        let repo = Arc::new(MemoryNoteRepository::new());
        let app = app!(repo.clone());

        let req = test::TestRequest::post()
            .uri("/notes")
            .set_form(NoteForm::new("A", "B", None))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/notes/1");

        let stored = repo.find_note(1).unwrap().unwrap();
        assert_eq!((stored.title.as_str(), stored.body.as_str()), ("A", "B"));

        let resp = test::call_service(&app, test::TestRequest::get().uri("/notes/1").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_text(resp).await;
        assert!(html.contains("<h1>A</h1>"));
        assert!(html.contains(">B</div>"));
    }

    #[actix_web::test]
    async fn test_store_rejects_invalid_input_without_persisting() {
        let repo = Arc::new(MemoryNoteRepository::new());
        let app = app!(repo.clone());

        let req = test::TestRequest::post()
            .uri("/notes")
            .set_form(NoteForm::new("  ", "kept body", None))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let html = body_text(resp).await;
        assert!(html.contains("Title is required"));
        assert!(html.contains("kept body</textarea>"));
        assert_eq!(repo.count_notes().unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_undecodable_forms_render_an_error_page() {
        let repo = Arc::new(MemoryNoteRepository::new());
        let note = seed(&repo, "A", "B");
        let app = app!(repo.clone());

        let req = test::TestRequest::post()
            .uri("/notes")
            .insert_header(ContentType::form_url_encoded())
            .set_payload("title=A&body=B&content=C")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
        let html = body_text(resp).await;
        assert!(html.contains("<h1>Invalid input</h1>"));
        assert!(html.contains("duplicate field"));

        let req = test::TestRequest::put()
            .uri(&format!("/notes/{}", note.id))
            .insert_header(ContentType::json())
            .set_payload(r#"{"title":"X","body":"Y"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_text(resp).await.contains("could not be read"));

        assert_eq!(repo.count_notes().unwrap(), 1);
        assert_eq!(repo.find_note(note.id).unwrap().unwrap(), note);
    }

    #[actix_web::test]
    async fn test_missing_note_is_not_found() {
        let app = app!(Arc::new(MemoryNoteRepository::new()));

        for req in [
            test::TestRequest::get().uri("/notes/99").to_request(),
            test::TestRequest::get().uri("/notes/99/edit").to_request(),
            test::TestRequest::delete().uri("/notes/99").to_request(),
            test::TestRequest::get().uri("/notes/not-a-number").to_request(),
        ] {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
            assert!(body_text(resp).await.contains("does not exist"));
        }
    }

    #[actix_web::test]
    async fn test_update_missing_note_is_not_found() {
        let app = app!(Arc::new(MemoryNoteRepository::new()));
        let req = test::TestRequest::put()
            .uri("/notes/5")
            .set_form(NoteForm::new("t", "b", None))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_index_pages_newest_first() {
        let repo = Arc::new(MemoryNoteRepository::new());
        for i in 1..=12 {
            seed(&repo, &format!("Note {}", i), "body");
        }
        let app = app!(repo);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/notes").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_text(resp).await;
        assert_eq!(html.matches("<li>").count(), 10);
        assert!(html.find(">Note 12<").unwrap() < html.find(">Note 3<").unwrap());
        assert!(!html.contains(">Note 2<"));
        assert!(html.contains("Page 1 of 2"));

        let req = test::TestRequest::get().uri("/notes?page=2").to_request();
        let html = body_text(test::call_service(&app, req).await).await;
        assert_eq!(html.matches("<li>").count(), 2);
        assert!(html.contains(">Note 2<"));
        assert!(html.contains(">Note 1<"));

        // unparsable page numbers fall back to the first page
        let req = test::TestRequest::get().uri("/notes?page=abc").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains("Page 1 of 2"));
    }

    #[actix_web::test]
    async fn test_edit_form_is_prefilled() {
        let repo = Arc::new(MemoryNoteRepository::new());
        let note = seed(&repo, "Trip plan", "Pack bags");
        let app = app!(repo);

        let req = test::TestRequest::get()
            .uri(&format!("/notes/{}/edit", note.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_text(resp).await;
        assert!(html.contains(r#"value="Trip plan""#));
        assert!(html.contains("Pack bags</textarea>"));
    }

    #[actix_web::test]
    async fn test_update_twice_is_idempotent() {
        let repo = Arc::new(MemoryNoteRepository::new());
        let note = seed(&repo, "Old", "old body");
        let app = app!(repo.clone());

        let mut snapshots = Vec::new();
        for _ in 0..2 {
            let req = test::TestRequest::patch()
                .uri(&format!("/notes/{}", note.id))
                .set_form(NoteForm::new("New", "new body", Some(2)))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER);
            assert_eq!(location(&resp), format!("/notes/{}", note.id));
            snapshots.push(repo.find_note(note.id).unwrap().unwrap());
        }

        assert_eq!(snapshots[0], snapshots[1]);
        assert_eq!(snapshots[1].title, "New");
        assert_eq!(snapshots[1].user_id, Some(2));
    }

    #[actix_web::test]
    async fn test_invalid_update_blocks_the_write() {
        let repo = Arc::new(MemoryNoteRepository::new());
        let note = seed(&repo, "Keep", "me");
        let app = app!(repo.clone());

        let req = test::TestRequest::put()
            .uri(&format!("/notes/{}", note.id))
            .set_form(NoteForm::new("Changed", "", None))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_text(resp).await.contains("field-error"));
        assert_eq!(repo.find_note(note.id).unwrap().unwrap(), note);
    }

    #[actix_web::test]
    async fn test_delete_then_show_is_not_found() {
        let repo = Arc::new(MemoryNoteRepository::new());
        let note = seed(&repo, "A", "B");
        let app = app!(repo.clone());

        let req = test::TestRequest::delete()
            .uri(&format!("/notes/{}", note.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains("has been permanently deleted"));

        let req = test::TestRequest::get()
            .uri(&format!("/notes/{}", note.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(repo.count_notes().unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_method_override_from_html_forms() {
        let repo = Arc::new(MemoryNoteRepository::new());
        let note = seed(&repo, "A", "B");
        let app = app!(repo.clone());

        let req = test::TestRequest::post()
            .uri(&format!("/notes/{}", note.id))
            .insert_header(ContentType::form_url_encoded())
            .set_payload("_method=PUT&title=Renamed&body=B&user_id=")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(repo.find_note(note.id).unwrap().unwrap().title, "Renamed");

        let req = test::TestRequest::post()
            .uri(&format!("/notes/{}", note.id))
            .insert_header(ContentType::form_url_encoded())
            .set_payload("_method=bogus")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

        let req = test::TestRequest::post()
            .uri(&format!("/notes/{}", note.id))
            .insert_header(ContentType::form_url_encoded())
            .set_payload("_method=delete")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(repo.find_note(note.id).unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_create_form_and_home_redirect() {
        let app = app!(Arc::new(MemoryNoteRepository::new()));

        let resp = test::call_service(&app, test::TestRequest::get().uri("/notes/create").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_text(resp).await;
        assert!(html.contains(r#"action="/notes""#));
        assert!(!html.contains("form-alert"));

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/notes");
    }
}
