//! HTTP route handlers.
//!
//! Each handler is a pure mapping from (method, path, session, stored
//! documents) to (status, body, session mutations). Session mutations
//! travel back to the client as a re-signed cookie on every response that
//! changes session state. Document errors never surface as raw faults: they
//! become a flash + redirect or a 422 re-render.

use axum::{
    Form, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;

use folio_core::{DocumentError, DocumentFormat, markdown};

use crate::AppState;
use crate::session::Session;
use crate::views;

const SIGNIN_REQUIRED: &str = "You must be signed in to do that.";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/new", get(new_document_form))
        .route("/create", post(create_document))
        .route("/users/signin", get(signin_form).post(signin))
        .route("/users/signout", post(signout))
        .route("/{filename}", get(view_document).post(update_document))
        .route("/{filename}/edit", get(edit_document_form))
        .route("/{filename}/delete", post(delete_document))
        .with_state(state)
}

/// 302 redirect to the index, carrying the updated session cookie.
/// Built by hand because `axum::response::Redirect::to` answers 303.
fn redirect_to_index(session: Session, jar: SignedCookieJar) -> Response {
    (
        StatusCode::FOUND,
        session.store(jar),
        [(header::LOCATION, "/")],
    )
        .into_response()
}

/// Flash the sign-in requirement and send the client back to the index
/// without performing the requested action.
fn auth_redirect(mut session: Session, jar: SignedCookieJar) -> Response {
    session.set_message(SIGNIN_REQUIRED);
    redirect_to_index(session, jar)
}

/// Flash a message and redirect to the index.
fn flash_redirect(
    mut session: Session,
    jar: SignedCookieJar,
    message: impl Into<String>,
) -> Response {
    session.set_message(message);
    redirect_to_index(session, jar)
}

fn internal_error(err: impl std::fmt::Display) -> Response {
    tracing::error!("Request failed: {err}");
    (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong").into_response()
}

/// GET / - document list
async fn index(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    let mut session = Session::from_jar(&jar);

    let files = match state.documents.list().await {
        Ok(files) => files,
        Err(e) => return internal_error(e),
    };

    let flash = session.take_message();
    let page = views::index_page(&files, flash.as_deref(), session.username.as_deref());
    (session.store(jar), Html(page)).into_response()
}

/// GET /new - create-document form
async fn new_document_form(jar: SignedCookieJar) -> Response {
    let mut session = Session::from_jar(&jar);
    if !session.is_signed_in() {
        return auth_redirect(session, jar);
    }

    let flash = session.take_message();
    let page = views::new_page(flash.as_deref(), session.username.as_deref());
    (session.store(jar), Html(page)).into_response()
}

#[derive(Debug, Deserialize)]
struct CreateForm {
    #[serde(default)]
    filename: String,
}

/// POST /create - add a new empty document
async fn create_document(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<CreateForm>,
) -> Response {
    let session = Session::from_jar(&jar);
    if !session.is_signed_in() {
        return auth_redirect(session, jar);
    }

    let name = form.filename.trim().to_string();
    match state.documents.create_empty(&name).await {
        Ok(()) => flash_redirect(session, jar, format!("{name} has been created.")),
        Err(DocumentError::InvalidName { .. }) => {
            // Inline error on the re-rendered form; nothing is persisted to
            // the session, so the message doesn't outlive this response.
            let page = views::new_page(Some("A name is required."), session.username.as_deref());
            (
                session.store(jar),
                (StatusCode::UNPROCESSABLE_ENTITY, Html(page)),
            )
                .into_response()
        }
        Err(e) => internal_error(e),
    }
}

/// GET /{filename} - view a document
async fn view_document(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    jar: SignedCookieJar,
) -> Response {
    let mut session = Session::from_jar(&jar);

    let doc = match state.documents.read(&filename).await {
        Ok(doc) => doc,
        Err(DocumentError::NotFound { .. } | DocumentError::InvalidName { .. }) => {
            return flash_redirect(session, jar, format!("{filename} does not exist."));
        }
        Err(e) => return internal_error(e),
    };

    match doc.format {
        DocumentFormat::PlainText => {
            // Raw bytes, no layout, session untouched.
            (
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                doc.content,
            )
                .into_response()
        }
        DocumentFormat::Markdown => {
            let text = String::from_utf8_lossy(&doc.content);
            let rendered = markdown::render(&text);
            let flash = session.take_message();
            let page = views::document_page(
                &filename,
                &rendered,
                flash.as_deref(),
                session.username.as_deref(),
            );
            (session.store(jar), Html(page)).into_response()
        }
    }
}

/// GET /{filename}/edit - edit form
async fn edit_document_form(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    jar: SignedCookieJar,
) -> Response {
    let mut session = Session::from_jar(&jar);
    if !session.is_signed_in() {
        return auth_redirect(session, jar);
    }

    let doc = match state.documents.read(&filename).await {
        Ok(doc) => doc,
        Err(DocumentError::NotFound { .. } | DocumentError::InvalidName { .. }) => {
            return flash_redirect(session, jar, format!("{filename} does not exist."));
        }
        Err(e) => return internal_error(e),
    };

    let content = String::from_utf8_lossy(&doc.content).into_owned();
    let flash = session.take_message();
    let page = views::edit_page(
        &filename,
        &content,
        flash.as_deref(),
        session.username.as_deref(),
    );
    (session.store(jar), Html(page)).into_response()
}

#[derive(Debug, Deserialize)]
struct EditForm {
    #[serde(default)]
    content: String,
}

/// POST /{filename} - overwrite a document's content
async fn update_document(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    jar: SignedCookieJar,
    Form(form): Form<EditForm>,
) -> Response {
    let session = Session::from_jar(&jar);
    if !session.is_signed_in() {
        return auth_redirect(session, jar);
    }

    match state.documents.write(&filename, form.content.as_bytes()).await {
        Ok(()) => flash_redirect(session, jar, format!("{filename} has been updated.")),
        Err(DocumentError::InvalidName { .. }) => {
            flash_redirect(session, jar, format!("{filename} does not exist."))
        }
        Err(e) => internal_error(e),
    }
}

/// POST /{filename}/delete - remove a document
async fn delete_document(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    jar: SignedCookieJar,
) -> Response {
    let session = Session::from_jar(&jar);
    if !session.is_signed_in() {
        return auth_redirect(session, jar);
    }

    match state.documents.delete(&filename).await {
        Ok(()) => flash_redirect(session, jar, format!("{filename} has been deleted.")),
        Err(DocumentError::NotFound { .. } | DocumentError::InvalidName { .. }) => {
            flash_redirect(session, jar, format!("{filename} does not exist."))
        }
        Err(e) => internal_error(e),
    }
}

/// GET /users/signin - sign-in form
async fn signin_form(jar: SignedCookieJar) -> Response {
    let mut session = Session::from_jar(&jar);
    let flash = session.take_message();
    let page = views::signin_page(flash.as_deref(), "", session.username.as_deref());
    (session.store(jar), Html(page)).into_response()
}

#[derive(Debug, Deserialize)]
struct SigninForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// POST /users/signin - verify credentials
async fn signin(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<SigninForm>,
) -> Response {
    let mut session = Session::from_jar(&jar);

    // Password hashing is CPU-bound; keep it off the async workers.
    let credentials = state.credentials.clone();
    let username = form.username.clone();
    let valid = tokio::task::spawn_blocking(move || credentials.verify(&username, &form.password))
        .await
        .unwrap_or(false);

    if valid {
        session.set_username(form.username);
        flash_redirect(session, jar, "Welcome!")
    } else {
        // Username is retained in the form, the password is discarded, and
        // the error message doesn't persist past this response.
        let page = views::signin_page(
            Some("Invalid credentials"),
            &form.username,
            session.username.as_deref(),
        );
        (
            session.store(jar),
            (StatusCode::UNPROCESSABLE_ENTITY, Html(page)),
        )
            .into_response()
    }
}

/// POST /users/signout - clear the session username
async fn signout(jar: SignedCookieJar) -> Response {
    let mut session = Session::from_jar(&jar);
    session.clear_username();
    flash_redirect(session, jar, "You have been signed out.")
}
