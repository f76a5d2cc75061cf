//! HTTP routes for the wiki.
//!
//! Handlers extract request data, run the matching [`Wiki`] operation on the
//! blocking pool (store calls touch the filesystem), and turn the outcome
//! into a page or a redirect.

use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use thiserror::Error;
use tokio::task::JoinError;
use tower_http::trace::TraceLayer;

use encyclopedia_core::urls::entry_url;
use encyclopedia_core::wiki::conflict_message;
use encyclopedia_core::{
    CreateResult, EditForm, EditResult, EditView, EntryView, NewPageForm, SearchOutcome, Wiki,
    WikiError,
};
use encyclopedia_render::{
    EditTemplate, EntryNotFoundTemplate, EntryTemplate, ErrorTemplate, IndexTemplate,
    NewPageTemplate,
};

#[derive(Clone)]
pub struct AppState {
    pub wiki: Wiki,
    pub site_title: Arc<str>,
}

impl AppState {
    pub fn new(wiki: Wiki, site_title: &str) -> Self {
        Self {
            wiki,
            site_title: Arc::from(site_title),
        }
    }

    /// Run a wiki operation off the async executor.
    async fn run<T, F>(&self, op: F) -> Result<T, AppError>
    where
        F: FnOnce(&Wiki) -> Result<T, WikiError> + Send + 'static,
        T: Send + 'static,
    {
        let wiki = self.wiki.clone();
        let outcome = tokio::task::spawn_blocking(move || op(&wiki))
            .await
            .map_err(|e| self.fail(e))?;
        outcome.map_err(|e| self.fail(e))
    }

    fn page<T: Template>(&self, status: StatusCode, template: T) -> Result<Response, AppError> {
        let html = template.render().map_err(|e| self.fail(e))?;
        Ok((status, Html(html)).into_response())
    }

    fn not_found(&self, title: &str) -> Result<Response, AppError> {
        self.page(
            StatusCode::NOT_FOUND,
            EntryNotFoundTemplate::new(&self.site_title, title),
        )
    }

    fn fail(&self, failure: impl Into<Failure>) -> AppError {
        AppError {
            site_title: self.site_title.clone(),
            failure: failure.into(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/wiki/{title}/", get(view_entry))
        .route("/newpage/", get(new_page_form).post(create_entry))
        .route("/{title}/edit/", get(edit_form).post(update_entry))
        .route("/search/", get(search))
        .route("/random/", get(random_entry))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn redirect_to_entry(title: &str) -> Response {
    Redirect::to(&entry_url(title)).into_response()
}

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

async fn index(State(state): State<AppState>) -> Result<Response, AppError> {
    let titles = state.run(|wiki| wiki.index()).await?;
    state.page(
        StatusCode::OK,
        IndexTemplate::all_pages(&state.site_title, &titles),
    )
}

async fn view_entry(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Response, AppError> {
    match state.run(move |wiki| wiki.view(&title)).await? {
        EntryView::Found { title, html } => state.page(
            StatusCode::OK,
            EntryTemplate::new(&state.site_title, &title, html),
        ),
        EntryView::NotFound { title } => state.not_found(&title),
    }
}

async fn new_page_form(State(state): State<AppState>) -> Result<Response, AppError> {
    state.page(StatusCode::OK, NewPageTemplate::empty(&state.site_title))
}

async fn create_entry(
    State(state): State<AppState>,
    Form(form): Form<NewPageForm>,
) -> Result<Response, AppError> {
    match state.run(move |wiki| wiki.new_page(form)).await? {
        CreateResult::Created { title } => Ok(redirect_to_entry(&title)),
        CreateResult::Invalid { form, errors } => state.page(
            StatusCode::OK,
            NewPageTemplate::from_form(&state.site_title, &form, Some(&errors), None),
        ),
        CreateResult::Conflict { form, title } => state.page(
            StatusCode::CONFLICT,
            NewPageTemplate::from_form(
                &state.site_title,
                &form,
                None,
                Some(conflict_message(&title)),
            ),
        ),
    }
}

async fn edit_form(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Response, AppError> {
    match state.run(move |wiki| wiki.edit_form(&title)).await? {
        EditView::Editing { title, form } => state.page(
            StatusCode::OK,
            EditTemplate::from_form(&state.site_title, &title, &form, None),
        ),
        EditView::NotFound { title } => state.not_found(&title),
    }
}

async fn update_entry(
    State(state): State<AppState>,
    Path(title): Path<String>,
    Form(form): Form<EditForm>,
) -> Result<Response, AppError> {
    let target = title.clone();
    match state.run(move |wiki| wiki.save_edit(&target, form)).await? {
        EditResult::Saved { title } => Ok(redirect_to_entry(&title)),
        EditResult::Invalid { form, errors } => state.page(
            StatusCode::OK,
            EditTemplate::from_form(&state.site_title, &title, &form, Some(&errors)),
        ),
        EditResult::NotFound { title } => state.not_found(&title),
    }
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, AppError> {
    match state.run(move |wiki| wiki.search(&params.q)).await? {
        SearchOutcome::Exact(title) => Ok(redirect_to_entry(&title)),
        SearchOutcome::Results { query, titles } => state.page(
            StatusCode::OK,
            IndexTemplate::search_results(&state.site_title, &query, &titles),
        ),
    }
}

async fn random_entry(State(state): State<AppState>) -> Result<Response, AppError> {
    let title = state.run(|wiki| wiki.random_title()).await?;
    Ok(redirect_to_entry(&title))
}

#[derive(Debug, Error)]
pub enum Failure {
    #[error(transparent)]
    Wiki(#[from] WikiError),

    #[error("background task failed: {0}")]
    Task(#[from] JoinError),

    #[error("failed to render page: {0}")]
    Render(#[from] askama::Error),
}

/// A request that could not be served, rendered as an error page.
#[derive(Debug)]
pub struct AppError {
    site_title: Arc<str>,
    failure: Failure,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, heading) = match &self.failure {
            Failure::Wiki(WikiError::EmptyStore) => (StatusCode::NOT_FOUND, "No entries"),
            Failure::Wiki(WikiError::Storage(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Storage error")
            }
            Failure::Task(_) | Failure::Render(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
            }
        };
        let message = self.failure.to_string();
        if status.is_server_error() {
            tracing::error!(error = %message, "request failed");
        }

        match ErrorTemplate::new(&self.site_title, heading, message.clone()).render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(_) => (status, message).into_response(),
        }
    }
}
