use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::connector::api::Container;
use crate::{DomainError, LegalDomain, Message, SessionId, SubmitOutcome};

use super::page::{render_page, PageView};

/// Application state shared across routes
#[derive(Clone)]
pub struct AppState {
    pub container: Arc<Container>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Page routes
        .route("/", get(new_session))
        .route("/session/{id}", get(show_session))
        .route("/session/{id}/ask", post(ask))
        .route("/session/{id}/end", post(end_session))
        // JSON API
        .route("/api/domains", get(list_domains))
        .route("/api/sessions", post(create_session))
        .route(
            "/api/sessions/{id}",
            get(get_session).delete(delete_session),
        )
        .route(
            "/api/sessions/{id}/messages",
            get(list_messages).post(post_message),
        )
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
pub struct DomainQuery {
    pub domain: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AskForm {
    #[serde(default)]
    pub question: String,
    pub domain: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
    pub domain: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DomainInfo {
    pub slug: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    #[serde(flatten)]
    pub outcome: SubmitOutcome,
    pub messages: Vec<Message>,
}

fn parse_domain(raw: Option<&str>) -> Result<LegalDomain, AppError> {
    match raw {
        None => Ok(LegalDomain::AllLaws),
        Some(s) if s.trim().is_empty() => Ok(LegalDomain::AllLaws),
        Some(s) => s.parse::<LegalDomain>().map_err(AppError::BadRequest),
    }
}

fn session_url(id: SessionId, domain: LegalDomain) -> String {
    if domain.is_all() {
        format!("/session/{}", id)
    } else {
        format!("/session/{}?domain={}", id, domain.slug())
    }
}

/// GET / - Start a session and send the browser to it
async fn new_session(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let id = state.container.session_use_case().start().await?;
    Ok(Redirect::to(&session_url(id, LegalDomain::AllLaws)))
}

/// GET /session/{id} - Render the chat page
async fn show_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    Query(query): Query<DomainQuery>,
) -> Result<Html<String>, AppError> {
    let domain = parse_domain(query.domain.as_deref())?;
    let session = state.container.session_use_case().snapshot(id).await?;

    Ok(Html(render_page(&PageView {
        session: &session,
        domain,
        model_name: state.container.model_name(),
        error: None,
    })))
}

/// POST /session/{id}/ask - Submit the question, then re-render via redirect
async fn ask(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    Form(form): Form<AskForm>,
) -> Result<Response, AppError> {
    let domain = parse_domain(form.domain.as_deref())?;

    match state
        .container
        .submit_use_case()
        .execute(id, &form.question, domain)
        .await
    {
        Ok(_) => Ok(Redirect::to(&session_url(id, domain)).into_response()),
        Err(e) if e.is_external() => {
            warn!("Session {}: {}", id, e);
            // Show the page as it now stands: the question is in the history
            // and still in the input box.
            let session = state.container.session_use_case().snapshot(id).await?;
            let message = e.to_string();
            let html = render_page(&PageView {
                session: &session,
                domain,
                model_name: state.container.model_name(),
                error: Some(&message),
            });
            Ok((StatusCode::BAD_GATEWAY, Html(html)).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /session/{id}/end - Drop the session and start over
async fn end_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Redirect, AppError> {
    state.container.session_use_case().end(id).await?;
    Ok(Redirect::to("/"))
}

/// GET /api/domains - List domain filters
async fn list_domains() -> Json<Vec<DomainInfo>> {
    Json(
        LegalDomain::ALL
            .iter()
            .map(|d| DomainInfo {
                slug: d.slug(),
                label: d.label(),
            })
            .collect(),
    )
}

/// POST /api/sessions - Create a session
async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let id = state.container.session_use_case().start().await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "session_id": id,
            "messages_url": format!("/api/sessions/{}/messages", id),
        })),
    ))
}

/// GET /api/sessions/{id} - Session details
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<serde_json::Value>, AppError> {
    let session = state.container.session_use_case().snapshot(id).await?;
    Ok(Json(serde_json::json!({
        "session_id": session.id(),
        "created_at": session.created_at(),
        "updated_at": session.updated_at(),
        "message_count": session.len(),
        "draft": session.draft(),
    })))
}

/// DELETE /api/sessions/{id} - End a session
async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<StatusCode, AppError> {
    state.container.session_use_case().end(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/sessions/{id}/messages - Transcript in chronological order
async fn list_messages(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<Vec<Message>>, AppError> {
    Ok(Json(state.container.session_use_case().transcript(id).await?))
}

/// POST /api/sessions/{id}/messages - Submit a question
async fn post_message(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let domain = parse_domain(request.domain.as_deref())?;
    let outcome = state
        .container
        .submit_use_case()
        .execute(id, &request.question, domain)
        .await?;
    let messages = state.container.session_use_case().transcript(id).await?;
    Ok(Json(SubmitResponse { outcome, messages }))
}

/// GET /health
async fn health(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let sessions = state.container.session_use_case().active_count().await?;
    Ok(Json(serde_json::json!({
        "status": "ok",
        "model": state.container.model_name(),
        "sessions": sessions,
    })))
}

#[derive(Debug)]
pub enum AppError {
    Domain(DomainError),
    BadRequest(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::Domain(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Domain(err) => {
                let status = match &err {
                    DomainError::NotFound(_) => StatusCode::NOT_FOUND,
                    DomainError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                    DomainError::ExternalService(_) => StatusCode::BAD_GATEWAY,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.to_string())
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
