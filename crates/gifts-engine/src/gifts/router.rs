use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

use super::bank::{question_bank, tiebreak_items, Gift, QuestionItem, TiebreakItem};
use super::domain::{AssessmentSubmission, TiebreakSubmission, UserId};
use super::engine::EngineError;
use super::repository::AttemptRepository;
use super::service::{GiftAssessmentService, GiftServiceError, SubmissionOutcome};

/// Router builder exposing the questionnaire, scoring, and profile endpoints.
pub fn gifts_router<R>(service: Arc<GiftAssessmentService<R>>) -> Router
where
    R: AttemptRepository + 'static,
{
    Router::new()
        .route("/api/v1/gifts/questions", get(questions_handler))
        .route(
            "/api/v1/gifts/users/:user_id/assessments",
            post(submit_handler::<R>).delete(clear_handler::<R>),
        )
        .route(
            "/api/v1/gifts/users/:user_id/tiebreak",
            post(tiebreak_handler::<R>),
        )
        .route(
            "/api/v1/gifts/users/:user_id/profile",
            get(profile_handler::<R>),
        )
        .route(
            "/api/v1/gifts/users/:user_id/report",
            get(report_handler::<R>),
        )
        .with_state(service)
}

/// Question bank payload for the presentation layer.
#[derive(Debug, Serialize)]
pub struct QuestionnaireView {
    pub questions: Vec<QuestionItem>,
    pub tiebreak: BTreeMap<Gift, Vec<TiebreakItem>>,
}

impl QuestionnaireView {
    pub fn build() -> Self {
        Self {
            questions: question_bank().collect(),
            tiebreak: Gift::ALL
                .iter()
                .map(|&gift| (gift, tiebreak_items(gift).collect()))
                .collect(),
        }
    }
}

pub(crate) async fn questions_handler() -> Json<QuestionnaireView> {
    Json(QuestionnaireView::build())
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<GiftAssessmentService<R>>>,
    Path(user_id): Path<String>,
    Json(submission): Json<AssessmentSubmission>,
) -> Response
where
    R: AttemptRepository + 'static,
{
    let user_id = UserId(user_id);
    match service.submit(&user_id, submission) {
        Ok(outcome @ SubmissionOutcome::Completed(_)) => {
            (StatusCode::CREATED, Json(outcome)).into_response()
        }
        Ok(outcome @ SubmissionOutcome::TiebreakRequired(_)) => {
            (StatusCode::ACCEPTED, Json(outcome)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn tiebreak_handler<R>(
    State(service): State<Arc<GiftAssessmentService<R>>>,
    Path(user_id): Path<String>,
    Json(submission): Json<TiebreakSubmission>,
) -> Response
where
    R: AttemptRepository + 'static,
{
    let user_id = UserId(user_id);
    match service.resolve_tiebreak(&user_id, &submission) {
        Ok(attempt) => (StatusCode::CREATED, Json(attempt)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn profile_handler<R>(
    State(service): State<Arc<GiftAssessmentService<R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: AttemptRepository + 'static,
{
    let user_id = UserId(user_id);
    match service.profile(&user_id) {
        Ok(Some(view)) => (StatusCode::OK, Json(view)).into_response(),
        Ok(None) => not_found(&user_id),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn report_handler<R>(
    State(service): State<Arc<GiftAssessmentService<R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: AttemptRepository + 'static,
{
    let user_id = UserId(user_id);
    match service.profile(&user_id) {
        Ok(Some(view)) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            view.render_text(&user_id.0),
        )
            .into_response(),
        Ok(None) => not_found(&user_id),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn clear_handler<R>(
    State(service): State<Arc<GiftAssessmentService<R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: AttemptRepository + 'static,
{
    let user_id = UserId(user_id);
    match service.clear(&user_id) {
        Ok(deleted) => (StatusCode::OK, Json(json!({ "deleted": deleted }))).into_response(),
        Err(err) => error_response(err),
    }
}

fn not_found(user_id: &UserId) -> Response {
    let payload = json!({
        "error": format!("no gift assessment recorded for user {user_id}"),
    });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}

pub(crate) fn error_response(err: GiftServiceError) -> Response {
    let status = match &err {
        GiftServiceError::Engine(EngineError::InvalidInput(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        GiftServiceError::Engine(EngineError::Precondition(_))
        | GiftServiceError::NoPendingTiebreak(_) => StatusCode::CONFLICT,
        GiftServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": err.to_string(),
    });
    (status, Json(payload)).into_response()
}
