//! Axum Handlers for the REST API
//!
//! This module contains the logic for handling assessment, roadmap, and
//! curriculum requests. It uses `utoipa` doc comments to generate OpenAPI
//! documentation.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use learnpath_core::{
    AssessmentSubmission, QuizMode, TopicId, TopicScore, recompute_statuses, score,
    select_focus_areas,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, warn};
use uuid::Uuid;

use crate::{
    db::AttemptRow,
    models::{
        AttemptDetail, AttemptSummary, ErrorResponse, FocusAreaDto, HistoryResponse,
        QuestionsResponse, RoadmapEntryDto, RoadmapResponse, SubmitAssessmentPayload,
        SubmitAssessmentResponse, SubtopicDto, SubtopicsResponse, ToggleSubtopicPayload,
        ToggleSubtopicResponse, TopicDto, TopicProgressDto, TopicScoreDto,
    },
    state::AppState,
};

/// Topics with mastery below this on the latest attempt are offered for
/// reassessment.
pub const WEAK_TOPIC_THRESHOLD: f64 = 0.6;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    InternalServerError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { message })).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse { message })).into_response()
            }
            ApiError::InternalServerError(err) => {
                error!("Internal Server Error: {:?}", err);
                let message = "An internal server error occurred.".to_string();
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse { message }),
                )
                    .into_response()
            }
        }
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::InternalServerError(err.into())
    }
}

fn require_user(headers: &HeaderMap) -> Result<&str, ApiError> {
    headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::BadRequest("x-user-id header is required".to_string()))
}

/// Parses the topic mastery column of a stored attempt.
fn stored_topic_mastery(row: &AttemptRow) -> Result<Vec<TopicScore>, ApiError> {
    Ok(serde_json::from_value(row.topic_mastery.clone())?)
}

/// Topic ids the user's most recent attempt scored below the weak-topic
/// threshold. Empty when the user has no attempts yet.
async fn weak_topic_ids(state: &AppState, user_id: &str) -> Result<Vec<TopicId>, ApiError> {
    let Some(latest) = state.db.latest_attempt(user_id).await? else {
        return Ok(Vec::new());
    };
    let mastery = stored_topic_mastery(&latest)?;
    Ok(mastery
        .iter()
        .filter(|ts| ts.mastery < WEAK_TOPIC_THRESHOLD)
        .map(|ts| ts.topic_id)
        .collect())
}

fn attempt_summary(row: &AttemptRow) -> AttemptSummary {
    AttemptSummary {
        id: row.id,
        quiz_type: row.quiz_mode(),
        overall_score: row.overall_score,
        total_questions: row.total_questions,
        correct_count: row.correct_count,
        incorrect_count: row.incorrect_count,
        created_at: row.created_at,
    }
}

fn attempt_detail(row: &AttemptRow) -> Result<AttemptDetail, ApiError> {
    let topic_mastery = stored_topic_mastery(row)?;
    let incorrect_questions = serde_json::from_value(row.incorrect_questions.clone())?;
    Ok(AttemptDetail {
        id: row.id,
        quiz_type: row.quiz_mode(),
        overall_score: row.overall_score,
        total_questions: row.total_questions,
        correct_count: row.correct_count,
        incorrect_count: row.incorrect_count,
        skipped_count: row.skipped_count,
        topic_mastery: topic_mastery.iter().map(TopicScoreDto::from).collect(),
        incorrect_questions,
        created_at: row.created_at,
    })
}

#[derive(Deserialize, Debug, Default)]
pub struct DiagnosticParams {
    /// Comma-separated topic ids to restrict the quiz to.
    pub topic_ids: Option<String>,
}

fn parse_topic_ids(raw: &str) -> Result<Vec<TopicId>, ApiError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<TopicId>().map_err(|_| {
                ApiError::BadRequest(format!("'{}' is not a valid topic id", s))
            })
        })
        .collect()
}

/// Serve a diagnostic quiz, optionally restricted to selected topics.
#[utoipa::path(
    get,
    path = "/assessment/diagnostic",
    responses(
        (status = 200, description = "Diagnostic quiz questions", body = QuestionsResponse),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    params(
        ("topic_ids" = Option<String>, Query, description = "Comma-separated topic ids to restrict the quiz to")
    )
)]
pub async fn get_diagnostic(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DiagnosticParams>,
) -> Result<Json<QuestionsResponse>, ApiError> {
    let topic_ids = match params.topic_ids.as_deref() {
        Some(raw) => Some(parse_topic_ids(raw)?),
        None => None,
    };
    let questions = state
        .question_bank
        .diagnostic_questions(topic_ids.as_deref())
        .await?;
    Ok(Json(QuestionsResponse::new(&questions)))
}

/// Serve a reassessment quiz over the user's weak topics.
#[utoipa::path(
    get,
    path = "/assessment/reassess",
    responses(
        (status = 200, description = "Reassessment quiz questions", body = QuestionsResponse),
        (status = 400, description = "No weak topics to reassess", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    params(
        ("x-user-id" = String, Header, description = "The ID of the user")
    )
)]
pub async fn get_reassess(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<QuestionsResponse>, ApiError> {
    let user_id = require_user(&headers)?;
    let weak = weak_topic_ids(&state, user_id).await?;
    if weak.is_empty() {
        return Err(ApiError::BadRequest(
            "No weak topics to reassess. Take a diagnostic quiz first.".to_string(),
        ));
    }
    let questions = state.question_bank.reassess_questions(&weak).await?;
    Ok(Json(QuestionsResponse::new(&questions)))
}

/// Score a submitted quiz, persist the attempt, and apply the reassessment
/// policy.
#[utoipa::path(
    post,
    path = "/assessment/submit",
    request_body = SubmitAssessmentPayload,
    responses(
        (status = 200, description = "Scored submission", body = SubmitAssessmentResponse),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    params(
        ("x-user-id" = String, Header, description = "The ID of the user")
    )
)]
pub async fn submit_assessment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<SubmitAssessmentPayload>,
) -> Result<Json<SubmitAssessmentResponse>, ApiError> {
    let user_id = require_user(&headers)?;

    // Refetch the served question set; clients never see correct answers,
    // so scoring always happens server-side against the bank.
    let questions = match payload.mode {
        QuizMode::Diagnostic => {
            state
                .question_bank
                .diagnostic_questions(payload.topic_ids.as_deref())
                .await?
        }
        QuizMode::Reassess => {
            let weak = weak_topic_ids(&state, user_id).await?;
            if weak.is_empty() {
                return Err(ApiError::BadRequest(
                    "No weak topics to reassess. Take a diagnostic quiz first.".to_string(),
                ));
            }
            state.question_bank.reassess_questions(&weak).await?
        }
    };
    if questions.is_empty() {
        return Err(ApiError::BadRequest(
            "No questions available for the requested quiz".to_string(),
        ));
    }

    let submission = AssessmentSubmission {
        answers: payload.answers,
        skipped: payload.skipped.into_iter().collect(),
    };
    let result = score(&questions, &submission);

    let mastery_achieved = state.policy.should_bulk_complete(&result, payload.mode);
    let mut all_subtopics_completed = false;
    if mastery_achieved {
        match state
            .db
            .complete_all_subtopics(user_id, &state.curriculum.subtopic_ids())
            .await
        {
            Ok(()) => all_subtopics_completed = true,
            Err(err) => {
                warn!("Bulk subtopic completion failed for {}: {:?}", user_id, err);
            }
        }
    }

    let (attempt_id, progress_saved) =
        match state.db.save_attempt(user_id, payload.mode, &result).await {
            Ok(id) => (Some(id), true),
            Err(err) => {
                warn!("Failed to persist attempt for {}: {:?}", user_id, err);
                (None, false)
            }
        };

    Ok(Json(SubmitAssessmentResponse {
        overall_score: result.overall_score,
        answered: result.answered,
        skipped: result.skipped,
        total_questions: result.total_questions,
        correct_count: result.correct_count,
        incorrect_count: result.incorrect_count,
        topic_mastery: result.topic_mastery.iter().map(TopicScoreDto::from).collect(),
        attempt_id,
        progress_saved,
        mastery_achieved,
        all_subtopics_completed,
    }))
}

/// List the user's quiz attempts, most recent first.
#[utoipa::path(
    get,
    path = "/assessment/history",
    responses(
        (status = 200, description = "Attempt history", body = HistoryResponse),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    params(
        ("x-user-id" = String, Header, description = "The ID of the user")
    )
)]
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<HistoryResponse>, ApiError> {
    let user_id = require_user(&headers)?;
    let rows = state.db.list_attempts(user_id).await?;
    Ok(Json(HistoryResponse {
        attempts: rows.iter().map(attempt_summary).collect(),
    }))
}

/// Get one attempt with its full per-topic breakdown.
#[utoipa::path(
    get,
    path = "/assessment/history/{id}",
    responses(
        (status = 200, description = "Attempt details", body = AttemptDetail),
        (status = 404, description = "Attempt not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "Attempt ID"),
        ("x-user-id" = String, Header, description = "The ID of the user")
    )
)]
pub async fn get_attempt(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<AttemptDetail>, ApiError> {
    let user_id = require_user(&headers)?;
    let row = state
        .db
        .get_attempt(user_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Attempt with id '{}' not found", id)))?;
    Ok(Json(attempt_detail(&row)?))
}

/// The user's roadmap: every topic with its derived status, plus the
/// current focus areas.
#[utoipa::path(
    get,
    path = "/roadmap",
    responses(
        (status = 200, description = "Roadmap with statuses and focus areas", body = RoadmapResponse),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    params(
        ("x-user-id" = String, Header, description = "The ID of the user")
    )
)]
pub async fn get_roadmap(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<RoadmapResponse>, ApiError> {
    let user_id = require_user(&headers)?;
    let progress = state.db.topic_progress(user_id, &state.curriculum).await?;
    let entries = recompute_statuses(&state.curriculum, &progress);
    let gaps = select_focus_areas(&entries, state.config.focus_limit);

    let total = state.curriculum.subtopic_total();
    let done: u32 = entries.iter().map(|e| e.completed).sum();
    let overall_progress = if total == 0 {
        0.0
    } else {
        f64::from(done) / total as f64
    };

    Ok(Json(RoadmapResponse {
        topics: entries.iter().map(RoadmapEntryDto::from).collect(),
        gaps: gaps.iter().map(FocusAreaDto::from).collect(),
        overall_progress,
    }))
}

/// List a topic's subtopics with the user's completion flags.
#[utoipa::path(
    get,
    path = "/subtopics/{topic_id}",
    responses(
        (status = 200, description = "Subtopics for the topic", body = SubtopicsResponse),
        (status = 404, description = "Topic not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    params(
        ("topic_id" = i64, Path, description = "Topic ID"),
        ("x-user-id" = String, Header, description = "The ID of the user")
    )
)]
pub async fn get_subtopics(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(topic_id): Path<TopicId>,
) -> Result<Json<SubtopicsResponse>, ApiError> {
    let user_id = require_user(&headers)?;
    let topic = state
        .curriculum
        .topic(topic_id)
        .ok_or_else(|| ApiError::NotFound(format!("Topic with id '{}' not found", topic_id)))?;
    let done = state.db.completed_subtopic_ids(user_id).await?;

    let subtopics: Vec<SubtopicDto> = topic
        .subtopics
        .iter()
        .map(|s| SubtopicDto {
            id: s.id,
            name: s.name.clone(),
            description: s.description.clone(),
            completed: done.contains(&s.id),
        })
        .collect();
    let completed = subtopics.iter().filter(|s| s.completed).count();
    let total = subtopics.len();
    let progress = if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64
    };

    Ok(Json(SubtopicsResponse {
        topic_id,
        subtopics,
        total,
        completed,
        progress,
    }))
}

/// Toggle a subtopic's completion flag and report the topic's new progress.
#[utoipa::path(
    post,
    path = "/subtopics/{subtopic_id}/complete",
    request_body = ToggleSubtopicPayload,
    responses(
        (status = 200, description = "Updated completion state", body = ToggleSubtopicResponse),
        (status = 404, description = "Subtopic not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    params(
        ("subtopic_id" = i64, Path, description = "Subtopic ID"),
        ("x-user-id" = String, Header, description = "The ID of the user")
    )
)]
pub async fn toggle_subtopic(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(subtopic_id): Path<i64>,
    Json(payload): Json<ToggleSubtopicPayload>,
) -> Result<Json<ToggleSubtopicResponse>, ApiError> {
    let user_id = require_user(&headers)?;
    let topic_id = state.curriculum.topic_of_subtopic(subtopic_id).ok_or_else(|| {
        ApiError::NotFound(format!("Subtopic with id '{}' not found", subtopic_id))
    })?;

    state
        .db
        .set_subtopic_completed(user_id, subtopic_id, payload.completed)
        .await?;

    let done = state.db.completed_subtopic_ids(user_id).await?;
    // topic_of_subtopic guarantees the topic exists.
    let topic = state
        .curriculum
        .topic(topic_id)
        .ok_or_else(|| ApiError::NotFound(format!("Topic with id '{}' not found", topic_id)))?;
    let completed = topic
        .subtopics
        .iter()
        .filter(|s| done.contains(&s.id))
        .count() as u32;
    let total = topic.subtopic_count() as u32;

    Ok(Json(ToggleSubtopicResponse {
        subtopic_id,
        completed: payload.completed,
        topic_id,
        topic_completed: total > 0 && completed >= total,
        topic_progress: TopicProgressDto { completed, total },
    }))
}

/// List the full curriculum.
#[utoipa::path(
    get,
    path = "/topics",
    responses(
        (status = 200, description = "All topics in canonical order", body = [TopicDto]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_topics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TopicDto>>, ApiError> {
    Ok(Json(
        state.curriculum.topics().iter().map(TopicDto::from).collect(),
    ))
}

/// Get one topic by id.
#[utoipa::path(
    get,
    path = "/topics/{id}",
    responses(
        (status = 200, description = "Topic details", body = TopicDto),
        (status = 404, description = "Topic not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    params(
        ("id" = i64, Path, description = "Topic ID")
    )
)]
pub async fn get_topic(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TopicId>,
) -> Result<Json<TopicDto>, ApiError> {
    let topic = state
        .curriculum
        .topic(id)
        .ok_or_else(|| ApiError::NotFound(format!("Topic with id '{}' not found", id)))?;
    Ok(Json(TopicDto::from(topic)))
}
