//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the REST API and OpenAPI documentation.

use crate::{
    handlers,
    models::{
        AttemptDetail, AttemptSummary, ErrorResponse, FocusAreaDto, HistoryResponse, QuestionDto,
        QuestionsResponse, RoadmapEntryDto, RoadmapResponse, SubmitAssessmentPayload,
        SubmitAssessmentResponse, SubtopicDto, SubtopicsResponse, ToggleSubtopicPayload,
        ToggleSubtopicResponse, TopicDto, TopicProgressDto, TopicScoreDto, TopicSubtopicDto,
    },
    state::AppState,
};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::get_diagnostic,
        handlers::get_reassess,
        handlers::submit_assessment,
        handlers::get_history,
        handlers::get_attempt,
        handlers::get_roadmap,
        handlers::get_subtopics,
        handlers::toggle_subtopic,
        handlers::get_topics,
        handlers::get_topic,
    ),
    components(
        schemas(
            QuestionDto,
            QuestionsResponse,
            SubmitAssessmentPayload,
            SubmitAssessmentResponse,
            TopicScoreDto,
            AttemptSummary,
            AttemptDetail,
            HistoryResponse,
            RoadmapEntryDto,
            FocusAreaDto,
            RoadmapResponse,
            SubtopicDto,
            SubtopicsResponse,
            ToggleSubtopicPayload,
            ToggleSubtopicResponse,
            TopicProgressDto,
            TopicDto,
            TopicSubtopicDto,
            ErrorResponse
        )
    ),
    tags(
        (name = "LearnPath API", description = "Assessment scoring and adaptive roadmap engine")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Group all routes that require AppState into their own router.
    let api_router = Router::new()
        .route("/assessment/diagnostic", get(handlers::get_diagnostic))
        .route("/assessment/reassess", get(handlers::get_reassess))
        .route("/assessment/submit", post(handlers::submit_assessment))
        .route("/assessment/history", get(handlers::get_history))
        .route("/assessment/history/{id}", get(handlers::get_attempt))
        .route("/roadmap", get(handlers::get_roadmap))
        .route("/subtopics/{topic_id}", get(handlers::get_subtopics))
        .route(
            "/subtopics/{subtopic_id}/complete",
            post(handlers::toggle_subtopic),
        )
        .route("/topics", get(handlers::get_topics))
        .route("/topics/{id}", get(handlers::get_topic))
        // Apply the state ONLY to this group of routes.
        .with_state(app_state);

    // Create the final router that merges the stateful routes
    // with the stateless routes (like Swagger UI).
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}
