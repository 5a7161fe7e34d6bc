//! API Models
//!
//! Request and response shapes for the HTTP surface, annotated for OpenAPI
//! generation with `utoipa`. Responses use camelCase field names, the wire
//! format the engine's clients already speak.

use chrono::{DateTime, Utc};
use learnpath_core::{
    Difficulty, FocusArea, Question, QuestionId, QuizMode, RoadmapEntry, Subtopic, Topic,
    TopicId, TopicScore, TopicStatus,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

/// A question as served to clients: the correct option index is withheld.
#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDto {
    pub id: QuestionId,
    pub topic_id: TopicId,
    pub topic: String,
    pub text: String,
    pub options: Vec<String>,
    #[schema(value_type = String, example = "easy")]
    pub difficulty: Difficulty,
}

impl From<&Question> for QuestionDto {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id,
            topic_id: question.topic_id,
            topic: question.topic.clone(),
            text: question.text.clone(),
            options: question.options.clone(),
            difficulty: question.difficulty,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionsResponse {
    pub questions: Vec<QuestionDto>,
    pub total: usize,
    pub can_skip: bool,
}

impl QuestionsResponse {
    pub fn new(questions: &[Question]) -> Self {
        Self {
            questions: questions.iter().map(QuestionDto::from).collect(),
            total: questions.len(),
            can_skip: true,
        }
    }
}

#[derive(Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAssessmentPayload {
    #[schema(value_type = String, example = "diagnostic")]
    pub mode: QuizMode,
    /// Diagnostic only: restricts the scored set to the selected topics,
    /// mirroring the set that was served.
    #[serde(default)]
    pub topic_ids: Option<Vec<TopicId>>,
    /// Chosen option index per question id.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub answers: HashMap<QuestionId, usize>,
    #[serde(default)]
    pub skipped: Vec<QuestionId>,
}

#[derive(Serialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopicScoreDto {
    pub topic_id: TopicId,
    pub topic: String,
    pub correct: u32,
    pub total: u32,
    pub skipped: u32,
    pub mastery: f64,
}

impl From<&TopicScore> for TopicScoreDto {
    fn from(ts: &TopicScore) -> Self {
        Self {
            topic_id: ts.topic_id,
            topic: ts.topic.clone(),
            correct: ts.correct,
            total: ts.total,
            skipped: ts.skipped,
            mastery: ts.mastery,
        }
    }
}

/// Scoring outcome plus what happened to it downstream. The score itself is
/// always valid even when persistence or the bulk write failed.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAssessmentResponse {
    pub overall_score: f64,
    pub answered: u32,
    pub skipped: u32,
    pub total_questions: u32,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub topic_mastery: Vec<TopicScoreDto>,
    /// Set when the attempt record was persisted.
    #[schema(value_type = Option<String>, format = Uuid)]
    pub attempt_id: Option<Uuid>,
    /// False when the attempt could not be saved; the score still stands.
    pub progress_saved: bool,
    /// The reassessment policy's decision, independent of the write outcome.
    pub mastery_achieved: bool,
    /// True once the bulk complete-all write has been applied.
    pub all_subtopics_completed: bool,
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AttemptSummary {
    #[schema(value_type = String, format = Uuid)]
    pub id: Uuid,
    #[schema(value_type = String, example = "diagnostic")]
    pub quiz_type: QuizMode,
    pub overall_score: f64,
    pub total_questions: i32,
    pub correct_count: i32,
    pub incorrect_count: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub attempts: Vec<AttemptSummary>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttemptDetail {
    #[schema(value_type = String, format = Uuid)]
    pub id: Uuid,
    #[schema(value_type = String, example = "diagnostic")]
    pub quiz_type: QuizMode,
    pub overall_score: f64,
    pub total_questions: i32,
    pub correct_count: i32,
    pub incorrect_count: i32,
    pub skipped_count: i32,
    pub topic_mastery: Vec<TopicScoreDto>,
    pub incorrect_questions: Vec<QuestionId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapEntryDto {
    pub topic_id: TopicId,
    pub name: String,
    #[schema(value_type = String, example = "in-progress")]
    pub status: TopicStatus,
    pub completed: u32,
    pub total: u32,
    pub mastery: f64,
}

impl From<&RoadmapEntry> for RoadmapEntryDto {
    fn from(entry: &RoadmapEntry) -> Self {
        Self {
            topic_id: entry.topic_id,
            name: entry.name.clone(),
            status: entry.status,
            completed: entry.completed,
            total: entry.total,
            mastery: entry.mastery,
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FocusAreaDto {
    pub topic: String,
    pub deficiency: u32,
}

impl From<&FocusArea> for FocusAreaDto {
    fn from(area: &FocusArea) -> Self {
        Self {
            topic: area.topic.clone(),
            deficiency: area.deficiency,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapResponse {
    pub topics: Vec<RoadmapEntryDto>,
    pub gaps: Vec<FocusAreaDto>,
    /// Fraction of all subtopics completed, across the whole curriculum.
    pub overall_progress: f64,
}

#[derive(Deserialize, ToSchema, Debug)]
pub struct ToggleSubtopicPayload {
    pub completed: bool,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopicProgressDto {
    pub completed: u32,
    pub total: u32,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleSubtopicResponse {
    pub subtopic_id: i64,
    pub completed: bool,
    pub topic_id: TopicId,
    pub topic_completed: bool,
    pub topic_progress: TopicProgressDto,
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubtopicDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub completed: bool,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubtopicsResponse {
    pub topic_id: TopicId,
    pub subtopics: Vec<SubtopicDto>,
    pub total: usize,
    pub completed: usize,
    pub progress: f64,
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TopicSubtopicDto {
    pub id: i64,
    pub name: String,
    pub description: String,
}

impl From<&Subtopic> for TopicSubtopicDto {
    fn from(subtopic: &Subtopic) -> Self {
        Self {
            id: subtopic.id,
            name: subtopic.name.clone(),
            description: subtopic.description.clone(),
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TopicDto {
    pub id: TopicId,
    pub name: String,
    pub description: String,
    pub order: u32,
    pub prerequisites: Vec<TopicId>,
    pub subtopics: Vec<TopicSubtopicDto>,
}

impl From<&Topic> for TopicDto {
    fn from(topic: &Topic) -> Self {
        Self {
            id: topic.id,
            name: topic.name.clone(),
            description: topic.description.clone(),
            order: topic.order,
            prerequisites: topic.prerequisites.clone(),
            subtopics: topic.subtopics.iter().map(TopicSubtopicDto::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_dto_withholds_the_correct_index() {
        let question = Question {
            id: 1,
            topic_id: 1,
            topic: "Arrays & Strings".to_string(),
            text: "What is the time complexity of array access by index?".to_string(),
            options: vec!["O(1)".into(), "O(n)".into()],
            correct_index: 0,
            difficulty: Difficulty::Easy,
        };
        let json = serde_json::to_string(&QuestionDto::from(&question)).unwrap();
        assert!(!json.contains("correct"));
        assert!(json.contains("\"difficulty\":\"easy\""));
        assert!(json.contains("\"topicId\":1"));
    }

    #[test]
    fn submit_payload_accepts_string_keyed_answers() {
        let payload: SubmitAssessmentPayload = serde_json::from_str(
            r#"{"mode": "reassess", "answers": {"3": 1, "7": 0}, "skipped": [4]}"#,
        )
        .unwrap();
        assert_eq!(payload.mode, QuizMode::Reassess);
        assert_eq!(payload.answers.get(&3), Some(&1));
        assert_eq!(payload.skipped, vec![4]);
        assert!(payload.topic_ids.is_none());
    }

    #[test]
    fn submit_payload_defaults_are_empty() {
        let payload: SubmitAssessmentPayload =
            serde_json::from_str(r#"{"mode": "diagnostic"}"#).unwrap();
        assert!(payload.answers.is_empty());
        assert!(payload.skipped.is_empty());
    }

    #[test]
    fn roadmap_entry_serializes_camel_case_with_kebab_status() {
        let entry = RoadmapEntry {
            topic_id: 2,
            name: "Linked Lists".to_string(),
            status: TopicStatus::InProgress,
            completed: 2,
            total: 6,
            mastery: 2.0 / 6.0,
        };
        let json = serde_json::to_string(&RoadmapEntryDto::from(&entry)).unwrap();
        assert!(json.contains("\"topicId\":2"));
        assert!(json.contains("\"status\":\"in-progress\""));
    }

    #[test]
    fn error_response_shape() {
        let json = serde_json::to_string(&ErrorResponse {
            message: "Topic with id '42' not found".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"message":"Topic with id '42' not found"}"#);
    }

    #[test]
    fn questions_response_counts_match() {
        let questions = vec![Question {
            id: 1,
            topic_id: 1,
            topic: "Arrays & Strings".to_string(),
            text: "q".to_string(),
            options: vec!["a".into()],
            correct_index: 0,
            difficulty: Difficulty::Medium,
        }];
        let response = QuestionsResponse::new(&questions);
        assert_eq!(response.total, 1);
        assert!(response.can_skip);
    }
}
