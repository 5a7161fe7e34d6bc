//! Question bank types and quiz submissions.
//!
//! Question content is opaque to the engine: text and options are carried
//! for display, only `correct_index` participates in scoring.

use crate::curriculum::TopicId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Identifier of a question in the bank.
pub type QuestionId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A multiple-choice question supplied by the question bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub topic_id: TopicId,
    /// Display label of the topic. Never used as a grouping key; grouping
    /// is always by `topic_id`.
    pub topic: String,
    pub text: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub difficulty: Difficulty,
}

/// One quiz attempt as submitted by a client.
///
/// A question may appear in both `answers` and `skipped` if the client let
/// the user change their mind; the skip flag wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentSubmission {
    pub answers: HashMap<QuestionId, usize>,
    #[serde(default)]
    pub skipped: HashSet<QuestionId>,
}

/// Which kind of quiz an attempt belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizMode {
    /// Initial assessment used to seed a learner's roadmap.
    Diagnostic,
    /// Later quiz that validates mastery claims and may bulk-advance
    /// progress.
    Reassess,
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizMode::Diagnostic => write!(f, "diagnostic"),
            QuizMode::Reassess => write!(f, "reassess"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_mode_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&QuizMode::Diagnostic).unwrap(),
            "\"diagnostic\""
        );
        assert_eq!(
            serde_json::to_string(&QuizMode::Reassess).unwrap(),
            "\"reassess\""
        );
        let mode: QuizMode = serde_json::from_str("\"reassess\"").unwrap();
        assert_eq!(mode, QuizMode::Reassess);
    }

    #[test]
    fn quiz_mode_display_matches_wire_format() {
        assert_eq!(QuizMode::Diagnostic.to_string(), "diagnostic");
        assert_eq!(QuizMode::Reassess.to_string(), "reassess");
    }

    #[test]
    fn submission_skipped_defaults_to_empty() {
        let submission: AssessmentSubmission =
            serde_json::from_str(r#"{"answers": {"1": 2}}"#).unwrap();
        assert_eq!(submission.answers.get(&1), Some(&2));
        assert!(submission.skipped.is_empty());
    }

    #[test]
    fn difficulty_round_trips() {
        let question = Question {
            id: 7,
            topic_id: 2,
            topic: "Linked Lists".to_string(),
            text: "Which algorithm detects a cycle in O(1) space?".to_string(),
            options: vec!["Hash Set".into(), "Floyd's Cycle Detection".into()],
            correct_index: 1,
            difficulty: Difficulty::Medium,
        };
        let json = serde_json::to_string(&question).unwrap();
        assert!(json.contains("\"medium\""));
        let back: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(back.difficulty, Difficulty::Medium);
        assert_eq!(back.correct_index, 1);
    }
}
