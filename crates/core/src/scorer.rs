//! Quiz Scorer
//!
//! Pure, deterministic scoring of a quiz submission against the served
//! question set. Semantics:
//!
//! - a question flagged as skipped leaves every denominator, even when an
//!   answer for it is also present (skip wins);
//! - a question with neither an answer nor a skip flag counts as answered
//!   incorrectly, so it stays in the denominator;
//! - grouping is strictly by `topic_id`; the display label merely tags the
//!   per-topic entry.

use crate::curriculum::TopicId;
use crate::question::{AssessmentSubmission, Question, QuestionId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-topic tally within a [`ScoreResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicScore {
    pub topic_id: TopicId,
    pub topic: String,
    pub correct: u32,
    /// Non-skipped questions in the topic.
    pub total: u32,
    pub skipped: u32,
    /// `correct / total`, 0 when every question in the topic was skipped.
    pub mastery: f64,
}

/// The outcome of scoring one submission. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// `correct_count / answered`, 0 when nothing was answered.
    pub overall_score: f64,
    pub answered: u32,
    pub skipped: u32,
    pub total_questions: u32,
    pub correct_count: u32,
    pub incorrect_count: u32,
    /// One entry per topic, ordered by first appearance in the question set.
    pub topic_mastery: Vec<TopicScore>,
    /// Ids answered wrongly or left unanswered (excluding skips), for the
    /// attempt history's review list.
    pub incorrect_questions: Vec<QuestionId>,
}

/// Scores a submission. An empty question set yields the degenerate zero
/// result rather than an error.
pub fn score(questions: &[Question], submission: &AssessmentSubmission) -> ScoreResult {
    let mut topic_mastery: Vec<TopicScore> = Vec::new();
    let mut topic_index: HashMap<TopicId, usize> = HashMap::new();
    let mut incorrect_questions = Vec::new();
    let mut skipped_count = 0u32;
    let mut correct_count = 0u32;

    for question in questions {
        let idx = *topic_index.entry(question.topic_id).or_insert_with(|| {
            topic_mastery.push(TopicScore {
                topic_id: question.topic_id,
                topic: question.topic.clone(),
                correct: 0,
                total: 0,
                skipped: 0,
                mastery: 0.0,
            });
            topic_mastery.len() - 1
        });
        let entry = &mut topic_mastery[idx];

        if submission.skipped.contains(&question.id) {
            entry.skipped += 1;
            skipped_count += 1;
            continue;
        }

        entry.total += 1;
        match submission.answers.get(&question.id) {
            Some(&choice) if choice == question.correct_index => {
                entry.correct += 1;
                correct_count += 1;
            }
            _ => incorrect_questions.push(question.id),
        }
    }

    for entry in &mut topic_mastery {
        if entry.total > 0 {
            entry.mastery = f64::from(entry.correct) / f64::from(entry.total);
        }
    }

    let total_questions = questions.len() as u32;
    let answered = total_questions - skipped_count;
    let overall_score = if answered > 0 {
        f64::from(correct_count) / f64::from(answered)
    } else {
        0.0
    };

    ScoreResult {
        overall_score,
        answered,
        skipped: skipped_count,
        total_questions,
        correct_count,
        incorrect_count: answered - correct_count,
        topic_mastery,
        incorrect_questions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::{HashMap, HashSet};

    fn question(id: QuestionId, topic_id: TopicId, topic: &str, correct_index: usize) -> Question {
        Question {
            id,
            topic_id,
            topic: topic.to_string(),
            text: format!("question {id}"),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_index,
            difficulty: crate::question::Difficulty::Easy,
        }
    }

    fn submission(
        answers: &[(QuestionId, usize)],
        skipped: &[QuestionId],
    ) -> AssessmentSubmission {
        AssessmentSubmission {
            answers: answers.iter().copied().collect::<HashMap<_, _>>(),
            skipped: skipped.iter().copied().collect::<HashSet<_>>(),
        }
    }

    #[test]
    fn all_answered_correct_with_two_skips_scores_full() {
        // 10 questions, 8 correct, 2 skipped.
        let questions: Vec<Question> =
            (1..=10).map(|id| question(id, 1, "Arrays & Strings", 0)).collect();
        let answers: Vec<(QuestionId, usize)> = (1..=8).map(|id| (id, 0)).collect();
        let result = score(&questions, &submission(&answers, &[9, 10]));

        assert_eq!(result.answered, 8);
        assert_eq!(result.skipped, 2);
        assert_eq!(result.total_questions, 10);
        assert_eq!(result.correct_count, 8);
        assert_eq!(result.incorrect_count, 0);
        assert_relative_eq!(result.overall_score, 1.0);
    }

    #[test]
    fn groups_by_topic_in_first_appearance_order() {
        // 3 "Arrays" questions at 2 correct, 2 "Trees" at 0 correct, no skips.
        let questions = vec![
            question(1, 1, "Arrays", 0),
            question(2, 1, "Arrays", 0),
            question(3, 1, "Arrays", 0),
            question(4, 5, "Trees", 0),
            question(5, 5, "Trees", 0),
        ];
        let result = score(
            &questions,
            &submission(&[(1, 0), (2, 0), (3, 1), (4, 1), (5, 2)], &[]),
        );

        assert_eq!(result.topic_mastery.len(), 2);
        let arrays = &result.topic_mastery[0];
        assert_eq!((arrays.topic.as_str(), arrays.correct, arrays.total), ("Arrays", 2, 3));
        assert_relative_eq!(arrays.mastery, 2.0 / 3.0);
        let trees = &result.topic_mastery[1];
        assert_eq!((trees.topic.as_str(), trees.correct, trees.total), ("Trees", 0, 2));
        assert_relative_eq!(trees.mastery, 0.0);
        assert_relative_eq!(result.overall_score, 0.4);
    }

    #[test]
    fn distinct_topics_sharing_a_label_stay_separate() {
        let questions = vec![question(1, 1, "Arrays", 0), question(2, 9, "Arrays", 0)];
        let result = score(&questions, &submission(&[(1, 0), (2, 1)], &[]));
        assert_eq!(result.topic_mastery.len(), 2);
        assert_eq!(result.topic_mastery[0].topic_id, 1);
        assert_eq!(result.topic_mastery[1].topic_id, 9);
    }

    #[test]
    fn skip_wins_over_a_present_answer() {
        let questions = vec![question(1, 1, "Arrays", 0), question(2, 1, "Arrays", 0)];
        // Question 1 is answered correctly but also flagged skipped.
        let result = score(&questions, &submission(&[(1, 0), (2, 0)], &[1]));

        assert_eq!(result.answered, 1);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.correct_count, 1);
        assert_eq!(result.topic_mastery[0].skipped, 1);
        assert_eq!(result.topic_mastery[0].total, 1);
        assert_relative_eq!(result.overall_score, 1.0);
    }

    #[test]
    fn unanswered_and_not_skipped_counts_as_wrong() {
        let questions = vec![
            question(1, 1, "Arrays", 0),
            question(2, 1, "Arrays", 0),
            question(3, 1, "Arrays", 0),
        ];
        // Only question 1 answered; 2 and 3 neither answered nor skipped.
        let result = score(&questions, &submission(&[(1, 0)], &[]));

        assert_eq!(result.answered, 3);
        assert_eq!(result.correct_count, 1);
        assert_eq!(result.incorrect_count, 2);
        assert_eq!(result.incorrect_questions, vec![2, 3]);
        assert_relative_eq!(result.overall_score, 1.0 / 3.0);
    }

    #[test]
    fn empty_question_set_is_the_degenerate_zero_result() {
        let result = score(&[], &AssessmentSubmission::default());
        assert_relative_eq!(result.overall_score, 0.0);
        assert!(result.topic_mastery.is_empty());
        assert_eq!(result.total_questions, 0);
        assert_eq!(result.answered, 0);
    }

    #[test]
    fn fully_skipped_topic_has_zero_mastery_not_nan() {
        let questions = vec![question(1, 1, "Arrays", 0), question(2, 5, "Trees", 0)];
        let result = score(&questions, &submission(&[(2, 0)], &[1]));
        let arrays = &result.topic_mastery[0];
        assert_eq!(arrays.total, 0);
        assert_relative_eq!(arrays.mastery, 0.0);
        assert_relative_eq!(result.overall_score, 1.0);
    }

    #[test]
    fn answered_plus_skipped_always_equals_total() {
        let questions: Vec<Question> =
            (1..=7).map(|id| question(id, 1, "Arrays", 0)).collect();
        let result = score(&questions, &submission(&[(1, 0), (4, 3)], &[2, 5]));
        assert_eq!(result.answered + result.skipped, result.total_questions);
    }

    #[test]
    fn scoring_is_idempotent() {
        let questions = vec![
            question(1, 1, "Arrays", 0),
            question(2, 1, "Arrays", 2),
            question(3, 5, "Trees", 1),
        ];
        let sub = submission(&[(1, 0), (3, 0)], &[2]);
        assert_eq!(score(&questions, &sub), score(&questions, &sub));
    }

    #[test]
    fn scores_and_masteries_stay_within_unit_interval() {
        let questions: Vec<Question> =
            (1..=6).map(|id| question(id, id % 3, "t", 0)).collect();
        let result = score(&questions, &submission(&[(1, 0), (2, 1), (3, 0)], &[6]));
        assert!((0.0..=1.0).contains(&result.overall_score));
        for entry in &result.topic_mastery {
            assert!((0.0..=1.0).contains(&entry.mastery));
        }
    }
}
