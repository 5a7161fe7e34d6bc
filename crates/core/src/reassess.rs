//! Reassessment Policy
//!
//! Decides whether a reassessment score is strong enough to bulk-promote
//! the learner: mark every subtopic of every topic complete in one atomic
//! write. The policy only decides; the write itself is owned by the
//! progress store, and a failed write never invalidates the score.

use crate::question::QuizMode;
use crate::scorer::ScoreResult;

/// Default overall-score threshold for bulk promotion.
pub const DEFAULT_MASTERY_THRESHOLD: f64 = 0.80;

#[derive(Debug, Clone, Copy)]
pub struct ReassessmentPolicy {
    pub threshold: f64,
}

impl Default for ReassessmentPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MASTERY_THRESHOLD,
        }
    }
}

impl ReassessmentPolicy {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// True iff this was a reassessment and the overall score reached the
    /// threshold. Diagnostic attempts never trigger the bulk write.
    pub fn should_bulk_complete(&self, result: &ScoreResult, mode: QuizMode) -> bool {
        mode == QuizMode::Reassess && result.overall_score >= self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with_score(overall_score: f64) -> ScoreResult {
        ScoreResult {
            overall_score,
            answered: 10,
            skipped: 0,
            total_questions: 10,
            correct_count: 8,
            incorrect_count: 2,
            topic_mastery: vec![],
            incorrect_questions: vec![],
        }
    }

    #[test]
    fn fires_at_exactly_the_threshold() {
        let policy = ReassessmentPolicy::default();
        assert!(policy.should_bulk_complete(&result_with_score(0.80), QuizMode::Reassess));
        assert!(policy.should_bulk_complete(&result_with_score(0.85), QuizMode::Reassess));
        assert!(policy.should_bulk_complete(&result_with_score(1.0), QuizMode::Reassess));
    }

    #[test]
    fn does_not_fire_just_below_the_threshold() {
        let policy = ReassessmentPolicy::default();
        assert!(!policy.should_bulk_complete(&result_with_score(0.79999), QuizMode::Reassess));
        assert!(!policy.should_bulk_complete(&result_with_score(0.0), QuizMode::Reassess));
    }

    #[test]
    fn never_fires_for_diagnostic_mode() {
        let policy = ReassessmentPolicy::default();
        assert!(!policy.should_bulk_complete(&result_with_score(1.0), QuizMode::Diagnostic));
    }

    #[test]
    fn threshold_is_configurable() {
        let strict = ReassessmentPolicy::new(0.95);
        assert!(!strict.should_bulk_complete(&result_with_score(0.9), QuizMode::Reassess));
        assert!(strict.should_bulk_complete(&result_with_score(0.95), QuizMode::Reassess));
    }
}
