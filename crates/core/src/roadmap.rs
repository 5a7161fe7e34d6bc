//! Roadmap State Machine
//!
//! Derives each topic's status from subtopic completion counts and the
//! prerequisite graph. Statuses are never persisted; they are a pure
//! function of progress and are recomputed on every read, which rules out
//! drift between a stored status and the underlying counts.
//!
//! The progression `locked -> unlocked -> in-progress -> completed` never
//! moves backward under the documented assumption that completion counts
//! are monotonically non-decreasing in the progress store. Observed facts
//! take precedence over gating: a topic with any completion count shows as
//! in-progress (or completed) even if its prerequisites are unmet.

use crate::curriculum::{Curriculum, Topic, TopicId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TopicStatus {
    Locked,
    Unlocked,
    InProgress,
    Completed,
}

/// Completion counts for one topic, as read from the progress store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicProgress {
    pub completed: u32,
    pub total: u32,
}

/// One topic's derived state, in canonical curriculum order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapEntry {
    pub topic_id: TopicId,
    pub name: String,
    pub status: TopicStatus,
    pub completed: u32,
    pub total: u32,
    /// Fraction of subtopics completed, 0 when the topic has none recorded.
    pub mastery: f64,
}

/// Completion counts for a topic, defaulting missing entries to zero
/// progress over the topic's subtopic count and clamping inconsistent data.
fn effective_progress(
    progress: &HashMap<TopicId, TopicProgress>,
    topic: &Topic,
) -> (u32, u32) {
    match progress.get(&topic.id) {
        Some(p) if p.completed > p.total => {
            warn!(
                topic_id = topic.id,
                completed = p.completed,
                total = p.total,
                "inconsistent progress: completed exceeds total, clamping"
            );
            (p.total, p.total)
        }
        Some(p) => (p.completed, p.total),
        None => (0, topic.subtopic_count() as u32),
    }
}

fn is_complete(completed: u32, total: u32) -> bool {
    completed == total && total > 0
}

/// Recomputes every topic's status. Pure and total: topics missing from
/// `progress` are treated as untouched.
pub fn recompute_statuses(
    curriculum: &Curriculum,
    progress: &HashMap<TopicId, TopicProgress>,
) -> Vec<RoadmapEntry> {
    curriculum
        .topics()
        .iter()
        .map(|topic| {
            let (completed, total) = effective_progress(progress, topic);

            let status = if is_complete(completed, total) {
                TopicStatus::Completed
            } else if completed > 0 {
                TopicStatus::InProgress
            } else if topic.prerequisites.is_empty() {
                TopicStatus::Unlocked
            } else {
                let unlocked = topic.prerequisites.iter().all(|&prereq| {
                    curriculum
                        .topic(prereq)
                        .map(|p| {
                            let (done, of) = effective_progress(progress, p);
                            is_complete(done, of)
                        })
                        .unwrap_or(false)
                });
                if unlocked {
                    TopicStatus::Unlocked
                } else {
                    TopicStatus::Locked
                }
            };

            let mastery = if total > 0 {
                f64::from(completed) / f64::from(total)
            } else {
                0.0
            };

            RoadmapEntry {
                topic_id: topic.id,
                name: topic.name.clone(),
                status,
                completed,
                total,
                mastery,
            }
        })
        .collect()
}
