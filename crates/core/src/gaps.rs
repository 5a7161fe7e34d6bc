//! Gap / Recommendation Selector
//!
//! Ranks actionable topics by deficiency so the dashboard can surface the
//! biggest gaps first. Locked topics are not actionable yet and completed
//! topics have nothing left to surface, so both are filtered out.

use crate::roadmap::{RoadmapEntry, TopicStatus};
use serde::{Deserialize, Serialize};

/// Default number of focus areas surfaced to the learner.
pub const DEFAULT_FOCUS_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusArea {
    pub topic: String,
    /// `round((1 - mastery) * 100)`, in percent.
    pub deficiency: u32,
}

/// Selects up to `limit` focus areas, largest gap first. Entries must be in
/// canonical curriculum order; ties keep that order (the sort is stable),
/// never arbitrary map iteration order.
pub fn select_focus_areas(entries: &[RoadmapEntry], limit: usize) -> Vec<FocusArea> {
    let mut areas: Vec<FocusArea> = entries
        .iter()
        .filter(|e| !matches!(e.status, TopicStatus::Completed | TopicStatus::Locked))
        .filter_map(|e| {
            let deficiency = ((1.0 - e.mastery) * 100.0).round() as i64;
            if deficiency > 0 {
                Some(FocusArea {
                    topic: e.name.clone(),
                    deficiency: deficiency as u32,
                })
            } else {
                None
            }
        })
        .collect();

    areas.sort_by(|a, b| b.deficiency.cmp(&a.deficiency));
    areas.truncate(limit);
    areas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curriculum::TopicId;

    fn entry(topic_id: TopicId, name: &str, status: TopicStatus, mastery: f64) -> RoadmapEntry {
        RoadmapEntry {
            topic_id,
            name: name.to_string(),
            status,
            completed: 0,
            total: 6,
            mastery,
        }
    }

    #[test]
    fn ranks_largest_gap_first_and_truncates() {
        let entries = vec![
            entry(1, "Arrays", TopicStatus::InProgress, 0.7),
            entry(2, "Linked Lists", TopicStatus::InProgress, 0.35),
            entry(3, "Stacks", TopicStatus::Unlocked, 0.0),
            entry(4, "Recursion", TopicStatus::InProgress, 0.55),
        ];
        let areas = select_focus_areas(&entries, 3);
        let names: Vec<&str> = areas.iter().map(|a| a.topic.as_str()).collect();
        assert_eq!(names, vec!["Stacks", "Linked Lists", "Recursion"]);
        assert_eq!(areas[0].deficiency, 100);
        assert_eq!(areas[1].deficiency, 65);
    }

    #[test]
    fn excludes_completed_and_locked_topics() {
        let entries = vec![
            entry(1, "Arrays", TopicStatus::Completed, 1.0),
            entry(2, "Linked Lists", TopicStatus::Locked, 0.0),
            entry(3, "Stacks", TopicStatus::Unlocked, 0.2),
        ];
        let areas = select_focus_areas(&entries, DEFAULT_FOCUS_LIMIT);
        assert_eq!(areas.len(), 1);
        assert_eq!(areas[0].topic, "Stacks");
    }

    #[test]
    fn drops_zero_deficiency_entries() {
        // Mastery rounding up to 100% means no gap worth surfacing.
        let entries = vec![
            entry(1, "Arrays", TopicStatus::InProgress, 1.0),
            entry(2, "Linked Lists", TopicStatus::InProgress, 0.999),
        ];
        assert!(select_focus_areas(&entries, 3).is_empty());
    }

    #[test]
    fn ties_keep_canonical_curriculum_order() {
        let entries = vec![
            entry(1, "Arrays", TopicStatus::InProgress, 0.5),
            entry(2, "Linked Lists", TopicStatus::InProgress, 0.5),
            entry(3, "Stacks", TopicStatus::InProgress, 0.5),
        ];
        let areas = select_focus_areas(&entries, 3);
        let names: Vec<&str> = areas.iter().map(|a| a.topic.as_str()).collect();
        assert_eq!(names, vec!["Arrays", "Linked Lists", "Stacks"]);
    }

    #[test]
    fn deficiency_is_rounded_to_whole_percent() {
        let entries = vec![entry(1, "Arrays", TopicStatus::InProgress, 2.0 / 3.0)];
        let areas = select_focus_areas(&entries, 1);
        assert_eq!(areas[0].deficiency, 33);
    }
}
