//! LearnPath Core
//!
//! The assessment scoring and adaptive roadmap engine: a fixed curriculum
//! graph, a pure quiz scorer, the topic-unlock state machine, the
//! reassessment bulk-promotion policy, and the focus-area selector.
//! Everything here is deterministic and free of I/O; storage and transport
//! live in the service crate.

pub mod bank;
pub mod curriculum;
pub mod gaps;
pub mod question;
pub mod reassess;
pub mod roadmap;
pub mod scorer;

pub use bank::{QuestionBank, StaticQuestionBank};
pub use curriculum::{Curriculum, CurriculumError, Subtopic, SubtopicId, Topic, TopicId};
pub use gaps::{DEFAULT_FOCUS_LIMIT, FocusArea, select_focus_areas};
pub use question::{AssessmentSubmission, Difficulty, Question, QuestionId, QuizMode};
pub use reassess::{DEFAULT_MASTERY_THRESHOLD, ReassessmentPolicy};
pub use roadmap::{RoadmapEntry, TopicProgress, TopicStatus, recompute_statuses};
pub use scorer::{ScoreResult, TopicScore, score};
