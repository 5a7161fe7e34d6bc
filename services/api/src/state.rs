//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds all shared,
//! clonable resources like the database pool, the question bank, and the
//! immutable curriculum graph.

use crate::config::Config;
use learnpath_core::{Curriculum, QuestionBank, ReassessmentPolicy};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
/// All fields are public to be accessible from other modules.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<crate::db::Db>,
    pub question_bank: Arc<dyn QuestionBank>,
    pub curriculum: Arc<Curriculum>,
    pub policy: ReassessmentPolicy,
    pub config: Arc<Config>,
}
