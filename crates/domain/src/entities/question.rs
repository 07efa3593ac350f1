//! Question entity - one generated prompt shown to a player

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::QuestionId;
use crate::value_objects::Category;

/// A generated question.
///
/// Created once per successful generation and never mutated afterwards. Session
/// history keeps only the `content` projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub category: Category,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Question {
    pub fn new(category: Category, content: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: QuestionId::new(),
            category,
            content: content.into(),
            created_at,
        }
    }
}
