//! Question category value object
//!
//! The category governs the style of every question generated for a session.
//! Older saved sessions and clients call the romantic category `couple`, so
//! that spelling is accepted as an alias on input.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Theme governing generated question style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Questions for partners
    #[serde(alias = "couple")]
    Romantic,
    /// Questions for friends
    Friendship,
}

impl Category {
    /// All categories, in menu order
    pub fn all() -> &'static [Category] {
        &[Category::Romantic, Category::Friendship]
    }

    /// Stable identifier used in storage and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Romantic => "romantic",
            Category::Friendship => "friendship",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "romantic" | "couple" => Ok(Category::Romantic),
            "friendship" => Ok(Category::Friendship),
            _ => Err(DomainError::invalid_category(s)),
        }
    }
}
