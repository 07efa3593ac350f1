//! Theme registry
//!
//! Static display metadata for each category. The mapping is total over
//! [`Category`], so lookups cannot fail once a category has been parsed.

use serde::Serialize;

use super::category::Category;

/// Display metadata for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub category: Category,
    pub title: &'static str,
    pub description: &'static str,
    /// CSS hex color, e.g. `#ff6b9d`
    pub primary_color: &'static str,
    pub secondary_color: &'static str,
    pub icon: &'static str,
}

/// Primary/secondary color pair for a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeColors {
    pub primary: &'static str,
    pub secondary: &'static str,
}

const ROMANTIC: Theme = Theme {
    category: Category::Romantic,
    title: "Romance Mode",
    description: "Explore each other's inner world",
    primary_color: "#ff6b9d",
    secondary_color: "#ffc3d8",
    icon: "💕",
};

const FRIENDSHIP: Theme = Theme {
    category: Category::Friendship,
    title: "Friendship Mode",
    description: "Good times that deepen a friendship",
    primary_color: "#4ecdc4",
    secondary_color: "#a8e6cf",
    icon: "🤝",
};

impl Theme {
    /// Look up the theme for a category
    pub fn for_category(category: Category) -> &'static Theme {
        match category {
            Category::Romantic => &ROMANTIC,
            Category::Friendship => &FRIENDSHIP,
        }
    }

    pub fn colors(&self) -> ThemeColors {
        ThemeColors {
            primary: self.primary_color,
            secondary: self.secondary_color,
        }
    }
}
