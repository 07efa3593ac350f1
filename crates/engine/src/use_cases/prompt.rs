//! Prompt building for question generation
//!
//! Pure string assembly: a category-specific framing followed, when there is
//! history, by an exclusion clause naming recent questions to steer away from.

use closer_domain::{Category, PROMPT_HISTORY_WINDOW};

/// Separator between excluded questions in the exclusion clause.
pub const EXCLUSION_DELIMITER: &str = " | ";

/// Lead-in of the exclusion clause.
pub const EXCLUSION_PREFIX: &str =
    "Do not repeat or closely paraphrase any of these recent questions: ";

/// Framing instructions for a category.
pub fn category_framing(category: Category) -> &'static str {
    match category {
        Category::Romantic => {
            "You are hosting a heart-to-heart game for a romantic couple. \
             Write exactly one open-ended question that one partner asks the other. \
             It should invite honest reflection on feelings, shared memories, hopes \
             for the relationship, or small things they appreciate about each other. \
             Keep it warm, respectful, and under 40 words. \
             Reply with the question only, without numbering, quotes, or commentary."
        }
        Category::Friendship => {
            "You are hosting a conversation game for two close friends. \
             Write exactly one open-ended question that one friend asks the other. \
             It should spark stories, laughter, or a deeper understanding of each \
             other's values, adventures, and quirks. \
             Keep it light-hearted, inclusive, and under 40 words. \
             Reply with the question only, without numbering, quotes, or commentary."
        }
    }
}

/// Build the instruction text for one generation call.
///
/// `recent_history` must be most-recent-first; only the first
/// [`PROMPT_HISTORY_WINDOW`] entries are used. An empty history produces no
/// exclusion clause at all.
pub fn build_prompt(category: Category, recent_history: &[String]) -> String {
    let mut prompt = String::from(category_framing(category));

    let window = &recent_history[..recent_history.len().min(PROMPT_HISTORY_WINDOW)];
    if !window.is_empty() {
        prompt.push_str("\n\n");
        prompt.push_str(EXCLUSION_PREFIX);
        prompt.push_str(&window.join(EXCLUSION_DELIMITER));
        prompt.push_str(". Ask about something clearly different.");
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_history_has_no_exclusion_clause() {
        let prompt = build_prompt(Category::Friendship, &[]);

        assert_eq!(prompt, category_framing(Category::Friendship));
        assert!(!prompt.contains(EXCLUSION_PREFIX));
    }

    #[test]
    fn test_exclusion_lists_only_first_five() {
        let prompt = build_prompt(
            Category::Friendship,
            &history(&["q1", "q2", "q3", "q4", "q5", "q6"]),
        );

        let clause = prompt
            .split(EXCLUSION_PREFIX)
            .nth(1)
            .expect("exclusion clause present");
        assert!(clause.starts_with("q1 | q2 | q3 | q4 | q5."));
        assert!(!prompt.contains("q6"));
    }

    #[test]
    fn test_short_history_is_listed_in_order() {
        let prompt = build_prompt(Category::Romantic, &history(&["newest", "older"]));

        assert!(prompt.starts_with(category_framing(Category::Romantic)));
        assert!(prompt.contains("newest | older."));
    }

    #[test]
    fn test_framing_is_category_specific_and_deterministic() {
        assert_ne!(
            category_framing(Category::Romantic),
            category_framing(Category::Friendship)
        );
        let items = history(&["a", "b"]);
        assert_eq!(
            build_prompt(Category::Romantic, &items),
            build_prompt(Category::Romantic, &items)
        );
    }
}
