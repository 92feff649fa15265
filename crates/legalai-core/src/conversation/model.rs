//! Conversation domain model.

use legalai_types::Message;
use serde::{Deserialize, Serialize};

/// Maximum number of characters of the first message used for the title.
pub(crate) const TITLE_MAX_CHARS: usize = 40;

/// A titled, ordered sequence of messages persisted as one unit.
///
/// This is the "pure" model the store operates on. A conversation only
/// exists in materialized form: it gets its id and title at first save,
/// before which the session is provisional and lives solely in the store's
/// working state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    /// Opaque identifier, unique within the store. Minted from the save
    /// timestamp (decimal milliseconds since the Unix epoch).
    pub id: String,
    /// Derived display title: the first message's leading characters.
    pub title: String,
    /// Ordered message history, insertion order = chronological order.
    pub messages: Vec<Message>,
    /// Last-modified time (ISO 8601), updated on every save.
    pub timestamp: String,
}

impl Conversation {
    /// Derives a display title from the first message's content.
    ///
    /// Takes the first 40 characters and appends an ellipsis when the
    /// content was longer. Truncation counts characters,
    /// not bytes, so multibyte scripts (Hindi answers in Devanagari) never
    /// split mid-character.
    pub fn derive_title(content: &str) -> String {
        let mut title: String = content.chars().take(TITLE_MAX_CHARS).collect();
        if content.chars().count() > TITLE_MAX_CHARS {
            title.push('…');
        }
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_of_long_content_is_truncated_with_ellipsis() {
        let content = "a".repeat(50);
        let title = Conversation::derive_title(&content);
        assert_eq!(title, format!("{}…", "a".repeat(40)));
        assert_eq!(title.chars().count(), 41);
    }

    #[test]
    fn title_of_short_content_is_unchanged() {
        let content = "b".repeat(30);
        assert_eq!(Conversation::derive_title(&content), content);
    }

    #[test]
    fn title_of_exactly_forty_chars_has_no_ellipsis() {
        let content = "c".repeat(40);
        assert_eq!(Conversation::derive_title(&content), content);
    }

    #[test]
    fn title_truncates_on_character_boundaries() {
        // 50 Devanagari characters; byte-based slicing would panic or split
        // a code point.
        let content = "क".repeat(50);
        let title = Conversation::derive_title(&content);
        assert_eq!(title.chars().count(), 41);
        assert!(title.ends_with('…'));
    }
}
