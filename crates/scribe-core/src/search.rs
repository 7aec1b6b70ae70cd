//! Free-text search terms.

use crate::domain::Post;

/// A search term reduced to ASCII letters, digits and spaces.
///
/// The store matches it as a plain substring, so no pattern syntax can
/// survive sanitizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn sanitize(raw: &str) -> Self {
        Self(
            raw.chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-insensitive substring match on title or body.
    pub fn matches(&self, post: &Post) -> bool {
        let needle = self.0.to_lowercase();
        post.title.to_lowercase().contains(&needle) || post.body.to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostDraft;

    fn post(title: &str, body: &str) -> Post {
        Post::new(PostDraft {
            title: title.to_string(),
            body: body.to_string(),
        })
    }

    #[test]
    fn test_sanitize_strips_punctuation() {
        assert_eq!(SearchTerm::sanitize("node.js").as_str(), "nodejs");
        assert_eq!(SearchTerm::sanitize("a^b[c]_d`e").as_str(), "abcde");
        assert_eq!(SearchTerm::sanitize(".*(x|y)+").as_str(), "xy");
        assert_eq!(SearchTerm::sanitize("Rust 2024").as_str(), "Rust 2024");
    }

    #[test]
    fn test_matches_ignores_case() {
        let term = SearchTerm::sanitize("node.js");
        assert!(term.matches(&post("Deploying", "Ship your NodeJS apps")));
        assert!(term.matches(&post("NODEJS tips", "")));
        assert!(!term.matches(&post("Node.js", "with a dot")));
    }

    #[test]
    fn test_empty_term_matches_everything() {
        let term = SearchTerm::sanitize("!!!");
        assert!(term.is_empty());
        assert!(term.matches(&post("Anything", "at all")));
    }
}
