//! Post model

use serde::Serialize;

use super::frontmatter::{FrontMatter, Metadata};

/// Fallback title when a post has none
pub const DEFAULT_TITLE: &str = "Untitled";

/// Fallback description when a post has none
pub const DEFAULT_DESCRIPTION: &str = "No description yet.";

/// A blog post, built fresh from its source on every render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    /// Path the post was fetched from, as listed in the post index
    pub source_url: String,

    /// Front-matter fields, all strings
    pub metadata: Metadata,

    /// Raw markdown content
    pub body: String,
}

impl Post {
    /// Build a post from fetched text
    pub fn from_source(source_url: impl Into<String>, text: &str) -> Self {
        let FrontMatter { metadata, body } = FrontMatter::parse(text);
        Self {
            source_url: source_url.into(),
            metadata,
            body,
        }
    }

    fn field(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// A field that is present and non-empty
    fn filled(&self, key: &str) -> Option<&str> {
        self.field(key).filter(|value| !value.is_empty())
    }

    /// Title, or "Untitled" when missing or empty
    pub fn title(&self) -> &str {
        self.filled("title").unwrap_or(DEFAULT_TITLE)
    }

    /// Publication date as written, or an empty string
    pub fn date(&self) -> &str {
        self.field("date").unwrap_or("")
    }

    pub fn description(&self) -> &str {
        self.filled("description").unwrap_or(DEFAULT_DESCRIPTION)
    }

    /// Cover image path, if one is set and non-blank
    pub fn cover(&self) -> Option<&str> {
        self.field("cover")
            .map(str::trim)
            .filter(|cover| !cover.is_empty())
    }
}

/// Sort posts newest first by their `date` field.
///
/// Dates are compared as plain strings, so ISO dates order correctly and
/// posts without a date sink to the end. The sort is stable: posts with equal
/// dates keep their index order.
pub fn sort_by_date_desc(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date().cmp(a.date()));
}
