//! Content module - posts, front-matter and markdown rendering

use std::path::Path;

mod frontmatter;
mod markdown;
mod post;

pub use frontmatter::{FrontMatter, Metadata};
pub use markdown::{MarkdownRenderer, DEFAULT_THEME};
pub use post::{sort_by_date_desc, Post, DEFAULT_DESCRIPTION, DEFAULT_TITLE};

/// Check if a file is a markdown file
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_markdown_file() {
        assert!(is_markdown_file(Path::new("a.md")));
        assert!(is_markdown_file(Path::new("posts/a.markdown")));
        assert!(!is_markdown_file(Path::new("a.txt")));
        assert!(!is_markdown_file(Path::new("md")));
    }
}
