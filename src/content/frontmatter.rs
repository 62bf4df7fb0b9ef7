//! Front-matter parsing
//!
//! A post may open with a block of flat `key: value` lines fenced by `---`
//! delimiter lines:
//!
//! ```text
//! ---
//! title: Something
//! date: 2026-02-03
//! description: short
//! cover: /uploads/x.png
//! ---
//! Markdown body...
//! ```
//!
//! Values are kept as strings. Nested or multi-line YAML is not supported.

use indexmap::IndexMap;

/// Delimiter line that opens and closes the metadata block
const DELIMITER: &str = "---";

/// Front-matter metadata: keys in the order they first appear
pub type Metadata = IndexMap<String, String>;

/// A document split into its metadata block and Markdown body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub metadata: Metadata,
    pub body: String,
}

/// One line inside the metadata block
#[derive(Debug, PartialEq, Eq)]
enum Entry<'a> {
    Pair(&'a str, &'a str),
    Skipped,
}

impl FrontMatter {
    /// Parse front-matter from content string
    ///
    /// Content that does not open with a delimiter line, or whose block is
    /// never closed, is returned untouched as the body with empty metadata.
    pub fn parse(content: &str) -> Self {
        match split_block(content) {
            Some((block, body)) => {
                let mut metadata = Metadata::new();
                for line in block.lines() {
                    if let Entry::Pair(key, value) = parse_entry(line) {
                        metadata.insert(key.to_string(), value.to_string());
                    }
                }
                Self {
                    metadata,
                    body: body.trim().to_string(),
                }
            }
            None => Self::passthrough(content),
        }
    }

    fn passthrough(content: &str) -> Self {
        Self {
            metadata: Metadata::new(),
            body: content.to_string(),
        }
    }

    /// Look up a metadata value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Split `content` into the raw metadata block and everything after the
/// closing delimiter line.
fn split_block(content: &str) -> Option<(&str, &str)> {
    let mut lines = content.split_inclusive('\n');
    let opening = lines.next()?;
    if !is_delimiter(opening) {
        return None;
    }

    let block_start = opening.len();
    let mut offset = block_start;
    for line in lines {
        if is_delimiter(line) {
            let block = &content[block_start..offset];
            let body = &content[offset + line.len()..];
            return Some((block, body));
        }
        offset += line.len();
    }

    None
}

fn parse_entry(line: &str) -> Entry<'_> {
    let Some((key, value)) = line.split_once(':') else {
        return Entry::Skipped;
    };
    let key = key.trim();
    if key.is_empty() {
        return Entry::Skipped;
    }
    Entry::Pair(key, value.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frontmatter() {
        let content = "---\ntitle: Hello World\ndate: 2026-02-03\ndescription: short\ncover: /uploads/x.png\n---\n\nThis is the content.\n";

        let fm = FrontMatter::parse(content);
        assert_eq!(fm.get("title"), Some("Hello World"));
        assert_eq!(fm.get("date"), Some("2026-02-03"));
        assert_eq!(fm.get("description"), Some("short"));
        assert_eq!(fm.get("cover"), Some("/uploads/x.png"));
        assert_eq!(fm.body, "This is the content.");
    }

    #[test]
    fn test_keys_keep_block_order() {
        let fm = FrontMatter::parse("---\nzeta: 1\nalpha: 2\nmid: 3\n---\nbody");
        let keys: Vec<_> = fm.metadata.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_split_on_first_colon_only() {
        let fm = FrontMatter::parse("---\ncover: https://example.com/a.png\ntime: 10:30\n---\n");
        assert_eq!(fm.get("cover"), Some("https://example.com/a.png"));
        assert_eq!(fm.get("time"), Some("10:30"));
        assert_eq!(fm.body, "");
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let fm = FrontMatter::parse("---\njust some words\n: no key\n\ntitle: Kept\n---\nBody");
        assert_eq!(fm.metadata.len(), 1);
        assert_eq!(fm.get("title"), Some("Kept"));
        assert_eq!(fm.body, "Body");
    }

    #[test]
    fn test_no_delimiter_is_passthrough() {
        let content = "# Heading\n\ntitle: not metadata\n";
        let fm = FrontMatter::parse(content);
        assert!(fm.metadata.is_empty());
        assert_eq!(fm.body, content);
    }

    #[test]
    fn test_leading_blank_line_is_passthrough() {
        let content = "\n---\ntitle: x\n---\nbody";
        let fm = FrontMatter::parse(content);
        assert!(fm.metadata.is_empty());
        assert_eq!(fm.body, content);
    }

    #[test]
    fn test_unclosed_block_is_passthrough() {
        let content = "---\ntitle: Dangling\n\nNo closing delimiter here.";
        let fm = FrontMatter::parse(content);
        assert!(fm.metadata.is_empty());
        assert_eq!(fm.body, content);
    }

    #[test]
    fn test_longer_rule_is_not_a_delimiter() {
        let content = "----\ntitle: x\n----\nbody";
        let fm = FrontMatter::parse(content);
        assert!(fm.metadata.is_empty());
        assert_eq!(fm.body, content);
    }

    #[test]
    fn test_crlf_delimiters() {
        let fm = FrontMatter::parse("---\r\ntitle: Windows\r\n---\r\nBody text\r\n");
        assert_eq!(fm.get("title"), Some("Windows"));
        assert_eq!(fm.body, "Body text");
    }

    #[test]
    fn test_reparse_body_is_stable() {
        let first = FrontMatter::parse("---\ntitle: Once\n---\nA paragraph.\n\n---\n\nAfter a rule.");
        let second = FrontMatter::parse(&first.body);
        assert!(second.metadata.is_empty());
        assert_eq!(second.body, first.body);
    }

    #[test]
    fn test_body_may_contain_rules() {
        let fm = FrontMatter::parse("---\ntitle: Rules\n---\nabove\n\n---\n\nbelow");
        assert_eq!(fm.get("title"), Some("Rules"));
        assert_eq!(fm.body, "above\n\n---\n\nbelow");
    }

    #[test]
    fn test_repeated_key_last_value_wins() {
        let fm = FrontMatter::parse("---\ntitle: First\ndate: 2025-01-01\ntitle: Second\n---\n");
        assert_eq!(fm.get("title"), Some("Second"));
        assert_eq!(fm.metadata.get_index(0).map(|(k, _)| k.as_str()), Some("title"));
    }

    #[test]
    fn test_empty_block() {
        let fm = FrontMatter::parse("---\n---\nJust body");
        assert!(fm.metadata.is_empty());
        assert_eq!(fm.body, "Just body");
    }
}
