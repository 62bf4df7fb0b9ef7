//! HTML helper functions

/// Escape the five HTML-reserved characters
///
/// # Examples
/// ```
/// use hashblog::helpers::escape_html;
/// assert_eq!(escape_html(r#"<a href="x">'&'</a>"#),
///     "&lt;a href=&quot;x&quot;&gt;&#039;&amp;&#039;&lt;/a&gt;");
/// ```
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Generate an anchor tag; `text` is inserted as-is
pub fn link_to(href: &str, text: &str) -> String {
    format!(r#"<a href="{}">{}</a>"#, escape_html(href), text)
}

/// Generate an image tag
pub fn image_tag(src: &str, alt: &str) -> String {
    format!(
        r#"<img src="{}" alt="{}" />"#,
        escape_html(src),
        escape_html(alt)
    )
}

/// Wrap an optional value in a `<p class="meta">` line, or nothing when empty
pub fn meta_line(escaped: &str) -> String {
    if escaped.is_empty() {
        String::new()
    } else {
        format!(r#"<p class="meta">{}</p>"#, escaped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_reserved() {
        assert_eq!(escape_html("&<>\"'"), "&amp;&lt;&gt;&quot;&#039;");
        assert_eq!(escape_html("plain text"), "plain text");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_escape_script_has_no_angle_brackets() {
        let samples = [
            "<script>alert(1)</script>",
            "title <script src='//evil'></script> tail",
            "<<script>>",
            "&lt;<script>",
        ];
        for sample in samples {
            let escaped = escape_html(sample);
            assert!(!escaped.contains('<'), "{escaped}");
            assert!(!escaped.contains('>'), "{escaped}");
        }
    }

    #[test]
    fn test_escape_is_not_idempotent_on_ampersand() {
        assert_eq!(escape_html("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_link_to() {
        assert_eq!(link_to("#/", "Home"), r##"<a href="#/">Home</a>"##);
    }

    #[test]
    fn test_image_tag_escapes_src() {
        assert_eq!(
            image_tag(r#"/x.png" onerror="alert(1)"#, "Cover image"),
            r#"<img src="/x.png&quot; onerror=&quot;alert(1)" alt="Cover image" />"#
        );
    }

    #[test]
    fn test_meta_line() {
        assert_eq!(meta_line(""), "");
        assert_eq!(meta_line("2026-02-03"), r#"<p class="meta">2026-02-03</p>"#);
    }
}
