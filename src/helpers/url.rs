//! URL helper functions

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped when a post path is embedded in a fragment.
///
/// Everything except ASCII alphanumerics and `- _ . ! ~ * ' ( )`, the same
/// set browsers leave alone in `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single path component
///
/// # Examples
/// ```
/// use hashblog::helpers::encode_component;
/// assert_eq!(encode_component("/posts/first-post.md"), "%2Fposts%2Ffirst-post.md");
/// ```
pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

/// Percent-decode a component, `None` if the bytes are not valid UTF-8
pub fn decode_component(s: &str) -> Option<String> {
    percent_decode_str(s)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

/// Join a post path onto a base URL without doubling slashes
///
/// # Examples
/// ```
/// use hashblog::helpers::join_url;
/// assert_eq!(join_url("https://blog.example/", "/posts/a.md"), "https://blog.example/posts/a.md");
/// ```
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}
