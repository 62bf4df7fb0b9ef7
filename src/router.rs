//! Fragment router
//!
//! Maps the part of the URL after `#` to one of four routes:
//!
//! | fragment                       | route          |
//! |--------------------------------|----------------|
//! | `` / `#` / `#/`                | `Home`         |
//! | `#/post/<encoded post path>`   | `Post(path)`   |
//! | `#/about`                      | `About`        |
//! | anything else                  | `NotFound`     |

use std::fmt;

use crate::helpers::{decode_component, encode_component};

/// A resolved navigation target
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    /// A single post, holding the decoded post path
    Post(String),
    About,
    NotFound,
}

impl Route {
    /// Resolve a fragment. The leading `#` is optional.
    pub fn from_fragment(fragment: &str) -> Self {
        let path = fragment.strip_prefix('#').unwrap_or(fragment);
        let mut segments = path.split('/').filter(|s| !s.is_empty());

        match (segments.next(), segments.next()) {
            (None, _) => Route::Home,
            (Some("post"), Some(encoded)) => match decode_component(encoded) {
                Some(post_path) => Route::Post(post_path),
                None => {
                    tracing::debug!("Undecodable post identifier: {}", encoded);
                    Route::NotFound
                }
            },
            (Some("about"), _) => Route::About,
            _ => Route::NotFound,
        }
    }

    /// The canonical fragment for this route
    pub fn fragment(&self) -> String {
        match self {
            Route::Home => "#/".to_string(),
            Route::Post(path) => format!("#/post/{}", encode_component(path)),
            Route::About => "#/about".to_string(),
            Route::NotFound => "#/404".to_string(),
        }
    }

    /// Short name used in logs and response headers
    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Post(_) => "post",
            Route::About => "about",
            Route::NotFound => "not-found",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Post(path) => write!(f, "post({})", path),
            other => f.write_str(other.name()),
        }
    }
}
