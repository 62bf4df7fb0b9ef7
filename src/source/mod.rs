//! Post sources - where post files are read from
//!
//! A [`PostSource`] returns the raw text of a post path. Reads are never
//! cached, so an edited post shows up on the next render. Any failure is a
//! load failure ([`FetchError`]); callers decide whether to skip the post or
//! fall back to the not-found page.

mod dir;
mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::content::Post;

pub use dir::DirSource;
pub use http::HttpSource;

/// A post could not be loaded
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to load {path}: status {status}")]
    Status { path: String, status: u16 },

    #[error("Failed to load {path}: {source}")]
    Request {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to load {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid post path: {0}")]
    InvalidPath(String),
}

impl FetchError {
    /// The post path the failure refers to
    pub fn path(&self) -> &str {
        match self {
            FetchError::Status { path, .. }
            | FetchError::Request { path, .. }
            | FetchError::Io { path, .. }
            | FetchError::InvalidPath(path) => path,
        }
    }
}

/// Something that can produce the raw text of a post
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Read the text behind `path`, bypassing any cache
    async fn read(&self, path: &str) -> Result<String, FetchError>;
}

/// Fetch a post and split off its front-matter
pub async fn fetch_post(source: &dyn PostSource, path: &str) -> Result<Post, FetchError> {
    tracing::debug!("Fetching post {}", path);
    let text = source.read(path).await?;
    Ok(Post::from_source(path, &text))
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory sources for renderer tests

    use std::collections::HashMap;
    use std::sync::Mutex;

    use tokio::sync::oneshot;

    use super::*;

    /// Serves posts from a map; unknown paths answer 404
    #[derive(Default)]
    pub struct MemorySource {
        posts: HashMap<String, String>,
        reads: Mutex<Vec<String>>,
    }

    impl MemorySource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, path: &str, text: &str) -> Self {
            self.posts.insert(path.to_string(), text.to_string());
            self
        }

        /// Paths read so far, in order
        pub fn reads(&self) -> Vec<String> {
            self.reads.lock().map(|r| r.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl PostSource for MemorySource {
        async fn read(&self, path: &str) -> Result<String, FetchError> {
            if let Ok(mut reads) = self.reads.lock() {
                reads.push(path.to_string());
            }
            self.posts
                .get(path)
                .cloned()
                .ok_or_else(|| FetchError::Status {
                    path: path.to_string(),
                    status: 404,
                })
        }
    }

    /// Wraps another source and holds one path until released
    pub struct GatedSource<S> {
        inner: S,
        gated_path: String,
        gate: tokio::sync::Mutex<Option<(oneshot::Sender<()>, oneshot::Receiver<()>)>>,
    }

    /// Test side of a [`GatedSource`]
    pub struct Gate {
        /// Fires once the gated path is being read
        pub entered: oneshot::Receiver<()>,
        /// Lets the gated read finish
        pub release: oneshot::Sender<()>,
    }

    impl<S: PostSource> GatedSource<S> {
        pub fn new(inner: S, gated_path: &str) -> (Self, Gate) {
            let (entered_tx, entered_rx) = oneshot::channel();
            let (release_tx, release_rx) = oneshot::channel();
            let source = Self {
                inner,
                gated_path: gated_path.to_string(),
                gate: tokio::sync::Mutex::new(Some((entered_tx, release_rx))),
            };
            let gate = Gate {
                entered: entered_rx,
                release: release_tx,
            };
            (source, gate)
        }

        pub fn inner(&self) -> &S {
            &self.inner
        }
    }

    #[async_trait]
    impl<S: PostSource> PostSource for GatedSource<S> {
        async fn read(&self, path: &str) -> Result<String, FetchError> {
            if path == self.gated_path {
                let gate = self.gate.lock().await.take();
                if let Some((entered, release)) = gate {
                    let _ = entered.send(());
                    let _ = release.await;
                }
            }
            self.inner.read(path).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MemorySource;
    use super::*;

    #[tokio::test]
    async fn test_fetch_post_parses_frontmatter() {
        let source = MemorySource::new().with("/posts/a.md", "---\ntitle: A\n---\nBody");
        let post = fetch_post(&source, "/posts/a.md").await.unwrap();
        assert_eq!(post.source_url, "/posts/a.md");
        assert_eq!(post.title(), "A");
        assert_eq!(post.body, "Body");
    }

    #[tokio::test]
    async fn test_fetch_post_missing_is_status_error() {
        let source = MemorySource::new();
        let err = fetch_post(&source, "/posts/missing.md").await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
        assert_eq!(err.path(), "/posts/missing.md");
        assert_eq!(err.to_string(), "Failed to load /posts/missing.md: status 404");
    }
}
