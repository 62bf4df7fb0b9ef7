//! Posts read from a local site directory

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use super::{FetchError, PostSource};

/// Reads post paths relative to a site root, the way a static file server
/// would resolve them
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a post path onto the filesystem, refusing anything that would
    /// leave the site root
    pub fn resolve(&self, path: &str) -> Result<PathBuf, FetchError> {
        let relative = Path::new(path.trim_start_matches('/'));
        let mut resolved = self.root.clone();

        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => return Err(FetchError::InvalidPath(path.to_string())),
            }
        }

        if resolved == self.root {
            return Err(FetchError::InvalidPath(path.to_string()));
        }
        Ok(resolved)
    }
}

#[async_trait]
impl PostSource for DirSource {
    async fn read(&self, path: &str) -> Result<String, FetchError> {
        let file = self.resolve(path)?;

        match tokio::fs::read_to_string(&file).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(FetchError::Status {
                path: path.to_string(),
                status: 404,
            }),
            Err(source) => Err(FetchError::Io {
                path: path.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("posts")).unwrap();
        fs::write(
            dir.path().join("posts/first-post.md"),
            "---\ntitle: First\n---\nHello",
        )
        .unwrap();
        dir
    }

    #[tokio::test]
    async fn test_read_absolute_post_path() {
        let dir = site();
        let source = DirSource::new(dir.path());
        let text = source.read("/posts/first-post.md").await.unwrap();
        assert!(text.contains("title: First"));
    }

    #[tokio::test]
    async fn test_read_relative_post_path() {
        let dir = site();
        let source = DirSource::new(dir.path());
        assert!(source.read("./posts/first-post.md").await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let dir = site();
        let source = DirSource::new(dir.path());
        let err = source.read("/posts/missing.md").await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_directory_is_io_error() {
        let dir = site();
        let source = DirSource::new(dir.path());
        let err = source.read("/posts").await.unwrap_err();
        assert!(!matches!(err, FetchError::InvalidPath(_)));
    }

    #[test]
    fn test_resolve_rejects_escape() {
        let source = DirSource::new("/srv/site");
        assert!(matches!(
            source.resolve("/../etc/passwd"),
            Err(FetchError::InvalidPath(_))
        ));
        assert!(matches!(
            source.resolve("posts/../../secret.md"),
            Err(FetchError::InvalidPath(_))
        ));
        assert!(matches!(source.resolve("/"), Err(FetchError::InvalidPath(_))));
    }

    #[test]
    fn test_resolve_joins_under_root() {
        let source = DirSource::new("/srv/site");
        assert_eq!(
            source.resolve("/posts/a.md").unwrap(),
            PathBuf::from("/srv/site/posts/a.md")
        );
    }
}
