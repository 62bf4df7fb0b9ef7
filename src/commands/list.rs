//! List the posts in the index

use anyhow::Result;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use walkdir::WalkDir;

use crate::content::is_markdown_file;
use crate::Blog;

/// One row of the listing
#[derive(Debug, Serialize)]
pub struct Entry {
    pub path: String,
    pub title: String,
    pub date: String,
}

/// Result of loading the index
#[derive(Debug, Default, Serialize)]
pub struct Listing {
    pub posts: Vec<Entry>,
    /// Index entries that failed to load
    pub failed: Vec<String>,
    /// Markdown files under the content directory missing from the index
    pub unlisted: Vec<String>,
}

/// Load the index the way the home page does and look for unlisted files
pub async fn collect(blog: &Blog) -> Result<Listing> {
    let ctx = blog.render_context()?;
    let loaded = ctx.load_index().await;

    let posts = loaded
        .posts
        .iter()
        .map(|post| Entry {
            path: post.source_url.clone(),
            title: post.title().to_string(),
            date: post.date().to_string(),
        })
        .collect();

    let failed = loaded
        .failures
        .iter()
        .map(|e| e.path().to_string())
        .collect();

    // A remote index cannot be compared against local files.
    let unlisted = if blog.config.base_url.is_none() {
        unlisted_posts(&blog.content_dir, ctx.post_index())
    } else {
        Vec::new()
    };

    Ok(Listing {
        posts,
        failed,
        unlisted,
    })
}

/// Markdown files below `content_dir` whose post path is not in `index`.
/// Paths are returned as they would be written in the index (`/posts/x.md`).
pub fn unlisted_posts(content_dir: &Path, index: &[String]) -> Vec<String> {
    let listed: HashSet<&str> = index
        .iter()
        .map(|path| path.trim_start_matches("./").trim_start_matches('/'))
        .collect();

    let mut unlisted: Vec<String> = WalkDir::new(content_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_markdown_file(e.path()))
        .filter_map(|e| {
            let relative = e.path().strip_prefix(content_dir).ok()?;
            let relative = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            (!listed.contains(relative.as_str())).then(|| format!("/{}", relative))
        })
        .collect();

    unlisted.sort();
    unlisted
}

/// Run the list command
pub async fn run(blog: &Blog, json: bool) -> Result<()> {
    let listing = collect(blog).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("Posts ({}):", listing.posts.len());
    for entry in &listing.posts {
        let date = if entry.date.is_empty() {
            "----------"
        } else {
            entry.date.as_str()
        };
        println!("  {} - {} [{}]", date, entry.title, entry.path);
    }

    if !listing.failed.is_empty() {
        println!("Failed to load ({}):", listing.failed.len());
        for path in &listing.failed {
            println!("  {}", path);
        }
    }

    if !listing.unlisted.is_empty() {
        println!("Not in the post index ({}):", listing.unlisted.len());
        for path in &listing.unlisted {
            println!("  {}", path);
        }
    }

    Ok(())
}
