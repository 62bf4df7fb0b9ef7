//! Region markup for each route
//!
//! Pure string builders. Every user-authored field passes through
//! [`escape_html`]; only the rendered Markdown body is inserted raw.

use crate::content::Post;
use crate::helpers::{escape_html, image_tag, link_to, meta_line};
use crate::router::Route;

/// About text used when the site config has none
pub const DEFAULT_ABOUT: &str = "A simple Markdown blog.\n\n\
Posts are plain Markdown files with a short front-matter block. \
Add one by creating the file and listing its path under `posts` in `site.yml`.";

/// Home page header with an empty post list, shown while posts load
pub fn home_shell(site_title: &str) -> String {
    home(site_title, &[])
}

/// Home page with the given, already sorted, posts
pub fn home(site_title: &str, posts: &[Post]) -> String {
    let items: String = posts.iter().map(post_item).collect();
    format!(
        r#"<div class="card"><h1 class="post-title">Latest Posts</h1>{}</div><ul class="post-list">{}</ul>"#,
        meta_line(&escape_html(site_title)),
        items
    )
}

fn post_item(post: &Post) -> String {
    let href = Route::Post(post.source_url.clone()).fragment();
    let inner = format!(
        r#"<p class="title">{}</p><p class="desc">{}</p>{}"#,
        escape_html(post.title()),
        escape_html(post.description()),
        meta_line(&escape_html(post.date())),
    );
    format!(r#"<li class="post-item">{}</li>"#, link_to(&href, &inner))
}

/// A single post; `body_html` is the rendered Markdown body
pub fn article(post: &Post, body_html: &str) -> String {
    let cover = post
        .cover()
        .map(|cover| image_tag(cover, "Cover image"))
        .unwrap_or_default();

    format!(
        r#"<article class="card article"><h1 class="post-title">{}</h1>{}{}<div>{}</div><p class="meta">{}</p></article>"#,
        escape_html(post.title()),
        meta_line(&escape_html(post.date())),
        cover,
        body_html,
        link_to(&Route::Home.fragment(), "&larr; Back to Home"),
    )
}

/// The about page; `about_html` is rendered Markdown
pub fn about(about_html: &str) -> String {
    format!(
        r#"<section class="card article"><h1 class="post-title">About</h1>{}</section>"#,
        about_html
    )
}

pub fn not_found() -> String {
    format!(
        r#"<section class="card"><h1 class="post-title">404</h1><p class="meta">That page doesn&rsquo;t exist.</p><p>{}</p></section>"#,
        link_to(&Route::Home.fragment(), "Go Home")
    )
}
