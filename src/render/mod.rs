//! Renderers for the four routes
//!
//! A [`RenderContext`] is built once at startup and shared by every
//! navigation. Each navigation takes a fresh [`Generation`] from the
//! [`Region`], routes the fragment, fetches what it needs and writes its
//! markup back through [`Region::commit`].

pub mod pages;
mod region;

use std::path::Path;
use std::sync::Arc;

use crate::config::SiteConfig;
use crate::content::{sort_by_date_desc, MarkdownRenderer, Post};
use crate::router::Route;
use crate::source::{fetch_post, DirSource, FetchError, HttpSource, PostSource};

pub use region::{Generation, Region};

/// Posts loaded from the index, newest first, plus the ones that failed
#[derive(Debug, Default)]
pub struct LoadedIndex {
    pub posts: Vec<Post>,
    pub failures: Vec<FetchError>,
}

/// What a navigation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub route: Route,
    pub generation: Generation,
    /// `false` when a newer navigation started before this one finished
    pub committed: bool,
}

/// Everything a renderer needs, constructed once and passed to every call
pub struct RenderContext {
    source: Arc<dyn PostSource>,
    site_title: String,
    posts: Vec<String>,
    markdown: MarkdownRenderer,
    about_html: String,
}

impl RenderContext {
    pub fn new(
        source: Arc<dyn PostSource>,
        site_title: &str,
        posts: Vec<String>,
        markdown: MarkdownRenderer,
        about_markdown: &str,
    ) -> Self {
        let about_html = markdown.render(about_markdown);
        Self {
            source,
            site_title: site_title.to_string(),
            posts,
            markdown,
            about_html,
        }
    }

    /// Build the context described by a site config. Posts are read from
    /// `base_url` when set, otherwise from `content_dir` under `base_dir`.
    pub fn from_config(config: &SiteConfig, base_dir: &Path) -> Result<Self, FetchError> {
        let source: Arc<dyn PostSource> = match &config.base_url {
            Some(base_url) => {
                tracing::debug!("Reading posts from {}", base_url);
                Arc::new(HttpSource::new(base_url, config.fetch_timeout())?)
            }
            None => {
                let root = base_dir.join(&config.content_dir);
                tracing::debug!("Reading posts from {:?}", root);
                Arc::new(DirSource::new(root))
            }
        };

        let markdown = if config.highlight {
            MarkdownRenderer::with_highlighting(&config.highlight_theme)
        } else {
            MarkdownRenderer::new()
        };

        Ok(Self::new(
            source,
            &config.title,
            config.posts.clone(),
            markdown,
            config.about.as_deref().unwrap_or(pages::DEFAULT_ABOUT),
        ))
    }

    /// Paths from the post index, in index order
    pub fn post_index(&self) -> &[String] {
        &self.posts
    }

    /// Fetch every indexed post one at a time, newest first.
    /// A post that fails to load is logged and left out.
    pub async fn load_index(&self) -> LoadedIndex {
        self.load_index_while(|| true).await.unwrap_or_default()
    }

    /// Like [`load_index`](Self::load_index), but gives up with `None` as
    /// soon as `keep_going` turns false after a fetch.
    async fn load_index_while(&self, keep_going: impl Fn() -> bool) -> Option<LoadedIndex> {
        let mut loaded = LoadedIndex::default();

        for path in &self.posts {
            match fetch_post(self.source.as_ref(), path).await {
                Ok(post) => loaded.posts.push(post),
                Err(e) => {
                    tracing::warn!("Skipping post: {}", e);
                    loaded.failures.push(e);
                }
            }
            if !keep_going() {
                return None;
            }
        }

        sort_by_date_desc(&mut loaded.posts);
        Some(loaded)
    }

    /// Route `fragment` and render it into `region`
    pub async fn navigate(&self, region: &Region, fragment: &str) -> Navigation {
        let generation = region.begin();
        let route = Route::from_fragment(fragment);
        tracing::debug!("Navigation {} to {}", generation.get(), route);

        let committed = self.render_route(region, generation, &route).await;
        Navigation {
            route,
            generation,
            committed,
        }
    }

    /// Dispatch to the renderer for `route`
    pub async fn render_route(&self, region: &Region, generation: Generation, route: &Route) -> bool {
        match route {
            Route::Home => self.render_home(region, generation).await,
            Route::Post(path) => self.render_post(region, generation, path).await,
            Route::About => self.render_about(region, generation),
            Route::NotFound => render_not_found(region, generation),
        }
    }

    /// Show the header with an empty list, then the loaded index. Stops
    /// fetching once a newer navigation has started.
    pub async fn render_home(&self, region: &Region, generation: Generation) -> bool {
        if !region.commit(generation, pages::home_shell(&self.site_title)) {
            return false;
        }

        match self.load_index_while(|| region.is_current(generation)).await {
            Some(loaded) => region.commit(generation, pages::home(&self.site_title, &loaded.posts)),
            None => {
                tracing::debug!("Home render {} superseded", generation.get());
                false
            }
        }
    }

    /// Render one post, or the not-found page if it cannot be loaded
    pub async fn render_post(&self, region: &Region, generation: Generation, path: &str) -> bool {
        match fetch_post(self.source.as_ref(), path).await {
            Ok(post) => {
                let body_html = self.markdown.render(&post.body);
                region.commit(generation, pages::article(&post, &body_html))
            }
            Err(e) => {
                tracing::warn!("{}", e);
                render_not_found(region, generation)
            }
        }
    }

    pub fn render_about(&self, region: &Region, generation: Generation) -> bool {
        region.commit(generation, pages::about(&self.about_html))
    }
}

pub fn render_not_found(region: &Region, generation: Generation) -> bool {
    region.commit(generation, pages::not_found())
}
