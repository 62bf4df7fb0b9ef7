//! Render fragments to stdout

use anyhow::Result;

use crate::render::{Navigation, Region, RenderContext};
use crate::Blog;

/// Route and render each fragment in turn, returning the region markup
/// after every navigation
pub async fn render_fragments(
    ctx: &RenderContext,
    fragments: &[String],
) -> Vec<(Navigation, String)> {
    let region = Region::new();
    let mut rendered = Vec::with_capacity(fragments.len());

    for fragment in fragments {
        let navigation = ctx.navigate(&region, fragment).await;
        rendered.push((navigation, region.html()));
    }

    rendered
}

/// Run the render command. With no fragments the home page is rendered.
pub async fn run(blog: &Blog, fragments: &[String]) -> Result<()> {
    let ctx = blog.render_context()?;
    let fragments = if fragments.is_empty() {
        vec!["#/".to_string()]
    } else {
        fragments.to_vec()
    };

    for (navigation, html) in render_fragments(&ctx, &fragments).await {
        tracing::info!("Rendered {}", navigation.route);
        println!("{}", html);
    }

    Ok(())
}
