//! Development server with live reload
//!
//! Serves the page shell at `/`, rendered region markup at `/__region`, and
//! everything else straight from the content directory. The shell routes
//! `location.hash` through `/__region` on load and on every hash change.

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    http::{header, HeaderValue, Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::is_markdown_file;
use crate::helpers::{current_year, escape_html};
use crate::render::{Region, RenderContext};
use crate::Blog;

/// Response header naming the route a region request resolved to
pub const ROUTE_HEADER: &str = "x-hashblog-route";

/// Page shell. `{title}`, `{year}` and `{scripts}` are filled in per request.
const SHELL: &str = r##"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
<header class="site-header"><a class="brand" href="#/">{title}</a><nav><a href="#/">Home</a> <a href="#/about">About</a></nav></header>
<main id="view"></main>
<footer class="site-footer">&copy; <span id="year">{year}</span> {title}</footer>
{scripts}
</body>
</html>
"##;

/// Routes the current fragment through the region endpoint. A response that
/// arrives after a newer navigation started is dropped.
const ROUTER_SCRIPT: &str = r#"<script>
(function() {
    var view = document.getElementById('view');
    var latest = 0;
    function route() {
        var generation = ++latest;
        fetch('/__region?fragment=' + encodeURIComponent(location.hash || '#/'), { cache: 'no-store' })
            .then(function(res) { return res.text(); })
            .then(function(html) {
                if (generation === latest) {
                    view.innerHTML = html;
                }
            })
            .catch(function(e) { console.error(e); });
    }
    window.addEventListener('hashchange', route);
    window.addEventListener('load', route);
})();
</script>"#;

/// Live reload script added to the shell when watching
const LIVE_RELOAD_SCRIPT: &str = r#"<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
    ws.onclose = function() {
        console.log('Live reload disconnected. Attempting to reconnect...');
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>"#;

/// Server state
struct ServerState {
    blog: RwLock<Blog>,
    context: RwLock<Arc<RenderContext>>,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

impl ServerState {
    fn new(blog: Blog, live_reload: bool) -> Result<Self> {
        let context = Arc::new(blog.render_context()?);
        let (reload_tx, _) = broadcast::channel::<()>(16);
        Ok(Self {
            blog: RwLock::new(blog),
            context: RwLock::new(context),
            reload_tx,
            live_reload,
        })
    }

    fn context(&self) -> Arc<RenderContext> {
        match self.context.read() {
            Ok(ctx) => ctx.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn blog(&self) -> Blog {
        match self.blog.read() {
            Ok(blog) => blog.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Re-read the config file the blog was loaded from and rebuild the
    /// render context. The old context stays in place if the new config is
    /// broken.
    fn reload_config(&self) -> Result<()> {
        let blog = self.blog().reload()?;
        let context = Arc::new(blog.render_context()?);

        if let Ok(mut slot) = self.context.write() {
            *slot = context;
        }
        if let Ok(mut slot) = self.blog.write() {
            *slot = blog;
        }
        Ok(())
    }
}

fn app(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(shell_handler))
        .route("/__region", get(region_handler))
        .route("/__livereload", get(livereload_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the development server
pub async fn start(blog: &Blog, ip: &str, port: u16, watch: bool, open: bool) -> Result<()> {
    let state = Arc::new(ServerState::new(blog.clone(), watch)?);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    if watch {
        println!("Live reload enabled. Watching for changes...");
    }
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    if watch {
        let watched = vec![blog.content_dir.clone(), blog.config_path.clone()];
        let state = state.clone();

        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_reload(watched, state) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

/// Watch the content directory and config file, notifying clients on change
fn watch_and_reload(paths: Vec<PathBuf>, state: Arc<ServerState>) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Create debouncer to avoid multiple rapid reloads
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    for path in &paths {
        if !path.exists() {
            continue;
        }
        let mode = if path.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        debouncer.watcher().watch(path, mode)?;
        tracing::debug!("Watching: {:?}", path);
    }

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant: Vec<_> = events
                    .iter()
                    .filter(|e| {
                        let path_str = e.path.to_string_lossy();
                        !path_str.contains(".git")
                            && !path_str.contains(".DS_Store")
                            && !path_str.ends_with('~')
                    })
                    .collect();

                if relevant.is_empty() {
                    continue;
                }

                for event in &relevant {
                    tracing::info!("File changed: {}", event.path.display());
                }

                let config_path = state.blog().config_path;
                if relevant.iter().any(|e| is_config_event(&e.path, &config_path)) {
                    match state.reload_config() {
                        Ok(()) => tracing::info!("Reloaded {}", config_path.display()),
                        Err(e) => tracing::error!("Keeping previous config: {}", e),
                    }
                }

                // Posts are re-read on every render, so a reload is enough.
                let _ = state.reload_tx.send(());
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

/// Whether a changed path is the watched config file
fn is_config_event(changed: &Path, config_path: &Path) -> bool {
    config_path.file_name().is_some() && changed.file_name() == config_path.file_name()
}

/// Serve the page shell
async fn shell_handler(State(state): State<Arc<ServerState>>) -> Html<String> {
    let title = escape_html(&state.blog().config.title);
    let scripts = if state.live_reload {
        format!("{}\n{}", ROUTER_SCRIPT, LIVE_RELOAD_SCRIPT)
    } else {
        ROUTER_SCRIPT.to_string()
    };

    Html(
        SHELL
            .replace("{title}", &title)
            .replace("{year}", &current_year().to_string())
            .replace("{scripts}", &scripts),
    )
}

#[derive(Debug, Deserialize)]
struct RegionQuery {
    fragment: Option<String>,
}

/// Route a fragment and return the markup the region would show
async fn region_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<RegionQuery>,
) -> Response {
    let ctx = state.context();
    let region = Region::new();
    let fragment = query.fragment.unwrap_or_default();

    let navigation = ctx.navigate(&region, &fragment).await;
    tracing::debug!("Region request {:?} -> {}", fragment, navigation.route);

    (
        [
            (header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
            (
                header::HeaderName::from_static(ROUTE_HEADER),
                HeaderValue::from_static(navigation.route.name()),
            ),
        ],
        Html(region.html()),
    )
        .into_response()
}

/// WebSocket handler for live reload
async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

/// Handle WebSocket connection for live reload
async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            result = reload_rx.recv() => {
                match result {
                    Ok(_) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// Serve files from the content directory. Markdown is never cached so
/// edits show up without a hard refresh.
async fn fallback_handler(State(state): State<Arc<ServerState>>, request: Request<Body>) -> Response {
    let is_markdown = is_markdown_file(Path::new(request.uri().path()));
    let content_dir = state.blog().content_dir;

    let mut service = ServeDir::new(&content_dir);
    let mut response = match service.try_call(request).await {
        Ok(response) => response.into_response(),
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
    };

    if is_markdown {
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/markdown; charset=utf-8"),
        );
    }
    response
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
