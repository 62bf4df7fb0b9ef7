//! CLI entry point for hashblog

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hashblog::Blog;

#[derive(Parser)]
#[command(name = "hashblog")]
#[command(version)]
#[command(about = "A fragment-routed Markdown blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    cwd: Option<PathBuf>,

    /// Configuration file (defaults to site.yml in the base directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Route fragments and print the rendered region
    #[command(alias = "r")]
    Render {
        /// Fragments such as "#/", "#/about" or "#/post/%2Fposts%2Fa.md"
        fragments: Vec<String>,
    },

    /// List the posts in the index
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Start a local server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (defaults to server.port in site.yml)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to server.host in site.yml)
        #[arg(short, long)]
        ip: Option<String>,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "hashblog=debug,info"
    } else {
        "hashblog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    let blog = match &cli.config {
        Some(config) => Blog::from_config_file(&base_dir, config)?,
        None => Blog::new(&base_dir)?,
    };

    match cli.command {
        Commands::Render { fragments } => {
            hashblog::commands::render::run(&blog, &fragments).await?;
        }

        Commands::List { json } => {
            hashblog::commands::list::run(&blog, json).await?;
        }

        Commands::Serve {
            port,
            ip,
            open,
            r#static,
        } => {
            let port = port.unwrap_or(blog.config.server.port);
            let ip = ip.unwrap_or_else(|| blog.config.server.host.clone());

            tracing::info!("Starting server at http://{}:{}", ip, port);
            hashblog::server::start(&blog, &ip, port, !r#static, open).await?;
        }
    }

    Ok(())
}
