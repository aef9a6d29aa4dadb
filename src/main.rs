use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{
    fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use progress_board::{
    client::{ProgressClient, Source},
    config::BoardConfig,
    dashboard::Dashboard,
    page::{Control, Page},
    server,
};

#[derive(Parser)]
#[command(name = "pboard")]
#[command(about = "Render the project progress dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the dashboard once to a file or stdout
    Render {
        /// URL or file path of the progress document
        #[arg(short, long)]
        source: Option<String>,

        /// Status filter: all, todo, inprogress, done or blocked
        #[arg(long, default_value = "all")]
        status: String,

        /// Free-text filter over the status table
        #[arg(short, long, default_value = "")]
        q: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Serve the dashboard over HTTP
    Serve {
        /// URL or file path of the progress document
        #[arg(short, long)]
        source: Option<String>,

        /// Port for HTTP
        #[arg(short, long)]
        port: Option<u16>,
    },
}

const DEFAULT_LOG_FILTER: &str = "progress_board=debug,tower_http=debug";

/// Install the log subscriber. When the rendered page is written to stdout the logs move to
/// stderr, so `pboard render > board.html` produces a clean document.
fn init_tracing(page_on_stdout: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let writer = if page_on_stdout {
        BoxMakeWriter::new(std::io::stderr)
    } else {
        BoxMakeWriter::new(std::io::stdout)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();
}

fn apply_source(config: BoardConfig, source: Option<String>) -> BoardConfig {
    match source {
        Some(raw) => config.with_source(Source::parse(&raw)),
        None => config,
    }
}

async fn render(
    config: BoardConfig,
    status: &str,
    q: &str,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let dashboard = Dashboard::new(ProgressClient::new(), config.source);
    let mut page = Page::new(config.title);
    page.status_filter = Some(Control::new(status));
    page.query = Some(Control::new(q));

    dashboard.start(&mut page).await;

    let html = page.to_html();
    match out {
        Some(path) => {
            tokio::fs::write(&path, html)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote dashboard to {}", path.display());
        }
        None => print!("{}", html),
    }
    Ok(())
}

async fn serve(config: BoardConfig) -> anyhow::Result<()> {
    let port = config.port;
    tracing::info!("Serving progress from {}", config.source);

    let dashboard = Dashboard::new(ProgressClient::new(), config.source);
    let app = server::create_router(dashboard, config.title);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    tracing::info!("Progress board listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let page_on_stdout = match &cli.command {
        Some(Commands::Render { out, .. }) => out.is_none(),
        Some(Commands::Serve { .. }) => false,
        None => true,
    };
    init_tracing(page_on_stdout);

    let config = BoardConfig::from_env();

    match cli.command {
        Some(Commands::Render {
            source,
            status,
            q,
            out,
        }) => render(apply_source(config, source), &status, &q, out).await?,
        Some(Commands::Serve { source, port }) => {
            let config = apply_source(config, source);
            let config = match port {
                Some(port) => config.with_port(port),
                None => config,
            };
            serve(config).await?;
        }
        // Default: render to stdout with no filter
        None => render(config, "all", "", None).await?,
    }

    Ok(())
}
