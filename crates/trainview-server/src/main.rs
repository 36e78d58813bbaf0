use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use trainview_core::{bind_explicit, FileLocator, SourceBinding, SyncGateway};
use trainview_server::constants::server;
use trainview_server::{router, AppState, WebhookClient};

#[derive(Parser)]
#[command(name = "trainview")]
#[command(about = "Local editing server for rasa-nlu training data")]
#[command(version)]
struct Cli {
    /// A json file in native rasa-nlu format
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Token to use for webhooks
    #[arg(short, long)]
    token: Option<String>,

    /// Development mode: CORS headers, no static page, no browser
    #[arg(short, long)]
    development: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let binding = Arc::new(SourceBinding::new());

    if let Some(ref source) = cli.source {
        bind_explicit(&binding, source).await?;
    } else {
        info!("searching for the training examples...");
        let cwd = std::env::current_dir()?;
        FileLocator::new(Arc::clone(&binding)).discover(&cwd).await?;
    }

    let state = AppState {
        gateway: Arc::new(SyncGateway::new(Arc::clone(&binding))),
        webhook: WebhookClient::new(cli.token.clone())?,
    };
    let app = router(state, cli.development);

    // Port 0 lets the OS assign a free one when none was requested.
    let port = cli.port.unwrap_or(0);
    let listener = tokio::net::TcpListener::bind((server::BIND_HOST, port)).await?;
    let url = format!("http://localhost:{}/", listener.local_addr()?.port());

    if cli.development {
        info!("dev server listening at {url}");
    } else {
        info!("server listening at {url}");
        open_browser(&url).await;
    }

    axum::serve(listener, app).await?;

    Ok(())
}

/// Open the URL with the platform browser; failure is only worth a warning.
async fn open_browser(url: &str) {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "cmd"
    } else {
        "xdg-open"
    };

    let mut cmd = tokio::process::Command::new(opener);
    if cfg!(target_os = "windows") {
        cmd.args(["/C", "start", "", url]);
    } else {
        cmd.arg(url);
    }

    match cmd.output().await {
        Ok(output) if output.status.success() => {}
        Ok(output) => warn!(
            "couldn't open browser: {}",
            String::from_utf8_lossy(&output.stderr)
        ),
        Err(err) => warn!("couldn't open browser: {err}"),
    }
}
