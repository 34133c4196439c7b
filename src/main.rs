//! Markdown preview server.
//!
//! Serves one Markdown document rendered to HTML, with highlighted code blocks
//! and a raw source tab. `mdpreview render` writes the same page once and exits.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use mdpreview::config::{Args, Command, Config};
use mdpreview::error::{AppError, Result};
use mdpreview::models::Tab;
use mdpreview::{router, AppState};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level.as_str()))
        .init();

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = Config::from_args(args)?;
    let state = Arc::new(AppState::new(config)?);

    match state.config.command.clone() {
        Command::Serve => {
            serve(state).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Render { out, tab } => render_once(&state, out, tab).await,
    }
}

async fn serve(state: Arc<AppState>) -> Result<()> {
    let addr = state.config.bind;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| AppError::Bind { addr, source })?;

    log::info!("Markdown preview running at http://{}", addr);
    log::info!("Input: {}", state.config.input);
    log::info!(
        "Source tab: {}",
        if state.config.tabs { "ENABLED" } else { "DISABLED (--no-tabs)" }
    );
    log::info!("Theme: {}", state.highlighter.theme_name());

    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn render_once(state: &AppState, out: Option<PathBuf>, tab: Tab) -> Result<ExitCode> {
    let (html, report) = state.render_page(Some(tab)).await;

    match out {
        Some(path) => {
            tokio::fs::write(&path, html).await?;
            log::info!("Wrote {}", path.display());
        }
        None => println!("{}", html),
    }

    Ok(if report.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
