//! Configuration management for the preview server.
//!
//! Handles:
//! - Command-line argument parsing
//! - Resolving the Markdown input location and renderer options

use crate::error::{AppError, Result};
use crate::highlight::DEFAULT_THEME;
use crate::loader::ResourceLocation;
use crate::markdown::RenderOptions;
use crate::models::Tab;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "input.md";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_TITLE: &str = "Markdown Preview";

/// Command-line arguments for the preview server
#[derive(Debug, Parser)]
#[command(name = "mdpreview")]
#[command(about = "Render a Markdown file to HTML with highlighted code and a source view")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Markdown resource: a file path or an http(s) URL
    #[arg(long, global = true, default_value = DEFAULT_INPUT)]
    pub input: String,

    /// Address to listen on
    #[arg(long, global = true, default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// Syntax highlighting theme
    #[arg(long, global = true, default_value = DEFAULT_THEME)]
    pub theme: String,

    /// Document title
    #[arg(long, global = true, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Only show the rendered preview, without source view or tabs
    #[arg(long, global = true)]
    pub no_tabs: bool,

    /// Pass raw HTML from the Markdown through unsanitized
    #[arg(long, global = true)]
    pub no_sanitize: bool,

    /// Log level for the server
    #[arg(
        long,
        global = true,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serve the preview page over HTTP (default)
    Serve,
    /// Render the page once and write it to a file or stdout
    Render {
        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,

        /// Tab to show initially
        #[arg(long, default_value = "preview")]
        tab: Tab,
    },
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub command: Command,
    pub input: ResourceLocation,
    pub bind: SocketAddr,
    pub theme: String,
    pub title: String,
    pub tabs: bool,
    pub render: RenderOptions,
    pub log_level: String,
}

impl Config {
    /// Resolve parsed arguments into the server configuration
    pub fn from_args(args: Args) -> Result<Self> {
        let input = ResourceLocation::parse(&args.input).map_err(AppError::InvalidLocation)?;

        let render = RenderOptions {
            sanitize: !args.no_sanitize,
            ..RenderOptions::default()
        };

        Ok(Config {
            command: args.command.unwrap_or(Command::Serve),
            input,
            bind: args.bind,
            theme: args.theme,
            title: args.title,
            tabs: !args.no_tabs,
            render,
            log_level: args.log_level,
        })
    }
}
