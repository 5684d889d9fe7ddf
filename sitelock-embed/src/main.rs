//! SiteLock embed server and license tool.
//!
//! Usage:
//!   sitelock-embed serve --port 10000 --template public/api/embed.html
//!   sitelock-embed issue --domain example.com [--expiry 2026-12-31]
//!   sitelock-embed check --license <TOKEN> --host shop.example.com
//!
//! The server is stateless apart from rate-limit counters.

use std::{net::SocketAddr, path::PathBuf, process::ExitCode, sync::Arc, time::Duration};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use sitelock_embed::{
    DEFAULT_EMBED_PATH, EmbedConfig, EmbedState, FileTemplateStore, HEALTH_PATH, OsNonceSource,
    RateLimitConfig, build_router,
};
use sitelock_license::generator::{self, DEFAULT_EMBED_BASE_URL};
use sitelock_license::validate_token;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "sitelock-embed")]
#[command(about = "Domain-bound license tokens and CSP-nonce embed delivery")]
struct Args {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the embeddable page
    Serve {
        /// HTTP port to listen on
        #[arg(short, long, env = "PORT", default_value = "10000")]
        port: u16,

        /// Path to the embed page template
        #[arg(short, long, default_value = "public/api/embed.html")]
        template: PathBuf,

        /// Route the embed page is served on
        #[arg(long, default_value = DEFAULT_EMBED_PATH)]
        embed_path: String,

        /// Requests allowed per address per window (0 disables limiting)
        #[arg(long, default_value = "100")]
        rate_limit_max: u64,

        /// Rate limit window in seconds
        #[arg(long, default_value = "900")]
        rate_limit_window_secs: u64,

        /// Distinct source addresses tracked at once (IPv6 counted per /64)
        #[arg(long, default_value = "10000")]
        rate_limit_max_sources: usize,
    },

    /// Issue a license token and print the embed snippet
    Issue {
        /// Domain the license is bound to
        #[arg(short, long)]
        domain: String,

        /// Last valid day (YYYY-MM-DD); defaults to one month from today
        #[arg(short, long)]
        expiry: Option<NaiveDate>,

        /// Where the embed page is hosted
        #[arg(long, default_value = DEFAULT_EMBED_BASE_URL)]
        base_url: String,
    },

    /// Validate a license token against a host
    Check {
        /// The license token
        #[arg(short, long)]
        license: String,

        /// Host the page is running on
        #[arg(long)]
        host: String,

        /// Date to check against (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    match args.command {
        Command::Serve {
            port,
            template,
            embed_path,
            rate_limit_max,
            rate_limit_window_secs,
            rate_limit_max_sources,
        } => {
            let rate_limit = (rate_limit_max > 0).then(|| RateLimitConfig {
                max_requests: rate_limit_max,
                window: Duration::from_secs(rate_limit_window_secs),
                max_sources: rate_limit_max_sources,
            });
            serve(port, template, EmbedConfig { embed_path, rate_limit, ..EmbedConfig::default() }).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Issue { domain, expiry, base_url } => {
            let today = Local::now().date_naive();
            let issued = generator::issue(&domain, expiry, today).context("Failed to issue license")?;
            let url = issued.embed_url(&base_url);

            println!("Key:        {}", issued.record.key());
            println!("Domain:     {}", issued.record.domain());
            println!("Expires:    {}", issued.record.expiry_date());
            println!("Generated:  {}", issued.record.generation_date());
            println!("Token:      {}", issued.token);
            println!("Embed URL:  {}", url);
            println!("Script tag: {}", generator::script_tag(&url));
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { license, host, date } => {
            let today = date.unwrap_or_else(|| Local::now().date_naive());
            let outcome = validate_token(Some(&license), &host, today);
            println!("{}", outcome);
            Ok(if outcome.is_valid() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
    }
}

async fn serve(port: u16, template: PathBuf, config: EmbedConfig) -> Result<()> {
    info!("SiteLock embed server starting...");
    let templates = FileTemplateStore::new(template);
    info!("Embed template: {}", templates.path().display());
    match &config.rate_limit {
        Some(limit) => info!(
            "Rate limit: {} requests per {}s per address",
            limit.max_requests,
            limit.window.as_secs()
        ),
        None => info!("Rate limiting disabled"),
    }

    let embed_path = config.embed_path.clone();
    let state = Arc::new(EmbedState::new(config, templates, OsNonceSource));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind HTTP port {port}"))?;
    info!("Listening on port {}", port);
    info!("Embeddable content at {}", embed_path);
    info!("Liveness route at {}", HEALTH_PATH);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .context("HTTP server failed")
}
