//! Needle API - CLI server
//!
//! Headless project tracking API suitable for deployment as a systemd
//! service, Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/needle/config.toml)
//! needle
//!
//! # Custom config path
//! needle --config /etc/needle/config.toml
//!
//! # Override listener and database
//! needle --host 127.0.0.1 --port 8080 --database-url sqlite://./dev.db?mode=rwc
//!
//! # Validate config without starting
//! needle --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use needle::config::AppConfig;
use needle::server::{init_tracing, ServerHandle, ServerOptions};

/// Needle: project tracking REST API.
#[derive(Parser, Debug)]
#[command(
    name = "needle",
    version,
    about = "Project tracking REST API",
    long_about = "Needle: projects, memberships, priorities, statuses and stories \
                  over a JSON REST API.\n\n\
                  Default config: ~/.config/needle/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "NEEDLE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen host.
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the database URL.
    #[arg(long)]
    database_url: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the configured admin user.
    #[arg(long)]
    no_admin: bool,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = &self.database_url {
            config.database.url = url.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(needle::default_config_path);

    let loaded = AppConfig::load(&config_path);

    if cli.check {
        let mut config = loaded?;
        cli.apply_overrides(&mut config);
        config.validate()?;
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.server.address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        println!("   Removal     : {:?}", config.policy.user_removal);
        return Ok(());
    }

    let (mut config, load_error) = match loaded {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    cli.apply_overrides(&mut config);

    // Init tracing first so subsequent logs are formatted properly
    init_tracing(&config);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    start(config, &cli).await
}

async fn start(config: AppConfig, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.wait().await;
    Ok(())
}
