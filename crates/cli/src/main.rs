//! domainkv server binary.
//!
//! ```text
//! domainkv                              # listen on 127.0.0.1:9000
//! domainkv --bind 0.0.0.0:9000
//! domainkv --config domainkv.toml --seed 42
//! RUST_LOG=domainkv=debug domainkv      # per-request logging
//! ```
//!
//! Command-line flags override values from the config file. Ctrl-C stops
//! accepting, closes open connections, and exits.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use domainkv_server::{KvsServer, ServerConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "domainkv")]
#[command(about = "In-memory multi-tenant key-value store over websockets", long_about = None)]
#[command(version)]
struct Cli {
    /// Address to listen on (default 127.0.0.1:9000)
    #[arg(short, long)]
    bind: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base seed for skip-list levels, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn server_config(&self) -> Result<ServerConfig, String> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(path)
                .map_err(|e| format!("failed to load {}: {}", path.display(), e))?,
            None => ServerConfig::default(),
        };
        if let Some(bind) = &self.bind {
            config.bind_addr = bind.clone();
        }
        if self.seed.is_some() {
            config.store.skiplist_seed = self.seed;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match cli.server_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    let server = match KvsServer::bind(config).await {
        Ok(server) => server,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    let handle = server.spawn();
    tracing::info!(url = %handle.url(), "ready");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
    }
    tracing::info!("ctrl-c received");
    handle.shutdown().await;
}
