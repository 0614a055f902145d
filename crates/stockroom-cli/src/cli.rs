use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use stockroom_server::ServerConfig;

#[derive(Parser)]
#[command(
    name = "stockroom",
    about = "Stockroom — in-memory inventory service with photo uploads",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Validate the configuration and print it as TOML
    CheckConfig(ServeArgs),
}

/// Server settings. Flags override values read from `--config`.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// TOML file with host, port and cache_dir
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub host: Option<String>,
    #[arg(short, long)]
    pub port: Option<u16>,
    /// Directory photo uploads are stored in
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,
    /// Directory holding UploadForm.html and SearchForm.html
    #[arg(long)]
    pub static_dir: Option<PathBuf>,
    #[arg(long)]
    pub max_upload_bytes: Option<usize>,
}

impl ServeArgs {
    /// Merge the config file (if any) with command-line flags.
    pub fn resolve(&self) -> anyhow::Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => {
                let mut missing = Vec::new();
                if self.host.is_none() {
                    missing.push("--host");
                }
                if self.port.is_none() {
                    missing.push("--port");
                }
                if self.cache_dir.is_none() {
                    missing.push("--cache-dir");
                }
                if !missing.is_empty() {
                    bail!("missing required settings: {} (or pass --config)", missing.join(", "));
                }
                ServerConfig::new("", 0, "")
            }
        };

        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(cache_dir) = &self.cache_dir {
            config.cache_dir = cache_dir.clone();
        }
        if let Some(static_dir) = &self.static_dir {
            config.static_dir = static_dir.clone();
        }
        if let Some(max) = self.max_upload_bytes {
            config.max_upload_bytes = max;
        }
        config.validate()?;
        Ok(config)
    }
}
