//! Lendbook Server Binary

use anyhow::{Context, Result};
use clap::Parser;
use lendbook_config::{ConfigLoader, LendbookConfig, Validatable};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use lendbook_server::Server;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (YAML or JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Server bind address, overrides the configuration
    #[arg(short, long, value_name = "ADDR")]
    bind: Option<SocketAddr>,

    /// Print default configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", LendbookConfig::generate_sample());
        return Ok(());
    }

    let mut config = ConfigLoader::new()
        .load(cli.config.as_ref())
        .context("Failed to load configuration")?;

    if let Some(config_path) = &cli.config {
        resolve_relative_paths(&mut config, config_path);
    }

    if let Some(bind) = cli.bind {
        config.server.bind_address = bind.ip().to_string();
        config.server.port = bind.port();
        config.server.validate()?;
    }

    let server = Server::new(config)?;
    server.start().await
}

/// Navigation files are looked up next to the configuration file
fn resolve_relative_paths(config: &mut LendbookConfig, config_path: &Path) {
    let Some(base) = config_path.parent() else {
        return;
    };

    if let Some(navigation) = config.access.navigation_file.as_mut() {
        if navigation.is_relative() {
            *navigation = base.join(&*navigation);
        }
    }
}
