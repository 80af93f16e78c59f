//! vyperd - HTTP compile service for the Vyper language.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use vyperd_core::{Compiler, VyperToolchain};
use vyperd_server::ServerConfig;

#[derive(Parser)]
#[command(name = "vyperd")]
#[command(about = "HTTP compile service for the Vyper language")]
#[command(version)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8000)]
    port: u16,

    /// Number of concurrent compile workers
    #[arg(short, long, default_value_t = 4)]
    workers: usize,

    /// Path to the vyper executable (defaults to a PATH lookup)
    #[arg(long)]
    vyper: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let toolchain = match cli.vyper {
        Some(path) => VyperToolchain::with_path(path)?,
        None => VyperToolchain::new()?,
    };
    tracing::info!("vyper toolchain: {}", toolchain.version());

    let config = ServerConfig {
        host: cli.host,
        port: cli.port,
        workers: cli.workers,
    };

    let compiler: Arc<dyn Compiler> = Arc::new(toolchain);
    vyperd_server::serve(compiler, config).await?;

    Ok(())
}
