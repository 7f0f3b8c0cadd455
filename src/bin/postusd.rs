//! Reference binary: loads a TOML config, wires the in-memory reference
//! collaborators into a listener, and runs until terminated.

use std::sync::Arc;

use clap::Parser;

use postus::config::Config;
use postus::listener::Listener;
use postus::mem::{MemIdentity, MemPersistence, MemPolicy};

#[derive(Parser)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, env = "POSTUS_CONFIG", default_value = "/etc/postus.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = Config::from_file(&args.config)?;

    let persistence = Arc::new(MemPersistence::default());
    let identity = Arc::new(MemIdentity::new(config.site_name.clone()));
    let policy = Arc::new(MemPolicy::default());

    let listener = Listener::start(config, persistence, identity, policy).await?;

    tokio::signal::ctrl_c().await?;
    listener.shutdown();
    Ok(())
}
