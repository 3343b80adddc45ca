//! Exosky command line
//!
//! `exosky serve` runs the HTTP API, `exosky fetch <name>` runs one
//! star-field query and prints the JSON payload.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::error;
use tracing_subscriber::EnvFilter;

use exosky::server::{self, AppState};
use exosky::ExoskyConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Exoplanet host-star neighbourhoods from Gaia")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve {
        #[command(flatten)]
        common: CommonArgs,

        /// Address to listen on, overriding the config file
        #[arg(long)]
        bind: Option<String>,
    },
    /// Query one target and print the payload as JSON
    Fetch {
        /// Exoplanet or host star name
        name: String,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for snapshot files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Do not write snapshot files
    #[arg(long)]
    no_snapshots: bool,
}

impl CommonArgs {
    fn load_config(&self) -> anyhow::Result<ExoskyConfig> {
        let mut config = ExoskyConfig::load(self.config.as_deref())?;
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if self.no_snapshots {
            config.persist_snapshots = false;
        }
        Ok(config)
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,exosky=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn serve(common: &CommonArgs, bind: Option<String>) -> anyhow::Result<()> {
    let mut config = common.load_config()?;
    if let Some(bind) = bind {
        config.bind_address = bind;
    }
    let addr: SocketAddr = config
        .bind_address
        .parse()
        .with_context(|| format!("Invalid bind address: {}", config.bind_address))?;

    // Blocking HTTP clients are built, and finally dropped, outside the runtime.
    let state = Arc::new(AppState::from_config(&config)?);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let result = runtime.block_on(server::serve(state.clone(), addr));
    drop(runtime);
    drop(state);
    result
}

fn fetch(name: &str, common: &CommonArgs) -> anyhow::Result<bool> {
    let config = common.load_config()?;
    let state = AppState::from_config(&config)?;

    match state.fetch_star_field(name) {
        Some(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(true)
        }
        None => {
            eprintln!("No exoplanet data found for {}", name);
            Ok(false)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let outcome = match &cli.command {
        Command::Serve { common, bind } => serve(common, bind.clone()).map(|_| true),
        Command::Fetch { name, common } => fetch(name, common),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
