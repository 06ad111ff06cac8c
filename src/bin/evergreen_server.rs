//! HTTP server for the index service.
//!
//! Usage:
//!   evergreen_server [--data-dir <dir>] [--listen <addr>] [--debug]

use clap::Parser;
use evergreen::types::{DEFAULT_DATA_DIR, DEFAULT_LISTEN_ADDR};
use evergreen::Config;
use std::path::PathBuf;
use std::process::exit;

/// Evergreen index server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Storage root holding one file per index
    #[arg(short = 'D', long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Address to listen on
    #[arg(short, long, default_value = DEFAULT_LISTEN_ADDR)]
    listen: String,

    /// Do not create the storage root if it is missing
    #[arg(long)]
    no_create_data_dir: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = Config::new(args.data_dir)
        .listen_addr(args.listen)
        .create_data_dir(!args.no_create_data_dir);

    if let Err(e) = evergreen::server::serve(config).await {
        log::error!("server error: {}", e);
        exit(1);
    }
}
