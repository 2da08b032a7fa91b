// src/main.rs
mod config;
mod handlers;
mod models;
mod render;
mod session;
mod utils;

use std::io;
use clap::Parser;
use env_logger::Env;
use log::{debug, error};
use crate::config::Config;
use crate::handlers::check::Checker;
use crate::handlers::probe::TcpProber;
use crate::handlers::status::ApiClient;
use crate::session::{EditorInput, Session};

/// Check the status of any Minecraft server
#[derive(Parser, Debug)]
#[command(name = "mcstatus", version)]
struct Cli {
    /// Server address as host[:port]; omit it to start an interactive prompt
    address: Option<String>,
}

fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("warn"));

    let cli = Cli::parse();
    let config = Config::default();

    let source = ApiClient::new(config.clone()).map_err(|e| {
        error!("Failed to build HTTP client: {}", e);
        io::Error::new(io::ErrorKind::Other, format!("Failed to build HTTP client: {}", e))
    })?;
    let checker = Checker::new(source, TcpProber::new(config.timeout()));
    let mut session = Session::new(checker, config, io::stdout());

    match cli.address {
        Some(address) => {
            debug!("Single check for {:?}", address);
            session.run_single(&address)
        }
        None => {
            let mut input = EditorInput::new()?;
            session.run_interactive(&mut input)
        }
    }
}
