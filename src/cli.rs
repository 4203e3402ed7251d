use crate::config::{ALLOWED_ORIGIN_ENV, DEFAULT_ALLOWED_ORIGIN, DEFAULT_BIND};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pipeline-check")]
#[command(about = "Checks that pipeline graphs are acyclic")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP service
    Serve {
        /// Address to listen on
        #[arg(long, default_value = DEFAULT_BIND)]
        bind: SocketAddr,
        /// Origin allowed to call the service from a browser
        #[arg(long, env = ALLOWED_ORIGIN_ENV, default_value = DEFAULT_ALLOWED_ORIGIN)]
        allowed_origin: String,
    },

    /// Check a graph description and print the report
    Check {
        /// JSON file with `nodes` and `edges` (reads stdin when omitted)
        file: Option<PathBuf>,
    },
}
