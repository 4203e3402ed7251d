use crate::config::ServerConfig;
use crate::error::Result;
use crate::models::{PipelineGraph, PipelineReport};
use crate::server;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Handle the serve command
pub async fn handle_serve(config: ServerConfig) -> Result<()> {
    server::run(config).await
}

/// Handle the check command
pub fn handle_check(file: Option<&Path>) -> Result<()> {
    let input = match file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let report = check_input(&input)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

/// Parse a graph description and compute its report
pub fn check_input(input: &str) -> Result<PipelineReport> {
    let graph = PipelineGraph::from_json(input)?;
    Ok(PipelineReport::from_graph(&graph))
}
