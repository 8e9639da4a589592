#![doc = include_str!("../README.md")]

mod plugin;

use anyhow::Context;
use clap::Parser;
use plugin::config::{CliArgs, PluginConfig};
use plugin::telemetry::init_telemetry;
use prost::Message;
use std::io::{Read, Write};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = PluginConfig::try_from(args)?;

    init_telemetry()?;

    if cfg!(debug_assertions) {
        tracing::debug!("Starting with full config: {:#?}", config);
    }

    let input = read_input(config.input.as_deref())?;
    let response = go_inject_core::plugin::run(&input, config.generator);
    if response.error.is_none() {
        tracing::info!(files = response.file.len(), "Generated bindings");
    }

    write_output(config.output.as_deref(), &response.encode_to_vec())
}

fn read_input(path: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("failed to read `{}`", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .context("failed to read request from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&Path>, bytes: &[u8]) -> anyhow::Result<()> {
    match path {
        Some(path) => std::fs::write(path, bytes)
            .with_context(|| format!("failed to write `{}`", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(bytes)
                .and_then(|()| stdout.flush())
                .context("failed to write response to stdout")
        }
    }
}
