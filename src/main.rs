use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use leadform::cli::{execute, Cli};
use leadform::config::Settings;
use tracing::Level;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only command output
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::new_with_cli(&cli)
        .with_context(|| format!("loading settings from {}", cli.config.display()))?;

    let output = execute(&cli.command, &settings).context("command failed")?;
    println!("{}", serde_json::to_string_pretty(&output.json)?);

    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
