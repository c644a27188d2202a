//! Capsule demo entry point

use anyhow::{Context, Result};
use capsule_core::RuntimeConfig;
use capsule_demo::{script, Session, DEFAULT_SCRIPT};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "capsule-demo")]
#[command(about = "Scripted single-page application built from Capsule pages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log filter, used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted session and print the view after each step
    Run(RunCommand),
}

#[derive(Args)]
struct RunCommand {
    /// Steps such as "nav:signup input:name=Al click:submit wait:1500"
    #[arg(short, long)]
    script: Option<String>,

    /// Runtime configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .with_context(|| format!("invalid log level `{}`", cli.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run(cmd) => run(cmd),
    }
}

fn run(cmd: RunCommand) -> Result<()> {
    let config = match &cmd.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            RuntimeConfig::from_toml_str(&text)
                .with_context(|| format!("loading {}", path.display()))?
        }
        None => RuntimeConfig::default(),
    };

    let steps = script::parse(cmd.script.as_deref().unwrap_or(DEFAULT_SCRIPT))?;
    tracing::info!(steps = steps.len(), ?config, "starting session");

    let mut session = Session::start(config)?;
    println!("start\n  {}", session.render());
    for step in &steps {
        let processed = session.apply(step)?;
        println!("{step} ({processed} messages)\n  {}", session.render());
    }

    let users = session.shell().users();
    tracing::info!(registered = users.len(), "session finished");
    Ok(())
}
