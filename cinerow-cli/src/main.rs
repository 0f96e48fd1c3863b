use std::path::PathBuf;

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use cinerow_cli::output::render_text;
use cinerow_cli::{CatalogFile, ReplayOptions, Script, replay, replay_realtime};
use cinerow_config::ConfigLoad;
use cinerow_core::slider::Easing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "cinerow")]
#[command(about = "Drive the Cinerow catalog core from scripted sessions")]
struct Cli {
    /// Configuration file (TOML or JSON). Defaults to $CINEROW_CONFIG_PATH,
    /// $CINEROW_CONFIG_JSON, then cinerow.toml in the working directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a session script and print the emitted effects
    Replay(ReplayArgs),
    /// Print the effective configuration
    Config {
        #[arg(long, value_enum, default_value_t = ConfigFormat::Toml)]
        format: ConfigFormat,
    },
}

#[derive(ClapArgs, Debug, Clone)]
struct ReplayArgs {
    /// Catalog file listing rows and their titles
    #[arg(long)]
    catalog: PathBuf,

    /// Session script of timed input messages
    #[arg(long)]
    script: PathBuf,

    /// Viewport width in pixels, used to pick items per row
    #[arg(long, default_value_t = 1920.0)]
    width: f32,

    /// Sleep on the wall clock instead of jumping a virtual clock
    #[arg(long)]
    realtime: bool,

    /// Never report slide completion, so every move stalls
    #[arg(long)]
    no_auto_complete: bool,

    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,cinerow_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let loaded = match cli.config.as_deref() {
        Some(path) => ConfigLoad::from_path(path)?,
        None => ConfigLoad::from_env()?,
    };
    tracing::info!(source = %loaded.source, "configuration ready");

    match cli.command {
        Command::Config { format } => {
            match format {
                ConfigFormat::Toml => {
                    let rendered = toml::to_string_pretty(&loaded.config)
                        .context("render configuration as TOML")?;
                    println!("# source: {}", loaded.source);
                    println!("{rendered}");
                }
                // Stdout stays parseable; the source goes to stderr.
                ConfigFormat::Json => {
                    let rendered = serde_json::to_string_pretty(&loaded.config)
                        .context("render configuration as JSON")?;
                    eprintln!("source: {}", loaded.source);
                    println!("{rendered}");
                }
            }
        }
        Command::Replay(args) => {
            let catalog = CatalogFile::load(&args.catalog)?;
            let script = Script::load(&args.script)?;
            let options = ReplayOptions {
                viewport_width: args.width,
                auto_complete: !args.no_auto_complete,
                easing: Easing::default(),
            };
            let report = if args.realtime {
                replay_realtime(loaded.config, &catalog, &script, options).await?
            } else {
                replay(loaded.config, &catalog, &script, options)?
            };
            match args.format {
                ReportFormat::Text => print!("{}", render_text(&report)),
                ReportFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&report)
                        .context("serialize replay report")?
                ),
            }
        }
    }
    Ok(())
}
