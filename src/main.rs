use anyhow::Result;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use captioneer::cli::{Cli, Commands, OutputFormat};
use captioneer::utils::format_duration;
use captioneer::{output, CaptionEntry, Captioneer, CaptioneerError, Config, FetchOptions};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for captions
    let default_filter = if cli.verbose {
        "captioneer=debug"
    } else {
        "captioneer=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Fetch {
            video,
            lang,
            format,
            output,
            timestamps,
        } => {
            let config = Config::load()?;
            let captioneer = Captioneer::from_config(&config)?;
            let options = FetchOptions {
                lang: lang.or_else(|| config.defaults.language.clone()),
            };
            let format = match format {
                Some(format) => format,
                None => OutputFormat::from_str(&config.defaults.output_format, true)
                    .map_err(|e| anyhow::anyhow!("Invalid default output format: {}", e))?,
            };

            let progress = spinner(cli.quiet, "Fetching captions...");
            let result = captioneer.fetch_captions(&video, &options).await;
            progress.finish_and_clear();
            let entries: Vec<CaptionEntry> = result.map_err(report)?;

            match output {
                Some(path) => {
                    output::save_to_file(&entries, &path, &format, timestamps)?;
                    let span = entries.last().map(|entry| entry.end()).unwrap_or(0.0);
                    println!(
                        "Captions saved to: {} ({} entries, {})",
                        path.display(),
                        entries.len(),
                        format_duration(span)
                    );
                }
                None => {
                    output::print_to_console(&entries, &format, timestamps)?;
                }
            }
        }
        Commands::Languages { video } => {
            let config = Config::load()?;
            let captioneer = Captioneer::from_config(&config)?;

            let progress = spinner(cli.quiet, "Reading caption tracks...");
            let result = captioneer
                .list_caption_tracks(&video, &FetchOptions::default())
                .await;
            progress.finish_and_clear();
            let tracks = result.map_err(report)?;

            if tracks.is_empty() {
                println!("No caption tracks available");
            } else {
                println!("Available caption languages:");
                for code in tracks.language_codes() {
                    println!("  • {}", code);
                }
            }
        }
        Commands::Config { show, init } => {
            if init {
                let path = Config::default().save()?;
                println!("Configuration written to: {}", path.display());
            } else {
                Config::load()?.display();
                if !show {
                    println!();
                    println!("Run `captioneer config --init` to write a default configuration file.");
                }
            }
        }
    }

    Ok(())
}

/// Log the structured record of a pipeline failure before surfacing it
fn report(error: CaptioneerError) -> anyhow::Error {
    tracing::debug!("Caption pipeline failed: {}", error.to_json());
    error.into()
}

fn spinner(quiet: bool, message: &'static str) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        progress.set_style(style);
    }
    progress.set_message(message);
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}
