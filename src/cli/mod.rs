use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "captioneer",
    about = "Captioneer - Fetch YouTube captions as text, JSON, SRT or WebVTT",
    version,
    long_about = "Reads the caption tracks a YouTube video advertises, downloads the track for the requested language and prints it as plain text, JSON, SRT or WebVTT."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the captions of a video
    Fetch {
        /// Video ID or URL (watch, embed, /v/ or youtu.be links)
        #[arg(value_name = "VIDEO")]
        video: String,

        /// Caption language code (first available track if not specified)
        #[arg(short, long, value_name = "LANG", env = "CAPTIONEER_LANG")]
        lang: Option<String>,

        /// Output format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file path (prints to console if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Prefix each line with its start time in text output
        #[arg(long)]
        timestamps: bool,
    },

    /// List the caption languages a video offers
    Languages {
        /// Video ID or URL
        #[arg(value_name = "VIDEO")]
        video: String,
    },

    /// Show or initialize the configuration file
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,

        /// Write a default configuration file
        #[arg(long, conflicts_with = "show")]
        init: bool,
    },
}

#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum OutputFormat {
    /// Plain text
    Text,
    /// JSON array of entries
    Json,
    /// SRT subtitle format
    Srt,
    /// WebVTT format
    Vtt,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Srt => write!(f, "srt"),
            OutputFormat::Vtt => write!(f, "vtt"),
        }
    }
}
