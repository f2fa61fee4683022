use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Browser User-Agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_4) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/85.0.4183.83 Safari/537.36,gzip(gfe)";

/// Output formats understood by the front end
pub const OUTPUT_FORMATS: &[&str] = &["text", "json", "srt", "vtt"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Transport settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Defaults applied when the command line leaves them out
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header value
    pub user_agent: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Fail on any non-success HTTP status inside the transport
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Caption language to request (first track if not set)
    pub language: Option<String>,

    /// Default output format
    #[serde(default = "default_output_format")]
    pub output_format: String,
}

fn default_output_format() -> String {
    "text".to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            strict: false,
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            language: None,
            output_format: default_output_format(),
        }
    }
}

impl Config {
    /// Load configuration from file or fall back to defaults
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                tracing::debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load and validate a specific configuration file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs_err::read_to_string(path).context("Failed to read config file")?;

        let config: Config =
            serde_yaml::from_str(&content).context("Failed to parse config file")?;

        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_path().context("Could not determine config directory")?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;

        fs_err::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Get configuration file path
    pub fn config_path() -> Option<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("captioneer.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir().map(|dir| dir.join("captioneer").join("config.yaml"))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            anyhow::bail!("http.user_agent must not be empty");
        }

        if self.http.timeout_secs == 0 {
            anyhow::bail!("http.timeout_secs must be greater than zero");
        }

        if !OUTPUT_FORMATS.contains(&self.defaults.output_format.as_str()) {
            anyhow::bail!(
                "defaults.output_format must be one of {}, got '{}'",
                OUTPUT_FORMATS.join(", "),
                self.defaults.output_format
            );
        }

        Ok(())
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  User-Agent: {}", self.http.user_agent);
        println!("  Timeout: {}s", self.http.timeout_secs);
        println!("  Strict HTTP: {}", self.http.strict);
        println!(
            "  Default Language: {}",
            self.defaults.language.as_deref().unwrap_or("(first available track)")
        );
        println!("  Default Format: {}", self.defaults.output_format);
        if let Some(path) = Self::config_path() {
            println!("  Config File: {}", path.display());
        }
    }
}
