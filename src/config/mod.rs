//! Configuration handling for the application.
//!
//! Configuration lives in a small JSON file (`config.json` next to the
//! binary by default, overridable via the `FOLIO_CONFIG` environment
//! variable). A well-formed file may omit any field, which then takes its
//! documented default. A missing or malformed file is not merged partially:
//! the whole configuration falls back to defaults.

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

/// Environment variable naming the configuration file path.
pub const ENV_CONFIG_PATH: &str = "FOLIO_CONFIG";

/// Defaults used when the file is absent, malformed, or omits a field.
const DEFAULT_SUBJECT_URL: &str = "https://www.gutenberg.org/ebooks/subject/2716";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_FONT: &str = "Helvetica";
const DEFAULT_FONT_COLOR: &str = "#800000";
const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default = "default_subject_url")]
    subject_url: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_font")]
    font: String,
    #[serde(default = "default_font_color")]
    font_color: String,
}

fn default_subject_url() -> String {
    DEFAULT_SUBJECT_URL.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_font() -> String {
    DEFAULT_FONT.to_string()
}

fn default_font_color() -> String {
    DEFAULT_FONT_COLOR.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            subject_url: default_subject_url(),
            port: DEFAULT_PORT,
            font: default_font(),
            font_color: default_font_color(),
        }
    }
}

impl Config {
    /// Load from the configured JSON file, falling back entirely to defaults
    /// when the file is missing or cannot be parsed.
    pub fn load() -> Self {
        let path = env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&path))
    }

    /// Load from an explicit path. No partial merge of a corrupt file.
    pub fn load_from(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                warn!(path = %path.display(), %err, "config file unreadable, using defaults");
                return Self::default();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), %err, "config file malformed, using defaults");
                Self::default()
            }
        }
    }

    /// Root URL of the remote subject listing to scrape.
    pub fn subject_url(&self) -> &str {
        &self.subject_url
    }

    /// TCP port for the HTTP server.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Font family used by the document renderer.
    pub fn font(&self) -> &str {
        &self.font
    }

    /// Font color (hex) used by the document renderer.
    pub fn font_color(&self) -> &str {
        &self.font_color
    }

    /// Bind address (host:port) derived from the configured port.
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
