use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable pointing at the TOML configuration file
pub const CONFIG_ENV: &str = "WORDCLOUD_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub corpus: CorpusConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Processed dataset, `.csv` or `.jsonl`
    pub path: PathBuf,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/processed/papers.csv"),
        }
    }
}

/// Word-cloud canvas and layout parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub background: [u8; 3],
    pub max_words: usize,
    pub min_font_size: u32,
    /// Defaults to the canvas height when unset
    pub max_font_size: Option<u32>,
    pub font_step: u32,
    pub relative_scaling: f32,
    pub prefer_horizontal: f32,
    pub margin: u32,
    /// Fixed layout seed; derived from the input text when unset
    pub random_state: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            background: [255, 255, 255],
            max_words: 200,
            min_font_size: 4,
            max_font_size: None,
            font_step: 1,
            relative_scaling: 0.5,
            prefer_horizontal: 0.9,
            margin: 2,
            random_state: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from `$WORDCLOUD_CONFIG` (or `config.toml`), falling back to
    /// defaults when the file does not exist. `PORT` overrides the server port.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_path(Path::new(&path))?;

        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {port}"))?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_toml(&raw).with_context(|| format!("Invalid config file {:?}", path))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let render = &self.render;
        if render.width == 0 || render.height == 0 {
            anyhow::bail!("render.width and render.height must be positive");
        }
        if !(0.0..=1.0).contains(&render.relative_scaling) {
            anyhow::bail!("render.relative_scaling must be between 0 and 1");
        }
        if !(0.0..=1.0).contains(&render.prefer_horizontal) {
            anyhow::bail!("render.prefer_horizontal must be between 0 and 1");
        }
        if render.min_font_size == 0 {
            anyhow::bail!("render.min_font_size must be at least 1");
        }
        if render.font_step == 0 {
            anyhow::bail!("render.font_step must be at least 1");
        }
        if render.max_words == 0 {
            anyhow::bail!("render.max_words must be at least 1");
        }
        Ok(())
    }
}
