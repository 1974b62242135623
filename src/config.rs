use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    server: ServerConfig,
    storage: StorageConfig,
    #[serde(default)]
    mentor: MentorConfig,
    #[serde(default)]
    workspace: WorkspaceConfig,
    #[serde(default)]
    visualizer: VisualizerConfig,
    #[serde(default)]
    forge: ForgeConfig,
}

#[derive(Debug, Clone, Deserialize)]
struct ServerConfig {
    bind: String,
}

#[derive(Debug, Clone, Deserialize)]
struct StorageConfig {
    data_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
struct MentorConfig {
    thinking_delay_min_ms: u64,
    thinking_delay_max_ms: u64,
}

impl Default for MentorConfig {
    fn default() -> Self {
        Self {
            thinking_delay_min_ms: 1200,
            thinking_delay_max_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct WorkspaceConfig {
    submit_delay_ms: u64,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 800,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct VisualizerConfig {
    step_interval_ms: u64,
    dataset: Vec<i64>,
    target: i64,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            step_interval_ms: 600,
            dataset: crate::visualizer::DEFAULT_DATASET.to_vec(),
            target: crate::visualizer::DEFAULT_TARGET,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ForgeConfig {
    url: Option<String>,
    api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: String,
    pub data_dir: PathBuf,
    pub thinking_delay: (Duration, Duration),
    pub submit_delay: Duration,
    pub step_interval: Duration,
    pub dataset: Vec<i64>,
    pub target: i64,
    pub forge_url: Option<String>,
    pub forge_api_key: Option<String>,
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config_file: ConfigFile =
            toml::from_str(content).context("Failed to parse config file")?;

        if config_file.mentor.thinking_delay_max_ms < config_file.mentor.thinking_delay_min_ms {
            anyhow::bail!("mentor.thinking_delay_max_ms must not be below thinking_delay_min_ms");
        }

        Ok(Self {
            bind: config_file.server.bind,
            data_dir: config_file.storage.data_dir.into(),
            thinking_delay: (
                Duration::from_millis(config_file.mentor.thinking_delay_min_ms),
                Duration::from_millis(config_file.mentor.thinking_delay_max_ms),
            ),
            submit_delay: Duration::from_millis(config_file.workspace.submit_delay_ms),
            step_interval: Duration::from_millis(config_file.visualizer.step_interval_ms),
            dataset: config_file.visualizer.dataset,
            target: config_file.visualizer.target,
            forge_url: config_file.forge.url,
            forge_api_key: config_file.forge.api_key,
        })
    }

    pub fn load() -> Result<Self> {
        let path = std::env::args()
            .nth(1)
            .unwrap_or_else(|| "config.toml".to_string());
        Self::from_file(&path)
    }
}
