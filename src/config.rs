use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "earthlens", about = "Web front end for the EarthLens reporting platform")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Base URL of the EarthLens backend API
    #[arg(long)]
    pub api_url: Option<String>,

    /// Path to data directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub reports: ReportsConfig,
    pub green_actions: GreenActionsConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AuthConfig {
    pub token_hours: u64,
}

/// Where the dashboard gets its reports from.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportSourceKind {
    #[default]
    Api,
    Fixtures,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ReportsConfig {
    pub source: ReportSourceKind,
    pub page_size: usize,
    pub analyze_after_submit: bool,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct GreenActionsConfig {
    pub next_task_delay_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5001/api".to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { token_hours: 24 }
    }
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            source: ReportSourceKind::Api,
            page_size: 6,
            analyze_after_submit: true,
        }
    }
}

impl Default for GreenActionsConfig {
    fn default() -> Self {
        Self {
            next_task_delay_ms: 2000,
        }
    }
}

impl GreenActionsConfig {
    pub fn next_task_delay(&self) -> Duration {
        Duration::from_millis(self.next_task_delay_ms)
    }
}

impl Config {
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let data_dir = Self::data_dir(cli);
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| data_dir.join("config.toml"));

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        // CLI overrides
        if let Some(ref host) = cli.host {
            config.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            config.server.port = port;
        }
        if let Some(ref api_url) = cli.api_url {
            config.api.base_url = api_url.clone();
        }

        url::Url::parse(&config.api.base_url).map_err(|e| {
            anyhow::anyhow!("invalid api base_url {:?}: {}", config.api.base_url, e)
        })?;
        if config.reports.page_size == 0 {
            anyhow::bail!("reports.page_size must be at least 1");
        }

        Ok(config)
    }

    pub fn data_dir(cli: &Cli) -> PathBuf {
        cli.data_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".earthlens")
        })
    }
}
