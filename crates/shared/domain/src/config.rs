use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level dashboard configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfigInner {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub model: ModelConfig,
    pub assessment: AssessmentConfig,
    pub history: HistoryConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into feature slices.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(flatten, default)]
    inner: Arc<DashboardConfigInner>,
}

impl Deref for DashboardConfig {
    type Target = DashboardConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for DashboardConfig {
    fn deref_mut(&mut self) -> &mut DashboardConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

/// Log output. Console output is always on; `directory` adds rolling files.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Extra `EnvFilter` directives, e.g. `"tower_http=debug"`.
    pub filter: Option<String>,
    pub directory: Option<PathBuf>,
    pub json: bool,
    pub rotation: LogRotation,
    pub max_files: usize,
}

/// Location of the classifier artifact. `None` means no model.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub path: Option<PathBuf>,
}

#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssessmentConfig {
    /// Cap multiplied probabilities at 1.0. Off keeps the raw product.
    pub clamp_probability: bool,
}

/// Synthetic history settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Fixed RNG seed; OS entropy per request when unset.
    pub seed: Option<u64>,
    pub first_year: u16,
    pub last_year: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 4583, ssl: None }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            filter: None,
            directory: None,
            json: false,
            rotation: LogRotation::Daily,
            max_files: 7,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { seed: None, first_year: 2018, last_year: 2023 }
    }
}
