use config::{Config, Environment, File, FileFormat};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";
/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "AGRISK_CONFIG";
/// Prefix of environment overrides (`AGRISK__MODEL__PATH` maps to `model.path`).
pub const ENV_PREFIX: &str = "AGRISK";

/// Custom error type for config loading.
#[agrisk_derive::agrisk_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Environment layer with the dashboard prefix and `__` as nesting separator.
#[must_use]
pub fn env_layer() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

/// Loads configuration from a TOML file overlaid with `AGRISK__*` environment variables.
///
/// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is read when present
/// and the struct defaults apply otherwise.
///
/// # Errors
/// Returns an error if an explicit file is missing, a source is malformed, or the merged
/// values do not match `T`.
///
/// # Example
/// ```rust
/// use agrisk_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local.toml")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_config_with(path, env_layer())
}

/// Same as [`load_config`] with a caller-supplied environment layer.
///
/// # Errors
/// See [`load_config`].
pub fn load_config_with<T>(
    path: Option<impl AsRef<Path>>,
    environment: Environment,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let required = path.is_some();
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    info!(path = %effective_path.display(), required, "Loading config");

    let config = Config::builder()
        .add_source(File::from(effective_path.as_path()).format(FileFormat::Toml).required(required))
        .add_source(environment)
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
