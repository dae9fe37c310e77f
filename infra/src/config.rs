//! Layered configuration loading
//!
//! Later layers override earlier ones:
//! 1. Built-in defaults and the plain variables read by `AppConfig::from_env`
//!    (`JWT_KEY`, `APP_KEY`, `JWT_TTL`, `REDIS_URL`, ...), after `.env` is loaded
//! 2. An optional `config/<environment>` file (TOML, YAML or JSON)
//! 3. `TG_`-prefixed variables, nested with `__` (e.g. `TG_JWT__TTL=3600`)

use ::config::{Config, Environment, File, Map};
use tg_shared::config::AppConfig;
use tracing::debug;

use crate::InfrastructureError;

/// Prefix of the highest-priority environment variables
pub const ENV_PREFIX: &str = "TG";

/// Loads the application configuration from every layer
///
/// # Errors
/// `InfrastructureError::ConfigSource` if the file or a `TG_` variable
/// cannot be parsed into the expected shape.
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    if let Ok(path) = dotenvy::dotenv() {
        debug!(path = %path.display(), "Loaded .env file");
    }

    let base = AppConfig::from_env();
    let file = base.environment.config_file();
    load_layers(&base, file)
}

/// Merges `base` with the optional file named `file` and the `TG_` variables
pub fn load_layers(base: &AppConfig, file: &str) -> Result<AppConfig, InfrastructureError> {
    merge_layers(base, file, None)
}

/// `vars` replaces the process environment when given
fn merge_layers(
    base: &AppConfig,
    file: &str,
    vars: Option<Map<String, String>>,
) -> Result<AppConfig, InfrastructureError> {
    let merged = Config::builder()
        .add_source(Config::try_from(base)?)
        .add_source(File::with_name(file).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(vars),
        )
        .build()?;

    Ok(merged.try_deserialize()?)
}
