use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::Config;
use crate::error::{Result, SecureHeadersError};
use crate::headers::create_secure_headers;

/// Configuration file syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// `.json` files are JSON, everything else is TOML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

pub fn load_from_path<P: AsRef<Path>>(p: P) -> Result<Config> {
    let path = p.as_ref();
    let txt = fs::read_to_string(path)
        .map_err(|e| SecureHeadersError::Config(format!("Failed to read config file: {e}")))?;

    let cfg = load_from_str(&txt, ConfigFormat::from_path(path))?;
    debug!(path = %path.display(), "Configuration loaded");

    Ok(cfg)
}

pub fn load_from_str(txt: &str, format: ConfigFormat) -> Result<Config> {
    let cfg: Config = match format {
        ConfigFormat::Toml => toml::from_str(txt)
            .map_err(|e| SecureHeadersError::Config(format!("Failed to parse config: {e}")))?,
        ConfigFormat::Json => serde_json::from_str(txt)
            .map_err(|e| SecureHeadersError::Config(format!("Failed to parse config: {e}")))?,
    };

    validate_config(&cfg)?;

    Ok(cfg)
}

/// Options that deserialize can still fail at synthesis (bad URIs, missing
/// directive parameters, non-finite max-age), so build every header once.
fn validate_config(cfg: &Config) -> Result<()> {
    create_secure_headers(&cfg.headers)
        .map_err(|e| SecureHeadersError::Config(format!("Invalid header options: {e}")))?;
    Ok(())
}
