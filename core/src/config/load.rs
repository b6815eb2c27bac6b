use std::path::{Path, PathBuf};

use anyhow::Context;

use super::types::AppConfig;
use crate::error::ConfigError;

pub const CONFIG_FILE_NAME: &str = "collapse.toml";

/// Loads `./collapse.toml`, falling back to `<config dir>/collapse/config.toml`, then defaults.
/// Environment overrides are applied on top.
pub fn load_default() -> Result<AppConfig, ConfigError> {
    let candidates = [
        Some(PathBuf::from(CONFIG_FILE_NAME)),
        dirs::config_dir().map(|d| d.join("collapse").join("config.toml")),
    ];

    let mut cfg = match candidates.into_iter().flatten().find(|p| p.exists()) {
        Some(path) => parse_file(&path)?,
        None => AppConfig::default(),
    };
    apply_env_overrides(&mut cfg, |k| std::env::var(k).ok())?;
    cfg.validate()?;
    Ok(cfg)
}

/// Loads an explicitly requested file; a missing file is an error here.
pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }
    let mut cfg = parse_file(path)?;
    apply_env_overrides(&mut cfg, |k| std::env::var(k).ok())?;
    cfg.validate()?;
    Ok(cfg)
}

fn parse_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))
        .map_err(ConfigError::Parse)?;
    let cfg = toml::from_str::<AppConfig>(&s)
        .with_context(|| format!("parsing {}", path.display()))
        .map_err(ConfigError::Parse)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(cfg)
}

/// Applies `COLLAPSE_*` overrides. `lookup` is `std::env::var` outside of tests.
pub fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("COLLAPSE_SHOTS") {
        let shots: u32 = v
            .trim()
            .parse()
            .map_err(|e: std::num::ParseIntError| ConfigError::EnvInvalid {
                key: "COLLAPSE_SHOTS".to_string(),
                source: e.into(),
            })?;
        cfg.simulate.shots = shots;
        cfg.azure.shots = shots;
    }
    if let Some(v) = get("COLLAPSE_QIR_RUNNER") {
        cfg.simulate.qir_runner = Some(v);
    }
    if let Some(v) = get("COLLAPSE_AZURE_TARGET") {
        cfg.azure.target_id = Some(v);
    }
    if let Some(v) = get("COLLAPSE_LOG_LEVEL") {
        cfg.logging.level = v;
    }
    Ok(())
}
