use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{ensure_resumen_home, resumen_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub import: ImportSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSection {
    /// Pesos per dollar used when none is passed with --rate
    pub exchange_rate: f64,
    /// Taxes residual (pesos) above which a taxes row is booked
    pub materiality_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// env_logger filter used when RUST_LOG is unset
    pub level: String,
}

impl Default for ImportSection {
    fn default() -> Self {
        Self {
            exchange_rate: 0.0,
            materiality_threshold: resumen_finance::store::DEFAULT_MATERIALITY_THRESHOLD,
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(resumen_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config) -> Result<PathBuf> {
    let p = ensure_resumen_home()?.join("config.toml");
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(p)
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let p = save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.import.materiality_threshold, 100.0);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[import]\nexchange_rate = 1475.5\n").unwrap();

        let cfg = load_config_from(&p).unwrap();
        assert_eq!(cfg.import.exchange_rate, 1475.5);
        assert_eq!(cfg.import.materiality_threshold, 100.0);
        assert_eq!(cfg.logging, LoggingSection::default());
    }

    #[test]
    fn test_empty_sections_fill_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[import]\nmateriality_threshold = 250.0\n[logging]\n").unwrap();

        let cfg = load_config_from(&p).unwrap();
        assert_eq!(cfg.import.exchange_rate, 0.0);
        assert_eq!(cfg.import.materiality_threshold, 250.0);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[import\n").unwrap();
        assert!(load_config_from(&p).is_err());
    }
}
