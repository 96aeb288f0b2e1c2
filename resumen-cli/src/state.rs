use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `RESUMEN_HOME` if set, else `~/.resumen`
pub fn resumen_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("RESUMEN_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".resumen"))
}

pub fn ensure_resumen_home() -> Result<PathBuf> {
    let dir = resumen_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
