//! Configuration loading for the prompt debugger

mod schema;

pub use schema::{AnalyzerConfig, DEFAULT_MAX_PROMPT_LENGTH, DEFAULT_TOKEN_PRICE_PER_1K};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = ".promptdebugrc.json";

/// Find and load the config file. Searches current directory then parents.
/// With no file anywhere, the defaults apply.
pub fn load_config(work_dir: &Path, custom_path: Option<&Path>) -> Result<AnalyzerConfig> {
    let path = if let Some(p) = custom_path {
        let path = if p.is_absolute() {
            p.to_path_buf()
        } else {
            work_dir.join(p)
        };
        if path.exists() {
            Some(path)
        } else {
            anyhow::bail!("Config file not found: {}", path.display());
        }
    } else {
        find_config_in_parents(work_dir)
    };

    match path {
        Some(path) => load_config_file(&path),
        None => Ok(AnalyzerConfig::default()),
    }
}

fn load_config_file(config_path: &Path) -> Result<AnalyzerConfig> {
    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
    let config: AnalyzerConfig = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in config: {}", config_path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config: {}", config_path.display()))?;
    Ok(config)
}

/// Search for .promptdebugrc.json in directory and its parents
fn find_config_in_parents(mut dir: &Path) -> Option<PathBuf> {
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}
