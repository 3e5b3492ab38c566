//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use coursequiz_core::session::SessionConfig;

/// Environment variable that overrides the configured shuffle seed.
pub const SEED_ENV: &str = "COURSEQUIZ_SEED";

/// Top-level coursequiz configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Shuffle seed; sessions are seeded from entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Session controller settings.
    #[serde(default)]
    pub session: SessionConfig,
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `coursequiz.toml` in the current directory
/// 2. `~/.config/coursequiz/config.toml`
///
/// `COURSEQUIZ_SEED` overrides the configured seed.
pub fn load_config_from(path: Option<&Path>) -> Result<CliConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("coursequiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<CliConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => CliConfig::default(),
    };

    apply_seed_override(&mut config, std::env::var(SEED_ENV).ok().as_deref())?;
    Ok(config)
}

fn apply_seed_override(config: &mut CliConfig, value: Option<&str>) -> Result<()> {
    if let Some(value) = value {
        let seed = value
            .trim()
            .parse::<u64>()
            .with_context(|| format!("invalid {SEED_ENV} value: '{value}'"))?;
        config.seed = Some(seed);
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("coursequiz"))
}
