use std::path::{Path, PathBuf};

use regex::Regex;

use super::types::{ReportConfig, StatsFold};

pub const DEFAULT_CONFIG_FILE: &str = "playbook-report.toml";

/// Load `path` if given, else `./playbook-report.toml` if present, else defaults.
/// Environment overrides are applied last.
pub fn load_default(path: Option<&Path>) -> anyhow::Result<ReportConfig> {
    let local_config = PathBuf::from(DEFAULT_CONFIG_FILE);

    let mut cfg = match path {
        Some(p) => load_from_path(p)?,
        None if local_config.exists() => load_from_path(&local_config)?,
        None => ReportConfig::default(),
    };

    apply_env_overrides(&mut cfg)?;
    validate(&cfg)?;
    Ok(cfg)
}

pub fn load_from_path(path: &Path) -> anyhow::Result<ReportConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("read config {} failed: {e}", path.display()))?;
    let cfg = toml::from_str::<ReportConfig>(&s)
        .map_err(|e| anyhow::anyhow!("parse config {} failed: {e}", path.display()))?;
    Ok(cfg)
}

fn apply_env_overrides(cfg: &mut ReportConfig) -> anyhow::Result<()> {
    if let Ok(v) = std::env::var("PLAYBOOK_REPORT_STATS_FOLD") {
        if !v.trim().is_empty() {
            cfg.merge.stats_fold = v.parse::<StatsFold>().map_err(anyhow::Error::msg)?;
        }
    }
    if let Ok(v) = std::env::var("PLAYBOOK_REPORT_LOG_LEVEL") {
        if !v.trim().is_empty() {
            cfg.logging.level = v;
        }
    }
    if let Ok(v) = std::env::var("PLAYBOOK_REPORT_LOG_FILE") {
        if !v.trim().is_empty() {
            cfg.logging.file = Some(PathBuf::from(v.trim()));
        }
    }
    Ok(())
}

pub fn validate(cfg: &ReportConfig) -> anyhow::Result<()> {
    for pattern in &cfg.merge.skip_patterns {
        Regex::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid skip pattern '{pattern}': {e}"))?;
    }
    if let Some(file) = &cfg.logging.file {
        if file.file_name().is_none() {
            anyhow::bail!("logging.file {} does not name a file", file.display());
        }
    }
    if cfg.merge.read_chunk_bytes == 0 {
        anyhow::bail!("merge.read_chunk_bytes must be greater than zero");
    }
    Ok(())
}
