use jyotish::ephemeris::DEFAULT_EPHE_PATH;
use jyotish::ChartSettings;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Relative locations tried, in order, when no config path is given.
pub const CANDIDATE_PATHS: [&str; 2] = ["jyotish.toml", "configs/jyotish.toml"];

/// Environment variables consulted for the ephemeris directory, in order.
pub const EPHE_ENV_VARS: [&str; 2] = ["EPHE_PATH", "SWISS_EPHEMERIS_PATH"];

#[derive(Debug, Clone)]
pub struct JyotishConfig {
    /// File the settings came from; `None` when running on defaults.
    pub source: Option<PathBuf>,
    pub ephemeris_path: PathBuf,
    pub chart: ChartSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    ephemeris: EphemerisToml,
    #[serde(default)]
    chart: ChartSettings,
}

/// Read the config text from `explicit`, or from the first candidate path
/// that exists. A missing explicit file is an error; missing candidates are not.
pub fn read_config_text(explicit: Option<&Path>) -> anyhow::Result<Option<(PathBuf, String)>> {
    if let Some(path) = explicit {
        let text = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Could not read config {}: {e}", path.display()))?;
        return Ok(Some((path.to_path_buf(), text)));
    }
    for p in &CANDIDATE_PATHS {
        if let Ok(text) = fs::read_to_string(p) {
            return Ok(Some((PathBuf::from(p), text)));
        }
    }
    Ok(None)
}

/// Ephemeris directory: environment first, then the config file, then `./ephe`.
pub fn resolve_ephemeris_path<F>(configured: Option<PathBuf>, env: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    EPHE_ENV_VARS
        .iter()
        .find_map(|name| env(name).filter(|v| !v.trim().is_empty()))
        .map(PathBuf::from)
        .or(configured)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_EPHE_PATH))
}

pub fn parse_config(text: &str, source: Option<PathBuf>) -> anyhow::Result<JyotishConfig> {
    let name = source
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "config".to_string());
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse {name}: {e}"))?;
    validate_chart_settings(&root.chart)?;

    Ok(JyotishConfig {
        source,
        ephemeris_path: resolve_ephemeris_path(root.ephemeris.path, |k| std::env::var(k).ok()),
        chart: root.chart,
    })
}

/// Orbs must be finite and non-negative.
pub fn validate_chart_settings(chart: &ChartSettings) -> anyhow::Result<()> {
    let orbs = &chart.orbs;
    for (name, orb) in [
        ("conjunction", orbs.conjunction),
        ("sextile", orbs.sextile),
        ("square", orbs.square),
        ("trine", orbs.trine),
        ("opposition", orbs.opposition),
    ] {
        if !orb.is_finite() || orb < 0.0 {
            anyhow::bail!("chart.orbs.{name} must be a non-negative number, got {orb}");
        }
    }
    Ok(())
}

/// Load settings from `explicit` or the candidate paths, falling back to
/// defaults when no file is found.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<JyotishConfig> {
    match read_config_text(explicit)? {
        Some((path, text)) => {
            log::info!("Loading configuration from {}", path.display());
            parse_config(&text, Some(path))
        }
        None => {
            log::info!("No configuration file found in {:?}; using defaults", CANDIDATE_PATHS);
            parse_config("", None)
        }
    }
}
