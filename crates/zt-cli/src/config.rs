//! Configuration loading and management.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::TimeDelta;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use zt_core::{Body, Quantum, StepTable};
use zt_ephem::Ayanamsa;

/// Largest accepted `step_days` override, about ten years.
const MAX_STEP_DAYS: u32 = 3650;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Boundary precision when `--precision` is not given.
    pub precision: Quantum,
    /// Ayanamsa when `--ayanamsa` is not given.
    pub ayanamsa: String,
    /// Coarse scan step overrides in days, keyed by planet name.
    pub step_days: BTreeMap<String, u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            precision: Quantum::Day,
            ayanamsa: Ayanamsa::default().as_str().to_string(),
            step_days: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (ZT_*)
        figment = figment.merge(Env::prefixed("ZT_"));

        figment.extract()
    }

    /// Step policy with the configured overrides applied.
    pub fn step_table(&self) -> Result<StepTable> {
        let mut table = StepTable::new();
        for (name, days) in &self.step_days {
            let body: Body = name
                .parse()
                .with_context(|| format!("invalid step_days entry '{name}'"))?;
            if *days == 0 {
                bail!("step_days.{name} must be at least 1 day");
            }
            if *days > MAX_STEP_DAYS {
                bail!("step_days.{name} must be at most {MAX_STEP_DAYS} days");
            }
            table = table.with_step(body, TimeDelta::days(i64::from(*days)));
        }
        Ok(table)
    }

    /// The configured ayanamsa, parsed.
    pub fn ayanamsa(&self) -> Result<Ayanamsa> {
        self.ayanamsa
            .parse()
            .context("invalid ayanamsa in configuration")
    }
}

/// Returns the platform-specific config directory for zt.
///
/// On Linux: `~/.config/zt`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("zt"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    #[test]
    fn test_dirs_config_path_ends_with_zt() {
        if let Some(path) = dirs_config_path() {
            assert_eq!(path.file_name().unwrap(), "zt");
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.precision, Quantum::Day);
        assert_eq!(config.ayanamsa().unwrap(), Ayanamsa::Lahiri);
        assert!(config.step_days.is_empty());
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("zt.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "precision = \"minute\"\nayanamsa = \"fagan\"\n\n[step_days]\nmars = 3"
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.precision, Quantum::Minute);
        assert_eq!(config.ayanamsa().unwrap(), Ayanamsa::FaganBradley);

        let steps = config.step_table().unwrap();
        assert_eq!(steps.step(Body::Mars), TimeDelta::days(3));
        assert_eq!(steps.step(Body::Jupiter), TimeDelta::days(30));
    }

    #[test]
    fn test_step_table_rejects_unknown_body() {
        let config = Config {
            step_days: BTreeMap::from([("vulcan".to_string(), 5)]),
            ..Config::default()
        };
        let err = config.step_table().unwrap_err();
        assert!(format!("{err:#}").contains("unknown planet: vulcan"), "{err:#}");
    }

    #[test]
    fn test_step_table_rejects_zero() {
        let config = Config {
            step_days: BTreeMap::from([("moon".to_string(), 0)]),
            ..Config::default()
        };
        assert!(config.step_table().is_err());
    }

    #[test]
    fn test_step_table_rejects_oversized_step() {
        let config = Config {
            step_days: BTreeMap::from([("mars".to_string(), u32::MAX)]),
            ..Config::default()
        };
        let err = config.step_table().unwrap_err();
        assert!(err.to_string().contains("at most 3650 days"), "{err}");

        let config = Config {
            step_days: BTreeMap::from([("mars".to_string(), MAX_STEP_DAYS)]),
            ..Config::default()
        };
        assert_eq!(
            config.step_table().unwrap().step(Body::Mars),
            TimeDelta::days(3650)
        );
    }

    #[test]
    fn test_invalid_ayanamsa_reports_options() {
        let config = Config {
            ayanamsa: "vedic".to_string(),
            ..Config::default()
        };
        let err = config.ayanamsa().unwrap_err();
        assert!(format!("{err:#}").contains("Valid options"), "{err:#}");
    }
}
