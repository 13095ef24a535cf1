//! Runtime configuration shared by both frontends.
//!
//! The web build feeds it the decoded pairs of the page query string
//! (`?demo=materials&log=debug&seed=7&count=5000`); the native build fills it
//! from command-line flags. Keys that are not settings become parameter
//! overrides applied after the demo starts.

use crate::demo::DemoKind;
use crate::error::{DemoError, Result};
use log::LevelFilter;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub demo: DemoKind,
    /// Prefix joined in front of every asset path. Empty means relative to the page.
    pub asset_base: String,
    pub log_level: LevelFilter,
    /// Fixed RNG seed for reproducible galaxies.
    pub seed: Option<u64>,
    pub overrides: Vec<(String, String)>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            demo: DemoKind::default(),
            asset_base: String::new(),
            log_level: LevelFilter::Info,
            seed: None,
            overrides: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Build from already-decoded `key=value` pairs, in order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in pairs {
            config.set(key.as_ref(), value.as_ref())?;
        }
        Ok(config)
    }

    /// Apply one `key=value` setting.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = || DemoError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "demo" => self.demo = value.parse()?,
            "assets" => self.asset_base = value.to_string(),
            "log" => self.log_level = LevelFilter::from_str(value).map_err(|_| invalid())?,
            "seed" => self.seed = Some(value.parse().map_err(|_| invalid())?),
            _ => self.overrides.push((key.to_string(), value.to_string())),
        }
        Ok(())
    }

    pub fn asset_url(&self, path: &str) -> String {
        let base = self.asset_base.trim_end_matches('/');
        if base.is_empty() {
            path.to_string()
        } else {
            format!("{}/{}", base, path.trim_start_matches('/'))
        }
    }
}
