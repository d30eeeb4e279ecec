use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::analysis::{AnalysisLimits, Analyzer};
use crate::similarity::DEFAULT_THRESHOLD_PCT;

/// Central configuration loaded from environment variables.
///
/// Nothing is required: every value has a default. The .env file is loaded
/// automatically at startup via dotenvy.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// HTTP port (PORT, default 5000)
    pub port: u16,
    /// Bind address (BIND_ADDR, default 0.0.0.0)
    pub bind_addr: String,
    /// Minimum similarity percentage to report (TRACER_THRESHOLD, default 40)
    pub threshold_pct: f64,
    /// Fewest files accepted per analysis (TRACER_MIN_FILES, default 2)
    pub min_files: usize,
    /// Most files accepted per analysis (TRACER_MAX_FILES, default 100)
    pub max_files: usize,
    /// Upload body limit in megabytes (TRACER_MAX_UPLOAD_MB, default 50)
    pub max_upload_mb: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            bind_addr: "0.0.0.0".to_string(),
            threshold_pct: DEFAULT_THRESHOLD_PCT,
            min_files: 2,
            max_files: 100,
            max_upload_mb: 50,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. `load` uses the process
    /// environment; tests pass a map.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            port: parse_or(&lookup, "PORT", defaults.port)?,
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            threshold_pct: parse_or(&lookup, "TRACER_THRESHOLD", defaults.threshold_pct)?,
            min_files: parse_or(&lookup, "TRACER_MIN_FILES", defaults.min_files)?,
            max_files: parse_or(&lookup, "TRACER_MAX_FILES", defaults.max_files)?,
            max_upload_mb: parse_or(&lookup, "TRACER_MAX_UPLOAD_MB", defaults.max_upload_mb)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot honor.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.threshold_pct) {
            anyhow::bail!(
                "TRACER_THRESHOLD must be between 0 and 100 (got {})",
                self.threshold_pct
            );
        }
        if self.min_files < 2 {
            anyhow::bail!(
                "TRACER_MIN_FILES must be at least 2 (got {})",
                self.min_files
            );
        }
        if self.max_files < self.min_files {
            anyhow::bail!(
                "TRACER_MAX_FILES ({}) must not be below TRACER_MIN_FILES ({})",
                self.max_files,
                self.min_files
            );
        }
        if self.max_upload_mb == 0 {
            anyhow::bail!("TRACER_MAX_UPLOAD_MB must be greater than 0");
        }
        Ok(())
    }

    pub fn limits(&self) -> AnalysisLimits {
        AnalysisLimits {
            min_files: self.min_files,
            max_files: self.max_files,
        }
    }

    /// Analyzer configured with this config's limits and threshold.
    pub fn analyzer(&self) -> Analyzer {
        Analyzer::new(self.limits(), self.threshold_pct)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        _ => Ok(default),
    }
}
