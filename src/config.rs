// src/config.rs

use std::env;

/// Directory, relative to the base, that holds the CSV files.
pub const DEFAULT_DATA_DIR: &str = "/data";

/// Where the loader reads its resources from.
///
/// Each resource resolves to `{base}{data_dir}/{name}.csv`, so a base of
/// `https://example.com` and the default data dir give
/// `https://example.com/data/drivers.csv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// HTTP(S) origin or filesystem directory.
    pub base: String,
    pub data_dir: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            base: ".".to_string(),
            data_dir: DEFAULT_DATA_DIR.to_string(),
        }
    }
}

impl LoaderConfig {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            ..Self::default()
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<String>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Defaults overridden by `PADDOCK_BASE` / `PADDOCK_DATA_DIR`.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(base) = env::var("PADDOCK_BASE") {
            cfg.base = base;
        }
        if let Ok(dir) = env::var("PADDOCK_DATA_DIR") {
            cfg.data_dir = dir;
        }
        cfg
    }

    /// Full location of `file_name` under this config.
    pub fn resource_path(&self, file_name: &str) -> String {
        format!(
            "{}{}/{}",
            self.base.trim_end_matches('/'),
            self.data_dir.trim_end_matches('/'),
            file_name
        )
    }
}
