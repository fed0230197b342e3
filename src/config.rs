//! Source configuration: the data directory and per-city path overrides.

use anyhow::{Context, Result, bail};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::selection::City;

/// Where each city's trip log lives.
///
/// Explicit paths can be supplied as a plain JSON object on disk:
/// ```json
/// {
///   "chicago": "/srv/bikeshare/chicago.csv",
///   "washington": "/srv/bikeshare/washington.csv.gz"
/// }
/// ```
/// Cities without an entry resolve to their default file name inside
/// `data_dir`.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    data_dir: PathBuf,
    overrides: HashMap<City, PathBuf>,
}

impl SourceConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            overrides: HashMap::new(),
        }
    }

    /// Reads per-city path overrides from a JSON file at `path`.
    ///
    /// Relative paths in the file are taken relative to `data_dir`.
    pub fn with_overrides_file(mut self, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read source config {}", path.display()))?;
        let entries: HashMap<String, String> = serde_json::from_str(&content)
            .with_context(|| format!("Invalid source config {}", path.display()))?;

        for (id, source) in entries {
            let Some(city) = City::from_id(&id) else {
                bail!("Unknown city `{id}` in source config {}", path.display());
            };
            self.overrides.insert(city, PathBuf::from(source));
        }
        Ok(self)
    }

    /// Configured path for `city`, before any compression fallback.
    pub fn path_for(&self, city: City) -> PathBuf {
        match self.overrides.get(&city) {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => self.data_dir.join(p),
            None => self.data_dir.join(city.default_file_name()),
        }
    }
}
