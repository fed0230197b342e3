//! Backing source resolution: maps a city to a readable CSV stream.

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::SourceConfig;
use crate::error::{Result, StatsError};
use crate::selection::City;

/// Opens the raw trip log for a city.
pub trait SourceResolver {
    fn open(&self, city: City) -> Result<Box<dyn Read>>;
}

/// Resolves cities to files on the local filesystem.
///
/// A `.gz` path is decompressed transparently. When a plain `.csv` path does
/// not exist, a sibling `.csv.gz` is tried before giving up.
pub struct FileResolver {
    config: SourceConfig,
}

impl FileResolver {
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// The file that would be opened for `city`, if any exists.
    pub fn locate(&self, city: City) -> Option<PathBuf> {
        let path = self.config.path_for(city);
        if path.is_file() {
            return Some(path);
        }
        let gz = gz_sibling(&path);
        gz.is_file().then_some(gz)
    }
}

impl SourceResolver for FileResolver {
    fn open(&self, city: City) -> Result<Box<dyn Read>> {
        let path = self.locate(city).ok_or_else(|| {
            StatsError::data_source(
                city,
                format!("{} not found", self.config.path_for(city).display()),
            )
        })?;
        debug!(city = %city, path = %path.display(), "Opening trip source");

        let file = File::open(&path)
            .map_err(|e| StatsError::data_source(city, format!("{}: {e}", path.display())))?;

        if is_gzip(&path) {
            Ok(Box::new(GzDecoder::new(BufReader::new(file))))
        } else {
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("gz")
}

fn gz_sibling(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".gz");
    PathBuf::from(name)
}
