use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default city names and the file each one reads, relative to the data directory.
const DEFAULT_CITIES: &[(&str, &str)] = &[
    ("chicago", "chicago.csv"),
    ("new york city", "new_york_city.csv"),
    ("washington", "washington.csv"),
];

/// Maps city names to the trip log file for that city.
///
/// Stored as a plain JSON object on disk:
/// ```json
/// {
///   "chicago": "data/chicago.csv",
///   "washington": "/srv/bikeshare/washington.csv.gz"
/// }
/// ```
/// Relative paths are resolved against the directory holding the config file.
#[derive(Debug, Clone)]
pub struct CityConfig {
    entries: BTreeMap<String, PathBuf>,
}

impl CityConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading city config {}", path.display()))?;
        let raw: BTreeMap<String, PathBuf> = serde_json::from_str(&content)
            .with_context(|| format!("parsing city config {}", path.display()))?;

        let base = path.parent().unwrap_or(Path::new("."));
        let entries = raw
            .into_iter()
            .map(|(city, file)| {
                let file = if file.is_relative() { base.join(file) } else { file };
                (city.trim().to_lowercase(), file)
            })
            .collect();

        Ok(Self { entries })
    }

    /// The built-in three-city mapping under `data_dir`.
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        let entries = DEFAULT_CITIES
            .iter()
            .map(|(city, file)| (city.to_string(), data_dir.join(file)))
            .collect();
        Self { entries }
    }

    /// Resolves the config the CLI runs with: an explicit file, then
    /// `BIKESHARE_CONFIG`, then the defaults under `BIKESHARE_DATA_DIR` (or `data`).
    pub fn from_env(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Ok(path) = std::env::var("BIKESHARE_CONFIG") {
            return Self::load(path);
        }
        let data_dir = std::env::var("BIKESHARE_DATA_DIR").unwrap_or_else(|_| "data".to_string());
        Ok(Self::with_data_dir(data_dir))
    }

    /// Returns the trip log path for `city`, if one is configured.
    pub fn path_for(&self, city: &str) -> Option<&Path> {
        self.entries.get(city).map(PathBuf::as_path)
    }

    /// Configured city names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over all `(city, path)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_path()))
    }
}
