//! Recent searches and unit preference, persisted as small JSON documents.
//!
//! Each key lives in its own file under the data directory. Missing or
//! unreadable documents fall back to defaults; callers never see read errors.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::model::{LocationInfo, Units};

pub const RECENT_SEARCHES_KEY: &str = "weather-app-recent-searches";
pub const UNITS_KEY: &str = "weather-app-units";

pub const MAX_RECENT: usize = 5;

/// Newest first, at most [`MAX_RECENT`] entries, unique by `(name, country)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentSearches(Vec<LocationInfo>);

impl RecentSearches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `location` at the front, dropping an older entry for the same place
    /// and anything past the limit.
    pub fn insert(&mut self, location: LocationInfo) {
        self.0.retain(|existing| !existing.same_place(&location));
        self.0.insert(0, location);
        self.0.truncate(MAX_RECENT);
    }

    pub fn entries(&self) -> &[LocationInfo] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&LocationInfo> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Enforce the list invariants on data read from disk.
    fn normalized(entries: Vec<LocationInfo>) -> Self {
        let mut out = Self::new();
        for loc in entries.into_iter().rev() {
            out.insert(loc);
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct UnitsPreference {
    #[serde(rename = "isMetric")]
    is_metric: bool,
}

#[derive(Debug, Clone)]
pub struct PreferenceStore {
    dir: PathBuf,
}

impl PreferenceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under the platform data directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(crate::Config::data_dir()?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub fn recent_searches(&self) -> RecentSearches {
        self.read::<Vec<LocationInfo>>(RECENT_SEARCHES_KEY)
            .map(RecentSearches::normalized)
            .unwrap_or_default()
    }

    /// Record a successful lookup and return the updated list.
    pub fn save_recent_search(&self, location: &LocationInfo) -> Result<RecentSearches> {
        let mut recent = self.recent_searches();
        recent.insert(location.clone());
        self.write(RECENT_SEARCHES_KEY, &recent)?;
        Ok(recent)
    }

    /// Metric unless a valid preference says otherwise.
    pub fn units(&self) -> Units {
        let is_metric = self
            .read::<UnitsPreference>(UNITS_KEY)
            .map(|p| p.is_metric)
            .unwrap_or(true);
        Units::from_metric_flag(is_metric)
    }

    pub fn save_units(&self, units: Units) -> Result<()> {
        self.write(UNITS_KEY, &UnitsPreference { is_metric: units.is_metric() })
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path_for(key);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable preference file, using defaults");
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "corrupt preference file, using defaults");
                None
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create data directory: {}", self.dir.display()))?;

        let path = self.path_for(key);
        let json = serde_json::to_string(value).context("Failed to serialize preference")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write preference file: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinates;

    fn loc(name: &str, country: &str) -> LocationInfo {
        LocationInfo {
            name: name.into(),
            country: country.into(),
            coordinates: Coordinates::new(1.0, 2.0),
        }
    }

    fn names(recent: &RecentSearches) -> Vec<&str> {
        recent.entries().iter().map(|l| l.name.as_str()).collect()
    }

    #[test]
    fn reinserting_moves_to_front() {
        let mut recent = RecentSearches::new();
        recent.insert(loc("Paris", "France"));
        recent.insert(loc("Oslo", "Norway"));
        recent.insert(loc("Paris", "France"));

        assert_eq!(names(&recent), ["Paris", "Oslo"]);
    }

    #[test]
    fn same_name_other_country_is_distinct() {
        let mut recent = RecentSearches::new();
        recent.insert(loc("Paris", "France"));
        recent.insert(loc("Paris", "United States"));
        assert_eq!(recent.len(), 2);
    }

    #[test]
    fn keeps_five_most_recent() {
        let mut recent = RecentSearches::new();
        for name in ["A", "B", "C", "D", "E", "F"] {
            recent.insert(loc(name, "X"));
        }
        assert_eq!(names(&recent), ["F", "E", "D", "C", "B"]);
    }

    #[test]
    fn missing_files_give_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = PreferenceStore::new(dir.path().join("never-created"));
        assert!(store.recent_searches().is_empty());
        assert_eq!(store.units(), Units::METRIC);
    }

    #[test]
    fn corrupt_files_give_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = PreferenceStore::new(dir.path());
        fs::write(store.path_for(RECENT_SEARCHES_KEY), "[{\"name\":").expect("write");
        fs::write(store.path_for(UNITS_KEY), "{\"isMetric\":\"yes\"}").expect("write");

        assert!(store.recent_searches().is_empty());
        assert_eq!(store.units(), Units::METRIC);
    }

    #[test]
    fn persists_recent_searches_newest_first() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = PreferenceStore::new(dir.path());

        store.save_recent_search(&loc("Tokyo", "Japan")).expect("save");
        store.save_recent_search(&loc("Oslo", "Norway")).expect("save");
        store.save_recent_search(&loc("Tokyo", "Japan")).expect("save");

        let reopened = PreferenceStore::new(dir.path());
        assert_eq!(names(&reopened.recent_searches()), ["Tokyo", "Oslo"]);

        let raw = fs::read_to_string(store.path_for(RECENT_SEARCHES_KEY)).expect("read");
        let json: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert!(json.is_array());
        assert_eq!(json[0]["coordinates"]["latitude"], 1.0);
    }

    #[test]
    fn oversized_stored_list_is_trimmed_on_read() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = PreferenceStore::new(dir.path());
        let stored: Vec<LocationInfo> =
            ["A", "B", "A", "C", "D", "E", "F", "G"].iter().map(|n| loc(n, "X")).collect();
        fs::write(
            store.path_for(RECENT_SEARCHES_KEY),
            serde_json::to_string(&stored).expect("json"),
        )
        .expect("write");

        assert_eq!(names(&store.recent_searches()), ["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn units_flag_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = PreferenceStore::new(dir.path());

        store.save_units(Units::IMPERIAL).expect("save");
        assert_eq!(store.units(), Units::IMPERIAL);

        let raw = fs::read_to_string(store.path_for(UNITS_KEY)).expect("read");
        assert_eq!(raw, r#"{"isMetric":false}"#);
    }
}
