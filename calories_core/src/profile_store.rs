//! User profile persistence.
//!
//! The profile is a single JSON record in `profile.json` under the data
//! directory. A profile saved without a start date gets today's date when
//! it is loaded back.

use crate::storage::{read_locked, remove_if_exists, with_exclusive_lock, write_atomic};
use crate::{Result, UserProfile};
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};

/// File name of the profile record inside the data directory
pub const PROFILE_FILE: &str = "profile.json";

/// JSON-file-backed profile store
#[derive(Clone, Debug)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    /// Store at an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the standard location inside `data_dir`
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(PROFILE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the profile, backfilling a missing start date with today
    ///
    /// Returns `None` if no profile is saved. A corrupted file is logged
    /// and treated as absent.
    pub fn load(&self) -> Result<Option<UserProfile>> {
        self.load_with_today(Local::now().date_naive())
    }

    /// Load the profile, backfilling a missing start date with `today`
    pub fn load_with_today(&self, today: NaiveDate) -> Result<Option<UserProfile>> {
        let contents = match read_locked(&self.path) {
            Ok(Some(contents)) => contents,
            Ok(None) => {
                tracing::info!("No profile found at {:?}", self.path);
                return Ok(None);
            }
            Err(e) => {
                tracing::warn!("Unable to read profile {:?}: {}. Ignoring it.", self.path, e);
                return Ok(None);
            }
        };

        let mut profile = match serde_json::from_str::<UserProfile>(&contents) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!("Failed to parse profile {:?}: {}. Ignoring it.", self.path, e);
                return Ok(None);
            }
        };

        if profile.start_date.trim().is_empty() {
            profile.start_date = today.format("%Y-%m-%d").to_string();
            tracing::debug!("Backfilled missing start date with {}", profile.start_date);
        }

        tracing::debug!("Loaded profile from {:?}", self.path);
        Ok(Some(profile))
    }

    /// Save the profile, replacing any existing one
    pub fn save(&self, profile: &UserProfile) -> Result<()> {
        let contents = serde_json::to_string_pretty(profile)?;
        write_atomic(&self.path, contents.as_bytes())?;
        tracing::debug!("Saved profile to {:?}", self.path);
        Ok(())
    }

    /// Remove the saved profile
    pub fn clear(&self) -> Result<()> {
        remove_if_exists(&self.path)?;
        tracing::info!("Cleared profile at {:?}", self.path);
        Ok(())
    }

    /// Load, modify and save the profile
    ///
    /// Fails if no profile has been saved yet.
    pub fn update<F>(&self, f: F) -> Result<UserProfile>
    where
        F: FnOnce(&mut UserProfile) -> Result<()>,
    {
        with_exclusive_lock(&self.path, || {
            let mut profile = self
                .load()?
                .ok_or_else(|| crate::Error::Profile("No profile saved".into()))?;
            f(&mut profile)?;
            self.save(&profile)?;
            Ok(profile)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Gender;

    fn sample_profile() -> UserProfile {
        UserProfile {
            age: 41,
            weight: 212.5,
            height_feet: 6,
            height_inches: 1,
            gender: Gender::Male,
            calories_eaten: 2100.0,
            calories_burned_exercise: 400.0,
            start_date: "2024-05-01".into(),
            goal_weight: 190.0,
            daily_goals: vec!["Walk 10k steps".into()],
        }
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::in_dir(temp_dir.path());

        store.save(&sample_profile()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample_profile()));
    }

    #[test]
    fn test_load_missing_returns_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::in_dir(temp_dir.path());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_missing_start_date_is_backfilled() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::in_dir(temp_dir.path());
        store
            .save(&UserProfile {
                start_date: String::new(),
                ..sample_profile()
            })
            .unwrap();

        let today = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let loaded = store.load_with_today(today).unwrap().unwrap();
        assert_eq!(loaded.start_date, "2024-06-03");
    }

    #[test]
    fn test_corrupted_profile_is_absent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::in_dir(temp_dir.path());
        std::fs::write(store.path(), "{ not json").unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_clear_removes_profile() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::in_dir(temp_dir.path());
        store.save(&sample_profile()).unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_update_pattern() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::in_dir(temp_dir.path());
        assert!(store.update(|_| Ok(())).is_err());

        store.save(&sample_profile()).unwrap();
        store
            .update(|p| {
                p.goal_weight = 185.0;
                Ok(())
            })
            .unwrap();
        assert_eq!(store.load().unwrap().unwrap().goal_weight, 185.0);
    }
}
