//! User-entered actual measurements.
//!
//! Records live in `measurements.json` as a JSON array sorted by date, at
//! most one record per `YYYY-MM-DD` date. Saving a record merges it into
//! the stored record for the same date field by field.

use crate::storage::{read_locked, remove_if_exists, with_exclusive_lock, write_atomic};
use crate::{Error, MeasurementRecord, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// File name of the measurement collection inside the data directory
pub const MEASUREMENTS_FILE: &str = "measurements.json";

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn validate_date(raw: &str) -> Result<()> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|e| Error::Measurement(format!("Invalid date {:?}: {}", raw, e)))
}

/// JSON-file-backed measurement store
#[derive(Clone, Debug)]
pub struct MeasurementStore {
    path: PathBuf,
}

impl MeasurementStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the standard location inside `data_dir`
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(MEASUREMENTS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every record, sorted by date
    ///
    /// A missing or corrupted file yields an empty collection.
    pub fn load_all(&self) -> Result<Vec<MeasurementRecord>> {
        let contents = match read_locked(&self.path) {
            Ok(Some(contents)) => contents,
            Ok(None) => return Ok(Vec::new()),
            Err(e) => {
                tracing::warn!("Unable to read measurements {:?}: {}", self.path, e);
                return Ok(Vec::new());
            }
        };

        match serde_json::from_str::<Vec<MeasurementRecord>>(&contents) {
            Ok(mut records) => {
                records.sort_by(|a, b| a.date.cmp(&b.date));
                tracing::debug!("Loaded {} measurements from {:?}", records.len(), self.path);
                Ok(records)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse measurements {:?}: {}. Using empty set.",
                    self.path,
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    fn write_all(&self, records: &[MeasurementRecord]) -> Result<()> {
        let contents = serde_json::to_string(records)?;
        write_atomic(&self.path, contents.as_bytes())
    }

    /// Record for a single date, if any
    pub fn get(&self, date: NaiveDate) -> Result<Option<MeasurementRecord>> {
        let key = date_key(date);
        Ok(self.load_all()?.into_iter().find(|r| r.date == key))
    }

    /// Merge `record` into the stored record for its date
    ///
    /// Returns the record as stored after the merge.
    pub fn save(&self, record: MeasurementRecord) -> Result<MeasurementRecord> {
        validate_date(&record.date)?;
        with_exclusive_lock(&self.path, || {
            let mut records = self.load_all()?;

            let merged = match records.iter().position(|r| r.date == record.date) {
                Some(index) => {
                    records[index].merge(record);
                    records[index].clone()
                }
                None => {
                    records.push(record.clone());
                    record
                }
            };

            records.sort_by(|a, b| a.date.cmp(&b.date));
            self.write_all(&records)?;
            tracing::debug!("Saved measurement for {}", merged.date);
            Ok(merged)
        })
    }

    /// Flip a daily goal for a date; returns whether it is now completed
    pub fn toggle_goal(&self, date: NaiveDate, label: &str) -> Result<bool> {
        let key = date_key(date);
        with_exclusive_lock(&self.path, || {
            let mut records = self.load_all()?;

            let index = match records.iter().position(|r| r.date == key) {
                Some(index) => index,
                None => {
                    records.push(MeasurementRecord::for_date(date));
                    records.len() - 1
                }
            };

            let goals = &mut records[index].completed_goals;
            let completed = if goals.remove(label) {
                false
            } else {
                goals.insert(label.to_string());
                true
            };

            records.sort_by(|a, b| a.date.cmp(&b.date));
            self.write_all(&records)?;
            tracing::debug!("Goal {:?} on {} completed: {}", label, key, completed);
            Ok(completed)
        })
    }

    /// Delete the record for a date; returns whether one existed
    pub fn delete(&self, date: NaiveDate) -> Result<bool> {
        let key = date_key(date);
        with_exclusive_lock(&self.path, || {
            let mut records = self.load_all()?;
            let before = records.len();
            records.retain(|r| r.date != key);

            if records.len() == before {
                return Ok(false);
            }
            self.write_all(&records)?;
            Ok(true)
        })
    }

    /// Remove every record
    pub fn clear(&self) -> Result<()> {
        remove_if_exists(&self.path)?;
        tracing::info!("Cleared measurements at {:?}", self.path);
        Ok(())
    }

    /// Weight from the latest record in `[start, end]` that has one
    pub fn most_recent_weight_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<f64>> {
        Ok(most_recent_weight_in(&self.load_all()?, start, end))
    }
}

/// Weight from the latest record in `[start, end]` that has one
///
/// Works on an already loaded, date-sorted collection so callers can scan
/// many weeks without re-reading the file.
pub fn most_recent_weight_in(
    records: &[MeasurementRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Option<f64> {
    let (start, end) = (date_key(start), date_key(end));
    records
        .iter()
        .rev()
        .filter(|r| r.date >= start && r.date <= end)
        .find_map(|r| r.weight)
}
