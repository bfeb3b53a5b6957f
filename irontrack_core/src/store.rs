//! CSV-backed workout store.
//!
//! The store owns the single on-disk table of workout sets. Reads load the
//! whole file; writes rewrite it in full through a temp-file rename so an
//! interrupted write leaves the previous contents intact. There is no read
//! cache, so a row appended by one call is visible to the next `load`.

use crate::{catalog, Error, Result, WorkoutSet};
use chrono::NaiveDate;
use fs2::FileExt;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Raw CSV record prior to type normalization.
///
/// Every field arrives as text so that a malformed cell degrades that one
/// value instead of dropping the whole row or file.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    date: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    exercise: String,
    #[serde(default)]
    weight: String,
    #[serde(default)]
    reps: String,
}

impl RawRecord {
    /// The single normalization point for everything read from disk.
    ///
    /// Unparsable weights coerce to `0.0`; unparsable or negative reps
    /// coerce to `0`, and fractional reps truncate. A row whose date does
    /// not parse as `YYYY-MM-DD` is dropped.
    fn normalize(self) -> Option<WorkoutSet> {
        let date = match self.date.trim().parse::<NaiveDate>() {
            Ok(date) => date,
            Err(e) => {
                tracing::warn!("Skipping row with unparsable date {:?}: {}", self.date, e);
                return None;
            }
        };

        let weight = self
            .weight
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|w| w.is_finite())
            .unwrap_or(0.0);

        let reps = self
            .reps
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|r| r.is_finite() && *r >= 0.0)
            .map(|r| r as u32)
            .unwrap_or(0);

        Some(WorkoutSet {
            date,
            category: self.category,
            exercise: self.exercise,
            weight,
            reps,
        })
    }
}

/// Owns the on-disk CSV table of workout sets.
pub struct WorkoutStore {
    path: PathBuf,
}

impl WorkoutStore {
    /// Create a store backed by the given CSV file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Seed a missing store file with one placeholder row per default
    /// (category, exercise) pair, dated `today`.
    ///
    /// Idempotent: returns the number of rows written, `0` when the file
    /// already exists (the file is never overwritten by this operation).
    pub fn initialize(&self, today: NaiveDate) -> Result<usize> {
        if self.path.exists() {
            return Ok(0);
        }

        let mut rows = Vec::new();
        for (category, exercises) in catalog::default_catalog() {
            for exercise in exercises {
                rows.push(WorkoutSet::placeholder(today, *category, *exercise));
            }
        }

        self.save(&rows)?;
        tracing::info!(
            "Seeded store at {:?} with {} placeholder rows",
            self.path,
            rows.len()
        );
        Ok(rows.len())
    }

    /// Load every row from the backing file.
    ///
    /// Degrades instead of failing: a missing, unreadable, or malformed
    /// file yields an empty table, and individual bad rows are skipped.
    /// The caller is responsible for surfacing the empty result as a
    /// non-fatal notice.
    pub fn load(&self) -> Vec<WorkoutSet> {
        if !self.path.exists() {
            tracing::info!("No store file at {:?}, treating as empty", self.path);
            return Vec::new();
        }

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(
                    "Unable to open store file {:?}: {}. Treating as empty.",
                    self.path,
                    e
                );
                return Vec::new();
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!(
                "Unable to lock store file {:?}: {}. Treating as empty.",
                self.path,
                e
            );
            return Vec::new();
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(BufReader::new(&file));

        let mut rows = Vec::new();
        for result in reader.deserialize::<RawRecord>() {
            match result {
                Ok(raw) => {
                    if let Some(set) = raw.normalize() {
                        rows.push(set);
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to deserialize CSV row: {}", e);
                    // Continue processing other rows
                }
            }
        }

        let _ = file.unlock();
        tracing::debug!("Loaded {} rows from {:?}", rows.len(), self.path);
        rows
    }

    /// Append exactly one row and persist the whole table back.
    ///
    /// Full read-modify-write; write failures propagate to the caller.
    pub fn append(&self, set: WorkoutSet) -> Result<()> {
        let mut rows = self.load();
        rows.push(set);
        self.save(&rows)
    }

    /// Rewrite the backing file in full.
    ///
    /// Writes to a temp file in the same directory, syncs it, and renames
    /// it over the original, so a failed write never leaves the file in a
    /// worse state than before the call.
    pub fn save(&self, rows: &[WorkoutSet]) -> Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;

        // Exclusive lock to serialize concurrent writers of the temp file
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = csv::Writer::from_writer(temp.as_file());
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        // Atomically replace the old table
        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Wrote {} rows to {:?}", rows.len(), self.path);
        Ok(())
    }
}
