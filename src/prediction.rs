//! Faculty availability prediction trained from an emitted schedule.
//!
//! One classifier per real faculty id, fitted over the full weekly grid:
//! a (day, hour) point is labelled busy when the schedule places that faculty
//! there. Queries return the nearest training point's label, so grid points
//! reproduce the schedule and off-grid points borrow the closest slot.

use crate::data::{Assignment, DAYS, FacultyId, HOURS_PER_DAY};
use crate::error::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::path::Path;

/// One labelled grid point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Sample {
    pub day: u8,
    pub hour: u8,
    pub busy: bool,
}

/// Nearest-neighbour busy/free classifier for a single faculty member.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct GridClassifier {
    samples: Vec<Sample>,
}

impl GridClassifier {
    pub fn fit(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Predicts busy for `(day, hour)`; ties go to the earliest sample.
    pub fn predict_busy(&self, day: u8, hour: u8) -> bool {
        self.samples
            .iter()
            .min_by_key(|s| {
                let dd = i32::from(s.day) - i32::from(day);
                let dh = i32::from(s.hour) - i32::from(hour);
                dd * dd + dh * dh
            })
            .is_some_and(|s| s.busy)
    }
}

/// Per-faculty classifiers keyed by faculty id.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AvailabilityModel {
    models: BTreeMap<FacultyId, GridClassifier>,
}

impl AvailabilityModel {
    /// Fits one classifier per non-placeholder faculty id in `schedule`.
    pub fn train(schedule: &[Assignment]) -> Self {
        let busy: HashSet<(FacultyId, u8, u8)> = schedule
            .iter()
            .filter(|a| !a.is_library())
            .map(|a| (a.faculty_id, a.day, a.hour))
            .collect();
        let faculty_ids: BTreeSet<FacultyId> = busy.iter().map(|&(id, _, _)| id).collect();

        let models: BTreeMap<FacultyId, GridClassifier> = faculty_ids
            .into_iter()
            .map(|id| {
                let samples = grid_points()
                    .map(|(day, hour)| Sample {
                        day,
                        hour,
                        busy: busy.contains(&(id, day, hour)),
                    })
                    .collect();
                (id, GridClassifier::fit(samples))
            })
            .collect();

        info!("Trained availability models for {} faculty", models.len());
        Self { models }
    }

    /// Faculty ids predicted to be free at `(day, hour)` (both 1-based).
    pub fn predict_free(&self, day: u8, hour: u8) -> BTreeSet<FacultyId> {
        self.models
            .iter()
            .filter(|(_, model)| !model.predict_busy(day, hour))
            .map(|(&id, _)| id)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string(self)?)?;
        info!("Saved availability models to {}", path.display());
        Ok(())
    }

    /// Loads persisted models; a missing file yields an empty model.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

fn grid_points() -> impl Iterator<Item = (u8, u8)> {
    (1..=DAYS as u8).flat_map(|day| (1..=HOURS_PER_DAY as u8).map(move |hour| (day, hour)))
}
