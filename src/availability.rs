use crate::data::{DAYS, Day, FacultyId, Hour};
use std::collections::{BTreeSet, HashMap};

/// Hours each faculty member already teaches, per day.
///
/// Shared by every section of a run: a booking made for one section makes
/// the faculty unavailable to all others at that (day, hour).
#[derive(Debug, Clone, Default)]
pub struct AvailabilityTracker {
    busy: HashMap<(FacultyId, Day), BTreeSet<Hour>>,
}

impl AvailabilityTracker {
    /// Starts every listed faculty member with an empty week.
    pub fn new(faculty_ids: impl IntoIterator<Item = FacultyId>) -> Self {
        let busy = faculty_ids
            .into_iter()
            .flat_map(|id| (0..DAYS).map(move |day| ((id, day), BTreeSet::new())))
            .collect();
        Self { busy }
    }

    pub fn is_free(&self, faculty_id: FacultyId, day: Day, hour: Hour) -> bool {
        self.busy
            .get(&(faculty_id, day))
            .is_none_or(|hours| !hours.contains(&hour))
    }

    /// Records a booking. Marking an already-busy hour is a no-op.
    pub fn mark_busy(&mut self, faculty_id: FacultyId, day: Day, hour: Hour) {
        self.busy.entry((faculty_id, day)).or_default().insert(hour);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tracker_is_all_free() {
        let tracker = AvailabilityTracker::new([1, 2]);
        for day in 0..DAYS {
            for hour in 0..8 {
                assert!(tracker.is_free(1, day, hour));
                assert!(tracker.is_free(2, day, hour));
            }
        }
    }

    #[test]
    fn test_mark_busy_is_scoped_to_faculty_and_day() {
        let mut tracker = AvailabilityTracker::new([1, 2]);
        tracker.mark_busy(1, 2, 3);

        assert!(!tracker.is_free(1, 2, 3));
        assert!(tracker.is_free(1, 2, 4));
        assert!(tracker.is_free(1, 3, 3));
        assert!(tracker.is_free(2, 2, 3));
    }

    #[test]
    fn test_mark_busy_twice_is_noop() {
        let mut tracker = AvailabilityTracker::new([1]);
        tracker.mark_busy(1, 0, 5);
        tracker.mark_busy(1, 0, 5);

        assert!(!tracker.is_free(1, 0, 5));
        assert_eq!(tracker.busy[&(1, 0)].len(), 1);
    }

    #[test]
    fn test_unknown_faculty_is_free_until_booked() {
        let mut tracker = AvailabilityTracker::default();
        assert!(tracker.is_free(9, 0, 0));
        tracker.mark_busy(9, 0, 0);
        assert!(!tracker.is_free(9, 0, 0));
    }
}
