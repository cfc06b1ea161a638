use crate::data::{Assignment, DAYS, Day, HOURS_PER_DAY, Hour, Section};
use crate::error::{Error, Result};

/// One section's week: `DAYS` x `HOURS_PER_DAY` optional assignments.
#[derive(Debug, Clone)]
pub struct SectionGrid {
    section: Section,
    slots: [[Option<Assignment>; HOURS_PER_DAY]; DAYS],
}

impl SectionGrid {
    pub fn new(section: Section) -> Self {
        Self {
            section,
            slots: std::array::from_fn(|_| std::array::from_fn(|_| None)),
        }
    }

    pub fn section(&self) -> &Section {
        &self.section
    }

    pub fn is_empty(&self, day: Day, hour: Hour) -> bool {
        self.slots[day][hour].is_none()
    }

    /// Puts `assignment` into an empty slot.
    ///
    /// Callers check emptiness first; hitting an occupied slot means the
    /// engine's bookkeeping is wrong and is reported as [`Error::OccupiedSlot`].
    pub fn place(&mut self, day: Day, hour: Hour, assignment: Assignment) -> Result<()> {
        let slot = &mut self.slots[day][hour];
        if slot.is_some() {
            return Err(Error::OccupiedSlot {
                section: self.section.section_id.clone(),
                day: day + 1,
                hour: hour + 1,
            });
        }
        *slot = Some(assignment);
        Ok(())
    }

    /// Whether any session of `course_name` is already on `day`.
    pub fn holds_course(&self, day: Day, course_name: &str) -> bool {
        self.slots[day]
            .iter()
            .flatten()
            .any(|a| a.course.as_deref() == Some(course_name))
    }

    /// Fills every still-empty slot of `day` with the Library placeholder.
    pub fn fill_library(&mut self, day: Day) -> usize {
        let mut filled = 0;
        for hour in 0..HOURS_PER_DAY {
            let slot = &mut self.slots[day][hour];
            if slot.is_none() {
                *slot = Some(Assignment::library(&self.section, day, hour));
                filled += 1;
            }
        }
        filled
    }

    /// Populated slots, day-major then hour-ascending.
    pub fn into_assignments(self) -> impl Iterator<Item = Assignment> {
        self.slots.into_iter().flatten().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Faculty, SessionKind};
    use std::collections::BTreeSet;

    fn section() -> Section {
        Section {
            section_id: "S1".into(),
            section_name: "CSE-A".into(),
        }
    }

    fn faculty() -> Faculty {
        Faculty {
            faculty_id: 1,
            name: "Ada".into(),
            subjects: BTreeSet::from(["Math".to_string()]),
        }
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = SectionGrid::new(section());
        for day in 0..DAYS {
            for hour in 0..HOURS_PER_DAY {
                assert!(grid.is_empty(day, hour));
            }
        }
    }

    #[test]
    fn test_place_into_occupied_slot_fails() {
        let mut grid = SectionGrid::new(section());
        let lec = Assignment::session(&section(), 1, 2, "Math", SessionKind::Lecture, &faculty());
        grid.place(1, 2, lec.clone()).unwrap();
        assert!(!grid.is_empty(1, 2));

        let err = grid.place(1, 2, lec).unwrap_err();
        assert!(matches!(
            err,
            Error::OccupiedSlot {
                day: 2,
                hour: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_holds_course_matches_any_kind_on_that_day() {
        let mut grid = SectionGrid::new(section());
        let lab = Assignment::session(&section(), 0, 0, "Math", SessionKind::Lab, &faculty());
        grid.place(0, 0, lab).unwrap();

        assert!(grid.holds_course(0, "Math"));
        assert!(!grid.holds_course(1, "Math"));
        assert!(!grid.holds_course(0, "Mat"));
    }

    #[test]
    fn test_fill_library_only_touches_empty_slots() {
        let mut grid = SectionGrid::new(section());
        let lec = Assignment::session(&section(), 0, 4, "Math", SessionKind::Lecture, &faculty());
        grid.place(0, 4, lec).unwrap();

        assert_eq!(grid.fill_library(0), HOURS_PER_DAY - 1);
        assert_eq!(grid.fill_library(0), 0);
        assert!(!grid.holds_course(0, "Library"));

        let day_one: Vec<Assignment> = grid.into_assignments().collect();
        assert_eq!(day_one.len(), HOURS_PER_DAY);
        assert_eq!(day_one[4].course_name, "Math (Lec)");
        assert!(day_one.iter().filter(|a| a.is_library()).count() == HOURS_PER_DAY - 1);
        assert!(day_one.iter().all(|a| a.day == 1));
        let hours: Vec<u8> = day_one.iter().map(|a| a.hour).collect();
        assert_eq!(hours, (1..=8).collect::<Vec<u8>>());
    }
}
