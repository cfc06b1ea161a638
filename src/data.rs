use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// Type aliases for clarity
pub type SectionId = String;
pub type FacultyId = u32;
pub type Day = usize;
pub type Hour = usize;

/// Teaching days per week (Monday..Saturday).
pub const DAYS: usize = 6;
/// Hour slots per teaching day.
pub const HOURS_PER_DAY: usize = 8;

/// Faculty id carried by the Library placeholder.
pub const LIBRARY_FACULTY_ID: FacultyId = 0;
pub const LIBRARY_LABEL: &str = "Library";
pub const LIBRARY_FACULTY_NAME: &str = "-";

/// A group of students following one weekly timetable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Section {
    pub section_id: SectionId,
    pub section_name: String,
}

/// A course and the hours it needs every week.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Course {
    pub course_name: String,
    #[serde(default)]
    pub lecture_hours: u32,
    #[serde(default)]
    pub practical_hours: u32,
    #[serde(default)]
    pub tutorial_hours: u32,
}

/// Per-section working copy of a course's remaining hours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseHours {
    pub name: String,
    pub lecture: u32,
    pub practical: u32,
    pub tutorial: u32,
}

impl CourseHours {
    /// Single-hour sessions still owed (lectures and tutorials together).
    pub fn single_hours(&self) -> u32 {
        self.lecture.saturating_add(self.tutorial)
    }

    /// Consumes one single-hour session, lectures before tutorials.
    pub fn consume_single_hour(&mut self) {
        if self.lecture > 0 {
            self.lecture -= 1;
        } else if self.tutorial > 0 {
            self.tutorial -= 1;
        }
    }

    pub fn is_satisfied(&self) -> bool {
        self.lecture == 0 && self.practical == 0 && self.tutorial == 0
    }
}

impl From<&Course> for CourseHours {
    fn from(course: &Course) -> Self {
        Self {
            name: course.course_name.clone(),
            lecture: course.lecture_hours,
            practical: course.practical_hours,
            tutorial: course.tutorial_hours,
        }
    }
}

/// A teacher and the courses they are qualified for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Faculty {
    pub faculty_id: FacultyId,
    pub name: String,
    pub subjects: BTreeSet<String>,
}

/// Kind of course session; decides the output label suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Lab,
    Lecture,
}

impl SessionKind {
    /// Output label for a session of `course_name`.
    pub fn label(self, course_name: &str) -> String {
        match self {
            SessionKind::Lab => format!("{course_name} (Lab)"),
            SessionKind::Lecture => format!("{course_name} (Lec)"),
        }
    }
}

/// One occupied slot of the emitted timetable. `day` and `hour` are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Assignment {
    pub section_id: SectionId,
    pub section_name: String,
    pub day: u8,
    pub hour: u8,
    pub course_name: String,
    pub faculty_id: FacultyId,
    pub name: String,
    /// Bare course name, absent for the Library placeholder.
    #[serde(skip)]
    pub course: Option<String>,
}

impl Assignment {
    /// Builds a course session from 0-based grid indices.
    pub fn session(
        section: &Section,
        day: Day,
        hour: Hour,
        course_name: &str,
        kind: SessionKind,
        faculty: &Faculty,
    ) -> Self {
        Self {
            section_id: section.section_id.clone(),
            section_name: section.section_name.clone(),
            day: one_based(day),
            hour: one_based(hour),
            course_name: kind.label(course_name),
            faculty_id: faculty.faculty_id,
            name: faculty.name.clone(),
            course: Some(course_name.to_string()),
        }
    }

    /// Builds the Library placeholder from 0-based grid indices.
    pub fn library(section: &Section, day: Day, hour: Hour) -> Self {
        Self {
            section_id: section.section_id.clone(),
            section_name: section.section_name.clone(),
            day: one_based(day),
            hour: one_based(hour),
            course_name: LIBRARY_LABEL.to_string(),
            faculty_id: LIBRARY_FACULTY_ID,
            name: LIBRARY_FACULTY_NAME.to_string(),
            course: None,
        }
    }

    pub fn is_library(&self) -> bool {
        self.faculty_id == LIBRARY_FACULTY_ID
    }
}

fn one_based(index: usize) -> u8 {
    // grid indices are bounded by DAYS / HOURS_PER_DAY
    (index + 1) as u8
}

/// Course hours a section was left owing after generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmetRequirement {
    pub section_id: SectionId,
    pub course_name: String,
    pub lecture_hours: u32,
    pub practical_hours: u32,
    pub tutorial_hours: u32,
}

impl fmt::Display for UnmetRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} still needs {} lecture, {} practical, {} tutorial hour(s)",
            self.section_id,
            self.course_name,
            self.lecture_hours,
            self.practical_hours,
            self.tutorial_hours
        )
    }
}

/// JSON body of a generation request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchedulingInput {
    pub sections: Vec<Section>,
    pub courses: Vec<Course>,
    pub faculty: Vec<FacultyRow>,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Faculty as it arrives from tabular input, subjects still comma-delimited.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FacultyRow {
    pub faculty_id: FacultyId,
    pub name: String,
    #[serde(default)]
    pub subjects: String,
}

/// The final output of the engine.
#[derive(Debug, Clone, Serialize)]
pub struct SchedulingOutput {
    pub assignments: Vec<Assignment>,
    pub unmet: Vec<UnmetRequirement>,
    pub seed: Option<u64>,
}
