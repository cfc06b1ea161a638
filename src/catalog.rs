//! Catalog loading: sections, courses and faculty, plus the course to
//! qualified-faculty index the placement engine consults.

use crate::data::{Course, Faculty, FacultyId, FacultyRow, LIBRARY_FACULTY_ID, Section};
use crate::error::{Error, Result};
use itertools::Itertools;
use log::{debug, info};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

pub const SECTIONS_FILE: &str = "sections.csv";
pub const COURSES_FILE: &str = "courses.csv";
pub const FACULTY_FILE: &str = "faculty.csv";

/// Course row as read from CSV; blank or missing hour cells count as zero,
/// anything else must parse as a non-negative integer.
#[derive(Debug, Deserialize)]
struct CourseRecord {
    course_name: String,
    #[serde(default)]
    lecture_hours: Option<u32>,
    #[serde(default)]
    practical_hours: Option<u32>,
    #[serde(default)]
    tutorial_hours: Option<u32>,
}

impl From<CourseRecord> for Course {
    fn from(record: CourseRecord) -> Self {
        Course {
            course_name: record.course_name,
            lecture_hours: record.lecture_hours.unwrap_or(0),
            practical_hours: record.practical_hours.unwrap_or(0),
            tutorial_hours: record.tutorial_hours.unwrap_or(0),
        }
    }
}

/// Immutable, in-memory catalogs for one generation run.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub sections: Vec<Section>,
    pub courses: Vec<Course>,
    pub faculty: Vec<Faculty>,
    // course name -> positions in `faculty`, catalog order
    qualified: HashMap<String, Vec<usize>>,
}

impl Catalog {
    /// Builds the catalog from already-parsed rows.
    pub fn from_records(
        sections: Vec<Section>,
        courses: Vec<Course>,
        faculty: Vec<FacultyRow>,
    ) -> Result<Self> {
        let courses: Vec<Course> = courses
            .into_iter()
            .map(|c| Course {
                course_name: c.course_name.trim().to_string(),
                ..c
            })
            .collect();
        let faculty: Vec<Faculty> = faculty.into_iter().map(normalize_faculty).collect();
        validate(&courses, &faculty)?;

        let qualified = faculty
            .iter()
            .enumerate()
            .flat_map(|(idx, f)| f.subjects.iter().map(move |s| (s.clone(), idx)))
            .into_group_map();

        info!(
            "Catalog loaded: {} sections, {} courses, {} faculty",
            sections.len(),
            courses.len(),
            faculty.len()
        );

        Ok(Self {
            sections,
            courses,
            faculty,
            qualified,
        })
    }

    /// Reads `sections.csv`, `courses.csv` and `faculty.csv` from `dir`.
    ///
    /// Any absent or unreadable file aborts the load with
    /// [`Error::MissingInput`]; nothing is returned partially.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let sections: Vec<Section> = read_rows("sections", &dir.join(SECTIONS_FILE))?;
        let courses: Vec<CourseRecord> = read_rows("courses", &dir.join(COURSES_FILE))?;
        let faculty: Vec<FacultyRow> = read_rows("faculty", &dir.join(FACULTY_FILE))?;

        Self::from_records(
            sections,
            courses.into_iter().map(Course::from).collect(),
            faculty,
        )
    }

    /// Faculty qualified for `course_name`, in catalog order.
    pub fn qualified_for<'a>(
        &'a self,
        course_name: &str,
    ) -> impl Iterator<Item = &'a Faculty> + use<'a> {
        self.qualified
            .get(course_name)
            .into_iter()
            .flatten()
            .map(|&idx| &self.faculty[idx])
    }
}

/// Splits a comma-delimited subject list into trimmed, non-empty names.
pub fn parse_subjects(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalize_faculty(row: FacultyRow) -> Faculty {
    let subjects = parse_subjects(&row.subjects);
    debug!(
        "Faculty {} ({}) teaches {:?}",
        row.faculty_id, row.name, subjects
    );
    Faculty {
        faculty_id: row.faculty_id,
        name: row.name,
        subjects,
    }
}

fn validate(courses: &[Course], faculty: &[Faculty]) -> Result<()> {
    if faculty.iter().any(|f| f.faculty_id == LIBRARY_FACULTY_ID) {
        return Err(Error::InvalidCatalog(format!(
            "faculty id {LIBRARY_FACULTY_ID} is reserved for the Library placeholder"
        )));
    }

    let mut seen_ids: HashSet<FacultyId> = HashSet::new();
    if let Some(dup) = faculty.iter().find(|f| !seen_ids.insert(f.faculty_id)) {
        return Err(Error::InvalidCatalog(format!(
            "duplicate faculty id {}",
            dup.faculty_id
        )));
    }

    if let Some(dup) = courses.iter().map(|c| &c.course_name).duplicates().next() {
        return Err(Error::InvalidCatalog(format!("duplicate course '{dup}'")));
    }

    Ok(())
}

fn read_rows<T: DeserializeOwned>(source_name: &'static str, path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|cause| Error::MissingInput {
            source_name,
            path: path.to_path_buf(),
            cause,
        })?;

    reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, _>>()
        .map_err(|cause| Error::MalformedInput { source_name, cause })
}
