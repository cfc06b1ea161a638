use crate::availability::AvailabilityTracker;
use crate::catalog::Catalog;
use crate::data::{
    Assignment, CourseHours, DAYS, Day, Faculty, HOURS_PER_DAY, SchedulingOutput, SessionKind,
    UnmetRequirement,
};
use crate::emitter;
use crate::error::Result;
use crate::grid::SectionGrid;
use log::{debug, info, trace, warn};
use rand::Rng;
use rand::seq::SliceRandom;
use std::time::Instant;

/// Hours a practical block spans.
const PRACTICAL_BLOCK: usize = 2;

/// Builds the weekly timetable for every section in the catalog.
///
/// Greedy and single pass: sections are processed in catalog order against
/// one shared [`AvailabilityTracker`], so an earlier section's bookings
/// constrain later ones. Hours that cannot be placed are not retried; they
/// are reported in [`SchedulingOutput::unmet`].
///
/// `rng` only decides the per-day course order, so a seeded generator makes
/// the whole run reproducible.
pub fn solve<R: Rng + ?Sized>(catalog: &Catalog, rng: &mut R) -> Result<SchedulingOutput> {
    let start_time = Instant::now();
    let mut tracker = AvailabilityTracker::new(catalog.faculty.iter().map(|f| f.faculty_id));
    let mut grids = Vec::with_capacity(catalog.sections.len());
    let mut unmet = Vec::new();

    for section in &catalog.sections {
        info!("Processing section {}...", section.section_name);
        let mut grid = SectionGrid::new(section.clone());
        // each section consumes its own copy of the course hours
        let mut needs: Vec<CourseHours> = catalog.courses.iter().map(CourseHours::from).collect();

        for day in 0..DAYS {
            needs.shuffle(rng);
            place_practicals(catalog, &mut tracker, &mut grid, &mut needs, day)?;
            place_single_hours(catalog, &mut tracker, &mut grid, &mut needs, day)?;
            let filled = grid.fill_library(day);
            trace!(
                "Section {} day {}: {} library slot(s)",
                section.section_id,
                day + 1,
                filled
            );
        }

        for need in needs.iter().filter(|n| !n.is_satisfied()) {
            let requirement = UnmetRequirement {
                section_id: section.section_id.clone(),
                course_name: need.name.clone(),
                lecture_hours: need.lecture,
                practical_hours: need.practical,
                tutorial_hours: need.tutorial,
            };
            warn!("{requirement}");
            unmet.push(requirement);
        }

        grids.push(grid);
    }

    let assignments = emitter::emit(grids);
    info!(
        "Generated {} assignments for {} sections in {:.2?} ({} unmet requirements)",
        assignments.len(),
        catalog.sections.len(),
        start_time.elapsed(),
        unmet.len()
    );

    Ok(SchedulingOutput {
        assignments,
        unmet,
        seed: None,
    })
}

/// Pass A: at most one two-hour lab block per course per day, at the
/// earliest pair of free hours some qualified faculty can cover.
fn place_practicals(
    catalog: &Catalog,
    tracker: &mut AvailabilityTracker,
    grid: &mut SectionGrid,
    needs: &mut [CourseHours],
    day: Day,
) -> Result<()> {
    for need in needs.iter_mut().filter(|n| n.practical > 0) {
        let eligible: Vec<&Faculty> = catalog.qualified_for(&need.name).collect();

        for hour in 0..=HOURS_PER_DAY - PRACTICAL_BLOCK {
            let block = hour..hour + PRACTICAL_BLOCK;
            if !block.clone().all(|h| grid.is_empty(day, h)) {
                continue;
            }

            let Some(faculty) = eligible
                .iter()
                .find(|f| block.clone().all(|h| tracker.is_free(f.faculty_id, day, h)))
            else {
                continue;
            };

            for h in block {
                let lab = Assignment::session(
                    grid.section(),
                    day,
                    h,
                    &need.name,
                    SessionKind::Lab,
                    faculty,
                );
                grid.place(day, h, lab)?;
                tracker.mark_busy(faculty.faculty_id, day, h);
            }
            need.practical -= 1;
            debug!(
                "Lab {} -> faculty {} on day {} hours {}-{}",
                need.name,
                faculty.faculty_id,
                day + 1,
                hour + 1,
                hour + PRACTICAL_BLOCK
            );
            break;
        }
    }
    Ok(())
}

/// Pass B: single-hour lectures and tutorials, skipping courses that
/// already have a session on this day.
fn place_single_hours(
    catalog: &Catalog,
    tracker: &mut AvailabilityTracker,
    grid: &mut SectionGrid,
    needs: &mut [CourseHours],
    day: Day,
) -> Result<()> {
    for need in needs.iter_mut() {
        let hours_needed = need.single_hours();
        if hours_needed == 0 {
            continue;
        }
        let eligible: Vec<&Faculty> = catalog.qualified_for(&need.name).collect();

        for _ in 0..hours_needed {
            let candidate = (0..HOURS_PER_DAY)
                .filter(|&h| grid.is_empty(day, h) && !grid.holds_course(day, &need.name))
                .find_map(|h| {
                    eligible
                        .iter()
                        .find(|f| tracker.is_free(f.faculty_id, day, h))
                        .map(|f| (h, *f))
                });

            // a failed search leaves grid and tracker unchanged, so every
            // later attempt for this course today fails the same way
            let Some((hour, faculty)) = candidate else {
                break;
            };

            let lecture = Assignment::session(
                grid.section(),
                day,
                hour,
                &need.name,
                SessionKind::Lecture,
                faculty,
            );
            grid.place(day, hour, lecture)?;
            tracker.mark_busy(faculty.faculty_id, day, hour);
            need.consume_single_hour();
            debug!(
                "Lecture {} -> faculty {} on day {} hour {}",
                need.name,
                faculty.faculty_id,
                day + 1,
                hour + 1
            );
        }
    }
    Ok(())
}
