use crate::data::Assignment;
use crate::error::Result;
use crate::grid::SectionGrid;
use log::info;
use std::path::Path;

/// Flattens section grids into one sequence: section-major, then day, then
/// hour. Every slot contributes exactly one record.
pub fn emit(grids: Vec<SectionGrid>) -> Vec<Assignment> {
    grids
        .into_iter()
        .flat_map(SectionGrid::into_assignments)
        .collect()
}

/// Writes the schedule table with a header row.
pub fn write_csv(path: &Path, assignments: &[Assignment]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for assignment in assignments {
        writer.serialize(assignment)?;
    }
    writer.flush()?;
    info!("Wrote {} rows to {}", assignments.len(), path.display());
    Ok(())
}

/// Reads a schedule table previously produced by [`write_csv`].
pub fn read_csv(path: &Path) -> Result<Vec<Assignment>> {
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader.deserialize().collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}
