//! CSV export of the weekly projection with logged actuals.

use crate::summary::WeekComparison;
use crate::Result;
use std::fs::File;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    week: u32,
    start_date: String,
    end_date: String,
    start_weight: f64,
    end_weight: f64,
    actual_weight: Option<f64>,
}

impl From<&WeekComparison> for CsvRow {
    fn from(row: &WeekComparison) -> Self {
        CsvRow {
            week: row.projection.week,
            start_date: row.range.start_date.format("%Y-%m-%d").to_string(),
            end_date: row.range.end_date.format("%Y-%m-%d").to_string(),
            start_weight: row.projection.start_weight,
            end_weight: row.projection.end_weight,
            actual_weight: row.actual_weight,
        }
    }
}

/// Write one CSV row per week, replacing any existing file
///
/// Returns the number of rows written. The file is synced before returning.
pub fn write_weekly_csv(path: &Path, rows: &[WeekComparison]) -> Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_writer(File::create(path)?);
    for row in rows {
        writer.serialize(CsvRow::from(row))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    file.sync_all()?;

    tracing::info!("Exported {} weeks to {:?}", rows.len(), path);
    Ok(rows.len())
}
