use crate::analyze::SprintsAnalyzed;
use crate::model::Result;
use crate::report::table::{EpicTable, Measure, VelocityTable, EPIC_HEADINGS};
use crate::report::{file_stem, ISO_DATE};
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

pub trait CsvReport {
    fn csv_create(&self, dir: &Path) -> Result<Vec<PathBuf>>;
}

impl CsvReport for SprintsAnalyzed {
    fn csv_create(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        for analysis in self {
            let stem = file_stem(&analysis.sprint);
            let planned = EpicTable::from_buckets(&analysis.epics.planned);
            written.push(write_file(dir, &format!("{stem}Epics.csv"), |w| {
                write_epics(w, &planned)
            })?);
            let delivered = EpicTable::from_buckets(&analysis.epics.delivered);
            written.push(write_file(dir, &format!("{stem}EpicsDelivered.csv"), |w| {
                write_epics(w, &delivered)
            })?);
        }

        let velocity_tables = [
            ("VelocityOfTeams.csv", VelocityTable::teams(self, Measure::Delivered)),
            ("VelocityOfMembers.csv", VelocityTable::members(self, Measure::Delivered)),
            ("PlannedWorkOfTeams.csv", VelocityTable::teams(self, Measure::Planned)),
        ];
        for (name, table) in &velocity_tables {
            written.push(write_file(dir, name, |w| write_velocity(w, table))?);
        }

        info!(files = written.len(), dir = %dir.display(), "wrote csv reports");
        Ok(written)
    }
}

pub fn write_epics<W: Write>(writer: W, table: &EpicTable) -> Result<()> {
    let mut csv = ::csv::Writer::from_writer(writer);
    csv.write_record(EPIC_HEADINGS)?;
    for row in &table.rows {
        csv.write_record([
            row.epic.clone(),
            row.story_points.to_string(),
            row.percentage.to_string(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_velocity<W: Write>(writer: W, table: &VelocityTable) -> Result<()> {
    let mut csv = ::csv::Writer::from_writer(writer);
    csv.write_record(table.headings())?;
    for row in &table.rows {
        let date = |value: Option<DateTime<Utc>>| {
            value
                .map(|dt| dt.format(ISO_DATE).to_string())
                .unwrap_or_default()
        };
        let record = [row.sprint.clone(), date(row.from), date(row.to), row.total.to_string()]
            .into_iter()
            .chain(row.values.iter().map(f64::to_string));
        csv.write_record(record)?;
    }
    csv.flush()?;
    Ok(())
}

fn write_file<F>(dir: &Path, name: &str, write: F) -> Result<PathBuf>
where
    F: FnOnce(File) -> Result<()>,
{
    let path = dir.join(name);
    write(File::create(&path)?)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::{Buckets, EpicBreakdown, SprintAnalysis, Velocity, Work};
    use crate::model::Sprint;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn analysis() -> SprintAnalysis {
        let mut sprint = Sprint::new(471, "Sprint 12/13");
        sprint.start_date = Some(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());
        sprint.end_date = Some(Utc.with_ymd_and_hms(2023, 1, 15, 0, 0, 0).unwrap());

        let mut epics = EpicBreakdown::default();
        epics.planned.add("Payments", 6.0);
        epics.planned.add("Others", 2.0);
        epics.delivered.add("Payments", 3.0);

        let mut velocity = Velocity {
            teams: Buckets::seeded(["Platform", "Apps"]),
            members: Buckets::seeded(["a@example.com"]),
        };
        *velocity.teams.entry("Platform") = Work {
            planned: 6.0,
            delivered: 3.0,
        };
        *velocity.members.entry("a@example.com") = Work {
            planned: 6.0,
            delivered: 3.0,
        };

        SprintAnalysis {
            sprint,
            issues: 3,
            epics,
            velocity,
        }
    }

    #[test]
    fn writes_epic_table() {
        let table = EpicTable::from_buckets(&analysis().epics.planned);
        let mut out = Vec::new();

        write_epics(&mut out, &table).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Epic name,Story Points,Percentage\nPayments,6,0.75\nOthers,2,0.25\n"
        );
    }

    #[test]
    fn writes_velocity_table_with_dates() {
        let analyses = vec![analysis()];
        let table = VelocityTable::teams(&analyses, Measure::Delivered);
        let mut out = Vec::new();

        write_velocity(&mut out, &table).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Sprint,From,To,Total,Platform,Apps\nSprint 12/13,2023-01-01,2023-01-15,3,3,0\n"
        );
    }

    #[test]
    fn creates_report_files_with_safe_names() {
        let dir = tempfile::tempdir().unwrap();
        let analyses: SprintsAnalyzed = vec![analysis()];

        let written = analyses.csv_create(dir.path()).unwrap();

        let names: Vec<_> = written
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(
            names,
            [
                "Sprint 12_13Epics.csv",
                "Sprint 12_13EpicsDelivered.csv",
                "VelocityOfTeams.csv",
                "VelocityOfMembers.csv",
                "PlannedWorkOfTeams.csv",
            ]
        );
        let members = std::fs::read_to_string(dir.path().join("VelocityOfMembers.csv")).unwrap();
        assert!(members.starts_with("Sprint,From,To,Total,a@example.com\n"));
    }
}
