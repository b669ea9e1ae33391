use crate::analyze::{SprintAnalysis, SprintsAnalyzed};
use crate::model::{Error, Result};
use crate::report::table::{EpicTable, Measure, VelocityTable, EPIC_HEADINGS};
use crate::report::DISPLAY_DATE;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use markdown_builder::Markdown;
use markdown_table::{Heading, HeadingAlignment, MarkdownTable};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const REPORT_FILE: &str = "report.md";

/// Pre-rendered table kept out of `Paragraph`, which wraps long lines.
#[derive(Debug, Clone)]
struct Table(String);

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait MarkdownReport {
    fn report_render(&self) -> Result<String>;
    fn report_create(&self, dir: &Path) -> Result<PathBuf>;
}

impl MarkdownReport for SprintsAnalyzed {
    fn report_render(&self) -> Result<String> {
        let mut doc = Markdown::new();

        doc.header1("Sprints");
        for analysis in self {
            doc.add_sprint(analysis)?;
        }
        if !self.is_empty() {
            doc.header2("Velocity of teams");
            doc.add_velocity(&VelocityTable::teams(self, Measure::Delivered))?;
            doc.header2("Planned work of teams");
            doc.add_velocity(&VelocityTable::teams(self, Measure::Planned))?;
            doc.header2("Velocity of members");
            doc.add_velocity(&VelocityTable::members(self, Measure::Delivered))?;
        }
        Ok(doc.render())
    }

    fn report_create(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(REPORT_FILE);
        fs::write(&path, self.report_render()?)?;
        info!(path = %path.display(), "wrote markdown report");
        Ok(path)
    }
}

trait MarkdownExt {
    fn add_sprint(&mut self, analysis: &SprintAnalysis) -> Result<()>;
    fn add_epics(&mut self, table: &EpicTable, links: &IndexMap<String, String>) -> Result<()>;
    fn add_epic_issues(&mut self, issues: &IndexMap<String, Vec<String>>) -> Result<()>;
    fn add_velocity(&mut self, table: &VelocityTable) -> Result<()>;
    fn add_table(&mut self, headings: Vec<String>, rows: Vec<Vec<String>>) -> Result<()>;
}

impl MarkdownExt for Markdown {
    fn add_sprint(&mut self, analysis: &SprintAnalysis) -> Result<()> {
        let sprint = &analysis.sprint;
        self.header2(format!(
            "{} ({} - {})",
            sprint.name,
            format_date(sprint.start_date),
            format_date(sprint.end_date),
        ));
        if let Some(goal) = sprint.goal.as_deref().filter(|goal| !goal.is_empty()) {
            self.paragraph(format!("*{goal}*"));
        }

        let planned = EpicTable::from_buckets(&analysis.epics.planned);
        let delivered = EpicTable::from_buckets(&analysis.epics.delivered);
        self.paragraph(format!(
            "{} issues, **{}** of **{}** story points delivered",
            analysis.issues, delivered.total, planned.total
        ));

        self.paragraph("**Epics planned**".to_string());
        self.add_epics(&planned, &analysis.epics.links)?;
        self.paragraph("**Epics delivered**".to_string());
        self.add_epics(&delivered, &analysis.epics.links)?;
        self.paragraph("**Issues by epic**".to_string());
        self.add_epic_issues(&analysis.epics.issues)?;
        Ok(())
    }

    fn add_epics(&mut self, table: &EpicTable, links: &IndexMap<String, String>) -> Result<()> {
        let headings = EPIC_HEADINGS.iter().map(|h| h.to_string()).collect();
        let rows = table
            .rows
            .iter()
            .map(|row| {
                let epic = match links.get(&row.epic) {
                    Some(link) => format!("[{}]({})", row.epic, link),
                    None => row.epic.clone(),
                };
                vec![
                    epic,
                    format!("{}", row.story_points),
                    format!("{:.1}%", row.percentage * 100.0),
                ]
            })
            .collect();
        self.add_table(headings, rows)
    }

    fn add_epic_issues(&mut self, issues: &IndexMap<String, Vec<String>>) -> Result<()> {
        let headings = vec!["Epic name".to_string(), "Issues".to_string()];
        let rows = issues
            .iter()
            .map(|(epic, links)| {
                let links = links
                    .iter()
                    .map(|link| {
                        let key = link.rsplit('/').next().unwrap_or(link);
                        format!("[{key}]({link})")
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                vec![epic.clone(), links]
            })
            .collect();
        self.add_table(headings, rows)
    }

    fn add_velocity(&mut self, table: &VelocityTable) -> Result<()> {
        let rows = table
            .rows
            .iter()
            .map(|row| {
                let fixed = [
                    row.sprint.clone(),
                    format_date(row.from),
                    format_date(row.to),
                    format!("**{}**", row.total),
                ];
                fixed
                    .into_iter()
                    .chain(row.values.iter().map(|value| format!("{value}")))
                    .collect()
            })
            .collect();
        self.add_table(table.headings(), rows)
    }

    fn add_table(&mut self, headings: Vec<String>, rows: Vec<Vec<String>>) -> Result<()> {
        if rows.is_empty() {
            self.paragraph("*Nothing to report*".to_string());
            return Ok(());
        }
        let header = headings
            .into_iter()
            .enumerate()
            .map(|(index, heading)| match index {
                0 => Heading::new(heading, None),
                _ => Heading::new(heading, Some(HeadingAlignment::Center)),
            })
            .collect::<Vec<_>>();

        let mut md_table = MarkdownTable::new(rows);
        md_table.with_headings(header);
        let rendered = md_table
            .as_markdown()
            .map_err(|err| Error::Render(format!("{err:?}")))?;
        self.elements.push(Box::new(Table(rendered)));
        Ok(())
    }
}

fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format(DISPLAY_DATE).to_string())
        .unwrap_or_else(|| "-".to_string())
}
