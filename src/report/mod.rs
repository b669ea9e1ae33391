pub mod csv;
pub mod markdown;
pub mod table;

pub use self::csv::CsvReport;
pub use self::markdown::MarkdownReport;
pub use self::table::{EpicTable, Measure, VelocityTable};

use crate::model::Sprint;

pub(crate) const ISO_DATE: &str = "%Y-%m-%d";
pub(crate) const DISPLAY_DATE: &str = "%d.%m.%Y";

/// Sprint name usable as a file name prefix.
pub(crate) fn file_stem(sprint: &Sprint) -> String {
    let stem: String = sprint
        .name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if stem.is_empty() {
        format!("Sprint{}", sprint.id)
    } else {
        stem
    }
}
