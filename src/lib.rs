pub mod analyze;
pub mod jira;
pub mod model;
pub mod report;
pub mod utils;
