mod multi_progress;
mod progress_style;

pub use multi_progress::{page_reporter, MultiProgressNew};
pub use progress_style::ProgressStyleTemplate;
