use crate::jira::PageProgress;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

pub trait MultiProgressNew {
    fn add_with_style(&self, pb: ProgressBar, style: ProgressStyle) -> ProgressBar;
}

impl MultiProgressNew for MultiProgress {
    fn add_with_style(&self, pb: ProgressBar, style: ProgressStyle) -> ProgressBar {
        let pb = self.add(pb);
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

/// Callback for paged listings: moves the bar when the total is known,
/// otherwise reports the page number.
pub fn page_reporter<'a>(pb: &'a ProgressBar, label: &'a str) -> impl FnMut(PageProgress) + 'a {
    move |progress| match progress.total {
        Some(total) => {
            pb.set_length(total as u64);
            pb.set_position(progress.received as u64);
            pb.set_message(label.to_string());
        }
        None => pb.set_message(format!(
            "{label} (#{} page, {} received) ...",
            progress.page + 1,
            progress.received
        )),
    }
}
