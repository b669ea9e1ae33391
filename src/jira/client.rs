use crate::jira::page::{IssuePage, PageProgress, ValuePage};
use crate::jira::Fetcher;
use crate::model::{Board, Issue, Result, Sprint};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

const AGILE_API: &str = "rest/agile/1.0";
const PLATFORM_API: &str = "rest/api/2";

pub struct JiraClient<F> {
    fetcher: F,
    base_url: String,
}

impl<F: Fetcher> JiraClient<F> {
    pub fn new(fetcher: F, base_url: impl ToString) -> Self {
        let base_url = base_url.to_string().trim_end_matches('/').to_string();
        Self { fetcher, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn sprint_detail(&self, sprint_id: u64) -> Result<Sprint> {
        let url = self.agile_url(&format!("sprint/{sprint_id}"));
        let body = self.fetcher.fetch(&url).await?;
        Sprint::parse(&body)
    }

    pub async fn issue_detail(&self, issue_key: &str) -> Result<Issue> {
        let url = format!("{}/{PLATFORM_API}/issue/{issue_key}", self.base_url);
        let body = self.fetcher.fetch(&url).await?;
        Issue::parse(&body)
    }

    pub async fn list_boards(
        &self,
        progress: &mut dyn FnMut(PageProgress),
    ) -> Result<Vec<Board>> {
        let boards = self.collect_values("board", progress).await?;
        info!(boards = boards.len(), "listed boards");
        Ok(boards)
    }

    pub async fn list_sprints_for_board(
        &self,
        board_id: u64,
        progress: &mut dyn FnMut(PageProgress),
    ) -> Result<Vec<Sprint>> {
        let sprints = self
            .collect_values(&format!("board/{board_id}/sprint"), progress)
            .await?;
        debug!(board_id, sprints = sprints.len(), "listed sprints");
        Ok(sprints)
    }

    /// Sprints of every board whose name contains `keyword`, ignoring case,
    /// in board enumeration order.
    pub async fn find_sprints_by_name(
        &self,
        keyword: &str,
        progress: &mut dyn FnMut(PageProgress),
    ) -> Result<Vec<Sprint>> {
        let boards = self.list_boards(progress).await?;
        let mut sprints = Vec::new();
        for board in &boards {
            let found = self.list_sprints_for_board(board.id, progress).await?;
            sprints.extend(found.into_iter().filter(|sprint| sprint.name_contains(keyword)));
        }
        info!(keyword, sprints = sprints.len(), "matched sprints by name");
        Ok(sprints)
    }

    pub async fn list_sprint_issues(
        &self,
        sprint_id: u64,
        page_size: usize,
        progress: &mut dyn FnMut(PageProgress),
    ) -> Result<Vec<Issue>> {
        let mut issues: Vec<Issue> = Vec::new();
        let mut page = 0;
        loop {
            let url = self.agile_url(&format!(
                "sprint/{sprint_id}/issue?startAt={}&maxResults={page_size}",
                issues.len()
            ));
            let body = self.fetcher.fetch(&url).await?;
            if body.trim().is_empty() {
                debug!(sprint_id, page, "blank page, stopping");
                break;
            }

            let issue_page: IssuePage = serde_json::from_str(&body)?;
            debug!(
                sprint_id,
                start_at = issue_page.start_at,
                max_results = issue_page.max_results,
                total = issue_page.total,
                "received issue page"
            );
            let received = issue_page.issues.len();
            issues.extend(issue_page.issues);
            progress(PageProgress {
                page,
                received: issues.len(),
                total: Some(issue_page.total),
            });

            if received == 0 || issues.len() >= issue_page.total {
                break;
            }
            page += 1;
        }
        info!(sprint_id, issues = issues.len(), "listed sprint issues");
        Ok(issues)
    }

    async fn collect_values<T: DeserializeOwned>(
        &self,
        path: &str,
        progress: &mut dyn FnMut(PageProgress),
    ) -> Result<Vec<T>> {
        let mut values: Vec<T> = Vec::new();
        let mut page = 0;
        loop {
            let url = self.agile_url(&format!("{path}?startAt={}", values.len()));
            let body = self.fetcher.fetch(&url).await?;
            if body.trim().is_empty() {
                debug!(path, page, "blank page, stopping");
                break;
            }

            let value_page: ValuePage<T> = serde_json::from_str(&body)?;
            debug!(
                path,
                start_at = value_page.start_at,
                max_results = value_page.max_results,
                is_last = value_page.is_last,
                "received page"
            );
            let received = value_page.values.len();
            values.extend(value_page.values);
            progress(PageProgress {
                page,
                received: values.len(),
                total: None,
            });

            if value_page.is_last || received == 0 {
                break;
            }
            page += 1;
        }
        Ok(values)
    }

    fn agile_url(&self, path: &str) -> String {
        format!("{}/{AGILE_API}/{path}", self.base_url)
    }
}
