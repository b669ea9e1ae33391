use clap::{ArgGroup, Parser};
use indicatif::{MultiProgress, ProgressBar};
use sprint_metrics::analyze::{Analyzer, DataAnalysis};
use sprint_metrics::jira::{Credentials, Fetcher, HttpFetcher, JiraClient};
use sprint_metrics::model::{Error, Result, Sprint, Team};
use sprint_metrics::report::{CsvReport, MarkdownReport};
use sprint_metrics::utils::{page_reporter, MultiProgressNew, ProgressStyleTemplate};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Sprint velocity and epic reports from Jira")]
#[command(group(ArgGroup::new("sprint").required(true).args(["sprint_id", "sprint_name"])))]
struct Args {
    /// Jira base url, e.g. https://jira.example.com
    #[arg(long)]
    url: String,
    #[arg(long)]
    username: String,
    #[arg(long, env = "JIRA_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long = "sprint-id")]
    sprint_id: Option<u64>,
    /// Case-insensitive part of the sprint name, looked up on every board
    #[arg(long = "sprint-name")]
    sprint_name: Option<String>,
    #[arg(long = "story-points-field", default_value = "customfield_10002")]
    story_points_field: String,
    #[arg(long = "teams", default_value = "teams.json")]
    teams_path: String,
    #[arg(long = "output", default_value = "reports")]
    output: PathBuf,
    #[arg(long = "page-size", default_value_t = 100)]
    page_size: usize,
    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<()> {
    validate(args)?;
    let teams = parse_teams(&args.teams_path)?;

    let credentials = Credentials::new(&args.username, &args.password);
    let fetcher = HttpFetcher::new(&credentials, args.timeout.map(Duration::from_secs))?;
    let client = JiraClient::new(fetcher, &args.url);

    let sprints = resolve_sprints(&client, args).await?;
    let mut data_analysis =
        DataAnalysis::new(teams, &args.story_points_field, client.base_url());

    let multi_progress = MultiProgress::default();
    for sprint in &sprints {
        let pb = multi_progress.add_with_style(
            ProgressBar::no_length(),
            ProgressStyleTemplate::issues_bar(),
        );
        let mut progress = page_reporter(&pb, &sprint.name);
        let issues = client
            .list_sprint_issues(sprint.id, args.page_size, &mut progress)
            .await?;
        pb.finish_with_message(format!("✅ {}", sprint.name));
        data_analysis.insert_issues(sprint, issues);
    }

    let analyzed = data_analysis.analyze_sprints();
    std::fs::create_dir_all(&args.output)?;
    let csv_files = analyzed.csv_create(&args.output)?;
    let report = analyzed.report_create(&args.output)?;
    info!(
        sprints = analyzed.len(),
        csv_files = csv_files.len(),
        report = %report.display(),
        "reports created"
    );
    Ok(())
}

fn validate(args: &Args) -> Result<()> {
    let url = args.url.trim();
    if url.is_empty() {
        return Err(Error::configuration("Jira url is empty"));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(Error::configuration(format!(
            "Jira url '{url}' must start with http:// or https://"
        )));
    }
    if args.page_size == 0 {
        return Err(Error::configuration("Page size must be greater than zero"));
    }
    Ok(())
}

fn parse_teams(path: &str) -> Result<Vec<Team>> {
    let pb = ProgressBar::new_spinner().with_style(ProgressStyleTemplate::only_message());
    pb.set_message(format!("Read file `{path}` ..."));
    let teams = Team::from_config(path)?;
    pb.finish_with_message(format!(
        "✅ Completed parsing file `{}` (find {} teams)",
        path,
        teams.len()
    ));
    Ok(teams)
}

async fn resolve_sprints<F: Fetcher>(client: &JiraClient<F>, args: &Args) -> Result<Vec<Sprint>> {
    if let Some(sprint_id) = args.sprint_id {
        return Ok(vec![client.sprint_detail(sprint_id).await?]);
    }

    let keyword = args.sprint_name.as_deref().unwrap_or_default();
    let pb = ProgressBar::new_spinner().with_style(ProgressStyleTemplate::only_message());
    let mut progress = page_reporter(&pb, "Looking up sprints");
    let sprints = client.find_sprints_by_name(keyword, &mut progress).await?;
    if sprints.is_empty() {
        pb.abandon_with_message(format!("No sprint matches '{keyword}'"));
        return Err(Error::configuration(format!("No sprint matches '{keyword}'")));
    }
    pb.finish_with_message(format!("✅ Found {} sprints", sprints.len()));
    Ok(sprints)
}
