use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cli::render;
use cli::session::Session;
use review_core::config;
use review_core::config::AppConfig;
use review_core::dashboard;
use review_core::export::ExportPlan;
use review_core::filter::SentimentFilter;
use review_core::pipeline;
use review_core::selection::FileSelection;
use review_core::sort::SortDirection;
use review_core::view::ViewState;
use std::io;
use std::path::Path;
use std::time::Duration;
use storage::models::Sentiment;
use storage::ProjectStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref())?;
    init_tracing(&cfg.logging.filter);

    let data = cli.data.clone().or_else(|| cfg.data.path.clone());
    let mut store = storage::open(data.as_deref().map(Path::new)).context("open project store")?;

    match cli.command {
        Commands::Projects { json } => run_projects(&store, json),
        Commands::Dashboard {
            project,
            files,
            keyword,
            json,
        } => run_dashboard(&mut store, project.as_deref(), &files, keyword.as_deref(), json),
        Commands::Browse {
            project,
            files,
            filter,
            search,
            sort,
            page,
            json,
        } => run_browse(
            &cfg,
            &mut store,
            project.as_deref(),
            &files,
            &filter,
            search.as_deref(),
            &sort,
            page,
            json,
        ),
        Commands::Correct {
            project,
            record,
            sentiment,
            json,
        } => run_correct(&mut store, project.as_deref(), &record, &sentiment, json),
        Commands::Export {
            project,
            files,
            no_merge,
        } => run_export(&cfg, &mut store, project.as_deref(), &files, !no_merge).await,
        Commands::Session { project } => run_session(&cfg, store, project.as_deref()).await,
    }
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[derive(Parser)]
#[command(name = "review-desk")]
#[command(about = "Review and correct sentiment labels of analysed feedback", long_about = None)]
struct Cli {
    /// Path to config TOML
    #[arg(short, long)]
    config: Option<String>,

    /// JSON fixture with projects (defaults to the built-in sample set)
    #[arg(long)]
    data: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List projects
    Projects {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Sentiment distribution, KPI cards, insights and top keywords
    Dashboard {
        /// Project id (defaults to the first project)
        #[arg(short, long)]
        project: Option<String>,
        /// Restrict to these file ids (comma-separated)
        #[arg(long, value_delimiter = ',', num_args = 1..)]
        files: Vec<String>,
        /// Show AI details for one keyword
        #[arg(long)]
        keyword: Option<String>,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// One page of the record browser
    Browse {
        /// Project id (defaults to the first project)
        #[arg(short, long)]
        project: Option<String>,
        /// Restrict to these file ids (comma-separated)
        #[arg(long, value_delimiter = ',', num_args = 1..)]
        files: Vec<String>,
        /// Sentiment filter: all|positive|neutral|negative
        #[arg(long, default_value = "all")]
        filter: String,
        /// Case-insensitive text search
        #[arg(short, long)]
        search: Option<String>,
        /// Confidence ordering: none|asc|desc
        #[arg(long, default_value = "none")]
        sort: String,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Relabel one record and show the recomputed distribution
    Correct {
        /// Project id (defaults to the first project)
        #[arg(short, long)]
        project: Option<String>,
        /// Record id, e.g. 100-5
        #[arg(long)]
        record: String,
        /// New label: positive|neutral|negative
        #[arg(long)]
        sentiment: String,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Simulated CSV export
    Export {
        /// Project id (defaults to the first project)
        #[arg(short, long)]
        project: Option<String>,
        /// Export only these file ids (comma-separated)
        #[arg(long, value_delimiter = ',', num_args = 1..)]
        files: Vec<String>,
        /// Keep one output per file instead of merging
        #[arg(long, default_value_t = false)]
        no_merge: bool,
    },
    /// Interactive session reading commands from stdin
    Session {
        /// Project to open first
        #[arg(short, long)]
        project: Option<String>,
    },
}

fn open_project(store: &mut ProjectStore, project: Option<&str>) -> Result<()> {
    if let Some(id) = project {
        store.select(id)?;
    }
    Ok(())
}

fn run_projects(store: &ProjectStore, json: bool) -> Result<()> {
    if json {
        let rows: Vec<serde_json::Value> = store
            .projects()
            .iter()
            .map(|p| {
                serde_json::json!({
                    "id": p.id,
                    "title": p.title,
                    "description": p.description,
                    "files": p.files,
                    "records": p.records.len(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", render::projects(store.projects(), store.current_id()));
    }
    Ok(())
}

fn run_dashboard(
    store: &mut ProjectStore,
    project: Option<&str>,
    files: &[String],
    keyword: Option<&str>,
    json: bool,
) -> Result<()> {
    open_project(store, project)?;
    let project = store.current();
    let selection = FileSelection::only(files.iter().cloned(), project);
    let dash = dashboard::build(project, &selection);
    let detail = keyword.map(|name| dashboard::find_keyword(project, name));

    if json {
        let mut out = serde_json::to_value(&dash)?;
        if let (Some(obj), Some(detail)) = (out.as_object_mut(), detail) {
            obj.insert("keyword".into(), serde_json::to_value(detail)?);
        }
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", render::dashboard(project, &dash));
        if let Some(detail) = detail {
            print!("{}", render::keyword(detail));
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_browse(
    cfg: &AppConfig,
    store: &mut ProjectStore,
    project: Option<&str>,
    files: &[String],
    filter: &str,
    search: Option<&str>,
    sort: &str,
    page: usize,
    json: bool,
) -> Result<()> {
    open_project(store, project)?;
    let project = store.current();
    let filter: SentimentFilter = filter.parse()?;
    let sort: SortDirection = sort.parse()?;

    let mut view = ViewState::for_project(project);
    if !files.is_empty() {
        view.set_files(FileSelection::only(files.iter().cloned(), project));
    }
    view.set_sentiment(filter);
    if let Some(text) = search {
        view.type_search(text);
        view.commit_search();
    }
    match sort {
        SortDirection::Unsorted => {}
        SortDirection::Ascending => {
            view.toggle_sort();
        }
        SortDirection::Descending => {
            view.toggle_sort();
            view.toggle_sort();
        }
    }
    let total_pages = pipeline::run(project, &view, cfg.browser.page_size)
        .page
        .total_pages;
    view.go_to(page, total_pages);

    let result = pipeline::run(project, &view, cfg.browser.page_size);
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render::browser(project, &view, &result));
    }
    Ok(())
}

fn run_correct(
    store: &mut ProjectStore,
    project: Option<&str>,
    record: &str,
    sentiment: &str,
    json: bool,
) -> Result<()> {
    open_project(store, project)?;
    let sentiment: Sentiment = sentiment.parse()?;
    let project_id = store.current_id().to_string();
    let previous = store.current().record(record).map(|r| r.sentiment);
    let changed = store.correct_sentiment(&project_id, record, sentiment)?;

    let project = store.current();
    let selection = FileSelection::all(&project.files);
    let distribution = dashboard::sentiment_distribution(project, &selection);
    if json {
        let out = serde_json::json!({
            "project": project_id,
            "record": record,
            "found": previous.is_some(),
            "previous": previous,
            "sentiment": sentiment,
            "changed": changed,
            "distribution": distribution,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        match previous {
            Some(old) if changed => println!("{record}: {} -> {}", old.label(), sentiment.label()),
            Some(_) => println!("{record}: уже {}", sentiment.label()),
            None => println!("запись {record} не найдена, изменений нет"),
        }
        for slice in dashboard::pie_slices(&distribution) {
            println!("  {:<11} {}", slice.label, slice.value);
        }
    }
    Ok(())
}

async fn run_export(
    cfg: &AppConfig,
    store: &mut ProjectStore,
    project: Option<&str>,
    files: &[String],
    merge: bool,
) -> Result<()> {
    open_project(store, project)?;
    let project = store.current();
    let mut plan = ExportPlan::with_files(project, files)?;
    plan.merge = merge;
    println!("{}", plan.dropdown_label(project));
    let message = plan
        .run(project, Duration::from_millis(cfg.export.delay_ms))
        .await?;
    println!("{message}");
    Ok(())
}

async fn run_session(cfg: &AppConfig, mut store: ProjectStore, project: Option<&str>) -> Result<()> {
    open_project(&mut store, project)?;
    let mut session = Session::new(
        store,
        cfg.browser.page_size,
        Duration::from_millis(cfg.export.delay_ms),
    );
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    session.run(stdin.lock(), &mut stdout).await
}
