//! Line-oriented interactive session over one project store.
//!
//! Each command mutates either the view state or the store, and the next
//! `show`/`dashboard` recomputes every derived value from scratch.

use crate::render;
use anyhow::{anyhow, bail, Result};
use review_core::dashboard;
use review_core::export::ExportPlan;
use review_core::filter::SentimentFilter;
use review_core::intake::{self, NewAnalysis};
use review_core::pipeline;
use review_core::selection::FileSelection;
use review_core::view::ViewState;
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::time::Duration;
use storage::models::Sentiment;
use storage::ProjectStore;
use tracing::debug;

pub const HELP: &str = "\
команды:
  show                     таблица записей (текущая страница)
  dashboard                обзор проекта
  projects | project <id>  список проектов / открыть проект
  files | toggle-file <id> источники таблицы
  dash-file <id>           источники обзора
  filter <all|positive|neutral|negative>
  type <текст>             ввести текст поиска (без применения)
  search [текст]           применить поиск
  sort                     переключить сортировку по уверенности
  page <n> | next | prev | first | last
  correct <id> <sentiment> исправить тональность записи
  keyword <название>       детали ключевого слова
  new <название> | <файл.csv> [| описание]
  upload <файл.csv> | remove-file <id> | rename <название>
  export [nomerge] [id,id]
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Dashboard,
    Projects,
    Project(String),
    Files,
    ToggleFile(String),
    DashboardFile(String),
    Filter(SentimentFilter),
    Type(String),
    Search(Option<String>),
    Sort,
    Page(usize),
    Next,
    Prev,
    First,
    Last,
    Correct { record: String, sentiment: Sentiment },
    Keyword(String),
    New(NewAnalysisArgs),
    Upload(String),
    RemoveFile(String),
    Rename(String),
    Export { merge: bool, files: Vec<String> },
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnalysisArgs {
    pub title: String,
    pub file_name: Option<String>,
    pub description: String,
}

fn required(rest: &str, what: &str) -> Result<String> {
    let rest = rest.trim();
    if rest.is_empty() {
        bail!("missing {what}");
    }
    Ok(rest.to_string())
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let cmd = match word {
            "show" | "ls" => Command::Show,
            "dashboard" | "dash" => Command::Dashboard,
            "projects" => Command::Projects,
            "project" => Command::Project(required(rest, "project id")?),
            "files" => Command::Files,
            "toggle-file" => Command::ToggleFile(required(rest, "file id")?),
            "dash-file" => Command::DashboardFile(required(rest, "file id")?),
            "filter" => Command::Filter(required(rest, "filter")?.parse()?),
            "type" => Command::Type(rest.to_string()),
            "search" => Command::Search((!rest.is_empty()).then(|| rest.to_string())),
            "sort" => Command::Sort,
            "page" => Command::Page(required(rest, "page number")?.parse()?),
            "next" => Command::Next,
            "prev" => Command::Prev,
            "first" => Command::First,
            "last" => Command::Last,
            "correct" => {
                let mut parts = rest.split_whitespace();
                let record = parts.next().ok_or_else(|| anyhow!("missing record id"))?;
                let sentiment = parts.next().ok_or_else(|| anyhow!("missing sentiment"))?;
                Command::Correct {
                    record: record.to_string(),
                    sentiment: sentiment.parse()?,
                }
            }
            "keyword" => Command::Keyword(required(rest, "keyword")?),
            "new" => {
                let mut parts = rest.split('|').map(str::trim);
                Command::New(NewAnalysisArgs {
                    title: parts.next().unwrap_or_default().to_string(),
                    file_name: parts.next().filter(|s| !s.is_empty()).map(str::to_string),
                    description: parts.next().unwrap_or_default().to_string(),
                })
            }
            "upload" => Command::Upload(required(rest, "file name")?),
            "remove-file" => Command::RemoveFile(required(rest, "file id")?),
            "rename" => Command::Rename(required(rest, "title")?),
            "export" => {
                let mut merge = true;
                let mut files = Vec::new();
                for token in rest.split_whitespace() {
                    if token == "nomerge" {
                        merge = false;
                    } else {
                        files.extend(token.split(',').filter(|s| !s.is_empty()).map(str::to_string));
                    }
                }
                Command::Export { merge, files }
            }
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => bail!("unknown command: {other} (try `help`)"),
        };
        Ok(cmd)
    }
}

pub struct Session {
    store: ProjectStore,
    view: ViewState,
    dashboard_files: FileSelection,
    page_size: usize,
    export_delay: Duration,
}

impl Session {
    pub fn new(store: ProjectStore, page_size: usize, export_delay: Duration) -> Self {
        let view = ViewState::for_project(store.current());
        let dashboard_files = FileSelection::all(&store.current().files);
        Self {
            store,
            view,
            dashboard_files,
            page_size,
            export_delay,
        }
    }

    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Brings the ephemeral selections in line with the store after a mutation.
    fn resync(&mut self) {
        let project = self.store.current();
        if self.view.project_id() != project.id {
            self.dashboard_files = FileSelection::all(&project.files);
        } else {
            self.dashboard_files.sync(project);
        }
        self.view.sync(project);
    }

    fn total_pages(&self) -> usize {
        pipeline::run(self.store.current(), &self.view, self.page_size)
            .page
            .total_pages
    }

    fn show(&self) -> String {
        let project = self.store.current();
        let page = pipeline::run(project, &self.view, self.page_size);
        render::browser(project, &self.view, &page)
    }

    /// Runs one command. `Ok(None)` ends the session.
    pub async fn execute(&mut self, command: Command) -> Result<Option<String>> {
        debug!(?command, "session command");
        let reply = match command {
            Command::Quit => return Ok(None),
            Command::Help => HELP.to_string(),
            Command::Show => self.show(),
            Command::Dashboard => {
                let project = self.store.current();
                render::dashboard(project, &dashboard::build(project, &self.dashboard_files))
            }
            Command::Projects => render::projects(self.store.projects(), self.store.current_id()),
            Command::Project(id) => {
                self.store.select(&id)?;
                self.resync();
                self.show()
            }
            Command::Files => render::files(self.store.current(), self.view.files()),
            Command::ToggleFile(id) => {
                if !self.store.current().has_source(&id) {
                    bail!("unknown file: {id}");
                }
                if !self.view.toggle_file(&id) {
                    bail!("at least one data source must stay selected");
                }
                self.show()
            }
            Command::DashboardFile(id) => {
                if !self.store.current().has_source(&id) {
                    bail!("unknown file: {id}");
                }
                if !self.dashboard_files.toggle(&id) {
                    bail!("at least one data source must stay selected");
                }
                let project = self.store.current();
                render::dashboard(project, &dashboard::build(project, &self.dashboard_files))
            }
            Command::Filter(filter) => {
                self.view.set_sentiment(filter);
                self.show()
            }
            Command::Type(text) => {
                self.view.type_search(&text);
                format!("ввод: \"{}\" (search чтобы применить)", self.view.search().pending())
            }
            Command::Search(text) => {
                if let Some(text) = text {
                    self.view.type_search(&text);
                }
                self.view.commit_search();
                self.show()
            }
            Command::Sort => {
                self.view.toggle_sort();
                self.show()
            }
            Command::Page(n) => {
                let total = self.total_pages();
                self.view.go_to(n, total);
                self.show()
            }
            Command::Next => {
                let total = self.total_pages();
                self.view.next_page(total);
                self.show()
            }
            Command::Prev => {
                self.view.previous_page();
                self.show()
            }
            Command::First => {
                self.view.first_page();
                self.show()
            }
            Command::Last => {
                let total = self.total_pages();
                self.view.last_page(total);
                self.show()
            }
            Command::Correct { record, sentiment } => {
                let project_id = self.store.current_id().to_string();
                let previous = self.store.current().record(&record).map(|r| r.sentiment);
                let changed = self.store.correct_sentiment(&project_id, &record, sentiment)?;
                match (previous, changed) {
                    (None, _) => format!("запись {record} не найдена, изменений нет"),
                    (Some(old), true) => format!("{record}: {} -> {}", old.label(), sentiment.label()),
                    (Some(_), false) => format!("{record}: уже {}", sentiment.label()),
                }
            }
            Command::Keyword(name) => {
                render::keyword(dashboard::find_keyword(self.store.current(), &name))
            }
            Command::New(args) => {
                let request = NewAnalysis {
                    title: args.title,
                    description: args.description,
                    file_name: args.file_name,
                };
                let project = intake::create_project(&request, &mut rand::thread_rng())?;
                self.store.insert(project)?;
                self.resync();
                render::projects(self.store.projects(), self.store.current_id())
            }
            Command::Upload(name) => {
                let file = intake::upload_file(&name, &mut rand::thread_rng())?;
                let project_id = self.store.current_id().to_string();
                self.store.add_file(&project_id, file)?;
                self.resync();
                render::files(self.store.current(), self.view.files())
            }
            Command::RemoveFile(id) => {
                let project_id = self.store.current_id().to_string();
                if !self.store.remove_file(&project_id, &id)? {
                    bail!("unknown file: {id}");
                }
                self.resync();
                render::files(self.store.current(), self.view.files())
            }
            Command::Rename(title) => {
                let project_id = self.store.current_id().to_string();
                self.store.rename(&project_id, &title)?;
                format!("проект {project_id}: {title}")
            }
            Command::Export { merge, files } => {
                let project = self.store.current();
                let mut plan = ExportPlan::with_files(project, &files)?;
                plan.merge = merge;
                let label = plan.dropdown_label(project);
                let message = plan.run(project, self.export_delay).await?;
                format!("{label}\n{message}")
            }
        };
        Ok(Some(reply))
    }

    /// Reads commands until `quit` or end of input. Bad input is reported and
    /// the loop goes on.
    pub async fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        writeln!(out, "{}", self.show())?;
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let outcome = match line.parse::<Command>() {
                Ok(command) => self.execute(command).await,
                Err(err) => Err(err),
            };
            match outcome {
                Ok(Some(reply)) => writeln!(out, "{reply}")?,
                Ok(None) => break,
                Err(err) => writeln!(out, "ошибка: {err}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(
            "filter negative".parse::<Command>().unwrap(),
            Command::Filter(SentimentFilter::Only(Sentiment::Negative))
        );
        assert_eq!("type  печка ".parse::<Command>().unwrap(), Command::Type("печка".into()));
        assert_eq!("search".parse::<Command>().unwrap(), Command::Search(None));
        assert_eq!(
            "correct 100-5 positive".parse::<Command>().unwrap(),
            Command::Correct {
                record: "100-5".into(),
                sentiment: Sentiment::Positive
            }
        );
        assert_eq!(
            "export nomerge f1,f2".parse::<Command>().unwrap(),
            Command::Export {
                merge: false,
                files: vec!["f1".into(), "f2".into()]
            }
        );
        assert_eq!(
            "new Жалобы Декабрь | dec.csv".parse::<Command>().unwrap(),
            Command::New(NewAnalysisArgs {
                title: "Жалобы Декабрь".into(),
                file_name: Some("dec.csv".into()),
                description: String::new(),
            })
        );
    }

    #[test]
    fn rejects_unknown_and_incomplete_commands() {
        assert!("dance".parse::<Command>().is_err());
        assert!("page".parse::<Command>().is_err());
        assert!("page two".parse::<Command>().is_err());
        assert!("correct 100-5".parse::<Command>().is_err());
        assert!("filter happy".parse::<Command>().is_err());
    }
}
