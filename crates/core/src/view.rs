//! Per-session browser parameters and their transitions.

use crate::filter::{Scope, SentimentFilter};
use crate::search::SearchBox;
use crate::selection::FileSelection;
use crate::sort::SortDirection;
use storage::models::Project;
use tracing::debug;

/// Operator-controlled parameters of the record browser.
///
/// Changing the file selection, the sentiment filter or the applied search
/// sends the browser back to page 1. Sorting keeps the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    project_id: String,
    files: FileSelection,
    sentiment: SentimentFilter,
    search: SearchBox,
    sort: SortDirection,
    page: usize,
}

impl ViewState {
    pub fn for_project(project: &Project) -> Self {
        Self {
            project_id: project.id.clone(),
            files: FileSelection::all(&project.files),
            sentiment: SentimentFilter::All,
            search: SearchBox::default(),
            sort: SortDirection::Unsorted,
            page: 1,
        }
    }

    /// Reconciles with the project about to be rendered. A different project
    /// starts from defaults; the same project only prunes vanished files.
    pub fn sync(&mut self, project: &Project) {
        if self.project_id != project.id {
            debug!(from = %self.project_id, to = %project.id, "project changed, resetting view");
            *self = Self::for_project(project);
        } else if self.files.sync(project) {
            self.page = 1;
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn files(&self) -> &FileSelection {
        &self.files
    }

    pub fn sentiment(&self) -> SentimentFilter {
        self.sentiment
    }

    pub fn search(&self) -> &SearchBox {
        &self.search
    }

    pub fn sort(&self) -> SortDirection {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn scope(&self) -> Scope<'_> {
        Scope::new(self.files.iter(), self.search.query())
    }

    pub fn set_files(&mut self, files: FileSelection) {
        if self.files != files {
            self.files = files;
            self.page = 1;
        }
    }

    pub fn toggle_file(&mut self, file_id: &str) -> bool {
        let changed = self.files.toggle(file_id);
        if changed {
            self.page = 1;
        }
        changed
    }

    pub fn set_sentiment(&mut self, filter: SentimentFilter) {
        if self.sentiment != filter {
            self.sentiment = filter;
            self.page = 1;
        }
    }

    /// Keystroke in the search box. Never touches the results.
    pub fn type_search(&mut self, text: &str) {
        self.search.edit(text);
    }

    pub fn commit_search(&mut self) -> bool {
        let changed = self.search.commit();
        if changed {
            self.page = 1;
        }
        changed
    }

    pub fn toggle_sort(&mut self) -> SortDirection {
        self.sort = self.sort.toggled();
        self.sort
    }

    /// Jumps to `page`, clamped to `1..=total_pages`.
    pub fn go_to(&mut self, page: usize, total_pages: usize) {
        self.page = page.clamp(1, total_pages.max(1));
    }

    pub fn first_page(&mut self) {
        self.page = 1;
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.page = (self.page + 1).min(total_pages.max(1));
    }

    pub fn last_page(&mut self, total_pages: usize) {
        self.page = total_pages.max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::models::Sentiment;
    use storage::sample::sample_projects;

    #[test]
    fn defaults_select_everything() {
        let projects = sample_projects();
        let view = ViewState::for_project(&projects[0]);
        assert_eq!(view.files().ids(), ["f1", "f2"]);
        assert_eq!(view.sentiment(), SentimentFilter::All);
        assert_eq!(view.sort(), SortDirection::Unsorted);
        assert_eq!(view.search().applied(), "");
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn sorting_keeps_page_but_filters_reset_it() {
        let projects = sample_projects();
        let mut view = ViewState::for_project(&projects[0]);
        view.go_to(3, 3);
        view.toggle_sort();
        assert_eq!(view.page(), 3);

        view.set_sentiment(SentimentFilter::All);
        assert_eq!(view.page(), 3, "same filter is not a change");
        view.set_sentiment(SentimentFilter::Only(Sentiment::Negative));
        assert_eq!(view.page(), 1);

        view.go_to(3, 3);
        view.type_search("салон");
        assert_eq!(view.page(), 3);
        assert!(view.commit_search());
        assert_eq!(view.page(), 1);

        view.go_to(2, 3);
        assert!(view.toggle_file("f2"));
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let projects = sample_projects();
        let mut view = ViewState::for_project(&projects[0]);
        view.previous_page();
        assert_eq!(view.page(), 1);
        view.next_page(2);
        view.next_page(2);
        assert_eq!(view.page(), 2);
        view.go_to(9, 2);
        assert_eq!(view.page(), 2);
        view.last_page(0);
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn switching_project_resets_view() {
        let projects = sample_projects();
        let mut view = ViewState::for_project(&projects[0]);
        view.set_sentiment(SentimentFilter::Only(Sentiment::Positive));
        view.toggle_sort();
        view.sync(&projects[0]);
        assert_eq!(view.sort(), SortDirection::Ascending);

        view.sync(&projects[1]);
        assert_eq!(view, ViewState::for_project(&projects[1]));
    }
}
