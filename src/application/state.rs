//! Application state management for the terminal dashboard.
//!
//! This module contains the view-local state (current screen, cursors,
//! in-flight fetches, input buffers) that sits on top of the shared
//! [`Store`].

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{Datelike, Local};
use tracing::{debug, info};

use super::debounce::Debouncer;
use super::fetch::{FetchEvent, Fetcher, RequestId};
use super::store::Store;
use crate::domain::performance::build_profile;
use crate::domain::{
    AnalyticsReport, BookmarkedEmployee, Department, Employee, EmployeeProfile, EmployeeQuery,
    EmployeeSource, FetchError, FilterSet, Rating, Synthesizer, enrich,
};

/// Navigable views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Employee listing with search and filters
    Employees,
    /// Profile of a single employee
    Detail,
    /// Bookmarked employee snapshots
    Bookmarks,
    /// Decorative charts
    Analytics,
}

/// Represents the current mode of the application.
///
/// The mode determines how keyboard input is interpreted and which
/// overlays are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Navigation mode - keys switch screens and trigger actions
    Normal,
    /// Search mode - user is typing a search query
    Search,
    /// Filter editor is open
    Filter,
    /// Help screen is displayed
    Help,
}

/// Tabs on the detail screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTab {
    Overview,
    Projects,
    Feedback,
}

impl DetailTab {
    pub const ALL: [DetailTab; 3] = [DetailTab::Overview, DetailTab::Projects, DetailTab::Feedback];

    pub fn title(self) -> &'static str {
        match self {
            DetailTab::Overview => "Overview",
            DetailTab::Projects => "Projects",
            DetailTab::Feedback => "Feedback",
        }
    }

    pub fn index(self) -> usize {
        match self {
            DetailTab::Overview => 0,
            DetailTab::Projects => 1,
            DetailTab::Feedback => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Progress of view-local data that has to be loaded first.
#[derive(Debug, Clone, PartialEq)]
pub enum Remote<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(FetchError),
}

impl<T> Remote<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Remote::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Remote::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// One row of the filter editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterEntry {
    Department(Department),
    Rating(Rating),
}

/// Pending filter selection, committed to the store only on apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterDraft {
    pub department: BTreeSet<Department>,
    pub rating: BTreeSet<Rating>,
    pub cursor: usize,
}

impl FilterDraft {
    pub fn from_filters(filters: &FilterSet) -> Self {
        Self {
            department: filters.department.clone(),
            rating: filters.rating.clone(),
            cursor: 0,
        }
    }

    /// All editor rows: departments first, then ratings.
    pub fn entries() -> Vec<FilterEntry> {
        Department::ALL
            .into_iter()
            .map(FilterEntry::Department)
            .chain(Rating::all().map(FilterEntry::Rating))
            .collect()
    }

    pub fn is_selected(&self, entry: FilterEntry) -> bool {
        match entry {
            FilterEntry::Department(dept) => self.department.contains(&dept),
            FilterEntry::Rating(rating) => self.rating.contains(&rating),
        }
    }

    pub fn toggle(&mut self, entry: FilterEntry) {
        match entry {
            FilterEntry::Department(dept) => {
                if !self.department.remove(&dept) {
                    self.department.insert(dept);
                }
            }
            FilterEntry::Rating(rating) => {
                if !self.rating.remove(&rating) {
                    self.rating.insert(rating);
                }
            }
        }
    }

    pub fn toggle_current(&mut self) {
        if let Some(entry) = Self::entries().get(self.cursor).copied() {
            self.toggle(entry);
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let last = Self::entries().len() - 1;
        if self.cursor < last {
            self.cursor += 1;
        }
    }
}

/// Tunables for the application layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    /// Number of employees requested from the listing endpoint
    pub page_size: usize,
    /// Quiet period before typed search text reaches the store
    pub search_debounce: Duration,
    /// How long action messages stay visible
    pub message_ttl: Duration,
    /// Simulated loading time of the analytics screen
    pub analytics_delay: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            page_size: 20,
            search_debounce: Duration::from_millis(300),
            message_ttl: Duration::from_secs(3),
            analytics_delay: Duration::from_secs(1),
        }
    }
}

/// Main application state containing the store and UI state.
///
/// The [`Store`] is handed in by the caller; every screen reads bookmark
/// status, search text and filters from it.
pub struct App {
    /// Shared bookmarks, search text and filters
    pub store: Store,
    /// Currently displayed screen
    pub screen: Screen,
    /// Screen to return to when leaving the detail view
    pub previous_screen: Screen,
    /// Current input mode
    pub mode: AppMode,
    /// Employee listing of the current view load
    pub employees: Remote<Vec<Employee>>,
    /// Profile shown on the detail screen
    pub detail: Remote<EmployeeProfile>,
    /// Id requested for the detail screen
    pub detail_id: Option<u32>,
    /// Selected detail tab
    pub detail_tab: DetailTab,
    /// Generated analytics figures
    pub analytics: Remote<AnalyticsReport>,
    /// Cursor within the filtered employee list
    pub list_cursor: usize,
    /// Cursor within the bookmark list
    pub bookmark_cursor: usize,
    /// Search text as typed, ahead of the debounced store value
    pub search_input: String,
    /// Cursor position within the search input (in chars)
    pub cursor_position: usize,
    /// Filter editor state while the editor is open
    pub filter_draft: FilterDraft,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Scroll position in help text
    pub help_scroll: usize,
    settings: AppSettings,
    search_debouncer: Debouncer<String>,
    status_expires_at: Option<Instant>,
    analytics_ready_at: Option<Instant>,
    fetcher: Fetcher,
    synth: Box<dyn Synthesizer + Send>,
    employees_request: Option<RequestId>,
    detail_request: Option<RequestId>,
}

impl App {
    pub fn new(
        store: Store,
        source: Arc<dyn EmployeeSource>,
        synth: Box<dyn Synthesizer + Send>,
        settings: AppSettings,
    ) -> Self {
        let search_input = store.state().search_query.clone();
        Self {
            filter_draft: FilterDraft::from_filters(&store.state().filters),
            cursor_position: search_input.chars().count(),
            search_input,
            store,
            screen: Screen::Employees,
            previous_screen: Screen::Employees,
            mode: AppMode::Normal,
            employees: Remote::Idle,
            detail: Remote::Idle,
            detail_id: None,
            detail_tab: DetailTab::Overview,
            analytics: Remote::Idle,
            list_cursor: 0,
            bookmark_cursor: 0,
            status_message: None,
            help_scroll: 0,
            search_debouncer: Debouncer::new(settings.search_debounce),
            settings,
            status_expires_at: None,
            analytics_ready_at: None,
            fetcher: Fetcher::new(source),
            synth,
            employees_request: None,
            detail_request: None,
        }
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    // Navigation

    /// Switches to the employee list and starts a fresh load.
    pub fn show_employees(&mut self) {
        self.screen = Screen::Employees;
        self.cancel_analytics();
        self.load_employees();
    }

    /// Requests the employee listing. Any earlier listing request is superseded.
    pub fn load_employees(&mut self) {
        self.employees = Remote::Loading;
        self.employees_request = Some(self.fetcher.fetch_employees(self.settings.page_size));
    }

    pub fn show_bookmarks(&mut self) {
        self.screen = Screen::Bookmarks;
        self.cancel_analytics();
        self.clamp_bookmark_cursor();
    }

    /// Switches to analytics; figures appear after the simulated delay.
    pub fn show_analytics(&mut self, now: Instant) {
        self.screen = Screen::Analytics;
        self.analytics = Remote::Loading;
        self.analytics_ready_at = Some(now + self.settings.analytics_delay);
    }

    /// Drops a load still waiting on its delay.
    fn cancel_analytics(&mut self) {
        if self.analytics_ready_at.take().is_some() {
            self.analytics = Remote::Idle;
        }
    }

    /// Opens the detail screen for `id` and requests the record.
    pub fn open_detail(&mut self, id: u32) {
        if self.screen != Screen::Detail {
            self.previous_screen = self.screen;
        }
        self.screen = Screen::Detail;
        self.cancel_analytics();
        self.detail_id = Some(id);
        self.detail_tab = DetailTab::Overview;
        self.load_detail();
    }

    fn load_detail(&mut self) {
        if let Some(id) = self.detail_id {
            self.detail = Remote::Loading;
            self.detail_request = Some(self.fetcher.fetch_detail(id));
        }
    }

    /// Leaves the detail screen.
    pub fn go_back(&mut self) {
        if self.screen == Screen::Detail {
            self.screen = self.previous_screen;
            self.detail_request = None;
            if self.screen == Screen::Bookmarks {
                self.clamp_bookmark_cursor();
            }
        }
    }

    /// Repeats the request behind the current screen.
    pub fn retry(&mut self, now: Instant) {
        match self.screen {
            Screen::Employees => self.load_employees(),
            Screen::Detail => self.load_detail(),
            Screen::Analytics => self.show_analytics(now),
            Screen::Bookmarks => {}
        }
    }

    // Event loop

    /// Advances time-driven state: completed fetches, debounced search,
    /// analytics loading and status message expiry.
    pub fn tick(&mut self, now: Instant) {
        while let Some(event) = self.fetcher.try_next() {
            self.handle_fetch_event(event);
        }

        if let Some(query) = self.search_debouncer.poll(now) {
            self.commit_search(query);
        }

        if let Some(ready_at) = self.analytics_ready_at {
            if now >= ready_at {
                self.analytics_ready_at = None;
                let today = Local::now().date_naive();
                let report = AnalyticsReport::generate(today, self.synth.as_mut());
                self.analytics = Remote::Ready(report);
            }
        }

        if let Some(expires_at) = self.status_expires_at {
            if now >= expires_at {
                self.status_expires_at = None;
                self.status_message = None;
            }
        }
    }

    /// Applies a completed fetch. Results of superseded requests are dropped.
    pub fn handle_fetch_event(&mut self, event: FetchEvent) {
        match event {
            FetchEvent::Employees { request, result } => {
                if self.employees_request != Some(request) {
                    debug!(request, "dropping stale employee list");
                    return;
                }
                self.employees_request = None;
                self.employees = match result {
                    Ok(records) => {
                        info!(count = records.len(), "employee list loaded");
                        let employees = records
                            .into_iter()
                            .map(|record| enrich(record, self.synth.as_mut()))
                            .collect();
                        Remote::Ready(employees)
                    }
                    Err(err) => Remote::Failed(err),
                };
                self.clamp_list_cursor();
            }
            FetchEvent::Detail { request, id, result } => {
                if self.detail_request != Some(request) || self.detail_id != Some(id) {
                    debug!(request, id, "dropping stale employee detail");
                    return;
                }
                self.detail_request = None;
                self.detail = match result {
                    Ok(record) => {
                        let year = Local::now().year();
                        Remote::Ready(build_profile(record, year, self.synth.as_mut()))
                    }
                    Err(err) => Remote::Failed(err),
                };
            }
        }
    }

    // Employee list

    /// Employees passing the current search and filters, each paired with
    /// its bookmark status.
    pub fn visible_employees(&self) -> Vec<(&Employee, bool)> {
        let Some(employees) = self.employees.ready() else {
            return Vec::new();
        };
        let state = self.store.state();
        EmployeeQuery::new(&state.search_query, &state.filters)
            .apply(employees)
            .into_iter()
            .map(|employee| (employee, state.is_bookmarked(employee.id)))
            .collect()
    }

    pub fn selected_employee(&self) -> Option<&Employee> {
        self.visible_employees()
            .get(self.list_cursor)
            .map(|(employee, _)| *employee)
    }

    fn clamp_list_cursor(&mut self) {
        let len = self.visible_employees().len();
        self.list_cursor = self.list_cursor.min(len.saturating_sub(1));
    }

    fn clamp_bookmark_cursor(&mut self) {
        let len = self.store.state().bookmarked_users.len();
        self.bookmark_cursor = self.bookmark_cursor.min(len.saturating_sub(1));
    }

    pub fn move_up(&mut self) {
        match self.screen {
            Screen::Employees => self.list_cursor = self.list_cursor.saturating_sub(1),
            Screen::Bookmarks => self.bookmark_cursor = self.bookmark_cursor.saturating_sub(1),
            Screen::Detail | Screen::Analytics => {}
        }
    }

    pub fn move_down(&mut self) {
        match self.screen {
            Screen::Employees => {
                if self.list_cursor + 1 < self.visible_employees().len() {
                    self.list_cursor += 1;
                }
            }
            Screen::Bookmarks => {
                if self.bookmark_cursor + 1 < self.store.state().bookmarked_users.len() {
                    self.bookmark_cursor += 1;
                }
            }
            Screen::Detail | Screen::Analytics => {}
        }
    }

    /// Opens the detail screen for the row under the cursor.
    pub fn open_selected(&mut self) {
        let id = match self.screen {
            Screen::Employees => self.selected_employee().map(|e| e.id),
            Screen::Bookmarks => self.selected_bookmark().map(|b| b.id),
            Screen::Detail | Screen::Analytics => None,
        };
        if let Some(id) = id {
            self.open_detail(id);
        }
    }

    // Bookmarks

    fn toggle_bookmark(&mut self, employee: &Employee) {
        if self.store.is_bookmarked(employee.id) {
            self.store.remove_bookmark(employee.id);
        } else {
            self.store.add_bookmark(BookmarkedEmployee::from(employee));
        }
    }

    /// Toggles the bookmark of the employee under the list cursor, or of
    /// the profile on the detail screen.
    pub fn toggle_selected_bookmark(&mut self) {
        let employee = match self.screen {
            Screen::Employees => self.selected_employee().cloned(),
            Screen::Detail => self.detail.ready().map(|profile| profile.employee.clone()),
            Screen::Bookmarks | Screen::Analytics => None,
        };
        if let Some(employee) = employee {
            self.toggle_bookmark(&employee);
        }
    }

    pub fn selected_bookmark(&self) -> Option<&BookmarkedEmployee> {
        self.store.state().bookmarked_users.get(self.bookmark_cursor)
    }

    pub fn remove_selected_bookmark(&mut self) {
        if let Some(id) = self.selected_bookmark().map(|b| b.id) {
            self.store.remove_bookmark(id);
            self.clamp_bookmark_cursor();
        }
    }

    fn selected_name(&self) -> Option<String> {
        match self.screen {
            Screen::Bookmarks => self.selected_bookmark().map(BookmarkedEmployee::full_name),
            Screen::Detail => self.detail.ready().map(|p| p.employee.full_name()),
            Screen::Employees => self.selected_employee().map(Employee::full_name),
            Screen::Analytics => None,
        }
    }

    pub fn promote_selected(&mut self, now: Instant) {
        if let Some(name) = self.selected_name() {
            self.set_status(format!("{name} has been marked for promotion."), now);
        }
    }

    pub fn assign_project_selected(&mut self, now: Instant) {
        if let Some(name) = self.selected_name() {
            self.set_status(format!("{name} has been assigned to a new project."), now);
        }
    }

    /// Shows `message` until the message lifetime elapses.
    pub fn set_status(&mut self, message: String, now: Instant) {
        self.status_message = Some(message);
        self.status_expires_at = Some(now + self.settings.message_ttl);
    }

    // Search

    pub fn start_search(&mut self) {
        self.mode = AppMode::Search;
        self.cursor_position = self.search_input.chars().count();
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.search_input
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.search_input.len())
    }

    pub fn search_insert(&mut self, c: char, now: Instant) {
        let at = self.byte_index(self.cursor_position);
        self.search_input.insert(at, c);
        self.cursor_position += 1;
        self.search_debouncer.push(self.search_input.clone(), now);
    }

    pub fn search_backspace(&mut self, now: Instant) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let at = self.byte_index(self.cursor_position);
            self.search_input.remove(at);
            self.search_debouncer.push(self.search_input.clone(), now);
        }
    }

    pub fn search_delete(&mut self, now: Instant) {
        if self.cursor_position < self.search_input.chars().count() {
            let at = self.byte_index(self.cursor_position);
            self.search_input.remove(at);
            self.search_debouncer.push(self.search_input.clone(), now);
        }
    }

    pub fn search_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn search_cursor_right(&mut self) {
        if self.cursor_position < self.search_input.chars().count() {
            self.cursor_position += 1;
        }
    }

    /// Commits the typed text right away and leaves search mode.
    pub fn finish_search(&mut self) {
        self.search_debouncer.cancel();
        self.commit_search(self.search_input.clone());
        self.mode = AppMode::Normal;
    }

    /// Clears the search text and leaves search mode.
    pub fn cancel_search(&mut self) {
        self.search_debouncer.cancel();
        self.search_input.clear();
        self.cursor_position = 0;
        self.commit_search(String::new());
        self.mode = AppMode::Normal;
    }

    fn commit_search(&mut self, query: String) {
        if self.store.state().search_query != query {
            self.store.set_search_query(query);
            self.list_cursor = 0;
        }
    }

    // Filters

    /// Opens the filter editor with a draft copy of the current filters.
    pub fn open_filters(&mut self) {
        self.filter_draft = FilterDraft::from_filters(&self.store.state().filters);
        self.mode = AppMode::Filter;
    }

    pub fn apply_filters(&mut self) {
        let draft = std::mem::take(&mut self.filter_draft);
        self.store.set_filters(draft.department, draft.rating);
        self.list_cursor = 0;
        self.mode = AppMode::Normal;
    }

    pub fn clear_filters(&mut self) {
        self.filter_draft = FilterDraft::default();
        self.store.clear_filters();
        self.list_cursor = 0;
        self.mode = AppMode::Normal;
    }

    pub fn cancel_filters(&mut self) {
        self.filter_draft = FilterDraft::default();
        self.mode = AppMode::Normal;
    }

    pub fn active_filter_count(&self) -> usize {
        self.store.state().filters.active_count()
    }

    // Detail tabs

    pub fn next_tab(&mut self) {
        self.detail_tab = self.detail_tab.next();
    }

    pub fn previous_tab(&mut self) {
        self.detail_tab = self.detail_tab.previous();
    }
}
