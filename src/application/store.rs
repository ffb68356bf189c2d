//! Shared dashboard state: bookmarks, search text and filters.
//!
//! All mutations go through [`Store::dispatch`], which applies the pure
//! [`reduce`] function and notifies subscribers when the state changed.
//! The store is owned by the application and handed to consumers
//! explicitly; there is no global instance.

use std::fmt;

use tracing::debug;

use crate::domain::{BookmarkedEmployee, Department, FilterSet, Rating};

/// Snapshot of the shared state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Bookmark snapshots in insertion order, at most one per id.
    pub bookmarked_users: Vec<BookmarkedEmployee>,
    pub search_query: String,
    pub filters: FilterSet,
}

impl AppState {
    pub fn is_bookmarked(&self, id: u32) -> bool {
        self.bookmarked_users.iter().any(|user| user.id == id)
    }
}

/// The five state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddBookmark(BookmarkedEmployee),
    RemoveBookmark(u32),
    SetSearchQuery(String),
    SetFilters(FilterSet),
    ClearFilters,
}

/// Computes the state that follows `action`.
///
/// Adding an id that is already bookmarked and removing one that is absent
/// both return the state unchanged.
pub fn reduce(state: &AppState, action: Action) -> AppState {
    match action {
        Action::AddBookmark(mut user) => {
            if state.is_bookmarked(user.id) {
                return state.clone();
            }
            user.bookmarked = true;
            let mut next = state.clone();
            next.bookmarked_users.push(user);
            next
        }
        Action::RemoveBookmark(id) => AppState {
            bookmarked_users: state
                .bookmarked_users
                .iter()
                .filter(|user| user.id != id)
                .cloned()
                .collect(),
            ..state.clone()
        },
        Action::SetSearchQuery(query) => AppState {
            search_query: query,
            ..state.clone()
        },
        Action::SetFilters(filters) => AppState {
            filters,
            ..state.clone()
        },
        Action::ClearFilters => AppState {
            filters: FilterSet::default(),
            ..state.clone()
        },
    }
}

pub type ListenerId = usize;

type Listener = Box<dyn FnMut(&AppState) + Send>;

/// Owner of the [`AppState`].
///
/// # Examples
///
/// ```
/// use hrdash::application::Store;
///
/// let mut store = Store::new();
/// store.set_search_query("smith");
/// assert_eq!(store.state().search_query, "smith");
/// store.clear_filters();
/// assert!(store.state().filters.is_empty());
/// ```
pub struct Store {
    state: AppState,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: ListenerId,
}

impl Default for Store {
    fn default() -> Self {
        Self::with_state(AppState::default())
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            state,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Current state. Reading has no side effects.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn is_bookmarked(&self, id: u32) -> bool {
        self.state.is_bookmarked(id)
    }

    /// Applies `action` and notifies subscribers if anything changed.
    pub fn dispatch(&mut self, action: Action) {
        debug!(?action, "dispatch");
        let next = reduce(&self.state, action);
        if next == self.state {
            return;
        }
        self.state = next;
        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
    }

    pub fn add_bookmark(&mut self, user: BookmarkedEmployee) {
        self.dispatch(Action::AddBookmark(user));
    }

    pub fn remove_bookmark(&mut self, id: u32) {
        self.dispatch(Action::RemoveBookmark(id));
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.dispatch(Action::SetSearchQuery(query.into()));
    }

    /// Replaces both filter sets in one transition.
    pub fn set_filters(
        &mut self,
        department: impl IntoIterator<Item = Department>,
        rating: impl IntoIterator<Item = Rating>,
    ) {
        self.dispatch(Action::SetFilters(FilterSet::new(department, rating)));
    }

    pub fn clear_filters(&mut self) {
        self.dispatch(Action::ClearFilters);
    }

    /// Registers `listener` to run after every state change.
    pub fn subscribe(&mut self, listener: impl FnMut(&AppState) + Send + 'static) -> ListenerId {
        let id = self.next_listener;
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn snapshot(id: u32, first_name: &str) -> BookmarkedEmployee {
        BookmarkedEmployee {
            id,
            first_name: first_name.to_string(),
            last_name: "Lee".to_string(),
            email: format!("{}@example.com", first_name.to_lowercase()),
            age: 30,
            department: Department::HR,
            rating: Rating::new(4).unwrap(),
            bookmarked: false,
        }
    }

    #[test]
    fn test_store_default() {
        let store = Store::new();
        assert!(store.state().bookmarked_users.is_empty());
        assert_eq!(store.state().search_query, "");
        assert!(store.state().filters.department.is_empty());
        assert!(store.state().filters.rating.is_empty());
    }

    #[test]
    fn test_add_then_remove_bookmark() {
        let mut store = Store::new();
        store.add_bookmark(snapshot(7, "Ann"));
        assert_eq!(store.state().bookmarked_users.len(), 1);
        assert_eq!(store.state().bookmarked_users[0].id, 7);
        assert!(store.state().bookmarked_users[0].bookmarked);
        assert!(store.is_bookmarked(7));

        store.remove_bookmark(7);
        assert!(store.state().bookmarked_users.is_empty());
        assert!(!store.is_bookmarked(7));
    }

    #[test]
    fn test_add_bookmark_is_idempotent() {
        let mut store = Store::new();
        store.add_bookmark(snapshot(7, "Ann"));
        let once = store.state().clone();
        store.add_bookmark(snapshot(7, "Ann"));
        assert_eq!(store.state(), &once);
    }

    #[test]
    fn test_duplicate_add_keeps_original_snapshot() {
        let mut store = Store::new();
        store.add_bookmark(snapshot(7, "Ann"));
        store.add_bookmark(snapshot(7, "Changed"));
        assert_eq!(store.state().bookmarked_users.len(), 1);
        assert_eq!(store.state().bookmarked_users[0].first_name, "Ann");
    }

    #[test]
    fn test_bookmarks_keep_insertion_order() {
        let mut store = Store::new();
        for id in [3, 1, 2] {
            store.add_bookmark(snapshot(id, "X"));
        }
        let ids: Vec<u32> = store.state().bookmarked_users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        store.remove_bookmark(1);
        let ids: Vec<u32> = store.state().bookmarked_users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn test_remove_absent_bookmark_is_noop() {
        let mut store = Store::new();
        store.add_bookmark(snapshot(1, "Ann"));
        let before = store.state().clone();
        store.remove_bookmark(99);
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_search_query_is_stored_verbatim() {
        let mut store = Store::new();
        store.set_search_query("  Smith ");
        assert_eq!(store.state().search_query, "  Smith ");
        store.set_search_query("");
        assert_eq!(store.state().search_query, "");
    }

    #[test]
    fn test_set_filters_replaces_both_fields() {
        let mut store = Store::new();
        store.set_filters([Department::HR], [Rating::new(2).unwrap()]);
        store.set_filters([], [Rating::new(5).unwrap()]);
        let filters = &store.state().filters;
        assert!(filters.department.is_empty());
        assert_eq!(filters.rating.iter().map(|r| r.value()).collect::<Vec<_>>(), vec![5]);
    }

    #[test]
    fn test_clear_filters() {
        let mut store = Store::new();
        store.set_filters(
            [Department::Engineering, Department::Design],
            [Rating::new(1).unwrap(), Rating::new(3).unwrap()],
        );
        store.clear_filters();
        assert_eq!(store.state().filters, FilterSet::default());
    }

    #[test]
    fn test_filter_changes_leave_bookmarks_and_search_alone() {
        let mut store = Store::new();
        store.add_bookmark(snapshot(1, "Ann"));
        store.set_search_query("ann");
        store.set_filters([Department::Sales], []);
        store.clear_filters();
        assert_eq!(store.state().bookmarked_users.len(), 1);
        assert_eq!(store.state().search_query, "ann");
    }

    #[test]
    fn test_subscribers_notified_only_on_change() {
        let mut store = Store::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        store.subscribe(move |state| {
            sink.lock().unwrap().push(state.bookmarked_users.len());
        });

        store.add_bookmark(snapshot(1, "Ann"));
        store.add_bookmark(snapshot(1, "Ann"));
        store.remove_bookmark(42);
        store.remove_bookmark(1);

        assert_eq!(*seen.lock().unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = Store::new();
        let count = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&count);
        let id = store.subscribe(move |_| *sink.lock().unwrap() += 1);
        store.set_search_query("a");
        store.unsubscribe(id);
        store.set_search_query("b");
        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn test_reduce_does_not_touch_input_state() {
        let state = AppState::default();
        let next = reduce(&state, Action::AddBookmark(snapshot(5, "Bo")));
        assert!(state.bookmarked_users.is_empty());
        assert_eq!(next.bookmarked_users.len(), 1);
    }
}
