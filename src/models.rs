//! Frontend Models
//!
//! Application state snapshots.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Route fragment of the unfiltered list
pub const ROUTE_ALL: &str = "#/";
pub const ROUTE_ACTIVE: &str = "#/active";
pub const ROUTE_COMPLETED: &str = "#/completed";

/// A single todo entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: u32,
    pub title: String,
    pub done: bool,
}

impl TodoItem {
    pub fn new(id: u32, title: impl Into<String>) -> Self {
        Self { id, title: title.into(), done: false }
    }
}

/// Full application state.
///
/// Items sit behind `Arc` so that cloning a model copies pointers only;
/// updates replace just the items they touch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub todos: Vec<Arc<TodoItem>>,
    /// Current route fragment, e.g. `#/active`
    pub hash: String,
    /// Item whose edit field is open
    #[serde(default)]
    pub editing: Option<u32>,
    /// Last clicked item, for double-click detection
    #[serde(default)]
    pub clicked: Option<u32>,
    /// Time of the last click in ms since epoch
    #[serde(default)]
    pub click_time: Option<f64>,
    #[serde(default)]
    pub all_done: bool,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            todos: Vec::new(),
            hash: ROUTE_ALL.to_string(),
            editing: None,
            clicked: None,
            click_time: None,
            all_done: false,
        }
    }
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a model holding the given items
    pub fn with_todos(todos: impl IntoIterator<Item = TodoItem>) -> Self {
        Self {
            todos: todos.into_iter().map(Arc::new).collect(),
            ..Self::default()
        }
    }

    /// `max(existing id) + 1`, starting at 1
    pub fn next_id(&self) -> u32 {
        self.todos.iter().map(|t| t.id).max().map_or(1, |max| max + 1)
    }

    pub fn find(&self, id: u32) -> Option<&TodoItem> {
        self.todos.iter().map(Arc::as_ref).find(|t| t.id == id)
    }

    pub fn filter(&self) -> Filter {
        Filter::from_hash(&self.hash)
    }

    pub fn remaining_count(&self) -> usize {
        self.todos.iter().filter(|t| !t.done).count()
    }

    pub fn completed_count(&self) -> usize {
        self.todos.len() - self.remaining_count()
    }

    /// Items shown in the main list under the current route
    pub fn visible_todos(&self) -> impl Iterator<Item = &TodoItem> {
        let filter = self.filter();
        self.todos.iter().map(Arc::as_ref).filter(move |t| filter.accepts(t))
    }
}

/// List filter selected by the route fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    /// Anything other than the active/completed routes shows everything
    pub fn from_hash(hash: &str) -> Self {
        match hash {
            ROUTE_ACTIVE => Filter::Active,
            ROUTE_COMPLETED => Filter::Completed,
            _ => Filter::All,
        }
    }

    pub fn hash(self) -> &'static str {
        match self {
            Filter::All => ROUTE_ALL,
            Filter::Active => ROUTE_ACTIVE,
            Filter::Completed => ROUTE_COMPLETED,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }

    /// Element id of the footer link
    pub fn link_id(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }

    pub fn accepts(self, item: &TodoItem) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !item.done,
            Filter::Completed => item.done,
        }
    }
}
