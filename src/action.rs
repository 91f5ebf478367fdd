//! Actions
//!
//! The vocabulary of model transitions. On the wire an action is a
//! string tag plus an optional payload: `{"action":"TOGGLE","data":3}`.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Append an item; without a title the new-item input is used
    Add(Option<String>),
    Toggle(u32),
    ToggleAll,
    Delete(u32),
    /// Click on an item label; two quick clicks open the edit field
    Edit(u32),
    /// Commit the open edit field
    Save,
    Cancel,
    ClearCompleted,
    /// Pick up the current route fragment
    Route,
}

impl Action {
    pub fn tag(&self) -> &'static str {
        match self {
            Action::Add(_) => "ADD",
            Action::Toggle(_) => "TOGGLE",
            Action::ToggleAll => "TOGGLE_ALL",
            Action::Delete(_) => "DELETE",
            Action::Edit(_) => "EDIT",
            Action::Save => "SAVE",
            Action::Cancel => "CANCEL",
            Action::ClearCompleted => "CLEAR_COMPLETED",
            Action::Route => "ROUTE",
        }
    }

    /// Parse the bare string form. Unknown tags and id actions without a
    /// numeric payload yield `None`.
    pub fn from_tag(tag: &str, data: Option<&str>) -> Option<Self> {
        let id = || data.and_then(|d| d.trim().parse::<u32>().ok());
        let action = match tag {
            "ADD" => Action::Add(data.map(str::to_string)),
            "TOGGLE" => Action::Toggle(id()?),
            "TOGGLE_ALL" => Action::ToggleAll,
            "DELETE" => Action::Delete(id()?),
            "EDIT" => Action::Edit(id()?),
            "SAVE" => Action::Save,
            "CANCEL" => Action::Cancel,
            "CLEAR_COMPLETED" => Action::ClearCompleted,
            "ROUTE" => Action::Route,
            _ => return None,
        };
        Some(action)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Add(Some(title)) => write!(f, "ADD {:?}", title),
            Action::Toggle(id) | Action::Delete(id) | Action::Edit(id) => write!(f, "{} {}", self.tag(), id),
            _ => f.write_str(self.tag()),
        }
    }
}
