//! Wire types for the remote todo store.

use serde::{Deserialize, Serialize};

/// A single todo item as stored remotely.
///
/// The `id` is assigned by the server on create and immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Server-assigned identifier
    pub id: u64,
    /// Title of the todo
    pub title: String,
    /// Whether the todo is completed
    #[serde(default)]
    pub completed: bool,
    /// Owning user (1-10 in the remote store)
    pub user_id: u64,
}

/// Editable fields for a create or full-record update call.
///
/// Unset optional fields are defaulted by the data access layer before the
/// request is dispatched (`completed = false`, `user_id = 1`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoInput {
    /// Title of the todo (required, non-whitespace)
    pub title: String,
    /// Completion flag; defaults to `false` when unset
    pub completed: Option<bool>,
    /// Owning user; defaults to `1` when unset
    pub user_id: Option<u64>,
}

impl TodoInput {
    /// Input with just a title, everything else defaulted
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: None,
            user_id: None,
        }
    }

    /// Input carrying every editable field of an existing todo
    #[must_use]
    pub fn from_todo(todo: &Todo) -> Self {
        Self {
            title: todo.title.clone(),
            completed: Some(todo.completed),
            user_id: Some(todo.user_id),
        }
    }
}

/// Optional server-side filter for [`list`](crate::TodoApi::list).
///
/// Serialized to query parameters; unset fields are omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilter {
    /// Restrict to a single user's todos
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    /// Restrict by completion state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}
