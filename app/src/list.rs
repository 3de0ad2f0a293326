//! The tabular list view.
//!
//! Loads the full todo collection on activation and tracks
//! loading/error/data states. Each activation bumps an epoch; a load result
//! carrying a stale epoch is discarded without mutating state, which is how a
//! torn-down view ignores in-flight requests (results are discarded, the call
//! itself is never aborted).

use taskboard_client::Todo;
use taskboard_core::{Effect, Effects, Reducer, SmallVec};

use crate::environment::AppEnvironment;

/// Lifecycle phase of the list view
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListPhase {
    /// View is not shown
    #[default]
    Idle,
    /// A load is outstanding
    Loading,
    /// A load finished (data or error is populated)
    Loaded,
}

/// State of the list view
#[derive(Clone, Debug, Default)]
pub struct ListState {
    /// Current lifecycle phase
    pub phase: ListPhase,
    /// The loaded todo collection
    pub todos: Vec<Todo>,
    /// Normalized message from the last failed load, if any
    pub error: Option<String>,
    /// Activation epoch; results from older epochs are stale
    pub epoch: u64,
}

impl ListState {
    /// Returns the todo with the given identifier, if loaded
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }
}

/// Actions driving the list view
#[derive(Clone, Debug)]
pub enum ListAction {
    /// The view became active; start a load
    Activated,
    /// The view was torn down; pending load outcomes become stale
    Deactivated,
    /// A load finished (tagged with the epoch that started it)
    LoadFinished {
        /// Epoch captured when the load was started
        epoch: u64,
        /// The todos, or a normalized error message
        result: Result<Vec<Todo>, String>,
    },
    /// A new todo was created; prepend it
    TodoAdded(Todo),
    /// An existing todo changed; replace it by identifier equality
    TodoUpdated(Todo),
}

/// Reducer for the list view
#[derive(Clone, Debug, Default)]
pub struct ListReducer;

impl ListReducer {
    /// Creates a new `ListReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for ListReducer {
    type State = ListState;
    type Action = ListAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            ListAction::Activated => {
                // A new epoch supersedes any load still in flight, so at most
                // one outstanding load can ever land.
                state.epoch += 1;
                state.phase = ListPhase::Loading;
                state.error = None;

                let api = env.api.clone();
                let epoch = state.epoch;

                let mut effects = Effects::new();
                effects.push(Effect::future(async move {
                    let result = api.list(None).await.map_err(|e| e.to_string());
                    Some(ListAction::LoadFinished { epoch, result })
                }));
                effects
            },

            ListAction::Deactivated => {
                state.epoch += 1;
                state.phase = ListPhase::Idle;
                SmallVec::new()
            },

            ListAction::LoadFinished { epoch, result } => {
                if epoch != state.epoch {
                    tracing::debug!(epoch, current = state.epoch, "stale load result discarded");
                    return SmallVec::new();
                }

                state.phase = ListPhase::Loaded;
                match result {
                    Ok(todos) => {
                        tracing::debug!(count = todos.len(), "list loaded");
                        state.todos = todos;
                        state.error = None;
                    },
                    Err(message) => {
                        tracing::warn!(%message, "list load failed");
                        state.error = Some(message);
                    },
                }
                SmallVec::new()
            },

            ListAction::TodoAdded(todo) => {
                // Replace instead of duplicating if the id somehow exists
                if let Some(existing) = state.todos.iter_mut().find(|t| t.id == todo.id) {
                    *existing = todo;
                } else {
                    state.todos.insert(0, todo);
                }
                SmallVec::new()
            },

            ListAction::TodoUpdated(todo) => {
                if let Some(existing) = state.todos.iter_mut().find(|t| t.id == todo.id) {
                    *existing = todo;
                }
                SmallVec::new()
            },
        }
    }
}
