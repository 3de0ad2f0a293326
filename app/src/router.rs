//! The navigation shell.
//!
//! Maps the three logical routes (list, add, edit-by-identifier) onto the
//! list and form features, and owns the cross-feature wiring: leaving a view
//! tears it down, a successful submit lands in the list, and an edit target
//! missing from the loaded list is fetched by identifier.

use taskboard_client::Todo;
use taskboard_core::{Effect, Effects, Reducer, SmallVec};

use crate::environment::AppEnvironment;
use crate::form::{FormAction, FormReducer};
use crate::list::{ListAction, ListReducer};

/// One of the three navigable views
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Route {
    /// The todo list (`/`)
    #[default]
    List,
    /// The add form (`/add`)
    Add,
    /// The edit form for one todo (`/edit/{id}`)
    Edit(u64),
}

impl Route {
    /// Parse a path into a route
    ///
    /// Returns `None` for unknown paths and for edit paths whose identifier
    /// is not a positive integer.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };

        match path {
            "" | "/" => Some(Self::List),
            "/add" => Some(Self::Add),
            _ => {
                let id = path.strip_prefix("/edit/")?;
                id.parse().ok().filter(|id| *id != 0).map(Self::Edit)
            },
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List => write!(f, "/"),
            Self::Add => write!(f, "/add"),
            Self::Edit(id) => write!(f, "/edit/{id}"),
        }
    }
}

/// Top-level application state
#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// The active route
    pub route: Route,
    /// The list view feature
    pub list: crate::list::ListState,
    /// The form feature
    pub form: crate::form::FormState,
}

/// Top-level application actions
#[derive(Clone, Debug)]
pub enum AppAction {
    /// Switch to a view
    Navigate(Route),
    /// Delegated list view action
    List(ListAction),
    /// Delegated form action
    Form(FormAction),
    /// A fetch of the edit target finished (tagged with the requested id)
    EditLoadFinished {
        /// Identifier the fetch was started for
        id: u64,
        /// The todo, or a normalized error message
        result: Result<Todo, String>,
    },
}

/// Reducer composing the features under the navigation shell
#[derive(Clone, Debug, Default)]
pub struct AppReducer {
    list: ListReducer,
    form: FormReducer,
}

impl AppReducer {
    /// Creates a new `AppReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            list: ListReducer::new(),
            form: FormReducer::new(),
        }
    }

    fn navigate(
        &self,
        state: &mut AppState,
        route: Route,
        env: &AppEnvironment,
    ) -> Effects<AppAction> {
        tracing::debug!(route = %route, "navigating");
        state.route = route.clone();

        match route {
            Route::List => {
                let mut effects = embed(
                    self.form.reduce(&mut state.form, FormAction::Cancel, env),
                    AppAction::Form,
                );
                effects.extend(embed(
                    self.list.reduce(&mut state.list, ListAction::Activated, env),
                    AppAction::List,
                ));
                effects
            },

            Route::Add => {
                let mut effects = embed(
                    self.list
                        .reduce(&mut state.list, ListAction::Deactivated, env),
                    AppAction::List,
                );
                effects.extend(embed(
                    self.form
                        .reduce(&mut state.form, FormAction::Open(None), env),
                    AppAction::Form,
                ));
                effects
            },

            Route::Edit(id) => {
                let mut effects = embed(
                    self.list
                        .reduce(&mut state.list, ListAction::Deactivated, env),
                    AppAction::List,
                );

                // Seed from the loaded list when possible; otherwise fetch
                // the todo by identifier before opening the form.
                if let Some(todo) = state.list.get(id).cloned() {
                    effects.extend(embed(
                        self.form
                            .reduce(&mut state.form, FormAction::Open(Some(todo)), env),
                        AppAction::Form,
                    ));
                } else {
                    let api = env.api.clone();
                    effects.push(Effect::future(async move {
                        let result = api.get_by_id(id).await.map_err(|e| e.to_string());
                        Some(AppAction::EditLoadFinished { id, result })
                    }));
                }
                effects
            },
        }
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            AppAction::Navigate(route) => self.navigate(state, route, env),

            AppAction::List(action) => embed(
                self.list.reduce(&mut state.list, action, env),
                AppAction::List,
            ),

            AppAction::Form(action) => {
                // Cross-feature sync: a successful submit lands in the list
                // (prepend on add, replace on edit) and returns to the list
                // view. Applies only while that submit is still outstanding;
                // a late result for a discarded draft must not move the user.
                // The draft's mode must be read before the form closes.
                if let FormAction::SubmitSucceeded(todo) = &action {
                    if state.form.is_submitting() {
                        let list_action = if state.form.draft.todo_id.is_some() {
                            ListAction::TodoUpdated(todo.clone())
                        } else {
                            ListAction::TodoAdded(todo.clone())
                        };

                        let mut effects = embed(
                            self.list.reduce(&mut state.list, list_action, env),
                            AppAction::List,
                        );
                        effects.extend(embed(
                            self.form.reduce(&mut state.form, action, env),
                            AppAction::Form,
                        ));
                        state.route = Route::List;
                        return effects;
                    }
                }

                embed(
                    self.form.reduce(&mut state.form, action, env),
                    AppAction::Form,
                )
            },

            AppAction::EditLoadFinished { id, result } => {
                // Only the edit view that started the fetch may consume the
                // result; after navigating away it is stale and dropped.
                if state.route != Route::Edit(id) {
                    tracing::debug!(id, route = %state.route, "stale edit fetch result discarded");
                    return SmallVec::new();
                }

                match result {
                    Ok(todo) => embed(
                        self.form
                            .reduce(&mut state.form, FormAction::Open(Some(todo)), env),
                        AppAction::Form,
                    ),
                    Err(message) => {
                        tracing::warn!(%message, "edit target could not be loaded");
                        state.route = Route::List;
                        state.list.error = Some(message);
                        embed(
                            self.form.reduce(&mut state.form, FormAction::Cancel, env),
                            AppAction::Form,
                        )
                    },
                }
            },
        }
    }
}

/// Wrap a child feature's effects in the parent action type
fn embed<Child, F>(effects: Effects<Child>, wrap: F) -> Effects<AppAction>
where
    Child: Send + 'static,
    F: Fn(Child) -> AppAction + Clone + Send + 'static,
{
    effects.into_iter().map(|e| e.map(wrap.clone())).collect()
}
