//! The add/edit form state machine.
//!
//! The form binds field inputs to a draft, validates the draft on submit, and
//! drives the submit/loading/error transitions against the data access layer.
//! Validation runs synchronously inside the submit transition, so the machine
//! is never observed between "validating" and its outcome.
//!
//! Exactly one draft exists at a time; it is discarded on success, cancel, or
//! navigation away.

use taskboard_client::{Todo, TodoInput};
use taskboard_core::{Effect, Effects, Reducer, SmallVec};

use crate::environment::AppEnvironment;
use crate::validation::{Field, FieldErrors, validate};

/// The in-progress, not-yet-persisted edit state of a todo
///
/// `user_id` is kept as the raw field input so that non-numeric entry is
/// representable and reported by validation rather than by a parse failure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormDraft {
    /// Identifier of the todo being edited; `None` means add mode
    pub todo_id: Option<u64>,
    /// Title field input
    pub title: String,
    /// User identifier field input, as typed
    pub user_id: String,
    /// Completion flag
    pub completed: bool,
}

impl FormDraft {
    /// Empty defaults for add mode
    #[must_use]
    pub fn blank() -> Self {
        Self {
            todo_id: None,
            title: String::new(),
            user_id: "1".to_string(),
            completed: false,
        }
    }

    /// Draft seeded from an existing todo for edit mode
    #[must_use]
    pub fn seeded(todo: &Todo) -> Self {
        Self {
            todo_id: Some(todo.id),
            title: todo.title.clone(),
            user_id: todo.user_id.to_string(),
            completed: todo.completed,
        }
    }

    /// Editable fields as a request payload
    ///
    /// Only meaningful after validation passed; an unparseable user id falls
    /// back to the layer default rather than panicking.
    fn to_input(&self) -> TodoInput {
        TodoInput {
            title: self.title.trim().to_string(),
            completed: Some(self.completed),
            user_id: self.user_id.trim().parse().ok(),
        }
    }
}

/// Lifecycle phase of the form
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormPhase {
    /// No form is open
    #[default]
    Idle,
    /// Draft is being edited
    Editing,
    /// A submit call is outstanding
    Submitting,
}

/// State of the form feature
#[derive(Clone, Debug, Default)]
pub struct FormState {
    /// Current lifecycle phase
    pub phase: FormPhase,
    /// The single active draft (meaningful outside `Idle`)
    pub draft: FormDraft,
    /// Field-keyed validation messages shown inline
    pub field_errors: FieldErrors,
    /// Normalized message from the last failed submit
    pub submit_error: Option<String>,
}

impl FormState {
    /// Whether a submit call is currently outstanding
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self.phase, FormPhase::Submitting)
    }

    /// Whether the form is open (editing or submitting)
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self.phase, FormPhase::Idle)
    }

    /// Discard the draft and return to `Idle`
    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Actions driving the form state machine
#[derive(Clone, Debug)]
pub enum FormAction {
    /// Open the form: `None` for add mode, `Some` seeded for edit mode
    Open(Option<Todo>),
    /// Title field input changed
    TitleChanged(String),
    /// User identifier field input changed
    UserIdChanged(String),
    /// Completion checkbox toggled
    CompletedChanged(bool),
    /// Discard the draft unconditionally
    Cancel,
    /// Attempt submission (validates first)
    Submit,
    /// The store accepted the create/update call
    SubmitSucceeded(Todo),
    /// The store call failed; carries the normalized message
    SubmitFailed(String),
}

/// Reducer for the form feature
#[derive(Clone, Debug, Default)]
pub struct FormReducer;

impl FormReducer {
    /// Creates a new `FormReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validate and, if clean, dispatch the create/update call
    fn submit(state: &mut FormState, env: &AppEnvironment) -> Effects<FormAction> {
        let errors = validate(&state.draft);
        if !errors.is_empty() {
            tracing::debug!(error_count = errors.len(), "submit blocked by validation");
            state.field_errors = errors;
            return SmallVec::new();
        }

        state.phase = FormPhase::Submitting;
        state.field_errors.clear();
        state.submit_error = None;

        let api = env.api.clone();
        let todo_id = state.draft.todo_id;
        let input = state.draft.to_input();

        let mut effects = Effects::new();
        effects.push(Effect::future(async move {
            let result = match todo_id {
                Some(id) => api.update(id, input).await,
                None => api.create(input).await,
            };
            Some(match result {
                Ok(todo) => FormAction::SubmitSucceeded(todo),
                Err(error) => FormAction::SubmitFailed(error.to_string()),
            })
        }));
        effects
    }
}

impl Reducer for FormReducer {
    type State = FormState;
    type Action = FormAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            FormAction::Open(seed) => {
                state.reset();
                state.phase = FormPhase::Editing;
                state.draft = seed.as_ref().map_or_else(FormDraft::blank, FormDraft::seeded);
                SmallVec::new()
            },

            // Field changes apply only while editing; each updates exactly one
            // draft field and clears that field's prior error. The whole draft
            // is not re-validated until the next submit attempt.
            FormAction::TitleChanged(value) => {
                if matches!(state.phase, FormPhase::Editing) {
                    state.draft.title = value;
                    state.field_errors.remove(&Field::Title);
                }
                SmallVec::new()
            },
            FormAction::UserIdChanged(value) => {
                if matches!(state.phase, FormPhase::Editing) {
                    state.draft.user_id = value;
                    state.field_errors.remove(&Field::UserId);
                }
                SmallVec::new()
            },
            FormAction::CompletedChanged(value) => {
                if matches!(state.phase, FormPhase::Editing) {
                    state.draft.completed = value;
                }
                SmallVec::new()
            },

            FormAction::Cancel => {
                // Unconditional, regardless of dirty state or phase
                state.reset();
                SmallVec::new()
            },

            FormAction::Submit => match state.phase {
                FormPhase::Editing => Self::submit(state, env),
                // No concurrent submits: a repeated attempt is ignored
                FormPhase::Submitting | FormPhase::Idle => SmallVec::new(),
            },

            FormAction::SubmitSucceeded(_) => {
                // The resulting todo is handed to the parent reducer, which
                // observes the same action; the form just closes. A late
                // result for an already-discarded draft is ignored, same as
                // the failure path.
                if state.is_submitting() {
                    state.reset();
                }
                SmallVec::new()
            },

            FormAction::SubmitFailed(message) => {
                if state.is_submitting() {
                    tracing::debug!(%message, "submit failed");
                    state.phase = FormPhase::Editing;
                    state.submit_error = Some(message);
                }
                SmallVec::new()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_client::TodoApi;
    use taskboard_testing::{ReducerTest, assertions};

    fn test_env() -> AppEnvironment {
        // Never dialed: ReducerTest does not execute effects.
        AppEnvironment::new(TodoApi::new("http://localhost:0").unwrap())
    }

    fn sample_todo() -> Todo {
        Todo {
            id: 42,
            title: "Water plants".to_string(),
            completed: false,
            user_id: 2,
        }
    }

    #[test]
    fn open_add_mode_uses_empty_defaults() {
        ReducerTest::new(FormReducer::new())
            .with_env(test_env())
            .given_state(FormState::default())
            .when_action(FormAction::Open(None))
            .then_state(|state| {
                assert_eq!(state.phase, FormPhase::Editing);
                assert_eq!(state.draft, FormDraft::blank());
                assert!(state.field_errors.is_empty());
                assert!(state.submit_error.is_none());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn open_edit_mode_seeds_from_todo() {
        ReducerTest::new(FormReducer::new())
            .with_env(test_env())
            .given_state(FormState::default())
            .when_action(FormAction::Open(Some(sample_todo())))
            .then_state(|state| {
                assert_eq!(state.draft.todo_id, Some(42));
                assert_eq!(state.draft.title, "Water plants");
                assert_eq!(state.draft.user_id, "2");
            })
            .run();
    }

    #[test]
    fn invalid_submit_populates_errors_without_calling_store() {
        ReducerTest::new(FormReducer::new())
            .with_env(test_env())
            .given_state(FormState::default())
            .when_actions([
                FormAction::Open(None),
                FormAction::TitleChanged("ab".to_string()),
                FormAction::Submit,
            ])
            .then_state(|state| {
                assert_eq!(state.phase, FormPhase::Editing);
                assert_eq!(
                    state.field_errors.get(&Field::Title).map(String::as_str),
                    Some("Title must be at least 3 characters")
                );
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn valid_submit_transitions_to_submitting_with_one_effect() {
        ReducerTest::new(FormReducer::new())
            .with_env(test_env())
            .given_state(FormState::default())
            .when_actions([
                FormAction::Open(None),
                FormAction::TitleChanged("Buy milk".to_string()),
                FormAction::Submit,
            ])
            .then_state(|state| {
                assert!(state.is_submitting());
                assert!(state.submit_error.is_none());
                assert!(state.field_errors.is_empty());
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn repeated_submit_while_submitting_is_ignored() {
        ReducerTest::new(FormReducer::new())
            .with_env(test_env())
            .given_state(FormState::default())
            .when_actions([
                FormAction::Open(None),
                FormAction::TitleChanged("Buy milk".to_string()),
                FormAction::Submit,
                FormAction::Submit,
            ])
            .then_state(|state| {
                assert!(state.is_submitting());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn field_change_clears_only_that_fields_error() {
        ReducerTest::new(FormReducer::new())
            .with_env(test_env())
            .given_state(FormState::default())
            .when_actions([
                FormAction::Open(None),
                FormAction::UserIdChanged("eleven".to_string()),
                FormAction::Submit, // title + userId errors
                FormAction::TitleChanged("Buy milk".to_string()),
            ])
            .then_state(|state| {
                assert!(!state.field_errors.contains_key(&Field::Title));
                assert!(state.field_errors.contains_key(&Field::UserId));
            })
            .run();
    }

    #[test]
    fn submit_failure_reopens_editing_with_values_intact() {
        ReducerTest::new(FormReducer::new())
            .with_env(test_env())
            .given_state(FormState::default())
            .when_actions([
                FormAction::Open(None),
                FormAction::TitleChanged("Buy milk".to_string()),
                FormAction::Submit,
                FormAction::SubmitFailed("No response received: connection refused".to_string()),
            ])
            .then_state(|state| {
                assert_eq!(state.phase, FormPhase::Editing);
                assert!(!state.is_submitting());
                assert_eq!(state.draft.title, "Buy milk");
                assert_eq!(
                    state.submit_error.as_deref(),
                    Some("No response received: connection refused")
                );
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn submit_success_discards_draft_and_closes() {
        ReducerTest::new(FormReducer::new())
            .with_env(test_env())
            .given_state(FormState::default())
            .when_actions([
                FormAction::Open(Some(sample_todo())),
                FormAction::CompletedChanged(true),
                FormAction::Submit,
                FormAction::SubmitSucceeded(Todo {
                    completed: true,
                    ..sample_todo()
                }),
            ])
            .then_state(|state| {
                assert_eq!(state.phase, FormPhase::Idle);
                assert_eq!(state.draft, FormDraft::default());
            })
            .run();
    }

    #[test]
    fn cancel_discards_dirty_draft() {
        ReducerTest::new(FormReducer::new())
            .with_env(test_env())
            .given_state(FormState::default())
            .when_actions([
                FormAction::Open(None),
                FormAction::TitleChanged("half-typed".to_string()),
                FormAction::Cancel,
            ])
            .then_state(|state| {
                assert_eq!(state.phase, FormPhase::Idle);
                assert!(state.draft.title.is_empty());
            })
            .run();
    }

    #[test]
    fn late_success_after_cancel_is_ignored() {
        ReducerTest::new(FormReducer::new())
            .with_env(test_env())
            .given_state(FormState::default())
            .when_actions([
                FormAction::Open(None),
                FormAction::TitleChanged("Buy milk".to_string()),
                FormAction::Submit,
                FormAction::Cancel,
                FormAction::Open(None),
                FormAction::TitleChanged("Water plants".to_string()),
                FormAction::SubmitSucceeded(sample_todo()),
            ])
            .then_state(|state| {
                assert_eq!(state.phase, FormPhase::Editing);
                assert_eq!(state.draft.title, "Water plants");
            })
            .run();
    }

    #[test]
    fn late_failure_after_cancel_is_ignored() {
        ReducerTest::new(FormReducer::new())
            .with_env(test_env())
            .given_state(FormState::default())
            .when_actions([
                FormAction::Open(None),
                FormAction::TitleChanged("Buy milk".to_string()),
                FormAction::Submit,
                FormAction::Cancel,
                FormAction::SubmitFailed("too late".to_string()),
            ])
            .then_state(|state| {
                assert_eq!(state.phase, FormPhase::Idle);
                assert!(state.submit_error.is_none());
            })
            .run();
    }
}
