//! Taskboard application features.
//!
//! This crate holds the three navigable views of the todo manager and the
//! plumbing between them:
//!
//! - [`list`]: the tabular list view with load/error/data tracking
//! - [`form`]: the add/edit form state machine with validation
//! - [`router`]: the navigation shell mapping routes to features
//! - [`validation`]: the declarative field rules for the form draft
//!
//! Each feature is a pure reducer over its own state; the [`router`] composes
//! them into one `AppReducer` suitable for a `taskboard_runtime::Store`.
//!
//! # Quick Start
//!
//! ```no_run
//! use taskboard_app::{AppAction, AppEnvironment, AppReducer, AppState, Route};
//! use taskboard_client::TodoApi;
//! use taskboard_runtime::Store;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = TodoApi::new("https://jsonplaceholder.typicode.com")?;
//! let store = Store::new(
//!     AppState::default(),
//!     AppReducer::new(),
//!     AppEnvironment::new(api),
//! );
//!
//! store.send(AppAction::Navigate(Route::List)).await?;
//! let count = store.state(|s| s.list.todos.len()).await;
//! println!("{count} todos");
//! # Ok(())
//! # }
//! ```

pub mod environment;
pub mod form;
pub mod list;
pub mod router;
pub mod validation;

// Re-export commonly used types
pub use environment::AppEnvironment;
pub use form::{FormAction, FormDraft, FormPhase, FormReducer, FormState};
pub use list::{ListAction, ListPhase, ListReducer, ListState};
pub use router::{AppAction, AppReducer, AppState, Route};
pub use validation::{Field, FieldErrors, validate};
