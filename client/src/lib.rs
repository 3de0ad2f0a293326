//! # Taskboard Client
//!
//! Data access layer for the remote todo store.
//!
//! The remote store is a plain JSON-over-HTTP API exposing a `Todo` resource
//! (`GET /todos`, `GET /todos/{id}`, `POST /todos`, `PUT /todos/{id}`). This
//! crate wraps it in thin request/response mapping functions and normalizes
//! every transport-layer failure shape into a single [`ApiError`] whose
//! `Display` output is the one human-readable message surfaced to users.
//!
//! ## Example
//!
//! ```no_run
//! use taskboard_client::{TodoApi, TodoInput};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = TodoApi::new("https://jsonplaceholder.typicode.com")?;
//!
//!     let todos = api.list(None).await?;
//!     println!("{} todos", todos.len());
//!
//!     let created = api
//!         .create(TodoInput::titled("Buy milk"))
//!         .await?;
//!     println!("created todo {}", created.id);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod error;
pub mod types;

// Re-export main types for convenience
pub use api::{REQUEST_TIMEOUT, TodoApi};
pub use error::ApiError;
pub use types::{ListFilter, Todo, TodoInput};
