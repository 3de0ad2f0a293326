//! Todo store API client implementation

use std::time::Duration;

use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::types::{ListFilter, Todo, TodoInput};

/// Fixed request deadline for every call to the remote store
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Full-record request body for create and update calls
///
/// Defaulting has already been applied; the remote store always receives
/// every editable field.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TodoPayload {
    title: String,
    completed: bool,
    user_id: u64,
}

impl TodoPayload {
    /// Apply the layer's defaults (`completed = false`, `user_id = 1`)
    fn from_input(input: TodoInput) -> Self {
        Self {
            title: input.title,
            completed: input.completed.unwrap_or(false),
            user_id: input.user_id.unwrap_or(1),
        }
    }
}

/// Client for the remote todo store
///
/// Holds a connection pool and the store's base address. No retries are
/// performed; every failure is surfaced once to the caller as a single
/// [`ApiError`].
#[derive(Clone, Debug)]
pub struct TodoApi {
    client: Client,
    base_url: String,
}

impl TodoApi {
    /// Create a new client against the given base address
    ///
    /// A trailing slash on the base address is tolerated. All requests share
    /// the fixed [`REQUEST_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::RequestSetup`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::RequestSetup(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the todo collection, optionally filtered server-side
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when no response arrives,
    /// [`ApiError::Api`] on a non-2xx status, or [`ApiError::Decode`] when
    /// the body is not a todo array.
    pub async fn list(&self, filter: Option<&ListFilter>) -> Result<Vec<Todo>, ApiError> {
        let url = format!("{}/todos", self.base_url);
        tracing::debug!(%url, "listing todos");

        let mut request = self.client.get(&url);
        if let Some(filter) = filter {
            request = request.query(filter);
        }

        let response = request.send().await.map_err(|e| ApiError::from_transport(&e))?;
        decode(response).await
    }

    /// Fetch a single todo by identifier
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] for a missing identifier
    /// (`id == 0`; the store never assigns it), otherwise the same failures
    /// as [`list`](Self::list).
    pub async fn get_by_id(&self, id: u64) -> Result<Todo, ApiError> {
        if id == 0 {
            return Err(ApiError::InvalidArgument("todo id is required".to_string()));
        }

        let url = format!("{}/todos/{id}", self.base_url);
        tracing::debug!(%url, "fetching todo");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e))?;
        decode(response).await
    }

    /// Create a todo; the server assigns the identifier
    ///
    /// Unset optional fields are defaulted before dispatch.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] for an empty or whitespace
    /// title, otherwise the same failures as [`list`](Self::list).
    pub async fn create(&self, input: TodoInput) -> Result<Todo, ApiError> {
        if input.title.trim().is_empty() {
            return Err(ApiError::InvalidArgument(
                "title must not be empty".to_string(),
            ));
        }

        let url = format!("{}/todos", self.base_url);
        tracing::debug!(%url, title = %input.title, "creating todo");

        let response = self
            .client
            .post(&url)
            .json(&TodoPayload::from_input(input))
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e))?;
        decode(response).await
    }

    /// Replace an existing todo's editable fields (full-record update)
    ///
    /// Unset optional fields are defaulted exactly as in
    /// [`create`](Self::create).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] for a missing identifier or an
    /// empty/whitespace title, otherwise the same failures as
    /// [`list`](Self::list).
    pub async fn update(&self, id: u64, input: TodoInput) -> Result<Todo, ApiError> {
        if id == 0 {
            return Err(ApiError::InvalidArgument("todo id is required".to_string()));
        }
        if input.title.trim().is_empty() {
            return Err(ApiError::InvalidArgument(
                "title must not be empty".to_string(),
            ));
        }

        let url = format!("{}/todos/{id}", self.base_url);
        tracing::debug!(%url, "updating todo");

        let response = self
            .client
            .put(&url)
            .json(&TodoPayload::from_input(input))
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e))?;
        decode(response).await
    }
}

/// Check the status and parse the JSON body
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Api {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_defaults_unset_fields() {
        let payload = TodoPayload::from_input(TodoInput::titled("Buy milk"));
        assert_eq!(payload.title, "Buy milk");
        assert!(!payload.completed);
        assert_eq!(payload.user_id, 1);
    }

    #[test]
    fn payload_keeps_explicit_fields() {
        let payload = TodoPayload::from_input(TodoInput {
            title: "Buy milk".to_string(),
            completed: Some(true),
            user_id: Some(7),
        });
        assert!(payload.completed);
        assert_eq!(payload.user_id, 7);
    }

    #[tokio::test]
    async fn get_by_id_guards_missing_identifier() {
        let api = TodoApi::new("http://localhost:0").unwrap();
        let err = api.get_by_id(0).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn create_guards_blank_title() {
        let api = TodoApi::new("http://localhost:0").unwrap();
        let err = api.create(TodoInput::titled("   ")).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn update_guards_identifier_and_title() {
        let api = TodoApi::new("http://localhost:0").unwrap();

        let err = api.update(0, TodoInput::titled("x")).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));

        let err = api.update(1, TodoInput::titled("")).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let api = TodoApi::new("http://localhost:3000/").unwrap();
        assert_eq!(api.base_url, "http://localhost:3000");
    }
}
