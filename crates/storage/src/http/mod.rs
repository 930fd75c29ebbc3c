use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::repository::{
    AttemptRepository, AuthRepository, BearerToken, CredentialRepository, QuizRepository, Storage,
    StorageError,
};

mod attempt_repo;
mod auth_repo;
mod quiz_repo;

/// Default base URL of the quiz backend.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the quiz, attempt, and auth endpoints of the backend.
///
/// Every request carries the current bearer token when one is set.
#[derive(Clone)]
pub struct HttpRepository {
    client: Client,
    base: Url,
    bearer: BearerToken,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HttpInitError {
    #[error("invalid api url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("api url cannot be a base: {0}")]
    NotABase(String),

    #[error(transparent)]
    Client(#[from] reqwest::Error),
}

impl HttpRepository {
    /// Build a client rooted at `api_url`.
    ///
    /// # Errors
    ///
    /// Returns `HttpInitError` if the URL is invalid or the HTTP client cannot be built.
    pub fn new(api_url: &str, bearer: BearerToken) -> Result<Self, HttpInitError> {
        let mut base = Url::parse(api_url.trim())?;
        if base.cannot_be_a_base() {
            return Err(HttpInitError::NotABase(api_url.to_string()));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base,
            bearer,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, StorageError> {
        self.base
            .join(path)
            .map_err(|err| StorageError::Connection(err.to_string()))
    }

    pub(crate) fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.bearer.get() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, StorageError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        log::debug!("backend answered {status}: {body}");
        Err(status_error(status, &body))
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, StorageError> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(transport_error)
    }

    pub(crate) async fn send_text(&self, request: RequestBuilder) -> Result<String, StorageError> {
        self.send(request)
            .await?
            .text()
            .await
            .map_err(transport_error)
    }
}

/// Map a non-success status and its body to a storage error.
///
/// The message comes from a JSON `message` field when present, else the raw body.
#[must_use]
pub fn status_error(status: StatusCode, body: &str) -> StorageError {
    match status {
        StatusCode::UNAUTHORIZED => StorageError::Unauthorized,
        StatusCode::FORBIDDEN => StorageError::Forbidden,
        StatusCode::NOT_FOUND => StorageError::NotFound,
        StatusCode::CONFLICT => StorageError::Conflict,
        other => StorageError::Http {
            status: other.as_u16(),
            message: backend_message(body),
        },
    }
}

fn backend_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

fn transport_error(err: reqwest::Error) -> StorageError {
    if err.is_decode() {
        StorageError::Serialization(err.to_string())
    } else {
        StorageError::Connection(err.to_string())
    }
}

impl Storage {
    /// Build a `Storage` that talks to the backend at `api_url` and caches the
    /// credential in `credentials`.
    ///
    /// # Errors
    ///
    /// Returns `HttpInitError` if the HTTP client cannot be configured.
    pub fn http(
        api_url: &str,
        credentials: Arc<dyn CredentialRepository>,
    ) -> Result<Self, HttpInitError> {
        let bearer = BearerToken::new();
        let repo = HttpRepository::new(api_url, bearer.clone())?;
        let quizzes: Arc<dyn QuizRepository> = Arc::new(repo.clone());
        let attempts: Arc<dyn AttemptRepository> = Arc::new(repo.clone());
        let auth: Arc<dyn AuthRepository> = Arc::new(repo);
        Ok(Self {
            quizzes,
            attempts,
            auth,
            credentials,
            bearer,
        })
    }
}
