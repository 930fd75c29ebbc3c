//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{DraftError, OptionId};
use storage::http::HttpInitError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by the take-flow session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("quiz has no questions")]
    EmptyQuiz,
    #[error("option {option} is not offered by the current question")]
    UnknownOption { option: OptionId },
    #[error("only {answered} of {total} questions answered")]
    IncompleteSubmission { answered: usize, total: usize },
    #[error("session already submitted")]
    AlreadySubmitted,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("token could not be read: {0}")]
    InvalidToken(String),
    #[error("token has expired")]
    Expired,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Draft(#[from] DraftError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `AttemptService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AttemptServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Http(#[from] HttpInitError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}
