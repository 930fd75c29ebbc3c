use dioxus::prelude::*;
use services::{AttemptServiceError, AuthError, QuizServiceError, SessionError};
use storage::StorageError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    NotFound,
    SignInRequired,
    Forbidden,
    Offline,
    Conflict,
    InvalidCredentials,
    EmptyQuiz,
    Incomplete,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Unknown => "Something went wrong. Please try again.",
            Self::NotFound => "That quiz or attempt could not be found.",
            Self::SignInRequired => "Your session has ended. Please sign in again.",
            Self::Forbidden => "You do not have permission to do that.",
            Self::Offline => "Cannot reach the quiz server. Check your connection.",
            Self::Conflict => "That name is already taken.",
            Self::InvalidCredentials => "Invalid username or password.",
            Self::EmptyQuiz => "This quiz has no questions yet.",
            Self::Incomplete => "Answer every question before submitting.",
        }
    }
}

impl From<&StorageError> for ViewError {
    fn from(err: &StorageError) -> Self {
        match err {
            StorageError::NotFound => Self::NotFound,
            StorageError::Unauthorized => Self::SignInRequired,
            StorageError::Forbidden => Self::Forbidden,
            StorageError::Conflict => Self::Conflict,
            StorageError::Connection(_) => Self::Offline,
            _ => Self::Unknown,
        }
    }
}

impl From<StorageError> for ViewError {
    fn from(err: StorageError) -> Self {
        Self::from(&err)
    }
}

impl From<SessionError> for ViewError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::EmptyQuiz => Self::EmptyQuiz,
            SessionError::IncompleteSubmission { .. } => Self::Incomplete,
            SessionError::Storage(err) => Self::from(&err),
            _ => Self::Unknown,
        }
    }
}

impl From<QuizServiceError> for ViewError {
    fn from(err: QuizServiceError) -> Self {
        match err {
            QuizServiceError::Storage(err) => Self::from(&err),
            _ => Self::Unknown,
        }
    }
}

impl From<AttemptServiceError> for ViewError {
    fn from(err: AttemptServiceError) -> Self {
        match err {
            AttemptServiceError::Storage(err) => Self::from(&err),
            _ => Self::Unknown,
        }
    }
}

/// Sign-in failures read as bad credentials rather than an expired session.
impl From<AuthError> for ViewError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Storage(StorageError::Unauthorized) => Self::InvalidCredentials,
            AuthError::Storage(err) => Self::from(&err),
            _ => Self::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_map_to_messages() {
        assert_eq!(ViewError::from(StorageError::NotFound), ViewError::NotFound);
        assert_eq!(
            ViewError::from(StorageError::Connection("refused".into())),
            ViewError::Offline
        );
        assert_eq!(
            ViewError::from(AuthError::Storage(StorageError::Unauthorized)),
            ViewError::InvalidCredentials
        );
        assert_eq!(
            ViewError::from(SessionError::Storage(StorageError::Unauthorized)),
            ViewError::SignInRequired
        );
    }
}
