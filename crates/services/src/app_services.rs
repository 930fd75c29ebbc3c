use std::sync::Arc;

use storage::repository::{CredentialRepository, Storage};
use storage::sqlite::SqliteRepository;

use crate::Clock;
use crate::attempt_service::AttemptService;
use crate::auth::{AuthService, JwtInspector, TokenInspector};
use crate::error::AppServicesError;
use crate::quiz_service::QuizService;
use crate::sessions::SessionLoopService;

/// Assembles app-facing services over one `Storage`.
#[derive(Clone)]
pub struct AppServices {
    auth: Arc<AuthService>,
    quizzes: Arc<QuizService>,
    attempts: Arc<AttemptService>,
    session_loop: Arc<SessionLoopService>,
}

impl AppServices {
    /// Build services against the HTTP backend, caching the credential in `SQLite`.
    /// Any cached credential is restored before returning.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or credential restore fails.
    pub async fn new_http(api_url: &str, db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let sqlite = SqliteRepository::open(db_url).await?;
        let credentials: Arc<dyn CredentialRepository> = Arc::new(sqlite);
        let storage = Storage::http(api_url, credentials)?;
        let services = Self::from_storage(&storage, clock, Arc::new(JwtInspector));
        let state = services.auth.restore().await?;
        log::info!(
            "backend {api_url}; restored session: {}",
            state.username().unwrap_or("none")
        );
        Ok(services)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock, inspector: Arc<dyn TokenInspector>) -> Self {
        let auth = Arc::new(AuthService::new(
            clock,
            Arc::clone(&storage.auth),
            Arc::clone(&storage.credentials),
            inspector,
            storage.bearer.clone(),
        ));
        let quizzes = Arc::new(QuizService::new(Arc::clone(&storage.quizzes)));
        let attempts = Arc::new(AttemptService::new(Arc::clone(&storage.attempts)));
        let session_loop = Arc::new(SessionLoopService::new(
            Arc::clone(&storage.quizzes),
            Arc::clone(&storage.attempts),
        ));
        Self {
            auth,
            quizzes,
            attempts,
            session_loop,
        }
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn quizzes(&self) -> Arc<QuizService> {
        Arc::clone(&self.quizzes)
    }

    #[must_use]
    pub fn attempts(&self) -> Arc<AttemptService> {
        Arc::clone(&self.attempts)
    }

    #[must_use]
    pub fn session_loop(&self) -> Arc<SessionLoopService> {
        Arc::clone(&self.session_loop)
    }
}
