use std::sync::Arc;

use dioxus::prelude::*;
use services::{AttemptService, AuthService, AuthState, QuizService, SessionLoopService};

pub trait UiApp: Send + Sync {
    fn auth(&self) -> Arc<AuthService>;
    fn quizzes(&self) -> Arc<QuizService>;
    fn attempts(&self) -> Arc<AttemptService>;
    fn session_loop(&self) -> Arc<SessionLoopService>;
}

#[derive(Clone)]
pub struct AppContext {
    auth: Arc<AuthService>,
    quizzes: Arc<QuizService>,
    attempts: Arc<AttemptService>,
    session_loop: Arc<SessionLoopService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            auth: app.auth(),
            quizzes: app.quizzes(),
            attempts: app.attempts(),
            session_loop: app.session_loop(),
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

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// Signed-in state for components: re-renders on every `AuthService` push and
/// answers from the service, so a lapsed token reads as signed out.
#[derive(Clone)]
pub struct AuthStatus {
    pushed: SyncSignal<AuthState>,
    auth: Arc<AuthService>,
}

impl AuthStatus {
    #[must_use]
    pub fn get(&self) -> AuthState {
        let _ = self.pushed.read();
        self.auth.status()
    }
}

/// Subscribe to auth changes for the lifetime of the calling component and
/// provide the result to its children. Signs out when the token expires.
pub fn use_auth_provider() -> AuthStatus {
    let ctx = use_context::<AppContext>();
    let auth = ctx.auth();
    let pushed = use_signal_sync({
        let auth = Arc::clone(&auth);
        move || auth.status()
    });
    let subscription = use_hook({
        let auth = Arc::clone(&auth);
        move || {
            auth.subscribe(move |state| {
                let mut pushed = pushed;
                pushed.set(state.clone());
            })
        }
    });
    use_resource({
        let auth = Arc::clone(&auth);
        move || {
            let auth = Arc::clone(&auth);
            let signed_in = pushed.read().is_logged_in();
            async move {
                let Some(remaining) = auth.time_to_expiry().filter(|_| signed_in) else {
                    return;
                };
                tokio::time::sleep(remaining).await;
                if let Err(err) = auth.expire_if_due().await {
                    log::warn!("failed to clear expired sign-in: {err}");
                }
            }
        }
    });
    use_drop({
        let auth = Arc::clone(&auth);
        move || {
            auth.unsubscribe(subscription);
        }
    });
    use_context_provider(|| AuthStatus { pushed, auth })
}

#[must_use]
pub fn use_auth_status() -> AuthStatus {
    use_context::<AuthStatus>()
}
