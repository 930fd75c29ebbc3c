use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use quiz_core::Clock;
use quiz_core::model::{Credential, LoginRequest, RegisterRequest};
use storage::repository::{AuthRepository, BearerToken, CredentialRepository};

use super::token::{TokenClaims, TokenInspector};
use crate::error::AuthError;

/// Read-only view of who is signed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    LoggedOut,
    LoggedIn {
        username: String,
        is_admin: bool,
        expires_at: DateTime<Utc>,
    },
}

impl AuthState {
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn { .. })
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::LoggedIn { is_admin: true, .. })
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::LoggedIn { username, .. } => Some(username),
            Self::LoggedOut => None,
        }
    }
}

/// Handle returned by `AuthService::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&AuthState) + Send + Sync>;

#[derive(Debug, Clone)]
struct ActiveCredential {
    credential: Credential,
    claims: TokenClaims,
}

/// Owns the signed-in credential: login, logout, restore, and change notification.
///
/// Keeps the shared bearer slot in step with the active credential.
pub struct AuthService {
    clock: Clock,
    auth: Arc<dyn AuthRepository>,
    credentials: Arc<dyn CredentialRepository>,
    inspector: Arc<dyn TokenInspector>,
    bearer: BearerToken,
    active: Mutex<Option<ActiveCredential>>,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_listener: AtomicU64,
}

impl AuthService {
    #[must_use]
    pub fn new(
        clock: Clock,
        auth: Arc<dyn AuthRepository>,
        credentials: Arc<dyn CredentialRepository>,
        inspector: Arc<dyn TokenInspector>,
        bearer: BearerToken,
    ) -> Self {
        Self {
            clock,
            auth,
            credentials,
            inspector,
            bearer,
            active: Mutex::new(None),
            listeners: Mutex::new(Vec::new()),
            next_listener: AtomicU64::new(1),
        }
    }

    /// Current state, with expiry checked against the service clock.
    #[must_use]
    pub fn status(&self) -> AuthState {
        self.status_at(self.clock.now())
    }

    /// State as it would read at `now`.
    #[must_use]
    pub fn status_at(&self, now: DateTime<Utc>) -> AuthState {
        let active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        match active.as_ref() {
            Some(active) if active.claims.expires_at > now => AuthState::LoggedIn {
                username: active.credential.username().to_string(),
                is_admin: active.claims.is_admin,
                expires_at: active.claims.expires_at,
            },
            _ => AuthState::LoggedOut,
        }
    }

    /// Reload the cached credential, discarding it if unreadable or expired.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the cache cannot be read or cleared.
    pub async fn restore(&self) -> Result<AuthState, AuthError> {
        let cached = self.credentials.load_credential().await?;
        let restored = match cached {
            Some(credential) => match self.activate_checked(&credential) {
                Ok(active) => Some(active),
                Err(err) => {
                    log::info!("discarding cached credential: {err}");
                    self.credentials.clear_credential().await?;
                    None
                }
            },
            None => None,
        };
        self.replace_active(restored);
        Ok(self.notify())
    }

    /// Sign in and cache the credential.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` for rejected credentials or transport failures, and
    /// `AuthError::InvalidToken`/`AuthError::Expired` if the issued token is unusable.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthState, AuthError> {
        let response = self.auth.login(request).await?;
        let credential = Credential::from(response);
        let active = self.activate_checked(&credential)?;
        self.credentials
            .save_credential(&credential, self.clock.now())
            .await?;
        log::info!("signed in as {}", credential.username());
        self.replace_active(Some(active));
        Ok(self.notify())
    }

    /// Create a regular account. Does not sign in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the backend rejects the registration.
    pub async fn register(&self, request: &RegisterRequest) -> Result<String, AuthError> {
        let message = self.auth.register(request).await?;
        log::info!("registered {}", request.username);
        Ok(message)
    }

    /// Create an administrator account. Does not sign in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the backend rejects the registration.
    pub async fn register_admin(&self, request: &RegisterRequest) -> Result<String, AuthError> {
        let message = self.auth.register_admin(request).await?;
        log::info!("registered administrator {}", request.username);
        Ok(message)
    }

    /// Forget the credential locally.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the cache cannot be cleared; the in-memory
    /// state is signed out regardless.
    pub async fn logout(&self) -> Result<AuthState, AuthError> {
        self.replace_active(None);
        let cleared = self.credentials.clear_credential().await;
        log::info!("signed out");
        let state = self.notify();
        cleared?;
        Ok(state)
    }

    /// Time left on the active token, zero once it has lapsed. `None` when signed out.
    #[must_use]
    pub fn time_to_expiry(&self) -> Option<std::time::Duration> {
        let active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        active.as_ref().map(|active| {
            (active.claims.expires_at - self.clock.now())
                .to_std()
                .unwrap_or_default()
        })
    }

    /// Sign out if the active token has expired by the service clock.
    ///
    /// # Errors
    ///
    /// See [`AuthService::expire_at`].
    pub async fn expire_if_due(&self) -> Result<bool, AuthError> {
        self.expire_at(self.clock.now()).await
    }

    /// Sign out if the active token has expired by `now`: the bearer is cleared,
    /// listeners are notified and the cache is emptied. Returns `true` if a
    /// credential was dropped.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the cache cannot be cleared; the in-memory
    /// state is signed out regardless.
    pub async fn expire_at(&self, now: DateTime<Utc>) -> Result<bool, AuthError> {
        let due = self
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|active| active.claims.expires_at <= now);
        if !due {
            return Ok(false);
        }
        self.replace_active(None);
        log::info!("session expired");
        self.notify_with(AuthState::LoggedOut);
        self.credentials.clear_credential().await?;
        Ok(true)
    }

    /// Register a callback fired after login, logout, restore and expiry.
    pub fn subscribe(&self, listener: impl Fn(&AuthState) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_listener.fetch_add(1, Ordering::Relaxed));
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        listeners.push((id, Arc::new(listener)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    fn activate_checked(&self, credential: &Credential) -> Result<ActiveCredential, AuthError> {
        let claims = self.inspector.inspect(credential.token())?;
        if self.clock.has_passed(claims.expires_at) {
            return Err(AuthError::Expired);
        }
        Ok(ActiveCredential {
            credential: credential.clone(),
            claims,
        })
    }

    fn replace_active(&self, next: Option<ActiveCredential>) {
        match &next {
            Some(active) => self.bearer.set(active.credential.token()),
            None => self.bearer.clear(),
        }
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        *active = next;
    }

    fn notify(&self) -> AuthState {
        self.notify_with(self.status())
    }

    fn notify_with(&self, state: AuthState) -> AuthState {
        // Listeners run outside the lock so they may call back into the service.
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&state);
        }
        state
    }
}
