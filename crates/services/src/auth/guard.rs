use super::service::AuthState;

/// Outcome of a route guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Send the visitor to the login form, returning to `return_to` afterwards.
    RedirectToLogin { return_to: Option<String> },
    /// Signed in but lacking the capability.
    Denied,
}

/// Allow any signed-in user.
#[must_use]
pub fn require_auth(state: &AuthState, return_to: &str) -> GuardDecision {
    if state.is_logged_in() {
        GuardDecision::Allow
    } else {
        GuardDecision::RedirectToLogin {
            return_to: Some(return_to.to_string()),
        }
    }
}

/// Allow signed-in administrators only.
#[must_use]
pub fn require_admin(state: &AuthState) -> GuardDecision {
    match state {
        AuthState::LoggedOut => GuardDecision::RedirectToLogin { return_to: None },
        AuthState::LoggedIn { is_admin: true, .. } => GuardDecision::Allow,
        AuthState::LoggedIn { .. } => GuardDecision::Denied,
    }
}
