mod guard;
mod service;
mod token;

pub use crate::error::AuthError;
pub use guard::{GuardDecision, require_admin, require_auth};
pub use service::{AuthService, AuthState, SubscriptionId};
pub use token::{JwtInspector, TokenClaims, TokenInspector};
