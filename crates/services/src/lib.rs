#![forbid(unsafe_code)]

pub mod app_services;
pub mod attempt_service;
pub mod auth;
pub mod error;
pub mod quiz_service;
pub mod sessions;

pub use quiz_core::Clock;
pub use sessions as session;

pub use app_services::AppServices;
pub use attempt_service::AttemptService;
pub use auth::{AuthService, AuthState, GuardDecision, JwtInspector, TokenClaims, TokenInspector};
pub use error::{AppServicesError, AttemptServiceError, AuthError, QuizServiceError, SessionError};
pub use quiz_service::QuizService;
pub use sessions::{QuizSession, SessionLoopService, SessionProgress};
