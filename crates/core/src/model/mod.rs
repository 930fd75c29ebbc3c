mod attempt;
mod auth;
mod draft;
mod grade;
mod ids;
mod leaderboard;
mod quiz;
mod submission;

pub use attempt::{AttemptSummary, QuestionResult, QuizResult};
pub use auth::{AuthResponse, Credential, LoginRequest, RegisterRequest};
pub use draft::{
    DEFAULT_OPTIONS, DraftError, MIN_OPTIONS, OptionDraft, OptionPayload, QuestionDraft,
    QuestionPayload, QuizDraft, QuizPayload,
};
pub use grade::{GradeBand, PASS_PERCENTAGE};
pub use ids::{AttemptId, OptionId, ParseIdError, QuestionId, QuizId};
pub use leaderboard::{Leaderboard, LeaderboardSort, LeaderboardStats, RankTier};
pub use quiz::{AuthoringOption, AuthoringQuestion, AuthoringQuiz, Question, Quiz, QuizOption};
pub use submission::{Answer, Submission};
