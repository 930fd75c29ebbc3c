use std::sync::Arc;

use quiz_core::model::{AttemptId, AttemptSummary, Leaderboard, QuizId, QuizResult};
use storage::repository::AttemptRepository;

use crate::error::AttemptServiceError;

/// Attempt history, graded details, and leaderboards.
#[derive(Clone)]
pub struct AttemptService {
    attempts: Arc<dyn AttemptRepository>,
}

impl AttemptService {
    #[must_use]
    pub fn new(attempts: Arc<dyn AttemptRepository>) -> Self {
        Self { attempts }
    }

    /// The viewer's attempts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `AttemptServiceError::Storage` if history cannot be fetched.
    pub async fn history(&self) -> Result<Vec<AttemptSummary>, AttemptServiceError> {
        let mut rows = self.attempts.my_attempts().await?;
        rows.sort_by(|a, b| b.attempt_date.cmp(&a.attempt_date));
        Ok(rows)
    }

    /// # Errors
    ///
    /// Returns `AttemptServiceError::Storage` if the attempt cannot be fetched.
    pub async fn details(&self, id: AttemptId) -> Result<QuizResult, AttemptServiceError> {
        Ok(self.attempts.attempt_details(id).await?)
    }

    /// Leaderboard for a quiz, with `viewer` marked for the "mine only" filter.
    ///
    /// # Errors
    ///
    /// Returns `AttemptServiceError::Storage` if the leaderboard cannot be fetched.
    pub async fn leaderboard(
        &self,
        quiz_id: QuizId,
        viewer: Option<String>,
    ) -> Result<Leaderboard, AttemptServiceError> {
        let rows = self.attempts.quiz_leaderboard(quiz_id).await?;
        Ok(Leaderboard::new(rows, viewer))
    }
}
