use std::sync::Arc;

use quiz_core::model::{QuizId, QuizResult};
use storage::repository::{AttemptRepository, QuizRepository};

use super::session::QuizSession;
use crate::error::SessionError;

/// Orchestrates the take-flow: fetch the quiz once, submit once.
#[derive(Clone)]
pub struct SessionLoopService {
    quizzes: Arc<dyn QuizRepository>,
    attempts: Arc<dyn AttemptRepository>,
}

impl SessionLoopService {
    #[must_use]
    pub fn new(quizzes: Arc<dyn QuizRepository>, attempts: Arc<dyn AttemptRepository>) -> Self {
        Self { quizzes, attempts }
    }

    /// Fetch the quiz and start a fresh session on it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the quiz cannot be fetched, or
    /// `SessionError::EmptyQuiz` if it has no questions.
    pub async fn start_session(&self, quiz_id: QuizId) -> Result<QuizSession, SessionError> {
        let quiz = self.quizzes.get_quiz(quiz_id).await?;
        log::debug!(
            "starting session on quiz {quiz_id} with {} questions",
            quiz.question_count()
        );
        QuizSession::new(quiz)
    }

    /// Build the submission and send it for grading.
    ///
    /// Nothing is sent if the session is incomplete. A failed send leaves the session
    /// unsubmitted so the caller may try again.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadySubmitted` on a second call,
    /// `SessionError::IncompleteSubmission` if any question is unanswered, or
    /// `SessionError::Storage` if grading fails.
    pub async fn submit(&self, session: &mut QuizSession) -> Result<QuizResult, SessionError> {
        if session.is_submitted() {
            return Err(SessionError::AlreadySubmitted);
        }
        let submission = session.build_submission()?;
        let result = match self.attempts.submit_attempt(&submission).await {
            Ok(result) => result,
            Err(err) => {
                log::warn!("submission for quiz {} failed: {err}", submission.quiz_id());
                return Err(err.into());
            }
        };
        session.mark_submitted(result.attempt_id);
        log::info!(
            "quiz {} graded: attempt {} scored {}%",
            submission.quiz_id(),
            result.attempt_id,
            result.percentage
        );
        Ok(result)
    }
}
