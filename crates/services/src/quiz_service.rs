use std::sync::Arc;

use quiz_core::model::{Quiz, QuizDraft, QuizId};
use storage::repository::QuizRepository;

use crate::error::QuizServiceError;

/// Catalog browsing and admin authoring.
#[derive(Clone)]
pub struct QuizService {
    quizzes: Arc<dyn QuizRepository>,
}

impl QuizService {
    #[must_use]
    pub fn new(quizzes: Arc<dyn QuizRepository>) -> Self {
        Self { quizzes }
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the catalog cannot be fetched.
    pub async fn list_quizzes(&self) -> Result<Vec<Quiz>, QuizServiceError> {
        Ok(self.quizzes.list_quizzes().await?)
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the quiz cannot be fetched.
    pub async fn get_quiz(&self, id: QuizId) -> Result<Quiz, QuizServiceError> {
        Ok(self.quizzes.get_quiz(id).await?)
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if no quiz has that title.
    pub async fn search(&self, title: &str) -> Result<Quiz, QuizServiceError> {
        Ok(self.quizzes.search_quiz(title).await?)
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the list cannot be fetched.
    pub async fn list_names(&self) -> Result<Vec<String>, QuizServiceError> {
        Ok(self.quizzes.list_quiz_names().await?)
    }

    /// Load an existing quiz into an editable draft.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the quiz cannot be fetched.
    pub async fn load_draft(&self, id: QuizId) -> Result<QuizDraft, QuizServiceError> {
        let quiz = self.quizzes.get_authoring_quiz(id).await?;
        Ok(QuizDraft::from_authoring(&quiz))
    }

    /// Validate and create a quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Draft` before any request if the draft is invalid.
    pub async fn create(&self, draft: &QuizDraft) -> Result<Quiz, QuizServiceError> {
        let payload = draft.validate()?;
        let quiz = self.quizzes.create_quiz(&payload).await?;
        log::info!("created quiz {} ({})", quiz.id(), quiz.title());
        Ok(quiz)
    }

    /// Validate and replace a quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Draft` before any request if the draft is invalid.
    pub async fn update(&self, id: QuizId, draft: &QuizDraft) -> Result<Quiz, QuizServiceError> {
        let payload = draft.validate()?;
        Ok(self.quizzes.update_quiz(id, &payload).await?)
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the quiz cannot be deleted.
    pub async fn delete(&self, id: QuizId) -> Result<(), QuizServiceError> {
        self.quizzes.delete_quiz(id).await?;
        log::info!("deleted quiz {id}");
        Ok(())
    }
}
