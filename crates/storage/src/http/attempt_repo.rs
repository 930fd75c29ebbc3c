use async_trait::async_trait;

use crate::repository::{AttemptRepository, StorageError};
use quiz_core::model::{AttemptId, AttemptSummary, QuizId, QuizResult, Submission};

use super::HttpRepository;

#[async_trait]
impl AttemptRepository for HttpRepository {
    async fn submit_attempt(&self, submission: &Submission) -> Result<QuizResult, StorageError> {
        let url = self.endpoint("quiz-attempts/submit")?;
        log::info!(
            "submitting {} answers for quiz {}",
            submission.answers().len(),
            submission.quiz_id()
        );
        self.send_json(self.client.post(url).json(submission)).await
    }

    async fn my_attempts(&self) -> Result<Vec<AttemptSummary>, StorageError> {
        let url = self.endpoint("quiz-attempts/my-attempts")?;
        self.send_json(self.client.get(url)).await
    }

    async fn attempt_details(&self, id: AttemptId) -> Result<QuizResult, StorageError> {
        let url = self.endpoint(&format!("quiz-attempts/{id}"))?;
        self.send_json(self.client.get(url)).await
    }

    async fn quiz_leaderboard(&self, quiz_id: QuizId) -> Result<Vec<AttemptSummary>, StorageError> {
        let url = self.endpoint(&format!("quiz-attempts/leaderboard/{quiz_id}"))?;
        self.send_json(self.client.get(url)).await
    }
}
