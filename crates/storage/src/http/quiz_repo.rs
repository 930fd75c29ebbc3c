use async_trait::async_trait;

use crate::repository::{QuizRepository, StorageError};
use quiz_core::model::{AuthoringQuiz, Quiz, QuizId, QuizPayload};

use super::HttpRepository;

#[async_trait]
impl QuizRepository for HttpRepository {
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, StorageError> {
        let url = self.endpoint("quizzes")?;
        self.send_json(self.client.get(url)).await
    }

    async fn get_quiz(&self, id: QuizId) -> Result<Quiz, StorageError> {
        let url = self.endpoint(&format!("quizzes/{id}"))?;
        self.send_json(self.client.get(url)).await
    }

    async fn search_quiz(&self, title: &str) -> Result<Quiz, StorageError> {
        let mut url = self.endpoint("quizzes/search")?;
        url.query_pairs_mut().append_pair("text", title.trim());
        self.send_json(self.client.get(url)).await
    }

    async fn list_quiz_names(&self) -> Result<Vec<String>, StorageError> {
        let url = self.endpoint("quizzes/names")?;
        self.send_json(self.client.get(url)).await
    }

    async fn get_authoring_quiz(&self, id: QuizId) -> Result<AuthoringQuiz, StorageError> {
        let url = self.endpoint(&format!("quizzes/{id}"))?;
        self.send_json(self.client.get(url)).await
    }

    async fn create_quiz(&self, payload: &QuizPayload) -> Result<Quiz, StorageError> {
        let url = self.endpoint("quizzes")?;
        log::info!("creating quiz {:?}", payload.quiz_text);
        self.send_json(self.client.post(url).json(payload)).await
    }

    async fn update_quiz(&self, id: QuizId, payload: &QuizPayload) -> Result<Quiz, StorageError> {
        let url = self.endpoint(&format!("quizzes/{id}"))?;
        log::info!("updating quiz {id}");
        self.send_json(self.client.put(url).json(payload)).await
    }

    async fn delete_quiz(&self, id: QuizId) -> Result<(), StorageError> {
        let url = self.endpoint(&format!("quizzes/{id}"))?;
        log::info!("deleting quiz {id}");
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}
