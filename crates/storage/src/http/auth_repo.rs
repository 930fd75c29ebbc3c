use async_trait::async_trait;

use crate::repository::{AuthRepository, StorageError};
use quiz_core::model::{AuthResponse, LoginRequest, RegisterRequest};

use super::HttpRepository;

#[async_trait]
impl AuthRepository for HttpRepository {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, StorageError> {
        let url = self.endpoint("auth/login")?;
        self.send_json(self.client.post(url).json(request)).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<String, StorageError> {
        let url = self.endpoint("auth/register")?;
        self.send_text(self.client.post(url).json(request)).await
    }

    async fn register_admin(&self, request: &RegisterRequest) -> Result<String, StorageError> {
        let url = self.endpoint("auth/register-admin")?;
        self.send_text(self.client.post(url).json(request)).await
    }
}
