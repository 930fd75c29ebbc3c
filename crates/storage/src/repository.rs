use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::Clock;
use quiz_core::model::{
    AttemptId, AttemptSummary, AuthResponse, AuthoringOption, AuthoringQuestion, AuthoringQuiz,
    Credential, LoginRequest, OptionId, QuestionId, QuestionResult, Quiz, QuizId, QuizPayload,
    QuizResult, RegisterRequest, Submission,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("authentication required")]
    Unauthorized,

    #[error("access denied")]
    Forbidden,

    #[error("backend returned {status}: {message}")]
    Http { status: u16, message: String },

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Shared slot for the bearer token attached to backend requests.
///
/// The auth service writes it; the HTTP adapter reads it on every request.
#[derive(Clone, Default)]
pub struct BearerToken(Arc<RwLock<Option<String>>>);

impl BearerToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, token: impl Into<String>) {
        let mut guard = self.0.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(token.into());
    }

    pub fn clear(&self) {
        let mut guard = self.0.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = if self.get().is_some() { "set" } else { "empty" };
        f.debug_tuple("BearerToken").field(&state).finish()
    }
}

//
// ─── CONTRACTS ─────────────────────────────────────────────────────────────────
//

/// Quiz catalog and authoring operations.
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be fetched.
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, StorageError>;

    /// Fetch a quiz for a take-session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_quiz(&self, id: QuizId) -> Result<Quiz, StorageError>;

    /// Look up a quiz by its exact title.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no quiz has that title.
    async fn search_quiz(&self, title: &str) -> Result<Quiz, StorageError>;

    /// Titles only, for visitors who are not signed in.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be fetched.
    async fn list_quiz_names(&self) -> Result<Vec<String>, StorageError>;

    /// Fetch a quiz including correctness flags, for the edit flow.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, `StorageError::Forbidden` for non-admins.
    async fn get_authoring_quiz(&self, id: QuizId) -> Result<AuthoringQuiz, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the quiz cannot be created.
    async fn create_quiz(&self, payload: &QuizPayload) -> Result<Quiz, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn update_quiz(&self, id: QuizId, payload: &QuizPayload) -> Result<Quiz, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn delete_quiz(&self, id: QuizId) -> Result<(), StorageError>;
}

/// Grading and attempt history, all computed by the backend.
#[async_trait]
pub trait AttemptRepository: Send + Sync {
    /// Send a submission for grading.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects or cannot receive the submission.
    async fn submit_attempt(&self, submission: &Submission) -> Result<QuizResult, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::Unauthorized` without a signed-in user.
    async fn my_attempts(&self) -> Result<Vec<AttemptSummary>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the attempt does not exist.
    async fn attempt_details(&self, id: AttemptId) -> Result<QuizResult, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the leaderboard cannot be fetched.
    async fn quiz_leaderboard(&self, quiz_id: QuizId) -> Result<Vec<AttemptSummary>, StorageError>;
}

/// Credential issuance, owned by the external auth service.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError::Unauthorized` for bad credentials.
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, StorageError>;

    /// Returns the backend's confirmation message.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the username is taken.
    async fn register(&self, request: &RegisterRequest) -> Result<String, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the username is taken.
    async fn register_admin(&self, request: &RegisterRequest) -> Result<String, StorageError>;
}

/// Local cache of the bearer credential and display name.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the cache cannot be read.
    async fn load_credential(&self) -> Result<Option<Credential>, StorageError>;

    /// Replace the cached credential, stamped with the caller's `saved_at`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cache cannot be written.
    async fn save_credential(
        &self,
        credential: &Credential,
        saved_at: DateTime<Utc>,
    ) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the cache cannot be written.
    async fn clear_credential(&self) -> Result<(), StorageError>;
}

//
// ─── IN-MEMORY BACKEND ─────────────────────────────────────────────────────────
//

/// Role marker embedded in tokens issued by `InMemoryRepository`.
pub const MEMORY_TOKEN_PREFIX: &str = "mem";

#[derive(Debug, Clone)]
struct MemoryUser {
    password: String,
    is_admin: bool,
}

#[derive(Debug, Default)]
struct MemoryState {
    quizzes: BTreeMap<QuizId, AuthoringQuiz>,
    attempts: Vec<(QuizId, QuizResult)>,
    users: HashMap<String, MemoryUser>,
    signed_in: Option<String>,
    credential: Option<Credential>,
    last_id: u64,
}

impl MemoryState {
    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    fn build_quiz(&mut self, quiz_id: QuizId, payload: &QuizPayload) -> AuthoringQuiz {
        let questions = payload
            .questions
            .iter()
            .map(|question| {
                let question_id = question
                    .question_id
                    .unwrap_or_else(|| QuestionId::new(self.next_id()));
                let options = question
                    .options
                    .iter()
                    .map(|option| AuthoringOption {
                        option_id: option
                            .option_id
                            .unwrap_or_else(|| OptionId::new(self.next_id())),
                        option_text: option.option_text.clone(),
                        correct: option.correct,
                    })
                    .collect();
                AuthoringQuestion {
                    question_id,
                    question_text: question.question_text.clone(),
                    options,
                }
            })
            .collect();
        AuthoringQuiz {
            quiz_id,
            quiz_text: payload.quiz_text.clone(),
            questions,
        }
    }
}

/// Letter grade used by the in-memory grader.
#[must_use]
pub fn memory_letter_grade(percentage: f64) -> &'static str {
    if percentage >= 90.0 {
        "A+"
    } else if percentage >= 80.0 {
        "A"
    } else if percentage >= 70.0 {
        "B"
    } else if percentage >= 60.0 {
        "C"
    } else if percentage >= 50.0 {
        "D"
    } else {
        "F"
    }
}

/// Self-contained backend for tests and offline prototyping.
///
/// Grades submissions against the stored correctness flags and issues tokens of the
/// form `mem:<username>:<admin|user>`.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<MemoryState>>,
    clock: Clock,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryState>, StorageError> {
        self.state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }

    /// Register a user directly, bypassing the auth flow.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the username exists.
    pub fn seed_user(&self, username: &str, password: &str, is_admin: bool) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        if guard.users.contains_key(username) {
            return Err(StorageError::Conflict);
        }
        guard.users.insert(
            username.to_string(),
            MemoryUser {
                password: password.to_string(),
                is_admin,
            },
        );
        Ok(())
    }

    /// Store a quiz and return it with correctness flags and assigned ids.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the state lock is poisoned.
    pub fn seed_quiz(&self, payload: &QuizPayload) -> Result<AuthoringQuiz, StorageError> {
        let mut guard = self.lock()?;
        let quiz_id = QuizId::new(guard.next_id());
        let quiz = guard.build_quiz(quiz_id, payload);
        guard.quizzes.insert(quiz_id, quiz.clone());
        Ok(quiz)
    }

    fn register_user(&self, request: &RegisterRequest, is_admin: bool) -> Result<String, StorageError> {
        if request.username.trim().is_empty() || request.password.is_empty() {
            return Err(StorageError::Http {
                status: 400,
                message: "username and password are required".into(),
            });
        }
        self.seed_user(&request.username, &request.password, is_admin)?;
        Ok(format!("User {} registered successfully", request.username))
    }
}

#[async_trait]
impl QuizRepository for InMemoryRepository {
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.quizzes.values().map(AuthoringQuiz::to_quiz).collect())
    }

    async fn get_quiz(&self, id: QuizId) -> Result<Quiz, StorageError> {
        let guard = self.lock()?;
        guard
            .quizzes
            .get(&id)
            .map(AuthoringQuiz::to_quiz)
            .ok_or(StorageError::NotFound)
    }

    async fn search_quiz(&self, title: &str) -> Result<Quiz, StorageError> {
        let needle = title.trim().to_lowercase();
        let guard = self.lock()?;
        guard
            .quizzes
            .values()
            .find(|quiz| quiz.quiz_text.to_lowercase() == needle)
            .map(AuthoringQuiz::to_quiz)
            .ok_or(StorageError::NotFound)
    }

    async fn list_quiz_names(&self) -> Result<Vec<String>, StorageError> {
        let guard = self.lock()?;
        Ok(guard
            .quizzes
            .values()
            .map(|quiz| quiz.quiz_text.clone())
            .collect())
    }

    async fn get_authoring_quiz(&self, id: QuizId) -> Result<AuthoringQuiz, StorageError> {
        let guard = self.lock()?;
        guard.quizzes.get(&id).cloned().ok_or(StorageError::NotFound)
    }

    async fn create_quiz(&self, payload: &QuizPayload) -> Result<Quiz, StorageError> {
        self.seed_quiz(payload).map(|quiz| quiz.to_quiz())
    }

    async fn update_quiz(&self, id: QuizId, payload: &QuizPayload) -> Result<Quiz, StorageError> {
        let mut guard = self.lock()?;
        if !guard.quizzes.contains_key(&id) {
            return Err(StorageError::NotFound);
        }
        let quiz = guard.build_quiz(id, payload);
        let taken = quiz.to_quiz();
        guard.quizzes.insert(id, quiz);
        Ok(taken)
    }

    async fn delete_quiz(&self, id: QuizId) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        guard.quizzes.remove(&id).ok_or(StorageError::NotFound)?;
        guard.attempts.retain(|(quiz_id, _)| *quiz_id != id);
        Ok(())
    }
}

#[async_trait]
impl AttemptRepository for InMemoryRepository {
    #[allow(clippy::cast_precision_loss)]
    async fn submit_attempt(&self, submission: &Submission) -> Result<QuizResult, StorageError> {
        let attempt_date = self.clock.now().naive_utc();
        let mut guard = self.lock()?;
        let username = guard.signed_in.clone().ok_or(StorageError::Unauthorized)?;
        let quiz = guard
            .quizzes
            .get(&submission.quiz_id())
            .cloned()
            .ok_or(StorageError::NotFound)?;

        let question_results: Vec<QuestionResult> = quiz
            .questions
            .iter()
            .map(|question| {
                let selected = submission.answer_for(question.question_id);
                let selected_option = selected.and_then(|id| {
                    question.options.iter().find(|option| option.option_id == id)
                });
                let correct_option = question.options.iter().find(|option| option.correct);
                QuestionResult {
                    question_id: question.question_id,
                    question_text: question.question_text.clone(),
                    selected_answer: selected_option
                        .map(|option| option.option_text.clone())
                        .unwrap_or_default(),
                    correct_answer: correct_option
                        .map(|option| option.option_text.clone())
                        .unwrap_or_default(),
                    is_correct: selected_option.is_some_and(|option| option.correct),
                }
            })
            .collect();

        let total = u32::try_from(question_results.len())
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let correct = u32::try_from(question_results.iter().filter(|r| r.is_correct).count())
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let percentage = if total == 0 {
            0.0
        } else {
            (f64::from(correct) / f64::from(total) * 10_000.0).round() / 100.0
        };

        let result = QuizResult {
            attempt_id: AttemptId::new(guard.next_id()),
            username,
            quiz_title: quiz.quiz_text.clone(),
            score: correct,
            total_questions: total,
            correct_answers: correct,
            wrong_answers: total - correct,
            percentage,
            grade: memory_letter_grade(percentage).to_string(),
            attempt_date,
            question_results,
        };
        guard.attempts.push((quiz.quiz_id, result.clone()));
        Ok(result)
    }

    async fn my_attempts(&self) -> Result<Vec<AttemptSummary>, StorageError> {
        let guard = self.lock()?;
        let username = guard.signed_in.as_deref().ok_or(StorageError::Unauthorized)?;
        Ok(guard
            .attempts
            .iter()
            .filter(|(_, result)| result.username == username)
            .map(|(_, result)| result.summary())
            .collect())
    }

    async fn attempt_details(&self, id: AttemptId) -> Result<QuizResult, StorageError> {
        let guard = self.lock()?;
        guard
            .attempts
            .iter()
            .find(|(_, result)| result.attempt_id == id)
            .map(|(_, result)| result.clone())
            .ok_or(StorageError::NotFound)
    }

    async fn quiz_leaderboard(&self, quiz_id: QuizId) -> Result<Vec<AttemptSummary>, StorageError> {
        let guard = self.lock()?;
        Ok(guard
            .attempts
            .iter()
            .filter(|(id, _)| *id == quiz_id)
            .map(|(_, result)| result.summary())
            .collect())
    }
}

#[async_trait]
impl AuthRepository for InMemoryRepository {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, StorageError> {
        let mut guard = self.lock()?;
        let user = guard
            .users
            .get(&request.username)
            .filter(|user| user.password == request.password)
            .cloned()
            .ok_or(StorageError::Unauthorized)?;
        let role = if user.is_admin { "admin" } else { "user" };
        guard.signed_in = Some(request.username.clone());
        Ok(AuthResponse {
            token: format!("{MEMORY_TOKEN_PREFIX}:{}:{role}", request.username),
            username: request.username.clone(),
        })
    }

    async fn register(&self, request: &RegisterRequest) -> Result<String, StorageError> {
        self.register_user(request, false)
    }

    async fn register_admin(&self, request: &RegisterRequest) -> Result<String, StorageError> {
        self.register_user(request, true)
    }
}

#[async_trait]
impl CredentialRepository for InMemoryRepository {
    async fn load_credential(&self) -> Result<Option<Credential>, StorageError> {
        Ok(self.lock()?.credential.clone())
    }

    async fn save_credential(
        &self,
        credential: &Credential,
        _saved_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        self.lock()?.credential = Some(credential.clone());
        Ok(())
    }

    async fn clear_credential(&self) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        guard.credential = None;
        guard.signed_in = None;
        Ok(())
    }
}

/// Aggregates the backend contracts behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub quizzes: Arc<dyn QuizRepository>,
    pub attempts: Arc<dyn AttemptRepository>,
    pub auth: Arc<dyn AuthRepository>,
    pub credentials: Arc<dyn CredentialRepository>,
    pub bearer: BearerToken,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_memory(InMemoryRepository::new())
    }

    #[must_use]
    pub fn from_memory(repo: InMemoryRepository) -> Self {
        let quizzes: Arc<dyn QuizRepository> = Arc::new(repo.clone());
        let attempts: Arc<dyn AttemptRepository> = Arc::new(repo.clone());
        let auth: Arc<dyn AuthRepository> = Arc::new(repo.clone());
        let credentials: Arc<dyn CredentialRepository> = Arc::new(repo);
        Self {
            quizzes,
            attempts,
            auth,
            credentials,
            bearer: BearerToken::new(),
        }
    }
}
