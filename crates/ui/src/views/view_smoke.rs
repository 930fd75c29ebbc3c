use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use quiz_core::model::{
    AuthoringQuiz, OptionPayload, QuestionPayload, Quiz, QuizId, QuizPayload,
};
use quiz_core::time::fixed_now;
use storage::repository::{QuizRepository, StorageError};

use super::test_harness::{ViewKind, Viewer, setup_fixture, setup_fixture_with};

/// Catalog backend that is never reachable.
struct OfflineQuizzes;

fn offline<T>() -> Result<T, StorageError> {
    Err(StorageError::Connection("connection refused".into()))
}

#[async_trait]
impl QuizRepository for OfflineQuizzes {
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, StorageError> {
        offline()
    }

    async fn get_quiz(&self, _id: QuizId) -> Result<Quiz, StorageError> {
        offline()
    }

    async fn search_quiz(&self, _text: &str) -> Result<Quiz, StorageError> {
        offline()
    }

    async fn list_quiz_names(&self) -> Result<Vec<String>, StorageError> {
        offline()
    }

    async fn get_authoring_quiz(&self, _id: QuizId) -> Result<AuthoringQuiz, StorageError> {
        offline()
    }

    async fn create_quiz(&self, _payload: &QuizPayload) -> Result<Quiz, StorageError> {
        offline()
    }

    async fn update_quiz(&self, _id: QuizId, _payload: &QuizPayload) -> Result<Quiz, StorageError> {
        offline()
    }

    async fn delete_quiz(&self, _id: QuizId) -> Result<(), StorageError> {
        offline()
    }
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_list_smoke_renders_cards_for_guest() {
    let fixture = setup_fixture(Viewer::Guest).await;
    let mut harness = fixture.mount(ViewKind::QuizList);

    let html = harness.settle().await;
    assert!(html.contains("Ownership"), "missing title in {html}");
    assert!(html.contains("2 Questions"), "missing count in {html}");
    assert!(html.contains("~4 min"), "missing estimate in {html}");
    assert!(html.contains("Login to Take"), "missing login prompt in {html}");
    assert!(!html.contains("Delete"), "guest sees admin actions in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_list_smoke_shows_admin_actions() {
    let fixture = setup_fixture(Viewer::Admin).await;
    let mut harness = fixture.mount(ViewKind::QuizList);

    let html = harness.settle().await;
    assert!(html.contains("Take Quiz"), "missing take link in {html}");
    assert!(html.contains("Edit"), "missing edit link in {html}");
    assert!(html.contains("Delete"), "missing delete button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_names_smoke_lists_every_title() {
    let fixture = setup_fixture(Viewer::Guest).await;
    fixture
        .repo
        .seed_quiz(&QuizPayload {
            quiz_text: "Lifetimes".into(),
            questions: vec![QuestionPayload {
                question_id: None,
                question_text: "'static means?".into(),
                options: vec![
                    OptionPayload {
                        option_id: None,
                        option_text: "Lives for the whole program".into(),
                        correct: true,
                    },
                    OptionPayload {
                        option_id: None,
                        option_text: "Allocated on the stack".into(),
                        correct: false,
                    },
                ],
            }],
        })
        .expect("seed second quiz");
    let mut harness = fixture.mount(ViewKind::QuizNames);

    let html = harness.settle().await;
    assert!(html.contains("Ownership"), "missing first name in {html}");
    assert!(html.contains("Lifetimes"), "missing second name in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_detail_smoke_reports_missing_quiz() {
    let fixture = setup_fixture(Viewer::User).await;
    let mut harness = fixture.mount(ViewKind::QuizDetail(999));

    let html = harness.settle().await;
    assert!(
        html.contains("That quiz or attempt could not be found."),
        "missing not-found message in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn take_view_smoke_gates_guests() {
    let fixture = setup_fixture(Viewer::Guest).await;
    let quiz_id = fixture.quiz_id();
    let mut harness = fixture.mount(ViewKind::Take(quiz_id));

    let html = harness.settle().await;
    assert!(html.contains("Sign in required"), "missing gate in {html}");
    assert!(!html.contains("Who owns a value?"), "question leaked in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn take_view_smoke_renders_first_question() {
    let fixture = setup_fixture(Viewer::User).await;
    let quiz_id = fixture.quiz_id();
    let mut harness = fixture.mount(ViewKind::Take(quiz_id));

    let html = harness.settle().await;
    assert!(html.contains("Question 1 of 2"), "missing progress in {html}");
    assert!(html.contains("Who owns a value?"), "missing question in {html}");
    assert!(html.contains("Its binding"), "missing option in {html}");
    assert!(html.contains("0 of 2 answered"), "missing answered count in {html}");
    assert!(html.contains("Next"), "missing next button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn result_view_smoke_renders_graded_rows() {
    let fixture = setup_fixture(Viewer::User).await;
    let attempt_id = fixture.submit_attempt(&[0, 0]).await;
    let mut harness = fixture.mount(ViewKind::Result(attempt_id.value()));

    let html = harness.settle().await;
    assert!(html.contains("Score: 1 / 2 (50.0%)"), "missing score in {html}");
    assert!(html.contains("Grade: D"), "missing grade in {html}");
    assert!(html.contains("Correct answer: No"), "missing correction in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_smoke_renders_attempt_card() {
    let fixture = setup_fixture(Viewer::User).await;
    fixture.submit_attempt(&[0, 1]).await;
    let mut harness = fixture.mount(ViewKind::History);

    let html = harness.settle().await;
    assert!(html.contains("My Attempts"), "missing heading in {html}");
    assert!(html.contains("Score: 2 / 2 (100.0%)"), "missing score in {html}");
    assert!(html.contains("View details"), "missing details link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_smoke_renders_empty_state() {
    let fixture = setup_fixture(Viewer::User).await;
    let mut harness = fixture.mount(ViewKind::History);

    let html = harness.settle().await;
    assert!(html.contains("No attempts yet."), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn leaderboard_view_smoke_renders_stats_and_podium() {
    let fixture = setup_fixture(Viewer::User).await;
    fixture.submit_attempt(&[0, 1]).await;
    fixture.submit_attempt(&[1, 0]).await;
    let quiz_id = fixture.quiz_id();
    let mut harness = fixture.mount(ViewKind::Leaderboard(quiz_id));

    let html = harness.settle().await;
    assert!(html.contains("🥇"), "missing medal in {html}");
    assert!(html.contains("(you)"), "missing viewer badge in {html}");
    assert!(html.contains("50.0%"), "missing average in {html}");
    assert!(html.contains("100.0%"), "missing top score in {html}");
    assert!(html.contains("quiz-title"), "missing quiz title in {html}");
    assert!(html.contains("Ownership"), "missing quiz title in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn editor_smoke_denies_regular_users() {
    let fixture = setup_fixture(Viewer::User).await;
    let mut harness = fixture.mount(ViewKind::QuizCreate);

    let html = harness.settle().await;
    assert!(
        html.contains("You do not have admin privileges."),
        "missing denial in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn editor_smoke_loads_existing_quiz_for_admin() {
    let fixture = setup_fixture(Viewer::Admin).await;
    let quiz_id = fixture.quiz_id();
    let mut harness = fixture.mount(ViewKind::QuizEdit(quiz_id));

    let html = harness.settle().await;
    assert!(html.contains("Edit Quiz"), "missing heading in {html}");
    assert!(html.contains("Ownership"), "missing loaded title in {html}");
    assert!(html.contains("Update Quiz"), "missing save label in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn editor_smoke_closes_once_the_admin_token_lapses() {
    let fixture = setup_fixture(Viewer::Admin).await;
    let auth = fixture.services.auth();
    let mut harness = fixture.mount(ViewKind::QuizCreate);
    let html = harness.settle().await;
    assert!(html.contains("Create New Quiz"), "missing editor in {html}");

    assert!(auth.expire_at(fixed_now() + Duration::hours(1)).await.unwrap());
    for _ in 0..2 {
        harness.drive_async().await;
    }
    let html = harness.render();
    assert!(html.contains("Sign in required"), "editor still open in {html}");
    assert!(!html.contains("Create New Quiz"), "editor still open in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn editor_smoke_starts_blank_for_create() {
    let fixture = setup_fixture(Viewer::Admin).await;
    let mut harness = fixture.mount(ViewKind::QuizCreate);

    let html = harness.settle().await;
    assert!(html.contains("Create New Quiz"), "missing heading in {html}");
    assert!(html.contains("Question 1"), "missing blank question in {html}");
    assert!(html.contains("Add Option"), "missing option control in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_form() {
    let fixture = setup_fixture(Viewer::Guest).await;
    let mut harness = fixture.mount(ViewKind::Login);

    let html = harness.settle().await;
    assert!(html.contains("Username"), "missing username field in {html}");
    assert!(html.contains("Register"), "missing register link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_list_smoke_reports_unreachable_backend() {
    let fixture = setup_fixture_with(Viewer::Guest, |storage| {
        storage.quizzes = Arc::new(OfflineQuizzes);
    })
    .await;
    let mut harness = fixture.mount(ViewKind::QuizList);

    let html = harness.settle().await;
    assert!(
        html.contains("Cannot reach the quiz server."),
        "missing offline message in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn take_view_smoke_reports_unreachable_backend() {
    let fixture = setup_fixture_with(Viewer::User, |storage| {
        storage.quizzes = Arc::new(OfflineQuizzes);
    })
    .await;
    let quiz_id = fixture.quiz_id();
    let mut harness = fixture.mount(ViewKind::Take(quiz_id));

    let html = harness.settle().await;
    assert!(
        html.contains("Cannot reach the quiz server."),
        "missing offline message in {html}"
    );
    assert!(html.contains("Back to quizzes"), "missing way back in {html}");
}
