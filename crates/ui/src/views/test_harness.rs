use std::sync::Arc;

use chrono::Duration;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::{
    AttemptId, AuthoringQuiz, LoginRequest, OptionPayload, QuestionPayload, QuizPayload,
};
use quiz_core::time::{fixed_clock, fixed_now};
use services::{
    AppServices, AttemptService, AuthError, AuthService, QuizService, SessionLoopService,
    TokenClaims, TokenInspector,
};
use storage::repository::{InMemoryRepository, Storage};

use crate::context::{UiApp, build_app_context, use_auth_provider};
use crate::views::{
    HistoryView, LeaderboardView, LoginView, QuizCreateView, QuizDetailView, QuizEditView,
    QuizListView, QuizNamesView, ResultView, TakeView,
};

/// Reads the in-memory backend's `mem:<user>:<role>` tokens.
struct MemoryInspector;

impl TokenInspector for MemoryInspector {
    fn inspect(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let parts: Vec<&str> = token.split(':').collect();
        match parts.as_slice() {
            ["mem", _, role] => Ok(TokenClaims {
                expires_at: fixed_now() + Duration::hours(1),
                is_admin: *role == "admin",
            }),
            _ => Err(AuthError::InvalidToken(token.to_string())),
        }
    }
}

struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn quizzes(&self) -> Arc<QuizService> {
        self.services.quizzes()
    }

    fn attempts(&self) -> Arc<AttemptService> {
        self.services.attempts()
    }

    fn session_loop(&self) -> Arc<SessionLoopService> {
        self.services.session_loop()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    QuizList,
    QuizNames,
    QuizDetail(u64),
    Take(u64),
    Result(u64),
    Login,
    History,
    Leaderboard(u64),
    QuizCreate,
    QuizEdit(u64),
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Guest,
    User,
    Admin,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    use_auth_provider();
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::QuizList => rsx! { QuizListView {} },
        ViewKind::QuizNames => rsx! { QuizNamesView {} },
        ViewKind::QuizDetail(id) => rsx! { QuizDetailView { id } },
        ViewKind::Take(id) => rsx! { TakeView { id } },
        ViewKind::Result(attempt_id) => rsx! { ResultView { attempt_id } },
        ViewKind::Login => rsx! { LoginView { return_to: String::new() } },
        ViewKind::History => rsx! { HistoryView {} },
        ViewKind::Leaderboard(quiz_id) => rsx! { LeaderboardView { quiz_id } },
        ViewKind::QuizCreate => rsx! { QuizCreateView {} },
        ViewKind::QuizEdit(id) => rsx! { QuizEditView { id } },
    }
}

/// Seeded backend and services, before any view is mounted.
pub struct Fixture {
    pub repo: InMemoryRepository,
    pub services: AppServices,
    pub quiz: AuthoringQuiz,
}

impl Fixture {
    #[must_use]
    pub fn quiz_id(&self) -> u64 {
        self.quiz.quiz_id.value()
    }

    /// Take the seeded quiz as the signed-in user, picking option `picks[n]` for question `n`.
    pub async fn submit_attempt(&self, picks: &[usize]) -> AttemptId {
        let session_loop = self.services.session_loop();
        let mut session = session_loop
            .start_session(self.quiz.quiz_id)
            .await
            .expect("start session");
        for (index, pick) in picks.iter().enumerate() {
            session.jump_to(index);
            let option = session.current_question().options()[*pick].id();
            session.select_option(option).expect("select option");
        }
        session_loop
            .submit(&mut session)
            .await
            .expect("submit attempt")
            .attempt_id
    }

    pub fn mount(self, view: ViewKind) -> ViewHarness {
        let app = Arc::new(TestApp {
            services: self.services,
        });
        let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
        ViewHarness { dom }
    }
}

pub async fn setup_fixture(viewer: Viewer) -> Fixture {
    setup_fixture_with(viewer, |_| {}).await
}

/// Like `setup_fixture`, but lets the test swap repositories before services are built.
pub async fn setup_fixture_with(viewer: Viewer, customize: impl FnOnce(&mut Storage)) -> Fixture {
    let repo = InMemoryRepository::new().with_clock(fixed_clock());
    repo.seed_user("ana", "pw", false).expect("seed user");
    repo.seed_user("root", "pw", true).expect("seed admin");
    let quiz = repo.seed_quiz(&ownership_quiz()).expect("seed quiz");

    let mut storage = Storage::from_memory(repo.clone());
    customize(&mut storage);
    let services = AppServices::from_storage(&storage, fixed_clock(), Arc::new(MemoryInspector));
    let username = match viewer {
        Viewer::Guest => None,
        Viewer::User => Some("ana"),
        Viewer::Admin => Some("root"),
    };
    if let Some(username) = username {
        services
            .auth()
            .login(&LoginRequest {
                username: username.into(),
                password: "pw".into(),
            })
            .await
            .expect("login");
    }

    Fixture {
        repo,
        services,
        quiz,
    }
}

fn ownership_quiz() -> QuizPayload {
    let option = |text: &str, correct: bool| OptionPayload {
        option_id: None,
        option_text: text.into(),
        correct,
    };
    QuizPayload {
        quiz_text: "Ownership".into(),
        questions: vec![
            QuestionPayload {
                question_id: None,
                question_text: "Who owns a value?".into(),
                options: vec![option("Its binding", true), option("The heap", false)],
            },
            QuestionPayload {
                question_id: None,
                question_text: "Can a value have two owners?".into(),
                options: vec![option("Yes", false), option("No", true)],
            },
        ],
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild, then let resources resolve and the follow-up renders land.
    pub async fn settle(&mut self) -> String {
        self.rebuild();
        for _ in 0..3 {
            self.drive_async().await;
        }
        self.render()
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}
