use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};

use crate::context::{AppContext, use_auth_provider, use_auth_status};
use crate::views::{
    HistoryView, LeaderboardView, LoginView, NotFoundView, QuizCreateView, QuizDetailView,
    QuizEditView, QuizListView, QuizNamesView, RegisterView, ResultView, TakeView,
};

#[derive(Clone, Routable, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[redirect("/", || Route::QuizList {})]
        #[route("/quizzes", QuizListView)] QuizList {},
        #[route("/quizzes/names", QuizNamesView)] QuizNames {},
        #[route("/quizzes/result/:attempt_id", ResultView)] AttemptResult { attempt_id: u64 },
        #[route("/quizzes/:id", QuizDetailView)] QuizDetail { id: u64 },
        #[route("/quizzes/:id/take", TakeView)] TakeQuiz { id: u64 },
        #[route("/auth/login?:return_to", LoginView)] Login { return_to: String },
        #[route("/auth/register", RegisterView)] Register {},
        #[route("/profile/history", HistoryView)] History {},
        #[route("/profile/leaderboard/:quiz_id", LeaderboardView)] Leaderboard { quiz_id: u64 },
        #[route("/admin/quizzes/new", QuizCreateView)] QuizCreate {},
        #[route("/admin/quizzes/:id/edit", QuizEditView)] QuizEdit { id: u64 },
        #[route("/:..segments", NotFoundView)] NotFound { segments: Vec<String> },
}

impl Route {
    /// Login page that returns to `route` once signed in.
    #[must_use]
    pub fn login_returning_to(route: &Route) -> Self {
        Self::Login {
            return_to: route.to_string(),
        }
    }
}

#[component]
fn Layout() -> Element {
    use_auth_provider();
    rsx! {
        div { class: "app",
            Navbar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Navbar() -> Element {
    let ctx = use_context::<AppContext>();
    let status = use_auth_status().get();
    let mut menu_open = use_signal(|| false);
    let navigator = use_navigator();

    let on_logout = use_callback(move |()| {
        let auth = ctx.auth();
        menu_open.set(false);
        spawn(async move {
            if let Err(err) = auth.logout().await {
                log::warn!("logout could not clear cached credential: {err}");
            }
            navigator.push(Route::QuizList {});
        });
    });

    rsx! {
        nav { class: "navbar",
            span { class: "brand", "Quiz" }
            Link { to: Route::QuizList {}, "Quizzes" }
            Link { to: Route::QuizNames {}, "All names" }
            if status.is_admin() {
                Link { to: Route::QuizCreate {}, "Create Quiz" }
            }
            match status.username() {
                Some(username) => rsx! {
                    div { class: "user-menu",
                        button {
                            class: "user-menu-toggle",
                            onclick: move |_| menu_open.set(!menu_open()),
                            "{username}"
                        }
                        if menu_open() {
                            ul { class: "user-menu-items",
                                li { Link { to: Route::History {}, "My attempts" } }
                                li {
                                    button { onclick: move |_| on_logout.call(()), "Logout" }
                                }
                            }
                        }
                    }
                },
                None => rsx! {
                    Link { to: Route::Login { return_to: String::new() }, "Login" }
                    Link { to: Route::Register {}, "Register" }
                },
            }
        }
    }
}
