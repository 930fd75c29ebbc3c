use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use quiz_core::model::QuizId;

use crate::context::{AppContext, use_auth_status};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizCardVm, QuizDetailVm, map_quiz_cards};

#[component]
pub fn QuizListView() -> Element {
    let ctx = use_context::<AppContext>();
    let status = use_auth_status().get();
    let quizzes = ctx.quizzes();
    let navigator = use_navigator();
    let mut search = use_signal(String::new);
    let mut search_error = use_signal(|| None::<String>);
    let mut action_error = use_signal(|| None::<ViewError>);

    let mut resource = use_resource(move || {
        let quizzes = quizzes.clone();
        async move {
            let items = quizzes.list_quizzes().await.map_err(ViewError::from)?;
            Ok::<_, ViewError>(map_quiz_cards(&items))
        }
    });
    let state = view_state_from_resource(resource);

    let on_search = use_callback({
        let quizzes = ctx.quizzes();
        move |()| {
            let title = search.read().trim().to_string();
            if title.is_empty() {
                return;
            }
            let quizzes = quizzes.clone();
            spawn(async move {
                match quizzes.search(&title).await {
                    Ok(quiz) => {
                        search_error.set(None);
                        navigator.push(Route::QuizDetail {
                            id: quiz.id().value(),
                        });
                    }
                    Err(err) => {
                        let message = match ViewError::from(err) {
                            ViewError::NotFound => format!("No quiz titled \"{title}\"."),
                            other => other.message().to_string(),
                        };
                        search_error.set(Some(message));
                    }
                }
            });
        }
    });

    let on_delete = use_callback({
        let quizzes = ctx.quizzes();
        move |id: QuizId| {
            let quizzes = quizzes.clone();
            spawn(async move {
                match quizzes.delete(id).await {
                    Ok(()) => {
                        action_error.set(None);
                        resource.restart();
                    }
                    Err(err) => action_error.set(Some(ViewError::from(err))),
                }
            });
        }
    });

    rsx! {
        div { class: "page",
            h2 { "Available Quizzes" }

            form {
                class: "quiz-search",
                onsubmit: move |evt| {
                    evt.prevent_default();
                    on_search.call(());
                },
                input {
                    r#type: "search",
                    placeholder: "Find a quiz by title",
                    value: "{search}",
                    oninput: move |evt| search.set(evt.value()),
                }
                button { r#type: "submit", "Find" }
            }
            if let Some(message) = search_error() {
                p { class: "error", "{message}" }
            }
            if let Some(err) = action_error() {
                p { class: "error", "{err.message()}" }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(cards) => rsx! {
                    if cards.is_empty() {
                        p { "No quizzes available yet." }
                    } else {
                        div { class: "quiz-grid",
                            for card in cards {
                                QuizCard {
                                    key: "{card.id}",
                                    card: card.clone(),
                                    logged_in: status.is_logged_in(),
                                    is_admin: status.is_admin(),
                                    on_delete: move |id| on_delete.call(id),
                                }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn QuizCard(
    card: QuizCardVm,
    logged_in: bool,
    is_admin: bool,
    on_delete: EventHandler<QuizId>,
) -> Element {
    let quiz_id = card.id;
    let id = quiz_id.value();
    let take = Route::TakeQuiz { id };
    rsx! {
        div { class: "quiz-card",
            h3 { "{card.title}" }
            p { class: "quiz-meta",
                span { "{card.questions_label}" }
                span { "{card.minutes_label}" }
            }
            div { class: "quiz-actions",
                Link { to: Route::QuizDetail { id }, "Details" }
                if logged_in {
                    Link { class: "btn", to: take, "Take Quiz" }
                    Link { to: Route::Leaderboard { quiz_id: id }, "Leaderboard" }
                } else {
                    Link { class: "btn", to: Route::login_returning_to(&take), "Login to Take" }
                }
                if is_admin {
                    Link { to: Route::QuizEdit { id }, "Edit" }
                    button {
                        class: "btn-danger",
                        onclick: move |_| on_delete.call(quiz_id),
                        "Delete"
                    }
                }
            }
        }
    }
}

#[component]
pub fn QuizNamesView() -> Element {
    let ctx = use_context::<AppContext>();
    let quizzes = ctx.quizzes();

    let resource = use_resource(move || {
        let quizzes = quizzes.clone();
        async move { quizzes.list_names().await.map_err(ViewError::from) }
    });
    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page",
            h2 { "Quiz Names" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(names) => rsx! {
                    if names.is_empty() {
                        p { "No quizzes available yet." }
                    } else {
                        ul { class: "quiz-names",
                            for name in names {
                                li { "{name}" }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
pub fn QuizDetailView(id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let status = use_auth_status().get();
    let quizzes = ctx.quizzes();

    let resource = use_resource(move || {
        let quizzes = quizzes.clone();
        async move {
            let quiz = quizzes
                .get_quiz(QuizId::new(id))
                .await
                .map_err(ViewError::from)?;
            Ok::<_, ViewError>(QuizDetailVm::from(&quiz))
        }
    });
    let state = view_state_from_resource(resource);
    let take = Route::TakeQuiz { id };

    rsx! {
        div { class: "page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(detail) => rsx! {
                    h2 { "{detail.title}" }
                    p { class: "quiz-meta",
                        span { "{detail.questions_label}" }
                        span { "{detail.minutes_label}" }
                    }
                    ol { class: "question-outline",
                        for (index, count) in detail.option_counts.iter().enumerate() {
                            li { key: "{index}", "{count} options" }
                        }
                    }
                    div { class: "quiz-actions",
                        if status.is_logged_in() {
                            Link { class: "btn", to: take.clone(), "Take Quiz" }
                            Link { to: Route::Leaderboard { quiz_id: id }, "Leaderboard" }
                        } else {
                            Link { class: "btn", to: Route::login_returning_to(&take), "Login to Take" }
                        }
                        if status.is_admin() {
                            Link { to: Route::QuizEdit { id }, "Edit" }
                        }
                        Link { to: Route::QuizList {}, "Back to quizzes" }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                    Link { to: Route::QuizList {}, "Back to quizzes" }
                },
            }
        }
    }
}
