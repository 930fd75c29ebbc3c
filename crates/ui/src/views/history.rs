use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::guard::RequireAuth;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{AttemptCardVm, map_attempt_cards};

#[derive(Clone, Debug, PartialEq)]
struct HistoryData {
    cards: Vec<AttemptCardVm>,
}

#[component]
pub fn HistoryView() -> Element {
    rsx! {
        RequireAuth { return_to: Route::History {},
            HistoryScreen {}
        }
    }
}

#[component]
fn HistoryScreen() -> Element {
    let ctx = use_context::<AppContext>();
    let attempts = ctx.attempts();

    let resource = use_resource(move || {
        let attempts = attempts.clone();
        async move {
            let items = attempts.history().await.map_err(ViewError::from)?;
            let cards = map_attempt_cards(&items);
            Ok(HistoryData { cards })
        }
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page",
            h2 { "My Attempts" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    if data.cards.is_empty() {
                        p { "No attempts yet. "
                            Link { to: Route::QuizList {}, "Take a quiz" }
                        }
                    } else {
                        div { class: "attempts-grid",
                            for card in data.cards {
                                AttemptCard { key: "{card.id}", card }
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
fn AttemptCard(card: AttemptCardVm) -> Element {
    rsx! {
        div { class: "attempt-card",
            h3 { "{card.title}" }
            span { class: "grade {card.grade_class}", "{card.grade}" }
            p { "Score: {card.score_label} ({card.percentage_label})" }
            p { class: "muted", "{card.date_label}" }
            Link {
                class: "attempt-link",
                to: Route::AttemptResult { attempt_id: card.id.value() },
                "View details"
            }
        }
    }
}
