use dioxus::prelude::*;
use dioxus_router::Link;
use quiz_core::model::AttemptId;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::guard::RequireAuth;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuestionResultVm, ResultVm};

#[component]
pub fn ResultView(attempt_id: u64) -> Element {
    rsx! {
        RequireAuth { return_to: Route::AttemptResult { attempt_id },
            ResultScreen { attempt_id }
        }
    }
}

#[component]
fn ResultScreen(attempt_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let attempts = ctx.attempts();

    let resource = use_resource(move || {
        let attempts = attempts.clone();
        async move {
            let result = attempts
                .details(AttemptId::new(attempt_id))
                .await
                .map_err(ViewError::from)?;
            Ok::<_, ViewError>(ResultVm::from(&result))
        }
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(result) => rsx! {
                    ResultDetails { result }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
            div { class: "result-actions",
                Link { to: Route::QuizList {}, "Back to quizzes" }
                Link { to: Route::History {}, "My attempts" }
            }
        }
    }
}

#[component]
fn ResultDetails(result: ResultVm) -> Element {
    rsx! {
        section { class: "result-summary {result.band_class}",
            h2 { "{result.title}" }
            p { class: "headline", "{result.headline}" }
            p { class: "grade", "Grade: {result.grade}" }
            p { "Score: {result.score_label} ({result.percentage_label})" }
            p { "{result.correct_label} · {result.wrong_label}" }
            p { class: "muted", "{result.date_label}" }
        }
        ol { class: "question-results",
            for row in result.rows {
                QuestionRow { key: "{row.number}", row }
            }
        }
    }
}

#[component]
fn QuestionRow(row: QuestionResultVm) -> Element {
    rsx! {
        li { class: "question-result {row.status_class}",
            p { class: "question-text", "{row.number}. {row.text}" }
            p { "Your answer: {row.selected}" }
            if !row.is_correct {
                p { "Correct answer: {row.correct}" }
            }
        }
    }
}
