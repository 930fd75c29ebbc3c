use dioxus::prelude::*;
use dioxus_router::Link;
use quiz_core::model::{Leaderboard, LeaderboardSort, QuizId};

use crate::context::{AppContext, use_auth_status};
use crate::routes::Route;
use crate::views::guard::RequireAuth;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{LeaderboardRowVm, LeaderboardStatsVm, map_leaderboard_rows, map_leaderboard_stats};

#[component]
pub fn LeaderboardView(quiz_id: u64) -> Element {
    rsx! {
        RequireAuth { return_to: Route::Leaderboard { quiz_id },
            LeaderboardScreen { quiz_id }
        }
    }
}

#[component]
fn LeaderboardScreen(quiz_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let attempts = ctx.attempts();
    let quizzes = ctx.quizzes();
    let viewer = use_auth_status().get().username().map(str::to_string);
    let board = use_signal(|| None::<Leaderboard>);

    let resource = use_resource(move || {
        let attempts = attempts.clone();
        let viewer = viewer.clone();
        let mut board = board;
        async move {
            let loaded = attempts
                .leaderboard(QuizId::new(quiz_id), viewer)
                .await
                .map_err(ViewError::from)?;
            board.set(Some(loaded));
            Ok::<_, ViewError>(())
        }
    });

    // The title is decoration; the board still renders without it.
    let quiz_title = use_resource(move || {
        let quizzes = quizzes.clone();
        async move {
            match quizzes.get_quiz(QuizId::new(quiz_id)).await {
                Ok(quiz) => Some(quiz.title().to_string()),
                Err(err) => {
                    log::warn!("no title for leaderboard of quiz {quiz_id}: {err}");
                    None
                }
            }
        }
    });
    let quiz_title = match &*quiz_title.read() {
        Some(Some(title)) => Some(title.clone()),
        _ => None,
    };

    let state = view_state_from_resource(resource);

    let on_sort = use_callback(move |sort: LeaderboardSort| {
        let mut board = board;
        if let Some(board) = board.write().as_mut() {
            board.sort_by(sort);
        }
    });
    let on_toggle_mine = use_callback(move |()| {
        let mut board = board;
        if let Some(board) = board.write().as_mut() {
            board.toggle_mine_only();
        }
    });

    let snapshot = board.read().as_ref().map(|board| {
        (
            map_leaderboard_rows(board),
            map_leaderboard_stats(board),
            board.sort(),
            board.mine_only(),
        )
    });

    rsx! {
        div { class: "page leaderboard",
            h2 { "Leaderboard" }
            if let Some(title) = quiz_title {
                p { class: "quiz-title", "{title}" }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
                ViewState::Ready(()) => match snapshot {
                    None => rsx! {
                        p { "Loading..." }
                    },
                    Some((rows, stats, sort, mine_only)) => rsx! {
                        StatsPanel { stats: stats.clone() }
                        div { class: "leaderboard-controls",
                            button {
                                class: if sort == LeaderboardSort::ByPercentage { "active" } else { "" },
                                onclick: move |_| on_sort.call(LeaderboardSort::ByPercentage),
                                "By score"
                            }
                            button {
                                class: if sort == LeaderboardSort::ByDate { "active" } else { "" },
                                onclick: move |_| on_sort.call(LeaderboardSort::ByDate),
                                "By date"
                            }
                            label { class: "checkbox",
                                input {
                                    r#type: "checkbox",
                                    checked: mine_only,
                                    onchange: move |_| on_toggle_mine.call(()),
                                }
                                "Only my attempts"
                            }
                        }
                        if stats.attempts == 0 {
                            p { "No attempts yet. Be the first!" }
                        } else if rows.is_empty() {
                            p { "You have not attempted this quiz yet." }
                        } else {
                            table { class: "leaderboard-table",
                                thead {
                                    tr {
                                        th { "Rank" }
                                        th { "User" }
                                        th { "Score" }
                                        th { "Percentage" }
                                        th { "Grade" }
                                        th { "Date" }
                                    }
                                }
                                tbody {
                                    for row in rows {
                                        LeaderboardRow { key: "{row.attempt_id}", row }
                                    }
                                }
                            }
                        }
                    },
                },
            }
            Link { to: Route::QuizDetail { id: quiz_id }, "Back to quiz" }
        }
    }
}

#[component]
fn StatsPanel(stats: LeaderboardStatsVm) -> Element {
    rsx! {
        div { class: "leaderboard-stats",
            div { class: "stat", span { "Attempts" } strong { "{stats.attempts}" } }
            div { class: "stat", span { "Average" } strong { "{stats.average}" } }
            div { class: "stat", span { "Top score" } strong { "{stats.top}" } }
            div { class: "stat", span { "Pass rate" } strong { "{stats.pass_rate}" } }
        }
    }
}

#[component]
fn LeaderboardRow(row: LeaderboardRowVm) -> Element {
    rsx! {
        tr { class: if row.is_me { "is-me" } else { "" },
            td { class: "rank {row.rank_class}", "{row.rank_label}" }
            td {
                "{row.username}"
                if row.is_me {
                    span { class: "you-badge", " (you)" }
                }
            }
            td { "{row.score_label}" }
            td { class: "{row.percentage_class}", "{row.percentage_label}" }
            td { class: "grade {row.grade_class}", "{row.grade}" }
            td { "{row.date_label}" }
        }
    }
}
