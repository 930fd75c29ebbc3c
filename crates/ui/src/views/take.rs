use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use quiz_core::model::{OptionId, QuizId};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::guard::RequireAuth;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{OptionVm, PickerItemVm, TakeVm, start_take, submit_session};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TakeIntent {
    Select(OptionId),
    Next,
    Previous,
    Jump(usize),
    Submit,
}

/// Snapshot of the take screen for one render.
#[derive(Clone, Debug, PartialEq, Eq)]
struct TakeFrame {
    title: String,
    question: String,
    options: Vec<OptionVm>,
    picker: Vec<PickerItemVm>,
    progress_label: String,
    answered_label: String,
    percent: u8,
    can_retreat: bool,
    can_advance: bool,
    is_last: bool,
    can_submit: bool,
    is_submitting: bool,
}

impl From<&TakeVm> for TakeFrame {
    fn from(vm: &TakeVm) -> Self {
        Self {
            title: vm.title().to_string(),
            question: vm.question_text().to_string(),
            options: vm.options(),
            picker: vm.picker(),
            progress_label: vm.progress_label(),
            answered_label: vm.answered_label(),
            percent: vm.progress_percent(),
            can_retreat: vm.can_retreat(),
            can_advance: vm.can_advance(),
            is_last: vm.is_last(),
            can_submit: vm.can_submit(),
            is_submitting: vm.is_submitting(),
        }
    }
}

#[component]
pub fn TakeView(id: u64) -> Element {
    rsx! {
        RequireAuth { return_to: Route::TakeQuiz { id },
            TakeScreen { id }
        }
    }
}

#[component]
fn TakeScreen(id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let session_loop = ctx.session_loop();
    let navigator = use_navigator();
    let error = use_signal(|| None::<ViewError>);
    let vm = use_signal(|| None::<TakeVm>);

    let session_loop_for_resource = session_loop.clone();
    let resource = use_resource(move || {
        let session_loop = session_loop_for_resource.clone();
        let mut error = error;
        let mut vm = vm;

        async move {
            let started = start_take(&session_loop, QuizId::new(id)).await?;
            vm.set(Some(started));
            error.set(None);
            Ok::<_, ViewError>(())
        }
    });

    let state = view_state_from_resource(resource);

    let dispatch_intent = {
        let session_loop = session_loop.clone();
        use_callback(move |intent: TakeIntent| {
            let mut error = error;
            let mut vm = vm;

            match intent {
                TakeIntent::Select(option) => {
                    let selected = vm.write().as_mut().map(|vm| vm.select(option));
                    if let Some(Err(err)) = selected {
                        error.set(Some(err));
                    }
                }
                TakeIntent::Next => {
                    if let Some(vm) = vm.write().as_mut() {
                        vm.next();
                    }
                }
                TakeIntent::Previous => {
                    if let Some(vm) = vm.write().as_mut() {
                        vm.previous();
                    }
                }
                TakeIntent::Jump(index) => {
                    if let Some(vm) = vm.write().as_mut() {
                        vm.jump(index);
                    }
                }
                TakeIntent::Submit => {
                    let Some(session) = vm.write().as_mut().and_then(TakeVm::begin_submit) else {
                        return;
                    };
                    let session_loop = session_loop.clone();
                    spawn(async move {
                        let (session, result) = submit_session(&session_loop, session).await;

                        // Put the session back so a failed submit can be retried.
                        if let Some(vm) = vm.write().as_mut() {
                            vm.finish_submit(session);
                        }

                        match result {
                            Ok(result) => {
                                error.set(None);
                                navigator.push(Route::AttemptResult {
                                    attempt_id: result.attempt_id.value(),
                                });
                            }
                            Err(err) => error.set(Some(err)),
                        }
                    });
                }
            }
        })
    };

    let frame = vm.read().as_ref().map(TakeFrame::from);

    rsx! {
        div { class: "page take",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                    Link { to: Route::QuizList {}, "Back to quizzes" }
                },
                ViewState::Ready(()) => match frame {
                    None => rsx! {
                        p { "Loading..." }
                    },
                    Some(frame) => rsx! {
                        TakeBody {
                            frame,
                            on_intent: move |intent| dispatch_intent.call(intent),
                        }
                    },
                },
            }
            if let Some(err) = error() {
                p { class: "error", "{err.message()}" }
            }
        }
    }
}

#[component]
fn TakeBody(frame: TakeFrame, on_intent: EventHandler<TakeIntent>) -> Element {
    let submit_label = if frame.is_submitting {
        "Submitting..."
    } else {
        "Submit Quiz"
    };
    rsx! {
        header { class: "take-header",
            h2 { "{frame.title}" }
            p { class: "take-progress", "{frame.progress_label}" }
            div { class: "progress-track",
                div { class: "progress-fill", style: "width: {frame.percent}%" }
            }
        }

        section { class: "question",
            h3 { "{frame.question}" }
            ul { class: "options",
                for option in frame.options {
                    li { key: "{option.id}",
                        button {
                            class: if option.selected { "option selected" } else { "option" },
                            disabled: frame.is_submitting,
                            onclick: move |_| on_intent.call(TakeIntent::Select(option.id)),
                            "{option.text}"
                        }
                    }
                }
            }
        }

        nav { class: "take-nav",
            button {
                disabled: !frame.can_retreat,
                onclick: move |_| on_intent.call(TakeIntent::Previous),
                "Previous"
            }
            if frame.is_last {
                button {
                    class: "btn-primary",
                    disabled: !frame.can_submit,
                    onclick: move |_| on_intent.call(TakeIntent::Submit),
                    "{submit_label}"
                }
            } else {
                button {
                    class: "btn-primary",
                    disabled: !frame.can_advance,
                    onclick: move |_| on_intent.call(TakeIntent::Next),
                    "Next"
                }
            }
        }

        div { class: "picker",
            p { "{frame.answered_label}" }
            for item in frame.picker {
                button {
                    key: "{item.index}",
                    class: picker_class(item),
                    disabled: frame.is_submitting,
                    onclick: move |_| on_intent.call(TakeIntent::Jump(item.index)),
                    "{item.number}"
                }
            }
        }
    }
}

fn picker_class(item: PickerItemVm) -> &'static str {
    match (item.current, item.answered) {
        (true, true) => "current answered",
        (true, false) => "current",
        (false, true) => "answered",
        (false, false) => "",
    }
}
