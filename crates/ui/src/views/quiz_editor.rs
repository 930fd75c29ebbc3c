use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use quiz_core::model::{MIN_OPTIONS, QuestionDraft, QuizDraft, QuizId};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::guard::RequireAdmin;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{EditorIntent, EditorMode, apply_intent, save_draft};

#[component]
pub fn QuizCreateView() -> Element {
    rsx! {
        RequireAdmin {
            QuizEditorScreen { mode: EditorMode::Create }
        }
    }
}

#[component]
pub fn QuizEditView(id: u64) -> Element {
    rsx! {
        RequireAdmin {
            QuizEditorScreen { mode: EditorMode::Edit(QuizId::new(id)) }
        }
    }
}

#[component]
fn QuizEditorScreen(mode: EditorMode) -> Element {
    let ctx = use_context::<AppContext>();
    let quizzes = ctx.quizzes();
    let navigator = use_navigator();
    let draft = use_signal(|| None::<QuizDraft>);
    let error = use_signal(|| None::<String>);
    let saving = use_signal(|| false);

    let quizzes_for_resource = quizzes.clone();
    let resource = use_resource(move || {
        let quizzes = quizzes_for_resource.clone();
        let mut draft = draft;
        async move {
            let loaded = match mode {
                EditorMode::Create => QuizDraft::new(),
                EditorMode::Edit(id) => quizzes.load_draft(id).await.map_err(ViewError::from)?,
            };
            draft.set(Some(loaded));
            Ok::<_, ViewError>(())
        }
    });

    let state = view_state_from_resource(resource);

    let on_intent = use_callback(move |intent: EditorIntent| {
        let mut draft = draft;
        let mut error = error;
        let applied = draft.write().as_mut().map(|draft| apply_intent(draft, intent));
        match applied {
            Some(Err(err)) => error.set(Some(err.to_string())),
            Some(Ok(())) => error.set(None),
            None => {}
        }
    });

    let on_save = use_callback(move |()| {
        let mut error = error;
        let mut saving = saving;
        let Some(snapshot) = draft.read().clone() else {
            return;
        };
        if saving() {
            return;
        }
        saving.set(true);
        let quizzes = quizzes.clone();
        spawn(async move {
            let saved = save_draft(&quizzes, mode, &snapshot).await;
            saving.set(false);
            match saved {
                Ok(quiz) => {
                    error.set(None);
                    navigator.push(Route::QuizDetail {
                        id: quiz.id().value(),
                    });
                }
                Err(err) => error.set(Some(err.message())),
            }
        });
    });

    let current = draft.read().clone();
    let save_label = if saving() { "Saving..." } else { mode.save_label() };

    rsx! {
        div { class: "page editor",
            h2 { "{mode.heading()}" }
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
                ViewState::Ready(()) => match current {
                    None => rsx! {
                        p { "Loading..." }
                    },
                    Some(current) => rsx! {
                        form {
                            class: "editor-form",
                            onsubmit: move |evt| {
                                evt.prevent_default();
                                on_save.call(());
                            },
                            label { "Quiz title"
                                input {
                                    value: "{current.title}",
                                    placeholder: "e.g. Rust ownership",
                                    oninput: move |evt| on_intent.call(EditorIntent::SetTitle(evt.value())),
                                }
                            }
                            for (index, question) in current.questions.iter().enumerate() {
                                QuestionEditor {
                                    key: "{index}",
                                    index,
                                    total: current.questions.len(),
                                    question: question.clone(),
                                    on_intent: move |intent| on_intent.call(intent),
                                }
                            }
                            button {
                                r#type: "button",
                                onclick: move |_| on_intent.call(EditorIntent::AddQuestion),
                                "Add Question"
                            }
                            if let Some(message) = error() {
                                p { class: "error", "{message}" }
                            }
                            div { class: "editor-actions",
                                button { r#type: "submit", class: "btn-primary", disabled: saving(),
                                    "{save_label}"
                                }
                                Link { to: Route::QuizList {}, "Cancel" }
                            }
                        }
                    },
                },
            }
        }
    }
}

#[component]
fn QuestionEditor(
    index: usize,
    total: usize,
    question: QuestionDraft,
    on_intent: EventHandler<EditorIntent>,
) -> Element {
    let number = index + 1;
    let removable_options = question.options.len() > MIN_OPTIONS;
    rsx! {
        fieldset { class: "question-editor",
            legend { "Question {number}" }
            div { class: "question-tools",
                button {
                    r#type: "button",
                    disabled: index == 0,
                    onclick: move |_| on_intent.call(EditorIntent::MoveQuestionUp(index)),
                    "Up"
                }
                button {
                    r#type: "button",
                    disabled: index + 1 == total,
                    onclick: move |_| on_intent.call(EditorIntent::MoveQuestionDown(index)),
                    "Down"
                }
                button {
                    r#type: "button",
                    disabled: total <= 1,
                    onclick: move |_| on_intent.call(EditorIntent::RemoveQuestion(index)),
                    "Remove"
                }
            }
            textarea {
                value: "{question.text}",
                placeholder: "Question text",
                oninput: move |evt| on_intent.call(EditorIntent::SetQuestionText(index, evt.value())),
            }
            ul { class: "option-editors",
                for (option_index, option) in question.options.iter().enumerate() {
                    li { key: "{option_index}",
                        input {
                            r#type: "radio",
                            name: "correct-{index}",
                            checked: option.correct,
                            onchange: move |_| on_intent.call(EditorIntent::MarkCorrect(index, option_index)),
                        }
                        input {
                            value: "{option.text}",
                            placeholder: format!("Option {}", option_index + 1),
                            oninput: move |evt| {
                                on_intent.call(EditorIntent::SetOptionText(index, option_index, evt.value()));
                            },
                        }
                        if removable_options {
                            button {
                                r#type: "button",
                                onclick: move |_| on_intent.call(EditorIntent::RemoveOption(index, option_index)),
                                "×"
                            }
                        }
                    }
                }
            }
            button {
                r#type: "button",
                onclick: move |_| on_intent.call(EditorIntent::AddOption(index)),
                "Add Option"
            }
        }
    }
}
