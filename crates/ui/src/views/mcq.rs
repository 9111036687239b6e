use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::Link;
use log::debug;

use quizera_core::session::McqSheet;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{McqQuestionVm, McqResultVm, McqSheetVm, render_sheet};

/// The uploaded quiz as one printable sheet, graded on submit.
#[component]
pub fn McqView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_sessions = ctx.quiz_sessions();
    let mut sheet = use_signal(|| None::<McqSheet>);

    let resource = use_resource(move || {
        let quiz_sessions = quiz_sessions.clone();
        async move {
            let loaded = quiz_sessions
                .load_sheet()
                .await
                .map_err(|_| ViewError::NoPendingQuiz)?;
            sheet.set(Some(loaded));
            Ok::<(), ViewError>(())
        }
    });
    let state = view_state_from_resource(resource);

    let select = use_callback(move |(question, option): (usize, usize)| {
        if let Some(current) = sheet.write().as_mut() {
            if let Err(err) = current.select(question, option) {
                debug!("mcq selection ignored: {err}");
            }
        }
    });
    let submit = use_callback(move |()| {
        if let Some(current) = sheet.write().as_mut() {
            current.submit();
        }
    });

    let vm = sheet.read().as_ref().map(render_sheet);

    rsx! {
        div { class: "page mcq-page",
            h2 { "MCQ Sheet" }
            match (state, vm) {
                (ViewState::Ready(()), Some(vm)) => rsx! {
                    McqSheetForm {
                        vm,
                        on_select: move |pick| select.call(pick),
                        on_submit: move |()| submit.call(()),
                    }
                },
                (ViewState::Error(err), _) => rsx! {
                    p { class: "mcq-empty", "{err.message()}" }
                    Link { class: "btn btn-secondary", to: Route::Upload {}, "Upload a document" }
                },
                _ => rsx! {
                    p { "Loading..." }
                },
            }
        }
    }
}

#[component]
fn McqSheetForm(
    vm: McqSheetVm,
    on_select: EventHandler<(usize, usize)>,
    on_submit: EventHandler<()>,
) -> Element {
    let locked = vm.submitted;
    let questions = vm.questions;
    let result = vm.result;

    rsx! {
        form {
            class: "mcq-form",
            onsubmit: move |evt| {
                evt.prevent_default();
                on_submit.call(());
            },
            for question in questions {
                McqQuestion {
                    key: "{question.number}",
                    question,
                    locked,
                    on_select: move |pick| on_select.call(pick),
                }
            }
            div { class: "mcq-actions",
                button {
                    class: "btn btn-primary mcq-submit-btn",
                    r#type: "submit",
                    disabled: locked,
                    "Submit"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = eval("window.print();");
                    },
                    "Print"
                }
            }
        }
        if let Some(result) = result {
            McqResult { result }
        }
    }
}

#[component]
fn McqQuestion(question: McqQuestionVm, locked: bool, on_select: EventHandler<(usize, usize)>) -> Element {
    let group = format!("q{}", question.number);

    rsx! {
        div { class: "mcq-question",
            div { class: "mcq-prompt", "Q{question.number}: {question.prompt}" }
            div { class: "mcq-options",
                for option in question.options.iter().cloned() {
                    label { key: "{option.index}", class: option.class,
                        input {
                            r#type: "radio",
                            name: "{group}",
                            value: "{option.index}",
                            checked: option.checked,
                            disabled: locked,
                            onchange: move |_| on_select.call((option.question, option.index)),
                        }
                        " {option.label}"
                    }
                }
            }
            if let Some(explanation) = &question.explanation {
                div { class: "mcq-explanation", "Explanation: {explanation}" }
            }
        }
    }
}

#[component]
pub(crate) fn McqResult(result: McqResultVm) -> Element {
    rsx! {
        div { class: "mcq-result", "{result.score_label}" }
        if !result.review.is_empty() {
            div { class: "mcq-detailed-review",
                h3 { "Review of Incorrect Answers" }
                ol {
                    for mistake in result.review {
                        li { key: "{mistake.number}",
                            p { b { "Q{mistake.number}: " } "{mistake.question}" }
                            p { class: "your-answer", b { "Your answer: " } "{mistake.your_answer}" }
                            p { class: "correct-answer", b { "Correct answer: " } "{mistake.correct_answer}" }
                            if !mistake.explanation.is_empty() {
                                p { b { "Explanation: " } "{mistake.explanation}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
