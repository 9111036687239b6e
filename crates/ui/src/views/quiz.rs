use std::time::Duration;

use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use log::{debug, warn};

use quizera_core::model::Difficulty;
use quizera_core::session::{QuizEvent, SessionState, StartRequest};

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::{GameOverVm, QuestionVm, QuizScreen, StartVm, render};
use super::ticker::run_countdown;

const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
enum SaveStatus {
    #[default]
    Idle,
    Saving,
    Failed(String),
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quiz_sessions = ctx.quiz_sessions();

    let mut session = use_signal(SessionState::new);
    let name = use_signal(String::new);
    let topic = use_signal(String::new);
    let difficulty = use_signal(Difficulty::default);
    let mut save_status = use_signal(SaveStatus::default);

    let dispatch = use_callback(move |event: QuizEvent| {
        if let Err(err) = session.write().apply(event) {
            debug!("quiz event ignored: {err}");
        }
    });

    let begin = {
        let quiz_sessions = quiz_sessions.clone();
        use_callback(move |request: StartRequest| {
            if let Err(err) = session.write().apply(QuizEvent::BeginGenerating) {
                debug!("start ignored: {err}");
                return;
            }
            save_status.set(SaveStatus::Idle);
            let quiz_sessions = quiz_sessions.clone();
            spawn(async move {
                let event = quiz_sessions.load_event(request).await;
                if let Err(err) = session.write().apply(event) {
                    warn!("quiz load result dropped: {err}");
                }
            });
        })
    };

    let start_from_topic = use_callback(move |()| {
        let request = StartRequest::topic(
            name.peek().as_str(),
            topic.peek().as_str(),
            *difficulty.peek(),
        );
        match request {
            Ok(request) => begin.call(request),
            Err(err) => dispatch.call(QuizEvent::InputRejected(err)),
        }
    });

    let from_upload = use_hook(|| ctx.take_from_upload());
    use_effect(move || {
        if from_upload {
            begin.call(StartRequest::upload(name.peek().as_str()));
        }
    });

    // One countdown per epoch; the memo only changes when a new countdown starts or stops.
    let running_epoch = use_memo(move || {
        let state = session.read();
        state.timer().is_running().then(|| state.timer().epoch())
    });
    use_effect(move || {
        let Some(epoch) = running_epoch() else {
            return;
        };
        spawn(run_countdown(
            TICK_PERIOD,
            epoch,
            move |epoch| {
                let state = session.peek();
                state.timer().is_running() && state.timer().epoch() == epoch
            },
            move |epoch| dispatch.call(QuizEvent::Tick(epoch)),
        ));
    });

    let save_score = {
        let quiz_sessions = quiz_sessions.clone();
        use_callback(move |()| {
            let submission = match quiz_sessions.submission(&session.peek(), name.peek().as_str()) {
                Ok(submission) => submission,
                Err(err) => {
                    save_status.set(SaveStatus::Failed(err.to_string()));
                    return;
                }
            };
            save_status.set(SaveStatus::Saving);
            let quiz_sessions = quiz_sessions.clone();
            spawn(async move {
                match quiz_sessions.submit(&submission).await {
                    Ok(()) => {
                        save_status.set(SaveStatus::Idle);
                        let _ = navigator.push(Route::Leaderboard {});
                    }
                    Err(err) => save_status.set(SaveStatus::Failed(err.to_string())),
                }
            });
        })
    };

    let screen = render(&session.read());

    rsx! {
        div { class: "page quiz-page",
            match screen {
                QuizScreen::Start(vm) => rsx! {
                    StartPanel {
                        vm,
                        name,
                        topic,
                        difficulty,
                        on_start: move |()| start_from_topic.call(()),
                    }
                },
                QuizScreen::Question(vm) => rsx! {
                    QuestionPanel { vm, on_event: move |event| dispatch.call(event) }
                },
                QuizScreen::GameOver(vm) => rsx! {
                    GameOverSummary { vm }
                    SaveScorePanel {
                        name,
                        status: save_status(),
                        on_save: move |()| save_score.call(()),
                    }
                    div { class: "game-over-actions",
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| {
                                save_status.set(SaveStatus::Idle);
                                dispatch.call(QuizEvent::PlayAgain);
                            },
                            "Play Again"
                        }
                        Link { class: "btn btn-secondary", to: Route::Leaderboard {}, "View Leaderboard" }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| {
                                let _ = eval("window.print();");
                            },
                            "Print PDF"
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn StartPanel(
    vm: StartVm,
    name: Signal<String>,
    topic: Signal<String>,
    difficulty: Signal<Difficulty>,
    on_start: EventHandler<()>,
) -> Element {
    let mut name = name;
    let mut topic = topic;
    let mut difficulty = difficulty;
    let selected = difficulty();

    rsx! {
        section { class: "start-screen",
            h2 { "Start a quiz" }
            label { r#for: "username-input", "Your name" }
            input {
                id: "username-input",
                r#type: "text",
                placeholder: "Name for the leaderboard",
                value: "{name}",
                disabled: vm.generating,
                oninput: move |evt| name.set(evt.value()),
            }
            label { r#for: "topic-input", "Topic" }
            input {
                id: "topic-input",
                r#type: "text",
                placeholder: "e.g. The French Revolution",
                value: "{topic}",
                disabled: vm.generating,
                oninput: move |evt| topic.set(evt.value()),
            }
            label { r#for: "difficulty-select", "Difficulty" }
            select {
                id: "difficulty-select",
                disabled: vm.generating,
                onchange: move |evt| {
                    if let Ok(value) = evt.value().parse::<Difficulty>() {
                        difficulty.set(value);
                    }
                },
                for level in Difficulty::ALL {
                    option {
                        key: "{level.as_str()}",
                        value: level.as_str(),
                        selected: level == selected,
                        "{level.label()}"
                    }
                }
            }
            button {
                class: "btn btn-primary",
                id: "start-btn",
                r#type: "button",
                disabled: vm.generating,
                onclick: move |_| on_start.call(()),
                "Start Quiz"
            }
            if let Some(message) = vm.message {
                p { class: "start-message", "{message}" }
            }
        }
    }
}

#[component]
fn QuestionPanel(vm: QuestionVm, on_event: EventHandler<QuizEvent>) -> Element {
    rsx! {
        section { class: "quiz-area",
            div { class: "quiz-header",
                span { class: "progress", "{vm.progress_label}" }
                if let Some(label) = vm.time_left_label {
                    span { class: "timer", "{label}" }
                }
            }
            h3 { class: "question-text", "{vm.prompt}" }
            div { class: "options",
                for option in vm.options {
                    button {
                        key: "{option.index}",
                        class: option.class(),
                        r#type: "button",
                        onclick: move |_| on_event.call(QuizEvent::Select(option.index)),
                        "{option.text}"
                    }
                }
            }
            if let Some(hint) = vm.hint_text {
                p { class: "hint-text", "{hint}" }
            }
            if let Some(streak) = vm.streak_text {
                p { class: "streak", "{streak}" }
            }
            div { class: "quiz-nav",
                if vm.show_back {
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| on_event.call(QuizEvent::Back),
                        "Back"
                    }
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: !vm.hint_enabled,
                    onclick: move |_| on_event.call(QuizEvent::Hint),
                    "Hint"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: !vm.next_enabled,
                    onclick: move |_| on_event.call(QuizEvent::Next),
                    "{vm.next_label}"
                }
            }
        }
    }
}

#[component]
pub(crate) fn GameOverSummary(vm: GameOverVm) -> Element {
    let all_correct = vm.all_correct();

    rsx! {
        section { class: "game-over",
            h2 { "Game Over!" }
            p { "Your Score: " b { "{vm.score_label}" } " ({vm.percent}%)" }
            p { "Max Streak: " b { "{vm.max_streak}" } }
            if all_correct {
                p { class: "all-correct", "Amazing! All answers correct!" }
            } else {
                div { class: "mistakes",
                    strong { "Review your mistakes:" }
                    ul {
                        for mistake in vm.mistakes {
                            li { key: "{mistake.number}",
                                p { b { "Q{mistake.number}: " } "{mistake.question}" }
                                p { b { "Your answer: " } "{mistake.your_answer}" }
                                p { b { "Correct answer: " } "{mistake.correct_answer}" }
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
}

#[component]
fn SaveScorePanel(name: Signal<String>, status: SaveStatus, on_save: EventHandler<()>) -> Element {
    let mut name = name;
    let saving = status == SaveStatus::Saving;
    let (label, error) = match &status {
        SaveStatus::Failed(message) => ("Try Again", Some(message.clone())),
        SaveStatus::Saving => ("Saving...", None),
        SaveStatus::Idle => ("Save Score", None),
    };

    rsx! {
        div { class: "save-score",
            input {
                r#type: "text",
                placeholder: "Your name",
                value: "{name}",
                disabled: saving,
                oninput: move |evt| name.set(evt.value()),
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: saving,
                onclick: move |_| on_save.call(()),
                "{label}"
            }
            if let Some(message) = error {
                p { class: "save-error", role: "alert", "{message}" }
            }
        }
    }
}
