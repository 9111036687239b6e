use std::time::Duration;

use dioxus::prelude::*;
use quizera_core::model::{LeaderboardEntry, Question};
use quizera_core::time::fixed_now;
use services::InMemoryBackend;

use super::mcq::McqResult;
use super::quiz::GameOverSummary;
use super::test_harness::{ViewKind, setup_view_harness};
use crate::vm::{GameOverVm, McqResultVm, MistakeVm};

fn entry(name: &str, score: u32, topic: &str) -> LeaderboardEntry {
    LeaderboardEntry {
        username: name.into(),
        score,
        topic: Some(topic.into()),
        timestamp: fixed_now(),
    }
}

fn question(text: &str, correct: usize) -> Question {
    Question::new(
        text,
        vec!["Mercury".into(), "Venus".into(), "Earth".into()],
        correct,
        Some(format!("{text} explained")),
    )
    .unwrap()
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_start_screen() {
    let mut harness = setup_view_harness(ViewKind::Quiz, InMemoryBackend::new(), false);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Start Quiz"), "missing start button in {html}");
    assert!(html.contains("Medium"), "missing difficulty in {html}");
    assert!(harness.backend.requests().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn leaderboard_view_smoke_renders_ranked_rows() {
    let backend = InMemoryBackend::new().with_entries(vec![
        entry("ann", 5, "Rust"),
        entry("bo", 3, "Go"),
    ]);
    let mut harness = setup_view_harness(ViewKind::Leaderboard, backend, false);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("ann"), "missing row in {html}");
    assert!(html.contains("top-score"), "missing rank style in {html}");
    assert!(html.contains("All topics"), "missing filter in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn leaderboard_view_smoke_renders_empty_message() {
    let mut harness = setup_view_harness(ViewKind::Leaderboard, InMemoryBackend::new(), false);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("No scores found."), "missing empty message in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_plays_pending_upload_quiz() {
    let backend = InMemoryBackend::new().with_pending(vec![
        question("Closest to the sun?", 0),
        question("Third planet?", 2),
    ]);
    let mut harness = setup_view_harness(ViewKind::Quiz, backend, true);
    harness.rebuild();
    let html = harness.drive_until("Question 1 of 2", Duration::from_secs(2)).await;
    assert!(html.contains("Question 1 of 2"), "upload quiz not started in {html}");
    assert!(html.contains("Closest to the sun?"), "missing prompt in {html}");
    assert!(html.contains("Time left: 20s"), "missing timer in {html}");
    assert!(harness.backend.requests().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_counts_down() {
    let backend = InMemoryBackend::new().with_pending(vec![question("Closest to the sun?", 0)]);
    let mut harness = setup_view_harness(ViewKind::Quiz, backend, true);
    harness.rebuild();
    let html = harness.drive_until("Time left: 19s", Duration::from_secs(5)).await;
    assert!(html.contains("Time left: 19s"), "countdown did not tick in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_without_pending_quiz_stays_on_start() {
    let mut harness = setup_view_harness(ViewKind::Quiz, InMemoryBackend::new(), true);
    harness.rebuild();
    let html = harness
        .drive_until("No quiz questions found from upload.", Duration::from_secs(2))
        .await;
    assert!(html.contains("No quiz questions found from upload."), "missing message in {html}");
    assert!(html.contains("Start Quiz"), "missing start button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn mcq_view_smoke_renders_lettered_sheet() {
    let backend = InMemoryBackend::new().with_pending(vec![
        question("Closest to the sun?", 0),
        question("Third planet?", 2),
    ]);
    let mut harness = setup_view_harness(ViewKind::Mcq, backend, false);
    harness.rebuild();
    let html = harness.drive_until("Q2: Third planet?", Duration::from_secs(2)).await;
    assert!(html.contains("Q1: Closest to the sun?"), "missing first question in {html}");
    assert!(html.contains("Q2: Third planet?"), "missing second question in {html}");
    assert!(html.contains("A. Mercury"), "missing lettered option in {html}");
    assert!(html.contains("C. Earth"), "missing lettered option in {html}");
    assert!(html.contains("Submit"), "missing submit in {html}");
    assert!(html.contains("Print"), "missing print in {html}");
    assert!(!html.contains("Explanation:"), "explanation shown before submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn mcq_view_smoke_without_upload_asks_for_document() {
    let mut harness = setup_view_harness(ViewKind::Mcq, InMemoryBackend::new(), false);
    harness.rebuild();
    let needle = "No quiz questions found. Please upload a document first.";
    let html = harness.drive_until(needle, Duration::from_secs(2)).await;
    assert!(html.contains(needle), "missing empty message in {html}");
    assert!(!html.contains("Submit"), "submit shown without questions in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn upload_view_smoke_renders_form() {
    let mut harness = setup_view_harness(ViewKind::Upload, InMemoryBackend::new(), false);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Generate Quiz"), "missing upload button in {html}");
    assert!(html.contains("document-path"), "missing path input in {html}");
    assert!(harness.backend.uploads().is_empty());
}

#[component]
fn ResultHarness() -> Element {
    let result = McqResultVm {
        score_label: "Score: 1 / 2 (50%)".into(),
        review: vec![MistakeVm {
            number: 2,
            question: "Third planet?".into(),
            your_answer: "Venus".into(),
            correct_answer: "Earth".into(),
            explanation: "Third planet? explained".into(),
        }],
    };
    rsx! { McqResult { result } }
}

#[test]
fn mcq_result_reviews_incorrect_answers() {
    let mut dom = VirtualDom::new(ResultHarness);
    dom.rebuild_in_place();
    let html = dioxus_ssr::render(&dom);
    assert!(html.contains("Score: 1 / 2 (50%)"), "missing score in {html}");
    assert!(html.contains("Review of Incorrect Answers"), "missing review in {html}");
    assert!(html.contains("Your answer: "), "missing your answer in {html}");
    assert!(html.contains("Correct answer: "), "missing correct answer in {html}");
    assert!(html.contains("Explanation: "), "missing explanation in {html}");
}

#[component]
fn SummaryHarness() -> Element {
    let vm = GameOverVm {
        score_label: "1 / 2".into(),
        percent: 50,
        max_streak: 1,
        mistakes: vec![MistakeVm {
            number: 2,
            question: "Capital of Norway?".into(),
            your_answer: "No answer".into(),
            correct_answer: "Oslo".into(),
            explanation: String::new(),
        }],
    };
    rsx! { GameOverSummary { vm } }
}

#[test]
fn game_over_summary_lists_mistakes() {
    let mut dom = VirtualDom::new(SummaryHarness);
    dom.rebuild_in_place();
    let html = dioxus_ssr::render(&dom);
    assert!(html.contains("Game Over!"), "missing title in {html}");
    assert!(html.contains("1 / 2"), "missing score in {html}");
    assert!(html.contains("No answer"), "missing answer in {html}");
    assert!(!html.contains("Explanation:"), "blank explanation rendered in {html}");
    assert!(!html.contains("All answers correct"), "wrong banner in {html}");
}
