use std::path::Path;

use dioxus::prelude::*;
use log::{info, warn};

use services::LeaderboardSnapshot;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{LeaderboardRowVm, map_leaderboard_rows};

const EXPORT_FILE: &str = "leaderboard.csv";

fn topic_filter(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

fn export_to(path: &Path, snapshot: &LeaderboardSnapshot, topic: Option<&str>) -> String {
    let csv = match snapshot.csv(topic) {
        Ok(csv) => csv,
        Err(err) => return err.to_string(),
    };
    match std::fs::write(path, csv) {
        Ok(()) => {
            info!("exported leaderboard to {}", path.display());
            format!("Exported to {}", path.display())
        }
        Err(err) => {
            warn!("leaderboard export to {} failed: {err}", path.display());
            "Could not write the export file.".to_string()
        }
    }
}

#[component]
pub fn LeaderboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let leaderboard = ctx.leaderboard();

    let mut filter = use_signal(String::new);
    let mut notice = use_signal(|| None::<String>);
    let mut confirm_clear = use_signal(|| false);

    let mut resource = {
        let leaderboard = leaderboard.clone();
        use_resource(move || {
            let leaderboard = leaderboard.clone();
            async move {
                leaderboard
                    .load()
                    .await
                    .map_err(|_| ViewError::LeaderboardUnavailable)
            }
        })
    };
    let state = view_state_from_resource(resource);

    let clear = use_callback(move |()| {
        confirm_clear.set(false);
        let leaderboard = leaderboard.clone();
        spawn(async move {
            match leaderboard.clear().await {
                Ok(()) => {
                    notice.set(None);
                    filter.set(String::new());
                    resource.restart();
                }
                Err(err) => notice.set(Some(err.to_string())),
            }
        });
    });

    rsx! {
        div { class: "page leaderboard-page",
            h2 { "Leaderboard" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| resource.restart(),
                        "Retry"
                    }
                },
                ViewState::Ready(snapshot) => {
                    let current = filter.read().clone();
                    let rows = map_leaderboard_rows(&snapshot.rows(topic_filter(&current)));
                    let topics = snapshot.topics().to_vec();
                    rsx! {
                        div { class: "leaderboard-controls",
                            label { r#for: "topic-filter", "Topic" }
                            select {
                                id: "topic-filter",
                                onchange: move |evt| filter.set(evt.value()),
                                option { value: "", selected: current.is_empty(), "All topics" }
                                for topic in topics {
                                    option {
                                        key: "{topic}",
                                        value: "{topic}",
                                        selected: topic == current,
                                        "{topic}"
                                    }
                                }
                            }
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                onclick: move |_| {
                                    let current = filter.peek().clone();
                                    let message = export_to(
                                        Path::new(EXPORT_FILE),
                                        &snapshot,
                                        topic_filter(&current),
                                    );
                                    notice.set(Some(message));
                                },
                                "Export CSV"
                            }
                            if confirm_clear() {
                                span { class: "confirm",
                                    "Clear all scores? "
                                    button {
                                        class: "btn btn-danger",
                                        r#type: "button",
                                        onclick: move |_| clear.call(()),
                                        "Yes, clear"
                                    }
                                    button {
                                        class: "btn btn-secondary",
                                        r#type: "button",
                                        onclick: move |_| confirm_clear.set(false),
                                        "Cancel"
                                    }
                                }
                            } else {
                                button {
                                    class: "btn btn-danger",
                                    r#type: "button",
                                    onclick: move |_| confirm_clear.set(true),
                                    "Clear Leaderboard"
                                }
                            }
                        }
                        if let Some(message) = notice() {
                            p { class: "notice", "{message}" }
                        }
                        LeaderboardTable { rows }
                    }
                }
            }
        }
    }
}

#[component]
pub(crate) fn LeaderboardTable(rows: Vec<LeaderboardRowVm>) -> Element {
    rsx! {
        table { class: "leaderboard-table",
            thead {
                tr {
                    th { "Rank" }
                    th { "User" }
                    th { "Score" }
                    th { "Topic" }
                    th { "Date" }
                }
            }
            tbody {
                if rows.is_empty() {
                    tr {
                        td { colspan: "5", "No scores found." }
                    }
                }
                for row in rows {
                    tr { key: "{row.rank}", class: row.class,
                        td { "{row.rank}" }
                        td { "{row.username}" }
                        td { "{row.score}" }
                        td { "{row.topic}" }
                        td { "{row.date}" }
                    }
                }
            }
        }
    }
}
