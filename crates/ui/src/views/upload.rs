use std::path::Path;

use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use log::warn;

use services::UploadError;

use crate::context::AppContext;
use crate::routes::Route;

const PROCESSING_MESSAGE: &str = "Processing document and generating quiz...";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
enum UploadStatus {
    #[default]
    Idle,
    Processing,
    Ready(usize),
    Failed(String),
}

/// File name sent with the upload; `None` for a blank path or a bare directory.
fn file_name_of(path: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

fn ready_message(count: usize) -> String {
    match count {
        1 => "Generated 1 question from your document.".to_string(),
        n => format!("Generated {n} questions from your document."),
    }
}

#[component]
pub fn UploadView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let uploads = ctx.uploads();

    let mut path = use_signal(String::new);
    let mut status = use_signal(UploadStatus::default);

    let upload = use_callback(move |()| {
        let raw = path.peek().clone();
        let uploads = uploads.clone();
        status.set(UploadStatus::Processing);
        spawn(async move {
            let result = match file_name_of(&raw) {
                None => Err(UploadError::NoFile.to_string()),
                Some(name) => match tokio::fs::read(raw.trim()).await {
                    Ok(bytes) => uploads.upload(&name, bytes).await.map_err(|err| err.to_string()),
                    Err(err) => {
                        warn!("reading {raw:?} failed: {err}");
                        Err(format!("Could not read {name}: {err}"))
                    }
                },
            };
            status.set(match result {
                Ok(count) => UploadStatus::Ready(count),
                Err(message) => UploadStatus::Failed(message),
            });
        });
    });

    let play = use_callback(move |()| {
        ctx.request_from_upload();
        let _ = navigator.push(Route::Quiz {});
    });

    let current = status();
    let processing = current == UploadStatus::Processing;

    rsx! {
        div { class: "page upload-page",
            h2 { "Quiz from a document" }
            p { "Pick a PDF, DOCX or text file; the questions are generated from its content." }
            label { r#for: "document-path", "Document path" }
            input {
                id: "document-path",
                r#type: "text",
                placeholder: "/home/me/notes.pdf",
                value: "{path}",
                disabled: processing,
                oninput: move |evt| path.set(evt.value()),
            }
            button {
                class: "btn btn-primary",
                id: "upload-btn",
                r#type: "button",
                disabled: processing,
                onclick: move |_| upload.call(()),
                "Generate Quiz"
            }
            match current {
                UploadStatus::Idle => rsx! {},
                UploadStatus::Processing => rsx! {
                    p { class: "upload-status", "{PROCESSING_MESSAGE}" }
                },
                UploadStatus::Failed(message) => rsx! {
                    p { class: "upload-error", role: "alert", "{message}" }
                },
                UploadStatus::Ready(count) => rsx! {
                    p { class: "upload-status", "{ready_message(count)}" }
                    div { class: "upload-actions",
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| play.call(()),
                            "Play Quiz"
                        }
                        Link { class: "btn btn-secondary", to: Route::Mcq {}, "Open MCQ Sheet" }
                    }
                },
            }
        }
    }
}
