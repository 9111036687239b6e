use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{LeaderboardView, McqView, QuizView, UploadView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", QuizView)] Quiz {},
        #[route("/upload", UploadView)] Upload {},
        #[route("/mcq", McqView)] Mcq {},
        #[route("/leaderboard", LeaderboardView)] Leaderboard {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            nav { class: "topbar",
                h1 { "QUIZERA" }
                ul {
                    li { Link { to: Route::Quiz {}, "Play" } }
                    li { Link { to: Route::Upload {}, "Upload" } }
                    li { Link { to: Route::Mcq {}, "MCQ Sheet" } }
                    li { Link { to: Route::Leaderboard {}, "Leaderboard" } }
                }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
