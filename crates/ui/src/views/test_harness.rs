use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{
    AppServices, InMemoryBackend, LeaderboardService, QuizSessionService, UploadService,
};
use quizera_core::time::fixed_clock;

use crate::context::{UiApp, build_app_context};
use crate::views::{LeaderboardView, McqView, QuizView, UploadView};

#[derive(Clone)]
struct TestApp {
    from_upload: bool,
    services: AppServices,
}

impl UiApp for TestApp {
    fn from_upload(&self) -> bool {
        self.from_upload
    }

    fn quiz_sessions(&self) -> Arc<QuizSessionService> {
        self.services.quiz_sessions()
    }

    fn leaderboard(&self) -> Arc<LeaderboardService> {
        self.services.leaderboard()
    }

    fn uploads(&self) -> Arc<UploadService> {
        self.services.uploads()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Quiz,
    Leaderboard,
    Mcq,
    Upload,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
    #[route("/upload")]
    Upload {},
    #[route("/mcq")]
    Mcq {},
    #[route("/leaderboard")]
    Leaderboard {},
}

#[component]
fn Root() -> Element {
    match use_context::<ViewKind>() {
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::Leaderboard => rsx! { LeaderboardView {} },
        ViewKind::Mcq => rsx! { McqView {} },
        ViewKind::Upload => rsx! { UploadView {} },
    }
}

#[component]
fn Upload() -> Element {
    rsx! { UploadView {} }
}

#[component]
fn Mcq() -> Element {
    rsx! { McqView {} }
}

#[component]
fn Leaderboard() -> Element {
    rsx! { LeaderboardView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub backend: InMemoryBackend,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Keep driving until the rendered html contains `needle` or `limit` passes.
    pub async fn drive_until(&mut self, needle: &str, limit: std::time::Duration) -> String {
        let deadline = tokio::time::Instant::now() + limit;
        loop {
            self.drive_async().await;
            let html = self.render();
            if html.contains(needle) || tokio::time::Instant::now() >= deadline {
                return html;
            }
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, backend: InMemoryBackend, from_upload: bool) -> ViewHarness {
    let app = Arc::new(TestApp {
        from_upload,
        services: AppServices::in_memory(&backend, fixed_clock()),
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom, backend }
}
