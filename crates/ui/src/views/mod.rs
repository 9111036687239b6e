mod leaderboard;
mod mcq;
mod quiz;
mod state;
mod ticker;
mod upload;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use leaderboard::LeaderboardView;
pub use mcq::McqView;
pub use quiz::QuizView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use upload::UploadView;
