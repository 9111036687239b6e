mod leaderboard_vm;
mod mcq_vm;
mod quiz_vm;

pub use leaderboard_vm::{LeaderboardRowVm, map_leaderboard_rows};
pub use mcq_vm::{McqOptionVm, McqQuestionVm, McqResultVm, McqSheetVm, render_sheet};
pub use quiz_vm::{
    GameOverVm, MistakeVm, OptionVm, QuestionVm, QuizScreen, StartVm, render,
};
