mod auth_vm;
mod editor_vm;
mod history_vm;
mod leaderboard_vm;
mod quiz_list_vm;
mod result_vm;
mod take_vm;
mod time_fmt;

pub use auth_vm::{FormError, LoginForm, RegisterForm, login_destination};
pub use editor_vm::{EditorError, EditorIntent, EditorMode, apply_intent, save_draft};
pub use history_vm::{AttemptCardVm, map_attempt_cards};
pub use leaderboard_vm::{
    LeaderboardRowVm, LeaderboardStatsVm, map_leaderboard_rows, map_leaderboard_stats,
};
pub use quiz_list_vm::{QuizCardVm, QuizDetailVm, map_quiz_cards};
pub use result_vm::{QuestionResultVm, ResultVm};
pub use take_vm::{OptionVm, PickerItemVm, TakeVm, start_take, submit_session};
pub use time_fmt::{format_attempt_date, format_percentage};
