mod auth;
mod guard;
mod history;
mod leaderboard;
mod not_found;
mod quiz_editor;
mod quiz_list;
mod result;
mod state;
mod take;

pub use auth::{LoginView, RegisterView};
pub use guard::{RequireAdmin, RequireAuth};
pub use history::HistoryView;
pub use leaderboard::LeaderboardView;
pub use not_found::NotFoundView;
pub use quiz_editor::{QuizCreateView, QuizEditView};
pub use quiz_list::{QuizDetailView, QuizListView, QuizNamesView};
pub use result::ResultView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use take::TakeView;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
