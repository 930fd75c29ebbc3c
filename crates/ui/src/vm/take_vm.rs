use quiz_core::model::{OptionId, QuizId, QuizResult};
use services::{QuizSession, SessionError, SessionLoopService};

use crate::views::ViewError;

/// One selectable option of the current question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub id: OptionId,
    pub text: String,
    pub selected: bool,
}

/// Entry of the question picker strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickerItemVm {
    pub index: usize,
    pub number: usize,
    pub answered: bool,
    pub current: bool,
}

/// Take-screen state: the session plus the in-flight submit flag.
///
/// Forward navigation is gated on the current question being answered; the
/// picker and back button are not.
#[derive(Clone, Debug)]
pub struct TakeVm {
    session: QuizSession,
    is_submitting: bool,
}

impl TakeVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self {
            session,
            is_submitting: false,
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.session.quiz().title()
    }

    #[must_use]
    pub fn question_text(&self) -> &str {
        self.session.current_question().text()
    }

    #[must_use]
    pub fn options(&self) -> Vec<OptionVm> {
        let question = self.session.current_question();
        let selected = self.session.selected_option(question.id());
        question
            .options()
            .iter()
            .map(|option| OptionVm {
                id: option.id(),
                text: option.text().to_string(),
                selected: selected == Some(option.id()),
            })
            .collect()
    }

    #[must_use]
    pub fn picker(&self) -> Vec<PickerItemVm> {
        let current = self.session.current_index();
        (0..self.session.question_count())
            .map(|index| PickerItemVm {
                index,
                number: index + 1,
                answered: self.session.is_answered(index),
                current: index == current,
            })
            .collect()
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        let progress = self.session.progress();
        format!("Question {} of {}", progress.position, progress.total)
    }

    #[must_use]
    pub fn answered_label(&self) -> String {
        let progress = self.session.progress();
        format!("{} of {} answered", progress.answered, progress.total)
    }

    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        self.session.progress().percent()
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.session.progress().is_last()
    }

    #[must_use]
    pub fn can_retreat(&self) -> bool {
        !self.is_submitting && self.session.current_index() > 0
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        !self.is_submitting
            && !self.is_last()
            && self.session.is_answered(self.session.current_index())
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.session.is_complete() && !self.is_submitting && !self.session.is_submitted()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Ignored while a submit is in flight.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Unknown` if the option is not on the current question.
    pub fn select(&mut self, option: OptionId) -> Result<(), ViewError> {
        if self.is_submitting {
            return Ok(());
        }
        self.session.select_option(option).map_err(ViewError::from)
    }

    pub fn next(&mut self) -> bool {
        self.can_advance() && self.session.advance()
    }

    pub fn previous(&mut self) -> bool {
        self.can_retreat() && self.session.retreat()
    }

    pub fn jump(&mut self, index: usize) -> bool {
        !self.is_submitting && self.session.jump_to(index)
    }

    /// Flag the submit as in flight and hand out a copy of the session to send.
    ///
    /// Returns `None` while a submit is running or the session is incomplete.
    pub fn begin_submit(&mut self) -> Option<QuizSession> {
        if !self.can_submit() {
            return None;
        }
        self.is_submitting = true;
        Some(self.session.clone())
    }

    /// Put back the session returned by `submit_session` and clear the flag.
    pub fn finish_submit(&mut self, session: QuizSession) {
        self.session = session;
        self.is_submitting = false;
    }
}

/// # Errors
///
/// Returns the mapped view error if the quiz cannot be fetched or has no questions.
pub async fn start_take(
    session_loop: &SessionLoopService,
    quiz_id: QuizId,
) -> Result<TakeVm, ViewError> {
    session_loop
        .start_session(quiz_id)
        .await
        .map(TakeVm::new)
        .map_err(ViewError::from)
}

/// Submit `session`, returning it alongside the outcome so the caller can put it back.
pub async fn submit_session(
    session_loop: &SessionLoopService,
    mut session: QuizSession,
) -> (QuizSession, Result<QuizResult, ViewError>) {
    let result = session_loop.submit(&mut session).await;
    if let Err(SessionError::IncompleteSubmission { answered, total }) = &result {
        log::debug!("submit blocked: {answered} of {total} answered");
    }
    (session, result.map_err(ViewError::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Question, QuestionId, Quiz, QuizOption};

    fn vm() -> TakeVm {
        let question = |id: u64| {
            Question::new(
                QuestionId::new(id),
                format!("Question {id}?"),
                vec![
                    QuizOption::new(OptionId::new(id * 10 + 1), "yes"),
                    QuizOption::new(OptionId::new(id * 10 + 2), "no"),
                ],
            )
        };
        let quiz = Quiz::new(QuizId::new(1), "Sample", vec![question(1), question(2)]);
        TakeVm::new(QuizSession::new(quiz).unwrap())
    }

    #[test]
    fn next_waits_for_an_answer() {
        let mut vm = vm();
        assert!(!vm.can_advance());
        assert!(!vm.next());
        assert_eq!(vm.session().current_index(), 0);

        vm.select(OptionId::new(12)).unwrap();
        assert!(vm.can_advance());
        assert!(vm.next());
        assert_eq!(vm.progress_label(), "Question 2 of 2");
        assert!(vm.is_last());
        assert!(!vm.can_advance());
    }

    #[test]
    fn picker_and_options_reflect_selection() {
        let mut vm = vm();
        vm.select(OptionId::new(11)).unwrap();
        let options = vm.options();
        assert!(options[0].selected);
        assert!(!options[1].selected);

        assert!(vm.jump(1));
        let picker = vm.picker();
        assert!(picker[0].answered && !picker[0].current);
        assert!(!picker[1].answered && picker[1].current);
        assert_eq!(vm.answered_label(), "1 of 2 answered");
        assert!(vm.can_retreat());
    }

    #[test]
    fn foreign_option_is_rejected() {
        let mut vm = vm();
        assert_eq!(vm.select(OptionId::new(21)), Err(ViewError::Unknown));
    }

    #[test]
    fn begin_submit_only_once_complete_and_idle() {
        let mut vm = vm();
        vm.select(OptionId::new(11)).unwrap();
        assert!(vm.begin_submit().is_none());

        vm.next();
        vm.select(OptionId::new(21)).unwrap();
        let session = vm.begin_submit().unwrap();
        assert!(vm.is_submitting());
        assert!(!vm.can_submit());
        assert!(vm.begin_submit().is_none());

        vm.finish_submit(session);
        assert!(!vm.is_submitting());
        assert!(vm.can_submit());
    }

    #[test]
    fn answers_and_position_hold_while_submitting() {
        let mut vm = vm();
        vm.select(OptionId::new(11)).unwrap();
        vm.next();
        vm.select(OptionId::new(21)).unwrap();
        let session = vm.begin_submit().unwrap();

        vm.select(OptionId::new(22)).unwrap();
        assert!(!vm.previous());
        assert!(!vm.jump(0));
        assert_eq!(vm.session().current_index(), 1);
        assert_eq!(
            vm.session().selected_option(QuestionId::new(2)),
            Some(OptionId::new(21))
        );

        // A failed submit hands the session back unchanged.
        vm.finish_submit(session);
        assert_eq!(
            vm.session().selected_option(QuestionId::new(2)),
            Some(OptionId::new(21))
        );
        assert!(vm.jump(0));
    }
}
