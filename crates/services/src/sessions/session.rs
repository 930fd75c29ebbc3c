use std::collections::HashMap;

use quiz_core::model::{Answer, AttemptId, OptionId, Question, QuestionId, Quiz, Submission};

use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory take-session over one fetched quiz.
///
/// A bounds-checked cursor over the quiz's questions plus a partial map of chosen
/// options. Navigation never requires the current question to be answered; callers
/// that want that gate apply it themselves.
#[derive(Debug, Clone)]
pub struct QuizSession {
    quiz: Quiz,
    current: usize,
    answers: HashMap<QuestionId, OptionId>,
    attempt_id: Option<AttemptId>,
}

impl QuizSession {
    /// Start a session at the first question with no answers.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyQuiz` if the quiz has no questions.
    pub fn new(quiz: Quiz) -> Result<Self, SessionError> {
        if quiz.questions().is_empty() {
            return Err(SessionError::EmptyQuiz);
        }
        Ok(Self {
            quiz,
            current: 0,
            answers: HashMap::new(),
            attempt_id: None,
        })
    }

    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.quiz.question_count()
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.quiz.questions()[self.current]
    }

    /// Option chosen for `question_id`, if any.
    #[must_use]
    pub fn selected_option(&self, question_id: QuestionId) -> Option<OptionId> {
        self.answers.get(&question_id).copied()
    }

    /// Number of quiz questions with a recorded answer.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.quiz
            .questions()
            .iter()
            .filter(|question| self.answers.contains_key(&question.id()))
            .count()
    }

    /// Whether the question at `index` has an answer. Out-of-range indexes are unanswered.
    #[must_use]
    pub fn is_answered(&self, index: usize) -> bool {
        self.quiz
            .questions()
            .get(index)
            .is_some_and(|question| self.answers.contains_key(&question.id()))
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress::new(self.current, self.question_count(), self.answered_count())
    }

    /// Record `option_id` as the answer to the current question, replacing any earlier choice.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownOption` if the current question does not offer the option.
    pub fn select_option(&mut self, option_id: OptionId) -> Result<(), SessionError> {
        let question = self.current_question();
        if !question.has_option(option_id) {
            return Err(SessionError::UnknownOption { option: option_id });
        }
        let question_id = question.id();
        self.answers.insert(question_id, option_id);
        Ok(())
    }

    /// Move to the next question. Returns `false` at the last question.
    pub fn advance(&mut self) -> bool {
        if self.current + 1 >= self.question_count() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Move to the previous question. Returns `false` at the first question.
    pub fn retreat(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Jump to `index`. Returns `false` and stays put if it is out of range.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.question_count() {
            return false;
        }
        self.current = index;
        true
    }

    /// True once every question of the quiz has an answer.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.quiz
            .questions()
            .iter()
            .all(|question| self.answers.contains_key(&question.id()))
    }

    /// Build the submission, one answer per question in quiz order.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::IncompleteSubmission` if any question is unanswered.
    pub fn build_submission(&self) -> Result<Submission, SessionError> {
        let answers = self
            .quiz
            .questions()
            .iter()
            .map(|question| {
                self.answers
                    .get(&question.id())
                    .map(|option| Answer::new(question.id(), *option))
            })
            .collect::<Option<Vec<_>>>()
            .ok_or(SessionError::IncompleteSubmission {
                answered: self.answered_count(),
                total: self.question_count(),
            })?;
        Ok(Submission::new(self.quiz.id(), answers))
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.attempt_id.is_some()
    }

    pub(crate) fn mark_submitted(&mut self, attempt_id: AttemptId) {
        self.attempt_id = Some(attempt_id);
    }
}
