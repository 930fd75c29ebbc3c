use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{OptionId, QuestionId};
use crate::model::quiz::AuthoringQuiz;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Authoring validation failures. Question numbers are 1-based, as shown to the author.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DraftError {
    #[error("quiz title is required")]
    EmptyTitle,

    #[error("quiz must have at least one question")]
    NoQuestions,

    #[error("question {number} needs text")]
    EmptyQuestionText { number: usize },

    #[error("question {number} must have at least 2 options")]
    TooFewOptions { number: usize },

    #[error("question {number}, option {option} needs text")]
    EmptyOptionText { number: usize, option: usize },

    #[error("question {number} must have a correct answer marked")]
    NoCorrectOption { number: usize },

    #[error("quiz must keep at least one question")]
    LastQuestion,

    #[error("question must keep at least 2 options")]
    MinimumOptions,

    #[error("no question or option at that position")]
    OutOfRange,
}

/// Minimum number of options a question may have.
pub const MIN_OPTIONS: usize = 2;

/// Number of blank options a freshly added question starts with.
pub const DEFAULT_OPTIONS: usize = 4;

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionDraft {
    pub id: Option<OptionId>,
    pub text: String,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub id: Option<QuestionId>,
    pub text: String,
    pub options: Vec<OptionDraft>,
}

impl QuestionDraft {
    #[must_use]
    pub fn blank() -> Self {
        Self {
            id: None,
            text: String::new(),
            options: vec![OptionDraft::default(); DEFAULT_OPTIONS],
        }
    }
}

/// Editable quiz used by the admin create and edit forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizDraft {
    pub title: String,
    pub questions: Vec<QuestionDraft>,
}

impl Default for QuizDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizDraft {
    /// An empty draft with one blank question.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: String::new(),
            questions: vec![QuestionDraft::blank()],
        }
    }

    /// Rebuild a draft from a quiz loaded for editing, keeping backend ids.
    #[must_use]
    pub fn from_authoring(quiz: &AuthoringQuiz) -> Self {
        let questions = quiz
            .questions
            .iter()
            .map(|question| QuestionDraft {
                id: Some(question.question_id),
                text: question.question_text.clone(),
                options: question
                    .options
                    .iter()
                    .map(|option| OptionDraft {
                        id: Some(option.option_id),
                        text: option.option_text.clone(),
                        correct: option.correct,
                    })
                    .collect(),
            })
            .collect();
        Self {
            title: quiz.quiz_text.clone(),
            questions,
        }
    }

    pub fn add_question(&mut self) {
        self.questions.push(QuestionDraft::blank());
    }

    /// # Errors
    ///
    /// Returns `DraftError::LastQuestion` when removing would leave the quiz empty,
    /// `DraftError::OutOfRange` for a bad index.
    pub fn remove_question(&mut self, index: usize) -> Result<(), DraftError> {
        if index >= self.questions.len() {
            return Err(DraftError::OutOfRange);
        }
        if self.questions.len() <= 1 {
            return Err(DraftError::LastQuestion);
        }
        self.questions.remove(index);
        Ok(())
    }

    /// Returns false when the question is already first.
    pub fn move_question_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.questions.len() {
            return false;
        }
        self.questions.swap(index, index - 1);
        true
    }

    /// Returns false when the question is already last.
    pub fn move_question_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.questions.len() {
            return false;
        }
        self.questions.swap(index, index + 1);
        true
    }

    /// # Errors
    ///
    /// Returns `DraftError::OutOfRange` if the question does not exist.
    pub fn add_option(&mut self, question: usize) -> Result<(), DraftError> {
        let question = self
            .questions
            .get_mut(question)
            .ok_or(DraftError::OutOfRange)?;
        question.options.push(OptionDraft::default());
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `DraftError::MinimumOptions` when removal would leave fewer than
    /// two options, `DraftError::OutOfRange` for bad indexes.
    pub fn remove_option(&mut self, question: usize, option: usize) -> Result<(), DraftError> {
        let question = self
            .questions
            .get_mut(question)
            .ok_or(DraftError::OutOfRange)?;
        if option >= question.options.len() {
            return Err(DraftError::OutOfRange);
        }
        if question.options.len() <= MIN_OPTIONS {
            return Err(DraftError::MinimumOptions);
        }
        question.options.remove(option);
        Ok(())
    }

    /// Mark one option correct and clear the flag on its siblings.
    ///
    /// # Errors
    ///
    /// Returns `DraftError::OutOfRange` for bad indexes.
    pub fn mark_correct(&mut self, question: usize, option: usize) -> Result<(), DraftError> {
        let question = self
            .questions
            .get_mut(question)
            .ok_or(DraftError::OutOfRange)?;
        if option >= question.options.len() {
            return Err(DraftError::OutOfRange);
        }
        for (index, candidate) in question.options.iter_mut().enumerate() {
            candidate.correct = index == option;
        }
        Ok(())
    }

    /// Validate the draft and build the create/update request body.
    ///
    /// # Errors
    ///
    /// Returns the first `DraftError` found, in form order.
    pub fn validate(&self) -> Result<QuizPayload, DraftError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DraftError::EmptyTitle);
        }
        if self.questions.is_empty() {
            return Err(DraftError::NoQuestions);
        }

        let mut questions = Vec::with_capacity(self.questions.len());
        for (index, question) in self.questions.iter().enumerate() {
            let number = index + 1;
            let text = question.text.trim();
            if text.is_empty() {
                return Err(DraftError::EmptyQuestionText { number });
            }
            if question.options.len() < MIN_OPTIONS {
                return Err(DraftError::TooFewOptions { number });
            }

            let mut options = Vec::with_capacity(question.options.len());
            for (option_index, option) in question.options.iter().enumerate() {
                let option_text = option.text.trim();
                if option_text.is_empty() {
                    return Err(DraftError::EmptyOptionText {
                        number,
                        option: option_index + 1,
                    });
                }
                options.push(OptionPayload {
                    option_id: option.id,
                    option_text: option_text.to_string(),
                    correct: option.correct,
                });
            }
            if !options.iter().any(|option| option.correct) {
                return Err(DraftError::NoCorrectOption { number });
            }

            questions.push(QuestionPayload {
                question_id: question.id,
                question_text: text.to_string(),
                options,
            });
        }

        Ok(QuizPayload {
            quiz_text: title.to_string(),
            questions,
        })
    }
}

//
// ─── REQUEST PAYLOAD ───────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_id: Option<OptionId>,
    pub option_text: String,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<QuestionId>,
    pub question_text: String,
    pub options: Vec<OptionPayload>,
}

/// Validated body for quiz create and update requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizPayload {
    pub quiz_text: String,
    pub questions: Vec<QuestionPayload>,
}
