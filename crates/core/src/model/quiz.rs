use serde::{Deserialize, Serialize};

use crate::model::ids::{OptionId, QuestionId, QuizId};

//
// ─── TAKE-FLOW SHAPES ──────────────────────────────────────────────────────────
//

/// An answer option as shown while taking a quiz. Carries no correctness flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    #[serde(rename = "optionId")]
    id: OptionId,
    #[serde(rename = "optionText")]
    text: String,
}

impl QuizOption {
    #[must_use]
    pub fn new(id: OptionId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> OptionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "questionId")]
    id: QuestionId,
    #[serde(rename = "questionText")]
    text: String,
    #[serde(default)]
    options: Vec<QuizOption>,
}

impl Question {
    #[must_use]
    pub fn new(id: QuestionId, text: impl Into<String>, options: Vec<QuizOption>) -> Self {
        Self {
            id,
            text: text.into(),
            options,
        }
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[QuizOption] {
        &self.options
    }

    #[must_use]
    pub fn has_option(&self, option_id: OptionId) -> bool {
        self.options.iter().any(|option| option.id == option_id)
    }
}

/// A quiz as fetched for one take-session. Held read-only for the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    #[serde(rename = "quizId")]
    id: QuizId,
    #[serde(rename = "quizText")]
    title: String,
    #[serde(default)]
    questions: Vec<Question>,
}

impl Quiz {
    #[must_use]
    pub fn new(id: QuizId, title: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            id,
            title: title.into(),
            questions,
        }
    }

    #[must_use]
    pub fn id(&self) -> QuizId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

//
// ─── AUTHORING SHAPES ──────────────────────────────────────────────────────────
//

/// Option as returned to administrators, including the correctness flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthoringOption {
    pub option_id: OptionId,
    pub option_text: String,
    #[serde(default)]
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthoringQuestion {
    pub question_id: QuestionId,
    pub question_text: String,
    #[serde(default)]
    pub options: Vec<AuthoringOption>,
}

/// Quiz as loaded by the edit flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthoringQuiz {
    pub quiz_id: QuizId,
    pub quiz_text: String,
    #[serde(default)]
    pub questions: Vec<AuthoringQuestion>,
}

impl AuthoringQuiz {
    /// Strip correctness flags, producing the take-flow shape.
    #[must_use]
    pub fn to_quiz(&self) -> Quiz {
        let questions = self
            .questions
            .iter()
            .map(|question| {
                let options = question
                    .options
                    .iter()
                    .map(|option| QuizOption::new(option.option_id, option.option_text.clone()))
                    .collect();
                Question::new(question.question_id, question.question_text.clone(), options)
            })
            .collect();
        Quiz::new(self.quiz_id, self.quiz_text.clone(), questions)
    }

    #[must_use]
    pub fn correct_option(&self, question_id: QuestionId) -> Option<&AuthoringOption> {
        self.questions
            .iter()
            .find(|question| question.question_id == question_id)
            .and_then(|question| question.options.iter().find(|option| option.correct))
    }
}
