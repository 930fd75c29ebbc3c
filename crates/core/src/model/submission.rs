use serde::{Deserialize, Serialize};

use crate::model::ids::{OptionId, QuestionId, QuizId};

/// The option chosen for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    question_id: QuestionId,
    selected_option_id: OptionId,
}

impl Answer {
    #[must_use]
    pub fn new(question_id: QuestionId, selected_option_id: OptionId) -> Self {
        Self {
            question_id,
            selected_option_id,
        }
    }

    #[must_use]
    pub fn question_id(&self) -> QuestionId {
        self.question_id
    }

    #[must_use]
    pub fn selected_option_id(&self) -> OptionId {
        self.selected_option_id
    }
}

/// Answers sent for grading. Built once at the end of a session and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    quiz_id: QuizId,
    answers: Vec<Answer>,
}

impl Submission {
    #[must_use]
    pub fn new(quiz_id: QuizId, answers: Vec<Answer>) -> Self {
        Self { quiz_id, answers }
    }

    #[must_use]
    pub fn quiz_id(&self) -> QuizId {
        self.quiz_id
    }

    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    #[must_use]
    pub fn answer_for(&self, question_id: QuestionId) -> Option<OptionId> {
        self.answers
            .iter()
            .find(|answer| answer.question_id == question_id)
            .map(Answer::selected_option_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_serializes_with_backend_field_names() {
        let submission = Submission::new(
            QuizId::new(5),
            vec![Answer::new(QuestionId::new(1), OptionId::new(2))],
        );
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "quizId": 5,
                "answers": [{ "questionId": 1, "selectedOptionId": 2 }]
            })
        );
    }
}
