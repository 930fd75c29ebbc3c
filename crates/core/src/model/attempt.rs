use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::grade::GradeBand;
use crate::model::ids::{AttemptId, QuestionId};

/// Per-question grading detail returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question_id: QuestionId,
    pub question_text: String,
    pub selected_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// A graded attempt. Produced by the external grader; the client only displays it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub attempt_id: AttemptId,
    pub username: String,
    #[serde(rename = "quizText")]
    pub quiz_title: String,
    pub score: u32,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub wrong_answers: u32,
    pub percentage: f64,
    pub grade: String,
    pub attempt_date: NaiveDateTime,
    #[serde(default)]
    pub question_results: Vec<QuestionResult>,
}

impl QuizResult {
    #[must_use]
    pub fn band(&self) -> GradeBand {
        GradeBand::from_percentage(self.percentage)
    }

    /// Condensed row used by history and leaderboard listings.
    #[must_use]
    pub fn summary(&self) -> AttemptSummary {
        AttemptSummary {
            attempt_id: self.attempt_id,
            username: self.username.clone(),
            quiz_title: self.quiz_title.clone(),
            score: self.score,
            total_questions: self.total_questions,
            percentage: self.percentage,
            grade: self.grade.clone(),
            attempt_date: self.attempt_date,
        }
    }
}

/// One row of attempt history or of a quiz leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptSummary {
    pub attempt_id: AttemptId,
    pub username: String,
    #[serde(rename = "quizText")]
    pub quiz_title: String,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: f64,
    pub grade: String,
    pub attempt_date: NaiveDateTime,
}

impl AttemptSummary {
    #[must_use]
    pub fn band(&self) -> GradeBand {
        GradeBand::from_letter(&self.grade)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_decodes_backend_payload() {
        let json = r#"{
            "attemptId": 12,
            "username": "ana",
            "quizText": "Rust basics",
            "score": 2,
            "totalQuestions": 3,
            "correctAnswers": 2,
            "wrongAnswers": 1,
            "percentage": 66.67,
            "grade": "C",
            "attemptDate": "2024-05-01T09:30:15.123",
            "questionResults": [{
                "questionId": 1,
                "questionText": "Q1",
                "selectedAnswer": "let",
                "correctAnswer": "let",
                "isCorrect": true
            }]
        }"#;

        let result: QuizResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.attempt_id, AttemptId::new(12));
        assert_eq!(result.quiz_title, "Rust basics");
        assert_eq!(result.question_results.len(), 1);
        assert!(result.question_results[0].is_correct);
        assert_eq!(result.band(), GradeBand::Good);

        let summary = result.summary();
        assert_eq!(summary.attempt_id, result.attempt_id);
        assert_eq!(summary.band(), GradeBand::Average);
    }
}
