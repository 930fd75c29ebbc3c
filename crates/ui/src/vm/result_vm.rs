use quiz_core::model::{AttemptId, GradeBand, QuizResult};

use crate::vm::time_fmt::{format_attempt_date, format_percentage};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionResultVm {
    pub number: usize,
    pub text: String,
    pub selected: String,
    pub correct: String,
    pub is_correct: bool,
    pub status_class: &'static str,
}

/// Graded attempt as shown on the result page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub attempt_id: AttemptId,
    pub title: String,
    pub headline: &'static str,
    pub band_class: &'static str,
    pub grade: String,
    pub score_label: String,
    pub percentage_label: String,
    pub correct_label: String,
    pub wrong_label: String,
    pub date_label: String,
    pub rows: Vec<QuestionResultVm>,
}

impl From<&QuizResult> for ResultVm {
    fn from(result: &QuizResult) -> Self {
        let band = result.band();
        let headline = match band {
            GradeBand::Excellent => "Excellent work!",
            GradeBand::Good => "Good job!",
            GradeBand::Average => "Not bad, keep going.",
            GradeBand::Poor => "Keep practicing.",
        };
        Self {
            attempt_id: result.attempt_id,
            title: result.quiz_title.clone(),
            headline,
            band_class: band.css_class(),
            grade: result.grade.clone(),
            score_label: format!("{} / {}", result.score, result.total_questions),
            percentage_label: format_percentage(result.percentage),
            correct_label: format!("{} correct", result.correct_answers),
            wrong_label: format!("{} wrong", result.wrong_answers),
            date_label: format_attempt_date(result.attempt_date),
            rows: result
                .question_results
                .iter()
                .enumerate()
                .map(|(index, row)| QuestionResultVm {
                    number: index + 1,
                    text: row.question_text.clone(),
                    selected: row.selected_answer.clone(),
                    correct: row.correct_answer.clone(),
                    is_correct: row.is_correct,
                    status_class: if row.is_correct { "correct" } else { "wrong" },
                })
                .collect(),
        }
    }
}
