use quiz_core::model::{AttemptId, AttemptSummary};

use crate::vm::time_fmt::{format_attempt_date, format_percentage};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptCardVm {
    pub id: AttemptId,
    pub title: String,
    pub grade: String,
    pub grade_class: &'static str,
    pub score_label: String,
    pub percentage_label: String,
    pub date_label: String,
}

impl From<&AttemptSummary> for AttemptCardVm {
    fn from(summary: &AttemptSummary) -> Self {
        Self {
            id: summary.attempt_id,
            title: summary.quiz_title.clone(),
            grade: summary.grade.clone(),
            grade_class: summary.band().css_class(),
            score_label: format!("{} / {}", summary.score, summary.total_questions),
            percentage_label: format_percentage(summary.percentage),
            date_label: format_attempt_date(summary.attempt_date),
        }
    }
}

#[must_use]
pub fn map_attempt_cards(attempts: &[AttemptSummary]) -> Vec<AttemptCardVm> {
    attempts.iter().map(AttemptCardVm::from).collect()
}
