use quiz_core::model::{Quiz, QuizId};

/// Minutes budgeted per question in estimates.
const MINUTES_PER_QUESTION: usize = 2;

/// Catalog card for one quiz.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizCardVm {
    pub id: QuizId,
    pub title: String,
    pub questions_label: String,
    pub minutes_label: String,
}

impl From<&Quiz> for QuizCardVm {
    fn from(quiz: &Quiz) -> Self {
        let count = quiz.question_count();
        Self {
            id: quiz.id(),
            title: quiz.title().to_string(),
            questions_label: questions_label(count),
            minutes_label: format!("~{} min", count * MINUTES_PER_QUESTION),
        }
    }
}

#[must_use]
pub fn map_quiz_cards(quizzes: &[Quiz]) -> Vec<QuizCardVm> {
    quizzes.iter().map(QuizCardVm::from).collect()
}

/// Quiz detail page; question text is not shown before taking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizDetailVm {
    pub id: QuizId,
    pub title: String,
    pub questions_label: String,
    pub minutes_label: String,
    pub option_counts: Vec<usize>,
}

impl From<&Quiz> for QuizDetailVm {
    fn from(quiz: &Quiz) -> Self {
        let card = QuizCardVm::from(quiz);
        Self {
            id: card.id,
            title: card.title,
            questions_label: card.questions_label,
            minutes_label: card.minutes_label,
            option_counts: quiz
                .questions()
                .iter()
                .map(|question| question.options().len())
                .collect(),
        }
    }
}

fn questions_label(count: usize) -> String {
    if count == 1 {
        "1 Question".to_string()
    } else {
        format!("{count} Questions")
    }
}
