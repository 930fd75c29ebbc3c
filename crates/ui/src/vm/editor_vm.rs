use quiz_core::model::{DraftError, Quiz, QuizDraft, QuizId};
use services::{QuizService, QuizServiceError};

use crate::views::ViewError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(QuizId),
}

impl EditorMode {
    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            Self::Create => "Create New Quiz",
            Self::Edit(_) => "Edit Quiz",
        }
    }

    #[must_use]
    pub fn save_label(self) -> &'static str {
        match self {
            Self::Create => "Create Quiz",
            Self::Edit(_) => "Update Quiz",
        }
    }
}

/// Form actions on the authoring draft. Indexes are 0-based.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorIntent {
    SetTitle(String),
    AddQuestion,
    RemoveQuestion(usize),
    MoveQuestionUp(usize),
    MoveQuestionDown(usize),
    SetQuestionText(usize, String),
    AddOption(usize),
    RemoveOption(usize, usize),
    SetOptionText(usize, usize, String),
    MarkCorrect(usize, usize),
}

/// # Errors
///
/// Returns the `DraftError` raised by the draft; the draft is left unchanged.
pub fn apply_intent(draft: &mut QuizDraft, intent: EditorIntent) -> Result<(), DraftError> {
    match intent {
        EditorIntent::SetTitle(title) => draft.title = title,
        EditorIntent::AddQuestion => draft.add_question(),
        EditorIntent::RemoveQuestion(index) => draft.remove_question(index)?,
        EditorIntent::MoveQuestionUp(index) => {
            draft.move_question_up(index);
        }
        EditorIntent::MoveQuestionDown(index) => {
            draft.move_question_down(index);
        }
        EditorIntent::SetQuestionText(index, text) => {
            draft
                .questions
                .get_mut(index)
                .ok_or(DraftError::OutOfRange)?
                .text = text;
        }
        EditorIntent::AddOption(question) => draft.add_option(question)?,
        EditorIntent::RemoveOption(question, option) => draft.remove_option(question, option)?,
        EditorIntent::SetOptionText(question, option, text) => {
            draft
                .questions
                .get_mut(question)
                .and_then(|question| question.options.get_mut(option))
                .ok_or(DraftError::OutOfRange)?
                .text = text;
        }
        EditorIntent::MarkCorrect(question, option) => draft.mark_correct(question, option)?,
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorError {
    Invalid(DraftError),
    Failed(ViewError),
}

impl EditorError {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Invalid(err) => err.to_string(),
            Self::Failed(err) => err.message().to_string(),
        }
    }
}

impl From<QuizServiceError> for EditorError {
    fn from(err: QuizServiceError) -> Self {
        match err {
            QuizServiceError::Draft(draft) => Self::Invalid(draft),
            other => Self::Failed(ViewError::from(other)),
        }
    }
}

/// Create or update depending on `mode`.
///
/// # Errors
///
/// Returns `EditorError::Invalid` before any request if the draft fails validation.
pub async fn save_draft(
    service: &QuizService,
    mode: EditorMode,
    draft: &QuizDraft,
) -> Result<Quiz, EditorError> {
    let saved = match mode {
        EditorMode::Create => service.create(draft).await,
        EditorMode::Edit(id) => service.update(id, draft).await,
    };
    saved.map_err(EditorError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use storage::repository::InMemoryRepository;

    fn filled_draft() -> QuizDraft {
        let mut draft = QuizDraft::new();
        apply_intent(&mut draft, EditorIntent::SetTitle("Rust".into())).unwrap();
        apply_intent(&mut draft, EditorIntent::SetQuestionText(0, "Safe?".into())).unwrap();
        for option in 0..4 {
            apply_intent(
                &mut draft,
                EditorIntent::SetOptionText(0, option, format!("choice {option}")),
            )
            .unwrap();
        }
        apply_intent(&mut draft, EditorIntent::MarkCorrect(0, 2)).unwrap();
        draft
    }

    #[test]
    fn intents_edit_the_draft() {
        let mut draft = filled_draft();
        apply_intent(&mut draft, EditorIntent::AddQuestion).unwrap();
        apply_intent(&mut draft, EditorIntent::SetQuestionText(1, "Fast?".into())).unwrap();
        apply_intent(&mut draft, EditorIntent::MoveQuestionUp(1)).unwrap();
        assert_eq!(draft.questions[0].text, "Fast?");
        assert!(draft.questions[1].options[2].correct);

        apply_intent(&mut draft, EditorIntent::RemoveOption(1, 0)).unwrap();
        assert_eq!(draft.questions[1].options.len(), 3);
    }

    #[test]
    fn bad_positions_are_reported() {
        let mut draft = QuizDraft::new();
        assert_eq!(
            apply_intent(&mut draft, EditorIntent::SetOptionText(0, 9, "x".into())),
            Err(DraftError::OutOfRange)
        );
        assert_eq!(
            apply_intent(&mut draft, EditorIntent::RemoveQuestion(0)),
            Err(DraftError::LastQuestion)
        );
    }

    #[tokio::test]
    async fn save_creates_then_updates() {
        let repo = InMemoryRepository::new();
        let service = QuizService::new(Arc::new(repo));
        let draft = filled_draft();

        let created = save_draft(&service, EditorMode::Create, &draft).await.unwrap();
        assert_eq!(created.title(), "Rust");

        let mut edited = service.load_draft(created.id()).await.unwrap();
        apply_intent(&mut edited, EditorIntent::SetTitle("Rust 2".into())).unwrap();
        let updated = save_draft(&service, EditorMode::Edit(created.id()), &edited)
            .await
            .unwrap();
        assert_eq!(updated.id(), created.id());
        assert_eq!(updated.title(), "Rust 2");
    }

    #[tokio::test]
    async fn invalid_draft_is_reported_inline() {
        let service = QuizService::new(Arc::new(InMemoryRepository::new()));
        let err = save_draft(&service, EditorMode::Create, &QuizDraft::new())
            .await
            .unwrap_err();
        assert_eq!(err, EditorError::Invalid(DraftError::EmptyTitle));
        assert_eq!(err.message(), "quiz title is required");
    }
}
