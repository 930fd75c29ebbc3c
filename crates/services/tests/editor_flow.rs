use std::sync::Arc;

use quiz_core::model::{DraftError, QuizDraft};
use services::{QuizService, QuizServiceError};
use storage::repository::{InMemoryRepository, QuizRepository, StorageError};

fn filled_draft() -> QuizDraft {
    let mut draft = QuizDraft::new();
    draft.title = "  Ownership  ".into();
    draft.questions[0].text = "Who owns a moved value?".into();
    for (index, option) in draft.questions[0].options.iter_mut().enumerate() {
        option.text = format!("answer {index}");
    }
    draft.mark_correct(0, 2).unwrap();
    draft
}

#[tokio::test]
async fn editor_flow_create_edit_delete() {
    let repo = InMemoryRepository::new();
    let service = QuizService::new(Arc::new(repo.clone()));

    let created = service.create(&filled_draft()).await.expect("create quiz");
    assert_eq!(created.title(), "Ownership");
    assert_eq!(created.questions()[0].options().len(), 4);

    let mut draft = service.load_draft(created.id()).await.expect("load draft");
    assert!(draft.questions[0].options[2].correct);
    assert!(draft.questions[0].id.is_some());

    draft.add_question();
    draft.questions[1].text = "Borrowing rule?".into();
    draft.remove_option(1, 3).unwrap();
    draft.remove_option(1, 2).unwrap();
    draft.questions[1].options[0].text = "one mutable".into();
    draft.questions[1].options[1].text = "many mutable".into();
    draft.mark_correct(1, 0).unwrap();

    let updated = service.update(created.id(), &draft).await.expect("update");
    assert_eq!(updated.question_count(), 2);
    assert_eq!(updated.questions()[0].id(), created.questions()[0].id());

    let authoring = repo.get_authoring_quiz(created.id()).await.unwrap();
    assert_eq!(
        authoring
            .correct_option(authoring.questions[1].question_id)
            .map(|option| option.option_text.as_str()),
        Some("one mutable")
    );

    service.delete(created.id()).await.expect("delete");
    let err = service.get_quiz(created.id()).await.unwrap_err();
    assert!(matches!(err, QuizServiceError::Storage(StorageError::NotFound)));
}

#[tokio::test]
async fn invalid_draft_is_rejected_before_any_request() {
    let repo = InMemoryRepository::new();
    let service = QuizService::new(Arc::new(repo.clone()));

    let mut draft = filled_draft();
    draft.questions[0].options[0].text = "   ".into();
    let err = service.create(&draft).await.unwrap_err();
    assert!(matches!(
        err,
        QuizServiceError::Draft(DraftError::EmptyOptionText { number: 1, option: 1 })
    ));
    assert!(service.list_quizzes().await.unwrap().is_empty());
}

#[tokio::test]
async fn names_and_search_cover_the_catalog() {
    let repo = InMemoryRepository::new();
    let service = QuizService::new(Arc::new(repo));
    service.create(&filled_draft()).await.unwrap();

    assert_eq!(service.list_names().await.unwrap(), vec!["Ownership".to_string()]);
    let found = service.search("ownership").await.unwrap();
    assert_eq!(found.title(), "Ownership");
    assert!(matches!(
        service.search("lifetimes").await.unwrap_err(),
        QuizServiceError::Storage(StorageError::NotFound)
    ));
}
