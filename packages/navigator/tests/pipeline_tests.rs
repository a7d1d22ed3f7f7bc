//! End-to-end pipeline tests with stubbed collaborators.
//!
//! No network: the grounded answerer, fallback completer, and search
//! adapters are all mocks.

use std::sync::Arc;

use navigator::testing::{MockCompleter, StubAnswerer};
use navigator::{
    AssistantHandle, AugmentationSelector, FallbackResolver, FallbackStrategy, IndexHandle,
    Navigator, NavigatorError, Session,
};
use travel_search::{MockSnippetSearcher, Snippet};

fn session() -> Session {
    Session::new(AssistantHandle::new("asst_test"), IndexHandle::new("vs_test"))
}

fn hotel_selector(question: &str, snippets: Vec<Snippet>) -> AugmentationSelector {
    let searcher = MockSnippetSearcher::new().with_results(question, snippets);
    AugmentationSelector::new().with_route(
        &["hotel", "hotels"],
        "Hotel Search Result",
        Arc::new(searcher),
    )
}

#[tokio::test]
async fn grounded_answer_passes_through_untouched() {
    // Scenario A: no sentinel, no keywords -> output unchanged, no fallback.
    let answerer = Arc::new(StubAnswerer::new(
        "The hotel booking policy requires 48h notice.",
    ));
    let completer = Arc::new(MockCompleter::new("SHOULD NOT APPEAR"));
    let pipeline = Navigator::new(
        answerer,
        FallbackResolver::new(completer.clone(), FallbackStrategy::GenericItinerary),
        AugmentationSelector::new(),
    );

    let mut session = session();
    let result = pipeline
        .answer_turn(&mut session, "What is the booking policy?")
        .await
        .unwrap();

    assert_eq!(result.answer, "The hotel booking policy requires 48h notice.");
    assert!(!result.augmented);
    assert_eq!(completer.calls().len(), 0);
}

#[tokio::test]
async fn insufficient_answer_triggers_fallback_then_augmentation() {
    // Scenario B: sentinel answer + hotel keyword -> fallback replacement,
    // then a hotel section appended.
    let question = "Find me a hotel in Paris";

    let answerer = Arc::new(StubAnswerer::new("Answer not available in context."));
    let completer = Arc::new(MockCompleter::new("Day 1: Louvre. Day 2: Montmartre."));
    let pipeline = Navigator::new(
        answerer,
        FallbackResolver::new(completer.clone(), FallbackStrategy::GenericItinerary),
        hotel_selector(question, vec![Snippet::labeled("Hotel Lutetia", "$410")]),
    );

    let mut session = session();
    let result = pipeline.answer_turn(&mut session, question).await.unwrap();

    assert_eq!(
        result.answer,
        "Day 1: Louvre. Day 2: Montmartre.\n\nHotel Search Result:\nHotel Lutetia: $410"
    );
    assert!(result.augmented);
    assert_eq!(completer.calls().len(), 1);
    assert!(completer.calls()[0].prompt.contains(question));
}

#[tokio::test]
async fn empty_adapter_results_leave_answer_unaugmented() {
    // Scenario C: keyword matches but the adapter has nothing.
    let question = "Any hotel recommendations?";

    let answerer = Arc::new(StubAnswerer::new("Our preferred partners are listed."));
    let pipeline = Navigator::new(
        answerer,
        FallbackResolver::new(
            Arc::new(MockCompleter::new("unused")),
            FallbackStrategy::GenericItinerary,
        ),
        hotel_selector(question, Vec::new()),
    );

    let mut session = session();
    let result = pipeline.answer_turn(&mut session, question).await.unwrap();

    assert_eq!(result.answer, "Our preferred partners are listed.");
    assert!(!result.augmented);
}

#[tokio::test]
async fn history_replayed_in_full_and_in_order() {
    // Scenario D: 3 prior turns -> answerer sees exactly 6 messages, in order.
    let answerer = Arc::new(StubAnswerer::new("Grounded."));
    let pipeline = Navigator::new(
        answerer.clone(),
        FallbackResolver::new(
            Arc::new(MockCompleter::new("unused")),
            FallbackStrategy::GenericItinerary,
        ),
        AugmentationSelector::new(),
    );

    let mut session = session();
    for i in 1..=3 {
        pipeline
            .answer_turn(&mut session, &format!("question {}", i))
            .await
            .unwrap();
    }
    pipeline
        .answer_turn(&mut session, "question 4")
        .await
        .unwrap();

    let calls = answerer.calls();
    assert_eq!(calls.len(), 4);

    let last = &calls[3];
    assert_eq!(last.history.len(), 6);
    assert_eq!(last.question, "question 4");

    let contents: Vec<_> = last.history.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(
        contents,
        ["question 1", "Grounded.", "question 2", "Grounded.", "question 3", "Grounded."]
    );
    let roles: Vec<_> = last.history.iter().map(|m| m.role.as_str()).collect();
    assert_eq!(
        roles,
        ["user", "assistant", "user", "assistant", "user", "assistant"]
    );

    // After the fourth turn the session holds all 8 messages.
    assert_eq!(session.history().len(), 8);
}

#[tokio::test]
async fn fixed_grounded_stub_never_reaches_the_completer() {
    // Fallback is strictly gated on the sentinel phrase: replaying many
    // questions against a grounded stub never makes an LLM call.
    let answerer = Arc::new(StubAnswerer::new("A perfectly grounded answer."));
    let completer = Arc::new(MockCompleter::new("SHOULD NOT APPEAR"));
    let pipeline = Navigator::new(
        answerer,
        FallbackResolver::new(completer.clone(), FallbackStrategy::Clarify),
        AugmentationSelector::new(),
    );

    let mut session = session();
    for question in ["plan a trip", "refund policy?", "visa requirements"] {
        let result = pipeline.answer_turn(&mut session, question).await.unwrap();
        assert_eq!(result.answer, "A perfectly grounded answer.");
    }

    assert_eq!(completer.calls().len(), 0);
}

#[tokio::test]
async fn adapter_failure_does_not_abort_the_turn() {
    let question = "Find me a hotel in Paris";

    let answerer = Arc::new(StubAnswerer::new("Grounded hotel advice."));
    let failing = MockSnippetSearcher::new().failing();
    let pipeline = Navigator::new(
        answerer,
        FallbackResolver::new(
            Arc::new(MockCompleter::new("unused")),
            FallbackStrategy::GenericItinerary,
        ),
        AugmentationSelector::new().with_route(
            &["hotel", "hotels"],
            "Hotel Search Result",
            Arc::new(failing),
        ),
    );

    let mut session = session();
    let result = pipeline.answer_turn(&mut session, question).await.unwrap();

    assert_eq!(result.answer, "Grounded hotel advice.");
    assert!(!result.augmented);
    assert_eq!(session.history().len(), 2);
}

#[tokio::test]
async fn retrieval_failure_propagates_and_leaves_session_clean() {
    let answerer = Arc::new(StubAnswerer::failing());
    let pipeline = Navigator::new(
        answerer,
        FallbackResolver::new(
            Arc::new(MockCompleter::new("unused")),
            FallbackStrategy::GenericItinerary,
        ),
        AugmentationSelector::new(),
    );

    let mut session = session();
    let err = pipeline
        .answer_turn(&mut session, "any question")
        .await
        .unwrap_err();

    assert!(matches!(err, NavigatorError::Retrieval(_)));
    // The failed turn is not recorded; the user can resubmit.
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn clarify_strategy_replaces_answer_with_one_question() {
    let question = "Plan me a trip";

    let answerer = Arc::new(StubAnswerer::new("answer not available in context"));
    let completer = Arc::new(MockCompleter::new("How many nights will you stay?"));
    let pipeline = Navigator::new(
        answerer,
        FallbackResolver::new(completer.clone(), FallbackStrategy::Clarify),
        AugmentationSelector::new(),
    );

    let mut session = session();
    let result = pipeline.answer_turn(&mut session, question).await.unwrap();

    assert_eq!(result.answer, "How many nights will you stay?");
    assert_eq!(completer.calls().len(), 1);
    assert_eq!(completer.calls()[0].max_tokens, 50);
}
