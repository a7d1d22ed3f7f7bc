//! The per-turn answer pipeline.
//!
//! Control flow for one question:
//! session history → grounded answerer → insufficiency detector →
//! fallback resolver → augmentation selector → session append → caller.
//!
//! At most three sequential network round-trips per turn (grounded query,
//! optional fallback completion, optional search augmentation), with no
//! overlap and no internal parallelism.

use tracing::info;

use crate::answerer::GroundedAnswerer;
use crate::augment::AugmentationSelector;
use crate::error::Result;
use crate::fallback::FallbackResolver;
use crate::session::Session;
use crate::sufficiency::is_insufficient;
use std::sync::Arc;

/// Outcome of one pipeline turn.
#[derive(Debug, Clone)]
pub struct TurnResult {
    /// The final assembled answer.
    pub answer: String,

    /// Whether live search results were appended.
    pub augmented: bool,
}

/// The answer-orchestration pipeline.
pub struct Navigator {
    answerer: Arc<dyn GroundedAnswerer>,
    fallback: FallbackResolver,
    augmenter: AugmentationSelector,
}

impl Navigator {
    /// Assemble a pipeline from its three stages.
    pub fn new(
        answerer: Arc<dyn GroundedAnswerer>,
        fallback: FallbackResolver,
        augmenter: AugmentationSelector,
    ) -> Self {
        Self {
            answerer,
            fallback,
            augmenter,
        }
    }

    /// Run one turn: answer the question and record it in the session.
    ///
    /// Retrieval and fallback failures propagate untouched; the session is
    /// only mutated after the whole turn succeeds, so a failed turn can be
    /// resubmitted cleanly.
    pub async fn answer_turn(&self, session: &mut Session, question: &str) -> Result<TurnResult> {
        let grounded = self.answerer.answer(session.history(), question).await?;

        let insufficient = is_insufficient(&grounded);
        info!(
            turn = session.turns() + 1,
            insufficient,
            grounded_len = grounded.len(),
            "Grounded answer classified"
        );

        let resolved = self
            .fallback
            .resolve(question, grounded, insufficient)
            .await?;

        let (answer, augmented) = self.augmenter.augment(question, &resolved).await;

        session.record_turn(question, &answer);

        Ok(TurnResult { answer, augmented })
    }
}
