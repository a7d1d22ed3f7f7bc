//! Conversation session state.
//!
//! A `Session` owns the ordered message history plus the identity of the
//! assistant and document index serving it. One session, one writer: the
//! pipeline appends exactly one user/assistant pair per turn. Nothing is
//! persisted across process restarts unless the index id is kept
//! externally.

use openai_client::Message;
use std::fmt;

/// Opaque reference to an indexed document corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexHandle(String);

impl IndexHandle {
    /// Wrap a vector store id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The underlying id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IndexHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque reference to a configured assistant bound to an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantHandle(String);

impl AssistantHandle {
    /// Wrap an assistant id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The underlying id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssistantHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One client conversation: history plus assistant/index identity.
///
/// History grows unbounded by design; the assistant re-reads the full
/// accumulated history every turn, with no truncation and no reordering.
pub struct Session {
    assistant: AssistantHandle,
    index: IndexHandle,
    history: Vec<Message>,
}

impl Session {
    /// Start a fresh session against an assistant and its index.
    pub fn new(assistant: AssistantHandle, index: IndexHandle) -> Self {
        Self {
            assistant,
            index,
            history: Vec::new(),
        }
    }

    /// The assistant serving this session.
    pub fn assistant(&self) -> &AssistantHandle {
        &self.assistant
    }

    /// The document index backing this session.
    pub fn index(&self) -> &IndexHandle {
        &self.index
    }

    /// The accumulated history, in turn order.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Number of completed turns.
    pub fn turns(&self) -> usize {
        self.history.len() / 2
    }

    /// Append one completed turn: the user question then the final answer.
    pub fn record_turn(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.history.push(Message::user(question));
        self.history.push(Message::assistant(answer));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(AssistantHandle::new("asst_1"), IndexHandle::new("vs_1"))
    }

    #[test]
    fn test_record_turn_preserves_order() {
        let mut s = session();
        s.record_turn("q1", "a1");
        s.record_turn("q2", "a2");

        let roles: Vec<_> = s.history().iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, ["user", "assistant", "user", "assistant"]);

        let contents: Vec<_> = s.history().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["q1", "a1", "q2", "a2"]);
        assert_eq!(s.turns(), 2);
    }

    #[test]
    fn test_handles_are_opaque_ids() {
        let s = session();
        assert_eq!(s.assistant().as_str(), "asst_1");
        assert_eq!(s.index().to_string(), "vs_1");
    }
}
