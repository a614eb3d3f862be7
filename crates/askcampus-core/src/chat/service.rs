//! Chat orchestrator: one inbound (session, message) pair in, one reply out.
//!
//! ChatService coordinates the history store and the LLM provider through
//! the per-request pipeline: validate, load history, append the user turn,
//! build the prompt, call inference, append the assistant turn, persist.
//!
//! Nothing is persisted until the inference call has succeeded, so a failed
//! exchange leaves the stored history exactly as it was and the next request
//! continues from the last committed exchange. The load/persist pair is not
//! transactional: concurrent requests for the same session race
//! read-modify-write and the last write wins.

use askcampus_types::error::ChatError;
use askcampus_types::llm::GenerationRequest;
use askcampus_types::turn::Turn;
use tracing::{debug, info};

use crate::chat::prompt::{build_prompt, SYSTEM_INSTRUCTION};
use crate::llm::provider::LlmProvider;
use crate::storage::history_store::HistoryStore;

/// Orchestrates one chat exchange per call.
///
/// Generic over `HistoryStore` and `LlmProvider` so the core never depends
/// on askcampus-infra.
pub struct ChatService<S: HistoryStore, P: LlmProvider> {
    store: S,
    provider: P,
    model: String,
}

impl<S: HistoryStore, P: LlmProvider> ChatService<S, P> {
    /// Create a new chat service with the given collaborators.
    pub fn new(store: S, provider: P, model: String) -> Self {
        Self {
            store,
            provider,
            model,
        }
    }

    /// Handle one chat request for a session.
    ///
    /// The session identifier is an opaque lookup key: never validated for
    /// format, never mutated. The message is trimmed before storage; a
    /// whitespace-only message counts as empty and is rejected before any
    /// store access.
    pub async fn handle_chat(&self, session_id: &str, message: &str) -> Result<String, ChatError> {
        let message = message.trim();
        if session_id.is_empty() || message.is_empty() {
            return Err(ChatError::MissingFields);
        }

        // Absent key denotes an empty conversation. A present value that
        // fails to parse is surfaced, never repaired or truncated.
        let mut history: Vec<Turn> = match self.store.get(session_id).await? {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| ChatError::MalformedHistory(e.to_string()))?,
            None => Vec::new(),
        };

        history.push(Turn::user(message));

        let request = GenerationRequest {
            model: self.model.clone(),
            system: SYSTEM_INSTRUCTION.to_string(),
            input: build_prompt(&history),
        };

        debug!(
            session_id,
            turns = history.len(),
            provider = self.provider.name(),
            "dispatching inference request"
        );

        // On failure the in-memory user turn is discarded with the early
        // return: nothing has been written yet.
        let reply = self.provider.generate(&request).await?;

        history.push(Turn::assistant(reply.clone()));

        let value = serde_json::to_value(&history)
            .map_err(|e| ChatError::MalformedHistory(e.to_string()))?;
        self.store.put(session_id, &value).await?;

        info!(session_id, turns = history.len(), "exchange persisted");

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askcampus_types::error::StoreError;
    use askcampus_types::llm::LlmError;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory store that counts accesses so tests can assert the
    /// no-store-access guarantee on validation failure.
    #[derive(Default)]
    struct MemoryStore {
        values: Mutex<HashMap<String, serde_json::Value>>,
        gets: AtomicUsize,
        puts: AtomicUsize,
    }

    impl MemoryStore {
        fn with_history(session_id: &str, turns: &[Turn]) -> Self {
            let store = Self::default();
            store.values.lock().unwrap().insert(
                session_id.to_string(),
                serde_json::to_value(turns).unwrap(),
            );
            store
        }

        fn stored_turns(&self, session_id: &str) -> Option<Vec<Turn>> {
            self.values
                .lock()
                .unwrap()
                .get(session_id)
                .map(|v| serde_json::from_value(v.clone()).unwrap())
        }

        fn accesses(&self) -> usize {
            self.gets.load(Ordering::SeqCst) + self.puts.load(Ordering::SeqCst)
        }
    }

    impl HistoryStore for MemoryStore {
        async fn get(&self, session_id: &str) -> Result<Option<serde_json::Value>, StoreError> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            Ok(self.values.lock().unwrap().get(session_id).cloned())
        }

        async fn put(
            &self,
            session_id: &str,
            value: &serde_json::Value,
        ) -> Result<(), StoreError> {
            self.puts.fetch_add(1, Ordering::SeqCst);
            self.values
                .lock()
                .unwrap()
                .insert(session_id.to_string(), value.clone());
            Ok(())
        }
    }

    /// Provider returning a fixed reply and recording every request it sees.
    struct FixedProvider {
        reply: String,
        requests: Mutex<Vec<GenerationRequest>>,
    }

    impl FixedProvider {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl LlmProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(self.reply.clone())
        }
    }

    /// Provider that always fails.
    struct FailingProvider;

    impl LlmProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        async fn generate(&self, _request: &GenerationRequest) -> Result<String, LlmError> {
            Err(LlmError::Provider {
                message: "backend unavailable".to_string(),
            })
        }
    }

    fn service(
        store: MemoryStore,
        provider: FixedProvider,
    ) -> ChatService<MemoryStore, FixedProvider> {
        ChatService::new(store, provider, "test-model".to_string())
    }

    #[tokio::test]
    async fn test_first_message_persists_one_exchange() {
        let svc = service(MemoryStore::default(), FixedProvider::new("TFDL, main quad."));

        let reply = svc.handle_chat("s1", "Where is the library?").await.unwrap();
        assert_eq!(reply, "TFDL, main quad.");

        let turns = svc.store.stored_turns("s1").unwrap();
        assert_eq!(
            turns,
            vec![
                Turn::user("Where is the library?"),
                Turn::assistant("TFDL, main quad."),
            ]
        );
    }

    #[tokio::test]
    async fn test_user_message_trimmed_before_storage() {
        let svc = service(MemoryStore::default(), FixedProvider::new("hi"));

        svc.handle_chat("s1", "  hello there \n").await.unwrap();

        let turns = svc.store.stored_turns("s1").unwrap();
        assert_eq!(turns[0], Turn::user("hello there"));
    }

    #[tokio::test]
    async fn test_history_grows_by_exactly_two_turns() {
        let prior = vec![Turn::user("hi"), Turn::assistant("hello!")];
        let svc = service(
            MemoryStore::with_history("s1", &prior),
            FixedProvider::new("sure"),
        );

        svc.handle_chat("s1", "thanks").await.unwrap();

        let turns = svc.store.stored_turns("s1").unwrap();
        assert_eq!(turns.len(), prior.len() + 2);
        assert_eq!(turns[2], Turn::user("thanks"));
        assert_eq!(turns[3], Turn::assistant("sure"));
    }

    #[tokio::test]
    async fn test_continuation_prompt_replays_full_history() {
        let prior = vec![
            Turn::user("Where is the library?"),
            Turn::assistant("TFDL is on the main quad."),
        ];
        let svc = service(
            MemoryStore::with_history("s1", &prior),
            FixedProvider::new("8am weekdays."),
        );

        svc.handle_chat("s1", "When does it open?").await.unwrap();

        let requests = svc.provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].input,
            "user: Where is the library?\n\
             assistant: TFDL is on the main quad.\n\
             user: When does it open?\n"
        );
        assert_eq!(requests[0].model, "test-model");
        assert!(requests[0].system.contains("University of Calgary"));
    }

    #[tokio::test]
    async fn test_empty_session_id_fails_without_store_access() {
        let svc = service(MemoryStore::default(), FixedProvider::new("x"));

        let err = svc.handle_chat("", "hi").await.unwrap_err();
        assert!(matches!(err, ChatError::MissingFields));
        assert_eq!(svc.store.accesses(), 0);
        assert!(svc.provider.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_message_fails_without_store_access() {
        let svc = service(MemoryStore::default(), FixedProvider::new("x"));

        let err = svc.handle_chat("s1", "   \n\t").await.unwrap_err();
        assert!(matches!(err, ChatError::MissingFields));
        assert_eq!(svc.store.accesses(), 0);
    }

    #[tokio::test]
    async fn test_inference_failure_persists_nothing() {
        let prior = vec![Turn::user("hi"), Turn::assistant("hello!")];
        let store = MemoryStore::with_history("s1", &prior);
        let svc = ChatService::new(store, FailingProvider, "test-model".to_string());

        let err = svc.handle_chat("s1", "are you there?").await.unwrap_err();
        assert!(matches!(err, ChatError::Inference(_)));

        // History is exactly as it was: the in-memory user turn was discarded.
        assert_eq!(svc.store.stored_turns("s1").unwrap(), prior);
        assert_eq!(svc.store.puts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_history_is_surfaced_not_repaired() {
        let store = MemoryStore::default();
        store
            .values
            .lock()
            .unwrap()
            .insert("s1".to_string(), serde_json::json!({"oops": "not an array"}));
        let svc = ChatService::new(store, FixedProvider::new("x"), "m".to_string());

        let err = svc.handle_chat("s1", "hi").await.unwrap_err();
        assert!(matches!(err, ChatError::MalformedHistory(_)));
        assert_eq!(svc.store.puts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_continues_from_unmatched_trailing_user_turn() {
        // A prior request that failed after append can leave the stored
        // sequence ending on a user turn; the next request must carry on.
        let prior = vec![
            Turn::user("hi"),
            Turn::assistant("hello!"),
            Turn::user("dangling"),
        ];
        let svc = service(
            MemoryStore::with_history("s1", &prior),
            FixedProvider::new("picking up"),
        );

        svc.handle_chat("s1", "still there?").await.unwrap();

        let requests = svc.provider.requests.lock().unwrap();
        assert_eq!(
            requests[0].input,
            "user: hi\nassistant: hello!\nuser: dangling\nuser: still there?\n"
        );

        let turns = svc.store.stored_turns("s1").unwrap();
        assert_eq!(turns.len(), 5);
        assert_eq!(turns[4], Turn::assistant("picking up"));
    }

    #[tokio::test]
    async fn test_store_roundtrip_preserves_order() {
        let svc = service(MemoryStore::default(), FixedProvider::new("one"));
        svc.handle_chat("s1", "first").await.unwrap();
        svc.handle_chat("s1", "second").await.unwrap();

        let turns = svc.store.stored_turns("s1").unwrap();
        let contents: Vec<&str> = turns.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "one", "second", "one"]);
    }
}
