//! Session state management.
//!
//! `ConversationStore` owns the list of saved conversations, the active
//! conversation pointer, and the working message list of the current
//! session, and keeps the list synchronized with the injected
//! [`SnapshotStorage`].

use std::sync::Arc;

use chrono::Utc;
use legalai_types::Message;

use super::model::Conversation;
use super::storage::{SnapshotStorage, CONVERSATIONS_KEY};

/// Pure append helper: returns a new working list with `message` at the end.
///
/// Appending and persisting are separate steps; the caller decides when the
/// grown list is worth a [`ConversationStore::save_session`].
pub fn append_message(messages: &[Message], message: Message) -> Vec<Message> {
    let mut updated = messages.to_vec();
    updated.push(message);
    updated
}

/// The authoritative in-memory conversation state for one profile.
///
/// Lifecycle: loaded once at startup via [`ConversationStore::load`], mutated
/// through the session, and flushed to storage as a full snapshot after every
/// change to the conversation list. The store itself is synchronous; callers
/// that live on an async runtime serialize access one layer up.
///
/// Ordering: new conversations are inserted at the front (most recent
/// first). Saving into an existing conversation updates it in place and does
/// NOT move it to the front; the sidebar order reflects creation recency,
/// not update recency.
pub struct ConversationStore {
    conversations: Vec<Conversation>,
    active_conversation_id: Option<String>,
    session_messages: Vec<Message>,
    /// Bumped whenever the working session changes identity (switch, delete
    /// of the active conversation, explicit new session). Callers snapshot
    /// this before an async round-trip and drop responses that come back
    /// under a stale generation.
    generation: u64,
    storage: Arc<dyn SnapshotStorage>,
}

impl ConversationStore {
    /// Loads the store from the persisted snapshot.
    ///
    /// A missing key starts an empty store. A snapshot that fails to parse
    /// is logged and discarded, never propagated: losing history beats
    /// refusing to start. Either way the session begins provisional, with
    /// no active conversation.
    pub fn load(storage: Arc<dyn SnapshotStorage>) -> Self {
        let conversations = match storage.read(CONVERSATIONS_KEY) {
            Ok(Some(payload)) => match serde_json::from_str::<Vec<Conversation>>(&payload) {
                Ok(conversations) => conversations,
                Err(e) => {
                    tracing::warn!("Discarding corrupt conversation snapshot: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read conversation snapshot: {e}");
                Vec::new()
            }
        };

        Self {
            conversations,
            active_conversation_id: None,
            session_messages: Vec::new(),
            generation: 0,
            storage,
        }
    }

    /// All saved conversations, most recently created first.
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    /// The id of the active saved conversation, or `None` while the session
    /// is provisional.
    pub fn active_conversation_id(&self) -> Option<&str> {
        self.active_conversation_id.as_deref()
    }

    /// The working message list of the current session.
    pub fn session_messages(&self) -> &[Message] {
        &self.session_messages
    }

    /// The current session generation (see the field doc).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Looks up a saved conversation by id.
    pub fn find(&self, conversation_id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == conversation_id)
    }

    /// Persists the given message list as the current session.
    ///
    /// An empty list is a strict no-op: an empty conversation is never
    /// materialized and storage is not touched. With an active conversation
    /// the stored record is updated in place (messages and timestamp); with
    /// a provisional session a new conversation is minted, inserted at the
    /// front, and made active. Both paths end with a full-snapshot write.
    pub fn save_session(&mut self, messages: &[Message]) {
        if messages.is_empty() {
            return;
        }

        self.session_messages = messages.to_vec();
        let now = Utc::now().to_rfc3339();

        let updated_existing = match &self.active_conversation_id {
            Some(active_id) => {
                if let Some(conversation) =
                    self.conversations.iter_mut().find(|c| &c.id == active_id)
                {
                    conversation.messages = messages.to_vec();
                    conversation.timestamp = now.clone();
                    true
                } else {
                    // The active id should always reference a stored
                    // conversation; recover by re-materializing.
                    tracing::warn!("Active conversation '{active_id}' missing from store");
                    false
                }
            }
            None => false,
        };

        if !updated_existing {
            let id = self.mint_id();
            let title = Conversation::derive_title(&messages[0].content);
            self.conversations.insert(
                0,
                Conversation {
                    id: id.clone(),
                    title,
                    messages: messages.to_vec(),
                    timestamp: now,
                },
            );
            self.active_conversation_id = Some(id);
        }

        self.persist();
    }

    /// Makes `conversation_id` the active session and loads its messages
    /// into the working list.
    ///
    /// An unknown id is a defensive no-op; the frontend only offers ids it
    /// got from [`Self::conversations`].
    pub fn switch_to(&mut self, conversation_id: &str) {
        let Some(messages) = self.find(conversation_id).map(|c| c.messages.clone()) else {
            tracing::debug!("Ignoring switch to unknown conversation '{conversation_id}'");
            return;
        };

        self.session_messages = messages;
        self.active_conversation_id = Some(conversation_id.to_string());
        self.generation += 1;
    }

    /// Removes a conversation from the store and persists the shrunk list.
    ///
    /// Deleting the active conversation also resets the session to a fresh
    /// provisional one. An unknown id changes nothing and writes nothing.
    pub fn delete_conversation(&mut self, conversation_id: &str) {
        let before = self.conversations.len();
        self.conversations.retain(|c| c.id != conversation_id);
        if self.conversations.len() == before {
            tracing::debug!("Ignoring delete of unknown conversation '{conversation_id}'");
            return;
        }

        if self.active_conversation_id.as_deref() == Some(conversation_id) {
            self.reset_session();
        }

        self.persist();
    }

    /// Resets the working state to an empty, provisional session.
    ///
    /// Touches neither the conversation list nor storage; persistence
    /// happens on the next non-empty save.
    pub fn create_new_session(&mut self) {
        self.reset_session();
    }

    fn reset_session(&mut self) {
        self.active_conversation_id = None;
        self.session_messages.clear();
        self.generation += 1;
    }

    /// Mints a timestamp-derived conversation id.
    ///
    /// Two saves inside the same millisecond would collide, so bump until
    /// the id is free. Ids never leave this profile's local store.
    fn mint_id(&self) -> String {
        let mut candidate = Utc::now().timestamp_millis();
        while self.conversations.iter().any(|c| c.id == candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }

    /// Serializes the full conversation list into the snapshot key.
    ///
    /// A write failure (disk full, permissions) is logged and swallowed:
    /// the in-memory list stays authoritative and the session degrades to
    /// memory-only for the rest of the process.
    fn persist(&self) {
        let payload = match serde_json::to_string(&self.conversations) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Failed to serialize conversation snapshot: {e}");
                return;
            }
        };

        if let Err(e) = self.storage.write(CONVERSATIONS_KEY, &payload) {
            tracing::warn!("Failed to persist conversation snapshot: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LegalAiError, Result};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory storage double with write counting and failure injection.
    #[derive(Default)]
    struct MemoryStorage {
        entries: Mutex<HashMap<String, String>>,
        writes: AtomicUsize,
        fail_writes: AtomicBool,
    }

    impl MemoryStorage {
        fn write_count(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        fn set_fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }

        fn raw(&self, key: &str) -> Option<String> {
            self.entries.lock().unwrap().get(key).cloned()
        }

        fn put_raw(&self, key: &str, value: &str) {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
        }
    }

    impl SnapshotStorage for MemoryStorage {
        fn read(&self, key: &str) -> Result<Option<String>> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        fn write(&self, key: &str, value: &str) -> Result<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(LegalAiError::storage("simulated quota exceeded"));
            }
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    fn store_with(storage: &Arc<MemoryStorage>) -> ConversationStore {
        ConversationStore::load(Arc::clone(storage) as Arc<dyn SnapshotStorage>)
    }

    fn session(contents: &[&str]) -> Vec<Message> {
        contents
            .iter()
            .enumerate()
            .map(|(i, content)| {
                if i % 2 == 0 {
                    Message::user(*content)
                } else {
                    Message::assistant(*content)
                }
            })
            .collect()
    }

    #[test]
    fn save_and_reload_roundtrips_messages() {
        let storage = Arc::new(MemoryStorage::default());
        let mut store = store_with(&storage);

        let messages = session(&["What is Section 420 IPC?", "Section 420 covers cheating."]);
        store.save_session(&messages);

        let reloaded = store_with(&storage);
        assert_eq!(reloaded.conversations().len(), 1);
        assert_eq!(reloaded.conversations()[0].messages, messages);
    }

    #[test]
    fn first_save_materializes_conversation_and_sets_active() {
        let storage = Arc::new(MemoryStorage::default());
        let mut store = store_with(&storage);
        assert!(store.active_conversation_id().is_none());

        store.save_session(&session(&["Hello"]));

        let id = store.active_conversation_id().unwrap().to_string();
        assert_eq!(store.conversations().len(), 1);
        assert_eq!(store.conversations()[0].id, id);
        // Timestamp-derived decimal id.
        assert!(id.parse::<i64>().is_ok());
    }

    #[test]
    fn empty_save_is_a_noop() {
        let storage = Arc::new(MemoryStorage::default());
        let mut store = store_with(&storage);

        store.save_session(&[]);

        assert!(store.conversations().is_empty());
        assert!(store.active_conversation_id().is_none());
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn resave_under_active_id_does_not_duplicate() {
        let storage = Arc::new(MemoryStorage::default());
        let mut store = store_with(&storage);

        let messages = session(&["Q", "A"]);
        store.save_session(&messages);
        let id = store.active_conversation_id().unwrap().to_string();
        store.save_session(&messages);

        assert_eq!(store.conversations().len(), 1);
        assert_eq!(store.active_conversation_id(), Some(id.as_str()));
        assert_eq!(store.conversations()[0].messages, messages);
    }

    #[test]
    fn new_conversations_are_ordered_most_recent_first() {
        let storage = Arc::new(MemoryStorage::default());
        let mut store = store_with(&storage);

        store.save_session(&session(&["first conversation"]));
        let id_a = store.active_conversation_id().unwrap().to_string();
        store.create_new_session();
        store.save_session(&session(&["second conversation"]));
        let id_b = store.active_conversation_id().unwrap().to_string();

        let ids: Vec<&str> = store.conversations().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec![id_b.as_str(), id_a.as_str()]);
    }

    #[test]
    fn updating_an_older_conversation_does_not_resort() {
        let storage = Arc::new(MemoryStorage::default());
        let mut store = store_with(&storage);

        store.save_session(&session(&["first"]));
        let id_a = store.active_conversation_id().unwrap().to_string();
        store.create_new_session();
        store.save_session(&session(&["second"]));
        let id_b = store.active_conversation_id().unwrap().to_string();

        // Grow the older conversation; it must stay in place.
        store.switch_to(&id_a);
        let grown = append_message(store.session_messages(), Message::assistant("more"));
        store.save_session(&grown);

        let ids: Vec<&str> = store.conversations().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec![id_b.as_str(), id_a.as_str()]);
        assert_eq!(store.find(&id_a).unwrap().messages.len(), 2);
    }

    #[test]
    fn switch_to_replaces_working_messages() {
        let storage = Arc::new(MemoryStorage::default());
        let mut store = store_with(&storage);

        store.save_session(&session(&["alpha", "beta"]));
        let id = store.active_conversation_id().unwrap().to_string();
        store.create_new_session();
        assert!(store.session_messages().is_empty());

        store.switch_to(&id);

        assert_eq!(store.active_conversation_id(), Some(id.as_str()));
        assert_eq!(store.session_messages().len(), 2);
    }

    #[test]
    fn switch_to_unknown_id_is_a_noop() {
        let storage = Arc::new(MemoryStorage::default());
        let mut store = store_with(&storage);

        store.save_session(&session(&["kept"]));
        let id = store.active_conversation_id().unwrap().to_string();
        let generation = store.generation();

        store.switch_to("does-not-exist");

        assert_eq!(store.active_conversation_id(), Some(id.as_str()));
        assert_eq!(store.generation(), generation);
    }

    #[test]
    fn deleting_active_conversation_resets_session() {
        let storage = Arc::new(MemoryStorage::default());
        let mut store = store_with(&storage);

        store.save_session(&session(&["doomed"]));
        let id = store.active_conversation_id().unwrap().to_string();

        store.delete_conversation(&id);

        assert!(store.active_conversation_id().is_none());
        assert!(store.session_messages().is_empty());
        assert!(store.find(&id).is_none());
    }

    #[test]
    fn deleting_inactive_conversation_preserves_session() {
        let storage = Arc::new(MemoryStorage::default());
        let mut store = store_with(&storage);

        store.save_session(&session(&["keep me", "ok"]));
        let id_x = store.active_conversation_id().unwrap().to_string();
        store.create_new_session();
        store.save_session(&session(&["delete me"]));
        let id_y = store.active_conversation_id().unwrap().to_string();

        store.switch_to(&id_x);
        store.delete_conversation(&id_y);

        assert_eq!(store.active_conversation_id(), Some(id_x.as_str()));
        assert_eq!(store.find(&id_x).unwrap().messages.len(), 2);
        assert!(store.find(&id_y).is_none());
    }

    #[test]
    fn deleting_unknown_id_writes_nothing() {
        let storage = Arc::new(MemoryStorage::default());
        let mut store = store_with(&storage);

        store.save_session(&session(&["only one"]));
        let writes = storage.write_count();

        store.delete_conversation("missing");

        assert_eq!(store.conversations().len(), 1);
        assert_eq!(storage.write_count(), writes);
    }

    #[test]
    fn corrupt_snapshot_loads_as_empty_store() {
        let storage = Arc::new(MemoryStorage::default());
        storage.put_raw(CONVERSATIONS_KEY, "{not valid json");

        let store = store_with(&storage);

        assert!(store.conversations().is_empty());
        assert!(store.active_conversation_id().is_none());
    }

    #[test]
    fn write_failure_keeps_in_memory_state() {
        let storage = Arc::new(MemoryStorage::default());
        let mut store = store_with(&storage);
        storage.set_fail_writes(true);

        store.save_session(&session(&["memory only"]));

        assert_eq!(store.conversations().len(), 1);
        assert!(storage.raw(CONVERSATIONS_KEY).is_none());

        // Recovery: a later save with storage healthy lands on disk.
        storage.set_fail_writes(false);
        let grown = append_message(store.session_messages(), Message::assistant("back"));
        store.save_session(&grown);
        assert!(storage.raw(CONVERSATIONS_KEY).is_some());
    }

    #[test]
    fn generation_bumps_on_session_identity_changes() {
        let storage = Arc::new(MemoryStorage::default());
        let mut store = store_with(&storage);
        let g0 = store.generation();

        store.save_session(&session(&["one"]));
        assert_eq!(store.generation(), g0, "in-place save keeps the generation");

        let id = store.active_conversation_id().unwrap().to_string();
        store.create_new_session();
        let g1 = store.generation();
        assert!(g1 > g0);

        store.switch_to(&id);
        let g2 = store.generation();
        assert!(g2 > g1);

        store.delete_conversation(&id);
        assert!(store.generation() > g2);
    }

    #[test]
    fn append_message_is_pure() {
        let base = session(&["hello"]);
        let grown = append_message(&base, Message::assistant("hi"));
        assert_eq!(base.len(), 1);
        assert_eq!(grown.len(), 2);
        assert_eq!(grown[0], base[0]);
    }

    #[test]
    fn snapshot_is_the_serialized_list_verbatim() {
        let storage = Arc::new(MemoryStorage::default());
        let mut store = store_with(&storage);

        store.save_session(&session(&["payload check"]));

        let raw = storage.raw(CONVERSATIONS_KEY).unwrap();
        let parsed: Vec<Conversation> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, store.conversations());
    }
}
