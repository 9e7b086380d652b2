//! In-memory test doubles for service tests
//!
//! These fakes implement the domain traits over plain collections so the
//! services can be exercised without a database or live connections.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use dm_common::auth::JwtService;
use dm_core::entities::{Message, User};
use dm_core::error::DomainError;
use dm_core::events::PushEvent;
use dm_core::traits::{ImageStore, MessageRepository, Notifier, RepoResult, UserRepository};
use dm_core::value_objects::{Snowflake, SnowflakeGenerator};

use super::context::{ServiceContext, ServiceContextBuilder};

/// In-memory UserRepository
#[derive(Default)]
pub struct InMemoryUserRepo {
    users: Mutex<HashMap<Snowflake, User>>,
}

impl InMemoryUserRepo {
    pub fn insert(&self, user: User) {
        self.users.lock().unwrap().insert(user.id, user);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_others(&self, excluding: Snowflake) -> RepoResult<Vec<User>> {
        let mut users: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .values()
            .filter(|u| u.id != excluding)
            .cloned()
            .collect();
        users.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        Ok(users)
    }

    async fn create(&self, user: &User) -> RepoResult<()> {
        self.insert(user.clone());
        Ok(())
    }
}

/// In-memory MessageRepository mirroring the store's semantics
#[derive(Default)]
pub struct InMemoryMessageRepo {
    messages: Mutex<Vec<Message>>,
}

impl InMemoryMessageRepo {
    pub fn get(&self, id: Snowflake) -> Option<Message> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepo {
    async fn create(&self, message: &Message) -> RepoResult<()> {
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>> {
        Ok(self.get(id))
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut messages = self.messages.lock().unwrap();
        let before = messages.len();
        messages.retain(|m| m.id != id);
        if messages.len() == before {
            return Err(DomainError::MessageNotFound(id));
        }
        Ok(())
    }

    async fn mark_seen(&self, id: Snowflake) -> RepoResult<()> {
        let mut messages = self.messages.lock().unwrap();
        match messages.iter_mut().find(|m| m.id == id) {
            Some(m) => {
                m.seen = true;
                Ok(())
            }
            None => Err(DomainError::MessageNotFound(id)),
        }
    }

    async fn find_conversation(
        &self,
        user_a: Snowflake,
        user_b: Snowflake,
    ) -> RepoResult<Vec<Message>> {
        let mut result: Vec<Message> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| {
                (m.sender_id == user_a && m.receiver_id == user_b)
                    || (m.sender_id == user_b && m.receiver_id == user_a)
            })
            .cloned()
            .collect();
        result.sort_by_key(|m| (m.created_at, m.id));
        Ok(result)
    }

    async fn mark_conversation_seen(
        &self,
        sender: Snowflake,
        receiver: Snowflake,
    ) -> RepoResult<u64> {
        let mut messages = self.messages.lock().unwrap();
        let mut updated = 0;
        for m in messages.iter_mut() {
            if m.sender_id == sender && m.receiver_id == receiver && !m.seen {
                m.seen = true;
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn unread_counts(&self, receiver: Snowflake) -> RepoResult<Vec<(Snowflake, i64)>> {
        let messages = self.messages.lock().unwrap();
        let mut counts: HashMap<Snowflake, i64> = HashMap::new();
        for m in messages.iter() {
            if m.receiver_id == receiver && !m.seen {
                *counts.entry(m.sender_id).or_default() += 1;
            }
        }
        Ok(counts.into_iter().collect())
    }
}

/// Notifier that records every push instead of delivering it
#[derive(Default)]
pub struct RecordingNotifier {
    pushes: Mutex<Vec<(Snowflake, PushEvent)>>,
    /// Connections reported per delivery (0 simulates an offline recipient)
    pub delivered_per_push: usize,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            pushes: Mutex::new(Vec::new()),
            delivered_per_push: 1,
        }
    }

    pub fn offline() -> Self {
        Self {
            pushes: Mutex::new(Vec::new()),
            delivered_per_push: 0,
        }
    }

    pub fn pushes(&self) -> Vec<(Snowflake, PushEvent)> {
        self.pushes.lock().unwrap().clone()
    }

    pub fn pushes_to(&self, user_id: Snowflake) -> Vec<PushEvent> {
        self.pushes
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| *id == user_id)
            .map(|(_, e)| e.clone())
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn push_to_user(&self, user_id: Snowflake, event: &PushEvent) -> usize {
        self.pushes.lock().unwrap().push((user_id, event.clone()));
        self.delivered_per_push
    }

    async fn push_to_users(&self, user_ids: &[Snowflake], event: &PushEvent) {
        for &user_id in user_ids {
            self.push_to_user(user_id, event).await;
        }
    }
}

/// Image store fake with controllable failure modes
#[derive(Default)]
pub struct FakeImageStore {
    pub fail_uploads: bool,
    pub fail_deletes: bool,
    pub(crate) counter: AtomicUsize,
    pub(crate) uploads: Mutex<Vec<String>>,
    pub(crate) deletes: Mutex<Vec<String>>,
}

impl FakeImageStore {
    pub fn uploads(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn deletes(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageStore for FakeImageStore {
    async fn upload(&self, data_uri: &str) -> Result<String, DomainError> {
        if self.fail_uploads {
            return Err(DomainError::ImageStoreError("upload failed".to_string()));
        }
        self.uploads.lock().unwrap().push(data_uri.to_string());
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(format!("https://images.test/{n}.png"))
    }

    async fn delete(&self, url: &str) -> Result<(), DomainError> {
        self.deletes.lock().unwrap().push(url.to_string());
        if self.fail_deletes {
            return Err(DomainError::ImageStoreError("delete failed".to_string()));
        }
        Ok(())
    }
}

/// Everything a service test needs, with handles to the fakes
pub struct TestHarness {
    pub ctx: ServiceContext,
    pub users: Arc<InMemoryUserRepo>,
    pub messages: Arc<InMemoryMessageRepo>,
    pub notifier: Arc<RecordingNotifier>,
    pub images: Arc<FakeImageStore>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with(RecordingNotifier::new(), FakeImageStore::default())
    }

    pub fn with(notifier: RecordingNotifier, images: FakeImageStore) -> Self {
        let users = Arc::new(InMemoryUserRepo::default());
        let messages = Arc::new(InMemoryMessageRepo::default());
        let notifier = Arc::new(notifier);
        let images = Arc::new(images);

        // Lazy pool: never connected, only carried by the context
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgresql://postgres@localhost/dm_test")
            .unwrap();

        let ctx = ServiceContextBuilder::new()
            .pool(pool)
            .user_repo(users.clone())
            .message_repo(messages.clone())
            .image_store(images.clone())
            .notifier(notifier.clone())
            .jwt_service(Arc::new(JwtService::new("test-secret", 3600)))
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
            .build()
            .unwrap();

        Self {
            ctx,
            users,
            messages,
            notifier,
            images,
        }
    }

    pub fn seed_user(&self, id: i64, name: &str) -> Snowflake {
        let id = Snowflake::new(id);
        self.users.insert(User::new(id, name.to_string()));
        id
    }
}
