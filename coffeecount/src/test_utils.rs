//! Shared fixtures for unit tests.

use crate::api::types::{IntentData, RequestType, Session, SkillRequest, User};
use crate::app::{App, Config};
use crate::errors::CoffeeError;
use crate::intents::Dispatcher;
use crate::models::UserCounter;
use crate::resources::localizer::Localizer;
use crate::resources::random::RandomChoice;
use crate::services::{Conditional, CounterBackend, CounterStore, MemoryBackend};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Barrier;

pub const TEST_USER: &str = "test-user";

/// Always picks the same variant.
pub struct FixedChoice(pub usize);

impl RandomChoice for FixedChoice {
    fn choose(&self, _len: usize) -> usize {
        self.0
    }
}

pub fn test_localizer() -> Localizer {
    Localizer::new("en-US", Arc::new(FixedChoice(0))).expect("bundled locales should be valid")
}

/// App wired to an in-memory store and deterministic speech.
pub fn test_app() -> App {
    let config = Config::parse(
        r#"
        port = 8080

        [store]
        backend = "memory"
        "#,
    )
    .expect("test config should parse");

    App {
        config,
        counter_store: CounterStore::new(Arc::new(MemoryBackend::new())),
        localizer: Arc::new(test_localizer()),
        dispatcher: Arc::new(Dispatcher::default()),
    }
}

pub fn request(request_type: RequestType) -> SkillRequest {
    SkillRequest {
        request_type,
        intent: None,
        session: Session {
            user: User {
                user_id: TEST_USER.to_string(),
            },
        },
        locale: "en-US".to_string(),
        reason: None,
        error: None,
    }
}

pub fn intent_request(name: &str) -> SkillRequest {
    let mut req = request(RequestType::IntentRequest);
    req.intent = Some(IntentData { name: name.to_string() });

    req
}

pub fn outage_store() -> CounterStore {
    CounterStore::new(Arc::new(OutageBackend))
}

/// Every call fails like an unreachable key-value service.
pub struct OutageBackend;

impl OutageBackend {
    fn unavailable() -> CoffeeError {
        CoffeeError::StoreError("service unavailable".to_string())
    }
}

#[async_trait]
impl CounterBackend for OutageBackend {
    async fn find(&self, _id: &str) -> Result<Option<UserCounter>, CoffeeError> {
        Err(Self::unavailable())
    }

    async fn increment_existing(&self, _id: &str) -> Result<Conditional<UserCounter>, CoffeeError> {
        Err(Self::unavailable())
    }

    async fn insert_if_absent(&self, _counter: &UserCounter) -> Result<Conditional<()>, CoffeeError> {
        Err(Self::unavailable())
    }

    async fn set_last_maintenance(&self, _id: &str, _last_maintenance: u64) -> Result<(), CoffeeError> {
        Err(Self::unavailable())
    }
}

/// Rejects every conditional write and counts increment attempts.
#[derive(Default)]
pub struct ContentionBackend {
    attempts: AtomicUsize,
}

impl ContentionBackend {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CounterBackend for ContentionBackend {
    async fn find(&self, _id: &str) -> Result<Option<UserCounter>, CoffeeError> {
        Ok(None)
    }

    async fn increment_existing(&self, _id: &str) -> Result<Conditional<UserCounter>, CoffeeError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        Ok(Conditional::Rejected)
    }

    async fn insert_if_absent(&self, _counter: &UserCounter) -> Result<Conditional<()>, CoffeeError> {
        Ok(Conditional::Rejected)
    }

    async fn set_last_maintenance(&self, _id: &str, _last_maintenance: u64) -> Result<(), CoffeeError> {
        Ok(())
    }
}

/// Holds the first `writers` rejected increments at a barrier, so all of them try to
/// create the record before any of them retries.
pub struct RacingBackend {
    inner: MemoryBackend,
    barrier: Barrier,
    writers: usize,
    rejected: AtomicUsize,
}

impl RacingBackend {
    pub fn new(writers: usize) -> Self {
        Self {
            inner: MemoryBackend::new(),
            barrier: Barrier::new(writers),
            writers,
            rejected: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CounterBackend for RacingBackend {
    async fn find(&self, id: &str) -> Result<Option<UserCounter>, CoffeeError> {
        self.inner.find(id).await
    }

    async fn increment_existing(&self, id: &str) -> Result<Conditional<UserCounter>, CoffeeError> {
        let res = self.inner.increment_existing(id).await?;

        if res == Conditional::Rejected && self.rejected.fetch_add(1, Ordering::SeqCst) < self.writers {
            self.barrier.wait().await;
        }

        Ok(res)
    }

    async fn insert_if_absent(&self, counter: &UserCounter) -> Result<Conditional<()>, CoffeeError> {
        self.inner.insert_if_absent(counter).await
    }

    async fn set_last_maintenance(&self, id: &str, last_maintenance: u64) -> Result<(), CoffeeError> {
        self.inner.set_last_maintenance(id, last_maintenance).await
    }
}
