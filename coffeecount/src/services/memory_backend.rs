use crate::errors::CoffeeError;
use crate::models::UserCounter;
use crate::services::{Conditional, CounterBackend};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Process-local backend. Each primitive holds the shard lock for the key, so the
/// conditional writes behave like their key-value store counterparts.
#[derive(Default)]
pub struct MemoryBackend {
    counters: DashMap<String, UserCounter>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CounterBackend for MemoryBackend {
    async fn find(&self, id: &str) -> Result<Option<UserCounter>, CoffeeError> {
        Ok(self.counters.get(id).map(|counter| counter.value().clone()))
    }

    async fn increment_existing(&self, id: &str) -> Result<Conditional<UserCounter>, CoffeeError> {
        match self.counters.get_mut(id) {
            Some(mut counter) => {
                counter.count += 1;

                Ok(Conditional::Applied(counter.clone()))
            }
            None => Ok(Conditional::Rejected),
        }
    }

    async fn insert_if_absent(&self, counter: &UserCounter) -> Result<Conditional<()>, CoffeeError> {
        match self.counters.entry(counter.id.clone()) {
            Entry::Occupied(_) => Ok(Conditional::Rejected),
            Entry::Vacant(entry) => {
                entry.insert(counter.clone());

                Ok(Conditional::Applied(()))
            }
        }
    }

    async fn set_last_maintenance(&self, id: &str, last_maintenance: u64) -> Result<(), CoffeeError> {
        let mut counter = self
            .counters
            .entry(id.to_string())
            .or_insert_with(|| UserCounter::empty(id));

        counter.last_maintenance = last_maintenance;

        Ok(())
    }
}
