use crate::constants::MAX_INCREMENT_ATTEMPTS;
use crate::errors::CoffeeError;
use crate::models::UserCounter;
use crate::services::{Conditional, CounterBackend};
use std::sync::Arc;

/// Durable per-user coffee counters.
///
/// Every mutation goes through a conditional write of the backend, so no
/// in-process locking is needed and the store can be shared between requests.
#[derive(Clone)]
pub struct CounterStore {
    backend: Arc<dyn CounterBackend>,
}

impl CounterStore {
    pub fn new(backend: Arc<dyn CounterBackend>) -> Self {
        Self { backend }
    }

    pub async fn get_count(&self, id: &str) -> Result<u64, CoffeeError> {
        let counter = self.get_counter_details(id).await?;

        Ok(counter.count)
    }

    /// Returns a zeroed counter for unknown ids.
    pub async fn get_counter_details(&self, id: &str) -> Result<UserCounter, CoffeeError> {
        let counter = self.backend.find(id).await.map_err(logged("read", id))?;

        Ok(counter.unwrap_or_else(|| UserCounter::empty(id)))
    }

    /// Adds one coffee, creating the record on the first one.
    ///
    /// When two first writes race, the loser's create is rejected and it retries the
    /// increment against the winner's record, so neither coffee is lost.
    pub async fn increment_count(&self, id: &str) -> Result<UserCounter, CoffeeError> {
        for attempt in 1..=MAX_INCREMENT_ATTEMPTS {
            let incremented = self
                .backend
                .increment_existing(id)
                .await
                .map_err(logged("increment", id))?;

            if let Conditional::Applied(counter) = incremented {
                return Ok(counter);
            }

            let counter = UserCounter::first_coffee(id);
            let created = self
                .backend
                .insert_if_absent(&counter)
                .await
                .map_err(logged("create", id))?;

            match created {
                Conditional::Applied(()) => return Ok(counter),
                Conditional::Rejected => {
                    log::debug!("Counter {} was created concurrently (attempt {})", id, attempt);
                }
            }
        }

        let err = CoffeeError::StoreContention(id.to_string());
        log::error!("{}", err);

        Err(err)
    }

    /// Not atomic with the read that produced `count`: an increment landing in between
    /// is not reflected in the checkpoint.
    pub async fn record_maintenance(&self, id: &str, count: u64) -> Result<(), CoffeeError> {
        self.backend
            .set_last_maintenance(id, count)
            .await
            .map_err(logged("record maintenance for", id))
    }
}

fn logged<'a>(operation: &'a str, id: &'a str) -> impl FnOnce(CoffeeError) -> CoffeeError + 'a {
    move |e| {
        log::error!("Failed to {} counter {}: {}", operation, id, e);

        e
    }
}
