use crate::errors::CoffeeError;
use crate::models::UserCounter;
use async_trait::async_trait;

/// Outcome of a conditional write. `Rejected` means the precondition did not hold,
/// which is an expected result and not a backend failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conditional<T> {
    Applied(T),
    Rejected,
}

/// Key-value primitives the counter store is built on.
#[async_trait]
pub trait CounterBackend: Send + Sync {
    async fn find(&self, id: &str) -> Result<Option<UserCounter>, CoffeeError>;

    /// Adds one to `count` only if a record for `id` already exists.
    async fn increment_existing(&self, id: &str) -> Result<Conditional<UserCounter>, CoffeeError>;

    /// Writes `counter` only if no record with the same id exists.
    async fn insert_if_absent(&self, counter: &UserCounter) -> Result<Conditional<()>, CoffeeError>;

    async fn set_last_maintenance(&self, id: &str, last_maintenance: u64) -> Result<(), CoffeeError>;
}
