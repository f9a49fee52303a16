mod counter_backend;
mod counter_store;
mod dynamo_backend;
mod memory_backend;

pub use counter_backend::{Conditional, CounterBackend};
pub use counter_store::CounterStore;
pub use dynamo_backend::DynamoBackend;
pub use memory_backend::MemoryBackend;
