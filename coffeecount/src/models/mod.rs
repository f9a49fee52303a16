mod user_counter;

pub use user_counter::{CleaningStatus, UserCounter};
