/// Coffees between two cleanings of the machine.
pub const CLEANING_THRESHOLD: u64 = 40;

/// Increment-or-create attempts before giving up. One retry covers a concurrent first write.
pub const MAX_INCREMENT_ATTEMPTS: usize = 2;

pub const DEFAULT_LOCALE: &str = "en-US";

// key-value attributes
pub const ID_ATTR: &str = "id";
pub const COUNT_ATTR: &str = "count";
pub const LAST_MAINTENANCE_ATTR: &str = "lastMaintenance";
