use crate::constants::CLEANING_THRESHOLD;
use serde::Deserialize;

/// Per-user coffee tally together with the checkpoint taken at the last cleaning.
#[derive(Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct UserCounter {
    #[serde(rename = "id")]
    pub id: String,

    #[serde(rename = "count", default)]
    pub count: u64,

    #[serde(rename = "lastMaintenance", default)]
    pub last_maintenance: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleaningStatus {
    Due,
    CoffeesLeft(u64),
}

impl UserCounter {
    /// Record written by the first coffee of a user.
    pub fn first_coffee(id: &str) -> Self {
        Self {
            id: id.to_string(),
            count: 1,
            last_maintenance: 0,
        }
    }

    pub fn empty(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Default::default()
        }
    }

    pub fn cleaning_status(&self) -> CleaningStatus {
        let due_at = self.last_maintenance.saturating_add(CLEANING_THRESHOLD);

        if self.count >= due_at {
            CleaningStatus::Due
        } else {
            CleaningStatus::CoffeesLeft(due_at - self.count)
        }
    }
}
