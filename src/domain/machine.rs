// ==========================================
// Machine Shop APS - Machine Entity
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A machine on the shop floor.
///
/// `release_date` is the timestamp at which the machine next becomes
/// free; the schedule builder never writes it back, it advances its
/// own `MachineSchedule` copy instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub id: i64,
    pub name: String,
    /// When the machine is next available.
    pub release_date: NaiveDateTime,
    /// Capability tags this machine supports, e.g. ["3-axis", "lathe"].
    pub types: Vec<String>,
}

impl Machine {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        release_date: NaiveDateTime,
        types: Vec<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            release_date,
            types,
        }
    }
}
