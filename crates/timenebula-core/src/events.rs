use serde::{Deserialize, Serialize};

use crate::session::EngineStatus;

/// Every state change in the engine produces an Event.
/// Front ends print or render them; timestamps are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    WorkStarted {
        session_id: i64,
        /// False when the ledger refused the session and a fallback id is in use.
        durable: bool,
        at: u64,
    },
    WorkStopped {
        session_id: Option<i64>,
        worked_ms: u64,
        at: u64,
    },
    /// One or more time-units elapsed and are waiting to be claimed.
    SettlementDue {
        unclaimed_hours: u64,
        at: u64,
    },
    /// Claim flow entered by hand rather than by elapsed time.
    SettlementForced {
        unclaimed_hours: u64,
        at: u64,
    },
    SettlementCompleted {
        /// Ledger id of the recorded chunk; `None` if it was not recorded.
        chunk_id: Option<i64>,
        project: String,
        amount: u64,
        total_assets: u64,
        unclaimed_hours: u64,
        last_settled_time: u64,
        at: u64,
    },
    /// Direct credit that bypasses the ledger.
    AssetsAdded {
        amount: u64,
        total_assets: u64,
        at: u64,
    },
    StateSnapshot {
        status: EngineStatus,
        session_id: Option<i64>,
        start_time: Option<u64>,
        last_settled_time: Option<u64>,
        total_assets: u64,
        hourly_rate: u64,
        unclaimed_hours: u64,
        time_unit_ms: u64,
        /// Time left until the next unit is due; only while working.
        next_unit_in_ms: Option<u64>,
        at: u64,
    },
}
