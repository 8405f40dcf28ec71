//! # TimeNebula Core Library
//!
//! This library provides the core logic for TimeNebula, a work timer that
//! pays out a fixed reward for every elapsed hour of work. Each hour has to
//! be claimed and tagged with what it was spent on before work continues.
//! The CLI binary is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Session Engine**: A wall-clock-based state machine
//!   (`Idle -> Working -> Settlement`) that requires the caller to
//!   periodically invoke `check_time()`
//! - **Ledger**: Durable record of sessions and claimed hour chunks, with a
//!   SQLite implementation and an in-memory one
//! - **Clock Poller**: tokio loop that calls `check_time()` on a fixed cadence
//! - **Config**: TOML-based engine, poller and tag settings
//!
//! ## Key Components
//!
//! - [`SessionEngine`]: Core state machine
//! - [`Ledger`]: Storage contract, implemented by [`Database`] and [`MemoryLedger`]
//! - [`ClockPoller`]: Periodic time check driver
//! - [`Config`]: Application configuration management

pub mod clock;
pub mod error;
pub mod events;
pub mod ledger;
pub mod poller;
pub mod session;
pub mod storage;
pub mod time;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, PersistenceError};
pub use events::Event;
pub use ledger::{ChunkStatus, HourChunk, Ledger, MemoryLedger, NewHourChunk, Session, VaultSummary};
pub use poller::ClockPoller;
pub use session::{EngineState, EngineStatus, SessionEngine, Transition};
pub use storage::{Config, Database};
