//! Dining Cryptographers - anonymous broadcast of a single bit
//!
//! A ring of cryptographers learns whether one of them paid the bill
//! without learning which one. Each cryptographer shares a coin flip with
//! its successor, broadcasts the XOR of its own and its predecessor's coin
//! (negated if paying), and the XOR of all broadcasts reveals whether
//! anyone at the table paid.

pub mod channel;
pub mod config;
pub mod cryptographer;
pub mod error;
pub mod payer;
pub mod protocol;
pub mod reducer;
pub mod simulation;
pub mod types;

pub use config::{PayerPolicy, TableConfig};
pub use cryptographer::{Cryptographer, CryptographerState};
pub use error::{DiningError, Result};
pub use protocol::{DiningTable, Phase};
pub use reducer::{CryptographerZero, Observer, Owner};
pub use simulation::{simulate, SimulationReport};
pub use types::{Broadcast, OwnerVerdict, Payer, RunTranscript, TraceOutcome};

/// Seat a table, choose the payer and run the protocol once
pub async fn run_table(config: TableConfig) -> Result<RunTranscript> {
    DiningTable::new(config)?.run().await
}
