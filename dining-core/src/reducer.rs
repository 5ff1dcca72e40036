//! Consumers of the finished broadcasts.
//!
//! [`Observer`] and [`Owner`] see only the public bits. [`CryptographerZero`]
//! additionally knows every raw coin and can therefore trace the payer.

use crate::error::{DiningError, Result};
use crate::types::{Broadcast, OwnerVerdict, Payer, TraceOutcome};

/// Announces each public bit by position
pub struct Observer;

impl Observer {
    pub fn announcement(broadcast: &Broadcast) -> String {
        format!(
            "Cryptographer {}'s broadcast message was: {}",
            broadcast.position, broadcast.bit
        )
    }

    pub fn announce(broadcasts: &[Broadcast]) -> Vec<String> {
        broadcasts
            .iter()
            .map(|broadcast| {
                let line = Self::announcement(broadcast);
                tracing::info!("Observer > {}", line);
                line
            })
            .collect()
    }
}

/// The public reducer: learns whether someone at the table paid, never who
pub struct Owner;

impl Owner {
    /// XOR of every public bit
    pub fn parity(broadcasts: &[Broadcast]) -> bool {
        broadcasts.iter().fold(false, |acc, b| acc ^ b.bit)
    }

    pub fn verdict(broadcasts: &[Broadcast]) -> OwnerVerdict {
        let verdict = if Self::parity(broadcasts) {
            OwnerVerdict::CryptographerPaid
        } else {
            OwnerVerdict::OutsiderPaid
        };

        tracing::info!("Owner > {}", verdict);
        verdict
    }
}

/// The privileged reducer. Chose the payer and can see every coin.
pub struct CryptographerZero {
    selected: Payer,
}

impl CryptographerZero {
    pub fn new(selected: Payer) -> Self {
        Self { selected }
    }

    /// Bit cryptographer `position` broadcasts when it is not paying
    pub fn expected_bit(coins: &[bool], position: usize) -> bool {
        let n = coins.len();
        coins[position] ^ coins[(position + n - 1) % n]
    }

    /// Positions whose broadcast disagrees with the non-payer expectation
    pub fn mismatches(coins: &[bool], broadcasts: &[Broadcast]) -> Result<Vec<usize>> {
        if coins.len() != broadcasts.len() {
            return Err(DiningError::internal(format!(
                "Got {} coins for {} broadcasts",
                coins.len(),
                broadcasts.len()
            )));
        }

        let mut mismatches = Vec::new();
        for broadcast in broadcasts {
            if broadcast.position >= coins.len() {
                return Err(DiningError::internal(format!(
                    "Broadcast from unknown position {}",
                    broadcast.position
                )));
            }

            if Self::expected_bit(coins, broadcast.position) != broadcast.bit {
                mismatches.push(broadcast.position);
            }
        }

        mismatches.sort_unstable();
        Ok(mismatches)
    }

    /// Identify the payer and check it against the selection
    pub fn trace(&self, coins: &[bool], broadcasts: &[Broadcast]) -> Result<TraceOutcome> {
        let mismatches = Self::mismatches(coins, broadcasts)?;

        let outcome = match (mismatches.as_slice(), self.selected) {
            ([], Payer::Nobody) => TraceOutcome::NobodyPaid,
            ([position], Payer::Cryptographer(selected)) if *position == selected => {
                TraceOutcome::Paid(selected)
            }
            _ => TraceOutcome::ProtocolViolation {
                selected: self.selected,
                mismatches,
            },
        };

        if outcome.is_violation() {
            tracing::warn!("CryptographerZero > {}", outcome);
        } else {
            tracing::info!(target: "dining_core::private", "CryptographerZero > {}", outcome);
        }

        Ok(outcome)
    }
}
