use crate::error::{DiningError, Result};
use serde::{Deserialize, Serialize};

pub const MIN_PARTICIPANTS: usize = 3;
pub const MAX_PARTICIPANTS: usize = 64;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub participants: usize,
    pub payer: PayerPolicy,
    /// Fixed seed for reproducible runs. Entropy seeded when absent.
    pub seed: Option<u64>,
    /// Scripted coin flips, one per cryptographer. Replaces the random flips.
    pub coins: Option<Vec<bool>>,
}

/// How the payer selector picks who pays the bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayerPolicy {
    /// Uniform over every cryptographer plus "nobody"
    Random,
    Nobody,
    Cryptographer(usize),
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            participants: MIN_PARTICIPANTS,
            payer: PayerPolicy::Random,
            seed: None,
            coins: None,
        }
    }
}

impl TableConfig {
    pub fn new(participants: usize) -> Self {
        Self {
            participants,
            ..Self::default()
        }
    }

    pub fn with_payer(mut self, payer: PayerPolicy) -> Self {
        self.payer = payer;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_coins(mut self, coins: Vec<bool>) -> Self {
        self.coins = Some(coins);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.participants < MIN_PARTICIPANTS {
            return Err(DiningError::config(format!(
                "At least {} cryptographers are required, got {}",
                MIN_PARTICIPANTS, self.participants
            )));
        }

        if self.participants > MAX_PARTICIPANTS {
            return Err(DiningError::config(format!(
                "At most {} cryptographers are supported, got {}",
                MAX_PARTICIPANTS, self.participants
            )));
        }

        if let Some(coins) = &self.coins {
            if coins.len() != self.participants {
                return Err(DiningError::config(format!(
                    "Expected {} scripted coins, got {}",
                    self.participants,
                    coins.len()
                )));
            }
        }

        if let PayerPolicy::Cryptographer(payer) = self.payer {
            if payer >= self.participants {
                return Err(DiningError::PayerOutOfRange {
                    payer,
                    participants: self.participants,
                });
            }
        }

        Ok(())
    }
}
