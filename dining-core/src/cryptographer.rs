use crate::channel::{CoinReceiver, CoinSender};
use crate::error::{DiningError, Result};
use crate::types::Broadcast;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Cryptographer progress through the protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CryptographerState {
    Seated,
    Flipped,
    Broadcast,
}

/// One seat at the table
pub struct Cryptographer {
    position: usize,
    is_payer: bool,
    local_bit: Option<bool>,
    received_bit: Option<bool>,
    public_bit: Option<bool>,
}

/// `local XOR received`, negated when paying
pub fn broadcast_bit(local_bit: bool, received_bit: bool, is_payer: bool) -> bool {
    local_bit ^ received_bit ^ is_payer
}

impl Cryptographer {
    pub fn new(position: usize) -> Self {
        Self {
            position,
            is_payer: false,
            local_bit: None,
            received_bit: None,
            public_bit: None,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_payer(&self) -> bool {
        self.is_payer
    }

    pub fn state(&self) -> CryptographerState {
        if self.public_bit.is_some() {
            CryptographerState::Broadcast
        } else if self.local_bit.is_some() {
            CryptographerState::Flipped
        } else {
            CryptographerState::Seated
        }
    }

    pub fn local_bit(&self) -> Option<bool> {
        self.local_bit
    }

    pub fn received_bit(&self) -> Option<bool> {
        self.received_bit
    }

    /// The only value this cryptographer ever makes public
    pub fn broadcast(&self) -> Result<Broadcast> {
        let bit = self.public_bit.ok_or(DiningError::BroadcastUnavailable {
            position: self.position,
        })?;

        Ok(Broadcast {
            position: self.position,
            bit,
        })
    }

    /// Mark this cryptographer as the one paying the bill. Only valid before flipping.
    pub(crate) fn set_payer(&mut self) -> Result<()> {
        if self.local_bit.is_some() {
            return Err(DiningError::AlreadyFlipped {
                position: self.position,
            });
        }

        self.is_payer = true;
        Ok(())
    }

    /// Flip a fair coin and share it with the successor on the ring
    pub fn flip_and_share<R: Rng + ?Sized>(&mut self, rng: &mut R, out: CoinSender) -> Result<()> {
        let coin = rng.gen_bool(0.5);
        self.share_coin(coin, out)
    }

    /// Share an already drawn coin with the successor on the ring
    pub fn share_coin(&mut self, coin: bool, out: CoinSender) -> Result<()> {
        if self.local_bit.is_some() {
            return Err(DiningError::AlreadyFlipped {
                position: self.position,
            });
        }

        self.local_bit = Some(coin);
        out.send(coin)?;

        // local diagnostic only, never part of what the other seats see
        tracing::debug!(
            target: "dining_core::private",
            "Cryptographer {} coin flip was: {}",
            self.position,
            coin
        );
        Ok(())
    }

    /// Receive the predecessor's coin and compute the public bit
    pub async fn receive_and_combine(&mut self, input: CoinReceiver) -> Result<bool> {
        let local_bit = self.local_bit.ok_or(DiningError::NotFlipped {
            position: self.position,
        })?;

        if self.public_bit.is_some() {
            return Err(DiningError::AlreadyCombined {
                position: self.position,
            });
        }

        let received_bit = input.receive().await?;
        let public_bit = broadcast_bit(local_bit, received_bit, self.is_payer);

        self.received_bit = Some(received_bit);
        self.public_bit = Some(public_bit);

        tracing::debug!("Cryptographer {} combined its coins", self.position);
        Ok(public_bit)
    }
}

impl std::fmt::Debug for Cryptographer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cryptographer")
            .field("position", &self.position)
            .field("state", &self.state())
            .field("public_bit", &self.public_bit)
            .finish()
    }
}
