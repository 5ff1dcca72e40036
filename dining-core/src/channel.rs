//! One-shot coin channel shared by two neighbouring cryptographers.
//!
//! Each ring edge carries exactly one coin flip. Both ends are consumed on
//! use, so a second send or a second receive does not type-check.

use crate::error::{DiningError, Result};
use tokio::sync::oneshot;

/// Producer end, held by the cryptographer that flips the coin
#[derive(Debug)]
pub struct CoinSender {
    edge: usize,
    inner: oneshot::Sender<bool>,
}

/// Consumer end, held by the neighbour that combines the coin
#[derive(Debug)]
pub struct CoinReceiver {
    edge: usize,
    inner: oneshot::Receiver<bool>,
}

/// Create the channel for ring edge `edge` (from cryptographer `edge` to its successor)
pub fn coin_channel(edge: usize) -> (CoinSender, CoinReceiver) {
    let (tx, rx) = oneshot::channel();
    (
        CoinSender { edge, inner: tx },
        CoinReceiver { edge, inner: rx },
    )
}

impl CoinSender {
    pub fn edge(&self) -> usize {
        self.edge
    }

    pub fn send(self, coin: bool) -> Result<()> {
        let edge = self.edge;
        self.inner
            .send(coin)
            .map_err(|_| DiningError::ChannelClosed { edge })
    }
}

impl CoinReceiver {
    pub fn edge(&self) -> usize {
        self.edge
    }

    /// Wait for the neighbour's coin
    pub async fn receive(self) -> Result<bool> {
        let edge = self.edge;
        self.inner
            .await
            .map_err(|_| DiningError::ChannelClosed { edge })
    }
}
