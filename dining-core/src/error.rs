use thiserror::Error;

use crate::protocol::Phase;

pub type Result<T> = std::result::Result<T, DiningError>;

#[derive(Error, Debug)]
pub enum DiningError {
    #[error("Coin channel {edge} closed before a value was exchanged")]
    ChannelClosed { edge: usize },

    #[error("Cryptographer {position} has not flipped a coin yet")]
    NotFlipped { position: usize },

    #[error("Cryptographer {position} already flipped a coin")]
    AlreadyFlipped { position: usize },

    #[error("Cryptographer {position} already combined its coins")]
    AlreadyCombined { position: usize },

    #[error("Broadcast of cryptographer {position} is not available yet")]
    BroadcastUnavailable { position: usize },

    #[error("Payer {payer} is out of range for {participants} cryptographers")]
    PayerOutOfRange { payer: usize, participants: usize },

    #[error("A payer has already been seated at this table")]
    PayerAlreadySeated,

    #[error("{phase} phase incomplete: {completed} of {expected} cryptographers finished")]
    PhaseIncomplete {
        phase: Phase,
        completed: usize,
        expected: usize,
    },

    #[error("Cryptographer task failed: {0}")]
    TaskFailed(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DiningError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<tokio::task::JoinError> for DiningError {
    fn from(err: tokio::task::JoinError) -> Self {
        DiningError::TaskFailed(err.to_string())
    }
}
