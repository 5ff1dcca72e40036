use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Who pays the bill. Known only to the payer selector (and the payer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payer {
    Nobody,
    Cryptographer(usize),
}

impl Payer {
    pub fn position(&self) -> Option<usize> {
        match self {
            Payer::Nobody => None,
            Payer::Cryptographer(position) => Some(*position),
        }
    }
}

impl fmt::Display for Payer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payer::Nobody => write!(f, "nobody at the table"),
            Payer::Cryptographer(position) => write!(f, "cryptographer {}", position),
        }
    }
}

/// A public bit announced by one cryptographer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Broadcast {
    pub position: usize,
    pub bit: bool,
}

/// What the owner learns from the broadcasts alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerVerdict {
    CryptographerPaid,
    OutsiderPaid,
}

impl fmt::Display for OwnerVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwnerVerdict::CryptographerPaid => write!(f, "A cryptographer has paid the bill"),
            OwnerVerdict::OutsiderPaid => write!(f, "The NSA must have paid the bill"),
        }
    }
}

/// What cryptographer zero concludes with knowledge of every coin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceOutcome {
    Paid(usize),
    NobodyPaid,
    /// The broadcasts disagree with the coins and the selected payer.
    ProtocolViolation {
        selected: Payer,
        mismatches: Vec<usize>,
    },
}

impl TraceOutcome {
    pub fn is_violation(&self) -> bool {
        matches!(self, TraceOutcome::ProtocolViolation { .. })
    }

    /// The payer this trace points at, if the trace is consistent
    pub fn payer(&self) -> Option<Payer> {
        match self {
            TraceOutcome::Paid(position) => Some(Payer::Cryptographer(*position)),
            TraceOutcome::NobodyPaid => Some(Payer::Nobody),
            TraceOutcome::ProtocolViolation { .. } => None,
        }
    }
}

impl fmt::Display for TraceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceOutcome::Paid(position) => write!(f, "Cryptographer {} paid", position),
            TraceOutcome::NobodyPaid => write!(f, "The NSA paid"),
            TraceOutcome::ProtocolViolation {
                selected,
                mismatches,
            } => write!(
                f,
                "Protocol violation: selected {} but broadcasts mismatch at {:?}",
                selected, mismatches
            ),
        }
    }
}

/// Everything observable by anyone at (or outside) the table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicRecord {
    pub broadcasts: Vec<Broadcast>,
    pub verdict: OwnerVerdict,
}

/// Ground truth, known only to the selector and cryptographer zero
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivateRecord {
    pub payer: Payer,
    pub coins: Vec<bool>,
    pub received: Vec<bool>,
    pub trace: TraceOutcome,
}

/// Full record of one protocol run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunTranscript {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub participants: usize,
    pub public: PublicRecord,
    pub private: PrivateRecord,
}

impl RunTranscript {
    pub fn public_bits(&self) -> Vec<bool> {
        self.public.broadcasts.iter().map(|b| b.bit).collect()
    }

    /// True when the owner's verdict agrees with the selected payer
    pub fn parity_holds(&self) -> bool {
        let someone_paid = self.private.payer != Payer::Nobody;
        let verdict_says_paid = self.public.verdict == OwnerVerdict::CryptographerPaid;
        someone_paid == verdict_says_paid
    }

    pub fn trace_correct(&self) -> bool {
        self.private.trace.payer() == Some(self.private.payer)
    }
}
