//! Two-phase protocol coordinator.
//!
//! Cryptographer `i` shares its coin with `i + 1 mod N` and receives from
//! `i - 1 mod N`. Every cryptographer finishes flipping before any starts
//! combining; the [`PhaseBarrier`] between the two is the only ordering.

mod barrier;

pub use barrier::{Phase, PhaseBarrier};

use crate::channel::{coin_channel, CoinReceiver, CoinSender};
use crate::config::TableConfig;
use crate::cryptographer::Cryptographer;
use crate::error::{DiningError, Result};
use crate::payer::PayerSelector;
use crate::reducer::{CryptographerZero, Observer, Owner};
use crate::types::{Payer, PrivateRecord, PublicRecord, RunTranscript};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Where a cryptographer's coin comes from
enum CoinSource {
    Random(StdRng),
    Scripted(bool),
}

/// A table of cryptographers with its payer already chosen
pub struct DiningTable {
    id: Uuid,
    config: TableConfig,
    rng: StdRng,
    cryptographers: Vec<Cryptographer>,
    payer: Payer,
}

impl DiningTable {
    /// Seat the cryptographers and choose who pays
    pub fn new(config: TableConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut cryptographers: Vec<Cryptographer> =
            (0..config.participants).map(Cryptographer::new).collect();
        let payer = PayerSelector::new(config.payer).choose_payer(&mut rng, &mut cryptographers)?;

        let id = Uuid::new_v4();
        tracing::info!(
            "Table {} seated {} cryptographers",
            id,
            cryptographers.len()
        );

        Ok(Self {
            id,
            config,
            rng,
            cryptographers,
            payer,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn participants(&self) -> usize {
        self.cryptographers.len()
    }

    /// Ground truth; only the selector and cryptographer zero may look
    pub fn payer(&self) -> Payer {
        self.payer
    }

    /// Run both phases and both reducers
    pub async fn run(mut self) -> Result<RunTranscript> {
        let started_at = Utc::now();
        let n = self.cryptographers.len();

        let (senders, mut receivers): (Vec<CoinSender>, Vec<CoinReceiver>) =
            (0..n).map(coin_channel).unzip();
        // receivers[i] now carries edge i - 1
        receivers.rotate_right(1);

        let sources: Vec<CoinSource> = match &self.config.coins {
            Some(coins) => coins.iter().copied().map(CoinSource::Scripted).collect(),
            None => (0..n)
                .map(|_| CoinSource::Random(StdRng::seed_from_u64(self.rng.gen())))
                .collect(),
        };

        let flips: Vec<JoinHandle<Result<Cryptographer>>> = self
            .cryptographers
            .into_iter()
            .zip(senders)
            .zip(sources)
            .map(|((mut cryptographer, out), source)| {
                tokio::spawn(async move {
                    match source {
                        CoinSource::Random(mut rng) => cryptographer.flip_and_share(&mut rng, out)?,
                        CoinSource::Scripted(coin) => cryptographer.share_coin(coin, out)?,
                    }
                    Ok::<_, DiningError>(cryptographer)
                })
            })
            .collect();
        let cryptographers = PhaseBarrier::new(Phase::Flip, n).wait(flips).await?;
        tracing::info!("Table {} flip phase complete", self.id);

        let combines: Vec<JoinHandle<Result<Cryptographer>>> = cryptographers
            .into_iter()
            .zip(receivers)
            .map(|(mut cryptographer, input)| {
                tokio::spawn(async move {
                    cryptographer.receive_and_combine(input).await?;
                    Ok::<_, DiningError>(cryptographer)
                })
            })
            .collect();
        let cryptographers = PhaseBarrier::new(Phase::Combine, n).wait(combines).await?;
        tracing::info!("Table {} combine phase complete", self.id);

        let broadcasts = cryptographers
            .iter()
            .map(Cryptographer::broadcast)
            .collect::<Result<Vec<_>>>()?;
        Observer::announce(&broadcasts);
        let verdict = Owner::verdict(&broadcasts);

        let coins = cryptographers
            .iter()
            .map(|c| {
                c.local_bit().ok_or(DiningError::NotFlipped {
                    position: c.position(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let received = cryptographers
            .iter()
            .map(|c| {
                c.received_bit().ok_or(DiningError::BroadcastUnavailable {
                    position: c.position(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let trace = CryptographerZero::new(self.payer).trace(&coins, &broadcasts)?;

        Ok(RunTranscript {
            id: self.id,
            started_at,
            participants: n,
            public: PublicRecord {
                broadcasts,
                verdict,
            },
            private: PrivateRecord {
                payer: self.payer,
                coins,
                received,
                trace,
            },
        })
    }
}

impl std::fmt::Debug for DiningTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiningTable")
            .field("id", &self.id)
            .field("participants", &self.cryptographers.len())
            .field("scripted", &self.config.coins.is_some())
            .finish()
    }
}
