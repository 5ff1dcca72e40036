use crate::config::PayerPolicy;
use crate::cryptographer::Cryptographer;
use crate::error::{DiningError, Result};
use crate::types::Payer;
use rand::Rng;

/// Draw a payer uniformly from the `participants` seats plus "nobody"
pub fn draw_payer<R: Rng + ?Sized>(rng: &mut R, participants: usize) -> Payer {
    let draw = rng.gen_range(0..=participants);
    if draw == participants {
        Payer::Nobody
    } else {
        Payer::Cryptographer(draw)
    }
}

/// Decides who pays. Must run before any cryptographer flips.
pub struct PayerSelector {
    policy: PayerPolicy,
}

impl PayerSelector {
    pub fn new(policy: PayerPolicy) -> Self {
        Self { policy }
    }

    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R, participants: usize) -> Result<Payer> {
        match self.policy {
            PayerPolicy::Random => Ok(draw_payer(rng, participants)),
            PayerPolicy::Nobody => Ok(Payer::Nobody),
            PayerPolicy::Cryptographer(position) if position < participants => {
                Ok(Payer::Cryptographer(position))
            }
            PayerPolicy::Cryptographer(position) => Err(DiningError::PayerOutOfRange {
                payer: position,
                participants,
            }),
        }
    }

    /// Choose a payer and mark them at the table
    pub fn choose_payer<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        cryptographers: &mut [Cryptographer],
    ) -> Result<Payer> {
        let payer = self.choose(rng, cryptographers.len())?;
        seat_payer(cryptographers, payer)?;

        match payer {
            Payer::Nobody => tracing::info!(
                target: "dining_core::private",
                "Chooses no cryptographer as payer. NSA pays."
            ),
            Payer::Cryptographer(position) => tracing::info!(
                target: "dining_core::private",
                "Chooses cryptographer {} as payer.",
                position
            ),
        }

        Ok(payer)
    }
}

/// Mark `payer` at the table. At most one cryptographer is ever marked.
pub fn seat_payer(cryptographers: &mut [Cryptographer], payer: Payer) -> Result<()> {
    if cryptographers.iter().any(|c| c.is_payer()) {
        return Err(DiningError::PayerAlreadySeated);
    }

    if let Payer::Cryptographer(position) = payer {
        let participants = cryptographers.len();
        let cryptographer =
            cryptographers
                .get_mut(position)
                .ok_or(DiningError::PayerOutOfRange {
                    payer: position,
                    participants,
                })?;
        cryptographer.set_payer()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn table(n: usize) -> Vec<Cryptographer> {
        (0..n).map(Cryptographer::new).collect()
    }

    #[test]
    fn test_draw_covers_every_outcome() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut counts = [0usize; 4];

        for _ in 0..4000 {
            match draw_payer(&mut rng, 3) {
                Payer::Cryptographer(position) => counts[position] += 1,
                Payer::Nobody => counts[3] += 1,
            }
        }

        // roughly uniform: each bucket expects 1000
        for count in counts {
            assert!((800..1200).contains(&count), "skewed draw: {:?}", counts);
        }
    }

    #[test]
    fn test_choose_payer_marks_exactly_one() {
        let mut rng = StdRng::seed_from_u64(1);
        let selector = PayerSelector::new(PayerPolicy::Cryptographer(2));
        let mut cryptographers = table(3);

        let payer = selector.choose_payer(&mut rng, &mut cryptographers).unwrap();
        assert_eq!(payer, Payer::Cryptographer(2));

        let marked: Vec<usize> = cryptographers
            .iter()
            .filter(|c| c.is_payer())
            .map(|c| c.position())
            .collect();
        assert_eq!(marked, vec![2]);
    }

    #[test]
    fn test_nobody_marks_nobody() {
        let mut rng = StdRng::seed_from_u64(1);
        let selector = PayerSelector::new(PayerPolicy::Nobody);
        let mut cryptographers = table(4);

        let payer = selector.choose_payer(&mut rng, &mut cryptographers).unwrap();
        assert_eq!(payer, Payer::Nobody);
        assert!(cryptographers.iter().all(|c| !c.is_payer()));
    }

    #[test]
    fn test_second_payer_is_rejected() {
        let mut cryptographers = table(3);
        seat_payer(&mut cryptographers, Payer::Cryptographer(0)).unwrap();

        let result = seat_payer(&mut cryptographers, Payer::Cryptographer(1));
        assert!(matches!(result, Err(DiningError::PayerAlreadySeated)));
    }

    #[test]
    fn test_out_of_range_payer_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let selector = PayerSelector::new(PayerPolicy::Cryptographer(5));

        let result = selector.choose_payer(&mut rng, &mut table(3));
        assert!(matches!(
            result,
            Err(DiningError::PayerOutOfRange {
                payer: 5,
                participants: 3
            })
        ));
    }
}
