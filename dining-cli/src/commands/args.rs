use clap::Args;
use dining_core::{PayerPolicy, TableConfig};

/// Table options shared by every command. Unset flags keep the config file value.
#[derive(Args, Debug, Default)]
pub struct TableArgs {
    /// Number of cryptographers at the table
    #[arg(short = 'n', long)]
    pub participants: Option<usize>,

    /// Who pays: a position, "nobody" or "random"
    #[arg(short, long, value_parser = parse_payer)]
    pub payer: Option<PayerPolicy>,

    /// Seed for reproducible runs
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Scripted coin flips, e.g. 1,0,1
    #[arg(long, value_delimiter = ',', value_parser = parse_coin)]
    pub coins: Option<Vec<bool>>,
}

impl TableArgs {
    pub fn apply(self, mut config: TableConfig) -> TableConfig {
        if let Some(participants) = self.participants {
            config.participants = participants;
        }
        if let Some(payer) = self.payer {
            config.payer = payer;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(coins) = self.coins {
            config.coins = Some(coins);
        }
        config
    }
}

fn parse_payer(s: &str) -> Result<PayerPolicy, String> {
    match s.to_ascii_lowercase().as_str() {
        "random" => Ok(PayerPolicy::Random),
        "nobody" | "none" | "nsa" => Ok(PayerPolicy::Nobody),
        other => other
            .parse::<usize>()
            .map(PayerPolicy::Cryptographer)
            .map_err(|_| format!("expected a position, 'nobody' or 'random', got '{}'", s)),
    }
}

fn parse_coin(s: &str) -> Result<bool, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "h" | "heads" => Ok(true),
        "0" | "false" | "t" | "tails" => Ok(false),
        _ => Err(format!("expected 1/0, true/false or heads/tails, got '{}'", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_payer() {
        assert_eq!(parse_payer("random").unwrap(), PayerPolicy::Random);
        assert_eq!(parse_payer("Nobody").unwrap(), PayerPolicy::Nobody);
        assert_eq!(parse_payer("2").unwrap(), PayerPolicy::Cryptographer(2));
        assert!(parse_payer("someone").is_err());
    }

    #[test]
    fn test_parse_coin() {
        assert!(parse_coin("1").unwrap());
        assert!(parse_coin("heads").unwrap());
        assert!(!parse_coin(" 0").unwrap());
        assert!(parse_coin("maybe").is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let base = TableConfig::new(5).with_seed(9);
        let args = TableArgs {
            participants: Some(3),
            payer: Some(PayerPolicy::Cryptographer(1)),
            seed: None,
            coins: Some(vec![true, false, true]),
        };

        let config = args.apply(base);
        assert_eq!(config.participants, 3);
        assert_eq!(config.payer, PayerPolicy::Cryptographer(1));
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.coins, Some(vec![true, false, true]));
    }
}
