use crate::config::TableConfig;
use crate::error::Result;
use crate::protocol::DiningTable;
use crate::types::{Payer, RunTranscript};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate of many independent runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub participants: usize,
    pub rounds: usize,
    pub parity_failures: usize,
    pub correct_traces: usize,
    pub violations: usize,
    /// Draws per payer slot; the last slot is "nobody"
    pub payer_counts: Vec<usize>,
    /// Public bit patterns (bit `i` = broadcast of cryptographer `i`) per payer slot
    pub patterns: Vec<BTreeMap<u64, usize>>,
}

impl SimulationReport {
    pub fn new(participants: usize) -> Self {
        Self {
            participants,
            rounds: 0,
            parity_failures: 0,
            correct_traces: 0,
            violations: 0,
            payer_counts: vec![0; participants + 1],
            patterns: vec![BTreeMap::new(); participants + 1],
        }
    }

    pub fn slot(&self, payer: Payer) -> usize {
        payer.position().unwrap_or(self.participants)
    }

    pub fn record(&mut self, transcript: &RunTranscript) {
        let slot = self.slot(transcript.private.payer);

        self.rounds += 1;
        self.payer_counts[slot] += 1;
        if !transcript.parity_holds() {
            self.parity_failures += 1;
        }
        if transcript.trace_correct() {
            self.correct_traces += 1;
        }
        if transcript.private.trace.is_violation() {
            self.violations += 1;
        }

        let pattern = transcript
            .public
            .broadcasts
            .iter()
            .filter(|b| b.bit)
            .fold(0u64, |acc, b| acc | 1 << b.position);
        *self.patterns[slot].entry(pattern).or_insert(0) += 1;
    }

    /// Largest share any single public pattern takes among runs with this payer
    pub fn dominant_pattern_share(&self, payer: Payer) -> f64 {
        let slot = self.slot(payer);
        let total = self.payer_counts[slot];
        if total == 0 {
            return 0.0;
        }

        let max = self.patterns[slot].values().copied().max().unwrap_or(0);
        max as f64 / total as f64
    }
}

/// Run `rounds` independent tables with the same configuration
pub async fn simulate(config: &TableConfig, rounds: usize) -> Result<SimulationReport> {
    config.validate()?;

    let mut report = SimulationReport::new(config.participants);
    for round in 0..rounds {
        let mut round_config = config.clone();
        round_config.seed = config.seed.map(|seed| seed.wrapping_add(round as u64));

        let transcript = DiningTable::new(round_config)?.run().await?;
        report.record(&transcript);
    }

    tracing::info!(
        "Simulated {} rounds: {} parity failures, {} correct traces",
        report.rounds,
        report.parity_failures,
        report.correct_traces
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PayerPolicy;

    #[tokio::test]
    async fn test_simulation_is_consistent() {
        let config = TableConfig::new(3).with_seed(11);
        let report = simulate(&config, 200).await.unwrap();

        assert_eq!(report.rounds, 200);
        assert_eq!(report.parity_failures, 0);
        assert_eq!(report.correct_traces, 200);
        assert_eq!(report.violations, 0);
        assert_eq!(report.payer_counts.iter().sum::<usize>(), 200);
        assert!(report.payer_counts.iter().all(|&count| count > 0));
    }

    #[tokio::test]
    async fn test_patterns_follow_parity() {
        let config = TableConfig::new(4)
            .with_seed(3)
            .with_payer(PayerPolicy::Cryptographer(2));
        let report = simulate(&config, 100).await.unwrap();

        assert_eq!(report.payer_counts[2], 100);
        for pattern in report.patterns[2].keys() {
            assert_eq!(pattern.count_ones() % 2, 1);
        }
        assert!(report.dominant_pattern_share(Payer::Cryptographer(2)) < 0.5);
        assert_eq!(report.dominant_pattern_share(Payer::Nobody), 0.0);
    }

    #[tokio::test]
    async fn test_invalid_config_fails_fast() {
        let result = simulate(&TableConfig::new(1), 10).await;
        assert!(result.is_err());
    }
}
