use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};
use dining_core::{simulate, Payer, SimulationReport, TableConfig};

pub async fn run_simulation(config: TableConfig, rounds: usize, json: bool) -> Result<()> {
    let report = simulate(&config, rounds).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Simulated {} rounds with {} cryptographers",
        report.rounds, report.participants
    );
    println!("  Parity failures: {}", report.parity_failures);
    println!("  Correct traces: {}", report.correct_traces);
    println!("  Protocol violations: {}", report.violations);
    println!();

    println!("{}", payer_table(&report));
    Ok(())
}

fn payer_table(report: &SimulationReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Payer",
        "Draws",
        "Distinct public patterns",
        "Dominant pattern share",
    ]);

    let payers = (0..report.participants)
        .map(Payer::Cryptographer)
        .chain(std::iter::once(Payer::Nobody));

    for payer in payers {
        let slot = report.slot(payer);
        table.add_row(vec![
            payer.to_string(),
            report.payer_counts[slot].to_string(),
            report.patterns[slot].len().to_string(),
            format!("{:.3}", report.dominant_pattern_share(payer)),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use dining_core::PayerPolicy;

    #[tokio::test]
    async fn test_payer_table_has_row_per_slot() {
        let config = TableConfig::new(3)
            .with_seed(1)
            .with_payer(PayerPolicy::Cryptographer(0));
        let report = simulate(&config, 20).await.unwrap();

        let rendered = payer_table(&report).to_string();
        assert!(rendered.contains("cryptographer 0"));
        assert!(rendered.contains("nobody at the table"));
        assert!(rendered.contains("20"));
    }
}
