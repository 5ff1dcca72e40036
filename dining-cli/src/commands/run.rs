use anyhow::Result;
use dining_core::{DiningTable, Observer, Payer, RunTranscript, TableConfig};

pub async fn run_once(config: TableConfig, json: bool) -> Result<()> {
    let table = DiningTable::new(config)?;
    tracing::debug!(
        "Running table {} with {} cryptographers",
        table.id(),
        table.participants()
    );
    let transcript = table.run().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&transcript)?);
    } else {
        print_narrative(&transcript);
    }

    Ok(())
}

fn print_narrative(transcript: &RunTranscript) {
    println!("Table {} ({} cryptographers)", transcript.id, transcript.participants);
    println!();

    // ground truth, printed for the demo only
    match transcript.private.payer {
        Payer::Nobody => {
            println!("CryptographerZero > Chooses no cryptographer as payer. NSA pays.")
        }
        Payer::Cryptographer(position) => {
            println!("CryptographerZero > Chooses cryptographer {} as payer.", position)
        }
    }
    println!();

    for (position, coin) in transcript.private.coins.iter().enumerate() {
        println!("Cryptographer {} > Coin flip was: {}", position, coin);
    }
    println!();

    for broadcast in &transcript.public.broadcasts {
        println!("Observer > {}", Observer::announcement(broadcast));
    }
    println!();

    println!("Owner > {}.", transcript.public.verdict);
    println!("CryptographerZero > {}", transcript.private.trace);
}
