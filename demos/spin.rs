//! Resolve a few roulette rounds and print them.
//!
//! Run with: `cargo run --example spin`
//!
//! 1. **Typed API** — a European round mixing plain, neighbour and sector bets,
//!    settled through `RouletteEngine`.
//! 2. **JSON boundary** — the same kind of request fed to `process_request`,
//!    once valid and once with a sector bet on an American wheel (rejected).
//!
//! The subscriber prints debug-level engine logs: catalog build and bet
//! decompositions at debug, settlement at info, rejected rounds at warn.

use roulette_round::{
    process_request, BetCategory, BetRequest, Location, RoundRequest, RouletteEngine, WheelVariant,
};
use serde_json::json;
use tracing::Level;

fn main() {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    let request = RoundRequest {
        hash: Some("a3f9c2e81b4d7aa0ffee".into()),
        wheel: WheelVariant::European,
        table: Default::default(),
        bets: vec![
            BetRequest::primitive(BetCategory::StraightUp, Location::pocket(17), 10.0),
            BetRequest::primitive(BetCategory::Corner, Location::pockets(&[25, 26, 28, 29]), 4.0),
            BetRequest::primitive(BetCategory::Outside, Location::named("black"), 20.0),
            BetRequest::neighbors(2, Location::pocket(0), 10.0),
            BetRequest::sector("tiers du cylindre", 12.0),
        ],
    };

    let mut engine = match RouletteEngine::new(request) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("rejected: [{}] {err}", err.kind());
            return;
        }
    };
    match engine.spin() {
        Ok(result) => {
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            println!(
                "  [{}]  hash: {}  winner: {} {}",
                result.wheel, result.hash, result.winner.location, result.winner.color
            );
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            for bet in &result.bets {
                let marker = if bet.win() == Some(true) { "✓" } else { " " };
                println!("  [{marker}] {:<40} → {} pays {}", bet.to_string(), bet.outcome(), bet.payout().unwrap_or(0.0));
            }
            let w = result.wager;
            println!();
            println!(
                "  placed {}  on table {}  lost {}  payout {}  delta {}",
                w.placed, w.on_table, w.lost, w.payout, w.delta
            );
        }
        Err(err) => eprintln!("spin failed: [{}] {err}", err.kind()),
    }

    println!();
    for request in [
        json!({
            "hash": "0000000000025",
            "wheel": "American",
            "bets": [{ "type": "split", "location": [0, "00"], "wager": 5 }]
        }),
        json!({
            "wheel": "American",
            "bets": [{ "type": "sector", "location": "voisins", "wager": 9 }]
        }),
    ] {
        let response = process_request(request);
        match serde_json::to_string_pretty(&response) {
            Ok(text) => println!("{text}\n"),
            Err(err) => eprintln!("could not render response: {err}"),
        }
    }
}
