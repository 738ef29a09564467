use rand::{rngs::OsRng, RngCore};
use tracing::info;

use crate::roulette_engine::{
    bet::Bet,
    error::RouletteResult,
    models::{RoundRequest, RoundResult, WagerSummary, WheelVariant},
    table::{seed_value, Table},
};

/// Generate a 64-hex-digit seed from the OS RNG.
pub fn generate_hash() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// One round: a seed, a validated table, and (once spun) the settled result.
#[derive(Debug, Clone)]
pub struct RouletteEngine {
    hash: String,
    wheel: WheelVariant,
    table: Table,
    result: Option<RoundResult>,
}

impl RouletteEngine {
    /// Validate the seed and build the table. Any invalid bet rejects the
    /// whole round.
    pub fn new(request: RoundRequest) -> RouletteResult<Self> {
        let hash = match request.hash {
            Some(hash) => hash.to_lowercase(),
            None => generate_hash(),
        };
        seed_value(&hash)?;
        let table = Table::new(request.wheel, request.table, &request.bets)?;
        Ok(RouletteEngine { hash, wheel: request.wheel, table, result: None })
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn wheel(&self) -> WheelVariant {
        self.wheel
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn is_settled(&self) -> bool {
        self.result.is_some()
    }

    /// Settled result, if [`spin`](Self::spin) has run.
    pub fn result(&self) -> Option<&RoundResult> {
        self.result.as_ref()
    }

    /// Settle the round. Idempotent: later calls return the first result.
    pub fn spin(&mut self) -> RouletteResult<&RoundResult> {
        let result = match self.result.take() {
            Some(result) => result,
            None => self.settle()?,
        };
        let result: &RoundResult = self.result.insert(result);
        Ok(result)
    }

    fn settle(&mut self) -> RouletteResult<RoundResult> {
        let (pocket, winner) = self.table.choose(&self.hash)?;
        let pocket = pocket.clone();
        for bet in self.table.bets_mut() {
            bet.settle(&pocket);
        }

        let bets = self.table.bets().to_vec();
        let winning_bets: Vec<Bet> = bets.iter().filter(|b| b.win() == Some(true)).cloned().collect();
        let wager = WagerSummary::from_bets(&bets);
        info!(
            hash = %self.hash,
            wheel = %self.wheel,
            winner = %winner.location,
            bets = bets.len(),
            winning = winning_bets.len(),
            payout = wager.payout,
            delta = wager.delta,
            "round settled"
        );

        Ok(RoundResult {
            hash: self.hash.clone(),
            wheel: self.wheel,
            success: true,
            winner,
            table: self.table.limits().clone(),
            bets,
            winning_bets,
            wager,
        })
    }
}

impl WagerSummary {
    /// Totals over settled bets. Unsettled bets count as lost.
    ///
    /// `placed` is derived from the two partial sums so that
    /// `placed == on_table + lost` holds bit for bit on fractional wagers.
    pub fn from_bets(bets: &[Bet]) -> Self {
        let mut summary = WagerSummary::default();
        for bet in bets {
            summary.payout += bet.payout().unwrap_or(0.0);
            if bet.win() == Some(true) {
                summary.on_table += bet.wager();
            } else {
                summary.lost += bet.wager();
            }
        }
        summary.placed = summary.on_table + summary.lost;
        summary.delta = summary.payout + summary.on_table - summary.lost;
        summary
    }
}

/// Build, spin and return one round in a single call.
pub fn resolve_round(request: RoundRequest) -> RouletteResult<RoundResult> {
    let mut engine = RouletteEngine::new(request)?;
    engine.spin().cloned()
}
