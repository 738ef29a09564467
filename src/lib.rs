//! # roulette_round
//!
//! A stateless, deterministic resolver for a single roulette round.
//!
//! Given a wheel variant, table limits, a list of wagers and a hex seed, the
//! crate builds the full pocket → outcome catalog for the wheel, validates and
//! resolves every wager into exactly one payable outcome, picks the winning
//! pocket from the seed and settles all bets.
//!
//! ## How it works
//!
//! 1. Build a [`RoundRequest`] (or deserialize one from JSON).
//! 2. Create a [`RouletteEngine`] — this builds the [`Table`], resolves plain
//!    bets, decomposes neighbour and French sector bets into primitive legs and
//!    checks every table limit. Any violation rejects the whole round.
//! 3. Call [`RouletteEngine::spin`] — the first 13 hex digits of the seed pick
//!    the winning pocket, every bet is marked won or lost and the totals are
//!    aggregated into a [`RoundResult`].
//!
//! ## Key features
//!
//! - **Deterministic**: the same seed on the same wheel always lands on the
//!   same pocket.
//! - **Both layouts**: American (with "00") and European wheels, including the
//!   physical track order used by neighbour bets.
//! - **Compound bets**: `neighbors1`..`neighbors9` and the four French sectors
//!   (Jeu Zero, Tiers, Voisins, Orphelins) split wagers exactly or fail.
//!
//! ## Quick start
//!
//! ```rust
//! use roulette_round::{resolve_round, BetCategory, BetRequest, Location, RoundRequest, WheelVariant};
//!
//! let request = RoundRequest {
//!     hash: Some("0000000000011".into()),
//!     wheel: WheelVariant::European,
//!     table: Default::default(),
//!     bets: vec![BetRequest::primitive(BetCategory::StraightUp, Location::pocket(17), 10.0)],
//! };
//!
//! let result = resolve_round(request).unwrap();
//! assert_eq!(result.winner.location.to_string(), "17");
//! assert_eq!(result.wager.payout, 360.0);
//! ```

pub mod roulette_engine;

// Convenience re-exports so callers can use `roulette_round::resolve_round`
// directly without reaching into `roulette_engine::`.
pub use roulette_engine::{
    process_request, resolve_round, Bet, BetCategory, BetRequest, BetType, Color, Location,
    Outcome, Parity, Pocket, PocketId, RoundRequest, RoundResult, RouletteEngine, RouletteError,
    RouletteResult, Spot, Table, TableLimit, TableLimits, WagerSummary, WheelVariant, Winner,
};

#[cfg(test)]
mod tests;
