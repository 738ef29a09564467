//! Core round engine — wheel geometry, outcome catalog, bet resolution and settlement.
//!
//! ## Module overview
//!
//! | Module    | Purpose |
//! |-----------|---------|
//! | `models`  | Shared value types: outcomes, pockets, limits, request/response structs |
//! | `wheel`   | Physical track order and colour sets for both wheel variants |
//! | `catalog` | Builds every payable outcome and attaches it to its pockets |
//! | `table`   | Limits, outcome resolution by set intersection, winner selection |
//! | `bet`     | Primitive bet validation plus neighbour/sector decomposition |
//! | `engine`  | Per-round object: settles bets and aggregates totals |
//! | `error`   | `RouletteError`, the single failure type for a round |
//! | `adapter` | JSON request in, JSON result (or failure envelope) out |

pub mod adapter;
pub mod bet;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod models;
pub mod table;
pub mod wheel;

// Re-export the public API surface so callers can use
// `roulette_engine::resolve_round` without reaching into sub-modules.
pub use adapter::process_request;
pub use bet::Bet;
pub use engine::{resolve_round, RouletteEngine};
pub use error::{RouletteError, RouletteResult};
pub use models::{
    BetCategory, BetRequest, BetType, Color, Location, Outcome, Parity, Pocket, PocketId,
    RoundRequest, RoundResult, Spot, TableLimit, TableLimits, WagerSummary, WheelVariant, Winner,
};
pub use table::Table;
