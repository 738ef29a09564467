use thiserror::Error as ThisError;

use crate::roulette_engine::models::WheelVariant;

pub type RouletteResult<T> = Result<T, RouletteError>;

/// Every way a round can be rejected. Any of these aborts the whole round.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum RouletteError {
    #[error("invalid request: {message}")]
    SchemaInvalid { message: String },
    #[error("{bet_type} bets are not available on the {wheel} wheel")]
    BetNotAvailable { bet_type: String, wheel: WheelVariant },
    #[error("{bet} is below the table minimum of {minimum}")]
    BetTooSmall { bet: String, minimum: f64 },
    #[error("{bet} is above the table maximum of {maximum}")]
    BetTooLarge { bet: String, maximum: f64 },
    #[error("inside bets total {total} is below the table minimum of {minimum}")]
    InsideBetsTooSmall { total: f64, minimum: f64 },
    #[error("inside bets total {total} is above the table maximum of {maximum}")]
    InsideBetsTooLarge { total: f64, maximum: f64 },
    #[error("wager for {bet_type} should be a multiple of {multiple}")]
    MalformedCompoundWager { bet_type: String, multiple: u32 },
    #[error("unable to determine {bet_type} bet at {location} (candidates: [{}])", .found.join(", "))]
    UnableToDetermineBet {
        bet_type: String,
        location: String,
        found: Vec<String>,
    },
    #[error("location not found: {}", .missing.join(", "))]
    LocationNotFound { missing: Vec<String> },
    #[error("duplicate outcome name found: {name} ({existing}:1 vs {odds}:1)")]
    DuplicateOutcomeDefinition { name: String, existing: u32, odds: u32 },
}

impl RouletteError {
    /// Stable discriminant reported as `exception.type`.
    pub fn kind(&self) -> &'static str {
        match self {
            RouletteError::SchemaInvalid { .. }              => "SchemaInvalid",
            RouletteError::BetNotAvailable { .. }            => "BetNotAvailable",
            RouletteError::BetTooSmall { .. }                => "BetTooSmall",
            RouletteError::BetTooLarge { .. }                => "BetTooLarge",
            RouletteError::InsideBetsTooSmall { .. }         => "InsideBetsTooSmall",
            RouletteError::InsideBetsTooLarge { .. }         => "InsideBetsTooLarge",
            RouletteError::MalformedCompoundWager { .. }     => "MalformedCompoundWager",
            RouletteError::UnableToDetermineBet { .. }
            | RouletteError::LocationNotFound { .. }         => "UnableToDetermineBet",
            RouletteError::DuplicateOutcomeDefinition { .. } => "DuplicateOutcomeDefinition",
        }
    }

    pub(crate) fn undetermined(bet_type: impl ToString, location: impl ToString) -> Self {
        RouletteError::UnableToDetermineBet {
            bet_type: bet_type.to_string(),
            location: location.to_string(),
            found: Vec::new(),
        }
    }
}
