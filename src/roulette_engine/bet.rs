//! Bets — primitive validation plus neighbour and French sector decomposition.
//!
//! A primitive [`Bet`] resolves its outcome against the [`Table`] once, at
//! construction, then checks the category's limit band. Compound declarations
//! never become bets themselves: they are split into primitive legs, each of
//! which goes through the same construction and limit checks.
//!
//! Compound wagers must divide exactly into their legs; a wager that would
//! leave a remainder is rejected rather than rounded.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::roulette_engine::{
    error::{RouletteError, RouletteResult},
    models::{BetCategory, Location, Outcome, Pocket, Spot, WheelVariant},
    table::Table,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bet {
    #[serde(rename = "type")]
    category: BetCategory,
    location: Location,
    wager: f64,
    outcome: Outcome,
    win: Option<bool>,
    payout: Option<f64>,
}

impl Bet {
    /// Resolve and validate one primitive bet.
    pub fn new(table: &Table, category: BetCategory, location: Location, wager: f64) -> RouletteResult<Self> {
        let outcome = table.resolve_outcome(category, &location)?;
        let bet = Bet { category, location, wager, outcome, win: None, payout: None };
        let limit = table.limits().for_category(category);
        if wager < limit.min {
            return Err(RouletteError::BetTooSmall { bet: bet.to_string(), minimum: limit.min });
        }
        if let Some(maximum) = limit.max {
            if wager > maximum {
                return Err(RouletteError::BetTooLarge { bet: bet.to_string(), maximum });
            }
        }
        Ok(bet)
    }

    /// Split a `neighbors{per_side}` declaration into straight-up legs: the
    /// target pocket plus `per_side` pockets either side of it on the rim.
    pub fn from_neighbors(table: &Table, per_side: u8, location: &Location, wager: f64) -> RouletteResult<Vec<Bet>> {
        let bet_type = format!("neighbors{per_side}");
        let legs = 2 * u32::from(per_side) + 1;
        let leg_wager = split_wager(&bet_type, wager, legs)?;

        let wheel = table.wheel();
        let [spot] = location.spots() else {
            return Err(RouletteError::undetermined(&bet_type, location));
        };
        let target = spot
            .pocket()
            .and_then(|pocket| wheel.track_position(pocket))
            .ok_or_else(|| RouletteError::undetermined(&bet_type, location))?;

        let reach = isize::from(per_side);
        let bets = (-reach..=reach)
            .map(|offset| wheel.pocket_at(target as isize + offset))
            .map(|pocket| Bet::new(table, BetCategory::StraightUp, Location::from(pocket), leg_wager))
            .collect::<RouletteResult<Vec<_>>>()?;
        debug!(%bet_type, %location, wager, legs, "neighbour bet decomposed");
        Ok(bets)
    }

    /// Split a French sector declaration into its fixed legs. European only.
    pub fn from_sector(table: &Table, location: &Location, wager: f64) -> RouletteResult<Vec<Bet>> {
        if table.wheel() != WheelVariant::European {
            return Err(RouletteError::BetNotAvailable {
                bet_type: format!("sector {location}"),
                wheel: table.wheel(),
            });
        }
        let sector = match location.spots() {
            [Spot::Label(name)] => FrenchSector::parse(name),
            _ => None,
        }
        .ok_or_else(|| RouletteError::undetermined("sector", location))?;

        let unit = split_wager(&format!("sector {}", sector.label()), wager, sector.divisor())?;
        let bets = sector
            .legs()
            .iter()
            .map(|leg| {
                let location = match leg.pockets {
                    [n] => Location::pocket(*n),
                    pockets => Location::pockets(pockets),
                };
                Bet::new(table, leg.category, location, unit * f64::from(leg.units))
            })
            .collect::<RouletteResult<Vec<_>>>()?;
        debug!(sector = sector.label(), wager, legs = bets.len(), "sector bet decomposed");
        Ok(bets)
    }

    pub fn category(&self) -> BetCategory {
        self.category
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn wager(&self) -> f64 {
        self.wager
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// `None` until the round is settled.
    pub fn win(&self) -> Option<bool> {
        self.win
    }

    /// `None` until the round is settled.
    pub fn payout(&self) -> Option<f64> {
        self.payout
    }

    /// Stake returned plus winnings at the outcome's odds.
    pub fn win_amount(&self) -> f64 {
        self.wager * f64::from(self.outcome.odds) + self.wager
    }

    /// Mark this bet against the winning pocket. Only the first call has any
    /// effect; later calls return the recorded result.
    pub(crate) fn settle(&mut self, winning: &Pocket) -> bool {
        if let Some(win) = self.win {
            return win;
        }
        let win = winning.contains(&self.outcome);
        self.payout = Some(if win { self.win_amount() } else { 0.0 });
        self.win = Some(win);
        win
    }
}

impl fmt::Display for Bet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bet for {} at {}", self.category, self.wager, self.location)
    }
}

/// `wager / divisor`, or an error when the split would leave a remainder.
fn split_wager(bet_type: &str, wager: f64, divisor: u32) -> RouletteResult<f64> {
    let divisor_f = f64::from(divisor);
    if wager % divisor_f != 0.0 {
        return Err(RouletteError::MalformedCompoundWager { bet_type: bet_type.to_string(), multiple: divisor });
    }
    Ok(wager / divisor_f)
}

// ---------------------------------------------------------------------------
// French sectors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrenchSector {
    JeuZero,
    Tiers,
    Voisins,
    OrphelinsPlein,
    OrphelinsCheval,
}

/// One primitive leg; its wager is `units` shares of `wager / divisor`.
#[derive(Debug)]
pub struct SectorLeg {
    pub category: BetCategory,
    pub pockets: &'static [u8],
    pub units: u32,
}

const fn leg(category: BetCategory, pockets: &'static [u8], units: u32) -> SectorLeg {
    SectorLeg { category, pockets, units }
}

const JEU_ZERO: [SectorLeg; 4] = [
    leg(BetCategory::Split, &[0, 3], 1),
    leg(BetCategory::Split, &[12, 15], 1),
    leg(BetCategory::Split, &[32, 35], 1),
    leg(BetCategory::StraightUp, &[26], 1),
];

const TIERS: [SectorLeg; 6] = [
    leg(BetCategory::Split, &[5, 8], 1),
    leg(BetCategory::Split, &[10, 11], 1),
    leg(BetCategory::Split, &[13, 16], 1),
    leg(BetCategory::Split, &[23, 24], 1),
    leg(BetCategory::Split, &[27, 30], 1),
    leg(BetCategory::Split, &[33, 36], 1),
];

const VOISINS: [SectorLeg; 7] = [
    leg(BetCategory::Split, &[4, 7], 1),
    leg(BetCategory::Split, &[12, 15], 1),
    leg(BetCategory::Split, &[18, 21], 1),
    leg(BetCategory::Split, &[19, 22], 1),
    leg(BetCategory::Split, &[32, 35], 1),
    leg(BetCategory::Split3, &[0, 2, 3], 2),
    leg(BetCategory::Corner, &[25, 26, 28, 29], 2),
];

const ORPHELINS_PLEIN: [SectorLeg; 8] = [
    leg(BetCategory::StraightUp, &[1], 1),
    leg(BetCategory::StraightUp, &[6], 1),
    leg(BetCategory::StraightUp, &[9], 1),
    leg(BetCategory::StraightUp, &[14], 1),
    leg(BetCategory::StraightUp, &[17], 1),
    leg(BetCategory::StraightUp, &[20], 1),
    leg(BetCategory::StraightUp, &[31], 1),
    leg(BetCategory::StraightUp, &[34], 1),
];

const ORPHELINS_CHEVAL: [SectorLeg; 5] = [
    leg(BetCategory::Split, &[6, 9], 1),
    leg(BetCategory::Split, &[14, 17], 1),
    leg(BetCategory::Split, &[17, 20], 1),
    leg(BetCategory::Split, &[31, 34], 1),
    leg(BetCategory::StraightUp, &[1], 1),
];

impl FrenchSector {
    /// "jeu zero" must match exactly; the others match by substring, so
    /// "tiers du cylindre" and "les voisins du zero" are accepted.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        if name == "jeu zero" {
            Some(FrenchSector::JeuZero)
        } else if name.contains("tiers") {
            Some(FrenchSector::Tiers)
        } else if name.contains("voisins") {
            Some(FrenchSector::Voisins)
        } else if name.contains("orphelins") {
            if name.contains("plein") {
                Some(FrenchSector::OrphelinsPlein)
            } else {
                Some(FrenchSector::OrphelinsCheval)
            }
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FrenchSector::JeuZero         => "Jeu Zero",
            FrenchSector::Tiers           => "Tiers du Cylindre",
            FrenchSector::Voisins         => "les Voisins du Zero",
            FrenchSector::OrphelinsPlein  => "les Orphelins en Plein",
            FrenchSector::OrphelinsCheval => "les Orphelins en Cheval",
        }
    }

    /// The wager must be a multiple of this.
    pub fn divisor(self) -> u32 {
        match self {
            FrenchSector::JeuZero         => 4,
            FrenchSector::Tiers           => 6,
            FrenchSector::Voisins         => 9,
            FrenchSector::OrphelinsPlein  => 8,
            FrenchSector::OrphelinsCheval => 5,
        }
    }

    pub fn legs(self) -> &'static [SectorLeg] {
        match self {
            FrenchSector::JeuZero         => &JEU_ZERO,
            FrenchSector::Tiers           => &TIERS,
            FrenchSector::Voisins         => &VOISINS,
            FrenchSector::OrphelinsPlein  => &ORPHELINS_PLEIN,
            FrenchSector::OrphelinsCheval => &ORPHELINS_CHEVAL,
        }
    }
}
