use std::collections::BTreeSet;

use tracing::debug;

use crate::roulette_engine::{
    bet::Bet,
    catalog::{OutcomeCatalog, ZERO_LINE},
    error::{RouletteError, RouletteResult},
    models::{
        BetCategory, BetRequest, BetType, Location, Outcome, Pocket, PocketId, Spot, TableLimits,
        WheelVariant, Winner,
    },
};

/// Number of leading seed characters read as the winning number.
pub const SEED_DIGITS: usize = 13;

/// One round's table: limits, the outcome catalog and every resolved bet.
#[derive(Debug, Clone)]
pub struct Table {
    wheel: WheelVariant,
    limits: TableLimits,
    catalog: OutcomeCatalog,
    bets: Vec<Bet>,
}

impl Table {
    /// Build the catalog, then resolve `requests` in three groups: plain
    /// bets, neighbour bets, sector bets. The inside total is checked once
    /// every leg exists.
    pub fn new(wheel: WheelVariant, limits: TableLimits, requests: &[BetRequest]) -> RouletteResult<Self> {
        let catalog = OutcomeCatalog::build(wheel)?;
        let mut table = Table { wheel, limits, catalog, bets: Vec::new() };

        for request in requests {
            validate_wager(request)?;
        }

        for request in requests {
            if let BetType::Primitive(category) = request.bet_type {
                let bet = Bet::new(&table, category, request.location.clone(), request.wager)?;
                table.bets.push(bet);
            }
        }
        for request in requests {
            if let BetType::Neighbors(per_side) = request.bet_type {
                let legs = Bet::from_neighbors(&table, per_side, &request.location, request.wager)?;
                table.bets.extend(legs);
            }
        }
        for request in requests {
            if request.bet_type == BetType::Sector {
                let legs = Bet::from_sector(&table, &request.location, request.wager)?;
                table.bets.extend(legs);
            }
        }

        table.check_inside_total()?;
        debug!(wheel = %wheel, bets = table.bets.len(), "table ready");
        Ok(table)
    }

    pub fn wheel(&self) -> WheelVariant {
        self.wheel
    }

    pub fn limits(&self) -> &TableLimits {
        &self.limits
    }

    pub fn catalog(&self) -> &OutcomeCatalog {
        &self.catalog
    }

    pub fn bets(&self) -> &[Bet] {
        &self.bets
    }

    pub(crate) fn bets_mut(&mut self) -> &mut [Bet] {
        &mut self.bets
    }

    /// Resolve a declared category and location to exactly one outcome.
    pub fn resolve_outcome(&self, category: BetCategory, location: &Location) -> RouletteResult<Outcome> {
        match category {
            BetCategory::StraightUp => {
                let [spot] = location.spots() else {
                    return Err(RouletteError::undetermined(category, location));
                };
                let pocket = self.pocket_ids(std::slice::from_ref(spot))?[0];
                self.named_outcome(&pocket.to_string(), category, location)
            }
            BetCategory::Outside => {
                let [Spot::Label(name)] = location.spots() else {
                    return Err(RouletteError::undetermined(category, location));
                };
                let name = name.trim();
                self.catalog
                    .outcomes()
                    .find(|o| o.name.eq_ignore_ascii_case(name) && has_tag(o, category))
                    .cloned()
                    .ok_or_else(|| RouletteError::undetermined(category, location))
            }
            BetCategory::First4 | BetCategory::First5 => self.named_outcome(ZERO_LINE, category, location),
            _ => self.intersect(category, location),
        }
    }

    /// Outcomes shared by every pocket in `location`, narrowed to the
    /// category's name tag. Anything but a single survivor is ambiguous.
    fn intersect(&self, category: BetCategory, location: &Location) -> RouletteResult<Outcome> {
        let ids = self.pocket_ids(location.spots())?;
        let mut pockets = ids.iter().filter_map(|&id| self.catalog.pocket(id));
        let Some(first) = pockets.next() else {
            return Err(RouletteError::undetermined(category, location));
        };
        let mut shared: BTreeSet<&Outcome> = first.outcomes().collect();
        for pocket in pockets {
            shared.retain(|o| pocket.contains(o));
        }
        let found: Vec<&Outcome> = shared.into_iter().filter(|o| has_tag(o, category)).collect();
        match found.as_slice() {
            [outcome] => Ok((*outcome).clone()),
            _ => Err(RouletteError::UnableToDetermineBet {
                bet_type: category.to_string(),
                location: location.to_string(),
                found: found.iter().map(|o| o.to_string()).collect(),
            }),
        }
    }

    fn named_outcome(&self, name: &str, category: BetCategory, location: &Location) -> RouletteResult<Outcome> {
        self.catalog
            .outcome(name)
            .cloned()
            .ok_or_else(|| RouletteError::undetermined(category, location))
    }

    /// Map spots to pockets on this wheel, naming every one that does not exist.
    fn pocket_ids(&self, spots: &[Spot]) -> RouletteResult<Vec<PocketId>> {
        let mut ids = Vec::with_capacity(spots.len());
        let mut missing = Vec::new();
        for spot in spots {
            match spot.pocket() {
                Some(id) if id.index() < self.catalog.pocket_count() => ids.push(id),
                Some(id) => missing.push(id.to_string()),
                None => missing.push(spot.to_string()),
            }
        }
        if missing.is_empty() {
            Ok(ids)
        } else {
            Err(RouletteError::LocationNotFound { missing })
        }
    }

    /// Pick the winning pocket from the first 13 hex digits of `seed`.
    pub fn choose(&self, seed: &str) -> RouletteResult<(&Pocket, Winner)> {
        let value = seed_value(seed)?;
        let index = value % self.catalog.pocket_count() as u64;
        let location = PocketId(index as u8);
        let winner = Winner { location, color: location.color(), parity: location.parity() };
        let pocket = self
            .catalog
            .pocket(location)
            .ok_or_else(|| RouletteError::LocationNotFound { missing: vec![location.to_string()] })?;
        Ok((pocket, winner))
    }

    fn check_inside_total(&self) -> RouletteResult<()> {
        let total: f64 = self
            .bets
            .iter()
            .filter(|bet| bet.category().is_inside())
            .map(|bet| bet.wager())
            .sum();
        let limit = self.limits.total_inside;
        if total > 0.0 && total < limit.min {
            return Err(RouletteError::InsideBetsTooSmall { total, minimum: limit.min });
        }
        if let Some(maximum) = limit.max {
            if total > maximum {
                return Err(RouletteError::InsideBetsTooLarge { total, maximum });
            }
        }
        Ok(())
    }
}

fn has_tag(outcome: &Outcome, category: BetCategory) -> bool {
    category.outcome_tags().iter().any(|tag| outcome.name.contains(tag))
}

fn validate_wager(request: &BetRequest) -> RouletteResult<()> {
    if request.wager.is_finite() && request.wager > 0.0 {
        Ok(())
    } else {
        Err(RouletteError::SchemaInvalid {
            message: format!("wager for {} must be a positive number, got {}", request.bet_type, request.wager),
        })
    }
}

/// Leading 13 hex digits of `seed` as an integer.
pub fn seed_value(seed: &str) -> RouletteResult<u64> {
    let digits = seed
        .get(..SEED_DIGITS)
        .filter(|d| d.bytes().all(|b| b.is_ascii_hexdigit()))
        .ok_or_else(|| RouletteError::SchemaInvalid {
            message: format!("hash must start with {SEED_DIGITS} hex digits, got '{seed}'"),
        })?;
    u64::from_str_radix(digits, 16).map_err(|e| RouletteError::SchemaInvalid { message: e.to_string() })
}
