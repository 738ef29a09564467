//! Outcome catalog — every payable outcome attached to the pockets it covers.
//!
//! The catalog is built by a fixed sequence of passes (straights, splits,
//! 3-ways, streets, corners, lines, dozens, columns, even money, zero line).
//! Each pass adds one shared [`Outcome`] value to every pocket it covers. Once
//! all passes have run the builder is frozen into an [`OutcomeCatalog`]: an
//! arena of immutable [`Pocket`]s indexed by pocket number plus a name index.
//!
//! ## Names
//!
//! | Pass | Example name | Odds |
//! |------|--------------|------|
//! | straight | `17`, `00` | 35 |
//! | split | `Split 1-2`, `Split 0-00` | 17 |
//! | 3-way | `3Way 0-2-3` | 11 |
//! | street | `Street 6` | 11 |
//! | corner | `Corner 1-2-4-5` | 8 |
//! | line | `Line 1-6` | 8 |
//! | dozen / column | `Dozen 2`, `Column 3` | 2 |
//! | even money | `Red`, `Odd`, `High` | 1 |
//! | zero line | `Zero-Line` | 8 (European) / 6 (American) |

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::roulette_engine::{
    error::{RouletteError, RouletteResult},
    models::{Outcome, Pocket, PocketId, WheelVariant},
};

pub const ZERO_LINE: &str = "Zero-Line";

/// Frozen pocket → outcome mapping for one wheel.
#[derive(Debug, Clone)]
pub struct OutcomeCatalog {
    wheel: WheelVariant,
    pockets: Vec<Pocket>,
    outcomes: BTreeMap<String, Outcome>,
}

impl OutcomeCatalog {
    /// Run every pass for `wheel` and freeze the result.
    pub fn build(wheel: WheelVariant) -> RouletteResult<Self> {
        let mut builder = CatalogBuilder::new(wheel);
        builder.add_straight()?;
        builder.add_split()?;
        builder.add_split3()?;
        builder.add_street()?;
        builder.add_corner()?;
        builder.add_line()?;
        builder.add_dozen()?;
        builder.add_column()?;
        builder.add_even_money()?;
        builder.add_zero_line()?;
        let catalog = builder.finish();
        debug!(
            wheel = %wheel,
            pockets = catalog.pockets.len(),
            outcomes = catalog.outcomes.len(),
            "outcome catalog built"
        );
        Ok(catalog)
    }

    pub fn wheel(&self) -> WheelVariant {
        self.wheel
    }

    pub fn pocket_count(&self) -> usize {
        self.pockets.len()
    }

    pub fn pocket(&self, id: PocketId) -> Option<&Pocket> {
        self.pockets.get(id.index())
    }

    pub fn outcome(&self, name: &str) -> Option<&Outcome> {
        self.outcomes.get(name)
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.values()
    }

    /// Pockets carrying `outcome`, in numeric order.
    pub fn pockets_with(&self, outcome: &Outcome) -> Vec<PocketId> {
        self.pockets
            .iter()
            .enumerate()
            .filter(|(_, pocket)| pocket.contains(outcome))
            .map(|(i, _)| PocketId(i as u8))
            .collect()
    }
}

/// Mutable build phase. Only reachable through [`OutcomeCatalog::build`].
struct CatalogBuilder {
    wheel: WheelVariant,
    pockets: Vec<BTreeSet<Outcome>>,
    outcomes: BTreeMap<String, Outcome>,
}

impl CatalogBuilder {
    fn new(wheel: WheelVariant) -> Self {
        CatalogBuilder {
            wheel,
            pockets: vec![BTreeSet::new(); wheel.pocket_count()],
            outcomes: BTreeMap::new(),
        }
    }

    /// Attach `outcome` to each pocket in `numbers`. A name already registered
    /// with different odds is a builder defect.
    fn add(&mut self, numbers: &[u8], outcome: Outcome) -> RouletteResult<()> {
        match self.outcomes.get(&outcome.name) {
            Some(existing) if existing.odds != outcome.odds => {
                return Err(RouletteError::DuplicateOutcomeDefinition {
                    name: outcome.name,
                    existing: existing.odds,
                    odds: outcome.odds,
                });
            }
            Some(_) => {}
            None => {
                self.outcomes.insert(outcome.name.clone(), outcome.clone());
            }
        }
        for &n in numbers {
            self.pockets[n as usize].insert(outcome.clone());
        }
        Ok(())
    }

    fn add_straight(&mut self) -> RouletteResult<()> {
        for n in 0..self.wheel.pocket_count() as u8 {
            self.add(&[n], Outcome::new(PocketId(n).to_string(), 35))?;
        }
        Ok(())
    }

    fn add_split(&mut self) -> RouletteResult<()> {
        // Horizontal pairs inside each row.
        for r in 0..12u8 {
            for n in [3 * r + 1, 3 * r + 2] {
                self.add(&[n, n + 1], Outcome::new(format!("Split {}-{}", n, n + 1), 17))?;
            }
        }
        // Vertical pairs across adjacent rows.
        for n in 1..=33u8 {
            self.add(&[n, n + 3], Outcome::new(format!("Split {}-{}", n, n + 3), 17))?;
        }
        self.add(&[0, 1], Outcome::new("Split 0-1", 17))?;
        match self.wheel {
            WheelVariant::American => {
                self.add(&[3, 37], Outcome::new("Split 00-3", 17))?;
                self.add(&[0, 37], Outcome::new("Split 0-00", 17))?;
            }
            WheelVariant::European => {
                self.add(&[0, 2], Outcome::new("Split 0-2", 17))?;
                self.add(&[0, 3], Outcome::new("Split 0-3", 17))?;
            }
        }
        Ok(())
    }

    fn add_split3(&mut self) -> RouletteResult<()> {
        self.add(&[0, 1, 2], Outcome::new("3Way 0-1-2", 11))?;
        match self.wheel {
            WheelVariant::American => {
                self.add(&[0, 37, 2], Outcome::new("3Way 0-00-2", 11))?;
                self.add(&[37, 2, 3], Outcome::new("3Way 00-2-3", 11))?;
            }
            WheelVariant::European => {
                self.add(&[0, 2, 3], Outcome::new("3Way 0-2-3", 11))?;
            }
        }
        Ok(())
    }

    fn add_street(&mut self) -> RouletteResult<()> {
        for r in 0..12u8 {
            let n = 3 * r + 1;
            self.add(&[n, n + 1, n + 2], Outcome::new(format!("Street {}", r + 1), 11))?;
        }
        Ok(())
    }

    fn add_corner(&mut self) -> RouletteResult<()> {
        for r in 0..11u8 {
            for n in [3 * r + 1, 3 * r + 2] {
                let name = format!("Corner {}-{}-{}-{}", n, n + 1, n + 3, n + 4);
                self.add(&[n, n + 1, n + 3, n + 4], Outcome::new(name, 8))?;
            }
        }
        Ok(())
    }

    fn add_line(&mut self) -> RouletteResult<()> {
        for r in 0..11u8 {
            let n = 3 * r + 1;
            let numbers: Vec<u8> = (n..n + 6).collect();
            self.add(&numbers, Outcome::new(format!("Line {}-{}", n, n + 5), 8))?;
        }
        Ok(())
    }

    fn add_dozen(&mut self) -> RouletteResult<()> {
        for d in 0..3u8 {
            let numbers: Vec<u8> = (12 * d + 1..=12 * d + 12).collect();
            self.add(&numbers, Outcome::new(format!("Dozen {}", d + 1), 2))?;
        }
        Ok(())
    }

    fn add_column(&mut self) -> RouletteResult<()> {
        for c in 0..3u8 {
            let numbers: Vec<u8> = (0..12u8).map(|r| 3 * r + c + 1).collect();
            self.add(&numbers, Outcome::new(format!("Column {}", c + 1), 2))?;
        }
        Ok(())
    }

    fn add_even_money(&mut self) -> RouletteResult<()> {
        let (low, high): (Vec<u8>, Vec<u8>) = (1..=36u8).partition(|&n| n < 19);
        let (even, odd): (Vec<u8>, Vec<u8>) = (1..=36u8).partition(|&n| n % 2 == 0);
        self.add(WheelVariant::red(), Outcome::new("Red", 1))?;
        self.add(&WheelVariant::black(), Outcome::new("Black", 1))?;
        self.add(&even, Outcome::new("Even", 1))?;
        self.add(&odd, Outcome::new("Odd", 1))?;
        self.add(&low, Outcome::new("Low", 1))?;
        self.add(&high, Outcome::new("High", 1))?;
        Ok(())
    }

    fn add_zero_line(&mut self) -> RouletteResult<()> {
        match self.wheel {
            WheelVariant::American => self.add(&[0, 1, 2, 3, 37], Outcome::new(ZERO_LINE, 6)),
            WheelVariant::European => self.add(&[0, 1, 2, 3], Outcome::new(ZERO_LINE, 8)),
        }
    }

    fn finish(self) -> OutcomeCatalog {
        OutcomeCatalog {
            wheel: self.wheel,
            pockets: self.pockets.into_iter().map(Pocket::from_outcomes).collect(),
            outcomes: self.outcomes,
        }
    }
}
