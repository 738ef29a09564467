use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::roulette_engine::{
    bet::Bet,
    error::{RouletteError, RouletteResult},
};

// ---------------------------------------------------------------------------
// Wheel primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WheelVariant {
    American,
    #[default]
    European,
}

impl fmt::Display for WheelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WheelVariant::American => write!(f, "American"),
            WheelVariant::European => write!(f, "European"),
        }
    }
}

/// Physical pocket index 0..=36, with 37 standing in for "00".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PocketId(pub u8);

impl PocketId {
    pub const ZERO: PocketId = PocketId(0);
    pub const DOUBLE_ZERO: PocketId = PocketId(37);

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// True for 0 and "00".
    pub fn is_zero(self) -> bool {
        self == Self::ZERO || self == Self::DOUBLE_ZERO
    }
}

impl fmt::Display for PocketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::DOUBLE_ZERO {
            write!(f, "00")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Serialize for PocketId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if *self == Self::DOUBLE_ZERO {
            serializer.serialize_str("00")
        } else {
            serializer.serialize_u8(self.0)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
    Green,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red   => write!(f, "Red"),
            Color::Black => write!(f, "Black"),
            Color::Green => write!(f, "Green"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Parity {
    Odd,
    Even,
}

// ---------------------------------------------------------------------------
// Outcomes and pockets
// ---------------------------------------------------------------------------

/// A named, payable target paying `odds`:1.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Outcome {
    pub name: String,
    pub odds: u32,
}

impl Outcome {
    pub fn new(name: impl Into<String>, odds: u32) -> Self {
        Outcome { name: name.into(), odds }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}:1)", self.name, self.odds)
    }
}

/// Every outcome a single physical pocket belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pocket {
    outcomes: BTreeSet<Outcome>,
}

impl Pocket {
    pub(crate) fn from_outcomes(outcomes: BTreeSet<Outcome>) -> Self {
        Pocket { outcomes }
    }

    pub fn contains(&self, outcome: &Outcome) -> bool {
        self.outcomes.contains(outcome)
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter()
    }
}

// ---------------------------------------------------------------------------
// Bet categories and table limits
// ---------------------------------------------------------------------------

/// Primitive bet categories. Each has its own entry in [`TableLimits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BetCategory {
    StraightUp,
    Split,
    Split3,
    Street,
    Corner,
    First4,
    First5,
    #[serde(alias = "line")]
    DoubleStreet,
    Column,
    Dozen,
    Outside,
}

impl BetCategory {
    pub const ALL: [BetCategory; 11] = [
        BetCategory::StraightUp,
        BetCategory::Split,
        BetCategory::Split3,
        BetCategory::Street,
        BetCategory::Corner,
        BetCategory::First4,
        BetCategory::First5,
        BetCategory::DoubleStreet,
        BetCategory::Column,
        BetCategory::Dozen,
        BetCategory::Outside,
    ];

    /// Wire name, as used in requests and limit tables.
    pub fn name(self) -> &'static str {
        match self {
            BetCategory::StraightUp   => "straightUp",
            BetCategory::Split        => "split",
            BetCategory::Split3       => "split3",
            BetCategory::Street       => "street",
            BetCategory::Corner       => "corner",
            BetCategory::First4       => "first4",
            BetCategory::First5       => "first5",
            BetCategory::DoubleStreet => "doubleStreet",
            BetCategory::Column       => "column",
            BetCategory::Dozen        => "dozen",
            BetCategory::Outside      => "outside",
        }
    }

    /// Inside bets count towards the `totalInside` limit.
    pub fn is_inside(self) -> bool {
        !matches!(self, BetCategory::Column | BetCategory::Dozen | BetCategory::Outside)
    }

    /// Tags contained in the outcome names a location of this category may
    /// resolve to.
    pub fn outcome_tags(self) -> &'static [&'static str] {
        match self {
            BetCategory::StraightUp | BetCategory::First4 | BetCategory::First5 => &[],
            BetCategory::Split        => &["Split"],
            BetCategory::Split3       => &["3Way"],
            BetCategory::Street       => &["Street"],
            BetCategory::Corner       => &["Corner"],
            BetCategory::DoubleStreet => &["Line"],
            BetCategory::Column       => &["Column"],
            BetCategory::Dozen        => &["Dozen"],
            BetCategory::Outside      => &["Red", "Black", "Even", "Odd", "High", "Low", "Dozen", "Column"],
        }
    }
}

impl fmt::Display for BetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for BetCategory {
    type Err = RouletteError;

    fn from_str(s: &str) -> RouletteResult<Self> {
        if s == "line" {
            return Ok(BetCategory::DoubleStreet);
        }
        BetCategory::ALL
            .into_iter()
            .find(|category| category.name() == s)
            .ok_or_else(|| RouletteError::SchemaInvalid {
                message: format!("unknown bet type '{s}'"),
            })
    }
}

/// Minimum and optional maximum wager for one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableLimit {
    pub min: f64,
    pub max: Option<f64>,
}

impl TableLimit {
    pub fn new(min: f64, max: Option<f64>) -> Self {
        TableLimit { min, max }
    }
}

impl Default for TableLimit {
    fn default() -> Self {
        TableLimit { min: 1.0, max: None }
    }
}

impl fmt::Display for TableLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "[{}:{}]", self.min, max),
            None      => write!(f, "[{}:]", self.min),
        }
    }
}

/// Per-category limits. Categories missing from a request keep the default
/// `[1:unbounded]` band.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct TableLimits {
    pub straight_up: TableLimit,
    pub split: TableLimit,
    pub split3: TableLimit,
    pub street: TableLimit,
    pub corner: TableLimit,
    pub first4: TableLimit,
    pub first5: TableLimit,
    #[serde(alias = "line")]
    pub double_street: TableLimit,
    pub column: TableLimit,
    pub dozen: TableLimit,
    pub outside: TableLimit,
    pub total_inside: TableLimit,
}

impl TableLimits {
    pub fn for_category(&self, category: BetCategory) -> &TableLimit {
        match category {
            BetCategory::StraightUp   => &self.straight_up,
            BetCategory::Split        => &self.split,
            BetCategory::Split3       => &self.split3,
            BetCategory::Street       => &self.street,
            BetCategory::Corner       => &self.corner,
            BetCategory::First4       => &self.first4,
            BetCategory::First5       => &self.first5,
            BetCategory::DoubleStreet => &self.double_street,
            BetCategory::Column       => &self.column,
            BetCategory::Dozen        => &self.dozen,
            BetCategory::Outside      => &self.outside,
        }
    }

    pub fn set(&mut self, category: BetCategory, limit: TableLimit) -> &mut Self {
        *match category {
            BetCategory::StraightUp   => &mut self.straight_up,
            BetCategory::Split        => &mut self.split,
            BetCategory::Split3       => &mut self.split3,
            BetCategory::Street       => &mut self.street,
            BetCategory::Corner       => &mut self.corner,
            BetCategory::First4       => &mut self.first4,
            BetCategory::First5       => &mut self.first5,
            BetCategory::DoubleStreet => &mut self.double_street,
            BetCategory::Column       => &mut self.column,
            BetCategory::Dozen        => &mut self.dozen,
            BetCategory::Outside      => &mut self.outside,
        } = limit;
        self
    }
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

/// One element of a bet location: a pocket number or a label
/// ("00", "red", "jeu zero", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Spot {
    Number(i64),
    Label(String),
}

impl Spot {
    /// Pocket this spot names, if it names one. Range is only checked
    /// against `u8` here; the wheel bound is the table's job.
    pub fn pocket(&self) -> Option<PocketId> {
        match self {
            Spot::Number(n) => u8::try_from(*n).ok().map(PocketId),
            Spot::Label(label) => {
                let label = label.trim();
                if label == "00" {
                    Some(PocketId::DOUBLE_ZERO)
                } else {
                    label.parse::<u8>().ok().map(PocketId)
                }
            }
        }
    }
}

impl From<PocketId> for Spot {
    fn from(pocket: PocketId) -> Self {
        if pocket == PocketId::DOUBLE_ZERO {
            Spot::Label("00".to_string())
        } else {
            Spot::Number(i64::from(pocket.0))
        }
    }
}

impl fmt::Display for Spot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Spot::Number(n)    => write!(f, "{n}"),
            Spot::Label(label) => write!(f, "{label}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Location {
    One(Spot),
    Many(Vec<Spot>),
}

impl Location {
    pub fn pocket(number: u8) -> Self {
        Location::One(Spot::from(PocketId(number)))
    }

    pub fn pockets(numbers: &[u8]) -> Self {
        Location::Many(numbers.iter().map(|&n| Spot::from(PocketId(n))).collect())
    }

    pub fn named(name: impl Into<String>) -> Self {
        Location::One(Spot::Label(name.into()))
    }

    pub fn spots(&self) -> &[Spot] {
        match self {
            Location::One(spot)   => std::slice::from_ref(spot),
            Location::Many(spots) => spots,
        }
    }
}

impl From<PocketId> for Location {
    fn from(pocket: PocketId) -> Self {
        Location::One(Spot::from(pocket))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::One(spot) => write!(f, "{spot}"),
            Location::Many(spots) => {
                let joined = spots.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(", ");
                write!(f, "[{joined}]")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Declared bet type: a primitive category or one of the compound forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BetType {
    Primitive(BetCategory),
    /// `neighbors1` ..= `neighbors9`: pockets on each side of the target.
    Neighbors(u8),
    Sector,
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetType::Primitive(category) => write!(f, "{category}"),
            BetType::Neighbors(n)        => write!(f, "neighbors{n}"),
            BetType::Sector              => write!(f, "sector"),
        }
    }
}

impl FromStr for BetType {
    type Err = RouletteError;

    fn from_str(s: &str) -> RouletteResult<Self> {
        if s == "sector" {
            return Ok(BetType::Sector);
        }
        if let Some(count) = s.to_ascii_lowercase().strip_prefix("neighbors") {
            return match count.as_bytes() {
                [digit @ b'1'..=b'9'] => Ok(BetType::Neighbors(digit - b'0')),
                _ => Err(RouletteError::SchemaInvalid {
                    message: format!("unknown bet type '{s}'"),
                }),
            };
        }
        s.parse().map(BetType::Primitive)
    }
}

impl TryFrom<String> for BetType {
    type Error = RouletteError;

    fn try_from(value: String) -> RouletteResult<Self> {
        value.parse()
    }
}

impl From<BetType> for String {
    fn from(value: BetType) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetRequest {
    #[serde(rename = "type")]
    pub bet_type: BetType,
    pub location: Location,
    pub wager: f64,
}

impl BetRequest {
    pub fn new(bet_type: BetType, location: Location, wager: f64) -> Self {
        BetRequest { bet_type, location, wager }
    }

    pub fn primitive(category: BetCategory, location: Location, wager: f64) -> Self {
        Self::new(BetType::Primitive(category), location, wager)
    }

    pub fn neighbors(per_side: u8, location: Location, wager: f64) -> Self {
        Self::new(BetType::Neighbors(per_side), location, wager)
    }

    pub fn sector(name: &str, wager: f64) -> Self {
        Self::new(BetType::Sector, Location::named(name), wager)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoundRequest {
    /// Hex seed. A random one is generated when absent.
    pub hash: Option<String>,
    pub wheel: WheelVariant,
    pub table: TableLimits,
    pub bets: Vec<BetRequest>,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Winner {
    pub location: PocketId,
    pub color: Color,
    pub parity: Option<Parity>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WagerSummary {
    pub payout: f64,
    pub on_table: f64,
    pub placed: f64,
    pub lost: f64,
    pub delta: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub hash: String,
    pub wheel: WheelVariant,
    pub success: bool,
    pub winner: Winner,
    /// Effective limits after request overrides.
    pub table: TableLimits,
    pub bets: Vec<Bet>,
    pub winning_bets: Vec<Bet>,
    pub wager: WagerSummary,
}
