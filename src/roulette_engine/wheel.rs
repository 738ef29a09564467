use crate::roulette_engine::models::{Color, Parity, PocketId, WheelVariant};

/// Physical order of the American wheel rim; 37 is "00".
const AMERICAN_TRACK: [u8; 38] = [
    0, 28, 9, 26, 30, 11, 7, 20, 32, 17, 5, 22, 34,
    15, 3, 24, 36, 13, 1, 37, 27, 10, 25, 29, 12, 8,
    19, 31, 18, 6, 21, 33, 16, 4, 23, 35, 14, 2,
];

/// Physical order of the European (single zero) wheel rim.
const EUROPEAN_TRACK: [u8; 37] = [
    0, 32, 15, 19, 4, 21, 2, 25, 17, 34, 6, 27, 13, 36,
    11, 30, 8, 23, 10, 5, 24, 16, 33, 1, 20, 14, 31, 9,
    22, 18, 29, 7, 28, 12, 35, 3, 26,
];

pub const RED_NUMBERS: [u8; 18] = [1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36];

impl WheelVariant {
    /// Pockets in rim order (not table order). Drives neighbour bets.
    pub fn track(self) -> &'static [u8] {
        match self {
            WheelVariant::American => &AMERICAN_TRACK,
            WheelVariant::European => &EUROPEAN_TRACK,
        }
    }

    pub fn pocket_count(self) -> usize {
        self.track().len()
    }

    pub fn has_double_zero(self) -> bool {
        self == WheelVariant::American
    }

    /// Position of `pocket` on the rim, if the wheel has it.
    pub fn track_position(self, pocket: PocketId) -> Option<usize> {
        self.track().iter().position(|&p| p == pocket.0)
    }

    /// Pocket at a rim position; positions wrap in both directions.
    pub fn pocket_at(self, position: isize) -> PocketId {
        let track = self.track();
        PocketId(track[position.rem_euclid(track.len() as isize) as usize])
    }

    pub fn red() -> &'static [u8] {
        &RED_NUMBERS
    }

    pub fn black() -> Vec<u8> {
        (1..=36).filter(|n| !RED_NUMBERS.contains(n)).collect()
    }

    pub fn green(self) -> &'static [PocketId] {
        match self {
            WheelVariant::American => &[PocketId::ZERO, PocketId::DOUBLE_ZERO],
            WheelVariant::European => &[PocketId::ZERO],
        }
    }
}

impl PocketId {
    pub fn color(self) -> Color {
        if self.is_zero() {
            Color::Green
        } else if RED_NUMBERS.contains(&self.0) {
            Color::Red
        } else {
            Color::Black
        }
    }

    /// `None` for the zero pockets.
    pub fn parity(self) -> Option<Parity> {
        match self {
            p if p.is_zero() => None,
            PocketId(n) if n % 2 == 1 => Some(Parity::Odd),
            _ => Some(Parity::Even),
        }
    }
}
