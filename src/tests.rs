//! Unit tests for the `roulette_round` crate.
//!
//! Included from `lib.rs` under `#[cfg(test)]`.
//!
//! # Coverage
//!
//! | Group | What is tested |
//! |-------|----------------|
//! | Determinism | Same seed → same pocket across engines; seed 0 lands on green zero |
//! | Settlement | Totals identities over random seeds; straight-up payout; winning subset |
//! | Compound bets | Wager conservation for every neighbour width and sector; ordering of groups |
//! | Rejection | Sector on American wheel, limit bands, malformed wagers — no partial result |
//! | Requests | Serde parsing of bet types, locations and partial limit tables |

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::roulette_engine::{
    resolve_round, BetCategory, BetRequest, BetType, Color, Location, PocketId, RoundRequest,
    RoundResult, RouletteEngine, RouletteError, TableLimit, TableLimits, WheelVariant,
};

// ── helpers ──────────────────────────────────────────────────────────────────

fn round(wheel: WheelVariant, hash: &str, bets: Vec<BetRequest>) -> RoundRequest {
    RoundRequest { hash: Some(hash.to_string()), wheel, table: TableLimits::default(), bets }
}

/// A 13-digit hash landing on `pocket` for either wheel.
fn hash_for(pocket: u8) -> String {
    format!("{pocket:013x}")
}

/// Random 64-digit hashes from a fixed RNG stream.
fn random_hashes(seed: u64, count: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| (0..4).map(|_| format!("{:016x}", rng.gen::<u64>())).collect())
        .collect()
}

/// One of each primitive kind plus both compound forms.
fn mixed_bets() -> Vec<BetRequest> {
    vec![
        BetRequest::primitive(BetCategory::StraightUp, Location::pocket(17), 10.0),
        BetRequest::primitive(BetCategory::Split, Location::pockets(&[17, 20]), 4.0),
        BetRequest::primitive(BetCategory::Street, Location::pockets(&[16, 17, 18]), 3.0),
        BetRequest::primitive(BetCategory::Corner, Location::pockets(&[13, 14, 16, 17]), 2.0),
        BetRequest::primitive(BetCategory::DoubleStreet, Location::pockets(&[13, 18]), 6.0),
        BetRequest::primitive(BetCategory::First4, Location::pockets(&[0, 1, 2, 3]), 1.0),
        BetRequest::primitive(BetCategory::Dozen, Location::pockets(&[13, 24]), 5.0),
        BetRequest::primitive(BetCategory::Column, Location::pockets(&[2, 35]), 5.0),
        BetRequest::primitive(BetCategory::Outside, Location::named("red"), 20.0),
        BetRequest::primitive(BetCategory::Outside, Location::named("odd"), 20.0),
        BetRequest::neighbors(2, Location::pocket(0), 10.0),
        BetRequest::sector("voisins du zero", 18.0),
    ]
}

const SEEDS: [u64; 5] = [1, 42, 999, 0xDEAD_BEEF, 7];

// ── determinism ──────────────────────────────────────────────────────────────

#[test]
fn same_hash_lands_on_same_pocket() {
    for wheel in [WheelVariant::American, WheelVariant::European] {
        for hash in random_hashes(12345, 20) {
            let a = resolve_round(round(wheel, &hash, vec![])).unwrap();
            let b = resolve_round(round(wheel, &hash, vec![])).unwrap();
            assert_eq!(a.winner, b.winner, "winner mismatch for {hash} on {wheel}");
        }
    }
}

#[test]
fn zero_hash_lands_on_green_zero() {
    let result = resolve_round(round(WheelVariant::European, "0000000000000", vec![])).unwrap();
    assert_eq!(result.winner.location, PocketId(0));
    assert_eq!(result.winner.color, Color::Green);
    assert_eq!(result.winner.parity, None);
}

#[test]
fn only_first_thirteen_digits_matter() {
    let a = resolve_round(round(WheelVariant::American, "123456789abcd0000", vec![])).unwrap();
    let b = resolve_round(round(WheelVariant::American, "123456789abcdffff", vec![])).unwrap();
    assert_eq!(a.winner, b.winner);
    assert_eq!(a.winner.location.0 as u64, 0x1_2345_6789_abcd % 38);
}

#[test]
fn every_pocket_is_reachable() {
    for wheel in [WheelVariant::American, WheelVariant::European] {
        for n in 0..wheel.pocket_count() as u8 {
            let result = resolve_round(round(wheel, &hash_for(n), vec![])).unwrap();
            assert_eq!(result.winner.location, PocketId(n));
        }
    }
}

// ── settlement ───────────────────────────────────────────────────────────────

#[test]
fn totals_identities_hold_for_random_rounds() {
    for seed in SEEDS {
        for hash in random_hashes(seed, 10) {
            let r = resolve_round(round(WheelVariant::European, &hash, mixed_bets())).unwrap();
            let w = r.wager;
            assert_eq!(w.payout + w.on_table - w.lost, w.delta, "delta identity for {hash}");
            assert_eq!(w.placed, w.on_table + w.lost, "placed identity for {hash}");
            assert!(r.bets.iter().all(|b| b.win().is_some() && b.payout().is_some()));
        }
    }
}

#[test]
fn fractional_wagers_keep_totals_consistent() {
    let mut limits = TableLimits::default();
    limits.straight_up = TableLimit::new(0.1, None);
    limits.total_inside = TableLimit::new(0.1, None);
    let request = RoundRequest {
        hash: Some(hash_for(17)),
        wheel: WheelVariant::European,
        table: limits,
        bets: vec![
            BetRequest::primitive(BetCategory::StraightUp, Location::pocket(17), 0.1),
            BetRequest::primitive(BetCategory::StraightUp, Location::pocket(18), 0.2),
            BetRequest::primitive(BetCategory::StraightUp, Location::pocket(19), 0.3),
        ],
    };
    let w = resolve_round(request).unwrap().wager;
    assert_eq!(w.on_table, 0.1);
    assert_eq!(w.placed, w.on_table + w.lost);
    assert_eq!(w.delta, w.payout + w.on_table - w.lost);
}

#[test]
fn winning_bets_are_exactly_the_won_subset() {
    let r = resolve_round(round(WheelVariant::European, &hash_for(17), mixed_bets())).unwrap();
    let won: Vec<_> = r.bets.iter().filter(|b| b.win() == Some(true)).cloned().collect();
    assert_eq!(r.winning_bets, won);
    for bet in &r.winning_bets {
        assert_eq!(bet.payout(), Some(bet.wager() * f64::from(bet.outcome().odds) + bet.wager()));
    }
}

#[test]
fn seventeen_settles_the_mixed_table() {
    let r = resolve_round(round(WheelVariant::European, &hash_for(17), mixed_bets())).unwrap();
    let winners: Vec<&str> = r.winning_bets.iter().map(|b| b.outcome().name.as_str()).collect();
    assert_eq!(
        winners,
        [
            "17",
            "Split 17-20",
            "Street 6",
            "Corner 13-14-16-17",
            "Line 13-18",
            "Dozen 2",
            "Column 2",
            "Odd",
        ]
    );
    // 17 is black, and no neighbour or voisins leg covers it.
    assert!(r.bets.iter().any(|b| b.outcome().name == "Red" && b.win() == Some(false)));
}

#[test]
fn straight_up_on_seventeen_pays_360() {
    let bets = vec![BetRequest::primitive(BetCategory::StraightUp, Location::pocket(17), 10.0)];
    let r = resolve_round(round(WheelVariant::European, &hash_for(17), bets)).unwrap();
    assert_eq!(r.bets[0].win(), Some(true));
    assert_eq!(r.bets[0].payout(), Some(360.0));
}

#[test]
fn basket_pays_less_on_american_wheel() {
    let basket = || vec![BetRequest::primitive(BetCategory::First5, Location::pockets(&[0, 1, 2, 3]), 10.0)];
    let american = resolve_round(round(WheelVariant::American, &hash_for(2), basket())).unwrap();
    let european = resolve_round(round(WheelVariant::European, &hash_for(2), basket())).unwrap();
    assert_eq!(american.wager.payout, 70.0);
    assert_eq!(european.wager.payout, 90.0);
}

// ── compound bets ────────────────────────────────────────────────────────────

#[test]
fn neighbour_wagers_are_conserved() {
    for wheel in [WheelVariant::American, WheelVariant::European] {
        for per_side in 1..=9u8 {
            let legs = 2 * per_side as usize + 1;
            let wager = (legs * 3) as f64;
            let bets = vec![BetRequest::neighbors(per_side, Location::pocket(5), wager)];
            let r = resolve_round(round(wheel, &hash_for(5), bets)).unwrap();
            assert_eq!(r.bets.len(), legs);
            assert_eq!(r.wager.placed, wager, "neighbors{per_side} on {wheel}");
            // The target is always one of the legs, so exactly one leg wins.
            assert_eq!(r.winning_bets.len(), 1);
        }
    }
}

#[test]
fn neighbors2_on_zero_uses_the_european_rim() {
    let bets = vec![BetRequest::neighbors(2, Location::pocket(0), 10.0)];
    let r = resolve_round(round(WheelVariant::European, &hash_for(1), bets)).unwrap();
    let pockets: Vec<String> = r.bets.iter().map(|b| b.location().to_string()).collect();
    assert_eq!(pockets, ["3", "26", "0", "32", "15"]);
    assert!(r.bets.iter().all(|b| b.wager() == 2.0));
}

#[test]
fn sector_wagers_are_conserved() {
    for (name, wager, legs) in [
        ("jeu zero", 8.0, 4),
        ("tiers du cylindre", 12.0, 6),
        ("voisins du zero", 27.0, 7),
        ("orphelins en plein", 16.0, 8),
        ("orphelins a cheval", 10.0, 5),
    ] {
        let r = resolve_round(round(WheelVariant::European, &hash_for(0), vec![BetRequest::sector(name, wager)]))
            .unwrap();
        assert_eq!(r.bets.len(), legs, "{name}");
        assert_eq!(r.wager.placed, wager, "{name}");
    }
}

#[test]
fn compound_legs_follow_plain_bets() {
    let bets = vec![
        BetRequest::sector("jeu zero", 4.0),
        BetRequest::neighbors(1, Location::pocket(10), 3.0),
        BetRequest::primitive(BetCategory::Outside, Location::named("high"), 1.0),
    ];
    let r = resolve_round(round(WheelVariant::European, &hash_for(3), bets)).unwrap();
    let kinds: Vec<BetCategory> = r.bets.iter().map(|b| b.category()).collect();
    assert_eq!(kinds[0], BetCategory::Outside);
    assert_eq!(&kinds[1..4], &[BetCategory::StraightUp; 3]);
    assert_eq!(r.bets[4].outcome().name, "Split 0-3");
}

// ── rejection ────────────────────────────────────────────────────────────────

#[test]
fn sector_on_american_wheel_is_not_available() {
    let request = round(WheelVariant::American, "0000000000000", vec![BetRequest::sector("jeu zero", 8.0)]);
    let err = RouletteEngine::new(request).unwrap_err();
    assert!(matches!(err, RouletteError::BetNotAvailable { wheel: WheelVariant::American, .. }));
}

#[test]
fn one_bad_bet_rejects_the_round() {
    let mut bets = mixed_bets();
    bets.push(BetRequest::primitive(BetCategory::Split, Location::pockets(&[1, 36]), 1.0));
    let err = resolve_round(round(WheelVariant::European, "0000000000000", bets)).unwrap_err();
    assert_eq!(err.kind(), "UnableToDetermineBet");
}

#[test]
fn inside_limit_counts_compound_legs() {
    let mut limits = TableLimits::default();
    limits.total_inside = TableLimit::new(1.0, Some(20.0));
    let request = RoundRequest {
        hash: Some("0000000000000".into()),
        wheel: WheelVariant::European,
        table: limits,
        bets: vec![
            BetRequest::primitive(BetCategory::StraightUp, Location::pocket(4), 5.0),
            BetRequest::sector("voisins", 18.0),
        ],
    };
    let err = resolve_round(request).unwrap_err();
    assert_eq!(err, RouletteError::InsideBetsTooLarge { total: 23.0, maximum: 20.0 });
}

#[test]
fn malformed_compound_wager_quotes_the_multiple() {
    let bets = vec![BetRequest::neighbors(4, Location::pocket(12), 10.0)];
    let err = resolve_round(round(WheelVariant::European, "0000000000000", bets)).unwrap_err();
    assert_eq!(err.to_string(), "wager for neighbors4 should be a multiple of 9");
}

#[test]
fn invalid_hash_is_rejected() {
    let err = resolve_round(round(WheelVariant::European, "xyz", vec![])).unwrap_err();
    assert_eq!(err.kind(), "SchemaInvalid");
}

// ── requests ─────────────────────────────────────────────────────────────────

#[test]
fn bet_types_parse_from_strings() {
    assert_eq!("straightUp".parse::<BetType>().unwrap(), BetType::Primitive(BetCategory::StraightUp));
    assert_eq!("line".parse::<BetType>().unwrap(), BetType::Primitive(BetCategory::DoubleStreet));
    assert_eq!("neighbors7".parse::<BetType>().unwrap(), BetType::Neighbors(7));
    assert_eq!("sector".parse::<BetType>().unwrap(), BetType::Sector);
    assert!("neighbors10".parse::<BetType>().is_err());
    assert!("straight".parse::<BetType>().is_err());
}

#[test]
fn request_json_round_trips_into_a_result() {
    let request: RoundRequest = serde_json::from_value(serde_json::json!({
        "hash": "00000000000ff",
        "table": { "outside": { "max": 100 }, "line": { "min": 2 } },
        "bets": [
            { "type": "line", "location": ["31", "36"], "wager": 2 },
            { "type": "outside", "location": "Black", "wager": 50 }
        ]
    }))
    .unwrap();
    assert_eq!(request.wheel, WheelVariant::European);
    assert_eq!(request.table.outside, TableLimit::new(1.0, Some(100.0)));
    assert_eq!(request.table.double_street, TableLimit::new(2.0, None));

    // 0xff = 255, 255 % 37 = 33.
    let r: RoundResult = resolve_round(request).unwrap();
    assert_eq!(r.winner.location, PocketId(33));
    assert_eq!(r.bets[0].outcome().name, "Line 31-36");
    assert_eq!(r.wager.payout, 2.0 * 8.0 + 2.0 + 50.0 * 2.0);
}
