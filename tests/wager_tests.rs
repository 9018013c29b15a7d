use chicken_fight::combat::{Rng, Side};
use chicken_fight::config::OddsConfig;
use chicken_fight::wager::{
    compute_odds, compute_odds_with, compute_winnings, generate_population, side_totals,
    try_compute_winnings, PayoutError, UserStake, WagerEntry,
};

fn approx_eq(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() <= tol, "expected {b}, got {a}");
}

#[test]
fn population_size_and_stakes_stay_in_range() {
    let mut rng = Rng::new(9);
    for _ in 0..10_000 {
        let population = generate_population(&mut rng);
        assert!((5..=20).contains(&population.len()), "size {}", population.len());

        assert_eq!(population[0].side, Side::A);
        assert_eq!(population[1].side, Side::B);
        assert!((50..=1000).contains(&population[0].amount));
        assert!((50..=1000).contains(&population[1].amount));
        assert!(population[2..]
            .iter()
            .all(|entry| (20..=5000).contains(&entry.amount)));
    }
}

#[test]
fn population_always_backs_both_sides() {
    let mut rng = Rng::new(10);
    for _ in 0..10_000 {
        let (a, b) = side_totals(&generate_population(&mut rng));
        assert!(a > 0 && b > 0);
    }
}

#[test]
fn filler_entries_land_on_both_sides() {
    let mut rng = Rng::new(12);
    let mut sides = [false, false];
    for _ in 0..200 {
        for entry in generate_population(&mut rng).iter().skip(2) {
            match entry.side {
                Side::A => sides[0] = true,
                Side::B => sides[1] = true,
            }
        }
    }
    assert_eq!(sides, [true, true]);
}

#[test]
fn totals_include_every_entry_and_the_user_stake() {
    let mut rng = Rng::new(3);
    for round in 0..1_000u64 {
        let population = generate_population(&mut rng);
        let side = if round % 2 == 0 { Side::A } else { Side::B };
        let amount = round * 7;
        let info = compute_odds(&population, Some(UserStake::new(side, amount)));

        let sum_on = |wanted: Side| -> u64 {
            population
                .iter()
                .filter(|entry| entry.side == wanted)
                .map(|entry| entry.amount)
                .sum()
        };
        let user_on = |wanted: Side| if wanted == side { amount } else { 0 };

        assert_eq!(info.bet_a, sum_on(Side::A) + user_on(Side::A));
        assert_eq!(info.bet_b, sum_on(Side::B) + user_on(Side::B));
        assert_eq!(info.pool_total(), population.iter().map(|e| e.amount).sum::<u64>() + amount);
    }
}

#[test]
fn one_sided_pool_floors_the_empty_side() {
    let population = vec![WagerEntry::new(Side::A, 400), WagerEntry::new(Side::A, 600)];
    let info = compute_odds(&population, None);

    assert_eq!(info.bet_b, 0);
    assert_eq!(info.floored_b, 1);
    assert!(info.odds_a.is_finite() && info.odds_b.is_finite());
    approx_eq(info.odds_a, 1001.0 / 1000.0, 1e-12);
    assert_eq!(info.odds_b, 10.0);
}

#[test]
fn one_sided_pool_without_cap_is_still_finite() {
    let population = vec![WagerEntry::new(Side::B, 5000)];
    let config = OddsConfig {
        max_odds: None,
        ..OddsConfig::default()
    };
    let info = compute_odds_with(&population, None, &config);
    approx_eq(info.odds_a, 5001.0, 1e-9);
    assert!(info.odds_a.is_finite());
}

#[test]
fn reference_pool_with_user_bet_on_a() {
    let population = vec![WagerEntry::new(Side::A, 100), WagerEntry::new(Side::B, 100)];
    let info = compute_odds(&population, Some(UserStake::new(Side::A, 100)));

    assert_eq!(info.bet_a, 200);
    assert_eq!(info.bet_b, 100);
    approx_eq(info.odds_a, 1.5, 1e-12);
    approx_eq(info.odds_b, 3.0, 1e-12);
    assert_eq!(info.display_a, "1:1.50");
    assert_eq!(info.display_b, "1:3.00");
    assert_eq!(info.multiplier_for(Side::B), info.odds_b);
    assert_eq!(info.display_for(Side::A), "1:1.50");
}

#[test]
fn generated_odds_are_bounded() {
    let mut rng = Rng::new(44);
    for _ in 0..5_000 {
        let info = compute_odds(&generate_population(&mut rng), None);
        for odds in [info.odds_a, info.odds_b] {
            assert!(odds.is_finite());
            assert!((1.0..=10.0).contains(&odds), "odds {odds}");
        }
    }
}

#[test]
fn winnings_scale_the_bet() {
    assert_eq!(compute_winnings(100.0, 2.5), 250);
    assert_eq!(compute_winnings(100.0, 1.5), 150);
    assert_eq!(compute_winnings(7.0, 1.0), 7);
}

#[test]
fn negative_bet_is_non_fatal_and_non_negative() {
    assert_eq!(compute_winnings(-5.0, 2.0), 0);
    assert_eq!(compute_winnings(f64::NAN, 2.0), 0);
    assert_eq!(compute_winnings(f64::INFINITY, 2.0), 0);
}

#[test]
fn invalid_multiplier_returns_the_bet() {
    assert_eq!(compute_winnings(100.0, f64::INFINITY), 100);
    assert_eq!(compute_winnings(100.0, f64::NAN), 100);
    assert_eq!(compute_winnings(100.0, -1.0), 100);
}

#[test]
fn strict_winnings_surface_the_anomaly() {
    assert_eq!(try_compute_winnings(100.0, 2.5), Ok(250));
    let err = try_compute_winnings(100.0, f64::INFINITY).unwrap_err();
    assert!(matches!(err, PayoutError::InvalidMultiplier { .. }));
    assert_eq!(err.fallback(), 100);
    assert_eq!(PayoutError::InvalidBet(-5.0).fallback(), 0);
}
