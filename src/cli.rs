use serde::Serialize;

use crate::combat::{classify, Rng, Side};
use crate::config::{load_config_from_env, GameConfig};
use crate::parallel::{run_simulation_batches, WorkerPool};
use crate::round::Round;
use crate::simulation::{BettingStrategy, SimulationConfig};
use crate::wager::{compute_odds_with, generate_population_with, UserStake};

/// Number of progress-reporting batches for `simulate`.
const SIMULATE_PROGRESS_BATCH_COUNT: usize = 10;

const USAGE: &str = "usage: chicken_fight <round|odds|classify|simulate>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Round,
    Odds,
    Classify,
    Simulate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("round") => Some(Command::Round),
        Some("odds") => Some(Command::Odds),
        Some("classify") => Some(Command::Classify),
        Some("simulate") => Some(Command::Simulate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    let Some(command) = parse_command(args) else {
        eprintln!("{USAGE}");
        return 2;
    };

    let config = match load_config_from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            return 1;
        }
    };

    match command {
        Command::Round => handle_round(args, &config),
        Command::Odds => handle_odds(args, &config),
        Command::Classify => handle_classify(args),
        Command::Simulate => handle_simulate(args, &config),
    }
}

/// `round [seed] [side] [bet] [balance]`: plays one full round and prints it.
fn handle_round(args: &[String], config: &GameConfig) -> i32 {
    let Some(side) = parse_side_arg(args.get(3)) else {
        eprintln!("usage: chicken_fight round [seed] [a|b] [bet] [balance]");
        return 2;
    };
    let bet = parse_u64_arg(args.get(4), "bet", 10);
    let balance = parse_u64_arg(args.get(5), "balance", config.starting_balance);

    let mut rng = rng_from_arg(args.get(2));
    let mut round = Round::new(&mut rng, *config);
    let placed = round.select_side(side).map(|_| ());
    if let Err(err) = placed.and_then(|()| round.set_bet_amount(bet, balance).map(|_| ())) {
        eprintln!("round failed: {err}");
        return 1;
    }
    if let Err(err) = round.play(&mut rng, balance) {
        eprintln!("round failed: {err}");
        return 1;
    }
    print_json(&round, "round")
}

/// `odds [seed] [side] [amount]`: wager pool and odds, optionally with a pending stake.
fn handle_odds(args: &[String], config: &GameConfig) -> i32 {
    #[derive(Serialize)]
    struct OddsReport<'a> {
        population: &'a [crate::wager::WagerEntry],
        user: Option<UserStake>,
        odds: crate::wager::OddsInfo,
    }

    let user = match args.get(3) {
        None => None,
        Some(raw) => match Side::parse(raw) {
            Some(side) => Some(UserStake::new(side, parse_u64_arg(args.get(4), "amount", 0))),
            None => {
                eprintln!("usage: chicken_fight odds [seed] [a|b] [amount]");
                return 2;
            }
        },
    };

    let mut rng = rng_from_arg(args.get(2));
    let population = generate_population_with(&mut rng, &config.population);
    let odds = compute_odds_with(&population, user, &config.odds);
    print_json(
        &OddsReport {
            population: &population,
            user,
            odds,
        },
        "odds",
    )
}

fn handle_classify(args: &[String]) -> i32 {
    let Some(value) = args.get(2).and_then(|raw| raw.parse::<u8>().ok()) else {
        eprintln!("usage: chicken_fight classify <0-100>");
        return 2;
    };
    println!("{}", classify(value));
    0
}

/// `simulate [rounds] [seed] [strategy] [--table]`.
fn handle_simulate(args: &[String], config: &GameConfig) -> i32 {
    let rounds = parse_u64_arg(args.get(2), "rounds", 1000) as usize;
    let seed = parse_u64_arg(args.get(3), "seed", 7);
    let strategy = match args.get(4).filter(|arg| !arg.starts_with("--")) {
        None => BettingStrategy::default(),
        Some(raw) => match BettingStrategy::parse(raw) {
            Some(strategy) => strategy,
            None => {
                eprintln!("usage: chicken_fight simulate [rounds] [seed] [a|b|favorite|underdog] [--table]");
                return 2;
            }
        },
    };
    let as_table = args.iter().any(|arg| arg == "--table");

    let sim = SimulationConfig {
        rounds,
        seed,
        strategy,
        bet: config.starting_balance,
        game: *config,
    };
    let report = run_simulation_batches(
        &sim,
        &WorkerPool::default(),
        SIMULATE_PROGRESS_BATCH_COUNT,
        |done, total| log::info!("simulated {done}/{total} rounds"),
    );

    if as_table {
        println!("rounds\tseed\ta_win_rate\tplayer_win_rate\treturn_to_player");
        println!(
            "{}\t{}\t{:.6}\t{:.6}\t{:.6}",
            report.rounds, report.seed, report.a_win_rate, report.player_win_rate, report.return_to_player
        );
        0
    } else {
        print_json(&report, "simulation report")
    }
}

fn print_json<T: Serialize>(value: &T, what: &str) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize {what}: {err}");
            1
        }
    }
}

/// Seeded from the argument when given, from the OS otherwise.
fn rng_from_arg(raw: Option<&String>) -> Rng {
    match raw {
        Some(_) => Rng::new(parse_u64_arg(raw, "seed", 7)),
        None => Rng::from_entropy(),
    }
}

fn parse_side_arg(raw: Option<&String>) -> Option<Side> {
    match raw {
        None => Some(Side::A),
        Some(value) => Side::parse(value),
    }
}

fn parse_u64_arg(raw: Option<&String>, name: &str, default: u64) -> u64 {
    raw.and_then(|value| value.parse::<u64>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}
