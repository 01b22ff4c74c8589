//! bot-runner: headless traffic driver for the engagement-bot core.
//!
//! Usage:
//!   bot-runner --seed 12345 --users 50 --rounds 2000 --db run.db
//!   bot-runner --seed 12345 --json
//!
//! Seeds a population with referral chains and sponsor subscriptions,
//! replays randomized intents (clicks, games, withdrawals, admin
//! decisions), then prints a leaderboard and the pending payout queue.

use anyhow::Result;
use monkeybot_core::{
    clock::BotClock,
    config::BotConfig,
    engine::BotCore,
    error::BotError,
    games::FlipSide,
    rng::DiceRng,
    store::BotStore,
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let users = parse_arg(&args, "--users", 50i64);
    let rounds = parse_arg(&args, "--rounds", 2000u64);
    let json_output = args.iter().any(|a| a == "--json");
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or(":memory:");

    if !json_output {
        println!("bot-runner");
        println!("  seed:   {seed}");
        println!("  users:  {users}");
        println!("  rounds: {rounds}");
        println!("  db:     {db}");
        println!();
    }

    let store = if db == ":memory:" {
        BotStore::in_memory()?
    } else {
        BotStore::open(db)?
    };
    store.migrate()?;
    let start = chrono::Utc::now().timestamp();
    let mut core = BotCore::new(store, BotClock::Manual(start), seed, BotConfig::default());

    // Traffic randomness is separate from the game streams so driver
    // changes never shift settled outcomes.
    let mut traffic = DiceRng::new(seed, 0xD21F).with_name("traffic");

    seed_population(&core, users, &mut traffic)?;
    let refused = replay_traffic(&mut core, users, rounds, &mut traffic)?;
    if json_output {
        print_summary_json(&core, rounds, refused)?;
    } else {
        println!("replayed {rounds} intents ({refused} refused)");
        print_summary(&core)?;
    }
    Ok(())
}

/// Machine-readable run summary for downstream tooling.
#[derive(serde::Serialize)]
struct RunSummary {
    rounds: u64,
    refused: u64,
    leaderboard: Vec<monkeybot_core::account::Account>,
    pending_withdrawals: Vec<monkeybot_core::withdrawal::WithdrawalRequest>,
}

fn print_summary_json(core: &BotCore, rounds: u64, refused: u64) -> Result<()> {
    let summary = RunSummary {
        rounds,
        refused,
        leaderboard: core.list_accounts_by_balance_desc()?,
        pending_withdrawals: core.list_pending_withdrawals()?,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Register users 1..=n. Each user after the first few refers back to a
/// random earlier user; everyone subscribes to the sponsor channel with
/// 80% probability.
fn seed_population(core: &BotCore, users: i64, traffic: &mut DiceRng) -> Result<()> {
    let sponsor = core.add_sponsor("@sponsor", "chan-1", "https://example.org/join")?;

    for user_id in 1..=users {
        let referrer = if user_id > 3 && traffic.chance(0.7) {
            Some(traffic.next_u64_below(user_id as u64 - 1) as i64 + 1)
        } else {
            None
        };
        core.register(user_id, &format!("user-{user_id}"), referrer)?;
        core.gate_record(user_id, sponsor.sponsor_id, traffic.chance(0.8))?;
        core.set_balance(user_id, 100.0)?;
    }
    core.set_admin(1, true)?;
    log::info!("seeded {users} users");
    Ok(())
}

fn replay_traffic(
    core: &mut BotCore,
    users: i64,
    rounds: u64,
    traffic: &mut DiceRng,
) -> Result<u64> {
    let mut refused = 0u64;
    for _ in 0..rounds {
        let user_id = traffic.next_u64_below(users as u64) as i64 + 1;
        let roll = traffic.next_f64();
        let bet = 1.0 + traffic.next_u64_below(10) as f64;

        let result = if roll < 0.30 {
            core.claim_click_reward(user_id).map(|_| ())
        } else if roll < 0.50 {
            let choice = if traffic.chance(0.5) {
                FlipSide::Banana
            } else {
                FlipSide::Monkey
            };
            core.play_flip(user_id, bet, choice).map(|_| ())
        } else if roll < 0.70 {
            core.play_crash(user_id, bet).map(|_| ())
        } else if roll < 0.90 {
            core.play_slots(user_id, bet).map(|_| ())
        } else if roll < 0.95 {
            core.request_withdrawal(user_id, bet * 5.0).map(|_| ())
        } else {
            // Admin sweep: decide the oldest pending payout.
            match core.list_pending_withdrawals()?.first() {
                Some(request) if traffic.chance(0.5) => core.approve_withdrawal(request.id),
                Some(request) => core.reject_withdrawal(request.id),
                None => Ok(()),
            }
        };

        match result {
            Ok(()) => {}
            Err(BotError::Database(e)) => return Err(e.into()),
            Err(refusal) => {
                log::debug!("refused: user={user_id} {refusal}");
                refused += 1;
            }
        }

        // A few minutes pass between interactions.
        core.advance_clock(60 + traffic.next_u64_below(600) as i64);
    }
    Ok(refused)
}

fn print_summary(core: &BotCore) -> Result<()> {
    println!("\n=== leaderboard ===");
    for account in core.list_accounts_by_balance_desc()?.iter().take(10) {
        let counts = core.referral_counts(account.user_id)?;
        println!(
            "  {:<12} balance={:>10.2}  referrals={}/{}",
            account.display_name, account.balance, counts.active, counts.total
        );
    }

    let pending = core.list_pending_withdrawals()?;
    println!("\n=== pending payouts: {} ===", pending.len());
    for request in pending.iter().take(10) {
        println!(
            "  #{:<4} user={:<4} amount={:>8.2}  ref={}",
            request.id, request.user_id, request.amount, request.reference
        );
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
