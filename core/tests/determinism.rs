//! Determinism: two cores built with the same seed and fed the same
//! operation sequence settle every round identically.

use monkeybot_core::{engine::BotCore, games::FlipSide};

fn build_rich(seed: u64) -> BotCore {
    let core = BotCore::build_test(seed).expect("build test core");
    core.register(1, "gambler", None).unwrap();
    core.set_balance(1, 1_000_000.0).unwrap();
    core
}

fn settle_rounds(core: &mut BotCore) -> Vec<String> {
    let mut trace = Vec::new();
    for round in 0..500 {
        let settlement = match round % 3 {
            0 => core.play_flip(1, 10.0, FlipSide::Banana).unwrap(),
            1 => core.play_crash(1, 10.0).unwrap(),
            _ => core.play_slots(1, 10.0).unwrap(),
        };
        trace.push(format!(
            "{} {} {}",
            settlement.won,
            settlement.net_delta.to_bits(),
            serde_json::to_string(&settlement.outcome).unwrap()
        ));
    }
    trace
}

#[test]
fn identical_seeds_produce_identical_settlement_streams() {
    const SEED: u64 = 0xBEEF_CAFE;
    let mut core_a = build_rich(SEED);
    let mut core_b = build_rich(SEED);

    let trace_a = settle_rounds(&mut core_a);
    let trace_b = settle_rounds(&mut core_b);
    assert_eq!(trace_a, trace_b);

    assert_eq!(
        core_a.balance_of(1).unwrap().to_bits(),
        core_b.balance_of(1).unwrap().to_bits(),
        "final balances diverged between identical seeds"
    );
}

#[test]
fn different_seeds_diverge() {
    let mut core_a = build_rich(1);
    let mut core_b = build_rich(2);
    assert_ne!(settle_rounds(&mut core_a), settle_rounds(&mut core_b));
}
