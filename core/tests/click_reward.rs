//! Click reward scheduler tests: cooldown, gating, and the referrer
//! kickback.

use monkeybot_core::{engine::BotCore, error::BotError, ledger::TxKind};

fn build(seed: u64) -> BotCore {
    BotCore::build_test(seed).expect("build test core")
}

#[test]
fn claim_credits_the_reward_and_arms_the_cooldown() {
    let mut core = build(1);
    core.register(1, "alice", None).unwrap();

    let reward = core.claim_click_reward(1).unwrap();
    assert!((reward.amount - core.config().click_reward).abs() < 1e-9);
    assert!(reward.referrer_kickback.is_none());
    assert!((core.balance_of(1).unwrap() - reward.amount).abs() < 1e-9);

    // Immediately claiming again hits the full cooldown.
    match core.claim_click_reward(1) {
        Err(BotError::CooldownActive { remaining_secs }) => {
            assert_eq!(remaining_secs, core.config().click_cooldown_secs);
        }
        other => panic!("expected CooldownActive, got {other:?}"),
    }

    // Halfway through, the remaining time has shrunk accordingly.
    core.advance_clock(1800);
    match core.claim_click_reward(1) {
        Err(BotError::CooldownActive { remaining_secs }) => {
            assert_eq!(remaining_secs, 1800);
        }
        other => panic!("expected CooldownActive, got {other:?}"),
    }

    // At exactly the cooldown boundary the claim goes through.
    core.advance_clock(1800);
    core.claim_click_reward(1).unwrap();
}

#[test]
fn every_claim_kicks_back_to_the_referrer() {
    let mut core = build(2);
    core.register(1, "parent", None).unwrap();
    core.register(2, "kid", Some(1)).unwrap();

    let kickback = core.config().click_reward * core.config().referral_kickback_share;
    // First claim also fires the signup bonus (first gate clearance).
    let reward = core.claim_click_reward(2).unwrap();
    assert_eq!(reward.referrer_kickback, Some((1, kickback)));

    core.advance_clock(3600);
    core.claim_click_reward(2).unwrap();

    let income: Vec<_> = core
        .transactions_for(1)
        .unwrap()
        .into_iter()
        .filter(|t| t.kind == TxKind::ReferralIncome)
        .collect();
    assert_eq!(income.len(), 2, "one kickback per claim");
    for entry in income {
        assert!((entry.delta - kickback).abs() < 1e-9);
    }
}

#[test]
fn claims_are_gated_on_subscription() {
    let core = build(3);
    core.register(1, "alice", None).unwrap();
    let sponsor = core.add_sponsor("@sponsor", "c1", "https://x/join").unwrap();

    assert!(matches!(
        core.claim_click_reward(1),
        Err(BotError::NotSubscribed)
    ));
    assert!((core.balance_of(1).unwrap()).abs() < 1e-9, "no partial credit");

    core.gate_record(1, sponsor.sponsor_id, true).unwrap();
    core.claim_click_reward(1).unwrap();
}

#[test]
fn unknown_users_cannot_claim() {
    let core = build(4);
    assert!(matches!(
        core.claim_click_reward(404),
        Err(BotError::UnknownAccount { .. })
    ));
}
