//! Ledger tests: the sum-of-deltas invariant, admin overrides, and the
//! unknown-account guard.

use monkeybot_core::{engine::BotCore, error::BotError, ledger::TxKind};

fn build(seed: u64) -> BotCore {
    BotCore::build_test(seed).expect("build test core")
}

fn assert_ledger_invariant(core: &BotCore, user_id: i64) {
    let balance = core.balance_of(user_id).unwrap();
    let sum: f64 = core
        .transactions_for(user_id)
        .unwrap()
        .iter()
        .map(|t| t.delta)
        .sum();
    assert!(
        (balance - sum).abs() < 1e-9,
        "ledger invariant broken for user {user_id}: balance={balance}, sum={sum}"
    );
}

#[test]
fn balance_equals_sum_of_deltas_after_mixed_operations() {
    let core = build(1);
    core.register(10, "alice", None).unwrap();

    core.credit_or_debit(10, 5.0, TxKind::AdminAdjustment, "seed")
        .unwrap();
    core.credit_or_debit(10, 0.2, TxKind::Click, "click").unwrap();
    core.credit_or_debit(10, -1.5, TxKind::GameLoss, "flip").unwrap();
    core.credit_or_debit(10, 3.0, TxKind::GameWin, "crash").unwrap();
    core.set_balance(10, 100.0).unwrap();
    core.credit_or_debit(10, -40.0, TxKind::Withdrawal, "payout")
        .unwrap();

    assert_ledger_invariant(&core, 10);
    assert!((core.balance_of(10).unwrap() - 60.0).abs() < 1e-9);
}

#[test]
fn set_balance_records_the_difference_as_admin_adjustment() {
    let core = build(2);
    core.register(11, "bob", None).unwrap();
    core.credit_or_debit(11, 30.0, TxKind::AdminAdjustment, "seed")
        .unwrap();

    let entry = core.set_balance(11, 12.5).unwrap();
    assert_eq!(entry.kind, TxKind::AdminAdjustment);
    assert!((entry.delta - (12.5 - 30.0)).abs() < 1e-9);
    assert!((core.balance_of(11).unwrap() - 12.5).abs() < 1e-9);
    assert_ledger_invariant(&core, 11);
}

#[test]
fn ledger_is_append_only_and_ordered() {
    let core = build(3);
    core.register(12, "carol", None).unwrap();
    for i in 0..5 {
        core.credit_or_debit(12, i as f64, TxKind::AdminAdjustment, "step")
            .unwrap();
    }
    let entries = core.transactions_for(12).unwrap();
    assert_eq!(entries.len(), 5);
    for pair in entries.windows(2) {
        assert!(pair[0].id < pair[1].id, "entry ids must be monotonic");
    }
}

#[test]
fn operations_on_unknown_accounts_are_rejected() {
    let core = build(4);
    assert!(matches!(
        core.balance_of(999),
        Err(BotError::UnknownAccount { user_id: 999 })
    ));
    assert!(matches!(
        core.credit_or_debit(999, 1.0, TxKind::Click, ""),
        Err(BotError::UnknownAccount { .. })
    ));
    assert!(matches!(
        core.set_balance(999, 5.0),
        Err(BotError::UnknownAccount { .. })
    ));
    assert!(matches!(
        core.transactions_for(999),
        Err(BotError::UnknownAccount { .. })
    ));
}

#[test]
fn debits_are_not_blocked_by_the_store_itself() {
    // Sufficiency checks live in the callers; the ledger write path is
    // deliberately permissive.
    let core = build(5);
    core.register(13, "dave", None).unwrap();
    core.credit_or_debit(13, -7.0, TxKind::GameLoss, "uncovered debit")
        .unwrap();
    assert!((core.balance_of(13).unwrap() + 7.0).abs() < 1e-9);
    assert_ledger_invariant(&core, 13);
}
