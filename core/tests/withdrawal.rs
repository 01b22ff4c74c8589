//! Withdrawal workflow tests: eligibility, reserve-on-request,
//! refund-on-reject, and the no-double-processing guard.

use monkeybot_core::{
    engine::BotCore,
    error::BotError,
    ledger::TxKind,
    withdrawal::WithdrawalStatus,
};

/// A user with the given balance and three fully active referrals
/// (no sponsors configured, so referred accounts are vacuously active).
fn build_eligible(seed: u64, user_id: i64, balance: f64) -> BotCore {
    let core = BotCore::build_test(seed).expect("build test core");
    core.register(user_id, "saver", None).unwrap();
    for (i, child) in (100..103).enumerate() {
        core.register(child, &format!("kid-{i}"), Some(user_id)).unwrap();
    }
    core.set_balance(user_id, balance).unwrap();
    core
}

#[test]
fn happy_path_reserves_funds_at_request_time() {
    let core = build_eligible(1, 1, 100.0);

    let request = core.request_withdrawal(1, 50.0).unwrap();
    assert_eq!(request.status, WithdrawalStatus::Pending);
    assert!((request.amount - 50.0).abs() < 1e-9);
    assert!(!request.reference.is_empty());
    assert!((core.balance_of(1).unwrap() - 50.0).abs() < 1e-9);

    let pending = core.list_pending_withdrawals().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, request.id);
}

#[test]
fn over_balance_requests_are_rejected_without_a_request_row() {
    let core = build_eligible(2, 1, 40.0);

    assert!(matches!(
        core.request_withdrawal(1, 40.01),
        Err(BotError::InsufficientFunds { .. })
    ));
    assert!((core.balance_of(1).unwrap() - 40.0).abs() < 1e-9);
    assert!(core.list_pending_withdrawals().unwrap().is_empty());
}

#[test]
fn non_positive_amounts_are_rejected() {
    let core = build_eligible(3, 1, 40.0);
    assert!(matches!(
        core.request_withdrawal(1, 0.0),
        Err(BotError::InvalidAmount { .. })
    ));
    assert!(matches!(
        core.request_withdrawal(1, -5.0),
        Err(BotError::InvalidAmount { .. })
    ));
    assert!(core.list_pending_withdrawals().unwrap().is_empty());
}

#[test]
fn three_active_referrals_are_required() {
    let core = BotCore::build_test(4).expect("build test core");
    core.register(1, "saver", None).unwrap();
    core.register(100, "only-kid", Some(1)).unwrap();
    core.set_balance(1, 100.0).unwrap();

    match core.request_withdrawal(1, 50.0) {
        Err(BotError::NotEnoughReferrals { active, required }) => {
            assert_eq!((active, required), (1, 3));
        }
        other => panic!("expected NotEnoughReferrals, got {other:?}"),
    }
    assert!((core.balance_of(1).unwrap() - 100.0).abs() < 1e-9);
}

#[test]
fn reject_restores_the_exact_pre_request_balance() {
    let core = build_eligible(5, 1, 123.45);

    let request = core.request_withdrawal(1, 67.89).unwrap();
    core.reject_withdrawal(request.id).unwrap();

    assert!((core.balance_of(1).unwrap() - 123.45).abs() < 1e-9);
    let kinds: Vec<_> = core
        .transactions_for(1)
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert!(kinds.contains(&TxKind::Withdrawal));
    assert!(kinds.contains(&TxKind::WithdrawalRefund));
    assert!(core.list_pending_withdrawals().unwrap().is_empty());
}

#[test]
fn approve_moves_no_money() {
    let core = build_eligible(6, 1, 100.0);

    let request = core.request_withdrawal(1, 50.0).unwrap();
    core.approve_withdrawal(request.id).unwrap();

    assert!((core.balance_of(1).unwrap() - 50.0).abs() < 1e-9);
    assert!(core.list_pending_withdrawals().unwrap().is_empty());
}

#[test]
fn terminal_requests_cannot_be_processed_twice() {
    let core = build_eligible(7, 1, 100.0);

    let approved = core.request_withdrawal(1, 10.0).unwrap();
    core.approve_withdrawal(approved.id).unwrap();
    assert!(matches!(
        core.approve_withdrawal(approved.id),
        Err(BotError::NotPending { .. })
    ));
    assert!(matches!(
        core.reject_withdrawal(approved.id),
        Err(BotError::NotPending { .. })
    ));

    let rejected = core.request_withdrawal(1, 10.0).unwrap();
    core.reject_withdrawal(rejected.id).unwrap();
    assert!(matches!(
        core.reject_withdrawal(rejected.id),
        Err(BotError::NotPending { .. })
    ));
    // The double reject must not refund twice.
    assert!((core.balance_of(1).unwrap() - 90.0).abs() < 1e-9);

    assert!(matches!(
        core.approve_withdrawal(9999),
        Err(BotError::NotPending { request_id: 9999 })
    ));
}
