//! Pending-intent tests: consume-once semantics and expiry.

use monkeybot_core::{
    engine::BotCore,
    games::{FlipSide, Game},
};

fn build(seed: u64) -> BotCore {
    BotCore::build_test(seed).expect("build test core")
}

#[test]
fn intents_are_consumed_exactly_once() {
    let core = build(1);
    core.register(1, "alice", None).unwrap();

    core.set_intent(1, Game::Flip, Some(FlipSide::Banana)).unwrap();
    let intent = core.take_intent(1).unwrap().expect("intent present");
    assert_eq!(intent.game, Game::Flip);
    assert_eq!(intent.choice, Some(FlipSide::Banana));

    assert!(core.take_intent(1).unwrap().is_none(), "consume-once");
}

#[test]
fn a_new_intent_replaces_the_previous_one() {
    let core = build(2);
    core.register(1, "alice", None).unwrap();

    core.set_intent(1, Game::Flip, Some(FlipSide::Monkey)).unwrap();
    core.set_intent(1, Game::Crash, None).unwrap();

    let intent = core.take_intent(1).unwrap().expect("intent present");
    assert_eq!(intent.game, Game::Crash);
    assert_eq!(intent.choice, None);
}

#[test]
fn expired_intents_are_reported_absent() {
    let mut core = build(3);
    core.register(1, "alice", None).unwrap();

    core.set_intent(1, Game::Slots, None).unwrap();
    core.advance_clock(core.config().intent_ttl_secs + 1);
    assert!(core.take_intent(1).unwrap().is_none());
}

#[test]
fn intents_are_per_user() {
    let core = build(4);
    core.register(1, "alice", None).unwrap();
    core.register(2, "bob", None).unwrap();

    core.set_intent(1, Game::Slots, None).unwrap();
    assert!(core.take_intent(2).unwrap().is_none());
    assert!(core.take_intent(1).unwrap().is_some());
}
