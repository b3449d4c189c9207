/// Property-based tests for the door invariants.
///
/// Randomness is scripted through `SequenceSource`, so each property
/// explores the full space of winning-door draws, goat-door draws, and
/// player choices.
use proptest::prelude::*;

use monty_hall::{
    AccountId, CallContext, Door, GameEngine, GameSettings, NearAmount, SequenceSource, Stage,
    StageName,
};

fn played_engine(winning_draw: u32, open_draw: u32, first: Door) -> GameEngine {
    let mut engine = GameEngine::new(
        AccountId::new("owner.near"),
        GameSettings::default(),
        Box::new(SequenceSource::new([winning_draw, open_draw])),
    );
    let ctx = CallContext::call(
        AccountId::new("alice.near"),
        AccountId::new("game.near"),
        NearAmount::ONE_NEAR,
    );
    engine.start_game(&ctx).unwrap();
    engine.make_turn(Some(first));
    engine
}

fn door_strategy() -> impl Strategy<Value = Door> {
    (1u8..=3).prop_map(|n| Door::from_number(n).unwrap())
}

proptest! {
    #[test]
    fn opened_door_is_never_winning_or_first(
        winning_draw in 1u32..=3,
        open_draw in 0u32..=1,
        first in door_strategy(),
    ) {
        let engine = played_engine(winning_draw, open_draw, first);
        match engine.stage() {
            Stage::FinalPick(state) => {
                prop_assert_ne!(state.opened_door(), state.winning_door());
                prop_assert_ne!(Some(state.opened_door()), state.first_choice());
                prop_assert_eq!(state.first_choice(), Some(first));
            }
            other => prop_assert!(false, "expected final pick, got {:?}", other),
        }
    }

    #[test]
    fn switch_offer_is_the_unique_remaining_door(
        winning_draw in 1u32..=3,
        open_draw in 0u32..=1,
        first in door_strategy(),
    ) {
        let engine = played_engine(winning_draw, open_draw, first);
        match engine.stage() {
            Stage::FinalPick(state) => {
                let offer = state.switch_offer().unwrap();
                prop_assert_ne!(offer, first);
                prop_assert_ne!(offer, state.opened_door());
                prop_assert_eq!(
                    offer.number() + first.number() + state.opened_door().number(),
                    6
                );
            }
            other => prop_assert!(false, "expected final pick, got {:?}", other),
        }
    }

    #[test]
    fn switching_wins_exactly_when_first_pick_was_a_goat(
        winning_draw in 1u32..=3,
        open_draw in 0u32..=1,
        first in door_strategy(),
    ) {
        let mut engine = played_engine(winning_draw, open_draw, first);
        let (winning, offer) = match engine.stage() {
            Stage::FinalPick(state) => (state.winning_door(), state.switch_offer().unwrap()),
            other => panic!("expected final pick, got {other:?}"),
        };

        engine.make_turn(Some(offer));
        let switched_to_goat = first == winning;
        if switched_to_goat {
            prop_assert_eq!(engine.view().stage, StageName::Idle);
            prop_assert!(engine.take_payout_request().is_none());
        } else {
            prop_assert_eq!(engine.view().stage, StageName::PendingPayout);
            let request = engine.take_payout_request().unwrap();
            prop_assert_eq!(request.amount, NearAmount::from_near(2));
        }
        // Either way, the pot itself is untouched by resolution.
        prop_assert_eq!(engine.pot(), NearAmount::from_near(2));
    }

    #[test]
    fn staying_wins_exactly_when_first_pick_was_the_winner(
        winning_draw in 1u32..=3,
        open_draw in 0u32..=1,
        first in door_strategy(),
    ) {
        let mut engine = played_engine(winning_draw, open_draw, first);
        let winning = match engine.stage() {
            Stage::FinalPick(state) => state.winning_door(),
            other => panic!("expected final pick, got {other:?}"),
        };

        engine.make_turn(Some(first));
        if first == winning {
            prop_assert_eq!(engine.view().stage, StageName::PendingPayout);
        } else {
            prop_assert_eq!(engine.view().stage, StageName::Idle);
        }
    }
}
