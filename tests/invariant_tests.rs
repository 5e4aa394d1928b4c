//! Property tests over random play.
//!
//! Random intent sequences are applied to freshly dealt sessions; after every
//! step the table must still hold exactly one deck, every foundation must be
//! a same-suit run from Ace, and any accepted move must undo cleanly.

use proptest::prelude::*;

use klondike_core::{
    CardId, CycleState, DrawOption, GameSession, PileId, ScoringOption, SessionConfig,
    DECK_SIZE,
};

#[derive(Clone, Debug)]
enum Intent {
    Draw,
    /// Pick the n-th pickable card and the m-th playing pile.
    Move(usize, usize),
    /// Like `Move`, then undo at once and check nothing changed.
    MoveThenUndo(usize, usize),
    AutoMove(usize),
    Undo,
    Tick,
}

fn intent() -> impl Strategy<Value = Intent> {
    prop_oneof![
        3 => Just(Intent::Draw),
        4 => (any::<usize>(), any::<usize>()).prop_map(|(c, d)| Intent::Move(c, d)),
        2 => (any::<usize>(), any::<usize>()).prop_map(|(c, d)| Intent::MoveThenUndo(c, d)),
        2 => any::<usize>().prop_map(Intent::AutoMove),
        1 => Just(Intent::Undo),
        1 => Just(Intent::Tick),
    ]
}

fn config() -> impl Strategy<Value = SessionConfig> {
    (any::<bool>(), any::<bool>()).prop_map(|(three, vegas)| {
        SessionConfig::new()
            .with_draw(if three { DrawOption::Three } else { DrawOption::One })
            .with_scoring(if vegas { ScoringOption::Vegas } else { ScoringOption::Standard })
    })
}

fn pickable(session: &GameSession) -> Vec<CardId> {
    (0..DECK_SIZE as u8)
        .map(CardId)
        .filter(|&card| session.is_pickable(card))
        .collect()
}

fn destinations() -> Vec<PileId> {
    PileId::foundations().chain(PileId::tableaus()).collect()
}

fn check_table(session: &GameSession) -> Result<(), TestCaseError> {
    let table = session.table();
    prop_assert_eq!(table.verify_full_deck(), Ok(()));

    for foundation in PileId::foundations() {
        let cards = session.pile(foundation).unwrap().cards();
        let Some(first) = cards.front() else { continue };
        for (i, card) in cards.iter().enumerate() {
            prop_assert_eq!(card.suit(), first.suit());
            prop_assert_eq!(usize::from(card.rank().value()), i + 1);
            prop_assert!(card.is_face_up());
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_random_play_keeps_invariants(
        seed in any::<u64>(),
        config in config(),
        intents in prop::collection::vec(intent(), 1..200),
    ) {
        let mut session = GameSession::new(config);
        session.deal_new_game(seed);
        check_table(&session)?;
        let dests = destinations();

        for intent in intents {
            match intent {
                Intent::Draw => {
                    session.draw_next();
                }
                Intent::Move(c, d) => {
                    let cards = pickable(&session);
                    if !cards.is_empty() {
                        session.attempt_move(cards[c % cards.len()], dests[d % dests.len()]);
                    }
                }
                Intent::MoveThenUndo(c, d) => {
                    let cards = pickable(&session);
                    if cards.is_empty() {
                        continue;
                    }
                    let table = session.table().clone();
                    let score = session.score();
                    let talon = session.talon_state();
                    let outcome = session.attempt_move(cards[c % cards.len()], dests[d % dests.len()]);
                    if outcome.is_accepted() {
                        prop_assert!(session.undo());
                        prop_assert_eq!(session.table(), &table);
                        prop_assert_eq!(session.score(), score);
                        prop_assert_eq!(session.talon_state(), talon);
                    } else {
                        prop_assert_eq!(session.table(), &table);
                    }
                }
                Intent::AutoMove(c) => {
                    let cards = pickable(&session);
                    if !cards.is_empty() {
                        session.auto_move_to_foundation(cards[c % cards.len()]);
                    }
                }
                Intent::Undo => {
                    session.undo();
                }
                Intent::Tick => {
                    session.tick_clock();
                }
            }
            check_table(&session)?;
            if config.scoring == ScoringOption::Standard {
                prop_assert!(session.score() >= 0);
            }
        }
    }

    #[test]
    fn test_vegas_pass_limit(seed in any::<u64>(), three in any::<bool>()) {
        let draw = if three { DrawOption::Three } else { DrawOption::One };
        let config = SessionConfig::new().with_draw(draw).with_scoring(ScoringOption::Vegas);
        let mut session = GameSession::new(config);
        session.deal_new_game(seed);

        // 24 stock cards; each pass takes 24 / batch draws.
        let draws = (24 / draw.batch_size()) * draw.pass_limit() as usize;
        for _ in 0..draws {
            prop_assert_ne!(session.talon_state().cycle_state, CycleState::Exhausted);
            session.draw_next();
        }
        session.draw_next();
        prop_assert_eq!(session.talon_state().cycle_state, CycleState::Exhausted);

        let table = session.table().clone();
        session.draw_next();
        prop_assert_eq!(session.table(), &table);
    }
}
