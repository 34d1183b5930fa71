mod common;

use std::sync::Arc;

use common::*;
use unistore::mvi::Reducer;
use unistore::reducers::{ReducerEntry, ReducerSet};
use unistore::{field_lens, StoreError};

#[test]
fn root_set_routes_by_tag() {
    let reducers = game_reducers();
    assert!(reducers.handles(&GameTag::Play));
    assert!(reducers.handles(&GameTag::OpenChat));
    assert!(!reducers.handles(&GameTag::Win));

    let root = root_reducers();
    assert!(root.handles(&GameTag::Win));
    assert!(root.handles(&GameTag::Say));
    assert_eq!(root.len(), reducers.len() + 3 + 1 + 1);
    assert!(!root.is_empty());
    assert!(ReducerSet::<Game, GameAction>::new().is_empty());
}

#[test]
fn same_tag_entries_fold_in_registration_order() {
    // First entry marks cell A, second copies A's mark into B.
    let reducers = ReducerSet::<Board, GameAction>::new()
        .on(GameTag::Play, play)
        .on(GameTag::Play, |board: &Board, _action: &GameAction| Board {
            cell_b: Arc::clone(&board.cell_a),
            ..board.clone()
        });

    let next = reducers
        .reduce(
            &Arc::new(Board::default()),
            &GameAction::Play {
                cell: CellId::A,
                mark: Mark::O,
            },
        )
        .unwrap();

    assert_eq!(next.cell_b.mark, Some(Mark::O));
    assert!(Arc::ptr_eq(&next.cell_a, &next.cell_b));
}

#[test]
fn combined_root_applies_root_and_lifted_entries() {
    let game = Arc::new(Game::default());
    let next = root_reducers()
        .reduce(
            &game,
            &GameAction::Play {
                cell: CellId::B,
                mark: Mark::X,
            },
        )
        .unwrap();

    assert_eq!(next.moves, 1);
    assert_eq!(next.board.cell_b.mark, Some(Mark::X));
    assert!(Arc::ptr_eq(&game.score, &next.score));
}

#[test]
fn unmatched_action_returns_same_root() {
    let game = Arc::new(Game::default());
    let reducers = ReducerSet::combine([game_reducers(), ReducerSet::new()]);

    let next = reducers.reduce(&game, &GameAction::Win(Mark::X)).unwrap();
    assert!(Arc::ptr_eq(&game, &next));
}

#[test]
fn typed_reducer_is_registrable() {
    let entry =
        ReducerEntry::<Score, GameAction>::from_reducer::<ScoreReducer, _>([GameTag::Win]).unwrap();
    let score = Arc::new(Score::default());

    let next = entry.apply(&score, &GameAction::Win(Mark::X)).unwrap();
    assert_eq!(*next, ScoreReducer::reduce(&score, &GameAction::Win(Mark::X)));
}

#[test]
fn entry_without_tags_is_a_wiring_error() {
    let result = ReducerSet::<Score, GameAction>::new()
        .on_many(Vec::new(), |score: &Score, _action: &GameAction| score.clone());
    assert!(matches!(result, Err(StoreError::EmptyTagSet)));
}

#[test]
fn failing_feature_reducer_propagates_through_lifting() {
    let game = Arc::new(Game::default());
    let err = root_reducers()
        .reduce(&game, &GameAction::Cheat)
        .unwrap_err();

    match err {
        StoreError::Reducer { tag, source } => {
            assert_eq!(tag, "Cheat");
            assert_eq!(source.message(), "cheating is not allowed");
        }
        other => panic!("expected Reducer error, got {other:?}"),
    }
}

fn win_then_forfeit() -> ReducerSet<Score, GameAction> {
    ReducerSet::new()
        .on(GameTag::Win, |score: &Score, _action: &GameAction| Score {
            x_wins: score.x_wins + 1,
            ..score.clone()
        })
        .on(GameTag::Win, |score: &Score, _action: &GameAction| Score {
            x_wins: score.x_wins - 1,
            ..score.clone()
        })
}

#[test]
fn entries_that_cancel_out_return_the_input_score() {
    let score = Arc::new(Score {
        x_wins: 3,
        o_wins: 1,
    });

    let next = win_then_forfeit()
        .reduce(&score, &GameAction::Win(Mark::X))
        .unwrap();

    assert_eq!(*next, *score);
    assert!(Arc::ptr_eq(&score, &next));
}

#[test]
fn lifted_entries_that_cancel_out_return_the_input_game() {
    let game = Arc::new(Game::default());
    let lifted = win_then_forfeit().lift(field_lens!(Game, score));

    let next = lifted.reduce(&game, &GameAction::Win(Mark::X)).unwrap();

    assert!(Arc::ptr_eq(&game, &next));
    assert!(Arc::ptr_eq(&game.score, &next.score));
}
