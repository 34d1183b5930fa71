//! Shared game fixture: a two-cell board, a score, and an optional chat.

#![allow(dead_code, unused_imports)]

use std::sync::Arc;

use unistore::equality::copy_with;
use unistore::mvi::{Action, Reducer, State};
use unistore::reducers::{ReducerEntry, ReducerSet};
use unistore::store::Store;
use unistore::{field_lens, optional_field_lens, ReducerFailure};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    X,
    O,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellId {
    A,
    B,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    pub mark: Option<Mark>,
}

impl State for Cell {}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    pub cell_a: Arc<Cell>,
    pub cell_b: Arc<Cell>,
}

impl State for Board {}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Score {
    pub x_wins: u32,
    pub o_wins: u32,
}

impl State for Score {}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chat {
    pub messages: Vec<String>,
}

impl State for Chat {}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Game {
    pub board: Arc<Board>,
    pub score: Arc<Score>,
    pub chat: Option<Arc<Chat>>,
    pub moves: u32,
}

impl State for Game {}

#[derive(Debug, Clone, PartialEq)]
pub enum GameAction {
    Play { cell: CellId, mark: Mark },
    Win(Mark),
    Say(String),
    OpenChat,
    StartNewGame,
    Cheat,
    Noop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameTag {
    Play,
    Win,
    Say,
    OpenChat,
    StartNewGame,
    Cheat,
    Noop,
}

impl Action for GameAction {
    type Tag = GameTag;

    fn tag(&self) -> GameTag {
        match self {
            GameAction::Play { .. } => GameTag::Play,
            GameAction::Win(_) => GameTag::Win,
            GameAction::Say(_) => GameTag::Say,
            GameAction::OpenChat => GameTag::OpenChat,
            GameAction::StartNewGame => GameTag::StartNewGame,
            GameAction::Cheat => GameTag::Cheat,
            GameAction::Noop => GameTag::Noop,
        }
    }
}

pub fn play(state: &Board, action: &GameAction) -> Board {
    let GameAction::Play { cell, mark } = action else {
        return state.clone();
    };
    let marked = Arc::new(Cell { mark: Some(*mark) });
    copy_with(state, move |board: &mut Board| match cell {
        CellId::A => board.cell_a = marked,
        CellId::B => board.cell_b = marked,
    })
}

pub fn board_reducers() -> ReducerSet<Board, GameAction> {
    ReducerSet::new()
        .on(GameTag::Play, play)
        .on(GameTag::StartNewGame, |_board: &Board, _action: &GameAction| {
            Board::default()
        })
        .try_on(GameTag::Cheat, |_board: &Board, _action: &GameAction| {
            Err(ReducerFailure::new("cheating is not allowed"))
        })
}

/// Typed reducer for the score feature.
pub struct ScoreReducer;

impl Reducer for ScoreReducer {
    type State = Score;
    type Action = GameAction;

    fn reduce(state: &Score, action: &GameAction) -> Score {
        match action {
            GameAction::Win(Mark::X) => Score {
                x_wins: state.x_wins + 1,
                ..state.clone()
            },
            GameAction::Win(Mark::O) => Score {
                o_wins: state.o_wins + 1,
                ..state.clone()
            },
            _ => state.clone(),
        }
    }
}

pub fn score_reducers() -> ReducerSet<Score, GameAction> {
    ReducerSet::new().with_entry(
        ReducerEntry::from_reducer::<ScoreReducer, _>([GameTag::Win, GameTag::Noop])
            .expect("score reducer has tags"),
    )
}

pub fn chat_reducers() -> ReducerSet<Chat, GameAction> {
    ReducerSet::new().on(GameTag::Say, |chat: &Chat, action: &GameAction| {
        let GameAction::Say(text) = action else {
            return chat.clone();
        };
        let mut messages = chat.messages.clone();
        messages.push(text.clone());
        Chat { messages }
    })
}

pub fn game_reducers() -> ReducerSet<Game, GameAction> {
    ReducerSet::new()
        .on(GameTag::Play, |game: &Game, _action: &GameAction| Game {
            moves: game.moves + 1,
            ..game.clone()
        })
        .on(GameTag::OpenChat, |game: &Game, _action: &GameAction| {
            if game.chat.is_some() {
                return game.clone();
            }
            Game {
                chat: Some(Arc::new(Chat::default())),
                ..game.clone()
            }
        })
}

pub fn root_reducers() -> ReducerSet<Game, GameAction> {
    ReducerSet::combine([
        game_reducers(),
        board_reducers().lift(field_lens!(Game, board)),
        score_reducers().lift(field_lens!(Game, score)),
        chat_reducers().lift(optional_field_lens!(Game, chat)),
    ])
}

pub fn make_store() -> Store<Game, GameAction> {
    Store::new(root_reducers())
}
