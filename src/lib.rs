//! Unidirectional state store with composable, liftable reducers.
//!
//! State lives behind `Arc` in a [`Store`](store::Store) and only changes
//! through a [`ReducerSet`](reducers::ReducerSet) keyed by action tag.
//! Feature-shaped sets are lifted into the root shape through lenses, and
//! observers subscribe to [selectors](selector::Selector), hearing only
//! about changes to what they selected.
//!
//! ```
//! use std::sync::Arc;
//! use unistore::field_lens;
//! use unistore::mvi::{Action, State};
//! use unistore::reducers::ReducerSet;
//! use unistore::selector::from_fn;
//! use unistore::store::Store;
//!
//! #[derive(Debug, Clone, Default, PartialEq)]
//! struct Counter {
//!     value: i64,
//! }
//! impl State for Counter {}
//!
//! #[derive(Debug, Clone, Default, PartialEq)]
//! struct App {
//!     counter: Arc<Counter>,
//! }
//! impl State for App {}
//!
//! #[derive(Debug)]
//! enum Msg {
//!     Increment,
//! }
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum MsgTag {
//!     Increment,
//! }
//!
//! impl Action for Msg {
//!     type Tag = MsgTag;
//!     fn tag(&self) -> MsgTag {
//!         match self {
//!             Msg::Increment => MsgTag::Increment,
//!         }
//!     }
//! }
//!
//! let counter = ReducerSet::<Counter, Msg>::new().on(MsgTag::Increment, |c: &Counter, _: &Msg| {
//!     Counter { value: c.value + 1 }
//! });
//! let store = Store::new(counter.lift(field_lens!(App, counter)));
//!
//! let mut values = store.observe(from_fn(|app: &App| app.counter.value));
//! assert_eq!(values.try_next(), Some(0));
//!
//! store.dispatch(Msg::Increment).unwrap();
//! assert_eq!(values.try_next(), Some(1));
//! ```

pub mod config;
pub mod equality;
pub mod error;
pub mod logging;
pub mod mvi;
pub mod reducers;
pub mod selector;
pub mod store;

pub use error::{ReducerFailure, StoreError};
pub use store::Store;
