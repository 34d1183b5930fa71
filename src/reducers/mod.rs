//! Reducer entries, sets, and feature lifting.
//!
//! A [`ReducerSet`] is the unit of composition: feature sets are lifted into
//! the root shape with [`lift`] (or [`ReducerSet::lift`]) and the lifted sets
//! are concatenated with [`ReducerSet::combine`].
//!
//! ```text
//! ReducerSet<Board, A> ──lift(field_lens!(Game, board))──┐
//!                                                        ├── combine ──→ ReducerSet<Game, A>
//! ReducerSet<Score, A> ──lift(field_lens!(Game, score))──┘
//! ```

mod entry;
mod lens;
mod lift;
mod set;

pub use entry::ReducerEntry;
pub use lens::{FeatureLens, Lens, OptionalLens};
pub use lift::{lift, lift_with, FeatureFields};
pub use set::ReducerSet;
