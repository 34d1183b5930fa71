//! Model-View-Intent (MVI) primitives shared by the whole crate.
//!
//! This module provides the base traits every state, action and typed
//! reducer implements.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Store ──→ ReducerSet ──→ State ──→ Subscriptions
//!    ↑                                               │
//!    └───────────────────────────────────────────────┘
//! ```
//!
//! - **State**: Immutable value tree, shared behind `Arc`
//! - **Action**: Tagged event describing an intended transition
//! - **Reducer**: Pure function that transforms state based on actions

mod action;
mod reducer;
mod state;

pub use action::Action;
pub use reducer::Reducer;
pub use state::State;
