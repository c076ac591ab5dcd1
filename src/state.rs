//! Navigation State
//!
//! The selection stack, its on-disk form, and the token resolution that moves
//! a session from one context/namespace selection to the next.

pub mod navigation;
pub mod persistence;
pub mod stack;

pub use navigation::{NavigationState, StateLocation, UpdateOutcome, CURRENT_TOKEN, PREVIOUS_TOKEN};
pub use stack::{decode, encode, Element, Stack};
