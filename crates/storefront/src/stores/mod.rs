//! In-memory application state.
//!
//! These stores hold state for the lifetime of one UI session. They are
//! plain structs mutated synchronously from the event loop - no locking,
//! no persistence side effects inside mutators.

pub mod cart;
pub mod search;

pub use cart::{CartLine, CartStore};
pub use search::SearchFilter;
