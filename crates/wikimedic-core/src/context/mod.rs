//! App-wide state that outlives a screen: the signed-in user and favorites.
//!
//! Each context is loaded from the [`Database`](crate::db::Database)
//! explicitly and writes through on every change.

mod favorites;
mod session;

pub use favorites::*;
pub use session::*;
