//! API request handlers.

mod ask;
mod health;
mod query;

pub use ask::*;
pub use health::*;
pub use query::*;
