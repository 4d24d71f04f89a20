//! Database access shared between route handlers, split into read-side
//! [`Query`] and write-side [`Mutation`] so the logic can be exercised
//! against an in-memory database without going through HTTP.

mod mutation;
mod query;

pub use mutation::Mutation;
pub use query::{Query, TransaksiSummary};
