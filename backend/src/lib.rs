pub mod ballot_box;
pub mod catchers;
pub mod config;
pub mod cors;
pub mod error;
pub mod mirror;
pub mod queries;
pub mod routes;
pub mod schema;
pub mod server;
pub mod store;

pub use shared::{models::*, error::ErrorCode, Counts};
pub use ballot_box::BallotBox;
pub use store::{CounterStore, MemoryCounterStore};
pub use queries::PgCounterStore;
