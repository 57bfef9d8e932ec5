//! Service layer holding the in-memory price collections.
//! - No HTTP types; the server crate maps `ServiceError` to responses.
//! - Each collection is guarded by its own lock for the whole read-modify-write.

pub mod errors;
pub mod prices;

pub use configs::IdStrategy;
