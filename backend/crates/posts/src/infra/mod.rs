//! Infrastructure Layer
//!
//! Database implementations.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryPostRepository;
pub use postgres::PgPostRepository;
