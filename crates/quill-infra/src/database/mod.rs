//! Store implementations: SeaORM-backed Postgres and in-memory fallback.

mod memory;

#[cfg(feature = "postgres")]
mod connections;

#[cfg(feature = "postgres")]
pub mod entity;

#[cfg(feature = "postgres")]
mod sea_orm_repo;

pub use memory::{InMemoryPostRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
pub use connections::{DatabaseConfig, connect};

#[cfg(feature = "postgres")]
pub use sea_orm_repo::{SeaOrmPostRepository, SeaOrmUserRepository};

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
