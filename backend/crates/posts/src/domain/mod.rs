//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Post)
//! - Domain value objects (PostChanges, ListScope)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod value_objects;
