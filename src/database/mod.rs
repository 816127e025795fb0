pub mod manager;
pub mod mappings;
pub mod models;
pub mod predicate;
pub mod query_builder;
pub mod repository;
pub mod sport_configs;
pub mod sports;
pub mod tenants;

pub use manager::{DatabaseError, DatabaseManager};
