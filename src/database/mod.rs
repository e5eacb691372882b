pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::{InMemorySavingsPlanRepository, InMemoryUserRepository};
pub use postgres::{PgSavingsPlanRepository, PgUserRepository};
pub use repository::{SavingsPlanRepository, UserRepository};
