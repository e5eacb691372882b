// handlers/public/mod.rs - Public handlers (no authentication required)
pub mod auth;
pub mod etfs;
pub mod health;

pub use etfs::etfs_get;
pub use health::{health_get, root_get};
