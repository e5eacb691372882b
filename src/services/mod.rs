pub mod account_service;
pub mod plan_service;

pub use account_service::{AccountService, AuthError, AuthSession};
pub use plan_service::{Ownership, PlanError, PlanInput, PlanService};
