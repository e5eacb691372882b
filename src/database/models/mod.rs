pub mod savings_plan;
pub mod user;

pub use savings_plan::{PlanFields, SavingsPlan};
pub use user::{NewUser, User};
