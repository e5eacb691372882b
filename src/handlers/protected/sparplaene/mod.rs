// handlers/protected/sparplaene/mod.rs - Ownership-scoped savings plan CRUD
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;
pub mod utils;

pub use create::plan_post;
pub use delete::plan_delete;
pub use get::plan_get;
pub use list::plans_get;
pub use update::plan_put;
