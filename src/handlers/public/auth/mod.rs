// handlers/public/auth/mod.rs - Token acquisition and credential management
pub mod login;
pub mod register;
pub mod reset_password;

pub use login::login_post;
pub use register::register_post;
pub use reset_password::reset_password_post;
