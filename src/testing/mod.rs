use std::sync::Arc;
use uuid::Uuid;

use crate::auth::{PasswordHasher, TokenService};
use crate::config::AppConfig;
use crate::database::{InMemorySavingsPlanRepository, InMemoryUserRepository, UserRepository};
use crate::services::{AccountService, PlanService};

pub const TEST_PASSWORD: &str = "password123";

/// Services wired over in-memory stores with cheap Argon2 parameters
pub struct TestContext {
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<TokenService>,
    pub accounts: AccountService,
    pub plans: PlanService,
}

impl TestContext {
    pub fn new() -> Self {
        let config = AppConfig::test();
        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
        let tokens = Arc::new(TokenService::new(&config.security).expect("test token service"));
        let hasher = PasswordHasher::new(config.security.argon2).expect("test argon2 params");

        Self {
            accounts: AccountService::new(users.clone(), hasher, tokens.clone()),
            plans: PlanService::new(Arc::new(InMemorySavingsPlanRepository::new()), users.clone()),
            users,
            tokens,
        }
    }

    /// Register an account with [`TEST_PASSWORD`] and return its id
    pub async fn register(&self, email: &str) -> Uuid {
        self.accounts
            .register(Some(email), Some(TEST_PASSWORD))
            .await
            .expect("test registration")
            .user_id
    }
}
