//! In-process stores with the same contracts as the PostgreSQL repositories.
//! Used by the test suite and by `--in-memory` development runs.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewUser, PlanFields, SavingsPlan, User};
use crate::database::repository::{SavingsPlanRepository, UserRepository};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError> {
        // Check and insert under one write lock, mirroring the UNIQUE constraint
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(DatabaseError::UniqueViolation("users_email_key".to_string()));
        }

        let created = User {
            id: Uuid::new_v4(),
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, DatabaseError> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySavingsPlanRepository {
    plans: RwLock<HashMap<Uuid, SavingsPlan>>,
}

impl InMemorySavingsPlanRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SavingsPlanRepository for InMemorySavingsPlanRepository {
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<SavingsPlan>, DatabaseError> {
        let plans = self.plans.read().await;
        let mut owned: Vec<SavingsPlan> = plans.values().filter(|p| p.owner_id == owner_id).cloned().collect();
        owned.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(owned)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SavingsPlan>, DatabaseError> {
        Ok(self.plans.read().await.get(&id).cloned())
    }

    async fn insert(&self, owner_id: Uuid, fields: &PlanFields) -> Result<SavingsPlan, DatabaseError> {
        let plan = SavingsPlan {
            id: Uuid::new_v4(),
            owner_id,
            etf_name: fields.etf_name.clone(),
            monthly_amount: fields.monthly_amount,
            term_years: fields.term_years,
            created_at: Utc::now(),
        };
        self.plans.write().await.insert(plan.id, plan.clone());
        Ok(plan)
    }

    async fn update_owned(
        &self,
        id: Uuid,
        owner_id: Uuid,
        fields: &PlanFields,
    ) -> Result<Option<SavingsPlan>, DatabaseError> {
        let mut plans = self.plans.write().await;
        match plans.get_mut(&id) {
            Some(plan) if plan.owner_id == owner_id => {
                plan.etf_name = fields.etf_name.clone();
                plan.monthly_amount = fields.monthly_amount;
                plan.term_years = fields.term_years;
                Ok(Some(plan.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> Result<bool, DatabaseError> {
        let mut plans = self.plans.write().await;
        match plans.get(&id) {
            Some(plan) if plan.owner_id == owner_id => {
                plans.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
