use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{NewUser, PlanFields, SavingsPlan, User};
use crate::database::repository::{SavingsPlanRepository, UserRepository};

const USER_COLUMNS: &str = "id, email, password_hash, created_at";
const PLAN_COLUMNS: &str = "id, owner_id, etf_name, monthly_amount, term_years, created_at";

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError> {
        // A concurrent registration of the same email surfaces as UniqueViolation
        let created = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, email, password_hash) VALUES ($1, $2, $3) RETURNING {USER_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}

pub struct PgSavingsPlanRepository {
    pool: PgPool,
}

impl PgSavingsPlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SavingsPlanRepository for PgSavingsPlanRepository {
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<SavingsPlan>, DatabaseError> {
        let plans = sqlx::query_as::<_, SavingsPlan>(&format!(
            "SELECT {PLAN_COLUMNS} FROM savings_plans WHERE owner_id = $1 ORDER BY created_at, id"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(plans)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SavingsPlan>, DatabaseError> {
        let plan = sqlx::query_as::<_, SavingsPlan>(&format!("SELECT {PLAN_COLUMNS} FROM savings_plans WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(plan)
    }

    async fn insert(&self, owner_id: Uuid, fields: &PlanFields) -> Result<SavingsPlan, DatabaseError> {
        let plan = sqlx::query_as::<_, SavingsPlan>(&format!(
            "INSERT INTO savings_plans (id, owner_id, etf_name, monthly_amount, term_years)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {PLAN_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(&fields.etf_name)
        .bind(fields.monthly_amount)
        .bind(fields.term_years)
        .fetch_one(&self.pool)
        .await?;
        Ok(plan)
    }

    async fn update_owned(
        &self,
        id: Uuid,
        owner_id: Uuid,
        fields: &PlanFields,
    ) -> Result<Option<SavingsPlan>, DatabaseError> {
        // id, owner_id and created_at are immutable
        let plan = sqlx::query_as::<_, SavingsPlan>(&format!(
            "UPDATE savings_plans
             SET etf_name = $3, monthly_amount = $4, term_years = $5
             WHERE id = $1 AND owner_id = $2
             RETURNING {PLAN_COLUMNS}"
        ))
        .bind(id)
        .bind(owner_id)
        .bind(&fields.etf_name)
        .bind(fields.monthly_amount)
        .bind(fields.term_years)
        .fetch_optional(&self.pool)
        .await?;
        Ok(plan)
    }

    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM savings_plans WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
