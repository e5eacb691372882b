use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewUser, PlanFields, SavingsPlan, User};

/// Credential store. Implementations must enforce email uniqueness and report
/// a duplicate insert as [`DatabaseError::UniqueViolation`].
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;

    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError>;

    /// Returns false when no user with this id exists.
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, DatabaseError>;

    /// Cheap connectivity check for the health endpoint.
    async fn ping(&self) -> Result<(), DatabaseError>;
}

/// Savings-plan store. Mutations are scoped by both id and owner so a plan can
/// never be changed through another user's identity.
#[async_trait]
pub trait SavingsPlanRepository: Send + Sync {
    /// Plans of one owner, oldest first.
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<SavingsPlan>, DatabaseError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SavingsPlan>, DatabaseError>;

    async fn insert(&self, owner_id: Uuid, fields: &PlanFields) -> Result<SavingsPlan, DatabaseError>;

    async fn update_owned(
        &self,
        id: Uuid,
        owner_id: Uuid,
        fields: &PlanFields,
    ) -> Result<Option<SavingsPlan>, DatabaseError>;

    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> Result<bool, DatabaseError>;
}
