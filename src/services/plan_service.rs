use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::database::models::{PlanFields, SavingsPlan};
use crate::database::{DatabaseError, SavingsPlanRepository, UserRepository};

pub const MAX_ETF_NAME_LENGTH: usize = 200;
pub const MAX_TERM_YEARS: i32 = 100;

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("{0}")]
    Validation(String),

    #[error("Savings plan not found")]
    NotFound,

    #[error("Access to this savings plan is forbidden")]
    Forbidden,

    #[error("User not found")]
    OwnerNotFound,

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Client-supplied plan body. Fields beyond these three (owner, id,
/// timestamps) are ignored by deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanInput {
    pub etf_name: Option<String>,
    #[serde(alias = "monatlicheRate")]
    pub monthly_amount: Option<Decimal>,
    #[serde(alias = "laufzeitJahre")]
    pub term_years: Option<i32>,
}

impl PlanInput {
    pub fn validate(self) -> Result<PlanFields, PlanError> {
        let etf_name = self.etf_name.as_deref().map(str::trim).unwrap_or_default();
        if etf_name.is_empty() {
            return Err(PlanError::Validation("ETF name is required".to_string()));
        }
        if etf_name.chars().count() > MAX_ETF_NAME_LENGTH {
            return Err(PlanError::Validation(format!(
                "ETF name must be at most {} characters",
                MAX_ETF_NAME_LENGTH
            )));
        }

        let monthly_amount = self
            .monthly_amount
            .ok_or_else(|| PlanError::Validation("Monthly amount is required".to_string()))?
            .round_dp(2);
        if monthly_amount < Decimal::new(1, 2) {
            return Err(PlanError::Validation("Monthly amount must be at least 0.01".to_string()));
        }
        // NUMERIC(12, 2)
        if monthly_amount > Decimal::new(999_999_999_999, 2) {
            return Err(PlanError::Validation("Monthly amount is too large".to_string()));
        }

        let term_years = self
            .term_years
            .ok_or_else(|| PlanError::Validation("Term is required".to_string()))?;
        if !(1..=MAX_TERM_YEARS).contains(&term_years) {
            return Err(PlanError::Validation(format!(
                "Term must be between 1 and {} years",
                MAX_TERM_YEARS
            )));
        }

        Ok(PlanFields {
            etf_name: etf_name.to_string(),
            monthly_amount,
            term_years,
        })
    }
}

/// Outcome of looking up a plan on behalf of a caller.
#[derive(Debug)]
pub enum Ownership {
    Owned(SavingsPlan),
    /// The plan exists but belongs to someone else
    Forbidden,
    Absent,
}

impl Ownership {
    pub fn into_result(self) -> Result<SavingsPlan, PlanError> {
        match self {
            Ownership::Owned(plan) => Ok(plan),
            Ownership::Forbidden => Err(PlanError::Forbidden),
            Ownership::Absent => Err(PlanError::NotFound),
        }
    }
}

/// Ownership-scoped CRUD over savings plans.
///
/// Another user's plan yields [`PlanError::Forbidden`] (existence is revealed),
/// an absent plan yields [`PlanError::NotFound`]; get, update and delete all
/// classify through [`PlanService::resolve_owned`].
pub struct PlanService {
    plans: Arc<dyn SavingsPlanRepository>,
    users: Arc<dyn UserRepository>,
}

impl PlanService {
    pub fn new(plans: Arc<dyn SavingsPlanRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { plans, users }
    }

    pub async fn resolve_owned(&self, id: Uuid, owner_id: Uuid) -> Result<Ownership, PlanError> {
        Ok(match self.plans.find_by_id(id).await? {
            None => Ownership::Absent,
            Some(plan) if plan.owner_id == owner_id => Ownership::Owned(plan),
            Some(_) => {
                warn!("User {} denied access to savings plan {}", owner_id, id);
                Ownership::Forbidden
            }
        })
    }

    pub async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<SavingsPlan>, PlanError> {
        Ok(self.plans.list_by_owner(owner_id).await?)
    }

    pub async fn get_owned(&self, id: Uuid, owner_id: Uuid) -> Result<SavingsPlan, PlanError> {
        self.resolve_owned(id, owner_id).await?.into_result()
    }

    pub async fn create(&self, input: PlanInput, owner_id: Uuid) -> Result<SavingsPlan, PlanError> {
        let fields = input.validate()?;

        // A validated token whose user has since disappeared
        if self.users.find_by_id(owner_id).await?.is_none() {
            warn!("Savings plan creation for unknown user {}", owner_id);
            return Err(PlanError::OwnerNotFound);
        }

        let plan = self.plans.insert(owner_id, &fields).await?;
        info!("User {} created savings plan {}", owner_id, plan.id);
        Ok(plan)
    }

    pub async fn update(&self, id: Uuid, input: PlanInput, owner_id: Uuid) -> Result<SavingsPlan, PlanError> {
        let fields = input.validate()?;
        self.resolve_owned(id, owner_id).await?.into_result()?;

        // Deleted between the lookup and the update
        let plan = self
            .plans
            .update_owned(id, owner_id, &fields)
            .await?
            .ok_or(PlanError::NotFound)?;
        info!("User {} updated savings plan {}", owner_id, id);
        Ok(plan)
    }

    /// True iff a plan matching both id and owner was removed.
    pub async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> Result<bool, PlanError> {
        Ok(self.plans.delete_owned(id, owner_id).await?)
    }

    /// [`delete_owned`](Self::delete_owned), classifying a miss as not-found or forbidden.
    pub async fn remove(&self, id: Uuid, owner_id: Uuid) -> Result<(), PlanError> {
        if self.delete_owned(id, owner_id).await? {
            info!("User {} deleted savings plan {}", owner_id, id);
            return Ok(());
        }

        match self.resolve_owned(id, owner_id).await? {
            Ownership::Forbidden => Err(PlanError::Forbidden),
            Ownership::Absent | Ownership::Owned(_) => Err(PlanError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestContext;

    fn sp500() -> PlanInput {
        PlanInput {
            etf_name: Some("S&P 500".to_string()),
            monthly_amount: Some(Decimal::new(20000, 2)),
            term_years: Some(15),
        }
    }

    #[test]
    fn validate_trims_and_rounds() {
        let fields = PlanInput {
            etf_name: Some("  MSCI World ".to_string()),
            monthly_amount: Some(Decimal::new(100_005, 4)), // 10.0005
            term_years: Some(1),
        }
        .validate()
        .unwrap();

        assert_eq!(fields.etf_name, "MSCI World");
        assert_eq!(fields.monthly_amount, Decimal::new(1000, 2));
    }

    #[test]
    fn validate_rejects_bad_fields() {
        let bad = [
            PlanInput { etf_name: Some("   ".to_string()), ..sp500() },
            PlanInput { etf_name: None, ..sp500() },
            PlanInput { etf_name: Some("x".repeat(MAX_ETF_NAME_LENGTH + 1)), ..sp500() },
            PlanInput { monthly_amount: Some(Decimal::ZERO), ..sp500() },
            PlanInput { monthly_amount: Some(Decimal::new(-5, 0)), ..sp500() },
            PlanInput { monthly_amount: Some(Decimal::new(4, 3)), ..sp500() },
            PlanInput { monthly_amount: None, ..sp500() },
            PlanInput { term_years: Some(0), ..sp500() },
            PlanInput { term_years: Some(MAX_TERM_YEARS + 1), ..sp500() },
            PlanInput { term_years: None, ..sp500() },
        ];
        for input in bad {
            let label = format!("{:?}", input);
            assert!(matches!(input.validate(), Err(PlanError::Validation(_))), "{}", label);
        }
    }

    #[test]
    fn input_accepts_legacy_field_names_and_ignores_owner() {
        let input: PlanInput = serde_json::from_value(serde_json::json!({
            "etfName": "Vanguard FTSE All-World",
            "monatlicheRate": 150.5,
            "laufzeitJahre": 20,
            "ownerId": "00000000-0000-0000-0000-000000000000"
        }))
        .unwrap();

        let fields = input.validate().unwrap();
        assert_eq!(fields.monthly_amount, Decimal::new(15050, 2));
        assert_eq!(fields.term_years, 20);
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let ctx = TestContext::new();
        let owner = ctx.register("user1@example.com").await;

        let created = ctx.plans.create(sp500(), owner).await.unwrap();
        let fetched = ctx.plans.get_owned(created.id, owner).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.fields(), sp500().validate().unwrap());
        assert_eq!(fetched.owner_id, owner);
    }

    #[tokio::test]
    async fn create_for_vanished_user_fails() {
        let ctx = TestContext::new();
        assert!(matches!(
            ctx.plans.create(sp500(), Uuid::new_v4()).await,
            Err(PlanError::OwnerNotFound)
        ));
    }

    #[tokio::test]
    async fn list_is_scoped_to_owner() {
        let ctx = TestContext::new();
        let a = ctx.register("a@example.com").await;
        let b = ctx.register("b@example.com").await;
        let plan_a = ctx.plans.create(sp500(), a).await.unwrap();

        assert_eq!(ctx.plans.list_for_owner(a).await.unwrap(), vec![plan_a]);
        assert!(ctx.plans.list_for_owner(b).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_distinguishes_forbidden_from_absent() {
        let ctx = TestContext::new();
        let a = ctx.register("a@example.com").await;
        let b = ctx.register("b@example.com").await;
        let plan_a = ctx.plans.create(sp500(), a).await.unwrap();

        assert!(matches!(ctx.plans.get_owned(plan_a.id, b).await, Err(PlanError::Forbidden)));
        assert!(matches!(ctx.plans.get_owned(Uuid::new_v4(), b).await, Err(PlanError::NotFound)));
    }

    #[tokio::test]
    async fn update_by_stranger_leaves_plan_untouched() {
        let ctx = TestContext::new();
        let a = ctx.register("a@example.com").await;
        let b = ctx.register("b@example.com").await;
        let plan_a = ctx.plans.create(sp500(), a).await.unwrap();

        let hijack = PlanInput { etf_name: Some("Hijacked".to_string()), ..sp500() };
        assert!(matches!(ctx.plans.update(plan_a.id, hijack, b).await, Err(PlanError::Forbidden)));
        assert_eq!(ctx.plans.get_owned(plan_a.id, a).await.unwrap(), plan_a);
    }

    #[tokio::test]
    async fn update_copies_only_mutable_fields() {
        let ctx = TestContext::new();
        let a = ctx.register("a@example.com").await;
        let plan = ctx.plans.create(sp500(), a).await.unwrap();

        let changed = PlanInput {
            etf_name: Some("MSCI EM IMI".to_string()),
            monthly_amount: Some(Decimal::new(7550, 2)),
            term_years: Some(30),
        };
        let updated = ctx.plans.update(plan.id, changed, a).await.unwrap();

        assert_eq!(updated.id, plan.id);
        assert_eq!(updated.owner_id, a);
        assert_eq!(updated.created_at, plan.created_at);
        assert_eq!(updated.etf_name, "MSCI EM IMI");
        assert_eq!(updated.term_years, 30);
    }

    #[tokio::test]
    async fn update_missing_plan_is_not_found() {
        let ctx = TestContext::new();
        let a = ctx.register("a@example.com").await;
        assert!(matches!(ctx.plans.update(Uuid::new_v4(), sp500(), a).await, Err(PlanError::NotFound)));
    }

    #[tokio::test]
    async fn delete_classifies_misses() {
        let ctx = TestContext::new();
        let a = ctx.register("a@example.com").await;
        let b = ctx.register("b@example.com").await;
        let plan = ctx.plans.create(sp500(), a).await.unwrap();

        assert!(!ctx.plans.delete_owned(plan.id, b).await.unwrap());
        assert!(matches!(ctx.plans.remove(plan.id, b).await, Err(PlanError::Forbidden)));

        ctx.plans.remove(plan.id, a).await.unwrap();
        assert!(matches!(ctx.plans.remove(plan.id, a).await, Err(PlanError::NotFound)));
        assert!(matches!(ctx.plans.get_owned(plan.id, a).await, Err(PlanError::NotFound)));
    }
}
