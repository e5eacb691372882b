use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SavingsPlan {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub owner_id: Uuid,
    pub etf_name: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub monthly_amount: Decimal,
    pub term_years: i32,
    pub created_at: DateTime<Utc>,
}

/// The mutable part of a plan, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanFields {
    pub etf_name: String,
    pub monthly_amount: Decimal,
    pub term_years: i32,
}

impl SavingsPlan {
    pub fn fields(&self) -> PlanFields {
        PlanFields {
            etf_name: self.etf_name.clone(),
            monthly_amount: self.monthly_amount,
            term_years: self.term_years,
        }
    }
}
