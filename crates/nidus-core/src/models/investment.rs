//! Investment domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::NidusResult;
use crate::validate::{Validate, invalid, require_nonempty};

/// A recorded investment into a startup.
///
/// Round and status vocabularies are free-form; the program defines them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investment {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub startup_id: Uuid,
    /// Profile of the investor who committed the round.
    pub investor_id: Uuid,
    pub amount: f64,
    pub round: String,
    pub invested_on: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to record a new investment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInvestment {
    pub organization_id: Uuid,
    pub startup_id: Uuid,
    pub investor_id: Uuid,
    pub amount: f64,
    pub round: String,
    pub invested_on: NaiveDate,
    pub status: String,
}

/// Fields that can be updated on an existing investment.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateInvestment {
    pub amount: Option<f64>,
    pub round: Option<String>,
    pub invested_on: Option<NaiveDate>,
    pub status: Option<String>,
}

impl Validate for CreateInvestment {
    fn validate(&self) -> NidusResult<()> {
        require_nonempty("round", &self.round)?;
        require_nonempty("status", &self.status)?;
        if self.amount <= 0.0 {
            return Err(invalid("amount must be positive"));
        }
        Ok(())
    }
}

impl Validate for UpdateInvestment {
    fn validate(&self) -> NidusResult<()> {
        if let Some(round) = &self.round {
            require_nonempty("round", round)?;
        }
        if let Some(status) = &self.status {
            require_nonempty("status", status)?;
        }
        if let Some(amount) = self.amount {
            if amount <= 0.0 {
                return Err(invalid("amount must be positive"));
            }
        }
        Ok(())
    }
}
