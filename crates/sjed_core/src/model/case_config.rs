//! Singleton judgment configuration.
//!
//! Exactly one `CaseConfig` exists per store. It is never deleted, only
//! partially updated.

use super::merge;
use super::validation::{require_amount, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const ENTITY: &str = "caseConfig";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseConfig {
    /// Principal amount of the judgment in US dollars.
    pub judgment_amount: f64,
    pub judgment_date: NaiveDate,
    /// Annual statutory rate in percent (10.0 means 10%).
    pub interest_rate: f64,
    /// Lowest settlement the creditor will accept.
    pub floor_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_number: Option<String>,
}

impl CaseConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_amount(ENTITY, "judgmentAmount", self.judgment_amount)?;
        require_amount(ENTITY, "interestRate", self.interest_rate)?;
        require_amount(ENTITY, "floorAmount", self.floor_amount)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseConfigPatch {
    pub judgment_amount: Option<f64>,
    pub judgment_date: Option<NaiveDate>,
    pub interest_rate: Option<f64>,
    pub floor_amount: Option<f64>,
    pub case_number: Option<Option<String>>,
}

impl CaseConfigPatch {
    pub(crate) fn apply_to(self, config: &mut CaseConfig) {
        merge(&mut config.judgment_amount, self.judgment_amount);
        merge(&mut config.judgment_date, self.judgment_date);
        merge(&mut config.interest_rate, self.interest_rate);
        merge(&mut config.floor_amount, self.floor_amount);
        merge(&mut config.case_number, self.case_number);
    }
}
