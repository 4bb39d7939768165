//! Settlement offers received from the judgment debtor.

use super::validation::{require_amount, require_text};
use super::vocab::SettlementStatus;
use super::{advance_stamp, merge, Entity, EntityId, Timestamp, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One offer and its negotiation state.
///
/// Amounts are US dollars and never negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementOffer {
    pub id: EntityId,
    pub date: NaiveDate,
    /// Offering party, free text (usually the debtor's short name).
    pub party: String,
    pub amount: f64,
    #[serde(default)]
    pub terms: String,
    pub status: SettlementStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SettlementOffer {
    /// Whether the offer still counts toward the best-offer figure.
    pub fn is_live(&self) -> bool {
        self.status != SettlementStatus::Rejected
    }
}

impl Entity for SettlementOffer {
    const KIND: &'static str = "settlement";
    const ID_PREFIX: &'static str = "s";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::KIND, "party", &self.party)?;
        require_amount(Self::KIND, "amount", self.amount)?;
        if let Some(counter) = self.counter_amount {
            require_amount(Self::KIND, "counterAmount", counter)?;
        }
        Ok(())
    }

    fn touch(&mut self, now: Timestamp) {
        self.updated_at = advance_stamp(self.updated_at, now);
    }
}

/// Create request for an offer. Status defaults to `Review`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSettlementOffer {
    pub date: NaiveDate,
    pub party: String,
    pub amount: f64,
    pub terms: String,
    pub status: SettlementStatus,
    pub counter_amount: Option<f64>,
    pub notes: Option<String>,
}

impl NewSettlementOffer {
    pub fn new(date: NaiveDate, party: impl Into<String>, amount: f64) -> Self {
        Self {
            date,
            party: party.into(),
            amount,
            terms: String::new(),
            status: SettlementStatus::Review,
            counter_amount: None,
            notes: None,
        }
    }

    pub fn with_status(mut self, status: SettlementStatus) -> Self {
        self.status = status;
        self
    }

    pub(crate) fn into_offer(self, id: EntityId, now: Timestamp) -> SettlementOffer {
        SettlementOffer {
            id,
            date: self.date,
            party: self.party,
            amount: self.amount,
            terms: self.terms,
            status: self.status,
            counter_amount: self.counter_amount,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettlementOfferPatch {
    pub date: Option<NaiveDate>,
    pub party: Option<String>,
    pub amount: Option<f64>,
    pub terms: Option<String>,
    pub status: Option<SettlementStatus>,
    pub counter_amount: Option<Option<f64>>,
    pub notes: Option<Option<String>>,
}

impl SettlementOfferPatch {
    pub fn status(status: SettlementStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub(crate) fn apply_to(self, offer: &mut SettlementOffer) {
        merge(&mut offer.date, self.date);
        merge(&mut offer.party, self.party);
        merge(&mut offer.amount, self.amount);
        merge(&mut offer.terms, self.terms);
        merge(&mut offer.status, self.status);
        merge(&mut offer.counter_amount, self.counter_amount);
        merge(&mut offer.notes, self.notes);
    }
}
