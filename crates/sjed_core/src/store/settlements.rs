//! Settlement offers, judgment configuration and preferences.

use super::{new_id, CaseStore, StoreResult};
use crate::model::{
    CaseConfigPatch, NewSettlementOffer, SettlementOffer, SettlementOfferPatch, SettlementStatus,
};
use crate::persist::BlobStore;
use log::{info, warn};

impl<B: BlobStore> CaseStore<B> {
    pub fn add_settlement_offer(
        &mut self,
        offer: NewSettlementOffer,
    ) -> StoreResult<SettlementOffer> {
        let now = self.clock.now();
        self.insert(offer.into_offer(new_id::<SettlementOffer>(), now))
    }

    pub fn update_settlement_offer(
        &mut self,
        id: &str,
        patch: SettlementOfferPatch,
    ) -> StoreResult<bool> {
        self.patch::<SettlementOffer>(id, |offer| patch.apply_to(offer))
    }

    pub fn delete_settlement_offer(&mut self, id: &str) -> bool {
        self.remove::<SettlementOffer>(id)
    }

    pub fn accept_offer(&mut self, id: &str) -> StoreResult<bool> {
        self.update_settlement_offer(id, SettlementOfferPatch::status(SettlementStatus::Accepted))
    }

    pub fn reject_offer(&mut self, id: &str) -> StoreResult<bool> {
        self.update_settlement_offer(id, SettlementOfferPatch::status(SettlementStatus::Rejected))
    }

    /// Marks the offer `Countered` and records the counter amount.
    pub fn counter_offer(&mut self, id: &str, amount: f64) -> StoreResult<bool> {
        self.update_settlement_offer(
            id,
            SettlementOfferPatch {
                status: Some(SettlementStatus::Countered),
                counter_amount: Some(Some(amount)),
                ..SettlementOfferPatch::default()
            },
        )
    }

    /// Merges `patch` into the singleton case configuration.
    ///
    /// The merged configuration is validated before it replaces the current one.
    pub fn update_case_config(&mut self, patch: CaseConfigPatch) -> StoreResult<()> {
        let mut next = self.data.case_config.clone();
        patch.apply_to(&mut next);
        if let Err(err) = next.validate() {
            warn!(
                "event=case_config_update module=store status=rejected error={}",
                err
            );
            return Err(err.into());
        }
        self.data.case_config = next;
        info!("event=case_config_update module=store status=ok");
        self.write_through();
        Ok(())
    }

    pub fn set_dark_mode(&mut self, enabled: bool) {
        self.data.dark_mode = enabled;
        info!(
            "event=preferences_update module=store status=ok dark_mode={}",
            enabled
        );
        self.write_through();
    }

    /// Flips the dark mode preference and returns the new value.
    pub fn toggle_dark_mode(&mut self) -> bool {
        let enabled = !self.data.dark_mode;
        self.set_dark_mode(enabled);
        enabled
    }
}
