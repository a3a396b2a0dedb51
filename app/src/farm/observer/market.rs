use super::ConcurrentObserver;
use crate::error::ObserverError;
use fieldsim_core::{CarbonCredit, CreditSummary, MarketOffer, Sale, SettlementPolicy};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferView {
    #[serde(flatten)]
    pub offer: MarketOffer,
    pub total_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub credits: Vec<CarbonCredit>,
    pub offers: Vec<OfferView>,
    pub total_earnings: f64,
    pub summary: CreditSummary,
    pub settlement_policy: SettlementPolicy,
}

#[derive(Clone)]
pub struct MarketObserver {
    inner: Arc<ConcurrentObserver>,
}

impl MarketObserver {
    pub fn new(inner: Arc<ConcurrentObserver>) -> Self {
        MarketObserver { inner }
    }

    pub async fn snapshot(&self) -> MarketSnapshot {
        let state = self.inner.state.read().await;
        let ledger = state.ledger();
        MarketSnapshot {
            credits: ledger.credits().clone(),
            offers: ledger
                .offers()
                .iter()
                .map(|offer| OfferView {
                    offer: offer.clone(),
                    total_value: offer.total_value(),
                })
                .collect(),
            total_earnings: ledger.total_earnings(),
            summary: ledger.summary(),
            settlement_policy: self.inner.settings.settlement_policy,
        }
    }

    pub async fn sell(&self, offer_id: &str, quantity: u32) -> Result<Sale, ObserverError> {
        let policy = self.inner.settings.settlement_policy;
        let sale = self
            .inner
            .state
            .write()
            .await
            .sell_credits(offer_id, quantity, policy)?;

        info!(
            offer_id = offer_id,
            quantity = quantity,
            earnings = sale.earnings,
            "{}",
            sale.summary()
        );
        Ok(sale)
    }
}
