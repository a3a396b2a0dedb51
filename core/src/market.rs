use crate::error::FarmError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// Credits below this amount count as fully consumed
const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditStatus {
    Earned,
    Pending,
    Sold,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonCredit {
    pub id: String,
    pub amount: f64,
    pub earned_date: DateTime<Utc>,
    pub source: String,
    pub status: CreditStatus,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOffer {
    pub id: String,
    pub buyer_name: String,
    pub company: String,
    pub price_per_credit: f64,
    pub quantity: u32,
    pub expiry_date: DateTime<Utc>,
    pub rating: f64,
}

impl MarketOffer {
    pub fn total_value(&self) -> f64 {
        self.price_per_credit * self.quantity as f64
    }
}

/// How a sale consumes the earned credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementPolicy {
    /// Consume exactly `quantity`, oldest earned credits first.
    Fifo,
    /// Mark every earned credit sold and spread the earnings evenly.
    Sweep,
}

impl Default for SettlementPolicy {
    fn default() -> Self {
        SettlementPolicy::Fifo
    }
}

impl FromStr for SettlementPolicy {
    type Err = std::string::String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" => Ok(SettlementPolicy::Fifo),
            "sweep" => Ok(SettlementPolicy::Sweep),
            other => Err(format!("unknown settlement policy: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub offer_id: String,
    pub buyer_name: String,
    pub quantity: u32,
    pub earnings: f64,
}

impl Sale {
    pub fn summary(&self) -> String {
        format!(
            "Sold {} carbon credits to {} for ₹{}",
            self.quantity, self.buyer_name, self.earnings
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreditSummary {
    pub total: f64,
    pub available: f64,
    pub sold: f64,
}

/// In-memory credit book and running earnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    credits: Vec<CarbonCredit>,
    offers: Vec<MarketOffer>,
    total_earnings: f64,
}

impl Ledger {
    pub fn new(credits: Vec<CarbonCredit>, offers: Vec<MarketOffer>, total_earnings: f64) -> Self {
        Ledger {
            credits,
            offers,
            total_earnings,
        }
    }

    pub fn credits(&self) -> &Vec<CarbonCredit> {
        &self.credits
    }

    pub fn offers(&self) -> &Vec<MarketOffer> {
        &self.offers
    }

    pub fn offer(&self, offer_id: &str) -> Option<&MarketOffer> {
        self.offers.iter().find(|o| o.id == offer_id)
    }

    pub fn total_earnings(&self) -> f64 {
        self.total_earnings
    }

    pub fn available_credits(&self) -> f64 {
        self.credits
            .iter()
            .filter(|c| c.status == CreditStatus::Earned)
            .map(|c| c.amount)
            .sum()
    }

    pub fn summary(&self) -> CreditSummary {
        let sold: f64 = self
            .credits
            .iter()
            .filter(|c| c.status == CreditStatus::Sold)
            .map(|c| c.amount)
            .sum();
        CreditSummary {
            total: self.credits.iter().map(|c| c.amount).sum(),
            available: self.available_credits(),
            sold,
        }
    }

    /// Sells `quantity` credits against an offer.
    ///
    /// Validation happens before any mutation, a failed sale leaves the
    /// ledger untouched.
    pub fn sell(
        &mut self,
        offer_id: &str,
        quantity: u32,
        policy: SettlementPolicy,
    ) -> Result<Sale, FarmError> {
        let offer = self
            .offer(offer_id)
            .ok_or_else(|| FarmError::UnknownOffer(offer_id.to_owned()))?
            .clone();

        if quantity == 0 {
            return Err(FarmError::InvalidQuantity(quantity));
        }
        if quantity > offer.quantity {
            return Err(FarmError::ExceedsOffer {
                requested: quantity,
                wanted: offer.quantity,
            });
        }
        let available = self.available_credits();
        if quantity as f64 > available + EPSILON {
            return Err(FarmError::InsufficientCredits {
                requested: quantity,
                available,
            });
        }

        let earnings = offer.price_per_credit * quantity as f64;
        match policy {
            SettlementPolicy::Fifo => self.settle_fifo(quantity as f64, offer.price_per_credit),
            SettlementPolicy::Sweep => self.settle_sweep(earnings),
        }
        self.total_earnings += earnings;

        debug!(offer_id = offer_id, quantity = quantity, "Settled sale");
        Ok(Sale {
            offer_id: offer.id,
            buyer_name: offer.buyer_name,
            quantity,
            earnings,
        })
    }

    fn settle_fifo(&mut self, quantity: f64, price: f64) {
        let mut order: Vec<usize> = (0..self.credits.len())
            .filter(|i| self.credits[*i].status == CreditStatus::Earned)
            .collect();
        order.sort_by_key(|i| self.credits[*i].earned_date);

        let mut remaining = quantity;
        let mut splits = Vec::new();
        for i in order {
            if remaining <= EPSILON {
                break;
            }
            let credit = &mut self.credits[i];
            if credit.amount <= remaining + EPSILON {
                remaining -= credit.amount;
                credit.status = CreditStatus::Sold;
                credit.value = credit.amount * price;
            } else {
                let kept = credit.amount - remaining;
                credit.value *= kept / credit.amount;
                credit.amount = kept;
                splits.push(CarbonCredit {
                    id: uuid::Uuid::new_v4().to_string(),
                    amount: remaining,
                    earned_date: credit.earned_date,
                    source: credit.source.clone(),
                    status: CreditStatus::Sold,
                    value: remaining * price,
                });
                remaining = 0.0;
            }
        }
        self.credits.append(&mut splits);
    }

    fn settle_sweep(&mut self, earnings: f64) {
        let earned = self
            .credits
            .iter()
            .filter(|c| c.status == CreditStatus::Earned)
            .count();
        if earned == 0 {
            return;
        }
        let share = earnings / earned as f64;
        for credit in self
            .credits
            .iter_mut()
            .filter(|c| c.status == CreditStatus::Earned)
        {
            credit.status = CreditStatus::Sold;
            credit.value += share;
        }
    }
}
