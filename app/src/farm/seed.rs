use super::state::FarmState;
use chrono::{DateTime, Duration, TimeZone, Utc};
use fieldsim_core::{
    CarbonCredit, CreditStatus, FarmProfile, Ledger, MarketOffer, Notification,
    NotificationKind, NotificationLog, SensorData,
};

const INITIAL_EARNINGS: f64 = 15420.0;

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .earliest()
        .unwrap_or_else(Utc::now)
}

fn credit(
    id: &str,
    amount: f64,
    earned_date: DateTime<Utc>,
    source: &str,
    status: CreditStatus,
    value: f64,
) -> CarbonCredit {
    CarbonCredit {
        id: id.to_owned(),
        amount,
        earned_date,
        source: source.to_owned(),
        status,
        value,
    }
}

fn offer(
    id: &str,
    buyer_name: &str,
    company: &str,
    price_per_credit: f64,
    quantity: u32,
    expiry_date: DateTime<Utc>,
    rating: f64,
) -> MarketOffer {
    MarketOffer {
        id: id.to_owned(),
        buyer_name: buyer_name.to_owned(),
        company: company.to_owned(),
        price_per_credit,
        quantity,
        expiry_date,
        rating,
    }
}

fn notification(
    id: &str,
    kind: NotificationKind,
    title: &str,
    message: &str,
    age: Duration,
    read: bool,
) -> Notification {
    Notification {
        id: id.to_owned(),
        kind,
        title: title.to_owned(),
        message: message.to_owned(),
        timestamp: Utc::now() - age,
        read,
    }
}

pub fn ledger() -> Ledger {
    let credits = vec![
        credit("1", 12.5, date(2024, 1, 15), "Water Conservation", CreditStatus::Earned, 625.0),
        credit("2", 8.3, date(2024, 1, 10), "Organic Farming", CreditStatus::Sold, 415.0),
        credit("3", 15.7, date(2024, 1, 8), "Energy Efficiency", CreditStatus::Earned, 785.0),
    ];
    let offers = vec![
        offer("1", "EcoTech Solutions", "Green Corp", 52.0, 10, date(2024, 2, 1), 4.8),
        offer("2", "Sustainable Industries", "Carbon Zero Ltd", 48.0, 25, date(2024, 1, 28), 4.6),
        offer("3", "Global Green Initiative", "Planet First", 55.0, 15, date(2024, 2, 5), 4.9),
    ];
    Ledger::new(credits, offers, INITIAL_EARNINGS)
}

pub fn notifications() -> NotificationLog {
    NotificationLog::new(vec![
        notification(
            "1",
            NotificationKind::Success,
            "Carbon Credits Earned!",
            "You earned 2.3 carbon credits from your water conservation efforts.",
            Duration::zero(),
            false,
        ),
        notification(
            "2",
            NotificationKind::Info,
            "New Market Offer",
            "EcoTech Solutions made an offer for your carbon credits at ₹52 per credit.",
            Duration::hours(1),
            false,
        ),
        notification(
            "3",
            NotificationKind::Warning,
            "Irrigation Alert",
            "Soil moisture is below optimal levels in sector 2.",
            Duration::hours(2),
            true,
        ),
    ])
}

pub fn initial_state() -> FarmState {
    FarmState::new(
        SensorData::default(),
        ledger(),
        notifications(),
        FarmProfile::default(),
    )
}
