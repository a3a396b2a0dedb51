use fieldsim_core::{
    error::FarmError, generate, simulation, statuses, zones, FarmProfile, FarmProfileUpdate,
    IrrigationZone, Ledger, Notification, NotificationKind, NotificationLog, Recommendation, Sale,
    SensorData, SensorId, SensorStatus, SettlementPolicy,
};
use rand::Rng;
use std::time::Duration;

/// The single owned record behind the read/write context.
///
/// Every change of `data` goes through `apply_data`, which re-derives the
/// status list and the recommendations.
#[derive(Debug, Clone)]
pub struct FarmState {
    data: SensorData,
    statuses: Vec<SensorStatus>,
    recommendations: Vec<Recommendation>,
    ledger: Ledger,
    notifications: NotificationLog,
    profile: FarmProfile,
    irrigation_active: bool,
    tick_count: u64,
}

impl FarmState {
    pub fn new(
        data: SensorData,
        ledger: Ledger,
        notifications: NotificationLog,
        profile: FarmProfile,
    ) -> Self {
        let mut state = FarmState {
            statuses: Vec::new(),
            recommendations: Vec::new(),
            data: data.clone(),
            ledger,
            notifications,
            profile,
            irrigation_active: false,
            tick_count: 0,
        };
        state.apply_data(data);
        state
    }

    fn apply_data(&mut self, data: SensorData) {
        self.statuses = statuses(&data);
        self.recommendations = generate(&data, &self.recommendations);
        self.data = data;
    }

    /*
     * Simulation
     */

    pub fn tick<R: Rng>(&mut self, drain: f64, rng: &mut R) {
        let next = simulation::advance(&self.data, self.irrigation_active, drain, rng);
        self.apply_data(next);
        self.tick_count += 1;
    }

    pub fn set_sensor_value(&mut self, id: SensorId, value: f64) -> f64 {
        let mut next = self.data.clone();
        let stored = next.set_value(id, value);
        self.apply_data(next);
        stored
    }

    /*
     * Irrigation
     */

    /// Turns irrigation on. Re-activation while running is rejected and
    /// leaves everything untouched.
    pub fn start_irrigation(&mut self, duration: Duration) -> Result<(), FarmError> {
        if self.irrigation_active {
            return Err(FarmError::IrrigationActive);
        }
        self.irrigation_active = true;
        self.notifications.push(Notification::new(
            NotificationKind::Info,
            "Irrigation Activated",
            format!(
                "Irrigation system has been activated for {} seconds.",
                duration.as_secs_f64()
            ),
        ));
        Ok(())
    }

    pub fn stop_irrigation(&mut self) -> bool {
        std::mem::replace(&mut self.irrigation_active, false)
    }

    /*
     * Marketplace
     */

    pub fn sell_credits(
        &mut self,
        offer_id: &str,
        quantity: u32,
        policy: SettlementPolicy,
    ) -> Result<Sale, FarmError> {
        let sale = self.ledger.sell(offer_id, quantity, policy)?;
        self.notifications.push(Notification::new(
            NotificationKind::Success,
            "Credits Sold Successfully!",
            sale.summary(),
        ));
        Ok(sale)
    }

    /*
     * Account
     */

    pub fn mark_notification_read(&mut self, id: &str) -> Result<Notification, FarmError> {
        self.notifications.mark_read(id).cloned()
    }

    pub fn update_profile(&mut self, update: FarmProfileUpdate) -> &FarmProfile {
        self.profile.merge(update);
        &self.profile
    }

    /*
     * Getters
     */

    pub fn data(&self) -> &SensorData {
        &self.data
    }

    pub fn statuses(&self) -> &Vec<SensorStatus> {
        &self.statuses
    }

    pub fn recommendations(&self) -> &Vec<Recommendation> {
        &self.recommendations
    }

    pub fn zones(&self) -> Vec<IrrigationZone> {
        zones(&self.data)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn notifications(&self) -> &NotificationLog {
        &self.notifications
    }

    pub fn profile(&self) -> &FarmProfile {
        &self.profile
    }

    pub fn irrigation_active(&self) -> bool {
        self.irrigation_active
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::farm::seed;
    use fieldsim_core::{CreditStatus, Priority, RecommendationKind, SensorCondition, Trigger};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_seed_state_is_optimal() {
        let state = seed::initial_state();

        assert!(state
            .statuses()
            .iter()
            .all(|s| s.status == SensorCondition::Optimal));
        assert!(state.recommendations().is_empty());
        assert_eq!(state.statuses().len(), 6);
        assert!(!state.irrigation_active());
    }

    #[test]
    fn test_manual_edit_rederives() {
        // prepare
        let mut state = seed::initial_state();

        // execute
        let stored = state.set_sensor_value(SensorId::Soil, 30.0);

        // validate
        assert_eq!(stored, 30.0);
        assert_eq!(state.data().soil_moisture, 30.0);
        assert_eq!(state.statuses()[0].status, SensorCondition::Warning);
        assert_eq!(state.statuses()[0].value, 30.0);
        assert_eq!(state.recommendations().len(), 1);
        assert_eq!(state.recommendations()[0].priority, Priority::Medium);
    }

    #[test]
    fn test_soil_at_clock_floor() {
        // prepare
        let mut state = seed::initial_state();
        state.set_sensor_value(SensorId::Soil, 30.0);

        // execute
        state.set_sensor_value(SensorId::Soil, 20.0);

        // validate
        assert_eq!(state.statuses()[0].status, SensorCondition::Critical);
        let irrigation: Vec<&Recommendation> = state
            .recommendations()
            .iter()
            .filter(|r| r.kind == RecommendationKind::Irrigation)
            .collect();
        assert_eq!(irrigation.len(), 1);
        assert_eq!(irrigation[0].priority, Priority::High);
        assert_eq!(irrigation[0].trigger, Trigger::LowSoilMoisture);
    }

    #[test]
    fn test_ticks_keep_recommendations_bounded() {
        let mut state = seed::initial_state();
        let mut rng = StdRng::seed_from_u64(11);
        state.set_sensor_value(SensorId::Soil, 21.0);
        state.set_sensor_value(SensorId::Co2, 590.0);
        state.set_sensor_value(SensorId::Temp, 34.0);

        for _ in 0..1000 {
            state.tick(0.5, &mut rng);
            assert!(state.recommendations().len() <= 5);
            assert_eq!(state.statuses().len(), 6);
        }
        assert_eq!(state.tick_count(), 1000);
    }

    #[test]
    fn test_tank_drains_only_while_irrigating() {
        // prepare
        let mut state = seed::initial_state();
        let mut rng = StdRng::seed_from_u64(5);
        state.start_irrigation(Duration::from_secs(10)).unwrap();

        // execute & validate
        let mut last = state.data().water_tank_level;
        for _ in 0..3 {
            state.tick(0.5, &mut rng);
            assert!(state.data().water_tank_level < last);
            last = state.data().water_tank_level;
        }
        assert_eq!(last, 78.5);

        assert!(state.stop_irrigation());
        for _ in 0..3 {
            state.tick(0.5, &mut rng);
            assert_eq!(state.data().water_tank_level, last);
        }
    }

    #[test]
    fn test_irrigation_reentry_rejected() {
        // prepare
        let mut state = seed::initial_state();
        state.start_irrigation(Duration::from_secs(10)).unwrap();
        let notifications = state.notifications().entries().len();

        // execute
        let res = state.start_irrigation(Duration::from_secs(10));

        // validate
        assert_eq!(res, Err(FarmError::IrrigationActive));
        assert_eq!(state.notifications().entries().len(), notifications);
        assert_eq!(
            state.notifications().entries()[0].title,
            "Irrigation Activated"
        );
    }

    #[test]
    fn test_irrigation_notification_keeps_fractional_seconds() {
        let mut state = seed::initial_state();

        state.start_irrigation(Duration::from_millis(1500)).unwrap();
        let whole = {
            let mut other = seed::initial_state();
            other.start_irrigation(Duration::from_secs(10)).unwrap();
            other.notifications().entries()[0].message.clone()
        };

        assert_eq!(
            state.notifications().entries()[0].message,
            "Irrigation system has been activated for 1.5 seconds."
        );
        assert_eq!(whole, "Irrigation system has been activated for 10 seconds.");
    }

    #[test]
    fn test_sale_emits_notification() {
        // prepare
        let mut state = seed::initial_state();

        // execute
        let sale = state
            .sell_credits("1", 5, SettlementPolicy::Sweep)
            .unwrap();

        // validate
        assert_eq!(sale.earnings, 260.0);
        assert_eq!(state.ledger().total_earnings(), 15420.0 + 260.0);
        assert!(state
            .ledger()
            .credits()
            .iter()
            .all(|c| c.status != CreditStatus::Earned));
        let first = &state.notifications().entries()[0];
        assert_eq!(first.kind, NotificationKind::Success);
        assert!(!first.read);
        assert_eq!(
            first.message,
            "Sold 5 carbon credits to EcoTech Solutions for ₹260"
        );
    }

    #[test]
    fn test_unknown_offer_leaves_state() {
        let mut state = seed::initial_state();
        let ledger = state.ledger().clone();
        let notifications = state.notifications().clone();

        let res = state.sell_credits("unknown-id", 5, SettlementPolicy::Fifo);

        assert!(res.is_err());
        assert_eq!(state.ledger(), &ledger);
        assert_eq!(state.notifications(), &notifications);
    }

    #[test]
    fn test_mark_seeded_notification() {
        let mut state = seed::initial_state();

        let marked = state.mark_notification_read("2").unwrap();

        assert!(marked.read);
        assert_eq!(state.notifications().unread_count(), 1);
    }
}
