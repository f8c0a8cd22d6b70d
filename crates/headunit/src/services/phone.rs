//! Phone Service - Bluetooth connection and call handling
//!
//! One `PhoneService` owns the device registry, the call session and the
//! call history behind a single lock. Commands from UI layers, the delayed
//! auto-connect/auto-miss timers and the background simulator all go
//! through that lock, and timers re-validate the call they were scheduled
//! for before touching it.

use std::sync::{Arc, Weak};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tokio::sync::Mutex;

use super::call_history::{CallHistoryLog, DEFAULT_HISTORY_CAPACITY};
use super::device_registry::{chance, DeviceRegistry};
use super::sample_data::sample_seed;
use super::simulator::{BackgroundSimulator, SimulatorConfig, SimulatorHandle};
use super::timer::schedule;
use crate::domain::{
    CallRecord, CallSession, Contact, Device, OngoingCall, PhoneError, StatusSnapshot,
};
use crate::ports::Clock;

/// Phone service configuration
#[derive(Debug, Clone)]
pub struct PhoneConfig {
    /// Delay before an outgoing call is picked up
    pub auto_connect_delay: Duration,
    /// How long an incoming call rings before it is missed
    pub auto_miss_delay: Duration,
    /// Retained call history entries
    pub history_capacity: usize,
    pub simulator: SimulatorConfig,
}

impl Default for PhoneConfig {
    fn default() -> Self {
        Self {
            auto_connect_delay: Duration::from_secs(2),
            auto_miss_delay: Duration::from_secs(15),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            simulator: SimulatorConfig::default(),
        }
    }
}

/// Initial data loaded at service start
#[derive(Debug, Clone, Default)]
pub struct PhoneSeed {
    pub devices: Vec<Device>,
    pub contacts: Vec<Contact>,
    /// Most recent first
    pub history: Vec<CallRecord>,
}

/// Result of one simulator tick
#[derive(Debug, Clone, Default)]
pub(crate) struct TickOutcome {
    pub(crate) incoming_call: Option<OngoingCall>,
    pub(crate) drifted: bool,
}

#[derive(Debug)]
struct PhoneState {
    registry: DeviceRegistry,
    session: CallSession,
    history: CallHistoryLog,
}

struct PhoneInner {
    config: PhoneConfig,
    clock: Arc<dyn Clock>,
    contacts: Vec<Contact>,
    state: Mutex<PhoneState>,
    simulator: Mutex<Option<SimulatorHandle>>,
}

/// Handle to the phone core; clones share the same state
#[derive(Clone)]
pub struct PhoneService {
    inner: Arc<PhoneInner>,
}

/// Non-owning handle held by timers and the simulator task
#[derive(Clone)]
pub(crate) struct WeakPhone(Weak<PhoneInner>);

impl WeakPhone {
    pub(crate) fn upgrade(&self) -> Option<PhoneService> {
        self.0.upgrade().map(|inner| PhoneService { inner })
    }
}

impl PhoneService {
    /// Create a service from seed data
    pub fn new(
        config: PhoneConfig,
        seed: PhoneSeed,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, PhoneError> {
        let mut registry = DeviceRegistry::new();
        for device in seed.devices {
            registry.register(device)?;
        }
        let history = CallHistoryLog::with_entries(config.history_capacity, seed.history);

        tracing::info!(
            "Phone service initialized ({} devices, {} contacts, {} history entries)",
            registry.devices().len(),
            seed.contacts.len(),
            history.len()
        );

        Ok(Self {
            inner: Arc::new(PhoneInner {
                config,
                clock,
                contacts: seed.contacts,
                state: Mutex::new(PhoneState {
                    registry,
                    session: CallSession::default(),
                    history,
                }),
                simulator: Mutex::new(None),
            }),
        })
    }

    /// Create a service seeded with the demo devices, contacts and history
    pub fn with_sample_data(config: PhoneConfig, clock: Arc<dyn Clock>) -> Result<Self, PhoneError> {
        let seed = sample_seed(clock.now());
        Self::new(config, seed, clock)
    }

    fn downgrade(&self) -> WeakPhone {
        WeakPhone(Arc::downgrade(&self.inner))
    }

    // ============================================
    // Lifecycle
    // ============================================

    /// Start the background simulator
    ///
    /// Returns false if it is already running or disabled in the config.
    pub async fn start(&self) -> bool {
        if !self.inner.config.simulator.enabled {
            tracing::info!("📡 Phone simulator disabled");
            return false;
        }
        let mut slot = self.inner.simulator.lock().await;
        if slot.is_some() {
            return false;
        }
        let simulator = BackgroundSimulator::new(self.downgrade(), self.inner.config.simulator.clone());
        *slot = Some(simulator.start());
        tracing::info!("Phone service started");
        true
    }

    /// Signal the simulator to stop and wait a bounded time for it
    pub async fn stop(&self) {
        let handle = self.inner.simulator.lock().await.take();
        if let Some(handle) = handle {
            handle
                .shutdown(self.inner.config.simulator.shutdown_timeout)
                .await;
            tracing::info!("Phone service stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.inner.simulator.lock().await.is_some()
    }

    // ============================================
    // Connection commands
    // ============================================

    /// Connect to a paired device, or to the most recently connected one
    pub async fn connect(&self, device_id: Option<&str>) -> Result<Device, PhoneError> {
        let device_id = device_id.map(str::trim).filter(|id| !id.is_empty());
        let now = self.inner.clock.now();
        let mut state = self.inner.state.lock().await;

        match state.registry.connect(device_id, now) {
            Ok(device) => {
                tracing::info!("Connected to {}", device.display_name);
                Ok(device.clone())
            }
            Err(e) => {
                tracing::warn!("Connect failed: {}", e);
                Err(e)
            }
        }
    }

    /// Disconnect the active device
    pub async fn disconnect(&self) -> Result<Device, PhoneError> {
        let mut state = self.inner.state.lock().await;
        let device = state.registry.disconnect().inspect_err(|e| {
            tracing::warn!("Disconnect failed: {}", e);
        })?;
        tracing::info!("Disconnected from {}", device.display_name);
        Ok(device)
    }

    // ============================================
    // Call commands
    // ============================================

    /// Dial a number, or a contact's number when `contact_id` is given
    ///
    /// The call is picked up automatically after `auto_connect_delay` unless
    /// it was ended first.
    pub async fn make_call(
        &self,
        number: Option<&str>,
        contact_id: Option<&str>,
    ) -> Result<OngoingCall, PhoneError> {
        let now = self.inner.clock.now();
        let call = {
            let mut state = self.inner.state.lock().await;
            ensure_connected(&state.registry, "make call")?;
            let status = state.session.status();
            if !state.session.is_idle() {
                tracing::warn!("Cannot make call while {}", status);
                return Err(PhoneError::invalid_transition("make call", status));
            }

            let (number, name) = self.resolve_dial_target(number, contact_id)?;
            state
                .session
                .begin("make call", OngoingCall::dial(number, name, now))?
                .clone()
        };

        tracing::info!("Making call to {}", call.caller_label());

        let phone = self.downgrade();
        let call_id = call.id();
        schedule(self.inner.config.auto_connect_delay, move || async move {
            if let Some(phone) = phone.upgrade() {
                phone.auto_connect(call_id).await;
            }
        });

        Ok(call)
    }

    /// Answer the ringing incoming call
    pub async fn answer_call(&self) -> Result<OngoingCall, PhoneError> {
        let now = self.inner.clock.now();
        let mut state = self.inner.state.lock().await;
        ensure_connected(&state.registry, "answer call")?;

        let call = state.session.answer(now).inspect_err(|e| {
            tracing::warn!("Answer failed: {}", e);
        })?;
        tracing::info!("Answered call from {}", call.caller_label());
        Ok(call.clone())
    }

    /// End the current call and record it in history
    pub async fn end_call(&self) -> Result<CallRecord, PhoneError> {
        let now = self.inner.clock.now();
        let mut state = self.inner.state.lock().await;
        ensure_connected(&state.registry, "end call")?;

        let record = state.session.end(now).inspect_err(|e| {
            tracing::warn!("End call failed: {}", e);
        })?;
        state.history.record(record.clone());

        tracing::info!(
            "Ended call with {} ({}, {}s)",
            record.name.as_deref().unwrap_or(&record.number),
            record.outcome,
            record.duration_seconds
        );
        Ok(record)
    }

    /// Ring the head unit with a call from `contact`
    ///
    /// Service-internal trigger used by the simulator. Requires a connected
    /// device and an idle session, both checked under the lock. The call is missed
    /// after `auto_miss_delay` unless answered or ended first.
    pub(crate) async fn simulate_incoming(&self, contact: &Contact) -> Result<OngoingCall, PhoneError> {
        let now = self.inner.clock.now();
        let call = {
            let mut state = self.inner.state.lock().await;
            ensure_connected(&state.registry, "receive call")?;
            state
                .session
                .begin("receive call", OngoingCall::ring(contact, now))?
                .clone()
        };

        tracing::info!("Incoming call from {}", call.caller_label());

        let phone = self.downgrade();
        let call_id = call.id();
        schedule(self.inner.config.auto_miss_delay, move || async move {
            if let Some(phone) = phone.upgrade() {
                phone.auto_miss(call_id).await;
            }
        });

        Ok(call)
    }

    async fn auto_connect(&self, call_id: uuid::Uuid) {
        let mut state = self.inner.state.lock().await;
        match state.session.connect_outgoing(call_id) {
            Some(call) => tracing::info!("Call connected: {}", call.caller_label()),
            None => tracing::debug!("Auto-connect skipped, call {} no longer dialing", call_id),
        }
    }

    async fn auto_miss(&self, call_id: uuid::Uuid) {
        let now = self.inner.clock.now();
        let mut state = self.inner.state.lock().await;
        match state.session.miss(call_id, now) {
            Some(record) => {
                tracing::info!(
                    "Missed call from {}",
                    record.name.as_deref().unwrap_or(&record.number)
                );
                state.history.record(record);
            }
            None => tracing::debug!("Auto-miss skipped, call {} no longer ringing", call_id),
        }
    }

    fn resolve_dial_target(
        &self,
        number: Option<&str>,
        contact_id: Option<&str>,
    ) -> Result<(String, Option<String>), PhoneError> {
        let number = number.map(str::trim).filter(|n| !n.is_empty());
        let contact_id = contact_id.map(str::trim).filter(|id| !id.is_empty());

        match (contact_id, number) {
            (Some(id), _) => self
                .inner
                .contacts
                .iter()
                .find(|c| c.id == id)
                .map(|c| (c.phone_number.clone(), Some(c.name.clone())))
                .ok_or_else(|| PhoneError::ContactNotFound(id.to_string())),
            (None, Some(number)) => Ok((number.to_string(), None)),
            (None, None) => Err(PhoneError::Validation(
                "A phone number or contact id is required".to_string(),
            )),
        }
    }

    // ============================================
    // Simulation
    // ============================================

    /// One background step: maybe ring from a random contact, then drift
    /// the active device's readings
    pub(crate) async fn simulation_tick(
        &self,
        rng: &mut StdRng,
        config: &SimulatorConfig,
    ) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        let caller = {
            let state = self.inner.state.lock().await;
            if !state.registry.is_connected() {
                return outcome;
            }
            if state.session.is_idle() && chance(rng, config.incoming_call_probability) {
                self.inner.contacts.choose(rng).cloned()
            } else {
                None
            }
        };

        if let Some(contact) = caller {
            match self.simulate_incoming(&contact).await {
                Ok(call) => outcome.incoming_call = Some(call),
                Err(e) => tracing::warn!("Simulated incoming call failed: {}", e),
            }
        }

        outcome.drifted = self
            .inner
            .state
            .lock()
            .await
            .registry
            .drift(rng, &config.drift);
        outcome
    }

    // ============================================
    // Queries
    // ============================================

    /// Current connection and call status
    pub async fn get_status(&self) -> StatusSnapshot {
        let state = self.inner.state.lock().await;
        StatusSnapshot::project(state.registry.active_device(), &state.session)
    }

    pub async fn get_paired_devices(&self) -> Vec<Device> {
        self.inner.state.lock().await.registry.devices().to_vec()
    }

    pub fn get_contacts(&self) -> Vec<Contact> {
        self.inner.contacts.clone()
    }

    /// Call history, most recent first
    pub async fn get_call_history(&self) -> Vec<CallRecord> {
        self.inner.state.lock().await.history.query()
    }
}

fn ensure_connected(registry: &DeviceRegistry, operation: &str) -> Result<(), PhoneError> {
    if registry.is_connected() {
        Ok(())
    } else {
        tracing::warn!("Cannot {}: no device connected", operation);
        Err(PhoneError::NotConnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CallOutcome, CallStatus, DeviceKind};
    use crate::ports::TokioClock;
    use chrono::{DateTime, TimeZone, Utc};
    use rand::SeedableRng;

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn seed() -> PhoneSeed {
        PhoneSeed {
            devices: vec![
                Device::new("d1", "Pixel 7 Pro", DeviceKind::Phone)
                    .with_battery(85)
                    .with_signal(4),
                Device::new("d2", "iPhone 14", DeviceKind::Phone)
                    .with_battery(75)
                    .with_signal(3)
                    .with_last_connected(anchor() - chrono::Duration::days(1)),
            ],
            contacts: vec![
                Contact::new("contact1", "John Smith", "+1 (555) 123-4567"),
                Contact::new("contact2", "Jane Doe", "+1 (555) 987-6543"),
            ],
            history: Vec::new(),
        }
    }

    fn service_with(config: PhoneConfig) -> PhoneService {
        PhoneService::new(config, seed(), Arc::new(TokioClock::starting_at(anchor()))).unwrap()
    }

    fn service() -> PhoneService {
        service_with(PhoneConfig::default())
    }

    async fn connected_service() -> PhoneService {
        let phone = service();
        phone.connect(Some("d1")).await.unwrap();
        phone
    }

    fn contact() -> Contact {
        Contact::new("contact1", "John Smith", "+1 (555) 123-4567")
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_unknown_device_fails() {
        let phone = service();
        assert_eq!(
            phone.connect(Some("ghost")).await.unwrap_err(),
            PhoneError::DeviceNotFound("ghost".to_string())
        );
        assert!(!phone.get_status().await.connected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_known_device() {
        let phone = service();
        let device = phone.connect(Some("d1")).await.unwrap();
        assert_eq!(device.id, "d1");
        assert_eq!(device.last_connected, Some(anchor()));

        let status = phone.get_status().await;
        assert!(status.connected);
        assert_eq!(status.device_name.as_deref(), Some("Pixel 7 Pro"));
        assert_eq!(status.device_kind, Some(DeviceKind::Phone));
        assert_eq!(status.battery_percent, Some(85));
        assert_eq!(status.signal_bars, Some(4));
        assert_eq!(status.call_status, CallStatus::Idle);
        assert!(status.current_call.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_without_id_selects_most_recent() {
        let phone = service();
        let device = phone.connect(None).await.unwrap();
        assert_eq!(device.id, "d2");
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_device_id_means_most_recent() {
        let phone = service();
        assert_eq!(phone.connect(Some("  ")).await.unwrap().id, "d2");
    }

    #[tokio::test(start_paused = true)]
    async fn test_disconnect_twice() {
        let phone = connected_service().await;
        assert_eq!(phone.disconnect().await.unwrap().id, "d1");
        assert_eq!(phone.disconnect().await.unwrap_err(), PhoneError::NotConnected);
        assert!(!phone.get_status().await.connected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_make_call_requires_connection() {
        let phone = service();
        assert_eq!(
            phone.make_call(Some("+15551234567"), None).await.unwrap_err(),
            PhoneError::NotConnected
        );
        assert_eq!(phone.get_status().await.call_status, CallStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_make_call_requires_idle() {
        let phone = connected_service().await;
        phone.make_call(Some("+15551234567"), None).await.unwrap();

        assert_eq!(
            phone.make_call(Some("+15550000000"), None).await.unwrap_err(),
            PhoneError::invalid_transition("make call", CallStatus::Outgoing)
        );
        let status = phone.get_status().await;
        assert_eq!(status.current_call.unwrap().number(), "+15551234567");
    }

    #[tokio::test(start_paused = true)]
    async fn test_make_call_by_contact_resolves_name() {
        let phone = connected_service().await;
        let call = phone.make_call(None, Some("contact2")).await.unwrap();
        assert_eq!(call.status(), CallStatus::Outgoing);
        assert_eq!(call.number(), "+1 (555) 987-6543");
        assert_eq!(call.name(), Some("Jane Doe"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_make_call_rejects_unknown_contact_and_empty_target() {
        let phone = connected_service().await;
        assert_eq!(
            phone.make_call(None, Some("nobody")).await.unwrap_err(),
            PhoneError::ContactNotFound("nobody".to_string())
        );
        assert!(matches!(
            phone.make_call(Some(" "), None).await.unwrap_err(),
            PhoneError::Validation(_)
        ));
        assert_eq!(phone.get_status().await.call_status, CallStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_outgoing_call_connects_then_records_duration() {
        let phone = connected_service().await;
        let call = phone.make_call(Some("+15551234567"), None).await.unwrap();
        assert_eq!(call.status(), CallStatus::Outgoing);

        tokio::time::sleep(Duration::from_millis(2100)).await;
        assert_eq!(phone.get_status().await.call_status, CallStatus::Active);

        tokio::time::sleep(Duration::from_secs(5)).await;
        let record = phone.end_call().await.unwrap();
        assert_eq!(record.outcome, CallOutcome::Outgoing);
        assert!(record.duration_seconds > 0);
        assert_eq!(record.duration_seconds, 7);

        let history = phone.get_call_history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0], record);
        assert_eq!(phone.get_status().await.call_status, CallStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ending_before_pickup_is_not_connected_later() {
        let phone = connected_service().await;
        phone.make_call(Some("+15551234567"), None).await.unwrap();

        tokio::time::sleep(Duration::from_millis(500)).await;
        let record = phone.end_call().await.unwrap();
        assert_eq!(record.outcome, CallOutcome::Outgoing);
        assert_eq!(record.duration_seconds, 0);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(phone.get_status().await.call_status, CallStatus::Idle);
        assert_eq!(phone.get_call_history().await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_pickup_does_not_connect_next_call() {
        let phone = connected_service().await;
        phone.make_call(Some("+15551111111"), None).await.unwrap();
        tokio::time::sleep(Duration::from_millis(1000)).await;
        phone.end_call().await.unwrap();

        tokio::time::sleep(Duration::from_millis(500)).await;
        phone.make_call(Some("+15552222222"), None).await.unwrap();

        // first call's timer fires at 2.0s
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(phone.get_status().await.call_status, CallStatus::Outgoing);

        // second call's timer fires at 3.5s
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(phone.get_status().await.call_status, CallStatus::Active);
    }

    #[tokio::test(start_paused = true)]
    async fn test_incoming_call_missed_after_timeout() {
        let phone = connected_service().await;
        phone.simulate_incoming(&contact()).await.unwrap();
        assert_eq!(phone.get_status().await.call_status, CallStatus::Incoming);

        tokio::time::sleep(Duration::from_secs(14)).await;
        assert_eq!(phone.get_status().await.call_status, CallStatus::Incoming);

        tokio::time::sleep(Duration::from_millis(1100)).await;
        let status = phone.get_status().await;
        assert_eq!(status.call_status, CallStatus::Idle);
        assert!(status.current_call.is_none());

        let history = phone.get_call_history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].outcome, CallOutcome::Missed);
        assert_eq!(history[0].duration_seconds, 0);
        assert_eq!(history[0].name.as_deref(), Some("John Smith"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_answered_call_is_not_missed() {
        let phone = connected_service().await;
        phone.simulate_incoming(&contact()).await.unwrap();

        tokio::time::sleep(Duration::from_secs(3)).await;
        let call = phone.answer_call().await.unwrap();
        assert_eq!(call.status(), CallStatus::Active);
        assert!(call.start_time() >= anchor() + chrono::Duration::seconds(3));
        assert!(call.start_time() < anchor() + chrono::Duration::seconds(4));

        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(phone.get_status().await.call_status, CallStatus::Active);
        assert!(phone.get_call_history().await.is_empty());

        let record = phone.end_call().await.unwrap();
        assert_eq!(record.outcome, CallOutcome::Incoming);
        assert_eq!(record.duration_seconds, 20);
        assert_eq!(phone.get_call_history().await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejecting_ringing_call_records_single_miss() {
        let phone = connected_service().await;
        phone.simulate_incoming(&contact()).await.unwrap();

        let record = phone.end_call().await.unwrap();
        assert_eq!(record.outcome, CallOutcome::Missed);

        tokio::time::sleep(Duration::from_secs(16)).await;
        assert_eq!(phone.get_call_history().await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_answer_and_end_require_connection() {
        let phone = connected_service().await;
        phone.simulate_incoming(&contact()).await.unwrap();
        phone.disconnect().await.unwrap();

        assert_eq!(phone.answer_call().await.unwrap_err(), PhoneError::NotConnected);
        assert_eq!(phone.end_call().await.unwrap_err(), PhoneError::NotConnected);
        assert_eq!(phone.get_status().await.call_status, CallStatus::Incoming);

        // the ringing call still times out into history
        tokio::time::sleep(Duration::from_secs(16)).await;
        assert_eq!(phone.get_status().await.call_status, CallStatus::Idle);
        assert_eq!(phone.get_call_history().await[0].outcome, CallOutcome::Missed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_call_while_idle_fails() {
        let phone = connected_service().await;
        assert_eq!(
            phone.end_call().await.unwrap_err(),
            PhoneError::invalid_transition("end call", CallStatus::Idle)
        );
        assert_eq!(
            phone.answer_call().await.unwrap_err(),
            PhoneError::invalid_transition("answer call", CallStatus::Idle)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_history_keeps_latest_entries() {
        let config = PhoneConfig {
            history_capacity: 3,
            ..PhoneConfig::default()
        };
        let phone = service_with(config);
        phone.connect(Some("d1")).await.unwrap();

        for n in 0..5 {
            let number = format!("+1555000000{}", n);
            phone.make_call(Some(number.as_str()), None).await.unwrap();
            phone.end_call().await.unwrap();
        }

        let numbers: Vec<String> = phone
            .get_call_history()
            .await
            .into_iter()
            .map(|r| r.number)
            .collect();
        assert_eq!(numbers, vec!["+15550000004", "+15550000003", "+15550000002"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_injects_call_only_when_connected_and_idle() {
        let phone = service();
        let mut rng = StdRng::seed_from_u64(42);
        let config = SimulatorConfig {
            incoming_call_probability: 1.0,
            ..SimulatorConfig::default()
        };

        let outcome = phone.simulation_tick(&mut rng, &config).await;
        assert!(outcome.incoming_call.is_none());
        assert_eq!(phone.get_status().await.call_status, CallStatus::Idle);

        phone.connect(Some("d1")).await.unwrap();
        let outcome = phone.simulation_tick(&mut rng, &config).await;
        let call = outcome.incoming_call.unwrap();
        assert!(phone
            .get_contacts()
            .iter()
            .any(|c| Some(c.name.as_str()) == call.name()));
        assert_eq!(phone.get_status().await.call_status, CallStatus::Incoming);

        let outcome = phone.simulation_tick(&mut rng, &config).await;
        assert!(outcome.incoming_call.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_without_contacts_is_quiet() {
        let mut seed = seed();
        seed.contacts.clear();
        let phone = PhoneService::new(
            PhoneConfig::default(),
            seed,
            Arc::new(TokioClock::starting_at(anchor())),
        )
        .unwrap();
        phone.connect(Some("d1")).await.unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        let config = SimulatorConfig {
            incoming_call_probability: 1.0,
            ..SimulatorConfig::default()
        };
        let outcome = phone.simulation_tick(&mut rng, &config).await;
        assert!(outcome.incoming_call.is_none());
        assert_eq!(phone.get_status().await.call_status, CallStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_and_stop_simulator() {
        let config = PhoneConfig {
            simulator: SimulatorConfig {
                incoming_call_probability: 1.0,
                seed: Some(9),
                ..SimulatorConfig::default()
            },
            ..PhoneConfig::default()
        };
        let phone = service_with(config);
        phone.connect(Some("d1")).await.unwrap();

        assert!(phone.start().await);
        assert!(!phone.start().await);
        assert!(phone.is_running().await);

        tokio::time::sleep(Duration::from_millis(5100)).await;
        assert_eq!(phone.get_status().await.call_status, CallStatus::Incoming);

        phone.stop().await;
        assert!(!phone.is_running().await);
        phone.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_simulator_never_runs() {
        let config = PhoneConfig {
            simulator: SimulatorConfig {
                enabled: false,
                incoming_call_probability: 1.0,
                ..SimulatorConfig::default()
            },
            ..PhoneConfig::default()
        };
        let phone = service_with(config);
        phone.connect(Some("d1")).await.unwrap();

        assert!(!phone.start().await);
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert!(!phone.is_running().await);
        assert_eq!(phone.get_status().await.call_status, CallStatus::Idle);
        phone.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_incoming_call_requires_connection() {
        let phone = connected_service().await;
        phone.disconnect().await.unwrap();

        assert_eq!(
            phone.simulate_incoming(&contact()).await.unwrap_err(),
            PhoneError::NotConnected
        );
        let status = phone.get_status().await;
        assert_eq!(status.call_status, CallStatus::Idle);
        assert!(!status.connected);

        tokio::time::sleep(Duration::from_secs(16)).await;
        assert!(phone.get_call_history().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_seed_devices_are_rejected() {
        let mut seed = seed();
        seed.devices.push(Device::new("d1", "Duplicate", DeviceKind::Other));
        let result = PhoneService::new(
            PhoneConfig::default(),
            seed,
            Arc::new(TokioClock::starting_at(anchor())),
        );
        assert!(matches!(result, Err(PhoneError::DuplicateDevice(id)) if id == "d1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sample_data_seed() {
        let phone = PhoneService::with_sample_data(
            PhoneConfig::default(),
            Arc::new(TokioClock::starting_at(anchor())),
        )
        .unwrap();

        assert_eq!(phone.get_paired_devices().await.len(), 3);
        assert_eq!(phone.get_contacts().len(), 5);
        let history = phone.get_call_history().await;
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].outcome, CallOutcome::Outgoing);
        assert_eq!(history[2].outcome, CallOutcome::Missed);

        assert_eq!(phone.connect(None).await.unwrap().id, "device1");
    }
}
