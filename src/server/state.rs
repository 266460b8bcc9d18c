use crate::alerts::AlertStore;
use crate::conditions::ConditionsService;
use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub struct AppState {
    pub conditions: ConditionsService,
    pub default_location: String,
    pub started_at: DateTime<Utc>,
    alerts: Mutex<AlertStore>,
}

impl AppState {
    pub fn new(conditions: ConditionsService, default_location: String, alerts: AlertStore) -> Self {
        Self {
            conditions,
            default_location,
            started_at: Utc::now(),
            alerts: Mutex::new(alerts),
        }
    }

    /// The store holds no invariants a panicking writer could break, so poisoning is ignored.
    pub fn alerts(&self) -> MutexGuard<'_, AlertStore> {
        self.alerts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
