//! # catpoint-adapter-storage-memory
//!
//! In-memory implementation of the [`StatusStore`] port.
//!
//! ## Responsibilities
//! - Hold the arming status, alarm status, and sensor set for one panel
//! - Key sensors by [`SensorId`] so toggling never changes membership
//! - List sensors in panel order (name, type, id)
//!
//! ## Dependency rule
//! Depends on `catpoint-app` (for port traits) and `catpoint-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use catpoint_app::ports::StatusStore;
use catpoint_domain::error::{CatpointError, StorageError};
use catpoint_domain::id::SensorId;
use catpoint_domain::sensor::Sensor;
use catpoint_domain::status::{AlarmStatus, ArmingStatus};

#[derive(Debug, Default)]
struct PanelState {
    arming: ArmingStatus,
    alarm: AlarmStatus,
    sensors: HashMap<SensorId, Sensor>,
}

/// `Mutex`-guarded status store. Starts disarmed with no alarm and no sensors.
#[derive(Debug, Default)]
pub struct InMemoryStatusStore {
    state: Mutex<PanelState>,
}

impl InMemoryStatusStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, PanelState>, StorageError> {
        self.state.lock().map_err(|_| StorageError::Poisoned)
    }
}

impl StatusStore for InMemoryStatusStore {
    fn arming_status(&self) -> Result<ArmingStatus, CatpointError> {
        Ok(self.lock()?.arming)
    }

    fn set_arming_status(&self, status: ArmingStatus) -> Result<(), CatpointError> {
        self.lock()?.arming = status;
        Ok(())
    }

    fn alarm_status(&self) -> Result<AlarmStatus, CatpointError> {
        Ok(self.lock()?.alarm)
    }

    fn set_alarm_status(&self, status: AlarmStatus) -> Result<(), CatpointError> {
        self.lock()?.alarm = status;
        Ok(())
    }

    fn sensors(&self) -> Result<Vec<Sensor>, CatpointError> {
        let mut sensors: Vec<Sensor> = self.lock()?.sensors.values().cloned().collect();
        sensors.sort_by(|a, b| a.panel_key().cmp(&b.panel_key()));
        Ok(sensors)
    }

    fn add_sensor(&self, sensor: Sensor) -> Result<(), CatpointError> {
        tracing::debug!(sensor_id = %sensor.id, "sensor added");
        self.lock()?.sensors.insert(sensor.id, sensor);
        Ok(())
    }

    fn remove_sensor(&self, sensor: &Sensor) -> Result<(), CatpointError> {
        if self.lock()?.sensors.remove(&sensor.id).is_some() {
            tracing::debug!(sensor_id = %sensor.id, "sensor removed");
        }
        Ok(())
    }

    fn update_sensor(&self, sensor: Sensor) -> Result<(), CatpointError> {
        self.lock()?.sensors.insert(sensor.id, sensor);
        Ok(())
    }
}
