//! Status store port: the authoritative home of arming status, alarm
//! status, and the registered sensors.
//!
//! The store performs no business logic; every rule lives in
//! [`SecurityService`](crate::services::security_service::SecurityService).

use catpoint_domain::error::CatpointError;
use catpoint_domain::sensor::Sensor;
use catpoint_domain::status::{AlarmStatus, ArmingStatus};

/// Persistence boundary for the security panel state.
///
/// Methods take `&self`; implementations provide their own interior
/// mutability.
pub trait StatusStore {
    /// Current arming status.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the backend cannot be read.
    fn arming_status(&self) -> Result<ArmingStatus, CatpointError>;

    /// Overwrite the arming status.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the backend cannot be written.
    fn set_arming_status(&self, status: ArmingStatus) -> Result<(), CatpointError>;

    /// Current alarm status.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the backend cannot be read.
    fn alarm_status(&self) -> Result<AlarmStatus, CatpointError>;

    /// Overwrite the alarm status.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the backend cannot be written.
    fn set_alarm_status(&self, status: AlarmStatus) -> Result<(), CatpointError>;

    /// Every registered sensor, one entry per [`SensorId`](catpoint_domain::id::SensorId).
    ///
    /// # Errors
    ///
    /// Returns a storage error when the backend cannot be read.
    fn sensors(&self) -> Result<Vec<Sensor>, CatpointError>;

    /// Register a sensor.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the backend cannot be written.
    fn add_sensor(&self, sensor: Sensor) -> Result<(), CatpointError>;

    /// Forget a sensor. Removing an unknown sensor is not an error.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the backend cannot be written.
    fn remove_sensor(&self, sensor: &Sensor) -> Result<(), CatpointError>;

    /// Replace the stored copy of a sensor, inserting it when unknown.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the backend cannot be written.
    fn update_sensor(&self, sensor: Sensor) -> Result<(), CatpointError>;
}

impl<T: StatusStore + ?Sized> StatusStore for std::sync::Arc<T> {
    fn arming_status(&self) -> Result<ArmingStatus, CatpointError> {
        (**self).arming_status()
    }

    fn set_arming_status(&self, status: ArmingStatus) -> Result<(), CatpointError> {
        (**self).set_arming_status(status)
    }

    fn alarm_status(&self) -> Result<AlarmStatus, CatpointError> {
        (**self).alarm_status()
    }

    fn set_alarm_status(&self, status: AlarmStatus) -> Result<(), CatpointError> {
        (**self).set_alarm_status(status)
    }

    fn sensors(&self) -> Result<Vec<Sensor>, CatpointError> {
        (**self).sensors()
    }

    fn add_sensor(&self, sensor: Sensor) -> Result<(), CatpointError> {
        (**self).add_sensor(sensor)
    }

    fn remove_sensor(&self, sensor: &Sensor) -> Result<(), CatpointError> {
        (**self).remove_sensor(sensor)
    }

    fn update_sensor(&self, sensor: Sensor) -> Result<(), CatpointError> {
        (**self).update_sensor(sensor)
    }
}
