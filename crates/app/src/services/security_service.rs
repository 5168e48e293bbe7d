//! Security service: the alarm state machine.
//!
//! Combines sensor activations, the arming status, and image classification
//! results into an [`AlarmStatus`]. All authoritative state lives in the
//! injected [`StatusStore`]; the service only remembers its listeners and
//! the most recent cat sighting.
//!
//! | Event | Precondition | Alarm status |
//! |-------|--------------|--------------|
//! | sensor inactive → active | armed, `NoAlarm` | `PendingAlarm` |
//! | sensor inactive → active | armed, `PendingAlarm` | `Alarm` |
//! | sensor active → inactive | `PendingAlarm` | `NoAlarm` |
//! | sensor active → inactive | `Alarm` | `PendingAlarm` |
//! | disarm | any | `NoAlarm` |
//! | arm home | cat last seen | `Alarm` |
//! | cat seen | armed home | `Alarm` |
//! | no cat seen | all sensors inactive | `NoAlarm` |

use std::sync::Arc;

use catpoint_domain::error::CatpointError;
use catpoint_domain::id::ListenerId;
use catpoint_domain::image::Image;
use catpoint_domain::sensor::Sensor;
use catpoint_domain::status::{AlarmStatus, ArmingStatus};
use catpoint_domain::time::now;

use crate::ports::{ImageClassifier, StatusListener, StatusStore};

/// Confidence (percent) the classifier must reach before a frame counts as a cat.
pub const CAT_CONFIDENCE_THRESHOLD: f32 = 50.0;

/// A listener shared between the service and whoever registered it.
pub type SharedListener = Arc<dyn StatusListener + Send + Sync>;

/// Application service coordinating sensors, arming, and cat detection.
pub struct SecurityService<S, C> {
    store: S,
    classifier: C,
    listeners: Vec<(ListenerId, SharedListener)>,
    cat_detected: bool,
}

impl<S, C> SecurityService<S, C>
where
    S: StatusStore,
    C: ImageClassifier,
{
    /// Create a new service backed by the given store and classifier.
    pub fn new(store: S, classifier: C) -> Self {
        Self {
            store,
            classifier,
            listeners: Vec::new(),
            cat_detected: false,
        }
    }

    /// Access the underlying status store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register a listener for every subsequent notification.
    pub fn add_status_listener(&mut self, listener: SharedListener) -> ListenerId {
        let id = ListenerId::new();
        self.listeners.push((id, listener));
        id
    }

    /// Unregister a listener. Returns `false` when `id` was not registered.
    pub fn remove_status_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }

    /// Change the arming status.
    ///
    /// Disarming clears the alarm. Arming resets every sensor to inactive,
    /// and arming at home while a cat was last seen raises the alarm.
    ///
    /// # Errors
    ///
    /// Propagates any status store failure.
    #[tracing::instrument(skip(self))]
    pub fn set_arming_status(&self, status: ArmingStatus) -> Result<(), CatpointError> {
        match status {
            ArmingStatus::Disarmed => self.set_alarm_status(AlarmStatus::NoAlarm)?,
            ArmingStatus::ArmedHome | ArmingStatus::ArmedAway => self.reset_sensors()?,
        }
        self.store.set_arming_status(status)?;

        if status == ArmingStatus::ArmedHome && self.cat_detected {
            tracing::info!("armed at home while a cat is in view");
            self.set_alarm_status(AlarmStatus::Alarm)?;
        }

        self.broadcast(|listener| listener.sensor_status_changed());
        Ok(())
    }

    /// Report a new activation value for `sensor` and update the alarm.
    ///
    /// The previous value is the store's copy when the sensor is known,
    /// otherwise the flag carried by `sensor`. Unknown sensors are upserted.
    /// The updated sensor is always written back, and returned.
    ///
    /// # Errors
    ///
    /// Propagates any status store failure.
    #[tracing::instrument(skip(self, sensor), fields(sensor_name = %sensor.name))]
    pub fn change_sensor_activation_status(
        &self,
        mut sensor: Sensor,
        active: bool,
    ) -> Result<Sensor, CatpointError> {
        let previous = self.stored_activation(&sensor)?;
        match (previous, active) {
            (false, true) => self.handle_sensor_activated()?,
            (true, false) => self.handle_sensor_deactivated()?,
            _ => tracing::debug!(active, "sensor reported unchanged activation"),
        }

        sensor.active = previous;
        sensor.set_active(active, now());
        self.store.update_sensor(sensor.clone())?;
        Ok(sensor)
    }

    /// Re-apply the alarm rules for `sensor` as if its current flag had just
    /// been reported: an active sensor escalates (when armed), an inactive
    /// one de-escalates.
    ///
    /// # Errors
    ///
    /// Propagates any status store failure.
    #[tracing::instrument(skip(self, sensor), fields(sensor_name = %sensor.name))]
    pub fn recheck_sensor_activation(&self, sensor: Sensor) -> Result<Sensor, CatpointError> {
        if sensor.active {
            self.handle_sensor_activated()?;
        } else {
            self.handle_sensor_deactivated()?;
        }
        self.store.update_sensor(sensor.clone())?;
        Ok(sensor)
    }

    /// Classify a camera frame and update the alarm.
    ///
    /// Returns whether a cat was seen. The verdict is remembered for the
    /// next [`set_arming_status`](Self::set_arming_status).
    ///
    /// # Errors
    ///
    /// Propagates classifier and status store failures. A failed
    /// classification leaves the remembered verdict unchanged.
    #[tracing::instrument(
        skip(self, image),
        fields(width = image.width(), height = image.height())
    )]
    pub fn process_image(&mut self, image: &Image) -> Result<bool, CatpointError> {
        let cat = self
            .classifier
            .contains_cat(image, CAT_CONFIDENCE_THRESHOLD)?;
        self.cat_detected = cat;

        if cat {
            if self.store.arming_status()? == ArmingStatus::ArmedHome {
                self.set_alarm_status(AlarmStatus::Alarm)?;
            }
        } else if self.store.sensors()?.iter().all(|sensor| !sensor.active) {
            self.set_alarm_status(AlarmStatus::NoAlarm)?;
        }

        self.broadcast(|listener| listener.cat_detected(cat));
        Ok(cat)
    }

    /// Register a sensor.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Validation`] for an unnamed sensor, or a
    /// storage error from the store.
    #[tracing::instrument(skip(self, sensor), fields(sensor_name = %sensor.name))]
    pub fn add_sensor(&self, sensor: Sensor) -> Result<(), CatpointError> {
        sensor.validate()?;
        self.store.add_sensor(sensor)?;
        self.broadcast(|listener| listener.sensor_status_changed());
        Ok(())
    }

    /// Forget a sensor.
    ///
    /// # Errors
    ///
    /// Propagates any status store failure.
    #[tracing::instrument(skip(self, sensor), fields(sensor_name = %sensor.name))]
    pub fn remove_sensor(&self, sensor: &Sensor) -> Result<(), CatpointError> {
        self.store.remove_sensor(sensor)?;
        self.broadcast(|listener| listener.sensor_status_changed());
        Ok(())
    }

    /// All registered sensors, read through from the store.
    ///
    /// # Errors
    ///
    /// Propagates any status store failure.
    pub fn sensors(&self) -> Result<Vec<Sensor>, CatpointError> {
        self.store.sensors()
    }

    /// Current alarm status, read through from the store.
    ///
    /// # Errors
    ///
    /// Propagates any status store failure.
    pub fn alarm_status(&self) -> Result<AlarmStatus, CatpointError> {
        self.store.alarm_status()
    }

    /// Current arming status, read through from the store.
    ///
    /// # Errors
    ///
    /// Propagates any status store failure.
    pub fn arming_status(&self) -> Result<ArmingStatus, CatpointError> {
        self.store.arming_status()
    }

    /// Verdict of the most recent successful classification.
    #[must_use]
    pub fn cat_detected(&self) -> bool {
        self.cat_detected
    }

    fn stored_activation(&self, sensor: &Sensor) -> Result<bool, CatpointError> {
        Ok(self
            .store
            .sensors()?
            .into_iter()
            .find(|stored| stored == sensor)
            .map_or(sensor.active, |stored| stored.active))
    }

    fn handle_sensor_activated(&self) -> Result<(), CatpointError> {
        if !self.store.arming_status()?.is_armed() {
            tracing::debug!("sensor activated while disarmed");
            return Ok(());
        }
        match self.store.alarm_status()? {
            AlarmStatus::NoAlarm => self.set_alarm_status(AlarmStatus::PendingAlarm),
            AlarmStatus::PendingAlarm => self.set_alarm_status(AlarmStatus::Alarm),
            AlarmStatus::Alarm => Ok(()),
        }
    }

    // Applies whatever the arming status; disarming already forces NoAlarm.
    fn handle_sensor_deactivated(&self) -> Result<(), CatpointError> {
        match self.store.alarm_status()? {
            AlarmStatus::PendingAlarm => self.set_alarm_status(AlarmStatus::NoAlarm),
            AlarmStatus::Alarm => self.set_alarm_status(AlarmStatus::PendingAlarm),
            AlarmStatus::NoAlarm => Ok(()),
        }
    }

    fn reset_sensors(&self) -> Result<(), CatpointError> {
        let at = now();
        for mut sensor in self.store.sensors()? {
            sensor.set_active(false, at);
            self.store.update_sensor(sensor)?;
        }
        Ok(())
    }

    fn set_alarm_status(&self, status: AlarmStatus) -> Result<(), CatpointError> {
        self.store.set_alarm_status(status)?;
        tracing::info!(%status, "alarm status set");
        self.broadcast(|listener| listener.notify(status));
        Ok(())
    }

    fn broadcast(&self, f: impl Fn(&SharedListener)) {
        for (_, listener) in &self.listeners {
            f(listener);
        }
    }
}
