//! Sensor: a door, window, or motion contact reporting an active flag.
//!
//! Identity is the [`SensorId`]: two sensors are equal (and hash equally)
//! when their ids match, whatever their name or active flag. Toggling a
//! sensor in place therefore never changes its set membership.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{CatpointError, ValidationError};
use crate::id::SensorId;
use crate::time::Timestamp;

/// Kind of physical contact a sensor watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorType {
    Door,
    Window,
    Motion,
}

impl std::fmt::Display for SensorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Door => f.write_str("door"),
            Self::Window => f.write_str("window"),
            Self::Motion => f.write_str("motion"),
        }
    }
}

/// A registered sensor and its last reported activation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    pub id: SensorId,
    pub name: String,
    pub sensor_type: SensorType,
    pub active: bool,
    pub last_changed: Option<Timestamp>,
}

impl Sensor {
    /// Create a builder for constructing a [`Sensor`].
    #[must_use]
    pub fn builder() -> SensorBuilder {
        SensorBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), CatpointError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }

    /// Key ordering sensors the way the panel lists them: name, type, then id.
    #[must_use]
    pub fn panel_key(&self) -> (&str, SensorType, SensorId) {
        (&self.name, self.sensor_type, self.id)
    }

    /// Set the active flag, bumping `last_changed` only on a real flip.
    pub fn set_active(&mut self, active: bool, at: Timestamp) {
        if self.active != active {
            self.last_changed = Some(at);
        }
        self.active = active;
    }
}

impl PartialEq for Sensor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Sensor {}

impl Hash for Sensor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Step-by-step builder for [`Sensor`].
#[derive(Debug, Default)]
pub struct SensorBuilder {
    id: Option<SensorId>,
    name: Option<String>,
    sensor_type: Option<SensorType>,
    active: bool,
}

impl SensorBuilder {
    #[must_use]
    pub fn id(mut self, id: SensorId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn sensor_type(mut self, sensor_type: SensorType) -> Self {
        self.sensor_type = Some(sensor_type);
        self
    }

    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Consume the builder, validate, and return a [`Sensor`].
    ///
    /// Defaults to a [`SensorType::Door`] when no type is given.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<Sensor, CatpointError> {
        let sensor = Sensor {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            sensor_type: self.sensor_type.unwrap_or(SensorType::Door),
            active: self.active,
            last_changed: None,
        };
        sensor.validate()?;
        Ok(sensor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn front_door() -> Sensor {
        Sensor::builder()
            .name("Front Door")
            .sensor_type(SensorType::Door)
            .build()
            .unwrap()
    }

    #[test]
    fn should_build_inactive_sensor_by_default() {
        let sensor = front_door();
        assert_eq!(sensor.name, "Front Door");
        assert_eq!(sensor.sensor_type, SensorType::Door);
        assert!(!sensor.active);
        assert!(sensor.last_changed.is_none());
    }

    #[test]
    fn should_return_validation_error_when_name_is_blank() {
        let result = Sensor::builder().name("   ").build();
        assert!(matches!(
            result,
            Err(CatpointError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_keep_set_membership_when_toggled() {
        let mut sensor = front_door();
        let mut set = HashSet::new();
        set.insert(sensor.clone());

        sensor.set_active(true, crate::time::now());
        assert!(set.contains(&sensor));
        assert!(!set.insert(sensor));
    }

    #[test]
    fn should_distinguish_sensors_with_same_name_and_type() {
        let a = front_door();
        let b = front_door();
        assert_ne!(a, b);
    }

    #[test]
    fn should_bump_last_changed_only_on_flip() {
        let mut sensor = front_door();
        let at = crate::time::now();

        sensor.set_active(false, at);
        assert!(sensor.last_changed.is_none());

        sensor.set_active(true, at);
        assert_eq!(sensor.last_changed, Some(at));
    }

    #[test]
    fn should_order_by_name_then_type() {
        let window = Sensor::builder()
            .name("Attic")
            .sensor_type(SensorType::Window)
            .build()
            .unwrap();
        let door = Sensor::builder()
            .name("Attic")
            .sensor_type(SensorType::Door)
            .build()
            .unwrap();
        let mut sensors = vec![front_door(), window.clone(), door.clone()];
        sensors.sort_by(|a, b| a.panel_key().cmp(&b.panel_key()));

        assert_eq!(sensors[0].id, door.id);
        assert_eq!(sensors[1].id, window.id);
        assert_eq!(sensors[2].name, "Front Door");
    }

    #[test]
    fn should_deserialize_lowercase_sensor_type() {
        let parsed: SensorType = serde_json::from_str("\"motion\"").unwrap();
        assert_eq!(parsed, SensorType::Motion);
    }
}
