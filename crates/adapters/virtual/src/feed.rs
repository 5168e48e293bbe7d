//! Simulated sensor and camera feed.
//!
//! Each tick toggles the next sensor in round-robin order. Every
//! `frame_every` ticks the camera also produces a frame.

use std::time::Duration;

use tokio::sync::mpsc;

use catpoint_app::ports::{ImageClassifier, StatusStore};
use catpoint_app::services::security_service::SecurityService;
use catpoint_domain::error::CatpointError;
use catpoint_domain::id::SensorId;
use catpoint_domain::image::Image;

const FRAME_SIDE: u32 = 16;

/// Something the simulated house reports to the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulatedEvent {
    /// The sensor flipped its activation.
    SensorToggled { sensor_id: SensorId },
    /// The camera captured a frame.
    Frame(Image),
}

impl SimulatedEvent {
    /// Report this event to the security service.
    ///
    /// A toggle flips the stored activation of the sensor; toggles for
    /// sensors that are no longer registered are dropped.
    ///
    /// # Errors
    ///
    /// Propagates status store and classifier failures.
    pub fn apply<S, C>(self, service: &mut SecurityService<S, C>) -> Result<(), CatpointError>
    where
        S: StatusStore,
        C: ImageClassifier,
    {
        match self {
            Self::SensorToggled { sensor_id } => {
                let Some(sensor) = service
                    .sensors()?
                    .into_iter()
                    .find(|sensor| sensor.id == sensor_id)
                else {
                    tracing::warn!(%sensor_id, "toggle for unregistered sensor dropped");
                    return Ok(());
                };
                let active = !sensor.active;
                service.change_sensor_activation_status(sensor, active)?;
            }
            Self::Frame(image) => {
                service.process_image(&image)?;
            }
        }
        Ok(())
    }
}

/// Deterministic event generator for demos and tests.
#[derive(Debug)]
pub struct VirtualFeed {
    sensor_ids: Vec<SensorId>,
    frame_every: u32,
    tick: u64,
    next_sensor: usize,
}

impl VirtualFeed {
    /// Create a feed over the given sensors. `frame_every == 0` disables frames.
    #[must_use]
    pub fn new(sensor_ids: Vec<SensorId>, frame_every: u32) -> Self {
        Self {
            sensor_ids,
            frame_every,
            tick: 0,
            next_sensor: 0,
        }
    }

    /// Advance one tick and return what happened during it.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a frame cannot be built.
    pub fn next_events(&mut self) -> Result<Vec<SimulatedEvent>, CatpointError> {
        self.tick += 1;
        let mut events = Vec::with_capacity(2);

        if let Some(sensor_id) = self.sensor_ids.get(self.next_sensor).copied() {
            events.push(SimulatedEvent::SensorToggled { sensor_id });
            self.next_sensor = (self.next_sensor + 1) % self.sensor_ids.len();
        }

        if self.frame_every != 0 && self.tick.is_multiple_of(u64::from(self.frame_every)) {
            events.push(SimulatedEvent::Frame(self.capture()?));
        }

        Ok(events)
    }

    /// Drive the feed on a tokio interval, sending every event to `sender`.
    ///
    /// Returns once the receiving side is dropped.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a frame cannot be built.
    pub async fn run(
        mut self,
        sender: mpsc::Sender<SimulatedEvent>,
        period: Duration,
    ) -> Result<(), CatpointError> {
        let mut interval = tokio::time::interval(period);
        // The first tick completes immediately.
        interval.tick().await;

        loop {
            interval.tick().await;
            for event in self.next_events()? {
                if sender.send(event).await.is_err() {
                    tracing::debug!(tick = self.tick, "feed receiver dropped");
                    return Ok(());
                }
            }
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn capture(&self) -> Result<Image, CatpointError> {
        let len = (FRAME_SIDE * FRAME_SIDE * 4) as usize;
        let seed = self.tick as u8;
        let pixels = (0..len)
            .map(|i| (i as u8).wrapping_mul(seed).wrapping_add(seed))
            .collect();
        Image::new(FRAME_SIDE, FRAME_SIDE, pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(count: usize) -> Vec<SensorId> {
        (0..count).map(|_| SensorId::new()).collect()
    }

    #[test]
    fn should_toggle_sensors_round_robin() {
        let sensors = ids(2);
        let mut feed = VirtualFeed::new(sensors.clone(), 0);

        let toggled: Vec<SimulatedEvent> = (0..3)
            .flat_map(|_| feed.next_events().unwrap())
            .collect();

        assert_eq!(
            toggled,
            vec![
                SimulatedEvent::SensorToggled {
                    sensor_id: sensors[0]
                },
                SimulatedEvent::SensorToggled {
                    sensor_id: sensors[1]
                },
                SimulatedEvent::SensorToggled {
                    sensor_id: sensors[0]
                },
            ]
        );
    }

    #[test]
    fn should_emit_frame_every_nth_tick() {
        let mut feed = VirtualFeed::new(Vec::new(), 3);

        let frames: Vec<usize> = (0..6).map(|_| feed.next_events().unwrap().len()).collect();

        assert_eq!(frames, vec![0, 0, 1, 0, 0, 1]);
    }

    #[test]
    fn should_vary_frames_between_captures() {
        let mut feed = VirtualFeed::new(Vec::new(), 1);
        let first = feed.next_events().unwrap();
        let second = feed.next_events().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn should_emit_nothing_without_sensors_or_frames() {
        let mut feed = VirtualFeed::new(Vec::new(), 0);
        assert!(feed.next_events().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn should_send_events_until_receiver_dropped() {
        let sensors = ids(1);
        let feed = VirtualFeed::new(sensors.clone(), 2);
        let (tx, mut rx) = mpsc::channel(8);
        let handle = tokio::spawn(feed.run(tx, Duration::from_millis(100)));

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        let third = rx.recv().await.unwrap();
        drop(rx);

        assert_eq!(
            first,
            SimulatedEvent::SensorToggled {
                sensor_id: sensors[0]
            }
        );
        assert_eq!(first, second);
        assert!(matches!(third, SimulatedEvent::Frame(_)));
        assert!(handle.await.unwrap().is_ok());
    }
}
