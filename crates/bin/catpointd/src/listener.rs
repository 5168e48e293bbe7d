//! Status listener that reports every notification through `tracing`.

use catpoint_app::ports::StatusListener;
use catpoint_domain::status::AlarmStatus;

/// Logs alarm changes, cat sightings, and sensor list changes.
pub struct TracingStatusListener;

impl StatusListener for TracingStatusListener {
    fn notify(&self, status: AlarmStatus) {
        match status {
            AlarmStatus::Alarm => {
                tracing::warn!(%status, description = status.description(), "alarm raised");
            }
            AlarmStatus::NoAlarm | AlarmStatus::PendingAlarm => {
                tracing::info!(%status, description = status.description(), "alarm status");
            }
        }
    }

    fn cat_detected(&self, detected: bool) {
        if detected {
            tracing::info!("cat in view");
        } else {
            tracing::debug!("no cat in view");
        }
    }

    fn sensor_status_changed(&self) {
        tracing::debug!("sensor panel refreshed");
    }
}
