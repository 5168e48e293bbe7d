//! Status listener port: observers of the security service.
//!
//! Listeners are called synchronously, in registration order, before the
//! triggering operation returns.

use catpoint_domain::status::AlarmStatus;

/// Receives status notifications from the security service.
pub trait StatusListener {
    /// The alarm status was written.
    ///
    /// Called for every write, so `status` may repeat the previous value.
    fn notify(&self, status: AlarmStatus);

    /// An image was classified.
    fn cat_detected(&self, _detected: bool) {}

    /// A sensor was added or removed, or the arming status changed.
    fn sensor_status_changed(&self) {}
}
