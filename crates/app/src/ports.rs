//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.
//!
//! All ports are synchronous: the security service runs every operation to
//! completion without suspending.

pub mod image_classifier;
pub mod status_listener;
pub mod status_store;

pub use image_classifier::ImageClassifier;
pub use status_listener::StatusListener;
pub use status_store::StatusStore;
