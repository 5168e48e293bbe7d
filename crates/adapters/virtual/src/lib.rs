//! # catpoint-adapter-virtual
//!
//! Virtual/demo adapter that stands in for the camera, the vision backend,
//! and the physical sensors.
//!
//! ## Provided pieces
//!
//! | Type | Port / role | Behaviour |
//! |------|-------------|-----------|
//! | [`FakeImageClassifier`] | `ImageClassifier` | Stable pseudo-confidence derived from the frame bytes |
//! | [`VirtualFeed`] | event source | Toggles sensors round-robin and emits camera frames on a tokio interval |
//!
//! ## Dependency rule
//!
//! Depends on `catpoint-app` (port traits) and `catpoint-domain` only.

mod classifier;
mod feed;

pub use classifier::FakeImageClassifier;
pub use feed::{SimulatedEvent, VirtualFeed};
