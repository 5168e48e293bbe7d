//! # catpoint-app
//!
//! Application layer: the alarm coordinator and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `StatusStore`: arming status, alarm status, and the sensor set
//!   - `ImageClassifier`: judges whether a camera frame shows a cat
//!   - `StatusListener`: observers notified of status changes
//! - Define the **driving/inbound** use-case struct:
//!   - `SecurityService`: sensor activation, arming, image processing
//! - Orchestrate domain objects without knowing *how* persistence or vision works
//!
//! ## Dependency rule
//! Depends on `catpoint-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
