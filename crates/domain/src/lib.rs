//! # catpoint-domain
//!
//! Pure domain model for the catpoint home security panel.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Sensors** (door, window and motion contacts with an active flag)
//! - Define the **ArmingStatus** chosen by the occupant and the derived **AlarmStatus**
//! - Define **Images** (camera frames handed to the image classifier)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod image;
pub mod sensor;
pub mod status;
