//! Single-wire Protocol Driver for DHT-family Sensors
//!
//! This crate provides a platform-agnostic driver for DHT11/DHT22-style
//! temperature and humidity sensors, built on top of the [`embedded-hal`] traits.
//! It bit-bangs the sensor's single-wire protocol: the host start pulse, the
//! sensor's response handshake, and the 40-bit pulse-width encoded payload.
//!
//! # Features
//! - Blocking synchronous API; every wait is bounded by a timeout
//! - Checksum validation (can be turned off via [`ChecksumPolicy::Ignore`])
//! - Designed for `no_std` environments
//! - Optional logging support via `defmt`
//!
//! # Dependencies
//! The driver needs two collaborators, owned exclusively for its lifetime:
//! - a [`Line`], e.g. an [`OpenDrainLine`] over an `embedded-hal`
//!   [`InputPin`] + [`OutputPin`]
//! - a microsecond [`Clock`]
//!
//! # Optional Features
//! - `defmt`: Implements `defmt::Format` and emits driver logs via `defmt`
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//! [`InputPin`]: embedded_hal::digital::InputPin
//! [`OutputPin`]: embedded_hal::digital::OutputPin

#![cfg_attr(not(test), no_std)]

mod fmt;

pub mod clock;
pub mod config;
pub mod error;
pub mod line;
pub mod protocol;
pub mod reading;
pub mod report;

#[cfg(test)]
mod sim;

pub use clock::{Clock, ClockDelay, Stopwatch};
pub use config::{ChecksumPolicy, Config, MIN_READ_INTERVAL_MS};
pub use error::{ConfigError, DhtError};
pub use line::{Line, OpenDrainLine};
pub use protocol::Dht;
pub use reading::{Measurement, Reading};
pub use report::write_report;
