//! Timing parameters of the single-wire exchange.

use crate::error::ConfigError;

/// Length of the host's low wake pulse, in microseconds.
pub const WAKE_PULSE_US: u32 = 18_000;

/// Length of the host's high pulse before releasing the line, in microseconds.
pub const RELEASE_PULSE_US: u32 = 20;

/// Window after release in which the sensor must pull the line low.
pub const RESPONSE_WINDOW_US: u32 = 100;

/// Shortest accepted phase of the sensor's ~80us low/high acknowledgment.
pub const HANDSHAKE_MIN_US: u32 = 40;

/// Longest accepted phase of the sensor's ~80us low/high acknowledgment.
pub const HANDSHAKE_MAX_US: u32 = 120;

/// Maximum time to wait (in microseconds) for the line to change state.
///
/// The longest bit phase is the ~70us high of a `1`, so this leaves plenty of margin.
pub const PHASE_TIMEOUT_US: u32 = 300;

/// Delay after a bit's rising edge at which the line is sampled.
///
/// A `0` bit is high for ~27us and a `1` bit for ~70us.
pub const BIT_SAMPLE_US: u32 = 40;

/// Upper bound on one complete acquisition, wake pulse included.
pub const DEADLINE_US: u32 = 30_000;

/// Minimum interval the caller should leave between two acquisitions.
pub const MIN_READ_INTERVAL_MS: u32 = 2_000;

/// Whether the checksum byte is compared against the data bytes.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChecksumPolicy {
    /// Reject readings whose checksum does not match.
    #[default]
    Enforce,
    /// Return readings as received, corrupted or not.
    Ignore,
}

/// Options to modify the timing of the driver.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Host low pulse that wakes the sensor. At least 1 ms.
    pub wake_pulse_us: u32,
    /// Host high pulse before handing the line to the sensor.
    pub release_pulse_us: u32,
    /// How long to wait for the sensor's acknowledgment after release.
    pub response_window_us: u32,
    /// Bound on every low/high wait of the bit loop.
    pub phase_timeout_us: u32,
    /// Sample point after a bit's rising edge.
    pub bit_sample_us: u32,
    /// Bound on the whole acquisition.
    pub deadline_us: u32,
    pub checksum: ChecksumPolicy,
}

impl Config {
    /// Timing used by the DHT11 reference firmware.
    pub const DHT11: Config = Config {
        wake_pulse_us: WAKE_PULSE_US,
        release_pulse_us: RELEASE_PULSE_US,
        response_window_us: RESPONSE_WINDOW_US,
        phase_timeout_us: PHASE_TIMEOUT_US,
        bit_sample_us: BIT_SAMPLE_US,
        deadline_us: DEADLINE_US,
        checksum: ChecksumPolicy::Enforce,
    };

    /// Checks that the timing can still tell the sensor's phases apart.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wake_pulse_us < 1_000 {
            return Err(ConfigError::WakePulseTooShort);
        }
        // The sensor answers 20-40us after the host's rising edge
        if !(20..=40).contains(&self.release_pulse_us) {
            return Err(ConfigError::ReleasePulseOutOfBand);
        }
        if self.response_window_us < 40 {
            return Err(ConfigError::ResponseWindowTooShort);
        }
        if self.bit_sample_us <= 30 || self.bit_sample_us >= 60 {
            return Err(ConfigError::SamplePointOutOfBand);
        }
        if self.phase_timeout_us < 100 {
            return Err(ConfigError::PhaseTimeoutTooShort);
        }
        let start_sequence = self.wake_pulse_us.saturating_add(self.release_pulse_us);
        if self.deadline_us <= start_sequence {
            return Err(ConfigError::DeadlineTooShort);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::DHT11
    }
}
