/// Possible errors from a DHT acquisition.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq)]
pub enum DhtError<E> {
    /// The sensor never pulled the line low after the start pulse was released.
    NoResponse,
    /// Timed out waiting for a line state change during the handshake or a bit.
    Timeout,
    /// Checksum did not match the received data.
    ChecksumMismatch,
    /// Error from the GPIO line (input/output).
    PinError(E),
}

impl<E> From<E> for DhtError<E> {
    fn from(value: E) -> Self {
        Self::PinError(value)
    }
}

/// Rejected [`Config`](crate::Config) values.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The wake pulse is shorter than the sensor's 1 ms minimum.
    WakePulseTooShort,
    /// The host's release pulse is outside 20-40 us, so the sensor's
    /// acknowledgment would overlap it.
    ReleasePulseOutOfBand,
    /// The response window closes before the sensor can acknowledge.
    ResponseWindowTooShort,
    /// The sample point does not separate a 0 bit (~27 us) from a 1 bit (~70 us).
    SamplePointOutOfBand,
    /// The per-phase timeout is shorter than the longest protocol phase.
    PhaseTimeoutTooShort,
    /// The acquisition deadline expires before the start sequence completes.
    DeadlineTooShort,
}
