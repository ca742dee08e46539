use embedded_hal::{delay::DelayNs, digital::PinState};

use crate::{
    clock::{Clock, ClockDelay, Stopwatch, wait_us},
    config::{ChecksumPolicy, Config, HANDSHAKE_MAX_US, HANDSHAKE_MIN_US},
    error::{ConfigError, DhtError},
    line::Line,
    reading::Reading,
};

/// Driver for a DHT-family temperature and humidity sensor.
///
/// The driver owns its line and clock for its whole lifetime; nothing else
/// may touch them while a reading is in progress.
pub struct Dht<L, C> {
    line: L,
    clock: C,
    config: Config,
    acquisition: Stopwatch,
}

/// Progress through one data bit.
enum BitPhase<E> {
    /// Line is low: the separator before the bit's pulse.
    WaitLow,
    /// Rising edge seen; sample once the reference delay has passed.
    Sample,
    /// Line still high after sampling; consume the rest of the pulse.
    WaitHigh,
    Done(bool),
    Failed(DhtError<E>),
}

impl<L, C, E> Dht<L, C>
where
    L: Line<Error = E>,
    C: Clock,
{
    /// Creates a new instance of the driver with the default timing.
    ///
    /// # Arguments
    ///
    /// * `line` - The data line, switchable between output and input.
    /// * `clock` - A free-running microsecond clock.
    pub fn new(line: L, mut clock: C) -> Self {
        let acquisition = Stopwatch::start(&mut clock);
        Dht {
            line,
            clock,
            config: Config::default(),
            acquisition,
        }
    }

    /// Creates a driver with custom timing, rejecting configs that cannot
    /// tell the protocol phases apart.
    pub fn with_config(line: L, clock: C, config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut dht = Dht::new(line, clock);
        dht.config = config;
        Ok(dht)
    }

    /// Timing the driver was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Gives back the line and clock.
    pub fn release(self) -> (L, C) {
        (self.line, self.clock)
    }

    /// Reads one snapshot from the sensor.
    ///
    /// This method performs the complete communication sequence:
    /// sending the start signal, checking the sensor's response,
    /// reading 5 bytes and validating the checksum.
    ///
    /// Blocks for about 20 ms, most of it in the wake pulse. The sensor
    /// needs [`MIN_READ_INTERVAL_MS`](crate::MIN_READ_INTERVAL_MS) between
    /// calls; spacing them is up to the caller.
    ///
    /// # Returns
    ///
    /// * `Ok(Reading)` if the read is successful and the checksum is accepted.
    /// * `Err(DhtError)` if the sensor is absent, stalls, or the data is corrupt.
    pub fn acquire_reading(&mut self) -> Result<Reading, DhtError<E>> {
        self.acquisition.reset(&mut self.clock);

        self.start()?;
        self.handshake()?;

        let mut bytes = [0; 5];
        for b in bytes.iter_mut() {
            *b = self.read_byte()?;
        }

        let reading = Reading::from_bytes(bytes);
        if self.config.checksum == ChecksumPolicy::Enforce && !reading.is_checksum_valid() {
            warn!(
                "checksum mismatch: got {=u8:#x}, expected {=u8:#x}",
                reading.checksum,
                reading.expected_checksum()
            );
            return Err(DhtError::ChecksumMismatch);
        }

        debug!("reading {}", reading);
        Ok(reading)
    }

    /// Sends the start signal: the wake pulse, a short high, then release.
    fn start(&mut self) -> Result<(), DhtError<E>> {
        trace!("wake pulse {=u32}us", self.config.wake_pulse_us);
        self.line.set_output(PinState::Low)?;
        ClockDelay::new(&mut self.clock).delay_us(self.config.wake_pulse_us);

        self.line.set_output(PinState::High)?;
        wait_us(&mut self.clock, self.config.release_pulse_us);

        // Hand the line to the sensor
        self.line.set_input()?;
        Ok(())
    }

    /// Waits for the sensor's acknowledgment: low ~80us, then high ~80us.
    ///
    /// Each phase must last between [`HANDSHAKE_MIN_US`] and
    /// [`HANDSHAKE_MAX_US`]. Returns with the line low at the start of the
    /// first bit.
    fn handshake(&mut self) -> Result<(), DhtError<E>> {
        match self.wait_while(PinState::High, self.config.response_window_us) {
            Ok(_) => {}
            Err(DhtError::Timeout) => {
                warn!("no response after release");
                return Err(DhtError::NoResponse);
            }
            Err(e) => return Err(e),
        }

        // A low shorter than the acknowledgment is a glitch, not the sensor
        let low_us = match self.wait_while(PinState::Low, HANDSHAKE_MAX_US) {
            Ok(low_us) if low_us >= HANDSHAKE_MIN_US => low_us,
            Ok(low_us) => {
                warn!("acknowledgment low too short: {=u32}us", low_us);
                return Err(DhtError::NoResponse);
            }
            Err(e) => return Err(e),
        };

        let high_us = self.wait_while(PinState::High, HANDSHAKE_MAX_US)?;
        if high_us < HANDSHAKE_MIN_US {
            warn!("acknowledgment high too short: {=u32}us", high_us);
            return Err(DhtError::Timeout);
        }

        trace!("handshake low {=u32}us high {=u32}us", low_us, high_us);
        Ok(())
    }

    /// Reads one byte, most significant bit first.
    fn read_byte(&mut self) -> Result<u8, DhtError<E>> {
        let mut byte: u8 = 0;

        for i in 0..8 {
            let bit_mask = 1 << (7 - i);
            if self.read_bit()? {
                byte |= bit_mask;
            }
        }

        Ok(byte)
    }

    /// Reads a single bit from the sensor.
    ///
    /// The bit is carried by the width of the high pulse that follows the
    /// low separator: still high at the sample point means `1`.
    fn read_bit(&mut self) -> Result<bool, DhtError<E>> {
        let timeout_us = self.config.phase_timeout_us;
        let mut phase = BitPhase::WaitLow;
        loop {
            phase = match phase {
                BitPhase::WaitLow => match self.wait_while(PinState::Low, timeout_us) {
                    Ok(_) => BitPhase::Sample,
                    Err(e) => BitPhase::Failed(e),
                },
                BitPhase::Sample => {
                    wait_us(&mut self.clock, self.config.bit_sample_us);
                    match self.line.read_level() {
                        Ok(PinState::High) => BitPhase::WaitHigh,
                        Ok(PinState::Low) => BitPhase::Done(false),
                        Err(e) => BitPhase::Failed(DhtError::PinError(e)),
                    }
                }
                BitPhase::WaitHigh => match self.wait_while(PinState::High, timeout_us) {
                    Ok(_) => BitPhase::Done(true),
                    Err(e) => BitPhase::Failed(e),
                },
                BitPhase::Done(bit) => return Ok(bit),
                BitPhase::Failed(e) => {
                    warn!("bit read failed");
                    return Err(e);
                }
            };
        }
    }

    /// Polls until the line leaves `level`.
    ///
    /// # Returns
    ///
    /// * `Ok(u32)` with the time spent at `level`, in microseconds
    /// * `Err(DhtError::Timeout)` past `timeout_us` or the acquisition deadline
    fn wait_while(&mut self, level: PinState, timeout_us: u32) -> Result<u32, DhtError<E>> {
        let phase = Stopwatch::start(&mut self.clock);
        loop {
            let now = self.clock.now_us();
            let elapsed = phase.elapsed_at(now);
            if self.line.read_level()? != level {
                return Ok(elapsed);
            }
            if elapsed > timeout_us || self.acquisition.elapsed_at(now) > self.config.deadline_us {
                trace!("line held {} for {=u32}us", level, elapsed);
                return Err(DhtError::Timeout);
            }
        }
    }
}
