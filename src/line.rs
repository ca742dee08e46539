//! The single bidirectional data line shared by host and sensor.

use embedded_hal::digital::{InputPin, OutputPin, PinState};

/// A GPIO line that can be driven by the host or released to the sensor.
///
/// Implementations carry no protocol knowledge. Each call must take effect
/// within a few microseconds, since the protocol phases are tens of
/// microseconds long.
pub trait Line {
    /// Error type of the underlying pin.
    type Error;

    /// Drives the line (push-pull) at `level`.
    fn set_output(&mut self, level: PinState) -> Result<(), Self::Error>;

    /// Stops driving the line so the sensor can pull it.
    fn set_input(&mut self) -> Result<(), Self::Error>;

    /// Samples the current line level.
    fn read_level(&mut self) -> Result<PinState, Self::Error>;
}

impl<T: Line + ?Sized> Line for &mut T {
    type Error = T::Error;

    fn set_output(&mut self, level: PinState) -> Result<(), Self::Error> {
        T::set_output(self, level)
    }

    fn set_input(&mut self) -> Result<(), Self::Error> {
        T::set_input(self)
    }

    fn read_level(&mut self) -> Result<PinState, Self::Error> {
        T::read_level(self)
    }
}

/// [`Line`] over an `embedded-hal` pin wired open-drain with a pull-up.
///
/// Releasing the line is the same as writing high: the pull-up holds the
/// line high until the sensor pulls it low.
pub struct OpenDrainLine<P> {
    pin: P,
}

impl<P, E> OpenDrainLine<P>
where
    P: InputPin<Error = E> + OutputPin<Error = E>,
{
    /// Wraps an open-drain pin.
    pub fn new(pin: P) -> Self {
        OpenDrainLine { pin }
    }

    /// Returns the wrapped pin.
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P, E> Line for OpenDrainLine<P>
where
    P: InputPin<Error = E> + OutputPin<Error = E>,
{
    type Error = E;

    fn set_output(&mut self, level: PinState) -> Result<(), E> {
        self.pin.set_state(level)
    }

    fn set_input(&mut self) -> Result<(), E> {
        self.pin.set_high()
    }

    fn read_level(&mut self) -> Result<PinState, E> {
        Ok(PinState::from(self.pin.is_high()?))
    }
}
