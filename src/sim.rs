//! Simulated sensor sharing one timeline between a fake line and a fake clock.
//!
//! Every clock read advances simulated time by one microsecond. Once the
//! host releases the line, the sensor's waveform is played back from the
//! release instant; after the waveform ends the line sits at the idle level.

use std::{cell::RefCell, rc::Rc};

use embedded_hal::digital::PinState;

use crate::{clock::Clock, line::Line};

/// Nominal sensor timings, in microseconds.
pub const RESPONSE_DELAY_US: u32 = 10;
pub const HANDSHAKE_LOW_US: u32 = 80;
pub const HANDSHAKE_HIGH_US: u32 = 80;
pub const BIT_LOW_US: u32 = 50;
pub const ZERO_HIGH_US: u32 = 27;
pub const ONE_HIGH_US: u32 = 70;

/// A constant line level held for a number of microseconds.
pub type Segment = (PinState, u32);

/// Something the host did to the line, with its timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostEvent {
    Drive(PinState, u32),
    Release(u32),
}

#[derive(Debug, PartialEq, Eq)]
pub struct SimError;

struct Bus {
    now: u32,
    released_at: Option<u32>,
    driven: PinState,
    waveform: Vec<Segment>,
    idle: PinState,
    events: Vec<HostEvent>,
}

impl Bus {
    fn level(&self) -> PinState {
        let Some(released_at) = self.released_at else {
            return self.driven;
        };
        let mut t = self.now.wrapping_sub(released_at);
        for &(level, duration) in &self.waveform {
            if t < duration {
                return level;
            }
            t -= duration;
        }
        self.idle
    }
}

pub struct SimLine(Rc<RefCell<Bus>>);

pub struct SimClock(Rc<RefCell<Bus>>);

/// Creates a line and clock that play back `waveform` after release.
pub fn sensor(waveform: Vec<Segment>, idle: PinState) -> (SimLine, SimClock) {
    sensor_at(0, waveform, idle)
}

/// Like [`sensor`], with the clock starting at `now`.
pub fn sensor_at(now: u32, waveform: Vec<Segment>, idle: PinState) -> (SimLine, SimClock) {
    let bus = Rc::new(RefCell::new(Bus {
        now,
        released_at: None,
        driven: PinState::High,
        waveform,
        idle,
        events: Vec::new(),
    }));
    (SimLine(bus.clone()), SimClock(bus))
}

impl SimLine {
    pub fn events(&self) -> Vec<HostEvent> {
        self.0.borrow().events.clone()
    }
}

impl SimClock {
    pub fn now(&self) -> u32 {
        self.0.borrow().now
    }
}

impl Line for SimLine {
    type Error = SimError;

    fn set_output(&mut self, level: PinState) -> Result<(), SimError> {
        let mut bus = self.0.borrow_mut();
        let now = bus.now;
        bus.released_at = None;
        bus.driven = level;
        bus.events.push(HostEvent::Drive(level, now));
        Ok(())
    }

    fn set_input(&mut self) -> Result<(), SimError> {
        let mut bus = self.0.borrow_mut();
        let now = bus.now;
        bus.released_at = Some(now);
        bus.events.push(HostEvent::Release(now));
        Ok(())
    }

    fn read_level(&mut self) -> Result<PinState, SimError> {
        Ok(self.0.borrow().level())
    }
}

impl Clock for SimClock {
    fn now_us(&mut self) -> u32 {
        let mut bus = self.0.borrow_mut();
        bus.now = bus.now.wrapping_add(1);
        bus.now
    }
}

/// Sensor acknowledgment: short delay, then low 80us and high 80us.
pub fn handshake() -> Vec<Segment> {
    vec![
        (PinState::High, RESPONSE_DELAY_US),
        (PinState::Low, HANDSHAKE_LOW_US),
        (PinState::High, HANDSHAKE_HIGH_US),
    ]
}

/// One data bit: the low separator followed by a high pulse of `high_us`.
pub fn bit(high_us: u32) -> [Segment; 2] {
    [(PinState::Low, BIT_LOW_US), (PinState::High, high_us)]
}

/// Bits of `bytes` MSB first, with the given high widths for 0 and 1.
pub fn data_bits(bytes: &[u8], zero_us: u32, one_us: u32) -> Vec<Segment> {
    bytes
        .iter()
        .flat_map(|byte| (0..8).map(move |i| (byte >> (7 - i)) & 1))
        .flat_map(|b| bit(if b == 1 { one_us } else { zero_us }))
        .collect()
}

/// Full transmission of `bytes` with nominal pulse widths, ending with the
/// sensor's final low before it lets the line float high.
pub fn transmission(bytes: &[u8; 5]) -> Vec<Segment> {
    transmission_with_widths(bytes, ZERO_HIGH_US, ONE_HIGH_US)
}

pub fn transmission_with_widths(bytes: &[u8; 5], zero_us: u32, one_us: u32) -> Vec<Segment> {
    let mut waveform = handshake();
    waveform.extend(data_bits(bytes, zero_us, one_us));
    waveform.push((PinState::Low, BIT_LOW_US));
    waveform
}
