//! Microsecond time base used for both the wake pulse and per-bit timing.

use embedded_hal::delay::DelayNs;

/// A free-running microsecond counter.
///
/// The counter may wrap at `u32::MAX`; all intervals are computed with
/// wrapping arithmetic so a wrap in the middle of a measurement is harmless.
pub trait Clock {
    /// Current counter value in microseconds.
    fn now_us(&mut self) -> u32;
}

impl<T: Clock + ?Sized> Clock for &mut T {
    fn now_us(&mut self) -> u32 {
        T::now_us(self)
    }
}

/// Measures elapsed time from a reference point on a [`Clock`].
#[derive(Clone, Copy, Debug)]
pub struct Stopwatch {
    start: u32,
}

impl Stopwatch {
    /// Starts a stopwatch at the clock's current value.
    pub fn start<C: Clock>(clock: &mut C) -> Self {
        Stopwatch {
            start: clock.now_us(),
        }
    }

    /// Moves the reference point to the clock's current value.
    pub fn reset<C: Clock>(&mut self, clock: &mut C) {
        self.start = clock.now_us();
    }

    /// Microseconds since the last start or reset.
    pub fn elapsed_us<C: Clock>(&self, clock: &mut C) -> u32 {
        self.elapsed_at(clock.now_us())
    }

    /// Microseconds between the reference point and an already-sampled `now`.
    pub fn elapsed_at(&self, now: u32) -> u32 {
        now.wrapping_sub(self.start)
    }
}

/// Spins until `us` microseconds have elapsed on `clock`.
pub fn wait_us<C: Clock>(clock: &mut C, us: u32) {
    let stopwatch = Stopwatch::start(clock);
    while stopwatch.elapsed_us(clock) < us {
        core::hint::spin_loop();
    }
}

/// Blocking [`DelayNs`] implementation that busy-waits on a [`Clock`].
///
/// Resolution is one microsecond; nanosecond requests are rounded up.
pub struct ClockDelay<C> {
    clock: C,
}

impl<C: Clock> ClockDelay<C> {
    /// Creates a delay provider backed by `clock`.
    pub fn new(clock: C) -> Self {
        ClockDelay { clock }
    }

    /// Returns the underlying clock.
    pub fn release(self) -> C {
        self.clock
    }
}

impl<C: Clock> DelayNs for ClockDelay<C> {
    fn delay_ns(&mut self, ns: u32) {
        wait_us(&mut self.clock, ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        wait_us(&mut self.clock, us);
    }

    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            wait_us(&mut self.clock, 1_000);
        }
    }
}
