/// Tracks simulation time: a monotonic step counter and elapsed seconds.
///
/// Every step covers the same fixed delta, so two runs with the same inputs
/// see identical timestamps.
#[derive(Debug, Clone)]
pub struct SimClock {
    tick: u64,
    fixed_delta: f32,
    elapsed: f64,
}

impl SimClock {
    /// Create a new clock at tick 0 advancing `fixed_delta` seconds per tick.
    pub fn new(fixed_delta: f32) -> Self {
        Self {
            tick: 0,
            fixed_delta,
            elapsed: 0.0,
        }
    }

    /// Advance the clock by one tick. Returns the new tick number.
    pub fn advance(&mut self) -> u64 {
        self.tick += 1;
        self.elapsed += f64::from(self.fixed_delta);
        self.tick
    }

    /// Return the current tick number.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Seconds covered by one tick.
    pub fn fixed_delta(&self) -> f32 {
        self.fixed_delta
    }

    /// Total elapsed seconds since simulation start.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}
