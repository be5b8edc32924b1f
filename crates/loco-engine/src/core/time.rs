/// Fixed timestep accumulator.
/// Ensures simulation ticks run at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt;
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time in whole microseconds.
    pub fn dt_us(&self) -> u64 {
        (self.dt as f64 * 1_000_000.0).round() as u64
    }

    /// Drop any partially accumulated frame time.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Session clock advanced once per simulation tick.
///
/// Kept in integer microseconds so that every timer in the simulation
/// (cooldowns, hold durations, delayed removals) is reproducible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimClock {
    elapsed_us: u64,
    ticks: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt_us: u64) {
        self.elapsed_us += dt_us;
        self.ticks += 1;
    }

    /// Session time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.elapsed_us / 1000
    }

    /// Number of ticks since the session started.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Integer cadence for a periodic system running inside the base tick.
///
/// Accumulates tick time and reports how many times the system is due, so a
/// 40 ms gravity step stays a 40 ms step whatever the base tick is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    period_us: u64,
    accumulator_us: u64,
}

impl Cadence {
    /// Most runs a single tick may request.
    pub const MAX_RUNS_PER_TICK: u32 = 10;

    pub fn from_millis(period_ms: f64) -> Self {
        let period_us = (period_ms * 1000.0).round().max(1.0) as u64;
        Self {
            period_us,
            accumulator_us: 0,
        }
    }

    /// Add tick time; returns how many runs are due.
    pub fn accumulate(&mut self, dt_us: u64) -> u32 {
        self.accumulator_us += dt_us;
        let runs = (self.accumulator_us / self.period_us).min(Self::MAX_RUNS_PER_TICK as u64);
        self.accumulator_us = (self.accumulator_us - runs * self.period_us) % self.period_us;
        runs as u32
    }
}
