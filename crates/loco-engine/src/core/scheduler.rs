//! Periodic system registry for one game session.
//!
//! Every recurring update (gravity, AI, collisions, win/lose checks, ...) is
//! registered here with its own cadence. The owning game runs its systems in
//! a fixed order each tick, asking the scheduler how often each one is due.
//! On win, lose or reset every handle is drained in one call.

use crate::core::error::EngineError;
use crate::core::time::Cadence;

/// Handle to a registered periodic system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SystemHandle(u32);

#[derive(Debug, Clone)]
struct PeriodicSystem {
    handle: SystemHandle,
    name: &'static str,
    cadence: Cadence,
    due: u32,
}

/// Tracks all active periodic systems of a session.
#[derive(Debug, Default)]
pub struct Scheduler {
    systems: Vec<PeriodicSystem>,
    next_handle: u32,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a system running every `period_ms` milliseconds.
    pub fn register(&mut self, name: &'static str, period_ms: f64) -> SystemHandle {
        let handle = SystemHandle(self.next_handle);
        self.next_handle += 1;
        self.systems.push(PeriodicSystem {
            handle,
            name,
            cadence: Cadence::from_millis(period_ms),
            due: 0,
        });
        log::debug!("scheduler: registered {} every {:.2} ms", name, period_ms);
        handle
    }

    /// Advance every cadence by one base tick.
    pub fn advance(&mut self, dt_us: u64) {
        for system in &mut self.systems {
            system.due = system.cadence.accumulate(dt_us);
        }
    }

    /// How many times `handle` runs this tick. Cancelled handles report 0.
    pub fn due(&self, handle: SystemHandle) -> u32 {
        self.systems
            .iter()
            .find(|s| s.handle == handle)
            .map(|s| s.due)
            .unwrap_or(0)
    }

    /// Whether `handle` is still registered.
    pub fn is_active(&self, handle: SystemHandle) -> bool {
        self.systems.iter().any(|s| s.handle == handle)
    }

    /// Stop a single system. Returns false if it was already gone.
    pub fn cancel(&mut self, handle: SystemHandle) -> bool {
        match self.systems.iter().position(|s| s.handle == handle) {
            Some(idx) => {
                let system = self.systems.remove(idx);
                log::debug!("scheduler: cancelled {}", system.name);
                true
            }
            None => false,
        }
    }

    /// Stop every system. Returns how many were drained; a second call
    /// drains nothing.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.systems.len();
        self.systems.clear();
        if count > 0 {
            log::debug!("scheduler: drained {} system(s)", count);
        }
        count
    }

    pub fn active_count(&self) -> usize {
        self.systems.len()
    }

    /// Names of the still-active systems, in registration order.
    pub fn active_names(&self) -> Vec<&'static str> {
        self.systems.iter().map(|s| s.name).collect()
    }

    /// Verify teardown left nothing behind.
    pub fn ensure_drained(&self) -> Result<(), EngineError> {
        if self.systems.is_empty() {
            Ok(())
        } else {
            Err(EngineError::SchedulerLeak {
                count: self.systems.len(),
            })
        }
    }
}
