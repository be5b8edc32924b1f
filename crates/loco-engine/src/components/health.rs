//! Energy, damage rate-limit and flinch window.

/// Minimum gap between two damaging hits, in ms.
pub const DEFAULT_HIT_COOLDOWN_MS: u64 = 1;
/// How long an entity counts as hurt after a hit, in ms.
pub const DEFAULT_HURT_WINDOW_MS: u64 = 500;

/// Result of a `Health::hit` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Inside the cooldown, or already dead.
    Ignored,
    /// Energy dropped but the entity is still alive.
    Hurt,
    /// This hit took the last point of energy.
    Killed,
}

/// Health component. `energy` only ever decreases; zero means dead.
#[derive(Debug, Clone, PartialEq)]
pub struct Health {
    energy: u32,
    max_energy: u32,
    last_hit_ms: Option<u64>,
    /// Damage rate-limit. Kept separate from the flinch window on purpose.
    pub hit_cooldown_ms: u64,
    /// Animation flinch window.
    pub hurt_window_ms: u64,
}

impl Health {
    pub fn new(energy: u32) -> Self {
        Self {
            energy,
            max_energy: energy,
            last_hit_ms: None,
            hit_cooldown_ms: DEFAULT_HIT_COOLDOWN_MS,
            hurt_window_ms: DEFAULT_HURT_WINDOW_MS,
        }
    }

    pub fn with_hit_cooldown(mut self, ms: u64) -> Self {
        self.hit_cooldown_ms = ms;
        self
    }

    pub fn energy(&self) -> u32 {
        self.energy
    }

    pub fn max_energy(&self) -> u32 {
        self.max_energy
    }

    pub fn last_hit_ms(&self) -> Option<u64> {
        self.last_hit_ms
    }

    pub fn is_dead(&self) -> bool {
        self.energy == 0
    }

    /// True while the last hit is younger than the hurt window.
    pub fn is_hurt(&self, now_ms: u64) -> bool {
        match self.last_hit_ms {
            Some(at) => now_ms.saturating_sub(at) < self.hurt_window_ms,
            None => false,
        }
    }

    /// Apply one point of damage, subject to the cooldown.
    pub fn hit(&mut self, now_ms: u64) -> HitOutcome {
        if self.is_dead() {
            return HitOutcome::Ignored;
        }
        if let Some(at) = self.last_hit_ms {
            if now_ms.saturating_sub(at) < self.hit_cooldown_ms {
                return HitOutcome::Ignored;
            }
        }
        self.energy -= 1;
        self.last_hit_ms = Some(now_ms);
        if self.energy == 0 {
            HitOutcome::Killed
        } else {
            HitOutcome::Hurt
        }
    }

    /// Drop energy straight to zero (stomps). Returns false if already dead.
    pub fn kill(&mut self) -> bool {
        if self.is_dead() {
            return false;
        }
        self.energy = 0;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_within_cooldown_decrement_once() {
        let mut h = Health::new(5).with_hit_cooldown(100);
        assert_eq!(h.hit(1000), HitOutcome::Hurt);
        for t in 1000..1100 {
            assert_eq!(h.hit(t), HitOutcome::Ignored);
        }
        assert_eq!(h.energy(), 4);
        assert_eq!(h.hit(1100), HitOutcome::Hurt);
        assert_eq!(h.energy(), 3);
    }

    #[test]
    fn same_tick_hits_count_once_with_default_cooldown() {
        let mut h = Health::new(150);
        h.hit(40);
        h.hit(40);
        h.hit(40);
        assert_eq!(h.energy(), 149);
    }

    #[test]
    fn last_point_kills_and_death_is_terminal() {
        let mut h = Health::new(2);
        assert_eq!(h.hit(10), HitOutcome::Hurt);
        assert_eq!(h.hit(20), HitOutcome::Killed);
        assert!(h.is_dead());
        assert_eq!(h.hit(30), HitOutcome::Ignored);
        assert_eq!(h.energy(), 0);
    }

    #[test]
    fn hurt_window_is_half_a_second() {
        let mut h = Health::new(10);
        assert!(!h.is_hurt(0));
        h.hit(1000);
        assert!(h.is_hurt(1499));
        assert!(!h.is_hurt(1500));
    }

    #[test]
    fn kill_zeroes_energy_once() {
        let mut h = Health::new(2);
        assert!(h.kill());
        assert!(h.is_dead());
        assert!(!h.kill());
    }
}
