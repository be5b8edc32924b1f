use bytemuck::{Pod, Zeroable};

/// Unique identifier for an entity in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// Sound cues the simulation can request. Playback, buffering and devices
/// belong to the host's audio layer.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundKind {
    Footstep = 0,
    Jump = 1,
    Hurt = 2,
    Death = 3,
    Snore = 4,
    Coin = 5,
    Throw = 6,
    BrokenBottle = 7,
    ChickenDeath = 8,
    HitMarker = 9,
    Music = 10,
    Win = 11,
    Lose = 12,
}

impl SoundKind {
    pub const ALL: [SoundKind; 13] = [
        SoundKind::Footstep,
        SoundKind::Jump,
        SoundKind::Hurt,
        SoundKind::Death,
        SoundKind::Snore,
        SoundKind::Coin,
        SoundKind::Throw,
        SoundKind::BrokenBottle,
        SoundKind::ChickenDeath,
        SoundKind::HitMarker,
        SoundKind::Music,
        SoundKind::Win,
        SoundKind::Lose,
    ];

    /// Key used for this cue in the asset manifest.
    pub fn name(self) -> &'static str {
        match self {
            SoundKind::Footstep => "footstep",
            SoundKind::Jump => "jump",
            SoundKind::Hurt => "hurt",
            SoundKind::Death => "death",
            SoundKind::Snore => "snore",
            SoundKind::Coin => "coin",
            SoundKind::Throw => "throw",
            SoundKind::BrokenBottle => "broken_bottle",
            SoundKind::ChickenDeath => "chicken_death",
            SoundKind::HitMarker => "hitmarker",
            SoundKind::Music => "music",
            SoundKind::Win => "win",
            SoundKind::Lose => "lose",
        }
    }
}

/// A sound intent emitted by the game logic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundEvent {
    pub kind: SoundKind,
    /// Playback volume (0.0-1.0). Ignored for stop requests.
    pub volume: f32,
    /// Stop a looping cue instead of starting it.
    pub stop: bool,
}

impl SoundEvent {
    pub fn play(kind: SoundKind, volume: f32) -> Self {
        Self { kind, volume, stop: false }
    }

    pub fn stop(kind: SoundKind) -> Self {
        Self { kind, volume: 0.0, stop: true }
    }

    /// Wire form handed to the host audio layer.
    pub fn record(&self) -> SoundRecord {
        SoundRecord {
            kind: self.kind as u8 as f32,
            volume: if self.stop { 0.0 } else { self.volume.clamp(0.0, 1.0) },
            stop: if self.stop { 1.0 } else { 0.0 },
        }
    }
}

/// A sound cue as the host reads it: kind id, volume, and 1.0 for stops.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SoundRecord {
    pub kind: f32,
    pub volume: f32,
    pub stop: f32,
}

impl SoundRecord {
    pub const FLOATS: usize = 3;

    pub fn is_stop(&self) -> bool {
        self.stop != 0.0
    }
}

/// A game event communicated from Rust to the host.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub const WIN: f32 = 1.0;
    pub const LOSE: f32 = 2.0;
    pub const RESET: f32 = 3.0;
    pub const MUTE_CHANGED: f32 = 4.0;

    fn flagged(kind: f32, muted: bool) -> Self {
        Self {
            kind,
            a: if muted { 1.0 } else { 0.0 },
            ..Default::default()
        }
    }

    pub fn win(muted: bool) -> Self {
        Self::flagged(Self::WIN, muted)
    }

    pub fn lose(muted: bool) -> Self {
        Self::flagged(Self::LOSE, muted)
    }

    pub fn reset() -> Self {
        Self { kind: Self::RESET, ..Default::default() }
    }

    pub fn mute_changed(muted: bool) -> Self {
        Self::flagged(Self::MUTE_CHANGED, muted)
    }

    /// The muted flag carried in payload `a`.
    pub fn muted(&self) -> bool {
        self.a != 0.0
    }
}
