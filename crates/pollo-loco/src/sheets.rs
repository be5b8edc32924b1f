//! Sprite sheet ids and the atlas cells of every clip.

use loco_engine::{AtlasId, SpriteRegistry};

/// Sheet names, in the order of the bundled asset manifest.
pub const SHEET_NAMES: [&str; 10] = [
    "background",
    "cloud",
    "character",
    "chicken",
    "mini_chicken",
    "endboss",
    "bottle",
    "coin",
    "status_bars",
    "hitmarker",
];

/// Atlas ids the game draws with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sheets {
    pub background: AtlasId,
    pub cloud: AtlasId,
    pub character: AtlasId,
    pub chicken: AtlasId,
    pub mini_chicken: AtlasId,
    pub endboss: AtlasId,
    pub bottle: AtlasId,
    pub coin: AtlasId,
    pub status_bars: AtlasId,
    pub hitmarker: AtlasId,
}

impl Sheets {
    fn from_ids(ids: [AtlasId; 10]) -> Self {
        let [background, cloud, character, chicken, mini_chicken, endboss, bottle, coin, status_bars, hitmarker] =
            ids;
        Self {
            background,
            cloud,
            character,
            chicken,
            mini_chicken,
            endboss,
            bottle,
            coin,
            status_bars,
            hitmarker,
        }
    }

    /// Look every sheet up by name; missing ones become the placeholder.
    pub fn resolve(registry: &SpriteRegistry) -> Self {
        Self::from_ids(SHEET_NAMES.map(|name| registry.sheet_or_placeholder(name)))
    }
}

impl Default for Sheets {
    fn default() -> Self {
        let mut ids = [AtlasId(0); 10];
        for (i, id) in ids.iter_mut().enumerate() {
            *id = AtlasId(i as u32);
        }
        Self::from_ids(ids)
    }
}

/// Atlas rows and frame counts of each clip.
pub mod cells {
    // character
    pub const WALK: (f32, u32) = (0.0, 6);
    pub const JUMP: (f32, u32) = (1.0, 9);
    pub const DEAD: (f32, u32) = (2.0, 7);
    pub const HURT: (f32, u32) = (3.0, 3);
    pub const SLEEP: (f32, u32) = (4.0, 10);
    pub const WAIT: (f32, u32) = (5.0, 10);

    // chicken and mini chicken
    pub const CHICKEN_WALK: (f32, u32) = (0.0, 3);
    pub const CHICKEN_DEAD: (f32, u32) = (1.0, 2);
    pub const MINI_CHICKEN_DEAD: (f32, u32) = (1.0, 1);

    // endboss
    pub const BOSS_ALERT: (f32, u32) = (0.0, 8);
    pub const BOSS_WALK: (f32, u32) = (1.0, 4);
    pub const BOSS_ATTACK: (f32, u32) = (2.0, 8);
    pub const BOSS_HURT: (f32, u32) = (3.0, 3);
    pub const BOSS_DEAD: (f32, u32) = (4.0, 3);

    // bottle
    pub const BOTTLE_SPIN: (f32, u32) = (0.0, 4);
    pub const BOTTLE_SPLASH: (f32, u32) = (1.0, 6);
    pub const BOTTLE_ON_GROUND: (f32, f32) = (0.0, 2.0);

    // status bars: one row per bar, one column per fill level
    pub const BAR_HEALTH_ROW: f32 = 0.0;
    pub const BAR_COIN_ROW: f32 = 1.0;
    pub const BAR_BOTTLE_ROW: f32 = 2.0;
    pub const BAR_BOSS_ROW: f32 = 3.0;
    pub const BAR_HEART_ROW: f32 = 4.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use loco_engine::{AssetManifest, PLACEHOLDER_ATLAS};

    const BUNDLED: &str = include_str!("../assets/manifest.json");

    #[test]
    fn bundled_manifest_matches_default_ids() {
        let manifest = AssetManifest::from_json(BUNDLED).unwrap();
        let registry = SpriteRegistry::from_manifest(&manifest);
        assert_eq!(Sheets::resolve(&registry), Sheets::default());
    }

    #[test]
    fn bundled_manifest_has_every_sound() {
        let manifest = AssetManifest::from_json(BUNDLED).unwrap();
        for kind in loco_engine::SoundKind::ALL {
            assert!(manifest.sound_path(kind.name()).is_ok(), "missing {}", kind.name());
        }
    }

    #[test]
    fn missing_sheets_fall_back_to_placeholder() {
        let sheets = Sheets::resolve(&SpriteRegistry::new());
        assert_eq!(sheets.character, PLACEHOLDER_ATLAS);
        assert_eq!(sheets.hitmarker, PLACEHOLDER_ATLAS);
    }
}
