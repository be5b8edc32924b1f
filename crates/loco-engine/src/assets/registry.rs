use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use crate::api::types::SoundKind;
use crate::assets::manifest::AssetManifest;
use crate::components::sprite::AtlasId;
use crate::core::error::EngineError;

/// Sheet id the host draws as a placeholder box.
pub const PLACEHOLDER_ATLAS: AtlasId = AtlasId(u32::MAX);

/// Registry of named sprite sheets and available sounds, built from an
/// AssetManifest. Missing entries degrade instead of failing: sprites fall
/// back to the placeholder sheet, sounds are skipped. Each missing name is
/// logged once.
pub struct SpriteRegistry {
    sheets: HashMap<String, AtlasId>,
    sounds: HashSet<String>,
    reported: RefCell<HashSet<String>>,
}

impl SpriteRegistry {
    pub fn new() -> Self {
        Self {
            sheets: HashMap::new(),
            sounds: HashSet::new(),
            reported: RefCell::new(HashSet::new()),
        }
    }

    /// Build a registry from a parsed AssetManifest.
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let sheets = manifest
            .sheets
            .iter()
            .enumerate()
            .map(|(i, desc)| (desc.name.clone(), AtlasId(i as u32)))
            .collect();
        let sounds = manifest.sounds.keys().cloned().collect();
        Self {
            sheets,
            sounds,
            reported: RefCell::new(HashSet::new()),
        }
    }

    /// Look up a sheet by name.
    pub fn sheet(&self, name: &str) -> Result<AtlasId, EngineError> {
        self.sheets
            .get(name)
            .copied()
            .ok_or_else(|| EngineError::AssetUnavailable {
                kind: "sprite",
                name: name.to_string(),
            })
    }

    /// Look up a sheet, falling back to the placeholder.
    pub fn sheet_or_placeholder(&self, name: &str) -> AtlasId {
        match self.sheet(name) {
            Ok(id) => id,
            Err(err) => {
                self.report(name, &err);
                PLACEHOLDER_ATLAS
            }
        }
    }

    /// Whether a sound cue has an asset; missing cues are reported once.
    pub fn has_sound(&self, kind: SoundKind) -> bool {
        if self.sounds.contains(kind.name()) {
            return true;
        }
        let err = EngineError::AssetUnavailable {
            kind: "sound",
            name: kind.name().to_string(),
        };
        self.report(kind.name(), &err);
        false
    }

    fn report(&self, name: &str, err: &EngineError) {
        if self.reported.borrow_mut().insert(name.to_string()) {
            log::warn!("{}", err);
        }
    }
}

impl Default for SpriteRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> AssetManifest {
        AssetManifest::from_json(
            r#"{
                "sheets": [
                    { "name": "character", "cols": 10, "rows": 6, "path": "character.png" },
                    { "name": "chicken", "cols": 3, "rows": 2, "path": "chicken.png" }
                ],
                "sounds": { "coin": { "path": "coin.mp3" } }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn sheets_get_manifest_order_ids() {
        let reg = SpriteRegistry::from_manifest(&manifest());
        assert_eq!(reg.sheet("character").unwrap(), AtlasId(0));
        assert_eq!(reg.sheet("chicken").unwrap(), AtlasId(1));
    }

    #[test]
    fn unknown_sheet_falls_back_to_placeholder() {
        let reg = SpriteRegistry::from_manifest(&manifest());
        assert!(reg.sheet("endboss").is_err());
        assert_eq!(reg.sheet_or_placeholder("endboss"), PLACEHOLDER_ATLAS);
        // Second lookup takes the same path without a second report.
        assert_eq!(reg.sheet_or_placeholder("endboss"), PLACEHOLDER_ATLAS);
        assert_eq!(reg.reported.borrow().len(), 1);
    }

    #[test]
    fn sound_availability() {
        let reg = SpriteRegistry::from_manifest(&manifest());
        assert!(reg.has_sound(SoundKind::Coin));
        assert!(!reg.has_sound(SoundKind::Snore));
    }
}
