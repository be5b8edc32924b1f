use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::core::error::EngineError;

/// Asset manifest describing the sprite sheets and sounds of a game.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Sprite sheets; position in this list is the sheet's `AtlasId`.
    pub sheets: Vec<SheetDescriptor>,
    /// Audio assets keyed by sound-cue name (see `SoundKind::name`).
    #[serde(default)]
    pub sounds: HashMap<String, SoundDescriptor>,
}

/// Describes a single sprite sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetDescriptor {
    /// Human-readable name (e.g., "character").
    pub name: String,
    /// Number of columns in the sheet grid.
    pub cols: u32,
    /// Number of rows in the sheet grid.
    pub rows: u32,
    /// Relative path to the image file.
    pub path: String,
}

/// Describes an audio asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundDescriptor {
    /// Relative path to the audio file.
    pub path: String,
    /// Whether the host should loop this sound.
    #[serde(default)]
    pub looping: bool,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Path of the sound registered under `name`.
    pub fn sound_path(&self, name: &str) -> Result<&str, EngineError> {
        self.sounds
            .get(name)
            .map(|s| s.path.as_str())
            .ok_or_else(|| EngineError::AssetUnavailable {
                kind: "sound",
                name: name.to_string(),
            })
    }
}
