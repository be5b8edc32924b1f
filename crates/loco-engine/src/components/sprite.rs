/// Identifies which sprite sheet a sprite belongs to.
/// Index into the AssetManifest's sheet list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AtlasId(pub u32);

/// Sprite component: which atlas cell an entity currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpriteComponent {
    /// Which atlas this sprite belongs to.
    pub atlas: AtlasId,
    /// Column in the atlas grid.
    pub col: f32,
    /// Row in the atlas grid.
    pub row: f32,
}

impl SpriteComponent {
    pub fn new(atlas: AtlasId) -> Self {
        Self {
            atlas,
            ..Default::default()
        }
    }

    pub fn at_cell(atlas: AtlasId, col: f32, row: f32) -> Self {
        Self { atlas, col, row }
    }
}
