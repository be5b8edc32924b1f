//! Animation system. Steps clips and mirrors the frame into the sprite.

use crate::components::entity::Entity;

/// Play one step of `clip` on `entity` and copy the resulting frame into its
/// sprite. Returns false if the entity has no animator or the clip is
/// unknown.
pub fn play_clip(entity: &mut Entity, clip: &str) -> bool {
    let Some(anim) = entity.animator.as_mut() else {
        return false;
    };
    if anim.clip(clip).is_none() {
        return false;
    }
    if let Some((col, row)) = anim.play(clip) {
        if let Some(sprite) = entity.sprite.as_mut() {
            sprite.col = col;
            sprite.row = row;
        }
    }
    true
}
