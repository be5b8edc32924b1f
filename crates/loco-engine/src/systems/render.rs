use crate::components::entity::Entity;
use crate::renderer::camera::Camera2D;
use crate::renderer::traits::RenderTarget;

/// Draw one entity. Entities facing left are mirrored around their own
/// sprite rectangle; the transform is saved and restored around the blit so
/// nothing leaks into the next draw.
pub fn draw_entity(target: &mut dyn RenderTarget, entity: &Entity) {
    if !entity.active {
        return;
    }
    let Some(sprite) = &entity.sprite else {
        return;
    };

    let (x, y, w, h) = (entity.pos.x, entity.pos.y, entity.size.x, entity.size.y);
    if entity.facing_left {
        target.save();
        target.translate(w, 0.0);
        target.scale(-1.0, 1.0);
        target.draw_sprite(sprite, -x, y, w, h);
        target.restore();
    } else {
        target.draw_sprite(sprite, x, y, w, h);
    }
}

/// Draw a set of world-space entities, skipping those outside the camera.
pub fn draw_entities<'a>(
    target: &mut dyn RenderTarget,
    camera: &Camera2D,
    entities: impl Iterator<Item = &'a Entity>,
) {
    for entity in entities {
        if camera.is_span_visible(entity.pos.x, entity.size.x) {
            draw_entity(target, entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::sprite::SpriteComponent;
    use crate::renderer::instance::RenderBuffer;
    use glam::Vec2;

    fn sprite_entity(id: u32, x: f32) -> Entity {
        Entity::new(EntityId(id))
            .with_pos(Vec2::new(x, 100.0))
            .with_size(Vec2::new(50.0, 50.0))
            .with_sprite(SpriteComponent::default())
    }

    #[test]
    fn mirrored_entities_do_not_leak_transform() {
        let mut buf = RenderBuffer::new();
        let mut left = sprite_entity(1, 200.0);
        left.facing_left = true;
        let right = sprite_entity(2, 400.0);

        draw_entity(&mut buf, &left);
        draw_entity(&mut buf, &right);

        assert_eq!(buf.instance_count(), 2);
        assert!(buf.instances[0].is_flipped());
        assert_eq!(buf.instances[0].x, 200.0);
        assert!(!buf.instances[1].is_flipped());
        assert_eq!(buf.instances[1].x, 400.0);
        assert_eq!(buf.stack_depth(), 0);
        assert!(buf.is_identity());
    }

    #[test]
    fn inactive_and_spriteless_entities_are_skipped() {
        let mut buf = RenderBuffer::new();
        let mut inactive = sprite_entity(1, 0.0);
        inactive.active = false;
        draw_entity(&mut buf, &inactive);
        draw_entity(&mut buf, &Entity::new(EntityId(2)));
        assert_eq!(buf.instance_count(), 0);
    }

    #[test]
    fn offscreen_entities_are_culled() {
        let mut buf = RenderBuffer::new();
        let cam = Camera2D::new(720.0, 480.0);
        let entities = vec![sprite_entity(1, 10.0), sprite_entity(2, 5000.0)];
        draw_entities(&mut buf, &cam, entities.iter());
        assert_eq!(buf.instance_count(), 1);
    }
}
