//! Area overlap queries (the "detect overlap" side of the physics collaborator)

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::components::Dead;
use crate::physics::Hurtbox;

/// Circle vs axis-aligned box.
pub fn circle_overlaps_box(center: Vec2, radius: f32, box_center: Vec2, half_extents: Vec2) -> bool {
    let closest = center.clamp(box_center - half_extents, box_center + half_extents);
    closest.distance_squared(center) <= radius * radius
}

/// Box vs box (touching edges count).
pub fn boxes_overlap(a_center: Vec2, a_half: Vec2, b_center: Vec2, b_half: Vec2) -> bool {
    let delta = (a_center - b_center).abs();
    delta.x <= a_half.x + b_half.x && delta.y <= a_half.y + b_half.y
}

/// Every hurtbox on a `mask` layer touching the circle, sorted by entity for determinism.
pub fn overlap_area<'a>(
    origin: Vec2,
    radius: f32,
    mask: u32,
    candidates: impl IntoIterator<Item = (Entity, Vec2, &'a Hurtbox)>,
) -> Vec<Entity> {
    let mut hits: Vec<Entity> = candidates
        .into_iter()
        .filter(|(_, position, hurtbox)| {
            hurtbox.matches(mask) && circle_overlaps_box(origin, radius, *position, hurtbox.half_extents)
        })
        .map(|(entity, _, _)| entity)
        .collect();
    hits.sort();
    hits
}

/// SystemParam: overlap queries against live hurtboxes.
///
/// Conflicts with `&mut Transform` on hurtbox entities; projectile queries
/// filter `Without<Hurtbox>`.
#[derive(SystemParam)]
pub struct OverlapQuery<'w, 's> {
    hurtboxes: Query<'w, 's, (Entity, &'static Transform, &'static Hurtbox), Without<Dead>>,
}

impl OverlapQuery<'_, '_> {
    pub fn area(&self, origin: Vec2, radius: f32, mask: u32) -> Vec<Entity> {
        overlap_area(
            origin,
            radius,
            mask,
            self.hurtboxes
                .iter()
                .map(|(entity, transform, hurtbox)| (entity, transform.translation.truncate(), hurtbox)),
        )
    }

    pub fn position(&self, entity: Entity) -> Option<Vec2> {
        self.hurtboxes
            .get(entity)
            .ok()
            .map(|(_, transform, _)| transform.translation.truncate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{LAYER_ENEMY, LAYER_PLAYER, LAYER_PROP, MASK_PLAYER_ATTACK};

    #[test]
    fn test_circle_box_overlap() {
        let half = Vec2::new(0.5, 1.0);
        assert!(circle_overlaps_box(Vec2::ZERO, 1.0, Vec2::new(1.4, 0.0), half));
        assert!(!circle_overlaps_box(Vec2::ZERO, 1.0, Vec2::new(1.6, 0.0), half));
        // Corner case: diagonal distance counts, not per-axis
        assert!(!circle_overlaps_box(Vec2::ZERO, 1.0, Vec2::new(1.3, 1.8), half));
    }

    #[test]
    fn test_overlap_area_filters_by_mask() {
        let enemy = Hurtbox::new(Vec2::splat(0.5), LAYER_ENEMY);
        let player = Hurtbox::new(Vec2::splat(0.5), LAYER_PLAYER);
        let chest = Hurtbox::new(Vec2::splat(0.5), LAYER_PROP);

        let a = Entity::from_raw(3);
        let b = Entity::from_raw(1);
        let c = Entity::from_raw(2);
        let far = Entity::from_raw(4);

        let hits = overlap_area(
            Vec2::ZERO,
            1.5,
            MASK_PLAYER_ATTACK,
            [
                (a, Vec2::new(1.0, 0.0), &enemy),
                (b, Vec2::new(-1.0, 0.0), &chest),
                (c, Vec2::new(0.5, 0.0), &player),
                (far, Vec2::new(10.0, 0.0), &enemy),
            ],
        );

        assert_eq!(hits, vec![b, a]);
    }
}
