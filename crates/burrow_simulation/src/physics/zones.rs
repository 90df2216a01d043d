//! Hit zones and zone contacts.
//!
//! A zone is a named overlap region (vision, attack, bite, claw, upper slash)
//! separate from the owner's body. The engine (or `HeadlessPhysicsPlugin`)
//! reports `ZoneOverlapEvent::Entered/Exited`; `update_zone_contacts` keeps the
//! owner's `ZoneContacts` set in sync. AI guards only ever read that set.

use bevy::prelude::*;

use crate::physics::Facing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ZoneKind {
    Vision,
    Attack,
    Bite,
    Claw,
    UpperSlash,
}

/// Box-shaped zone, offset from the owner origin (mirrored by facing).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitZone {
    pub kind: ZoneKind,
    /// Offset when facing right
    pub offset: Vec2,
    pub half_extents: Vec2,
    pub mask: u32,
}

impl HitZone {
    pub fn new(kind: ZoneKind, offset: Vec2, half_extents: Vec2, mask: u32) -> Self {
        Self {
            kind,
            offset,
            half_extents,
            mask,
        }
    }

    /// World-space center for an owner at `origin`.
    pub fn center(&self, origin: Vec2, facing: &Facing) -> Vec2 {
        origin + Vec2::new(self.offset.x * facing.sign(), self.offset.y)
    }
}

/// Zone shapes of an entity (headless detection + setup validation).
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct HitZones {
    pub zones: Vec<HitZone>,
}

impl HitZones {
    pub fn new(zones: Vec<HitZone>) -> Self {
        Self { zones }
    }

    pub fn has(&self, kind: ZoneKind) -> bool {
        self.zones.iter().any(|z| z.kind == kind)
    }

    pub fn get(&self, kind: ZoneKind) -> Option<&HitZone> {
        self.zones.iter().find(|z| z.kind == kind)
    }
}

/// Entities currently overlapping each zone of the owner.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct ZoneContacts {
    contacts: Vec<(ZoneKind, Entity)>,
}

impl ZoneContacts {
    pub fn contains(&self, kind: ZoneKind, entity: Entity) -> bool {
        self.contacts.contains(&(kind, entity))
    }

    /// Any entity in zone `kind`?
    pub fn any(&self, kind: ZoneKind) -> bool {
        self.contacts.iter().any(|(k, _)| *k == kind)
    }

    /// First entity (lowest id) in zone `kind`.
    pub fn first(&self, kind: ZoneKind) -> Option<Entity> {
        self.contacts
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, e)| *e)
            .min()
    }

    pub fn insert(&mut self, kind: ZoneKind, entity: Entity) {
        if !self.contains(kind, entity) {
            self.contacts.push((kind, entity));
        }
    }

    pub fn remove(&mut self, kind: ZoneKind, entity: Entity) {
        self.contacts.retain(|c| *c != (kind, entity));
    }

    /// Drops `entity` from every zone (despawned / dead).
    pub fn forget(&mut self, entity: Entity) {
        self.contacts.retain(|(_, e)| *e != entity);
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

/// Zone overlap report from physics.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum ZoneOverlapEvent {
    Entered {
        owner: Entity,
        zone: ZoneKind,
        other: Entity,
    },
    Exited {
        owner: Entity,
        zone: ZoneKind,
        other: Entity,
    },
}

/// System: apply zone overlap reports to `ZoneContacts`.
pub fn update_zone_contacts(
    mut events: EventReader<ZoneOverlapEvent>,
    mut owners: Query<&mut ZoneContacts>,
) {
    for event in events.read() {
        match *event {
            ZoneOverlapEvent::Entered { owner, zone, other } => {
                if let Ok(mut contacts) = owners.get_mut(owner) {
                    contacts.insert(zone, other);
                }
            }
            ZoneOverlapEvent::Exited { owner, zone, other } => {
                if let Ok(mut contacts) = owners.get_mut(owner) {
                    contacts.remove(zone, other);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contacts_insert_remove() {
        let player = Entity::from_raw(7);
        let other = Entity::from_raw(2);
        let mut contacts = ZoneContacts::default();

        contacts.insert(ZoneKind::Vision, player);
        contacts.insert(ZoneKind::Vision, player); // No duplicates
        contacts.insert(ZoneKind::Attack, player);
        contacts.insert(ZoneKind::Vision, other);

        assert!(contacts.contains(ZoneKind::Attack, player));
        assert_eq!(contacts.first(ZoneKind::Vision), Some(other));

        contacts.remove(ZoneKind::Vision, other);
        assert_eq!(contacts.first(ZoneKind::Vision), Some(player));

        contacts.forget(player);
        assert!(contacts.is_empty());
    }

    #[test]
    fn test_zone_center_mirrors_with_facing() {
        let zone = HitZone::new(ZoneKind::Claw, Vec2::new(1.5, 0.2), Vec2::splat(0.5), 0);
        let origin = Vec2::new(10.0, 0.0);

        assert_eq!(zone.center(origin, &Facing::right()), Vec2::new(11.5, 0.2));
        assert_eq!(zone.center(origin, &Facing::left()), Vec2::new(8.5, 0.2));
    }
}
