//! The fixed, ordered set of fruits in a session and the cursor naming the
//! current one.

use std::collections::BTreeSet;

use tart_core::{Handle, World};

use crate::error::TartError;
use crate::fruit::{FruitEntity, FruitKind};

#[derive(Debug, Clone)]
pub struct Roster {
    entities: Vec<FruitEntity>,
    cursor: usize,
}

/// The single node called `name`, `None` when absent.
pub(crate) fn unique_node(world: &World, name: &str) -> Result<Option<Handle>, TartError> {
    let found = world.find_all(name);
    match found.len() {
        0 => Ok(None),
        1 => Ok(Some(found[0])),
        count => Err(TartError::DuplicateTransform {
            name: name.to_owned(),
            count,
        }),
    }
}

impl Roster {
    /// Build a roster from entities in cycling order.  The cursor starts on
    /// the first entity.
    pub(crate) fn new(entities: Vec<FruitEntity>) -> Result<Self, TartError> {
        if entities.is_empty() {
            return Err(TartError::EmptyRoster);
        }
        Ok(Self { entities, cursor: 0 })
    }

    /// One entity per listed kind, each bound to the scene transform named
    /// after it.  The current position of that transform becomes the fruit's
    /// staging position.
    pub fn from_world(world: &World, kinds: &[FruitKind]) -> Result<Self, TartError> {
        let mut required = BTreeSet::new();
        for &kind in kinds {
            if !required.insert(kind) {
                return Err(TartError::RepeatedKind(kind));
            }
        }

        let mut seen = BTreeSet::new();
        let mut entities = Vec::with_capacity(kinds.len());
        for &kind in kinds {
            let Some(handle) = unique_node(world, kind.name())? else {
                continue;
            };
            let Some(position) = world.position(handle) else {
                continue;
            };
            entities.push(FruitEntity::new(kind, handle, position));
            seen.insert(kind);
        }

        if let Some(&missing) = required.difference(&seen).next() {
            return Err(TartError::MissingFruit(missing));
        }
        Self::new(entities)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Always `false`; a roster cannot be built empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FruitEntity> {
        self.entities.get(index)
    }

    #[cfg(test)]
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut FruitEntity> {
        self.entities.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FruitEntity> {
        self.entities.iter()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn set_cursor(&mut self, index: usize) {
        debug_assert!(index < self.entities.len());
        if index < self.entities.len() {
            self.cursor = index;
        }
    }

    pub fn current(&self) -> &FruitEntity {
        &self.entities[self.cursor]
    }

    pub(crate) fn current_mut(&mut self) -> &mut FruitEntity {
        &mut self.entities[self.cursor]
    }

    /// First available slot after `from`, scanning cyclically.  `from` itself
    /// is never returned: `None` means there is nothing else to switch to.
    pub fn next_available_from(&self, from: usize) -> Option<usize> {
        let n = self.entities.len();
        (1..n)
            .map(|step| (from + step) % n)
            .find(|&i| self.entities[i].is_available())
    }

    /// Moves the cursor to the next available slot after it.  Leaves the
    /// cursor alone and returns `None` when no other slot is available.
    pub fn find_next_available(&mut self) -> Option<usize> {
        let next = self.next_available_from(self.cursor)?;
        self.cursor = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn roster(kinds: &[FruitKind]) -> (World, Roster) {
        let mut world = World::new();
        for (i, kind) in kinds.iter().enumerate() {
            world
                .spawn(kind.name())
                .with_position(Vec3::new(i as f32, 0.0, 3.0))
                .build();
        }
        let roster = Roster::from_world(&world, kinds).unwrap();
        (world, roster)
    }

    fn place(world: &mut World, roster: &mut Roster, index: usize) {
        let fruit = roster.get_mut(index).unwrap();
        fruit.stage(world);
        fruit.launch(Vec3::ZERO);
        fruit.place(world);
    }

    #[test]
    fn builds_in_listed_order() {
        let (world, roster) = roster(&FruitKind::CLASSIC);
        assert_eq!(roster.len(), 4);
        assert_eq!(roster.cursor(), 0);
        let kinds: Vec<_> = roster.iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, FruitKind::CLASSIC.to_vec());
        let peach = roster.get(2).unwrap();
        assert_eq!(peach.initial_position(), Vec3::new(2.0, 0.0, 3.0));
        assert_eq!(Some(peach.transform()), world.find("Peach"));
    }

    #[test]
    fn missing_kind_is_reported() {
        let mut world = World::new();
        world.spawn("Cherry").build();
        let err = Roster::from_world(&world, &[FruitKind::Cherry, FruitKind::Kiwi]).unwrap_err();
        assert!(matches!(err, TartError::MissingFruit(FruitKind::Kiwi)));
    }

    #[test]
    fn duplicated_transform_is_reported() {
        let mut world = World::new();
        world.spawn("Kiwi").build();
        world.spawn("Kiwi").build();
        let err = Roster::from_world(&world, &[FruitKind::Kiwi]).unwrap_err();
        assert!(matches!(err, TartError::DuplicateTransform { count: 2, .. }));
    }

    #[test]
    fn empty_and_repeated_rosters_are_rejected() {
        let world = World::new();
        assert!(matches!(Roster::from_world(&world, &[]), Err(TartError::EmptyRoster)));
        assert!(matches!(
            Roster::from_world(&world, &[FruitKind::Mango, FruitKind::Mango]),
            Err(TartError::RepeatedKind(FruitKind::Mango))
        ));
    }

    #[test]
    fn cycles_with_wraparound() {
        let (_world, mut roster) = roster(&FruitKind::CLASSIC);
        assert_eq!(roster.find_next_available(), Some(1));
        assert_eq!(roster.find_next_available(), Some(2));
        assert_eq!(roster.find_next_available(), Some(3));
        assert_eq!(roster.find_next_available(), Some(0));
        assert_eq!(roster.cursor(), 0);
    }

    #[test]
    fn skips_unavailable_slots_from_any_start() {
        let kinds = FruitKind::CLASSIC;
        let n = kinds.len();
        for unavailable in 0..n {
            let (mut world, mut roster) = roster(&kinds);
            place(&mut world, &mut roster, unavailable);
            for from in 0..n {
                let next = roster.next_available_from(from).unwrap();
                assert_ne!(next, unavailable);
                assert_ne!(next, from);
                // the first available slot after `from`, at most n - 1 steps away
                let steps = (next + n - from) % n;
                assert!(steps >= 1 && steps <= n - 1);
                for skipped in 1..steps {
                    assert_eq!((from + skipped) % n, unavailable);
                }
            }
        }
    }

    #[test]
    fn never_reselects_the_starting_slot() {
        let (mut world, mut roster) = roster(&FruitKind::CLASSIC);
        for i in 1..4 {
            place(&mut world, &mut roster, i);
        }
        // slot 0 is still available but it is where the scan starts
        assert_eq!(roster.find_next_available(), None);
        assert_eq!(roster.cursor(), 0);
    }

    #[test]
    fn single_slot_roster_has_no_next() {
        let (_world, mut roster) = roster(&[FruitKind::Grape]);
        assert_eq!(roster.find_next_available(), None);
        assert_eq!(roster.cursor(), 0);
    }
}
