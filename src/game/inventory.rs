//! Weapon slots, ammo reserve and the consumable bag

use std::collections::HashMap;

use super::weapon::{Weapon, WeaponKind};

/// Number of weapon slots every combatant carries
pub const WEAPON_SLOTS: usize = 3;

/// Inventory errors - all locally recovered, none fatal
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("all weapon slots are occupied")]
    Full,
}

/// Bounded weapon slots plus the unbounded consumable bag.
///
/// The ammo reserve is only ever filled for the player; enemies resupply
/// on demand and never touch it.
#[derive(Debug, Default)]
pub struct Inventory {
    slots: [Option<Weapon>; WEAPON_SLOTS],
    /// Index of the equipped weapon, `None` when nothing is equipped
    active: Option<usize>,
    ammo_reserve: HashMap<WeaponKind, u32>,
    /// Consumable identifiers, duplicates allowed, insertion order kept
    bag: Vec<String>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a new weapon (full magazine) into the first empty slot.
    /// The first weapon picked up becomes active automatically.
    pub fn add_weapon(&mut self, kind: WeaponKind) -> Result<usize, InventoryError> {
        let index = self
            .slots
            .iter()
            .position(|slot| slot.is_none())
            .ok_or(InventoryError::Full)?;

        self.slots[index] = Some(Weapon::new(kind));
        if self.active.is_none() {
            self.active = Some(index);
        }
        Ok(index)
    }

    /// Activate the weapon in `index` if that slot is occupied; no-op on an
    /// empty or out-of-range slot.
    pub fn select_slot(&mut self, index: usize) {
        if index < WEAPON_SLOTS && self.slots[index].is_some() {
            self.active = Some(index);
        }
    }

    /// Destroy the weapon in `index`. Removing the active weapon leaves
    /// nothing equipped - no auto-promotion to another slot.
    pub fn remove_slot(&mut self, index: usize) {
        if index >= WEAPON_SLOTS {
            return;
        }
        if self.slots[index].take().is_some() && self.active == Some(index) {
            self.active = None;
        }
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_weapon(&self) -> Option<&Weapon> {
        self.active.and_then(|i| self.slots[i].as_ref())
    }

    pub fn active_weapon_mut(&mut self) -> Option<&mut Weapon> {
        self.active.and_then(|i| self.slots[i].as_mut())
    }

    /// Ordered 3-slot view of carried weapon kinds
    pub fn weapon_kinds(&self) -> [Option<WeaponKind>; WEAPON_SLOTS] {
        [
            self.slots[0].as_ref().map(|w| w.kind),
            self.slots[1].as_ref().map(|w| w.kind),
            self.slots[2].as_ref().map(|w| w.kind),
        ]
    }

    pub fn ammo_reserve(&self, kind: WeaponKind) -> u32 {
        self.ammo_reserve.get(&kind).copied().unwrap_or(0)
    }

    pub fn add_ammo_reserve(&mut self, kind: WeaponKind, amount: u32) {
        *self.ammo_reserve.entry(kind).or_insert(0) += amount;
    }

    /// Draw up to `amount` rounds of `kind` from the reserve.
    /// Returns how many were actually available.
    pub fn take_ammo_reserve(&mut self, kind: WeaponKind, amount: u32) -> u32 {
        let entry = self.ammo_reserve.entry(kind).or_insert(0);
        let taken = amount.min(*entry);
        *entry -= taken;
        taken
    }

    pub fn add_consumable(&mut self, id: impl Into<String>) {
        self.bag.push(id.into());
    }

    /// Remove one instance of `id` from the bag, if present
    pub fn remove_consumable(&mut self, id: &str) -> bool {
        match self.bag.iter().position(|item| item == id) {
            Some(index) => {
                self.bag.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn bag_contents(&self) -> &[String] {
        &self.bag
    }
}
