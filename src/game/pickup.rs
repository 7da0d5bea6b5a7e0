//! World-placed pickup items and their classification

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::weapon::WeaponKind;

/// Radius within which a combatant overlaps a ground item
pub const PICKUP_RADIUS: f32 = 40.0;

/// Classification tag on a world item (closed set). Items without one of
/// these tags are inert to the pickup protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickupTag {
    Weapon,
    Helmet,
    Vest,
    AmmoCrate,
    Consumable,
}

/// A collectable item lying in the world.
///
/// The identifier resolves the concrete sub-kind ("ak47" + Weapon tag is an
/// automatic rifle, "ak47_ammo" + AmmoCrate tag is a rifle ammo crate).
#[derive(Debug, Clone)]
pub struct Pickup {
    pub id: Uuid,
    pub x: f32,
    pub y: f32,
    pub tag: PickupTag,
    pub identifier: String,
}

impl Pickup {
    pub fn new(x: f32, y: f32, tag: PickupTag, identifier: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            x,
            y,
            tag,
            identifier: identifier.into(),
        }
    }

    /// Weapon kind granted when the tag is `Weapon`
    pub fn weapon_kind(&self) -> Option<WeaponKind> {
        WeaponKind::from_identifier(&self.identifier)
    }

    /// Weapon kind an ammo crate feeds ("<kind>_ammo" identifiers)
    pub fn ammo_kind(&self) -> Option<WeaponKind> {
        self.identifier
            .strip_suffix("_ammo")
            .and_then(WeaponKind::from_identifier)
    }
}

/// Fixed grant amount for an ammo crate: the kind's own magazine capacity
pub fn ammo_crate_amount(kind: WeaponKind) -> u32 {
    super::weapon::WeaponSpec::for_kind(kind).capacity
}
