//! Command/event protocol between the simulation and its presentation layer
//!
//! Commands arrive already decoded from raw input devices ("select slot 2",
//! "fire pressed"), never physical key codes. Events and snapshots are the
//! only state the UI ever reads.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::weapon::WeaponKind;

/// Commands consumed from the input layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Equip the weapon in slot 1..=3
    SelectSlot { slot: u8 },
    /// Trigger pressed (single-trigger weapons fire once, automatic
    /// weapons start continuous fire)
    FirePressed,
    /// Trigger released (stops continuous fire)
    FireReleased,
    /// Reload the active weapon from the ammo reserve
    Reload,
    /// Collect the most recently overlapped ground item
    Pickup,
    /// Toggle the consumable bag overlay
    ToggleBag,
    /// Destroy the weapon in slot 1..=3
    RemoveWeapon { slot: u8 },
    /// Drop one consumable by identifier
    RemoveConsumable { id: String },
    /// Movement direction for this tick (8-directional, components in -1..=1)
    Move { dx: f32, dy: f32 },
    /// Aim at a world-space point
    Aim { x: f32, y: f32 },
}

/// Events produced for external consumption
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// An enemy died; the consumer recomputes any aggregate count
    EnemyKilled { enemy_id: Uuid },

    /// Transient user-facing message for a caller-owned overlay
    Notification {
        text: String,
        /// Auto-expiry in milliseconds, `None` for sticky messages
        expires_after_ms: Option<u64>,
    },

    /// Periodic HUD state snapshot
    Snapshot(HudSnapshot),
}

impl Event {
    pub fn notify(text: impl Into<String>, expires_after_ms: u64) -> Self {
        Event::Notification {
            text: text.into(),
            expires_after_ms: Some(expires_after_ms),
        }
    }
}

/// Active weapon view (kind + magazine)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeaponView {
    pub kind: WeaponKind,
    pub loaded_ammo: u32,
    pub capacity: u32,
}

/// Player state as the HUD reads it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub aim: f32,
    pub health: i32,
    pub max_health: i32,
    pub alive: bool,
    pub active_weapon: Option<WeaponView>,
    /// Ordered 3-slot view, empty slots = `None`
    pub weapon_slots: [Option<WeaponKind>; 3],
    pub ammo_reserve: HashMap<WeaponKind, u32>,
    /// Ordered consumable identifiers
    pub bag: Vec<String>,
    pub bag_open: bool,
}

/// Enemy state as the HUD reads it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: Uuid,
    pub x: f32,
    pub y: f32,
    pub health: i32,
    pub weapon_kind: WeaponKind,
}

/// Full HUD snapshot, sent at the snapshot cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub tick: u64,
    pub now_ms: u64,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    /// Alive enemy count; the HUD shows `1 + this` as "players left"
    pub enemies_alive: usize,
    pub projectiles_in_flight: usize,
}
