//! The human-controlled combatant

use uuid::Uuid;

use crate::session::protocol::Event;
use crate::util::time::tick_delta;

use super::armor::{ArmorKind, Vitals};
use super::inventory::{Inventory, InventoryError};
use super::pickup::{ammo_crate_amount, Pickup, PickupTag};
use super::projectile::Projectile;
use super::weapon::FireMode;

/// Player movement speed in units per second
pub const PLAYER_SPEED: f32 = 200.0;

/// Combatant hitbox radius (player and enemies alike)
pub const COMBATANT_RADIUS: f32 = 30.0;

/// The player: position, vitals, inventory and fire control state
#[derive(Debug)]
pub struct Player {
    pub id: Uuid,
    pub x: f32,
    pub y: f32,
    /// Facing/aim angle in radians; the active weapon's world pose is this
    /// angle at the player's position, recomputed every tick
    pub aim: f32,
    pub vitals: Vitals,
    pub inventory: Inventory,
    move_x: f32,
    move_y: f32,
    fire_held: bool,
    bag_open: bool,
    /// Most recently overlapped ground item; a newer overlap silently
    /// replaces the previous candidate
    overlapping_pickup: Option<Uuid>,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            x,
            y,
            aim: 0.0,
            vitals: Vitals::new(),
            inventory: Inventory::new(),
            move_x: 0.0,
            move_y: 0.0,
            fire_held: false,
            bag_open: false,
            overlapping_pickup: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.vitals.is_dead()
    }

    pub fn bag_open(&self) -> bool {
        self.bag_open
    }

    pub fn fire_held(&self) -> bool {
        self.fire_held
    }

    pub fn overlapping_pickup(&self) -> Option<Uuid> {
        self.overlapping_pickup
    }

    pub fn set_overlapping_pickup(&mut self, id: Uuid) {
        self.overlapping_pickup = Some(id);
    }

    /// Record the movement direction for the next integration step
    pub fn set_move_input(&mut self, dx: f32, dy: f32) {
        self.move_x = dx.clamp(-1.0, 1.0);
        self.move_y = dy.clamp(-1.0, 1.0);
    }

    pub fn aim_at(&mut self, target_x: f32, target_y: f32) {
        self.aim = (target_y - self.y).atan2(target_x - self.x);
    }

    /// Integrate one tick of movement. Diagonal input is normalized so it
    /// moves at the same speed as axis-aligned input.
    pub fn integrate_movement(&mut self, arena_size: f32) {
        if !self.is_alive() {
            return;
        }
        let len = (self.move_x * self.move_x + self.move_y * self.move_y).sqrt();
        if len > 0.0 {
            let dt = tick_delta();
            self.x += self.move_x / len * PLAYER_SPEED * dt;
            self.y += self.move_y / len * PLAYER_SPEED * dt;
            self.x = self.x.clamp(0.0, arena_size);
            self.y = self.y.clamp(0.0, arena_size);
        }
    }

    /// Trigger pressed: automatic weapons start continuous fire, everything
    /// else fires once on the edge.
    pub fn fire_pressed(&mut self, now_ms: u64) -> Vec<Projectile> {
        self.fire_held = true;
        let (x, y, aim, id, alive) = (self.x, self.y, self.aim, self.id, self.is_alive());
        match self.inventory.active_weapon_mut() {
            Some(weapon) if alive => {
                if weapon.spec().fire_mode == FireMode::HeldAutomatic {
                    weapon.set_trigger_held(true);
                    Vec::new()
                } else {
                    weapon
                        .try_fire(now_ms, x, y, aim, id)
                        .unwrap_or_default()
                }
            }
            _ => Vec::new(),
        }
    }

    /// Trigger released: stops continuous fire immediately, no queued shots
    pub fn fire_released(&mut self) {
        self.fire_held = false;
        if let Some(weapon) = self.inventory.active_weapon_mut() {
            weapon.set_trigger_held(false);
        }
    }

    /// Per-tick fire re-evaluation for held-automatic weapons
    pub fn tick_fire(&mut self, now_ms: u64) -> Vec<Projectile> {
        if !self.fire_held || !self.is_alive() {
            return Vec::new();
        }
        let (x, y, aim, id) = (self.x, self.y, self.aim, self.id);
        match self.inventory.active_weapon_mut() {
            Some(weapon) if weapon.spec().fire_mode == FireMode::HeldAutomatic => {
                weapon.set_trigger_held(true);
                weapon.try_fire(now_ms, x, y, aim, id).unwrap_or_default()
            }
            _ => Vec::new(),
        }
    }

    /// Refill the active weapon from the player's ammo reserve
    pub fn reload_active(&mut self) -> Vec<Event> {
        let kind = match self.inventory.active_weapon() {
            Some(weapon) => weapon.kind,
            None => return Vec::new(),
        };

        let reserve = self.inventory.ammo_reserve(kind);
        if reserve == 0 {
            return vec![Event::notify("No ammo available!", 2000)];
        }

        let transferred = self
            .inventory
            .active_weapon_mut()
            .map(|weapon| weapon.reload(reserve))
            .unwrap_or(0);
        self.inventory.take_ammo_reserve(kind, transferred);

        if transferred > 0 {
            vec![Event::notify(format!("Reloaded {transferred} rounds"), 2000)]
        } else {
            Vec::new()
        }
    }

    /// Equip the weapon in a 0-based slot (occupied slots only)
    pub fn select_slot(&mut self, index: usize) {
        self.inventory.select_slot(index);
        self.sync_trigger();
    }

    /// Destroy the weapon in a 0-based slot
    pub fn remove_slot(&mut self, index: usize) {
        self.inventory.remove_slot(index);
    }

    pub fn toggle_bag(&mut self) {
        self.bag_open = !self.bag_open;
    }

    /// Dispatch a world item into inventory/armor/health state.
    ///
    /// The caller destroys the item afterwards in every case, even when the
    /// dispatch rejects it (full inventory) or the tag is unrecognized -
    /// long-standing behavior the rest of the game relies on.
    pub fn resolve_pickup(&mut self, item: &Pickup) -> Vec<Event> {
        let mut events = Vec::new();
        match item.tag {
            PickupTag::Weapon => {
                if let Some(kind) = item.weapon_kind() {
                    match self.inventory.add_weapon(kind) {
                        Ok(_) => self.sync_trigger(),
                        Err(InventoryError::Full) => {
                            events
                                .push(Event::notify("You can only carry 3 guns at a time.", 3000));
                        }
                    }
                }
            }
            PickupTag::Helmet => self.vitals.equip(ArmorKind::Helmet),
            PickupTag::Vest => self.vitals.equip(ArmorKind::Vest),
            PickupTag::AmmoCrate => {
                if let Some(kind) = item.ammo_kind() {
                    let amount = ammo_crate_amount(kind);
                    self.inventory.add_ammo_reserve(kind, amount);
                    events.push(Event::notify(
                        format!("+{amount} {} ammo", kind.label()),
                        2000,
                    ));
                }
            }
            PickupTag::Consumable => {
                self.inventory.add_consumable(item.identifier.clone());
            }
        }
        events
    }

    /// Clear the overlap reference if the consumed item matches it
    pub fn clear_overlap_if(&mut self, id: Uuid) {
        if self.overlapping_pickup == Some(id) {
            self.overlapping_pickup = None;
        }
    }

    /// Keep the active weapon's trigger flag in step with the fire-held
    /// state after equip changes
    fn sync_trigger(&mut self) {
        let held = self.fire_held;
        if let Some(weapon) = self.inventory.active_weapon_mut() {
            weapon.set_trigger_held(held);
        }
    }
}
