//! Autonomous opponents - spawn rolls, pursuit and fire control

use rand::Rng;
use uuid::Uuid;

use crate::util::time::tick_delta;

use super::armor::{ArmorKind, Vitals};
use super::projectile::Projectile;
use super::weapon::{FireMode, Weapon, WeaponKind};

/// Enemy movement speed while pursuing, in units per second
pub const ENEMY_SPEED: f32 = 100.0;

/// Outside this distance the enemy holds position
pub const PURSUE_RANGE: f32 = 5000.0;

/// At or inside this distance the enemy fires instead of advancing
pub const ENGAGE_RANGE: f32 = 2500.0;

/// Minimum time between enemy fire opportunities
pub const FIRE_WINDOW_MS: u64 = 300;

/// An autonomous combatant. Equipment is rolled once at spawn; ammo is
/// resupplied on demand rather than drawn from a reserve.
#[derive(Debug)]
pub struct Enemy {
    pub id: Uuid,
    pub x: f32,
    pub y: f32,
    pub vitals: Vitals,
    pub weapon: Weapon,
    /// Weapon facing, re-aimed at the player every tick
    pub aim: f32,
    last_shot_ms: Option<u64>,
}

impl Enemy {
    /// Spawn with independently rolled equipment: a 3-way armor roll
    /// {bare, helmet, helmet+vest} and a 4-way weapon roll.
    pub fn spawn<R: Rng>(x: f32, y: f32, rng: &mut R) -> Self {
        let mut vitals = Vitals::new();
        match rng.gen_range(0..3) {
            1 => vitals.equip(ArmorKind::Helmet),
            2 => {
                vitals.equip(ArmorKind::Helmet);
                vitals.equip(ArmorKind::Vest);
            }
            _ => {}
        }

        let kind = WeaponKind::ALL[rng.gen_range(0..WeaponKind::ALL.len())];

        Self {
            id: Uuid::new_v4(),
            x,
            y,
            vitals,
            weapon: Weapon::new(kind),
            aim: 0.0,
            last_shot_ms: None,
        }
    }

    /// Fixed loadout constructor for tests and scripted arenas
    pub fn with_weapon(x: f32, y: f32, kind: WeaponKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            x,
            y,
            vitals: Vitals::new(),
            weapon: Weapon::new(kind),
            aim: 0.0,
            last_shot_ms: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.vitals.is_dead()
    }

    /// One AI tick: pursue or engage the player, re-aim the weapon.
    /// Returns any projectiles fired.
    pub fn update(
        &mut self,
        now_ms: u64,
        player_x: f32,
        player_y: f32,
        arena_size: f32,
    ) -> Vec<Projectile> {
        let dx = player_x - self.x;
        let dy = player_y - self.y;
        let distance = (dx * dx + dy * dy).sqrt();

        // The weapon tracks the player whether or not it fires.
        self.aim = dy.atan2(dx);

        if distance < PURSUE_RANGE && distance > ENGAGE_RANGE {
            let dt = tick_delta();
            self.x = (self.x + self.aim.cos() * ENEMY_SPEED * dt).clamp(0.0, arena_size);
            self.y = (self.y + self.aim.sin() * ENEMY_SPEED * dt).clamp(0.0, arena_size);
        }

        let window_open = match self.last_shot_ms {
            Some(last) => now_ms > last + FIRE_WINDOW_MS,
            None => true,
        };

        if distance <= ENGAGE_RANGE && window_open {
            // Unlimited on-demand resupply: an empty magazine refills to the
            // kind's capacity before the attempt.
            if self.weapon.loaded_ammo == 0 {
                self.weapon.add_ammo(self.weapon.capacity());
            }

            if self.weapon.spec().fire_mode == FireMode::HeldAutomatic {
                self.weapon.set_trigger_held(true);
            }

            // The window is spent whether or not the shot lands a cooldown.
            self.last_shot_ms = Some(now_ms);
            return self
                .weapon
                .try_fire(now_ms, self.x, self.y, self.aim, self.id)
                .unwrap_or_default();
        }

        Vec::new()
    }
}
