//! World state and the fixed-order simulation tick

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::config::Config;
use crate::session::protocol::{Command, Event};
use crate::util::time::SimClock;

use super::enemy::Enemy;
use super::pickup::{Pickup, PickupTag, PICKUP_RADIUS};
use super::player::{Player, COMBATANT_RADIUS};
use super::projectile::Projectile;

/// The whole simulation state, owned by the session task and passed
/// explicitly to every update - no ambient globals.
pub struct World {
    pub tick: u64,
    clock: SimClock,
    arena_size: f32,
    rng: ChaCha8Rng,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub pickups: Vec<Pickup>,
}

impl World {
    pub fn new(seed: u64, arena_size: f32) -> Self {
        Self {
            tick: 0,
            clock: SimClock::new(),
            arena_size,
            rng: ChaCha8Rng::seed_from_u64(seed),
            player: Player::new(arena_size / 2.0, arena_size / 2.0),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            pickups: Vec::new(),
        }
    }

    /// Build the standard starting arena: the player with a few painkillers
    /// in the bag, armor, weapons and ammo crates on the ground, and a
    /// handful of randomly equipped enemies.
    pub fn demo(config: &Config) -> Self {
        let seed = config.world_seed.unwrap_or_else(rand::random);
        let mut world = Self::new(seed, config.arena_size);
        info!(seed, "Building demo arena");

        world.player.x = 800.0;
        world.player.y = 600.0;
        for _ in 0..3 {
            world.player.inventory.add_consumable("painkiller");
        }

        world.pickups.push(Pickup::new(1300.0, 300.0, PickupTag::Vest, "vest"));
        world
            .pickups
            .push(Pickup::new(500.0, 300.0, PickupTag::Helmet, "helmet"));

        for (ident, x) in [
            ("pistol", 1000.0),
            ("ak47", 1300.0),
            ("shotgun", 1600.0),
            ("sniper", 1900.0),
        ] {
            world
                .pickups
                .push(Pickup::new(x, 500.0, PickupTag::Weapon, ident));
            world.pickups.push(Pickup::new(
                x,
                400.0,
                PickupTag::AmmoCrate,
                format!("{ident}_ammo"),
            ));
        }

        for _ in 0..config.enemy_count {
            let x = world.rng.gen_range(0.0..config.arena_size);
            let y = world.rng.gen_range(0.0..config.arena_size);
            let enemy = Enemy::spawn(x, y, &mut world.rng);
            debug!(enemy_id = %enemy.id, weapon = ?enemy.weapon.kind, "Spawned enemy");
            world.enemies.push(enemy);
        }

        world
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn is_over(&self) -> bool {
        !self.player.is_alive()
    }

    /// Apply one decoded input command. Runs before the tick so player
    /// intent always resolves ahead of enemy decisions.
    pub fn apply_command(&mut self, command: Command) -> Vec<Event> {
        let now = self.clock.now_ms();
        match command {
            Command::SelectSlot { slot } => {
                if let Some(index) = Self::slot_index(slot) {
                    self.player.select_slot(index);
                }
                Vec::new()
            }
            Command::FirePressed => {
                let shots = self.player.fire_pressed(now);
                self.projectiles.extend(shots);
                Vec::new()
            }
            Command::FireReleased => {
                self.player.fire_released();
                Vec::new()
            }
            Command::Reload => self.player.reload_active(),
            Command::Pickup => self.request_pickup(),
            Command::ToggleBag => {
                self.player.toggle_bag();
                Vec::new()
            }
            Command::RemoveWeapon { slot } => {
                if let Some(index) = Self::slot_index(slot) {
                    self.player.remove_slot(index);
                }
                Vec::new()
            }
            Command::RemoveConsumable { id } => {
                self.player.inventory.remove_consumable(&id);
                Vec::new()
            }
            Command::Move { dx, dy } => {
                self.player.set_move_input(dx, dy);
                Vec::new()
            }
            Command::Aim { x, y } => {
                self.player.aim_at(x, y);
                Vec::new()
            }
        }
    }

    /// Advance the simulation by one fixed tick.
    ///
    /// Order is load-bearing: player movement, then enemy AI, then
    /// projectile advancement and expiry, then collision resolution, then
    /// death checks - a consumer reading state right after a tick always
    /// sees post-damage health.
    pub fn step(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        self.clock.advance_tick();
        self.tick += 1;
        let now = self.clock.now_ms();
        let player_was_alive = self.player.is_alive();

        // Player movement and continuous fire
        self.player.integrate_movement(self.arena_size);
        self.scan_pickups();
        let shots = self.player.tick_fire(now);
        self.projectiles.extend(shots);

        // Enemy AI
        let (px, py) = (self.player.x, self.player.y);
        let mut enemy_shots = Vec::new();
        for enemy in &mut self.enemies {
            enemy_shots.extend(enemy.update(now, px, py, self.arena_size));
        }
        self.projectiles.extend(enemy_shots);

        // Projectile advancement and TTL expiry against the sim clock
        for projectile in &mut self.projectiles {
            projectile.advance();
        }
        self.projectiles.retain(|p| !p.expired(now));

        // Collision resolution
        self.resolve_collisions();

        // Death checks
        if player_was_alive && !self.player.is_alive() {
            info!(player_id = %self.player.id, tick = self.tick, "Player died");
        }
        let mut killed = Vec::new();
        self.enemies.retain(|enemy| {
            if enemy.is_alive() {
                true
            } else {
                killed.push(enemy.id);
                false
            }
        });
        for enemy_id in killed {
            info!(enemy_id = %enemy_id, tick = self.tick, "Enemy killed");
            events.push(Event::EnemyKilled { enemy_id });
        }

        events
    }

    /// Track the most recently overlapped ground item. A newer overlap
    /// silently replaces the previous candidate; there is no queue.
    fn scan_pickups(&mut self) {
        let reach = PICKUP_RADIUS + COMBATANT_RADIUS;
        for pickup in &self.pickups {
            let dx = pickup.x - self.player.x;
            let dy = pickup.y - self.player.y;
            if dx * dx + dy * dy <= reach * reach {
                self.player.set_overlapping_pickup(pickup.id);
            }
        }
    }

    /// Resolve the pending pickup candidate, if any. The world item is
    /// destroyed even when the dispatch rejects it.
    fn request_pickup(&mut self) -> Vec<Event> {
        let id = match self.player.overlapping_pickup() {
            Some(id) => id,
            None => return Vec::new(),
        };
        let index = match self.pickups.iter().position(|p| p.id == id) {
            Some(index) => index,
            None => return Vec::new(),
        };

        let item = self.pickups.remove(index);
        let events = self.player.resolve_pickup(&item);
        self.player.clear_overlap_if(item.id);
        debug!(pickup_id = %item.id, tag = ?item.tag, "Consumed pickup");
        events
    }

    /// Projectiles damage the first combatant they overlap, never their
    /// owner. A dead owner handle is simply skipped - the projectile flies
    /// on regardless of who fired it.
    fn resolve_collisions(&mut self) {
        let mut surviving = Vec::with_capacity(self.projectiles.len());
        for projectile in self.projectiles.drain(..) {
            let mut consumed = false;

            if self.player.is_alive()
                && projectile.owner_id != self.player.id
                && projectile.check_hit(self.player.x, self.player.y, COMBATANT_RADIUS)
            {
                self.player.vitals.apply_damage(projectile.damage);
                consumed = true;
            }

            if !consumed {
                for enemy in &mut self.enemies {
                    if projectile.owner_id != enemy.id
                        && projectile.check_hit(enemy.x, enemy.y, COMBATANT_RADIUS)
                    {
                        enemy.vitals.apply_damage(projectile.damage);
                        consumed = true;
                        break;
                    }
                }
            }

            if !consumed {
                surviving.push(projectile);
            }
        }
        self.projectiles = surviving;
    }

    fn slot_index(slot: u8) -> Option<usize> {
        (1..=3).contains(&slot).then(|| (slot - 1) as usize)
    }
}
