//! Weapons - per-kind tuning, fire control and ammo state

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::projectile::Projectile;

/// Weapon kinds available in the game (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponKind {
    /// Balanced starter weapon
    Pistol,
    /// Full-auto while the trigger is held
    AutomaticRifle,
    /// Three-pellet burst, costs 3 rounds per shot
    Shotgun,
    /// Slow but devastating
    SniperRifle,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 4] = [
        WeaponKind::Pistol,
        WeaponKind::AutomaticRifle,
        WeaponKind::Shotgun,
        WeaponKind::SniperRifle,
    ];

    /// Resolve a world-item identifier to a weapon kind
    pub fn from_identifier(ident: &str) -> Option<Self> {
        match ident {
            "pistol" => Some(WeaponKind::Pistol),
            "ak47" => Some(WeaponKind::AutomaticRifle),
            "shotgun" => Some(WeaponKind::Shotgun),
            "sniper" => Some(WeaponKind::SniperRifle),
            _ => None,
        }
    }

    /// Display label used by notifications
    pub fn label(&self) -> &'static str {
        match self {
            WeaponKind::Pistol => "PISTOL",
            WeaponKind::AutomaticRifle => "AK47",
            WeaponKind::Shotgun => "SHOTGUN",
            WeaponKind::SniperRifle => "SNIPER",
        }
    }
}

/// Trigger behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireMode {
    /// Fires once per trigger edge
    SingleTrigger,
    /// Re-evaluated every tick while the trigger is held
    HeldAutomatic,
}

/// Static tuning per weapon kind
#[derive(Debug, Clone, Copy)]
pub struct WeaponSpec {
    /// Magazine capacity
    pub capacity: u32,
    /// Minimum time between shots (ms)
    pub cooldown_ms: u64,
    /// Damage per projectile
    pub damage: i32,
    /// Projectile speed (units/s)
    pub speed: f32,
    /// Projectiles spawned per shot
    pub pellet_count: u32,
    /// Angular offset between pellets (radians)
    pub spread_rad: f32,
    /// Rounds consumed per shot
    pub shot_cost: u32,
    pub fire_mode: FireMode,
}

impl WeaponSpec {
    pub fn for_kind(kind: WeaponKind) -> Self {
        match kind {
            WeaponKind::Pistol => Self {
                capacity: 15,
                cooldown_ms: 500,
                damage: 25,
                speed: 500.0,
                pellet_count: 1,
                spread_rad: 0.0,
                shot_cost: 1,
                fire_mode: FireMode::SingleTrigger,
            },
            WeaponKind::AutomaticRifle => Self {
                capacity: 60,
                cooldown_ms: 100,
                damage: 30,
                speed: 600.0,
                pellet_count: 1,
                spread_rad: 0.0,
                shot_cost: 1,
                fire_mode: FireMode::HeldAutomatic,
            },
            WeaponKind::Shotgun => Self {
                capacity: 10,
                cooldown_ms: 1000,
                damage: 20,
                speed: 700.0,
                pellet_count: 3,
                spread_rad: 0.2,
                shot_cost: 3,
                fire_mode: FireMode::SingleTrigger,
            },
            WeaponKind::SniperRifle => Self {
                capacity: 5,
                cooldown_ms: 2000,
                damage: 100,
                speed: 1000.0,
                pellet_count: 1,
                spread_rad: 0.0,
                shot_cost: 1,
                fire_mode: FireMode::SingleTrigger,
            },
        }
    }
}

/// A weapon instance, owned by exactly one inventory slot
#[derive(Debug, Clone)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub loaded_ammo: u32,
    /// Simulation time of the last successful shot
    last_fired_at: Option<u64>,
    /// External trigger state, only meaningful for HeldAutomatic
    trigger_held: bool,
}

impl Weapon {
    /// Create a weapon with a full magazine
    pub fn new(kind: WeaponKind) -> Self {
        Self {
            kind,
            loaded_ammo: WeaponSpec::for_kind(kind).capacity,
            last_fired_at: None,
            trigger_held: false,
        }
    }

    pub fn spec(&self) -> WeaponSpec {
        WeaponSpec::for_kind(self.kind)
    }

    pub fn capacity(&self) -> u32 {
        self.spec().capacity
    }

    pub fn set_trigger_held(&mut self, held: bool) {
        self.trigger_held = held;
    }

    pub fn trigger_held(&self) -> bool {
        self.trigger_held
    }

    /// Whether a fire attempt would succeed right now
    pub fn can_fire(&self, now_ms: u64) -> bool {
        let spec = self.spec();
        if self.loaded_ammo < spec.shot_cost {
            return false;
        }
        match self.last_fired_at {
            Some(last) => now_ms.saturating_sub(last) >= spec.cooldown_ms,
            None => true,
        }
    }

    /// Attempt to fire from `(x, y)` along `facing`.
    ///
    /// Returns the spawned projectiles, or `None` with no state change when
    /// the magazine, cooldown or trigger gate rejects the shot.
    pub fn try_fire(
        &mut self,
        now_ms: u64,
        x: f32,
        y: f32,
        facing: f32,
        owner_id: Uuid,
    ) -> Option<Vec<Projectile>> {
        let spec = self.spec();
        if spec.fire_mode == FireMode::HeldAutomatic && !self.trigger_held {
            return None;
        }
        if !self.can_fire(now_ms) {
            return None;
        }

        self.last_fired_at = Some(now_ms);
        self.loaded_ammo -= spec.shot_cost;

        let mut projectiles = Vec::with_capacity(spec.pellet_count as usize);
        let half = (spec.pellet_count / 2) as i32;
        for i in -half..=half {
            if projectiles.len() == spec.pellet_count as usize {
                break;
            }
            let angle = facing + i as f32 * spec.spread_rad;
            projectiles.push(Projectile::new(
                owner_id, x, y, angle, spec.damage, spec.speed, now_ms,
            ));
        }
        Some(projectiles)
    }

    /// Transfer rounds from a reserve into the magazine.
    /// Returns the amount actually transferred.
    pub fn reload(&mut self, reserve_available: u32) -> u32 {
        let needed = self.capacity() - self.loaded_ammo;
        let transferred = needed.min(reserve_available);
        self.loaded_ammo += transferred;
        transferred
    }

    /// Add rounds directly to the magazine, clamped to capacity
    pub fn add_ammo(&mut self, amount: u32) {
        self.loaded_ammo = (self.loaded_ammo + amount).min(self.capacity());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fire(weapon: &mut Weapon, now_ms: u64) -> Option<Vec<Projectile>> {
        weapon.try_fire(now_ms, 0.0, 0.0, 0.0, Uuid::new_v4())
    }

    #[test]
    fn fresh_weapon_fires_immediately() {
        let mut pistol = Weapon::new(WeaponKind::Pistol);
        let shots = fire(&mut pistol, 0).expect("fresh pistol should fire");
        assert_eq!(shots.len(), 1);
        assert_eq!(pistol.loaded_ammo, 14);
    }

    #[test]
    fn cooldown_gates_successive_shots() {
        let mut pistol = Weapon::new(WeaponKind::Pistol);
        assert!(fire(&mut pistol, 0).is_some());
        assert!(fire(&mut pistol, 499).is_none());
        assert_eq!(pistol.loaded_ammo, 14);
        assert!(fire(&mut pistol, 500).is_some());
    }

    #[test]
    fn shotgun_requires_three_rounds() {
        let mut shotgun = Weapon::new(WeaponKind::Shotgun);
        for ammo in 0..3 {
            shotgun.loaded_ammo = ammo;
            assert!(fire(&mut shotgun, 10_000).is_none());
            assert_eq!(shotgun.loaded_ammo, ammo);
        }
    }

    #[test]
    fn shotgun_spawns_three_pellets_with_spread() {
        let mut shotgun = Weapon::new(WeaponKind::Shotgun);
        let shots = shotgun
            .try_fire(0, 0.0, 0.0, 1.0, Uuid::new_v4())
            .expect("full shotgun should fire");
        assert_eq!(shots.len(), 3);
        assert_eq!(shotgun.loaded_ammo, 7);

        let spec = WeaponSpec::for_kind(WeaponKind::Shotgun);
        let angles: Vec<f32> = shots
            .iter()
            .map(|p| p.vel_y.atan2(p.vel_x))
            .collect();
        assert!((angles[0] - (1.0 - spec.spread_rad)).abs() < 1e-4);
        assert!((angles[1] - 1.0).abs() < 1e-4);
        assert!((angles[2] - (1.0 + spec.spread_rad)).abs() < 1e-4);
    }

    #[test]
    fn automatic_rifle_needs_held_trigger() {
        let mut rifle = Weapon::new(WeaponKind::AutomaticRifle);
        assert!(fire(&mut rifle, 0).is_none());
        rifle.set_trigger_held(true);
        assert!(fire(&mut rifle, 0).is_some());
        rifle.set_trigger_held(false);
        assert!(fire(&mut rifle, 1000).is_none());
    }

    #[test]
    fn reload_never_overfills() {
        let mut pistol = Weapon::new(WeaponKind::Pistol);
        pistol.loaded_ammo = 5;
        assert_eq!(pistol.reload(100), 10);
        assert_eq!(pistol.loaded_ammo, 15);
        assert_eq!(pistol.reload(100), 0);
    }

    #[test]
    fn reload_limited_by_reserve() {
        let mut pistol = Weapon::new(WeaponKind::Pistol);
        pistol.loaded_ammo = 0;
        assert_eq!(pistol.reload(4), 4);
        assert_eq!(pistol.loaded_ammo, 4);
    }

    #[test]
    fn add_ammo_clamps_to_capacity() {
        let mut sniper = Weapon::new(WeaponKind::SniperRifle);
        sniper.loaded_ammo = 4;
        sniper.add_ammo(50);
        assert_eq!(sniper.loaded_ammo, 5);
    }
}
