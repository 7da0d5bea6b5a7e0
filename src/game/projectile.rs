//! Projectiles - short-lived moving hazards spawned by weapons

use uuid::Uuid;

use crate::util::time::tick_delta;

/// Lifetime of a projectile before automatic expiry
pub const PROJECTILE_TTL_MS: u64 = 3000;

/// Projectile hitbox radius
pub const PROJECTILE_RADIUS: f32 = 4.0;

/// Active projectile in the world
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: Uuid,
    /// Weak handle to the firing combatant. The projectile outlives its
    /// firer; resolve-or-skip when the handle is no longer live.
    pub owner_id: Uuid,
    pub x: f32,
    pub y: f32,
    pub vel_x: f32,
    pub vel_y: f32,
    pub damage: i32,
    /// Simulation time at which the projectile is removed
    pub expires_at_ms: u64,
}

impl Projectile {
    /// Create a new projectile travelling along `direction` (radians)
    pub fn new(
        owner_id: Uuid,
        x: f32,
        y: f32,
        direction: f32,
        damage: i32,
        speed: f32,
        now_ms: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            x,
            y,
            vel_x: direction.cos() * speed,
            vel_y: direction.sin() * speed,
            damage,
            expires_at_ms: now_ms + PROJECTILE_TTL_MS,
        }
    }

    /// Integrate position over one tick
    pub fn advance(&mut self) {
        let dt = tick_delta();
        self.x += self.vel_x * dt;
        self.y += self.vel_y * dt;
    }

    /// Whether the projectile has outlived its TTL
    pub fn expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at_ms
    }

    /// Check collision with a circular target
    pub fn check_hit(&self, target_x: f32, target_y: f32, target_radius: f32) -> bool {
        let dx = self.x - target_x;
        let dy = self.y - target_y;
        let dist_sq = dx * dx + dy * dy;
        let combined_radius = PROJECTILE_RADIUS + target_radius;
        dist_sq <= combined_radius * combined_radius
    }
}
