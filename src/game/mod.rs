//! Combat simulation core: combatants, weapons, armor, projectiles, pickups

pub mod armor;
pub mod enemy;
pub mod inventory;
pub mod pickup;
pub mod player;
pub mod projectile;
pub mod weapon;
pub mod world;

pub use armor::{ArmorKind, Vitals};
pub use enemy::Enemy;
pub use inventory::{Inventory, InventoryError};
pub use pickup::{Pickup, PickupTag};
pub use player::Player;
pub use projectile::Projectile;
pub use weapon::{FireMode, Weapon, WeaponKind, WeaponSpec};
pub use world::World;
