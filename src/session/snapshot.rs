//! HUD snapshot building

use crate::game::world::World;

use super::protocol::{EnemyView, HudSnapshot, PlayerView, WeaponView};

/// Builds HUD snapshots at a fixed tick cadence
pub struct SnapshotBuilder {
    /// Tick counter since last snapshot
    ticks_since_snapshot: u32,
    /// Snapshot interval in ticks
    snapshot_interval: u32,
}

impl SnapshotBuilder {
    pub fn new(snapshot_interval: u32) -> Self {
        Self {
            ticks_since_snapshot: 0,
            snapshot_interval,
        }
    }

    /// Check if it's time to send a snapshot
    pub fn should_send(&mut self) -> bool {
        self.ticks_since_snapshot += 1;
        if self.ticks_since_snapshot >= self.snapshot_interval {
            self.ticks_since_snapshot = 0;
            true
        } else {
            false
        }
    }

    /// Force snapshot on next check (used after important events)
    pub fn force_next(&mut self) {
        self.ticks_since_snapshot = self.snapshot_interval;
    }

    /// Build a snapshot from the current world state
    pub fn build(&self, world: &World) -> HudSnapshot {
        let player = &world.player;
        let inventory = &player.inventory;

        let active_weapon = inventory.active_weapon().map(|weapon| WeaponView {
            kind: weapon.kind,
            loaded_ammo: weapon.loaded_ammo,
            capacity: weapon.capacity(),
        });

        let ammo_reserve = crate::game::weapon::WeaponKind::ALL
            .iter()
            .map(|&kind| (kind, inventory.ammo_reserve(kind)))
            .collect();

        let enemies: Vec<EnemyView> = world
            .enemies
            .iter()
            .map(|enemy| EnemyView {
                id: enemy.id,
                x: enemy.x,
                y: enemy.y,
                health: enemy.vitals.health(),
                weapon_kind: enemy.weapon.kind,
            })
            .collect();

        HudSnapshot {
            tick: world.tick,
            now_ms: world.now_ms(),
            player: PlayerView {
                x: player.x,
                y: player.y,
                aim: player.aim,
                health: player.vitals.health(),
                max_health: player.vitals.max_health(),
                alive: player.is_alive(),
                active_weapon,
                weapon_slots: inventory.weapon_kinds(),
                ammo_reserve,
                bag: inventory.bag_contents().to_vec(),
                bag_open: player.bag_open(),
            },
            enemies_alive: enemies.len(),
            enemies,
            projectiles_in_flight: world.projectiles.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::weapon::WeaponKind;

    #[test]
    fn cadence_fires_every_interval() {
        let mut builder = SnapshotBuilder::new(3);
        assert!(!builder.should_send());
        assert!(!builder.should_send());
        assert!(builder.should_send());
        assert!(!builder.should_send());
    }

    #[test]
    fn force_next_short_circuits_cadence() {
        let mut builder = SnapshotBuilder::new(10);
        builder.force_next();
        assert!(builder.should_send());
    }

    #[test]
    fn snapshot_reflects_inventory_state() {
        let mut world = World::new(1, 4000.0);
        world.player.inventory.add_weapon(WeaponKind::Shotgun).unwrap();
        world.player.inventory.add_consumable("painkiller");

        let snapshot = SnapshotBuilder::new(1).build(&world);
        let weapon = snapshot.player.active_weapon.expect("shotgun equipped");
        assert_eq!(weapon.kind, WeaponKind::Shotgun);
        assert_eq!(weapon.loaded_ammo, 10);
        assert_eq!(weapon.capacity, 10);
        assert_eq!(snapshot.player.bag, ["painkiller"]);
        assert_eq!(snapshot.player.health, 100);
        assert_eq!(snapshot.player.max_health, 100);
    }
}
