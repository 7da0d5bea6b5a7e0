//! End-to-end simulation scenarios driven through the public API

use arena_sim::game::enemy::Enemy;
use arena_sim::game::pickup::{Pickup, PickupTag};
use arena_sim::game::weapon::WeaponKind;
use arena_sim::game::World;
use arena_sim::session::protocol::{Command, Event};
use arena_sim::session::snapshot::SnapshotBuilder;
use arena_sim::session::Session;
use arena_sim::Config;

fn demo_config(seed: u64) -> Config {
    Config {
        world_seed: Some(seed),
        ..Config::default()
    }
}

#[test]
fn demo_world_matches_the_standard_arena() {
    let world = World::demo(&demo_config(11));

    // Three painkillers pre-loaded in the bag.
    assert_eq!(
        world.player.inventory.bag_contents(),
        ["painkiller", "painkiller", "painkiller"]
    );

    // Helmet, vest, four weapons and four ammo crates on the ground.
    assert_eq!(world.pickups.len(), 10);
    let weapon_items = world
        .pickups
        .iter()
        .filter(|p| p.tag == PickupTag::Weapon)
        .count();
    let crates = world
        .pickups
        .iter()
        .filter(|p| p.tag == PickupTag::AmmoCrate)
        .count();
    assert_eq!(weapon_items, 4);
    assert_eq!(crates, 4);

    assert_eq!(world.enemies.len(), 3);
}

#[test]
fn same_seed_rolls_identical_enemy_loadouts() {
    let a = World::demo(&demo_config(99));
    let b = World::demo(&demo_config(99));

    let loadouts = |world: &World| {
        world
            .enemies
            .iter()
            .map(|e| (e.weapon.kind, e.vitals.max_health()))
            .collect::<Vec<_>>()
    };
    assert_eq!(loadouts(&a), loadouts(&b));
}

#[test]
fn loot_equip_and_fire_flow() {
    let mut world = World::new(21, 4000.0);
    let (px, py) = (world.player.x, world.player.y);
    world
        .pickups
        .push(Pickup::new(px, py, PickupTag::Weapon, "shotgun"));

    // Walk over the item, grab it, fire.
    world.step();
    world.apply_command(Command::Pickup);
    assert!(world.pickups.is_empty());

    world.apply_command(Command::Aim { x: px + 100.0, y: py });
    world.apply_command(Command::FirePressed);
    assert_eq!(world.projectiles.len(), 3);

    let snapshot = SnapshotBuilder::new(1).build(&world);
    let weapon = snapshot.player.active_weapon.expect("shotgun equipped");
    assert_eq!(weapon.kind, WeaponKind::Shotgun);
    assert_eq!(weapon.loaded_ammo, 7);
}

#[test]
fn unresolvable_weapon_identifier_still_consumes_the_item() {
    let mut world = World::new(31, 4000.0);
    let (px, py) = (world.player.x, world.player.y);
    world
        .pickups
        .push(Pickup::new(px, py, PickupTag::Weapon, "bazooka"));

    world.step();
    let events = world.apply_command(Command::Pickup);
    assert!(events.is_empty());
    assert!(world.pickups.is_empty());
    assert_eq!(world.player.inventory.weapon_kinds(), [None, None, None]);
}

#[test]
fn engaged_enemy_eventually_kills_an_idle_player() {
    let mut world = World::new(41, 4000.0);
    let (px, py) = (world.player.x, world.player.y);
    world
        .enemies
        .push(Enemy::with_weapon(px + 600.0, py, WeaponKind::Pistol));

    for _ in 0..120 {
        world.step();
    }
    assert!(world.player.vitals.health() < 100);

    for _ in 0..120 {
        world.step();
    }
    assert!(world.is_over());
}

#[test]
fn dead_enemy_projectiles_keep_flying() {
    let mut world = World::new(51, 4000.0);
    let (px, py) = (world.player.x, world.player.y);
    let mut enemy = Enemy::with_weapon(px + 2000.0, py, WeaponKind::SniperRifle);
    enemy.vitals.apply_damage(99);
    world.enemies.push(enemy);

    // Let the enemy get one shot off, then kill it.
    world.step();
    assert_eq!(world.projectiles.len(), 1);

    world
        .player
        .inventory
        .add_weapon(WeaponKind::SniperRifle)
        .unwrap();
    world.apply_command(Command::Aim { x: px + 2000.0, y: py });
    world.apply_command(Command::FirePressed);

    let mut enemy_died = false;
    for _ in 0..90 {
        for event in world.step() {
            if matches!(event, Event::EnemyKilled { .. }) {
                enemy_died = true;
            }
        }
    }
    assert!(enemy_died);
    // The dead enemy's round carried on and hit the player.
    assert_eq!(world.player.vitals.health(), 0);
    assert!(world.is_over());
}

#[tokio::test]
async fn session_streams_snapshots_reflecting_commands() {
    let world = World::new(61, 4000.0);
    let (session, handle) = Session::new(world);
    let mut events = handle.subscribe();

    let task = tokio::spawn(session.run());
    handle
        .command_tx
        .send(Command::Move { dx: 1.0, dy: 0.0 })
        .await
        .unwrap();

    let mut moved = false;
    for _ in 0..50 {
        if let Ok(Event::Snapshot(snapshot)) = events.recv().await {
            if snapshot.player.x > 2000.0 {
                moved = true;
                break;
            }
        }
    }
    drop(handle);
    task.await.unwrap();
    assert!(moved);
}
