//! Arena Sim - headless driver for the combat simulation core
//!
//! Boots a demo world, runs it as a session and logs the event stream.
//! Presentation layers attach to the same `Session` handle in exactly the
//! way this binary does: commands in, events and snapshots out.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use arena_sim::game::World;
use arena_sim::session::protocol::Event;
use arena_sim::session::{Session, SessionRegistry};
use arena_sim::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    info!("Starting Arena Sim");
    info!(
        enemies = config.enemy_count,
        arena = config.arena_size,
        "World configuration"
    );

    let world = World::demo(&config);
    let (session, handle) = Session::new(world);

    let registry = SessionRegistry::new();
    registry.insert(handle.clone());
    info!(session_id = %handle.id, "Session registered");

    let session_task = tokio::spawn(session.run());

    // Log the event stream until the session ends or we are interrupted.
    let mut events = handle.subscribe();
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(Event::EnemyKilled { enemy_id }) => {
                    info!(%enemy_id, "Enemy killed");
                }
                Ok(Event::Notification { text, .. }) => {
                    info!(notification = %text, "Notification");
                }
                Ok(Event::Snapshot(snapshot)) => {
                    if !snapshot.player.alive {
                        info!(tick = snapshot.tick, "Player died, shutting down");
                        break;
                    }
                }
                Err(_) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down");
                break;
            }
        }
    }

    registry.remove(&handle.id);
    drop(handle);
    let _ = session_task.await;

    info!("Shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}
