//! Simulation sessions - the tick loop driving a world
//!
//! A session owns its `World` outright: commands arrive over an mpsc
//! channel, events and snapshots leave over a broadcast channel, and all
//! simulation state mutates synchronously inside the tick. There is no
//! locking because nothing else can reach the world.

pub mod protocol;
pub mod snapshot;

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{broadcast, mpsc};
use tokio::time::interval;
use tracing::info;
use uuid::Uuid;

use crate::game::world::World;
use crate::util::time::{SIMULATION_TPS, SNAPSHOT_TPS, TICK_DURATION_MILLIS};

use self::protocol::{Command, Event};
use self::snapshot::SnapshotBuilder;

/// Handle to a running session
#[derive(Clone)]
pub struct SessionHandle {
    pub id: Uuid,
    pub command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<Event>,
}

impl SessionHandle {
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }
}

/// Registry of all active sessions
pub struct SessionRegistry {
    sessions: DashMap<Uuid, SessionHandle>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<SessionHandle> {
        self.sessions.get(id).map(|s| s.value().clone())
    }

    pub fn insert(&self, handle: SessionHandle) {
        self.sessions.insert(handle.id, handle);
    }

    pub fn remove(&self, id: &Uuid) -> Option<SessionHandle> {
        self.sessions.remove(id).map(|(_, h)| h)
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A running simulation: one world, one task, fixed-step ticks
pub struct Session {
    id: Uuid,
    world: World,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<Event>,
    snapshot_builder: SnapshotBuilder,
}

impl Session {
    pub fn new(world: World) -> (Self, SessionHandle) {
        let id = Uuid::new_v4();
        let (command_tx, command_rx) = mpsc::channel(256);
        let (event_tx, _) = broadcast::channel(64);

        let handle = SessionHandle {
            id,
            command_tx,
            event_tx: event_tx.clone(),
        };

        let snapshot_interval = SIMULATION_TPS / SNAPSHOT_TPS;
        let session = Self {
            id,
            world,
            command_rx,
            event_tx,
            snapshot_builder: SnapshotBuilder::new(snapshot_interval),
        };

        (session, handle)
    }

    /// Run the fixed-step tick loop until the player dies or every command
    /// sender is dropped.
    pub async fn run(mut self) {
        info!(session_id = %self.id, "Session started");

        let tick_duration = Duration::from_millis(TICK_DURATION_MILLIS);
        let mut tick_interval = interval(tick_duration);
        tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tick_interval.tick().await;

            // Input resolves before anything else in the tick.
            let disconnected = self.process_commands();

            let events = self.world.step();
            for event in events {
                let _ = self.event_tx.send(event);
            }

            if self.snapshot_builder.should_send() {
                let snapshot = self.snapshot_builder.build(&self.world);
                let _ = self.event_tx.send(Event::Snapshot(snapshot));
            }

            if self.world.is_over() {
                info!(session_id = %self.id, tick = self.world.tick, "Session over");
                let snapshot = self.snapshot_builder.build(&self.world);
                let _ = self.event_tx.send(Event::Snapshot(snapshot));
                break;
            }

            if disconnected {
                info!(session_id = %self.id, "All command senders dropped, stopping session");
                break;
            }
        }
    }

    /// Drain pending commands. Returns true when the channel is closed.
    fn process_commands(&mut self) -> bool {
        loop {
            match self.command_rx.try_recv() {
                Ok(command) => {
                    for event in self.world.apply_command(command) {
                        let _ = self.event_tx.send(event);
                    }
                }
                Err(mpsc::error::TryRecvError::Empty) => return false,
                Err(mpsc::error::TryRecvError::Disconnected) => return true,
            }
        }
    }
}
