//! Combat and survival simulation core for a top-down arena shooter.
//!
//! The crate is split the same way the runtime is: `game` holds the
//! synchronous simulation (combatants, weapons, armor, projectiles,
//! pickups and the fixed-order tick), `session` drives a world on a tokio
//! task and speaks the command/event protocol consumed by presentation
//! layers, `config` and `util` carry the runtime plumbing.

pub mod config;
pub mod game;
pub mod session;
pub mod util;

pub use config::Config;
pub use game::World;
pub use session::protocol::{Command, Event, HudSnapshot};
pub use session::{Session, SessionHandle, SessionRegistry};
