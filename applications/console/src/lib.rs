//! Groove Console - terminal front end for Groove Player
//!
//! Drives the playlist player from line commands on stdin. Audio output is
//! simulated: the backend emits the lifecycle events a browser `<audio>`
//! element would, so playlists, navigation and persistence behave exactly as
//! in the browser build.

pub mod backend;
pub mod commands;
pub mod config;
pub mod session;

pub use backend::{Feedback, SimulatedBackend};
pub use commands::{Command, CommandError};
pub use config::ConsoleConfig;
pub use session::{Outcome, Session};
