//! Library crate for team-saver: persists live team state and reconciles it back into the
//! host's team registry after a restart.

/// Timestamped activity log.
pub mod activity_log;
/// Saver configuration.
pub mod config;
/// Durable team records and their stores.
pub mod dao;
/// Events and notifications exchanged with the host.
pub mod dto;
/// Service-level errors.
pub mod error;
/// Collaborator traits implemented by the game host.
pub mod host;
/// Snapshot, restore and event handling.
pub mod services;
/// Process-scoped saver state.
pub mod state;

pub use services::lifecycle::{StartupReport, TeamSaver};
