//! Host-facing entry points driving the saver through a session.

use std::collections::HashSet;

use crate::{
    activity_log::ActivityLog,
    config::AppConfig,
    dao::{
        models::{PlayerId, TeamRecord},
        team_store::TeamStore,
    },
    dto::events::TeamEvent,
    error::ServiceError,
    host::{GameHost, LiveRegistry},
    services::{
        event_service::handle_team_event,
        invite_service::{InviteDelivery, send_pending_invite},
        restore_service::restore_all,
        snapshot_service::{capture_team, snapshot_all},
    },
    state::{PendingInvites, RecordBook, SaverState},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Counters produced by the startup reconciliation.
pub struct StartupReport {
    /// Live teams that were missing from the store and got captured.
    pub captured: usize,
    /// Stored teams merged back into the live registry.
    pub restored: usize,
    /// Teams in the store after the post-merge snapshot.
    pub saved: usize,
}

/// Saves and restores teams across world restarts.
///
/// The host calls these methods serially from its game loop:
/// [`TeamSaver::init`] when the saver loads, [`TeamSaver::on_server_initialized`] once
/// the world is up, the event methods while running, and [`TeamSaver::unload`] last.
pub struct TeamSaver {
    state: SaverState,
}

impl TeamSaver {
    /// Check that teams are enabled and load the durable store.
    ///
    /// When the host has teams disabled one warning is logged and
    /// [`ServiceError::TeamsDisabled`] is returned; no saver exists for the session.
    pub fn init<R>(
        config: AppConfig,
        store: Box<dyn TeamStore>,
        log: ActivityLog,
        registry: &R,
    ) -> Result<Self, ServiceError>
    where
        R: LiveRegistry + ?Sized,
    {
        let max_team_size = registry.max_team_size();
        if max_team_size < 1 {
            log.warn(
                "Teams are disabled on this server. To enable it, set server variable \"maxteamsize\" to > 0 (default 8)",
            );
            return Err(ServiceError::TeamsDisabled { max_team_size });
        }

        let mut state = SaverState::new(config, store, log);
        state.load();
        Ok(Self { state })
    }

    /// Reconcile the loaded store with the live registry and enable the event hooks.
    ///
    /// Live teams unknown to the store are captured first; stored teams without a live
    /// counterpart are then restored; finally the store is re-snapshotted so it carries
    /// the post-merge live ids.
    pub fn on_server_initialized<H>(&mut self, host: &mut H) -> StartupReport
    where
        H: GameHost + ?Sized,
    {
        let live_teams = host.all_teams();
        let live_ids: HashSet<_> = live_teams.iter().map(|team| team.id).collect();

        let to_restore: Vec<TeamRecord> = self
            .state
            .records()
            .records()
            .filter(|record| !live_ids.contains(&record.team_id))
            .cloned()
            .collect();

        let captured = live_teams
            .iter()
            .filter(|team| capture_team(&mut self.state, team))
            .count();
        if captured > 0 {
            self.state.persist();
            self.state
                .log()
                .info(format!("{captured} teams are saved to data file"));
        }

        let restored = restore_all(&mut self.state, host, &to_restore);
        if restored > 0 {
            self.state
                .log()
                .info(format!("{restored} teams restored from data file"));
        }

        let saved = snapshot_all(&mut self.state, &*host);
        self.state.set_ready(true);

        StartupReport {
            captured,
            restored,
            saved,
        }
    }

    /// Periodic world save: full snapshot as the durability fallback.
    pub fn on_server_save<R>(&mut self, registry: &R) -> Option<usize>
    where
        R: LiveRegistry + ?Sized,
    {
        if !self.state.is_ready() {
            return None;
        }
        Some(snapshot_all(&mut self.state, registry))
    }

    /// The world's persistent data was reset.
    pub fn on_new_save(&mut self) {
        if !self.state.config().wipe_teams_on_map_wipe {
            self.state.log().info(format!(
                "Map wipe detected; keeping {} saved teams",
                self.state.records().len()
            ));
            return;
        }

        self.state.log().warn("Creating a new data file");
        self.state.records_mut().clear();
        self.state.pending_mut().clear();
        self.state.persist();
    }

    /// A player became reachable; deliver any invitation owed to them.
    pub fn on_player_connected<H>(&mut self, host: &mut H, player_id: PlayerId) -> InviteDelivery
    where
        H: GameHost + ?Sized,
    {
        send_pending_invite(&mut self.state, host, player_id)
    }

    /// Mirror a live team change into the store.
    pub fn on_team_event<H>(&mut self, host: &mut H, event: TeamEvent) -> bool
    where
        H: GameHost + ?Sized,
    {
        handle_team_event(&mut self.state, host, event)
    }

    /// Disable the hooks and flush a final snapshot.
    ///
    /// Nothing is written when the startup reconciliation never ran, so an aborted
    /// session cannot overwrite the store with an empty registry.
    pub fn unload<R>(&mut self, registry: &R) -> Option<usize>
    where
        R: LiveRegistry + ?Sized,
    {
        let was_ready = self.state.is_ready();
        self.state.set_ready(false);
        if !was_ready {
            return None;
        }
        Some(snapshot_all(&mut self.state, registry))
    }

    /// Whether the event hooks are live.
    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    /// Durable records currently held.
    pub fn records(&self) -> &RecordBook {
        self.state.records()
    }

    /// Invitations still owed.
    pub fn pending_invites(&self) -> &PendingInvites {
        self.state.pending()
    }
}
