//! In-memory game host implementing every collaborator trait.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::{
    dao::models::{PlayerId, TeamId},
    dto::notification::PendingInviteNotice,
    host::{HostNotifier, LiveRegistry, LiveTeam, PresenceResolver, SessionHandle},
};

const DEFAULT_MAX_TEAM_SIZE: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Presence of a player known to the host.
pub enum Presence {
    /// Connected and playing.
    Online,
    /// Disconnected but still present in the world.
    Sleeping,
}

#[derive(Debug, Clone)]
struct KnownPlayer {
    name: String,
    presence: Option<Presence>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Client RPC captured by [`MemoryHost`].
pub struct SentNotice {
    /// Recipient of the RPC.
    pub player_id: PlayerId,
    /// RPC channel name.
    pub channel: String,
    /// RPC arguments.
    pub notice: PendingInviteNotice,
}

/// Reference host keeping teams and sessions in process memory.
///
/// Teams are enumerated in creation order.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    max_team_size: u32,
    next_team_id: TeamId,
    teams: IndexMap<TeamId, LiveTeam>,
    dirty_marks: HashMap<TeamId, usize>,
    player_to_team: HashMap<PlayerId, TeamId>,
    current_team: HashMap<PlayerId, TeamId>,
    network_updates: HashMap<PlayerId, usize>,
    players: HashMap<PlayerId, KnownPlayer>,
    sent: Vec<SentNotice>,
    restored: Vec<LiveTeam>,
}

impl MemoryHost {
    /// Host with teams enabled and an empty registry.
    pub fn new() -> Self {
        Self::with_max_team_size(DEFAULT_MAX_TEAM_SIZE)
    }

    /// Host with a specific team size limit; `0` disables teams.
    pub fn with_max_team_size(max_team_size: u32) -> Self {
        Self {
            max_team_size,
            next_team_id: 1,
            teams: IndexMap::new(),
            dirty_marks: HashMap::new(),
            player_to_team: HashMap::new(),
            current_team: HashMap::new(),
            network_updates: HashMap::new(),
            players: HashMap::new(),
            sent: Vec::new(),
            restored: Vec::new(),
        }
    }

    /// Make a player reachable with the given presence.
    pub fn set_presence(&mut self, player_id: PlayerId, name: &str, presence: Presence) {
        self.players.insert(
            player_id,
            KnownPlayer {
                name: name.to_string(),
                presence: Some(presence),
            },
        );
    }

    /// Shorthand for [`Presence::Online`].
    pub fn connect(&mut self, player_id: PlayerId, name: &str) {
        self.set_presence(player_id, name, Presence::Online);
    }

    /// Remove the player's session while remembering their name for identity lookups.
    pub fn disconnect(&mut self, player_id: PlayerId) {
        if let Some(player) = self.players.get_mut(&player_id) {
            player.presence = None;
        }
    }

    /// Register a name for a player without any session.
    pub fn remember_name(&mut self, player_id: PlayerId, name: &str) {
        self.players
            .entry(player_id)
            .and_modify(|player| player.name = name.to_string())
            .or_insert_with(|| KnownPlayer {
                name: name.to_string(),
                presence: None,
            });
    }

    /// Insert or replace a live team under its own id, as the engine's own save would.
    pub fn insert_team(&mut self, team: LiveTeam) {
        self.next_team_id = self.next_team_id.max(team.id + 1);
        for &member in &team.members {
            self.player_to_team.insert(member, team.id);
        }
        self.teams.insert(team.id, team);
    }

    /// Drop a team the way a disband does.
    pub fn remove_team(&mut self, team_id: TeamId) -> Option<LiveTeam> {
        let team = self.teams.shift_remove(&team_id)?;
        self.player_to_team.retain(|_, team| *team != team_id);
        self.current_team.retain(|_, team| *team != team_id);
        Some(team)
    }

    /// Mutate a team in place, marking it dirty.
    pub fn edit_team(&mut self, team_id: TeamId, edit: impl FnOnce(&mut LiveTeam)) -> bool {
        let Some(team) = self.teams.get_mut(&team_id) else {
            return false;
        };
        edit(team);
        *self.dirty_marks.entry(team_id).or_default() += 1;
        true
    }

    /// Current team recorded on the player, if set.
    pub fn current_team_of(&self, player_id: PlayerId) -> Option<TeamId> {
        self.current_team.get(&player_id).copied()
    }

    /// Registry back-reference for the player, if registered.
    pub fn membership_of(&self, player_id: PlayerId) -> Option<TeamId> {
        self.player_to_team.get(&player_id).copied()
    }

    /// How many times the team was marked dirty.
    pub fn dirty_count(&self, team_id: TeamId) -> usize {
        self.dirty_marks.get(&team_id).copied().unwrap_or_default()
    }

    /// How many network updates were pushed for the player.
    pub fn network_update_count(&self, player_id: PlayerId) -> usize {
        self.network_updates
            .get(&player_id)
            .copied()
            .unwrap_or_default()
    }

    /// Every client RPC sent so far.
    pub fn sent_notices(&self) -> &[SentNotice] {
        &self.sent
    }

    /// Teams reported through [`HostNotifier::team_restored`], in order.
    pub fn restored_teams(&self) -> &[LiveTeam] {
        &self.restored
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveRegistry for MemoryHost {
    fn max_team_size(&self) -> u32 {
        self.max_team_size
    }

    fn find_team(&self, id: TeamId) -> Option<LiveTeam> {
        self.teams.get(&id).cloned()
    }

    fn create_team(&mut self) -> LiveTeam {
        while self.teams.contains_key(&self.next_team_id) {
            self.next_team_id += 1;
        }
        let team = LiveTeam::new(self.next_team_id, 0);
        self.next_team_id += 1;
        self.teams.insert(team.id, team.clone());
        team
    }

    fn all_teams(&self) -> Vec<LiveTeam> {
        self.teams.values().cloned().collect()
    }

    fn write_team(&mut self, team: &LiveTeam) -> bool {
        self.edit_team(team.id, |live| {
            live.leader_id = team.leader_id;
            live.invites.clone_from(&team.invites);
            live.members.clone_from(&team.members);
        })
    }

    fn set_player_current_team(&mut self, player_id: PlayerId, team_id: TeamId) {
        self.current_team.insert(player_id, team_id);
        *self.network_updates.entry(player_id).or_default() += 1;
    }

    fn register_membership(&mut self, player_id: PlayerId, team_id: TeamId) {
        self.player_to_team.insert(player_id, team_id);
    }
}

impl PresenceResolver for MemoryHost {
    fn resolve_player(&self, player_id: PlayerId) -> Option<SessionHandle> {
        let player = self.players.get(&player_id)?;
        player.presence?;
        Some(SessionHandle {
            player_id,
            display_name: player.name.clone(),
        })
    }

    fn lookup_display_name(&self, player_id: PlayerId) -> Option<String> {
        self.players.get(&player_id).map(|player| player.name.clone())
    }
}

impl HostNotifier for MemoryHost {
    fn notify_client(
        &mut self,
        session: &SessionHandle,
        channel: &str,
        notice: &PendingInviteNotice,
    ) {
        self.sent.push(SentNotice {
            player_id: session.player_id,
            channel: channel.to_string(),
            notice: notice.clone(),
        });
    }

    fn team_restored(&mut self, team: &LiveTeam) {
        self.restored.push(team.clone());
    }
}
