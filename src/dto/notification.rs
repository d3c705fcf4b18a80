use serde::Serialize;

use crate::dao::models::{PlayerId, TeamId};

/// Client RPC channel carrying a team invitation that was pending at shutdown.
pub const CLIENT_PENDING_INVITE: &str = "CLIENT_PendingInvite";
/// Leader name used when neither a session nor the identity lookup knows the player.
pub const UNKNOWN_LEADER_NAME: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Arguments of a [`CLIENT_PENDING_INVITE`] RPC, in wire order.
pub struct PendingInviteNotice {
    /// Display name of the inviting team's leader.
    pub leader_name: String,
    /// Leader of the inviting team.
    pub leader_id: PlayerId,
    /// Live team the invite is for.
    pub team_id: TeamId,
}
