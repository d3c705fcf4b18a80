use std::collections::BTreeSet;

use team_saver::{
    TeamSaver,
    activity_log::ActivityLog,
    config::AppConfig,
    dao::{
        models::{StoredData, TeamRecord},
        team_store::{TeamStore, json_file::JsonFileStore, memory::MemoryStore},
    },
    dto::{
        events::TeamEvent,
        notification::{CLIENT_PENDING_INVITE, PendingInviteNotice, UNKNOWN_LEADER_NAME},
    },
    host::{LiveRegistry, LiveTeam, memory::MemoryHost},
    services::invite_service::InviteDelivery,
};
use tempfile::tempdir;

fn record(team_id: u64, leader_id: u64, members: &[u64], invites: &[u64]) -> TeamRecord {
    let mut record = TeamRecord::new(team_id, leader_id);
    record.set_members(members);
    record.set_invites(invites);
    record
}

fn start(store: &dyn TeamStoreClone, host: &mut MemoryHost) -> TeamSaver {
    let mut saver = TeamSaver::init(
        AppConfig::default(),
        store.boxed(),
        ActivityLog::memory(),
        &*host,
    )
    .expect("teams enabled");
    saver.on_server_initialized(host);
    saver
}

trait TeamStoreClone {
    fn boxed(&self) -> Box<dyn TeamStore>;
}

impl TeamStoreClone for MemoryStore {
    fn boxed(&self) -> Box<dyn TeamStore> {
        Box::new(self.clone())
    }
}

impl TeamStoreClone for JsonFileStore {
    fn boxed(&self) -> Box<dyn TeamStore> {
        Box::new(self.clone())
    }
}

type Shape = (u64, BTreeSet<u64>, BTreeSet<u64>);

fn shapes(host: &MemoryHost) -> BTreeSet<Shape> {
    host.all_teams()
        .into_iter()
        .map(|team| {
            (
                team.leader_id,
                team.members.into_iter().collect(),
                team.invites.into_iter().collect(),
            )
        })
        .collect()
}

#[test]
fn pending_invite_scenario_delivers_exactly_once() {
    let store = MemoryStore::with_data(&StoredData::new(vec![record(
        5,
        100,
        &[100, 101],
        &[102],
    )]))
    .unwrap();

    let mut host = MemoryHost::new();
    host.connect(101, "online member");
    host.remember_name(102, "invitee");

    let mut saver = start(&store, &mut host);

    let team = host.all_teams().pop().expect("team restored");
    assert_eq!(team.leader_id, 100);
    assert_eq!(team.members, vec![100, 101]);
    assert_eq!(host.current_team_of(101), Some(team.id));
    assert_eq!(host.current_team_of(100), None);
    assert_eq!(saver.pending_invites().owed_team(102), Some(team.id));
    assert!(host.sent_notices().is_empty());

    host.connect(102, "invitee");
    assert_eq!(
        saver.on_player_connected(&mut host, 102),
        InviteDelivery::Delivered
    );
    assert_eq!(
        saver.on_player_connected(&mut host, 102),
        InviteDelivery::NothingOwed
    );

    let sent = host.sent_notices();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].player_id, 102);
    assert_eq!(sent[0].channel, CLIENT_PENDING_INVITE);
    assert_eq!(
        sent[0].notice,
        PendingInviteNotice {
            leader_name: UNKNOWN_LEADER_NAME.into(),
            leader_id: 100,
            team_id: team.id,
        }
    );
    assert!(saver.pending_invites().owed_team(102).is_none());
}

#[test]
fn snapshot_then_restore_reproduces_teams() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path(), "TeamSaver");

    let mut before = MemoryHost::new();
    for (leader, members, invites) in [
        (1, vec![1, 2, 3], vec![4]),
        (10, vec![11], vec![]),
        (20, vec![20], vec![21, 22]),
    ] {
        let mut team = before.create_team();
        team.leader_id = leader;
        team.members = members;
        team.invites = invites;
        before.write_team(&team);
    }

    let mut saver = start(&store, &mut before);
    assert_eq!(saver.records().len(), 3);
    saver.unload(&before);

    let mut after = MemoryHost::new();
    let mut saver = start(&store, &mut after);

    assert_eq!(shapes(&after), shapes(&before));
    assert_eq!(after.restored_teams().len(), 3);
    for team in after.all_teams() {
        let stored = saver.records().get(team.id).expect("record under live id");
        assert_eq!(stored.members, team.members);
        assert_eq!(stored.invites, team.invites);
    }
    assert_eq!(saver.unload(&after), Some(3));
}

#[test]
fn repeated_saves_write_identical_files() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path(), "TeamSaver");
    let mut host = MemoryHost::new();
    host.insert_team(LiveTeam {
        id: 3,
        leader_id: 7,
        members: vec![7, 8],
        invites: vec![9],
    });

    let mut saver = start(&store, &mut host);
    let first = std::fs::read(store.path()).unwrap();
    saver.on_server_save(&host);
    let second = std::fs::read(store.path()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn disbanded_team_is_not_restored_again() {
    let store = MemoryStore::new();
    let mut host = MemoryHost::new();
    host.insert_team(LiveTeam {
        id: 8,
        leader_id: 80,
        members: vec![80, 81],
        invites: vec![],
    });
    host.insert_team(LiveTeam::new(9, 90));

    let mut saver = start(&store, &mut host);
    host.remove_team(8);
    assert!(saver.on_team_event(&mut host, TeamEvent::TeamDisbanded { team_id: 8 }));
    assert!(!saver.records().contains(8));
    drop(saver);

    let mut restarted = MemoryHost::new();
    let saver = start(&store, &mut restarted);

    assert_eq!(restarted.all_teams().len(), 1);
    assert_eq!(restarted.all_teams()[0].leader_id, 90);
    assert_eq!(saver.records().len(), 1);
}

#[test]
fn stored_team_matching_a_live_team_is_left_alone() {
    let store = MemoryStore::with_data(&StoredData::new(vec![record(4, 40, &[40], &[])])).unwrap();
    let mut host = MemoryHost::new();
    host.insert_team(LiveTeam {
        id: 4,
        leader_id: 41,
        members: vec![41],
        invites: vec![],
    });

    let saver = start(&store, &mut host);

    assert_eq!(host.all_teams().len(), 1);
    assert_eq!(host.find_team(4).unwrap().leader_id, 41);
    assert_eq!(host.dirty_count(4), 0);
    assert_eq!(saver.records().get(4).unwrap().leader_id, 41);
}

#[test]
fn live_changes_during_session_are_written_through() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path(), "TeamSaver");
    let mut host = MemoryHost::new();
    let mut saver = start(&store, &mut host);

    let mut team = host.create_team();
    team.leader_id = 1;
    team.members = vec![1];
    host.write_team(&team);
    saver.on_team_event(
        &mut host,
        TeamEvent::TeamCreated {
            team_id: team.id,
            leader_id: 1,
        },
    );

    host.edit_team(team.id, |live| live.invites.push(2));
    saver.on_team_event(
        &mut host,
        TeamEvent::InviteCreated {
            team_id: team.id,
            invitee_id: 2,
        },
    );

    let on_disk = store.load().unwrap().expect("data written");
    assert_eq!(on_disk.teams, vec![record(team.id, 1, &[1], &[2])]);
    assert_eq!(saver.pending_invites().owed_team(2), Some(team.id));
}
