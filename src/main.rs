//! Operator tool for the team-saver data file: print the stored teams or wipe them.

use std::env;

use anyhow::{Context, bail};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use team_saver::{
    activity_log::ActivityLog,
    config::AppConfig,
    dao::{
        models::StoredData,
        team_store::{TeamStore, json_file::JsonFileStore},
    },
    error::ServiceError,
};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let store = JsonFileStore::new(&config.data_dir, &config.store_name);
    let command = env::args().nth(1).unwrap_or_else(|| "inspect".into());

    match command.as_str() {
        "inspect" => {
            let data = inspect(&store)?;
            let rendered =
                serde_json::to_string_pretty(&data).context("rendering stored teams")?;
            println!("{rendered}");
        }
        "wipe" => {
            wipe(&store).context("wiping stored teams")?;
            ActivityLog::file(&config.log_file).warn("Creating a new data file");
        }
        other => bail!("unknown command `{other}`; expected `inspect` or `wipe`"),
    }

    Ok(())
}

/// Load the data file, treating a missing file as an empty store.
fn inspect(store: &JsonFileStore) -> Result<StoredData, ServiceError> {
    let data = store.load()?.unwrap_or_default();
    info!(
        path = %store.path().display(),
        version = data.version,
        teams = data.teams.len(),
        "inspected team data"
    );
    for team in &data.teams {
        info!(
            team_id = team.team_id,
            leader_id = team.leader_id,
            members = team.members.len(),
            invites = team.invites.len(),
            "stored team"
        );
    }
    Ok(data)
}

/// Replace the data file with an empty container.
fn wipe(store: &JsonFileStore) -> Result<(), ServiceError> {
    store.save(&StoredData::default())?;
    info!(path = %store.path().display(), "team data wiped");
    Ok(())
}

/// Configure tracing subscribers so logs go to stderr with an env-driven filter.
fn init_tracing() {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
