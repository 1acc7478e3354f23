//! Maps validated CLI matches to an [`Action`].

use crate::cli::actions::{users::UpdateArgs, Action};
use crate::cli::commands::{
    gateway,
    users::{ARG_ID, CMD_ADD, CMD_DELETE, CMD_LIST, CMD_SHELL, CMD_UPDATE, FIELD_ARGS},
};
use crate::record::{Field, RecordId, UserDraft};
use anyhow::{anyhow, Context, Result};

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if global options are invalid or the subcommand is unknown.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let globals = gateway::Options::parse(matches)?.into_globals()?;

    match matches.subcommand() {
        Some((CMD_LIST, _)) => Ok(Action::List(globals)),
        Some((CMD_ADD, sub)) => {
            let mut draft = UserDraft::default();
            for (field, value) in field_values(sub) {
                draft.set(field, value);
            }
            Ok(Action::Add(globals, draft))
        }
        Some((CMD_UPDATE, sub)) => Ok(Action::Update(
            globals,
            UpdateArgs {
                id: record_id(sub)?,
                changes: field_values(sub),
            },
        )),
        Some((CMD_DELETE, sub)) => Ok(Action::Delete(globals, record_id(sub)?)),
        Some((CMD_SHELL, _)) => Ok(Action::Shell(globals)),
        Some((other, _)) => Err(anyhow!("unknown subcommand: {other}")),
        None => Err(anyhow!("missing subcommand")),
    }
}

fn record_id(matches: &clap::ArgMatches) -> Result<RecordId> {
    matches
        .get_one::<RecordId>(ARG_ID)
        .copied()
        .context("missing required argument: <id>")
}

fn field_values(matches: &clap::ArgMatches) -> Vec<(Field, String)> {
    FIELD_ARGS
        .iter()
        .filter_map(|(arg, field)| {
            matches
                .get_one::<String>(arg)
                .map(|value| (*field, value.clone()))
        })
        .collect()
}
