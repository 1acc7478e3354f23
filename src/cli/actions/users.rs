//! One-shot subcommands. Each mounts a manager (loads the current users),
//! applies a single operation, renders the table and tears the manager down.

use crate::{
    cli::globals::GlobalArgs,
    error::ManagerError,
    gateway::{HttpGateway, RemoteGateway},
    manager::UserManager,
    record::{Field, RecordId, UserDraft, UserRecord},
    view,
};
use anyhow::Result;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateArgs {
    pub id: RecordId,
    pub changes: Vec<(Field, String)>,
}

/// Opens an edit session, types the changes into the draft and saves it.
///
/// # Errors
/// Any manager error from entering edit mode or saving. A failed save leaves
/// the record in edit mode with the store unchanged.
pub async fn apply_update<G: RemoteGateway>(
    manager: &UserManager<G>,
    args: UpdateArgs,
) -> Result<UserRecord, ManagerError> {
    manager.begin_edit(args.id)?;
    for (field, value) in args.changes {
        manager.set_field(args.id, field, value)?;
    }
    manager.save_edit(args.id).await
}

/// Renders the current table to stdout, tears the manager down and converts
/// the operation result for the binary.
///
/// # Errors
/// Returns the operation error, or a serialization error for JSON output.
pub fn report<G: RemoteGateway, T>(
    manager: &UserManager<G>,
    globals: &GlobalArgs,
    result: Result<T, ManagerError>,
) -> Result<T> {
    let output = view::render(
        &manager.rows(),
        manager.last_error().as_deref(),
        globals.output,
    )?;
    println!("{}", output.trim_end());
    manager.teardown();

    Ok(result?)
}

async fn mount(globals: &GlobalArgs) -> Result<UserManager<HttpGateway>> {
    let gateway = HttpGateway::new(&globals.gateway)?;
    debug!("using user resource at {}", gateway.base_url());
    let manager = UserManager::new(gateway, &globals.manager);

    if let Err(err) = manager.load().await {
        report(&manager, globals, Err::<(), _>(err))?;
    }

    Ok(manager)
}

/// # Errors
/// Returns an error if the list call fails.
pub async fn list(globals: &GlobalArgs) -> Result<()> {
    let manager = mount(globals).await?;
    report(&manager, globals, Ok(()))
}

/// # Errors
/// Returns an error if the draft is invalid or the create call fails.
pub async fn add(globals: &GlobalArgs, draft: UserDraft) -> Result<()> {
    let manager = mount(globals).await?;
    let result = manager.add(draft).await;
    report(&manager, globals, result).map(|id| debug!("added user {id}"))
}

/// # Errors
/// Returns an error if the user is unknown or the update call fails.
pub async fn update(globals: &GlobalArgs, args: UpdateArgs) -> Result<()> {
    let manager = mount(globals).await?;
    let result = apply_update(&manager, args).await;
    report(&manager, globals, result).map(|record| debug!("updated user {}", record.id))
}

/// # Errors
/// Returns an error if the user is unknown or the delete call fails.
pub async fn delete(globals: &GlobalArgs, id: RecordId) -> Result<()> {
    let manager = mount(globals).await?;
    let result = manager.delete(id).await;
    report(&manager, globals, result)
}
