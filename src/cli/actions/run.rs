use crate::cli::actions::{shell, users, Action};
use anyhow::Result;

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::List(globals) => users::list(&globals).await,
        Action::Add(globals, draft) => users::add(&globals, draft).await,
        Action::Update(globals, args) => users::update(&globals, args).await,
        Action::Delete(globals, id) => users::delete(&globals, id).await,
        Action::Shell(globals) => shell::execute(&globals).await,
    }
}
