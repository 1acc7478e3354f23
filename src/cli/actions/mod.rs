pub mod shell;
pub mod users;

// Internal "interpreter" for `Action`.
mod run;

use crate::{
    cli::globals::GlobalArgs,
    record::{RecordId, UserDraft},
};

#[derive(Debug)]
pub enum Action {
    List(GlobalArgs),
    Add(GlobalArgs, UserDraft),
    Update(GlobalArgs, users::UpdateArgs),
    Delete(GlobalArgs, RecordId),
    Shell(GlobalArgs),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
