//! # usermgr (User Management Client)
//!
//! `usermgr` keeps an in-memory table of user records in sync with a remote
//! REST user resource (`GET /users`, `POST /users`, `PUT /users/{id}`,
//! `DELETE /users/{id}`).
//!
//! ## Reconciliation Model
//!
//! The [`manager::UserManager`] owns the only copy of local state:
//!
//! - **Collection Store:** ordered records, the source of truth for rendering.
//! - **Edit Sessions:** per-record typed drafts with a snapshot taken on entry.
//!   Typing never touches the store, so cancelling always restores the
//!   pre-edit values.
//! - **Error Channel:** one last-write-wins message slot, cleared by the next
//!   successful operation.
//!
//! Local state changes only after the gateway confirms an operation. A failed
//! call leaves the store untouched and writes a flat message to the channel.
//!
//! ## Identity
//!
//! New records take the id echoed by the server. When the echo carries no id,
//! or the id is already present locally (fixture backends echo the same
//! synthetic id for every create), the record gets a client-side
//! [`record::RecordId::Local`] UUID instead, so ids stay unique in the store.

pub mod cli;
pub mod config;
pub mod edit;
pub mod error;
pub mod error_channel;
pub mod gateway;
pub mod manager;
pub mod record;
pub mod store;
pub mod view;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
