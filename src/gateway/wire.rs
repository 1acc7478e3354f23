//! JSON shapes of the remote user resource and the mapping to canonical
//! records. The fixture API sends `name` as one string and nests the company;
//! some deployments send `firstName`/`lastName` instead, both are accepted.

use crate::record::{RemoteUser, UserDraft};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WireCompany {
    #[serde(default)]
    pub name: Option<String>,
}

/// A user object as received from the server.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct WireUser {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(default, rename = "lastName")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<WireCompany>,
}

/// Request body for create and update. Carries no id and no local UI state.
#[derive(Clone, Debug, Serialize)]
pub struct WireUserPayload {
    pub name: String,
    pub email: String,
    pub company: WireCompany,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl From<&UserDraft> for WireUserPayload {
    fn from(draft: &UserDraft) -> Self {
        Self {
            name: draft.full_name(),
            email: draft.email.trim().to_string(),
            company: WireCompany {
                name: Some(draft.company.trim().to_string()),
            },
            phone: draft.phone.clone(),
        }
    }
}

impl From<WireUser> for RemoteUser {
    fn from(wire: WireUser) -> Self {
        let (first_name, last_name) = match (wire.first_name, wire.last_name, wire.name) {
            (Some(first), last, _) => (Some(first), last),
            (None, _, Some(name)) => {
                let (first, last) = split_name(&name);
                (Some(first), Some(last))
            }
            (None, last, None) => (None, last),
        };

        Self {
            id: wire.id,
            first_name,
            last_name,
            email: wire.email,
            company: wire.company.and_then(|company| company.name),
            phone: wire.phone,
        }
    }
}

/// Splits a display name at the first run of whitespace.
#[must_use]
pub fn split_name(name: &str) -> (String, String) {
    let trimmed = name.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
        None => (trimmed.to_string(), String::new()),
    }
}
