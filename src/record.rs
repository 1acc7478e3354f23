//! Canonical user schema shared by the store, the edit tracker and the gateway
//! adapter. Remote payload shapes never leak past [`crate::gateway::wire`].

use crate::error::DraftError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Identity of a record in the collection store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Assigned by the server.
    Remote(u64),
    /// Generated locally; the server has never seen this record under this id.
    Local(Uuid),
}

impl RecordId {
    #[must_use]
    pub fn new_local() -> Self {
        Self::Local(Uuid::new_v4())
    }

    /// Server id, if the record is addressable on the remote resource.
    #[must_use]
    pub const fn remote(self) -> Option<u64> {
        match self {
            Self::Remote(id) => Some(id),
            Self::Local(_) => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(id) => write!(formatter, "{id}"),
            Self::Local(id) => write!(formatter, "{id}"),
        }
    }
}

impl FromStr for RecordId {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if let Ok(id) = trimmed.parse::<u64>() {
            return Ok(Self::Remote(id));
        }
        Uuid::parse_str(trimmed)
            .map(Self::Local)
            .map_err(|_| format!("invalid user id: {trimmed}"))
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self::Remote(id)
    }
}

/// A user row as held in the collection store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UserRecord {
    #[must_use]
    pub fn from_draft(id: RecordId, draft: UserDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            company: draft.company,
            phone: draft.phone,
        }
    }

    #[must_use]
    pub fn to_draft(&self) -> UserDraft {
        UserDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            company: self.company.clone(),
            phone: self.phone.clone(),
        }
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }
}

/// Editable fields of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Company,
    Phone,
}

impl Field {
    pub const ALL: [Self; 5] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Company,
        Self::Phone,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "first name",
            Self::LastName => "last name",
            Self::Email => "email",
            Self::Company => "company",
            Self::Phone => "phone",
        }
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "first" | "firstname" => Ok(Self::FirstName),
            "last" | "lastname" => Ok(Self::LastName),
            "email" => Ok(Self::Email),
            "company" | "department" => Ok(Self::Company),
            "phone" => Ok(Self::Phone),
            other => Err(format!("unknown field: {other}")),
        }
    }
}

/// In-progress field values for a record that is being added or edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UserDraft {
    /// Sets a single field. A blank phone clears it.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::FirstName => self.first_name = value,
            Field::LastName => self.last_name = value,
            Field::Email => self.email = value,
            Field::Company => self.company = value,
            Field::Phone => self.phone = non_blank(Some(value)),
        }
    }

    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Company => &self.company,
            Field::Phone => self.phone.as_deref().unwrap_or(""),
        }
    }

    /// Checks required-field presence.
    ///
    /// # Errors
    /// Returns the first blank required field.
    pub fn validate(&self) -> Result<(), DraftError> {
        for field in [Field::FirstName, Field::LastName, Field::Email, Field::Company] {
            if self.get(field).trim().is_empty() {
                return Err(DraftError::MissingField(field.label()));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }

    /// Builds the record to store after a successful update.
    ///
    /// Echoed fields win when present and non-blank; anything missing falls back
    /// to the submitted draft. If the echoed full name matches what was sent, the
    /// draft's own first/last split is kept so multi-word first names survive.
    #[must_use]
    pub fn reconcile(&self, echo: &RemoteUser) -> Self {
        let first = non_blank(echo.first_name.clone()).unwrap_or_else(|| self.first_name.clone());
        let last = non_blank(echo.last_name.clone()).unwrap_or_else(|| self.last_name.clone());
        let (first_name, last_name) = if join_name(&first, &last) == self.full_name() {
            (self.first_name.clone(), self.last_name.clone())
        } else {
            (first, last)
        };

        Self {
            first_name,
            last_name,
            email: non_blank(echo.email.clone()).unwrap_or_else(|| self.email.clone()),
            company: non_blank(echo.company.clone()).unwrap_or_else(|| self.company.clone()),
            phone: non_blank(echo.phone.clone()).or_else(|| self.phone.clone()),
        }
    }
}

/// A user as returned by the gateway, already mapped onto canonical field
/// names. Every field is optional because echoes may be partial.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteUser {
    pub id: Option<u64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
}

impl RemoteUser {
    /// Fills missing fields with empty strings.
    #[must_use]
    pub fn into_draft(self) -> UserDraft {
        UserDraft {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            company: self.company.unwrap_or_default(),
            phone: non_blank(self.phone),
        }
    }
}

fn join_name(first: &str, last: &str) -> String {
    let first = first.trim();
    let last = last.trim();
    if last.is_empty() {
        first.to_string()
    } else {
        format!("{first} {last}")
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
