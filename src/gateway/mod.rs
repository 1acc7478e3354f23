//! Remote gateway over the external user resource. Implementations map wire
//! payloads to [`RemoteUser`] and transport failures to [`GatewayError`]; they
//! never touch local state.

pub mod http;
pub mod wire;

pub use self::http::HttpGateway;

use crate::{
    error::GatewayError,
    record::{RemoteUser, UserDraft},
};
use std::future::Future;

/// Collection path of the user resource, relative to the base URL.
pub const USERS_PATH: &str = "/users";

/// The four calls against the user resource. No retries, no idempotency keys.
pub trait RemoteGateway: Send + Sync {
    /// `GET /users`
    fn list(&self) -> impl Future<Output = Result<Vec<RemoteUser>, GatewayError>> + Send;

    /// `POST /users`; the echo may carry a synthetic id.
    fn create(
        &self,
        draft: &UserDraft,
    ) -> impl Future<Output = Result<RemoteUser, GatewayError>> + Send;

    /// `PUT /users/{id}`
    fn update(
        &self,
        id: u64,
        draft: &UserDraft,
    ) -> impl Future<Output = Result<RemoteUser, GatewayError>> + Send;

    /// `DELETE /users/{id}`; success is inferred from the status alone.
    fn delete(&self, id: u64) -> impl Future<Output = Result<(), GatewayError>> + Send;
}
