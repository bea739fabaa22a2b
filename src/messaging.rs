/// Messaging platform port.
///
/// The delivery loop only talks to this trait. The Telegram adapter in
/// `telegram.rs` implements it against the live client; tests substitute a
/// fake so the delivery logic runs without a network.
use thiserror::Error;

use crate::config::ResolverStrategy;
use crate::models::ContactRow;

/// Errors raised while resolving a phone number to a recipient
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("{phone} is not in contacts or not on Telegram")]
    NotFound { phone: String },
    #[error("contact import for {phone} failed: {detail}")]
    ImportFailed { phone: String, detail: String },
    #[error("platform request failed: {0}")]
    Platform(String),
}

/// Error raised when a single message could not be delivered
#[derive(Debug, Error)]
#[error("{0}")]
pub struct SendError(pub String);

/// Messaging platform operations used by the delivery loop
pub trait Messenger {
    /// Opaque recipient handle, valid for the lifetime of the session
    type Recipient: Clone;

    /// Resolve a phone number against the account's existing contacts
    async fn resolve_phone(&self, phone: &str) -> Result<Self::Recipient, ResolveError>;

    /// Import the row into the account's contact list, then address the
    /// imported user
    async fn import_contact(&self, row: &ContactRow) -> Result<Self::Recipient, ResolveError>;

    /// Send one text message to a previously resolved recipient
    async fn send_text(&self, recipient: &Self::Recipient, text: &str) -> Result<(), SendError>;
}

/// Resolve one row to a recipient using the configured strategy.
///
/// `DirectLookup` never mutates platform state; `ImportThenResolve` creates
/// or updates a contact entry as a side effect. A failed import does not
/// fall back to a direct lookup.
pub async fn resolve_recipient<M: Messenger>(
    messenger: &M,
    strategy: ResolverStrategy,
    row: &ContactRow,
) -> Result<M::Recipient, ResolveError> {
    match strategy {
        ResolverStrategy::DirectLookup => messenger.resolve_phone(&row.phone).await,
        ResolverStrategy::ImportThenResolve => messenger.import_contact(row).await,
    }
}
