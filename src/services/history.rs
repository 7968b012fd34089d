use thiserror::Error;

use crate::api::{ApiClient, ApiError};
use crate::models::{Message, UserRecord};

/// Result of the two-step history lookup: who the user is plus their
/// conversation, in server order.
#[derive(Debug)]
pub struct HistorySnapshot {
    pub user: UserRecord,
    pub messages: Vec<Message>,
}

/// Display strings are exactly the user-facing messages the history view
/// shows.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Email not found. Please register first.")]
    NotRegistered,

    #[error("Failed to load conversation history.")]
    Unavailable,

    #[error("Failed to connect to server. Please try again.")]
    Connection(#[source] ApiError),
}

/// Fetch user info, then the conversation. The second request is only
/// issued when the lookup succeeds.
pub async fn load_history(api: &ApiClient, email: &str) -> Result<HistorySnapshot, HistoryError> {
    let user = api.lookup_user(email).await.map_err(|e| match e {
        ApiError::Rejected(_) => HistoryError::NotRegistered,
        other => HistoryError::Connection(other),
    })?;

    let messages = api.fetch_history(email).await.map_err(|e| match e {
        ApiError::Rejected(_) => HistoryError::Unavailable,
        other => HistoryError::Connection(other),
    })?;

    Ok(HistorySnapshot { user, messages })
}
