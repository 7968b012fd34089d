use serde::{Deserialize, Serialize};

/// Server-side record of a registered user. Only the fields this client
/// renders are kept; the backend sends more.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Payload for `POST /register`. Fields are trimmed by the form before the
/// request is built; no further client-side validation is performed.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationRequest {
    pub email: String,
    pub name: String,
    pub occupation: String,
    pub interests: String,
    pub hobbies: String,
    pub personality: String,
}
