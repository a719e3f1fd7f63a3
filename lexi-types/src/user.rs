use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Identity returned by the identity service after a successful sign-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

impl AuthUser {
    /// Name used in greetings, falling back to the email address
    pub fn greeting_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub session_token: Uuid,
    pub user: AuthUser,
    pub welcome_message: String,
}
