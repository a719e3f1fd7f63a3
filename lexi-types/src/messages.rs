use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{AuthUser, GameKind, GameSessionView, TurnReport};

// Request and response bodies of the HTTP API.

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSignInRequest {
    /// Provider id, e.g. "google.com"
    pub provider: String,
    /// Token issued to the browser by the provider's own sign-in flow
    pub provider_token: String,
}

/// Sign in with an ID token the browser already obtained from the identity service
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TokenSignInRequest {
    pub id_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StartGameRequest {
    pub kind: GameKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScrambleGuessRequest {
    pub guess: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HangmanGuessRequest {
    pub letter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuizChoiceRequest {
    pub choice: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TurnResponse {
    pub report: TurnReport,
    pub session: GameSessionView,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BookmarkResponse {
    pub bookmarked: bool,
    pub bookmarks: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FavoriteWordRequest {
    pub word: String,
}

/// Filters for listing favorite lists. `sort` is "dateCreated" or
/// "alphabetical"; both apply to the words inside each list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct FavoritesQuery {
    pub search: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChangeEmailRequest {
    pub email: String,
}

/// The current password is checked again before the change
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AccountResponse {
    pub user: AuthUser,
    pub message: String,
}
