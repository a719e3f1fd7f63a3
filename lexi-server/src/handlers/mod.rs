pub mod account;
pub mod documents;
pub mod games;
pub mod lookup;

use serde::Serialize;
use warp::http::StatusCode;
use warp::reply::{Json, WithStatus};

use lexi_persistence::StoreError;
use lexi_types::{ErrorResponse, GameError};

use crate::auth::AuthError;
use crate::session::{AuthSession, SessionRegistry};

pub type JsonReply = WithStatus<Json>;

pub fn json_reply<T: Serialize>(body: &T, status: StatusCode) -> JsonReply {
    warp::reply::with_status(warp::reply::json(body), status)
}

pub fn error_reply(message: impl Into<String>, status: StatusCode) -> JsonReply {
    json_reply(
        &ErrorResponse {
            error: message.into(),
        },
        status,
    )
}

/// Resolve the caller's session or produce the 401 reply to send instead
pub fn authenticate(
    sessions: &SessionRegistry,
    auth_header: Option<String>,
) -> Result<AuthSession, JsonReply> {
    sessions.authenticate(auth_header.as_deref()).map_err(|e| {
        tracing::debug!("Rejected request: {}", e);
        error_reply(e.to_string(), StatusCode::UNAUTHORIZED)
    })
}

pub fn game_error_reply(error: &GameError) -> JsonReply {
    let status = match error {
        GameError::InvalidLetter { .. } => StatusCode::BAD_REQUEST,
        GameError::NoActiveGame => StatusCode::NOT_FOUND,
        GameError::WrongGameKind { .. } => StatusCode::CONFLICT,
        GameError::EmptyWordPool => {
            tracing::error!("Game could not start: {}", error);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    error_reply(error.to_string(), status)
}

/// Missing documents are 404; every other store failure is logged and
/// reported as a generic 500
pub fn store_error_reply(error: &StoreError, action: &str) -> JsonReply {
    match error {
        StoreError::NotFound { .. } => error_reply(error.to_string(), StatusCode::NOT_FOUND),
        _ => {
            tracing::error!("Failed to {}: {}", action, error);
            error_reply(
                format!("Failed to {}", action),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    }
}

pub fn auth_error_reply(error: &AuthError) -> JsonReply {
    let status = match error {
        AuthError::MissingCredentials => StatusCode::BAD_REQUEST,
        AuthError::EmailInUse => StatusCode::CONFLICT,
        AuthError::ServiceUnavailable | AuthError::JwksFetchError => StatusCode::BAD_GATEWAY,
        AuthError::Rejected(_)
        | AuthError::InvalidToken
        | AuthError::TokenExpired
        | AuthError::KeyNotFound
        | AuthError::InvalidKey => StatusCode::UNAUTHORIZED,
    };
    tracing::warn!("Authentication failed: {}", error);
    error_reply(error.to_string(), status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use warp::Reply;

    #[test]
    fn test_game_error_statuses() {
        let wrong_kind = GameError::WrongGameKind {
            expected: lexi_types::GameKind::Hangman,
            actual: lexi_types::GameKind::Quiz,
        };
        assert_eq!(
            game_error_reply(&wrong_kind).into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            game_error_reply(&GameError::NoActiveGame).into_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_store_error_statuses() {
        let missing = StoreError::not_found("personalNotes", "abc");
        assert_eq!(
            store_error_reply(&missing, "update note").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            store_error_reply(&StoreError::Status(503), "update note")
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
