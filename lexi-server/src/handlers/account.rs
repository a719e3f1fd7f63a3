use std::sync::Arc;

use warp::http::StatusCode;

use lexi_types::{
    AccountResponse, ChangeEmailRequest, ChangePasswordRequest, CredentialsRequest,
    ProviderSignInRequest, SessionInfo, TokenSignInRequest,
};

use super::documents::DocumentServices;
use super::{JsonReply, auth_error_reply, authenticate, json_reply, store_error_reply};
use crate::auth::{AuthError, AuthService, SignInMethod, SignedInUser};
use crate::game_manager::GameManager;
use crate::session::SessionRegistry;

fn open_session(
    sessions: &SessionRegistry,
    method: SignInMethod,
    result: Result<SignedInUser, AuthError>,
) -> JsonReply {
    match result {
        Ok(signed_in) => {
            let welcome_message = method.welcome_message(&signed_in.user);
            let session = sessions.create(signed_in.user, signed_in.id_token);
            json_reply(
                &SessionInfo {
                    session_token: session.token,
                    user: session.user,
                    welcome_message,
                },
                StatusCode::OK,
            )
        }
        Err(e) => auth_error_reply(&e),
    }
}

pub async fn handle_sign_in(
    request: CredentialsRequest,
    auth_service: Arc<AuthService>,
    sessions: Arc<SessionRegistry>,
) -> Result<JsonReply, warp::Rejection> {
    let result = auth_service.sign_in(&request.email, &request.password).await;
    Ok(open_session(&sessions, SignInMethod::Password, result))
}

pub async fn handle_sign_up(
    request: CredentialsRequest,
    auth_service: Arc<AuthService>,
    sessions: Arc<SessionRegistry>,
) -> Result<JsonReply, warp::Rejection> {
    let result = auth_service.sign_up(&request.email, &request.password).await;
    Ok(open_session(&sessions, SignInMethod::SignUp, result))
}

pub async fn handle_provider_sign_in(
    request: ProviderSignInRequest,
    auth_service: Arc<AuthService>,
    sessions: Arc<SessionRegistry>,
) -> Result<JsonReply, warp::Rejection> {
    let result = auth_service
        .sign_in_with_provider(&request.provider, &request.provider_token)
        .await;
    Ok(open_session(&sessions, SignInMethod::Provider, result))
}

pub async fn handle_token_sign_in(
    request: TokenSignInRequest,
    auth_service: Arc<AuthService>,
    sessions: Arc<SessionRegistry>,
) -> Result<JsonReply, warp::Rejection> {
    let result = auth_service
        .verify_id_token(&request.id_token)
        .await
        .map(|user| SignedInUser {
            user,
            id_token: request.id_token.clone(),
        });
    Ok(open_session(&sessions, SignInMethod::IdToken, result))
}

/// Closes the session and ends the user's game
pub async fn handle_sign_out(
    auth_header: Option<String>,
    sessions: Arc<SessionRegistry>,
    game_manager: Arc<GameManager>,
) -> Result<JsonReply, warp::Rejection> {
    let session = match authenticate(&sessions, auth_header) {
        Ok(session) => session,
        Err(reply) => return Ok(reply),
    };

    sessions.remove(&session.token);
    if !sessions.is_signed_in(&session.user.uid) {
        game_manager
            .end_games_for(std::slice::from_ref(&session.user.uid))
            .await;
    }

    Ok(json_reply(
        &serde_json::json!({ "signedOut": true }),
        StatusCode::OK,
    ))
}

pub async fn handle_change_email(
    request: ChangeEmailRequest,
    auth_header: Option<String>,
    auth_service: Arc<AuthService>,
    sessions: Arc<SessionRegistry>,
) -> Result<JsonReply, warp::Rejection> {
    let session = match authenticate(&sessions, auth_header) {
        Ok(session) => session,
        Err(reply) => return Ok(reply),
    };

    let updated = match auth_service
        .update_email(&session.id_token, &request.email)
        .await
    {
        Ok(updated) => updated,
        Err(e) => return Ok(auth_error_reply(&e)),
    };

    sessions.update(&session.token, |s| {
        s.user = updated.user.clone();
        s.id_token = updated.id_token.clone();
    });
    tracing::info!("User {} changed their email", updated.user.uid);

    Ok(json_reply(
        &AccountResponse {
            user: updated.user,
            message: "Email updated successfully!".to_string(),
        },
        StatusCode::OK,
    ))
}

pub async fn handle_change_password(
    request: ChangePasswordRequest,
    auth_header: Option<String>,
    auth_service: Arc<AuthService>,
    sessions: Arc<SessionRegistry>,
) -> Result<JsonReply, warp::Rejection> {
    let session = match authenticate(&sessions, auth_header) {
        Ok(session) => session,
        Err(reply) => return Ok(reply),
    };

    let updated = match auth_service
        .change_password(
            &session.id_token,
            &session.user.email,
            &request.current_password,
            &request.new_password,
        )
        .await
    {
        Ok(updated) => updated,
        Err(e) => return Ok(auth_error_reply(&e)),
    };

    sessions.update(&session.token, |s| s.id_token = updated.id_token.clone());
    tracing::info!("User {} changed their password", updated.user.uid);

    Ok(json_reply(
        &AccountResponse {
            user: updated.user,
            message: "Password updated successfully!".to_string(),
        },
        StatusCode::OK,
    ))
}

/// Removes the settings document and the identity account, then closes
/// every session of the user and ends their game
pub async fn handle_delete_account(
    auth_header: Option<String>,
    auth_service: Arc<AuthService>,
    sessions: Arc<SessionRegistry>,
    game_manager: Arc<GameManager>,
    documents: Arc<DocumentServices>,
) -> Result<JsonReply, warp::Rejection> {
    let session = match authenticate(&sessions, auth_header) {
        Ok(session) => session,
        Err(reply) => return Ok(reply),
    };
    let uid = session.user.uid;

    match documents.settings.delete_settings(&uid).await {
        Ok(()) => {}
        Err(e) if e.is_not_found() => {}
        Err(e) => return Ok(store_error_reply(&e, "delete account")),
    }

    if let Err(e) = auth_service.delete_account(&session.id_token).await {
        return Ok(auth_error_reply(&e));
    }

    sessions.remove_user(&uid);
    game_manager.end_games_for(std::slice::from_ref(&uid)).await;
    tracing::info!("Deleted account of user {}", uid);

    Ok(json_reply(
        &serde_json::json!({ "deleted": true }),
        StatusCode::OK,
    ))
}
