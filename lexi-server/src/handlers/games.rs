use std::sync::Arc;

use warp::http::StatusCode;

use lexi_core::RngSource;
use lexi_types::{
    GameError, GameKind, HangmanGuessRequest, QuizChoiceRequest, ScrambleGuessRequest,
    StartGameRequest, TurnResponse,
};

use super::{JsonReply, authenticate, game_error_reply, json_reply};
use crate::dictionary::DictionaryClient;
use crate::game_manager::GameManager;
use crate::session::SessionRegistry;

fn turn_reply(result: Result<TurnResponse, GameError>) -> JsonReply {
    match result {
        Ok(response) => json_reply(&response, StatusCode::OK),
        Err(e) => game_error_reply(&e),
    }
}

/// Start a game. Scramble and hangman open with a word confirmed by the
/// live dictionary when it is reachable.
pub async fn handle_start_game(
    request: StartGameRequest,
    auth_header: Option<String>,
    sessions: Arc<SessionRegistry>,
    game_manager: Arc<GameManager>,
    dictionary: Arc<DictionaryClient>,
) -> Result<JsonReply, warp::Rejection> {
    let session = match authenticate(&sessions, auth_header) {
        Ok(session) => session,
        Err(reply) => return Ok(reply),
    };

    let seed_word = match request.kind {
        GameKind::Scramble | GameKind::Hangman => {
            let mut rng = RngSource::from_os();
            dictionary
                .random_word(&game_manager.pools().words, &mut rng)
                .await
        }
        GameKind::Quiz => None,
    };

    match game_manager
        .start_game(&session.user.uid, request.kind, seed_word.as_deref())
        .await
    {
        Ok(view) => Ok(json_reply(&view, StatusCode::CREATED)),
        Err(e) => Ok(game_error_reply(&e)),
    }
}

pub async fn handle_current_game(
    auth_header: Option<String>,
    sessions: Arc<SessionRegistry>,
    game_manager: Arc<GameManager>,
) -> Result<JsonReply, warp::Rejection> {
    let session = match authenticate(&sessions, auth_header) {
        Ok(session) => session,
        Err(reply) => return Ok(reply),
    };

    match game_manager.current_game(&session.user.uid).await {
        Some(view) => Ok(json_reply(&view, StatusCode::OK)),
        None => Ok(game_error_reply(&GameError::NoActiveGame)),
    }
}

/// Back to game selection
pub async fn handle_end_game(
    auth_header: Option<String>,
    sessions: Arc<SessionRegistry>,
    game_manager: Arc<GameManager>,
) -> Result<JsonReply, warp::Rejection> {
    let session = match authenticate(&sessions, auth_header) {
        Ok(session) => session,
        Err(reply) => return Ok(reply),
    };

    match game_manager.end_game(&session.user.uid).await {
        Some(view) => Ok(json_reply(&view, StatusCode::OK)),
        None => Ok(game_error_reply(&GameError::NoActiveGame)),
    }
}

pub async fn handle_scramble_guess(
    request: ScrambleGuessRequest,
    auth_header: Option<String>,
    sessions: Arc<SessionRegistry>,
    game_manager: Arc<GameManager>,
) -> Result<JsonReply, warp::Rejection> {
    let session = match authenticate(&sessions, auth_header) {
        Ok(session) => session,
        Err(reply) => return Ok(reply),
    };
    let result = game_manager
        .submit_scramble_guess(&session.user.uid, &request.guess)
        .await;
    Ok(turn_reply(result))
}

pub async fn handle_hangman_guess(
    request: HangmanGuessRequest,
    auth_header: Option<String>,
    sessions: Arc<SessionRegistry>,
    game_manager: Arc<GameManager>,
) -> Result<JsonReply, warp::Rejection> {
    let session = match authenticate(&sessions, auth_header) {
        Ok(session) => session,
        Err(reply) => return Ok(reply),
    };
    let result = game_manager
        .guess_letter(&session.user.uid, &request.letter)
        .await;
    Ok(turn_reply(result))
}

pub async fn handle_quiz_choice(
    request: QuizChoiceRequest,
    auth_header: Option<String>,
    sessions: Arc<SessionRegistry>,
    game_manager: Arc<GameManager>,
) -> Result<JsonReply, warp::Rejection> {
    let session = match authenticate(&sessions, auth_header) {
        Ok(session) => session,
        Err(reply) => return Ok(reply),
    };
    let result = game_manager
        .submit_quiz_choice(&session.user.uid, &request.choice)
        .await;
    Ok(turn_reply(result))
}
