use std::sync::Arc;

use warp::http::StatusCode;

use lexi_core::RngSource;
use lexi_types::BookmarkResponse;

use super::{JsonReply, authenticate, error_reply, json_reply};
use crate::dictionary::DictionaryClient;
use crate::session::SessionRegistry;

/// Look a word up and remember it in the caller's recent searches
pub async fn handle_lookup(
    word: String,
    auth_header: Option<String>,
    sessions: Arc<SessionRegistry>,
    dictionary: Arc<DictionaryClient>,
) -> Result<JsonReply, warp::Rejection> {
    let session = match authenticate(&sessions, auth_header) {
        Ok(session) => session,
        Err(reply) => return Ok(reply),
    };

    let word = word.trim().to_string();
    if word.is_empty() {
        return Ok(error_reply("Enter a word to search", StatusCode::BAD_REQUEST));
    }
    sessions.update(&session.token, |s| s.recent_searches.record(&word));

    match dictionary.lookup(&word).await {
        Ok(entries) => Ok(json_reply(&entries, StatusCode::OK)),
        Err(e) => Ok(error_reply(e.to_string(), StatusCode::NOT_FOUND)),
    }
}

pub async fn handle_word_of_the_day(
    dictionary: Arc<DictionaryClient>,
) -> Result<JsonReply, warp::Rejection> {
    let mut rng = RngSource::from_os();
    match dictionary.word_of_the_day(&mut rng).await {
        Ok(entry) => Ok(json_reply(&entry, StatusCode::OK)),
        Err(e) => Ok(error_reply(e.to_string(), StatusCode::NOT_FOUND)),
    }
}

pub async fn handle_recent_searches(
    auth_header: Option<String>,
    sessions: Arc<SessionRegistry>,
) -> Result<JsonReply, warp::Rejection> {
    match authenticate(&sessions, auth_header) {
        Ok(session) => Ok(json_reply(&session.recent_searches.terms(), StatusCode::OK)),
        Err(reply) => Ok(reply),
    }
}

pub async fn handle_bookmarks(
    auth_header: Option<String>,
    sessions: Arc<SessionRegistry>,
) -> Result<JsonReply, warp::Rejection> {
    match authenticate(&sessions, auth_header) {
        Ok(session) => Ok(json_reply(&session.bookmarks.words(), StatusCode::OK)),
        Err(reply) => Ok(reply),
    }
}

pub async fn handle_toggle_bookmark(
    word: String,
    auth_header: Option<String>,
    sessions: Arc<SessionRegistry>,
) -> Result<JsonReply, warp::Rejection> {
    let session = match authenticate(&sessions, auth_header) {
        Ok(session) => session,
        Err(reply) => return Ok(reply),
    };

    let word = word.trim().to_string();
    if word.is_empty() {
        return Ok(error_reply("Word is required", StatusCode::BAD_REQUEST));
    }

    let response = sessions.update(&session.token, |s| BookmarkResponse {
        bookmarked: s.bookmarks.toggle(&word),
        bookmarks: s.bookmarks.words().to_vec(),
    });
    match response {
        Some(response) => Ok(json_reply(&response, StatusCode::OK)),
        None => Ok(error_reply(
            "Session not found or expired",
            StatusCode::UNAUTHORIZED,
        )),
    }
}
