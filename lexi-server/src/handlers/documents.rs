use std::sync::Arc;

use warp::http::StatusCode;

use lexi_core::{SortOrder, WordListEditor, new_favorite_list};
use lexi_persistence::{DocumentStore, SettingsRepository, UserCollection};
use lexi_types::{
    FavoriteList, FavoriteWordRequest, FavoritesQuery, PersonalNote, SupportRequest,
    UserSettings,
};

use super::{JsonReply, authenticate, error_reply, json_reply, store_error_reply};
use crate::session::SessionRegistry;

/// Typed access to every collection a user owns
#[derive(Clone)]
pub struct DocumentServices {
    pub notes: UserCollection<PersonalNote>,
    pub favorites: UserCollection<FavoriteList>,
    pub support: UserCollection<SupportRequest>,
    pub settings: SettingsRepository,
}

impl DocumentServices {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            notes: UserCollection::new(store.clone()),
            favorites: UserCollection::new(store.clone()),
            support: UserCollection::new(store.clone()),
            settings: SettingsRepository::new(store),
        }
    }
}

macro_rules! require_session {
    ($sessions:expr, $auth_header:expr) => {
        match authenticate(&$sessions, $auth_header) {
            Ok(session) => session,
            Err(reply) => return Ok(reply),
        }
    };
}

pub async fn handle_list_notes(
    auth_header: Option<String>,
    sessions: Arc<SessionRegistry>,
    documents: Arc<DocumentServices>,
) -> Result<JsonReply, warp::Rejection> {
    let session = require_session!(sessions, auth_header);
    match documents.notes.list(&session.user.uid).await {
        Ok(notes) => Ok(json_reply(&notes, StatusCode::OK)),
        Err(e) => Ok(store_error_reply(&e, "fetch notes")),
    }
}

pub async fn handle_create_note(
    note: PersonalNote,
    auth_header: Option<String>,
    sessions: Arc<SessionRegistry>,
    documents: Arc<DocumentServices>,
) -> Result<JsonReply, warp::Rejection> {
    let session = require_session!(sessions, auth_header);
    if note.title.trim().is_empty() {
        return Ok(error_reply("Title is required", StatusCode::BAD_REQUEST));
    }
    match documents.notes.create(&session.user.uid, note).await {
        Ok(note) => Ok(json_reply(&note, StatusCode::CREATED)),
        Err(e) => Ok(store_error_reply(&e, "save note")),
    }
}

pub async fn handle_update_note(
    id: String,
    note: PersonalNote,
    auth_header: Option<String>,
    sessions: Arc<SessionRegistry>,
    documents: Arc<DocumentServices>,
) -> Result<JsonReply, warp::Rejection> {
    let session = require_session!(sessions, auth_header);
    if note.title.trim().is_empty() {
        return Ok(error_reply("Title is required", StatusCode::BAD_REQUEST));
    }
    match documents.notes.update(&session.user.uid, &id, note).await {
        Ok(note) => Ok(json_reply(&note, StatusCode::OK)),
        Err(e) => Ok(store_error_reply(&e, "update note")),
    }
}

pub async fn handle_delete_note(
    id: String,
    auth_header: Option<String>,
    sessions: Arc<SessionRegistry>,
    documents: Arc<DocumentServices>,
) -> Result<JsonReply, warp::Rejection> {
    let session = require_session!(sessions, auth_header);
    match documents.notes.delete(&session.user.uid, &id).await {
        Ok(()) => Ok(json_reply(&serde_json::json!({ "deleted": id }), StatusCode::OK)),
        Err(e) => Ok(store_error_reply(&e, "delete note")),
    }
}

pub async fn handle_list_favorites(
    query: FavoritesQuery,
    auth_header: Option<String>,
    sessions: Arc<SessionRegistry>,
    documents: Arc<DocumentServices>,
) -> Result<JsonReply, warp::Rejection> {
    let session = require_session!(sessions, auth_header);

    let order = match query.sort.as_deref() {
        None => SortOrder::default(),
        Some(value) => match SortOrder::parse(value) {
            Some(order) => order,
            None => {
                return Ok(error_reply(
                    format!("Unknown sort order: {}", value),
                    StatusCode::BAD_REQUEST,
                ));
            }
        },
    };
    let search = query.search.unwrap_or_default();

    match documents.favorites.list(&session.user.uid).await {
        Ok(mut lists) => {
            for list in &mut lists {
                let words: Vec<String> = list
                    .sorted_words(&search, order)
                    .into_iter()
                    .map(String::from)
                    .collect();
                list.words = words;
            }
            Ok(json_reply(&lists, StatusCode::OK))
        }
        Err(e) => Ok(store_error_reply(&e, "fetch favorite lists")),
    }
}

pub async fn handle_create_favorite(
    list: FavoriteList,
    auth_header: Option<String>,
    sessions: Arc<SessionRegistry>,
    documents: Arc<DocumentServices>,
) -> Result<JsonReply, warp::Rejection> {
    let session = require_session!(sessions, auth_header);

    let mut new_list = new_favorite_list(&list.name);
    new_list.notes = list.notes;
    for word in &list.words {
        new_list.add_word(word);
    }

    match documents.favorites.create(&session.user.uid, new_list).await {
        Ok(list) => Ok(json_reply(&list, StatusCode::CREATED)),
        Err(e) => Ok(store_error_reply(&e, "save favorite list")),
    }
}

pub async fn handle_update_favorite(
    id: String,
    mut list: FavoriteList,
    auth_header: Option<String>,
    sessions: Arc<SessionRegistry>,
    documents: Arc<DocumentServices>,
) -> Result<JsonReply, warp::Rejection> {
    let session = require_session!(sessions, auth_header);
    let words = std::mem::take(&mut list.words);
    list.replace_words(&words);
    match documents.favorites.update(&session.user.uid, &id, list).await {
        Ok(list) => Ok(json_reply(&list, StatusCode::OK)),
        Err(e) => Ok(store_error_reply(&e, "update favorite list")),
    }
}

pub async fn handle_delete_favorite(
    id: String,
    auth_header: Option<String>,
    sessions: Arc<SessionRegistry>,
    documents: Arc<DocumentServices>,
) -> Result<JsonReply, warp::Rejection> {
    let session = require_session!(sessions, auth_header);
    match documents.favorites.delete(&session.user.uid, &id).await {
        Ok(()) => Ok(json_reply(&serde_json::json!({ "deleted": id }), StatusCode::OK)),
        Err(e) => Ok(store_error_reply(&e, "delete favorite list")),
    }
}

/// Add or remove one word of a stored list
async fn edit_favorite_words(
    uid: &str,
    id: &str,
    documents: &DocumentServices,
    edit: impl FnOnce(&mut FavoriteList) -> bool,
) -> JsonReply {
    let mut list = match documents.favorites.get(uid, id).await {
        Ok(Some(list)) => list,
        Ok(None) => return error_reply("Favorite list not found", StatusCode::NOT_FOUND),
        Err(e) => return store_error_reply(&e, "fetch favorite list"),
    };

    if !edit(&mut list) {
        return json_reply(&list, StatusCode::OK);
    }
    match documents.favorites.update(uid, id, list).await {
        Ok(list) => json_reply(&list, StatusCode::OK),
        Err(e) => store_error_reply(&e, "update favorite list"),
    }
}

pub async fn handle_add_favorite_word(
    id: String,
    request: FavoriteWordRequest,
    auth_header: Option<String>,
    sessions: Arc<SessionRegistry>,
    documents: Arc<DocumentServices>,
) -> Result<JsonReply, warp::Rejection> {
    let session = require_session!(sessions, auth_header);
    if request.word.trim().is_empty() {
        return Ok(error_reply("Word is required", StatusCode::BAD_REQUEST));
    }
    Ok(edit_favorite_words(&session.user.uid, &id, &documents, |list| {
        list.add_word(&request.word)
    })
    .await)
}

pub async fn handle_remove_favorite_word(
    id: String,
    word: String,
    auth_header: Option<String>,
    sessions: Arc<SessionRegistry>,
    documents: Arc<DocumentServices>,
) -> Result<JsonReply, warp::Rejection> {
    let session = require_session!(sessions, auth_header);
    Ok(edit_favorite_words(&session.user.uid, &id, &documents, |list| {
        list.remove_word(&word)
    })
    .await)
}

pub async fn handle_create_support_request(
    mut request: SupportRequest,
    auth_header: Option<String>,
    sessions: Arc<SessionRegistry>,
    documents: Arc<DocumentServices>,
) -> Result<JsonReply, warp::Rejection> {
    let session = require_session!(sessions, auth_header);

    if request.contact_email.trim().is_empty() {
        request.contact_email = session.user.email.clone();
    }
    let missing = request.missing_fields();
    if !missing.is_empty() {
        return Ok(error_reply(
            format!("Missing required fields: {}", missing.join(", ")),
            StatusCode::BAD_REQUEST,
        ));
    }

    match documents.support.create(&session.user.uid, request).await {
        Ok(request) => Ok(json_reply(&request, StatusCode::CREATED)),
        Err(e) => Ok(store_error_reply(&e, "submit support request")),
    }
}

pub async fn handle_get_settings(
    auth_header: Option<String>,
    sessions: Arc<SessionRegistry>,
    documents: Arc<DocumentServices>,
) -> Result<JsonReply, warp::Rejection> {
    let session = require_session!(sessions, auth_header);
    match documents.settings.get_settings(&session.user.uid).await {
        Ok(mut settings) => {
            if settings.email.is_empty() {
                settings.email = session.user.email.clone();
            }
            Ok(json_reply(&settings, StatusCode::OK))
        }
        Err(e) => Ok(store_error_reply(&e, "fetch settings")),
    }
}

pub async fn handle_save_settings(
    settings: UserSettings,
    auth_header: Option<String>,
    sessions: Arc<SessionRegistry>,
    documents: Arc<DocumentServices>,
) -> Result<JsonReply, warp::Rejection> {
    let session = require_session!(sessions, auth_header);
    match documents
        .settings
        .save_settings(&session.user.uid, &settings)
        .await
    {
        Ok(()) => Ok(json_reply(&settings, StatusCode::OK)),
        Err(e) => Ok(store_error_reply(&e, "save settings")),
    }
}

/// Removes the stored settings document; later reads return defaults
pub async fn handle_delete_settings(
    auth_header: Option<String>,
    sessions: Arc<SessionRegistry>,
    documents: Arc<DocumentServices>,
) -> Result<JsonReply, warp::Rejection> {
    let session = require_session!(sessions, auth_header);
    match documents.settings.delete_settings(&session.user.uid).await {
        Ok(()) => Ok(json_reply(
            &serde_json::json!({ "deleted": "settings" }),
            StatusCode::OK,
        )),
        Err(e) => Ok(store_error_reply(&e, "delete settings")),
    }
}
