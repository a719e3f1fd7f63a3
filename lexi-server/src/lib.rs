use std::sync::Arc;

use warp::Filter;
use warp::filters::BoxedFilter;

use crate::auth::AuthService;
use crate::dictionary::DictionaryClient;
use crate::game_manager::GameManager;
use crate::handlers::documents::DocumentServices;
use crate::handlers::{account, documents, games, lookup};
use crate::session::SessionRegistry;

pub mod auth;
pub mod config;
pub mod dictionary;
pub mod game_manager;
pub mod handlers;
pub mod session;

fn with_shared<T: Send + Sync + ?Sized + 'static>(
    value: Arc<T>,
) -> impl Filter<Extract = (Arc<T>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || value.clone())
}

fn auth_header() -> impl Filter<Extract = (Option<String>,), Error = warp::Rejection> + Clone {
    warp::header::optional::<String>("authorization")
}

pub fn create_routes(
    auth_service: Arc<AuthService>,
    sessions: Arc<SessionRegistry>,
    dictionary: Arc<DictionaryClient>,
    game_manager: Arc<GameManager>,
    documents: Arc<DocumentServices>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", warp::http::StatusCode::OK));

    let account_routes = account_routes(
        auth_service,
        sessions.clone(),
        game_manager.clone(),
        documents.clone(),
    );
    let lookup_routes = lookup_routes(sessions.clone(), dictionary.clone());
    let game_routes = game_routes(sessions.clone(), game_manager, dictionary);
    let document_routes = document_routes(sessions, documents);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type", "authorization"])
        .allow_methods(vec!["GET", "POST", "PUT", "DELETE"]);

    health
        .or(account_routes)
        .or(lookup_routes)
        .or(game_routes)
        .or(document_routes)
        .with(cors)
        .with(warp::log("lexilearn"))
}

fn account_routes(
    auth_service: Arc<AuthService>,
    sessions: Arc<SessionRegistry>,
    game_manager: Arc<GameManager>,
    documents: Arc<DocumentServices>,
) -> BoxedFilter<(handlers::JsonReply,)> {
    let sign_in = warp::path!("auth" / "sign-in")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_shared(auth_service.clone()))
        .and(with_shared(sessions.clone()))
        .and_then(account::handle_sign_in);

    let sign_up = warp::path!("auth" / "sign-up")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_shared(auth_service.clone()))
        .and(with_shared(sessions.clone()))
        .and_then(account::handle_sign_up);

    let provider = warp::path!("auth" / "provider")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_shared(auth_service.clone()))
        .and(with_shared(sessions.clone()))
        .and_then(account::handle_provider_sign_in);

    let token = warp::path!("auth" / "token")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_shared(auth_service.clone()))
        .and(with_shared(sessions.clone()))
        .and_then(account::handle_token_sign_in);

    let sign_out = warp::path!("auth" / "sign-out")
        .and(warp::post())
        .and(auth_header())
        .and(with_shared(sessions.clone()))
        .and(with_shared(game_manager.clone()))
        .and_then(account::handle_sign_out);

    let change_email = warp::path!("account" / "email")
        .and(warp::put())
        .and(warp::body::json())
        .and(auth_header())
        .and(with_shared(auth_service.clone()))
        .and(with_shared(sessions.clone()))
        .and_then(account::handle_change_email);

    let change_password = warp::path!("account" / "password")
        .and(warp::put())
        .and(warp::body::json())
        .and(auth_header())
        .and(with_shared(auth_service.clone()))
        .and(with_shared(sessions.clone()))
        .and_then(account::handle_change_password);

    let delete_account = warp::path!("account")
        .and(warp::delete())
        .and(auth_header())
        .and(with_shared(auth_service))
        .and(with_shared(sessions))
        .and(with_shared(game_manager))
        .and(with_shared(documents))
        .and_then(account::handle_delete_account);

    sign_in
        .or(sign_up)
        .unify()
        .or(provider)
        .unify()
        .or(token)
        .unify()
        .or(sign_out)
        .unify()
        .or(change_email)
        .unify()
        .or(change_password)
        .unify()
        .or(delete_account)
        .unify()
        .boxed()
}

fn lookup_routes(
    sessions: Arc<SessionRegistry>,
    dictionary: Arc<DictionaryClient>,
) -> BoxedFilter<(handlers::JsonReply,)> {
    let word_of_the_day = warp::path!("dictionary" / "word-of-the-day")
        .and(warp::get())
        .and(with_shared(dictionary.clone()))
        .and_then(lookup::handle_word_of_the_day);

    let lookup_word = warp::path!("dictionary" / String)
        .and(warp::get())
        .and(auth_header())
        .and(with_shared(sessions.clone()))
        .and(with_shared(dictionary))
        .and_then(lookup::handle_lookup);

    let recent = warp::path!("searches" / "recent")
        .and(warp::get())
        .and(auth_header())
        .and(with_shared(sessions.clone()))
        .and_then(lookup::handle_recent_searches);

    let bookmarks = warp::path!("bookmarks")
        .and(warp::get())
        .and(auth_header())
        .and(with_shared(sessions.clone()))
        .and_then(lookup::handle_bookmarks);

    let toggle_bookmark = warp::path!("bookmarks" / String)
        .and(warp::post())
        .and(auth_header())
        .and(with_shared(sessions))
        .and_then(lookup::handle_toggle_bookmark);

    word_of_the_day
        .or(lookup_word)
        .unify()
        .or(recent)
        .unify()
        .or(bookmarks)
        .unify()
        .or(toggle_bookmark)
        .unify()
        .boxed()
}

fn game_routes(
    sessions: Arc<SessionRegistry>,
    game_manager: Arc<GameManager>,
    dictionary: Arc<DictionaryClient>,
) -> BoxedFilter<(handlers::JsonReply,)> {
    let start = warp::path!("games")
        .and(warp::post())
        .and(warp::body::json())
        .and(auth_header())
        .and(with_shared(sessions.clone()))
        .and(with_shared(game_manager.clone()))
        .and(with_shared(dictionary))
        .and_then(games::handle_start_game);

    let current = warp::path!("games" / "current")
        .and(warp::get())
        .and(auth_header())
        .and(with_shared(sessions.clone()))
        .and(with_shared(game_manager.clone()))
        .and_then(games::handle_current_game);

    let end = warp::path!("games" / "current")
        .and(warp::delete())
        .and(auth_header())
        .and(with_shared(sessions.clone()))
        .and(with_shared(game_manager.clone()))
        .and_then(games::handle_end_game);

    let scramble = warp::path!("games" / "scramble" / "guess")
        .and(warp::post())
        .and(warp::body::json())
        .and(auth_header())
        .and(with_shared(sessions.clone()))
        .and(with_shared(game_manager.clone()))
        .and_then(games::handle_scramble_guess);

    let hangman = warp::path!("games" / "hangman" / "guess")
        .and(warp::post())
        .and(warp::body::json())
        .and(auth_header())
        .and(with_shared(sessions.clone()))
        .and(with_shared(game_manager.clone()))
        .and_then(games::handle_hangman_guess);

    let quiz = warp::path!("games" / "quiz" / "choice")
        .and(warp::post())
        .and(warp::body::json())
        .and(auth_header())
        .and(with_shared(sessions))
        .and(with_shared(game_manager))
        .and_then(games::handle_quiz_choice);

    start
        .or(current)
        .unify()
        .or(end)
        .unify()
        .or(scramble)
        .unify()
        .or(hangman)
        .unify()
        .or(quiz)
        .unify()
        .boxed()
}

fn document_routes(
    sessions: Arc<SessionRegistry>,
    documents: Arc<DocumentServices>,
) -> BoxedFilter<(handlers::JsonReply,)> {
    let session_and_documents = auth_header()
        .and(with_shared(sessions))
        .and(with_shared(documents));

    let list_notes = warp::path!("notes")
        .and(warp::get())
        .and(session_and_documents.clone())
        .and_then(documents::handle_list_notes);

    let create_note = warp::path!("notes")
        .and(warp::post())
        .and(warp::body::json())
        .and(session_and_documents.clone())
        .and_then(documents::handle_create_note);

    let update_note = warp::path!("notes" / String)
        .and(warp::put())
        .and(warp::body::json())
        .and(session_and_documents.clone())
        .and_then(documents::handle_update_note);

    let delete_note = warp::path!("notes" / String)
        .and(warp::delete())
        .and(session_and_documents.clone())
        .and_then(documents::handle_delete_note);

    let list_favorites = warp::path!("favorites")
        .and(warp::get())
        .and(warp::query())
        .and(session_and_documents.clone())
        .and_then(documents::handle_list_favorites);

    let create_favorite = warp::path!("favorites")
        .and(warp::post())
        .and(warp::body::json())
        .and(session_and_documents.clone())
        .and_then(documents::handle_create_favorite);

    let update_favorite = warp::path!("favorites" / String)
        .and(warp::put())
        .and(warp::body::json())
        .and(session_and_documents.clone())
        .and_then(documents::handle_update_favorite);

    let delete_favorite = warp::path!("favorites" / String)
        .and(warp::delete())
        .and(session_and_documents.clone())
        .and_then(documents::handle_delete_favorite);

    let add_word = warp::path!("favorites" / String / "words")
        .and(warp::post())
        .and(warp::body::json())
        .and(session_and_documents.clone())
        .and_then(documents::handle_add_favorite_word);

    let remove_word = warp::path!("favorites" / String / "words" / String)
        .and(warp::delete())
        .and(session_and_documents.clone())
        .and_then(documents::handle_remove_favorite_word);

    let support = warp::path!("support")
        .and(warp::post())
        .and(warp::body::json())
        .and(session_and_documents.clone())
        .and_then(documents::handle_create_support_request);

    let get_settings = warp::path!("settings")
        .and(warp::get())
        .and(session_and_documents.clone())
        .and_then(documents::handle_get_settings);

    let save_settings = warp::path!("settings")
        .and(warp::put())
        .and(warp::body::json())
        .and(session_and_documents.clone())
        .and_then(documents::handle_save_settings);

    let delete_settings = warp::path!("settings")
        .and(warp::delete())
        .and(session_and_documents)
        .and_then(documents::handle_delete_settings);

    let notes = list_notes
        .or(create_note)
        .unify()
        .or(update_note)
        .unify()
        .or(delete_note)
        .unify()
        .boxed();

    let favorites = list_favorites
        .or(create_favorite)
        .unify()
        .or(update_favorite)
        .unify()
        .or(delete_favorite)
        .unify()
        .or(add_word)
        .unify()
        .or(remove_word)
        .unify()
        .boxed();

    let account_documents = support
        .or(get_settings)
        .unify()
        .or(save_settings)
        .unify()
        .or(delete_settings)
        .unify()
        .boxed();

    notes
        .or(favorites)
        .unify()
        .or(account_documents)
        .unify()
        .boxed()
}
