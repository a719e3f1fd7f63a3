use std::env;

/// Where user documents are kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentStoreKind {
    Sqlite,
    Remote,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub document_store: DocumentStoreKind,
    pub document_store_url: Option<String>,
    pub document_store_token: Option<String>,
    pub dictionary_api_url: String,
    pub identity_api_url: String,
    pub identity_api_key: String,
    pub identity_project_id: String,
    pub identity_jwks_url: String,
    pub auth_dev_mode: bool,
    pub word_list_path: Option<String>,
    pub session_timeout_minutes: u64,
}

impl Config {
    pub fn new() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("Invalid PORT"),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://lexilearn.db?mode=rwc".to_string()),
            document_store: match env::var("DOCUMENT_STORE")
                .unwrap_or_else(|_| "sqlite".to_string())
                .as_str()
            {
                "sqlite" => DocumentStoreKind::Sqlite,
                "remote" => DocumentStoreKind::Remote,
                other => panic!("Invalid DOCUMENT_STORE: {}", other),
            },
            document_store_url: env::var("DOCUMENT_STORE_URL").ok(),
            document_store_token: env::var("DOCUMENT_STORE_TOKEN").ok(),
            dictionary_api_url: env::var("DICTIONARY_API_URL").unwrap_or_else(|_| {
                "https://api.dictionaryapi.dev/api/v2/entries/en".to_string()
            }),
            identity_api_url: env::var("IDENTITY_API_URL").unwrap_or_else(|_| {
                "https://identitytoolkit.googleapis.com/v1".to_string()
            }),
            identity_api_key: env::var("IDENTITY_API_KEY").unwrap_or_default(),
            identity_project_id: env::var("IDENTITY_PROJECT_ID").unwrap_or_default(),
            identity_jwks_url: env::var("IDENTITY_JWKS_URL").unwrap_or_else(|_| {
                "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com"
                    .to_string()
            }),
            auth_dev_mode: env::var("AUTH_DEV_MODE").unwrap_or_else(|_| "false".to_string())
                == "true",
            word_list_path: env::var("WORD_LIST_PATH").ok(),
            session_timeout_minutes: env::var("SESSION_TIMEOUT_MINUTES")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .expect("Invalid SESSION_TIMEOUT_MINUTES"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
