use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use lexi_types::AuthUser;

const KEY_CACHE_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdTokenClaims {
    pub aud: String,
    pub iss: String,
    pub iat: u64,
    pub exp: u64,
    pub sub: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
}

impl IdTokenClaims {
    fn into_user(self) -> AuthUser {
        AuthUser {
            uid: self.sub,
            email: self.email.unwrap_or_default(),
            display_name: self.name,
            photo_url: self.picture,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwksKey {
    pub kid: String,
    pub kty: String,
    pub n: Option<String>,
    pub e: Option<String>,
    pub x5c: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwksResponse {
    pub keys: Vec<JwksKey>,
}

/// Endpoints and project of the hosted identity service
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub api_url: String,
    pub api_key: String,
    pub project_id: String,
    pub jwks_url: String,
}

/// A successful sign-in: who the user is plus the ID token the identity
/// service issued for them
#[derive(Debug, Clone)]
pub struct SignedInUser {
    pub user: AuthUser,
    pub id_token: String,
}

/// How a session was opened. Decides the greeting shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInMethod {
    Password,
    SignUp,
    Provider,
    IdToken,
}

impl SignInMethod {
    pub fn welcome_message(self, user: &AuthUser) -> String {
        match self {
            SignInMethod::Password => format!("Welcome back {}", user.email),
            SignInMethod::SignUp => format!("Welcome {}", user.email),
            SignInMethod::Provider | SignInMethod::IdToken => {
                format!("Welcome back {}", user.greeting_name())
            }
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdpRequest {
    post_body: String,
    request_uri: &'static str,
    return_idp_credential: bool,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AccountUpdateRequest<'a> {
    id_token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AccountDeleteRequest<'a> {
    id_token: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdentityResponse {
    local_id: String,
    email: Option<String>,
    display_name: Option<String>,
    photo_url: Option<String>,
    id_token: String,
}

#[derive(Deserialize)]
struct IdentityErrorBody {
    error: IdentityErrorDetail,
}

#[derive(Deserialize)]
struct IdentityErrorDetail {
    message: String,
}

/// Signs users in against the identity service and verifies the ID tokens
/// it issues. Dev mode skips the service entirely.
pub struct AuthService {
    client: Client,
    jwks_cache: Arc<RwLock<HashMap<String, (DecodingKey, SystemTime)>>>,
    identity: IdentityConfig,
    dev_mode: bool,
}

impl AuthService {
    pub fn new(identity: IdentityConfig) -> Self {
        Self {
            client: Client::new(),
            jwks_cache: Arc::new(RwLock::new(HashMap::new())),
            identity,
            dev_mode: false,
        }
    }

    pub fn new_dev_mode() -> Self {
        Self {
            client: Client::new(),
            jwks_cache: Arc::new(RwLock::new(HashMap::new())),
            identity: IdentityConfig {
                api_url: String::new(),
                api_key: String::new(),
                project_id: "dev".to_string(),
                jwks_url: String::new(),
            },
            dev_mode: true,
        }
    }

    pub fn is_dev_mode(&self) -> bool {
        self.dev_mode
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SignedInUser, AuthError> {
        let (email, password) = require_credentials(email, password)?;
        if self.dev_mode {
            return Ok(dev_user(email));
        }
        self.password_request("accounts:signInWithPassword", email, password)
            .await
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignedInUser, AuthError> {
        let (email, password) = require_credentials(email, password)?;
        if self.dev_mode {
            return Ok(dev_user(email));
        }
        self.password_request("accounts:signUp", email, password)
            .await
    }

    /// Exchange a token from a federated provider (e.g. "google.com") for
    /// an identity service session
    pub async fn sign_in_with_provider(
        &self,
        provider: &str,
        provider_token: &str,
    ) -> Result<SignedInUser, AuthError> {
        if provider.trim().is_empty() || provider_token.trim().is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        if self.dev_mode {
            let user = self.verify_dev_token(provider_token)?;
            return Ok(SignedInUser {
                user,
                id_token: provider_token.to_string(),
            });
        }

        let request = IdpRequest {
            post_body: format!("id_token={}&providerId={}", provider_token, provider),
            request_uri: "http://localhost",
            return_idp_credential: true,
            return_secure_token: true,
        };
        self.identity_request("accounts:signInWithIdp", &request)
            .await
    }

    pub async fn verify_id_token(&self, token: &str) -> Result<AuthUser, AuthError> {
        if self.dev_mode {
            return self.verify_dev_token(token);
        }

        let header = decode_header(token).map_err(|e| {
            tracing::warn!("Failed to decode ID token header: {:?}", e);
            AuthError::InvalidToken
        })?;
        let kid = header.kid.ok_or_else(|| {
            tracing::warn!("ID token header missing 'kid' field");
            AuthError::InvalidToken
        })?;

        let decoding_key = self.get_decoding_key(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.identity.project_id]);
        validation.set_issuer(&[format!(
            "https://securetoken.google.com/{}",
            self.identity.project_id
        )]);

        let token_data =
            decode::<IdTokenClaims>(token, &decoding_key, &validation).map_err(|e| {
                tracing::warn!("ID token validation failed for kid {}: {:?}", kid, e);
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => AuthError::InvalidToken,
                }
            })?;

        if token_data.claims.sub.is_empty() {
            tracing::warn!("ID token has an empty subject");
            return Err(AuthError::InvalidToken);
        }

        Ok(token_data.claims.into_user())
    }

    /// Change the email of the account behind `id_token`. Returns the
    /// updated user with the fresh ID token the service issues.
    pub async fn update_email(
        &self,
        id_token: &str,
        new_email: &str,
    ) -> Result<SignedInUser, AuthError> {
        let new_email = new_email.trim();
        if new_email.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        if self.dev_mode {
            let mut user = self.verify_dev_token(id_token)?;
            user.email = new_email.to_string();
            return Ok(SignedInUser {
                id_token: dev_id_token(&user),
                user,
            });
        }

        let request = AccountUpdateRequest {
            id_token,
            email: Some(new_email),
            password: None,
            return_secure_token: true,
        };
        self.identity_request("accounts:update", &request).await
    }

    /// Re-authenticate with the current password, then set a new one.
    /// `id_token` identifies the signed-in account in dev mode.
    pub async fn change_password(
        &self,
        id_token: &str,
        email: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<SignedInUser, AuthError> {
        let (email, current_password) = require_credentials(email, current_password)?;
        if new_password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        if self.dev_mode {
            return Ok(SignedInUser {
                user: self.verify_dev_token(id_token)?,
                id_token: id_token.to_string(),
            });
        }

        let reauthenticated = self.sign_in(email, current_password).await?;

        let request = AccountUpdateRequest {
            id_token: &reauthenticated.id_token,
            email: None,
            password: Some(new_password),
            return_secure_token: true,
        };
        self.identity_request("accounts:update", &request).await
    }

    /// Remove the identity account behind `id_token`
    pub async fn delete_account(&self, id_token: &str) -> Result<(), AuthError> {
        if self.dev_mode {
            self.verify_dev_token(id_token)?;
            return Ok(());
        }

        let request = AccountDeleteRequest { id_token };
        self.identity_call("accounts:delete", &request).await?;
        Ok(())
    }

    async fn password_request(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
    ) -> Result<SignedInUser, AuthError> {
        let request = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        self.identity_request(endpoint, &request).await
    }

    async fn identity_call<T: Serialize>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<reqwest::Response, AuthError> {
        let url = format!(
            "{}/{}?key={}",
            self.identity.api_url, endpoint, self.identity.api_key
        );
        tracing::debug!("Calling identity service endpoint {}", endpoint);

        let response = self.client.post(&url).json(body).send().await.map_err(|e| {
            tracing::warn!("Identity service request failed: {:?}", e);
            AuthError::ServiceUnavailable
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<IdentityErrorBody>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_else(|_| status.to_string());
            tracing::warn!("Identity service rejected {}: {}", endpoint, message);
            return Err(AuthError::from_identity_message(&message));
        }
        Ok(response)
    }

    async fn identity_request<T: Serialize>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<SignedInUser, AuthError> {
        let response = self.identity_call(endpoint, body).await?;

        let signed_in: IdentityResponse = response.json().await.map_err(|e| {
            tracing::warn!("Failed to parse identity service response: {:?}", e);
            AuthError::ServiceUnavailable
        })?;

        Ok(SignedInUser {
            user: AuthUser {
                uid: signed_in.local_id,
                email: signed_in.email.unwrap_or_default(),
                display_name: signed_in.display_name,
                photo_url: signed_in.photo_url,
            },
            id_token: signed_in.id_token,
        })
    }

    async fn get_decoding_key(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        {
            let cache = self.jwks_cache.read().await;
            if let Some((key, cached_at)) = cache.get(kid) {
                let elapsed = cached_at.elapsed().unwrap_or(KEY_CACHE_TTL);
                if elapsed < KEY_CACHE_TTL {
                    return Ok(key.clone());
                }
                tracing::debug!("Cached key for kid '{}' is stale, refetching", kid);
            }
        }

        tracing::debug!("Fetching JWKS from {}", self.identity.jwks_url);
        let response = self
            .client
            .get(&self.identity.jwks_url)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Failed to fetch JWKS: {:?}", e);
                AuthError::JwksFetchError
            })?;

        if !response.status().is_success() {
            tracing::warn!("JWKS fetch returned status: {}", response.status());
            return Err(AuthError::JwksFetchError);
        }

        let jwks: JwksResponse = response.json().await.map_err(|e| {
            tracing::warn!("Failed to parse JWKS JSON: {:?}", e);
            AuthError::JwksFetchError
        })?;

        let jwks_key = jwks.keys.iter().find(|key| key.kid == kid).ok_or_else(|| {
            tracing::warn!("Key with kid '{}' not found in JWKS", kid);
            AuthError::KeyNotFound
        })?;

        let decoding_key = match (&jwks_key.n, &jwks_key.e, &jwks_key.x5c) {
            (Some(n), Some(e), _) => DecodingKey::from_rsa_components(n, e)?,
            (_, _, Some(chain)) => {
                let cert = chain.first().ok_or(AuthError::InvalidKey)?;
                let der = STANDARD.decode(cert).map_err(|_| AuthError::InvalidKey)?;
                DecodingKey::from_rsa_der(&der)
            }
            _ => {
                tracing::warn!("JWKS key '{}' has neither n,e nor x5c", kid);
                return Err(AuthError::InvalidKey);
            }
        };

        self.jwks_cache
            .write()
            .await
            .insert(kid.to_string(), (decoding_key.clone(), SystemTime::now()));

        Ok(decoding_key)
    }

    /// Dev tokens are either an unsigned JWT whose payload carries the
    /// claims, or the plain string "uid:email:name"
    fn verify_dev_token(&self, token: &str) -> Result<AuthUser, AuthError> {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() == 3 {
            let payload = URL_SAFE_NO_PAD
                .decode(parts[1].trim_end_matches('='))
                .map_err(|e| {
                    tracing::warn!("Failed to decode dev token payload: {:?}", e);
                    AuthError::InvalidToken
                })?;

            #[derive(Deserialize)]
            struct DevClaims {
                sub: String,
                email: Option<String>,
                name: Option<String>,
                picture: Option<String>,
            }

            let claims: DevClaims = serde_json::from_slice(&payload).map_err(|e| {
                tracing::warn!("Failed to parse dev token claims: {:?}", e);
                AuthError::InvalidToken
            })?;
            return Ok(AuthUser {
                uid: claims.sub,
                email: claims.email.unwrap_or_else(|| "dev@example.com".to_string()),
                display_name: claims.name,
                photo_url: claims.picture,
            });
        }

        let mut fields = token.splitn(3, ':');
        match (fields.next(), fields.next(), fields.next()) {
            (Some(uid), Some(email), Some(name)) if !uid.is_empty() => Ok(AuthUser {
                uid: uid.to_string(),
                email: email.to_string(),
                display_name: Some(name.to_string()).filter(|name| !name.is_empty()),
                photo_url: None,
            }),
            _ => Err(AuthError::InvalidToken),
        }
    }
}

fn require_credentials<'a>(
    email: &'a str,
    password: &'a str,
) -> Result<(&'a str, &'a str), AuthError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    Ok((email, password))
}

fn dev_user(email: &str) -> SignedInUser {
    let user = AuthUser {
        uid: format!("dev-{}", email.to_lowercase()),
        email: email.to_string(),
        display_name: None,
        photo_url: None,
    };
    SignedInUser {
        id_token: dev_id_token(&user),
        user,
    }
}

/// The "uid:email:name" form accepted by dev-mode verification
fn dev_id_token(user: &AuthUser) -> String {
    format!(
        "{}:{}:{}",
        user.uid,
        user.email,
        user.display_name.as_deref().unwrap_or_default()
    )
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Email and password are required")]
    MissingCredentials,
    #[error("Sign-in rejected: {0}")]
    Rejected(String),
    #[error("Email is already registered")]
    EmailInUse,
    #[error("Identity service unavailable")]
    ServiceUnavailable,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Failed to fetch JWKS")]
    JwksFetchError,
    #[error("Key not found")]
    KeyNotFound,
    #[error("Invalid key")]
    InvalidKey,
}

impl AuthError {
    fn from_identity_message(message: &str) -> Self {
        match message {
            "EMAIL_EXISTS" => AuthError::EmailInUse,
            other => AuthError::Rejected(other.to_string()),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(_: jsonwebtoken::errors::Error) -> Self {
        AuthError::InvalidKey
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_identity() -> IdentityConfig {
        IdentityConfig {
            api_url: "http://127.0.0.1:9".to_string(),
            api_key: "test-key".to_string(),
            project_id: "test-project".to_string(),
            jwks_url: "http://127.0.0.1:9/jwks".to_string(),
        }
    }

    #[tokio::test]
    async fn test_invalid_token_validation() {
        let auth_service = AuthService::new(test_identity());

        let result = auth_service.verify_id_token("invalid-token").await;
        assert!(matches!(result.unwrap_err(), AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn test_dev_mode_string_token() {
        let auth_service = AuthService::new_dev_mode();

        let user = auth_service
            .verify_id_token("user-1:ada@example.com:Ada")
            .await
            .unwrap();
        assert_eq!(user.uid, "user-1");
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.display_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_dev_mode_jwt_payload() {
        let auth_service = AuthService::new_dev_mode();
        let payload = URL_SAFE_NO_PAD
            .encode(r#"{"sub":"user-2","email":"lin@example.com","name":"Lin"}"#);
        let token = format!("e30.{}.signature", payload);

        let user = auth_service.verify_id_token(&token).await.unwrap();
        assert_eq!(user.uid, "user-2");
        assert_eq!(user.greeting_name(), "Lin");
    }

    #[tokio::test]
    async fn test_dev_mode_rejects_malformed_tokens() {
        let auth_service = AuthService::new_dev_mode();
        assert!(auth_service.verify_id_token("just-a-name").await.is_err());
        assert!(auth_service.verify_id_token(":a@b.c:Name").await.is_err());
        assert!(auth_service.verify_id_token("a.!!!.c").await.is_err());
    }

    #[tokio::test]
    async fn test_dev_sign_in_and_sign_up() {
        let auth_service = AuthService::new_dev_mode();

        let signed_in = auth_service
            .sign_in(" Ada@Example.com ", "secret")
            .await
            .unwrap();
        assert_eq!(signed_in.user.uid, "dev-ada@example.com");
        assert_eq!(signed_in.user.email, "Ada@Example.com");

        // Dev ID tokens verify back to the same user
        let verified = auth_service
            .verify_id_token(&signed_in.id_token)
            .await
            .unwrap();
        assert_eq!(verified.uid, signed_in.user.uid);

        let signed_up = auth_service.sign_up("new@example.com", "pw").await.unwrap();
        assert_eq!(signed_up.user.uid, "dev-new@example.com");
    }

    #[tokio::test]
    async fn test_missing_credentials() {
        let auth_service = AuthService::new_dev_mode();
        assert!(matches!(
            auth_service.sign_in("  ", "secret").await,
            Err(AuthError::MissingCredentials)
        ));
        assert!(matches!(
            auth_service.sign_up("a@b.c", "").await,
            Err(AuthError::MissingCredentials)
        ));
        assert!(matches!(
            auth_service.sign_in_with_provider("google.com", "").await,
            Err(AuthError::MissingCredentials)
        ));
    }

    #[tokio::test]
    async fn test_unreachable_identity_service() {
        let auth_service = AuthService::new(test_identity());
        let result = auth_service.sign_in("ada@example.com", "secret").await;
        assert!(matches!(result, Err(AuthError::ServiceUnavailable)));
    }

    #[tokio::test]
    async fn test_dev_account_management() {
        let auth_service = AuthService::new_dev_mode();
        let token = "user-1:ada@example.com:Ada";

        let updated = auth_service
            .update_email(token, " ada@lexilearn.dev ")
            .await
            .unwrap();
        assert_eq!(updated.user.uid, "user-1");
        assert_eq!(updated.user.email, "ada@lexilearn.dev");
        let verified = auth_service.verify_id_token(&updated.id_token).await.unwrap();
        assert_eq!(verified, updated.user);

        let changed = auth_service
            .change_password(token, "ada@example.com", "old", "new")
            .await
            .unwrap();
        assert_eq!(changed.user.uid, "user-1");
        assert!(matches!(
            auth_service
                .change_password(token, "ada@example.com", "", "new")
                .await,
            Err(AuthError::MissingCredentials)
        ));
        assert!(matches!(
            auth_service.update_email(token, "  ").await,
            Err(AuthError::MissingCredentials)
        ));

        assert!(auth_service.delete_account(token).await.is_ok());
        assert!(matches!(
            auth_service.delete_account("garbage").await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn test_account_calls_need_identity_service() {
        let auth_service = AuthService::new(test_identity());
        assert!(matches!(
            auth_service.update_email("token", "new@example.com").await,
            Err(AuthError::ServiceUnavailable)
        ));
        assert!(matches!(
            auth_service.delete_account("token").await,
            Err(AuthError::ServiceUnavailable)
        ));
    }

    #[test]
    fn test_welcome_messages() {
        let user = AuthUser {
            uid: "u".to_string(),
            email: "ada@example.com".to_string(),
            display_name: Some("Ada".to_string()),
            photo_url: None,
        };
        assert_eq!(
            SignInMethod::Password.welcome_message(&user),
            "Welcome back ada@example.com"
        );
        assert_eq!(SignInMethod::SignUp.welcome_message(&user), "Welcome ada@example.com");
        assert_eq!(SignInMethod::Provider.welcome_message(&user), "Welcome back Ada");
    }

    #[test]
    fn test_identity_error_mapping() {
        assert!(matches!(
            AuthError::from_identity_message("EMAIL_EXISTS"),
            AuthError::EmailInUse
        ));
        assert!(matches!(
            AuthError::from_identity_message("INVALID_PASSWORD"),
            AuthError::Rejected(message) if message == "INVALID_PASSWORD"
        ));
    }
}
