//! Signed-in identity lifecycle: restore on startup, login, register, logout.
//!
//! The token and the identity record are always written together and removed
//! together. Restoring never fails; anything unreadable degrades to logged
//! out.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use rand::Rng;
use thiserror::Error;

use crate::{
    domain::identity::{display_name_from_email, SessionToken, UserIdentity},
    infra::kv_store::{KeyValueStore, StorageError},
};

pub const TOKEN_KEY: &str = "auth_token";
pub const IDENTITY_KEY: &str = "user_data";

const MOCK_TOKEN_PREFIX: &str = "mock_jwt_token_";
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LENGTH: usize = 9;

#[cfg_attr(not(test), allow(dead_code))]
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("all fields are required")]
    InvalidInput,
    #[error("credentials were rejected")]
    Rejected,
    #[error("failed to persist session: {0}")]
    Storage(#[from] StorageError),
}

/// Identity plus credential handed out by an [`Authenticator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    pub identity: UserIdentity,
    pub token: SessionToken,
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<AuthGrant, AuthError>;
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthGrant, AuthError>;
}

/// Accepts any non-empty credentials after a fixed delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockAuthenticator {
    delay: Duration,
}

impl MockAuthenticator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    fn grant(email: &str, display_name: String) -> AuthGrant {
        AuthGrant {
            identity: UserIdentity {
                id: random_base36(),
                email: email.to_owned(),
                display_name,
            },
            token: SessionToken::new(format!("{MOCK_TOKEN_PREFIX}{}", random_base36())),
        }
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn login(&self, email: &str, _password: &str) -> Result<AuthGrant, AuthError> {
        tokio::time::sleep(self.delay).await;
        Ok(Self::grant(email, display_name_from_email(email)))
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        _password: &str,
    ) -> Result<AuthGrant, AuthError> {
        tokio::time::sleep(self.delay).await;
        Ok(Self::grant(email, name.to_owned()))
    }
}

fn random_base36() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

pub struct SessionStore<S: KeyValueStore> {
    storage: S,
    authenticator: Arc<dyn Authenticator>,
    current: Option<UserIdentity>,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S, authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            storage,
            authenticator,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&UserIdentity> {
        self.current.as_ref()
    }

    pub fn restore(&mut self) -> Option<&UserIdentity> {
        self.current = None;

        let token = self.read_entry(TOKEN_KEY);
        let record = self.read_entry(IDENTITY_KEY);

        match (token, record) {
            (Some(_), Some(record)) => match serde_json::from_str::<UserIdentity>(&record) {
                Ok(identity) => {
                    tracing::info!(user_id = %identity.id, "restored saved session");
                    self.current = Some(identity);
                }
                Err(error) => {
                    tracing::warn!(error = %error, "saved identity is corrupt, discarding session");
                    self.clear_persisted();
                }
            },
            (None, None) => tracing::debug!("no saved session"),
            _ => {
                tracing::warn!("saved session is incomplete, discarding it");
                self.clear_persisted();
            }
        }

        self.current.as_ref()
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<&UserIdentity, AuthError> {
        if is_blank(email) || is_blank(password) {
            return Err(AuthError::InvalidInput);
        }

        let grant = self.authenticator.login(email, password).await?;
        self.accept(grant)
    }

    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<&UserIdentity, AuthError> {
        if is_blank(name) || is_blank(email) || is_blank(password) {
            return Err(AuthError::InvalidInput);
        }

        let grant = self
            .authenticator
            .register(name, email, password)
            .await?;
        self.accept(grant)
    }

    /// Always succeeds; storage failures are logged.
    pub fn logout(&mut self) {
        self.clear_persisted();
        self.current = None;
        tracing::info!("logged out");
    }

    fn accept(&mut self, grant: AuthGrant) -> Result<&UserIdentity, AuthError> {
        let record = serde_json::to_string(&grant.identity).map_err(StorageError::Encode)?;

        self.storage.set(TOKEN_KEY, grant.token.as_str())?;
        if let Err(error) = self.storage.set(IDENTITY_KEY, &record) {
            self.clear_persisted();
            return Err(error.into());
        }

        tracing::info!(user_id = %grant.identity.id, "session established");
        Ok(self.current.insert(grant.identity))
    }

    fn read_entry(&self, key: &str) -> Option<String> {
        self.storage.get(key).unwrap_or_else(|error| {
            tracing::warn!(key, error = %error, "failed to read saved session entry");
            None
        })
    }

    fn clear_persisted(&mut self) {
        for key in [TOKEN_KEY, IDENTITY_KEY] {
            if let Err(error) = self.storage.remove(key) {
                tracing::warn!(key, error = %error, "failed to remove saved session entry");
            }
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
