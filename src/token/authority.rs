use super::{jwt, SigningContext, TokenClaims, TokenKind, TokenPair};
use crate::{
    credential::{self, CredentialError},
    error::{AuthError, StoreError},
    store::{Identity, IdentityStore, NewIdentity, PublicIdentity, Role},
    validation::{normalize_email, valid_email},
};
use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_ACCESS_TTL_SECONDS: i64 = 15 * 60;
pub const DEFAULT_REFRESH_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;
/// Longest lifetime accepted from configuration: one year.
pub const MAX_TTL_SECONDS: i64 = 365 * 24 * 60 * 60;

pub struct LoginCredential {
    pub email: String,
    pub password: SecretString,
}

impl fmt::Debug for LoginCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredential")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Result of a successful login.
#[derive(Debug)]
pub struct Authenticated {
    pub identity: PublicIdentity,
    pub tokens: TokenPair,
}

/// Issues, verifies and rotates token pairs.
///
/// Holds no mutable state; share it behind an `Arc`.
#[derive(Debug)]
pub struct TokenAuthority {
    signing: SigningContext,
    access_ttl_seconds: i64,
    refresh_ttl_seconds: i64,
}

fn now_unix() -> i64 {
    Utc::now().timestamp()
}

impl TokenAuthority {
    #[must_use]
    pub fn new(signing: SigningContext) -> Self {
        Self {
            signing,
            access_ttl_seconds: DEFAULT_ACCESS_TTL_SECONDS,
            refresh_ttl_seconds: DEFAULT_REFRESH_TTL_SECONDS,
        }
    }

    #[must_use]
    pub fn with_access_ttl_seconds(mut self, seconds: i64) -> Self {
        self.access_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_refresh_ttl_seconds(mut self, seconds: i64) -> Self {
        self.refresh_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn access_ttl_seconds(&self) -> i64 {
        self.access_ttl_seconds
    }

    #[must_use]
    pub fn refresh_ttl_seconds(&self) -> i64 {
        self.refresh_ttl_seconds
    }

    fn ttl_seconds(&self, kind: TokenKind) -> i64 {
        match kind {
            TokenKind::Access => self.access_ttl_seconds,
            TokenKind::Refresh => self.refresh_ttl_seconds,
        }
    }

    /// Sign a fresh access/refresh pair for `identity`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Encoding`] if the claims cannot be serialized.
    pub fn issue_token_pair(&self, identity: &Identity) -> Result<TokenPair, AuthError> {
        self.issue_token_pair_at(identity, now_unix())
    }

    /// Same as [`Self::issue_token_pair`] with an explicit issue time.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Encoding`] if the claims cannot be serialized or
    /// the expiry does not fit in an `i64`.
    pub fn issue_token_pair_at(
        &self,
        identity: &Identity,
        now: i64,
    ) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access_token: self.sign(TokenKind::Access, identity, now)?,
            refresh_token: self.sign(TokenKind::Refresh, identity, now)?,
        })
    }

    fn sign(&self, kind: TokenKind, identity: &Identity, now: i64) -> Result<String, AuthError> {
        let expires_at = now.checked_add(self.ttl_seconds(kind)).ok_or_else(|| {
            AuthError::Encoding(format!("{kind} token expiry overflows"))
        })?;
        let claims = TokenClaims::for_identity(identity, now, expires_at);
        jwt::sign_hs256(self.signing.key(kind), &claims)
            .map_err(|err| AuthError::Encoding(err.to_string()))
    }

    /// Check a refresh token's signature and expiry against the refresh secret.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] for any failure; the cause is only logged.
    pub fn verify_refresh_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        self.verify(TokenKind::Refresh, token, now_unix())
    }

    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] for any failure.
    pub fn verify_refresh_token_at(&self, token: &str, now: i64) -> Result<TokenClaims, AuthError> {
        self.verify(TokenKind::Refresh, token, now)
    }

    /// Check an access token's signature and expiry against the access secret.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] for any failure.
    pub fn verify_access_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        self.verify(TokenKind::Access, token, now_unix())
    }

    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] for any failure.
    pub fn verify_access_token_at(&self, token: &str, now: i64) -> Result<TokenClaims, AuthError> {
        self.verify(TokenKind::Access, token, now)
    }

    fn verify(&self, kind: TokenKind, token: &str, now: i64) -> Result<TokenClaims, AuthError> {
        jwt::verify_hs256(token, self.signing.key(kind), now).map_err(|err| {
            debug!(token_kind = %kind, "token rejected: {err}");
            AuthError::InvalidToken
        })
    }

    /// Exchange a valid refresh token for a new pair built from the current
    /// identity record.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidToken`] if the token does not verify.
    /// - [`AuthError::SubjectNotFound`] if the subject no longer exists.
    /// - [`AuthError::StoreUnavailable`] if the lookup fails.
    pub async fn rotate(
        &self,
        refresh_token: &str,
        store: &dyn IdentityStore,
    ) -> Result<TokenPair, AuthError> {
        self.rotate_at(refresh_token, store, now_unix()).await
    }

    /// Same as [`Self::rotate`] with an explicit clock.
    ///
    /// # Errors
    ///
    /// See [`Self::rotate`].
    #[instrument(skip_all)]
    pub async fn rotate_at(
        &self,
        refresh_token: &str,
        store: &dyn IdentityStore,
        now: i64,
    ) -> Result<TokenPair, AuthError> {
        let claims = self.verify_refresh_token_at(refresh_token, now)?;

        let Some(identity) = store.find_by_id(&claims.sub).await? else {
            warn!(subject = %claims.sub, "refresh token subject no longer exists");
            return Err(AuthError::SubjectNotFound);
        };

        debug!(subject = %identity.id, "rotating token pair");
        self.issue_token_pair_at(&identity, now)
    }

    /// Verify an email/password pair and issue tokens.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Authentication`] for an unknown email or a wrong password.
    /// - [`AuthError::StoreUnavailable`] if the lookup fails.
    /// - [`AuthError::Credential`] if the stored hash is corrupt.
    #[instrument(skip_all)]
    pub async fn login(
        &self,
        credential: LoginCredential,
        store: &dyn IdentityStore,
    ) -> Result<Authenticated, AuthError> {
        let email = normalize_email(&credential.email);

        let Some(identity) = store.find_by_email(&email).await? else {
            debug!("login rejected: unknown email");
            return Err(AuthError::Authentication);
        };

        if !verify_blocking(credential.password, identity.password_hash.clone()).await? {
            debug!(subject = %identity.id, "login rejected: password mismatch");
            return Err(AuthError::Authentication);
        }

        let tokens = self.issue_token_pair(&identity)?;
        info!(subject = %identity.id, "login succeeded");

        Ok(Authenticated {
            identity: identity.public(),
            tokens,
        })
    }

    /// Create a new identity. Issues no tokens.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidInput`] for a blank name/password or malformed email.
    /// - [`AuthError::DuplicateEmail`] if the email is taken.
    /// - [`AuthError::StoreUnavailable`] if the store fails.
    #[instrument(skip_all)]
    pub async fn register(
        &self,
        registration: Registration,
        store: &dyn IdentityStore,
    ) -> Result<PublicIdentity, AuthError> {
        let email = normalize_email(&registration.email);
        let display_name = registration.name.trim().to_string();

        if display_name.is_empty() {
            return Err(AuthError::InvalidInput("name is required".to_string()));
        }
        if !valid_email(&email) {
            return Err(AuthError::InvalidInput("invalid email".to_string()));
        }
        if registration.password.expose_secret().is_empty() {
            return Err(AuthError::InvalidInput("password is required".to_string()));
        }

        if store.exists_by_email(&email).await? {
            debug!("registration rejected: email already registered");
            return Err(AuthError::DuplicateEmail);
        }

        let password_hash = hash_blocking(registration.password).await?;

        let created = match store
            .create(NewIdentity {
                email,
                display_name,
                password_hash,
                role: Role::User,
            })
            .await
        {
            Ok(identity) => identity,
            Err(StoreError::Conflict) => return Err(AuthError::DuplicateEmail),
            Err(err) => return Err(err.into()),
        };

        info!(subject = %created.id, "identity registered");

        let mut public = created.public();
        public.created_at = Some(created.created_at);
        Ok(public)
    }
}

async fn hash_blocking(password: SecretString) -> Result<String, AuthError> {
    let hash = tokio::task::spawn_blocking(move || credential::hash_secret(password.expose_secret()))
        .await
        .map_err(|err| CredentialError::Task(err.to_string()))??;
    Ok(hash)
}

async fn verify_blocking(password: SecretString, stored_hash: String) -> Result<bool, AuthError> {
    let matches = tokio::task::spawn_blocking(move || {
        credential::verify_secret(password.expose_secret(), &stored_hash)
    })
    .await
    .map_err(|err| CredentialError::Task(err.to_string()))??;
    Ok(matches)
}
