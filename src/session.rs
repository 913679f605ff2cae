// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session lifecycle: credentials, storage injection, and validity.
//!
//! The Huum API issues non-expiring session tokens and offers no working
//! validation endpoint, so validity can only be established implicitly: a
//! 403 from the status endpoint is the signal to re-authenticate.
//! [`SessionManager`] probes stale sessions that way and otherwise returns
//! the stored record unchanged.
//!
//! Credential persistence is injected through [`CredentialStore`]: the
//! real store (an OS keyring, a file) lives with the embedding application,
//! while [`MemoryStore`] serves tests and keyring-less embedders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::{ApiError, Error, StorageError};

/// Authentication record for the Huum API.
///
/// Created on successful login, destroyed on explicit logout, and never
/// mutated in place; re-authentication replaces the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Opaque session token carried per-request.
    pub session: String,
    /// Account user id.
    pub user_id: String,
    /// Account email.
    pub email: String,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
}

impl Credentials {
    /// Age beyond which a stored session is proactively validated.
    pub const STALENESS_HOURS: i64 = 24;

    /// Returns true if this record is older than the staleness threshold.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.is_stale_at(Utc::now())
    }

    /// Returns true if this record is older than the staleness threshold
    /// at the given instant.
    #[must_use]
    pub fn is_stale_at(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at > chrono::Duration::hours(Self::STALENESS_HOURS)
    }
}

/// Persistence for the credential record, injected by the embedder.
///
/// The record is externally owned and single-writer: it is read once per
/// command invocation and replaced wholesale, never modified in place.
pub trait CredentialStore {
    /// Loads the stored record, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    fn load(&self) -> Result<Option<Credentials>, StorageError>;

    /// Persists a record, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be written.
    fn save(&self, credentials: &Credentials) -> Result<(), StorageError>;

    /// Removes the stored record. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be written.
    fn clear(&self) -> Result<(), StorageError>;
}

/// In-memory [`CredentialStore`] for tests and keyring-less embedders.
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: parking_lot::RwLock<Option<Credentials>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Result<Option<Credentials>, StorageError> {
        Ok(self.record.read().clone())
    }

    fn save(&self, credentials: &Credentials) -> Result<(), StorageError> {
        *self.record.write() = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.record.write() = None;
        Ok(())
    }
}

/// Orchestrates login, credential persistence, and implicit validity
/// checking.
///
/// # Examples
///
/// ```no_run
/// use huumr_lib::client::ApiClient;
/// use huumr_lib::session::{MemoryStore, SessionManager};
///
/// # async fn example() -> huumr_lib::Result<()> {
/// let manager = SessionManager::new(MemoryStore::new());
/// let mut client = ApiClient::new()?;
///
/// let credentials = manager.login(&mut client, "sauna@example.com", "secret").await?;
/// println!("logged in as {}", credentials.email);
///
/// // Later invocations reuse the stored session.
/// let credentials = manager.ensure_session(&mut client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SessionManager<S> {
    store: S,
}

impl<S: CredentialStore> SessionManager<S> {
    /// Creates a manager around the injected store.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the injected store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Authenticates, persists a fresh credential record, and primes the
    /// client with the new session token.
    ///
    /// The record is only persisted after a fully successful login; a
    /// failure leaves the store untouched.
    ///
    /// # Errors
    ///
    /// Propagates login failures from [`ApiClient::login`] and
    /// `Error::Storage` if persisting fails.
    pub async fn login(
        &self,
        client: &mut ApiClient,
        username: &str,
        password: &str,
    ) -> Result<Credentials, Error> {
        let response = client.login(username, password).await?;

        let credentials = Credentials {
            session: response.session().to_string(),
            user_id: response.user_id().to_string(),
            email: response.email().to_string(),
            created_at: Utc::now(),
        };

        self.store.save(&credentials)?;
        Ok(credentials)
    }

    /// Returns a usable credential record, priming the client with its
    /// session token.
    ///
    /// A record older than [`Credentials::STALENESS_HOURS`] is validated
    /// with one status probe, the only validity check the API offers. A
    /// rejected probe clears the store so the caller can prompt for a new
    /// login; every other probe failure passes through verbatim. A fresh
    /// record is returned unchanged, since no refresh exists upstream.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotAuthenticated` when no record is stored or the
    /// stored session was rejected.
    pub async fn ensure_session(&self, client: &mut ApiClient) -> Result<Credentials, Error> {
        let Some(credentials) = self.store.load()? else {
            return Err(Error::NotAuthenticated);
        };

        client.set_session(credentials.session.clone());

        if credentials.is_stale() {
            tracing::debug!(
                age_hours = (Utc::now() - credentials.created_at).num_hours(),
                "stored session is stale, probing status endpoint"
            );
            match client.get_status().await {
                Ok(_) => {}
                Err(Error::Api(ApiError::AuthenticationFailed)) => {
                    tracing::warn!("stored session was rejected, clearing credentials");
                    self.store.clear()?;
                    client.clear_session();
                    return Err(Error::NotAuthenticated);
                }
                Err(other) => return Err(other),
            }
        }

        Ok(credentials)
    }

    /// Removes the stored credential record.
    ///
    /// Returns whether a record existed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the store cannot be read or written.
    pub fn logout(&self) -> Result<bool, Error> {
        let existed = self.store.load()?.is_some();
        if existed {
            self.store.clear()?;
        }
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials_created_at(created_at: DateTime<Utc>) -> Credentials {
        Credentials {
            session: "token".to_string(),
            user_id: "1".to_string(),
            email: "user@example.com".to_string(),
            created_at,
        }
    }

    #[test]
    fn staleness_threshold() {
        let now = Utc::now();
        let fresh = credentials_created_at(now - chrono::Duration::hours(23));
        let stale = credentials_created_at(now - chrono::Duration::hours(25));
        assert!(!fresh.is_stale_at(now));
        assert!(stale.is_stale_at(now));
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        let credentials = credentials_created_at(Utc::now());
        store.save(&credentials).unwrap();
        assert_eq!(store.load().unwrap(), Some(credentials));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn clearing_empty_store_is_fine() {
        let store = MemoryStore::new();
        store.clear().unwrap();
    }

    #[test]
    fn credentials_serde_round_trip() {
        let credentials = credentials_created_at(Utc::now());
        let json = serde_json::to_string(&credentials).unwrap();
        let back: Credentials = serde_json::from_str(&json).unwrap();
        assert_eq!(back, credentials);
    }

    #[tokio::test]
    async fn ensure_session_without_record() {
        let manager = SessionManager::new(MemoryStore::new());
        let mut client = ApiClient::new().unwrap();
        assert!(matches!(
            manager.ensure_session(&mut client).await,
            Err(Error::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn ensure_session_fresh_record_skips_probe() {
        let store = MemoryStore::new();
        let credentials = credentials_created_at(Utc::now());
        store.save(&credentials).unwrap();

        let manager = SessionManager::new(store);
        // Unroutable endpoint: a probe would fail, a fresh record must not
        // need one.
        let mut client = ApiClient::builder()
            .base_url("http://127.0.0.1:9")
            .build()
            .unwrap();

        let returned = manager.ensure_session(&mut client).await.unwrap();
        assert_eq!(returned, credentials);
        assert_eq!(client.session(), Some("token"));
    }

    #[test]
    fn logout_reports_presence() {
        let store = MemoryStore::new();
        store.save(&credentials_created_at(Utc::now())).unwrap();

        let manager = SessionManager::new(store);
        assert!(manager.logout().unwrap());
        assert!(!manager.logout().unwrap());
        assert!(manager.store().load().unwrap().is_none());
    }
}
