//! Token store for the persisted session entries
//!
//! A session is persisted as three named entries with distinct visibility:
//! the two tokens are server-only (HTTP-only cookies in a browser) while the
//! profile stays readable by client-side script so the UI can render it.
//! `FieldStore` is the backend seam; `TokenStore` layers the session
//! operations and the profile encoding on top of it.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, error, warn};

use crate::models::{Session, UserProfile};

/// Lifetime of every persisted entry (7 days)
pub const SESSION_MAX_AGE: Duration = Duration::from_secs(60 * 60 * 24 * 7);

/// Who may read a persisted entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldVisibility {
    /// Only the server-rendering layer (HTTP-only)
    ServerOnly,
    /// Server and client-side script
    ClientReadable,
}

/// One named persisted entry and its visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecureField {
    name: &'static str,
    visibility: FieldVisibility,
}

impl SecureField {
    pub const fn new(name: &'static str, visibility: FieldVisibility) -> Self {
        Self { name, visibility }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn visibility(&self) -> FieldVisibility {
        self.visibility
    }

    pub const fn is_server_only(&self) -> bool {
        matches!(self.visibility, FieldVisibility::ServerOnly)
    }
}

pub const ACCESS_TOKEN: SecureField = SecureField::new("access_token", FieldVisibility::ServerOnly);
pub const REFRESH_TOKEN: SecureField =
    SecureField::new("refresh_token", FieldVisibility::ServerOnly);
pub const USER_DATA: SecureField = SecureField::new("user_data", FieldVisibility::ClientReadable);

/// All entries making up a session
pub const SESSION_FIELDS: [SecureField; 3] = [ACCESS_TOKEN, REFRESH_TOKEN, USER_DATA];

/// Attributes applied to every written entry.
///
/// Entries are always scoped to `/` with SameSite=Strict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePolicy {
    pub max_age: Duration,
    /// Only send over HTTPS; enabled in production
    pub secure: bool,
    pub path: &'static str,
}

impl StoragePolicy {
    pub fn new(secure: bool) -> Self {
        Self {
            max_age: SESSION_MAX_AGE,
            secure,
            path: "/",
        }
    }
}

impl Default for StoragePolicy {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Raw string storage for session entries
pub trait FieldStore: Send + Sync {
    fn read(&self, field: SecureField) -> Option<String>;

    /// Overwrite `field`, applying the field's visibility and `policy`
    fn write(&self, field: SecureField, value: String, policy: &StoragePolicy);

    fn remove(&self, field: SecureField);
}

/// Entry held by [`MemoryFieldStore`]
#[derive(Debug, Clone)]
pub struct StoredEntry {
    pub value: String,
    pub visibility: FieldVisibility,
    pub secure: bool,
    pub path: &'static str,
    pub expires_at: Instant,
}

/// In-process field store honouring max-age expiry
#[derive(Debug, Default)]
pub struct MemoryFieldStore {
    entries: Mutex<HashMap<&'static str, StoredEntry>>,
}

impl MemoryFieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full entry including its attributes, if present and unexpired
    pub fn entry(&self, field: SecureField) -> Option<StoredEntry> {
        let mut entries = self.entries.lock();
        let expired = Instant::now() >= entries.get(field.name())?.expires_at;

        if expired {
            debug!("Entry {} expired", field.name());
            entries.remove(field.name());
            return None;
        }

        entries.get(field.name()).cloned()
    }

    pub fn is_empty(&self) -> bool {
        SESSION_FIELDS
            .iter()
            .all(|field| self.entry(*field).is_none())
    }
}

impl FieldStore for MemoryFieldStore {
    fn read(&self, field: SecureField) -> Option<String> {
        self.entry(field).map(|entry| entry.value)
    }

    fn write(&self, field: SecureField, value: String, policy: &StoragePolicy) {
        let entry = StoredEntry {
            value,
            visibility: field.visibility(),
            secure: policy.secure,
            path: policy.path,
            expires_at: Instant::now() + policy.max_age,
        };
        self.entries.lock().insert(field.name(), entry);
    }

    fn remove(&self, field: SecureField) {
        self.entries.lock().remove(field.name());
    }
}

/// Read access to the stored session
pub trait SessionReader: Send + Sync {
    /// The stored session, or `None` unless both the profile and the
    /// access token are present
    fn get(&self) -> Option<Session>;

    fn access_token(&self) -> Option<String>;

    fn refresh_token(&self) -> Option<String>;
}

/// Read and write access to the stored session.
///
/// Only the session client holds this; everything else gets a
/// [`SessionReader`].
pub trait SessionRepository: SessionReader {
    /// Persist all three entries, replacing any previous session
    fn set(&self, access_token: &str, refresh_token: &str, profile: &UserProfile);

    /// Remove every entry; safe to call when nothing is stored
    fn clear(&self);

    /// Replace the access token only
    fn update_access_token(&self, access_token: &str);
}

/// Session operations over a [`FieldStore`].
///
/// Writes are last-write-wins: a read followed by a write is not atomic
/// against a concurrent writer.
#[derive(Debug)]
pub struct TokenStore<F> {
    fields: F,
    policy: StoragePolicy,
}

impl<F: FieldStore> TokenStore<F> {
    pub fn new(fields: F, policy: StoragePolicy) -> Self {
        Self { fields, policy }
    }

    pub fn fields(&self) -> &F {
        &self.fields
    }

    pub fn policy(&self) -> &StoragePolicy {
        &self.policy
    }

    /// The stored profile, if present and decodable
    pub fn profile(&self) -> Option<UserProfile> {
        let raw = self.fields.read(USER_DATA)?;
        decode_profile(&raw)
    }
}

impl TokenStore<MemoryFieldStore> {
    /// Store backed by process memory, without the `Secure` attribute
    pub fn in_memory() -> Self {
        Self::new(MemoryFieldStore::new(), StoragePolicy::default())
    }
}

impl<F: FieldStore> SessionReader for TokenStore<F> {
    fn get(&self) -> Option<Session> {
        let profile = self.profile()?;
        let access_token = self.fields.read(ACCESS_TOKEN)?;

        Some(Session {
            access_token,
            refresh_token: self.fields.read(REFRESH_TOKEN),
            profile,
        })
    }

    fn access_token(&self) -> Option<String> {
        self.fields.read(ACCESS_TOKEN)
    }

    fn refresh_token(&self) -> Option<String> {
        self.fields.read(REFRESH_TOKEN)
    }
}

impl<F: FieldStore> SessionRepository for TokenStore<F> {
    fn set(&self, access_token: &str, refresh_token: &str, profile: &UserProfile) {
        let Some(encoded) = encode_profile(profile) else {
            return;
        };

        self.fields
            .write(ACCESS_TOKEN, access_token.to_string(), &self.policy);
        self.fields
            .write(REFRESH_TOKEN, refresh_token.to_string(), &self.policy);
        self.fields.write(USER_DATA, encoded, &self.policy);
    }

    fn clear(&self) {
        for field in SESSION_FIELDS {
            self.fields.remove(field);
        }
    }

    fn update_access_token(&self, access_token: &str) {
        self.fields
            .write(ACCESS_TOKEN, access_token.to_string(), &self.policy);
    }
}

/// Profile as stored in `user_data`: plain JSON.
///
/// Escaping for the wire belongs to the field store, so page script that
/// decodes the cookie once reads JSON.
pub fn encode_profile(profile: &UserProfile) -> Option<String> {
    match serde_json::to_string(profile) {
        Ok(json) => Some(json),
        Err(e) => {
            error!("Failed to encode user profile: {}", e);
            None
        }
    }
}

/// Inverse of [`encode_profile`]; malformed input reads as no profile
pub fn decode_profile(raw: &str) -> Option<UserProfile> {
    match serde_json::from_str(raw) {
        Ok(profile) => Some(profile),
        Err(e) => {
            warn!("Discarding malformed user data: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            id: 1,
            username: "a".to_string(),
            email: "a@b.com".to_string(),
            first_name: "Ann".to_string(),
            last_name: "Bee".to_string(),
            role: "user".to_string(),
        }
    }

    #[test]
    fn test_set_then_get_returns_same_triple() {
        let store = TokenStore::in_memory();
        store.set("AT1", "RT1", &profile());

        let session = store.get().expect("session should be stored");
        assert_eq!(session.access_token, "AT1");
        assert_eq!(session.refresh_token.as_deref(), Some("RT1"));
        assert_eq!(session.profile, profile());
    }

    #[test]
    fn test_set_overwrites_previous_session() {
        let store = TokenStore::in_memory();
        store.set("AT1", "RT1", &profile());

        let mut other = profile();
        other.id = 2;
        other.role = "admin".to_string();
        store.set("AT2", "RT2", &other);

        let session = store.get().unwrap();
        assert_eq!(session.access_token, "AT2");
        assert_eq!(session.refresh_token.as_deref(), Some("RT2"));
        assert_eq!(session.profile, other);
    }

    #[test]
    fn test_get_requires_profile_and_access_token() {
        let policy = StoragePolicy::default();

        // profile only
        let store = TokenStore::in_memory();
        store.fields().write(
            USER_DATA,
            encode_profile(&profile()).unwrap(),
            &policy,
        );
        assert!(store.get().is_none());

        // token only
        let store = TokenStore::in_memory();
        store
            .fields()
            .write(ACCESS_TOKEN, "AT1".to_string(), &policy);
        store
            .fields()
            .write(REFRESH_TOKEN, "RT1".to_string(), &policy);
        assert!(store.get().is_none());

        // neither
        assert!(TokenStore::in_memory().get().is_none());
    }

    #[test]
    fn test_malformed_profile_reads_as_logged_out() {
        let store = TokenStore::in_memory();
        let policy = StoragePolicy::default();
        store
            .fields()
            .write(ACCESS_TOKEN, "AT1".to_string(), &policy);
        store
            .fields()
            .write(USER_DATA, "{not-json".to_string(), &policy);

        assert!(store.get().is_none());
        assert_eq!(store.access_token().as_deref(), Some("AT1"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = TokenStore::in_memory();
        store.set("AT1", "RT1", &profile());

        store.clear();
        assert!(store.get().is_none());
        assert!(store.fields().is_empty());

        store.clear();
        assert!(store.get().is_none());
        assert!(store.refresh_token().is_none());
    }

    #[test]
    fn test_update_access_token_preserves_other_entries() {
        let store = TokenStore::in_memory();
        store.set("AT1", "RT1", &profile());
        let refresh_before = store.fields().read(REFRESH_TOKEN);
        let profile_before = store.fields().read(USER_DATA);

        store.update_access_token("AT2");

        assert_eq!(store.access_token().as_deref(), Some("AT2"));
        assert_eq!(store.fields().read(REFRESH_TOKEN), refresh_before);
        assert_eq!(store.fields().read(USER_DATA), profile_before);

        let entry = store.fields().entry(ACCESS_TOKEN).unwrap();
        assert_eq!(entry.visibility, FieldVisibility::ServerOnly);
        assert_eq!(entry.path, "/");
    }

    #[test]
    fn test_fields_carry_visibility_and_secure_flag() {
        let store = TokenStore::new(MemoryFieldStore::new(), StoragePolicy::new(true));
        store.set("AT1", "RT1", &profile());

        let access = store.fields().entry(ACCESS_TOKEN).unwrap();
        let refresh = store.fields().entry(REFRESH_TOKEN).unwrap();
        let user = store.fields().entry(USER_DATA).unwrap();

        assert_eq!(access.visibility, FieldVisibility::ServerOnly);
        assert_eq!(refresh.visibility, FieldVisibility::ServerOnly);
        assert_eq!(user.visibility, FieldVisibility::ClientReadable);
        assert!(access.secure && refresh.secure && user.secure);
        assert!(access.expires_at > Instant::now() + Duration::from_secs(60 * 60 * 24 * 6));
    }

    #[test]
    fn test_expired_entries_are_dropped() {
        let policy = StoragePolicy {
            max_age: Duration::ZERO,
            ..StoragePolicy::default()
        };
        let store = TokenStore::new(MemoryFieldStore::new(), policy);
        store.set("AT1", "RT1", &profile());

        assert!(store.get().is_none());
        assert!(store.fields().is_empty());
    }

    #[test]
    fn test_profile_is_stored_as_plain_json() {
        let store = TokenStore::in_memory();
        store.set("AT1", "RT1", &profile());

        let raw = store.fields().read(USER_DATA).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["username"], "a");
        assert_eq!(value["role"], "user");
        assert_eq!(decode_profile(&raw), Some(profile()));
    }
}
