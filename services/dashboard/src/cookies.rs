//! Cookie-backed field store
//!
//! Each request gets its own jar. Reads see the incoming cookies plus any
//! writes made while handling the request; the jar is handed back to axum
//! so the writes go out as `Set-Cookie` headers.
//!
//! Values are stored plain; the jar percent-encodes them on the way out and
//! decodes incoming ones, so no caller escapes a value itself.

use auth::{FieldStore, SecureField, StoragePolicy};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use parking_lot::Mutex;
use tracing::debug;

/// Path every session cookie is scoped to
const COOKIE_PATH: &str = "/";

/// [`FieldStore`] over the request's cookie jar
#[derive(Debug, Default)]
pub struct CookieFieldStore {
    jar: Mutex<CookieJar>,
}

impl CookieFieldStore {
    pub fn new(jar: CookieJar) -> Self {
        Self {
            jar: Mutex::new(jar),
        }
    }

    /// Current jar, including pending additions and removals
    pub fn jar(&self) -> CookieJar {
        self.jar.lock().clone()
    }
}

impl FieldStore for CookieFieldStore {
    fn read(&self, field: SecureField) -> Option<String> {
        self.jar
            .lock()
            .get(field.name())
            .map(|cookie| cookie.value().to_string())
    }

    fn write(&self, field: SecureField, value: String, policy: &StoragePolicy) {
        let max_age = time::Duration::seconds(policy.max_age.as_secs() as i64);
        let cookie = Cookie::build((field.name(), value))
            .http_only(field.is_server_only())
            .secure(policy.secure)
            .same_site(SameSite::Strict)
            .path(policy.path)
            .max_age(max_age);

        debug!("Setting cookie {}", field.name());
        let mut jar = self.jar.lock();
        *jar = std::mem::take(&mut *jar).add(cookie);
    }

    fn remove(&self, field: SecureField) {
        debug!("Removing cookie {}", field.name());
        let mut jar = self.jar.lock();
        *jar = std::mem::take(&mut *jar).remove(Cookie::build(field.name()).path(COOKIE_PATH));
    }
}
