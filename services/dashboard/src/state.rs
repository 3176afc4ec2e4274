//! Application state shared across handlers

use std::sync::Arc;

use auth::{AuthorizedFetcher, SessionClient, StoragePolicy, TokenStore, transport::ApiTransport};
use axum_extra::extract::cookie::CookieJar;
use common::DashboardConfig;

use crate::cookies::CookieFieldStore;

pub type CookieTokenStore = TokenStore<CookieFieldStore>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub transport: Arc<dyn ApiTransport>,
    pub policy: StoragePolicy,
}

impl AppState {
    pub fn new(transport: Arc<dyn ApiTransport>, policy: StoragePolicy) -> Self {
        Self { transport, policy }
    }

    pub fn from_config(transport: Arc<dyn ApiTransport>, config: &DashboardConfig) -> Self {
        Self::new(transport, StoragePolicy::new(config.is_production()))
    }

    /// Session handles bound to one request's cookies
    pub fn session(&self, jar: CookieJar) -> RequestSession {
        let store = Arc::new(TokenStore::new(
            CookieFieldStore::new(jar),
            self.policy.clone(),
        ));

        RequestSession {
            client: SessionClient::new(Arc::clone(&store), Arc::clone(&self.transport)),
            fetcher: AuthorizedFetcher::new(Arc::clone(&store), Arc::clone(&self.transport)),
            store,
        }
    }
}

/// Session client and fetcher sharing one request's cookie jar
pub struct RequestSession {
    store: Arc<CookieTokenStore>,
    pub client: SessionClient<CookieTokenStore>,
    pub fetcher: AuthorizedFetcher<CookieTokenStore>,
}

impl RequestSession {
    /// Jar to return with the response so cookie changes reach the browser
    pub fn jar(&self) -> CookieJar {
        self.store.fields().jar()
    }
}
