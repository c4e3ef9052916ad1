//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::sync::Arc;

use leptos::prelude::*;
use got_blood_core::ClientConfig;

use crate::api::Api;
use crate::storage;

/// Read-only configuration and the API client built from it
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ClientConfig>,
    pub api: Api,
}

impl AppContext {
    pub fn new(config: ClientConfig) -> Self {
        let api = Api::new(&config);
        Self { config: Arc::new(config), api }
    }
}

pub fn use_app() -> AppContext {
    expect_context::<AppContext>()
}

/// Hospital signed in through the sign-in page
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub hospital_name: String,
    pub state: String,
}

/// Login state, kept in memory. Only the token is written to storage.
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub session: ReadSignal<Option<Session>>,
    set_session: WriteSignal<Option<Session>>,
}

impl SessionContext {
    pub fn new() -> Self {
        let (session, set_session) = signal(None);
        Self { session, set_session }
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.with(Option::is_some)
    }

    pub fn login(&self, session: Session) {
        if let Err(e) = storage::save_token(&session.token) {
            log::warn!("[Session] Could not persist token: {}", e);
        }
        log::info!("[Session] Signed in as {}", session.hospital_name);
        self.set_session.set(Some(session));
    }

    pub fn logout(&self) {
        if let Err(e) = storage::clear_token() {
            log::warn!("[Session] Could not clear token: {}", e);
        }
        self.set_session.set(None);
    }
}

pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}
