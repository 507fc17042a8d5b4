pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;

use std::sync::Arc;

use config::Settings;
use services::{jwt::JwtVerifier, person_client::PersonClient, store::RecordStore};

/// Shared application state: token verifier, registry client, record store.
#[derive(Clone)]
pub struct AppState {
    pub jwt: JwtVerifier,
    pub person_client: Arc<PersonClient>,
    pub store: Arc<RecordStore>,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            jwt: JwtVerifier::new(&settings.auth.secret),
            person_client: Arc::new(PersonClient::new(&settings.person_service)),
            store: Arc::new(RecordStore::new(settings.store.data_file.clone())),
        }
    }
}
