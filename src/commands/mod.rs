pub mod config;
pub mod history;
pub mod pad;
pub mod session;

use crate::models::config::AppConfig;
use crate::services::classifier::{Classifier, HttpClassifier};
use crate::services::history_store::HistoryStore;
use crate::services::pad::PadState;
use crate::services::recognizer::Recognizer;

/// Long-lived collaborators shared by every command
pub struct AppContext<C: Classifier = HttpClassifier> {
    pub config: AppConfig,
    pub recognizer: Recognizer<C>,
    pub store: HistoryStore,
}

impl AppContext<HttpClassifier> {
    /// Wire up the HTTP classifier and on-disk history from `config`
    pub fn from_config(config: AppConfig) -> Result<Self, String> {
        let classifier = HttpClassifier::new(&config.server)?;
        let store = HistoryStore::new(&config.history)?;
        Ok(Self::new(config, classifier, store))
    }
}

impl<C: Classifier> AppContext<C> {
    pub fn new(config: AppConfig, classifier: C, store: HistoryStore) -> Self {
        let recognizer = Recognizer::new(classifier, &config.recognition);
        Self {
            config,
            recognizer,
            store,
        }
    }

    /// Fresh pad with the persisted history loaded once
    pub fn initial_state(&self) -> Result<PadState, String> {
        PadState::new(&self.config.canvas, self.store.load())
    }
}
