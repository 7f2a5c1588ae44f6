use crate::services::auth;
use crate::services::translation::Translator;
use crate::{Config, Database};
use anyhow::Result;
use chrono::Duration;

pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub translator: Translator,
    pub session_lifetime: Duration,
}

impl AppState {
    pub fn new(config: Config, db: Database) -> Result<Self> {
        let translator = Translator::from_config(&config.translation);
        let session_lifetime = auth::parse_lifetime(&config.session.lifetime)?;
        tracing::info!(
            "Translation {}",
            if translator.is_enabled() {
                "enabled"
            } else {
                "disabled"
            }
        );
        Ok(Self {
            config,
            db,
            translator,
            session_lifetime,
        })
    }

    pub fn with_translator(mut self, translator: Translator) -> Self {
        self.translator = translator;
        self
    }
}
