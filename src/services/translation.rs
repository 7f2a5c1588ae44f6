//! Text translation. Every failure falls back to the input text.

use crate::config::TranslationConfig;

pub const SUPPORTED_LANGUAGES: [(&str, &str); 15] = [
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("zh", "Chinese"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
    ("th", "Thai"),
    ("vi", "Vietnamese"),
    ("id", "Indonesian"),
];

pub fn language_name(code: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
}

#[derive(Debug, Clone)]
pub enum Translator {
    /// Tags the text with the target language. Used in development and tests.
    Mock,
    Disabled,
    #[cfg(feature = "translation")]
    Libre(LibreTranslate),
}

impl Translator {
    pub fn from_config(config: &TranslationConfig) -> Self {
        if !config.enabled {
            return Self::Disabled;
        }
        match config.engine.as_str() {
            "mock" => Self::Mock,
            #[cfg(feature = "translation")]
            "libre" => match LibreTranslate::new(config) {
                Ok(engine) => Self::Libre(engine),
                Err(e) => {
                    tracing::warn!("Translation disabled: {}", e);
                    Self::Disabled
                }
            },
            other => {
                tracing::warn!("Translation engine '{}' unavailable, disabling", other);
                Self::Disabled
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }

    /// Translates `text` into `to`. Unsupported targets, empty input and
    /// engine errors all return `text` unchanged.
    pub async fn translate(&self, text: &str, to: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }
        if language_name(to).is_none() {
            tracing::warn!("Unsupported translation target '{}'", to);
            return text.to_string();
        }
        match self {
            Self::Disabled => text.to_string(),
            Self::Mock => format!("[Translated to {}] {}", to.to_lowercase(), text),
            #[cfg(feature = "translation")]
            Self::Libre(engine) => match engine.translate(text, to).await {
                Ok(translated) => translated,
                Err(e) => {
                    tracing::warn!("Translation failed, returning original text: {}", e);
                    text.to_string()
                }
            },
        }
    }
}

#[cfg(feature = "translation")]
#[derive(Debug, Clone)]
pub struct LibreTranslate {
    client: reqwest::Client,
    endpoint: url::Url,
    api_key: Option<String>,
}

#[cfg(feature = "translation")]
impl LibreTranslate {
    pub fn new(config: &TranslationConfig) -> anyhow::Result<Self> {
        let mut base = url::Url::parse(&config.endpoint)?;
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        let endpoint = base.join("translate")?;
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent("Inkshelf/1.0")
            .build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
        })
    }

    async fn translate(&self, text: &str, to: &str) -> anyhow::Result<String> {
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Response {
            translated_text: String,
        }

        let body = serde_json::json!({
            "q": text,
            "source": "auto",
            "target": to.to_lowercase(),
            "format": "text",
            "api_key": self.api_key,
        });
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        let parsed: Response = response.json().await?;
        Ok(parsed.translated_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_prefixes_target_language() {
        let out = Translator::Mock.translate("Hello", "ES").await;
        assert_eq!(out, "[Translated to es] Hello");
    }

    #[tokio::test]
    async fn disabled_returns_input() {
        assert_eq!(Translator::Disabled.translate("Hello", "fr").await, "Hello");
    }

    #[tokio::test]
    async fn unsupported_target_returns_input() {
        assert_eq!(Translator::Mock.translate("Hello", "xx").await, "Hello");
    }

    #[tokio::test]
    async fn blank_text_is_untouched() {
        assert_eq!(Translator::Mock.translate("  ", "fr").await, "  ");
    }

    #[cfg(feature = "translation")]
    #[tokio::test]
    async fn unreachable_engine_fails_open() {
        let config = TranslationConfig {
            enabled: true,
            engine: "libre".to_string(),
            endpoint: "http://127.0.0.1:9/".to_string(),
            api_key: None,
            timeout_secs: 1,
        };
        let translator = Translator::from_config(&config);
        assert!(translator.is_enabled());
        assert_eq!(translator.translate("Hello", "de").await, "Hello");
    }

    #[test]
    fn disabled_config_builds_disabled_translator() {
        let config = TranslationConfig {
            enabled: false,
            ..TranslationConfig::default()
        };
        assert!(!Translator::from_config(&config).is_enabled());
    }

    #[test]
    fn language_lookup() {
        assert_eq!(language_name("ko"), Some("Korean"));
        assert_eq!(language_name("JA"), Some("Japanese"));
        assert_eq!(language_name("xx"), None);
    }
}
