pub mod tcgdex;

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::slots::CardEntry;

pub use tcgdex::TcgdexClient;

/// Catalog languages the upstream API serves.
pub const ALLOWED_LANGS: &[&str] = &[
    "en", "fr", "es", "it", "de", "pt", "nl", "pl", "ja", "ko", "zh-cn", "ru",
];

pub const DEFAULT_LANG: &str = "pt";

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Invalid language: {0}")]
    InvalidLang(String),
    #[error("{context}: {source}")]
    Upstream {
        context: String,
        #[source]
        source: reqwest::Error,
    },
    /// Lookups that fail without a transport error, e.g. from a stub resolver.
    #[error("{0}")]
    Unavailable(String),
}

/// A validated catalog language code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lang(&'static str);

impl Lang {
    /// Case-insensitive and whitespace tolerant. `None` or blank means the
    /// default language.
    pub fn parse(raw: Option<&str>) -> Result<Self, ResolveError> {
        let wanted = raw
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_LANG.to_string());

        ALLOWED_LANGS
            .iter()
            .find(|code| **code == wanted)
            .map(|code| Lang(*code))
            .ok_or(ResolveError::InvalidLang(wanted))
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl Default for Lang {
    fn default() -> Self {
        Lang(DEFAULT_LANG)
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Card metadata lookups. The catalog methods hand back upstream JSON as-is;
/// [`CardResolver::resolve`] turns a card into the entry stored in a slot.
#[async_trait]
pub trait CardResolver: Send + Sync {
    async fn card(&self, card_id: &str, lang: Lang) -> Result<Value, ResolveError>;

    async fn search_cards(&self, name: &str, lang: Lang) -> Result<Value, ResolveError>;

    async fn sets(&self, lang: Lang) -> Result<Value, ResolveError>;

    async fn set(&self, set_id: &str, lang: Lang) -> Result<Value, ResolveError>;

    async fn resolve(&self, card_id: &str, lang: Lang) -> Result<CardEntry, ResolveError> {
        let card = self.card(card_id, lang).await?;
        Ok(entry_from_card(&card, card_id, lang))
    }
}

/// Map an upstream card object to a slot entry, falling back to what the
/// caller asked for where the upstream omits fields.
pub fn entry_from_card(card: &Value, requested_id: &str, lang: Lang) -> CardEntry {
    let text = |v: Option<&Value>| v.and_then(Value::as_str).map(str::to_string);
    let set = card.get("set").filter(|s| s.is_object());

    let set_id = text(set.and_then(|s| s.get("id")))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| match requested_id.split_once('-') {
            Some((prefix, _)) => prefix.to_string(),
            None => String::new(),
        });

    CardEntry {
        id: text(card.get("id"))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| requested_id.to_string()),
        name: text(card.get("name")).unwrap_or_default(),
        image: text(card.get("image")),
        images: card.get("images").filter(|v| !v.is_null()).cloned(),
        set: text(set.and_then(|s| s.get("name"))).unwrap_or_default(),
        set_id,
        number: card.get("localId").and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }),
        lang: lang.to_string(),
    }
}
